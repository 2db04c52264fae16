use std::{fs::read_to_string, path::{Path, PathBuf}, process, rc::Rc, time::Instant};

use clap::Parser as ClapParser;
use colored::Colorize;
use simple_check::{errors::errors::Error, format_error, lexer::lexer::tokenize, parser::parser::parse, type_checker::type_checker::type_check};

#[derive(ClapParser)]
#[command(name = "simple-check", about = "Type checker for the Simple language")]
struct Cli {
    /// Source file to check
    file: PathBuf,
    /// Print the global scope after a successful check
    #[arg(long)]
    globals: bool,
    /// Pretty-print the parsed program before checking
    #[arg(long)]
    dump_ast: bool,
    /// Print how long each phase took
    #[arg(long)]
    timings: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.to_string_lossy().into_owned());

    let file_contents = match read_to_string(&cli.file) {
        Ok(contents) => contents,
        Err(error) => {
            eprintln!("{} cannot read {}: {}", "Error:".red(), cli.file.display(), error);
            process::exit(2);
        }
    };

    let start = Instant::now();

    let tokens = match tokenize(file_contents.clone(), Some(file_name.clone())) {
        Ok(tokens) => tokens,
        Err(error) => fail(&error, &file_contents, &cli.file),
    };

    if cli.timings {
        println!("Tokenized in {:?}", start.elapsed());
    }

    let parse_start = Instant::now();
    let (_, program) = parse(tokens, Rc::new(file_name));

    if cli.timings {
        println!("Parsed in {:?}", parse_start.elapsed());
    }

    let program = match program {
        Ok(program) => program,
        Err(error) => fail(&error, &file_contents, &cli.file),
    };

    if cli.dump_ast {
        println!("{:#?}", program);
    }

    let type_check_start = Instant::now();
    let type_checker = type_check(&program);

    if cli.timings {
        println!("Type checked in {:?}", type_check_start.elapsed());
        println!("Total time: {:?}", start.elapsed());
    }

    let type_checker = match type_checker {
        Ok(type_checker) => type_checker,
        Err(error) => fail(&error, &file_contents, &cli.file),
    };

    if cli.globals {
        println!("Global scope:");
        for (name, ty) in type_checker.global_types() {
            println!("  {} : {}", name, ty);
        }
    }

    println!("Result: {} - program is well-typed.", "PASS".green().bold());
}

fn fail(error: &Error, source: &str, file: &Path) -> ! {
    print!("{}", format_error(error, source, &file.to_string_lossy()));
    println!("Result: {}", "FAIL".red().bold());
    process::exit(1);
}
