#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::{errors::errors::{Error, ErrorTip}, lexer::lexer::tokenize, parser::parser::parse, type_checker::type_checker::{type_check, TypeChecker}};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

/// Byte offset into a source file, with the file's name.
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Lexes, parses and type checks a whole source file.
pub fn check_source(source: &str, file_name: &str) -> Result<TypeChecker, Error> {
    let tokens = tokenize(source.to_string(), Some(file_name.to_string()))?;
    let (_, program) = parse(tokens, Rc::new(file_name.to_string()));
    type_check(&program?)
}

/// Finds the line containing byte offset `position`.
///
/// Returns the 1-based line number, the line text and the offset within
/// that line. An offset at the very end of the source maps to the end of
/// the last line, which is where errors about a missing token point.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;
    if pos > content.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;
    let mut last = None;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((line_number, line.to_string(), pos - start));
        }

        last = Some((line_number, line.to_string(), pos - start));
        start = end;
        line_number += 1;
    }

    last
}

/// Renders an error the way the driver prints it:
///
/// ```text
/// Error: TypeMismatch (Expected type `int`, received `bool`)
/// -> main.simple
///   |
/// 2 | x := true;
///   | -----^
/// ```
///
/// The source excerpt is left out when the position is not inside `source`.
pub fn format_error(error: &Error, source: &str, file: &str) -> String {
    let mut output = String::new();

    if let ErrorTip::None = error.get_tip() {
        output.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        output.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }
    output.push_str(&format!("-> {}\n", file));

    let (line, line_text, line_pos) = match get_line_at_position(source, error.get_position().0) {
        Some(found) => found,
        None => return output,
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    output.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    output.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    output.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    output
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::errors::ErrorImpl;

    #[test]
    fn test_get_line_at_position() {
        let content = "Hello, world!\nint x;\n\n    x := 1;\n";

        let (line_number, line, line_pos) = get_line_at_position(content, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = get_line_at_position(content, 26).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "    x := 1;\n");
        assert_eq!(line_pos, 4);
    }

    #[test]
    fn test_get_line_at_end_of_source() {
        let (line_number, line, line_pos) = get_line_at_position("x := 1", 6).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "x := 1");
        assert_eq!(line_pos, 6);
    }

    #[test]
    fn test_get_line_out_of_range() {
        assert_eq!(get_line_at_position("x", 5), None);
        assert_eq!(get_line_at_position("", 0), None);
    }

    #[test]
    fn test_check_source_passes() {
        let checker = check_source("int x; x := 1 + 2;", "ok.simple").unwrap();
        assert_eq!(checker.global_types(), vec![("x".to_string(), "int".to_string())]);
    }

    #[test]
    fn test_check_source_reports_front_end_errors() {
        let error = check_source("int x; x := @;", "bad.simple").unwrap_err();
        assert_eq!(error.get_error_name(), "UnrecognisedToken");

        let error = check_source("int x; x := ;", "bad.simple").unwrap_err();
        assert!(matches!(error.kind(), ErrorImpl::UnexpectedTokenDetailed { .. } | ErrorImpl::UnexpectedToken { .. }));
    }

    #[test]
    fn test_format_error_points_at_position() {
        let source = "int x;\n  x := true;\n";
        let error = check_source(source, "main.simple").unwrap_err();
        let output = format_error(&error, source, "main.simple");

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Error: TypeMismatch (Expected type `int`, received `bool`)");
        assert_eq!(lines[1], "-> main.simple");
        assert_eq!(lines[2], "  |");
        assert_eq!(lines[3], "2 | x := true;");
        assert_eq!(lines[4], "  | -----^");
    }

    #[test]
    fn test_format_error_without_source_line() {
        let error = Error::new(ErrorImpl::ReturnOutsideFunction, Position(100, Rc::new("main.simple".to_string())));
        let output = format_error(&error, "", "main.simple");
        assert_eq!(output.lines().count(), 2);
    }
}
