/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Program, function definitions and variable declarations
/// - expressions: Expression kinds and binary operators
/// - statements: Statement kinds
/// - types: Type annotations that can be written in source
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
