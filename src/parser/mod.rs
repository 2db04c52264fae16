//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into a `Program`. It uses a Pratt parser for expressions with operator
//! precedence and handles:
//!
//! - Top-level items (function definitions, globals, main statements)
//! - Statement parsing (blocks, assignment, control flow, return)
//! - Expression parsing (binary ops, function calls, literals)
//! - Declaration keywords (`var`, `int`, `bool`)
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;
