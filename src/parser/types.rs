//! Type annotation parsing.
//!
//! Declarations and parameters open with one of `var`, `int` or `bool`.
//! `var` leaves the type to inference.

use crate::{ast::types::DeclaredType, errors::errors::Error, lexer::tokens::TokenKind};

use super::parser::Parser;

/// Consumes a declaration keyword and returns the type it names, if any.
pub fn parse_declared_type(parser: &mut Parser) -> Result<Option<DeclaredType>, Error> {
    let declared_type = match parser.current_token_kind() {
        TokenKind::Var => None,
        TokenKind::Int => Some(DeclaredType::Integer),
        TokenKind::Bool => Some(DeclaredType::Boolean),
        _ => return Err(parser.detailed_error("expected `var`, `int` or `bool`")),
    };

    parser.advance();
    Ok(declared_type)
}
