use crate::{ast::{ast::{FuncDef, VarDecl}, statements::{Stmt, StmtKind}}, errors::errors::Error, lexer::tokens::TokenKind, parser::{expr::parse_expr, lookups::BindingPower}, Span};

use super::{parser::Parser, types::parse_declared_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let kind = parser.current_token_kind();
    if let Some(handler) = parser.get_stmt_lookup().get(&kind).copied() {
        return handler(parser);
    }

    if kind.starts_declaration() {
        Err(parser.detailed_error("declarations must come before statements in a block"))
    } else {
        Err(parser.detailed_error("expected a statement"))
    }
}

/// Parses the `var x` / `int x` / `bool x` head shared by declarations and
/// parameters.
fn parse_typed_name(parser: &mut Parser) -> Result<VarDecl, Error> {
    let start = parser.get_position();
    let declared_type = parse_declared_type(parser)?;

    let error = parser.detailed_error("expected identifier during variable declaration");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    Ok(VarDecl {
        name,
        declared_type,
        span: Span {
            start,
            end: parser.last_position(),
        },
    })
}

pub fn parse_var_decl(parser: &mut Parser) -> Result<VarDecl, Error> {
    let decl = parse_typed_name(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(decl)
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut declarations = Vec::new();
    while parser.current_token_kind().starts_declaration() {
        declarations.push(parse_var_decl(parser)?);
    }

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly && parser.has_tokens() {
        statements.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Stmt::new(
        StmtKind::Block { declarations, statements },
        Span {
            start,
            end: parser.last_position(),
        },
    ))
}

pub fn parse_assign_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let target = parser.expect(TokenKind::Identifier)?;

    let error = parser.detailed_error("expected `:=` after assignment target");
    parser.expect_error(TokenKind::Assignment, Some(error))?;

    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::new(
        StmtKind::Assign { target: target.value, value },
        Span {
            start: target.span.start,
            end: parser.last_position(),
        },
    ))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_expr(parser, BindingPower::Default)?;
    let then_branch = parse_stmt(parser)?;

    let else_branch = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(Box::new(parse_stmt(parser)?))
    } else {
        None
    };

    Ok(Stmt::new(
        StmtKind::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch,
        },
        Span {
            start,
            end: parser.last_position(),
        },
    ))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_expr(parser, BindingPower::Default)?;
    let body = parse_stmt(parser)?;

    Ok(Stmt::new(
        StmtKind::While {
            condition,
            body: Box::new(body),
        },
        Span {
            start,
            end: parser.last_position(),
        },
    ))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::new(
        StmtKind::Return { value },
        Span {
            start,
            end: parser.last_position(),
        },
    ))
}

pub fn parse_func_def(parser: &mut Parser) -> Result<FuncDef, Error> {
    let start = parser.expect(TokenKind::Func)?.span.start;

    let name = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::OpenParen)?;

    let mut params = Vec::new();
    if parser.current_token_kind() != TokenKind::CloseParen {
        params.push(parse_typed_name(parser)?);
        while parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            params.push(parse_typed_name(parser)?);
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let body = parse_stmt(parser)?;

    Ok(FuncDef {
        name,
        params,
        body,
        span: Span {
            start,
            end: parser.last_position(),
        },
    })
}
