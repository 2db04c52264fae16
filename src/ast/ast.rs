use crate::Span;

use super::{statements::Stmt, types::DeclaredType};

/// Program
///
/// A whole compilation unit. The parser sorts top-level items into the
/// three lists; the checker visits functions first, then globals, then
/// the main statement sequence.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub functions: Vec<FuncDef>,
    pub globals: Vec<VarDecl>,
    pub main: Vec<Stmt>,
}

/// Function Definition
///
/// The return type is never written in source; it is always inferred.
#[derive(Debug, Clone)]
pub struct FuncDef {
    pub name: String,
    pub params: Vec<VarDecl>,
    pub body: Stmt,
    pub span: Span,
}

/// Variable Declaration
///
/// Used for globals, block locals and function parameters.
/// `declared_type` is `None` for `var x`.
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub name: String,
    pub declared_type: Option<DeclaredType>,
    pub span: Span,
}

impl VarDecl {
    pub fn new(name: &str, declared_type: Option<DeclaredType>, span: Span) -> Self {
        VarDecl {
            name: name.to_string(),
            declared_type,
            span,
        }
    }
}
