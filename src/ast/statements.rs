use crate::Span;

use super::{ast::VarDecl, expressions::Expr};

/// Statement Kinds
#[derive(Debug, Clone)]
pub enum StmtKind {
    VarDecl(VarDecl),
    /// Declarations always precede statements inside a block.
    Block {
        declarations: Vec<VarDecl>,
        statements: Vec<Stmt>,
    },
    Assign {
        target: String,
        value: Expr,
    },
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    Return {
        value: Expr,
    },
}

#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }
}
