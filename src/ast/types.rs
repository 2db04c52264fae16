//! Type annotations as written in source.
//!
//! Simple only has two nameable types. Everything else (function types,
//! undetermined types) exists only inside the type checker.

use std::fmt::Display;

/// A type that can be written in a declaration (`int x;`, `bool b;`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    Integer,
    Boolean,
}

impl Display for DeclaredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclaredType::Integer => write!(f, "int"),
            DeclaredType::Boolean => write!(f, "bool"),
        }
    }
}
