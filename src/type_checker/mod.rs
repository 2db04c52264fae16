//! Type inference for Simple programs.
//!
//! Types are inferred with unification over a union-find arena:
//!
//! - [`type_expr`] holds the type nodes and the union-find operations
//! - [`environment`] is the scoped symbol table
//! - [`unify`] makes two types equal or reports why they cannot be
//! - [`type_checker`] walks the program and emits constraints
//!
//! Checking stops at the first error.

pub mod environment;
pub mod type_checker;
pub mod type_expr;
pub mod unify;

#[cfg(test)]
mod tests;
