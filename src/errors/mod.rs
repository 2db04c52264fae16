//! Error types and error handling for the checker.
//!
//! This module defines the single error type used by every stage:
//!
//! - Error structures with source position information
//! - Front-end variants (lexing and parsing)
//! - Type-checking variants (mismatch, arity, scoping, misplaced return)
//! - Helpful error messages and suggestions

pub mod errors;
