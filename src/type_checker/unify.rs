//! Unification over the type arena.
//!
//! ```text
//! unify(t0, int)               => t0 := int
//! unify(t0, t1)                => t0 := t1
//! unify(int, bool)             => TypeMismatch
//! unify((t0) -> t1, (int) -> bool)
//!                              => t1 := bool, t0 := int
//! unify((int) -> t0, () -> t0) => ArityMismatch
//! unify(t0, (t0) -> int)       => TypeMismatch (infinite type)
//! ```
//!
//! Errors carry no position; the checker attaches the position of the
//! expression or statement that asked for the constraint.

use log::debug;

use crate::errors::errors::ErrorImpl;

use super::type_expr::{TypeArena, TypeExpr, TypeId};

pub fn unify(types: &mut TypeArena, expected: TypeId, received: TypeId) -> Result<(), ErrorImpl> {
    let expected = types.find(expected);
    let received = types.find(received);

    if expected == received {
        return Ok(());
    }

    if types.is_unbound_variable(expected) {
        return bind_variable(types, expected, received);
    }
    if types.is_unbound_variable(received) {
        return bind_variable(types, received, expected);
    }

    match (types.get(expected).clone(), types.get(received).clone()) {
        (TypeExpr::Constant(a), TypeExpr::Constant(b)) => {
            if a == b {
                Ok(())
            } else {
                Err(mismatch(types, expected, received))
            }
        }
        (
            TypeExpr::Function { return_type: expected_return, params: expected_params },
            TypeExpr::Function { return_type: received_return, params: received_params },
        ) => {
            if expected_params.len() != received_params.len() {
                return Err(ErrorImpl::ArityMismatch {
                    expected: expected_params.len(),
                    received: received_params.len(),
                });
            }

            unify(types, expected_return, received_return)?;
            for (expected_param, received_param) in expected_params.into_iter().zip(received_params) {
                unify(types, expected_param, received_param)?;
            }
            Ok(())
        }
        _ => Err(mismatch(types, expected, received)),
    }
}

fn bind_variable(types: &mut TypeArena, variable: TypeId, target: TypeId) -> Result<(), ErrorImpl> {
    if types.occurs(variable, target) {
        return Err(ErrorImpl::TypeMismatch {
            expected: types.display(variable),
            received: format!("{} (infinite type)", types.display(target)),
        });
    }

    debug!("unify: {} := {}", types.display(variable), types.display(target));
    types.bind(variable, target);
    Ok(())
}

fn mismatch(types: &TypeArena, expected: TypeId, received: TypeId) -> ErrorImpl {
    ErrorImpl::TypeMismatch {
        expected: types.display(expected),
        received: types.display(received),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::types::DeclaredType;

    #[test]
    fn test_variable_on_either_side_is_bound() {
        let mut types = TypeArena::new();
        let int = types.constant(DeclaredType::Integer);
        let a = types.fresh_var();
        let b = types.fresh_var();

        unify(&mut types, a, int).unwrap();
        unify(&mut types, int, b).unwrap();
        assert_eq!(types.find(a), int);
        assert_eq!(types.find(b), int);
    }

    #[test]
    fn test_expected_variable_is_bound_to_received() {
        let mut types = TypeArena::new();
        let a = types.fresh_var();
        let b = types.fresh_var();

        unify(&mut types, a, b).unwrap();
        assert_eq!(types.find(a), b);
        assert!(types.is_unbound_variable(b));
    }

    #[test]
    fn test_constant_mismatch() {
        let mut types = TypeArena::new();
        let int = types.constant(DeclaredType::Integer);
        let bool = types.constant(DeclaredType::Boolean);

        assert_eq!(
            unify(&mut types, int, bool),
            Err(ErrorImpl::TypeMismatch {
                expected: "int".to_string(),
                received: "bool".to_string(),
            })
        );
    }

    #[test]
    fn test_functions_unify_component_wise() {
        let mut types = TypeArena::new();
        let int = types.constant(DeclaredType::Integer);
        let bool = types.constant(DeclaredType::Boolean);
        let a = types.fresh_var();
        let b = types.fresh_var();
        let expected = types.function(b, vec![a]);
        let received = types.function(bool, vec![int]);

        unify(&mut types, expected, received).unwrap();
        assert_eq!(types.display(expected), "(int) -> bool");
    }

    #[test]
    fn test_function_arity_mismatch() {
        let mut types = TypeArena::new();
        let int = types.constant(DeclaredType::Integer);
        let a = types.fresh_var();
        let expected = types.function(a, vec![int]);
        let received = types.function(a, vec![]);

        assert_eq!(
            unify(&mut types, expected, received),
            Err(ErrorImpl::ArityMismatch { expected: 1, received: 0 })
        );
    }

    #[test]
    fn test_function_against_constant() {
        let mut types = TypeArena::new();
        let int = types.constant(DeclaredType::Integer);
        let f = types.function(int, vec![]);

        assert!(matches!(
            unify(&mut types, int, f),
            Err(ErrorImpl::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_infinite_type_is_rejected() {
        let mut types = TypeArena::new();
        let int = types.constant(DeclaredType::Integer);
        let a = types.fresh_var();
        let f = types.function(int, vec![a]);

        assert_eq!(
            unify(&mut types, a, f),
            Err(ErrorImpl::TypeMismatch {
                expected: "t0".to_string(),
                received: "(t0) -> int (infinite type)".to_string(),
            })
        );
        assert!(types.is_unbound_variable(a));
    }
}
