use std::collections::HashMap;

use log::trace;

use crate::{errors::errors::{Error, ErrorImpl}, Position};

use super::type_expr::TypeId;

/// Lexically scoped symbol table.
///
/// The first scope is the global scope; it is opened on creation and is
/// never popped by the checker. A name may appear once per scope, but an
/// inner scope may shadow an outer one.
#[derive(Debug)]
pub struct Environment {
    scopes: Vec<HashMap<String, TypeId>>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            scopes: vec![HashMap::new()],
        }
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push(HashMap::new());
        trace!("enter scope (depth {})", self.scopes.len());
    }

    /// # Panics
    ///
    /// If no scope is open. Scopes are always entered and exited in pairs,
    /// so this only happens if that pairing is broken.
    pub fn exit_scope(&mut self) {
        if self.scopes.pop().is_none() {
            panic!("exit_scope called with no open scope");
        }
        trace!("exit scope (depth {})", self.scopes.len());
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn declare(&mut self, name: &str, ty: TypeId, position: Position) -> Result<(), Error> {
        let scope = match self.scopes.last_mut() {
            Some(scope) => scope,
            None => panic!("declare called with no open scope"),
        };

        if scope.contains_key(name) {
            Err(Error::new(ErrorImpl::DuplicateDeclaration { name: name.to_string() }, position))
        } else {
            scope.insert(name.to_string(), ty);
            Ok(())
        }
    }

    pub fn lookup(&self, name: &str, position: Position) -> Result<TypeId, Error> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).copied())
            .ok_or_else(|| Error::new(ErrorImpl::UndeclaredName { name: name.to_string() }, position))
    }

    /// Entries of the outermost scope, sorted by name.
    pub fn global_bindings(&self) -> Vec<(String, TypeId)> {
        let mut bindings = self
            .scopes
            .first()
            .map(|scope| {
                scope
                    .iter()
                    .map(|(name, ty)| (name.clone(), *ty))
                    .collect::<Vec<(String, TypeId)>>()
            })
            .unwrap_or_default();

        bindings.sort_by(|a, b| a.0.cmp(&b.0));
        bindings
    }
}
