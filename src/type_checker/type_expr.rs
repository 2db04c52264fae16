//! Type expressions and the union-find arena that owns them.
//!
//! Every type the checker reasons about lives in a [`TypeArena`] and is
//! referred to by a [`TypeId`]. Variables are union-find nodes: binding a
//! variable links it to another type, and [`TypeArena::find`] follows those
//! links to the class representative, compressing the path as it goes.
//! Because every holder of a variable shares the same `TypeId`, a binding
//! or a compressed path is immediately visible to all of them.

use log::trace;

use crate::ast::types::DeclaredType;

/// Handle to a node in a [`TypeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(usize);

#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Constant(DeclaredType),
    /// `id` is the display id, unique within one arena.
    Variable { id: usize, binding: Option<TypeId> },
    Function { return_type: TypeId, params: Vec<TypeId> },
}

#[derive(Debug)]
pub struct TypeArena {
    nodes: Vec<TypeExpr>,
    next_var_id: usize,
    int: TypeId,
    bool: TypeId,
}

impl Default for TypeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeArena {
    pub fn new() -> Self {
        let nodes = vec![
            TypeExpr::Constant(DeclaredType::Integer),
            TypeExpr::Constant(DeclaredType::Boolean),
        ];

        TypeArena {
            nodes,
            next_var_id: 0,
            int: TypeId(0),
            bool: TypeId(1),
        }
    }

    fn push(&mut self, expr: TypeExpr) -> TypeId {
        self.nodes.push(expr);
        TypeId(self.nodes.len() - 1)
    }

    /// Constants are interned, so equal declared types share one node.
    pub fn constant(&self, declared_type: DeclaredType) -> TypeId {
        match declared_type {
            DeclaredType::Integer => self.int,
            DeclaredType::Boolean => self.bool,
        }
    }

    pub fn fresh_var(&mut self) -> TypeId {
        let id = self.next_var_id;
        self.next_var_id += 1;
        self.push(TypeExpr::Variable { id, binding: None })
    }

    /// Either the declared constant or a fresh variable for `var` declarations.
    pub fn declared_or_fresh(&mut self, declared_type: Option<DeclaredType>) -> TypeId {
        match declared_type {
            Some(declared_type) => self.constant(declared_type),
            None => self.fresh_var(),
        }
    }

    pub fn function(&mut self, return_type: TypeId, params: Vec<TypeId>) -> TypeId {
        self.push(TypeExpr::Function { return_type, params })
    }

    pub fn get(&self, id: TypeId) -> &TypeExpr {
        &self.nodes[id.0]
    }

    /// Number of variables created so far.
    pub fn variable_count(&self) -> usize {
        self.next_var_id
    }

    pub fn is_unbound_variable(&self, id: TypeId) -> bool {
        matches!(self.get(id), TypeExpr::Variable { binding: None, .. })
    }

    /// Canonicalize `id`: returns the representative of its class and
    /// points every variable on the way directly at it.
    pub fn find(&mut self, id: TypeId) -> TypeId {
        let root = self.resolve(id);

        let mut current = id;
        while current != root {
            match &mut self.nodes[current.0] {
                TypeExpr::Variable { binding: Some(next), .. } => {
                    let following = *next;
                    *next = root;
                    current = following;
                }
                _ => break,
            }
        }

        root
    }

    /// Like [`TypeArena::find`] but without path compression.
    pub fn resolve(&self, id: TypeId) -> TypeId {
        let mut current = id;
        while let TypeExpr::Variable { binding: Some(next), .. } = self.get(current) {
            current = *next;
        }
        current
    }

    /// Binds an unbound variable to `target`. Bindings are never undone.
    ///
    /// # Panics
    ///
    /// If `variable` is not an unbound variable, or `target` is `variable`
    /// itself. Both would corrupt the union-find structure.
    pub fn bind(&mut self, variable: TypeId, target: TypeId) {
        assert_ne!(variable, target, "a type variable cannot be bound to itself");

        match &mut self.nodes[variable.0] {
            TypeExpr::Variable { id, binding: binding @ None } => {
                trace!("bind t{} := node {}", id, target.0);
                *binding = Some(target);
            }
            other => panic!("bind called on a node that is not an unbound variable: {:?}", other),
        }
    }

    /// Whether `variable` appears anywhere inside `ty` once both are resolved.
    pub fn occurs(&self, variable: TypeId, ty: TypeId) -> bool {
        let variable = self.resolve(variable);
        let ty = self.resolve(ty);

        if ty == variable {
            return true;
        }

        match self.get(ty) {
            TypeExpr::Function { return_type, params } => {
                self.occurs(variable, *return_type)
                    || params.iter().any(|param| self.occurs(variable, *param))
            }
            _ => false,
        }
    }

    /// Renders a type for diagnostics: `int`, `bool`, `t3`, `(int, t0) -> bool`.
    pub fn display(&self, id: TypeId) -> String {
        match self.get(self.resolve(id)) {
            TypeExpr::Constant(declared_type) => declared_type.to_string(),
            TypeExpr::Variable { id, .. } => format!("t{}", id),
            TypeExpr::Function { return_type, params } => {
                let params = params
                    .iter()
                    .map(|param| self.display(*param))
                    .collect::<Vec<String>>()
                    .join(", ");
                format!("({}) -> {}", params, self.display(*return_type))
            }
        }
    }
}
