use log::debug;

use crate::{ast::{ast::{FuncDef, Program, VarDecl}, expressions::{BinaryOperator, Expr, ExprKind}, statements::{Stmt, StmtKind}, types::DeclaredType}, errors::errors::{Error, ErrorImpl}, Position};

use super::{environment::Environment, type_expr::{TypeArena, TypeExpr, TypeId}, unify::unify};

/// State of one checking session.
///
/// Owns every type created during the check and the symbol table, so two
/// sessions never share variable numbering or bindings.
#[derive(Debug, Default)]
pub struct TypeChecker {
    pub types: TypeArena,
    pub environment: Environment,
    /// Return type of the function whose body is being checked.
    /// `None` outside function bodies, where `return` is rejected.
    pub return_type: Option<TypeId>,
}

impl TypeChecker {
    pub fn new() -> Self {
        TypeChecker {
            types: TypeArena::new(),
            environment: Environment::new(),
            return_type: None,
        }
    }

    pub fn int(&self) -> TypeId {
        self.types.constant(DeclaredType::Integer)
    }

    pub fn bool(&self) -> TypeId {
        self.types.constant(DeclaredType::Boolean)
    }

    pub fn unify(&mut self, expected: TypeId, received: TypeId, position: &Position) -> Result<(), Error> {
        unify(&mut self.types, expected, received).map_err(|error| Error::new(error, position.clone()))
    }

    /// Runs `check` inside a fresh scope. The scope is popped whether or
    /// not `check` succeeds.
    pub fn with_scope<T, F>(&mut self, check: F) -> Result<T, Error>
    where
        F: FnOnce(&mut TypeChecker) -> Result<T, Error>,
    {
        self.environment.enter_scope();
        let result = check(self);
        self.environment.exit_scope();
        result
    }

    /// The global scope as `(name, resolved type)` pairs, sorted by name.
    pub fn global_types(&self) -> Vec<(String, String)> {
        self.environment
            .global_bindings()
            .into_iter()
            .map(|(name, ty)| (name, self.types.display(ty)))
            .collect()
    }

    /// Resolved type of a name visible from the current scope.
    pub fn type_of(&self, name: &str) -> Option<String> {
        self.environment
            .lookup(name, Position::null())
            .ok()
            .map(|ty| self.types.display(ty))
    }
}

pub fn register_function_signature(type_checker: &mut TypeChecker, func: &FuncDef) -> Result<TypeId, Error> {
    let params = func
        .params
        .iter()
        .map(|param| type_checker.types.declared_or_fresh(param.declared_type))
        .collect::<Vec<TypeId>>();
    let return_type = type_checker.types.fresh_var();
    let signature = type_checker.types.function(return_type, params);

    type_checker.environment.declare(&func.name, signature, func.span.start.clone())?;
    debug!("registered `{}`: {}", func.name, type_checker.types.display(signature));

    Ok(signature)
}

/// Checks a function body against the signature already declared for it.
pub fn type_check_function(type_checker: &mut TypeChecker, func: &FuncDef) -> Result<(), Error> {
    let position = func.span.start.clone();
    let signature = type_checker.environment.lookup(&func.name, position.clone())?;
    let signature = type_checker.types.find(signature);

    let (return_type, params) = match type_checker.types.get(signature) {
        TypeExpr::Function { return_type, params } => (*return_type, params.clone()),
        _ => {
            return Err(Error::new(ErrorImpl::NotCallable {
                name: func.name.clone(),
                found: type_checker.types.display(signature),
            }, position));
        }
    };

    if params.len() != func.params.len() {
        return Err(Error::new(ErrorImpl::ArityMismatch { expected: params.len(), received: func.params.len() }, position));
    }

    debug!("checking body of `{}`", func.name);
    type_checker.return_type = Some(return_type);

    let result = type_checker.with_scope(|type_checker| {
        for (param, ty) in func.params.iter().zip(params) {
            type_checker.environment.declare(&param.name, ty, param.span.start.clone())?;
        }
        type_check_stmt(type_checker, &func.body)
    });

    type_checker.return_type = None;
    result
}

pub fn type_check_var_decl(type_checker: &mut TypeChecker, decl: &VarDecl) -> Result<TypeId, Error> {
    let ty = type_checker.types.declared_or_fresh(decl.declared_type);
    type_checker.environment.declare(&decl.name, ty, decl.span.start.clone())?;
    Ok(ty)
}

pub fn type_check_block(type_checker: &mut TypeChecker, declarations: &[VarDecl], statements: &[Stmt]) -> Result<(), Error> {
    type_checker.with_scope(|type_checker| {
        for decl in declarations {
            type_check_var_decl(type_checker, decl)?;
        }
        for stmt in statements {
            type_check_stmt(type_checker, stmt)?;
        }
        Ok(())
    })
}

pub fn type_check_stmt(type_checker: &mut TypeChecker, stmt: &Stmt) -> Result<(), Error> {
    match &stmt.kind {
        StmtKind::VarDecl(decl) => type_check_var_decl(type_checker, decl).map(|_| ()),
        StmtKind::Block { declarations, statements } => type_check_block(type_checker, declarations, statements),
        StmtKind::Assign { target, value } => {
            let target_type = type_checker.environment.lookup(target, stmt.span.start.clone())?;
            let value_type = type_check_expr(type_checker, value)?;
            type_checker.unify(target_type, value_type, &value.span.start)
        },
        StmtKind::If { condition, then_branch, else_branch } => {
            let condition_type = type_check_expr(type_checker, condition)?;
            let bool = type_checker.bool();
            type_checker.unify(bool, condition_type, &condition.span.start)?;

            type_check_stmt(type_checker, then_branch)?;
            if let Some(else_branch) = else_branch {
                type_check_stmt(type_checker, else_branch)?;
            }
            Ok(())
        },
        StmtKind::While { condition, body } => {
            let condition_type = type_check_expr(type_checker, condition)?;
            let bool = type_checker.bool();
            type_checker.unify(bool, condition_type, &condition.span.start)?;

            type_check_stmt(type_checker, body)
        },
        StmtKind::Return { value } => {
            let expected = match type_checker.return_type {
                Some(expected) => expected,
                None => return Err(Error::new(ErrorImpl::ReturnOutsideFunction, stmt.span.start.clone())),
            };

            let value_type = type_check_expr(type_checker, value)?;
            type_checker.unify(expected, value_type, &value.span.start)
        },
    }
}

pub fn type_check_expr(type_checker: &mut TypeChecker, expr: &Expr) -> Result<TypeId, Error> {
    match &expr.kind {
        ExprKind::Integer(_) => Ok(type_checker.int()),
        ExprKind::Boolean(_) => Ok(type_checker.bool()),
        ExprKind::Identifier(name) => type_checker.environment.lookup(name, expr.span.start.clone()),
        ExprKind::Binary { left, operator, right } => type_check_binary(type_checker, left, *operator, right),
        ExprKind::Call { name, arguments } => type_check_call(type_checker, expr, name, arguments),
    }
}

fn type_check_binary(type_checker: &mut TypeChecker, left: &Expr, operator: BinaryOperator, right: &Expr) -> Result<TypeId, Error> {
    let left_type = type_check_expr(type_checker, left)?;
    let right_type = type_check_expr(type_checker, right)?;

    let (operand, result) = match operator {
        BinaryOperator::Add | BinaryOperator::Sub | BinaryOperator::Mul | BinaryOperator::Div => {
            (Some(type_checker.int()), type_checker.int())
        },
        BinaryOperator::Less | BinaryOperator::Greater => (Some(type_checker.int()), type_checker.bool()),
        BinaryOperator::And | BinaryOperator::Or => (Some(type_checker.bool()), type_checker.bool()),
        // Equality only requires both sides to agree with each other.
        BinaryOperator::Equal => (None, type_checker.bool()),
    };

    match operand {
        Some(operand) => {
            type_checker.unify(operand, left_type, &left.span.start)?;
            type_checker.unify(operand, right_type, &right.span.start)?;
        },
        None => type_checker.unify(left_type, right_type, &right.span.start)?,
    }

    Ok(result)
}

fn type_check_call(type_checker: &mut TypeChecker, call: &Expr, name: &str, arguments: &[Expr]) -> Result<TypeId, Error> {
    let position = call.span.start.clone();
    let callee = type_checker.environment.lookup(name, position.clone())?;
    let callee_rep = type_checker.types.find(callee);

    match type_checker.types.get(callee_rep).clone() {
        TypeExpr::Function { return_type, params } => {
            if params.len() != arguments.len() {
                return Err(Error::new(ErrorImpl::ArityMismatch { expected: params.len(), received: arguments.len() }, position));
            }

            for (param, argument) in params.into_iter().zip(arguments) {
                let argument_type = type_check_expr(type_checker, argument)?;
                type_checker.unify(param, argument_type, &argument.span.start)?;
            }

            Ok(return_type)
        },
        TypeExpr::Variable { binding: None, .. } => {
            // Calling a still-unknown name (usually a parameter) fixes it
            // to a function type shaped by this call site.
            let mut argument_types = Vec::with_capacity(arguments.len());
            for argument in arguments {
                argument_types.push(type_check_expr(type_checker, argument)?);
            }

            let return_type = type_checker.types.fresh_var();
            let inferred = type_checker.types.function(return_type, argument_types);
            type_checker.unify(callee, inferred, &position)?;

            Ok(return_type)
        },
        _ => Err(Error::new(ErrorImpl::NotCallable {
            name: name.to_string(),
            found: type_checker.types.display(callee_rep),
        }, position)),
    }
}

/// Type checks a whole program.
///
/// Every function signature is registered before any body is checked, so
/// functions may call each other in any order. Globals and main statements
/// are checked last, in the global scope.
///
/// Returns the finished session on success, or the first error found.
pub fn type_check(program: &Program) -> Result<TypeChecker, Error> {
    let mut type_checker = TypeChecker::new();

    match check_program(&mut type_checker, program) {
        Ok(()) => {
            debug!("program is well-typed ({} type variables)", type_checker.types.variable_count());
            Ok(type_checker)
        },
        Err(error) => {
            debug!("type check failed: {}", error);
            Err(error)
        },
    }
}

fn check_program(type_checker: &mut TypeChecker, program: &Program) -> Result<(), Error> {
    debug!("registering {} function signatures", program.functions.len());
    for func in &program.functions {
        register_function_signature(type_checker, func)?;
    }

    for func in &program.functions {
        type_check_function(type_checker, func)?;
    }

    debug!("checking {} globals and {} main statements", program.globals.len(), program.main.len());
    type_checker.return_type = None;
    for decl in &program.globals {
        type_check_var_decl(type_checker, decl)?;
    }
    for stmt in &program.main {
        type_check_stmt(type_checker, stmt)?;
    }

    Ok(())
}
