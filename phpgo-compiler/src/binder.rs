//! Forward binding pre-pass.
//!
//! The external front end resolves names; this pass reconstructs the
//! per-function variable tables the generator expects: it allocates
//! arena-owned variable records, accumulates each variable's full `Types`
//! from every assignment in source order, folds return statements into the
//! function's return `Types`, and marks variables first assigned inside a
//! conditional branch so the emitter can pre-declare them ahead of the
//! `if`. After binding, generation only reads these tables.

use std::collections::HashMap;

use crate::ast::{
    AssignOperator, Expression, ExpressionKind, ForeachStatement, FunctionStatement, Module,
    Statement,
};
use crate::context::Context;
use crate::diagnostics::CompileError;
use crate::solver::{element_types, key_types, solve_arithmetic, solve_type};
use crate::types::{Kind, Types};
use crate::variable::{Scope, VarArena, VarId, Variable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FnId(pub usize);

#[derive(Debug)]
pub struct FunctionInfo {
    pub name: String,
    pub scope: Scope,
    /// Union of the solved types of every `return` expression.
    pub return_types: Types,
}

/// The bound variable and function tables for one translation unit.
#[derive(Debug, Default)]
pub struct Bindings {
    arena: VarArena,
    functions: Vec<FunctionInfo>,
    by_name: HashMap<String, FnId>,
}

impl Bindings {
    pub fn function(&self, id: FnId) -> &FunctionInfo {
        &self.functions[id.0]
    }

    pub fn function_named(&self, name: &str) -> Option<FnId> {
        self.by_name.get(name).copied()
    }

    pub fn var(&self, ctx: Context, name: &str) -> Option<VarId> {
        self.functions[ctx.function.0].scope.lookup(name)
    }

    pub fn variable(&self, id: VarId) -> &Variable {
        self.arena.get(id)
    }

    pub fn variable_mut(&mut self, id: VarId) -> &mut Variable {
        self.arena.get_mut(id)
    }

    /// Every variable of the context's function scope, in declaration
    /// order.
    pub fn scope_vars(&self, ctx: Context) -> &[VarId] {
        self.functions[ctx.function.0].scope.ids()
    }

    fn push_function(&mut self, name: &str) -> FnId {
        let id = FnId(self.functions.len());
        self.functions.push(FunctionInfo {
            name: name.to_string(),
            scope: Scope::new(),
            return_types: Types::new(),
        });
        self.by_name.insert(name.to_string(), id);
        id
    }

    fn declare(&mut self, ctx: Context, name: &str, in_branch: bool) -> VarId {
        if let Some(id) = self.var(ctx, name) {
            return id;
        }
        let id = self.arena.alloc(name);
        if in_branch {
            self.arena.get_mut(id).from_if_else = true;
        }
        self.functions[ctx.function.0].scope.insert(name, id);
        id
    }

    fn merge_return(&mut self, id: FnId, types: &Types) {
        self.functions[id.0].return_types.merge(types);
    }
}

pub fn bind(module: &Module) -> Result<Bindings, CompileError> {
    let mut binder = Binder {
        bindings: Bindings::default(),
    };
    // Declare every function up front so calls resolve regardless of
    // declaration order. Return types still accumulate in source order.
    for function in &module.functions {
        binder.bindings.push_function(&function.name);
    }
    for function in &module.functions {
        binder.bind_function(function)?;
    }
    Ok(binder.bindings)
}

struct Binder {
    bindings: Bindings,
}

impl Binder {
    fn bind_function(&mut self, function: &FunctionStatement) -> Result<(), CompileError> {
        let Some(id) = self.bindings.function_named(&function.name) else {
            return Ok(());
        };
        let ctx = Context::new(id);
        self.bind_statements(ctx, &function.body, false)
    }

    fn bind_statements(
        &mut self,
        ctx: Context,
        statements: &[Statement],
        in_branch: bool,
    ) -> Result<(), CompileError> {
        for statement in statements {
            self.bind_statement(ctx, statement, in_branch)?;
        }
        Ok(())
    }

    fn bind_statement(
        &mut self,
        ctx: Context,
        statement: &Statement,
        in_branch: bool,
    ) -> Result<(), CompileError> {
        match statement {
            Statement::Expression(stmt) => self.bind_expression(ctx, &stmt.expression, in_branch),
            Statement::Echo(stmt) => {
                for argument in &stmt.arguments {
                    self.bind_expression(ctx, argument, in_branch)?;
                }
                Ok(())
            }
            Statement::Return(stmt) => {
                if let Some(expression) = &stmt.expression {
                    self.bind_expression(ctx, expression, in_branch)?;
                    let types = solve_type(&self.bindings, ctx, expression)?;
                    self.bindings.merge_return(ctx.function, &types);
                }
                Ok(())
            }
            Statement::If(stmt) => {
                self.bind_expression(ctx, &stmt.condition, in_branch)?;
                self.bind_statements(ctx, &stmt.consequent, true)?;
                if let Some(alternative) = &stmt.alternative {
                    self.bind_statements(ctx, alternative, true)?;
                }
                Ok(())
            }
            Statement::While(stmt) => {
                self.bind_expression(ctx, &stmt.condition, in_branch)?;
                self.bind_statements(ctx, &stmt.body, in_branch)
            }
            Statement::For(stmt) => {
                for expression in stmt
                    .init
                    .iter()
                    .chain(&stmt.condition)
                    .chain(&stmt.step)
                {
                    self.bind_expression(ctx, expression, in_branch)?;
                }
                self.bind_statements(ctx, &stmt.body, in_branch)
            }
            Statement::Foreach(stmt) => self.bind_foreach(ctx, stmt, in_branch),
        }
    }

    fn bind_foreach(
        &mut self,
        ctx: Context,
        stmt: &ForeachStatement,
        in_branch: bool,
    ) -> Result<(), CompileError> {
        self.bind_expression(ctx, &stmt.collection, in_branch)?;
        let collection = solve_type(&self.bindings, ctx, &stmt.collection)?;
        let keys = key_types(&collection);
        let values = element_types(&collection);

        if let Some(key) = &stmt.key {
            let id = self.bindings.declare(ctx, &key.name, in_branch);
            self.bindings.variable_mut(id).types.merge(&keys);
        }
        let id = self.bindings.declare(ctx, &stmt.value.name, in_branch);
        self.bindings.variable_mut(id).types.merge(&values);

        self.bind_statements(ctx, &stmt.body, in_branch)
    }

    fn bind_expression(
        &mut self,
        ctx: Context,
        expression: &Expression,
        in_branch: bool,
    ) -> Result<(), CompileError> {
        match &expression.kind {
            ExpressionKind::Assign(assign) => {
                self.bind_expression(ctx, &assign.value, in_branch)?;
                match &assign.target.kind {
                    ExpressionKind::Variable(target) => {
                        let value_types = match assign.operator {
                            AssignOperator::Assign => {
                                solve_type(&self.bindings, ctx, &assign.value)?
                            }
                            AssignOperator::Concat => Types::single(Kind::String),
                            _ => {
                                let current = self
                                    .bindings
                                    .var(ctx, &target.name)
                                    .map(|id| self.bindings.variable(id).types.clone())
                                    .unwrap_or_default();
                                let value = solve_type(&self.bindings, ctx, &assign.value)?;
                                solve_arithmetic(&current, &value)
                            }
                        };
                        let id = self.bindings.declare(ctx, &target.name, in_branch);
                        self.bindings.variable_mut(id).types.merge(&value_types);
                        Ok(())
                    }
                    _ => self.bind_expression(ctx, &assign.target, in_branch),
                }
            }
            ExpressionKind::Binary(binary) => {
                self.bind_expression(ctx, &binary.left, in_branch)?;
                self.bind_expression(ctx, &binary.right, in_branch)
            }
            ExpressionKind::Call(call) => {
                for argument in &call.arguments {
                    self.bind_expression(ctx, argument, in_branch)?;
                }
                Ok(())
            }
            ExpressionKind::Array(literal) => {
                for item in &literal.items {
                    if let Some(key) = &item.key {
                        self.bind_expression(ctx, key, in_branch)?;
                    }
                    self.bind_expression(ctx, &item.value, in_branch)?;
                }
                // Surface heterogeneous-element and mixed-key conditions
                // during binding already, before any text is buffered.
                solve_type(&self.bindings, ctx, expression)?;
                Ok(())
            }
            ExpressionKind::Index(index) => {
                self.bind_expression(ctx, &index.target, in_branch)?;
                if let Some(dim) = &index.index {
                    self.bind_expression(ctx, dim, in_branch)?;
                }
                Ok(())
            }
            ExpressionKind::Increment(incdec) => {
                self.bind_expression(ctx, &incdec.operand, in_branch)
            }
            ExpressionKind::Variable(_)
            | ExpressionKind::IntLiteral(_)
            | ExpressionKind::FloatLiteral(_)
            | ExpressionKind::StringLiteral(_)
            | ExpressionKind::NameConstant(_) => Ok(()),
        }
    }
}
