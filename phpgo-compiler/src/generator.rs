//! Depth-first AST walker and Go text emitter.
//!
//! One generator instance owns all mutable state for one file: the bound
//! variable tables, the kind aggregator, the import set, and the output
//! buffer. Text stays buffered until `finalize`, so a fatal error part-way
//! through a walk never leaks a half-written artifact.

use std::collections::BTreeSet;

use crate::ast::{
    ArrayLiteral, AssignExpression, AssignOperator, BinaryExpression, BinaryOperator,
    CallExpression, EchoStatement, Expression, ExpressionKind, ForStatement, ForeachStatement,
    FunctionStatement, IfStatement, IncDecOperator, IndexExpression, Module, NameConstant,
    ReturnStatement, SourceSpan, Statement, VariableExpression, WhileStatement,
};
use crate::binder::Bindings;
use crate::context::{Context, RenderMode};
use crate::diagnostics::{CompileError, Diagnostics};
use crate::solver::{is_kind_function, solve_array, solve_type};
use crate::types::{Kind, Types, BOX_TYPE_NAME};
use crate::varinfo::VarInfo;

pub struct Generator {
    bindings: Bindings,
    varinfo: VarInfo,
    imports: BTreeSet<&'static str>,
    body: String,
    indent: usize,
    file_name: String,
    diagnostics: Diagnostics,
}

impl Generator {
    pub fn new<S: Into<String>>(file_name: S, bindings: Bindings) -> Self {
        Self {
            bindings,
            varinfo: VarInfo::new(),
            imports: BTreeSet::new(),
            body: String::new(),
            indent: 0,
            file_name: file_name.into(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Walk the whole module, buffering output. Nothing is observable
    /// until `finalize`.
    pub fn generate(&mut self, module: &Module) -> Result<(), CompileError> {
        for function in &module.functions {
            self.generate_function(function)?;
        }
        Ok(())
    }

    /// Assemble the final unit: banner, package header, deterministic
    /// import block, the synthesized box type if any polymorphic value was
    /// observed, then the function bodies in source order.
    pub fn finalize(mut self) -> (String, Diagnostics) {
        let mut out = String::new();
        out.push_str("// Code generated by phpgo. DO NOT EDIT.\n");

        let stem = self
            .file_name
            .strip_suffix(".php")
            .unwrap_or(&self.file_name);
        out.push_str(&format!("package {stem}\n\n"));

        // The synthesized String() coercion calls fmt.Sprint.
        if self.varinfo.need_generate() {
            self.imports.insert("fmt");
        }
        if !self.imports.is_empty() {
            out.push_str("import (\n");
            for import in &self.imports {
                out.push_str(&format!("\t\"{import}\"\n"));
            }
            out.push_str(")\n\n");
        }

        out.push_str(&self.varinfo.generate());
        out.push_str(&self.body);

        (out, self.diagnostics)
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn write(&mut self, text: &str) {
        self.body.push_str(text);
    }

    fn write_indents(&mut self) {
        for _ in 0..self.indent {
            self.body.push('\t');
        }
    }

    fn generate_function(&mut self, function: &FunctionStatement) -> Result<(), CompileError> {
        let Some(id) = self.bindings.function_named(&function.name) else {
            return Ok(());
        };
        let ctx = Context::new(id);

        let return_types = self.bindings.function(id).return_types.clone();
        if return_types.is_empty() {
            self.write(&format!("func {}() {{\n", function.name));
        } else {
            self.varinfo.observe(&return_types);
            self.write(&format!(
                "func {}() {} {{\n",
                function.name,
                return_types.go_name()
            ));
        }

        self.indent += 1;
        for statement in &function.body {
            self.generate_statement(ctx, statement)?;
        }
        self.indent -= 1;
        self.write("}\n\n");

        Ok(())
    }

    fn generate_statement(&mut self, ctx: Context, statement: &Statement) -> Result<(), CompileError> {
        match statement {
            Statement::Expression(stmt) => {
                self.write_indents();
                self.generate_expression(ctx, RenderMode::default(), &stmt.expression)?;
                self.write("\n");
                Ok(())
            }
            Statement::Echo(stmt) => self.generate_echo(ctx, stmt),
            Statement::Return(stmt) => self.generate_return(ctx, stmt),
            Statement::If(stmt) => self.generate_if(ctx, stmt),
            Statement::While(stmt) => self.generate_while(ctx, stmt),
            Statement::For(stmt) => self.generate_for(ctx, stmt),
            Statement::Foreach(stmt) => self.generate_foreach(ctx, stmt),
        }
    }

    fn generate_echo(&mut self, ctx: Context, stmt: &EchoStatement) -> Result<(), CompileError> {
        self.write_indents();
        self.imports.insert("fmt");
        self.write("fmt.Print(");
        let mode = RenderMode::default().with_print();
        for (index, argument) in stmt.arguments.iter().enumerate() {
            self.generate_expression(ctx, mode, argument)?;
            if index < stmt.arguments.len() - 1 {
                self.write(", ");
            }
        }
        self.write(")\n");
        Ok(())
    }

    fn generate_return(&mut self, ctx: Context, stmt: &ReturnStatement) -> Result<(), CompileError> {
        self.write_indents();
        self.write("return");

        let Some(expression) = &stmt.expression else {
            self.write("\n");
            return Ok(());
        };
        self.write(" ");

        let types = solve_type(&self.bindings, ctx, expression)?;
        self.varinfo.observe(&types);

        let return_types = self.bindings.function(ctx.function).return_types.clone();
        // A polymorphic return slot receives monomorphic values wrapped in
        // an explicit box literal carrying the tag.
        let wrap = return_types.len() > 1 && types.is_single();
        let tag = types.first().map(Kind::tag);

        if wrap {
            self.write(&format!("{BOX_TYPE_NAME}{{ Val: "));
        }
        // A polymorphic value returned through a boxed slot is already the
        // box; render it raw rather than through a read accessor.
        let value_mode = if return_types.len() > 1 && !types.is_single() {
            RenderMode::default().with_compare()
        } else {
            RenderMode::default()
        };
        self.generate_expression(ctx, value_mode, expression)?;
        if wrap {
            if let Some(tag) = tag {
                self.write(&format!(", Type: Constant{tag} }}"));
            }
        }
        self.write("\n");
        Ok(())
    }

    fn generate_if(&mut self, ctx: Context, stmt: &IfStatement) -> Result<(), CompileError> {
        // Flow merge: declare every branch-assigned, not-yet-initialized
        // variable ahead of the conditional so both branches can assign
        // without re-declaring.
        let ids = self.bindings.scope_vars(ctx).to_vec();
        for id in ids {
            let variable = self.bindings.variable(id);
            if !variable.from_if_else || variable.was_initialized {
                continue;
            }
            let name = variable.name.clone();
            let types = variable.types.clone();
            self.varinfo.observe(&types);
            let go_name = types.go_name();
            // An empty solved set still declares as the box type, which the
            // observation above never synthesizes on its own.
            if go_name == BOX_TYPE_NAME {
                self.varinfo.require_box();
            }
            self.write_indents();
            self.write(&format!("var {} {}\n", name, go_name));
            self.bindings.variable_mut(id).was_initialized = true;
        }

        self.write_indents();
        self.write("if ");
        let condition_mode = RenderMode::default().with_condition().with_boolean();
        self.generate_expression(ctx, condition_mode, &stmt.condition)?;
        self.write(" {\n");

        self.indent += 1;
        for statement in &stmt.consequent {
            self.generate_statement(ctx, statement)?;
        }
        self.indent -= 1;
        self.write_indents();
        self.write("}");

        if let Some(alternative) = &stmt.alternative {
            self.write(" else {\n");
            self.indent += 1;
            for statement in alternative {
                self.generate_statement(ctx, statement)?;
            }
            self.indent -= 1;
            self.write_indents();
            self.write("}\n");
        } else {
            self.write("\n");
        }

        Ok(())
    }

    fn generate_while(&mut self, ctx: Context, stmt: &WhileStatement) -> Result<(), CompileError> {
        self.write_indents();
        self.write("for ");
        let condition_mode = RenderMode::default().with_condition().with_boolean();
        self.generate_expression(ctx, condition_mode, &stmt.condition)?;
        self.write(" {\n");

        self.indent += 1;
        for statement in &stmt.body {
            self.generate_statement(ctx, statement)?;
        }
        self.indent -= 1;
        self.write_indents();
        self.write("}\n");

        Ok(())
    }

    fn generate_for(&mut self, ctx: Context, stmt: &ForStatement) -> Result<(), CompileError> {
        self.write_indents();
        self.write("for ");

        for (index, expression) in stmt.init.iter().enumerate() {
            self.generate_expression(ctx, RenderMode::default(), expression)?;
            if index < stmt.init.len() - 1 {
                self.write(", ");
            }
        }
        self.write("; ");

        let condition_mode = RenderMode::default().with_condition().with_boolean();
        for (index, expression) in stmt.condition.iter().enumerate() {
            self.generate_expression(ctx, condition_mode, expression)?;
            if index < stmt.condition.len() - 1 {
                self.write(", ");
            }
        }
        self.write("; ");

        for (index, expression) in stmt.step.iter().enumerate() {
            self.generate_expression(ctx, RenderMode::default(), expression)?;
            if index < stmt.step.len() - 1 {
                self.write(", ");
            }
        }

        self.write(" {\n");
        self.indent += 1;
        for statement in &stmt.body {
            self.generate_statement(ctx, statement)?;
        }
        self.indent -= 1;
        self.write_indents();
        self.write("}\n");

        Ok(())
    }

    fn generate_foreach(&mut self, ctx: Context, stmt: &ForeachStatement) -> Result<(), CompileError> {
        self.write_indents();
        self.write("for ");

        match &stmt.key {
            Some(key) => {
                self.mark_initialized(ctx, &key.name);
                let name = key.name.clone();
                self.write(&name);
            }
            None => self.write("_"),
        }
        self.write(", ");
        self.mark_initialized(ctx, &stmt.value.name);
        let value_name = stmt.value.name.clone();
        self.write(&value_name);

        self.write(" := range ");
        self.generate_expression(ctx, RenderMode::default(), &stmt.collection)?;
        self.write(" {\n");

        self.indent += 1;
        for statement in &stmt.body {
            self.generate_statement(ctx, statement)?;
        }
        self.indent -= 1;
        self.write_indents();
        self.write("}\n");

        Ok(())
    }

    fn mark_initialized(&mut self, ctx: Context, name: &str) {
        if let Some(id) = self.bindings.var(ctx, name) {
            self.bindings.variable_mut(id).was_initialized = true;
        }
    }

    fn generate_expression(
        &mut self,
        ctx: Context,
        mode: RenderMode,
        expression: &Expression,
    ) -> Result<(), CompileError> {
        match &expression.kind {
            ExpressionKind::IntLiteral(digits) => {
                self.write(&format!("int64({digits})"));
                Ok(())
            }
            ExpressionKind::FloatLiteral(text) => {
                self.write(text);
                Ok(())
            }
            ExpressionKind::StringLiteral(text) => {
                let escaped = escape_go_string(text);
                self.write(&format!("\"{escaped}\""));
                Ok(())
            }
            ExpressionKind::NameConstant(constant) => {
                let text = match constant {
                    NameConstant::True => "true",
                    NameConstant::False => "false",
                    // null occupies an int64 slot in expression position.
                    NameConstant::Null => "0",
                };
                self.write(text);
                Ok(())
            }
            ExpressionKind::Variable(variable) => {
                self.generate_variable(ctx, mode, variable);
                Ok(())
            }
            ExpressionKind::Array(literal) => {
                self.generate_array(ctx, literal, expression.span)
            }
            ExpressionKind::Index(index) => self.generate_index(ctx, mode, index),
            ExpressionKind::Assign(assign) => self.generate_assign(ctx, mode, assign),
            ExpressionKind::Increment(incdec) => {
                let symbol = match incdec.operator {
                    IncDecOperator::Increment => "++",
                    IncDecOperator::Decrement => "--",
                };
                if incdec.prefix {
                    self.write(symbol);
                    self.generate_expression(ctx, mode, &incdec.operand)?;
                } else {
                    self.generate_expression(ctx, mode, &incdec.operand)?;
                    self.write(symbol);
                }
                Ok(())
            }
            ExpressionKind::Binary(binary) => self.generate_binary(ctx, mode, binary),
            ExpressionKind::Call(call) => self.generate_call(ctx, mode, call),
        }
    }

    fn generate_variable(&mut self, ctx: Context, mode: RenderMode, variable: &VariableExpression) {
        let Some(id) = self.bindings.var(ctx, &variable.name) else {
            // Read of a never-assigned name: emit it as-is.
            let name = variable.name.clone();
            self.write(&name);
            return;
        };

        let (name, types, current, initialized) = {
            let record = self.bindings.variable(id);
            (
                record.name.clone(),
                record.types.clone(),
                record.current_type.clone(),
                record.was_initialized,
            )
        };

        // A polymorphic variable gets its zero-valued box declared exactly
        // once, at first use, ahead of the first read/write.
        if !initialized && types.len() > 1 {
            self.write(&format!("var {name} {BOX_TYPE_NAME}\n"));
            self.bindings.variable_mut(id).was_initialized = true;
            self.write_indents();
        }

        self.varinfo.observe(&types);
        let access = render_access(&name, &types, &current, mode);
        self.write(&access);
    }

    fn generate_index(
        &mut self,
        ctx: Context,
        mode: RenderMode,
        index: &IndexExpression,
    ) -> Result<(), CompileError> {
        self.generate_expression(ctx, mode, &index.target)?;
        if let Some(dim) = &index.index {
            self.write("[");
            self.generate_expression(ctx, RenderMode::default(), dim)?;
            self.write("]");
        }
        Ok(())
    }

    fn generate_assign(
        &mut self,
        ctx: Context,
        mode: RenderMode,
        assign: &AssignExpression,
    ) -> Result<(), CompileError> {
        match &assign.target.kind {
            ExpressionKind::Variable(target) => {
                self.generate_variable_assign(ctx, mode, assign, target)
            }
            ExpressionKind::Index(index) => self.generate_index_assign(ctx, mode, assign, index),
            _ => {
                self.diagnostics.push_warning_with_span(
                    "unsupported assignment target; emitting target as-is",
                    Some(assign.target.span),
                );
                self.generate_expression(ctx, mode, &assign.target)?;
                self.write(" = ");
                self.generate_expression(ctx, mode.without_assign(), &assign.value)
            }
        }
    }

    fn generate_variable_assign(
        &mut self,
        ctx: Context,
        mode: RenderMode,
        assign: &AssignExpression,
        target: &VariableExpression,
    ) -> Result<(), CompileError> {
        let value_types = solve_type(&self.bindings, ctx, &assign.value)?;

        let Some(id) = self.bindings.var(ctx, &target.name) else {
            // The binder declares every assigned variable; an unbound
            // target means the caller skipped binding. Emit a plain form.
            self.generate_expression(ctx, mode, &assign.target)?;
            self.write(" = ");
            return self.generate_expression(ctx, mode.without_assign(), &assign.value);
        };

        {
            let record = self.bindings.variable_mut(id);
            if !record.types.contains_all(&value_types) {
                record.types.merge(&value_types);
            }
            record.current_type = value_types.clone();
        }
        let var_types = self.bindings.variable(id).types.clone();
        self.varinfo.observe(&var_types);

        if assign.operator != AssignOperator::Assign {
            return self.generate_compound_assign(ctx, mode, assign, target, &var_types);
        }

        let boxed_store = value_types.is_single() && !var_types.is_single();

        self.generate_expression(ctx, mode.with_assign(), &assign.target)?;

        if !boxed_store {
            let initialized = self.bindings.variable(id).was_initialized;
            if initialized {
                self.write(" = ");
            } else {
                self.write(" := ");
                self.bindings.variable_mut(id).was_initialized = true;
            }
        }

        // A polymorphic value stored into a boxed variable is already the
        // box; copy it raw rather than through a read accessor.
        let value_mode = if !value_types.is_single() && !var_types.is_single() {
            mode.without_assign().with_compare()
        } else {
            mode.without_assign()
        };
        self.generate_expression(ctx, value_mode, &assign.value)?;

        if boxed_store {
            self.write(")");
        }

        Ok(())
    }

    fn generate_compound_assign(
        &mut self,
        ctx: Context,
        mode: RenderMode,
        assign: &AssignExpression,
        target: &VariableExpression,
        var_types: &Types,
    ) -> Result<(), CompileError> {
        if !var_types.is_single() {
            self.diagnostics.push_warning_with_span(
                format!(
                    "compound assignment to boxed variable `{}` renders natively",
                    target.name
                ),
                Some(target.span),
            );
        }
        let name = target.name.clone();
        self.write(&name);
        self.write(&format!(" {}= ", compound_symbol(assign.operator)));
        self.generate_expression(ctx, mode.without_assign(), &assign.value)
    }

    fn generate_index_assign(
        &mut self,
        ctx: Context,
        mode: RenderMode,
        assign: &AssignExpression,
        index: &IndexExpression,
    ) -> Result<(), CompileError> {
        match &index.index {
            // `$a[] = v` appends.
            None => {
                self.generate_expression(ctx, RenderMode::default(), &index.target)?;
                self.write(" = append(");
                self.generate_expression(ctx, RenderMode::default(), &index.target)?;
                self.write(", ");
                self.generate_expression(ctx, mode.without_assign(), &assign.value)?;
                self.write(")");
                Ok(())
            }
            Some(dim) => {
                self.generate_expression(ctx, RenderMode::default(), &index.target)?;
                self.write("[");
                self.generate_expression(ctx, RenderMode::default(), dim)?;
                self.write("]");
                if assign.operator == AssignOperator::Assign {
                    self.write(" = ");
                } else {
                    self.write(&format!(" {}= ", compound_symbol(assign.operator)));
                }
                self.generate_expression(ctx, mode.without_assign(), &assign.value)
            }
        }
    }

    fn generate_binary(
        &mut self,
        ctx: Context,
        mode: RenderMode,
        binary: &BinaryExpression,
    ) -> Result<(), CompileError> {
        match binary.operator {
            BinaryOperator::Add => self.generate_arithmetic(ctx, mode, binary, "+"),
            BinaryOperator::Subtract => self.generate_arithmetic(ctx, mode, binary, "-"),
            BinaryOperator::Multiply => self.generate_arithmetic(ctx, mode, binary, "*"),
            BinaryOperator::Divide => self.generate_arithmetic(ctx, mode, binary, "/"),
            BinaryOperator::Concat => {
                self.generate_expression(ctx, mode, &binary.left)?;
                self.write(" + ");
                self.generate_expression(ctx, mode, &binary.right)
            }
            BinaryOperator::Equal => self.generate_comparison(ctx, mode, binary, "==", "Equal"),
            BinaryOperator::NotEqual => {
                self.generate_comparison(ctx, mode, binary, "!=", "NotEqual")
            }
            BinaryOperator::Less => self.generate_comparison(ctx, mode, binary, "<", "Smaller"),
            BinaryOperator::LessEqual => {
                self.generate_comparison(ctx, mode, binary, "<=", "SmallerEqual")
            }
            BinaryOperator::Greater => self.generate_comparison(ctx, mode, binary, ">", "Greater"),
            BinaryOperator::GreaterEqual => {
                self.generate_comparison(ctx, mode, binary, ">=", "GreaterEqual")
            }
            BinaryOperator::And => self.generate_logical(ctx, mode, binary, "&&"),
            BinaryOperator::Or => self.generate_logical(ctx, mode, binary, "||"),
        }
    }

    /// Arithmetic with float promotion: when exactly one operand is float,
    /// the other is wrapped in an explicit float64 cast.
    fn generate_arithmetic(
        &mut self,
        ctx: Context,
        mode: RenderMode,
        binary: &BinaryExpression,
        symbol: &str,
    ) -> Result<(), CompileError> {
        let left_types = solve_type(&self.bindings, ctx, &binary.left)?;
        let right_types = solve_type(&self.bindings, ctx, &binary.right)?;

        let float = Kind::Float;
        let left_is_float = left_types.is(&float);
        let right_is_float = right_types.is(&float);
        let cast_left = !left_is_float && right_is_float && is_castable(&left_types);
        let cast_right = left_is_float && !right_is_float && is_castable(&right_types);

        if cast_left {
            self.write("float64(");
        }
        self.generate_expression(ctx, mode, &binary.left)?;
        if cast_left {
            self.write(")");
        }

        self.write(&format!(" {symbol} "));

        if cast_right {
            self.write("float64(");
        }
        self.generate_expression(ctx, mode, &binary.right)?;
        if cast_right {
            self.write(")");
        }

        Ok(())
    }

    fn generate_comparison(
        &mut self,
        ctx: Context,
        mode: RenderMode,
        binary: &BinaryExpression,
        symbol: &str,
        compare_kind: &str,
    ) -> Result<(), CompileError> {
        let left_types = solve_type(&self.bindings, ctx, &binary.left)?;
        let right_types = solve_type(&self.bindings, ctx, &binary.right)?;
        let compare_mode = mode.with_compare();

        let boxed_receiver = left_types.len() > 1 && right_types.is_single();
        if boxed_receiver {
            // The comparator family for the operand's tag must exist even
            // when the receiver never held that kind.
            self.varinfo.observe(&right_types);
            self.generate_expression(ctx, compare_mode, &binary.left)?;
            let tag = right_types.first().map(Kind::tag).unwrap_or_default();
            self.write(&format!(".CompareWith{tag}("));
            self.generate_expression(ctx, compare_mode, &binary.right)?;
            self.write(&format!(", {compare_kind})"));
            return Ok(());
        }

        if left_types.len() > 1 && right_types.len() > 1 {
            self.diagnostics.push_warning_with_span(
                "comparison of two boxed values renders natively",
                Some(binary.left.span),
            );
        }

        self.generate_expression(ctx, compare_mode, &binary.left)?;
        self.write(&format!(" {symbol} "));
        self.generate_expression(ctx, compare_mode, &binary.right)
    }

    fn generate_logical(
        &mut self,
        ctx: Context,
        mode: RenderMode,
        binary: &BinaryExpression,
        symbol: &str,
    ) -> Result<(), CompileError> {
        let boolean_mode = mode.with_boolean();
        self.generate_expression(ctx, boolean_mode, &binary.left)?;
        self.write(&format!(" {symbol} "));
        self.generate_expression(ctx, boolean_mode, &binary.right)
    }

    fn generate_array(
        &mut self,
        ctx: Context,
        literal: &ArrayLiteral,
        span: SourceSpan,
    ) -> Result<(), CompileError> {
        if literal.items.is_empty() {
            self.varinfo.require_box();
            self.write(&format!("[]{BOX_TYPE_NAME}{{}}"));
            return Ok(());
        }

        let solved = solve_array(&self.bindings, ctx, literal, span)?;
        let (key_types, value_types, assoc) = match solved.first() {
            Some(Kind::Map(key, value)) => ((**key).clone(), (**value).clone(), true),
            Some(Kind::Array(value)) => (Types::new(), (**value).clone(), false),
            _ => (Types::new(), Types::new(), false),
        };
        let poly = !value_types.is_single();

        if poly {
            self.varinfo.observe(&value_types);
            if assoc {
                self.write(&format!("map[{}]{BOX_TYPE_NAME}{{", key_types.go_name()));
            } else {
                self.write(&format!("[]{BOX_TYPE_NAME}{{"));
            }
        } else {
            self.varinfo.observe(&solved);
            if assoc {
                self.write(&format!(
                    "map[{}]{}{{",
                    key_types.go_name(),
                    value_types.go_name()
                ));
            } else {
                self.write(&format!("[]{}{{", value_types.go_name()));
            }
        }

        for (index, item) in literal.items.iter().enumerate() {
            if let Some(key) = &item.key {
                self.generate_expression(ctx, RenderMode::default(), key)?;
                self.write(": ");
            }
            self.generate_array_element(ctx, poly, &item.value)?;
            if index < literal.items.len() - 1 {
                self.write(", ");
            }
        }

        self.write("}");
        Ok(())
    }

    /// Elements of a polymorphic array are individually wrapped in the box
    /// constructor; already-boxed values pass through.
    fn generate_array_element(
        &mut self,
        ctx: Context,
        poly: bool,
        value: &Expression,
    ) -> Result<(), CompileError> {
        if !poly {
            return self.generate_expression(ctx, RenderMode::default(), value);
        }

        let types = solve_type(&self.bindings, ctx, value)?;
        if types.is_single() {
            let tag = types.first().map(Kind::tag).unwrap_or_default();
            self.write(&format!("{BOX_TYPE_NAME}{{ Val: "));
            self.generate_expression(ctx, RenderMode::default(), value)?;
            self.write(&format!(", Type: Constant{tag} }}"));
            Ok(())
        } else {
            // Already boxed; render the raw box value.
            self.generate_expression(ctx, RenderMode::default().with_compare(), value)
        }
    }

    fn generate_call(
        &mut self,
        ctx: Context,
        _mode: RenderMode,
        call: &CallExpression,
    ) -> Result<(), CompileError> {
        if let Some(tag) = is_kind_function(&call.function) {
            return self.generate_is_kind_call(ctx, call, tag);
        }

        if self.bindings.function_named(&call.function).is_none() {
            self.diagnostics.push_warning_with_span(
                format!("call to undefined function `{}`", call.function),
                Some(call.span),
            );
        }

        self.write(&format!("{}(", call.function));
        for (index, argument) in call.arguments.iter().enumerate() {
            self.generate_expression(ctx, RenderMode::default(), argument)?;
            if index < call.arguments.len() - 1 {
                self.write(", ");
            }
        }
        self.write(")");
        Ok(())
    }

    fn generate_is_kind_call(
        &mut self,
        ctx: Context,
        call: &CallExpression,
        tag: &str,
    ) -> Result<(), CompileError> {
        let Some(argument) = call.arguments.first() else {
            self.diagnostics.push_warning_with_span(
                format!("`{}` expects an argument", call.function),
                Some(call.span),
            );
            self.write("false");
            return Ok(());
        };

        let argument_types = solve_type(&self.bindings, ctx, argument)?;
        self.varinfo.observe(&argument_types);
        let check_mode = RenderMode::default().with_is_kind_check();

        if argument_types.is_single() {
            // No simple-value predicate exists for null; a monomorphic
            // argument's nullness is statically known.
            if tag == "null" {
                let value = if argument_types.is(&Kind::Null) {
                    "true"
                } else {
                    "false"
                };
                self.write(value);
                return Ok(());
            }
            self.varinfo.require_box();
            self.write(&format!("Is{tag}Simple("));
            self.generate_expression(ctx, check_mode, argument)?;
            self.write(")");
            return Ok(());
        }

        self.varinfo.require_box();
        self.write(&format!("Is{tag}("));
        self.generate_expression(ctx, check_mode, argument)?;
        self.write(")");
        Ok(())
    }
}

fn compound_symbol(operator: AssignOperator) -> &'static str {
    match operator {
        AssignOperator::Add => "+",
        AssignOperator::Subtract => "-",
        AssignOperator::Multiply => "*",
        AssignOperator::Divide => "/",
        // String concatenation maps onto Go's +.
        AssignOperator::Concat | AssignOperator::Assign => "+",
    }
}

/// Whether a cast-to-float wrap makes sense for the non-float operand.
fn is_castable(types: &Types) -> bool {
    types.is_single() && types.kinds()[0].is_numeric()
}

/// The textual read/write form of a variable occurrence under the given
/// render mode. Monomorphic variables always render as their bare name;
/// boxed variables pick the accessor the surrounding construct needs.
fn render_access(name: &str, types: &Types, current: &Types, mode: RenderMode) -> String {
    if types.len() <= 1 {
        return name.to_string();
    }

    if mode.in_assign {
        if current.is_single() {
            if let Some(kind) = current.first() {
                return format!("{name}.Set{}(", kind.tag());
            }
        }
        return name.to_string();
    }
    if mode.in_compare || mode.in_is_kind_check {
        return name.to_string();
    }
    if mode.in_print {
        return format!("{name}.String()");
    }
    if mode.in_boolean || mode.in_condition {
        return format!("{name}.Bool()");
    }
    if current.is_single() {
        if let Some(kind) = current.first() {
            return format!("{name}.Get{}()", kind.tag());
        }
    }
    name.to_string()
}

fn escape_go_string(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}
