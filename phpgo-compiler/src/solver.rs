//! The expression type solver.
//!
//! `solve_type` computes the `Types` of any expression node against the
//! bound variable and function tables. It is pure with respect to its
//! inputs, except that variable reads return the variable's current
//! accumulated set, which earlier binding work populated.

use crate::ast::{
    ArrayLiteral, AssignOperator, BinaryOperator, Expression, ExpressionKind, NameConstant,
    SourceSpan,
};
use crate::binder::Bindings;
use crate::context::Context;
use crate::diagnostics::CompileError;
use crate::types::{Kind, Types};

/// Function names recognized as kind predicates, with the tag each one
/// tests for.
pub const IS_KIND_FUNCTIONS: &[(&str, &str)] = &[
    ("is_int", "int64"),
    ("is_float", "float64"),
    ("is_bool", "bool"),
    ("is_string", "string"),
    ("is_null", "null"),
    ("is_array", "array"),
];

pub fn is_kind_function(name: &str) -> Option<&'static str> {
    IS_KIND_FUNCTIONS
        .iter()
        .find(|(function, _)| *function == name)
        .map(|(_, tag)| *tag)
}

pub fn solve_type(
    bindings: &Bindings,
    ctx: Context,
    expr: &Expression,
) -> Result<Types, CompileError> {
    match &expr.kind {
        ExpressionKind::IntLiteral(_) => Ok(Types::single(Kind::Int)),
        ExpressionKind::FloatLiteral(_) => Ok(Types::single(Kind::Float)),
        ExpressionKind::StringLiteral(_) => Ok(Types::single(Kind::String)),
        ExpressionKind::NameConstant(constant) => Ok(match constant {
            NameConstant::True | NameConstant::False => Types::single(Kind::Bool),
            NameConstant::Null => Types::single(Kind::Null),
        }),
        ExpressionKind::Variable(variable) => Ok(bindings
            .var(ctx, &variable.name)
            .map(|id| bindings.variable(id).types.clone())
            .unwrap_or_default()),
        ExpressionKind::Array(literal) => solve_array(bindings, ctx, literal, expr.span),
        ExpressionKind::Index(index) => {
            let target = solve_type(bindings, ctx, &index.target)?;
            Ok(element_types(&target))
        }
        ExpressionKind::Assign(assign) => match assign.operator {
            AssignOperator::Assign => solve_type(bindings, ctx, &assign.value),
            AssignOperator::Concat => Ok(Types::single(Kind::String)),
            _ => {
                let left = solve_type(bindings, ctx, &assign.target)?;
                let right = solve_type(bindings, ctx, &assign.value)?;
                Ok(solve_arithmetic(&left, &right))
            }
        },
        ExpressionKind::Increment(incdec) => solve_type(bindings, ctx, &incdec.operand),
        ExpressionKind::Binary(binary) => match binary.operator {
            BinaryOperator::Add
            | BinaryOperator::Subtract
            | BinaryOperator::Multiply
            | BinaryOperator::Divide => {
                let left = solve_type(bindings, ctx, &binary.left)?;
                let right = solve_type(bindings, ctx, &binary.right)?;
                Ok(solve_arithmetic(&left, &right))
            }
            BinaryOperator::Concat => Ok(Types::single(Kind::String)),
            BinaryOperator::Equal
            | BinaryOperator::NotEqual
            | BinaryOperator::Less
            | BinaryOperator::LessEqual
            | BinaryOperator::Greater
            | BinaryOperator::GreaterEqual
            | BinaryOperator::And
            | BinaryOperator::Or => Ok(Types::single(Kind::Bool)),
        },
        ExpressionKind::Call(call) => {
            if is_kind_function(&call.function).is_some() {
                return Ok(Types::single(Kind::Bool));
            }
            Ok(bindings
                .function_named(&call.function)
                .map(|id| bindings.function(id).return_types.clone())
                .unwrap_or_default())
        }
    }
}

/// Numeric promotion for `+ - * /`: one float operand makes the result
/// float; two operands of the same numeric kind keep that kind. Anything
/// else (including polymorphic operands) yields the union of both sides.
pub fn solve_arithmetic(left: &Types, right: &Types) -> Types {
    let float = Kind::Float;
    if left.is(&float) || right.is(&float) {
        let other = if left.is(&float) { right } else { left };
        if other.is_single() && other.kinds()[0].is_numeric() {
            return Types::single(Kind::Float);
        }
    }
    if left.is_single() && left == right {
        return left.clone();
    }
    let mut union = left.clone();
    union.merge(right);
    union
}

/// Element (value) types of an indexed collection, when derivable.
pub fn element_types(collection: &Types) -> Types {
    if !collection.is_single() {
        return Types::new();
    }
    match &collection.kinds()[0] {
        Kind::Array(element) => (**element).clone(),
        Kind::Map(_, value) => (**value).clone(),
        _ => Types::new(),
    }
}

/// Key types of an iterated collection: positional arrays index by int,
/// maps by their declared key types.
pub fn key_types(collection: &Types) -> Types {
    if !collection.is_single() {
        return Types::new();
    }
    match &collection.kinds()[0] {
        Kind::Array(_) => Types::single(Kind::Int),
        Kind::Map(key, _) => (**key).clone(),
        _ => Types::new(),
    }
}

/// Solve an array literal: all elements must share the first element's
/// `Types` structurally, and an explicit key on the first element forces a
/// key on every element. Violations are fatal.
pub fn solve_array(
    bindings: &Bindings,
    ctx: Context,
    literal: &ArrayLiteral,
    span: SourceSpan,
) -> Result<Types, CompileError> {
    if literal.items.is_empty() {
        return Ok(Types::single(Kind::Array(Box::new(Types::new()))));
    }

    let is_assoc = literal.items[0].key.is_some();
    for item in &literal.items {
        if item.key.is_some() != is_assoc {
            return Err(CompileError::MixedArrayKeys { line: span.line });
        }
    }

    let value_types = solve_type(bindings, ctx, &literal.items[0].value)?;
    for item in &literal.items {
        let item_types = solve_type(bindings, ctx, &item.value)?;
        if item_types != value_types {
            return Err(CompileError::HeterogeneousArray {
                expected: value_types.to_string(),
                found: item_types.to_string(),
                line: item.value.span.line.max(span.line),
            });
        }
    }

    if is_assoc {
        let key = literal.items[0]
            .key
            .as_ref()
            .map(|key| solve_type(bindings, ctx, key))
            .transpose()?
            .unwrap_or_default();
        Ok(Types::single(Kind::Map(
            Box::new(key),
            Box::new(value_types),
        )))
    } else {
        Ok(Types::single(Kind::Array(Box::new(value_types))))
    }
}
