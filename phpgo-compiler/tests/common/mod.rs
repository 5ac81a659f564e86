//! AST construction helpers shared by the integration tests. The front
//! end normally produces these trees; tests build them directly.

#![allow(dead_code)]

use phpgo_compiler::ast::{
    ArrayItem, ArrayLiteral, AssignExpression, AssignOperator, BinaryExpression, BinaryOperator,
    CallExpression, EchoStatement, Expression, ExpressionKind, ExpressionStatement, ForStatement,
    ForeachStatement, FunctionStatement, IfStatement, IncDecExpression, IncDecOperator,
    IndexExpression, Module, NameConstant, ReturnStatement, SourceSpan, Statement,
    VariableExpression, WhileStatement,
};

pub fn span() -> SourceSpan {
    SourceSpan::default()
}

fn expr(kind: ExpressionKind) -> Expression {
    Expression { span: span(), kind }
}

pub fn var(name: &str) -> Expression {
    expr(ExpressionKind::Variable(VariableExpression {
        name: name.to_string(),
        span: span(),
    }))
}

pub fn int(digits: &str) -> Expression {
    expr(ExpressionKind::IntLiteral(digits.to_string()))
}

pub fn float(text: &str) -> Expression {
    expr(ExpressionKind::FloatLiteral(text.to_string()))
}

pub fn string(text: &str) -> Expression {
    expr(ExpressionKind::StringLiteral(text.to_string()))
}

pub fn boolean(value: bool) -> Expression {
    let constant = if value {
        NameConstant::True
    } else {
        NameConstant::False
    };
    expr(ExpressionKind::NameConstant(constant))
}

pub fn null() -> Expression {
    expr(ExpressionKind::NameConstant(NameConstant::Null))
}

pub fn assign(target: Expression, value: Expression) -> Expression {
    assign_op(AssignOperator::Assign, target, value)
}

pub fn assign_op(operator: AssignOperator, target: Expression, value: Expression) -> Expression {
    expr(ExpressionKind::Assign(AssignExpression {
        operator,
        target: Box::new(target),
        value: Box::new(value),
    }))
}

pub fn binary(operator: BinaryOperator, left: Expression, right: Expression) -> Expression {
    expr(ExpressionKind::Binary(BinaryExpression {
        operator,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn call(function: &str, arguments: Vec<Expression>) -> Expression {
    expr(ExpressionKind::Call(CallExpression {
        function: function.to_string(),
        span: span(),
        arguments,
    }))
}

pub fn increment(operand: Expression, prefix: bool) -> Expression {
    expr(ExpressionKind::Increment(IncDecExpression {
        operator: IncDecOperator::Increment,
        prefix,
        operand: Box::new(operand),
    }))
}

pub fn array(values: Vec<Expression>) -> Expression {
    expr(ExpressionKind::Array(ArrayLiteral {
        items: values
            .into_iter()
            .map(|value| ArrayItem { key: None, value })
            .collect(),
    }))
}

pub fn keyed_array(items: Vec<(Expression, Expression)>) -> Expression {
    expr(ExpressionKind::Array(ArrayLiteral {
        items: items
            .into_iter()
            .map(|(key, value)| ArrayItem {
                key: Some(key),
                value,
            })
            .collect(),
    }))
}

pub fn mixed_array(items: Vec<(Option<Expression>, Expression)>) -> Expression {
    expr(ExpressionKind::Array(ArrayLiteral {
        items: items
            .into_iter()
            .map(|(key, value)| ArrayItem { key, value })
            .collect(),
    }))
}

pub fn index(target: Expression, dim: Expression) -> Expression {
    expr(ExpressionKind::Index(IndexExpression {
        target: Box::new(target),
        index: Some(Box::new(dim)),
    }))
}

pub fn append_target(target: Expression) -> Expression {
    expr(ExpressionKind::Index(IndexExpression {
        target: Box::new(target),
        index: None,
    }))
}

pub fn expr_stmt(expression: Expression) -> Statement {
    Statement::Expression(ExpressionStatement { expression })
}

pub fn echo(arguments: Vec<Expression>) -> Statement {
    Statement::Echo(EchoStatement {
        span: span(),
        arguments,
    })
}

pub fn ret(expression: Option<Expression>) -> Statement {
    Statement::Return(ReturnStatement {
        span: span(),
        expression,
    })
}

pub fn if_stmt(condition: Expression, consequent: Vec<Statement>) -> Statement {
    Statement::If(IfStatement {
        condition,
        consequent,
        alternative: None,
    })
}

pub fn if_else(
    condition: Expression,
    consequent: Vec<Statement>,
    alternative: Vec<Statement>,
) -> Statement {
    Statement::If(IfStatement {
        condition,
        consequent,
        alternative: Some(alternative),
    })
}

pub fn while_stmt(condition: Expression, body: Vec<Statement>) -> Statement {
    Statement::While(WhileStatement { condition, body })
}

pub fn for_stmt(
    init: Vec<Expression>,
    condition: Vec<Expression>,
    step: Vec<Expression>,
    body: Vec<Statement>,
) -> Statement {
    Statement::For(ForStatement {
        init,
        condition,
        step,
        body,
    })
}

pub fn foreach(collection: Expression, value: &str, body: Vec<Statement>) -> Statement {
    Statement::Foreach(ForeachStatement {
        collection,
        key: None,
        value: VariableExpression {
            name: value.to_string(),
            span: span(),
        },
        body,
    })
}

pub fn foreach_keyed(
    collection: Expression,
    key: &str,
    value: &str,
    body: Vec<Statement>,
) -> Statement {
    Statement::Foreach(ForeachStatement {
        collection,
        key: Some(VariableExpression {
            name: key.to_string(),
            span: span(),
        }),
        value: VariableExpression {
            name: value.to_string(),
            span: span(),
        },
        body,
    })
}

pub fn func(name: &str, body: Vec<Statement>) -> FunctionStatement {
    FunctionStatement {
        name: name.to_string(),
        span: span(),
        body,
    }
}

pub fn main_module(body: Vec<Statement>) -> Module {
    Module::new(vec![func("main", body)])
}
