//! The resolved AST handed over by the external front end.
//!
//! The lexer, parser, and namespace resolution live outside this crate; a
//! front end serializes the tree (serde) or builds it directly. Only the
//! node kinds the generator understands are representable: top-level
//! functions and the statement/expression forms below. Classes, traits, and
//! closures are out of scope.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl SourceSpan {
    pub fn new(line: usize, column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            line,
            column,
            end_line,
            end_column,
        }
    }

    pub fn single_point(line: usize, column: usize) -> Self {
        Self::new(line, column, line, column)
    }
}

impl Default for SourceSpan {
    fn default() -> Self {
        Self {
            line: 0,
            column: 0,
            end_line: 0,
            end_column: 0,
        }
    }
}

/// One translation unit: the functions of a single PHP file, in source
/// order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Module {
    pub functions: Vec<FunctionStatement>,
}

impl Module {
    pub fn new(functions: Vec<FunctionStatement>) -> Self {
        Self { functions }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionStatement {
    pub name: String,
    pub span: SourceSpan,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Statement {
    Echo(EchoStatement),
    Expression(ExpressionStatement),
    Return(ReturnStatement),
    If(IfStatement),
    While(WhileStatement),
    For(ForStatement),
    Foreach(ForeachStatement),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EchoStatement {
    pub span: SourceSpan,
    pub arguments: Vec<Expression>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpressionStatement {
    pub expression: Expression,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnStatement {
    pub span: SourceSpan,
    pub expression: Option<Expression>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IfStatement {
    pub condition: Expression,
    pub consequent: Vec<Statement>,
    pub alternative: Option<Vec<Statement>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForStatement {
    pub init: Vec<Expression>,
    pub condition: Vec<Expression>,
    pub step: Vec<Expression>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForeachStatement {
    pub collection: Expression,
    pub key: Option<VariableExpression>,
    pub value: VariableExpression,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expression {
    pub span: SourceSpan,
    pub kind: ExpressionKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ExpressionKind {
    Variable(VariableExpression),
    /// Integer literal digits, kept as source text and wrapped in an
    /// `int64(...)` constructor on emission.
    IntLiteral(String),
    /// Decimal literal text, emitted verbatim.
    FloatLiteral(String),
    StringLiteral(String),
    NameConstant(NameConstant),
    Array(ArrayLiteral),
    Index(IndexExpression),
    Assign(AssignExpression),
    Increment(IncDecExpression),
    Binary(BinaryExpression),
    Call(CallExpression),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableExpression {
    pub name: String,
    pub span: SourceSpan,
}

/// The fixed boolean/null name constants the front end resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameConstant {
    True,
    False,
    Null,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrayLiteral {
    pub items: Vec<ArrayItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrayItem {
    pub key: Option<Expression>,
    pub value: Expression,
}

/// `$a[$i]` when `index` is present, the `$a[] = ...` append target when it
/// is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexExpression {
    pub target: Box<Expression>,
    pub index: Option<Box<Expression>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignExpression {
    pub operator: AssignOperator,
    pub target: Box<Expression>,
    pub value: Box<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignOperator {
    Assign,
    Add,
    Subtract,
    Multiply,
    Divide,
    Concat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncDecExpression {
    pub operator: IncDecOperator,
    pub prefix: bool,
    pub operand: Box<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncDecOperator {
    Increment,
    Decrement,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinaryExpression {
    pub operator: BinaryOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Concat,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    And,
    Or,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallExpression {
    pub function: String,
    pub span: SourceSpan,
    pub arguments: Vec<Expression>,
}
