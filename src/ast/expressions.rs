//! Expression grammar's AST shapes (component H data).

use crate::ast::declarations::ClassBodyDeclaration;
use crate::ast::statements::Block;
use crate::ast::types::{ReferenceType, Type, TypeArgument};
use crate::token::Position;

/// The non-selector part of a primary expression: literals, `this`,
/// bare/qualified member and method references, creators, and class
/// references. `qualifier` holds a leading dotted name for forms like
/// `Outer.this` or `pkg.Type.class` that the primary parser resolved before
/// committing to a kind.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Primary {
    pub prefix_operators: Vec<String>,
    pub postfix_operators: Vec<String>,
    pub qualifier: Option<String>,
    pub selectors: Vec<Selector>,
    pub kind: PrimaryKind,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PrimaryKind {
    Literal(String),
    This,
    MemberReference {
        member: String,
    },
    MethodInvocation {
        member: String,
        type_arguments: Option<Vec<TypeArgument>>,
        arguments: Vec<Expression>,
    },
    SuperMemberReference {
        member: String,
    },
    SuperMethodInvocation {
        member: String,
        type_arguments: Option<Vec<TypeArgument>>,
        arguments: Vec<Expression>,
    },
    SuperConstructorInvocation {
        arguments: Vec<Expression>,
    },
    ExplicitConstructorInvocation {
        type_arguments: Option<Vec<TypeArgument>>,
        arguments: Vec<Expression>,
    },
    ClassReference {
        type_: Type,
    },
    VoidClassReference,
    /// A parenthesized sub-expression that is not itself a bare primary
    /// (e.g. `(a + b)`), kept distinct so prefix/postfix operators still
    /// have a `Primary` to attach to.
    Nested(Box<Expression>),
    ArrayCreator {
        type_: Type,
        dimensions: crate::ast::types::Dimensions,
        initializer: Option<ArrayInitializer>,
    },
    ClassCreator {
        type_: ReferenceType,
        constructor_type_arguments: Option<Vec<TypeArgument>>,
        arguments: Vec<Expression>,
        body: Option<Vec<ClassBodyDeclaration>>,
    },
    InnerClassCreator {
        type_: ReferenceType,
        constructor_type_arguments: Option<Vec<TypeArgument>>,
        arguments: Vec<Expression>,
        body: Option<Vec<ClassBodyDeclaration>>,
    },
}

/// One link of a postfix `.`/`[` chain following a primary.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Selector {
    ArraySelector {
        index: Box<Expression>,
    },
    MemberReference {
        member: String,
    },
    MethodInvocation {
        member: String,
        type_arguments: Option<Vec<TypeArgument>>,
        arguments: Vec<Expression>,
    },
    This,
    SuperMemberReference {
        member: String,
    },
    InnerClassCreator {
        type_arguments: Option<Vec<TypeArgument>>,
        name: String,
        constructor_type_arguments: Option<Vec<TypeArgument>>,
        arguments: Vec<Expression>,
        body: Option<Vec<ClassBodyDeclaration>>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ArrayInitializer {
    pub initializers: Vec<VariableInitializer>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum VariableInitializer {
    Expression(Expression),
    Array(ArrayInitializer),
}

/// `instanceof`'s right-hand side is a `Type`, never an `Expression`, so a
/// binary operation's right operand is one or the other.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Operand {
    Expression(Box<Expression>),
    Type(Box<Type>),
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BinaryOperation {
    pub operator: String,
    pub operandl: Box<Expression>,
    pub operandr: Operand,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Cast {
    pub type_: Box<Type>,
    pub expression: Box<Expression>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TernaryExpression {
    pub condition: Box<Expression>,
    pub if_true: Box<Expression>,
    pub if_false: Box<Expression>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Assignment {
    pub expressionl: Box<Expression>,
    pub operator: String,
    pub value: Box<Expression>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LambdaParameters {
    /// `(a, b) -> ...`, types to be inferred.
    Inferred(Vec<String>),
    /// `(Type a, Type b) -> ...`.
    Typed(Vec<crate::ast::declarations::FormalParameter>),
    /// `a -> ...`, no parens.
    Single(String),
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LambdaBody {
    Block(Block),
    Expression(Box<Expression>),
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LambdaExpression {
    pub parameters: LambdaParameters,
    pub body: LambdaBody,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MethodReferenceQualifier {
    Type(Box<Type>),
    Expression(Box<Expression>),
    Super,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MethodReference {
    pub expression: MethodReferenceQualifier,
    pub type_arguments: Option<Vec<TypeArgument>>,
    /// The referenced method name, or `"new"` for a constructor reference.
    pub method: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Expression {
    Primary(Primary),
    Cast(Cast),
    Binary(BinaryOperation),
    Ternary(TernaryExpression),
    Assignment(Assignment),
    Lambda(LambdaExpression),
    MethodReference(MethodReference),
}

impl Expression {
    pub fn position(&self) -> Position {
        match self {
            Expression::Primary(p) => p.position,
            Expression::Cast(c) => c.position,
            Expression::Binary(b) => b.position,
            Expression::Ternary(t) => t.position,
            Expression::Assignment(a) => a.position,
            Expression::Lambda(l) => l.position,
            Expression::MethodReference(m) => m.position,
        }
    }
}
