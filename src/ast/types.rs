//! Type grammar's AST shapes (component E data): primitive types, reference
//! types, type arguments, wildcards, type parameters, array dimensions.

use crate::ast::expressions::Expression;
use crate::token::Position;

/// An array dimension: `None` for an unsized `[]`, `Some(expr)` for a sized
/// dimension as in `new int[5]`. Everywhere except `ArrayCreator` every
/// entry is `None`.
pub type Dimensions = Vec<Option<Expression>>;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BasicType {
    pub name: String,
    pub dimensions: Dimensions,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PatternType {
    None,
    Wildcard,
    Extends,
    Super,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TypeArgument {
    pub type_: Option<Box<Type>>,
    pub pattern_type: PatternType,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TypeParameter {
    pub name: String,
    pub extends: Option<Vec<ReferenceType>>,
    pub position: Position,
}

/// Forms a right-linear chain (`sub_type`), not a tree: `Outer<T>.Inner<U>`
/// parses as a `ReferenceType` whose `sub_type` holds the next segment.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReferenceType {
    pub name: String,
    pub arguments: Option<Vec<TypeArgument>>,
    pub sub_type: Option<Box<ReferenceType>>,
    pub dimensions: Dimensions,
    pub position: Position,
}

impl Default for ReferenceType {
    fn default() -> Self {
        ReferenceType {
            name: String::new(),
            arguments: None,
            sub_type: None,
            dimensions: Vec::new(),
            position: Position::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Type {
    Basic(BasicType),
    Reference(ReferenceType),
}

impl Type {
    pub fn position(&self) -> Position {
        match self {
            Type::Basic(t) => t.position,
            Type::Reference(t) => t.position,
        }
    }

    pub fn dimensions(&self) -> &Dimensions {
        match self {
            Type::Basic(t) => &t.dimensions,
            Type::Reference(t) => &t.dimensions,
        }
    }

    /// Appends dimensions hoisted from a trailing `[]` that appeared after
    /// a declarator or parameter list, e.g. `int foo()[]`.
    pub fn extend_dimensions(&mut self, extra: Dimensions) {
        match self {
            Type::Basic(t) => t.dimensions.extend(extra),
            Type::Reference(t) => t.dimensions.extend(extra),
        }
    }
}
