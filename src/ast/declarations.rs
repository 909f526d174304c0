//! Declaration grammar's AST shapes (component F data): compilation units,
//! imports, class/interface/enum/annotation declarations and their members.

use crate::ast::expressions::{Expression, VariableInitializer};
use crate::ast::statements::Block;
use crate::ast::types::{Dimensions, ReferenceType, Type, TypeParameter};
use crate::token::Position;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PackageDeclaration {
    pub annotations: Vec<Annotation>,
    pub name: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Import {
    pub path: String,
    pub static_: bool,
    pub wildcard: bool,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CompilationUnit {
    pub package: Option<PackageDeclaration>,
    pub imports: Vec<Import>,
    pub types: Vec<TypeDeclaration>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ElementValue {
    Annotation(Box<Annotation>),
    Array(Vec<ElementValue>),
    Expression(Box<Expression>),
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ElementValuePair {
    /// `None` for the single-value shorthand `@Foo(bar)`.
    pub name: Option<String>,
    pub value: ElementValue,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Annotation {
    pub name: String,
    pub element_values: Vec<ElementValuePair>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VariableDeclarator {
    pub name: String,
    pub dimensions: Dimensions,
    pub initializer: Option<VariableInitializer>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FormalParameter {
    pub modifiers: BTreeSet<String>,
    pub annotations: Vec<Annotation>,
    pub type_: Type,
    pub varargs: bool,
    pub name: String,
    pub dimensions: Dimensions,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldDeclaration {
    pub modifiers: BTreeSet<String>,
    pub annotations: Vec<Annotation>,
    pub type_: Type,
    pub declarators: Vec<VariableDeclarator>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MethodDeclaration {
    pub modifiers: BTreeSet<String>,
    pub annotations: Vec<Annotation>,
    pub type_parameters: Vec<TypeParameter>,
    /// `None` for `void`-free constructors handled separately, and for an
    /// actual `void` return this is `Some(Type::Basic("void"))`.
    pub return_type: Type,
    pub name: String,
    pub parameters: Vec<FormalParameter>,
    pub throws: Vec<ReferenceType>,
    pub body: Option<Block>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ConstructorDeclaration {
    pub modifiers: BTreeSet<String>,
    pub annotations: Vec<Annotation>,
    pub type_parameters: Vec<TypeParameter>,
    pub name: String,
    pub parameters: Vec<FormalParameter>,
    pub throws: Vec<ReferenceType>,
    pub body: Block,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ClassBodyDeclaration {
    Field(FieldDeclaration),
    Method(MethodDeclaration),
    Constructor(ConstructorDeclaration),
    Type(TypeDeclaration),
    StaticInitializer(Block),
    InstanceInitializer(Block),
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClassDeclaration {
    pub name: String,
    pub modifiers: BTreeSet<String>,
    pub annotations: Vec<Annotation>,
    pub documentation: Option<String>,
    pub type_parameters: Vec<TypeParameter>,
    pub extends: Option<ReferenceType>,
    pub implements: Vec<ReferenceType>,
    pub body: Vec<ClassBodyDeclaration>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InterfaceDeclaration {
    pub name: String,
    pub modifiers: BTreeSet<String>,
    pub annotations: Vec<Annotation>,
    pub documentation: Option<String>,
    pub type_parameters: Vec<TypeParameter>,
    pub extends: Vec<ReferenceType>,
    pub body: Vec<ClassBodyDeclaration>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EnumConstantDeclaration {
    pub annotations: Vec<Annotation>,
    pub name: String,
    pub arguments: Option<Vec<Expression>>,
    pub body: Option<Vec<ClassBodyDeclaration>>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EnumBody {
    pub constants: Vec<EnumConstantDeclaration>,
    pub declarations: Vec<ClassBodyDeclaration>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EnumDeclaration {
    pub name: String,
    pub modifiers: BTreeSet<String>,
    pub annotations: Vec<Annotation>,
    pub documentation: Option<String>,
    pub implements: Vec<ReferenceType>,
    pub body: EnumBody,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnnotationMethod {
    pub modifiers: BTreeSet<String>,
    pub annotations: Vec<Annotation>,
    pub name: String,
    pub return_type: Type,
    pub default: Option<ElementValue>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AnnotationBodyDeclaration {
    Method(AnnotationMethod),
    Constant(FieldDeclaration),
    Class(ClassDeclaration),
    Interface(InterfaceDeclaration),
    Enum(EnumDeclaration),
    Annotation(AnnotationDeclaration),
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnnotationDeclaration {
    pub name: String,
    pub modifiers: BTreeSet<String>,
    pub annotations: Vec<Annotation>,
    pub documentation: Option<String>,
    pub body: Vec<AnnotationBodyDeclaration>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TypeDeclaration {
    Class(ClassDeclaration),
    Interface(InterfaceDeclaration),
    Enum(EnumDeclaration),
    Annotation(AnnotationDeclaration),
}

impl TypeDeclaration {
    pub fn position(&self) -> Position {
        match self {
            TypeDeclaration::Class(d) => d.position,
            TypeDeclaration::Interface(d) => d.position,
            TypeDeclaration::Enum(d) => d.position,
            TypeDeclaration::Annotation(d) => d.position,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TypeDeclaration::Class(d) => &d.name,
            TypeDeclaration::Interface(d) => &d.name,
            TypeDeclaration::Enum(d) => &d.name,
            TypeDeclaration::Annotation(d) => &d.name,
        }
    }
}
