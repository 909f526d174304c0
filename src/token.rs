//! Token kinds and literal forms (component A).
//!
//! A closed set of token kinds with value payloads and source positions.
//! `Operator` values are further classified into `PREFIX`/`POSTFIX`/`INFIX`/
//! `ASSIGNMENT` sets by the free functions at the bottom of this module
//! rather than by a field on the token itself, mirroring how the grammar
//! only ever needs the classification at the point of use.

use once_cell::sync::Lazy;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub start: (usize, usize),
    pub end: (usize, usize),
}

impl Position {
    pub fn new(start: (usize, usize), end: (usize, usize)) -> Self {
        Self { start, end }
    }

    /// Spans from this position's start to `other`'s end.
    pub fn merge(&self, other: &Position) -> Position {
        Position {
            start: self.start,
            end: other.end,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position {
            start: (0, 0),
            end: (0, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TokenKind {
    Keyword,
    Modifier,
    BasicType,
    Identifier,
    AnnotationMarker,
    Literal,
    Operator,
    EndOfInput,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            value: value.into(),
            position,
        }
    }

    pub fn eof(position: Position) -> Self {
        Self {
            kind: TokenKind::EndOfInput,
            value: String::new(),
            position,
        }
    }

    pub fn is(&self, kind: TokenKind, value: &str) -> bool {
        self.kind == kind && self.value == value
    }
}

pub const MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "abstract",
    "final",
    "native",
    "synchronized",
    "transient",
    "volatile",
    "strictfp",
    "default",
];

pub const BASIC_TYPES: &[&str] = &[
    "boolean", "byte", "short", "char", "int", "long", "float", "double", "void",
];

pub const KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface",
    "long", "native", "new", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while",
];

static PREFIX: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["+", "-", "++", "--", "!", "~"].into_iter().collect()
});

static POSTFIX: Lazy<HashSet<&'static str>> = Lazy::new(|| ["++", "--"].into_iter().collect());

static INFIX: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "||", "&&", "|", "^", "&", "==", "!=", "<", ">", "<=", ">=", "<<", ">>", ">>>", "+", "-",
        "*", "/", "%",
    ]
    .into_iter()
    .collect()
});

static ASSIGNMENT: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<=", ">>=", ">>>=",
    ]
    .into_iter()
    .collect()
});

pub fn is_prefix_operator(op: &str) -> bool {
    PREFIX.contains(op)
}

pub fn is_postfix_operator(op: &str) -> bool {
    POSTFIX.contains(op)
}

pub fn is_infix_operator(op: &str) -> bool {
    INFIX.contains(op)
}

pub fn is_assignment_operator(op: &str) -> bool {
    ASSIGNMENT.contains(op)
}
