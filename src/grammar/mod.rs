//! Recursive-descent grammar, split by layer (components D-H): primitives,
//! types, declarations, statements, expressions. Each layer's module only
//! depends on layers above it in this list.

pub mod declarations;
pub mod expressions;
pub mod primitives;
pub mod statements;
pub mod types;

pub use declarations::parse_compilation_unit;
