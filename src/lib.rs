//! Recursive-descent parser for Java 8 source syntax.
//!
//! The grammar layers (components D-H) sit on top of a lookahead token
//! cursor (component B) and produce a typed AST (component C); [`parse`] is
//! the single entry point that wires tokenizer, cursor and grammar together.

pub mod ast;
pub mod cursor;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod token;
pub mod unparse;
pub mod visit;

use ast::CompilationUnit;
use cursor::Cursor;
use error::SyntaxError;

/// Per-parser configuration, replacing a global debug switch (see
/// `error.rs`'s module doc and the cursor's `trace_enter`/`trace_exit`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserConfig {
    pub trace: bool,
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trace(trace: bool) -> Self {
        Self { trace }
    }
}

/// Tokenizes and parses a complete Java source file.
///
/// Any [`SyntaxError`] that escapes the grammar without a position (e.g. one
/// raised from `SyntaxError::eof`) is stamped with the cursor's position at
/// the point parsing stopped, so every error this function returns carries a
/// source location.
pub fn parse(source: &str) -> Result<CompilationUnit, SyntaxError> {
    parse_with_config(source, ParserConfig::default())
}

pub fn parse_with_config(source: &str, config: ParserConfig) -> Result<CompilationUnit, SyntaxError> {
    let tokens = lexer::tokenize(source)?;
    let mut cursor = Cursor::with_trace(tokens, config.trace);
    grammar::parse_compilation_unit(&mut cursor)
        .map_err(|err| err.with_fallback_position(cursor.current_position()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_minimal_compilation_unit() {
        let cu = parse("package a.b; import java.util.List; class C {}").unwrap();
        assert!(cu.package.is_some());
        assert_eq!(cu.imports.len(), 1);
        assert_eq!(cu.types.len(), 1);
    }

    #[test]
    fn test_syntax_error_carries_a_position() {
        let err = parse("class {").unwrap_err();
        assert!(err.position.is_some());
    }

    #[test]
    fn test_trace_config_does_not_change_the_result() {
        let plain = parse("class C { void m() {} }").unwrap();
        let traced = parse_with_config("class C { void m() {} }", ParserConfig::with_trace(true)).unwrap();
        assert_eq!(plain, traced);
    }
}
