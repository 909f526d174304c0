//! Error types for the tokenizer and parser.
//!
//! A [`SyntaxError`] means the input did not match the grammar; an
//! [`InternalParserError`] means a parser invariant was violated and
//! indicates a bug in this crate, not bad input.

use std::fmt::Display;

use colored::Colorize;

use crate::token::Position;

/// A token did not match the grammar at the given position.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SyntaxError {
    pub message: String,
    pub position: Option<Position>,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, position: Option<Position>) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }

    pub fn eof(expected: &str) -> Self {
        Self {
            message: format!("unexpected end of input, expected {expected}"),
            position: None,
        }
    }

    /// Fills in `position` if it is not already set, using the cursor's
    /// current token. Called once at the top-level entry point so that
    /// every error that escapes `parse` carries a position.
    pub fn with_fallback_position(mut self, position: Position) -> Self {
        if self.position.is_none() {
            self.position = Some(position);
        }
        self
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.position {
            Some(pos) => write!(f, "{} at {}:{}", self.message, pos.start.0, pos.start.1),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for SyntaxError {}

/// Renders a colorized, two-line excerpt of `source` around `error`'s
/// position followed by the message. Used by the CLI, which is the only
/// place both the error and the originating source text are in hand at
/// once.
pub fn render_error(source: &str, error: &SyntaxError) -> String {
    let Some(pos) = &error.position else {
        return error.message.clone();
    };

    let lines: Vec<&str> = source.lines().collect();
    let (line, col) = pos.start;
    let Some(line_str) = lines.get(line) else {
        return format!("{} at {}:{}", error.message, line + 1, col + 1);
    };

    let margin = format!("{}", line + 2).len();
    let fill = " ".repeat(margin);
    let caret_fill = " ".repeat(col);

    format!(
        "{fill} |\n{number} |{line_str}\n{fill} |{caret_fill}{caret} {message}",
        number = line + 1,
        caret = "^--".red(),
        message = error.message,
    )
}

/// A parser invariant (not bad input) was violated. Never caught by a
/// speculative scope's rollback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalParserError {
    pub message: String,
}

impl InternalParserError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for InternalParserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "internal parser error: {}", self.message)
    }
}

impl std::error::Error for InternalParserError {}

/// Result type threaded through every grammar production.
pub type ParseResult<T> = Result<T, SyntaxError>;
