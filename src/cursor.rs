//! Lookahead token cursor (component B).
//!
//! An index over a materialized `Vec<Token>` plus a stack of saved indices.
//! This gives O(1) `peek`/`rollback` and is simpler than queue-based
//! buffering. Generalizes the single-snapshot `get_index()`/`set_index()`
//! pattern into a proper nested savepoint stack: `rollback` restores the
//! position exactly, `commit` discards the savepoint while keeping the
//! cursor where it advanced to, and an outer rollback discards whatever an
//! inner scope committed.
//!
//! `last` only updates on `advance` (directly or via `try_consume`/`expect`),
//! not on `peek`: every grammar production uses `last()` purely to mark the
//! end position of the node it just finished consuming, and several
//! productions call `peek`/`peek_match` for disambiguation between
//! finishing a node's consumption and reading its end position. Updating
//! `last` on `peek` would let that intervening lookahead silently overwrite
//! the span end with an unconsumed token's position.

use crate::error::{InternalParserError, SyntaxError};
use crate::token::{Position, Token, TokenKind};

pub struct Cursor {
    tokens: Vec<Token>,
    index: usize,
    savepoints: Vec<usize>,
    last: Option<Token>,
    trace: bool,
}

impl Cursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            index: 0,
            savepoints: Vec::new(),
            last: None,
            trace: false,
        }
    }

    /// Same as `new`, but with grammar entry/exit tracing enabled. This is
    /// the per-parser replacement for a global debug switch: the flag lives
    /// on the cursor every grammar production already threads through, so
    /// `trace_enter`/`trace_exit` need no extra parameter.
    pub fn with_trace(tokens: Vec<Token>, trace: bool) -> Self {
        Self {
            trace,
            ..Self::new(tokens)
        }
    }

    pub fn trace_enabled(&self) -> bool {
        self.trace
    }

    /// Logs grammar entry at `Trace` level when tracing is enabled. `rule`
    /// should be the grammar production's name (e.g. `"statement"`).
    pub fn trace_enter(&self, rule: &str) {
        if self.trace {
            log::trace!("enter {rule} at {:?}", self.peek(0).position);
        }
    }

    pub fn trace_exit(&self, rule: &str) {
        if self.trace {
            log::trace!("exit {rule} at {:?}", self.peek(0).position);
        }
    }

    fn sentinel(&self) -> Token {
        let position = self
            .tokens
            .last()
            .map(|t| t.position)
            .unwrap_or_default();
        Token::eof(position)
    }

    /// Non-consuming lookahead `i` tokens ahead of the cursor.
    pub fn peek(&self, i: usize) -> Token {
        self.tokens
            .get(self.index + i)
            .cloned()
            .unwrap_or_else(|| self.sentinel())
    }

    /// Consumes and returns the next token, failing at end of input.
    pub fn advance(&mut self) -> Result<Token, SyntaxError> {
        let token = self.tokens.get(self.index).cloned();
        match token {
            Some(token) => {
                self.index += 1;
                self.last = Some(token.clone());
                Ok(token)
            }
            None => Err(SyntaxError::eof("a token")),
        }
    }

    /// The most recently advanced-past token (not affected by `peek`; see
    /// the module doc).
    pub fn last(&self) -> Token {
        self.last.clone().unwrap_or_else(|| self.sentinel())
    }

    pub fn current_position(&self) -> Position {
        self.peek(0).position
    }

    pub fn is_at_end(&self) -> bool {
        matches!(self.peek(0).kind, TokenKind::EndOfInput)
    }

    /// Records the current read position. Savepoints nest; an outer
    /// rollback discards whatever an inner scope committed.
    pub fn savepoint(&mut self) -> usize {
        self.savepoints.push(self.index);
        self.savepoints.len() - 1
    }

    /// Discards the savepoint while preserving the cursor's current
    /// position.
    pub fn commit(&mut self, mark: usize) {
        assert_eq!(
            mark,
            self.savepoints.len() - 1,
            "{}",
            InternalParserError::new("commit of a savepoint that is not the innermost one")
        );
        self.savepoints.pop();
    }

    /// Restores the position recorded by `savepoint`, replaying the same
    /// tokens on subsequent reads.
    pub fn rollback(&mut self, mark: usize) {
        assert_eq!(
            mark,
            self.savepoints.len() - 1,
            "{}",
            InternalParserError::new("rollback of a savepoint that is not the innermost one")
        );
        self.index = self.savepoints.pop().expect("savepoint stack underflow");
    }

    /// Runs `f` under a savepoint: commits on `Ok`, rolls back on `Err`.
    /// This is the speculative-scope idiom the statement and expression
    /// grammars use for bounded lookahead disambiguation.
    pub fn speculate<T>(
        &mut self,
        f: impl FnOnce(&mut Cursor) -> Result<T, SyntaxError>,
    ) -> Result<T, SyntaxError> {
        let mark = self.savepoint();
        match f(self) {
            Ok(value) => {
                self.commit(mark);
                Ok(value)
            }
            Err(err) => {
                self.rollback(mark);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    fn tok(value: &str) -> Token {
        Token::new(TokenKind::Identifier, value, Position::default())
    }

    #[test]
    fn test_peek_does_not_advance() {
        let mut cursor = Cursor::new(vec![tok("a"), tok("b")]);
        assert_eq!(cursor.peek(0).value, "a");
        assert_eq!(cursor.peek(1).value, "b");
        assert_eq!(cursor.advance().unwrap().value, "a");
    }

    #[test]
    fn test_rollback_restores_position() {
        let mut cursor = Cursor::new(vec![tok("a"), tok("b"), tok("c")]);
        cursor.advance().unwrap();
        let mark = cursor.savepoint();
        cursor.advance().unwrap();
        cursor.advance().unwrap();
        cursor.rollback(mark);
        assert_eq!(cursor.peek(0).value, "b");
    }

    #[test]
    fn test_nested_savepoints_outer_rollback_discards_inner_commit() {
        let mut cursor = Cursor::new(vec![tok("a"), tok("b"), tok("c")]);
        let outer = cursor.savepoint();
        cursor.advance().unwrap();
        let inner = cursor.savepoint();
        cursor.advance().unwrap();
        cursor.commit(inner);
        cursor.rollback(outer);
        assert_eq!(cursor.peek(0).value, "a");
    }

    #[test]
    fn test_advance_past_end_fails() {
        let mut cursor = Cursor::new(vec![tok("a")]);
        cursor.advance().unwrap();
        assert!(cursor.advance().is_err());
    }

    #[test]
    fn test_speculate_rolls_back_on_error() {
        let mut cursor = Cursor::new(vec![tok("a"), tok("b")]);
        let result: Result<(), SyntaxError> = cursor.speculate(|c| {
            c.advance().unwrap();
            Err(SyntaxError::new("nope", None))
        });
        assert!(result.is_err());
        assert_eq!(cursor.peek(0).value, "a");
    }
}
