//! Grammar primitives (component D): `expect`, `peek_match`, `try_consume`,
//! and the identifier helpers every higher grammar layer is built from.

use crate::cursor::Cursor;
use crate::error::SyntaxError;
use crate::token::TokenKind;

/// One position in an `expect`/`peek_match`/`try_consume` pattern: either a
/// literal token value, or a whole token kind.
#[derive(Clone, Copy)]
pub enum Expect<'a> {
    Value(&'a str),
    Kind(TokenKind),
}

impl<'a> From<&'a str> for Expect<'a> {
    fn from(value: &'a str) -> Self {
        Expect::Value(value)
    }
}

impl From<TokenKind> for Expect<'_> {
    fn from(kind: TokenKind) -> Self {
        Expect::Kind(kind)
    }
}

fn matches(token: &crate::token::Token, expectation: &Expect) -> bool {
    match expectation {
        Expect::Value(value) => &token.value == value,
        Expect::Kind(kind) => &token.kind == kind,
    }
}

fn describe(expectation: &Expect) -> String {
    match expectation {
        Expect::Value(value) => format!("'{value}'"),
        Expect::Kind(kind) => format!("{kind:?}"),
    }
}

/// Consumes exactly `expectations.len()` tokens, each matching in order. On
/// mismatch, fails with a `SyntaxError` attached to the offending token's
/// position. Returns the value of the last consumed token, which is
/// convenient for callers doing `expect(cursor, &[TokenKind::Identifier.into()])?`.
pub fn expect<'a>(
    cursor: &mut Cursor,
    expectations: &[Expect<'a>],
) -> Result<String, SyntaxError> {
    let mut last = String::new();
    for expectation in expectations {
        let token = cursor.peek(0);
        if !matches(&token, expectation) {
            return Err(SyntaxError::new(
                format!("expected {}, found '{}'", describe(expectation), token.value),
                Some(token.position),
            ));
        }
        last = cursor.advance()?.value;
    }
    Ok(last)
}

/// Non-consuming check: does the upcoming token sequence match?
pub fn peek_match(cursor: &Cursor, expectations: &[Expect]) -> bool {
    expectations
        .iter()
        .enumerate()
        .all(|(i, expectation)| matches(&cursor.peek(i), expectation))
}

/// Atomic: if the upcoming sequence matches, consumes it all and returns
/// true; otherwise consumes nothing and returns false.
pub fn try_consume(cursor: &mut Cursor, expectations: &[Expect]) -> bool {
    if peek_match(cursor, expectations) {
        for _ in expectations {
            cursor.advance().expect("peek_match guaranteed this token exists");
        }
        true
    } else {
        false
    }
}

/// A single identifier token.
pub fn parse_identifier(cursor: &mut Cursor) -> Result<String, SyntaxError> {
    expect(cursor, &[TokenKind::Identifier.into()])
}

/// A dot-separated run of identifiers, joined by `.`.
pub fn parse_qualified_identifier(cursor: &mut Cursor) -> Result<String, SyntaxError> {
    let mut parts = vec![parse_identifier(cursor)?];
    while try_consume(cursor, &[Expect::Value(".")]) {
        parts.push(parse_identifier(cursor)?);
    }
    Ok(parts.join("."))
}

/// One or more qualified identifiers separated by `,`.
pub fn parse_qualified_identifier_list(cursor: &mut Cursor) -> Result<Vec<String>, SyntaxError> {
    let mut items = vec![parse_qualified_identifier(cursor)?];
    while try_consume(cursor, &[Expect::Value(",")]) {
        items.push(parse_qualified_identifier(cursor)?);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    #[test]
    fn test_expect_value_and_kind() {
        let mut cursor = Cursor::new(tokenize("foo ;").unwrap());
        let name = expect(&mut cursor, &[TokenKind::Identifier.into()]).unwrap();
        assert_eq!(name, "foo");
        expect(&mut cursor, &[Expect::Value(";")]).unwrap();
    }

    #[test]
    fn test_try_consume_is_atomic() {
        let mut cursor = Cursor::new(tokenize("a . b").unwrap());
        assert!(!try_consume(&mut cursor, &[Expect::Value("."), Expect::Value(".")]));
        assert_eq!(cursor.peek(0).value, "a");
    }

    #[test]
    fn test_parse_qualified_identifier() {
        let mut cursor = Cursor::new(tokenize("a.b.c").unwrap());
        assert_eq!(parse_qualified_identifier(&mut cursor).unwrap(), "a.b.c");
    }
}
