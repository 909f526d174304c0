//! Tokenizer (component I, ambient).
//!
//! Scans Java source text into the `Token` stream the parser consumes,
//! satisfying the token-stream contract in full: it never emits a composite
//! `>>`/`>>>` token (every `>` is its own `Operator` token, so type-argument
//! closure and shift-operator synthesis stay entirely the expression
//! grammar's problem), and it emits a dedicated `@` token distinct from the
//! identifier that follows it.
//!
//! Driven by an ordered table of `(Regex, fn(&str) -> TokenKind)` entries,
//! the same idea this codebase's other lexer uses per-token-kind regexes
//! for, collapsed here into one hand-rolled scan loop since Java's token set
//! does not fit a simple terminal-literal derive macro.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::SyntaxError;
use crate::token::{Position, Token, TokenKind, BASIC_TYPES, KEYWORDS, MODIFIERS};

static IDENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*").unwrap());
static FLOAT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d[\d_]*\.\d[\d_]*([eE][+-]?\d+)?|\d[\d_]*[eE][+-]?\d+)[fFdD]?").unwrap()
});
static INT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0[xX][0-9a-fA-F_]+|0[bB][01_]+|\d[\d_]*)[lL]?").unwrap()
});

/// Multi-character operators and punctuation, longest first so the scanner
/// always takes the greediest valid match. `>` is deliberately limited to a
/// single character: no entry here starts with `>` followed by another
/// character, so `>>` and `>>>` can never be produced here.
const OPERATORS: &[&str] = &[
    ">>>=", "<<=", ">>=", "...", "->", "::", "<<", "<=", "==", "!=", "&&", "||", "++", "--",
    "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<", ">", "=", "+", "-", "*", "/", "%", "!",
    "~", "&", "|", "^", "?", ":", ";", ",", ".", "(", ")", "{", "}", "[", "]", "@",
];

pub fn tokenize(source: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut tokens = Vec::new();
    let mut line = 0usize;
    let mut col = 0usize;
    let bytes = source.as_bytes();
    let mut i = 0usize;

    let advance_by = |s: &str, line: &mut usize, col: &mut usize| {
        for c in s.chars() {
            if c == '\n' {
                *line += 1;
                *col = 0;
            } else {
                *col += 1;
            }
        }
    };

    while i < bytes.len() {
        let rest = &source[i..];
        let ch = rest.chars().next().unwrap();

        if ch.is_whitespace() {
            let w: String = rest.chars().next().unwrap().to_string();
            i += w.len();
            advance_by(&w, &mut line, &mut col);
            continue;
        }

        if let Some(stripped) = rest.strip_prefix("//") {
            let end = stripped.find('\n').map(|n| n + 2).unwrap_or(rest.len());
            let comment = &rest[..end];
            i += comment.len();
            advance_by(comment, &mut line, &mut col);
            continue;
        }

        if rest.starts_with("/*") {
            let end = rest[2..]
                .find("*/")
                .map(|n| n + 4)
                .ok_or_else(|| SyntaxError::new("unterminated block comment", Some(Position::new((line, col), (line, col)))))?;
            let comment = &rest[..end];
            i += comment.len();
            advance_by(comment, &mut line, &mut col);
            continue;
        }

        let start = (line, col);

        if ch == '"' {
            let literal = scan_string(rest, '"')
                .ok_or_else(|| SyntaxError::new("unterminated string literal", Some(Position::new(start, start))))?;
            let value = unescape::unescape(&literal[1..literal.len() - 1]).unwrap_or_else(|| literal.clone());
            i += literal.len();
            advance_by(&literal, &mut line, &mut col);
            tokens.push(Token::new(TokenKind::Literal, value, Position::new(start, (line, col))));
            continue;
        }

        if ch == '\'' {
            let literal = scan_string(rest, '\'')
                .ok_or_else(|| SyntaxError::new("unterminated character literal", Some(Position::new(start, start))))?;
            let value = unescape::unescape(&literal[1..literal.len() - 1]).unwrap_or_else(|| literal.clone());
            i += literal.len();
            advance_by(&literal, &mut line, &mut col);
            tokens.push(Token::new(TokenKind::Literal, value, Position::new(start, (line, col))));
            continue;
        }

        if let Some(m) = FLOAT_RE.find(rest) {
            let text = m.as_str().to_string();
            i += text.len();
            advance_by(&text, &mut line, &mut col);
            tokens.push(Token::new(TokenKind::Literal, text, Position::new(start, (line, col))));
            continue;
        }

        if ch.is_ascii_digit() {
            let m = INT_RE.find(rest).expect("a digit always matches INT_RE");
            let text = m.as_str().to_string();
            i += text.len();
            advance_by(&text, &mut line, &mut col);
            tokens.push(Token::new(TokenKind::Literal, text, Position::new(start, (line, col))));
            continue;
        }

        if let Some(m) = IDENT_RE.find(rest) {
            let text = m.as_str().to_string();
            i += text.len();
            advance_by(&text, &mut line, &mut col);
            let end = (line, col);
            let kind = if text == "true" || text == "false" || text == "null" {
                TokenKind::Literal
            } else if MODIFIERS.contains(&text.as_str()) {
                TokenKind::Modifier
            } else if BASIC_TYPES.contains(&text.as_str()) {
                TokenKind::BasicType
            } else if KEYWORDS.contains(&text.as_str()) {
                TokenKind::Keyword
            } else {
                TokenKind::Identifier
            };
            tokens.push(Token::new(kind, text, Position::new(start, end)));
            continue;
        }

        if let Some(op) = OPERATORS.iter().find(|op| rest.starts_with(*op)) {
            let text = op.to_string();
            i += text.len();
            advance_by(&text, &mut line, &mut col);
            let kind = if text == "@" {
                TokenKind::AnnotationMarker
            } else {
                TokenKind::Operator
            };
            tokens.push(Token::new(kind, text, Position::new(start, (line, col))));
            continue;
        }

        return Err(SyntaxError::new(
            format!("unrecognized character '{ch}'"),
            Some(Position::new(start, start)),
        ));
    }

    let eof_pos = Position::new((line, col), (line, col));
    tokens.push(Token::eof(eof_pos));
    Ok(tokens)
}

/// Scans a quoted literal starting at `rest[0]` (which must be `quote`),
/// handling backslash escapes, and returns the full literal text including
/// both quote characters.
fn scan_string(rest: &str, quote: char) -> Option<String> {
    let mut chars = rest.char_indices();
    let (_, first) = chars.next()?;
    debug_assert_eq!(first, quote);
    let mut escaped = false;
    for (idx, c) in chars {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
            continue;
        }
        if c == quote {
            return Some(rest[..idx + c.len_utf8()].to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<(TokenKind, String)> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.value))
            .collect()
    }

    #[test]
    fn test_never_emits_composite_shift_operators() {
        let tokens = kinds("a >> b >>> c");
        let gts = tokens.iter().filter(|(_, v)| v == ">").count();
        assert_eq!(gts, 3);
        assert!(!tokens.iter().any(|(_, v)| v == ">>" || v == ">>>"));
    }

    #[test]
    fn test_keyword_basic_type_modifier_identifier_classification() {
        let tokens = kinds("public static void main");
        assert_eq!(tokens[0], (TokenKind::Modifier, "public".into()));
        assert_eq!(tokens[1], (TokenKind::Modifier, "static".into()));
        assert_eq!(tokens[2], (TokenKind::BasicType, "void".into()));
        assert_eq!(tokens[3], (TokenKind::Identifier, "main".into()));
    }

    #[test]
    fn test_skips_comments() {
        let tokens = kinds("a // line comment\nb /* block \n comment */ c");
        let values: Vec<_> = tokens.into_iter().map(|(_, v)| v).collect();
        assert_eq!(values, vec!["a", "b", "c", ""]);
    }

    #[test]
    fn test_string_and_char_literals() {
        let tokens = kinds(r#""hi" 'x'"#);
        assert_eq!(tokens[0], (TokenKind::Literal, "hi".into()));
        assert_eq!(tokens[1], (TokenKind::Literal, "x".into()));
    }

    #[test]
    fn test_annotation_marker_is_distinct_token() {
        let tokens = kinds("@Override");
        assert_eq!(tokens[0].0, TokenKind::AnnotationMarker);
        assert_eq!(tokens[1], (TokenKind::Identifier, "Override".into()));
    }
}
