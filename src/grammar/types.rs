//! Type grammar (component E): basic types, reference types, type
//! arguments/parameters, and array dimensions.
//!
//! Because the tokenizer never merges adjacent `>` characters into `>>`/
//! `>>>` (see the tokenizer's module doc), closing a type-argument list only
//! ever has to consume a single `>` token, even when one generic closes
//! immediately inside another (`List<List<Integer>>` tokenizes as two
//! distinct `>` tokens). The merging problem only exists for the expression
//! grammar's shift operators, which have to go the other way and glue
//! adjacent `>` tokens back together.

use crate::ast::types::{BasicType, Dimensions, PatternType, ReferenceType, Type, TypeArgument, TypeParameter};
use crate::cursor::Cursor;
use crate::error::SyntaxError;
use crate::grammar::expressions::parse_expression;
use crate::grammar::primitives::{expect, parse_identifier, try_consume, Expect};
use crate::token::TokenKind;

pub fn parse_type(cursor: &mut Cursor) -> Result<Type, SyntaxError> {
    cursor.trace_enter("type");
    if matches!(cursor.peek(0).kind, TokenKind::BasicType) {
        parse_basic_type(cursor)
    } else {
        Ok(Type::Reference(parse_reference_type(cursor)?))
    }
}

pub fn parse_basic_type(cursor: &mut Cursor) -> Result<Type, SyntaxError> {
    let start = cursor.current_position();
    let name = expect(cursor, &[TokenKind::BasicType.into()])?;
    let dimensions = parse_array_dimensions(cursor)?;
    let end = cursor.last().position;
    Ok(Type::Basic(BasicType {
        name,
        dimensions,
        position: start.merge(&end),
    }))
}

/// A dotted chain of identifiers, each optionally carrying `<...>` type
/// arguments, with array dimensions only at the very end.
pub fn parse_reference_type(cursor: &mut Cursor) -> Result<ReferenceType, SyntaxError> {
    let start = cursor.current_position();
    let mut head = parse_reference_type_segment(cursor, start)?;

    let mut current = &mut head;
    while try_consume(cursor, &[Expect::Value(".")]) {
        let seg_start = cursor.current_position();
        let segment = parse_reference_type_segment(cursor, seg_start)?;
        current.sub_type = Some(Box::new(segment));
        current = current.sub_type.as_mut().unwrap();
    }

    let dimensions = parse_array_dimensions(cursor)?;
    let end = cursor.last().position;
    current.dimensions = dimensions;
    head.position = start.merge(&end);
    Ok(head)
}

fn parse_reference_type_segment(
    cursor: &mut Cursor,
    start: crate::token::Position,
) -> Result<ReferenceType, SyntaxError> {
    let name = parse_identifier(cursor)?;
    let arguments = if peek_is_type_arguments_open(cursor) {
        Some(parse_type_arguments(cursor)?)
    } else {
        None
    };
    let end = cursor.last().position;
    Ok(ReferenceType {
        name,
        arguments,
        sub_type: None,
        dimensions: Vec::new(),
        position: start.merge(&end),
    })
}

fn peek_is_type_arguments_open(cursor: &Cursor) -> bool {
    cursor.peek(0).is(TokenKind::Operator, "<")
}

/// `<` type-argument (`,` type-argument)* `>`, diamond included (`<>`).
pub fn parse_type_arguments(cursor: &mut Cursor) -> Result<Vec<TypeArgument>, SyntaxError> {
    expect(cursor, &[Expect::Value("<")])?;
    if try_consume(cursor, &[Expect::Value(">")]) {
        return Ok(Vec::new());
    }
    let mut arguments = vec![parse_type_argument(cursor)?];
    while try_consume(cursor, &[Expect::Value(",")]) {
        arguments.push(parse_type_argument(cursor)?);
    }
    expect(cursor, &[Expect::Value(">")])?;
    Ok(arguments)
}

fn parse_type_argument(cursor: &mut Cursor) -> Result<TypeArgument, SyntaxError> {
    let start = cursor.current_position();
    if try_consume(cursor, &[Expect::Value("?")]) {
        let (pattern_type, bound) = if try_consume(cursor, &[Expect::Value("extends")]) {
            (PatternType::Extends, Some(Box::new(parse_type(cursor)?)))
        } else if try_consume(cursor, &[Expect::Value("super")]) {
            (PatternType::Super, Some(Box::new(parse_type(cursor)?)))
        } else {
            (PatternType::Wildcard, None)
        };
        let end = cursor.last().position;
        return Ok(TypeArgument {
            type_: bound,
            pattern_type,
            position: start.merge(&end),
        });
    }
    let type_ = parse_type(cursor)?;
    let end = type_.position();
    Ok(TypeArgument {
        type_: Some(Box::new(type_)),
        pattern_type: PatternType::None,
        position: start.merge(&end),
    })
}

/// `<` type-parameter (`,` type-parameter)* `>`.
pub fn parse_type_parameters(cursor: &mut Cursor) -> Result<Vec<TypeParameter>, SyntaxError> {
    expect(cursor, &[Expect::Value("<")])?;
    let mut parameters = vec![parse_type_parameter(cursor)?];
    while try_consume(cursor, &[Expect::Value(",")]) {
        parameters.push(parse_type_parameter(cursor)?);
    }
    expect(cursor, &[Expect::Value(">")])?;
    Ok(parameters)
}

fn parse_type_parameter(cursor: &mut Cursor) -> Result<TypeParameter, SyntaxError> {
    let start = cursor.current_position();
    let name = parse_identifier(cursor)?;
    let extends = if try_consume(cursor, &[Expect::Value("extends")]) {
        let mut bounds = vec![parse_reference_type(cursor)?];
        while try_consume(cursor, &[Expect::Value("&")]) {
            bounds.push(parse_reference_type(cursor)?);
        }
        Some(bounds)
    } else {
        None
    };
    let end = cursor.last().position;
    Ok(TypeParameter {
        name,
        extends,
        position: start.merge(&end),
    })
}

/// Zero or more unsized `[]` pairs, used to hoist trailing dimensions onto a
/// type (`int foo()[]`, `int[] a, b[]`).
pub fn parse_array_dimensions(cursor: &mut Cursor) -> Result<Dimensions, SyntaxError> {
    let mut dims = Vec::new();
    while try_consume(cursor, &[Expect::Value("["), Expect::Value("]")]) {
        dims.push(None);
    }
    Ok(dims)
}

/// Same as `parse_array_dimensions` but dimensions may carry a sizing
/// expression (`new int[5][]`), used only by array creators.
pub fn parse_sized_array_dimensions(cursor: &mut Cursor) -> Result<Dimensions, SyntaxError> {
    let mut dims = Vec::new();
    while try_consume(cursor, &[Expect::Value("[")]) {
        if try_consume(cursor, &[Expect::Value("]")]) {
            dims.push(None);
        } else {
            let size = parse_expression(cursor)?;
            expect(cursor, &[Expect::Value("]")])?;
            dims.push(Some(size));
        }
    }
    Ok(dims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse(src: &str) -> Type {
        let mut cursor = Cursor::new(tokenize(src).unwrap());
        parse_type(&mut cursor).unwrap()
    }

    #[test]
    fn test_basic_type_with_dimensions() {
        let ty = parse("int[][]");
        match ty {
            Type::Basic(b) => {
                assert_eq!(b.name, "int");
                assert_eq!(b.dimensions.len(), 2);
            }
            _ => panic!("expected basic type"),
        }
    }

    #[test]
    fn test_nested_generic_closes_without_merging_angle_brackets() {
        let ty = parse("Map<String, List<Integer>>");
        match ty {
            Type::Reference(r) => {
                assert_eq!(r.name, "Map");
                let args = r.arguments.unwrap();
                assert_eq!(args.len(), 2);
            }
            _ => panic!("expected reference type"),
        }
    }

    #[test]
    fn test_dotted_reference_type_chain() {
        let ty = parse("Outer<T>.Inner");
        match ty {
            Type::Reference(r) => {
                assert_eq!(r.name, "Outer");
                let sub = r.sub_type.unwrap();
                assert_eq!(sub.name, "Inner");
            }
            _ => panic!("expected reference type"),
        }
    }

    #[test]
    fn test_wildcard_with_extends_bound() {
        let mut cursor = Cursor::new(tokenize("<? extends Number>").unwrap());
        let args = parse_type_arguments(&mut cursor).unwrap();
        assert_eq!(args.len(), 1);
        assert_eq!(args[0].pattern_type, PatternType::Extends);
        assert!(args[0].type_.is_some());
    }
}
