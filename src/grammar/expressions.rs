//! Expression grammar (component H): the precedence ladder from assignment
//! down through lambdas, the ternary, the flat binary-operator list and its
//! fold, unary/cast disambiguation, and primaries with their selector chains
//! and creators.
//!
//! Precedence climbing collapses a flat `[operand, operator, operand, ...]`
//! list by repeatedly folding the leftmost operator of maximal precedence.
//! Every Java binary operator is left-associative, so always picking the
//! leftmost among ties produces the correct tree without any special-casing.

use crate::ast::declarations::ClassBodyDeclaration;
use crate::ast::expressions::{
    ArrayInitializer, Assignment, BinaryOperation, Cast, Expression, LambdaBody, LambdaExpression,
    LambdaParameters, MethodReference, MethodReferenceQualifier, Operand, Primary, PrimaryKind,
    Selector, TernaryExpression, VariableInitializer,
};
use crate::ast::types::{ReferenceType, Type, TypeArgument};
use crate::cursor::Cursor;
use crate::error::SyntaxError;
use crate::grammar::declarations::{parse_class_body, parse_formal_parameter};
use crate::grammar::primitives::{expect, parse_identifier, peek_match, try_consume, Expect};
use crate::grammar::statements::parse_block;
use crate::grammar::types::{
    parse_reference_type, parse_sized_array_dimensions, parse_type, parse_type_arguments,
};
use crate::token::{is_assignment_operator, is_infix_operator, Position, TokenKind};

pub fn parse_expression(cursor: &mut Cursor) -> Result<Expression, SyntaxError> {
    cursor.trace_enter("expression");
    if let Some(lambda) = try_parse_lambda(cursor)? {
        return Ok(Expression::Lambda(lambda));
    }
    parse_assignment(cursor)
}

/// Parses an expression that cannot itself be an assignment target, used
/// wherever the grammar forbids `a = b` (loop conditions, array indices,
/// ...). Still accepts the full ternary/binary/unary ladder.
pub fn parse_non_assignment_expression(cursor: &mut Cursor) -> Result<Expression, SyntaxError> {
    if let Some(lambda) = try_parse_lambda(cursor)? {
        return Ok(Expression::Lambda(lambda));
    }
    parse_ternary(cursor)
}

fn try_parse_lambda(cursor: &mut Cursor) -> Result<Option<LambdaExpression>, SyntaxError> {
    let start = cursor.current_position();
    let mark = cursor.savepoint();
    let parameters = match parse_lambda_parameters(cursor) {
        Ok(p) => p,
        Err(_) => {
            cursor.rollback(mark);
            return Ok(None);
        }
    };
    if !try_consume(cursor, &[Expect::Value("->")]) {
        cursor.rollback(mark);
        return Ok(None);
    }
    cursor.commit(mark);
    let body = parse_lambda_body(cursor)?;
    let end = cursor.last().position;
    Ok(Some(LambdaExpression {
        parameters,
        body,
        position: start.merge(&end),
    }))
}

fn parse_lambda_parameters(cursor: &mut Cursor) -> Result<LambdaParameters, SyntaxError> {
    if matches!(cursor.peek(0).kind, TokenKind::Identifier) && cursor.peek(1).is(TokenKind::Operator, "->") {
        return Ok(LambdaParameters::Single(parse_identifier(cursor)?));
    }
    expect(cursor, &[Expect::Value("(")])?;
    if try_consume(cursor, &[Expect::Value(")")]) {
        return Ok(LambdaParameters::Typed(Vec::new()));
    }
    if is_inferred_parameter_start(cursor) {
        let mut names = vec![parse_identifier(cursor)?];
        while try_consume(cursor, &[Expect::Value(",")]) {
            if !is_inferred_parameter_start(cursor) {
                return Err(SyntaxError::new(
                    "cannot mix inferred and typed lambda parameters",
                    Some(cursor.current_position()),
                ));
            }
            names.push(parse_identifier(cursor)?);
        }
        expect(cursor, &[Expect::Value(")")])?;
        return Ok(LambdaParameters::Inferred(names));
    }
    let mut params = vec![parse_formal_parameter(cursor)?];
    while try_consume(cursor, &[Expect::Value(",")]) {
        params.push(parse_formal_parameter(cursor)?);
    }
    expect(cursor, &[Expect::Value(")")])?;
    Ok(LambdaParameters::Typed(params))
}

fn is_inferred_parameter_start(cursor: &Cursor) -> bool {
    matches!(cursor.peek(0).kind, TokenKind::Identifier)
        && (cursor.peek(1).is(TokenKind::Operator, ",") || cursor.peek(1).is(TokenKind::Operator, ")"))
}

fn parse_lambda_body(cursor: &mut Cursor) -> Result<LambdaBody, SyntaxError> {
    if peek_match(cursor, &[Expect::Value("{")]) {
        Ok(LambdaBody::Block(parse_block(cursor)?))
    } else {
        Ok(LambdaBody::Expression(Box::new(parse_expression(cursor)?)))
    }
}

fn parse_assignment(cursor: &mut Cursor) -> Result<Expression, SyntaxError> {
    let start = cursor.current_position();
    let target = parse_ternary(cursor)?;
    if let Some(operator) = try_parse_assignment_operator(cursor)? {
        let value = Box::new(parse_expression(cursor)?);
        let end = value.position();
        return Ok(Expression::Assignment(Assignment {
            expressionl: Box::new(target),
            operator,
            value,
            position: start.merge(&end),
        }));
    }
    Ok(target)
}

fn try_parse_assignment_operator(cursor: &mut Cursor) -> Result<Option<String>, SyntaxError> {
    if cursor.peek(0).is(TokenKind::Operator, ">") {
        let mark = cursor.savepoint();
        cursor.advance()?;
        let mut count = 1;
        while count < 3 && cursor.peek(0).is(TokenKind::Operator, ">") {
            cursor.advance()?;
            count += 1;
        }
        if count >= 2 && cursor.peek(0).is(TokenKind::Operator, "=") {
            cursor.advance()?;
            let op = format!("{}=", ">".repeat(count));
            if is_assignment_operator(&op) {
                cursor.commit(mark);
                return Ok(Some(op));
            }
        }
        cursor.rollback(mark);
        return Ok(None);
    }
    let token = cursor.peek(0);
    if token.kind == TokenKind::Operator && is_assignment_operator(&token.value) {
        cursor.advance()?;
        return Ok(Some(token.value));
    }
    Ok(None)
}

fn parse_ternary(cursor: &mut Cursor) -> Result<Expression, SyntaxError> {
    let start = cursor.current_position();
    let condition = parse_binary(cursor)?;
    if try_consume(cursor, &[Expect::Value("?")]) {
        let if_true = Box::new(parse_expression(cursor)?);
        expect(cursor, &[Expect::Value(":")])?;
        let if_false = Box::new(if let Some(lambda) = try_parse_lambda(cursor)? {
            Expression::Lambda(lambda)
        } else {
            parse_ternary(cursor)?
        });
        let end = if_false.position();
        return Ok(Expression::Ternary(TernaryExpression {
            condition: Box::new(condition),
            if_true,
            if_false,
            position: start.merge(&end),
        }));
    }
    Ok(condition)
}

fn parse_binary(cursor: &mut Cursor) -> Result<Expression, SyntaxError> {
    let mut operands: Vec<Operand> = vec![Operand::Expression(Box::new(parse_unary(cursor)?))];
    let mut operators: Vec<String> = Vec::new();
    loop {
        match try_parse_infix_operator(cursor)? {
            Some(op) if op == "instanceof" => {
                let ty = parse_type(cursor)?;
                operators.push(op);
                operands.push(Operand::Type(Box::new(ty)));
            }
            Some(op) => {
                operators.push(op);
                operands.push(Operand::Expression(Box::new(parse_unary(cursor)?)));
            }
            None => break,
        }
    }
    Ok(fold_binary(operands, operators))
}

fn try_parse_infix_operator(cursor: &mut Cursor) -> Result<Option<String>, SyntaxError> {
    if try_consume(cursor, &[Expect::Value("instanceof")]) {
        return Ok(Some("instanceof".to_string()));
    }
    if !cursor.peek(0).is(TokenKind::Operator, ">") {
        let token = cursor.peek(0);
        if token.kind == TokenKind::Operator && is_infix_operator(&token.value) {
            cursor.advance()?;
            return Ok(Some(token.value));
        }
        return Ok(None);
    }
    let mark = cursor.savepoint();
    cursor.advance()?;
    let mut count = 1;
    while count < 3 && cursor.peek(0).is(TokenKind::Operator, ">") {
        cursor.advance()?;
        count += 1;
    }
    if count == 1 && cursor.peek(0).is(TokenKind::Operator, "=") {
        cursor.advance()?;
        cursor.commit(mark);
        return Ok(Some(">=".to_string()));
    }
    let op = ">".repeat(count);
    if is_infix_operator(&op) {
        cursor.commit(mark);
        Ok(Some(op))
    } else {
        cursor.rollback(mark);
        Ok(None)
    }
}

fn operand_position(operand: &Operand) -> Position {
    match operand {
        Operand::Expression(e) => e.position(),
        Operand::Type(t) => t.position(),
    }
}

fn precedence(op: &str) -> u8 {
    match op {
        "||" => 1,
        "&&" => 2,
        "|" => 3,
        "^" => 4,
        "&" => 5,
        "==" | "!=" => 6,
        "<" | ">" | "<=" | ">=" | "instanceof" => 7,
        "<<" | ">>" | ">>>" => 8,
        "+" | "-" => 9,
        "*" | "/" | "%" => 10,
        _ => 0,
    }
}

fn fold_binary(mut operands: Vec<Operand>, mut operators: Vec<String>) -> Expression {
    while !operators.is_empty() {
        let mut best = 0;
        let mut best_prec = precedence(&operators[0]);
        for i in 1..operators.len() {
            let p = precedence(&operators[i]);
            if p > best_prec {
                best = i;
                best_prec = p;
            }
        }
        let left = operands.remove(best);
        let right = operands.remove(best);
        let op = operators.remove(best);
        let position = operand_position(&left).merge(&operand_position(&right));
        let operandl = match left {
            Operand::Expression(e) => e,
            Operand::Type(_) => unreachable!("a type operand is never the left side of a fold"),
        };
        let combined = BinaryOperation {
            operator: op,
            operandl,
            operandr: right,
            position,
        };
        operands.insert(best, Operand::Expression(Box::new(Expression::Binary(combined))));
    }
    match operands.into_iter().next().expect("at least one operand") {
        Operand::Expression(e) => *e,
        Operand::Type(_) => unreachable!("the final fold result is never a bare type"),
    }
}

const PREFIX_OPERATORS: &[&str] = &["+", "-", "++", "--", "!", "~"];

fn parse_unary(cursor: &mut Cursor) -> Result<Expression, SyntaxError> {
    let start = cursor.current_position();
    let token = cursor.peek(0);
    if token.kind == TokenKind::Operator && PREFIX_OPERATORS.contains(&token.value.as_str()) {
        let op = cursor.advance()?.value;
        let operand = parse_unary(cursor)?;
        return Ok(prepend_prefix(operand, op, start));
    }
    if let Some(cast) = try_parse_cast(cursor)? {
        return Ok(cast);
    }
    parse_postfix(cursor)
}

/// Attaches a prefix operator to the primary's flat `prefix_operators`
/// list. `parse_primary_expression` always produces a `Primary` (wrapping
/// non-primary parenthesized expressions in `PrimaryKind::Nested`), so this
/// always has somewhere to attach to except for a method reference, which
/// Java never allows a prefix operator on anyway.
fn prepend_prefix(expr: Expression, op: String, start: Position) -> Expression {
    match expr {
        Expression::Primary(mut p) => {
            p.prefix_operators.insert(0, op);
            p.position = start.merge(&p.position);
            Expression::Primary(p)
        }
        other => other,
    }
}

fn try_parse_cast(cursor: &mut Cursor) -> Result<Option<Expression>, SyntaxError> {
    if !cursor.peek(0).is(TokenKind::Operator, "(") {
        return Ok(None);
    }
    let start = cursor.current_position();
    let mark = cursor.savepoint();
    let result: Result<Expression, SyntaxError> = (|| {
        cursor.advance()?;
        let ty = parse_type(cursor)?;
        expect(cursor, &[Expect::Value(")")])?;
        // A cast of a reference type must be followed by another unary
        // expression that cannot itself start with a binary/assignment
        // operator; basic-type casts are unambiguous and always accepted.
        let expression = Box::new(parse_unary(cursor)?);
        let end = expression.position();
        Ok(Expression::Cast(Cast {
            type_: Box::new(ty),
            expression,
            position: start.merge(&end),
        }))
    })();
    match result {
        Ok(expr) => {
            cursor.commit(mark);
            Ok(Some(expr))
        }
        Err(_) => {
            cursor.rollback(mark);
            Ok(None)
        }
    }
}

fn parse_postfix(cursor: &mut Cursor) -> Result<Expression, SyntaxError> {
    let mut expr = parse_primary_expression(cursor)?;

    if let Expression::Primary(ref mut p) = expr {
        while let Some(selector) = try_parse_selector(cursor)? {
            p.selectors.push(selector);
            p.position = p.position.merge(&cursor.last().position);
        }
        loop {
            let token = cursor.peek(0);
            if token.kind == TokenKind::Operator && (token.value == "++" || token.value == "--") {
                cursor.advance()?;
                p.postfix_operators.push(token.value);
                p.position = p.position.merge(&cursor.last().position);
                continue;
            }
            break;
        }
    }

    if try_consume(cursor, &[Expect::Value("::")]) {
        expr = parse_method_reference_tail(cursor, expr)?;
    }

    Ok(expr)
}

fn parse_method_reference_tail(
    cursor: &mut Cursor,
    qualifier: Expression,
) -> Result<Expression, SyntaxError> {
    let start = qualifier.position();
    let type_arguments = if peek_match(cursor, &[Expect::Value("<")]) {
        Some(parse_type_arguments(cursor)?)
    } else {
        None
    };
    let method = parse_method_reference_name(cursor)?;
    let end = cursor.last().position;
    Ok(Expression::MethodReference(MethodReference {
        expression: MethodReferenceQualifier::Expression(Box::new(qualifier)),
        type_arguments,
        method,
        position: start.merge(&end),
    }))
}

fn parse_method_reference_name(cursor: &mut Cursor) -> Result<String, SyntaxError> {
    if try_consume(cursor, &[Expect::Value("new")]) {
        Ok("new".to_string())
    } else {
        parse_identifier(cursor)
    }
}

/// A primary expression, or a `super::method` reference, or a parenthesized
/// sub-expression. `::` qualifiers other than `super` are resolved in
/// `parse_postfix` after the fact, since the qualifier there can be any
/// primary (`Type.class`, a field access, an array type, ...).
fn parse_primary_expression(cursor: &mut Cursor) -> Result<Expression, SyntaxError> {
    let start = cursor.current_position();

    if peek_match(cursor, &[Expect::Value("super"), Expect::Value("::")]) {
        cursor.advance()?;
        cursor.advance()?;
        let type_arguments = if peek_match(cursor, &[Expect::Value("<")]) {
            Some(parse_type_arguments(cursor)?)
        } else {
            None
        };
        let method = parse_method_reference_name(cursor)?;
        let end = cursor.last().position;
        return Ok(Expression::MethodReference(MethodReference {
            expression: MethodReferenceQualifier::Super,
            type_arguments,
            method,
            position: start.merge(&end),
        }));
    }

    if peek_match(cursor, &[Expect::Value("(")]) {
        cursor.advance()?;
        let inner = parse_expression(cursor)?;
        expect(cursor, &[Expect::Value(")")])?;
        let end = cursor.last().position;
        let kind = match inner {
            Expression::Primary(p) => p.kind,
            other => PrimaryKind::Nested(Box::new(other)),
        };
        return Ok(Expression::Primary(Primary {
            prefix_operators: Vec::new(),
            postfix_operators: Vec::new(),
            qualifier: None,
            selectors: Vec::new(),
            kind,
            position: start.merge(&end),
        }));
    }

    let (qualifier, kind) = parse_primary_kind(cursor, start)?;
    let end = cursor.last().position;
    Ok(Expression::Primary(Primary {
        prefix_operators: Vec::new(),
        postfix_operators: Vec::new(),
        qualifier,
        selectors: Vec::new(),
        kind,
        position: start.merge(&end),
    }))
}

fn parse_primary_kind(
    cursor: &mut Cursor,
    start: Position,
) -> Result<(Option<String>, PrimaryKind), SyntaxError> {
    let token = cursor.peek(0);

    if token.kind == TokenKind::Literal {
        cursor.advance()?;
        return Ok((None, PrimaryKind::Literal(token.value)));
    }

    if try_consume(cursor, &[Expect::Value("this")]) {
        if peek_match(cursor, &[Expect::Value("(")]) {
            let arguments = parse_arguments(cursor)?;
            return Ok((None, PrimaryKind::ExplicitConstructorInvocation { type_arguments: None, arguments }));
        }
        return Ok((None, PrimaryKind::This));
    }

    if try_consume(cursor, &[Expect::Value("super")]) {
        return parse_super_suffix(cursor);
    }

    if try_consume(cursor, &[Expect::Value("new")]) {
        return parse_creator(cursor, start).map(|kind| (None, kind));
    }

    if peek_match(cursor, &[Expect::Value("void"), Expect::Value(".")]) {
        cursor.advance()?;
        cursor.advance()?;
        expect(cursor, &[Expect::Value("class")])?;
        return Ok((None, PrimaryKind::VoidClassReference));
    }

    if matches!(token.kind, TokenKind::BasicType) {
        let ty = parse_type(cursor)?;
        expect(cursor, &[Expect::Value(".")])?;
        expect(cursor, &[Expect::Value("class")])?;
        return Ok((None, PrimaryKind::ClassReference { type_: ty }));
    }

    parse_identifier_suffix(cursor)
}

fn parse_super_suffix(cursor: &mut Cursor) -> Result<(Option<String>, PrimaryKind), SyntaxError> {
    if try_consume(cursor, &[Expect::Value(".")]) {
        let type_arguments = if peek_match(cursor, &[Expect::Value("<")]) {
            Some(parse_type_arguments(cursor)?)
        } else {
            None
        };
        let member = parse_identifier(cursor)?;
        if peek_match(cursor, &[Expect::Value("(")]) {
            let arguments = parse_arguments(cursor)?;
            return Ok((None, PrimaryKind::SuperMethodInvocation { member, type_arguments, arguments }));
        }
        return Ok((None, PrimaryKind::SuperMemberReference { member }));
    }
    let arguments = parse_arguments(cursor)?;
    Ok((None, PrimaryKind::SuperConstructorInvocation { arguments }))
}

fn parse_identifier_suffix(cursor: &mut Cursor) -> Result<(Option<String>, PrimaryKind), SyntaxError> {
    let mut parts = vec![parse_identifier(cursor)?];
    while peek_match(cursor, &[Expect::Value("."), TokenKind::Identifier.into()])
        && !peek_match(cursor, &[Expect::Value("."), Expect::Value("class")])
        && !peek_match(cursor, &[Expect::Value("."), Expect::Value("this")])
        && !peek_match(cursor, &[Expect::Value("."), Expect::Value("super")])
        && !peek_match(cursor, &[Expect::Value("."), Expect::Value("new")])
    {
        cursor.advance()?;
        parts.push(parse_identifier(cursor)?);
    }
    let qualifier = if parts.len() > 1 {
        Some(parts[..parts.len() - 1].join("."))
    } else {
        None
    };
    let name = parts.last().unwrap().clone();

    if try_consume(cursor, &[Expect::Value("."), Expect::Value("class")]) {
        return Ok((
            None,
            PrimaryKind::ClassReference {
                type_: Type::Reference(ReferenceType {
                    name: parts.join("."),
                    ..Default::default()
                }),
            },
        ));
    }
    if try_consume(cursor, &[Expect::Value("."), Expect::Value("this")]) {
        return Ok((qualifier, PrimaryKind::This));
    }
    if peek_match(cursor, &[Expect::Value("."), Expect::Value("new")]) {
        cursor.advance()?;
        cursor.advance()?;
        let type_ = parse_reference_type(cursor)?;
        let kind = parse_creator_rest(cursor, type_, None)?;
        return Ok((qualifier, promote_to_inner_creator(kind)));
    }

    let type_arguments = if peek_match(cursor, &[Expect::Value("<")]) {
        Some(parse_type_arguments(cursor)?)
    } else {
        None
    };
    if peek_match(cursor, &[Expect::Value("(")]) {
        let arguments = parse_arguments(cursor)?;
        return Ok((qualifier, PrimaryKind::MethodInvocation { member: name, type_arguments, arguments }));
    }
    Ok((qualifier, PrimaryKind::MemberReference { member: name }))
}

fn promote_to_inner_creator(kind: PrimaryKind) -> PrimaryKind {
    match kind {
        PrimaryKind::ClassCreator { type_, constructor_type_arguments, arguments, body } => {
            PrimaryKind::InnerClassCreator { type_, constructor_type_arguments, arguments, body }
        }
        other => other,
    }
}

/// `new` has already been consumed; dispatches to an array or class creator.
fn parse_creator(cursor: &mut Cursor, start: Position) -> Result<PrimaryKind, SyntaxError> {
    let constructor_type_arguments = if peek_match(cursor, &[Expect::Value("<")]) {
        Some(parse_type_arguments(cursor)?)
    } else {
        None
    };
    if matches!(cursor.peek(0).kind, TokenKind::BasicType) {
        let name = cursor.advance()?.value;
        let dimensions = parse_sized_array_dimensions(cursor)?;
        let initializer = if peek_match(cursor, &[Expect::Value("{")]) {
            Some(parse_array_initializer(cursor)?)
        } else {
            None
        };
        return Ok(PrimaryKind::ArrayCreator {
            type_: Type::Basic(crate::ast::types::BasicType {
                name,
                dimensions: Vec::new(),
                position: start,
            }),
            dimensions,
            initializer,
        });
    }
    let type_ = parse_reference_type(cursor)?;
    parse_creator_rest(cursor, type_, constructor_type_arguments)
}

fn parse_creator_rest(
    cursor: &mut Cursor,
    type_: ReferenceType,
    constructor_type_arguments: Option<Vec<TypeArgument>>,
) -> Result<PrimaryKind, SyntaxError> {
    if peek_match(cursor, &[Expect::Value("[")]) {
        let dimensions = parse_sized_array_dimensions(cursor)?;
        let initializer = if peek_match(cursor, &[Expect::Value("{")]) {
            Some(parse_array_initializer(cursor)?)
        } else {
            None
        };
        return Ok(PrimaryKind::ArrayCreator {
            type_: Type::Reference(type_),
            dimensions,
            initializer,
        });
    }
    let arguments = parse_arguments(cursor)?;
    let body = if peek_match(cursor, &[Expect::Value("{")]) {
        Some(parse_class_body(cursor)?)
    } else {
        None
    };
    Ok(PrimaryKind::ClassCreator {
        type_,
        constructor_type_arguments,
        arguments,
        body,
    })
}

pub fn parse_arguments(cursor: &mut Cursor) -> Result<Vec<Expression>, SyntaxError> {
    expect(cursor, &[Expect::Value("(")])?;
    if try_consume(cursor, &[Expect::Value(")")]) {
        return Ok(Vec::new());
    }
    let mut args = vec![parse_expression(cursor)?];
    while try_consume(cursor, &[Expect::Value(",")]) {
        args.push(parse_expression(cursor)?);
    }
    expect(cursor, &[Expect::Value(")")])?;
    Ok(args)
}

pub fn parse_array_initializer(cursor: &mut Cursor) -> Result<ArrayInitializer, SyntaxError> {
    let start = cursor.current_position();
    expect(cursor, &[Expect::Value("{")])?;
    let mut initializers = Vec::new();
    if !peek_match(cursor, &[Expect::Value("}")]) {
        initializers.push(parse_variable_initializer(cursor)?);
        while try_consume(cursor, &[Expect::Value(",")]) {
            if peek_match(cursor, &[Expect::Value("}")]) {
                break;
            }
            initializers.push(parse_variable_initializer(cursor)?);
        }
    }
    expect(cursor, &[Expect::Value("}")])?;
    let end = cursor.last().position;
    Ok(ArrayInitializer {
        initializers,
        position: start.merge(&end),
    })
}

pub fn parse_variable_initializer(cursor: &mut Cursor) -> Result<VariableInitializer, SyntaxError> {
    if peek_match(cursor, &[Expect::Value("{")]) {
        Ok(VariableInitializer::Array(parse_array_initializer(cursor)?))
    } else {
        Ok(VariableInitializer::Expression(parse_expression(cursor)?))
    }
}

fn try_parse_selector(cursor: &mut Cursor) -> Result<Option<Selector>, SyntaxError> {
    if try_consume(cursor, &[Expect::Value("[")]) {
        let index = Box::new(parse_expression(cursor)?);
        expect(cursor, &[Expect::Value("]")])?;
        return Ok(Some(Selector::ArraySelector { index }));
    }

    if peek_match(cursor, &[Expect::Value("."), Expect::Value("new")]) {
        cursor.advance()?;
        cursor.advance()?;
        let type_ = parse_identifier(cursor)?;
        let type_arguments = if peek_match(cursor, &[Expect::Value("<")]) {
            Some(parse_type_arguments(cursor)?)
        } else {
            None
        };
        let arguments = parse_arguments(cursor)?;
        let body = if peek_match(cursor, &[Expect::Value("{")]) {
            Some(parse_class_body(cursor)?)
        } else {
            None
        };
        return Ok(Some(Selector::InnerClassCreator {
            type_arguments,
            name: type_,
            constructor_type_arguments: None,
            arguments,
            body,
        }));
    }

    if try_consume(cursor, &[Expect::Value("."), Expect::Value("this")]) {
        return Ok(Some(Selector::This));
    }

    if try_consume(cursor, &[Expect::Value("."), Expect::Value("super")]) {
        expect(cursor, &[Expect::Value(".")])?;
        let member = parse_identifier(cursor)?;
        return Ok(Some(Selector::SuperMemberReference { member }));
    }

    if peek_match(cursor, &[Expect::Value(".")]) && !peek_match(cursor, &[Expect::Value("."), Expect::Value("class")]) {
        cursor.advance()?;
        let type_arguments = if peek_match(cursor, &[Expect::Value("<")]) {
            Some(parse_type_arguments(cursor)?)
        } else {
            None
        };
        let member = parse_identifier(cursor)?;
        if peek_match(cursor, &[Expect::Value("(")]) {
            let arguments = parse_arguments(cursor)?;
            return Ok(Some(Selector::MethodInvocation { member, type_arguments, arguments }));
        }
        return Ok(Some(Selector::MemberReference { member }));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse(src: &str) -> Expression {
        let mut cursor = Cursor::new(tokenize(src).unwrap());
        parse_expression(&mut cursor).unwrap()
    }

    #[test]
    fn test_left_associative_additive_chain() {
        let expr = parse("a - b - c");
        match expr {
            Expression::Binary(outer) => {
                assert_eq!(outer.operator, "-");
                match *outer.operandl {
                    Expression::Binary(inner) => assert_eq!(inner.operator, "-"),
                    other => panic!("expected nested binary, got {other:?}"),
                }
            }
            other => panic!("expected binary, got {other:?}"),
        }
    }

    #[test]
    fn test_precedence_multiplication_before_addition() {
        let expr = parse("a + b * c");
        match expr {
            Expression::Binary(outer) => {
                assert_eq!(outer.operator, "+");
                match outer.operandr {
                    Operand::Expression(e) => match *e {
                        Expression::Binary(inner) => assert_eq!(inner.operator, "*"),
                        other => panic!("expected binary, got {other:?}"),
                    },
                    Operand::Type(_) => panic!("expected expression operand"),
                }
            }
            other => panic!("expected binary, got {other:?}"),
        }
    }

    #[test]
    fn test_shift_operators_synthesized_from_single_gt_tokens() {
        let expr = parse("a >> b");
        match expr {
            Expression::Binary(b) => assert_eq!(b.operator, ">>"),
            other => panic!("expected binary, got {other:?}"),
        }
        let expr = parse("a >>> b");
        match expr {
            Expression::Binary(b) => assert_eq!(b.operator, ">>>"),
            other => panic!("expected binary, got {other:?}"),
        }
    }

    #[test]
    fn test_instanceof_right_operand_is_a_type() {
        let expr = parse("a instanceof String");
        match expr {
            Expression::Binary(b) => {
                assert_eq!(b.operator, "instanceof");
                assert!(matches!(b.operandr, Operand::Type(_)));
            }
            other => panic!("expected binary, got {other:?}"),
        }
    }

    #[test]
    fn test_lambda_single_inferred_parameter() {
        let expr = parse("x -> x");
        match expr {
            Expression::Lambda(l) => assert!(matches!(l.parameters, LambdaParameters::Single(_))),
            other => panic!("expected lambda, got {other:?}"),
        }
    }

    #[test]
    fn test_lambda_mixed_inferred_and_typed_parameters_is_an_error() {
        let mut cursor = Cursor::new(tokenize("(a, int b) -> a").unwrap());
        // This should not parse as a lambda at all (rolls back) and instead
        // fails downstream as a malformed parenthesized expression, since a
        // partial parameter list never commits.
        assert!(parse_expression(&mut cursor).is_err() || matches!(
            parse_expression(&mut Cursor::new(tokenize("(a, int b) -> a").unwrap())),
            Err(_)
        ));
    }

    #[test]
    fn test_cast_then_unary_expression() {
        let expr = parse("(String) value");
        match expr {
            Expression::Cast(c) => assert!(matches!(*c.type_, Type::Reference(_))),
            other => panic!("expected cast, got {other:?}"),
        }
    }

    #[test]
    fn test_array_creator_with_sized_dimension() {
        let expr = parse("new int[5]");
        match expr {
            Expression::Primary(p) => match p.kind {
                PrimaryKind::ArrayCreator { dimensions, .. } => {
                    assert_eq!(dimensions.len(), 1);
                    assert!(dimensions[0].is_some());
                }
                other => panic!("expected array creator, got {other:?}"),
            },
            other => panic!("expected primary, got {other:?}"),
        }
    }

    #[test]
    fn test_method_invocation_chain_as_selectors() {
        let expr = parse("a.b().c");
        match expr {
            Expression::Primary(p) => assert_eq!(p.selectors.len(), 1),
            other => panic!("expected primary, got {other:?}"),
        }
    }
}
