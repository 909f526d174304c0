//! Statement grammar (component G): blocks, the full statement dispatch,
//! and the speculative forms (enhanced-vs-classic `for`, local variable
//! declaration vs. expression statement, labeled statements).

use std::collections::BTreeSet;

use crate::ast::declarations::{Annotation, VariableDeclarator};
use crate::ast::statements::{
    AssertStatement, Block, BreakStatement, CatchClause, CatchClauseParameter, ContinueStatement,
    DoStatement, EmptyStatement, EnhancedForControl, ForControl, ForControlKind, ForInit,
    ForStatement, IfStatement, LocalVariableDeclaration, ReturnStatement, Statement,
    StatementExpressionStatement, SwitchLabel, SwitchStatement, SwitchStatementCase,
    SynchronizedStatement, ThrowStatement, TryResource, TryStatement, WhileStatement,
};
use crate::cursor::Cursor;
use crate::error::SyntaxError;
use crate::grammar::declarations::{
    parse_annotation, parse_modifiers, parse_type_declaration, parse_variable_declarator,
};
use crate::grammar::expressions::{parse_expression, parse_non_assignment_expression};
use crate::grammar::primitives::{expect, parse_identifier, peek_match, try_consume, Expect};
use crate::grammar::types::{parse_reference_type, parse_type};
use crate::token::TokenKind;

pub fn parse_block(cursor: &mut Cursor) -> Result<Block, SyntaxError> {
    let start = cursor.current_position();
    expect(cursor, &[Expect::Value("{")])?;
    let mut statements = Vec::new();
    while !peek_match(cursor, &[Expect::Value("}")]) {
        statements.push(parse_block_statement(cursor)?);
    }
    expect(cursor, &[Expect::Value("}")])?;
    let end = cursor.last().position;
    Ok(Block {
        statements,
        label: None,
        position: start.merge(&end),
    })
}

/// Disambiguates a local variable declaration, a local class/interface
/// declaration, and an ordinary statement, all of which can start with the
/// same modifier/annotation run.
fn parse_block_statement(cursor: &mut Cursor) -> Result<Statement, SyntaxError> {
    if peek_match(cursor, &[Expect::Value("class")])
        || peek_starts_local_type_with_modifiers(cursor)
    {
        let start = cursor.current_position();
        let decl = parse_type_declaration(cursor)?;
        let end = cursor.last().position;
        let _ = start.merge(&end);
        return Ok(Statement::LocalType(decl));
    }

    if let Some(decl) = try_parse_local_variable_declaration(cursor)? {
        return Ok(Statement::LocalVariableDeclaration(decl));
    }

    parse_statement(cursor)
}

fn peek_starts_local_type_with_modifiers(cursor: &Cursor) -> bool {
    let mut i = 0;
    loop {
        match cursor.peek(i).kind {
            TokenKind::Modifier => i += 1,
            TokenKind::AnnotationMarker => {
                // an annotation's own argument list may contain balanced
                // parens; skip past the name and any `(...)` before it.
                i += 2; // '@' Identifier
                if cursor.peek(i).is(TokenKind::Operator, "(") {
                    let mut depth = 0;
                    loop {
                        let t = cursor.peek(i);
                        if t.is(TokenKind::Operator, "(") {
                            depth += 1;
                        } else if t.is(TokenKind::Operator, ")") {
                            depth -= 1;
                            i += 1;
                            if depth == 0 {
                                break;
                            }
                            continue;
                        } else if matches!(t.kind, TokenKind::EndOfInput) {
                            break;
                        }
                        i += 1;
                    }
                }
            }
            _ => break,
        }
    }
    i > 0 && cursor.peek(i).is(TokenKind::Keyword, "class")
}

fn try_parse_local_variable_declaration(
    cursor: &mut Cursor,
) -> Result<Option<LocalVariableDeclaration>, SyntaxError> {
    let mark = cursor.savepoint();
    let result: Result<LocalVariableDeclaration, SyntaxError> = (|| {
        let start = cursor.current_position();
        let modifiers = parse_modifiers(cursor)?;
        let annotations = parse_local_annotations(cursor, &modifiers)?;
        let type_ = parse_type(cursor)?;
        let mut declarators = vec![parse_variable_declarator(cursor)?];
        while try_consume(cursor, &[Expect::Value(",")]) {
            declarators.push(parse_variable_declarator(cursor)?);
        }
        expect(cursor, &[Expect::Value(";")])?;
        let end = cursor.last().position;
        Ok(LocalVariableDeclaration {
            modifiers,
            annotations,
            type_,
            declarators,
            position: start.merge(&end),
        })
    })();
    match result {
        Ok(decl) => {
            cursor.commit(mark);
            Ok(Some(decl))
        }
        Err(_) => {
            cursor.rollback(mark);
            Ok(None)
        }
    }
}

/// `parse_modifiers` only returns the plain `Modifier` tokens; annotations
/// interleaved with them are parsed here since local declarations share the
/// same leading-annotation grammar as class members.
fn parse_local_annotations(
    cursor: &mut Cursor,
    _modifiers: &BTreeSet<String>,
) -> Result<Vec<Annotation>, SyntaxError> {
    let mut annotations = Vec::new();
    while peek_match(cursor, &[Expect::Value("@")]) {
        annotations.push(parse_annotation(cursor)?);
    }
    Ok(annotations)
}

pub fn parse_statement(cursor: &mut Cursor) -> Result<Statement, SyntaxError> {
    cursor.trace_enter("statement");
    if let Some(label) = try_parse_label(cursor)? {
        let mut statement = parse_statement(cursor)?;
        attach_label(&mut statement, label);
        return Ok(statement);
    }

    let start = cursor.current_position();

    if peek_match(cursor, &[Expect::Value("{")]) {
        return Ok(Statement::Block(parse_block(cursor)?));
    }
    if try_consume(cursor, &[Expect::Value(";")]) {
        return Ok(Statement::Empty(EmptyStatement { label: None, position: start }));
    }
    if try_consume(cursor, &[Expect::Value("if")]) {
        return parse_if(cursor, start);
    }
    if try_consume(cursor, &[Expect::Value("assert")]) {
        return parse_assert(cursor, start);
    }
    if try_consume(cursor, &[Expect::Value("switch")]) {
        return parse_switch(cursor, start);
    }
    if try_consume(cursor, &[Expect::Value("while")]) {
        return parse_while(cursor, start);
    }
    if try_consume(cursor, &[Expect::Value("do")]) {
        return parse_do(cursor, start);
    }
    if try_consume(cursor, &[Expect::Value("for")]) {
        return parse_for(cursor, start);
    }
    if try_consume(cursor, &[Expect::Value("break")]) {
        let goto = try_parse_optional_identifier(cursor)?;
        expect(cursor, &[Expect::Value(";")])?;
        return Ok(Statement::Break(BreakStatement { label: None, goto, position: start.merge(&cursor.last().position) }));
    }
    if try_consume(cursor, &[Expect::Value("continue")]) {
        let goto = try_parse_optional_identifier(cursor)?;
        expect(cursor, &[Expect::Value(";")])?;
        return Ok(Statement::Continue(ContinueStatement { label: None, goto, position: start.merge(&cursor.last().position) }));
    }
    if try_consume(cursor, &[Expect::Value("return")]) {
        let expression = if peek_match(cursor, &[Expect::Value(";")]) {
            None
        } else {
            Some(parse_expression(cursor)?)
        };
        expect(cursor, &[Expect::Value(";")])?;
        return Ok(Statement::Return(ReturnStatement { label: None, expression, position: start.merge(&cursor.last().position) }));
    }
    if try_consume(cursor, &[Expect::Value("throw")]) {
        let expression = parse_expression(cursor)?;
        expect(cursor, &[Expect::Value(";")])?;
        return Ok(Statement::Throw(ThrowStatement { label: None, expression, position: start.merge(&cursor.last().position) }));
    }
    if try_consume(cursor, &[Expect::Value("synchronized")]) {
        expect(cursor, &[Expect::Value("(")])?;
        let lock = parse_expression(cursor)?;
        expect(cursor, &[Expect::Value(")")])?;
        let block = parse_block(cursor)?;
        return Ok(Statement::Synchronized(SynchronizedStatement { label: None, lock, block, position: start.merge(&cursor.last().position) }));
    }
    if try_consume(cursor, &[Expect::Value("try")]) {
        return parse_try(cursor, start);
    }

    let expression = parse_expression(cursor)?;
    expect(cursor, &[Expect::Value(";")])?;
    Ok(Statement::Expression(StatementExpressionStatement {
        label: None,
        expression,
        position: start.merge(&cursor.last().position),
    }))
}

fn try_parse_label(cursor: &mut Cursor) -> Result<Option<String>, SyntaxError> {
    if matches!(cursor.peek(0).kind, TokenKind::Identifier) && cursor.peek(1).is(TokenKind::Operator, ":") {
        let label = parse_identifier(cursor)?;
        cursor.advance()?;
        return Ok(Some(label));
    }
    Ok(None)
}

fn attach_label(statement: &mut Statement, label: String) {
    let slot = match statement {
        Statement::Block(s) => &mut s.label,
        Statement::If(s) => &mut s.label,
        Statement::While(s) => &mut s.label,
        Statement::Do(s) => &mut s.label,
        Statement::For(s) => &mut s.label,
        Statement::Assert(s) => &mut s.label,
        Statement::Break(s) => &mut s.label,
        Statement::Continue(s) => &mut s.label,
        Statement::Return(s) => &mut s.label,
        Statement::Throw(s) => &mut s.label,
        Statement::Synchronized(s) => &mut s.label,
        Statement::Try(s) => &mut s.label,
        Statement::Switch(s) => &mut s.label,
        Statement::Expression(s) => &mut s.label,
        Statement::Empty(s) => &mut s.label,
        Statement::LocalVariableDeclaration(_) | Statement::LocalType(_) => return,
    };
    *slot = Some(label);
}

fn try_parse_optional_identifier(cursor: &mut Cursor) -> Result<Option<String>, SyntaxError> {
    if matches!(cursor.peek(0).kind, TokenKind::Identifier) {
        Ok(Some(parse_identifier(cursor)?))
    } else {
        Ok(None)
    }
}

fn parse_if(cursor: &mut Cursor, start: crate::token::Position) -> Result<Statement, SyntaxError> {
    expect(cursor, &[Expect::Value("(")])?;
    let condition = parse_expression(cursor)?;
    expect(cursor, &[Expect::Value(")")])?;
    let then_statement = Box::new(parse_statement(cursor)?);
    let else_statement = if try_consume(cursor, &[Expect::Value("else")]) {
        Some(Box::new(parse_statement(cursor)?))
    } else {
        None
    };
    let end = cursor.last().position;
    Ok(Statement::If(IfStatement {
        label: None,
        condition,
        then_statement,
        else_statement,
        position: start.merge(&end),
    }))
}

fn parse_assert(cursor: &mut Cursor, start: crate::token::Position) -> Result<Statement, SyntaxError> {
    let condition = parse_expression(cursor)?;
    let value = if try_consume(cursor, &[Expect::Value(":")]) {
        Some(parse_expression(cursor)?)
    } else {
        None
    };
    expect(cursor, &[Expect::Value(";")])?;
    Ok(Statement::Assert(AssertStatement {
        label: None,
        condition,
        value,
        position: start.merge(&cursor.last().position),
    }))
}

fn parse_while(cursor: &mut Cursor, start: crate::token::Position) -> Result<Statement, SyntaxError> {
    expect(cursor, &[Expect::Value("(")])?;
    let condition = parse_expression(cursor)?;
    expect(cursor, &[Expect::Value(")")])?;
    let body = Box::new(parse_statement(cursor)?);
    Ok(Statement::While(WhileStatement {
        label: None,
        condition,
        body,
        position: start.merge(&cursor.last().position),
    }))
}

fn parse_do(cursor: &mut Cursor, start: crate::token::Position) -> Result<Statement, SyntaxError> {
    let body = Box::new(parse_statement(cursor)?);
    expect(cursor, &[Expect::Value("while")])?;
    expect(cursor, &[Expect::Value("(")])?;
    let condition = parse_expression(cursor)?;
    expect(cursor, &[Expect::Value(")")])?;
    expect(cursor, &[Expect::Value(";")])?;
    Ok(Statement::Do(DoStatement {
        label: None,
        condition,
        body,
        position: start.merge(&cursor.last().position),
    }))
}

fn parse_for(cursor: &mut Cursor, start: crate::token::Position) -> Result<Statement, SyntaxError> {
    expect(cursor, &[Expect::Value("(")])?;
    let control = parse_for_control(cursor)?;
    expect(cursor, &[Expect::Value(")")])?;
    let body = Box::new(parse_statement(cursor)?);
    Ok(Statement::For(ForStatement {
        label: None,
        control,
        body,
        position: start.merge(&cursor.last().position),
    }))
}

/// Tries the enhanced-for form (`Type name : expr`) first under a
/// savepoint; on any mismatch rolls back and falls through to the classic
/// `init; condition; update` form.
fn parse_for_control(cursor: &mut Cursor) -> Result<ForControlKind, SyntaxError> {
    let mark = cursor.savepoint();
    let enhanced: Result<EnhancedForControl, SyntaxError> = (|| {
        let start = cursor.current_position();
        let modifiers = parse_modifiers(cursor)?;
        let annotations = parse_local_annotations(cursor, &modifiers)?;
        let type_ = parse_type(cursor)?;
        let name = parse_identifier(cursor)?;
        expect(cursor, &[Expect::Value(":")])?;
        let iterable = parse_expression(cursor)?;
        let end = cursor.last().position;
        Ok(EnhancedForControl {
            var: LocalVariableDeclaration {
                modifiers,
                annotations,
                type_,
                declarators: vec![VariableDeclarator {
                    name,
                    dimensions: Vec::new(),
                    initializer: None,
                    position: start,
                }],
                position: start.merge(&end),
            },
            iterable,
            position: start.merge(&end),
        })
    })();
    if let Ok(control) = enhanced {
        cursor.commit(mark);
        return Ok(ForControlKind::Enhanced(control));
    }
    cursor.rollback(mark);
    parse_classic_for_control(cursor)
}

fn parse_classic_for_control(cursor: &mut Cursor) -> Result<ForControlKind, SyntaxError> {
    let start = cursor.current_position();
    let init = if peek_match(cursor, &[Expect::Value(";")]) {
        None
    } else {
        Some(parse_for_init(cursor)?)
    };
    expect(cursor, &[Expect::Value(";")])?;
    let condition = if peek_match(cursor, &[Expect::Value(";")]) {
        None
    } else {
        Some(parse_expression(cursor)?)
    };
    expect(cursor, &[Expect::Value(";")])?;
    let mut update = Vec::new();
    if !peek_match(cursor, &[Expect::Value(")")]) {
        update.push(parse_expression(cursor)?);
        while try_consume(cursor, &[Expect::Value(",")]) {
            update.push(parse_expression(cursor)?);
        }
    }
    let end = cursor.last().position;
    Ok(ForControlKind::Basic(ForControl {
        init,
        condition,
        update,
        position: start.merge(&end),
    }))
}

fn parse_for_init(cursor: &mut Cursor) -> Result<ForInit, SyntaxError> {
    if let Some(decl) = try_parse_local_variable_declaration_no_semicolon(cursor)? {
        return Ok(ForInit::Declaration(decl));
    }
    let mut expressions = vec![parse_expression(cursor)?];
    while try_consume(cursor, &[Expect::Value(",")]) {
        expressions.push(parse_expression(cursor)?);
    }
    Ok(ForInit::Expressions(expressions))
}

fn try_parse_local_variable_declaration_no_semicolon(
    cursor: &mut Cursor,
) -> Result<Option<LocalVariableDeclaration>, SyntaxError> {
    let mark = cursor.savepoint();
    let result: Result<LocalVariableDeclaration, SyntaxError> = (|| {
        let start = cursor.current_position();
        let modifiers = parse_modifiers(cursor)?;
        let annotations = parse_local_annotations(cursor, &modifiers)?;
        let type_ = parse_type(cursor)?;
        let mut declarators = vec![parse_variable_declarator(cursor)?];
        while try_consume(cursor, &[Expect::Value(",")]) {
            declarators.push(parse_variable_declarator(cursor)?);
        }
        let end = cursor.last().position;
        Ok(LocalVariableDeclaration {
            modifiers,
            annotations,
            type_,
            declarators,
            position: start.merge(&end),
        })
    })();
    match result {
        Ok(decl) => {
            cursor.commit(mark);
            Ok(Some(decl))
        }
        Err(_) => {
            cursor.rollback(mark);
            Ok(None)
        }
    }
}

fn parse_switch(cursor: &mut Cursor, start: crate::token::Position) -> Result<Statement, SyntaxError> {
    expect(cursor, &[Expect::Value("(")])?;
    let expression = parse_expression(cursor)?;
    expect(cursor, &[Expect::Value(")")])?;
    expect(cursor, &[Expect::Value("{")])?;
    let mut cases = Vec::new();
    while !peek_match(cursor, &[Expect::Value("}")]) {
        cases.push(parse_switch_case(cursor)?);
    }
    expect(cursor, &[Expect::Value("}")])?;
    Ok(Statement::Switch(SwitchStatement {
        label: None,
        expression,
        cases,
        position: start.merge(&cursor.last().position),
    }))
}

fn parse_switch_case(cursor: &mut Cursor) -> Result<SwitchStatementCase, SyntaxError> {
    let start = cursor.current_position();
    let mut labels = vec![parse_switch_label(cursor)?];
    while peek_match(cursor, &[Expect::Value("case")]) || peek_match(cursor, &[Expect::Value("default")]) {
        labels.push(parse_switch_label(cursor)?);
    }
    let mut statements = Vec::new();
    while !peek_match(cursor, &[Expect::Value("case")])
        && !peek_match(cursor, &[Expect::Value("default")])
        && !peek_match(cursor, &[Expect::Value("}")])
    {
        statements.push(parse_block_statement(cursor)?);
    }
    let end = cursor.last().position;
    Ok(SwitchStatementCase {
        labels,
        statements,
        position: start.merge(&end),
    })
}

fn parse_switch_label(cursor: &mut Cursor) -> Result<SwitchLabel, SyntaxError> {
    if try_consume(cursor, &[Expect::Value("default")]) {
        expect(cursor, &[Expect::Value(":")])?;
        return Ok(SwitchLabel::Default);
    }
    expect(cursor, &[Expect::Value("case")])?;
    let expression = parse_non_assignment_expression(cursor)?;
    expect(cursor, &[Expect::Value(":")])?;
    Ok(SwitchLabel::Case(expression))
}

fn parse_try(cursor: &mut Cursor, start: crate::token::Position) -> Result<Statement, SyntaxError> {
    let resources = if try_consume(cursor, &[Expect::Value("(")]) {
        let mut resources = vec![parse_resource(cursor)?];
        while try_consume(cursor, &[Expect::Value(";")]) {
            if peek_match(cursor, &[Expect::Value(")")]) {
                break;
            }
            resources.push(parse_resource(cursor)?);
        }
        expect(cursor, &[Expect::Value(")")])?;
        Some(resources)
    } else {
        None
    };
    let block = parse_block(cursor)?;
    let catches = if peek_match(cursor, &[Expect::Value("catch")]) {
        let mut catches = Vec::new();
        while try_consume(cursor, &[Expect::Value("catch")]) {
            catches.push(parse_catch_clause(cursor)?);
        }
        Some(catches)
    } else {
        None
    };
    let finally_block = if try_consume(cursor, &[Expect::Value("finally")]) {
        Some(parse_block(cursor)?)
    } else {
        None
    };

    if resources.is_none() && catches.is_none() && finally_block.is_none() {
        return Err(SyntaxError::new(
            "a try statement needs at least one of resources, a catch clause, or a finally block",
            Some(start),
        ));
    }

    Ok(Statement::Try(TryStatement {
        label: None,
        resources,
        block,
        catches,
        finally_block,
        position: start.merge(&cursor.last().position),
    }))
}

fn parse_resource(cursor: &mut Cursor) -> Result<TryResource, SyntaxError> {
    let start = cursor.current_position();
    let modifiers = parse_modifiers(cursor)?;
    let annotations = parse_local_annotations(cursor, &modifiers)?;
    let type_ = parse_reference_type(cursor)?;
    let name = parse_identifier(cursor)?;
    expect(cursor, &[Expect::Value("=")])?;
    let value = parse_expression(cursor)?;
    let end = cursor.last().position;
    Ok(TryResource {
        modifiers,
        annotations,
        type_,
        name,
        value,
        position: start.merge(&end),
    })
}

fn parse_catch_clause(cursor: &mut Cursor) -> Result<CatchClause, SyntaxError> {
    let start = cursor.current_position();
    expect(cursor, &[Expect::Value("(")])?;
    let modifiers = parse_modifiers(cursor)?;
    let annotations = parse_local_annotations(cursor, &modifiers)?;
    let mut types = vec![parse_reference_type(cursor)?];
    while try_consume(cursor, &[Expect::Value("|")]) {
        types.push(parse_reference_type(cursor)?);
    }
    let name = parse_identifier(cursor)?;
    expect(cursor, &[Expect::Value(")")])?;
    let parameter_end = cursor.last().position;
    let block = parse_block(cursor)?;
    let end = cursor.last().position;
    Ok(CatchClause {
        parameter: CatchClauseParameter {
            modifiers,
            annotations,
            types,
            name,
            position: start.merge(&parameter_end),
        },
        block,
        position: start.merge(&end),
    })
}
