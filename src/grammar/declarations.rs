//! Declaration grammar (component F): the compilation unit header, imports,
//! class/interface/enum/annotation declarations, and their member lists.

use std::collections::BTreeSet;

use crate::ast::declarations::{
    Annotation, AnnotationBodyDeclaration, AnnotationDeclaration, AnnotationMethod,
    ClassBodyDeclaration, ClassDeclaration, CompilationUnit, ConstructorDeclaration,
    ElementValue, ElementValuePair, EnumBody, EnumConstantDeclaration, EnumDeclaration,
    FieldDeclaration, FormalParameter, Import, InterfaceDeclaration, MethodDeclaration,
    PackageDeclaration, TypeDeclaration, VariableDeclarator,
};
use crate::ast::expressions::VariableInitializer;
use crate::ast::types::{ReferenceType, Type, TypeParameter};
use crate::cursor::Cursor;
use crate::error::SyntaxError;
use crate::grammar::expressions::{parse_array_initializer, parse_expression, parse_variable_initializer};
use crate::grammar::primitives::{expect, parse_identifier, parse_qualified_identifier, peek_match, try_consume, Expect};
use crate::grammar::statements::parse_block;
use crate::grammar::types::{parse_array_dimensions, parse_type, parse_type_parameters};
use crate::token::TokenKind;

pub fn parse_compilation_unit(cursor: &mut Cursor) -> Result<CompilationUnit, SyntaxError> {
    cursor.trace_enter("compilation_unit");
    let start = cursor.current_position();
    let package = try_parse_package_declaration(cursor)?;
    let mut imports = Vec::new();
    while peek_match(cursor, &[Expect::Value("import")]) {
        imports.push(parse_import(cursor)?);
    }
    let mut types = Vec::new();
    while !cursor.is_at_end() {
        if try_consume(cursor, &[Expect::Value(";")]) {
            continue;
        }
        types.push(parse_type_declaration(cursor)?);
    }
    let end = cursor.last().position;
    cursor.trace_exit("compilation_unit");
    Ok(CompilationUnit {
        package,
        imports,
        types,
        position: start.merge(&end),
    })
}

/// A package declaration can be preceded by annotations, which is
/// indistinguishable from an annotation on the first type declaration until
/// the `package` keyword itself is seen or not; parsed under a savepoint so
/// a mismatch (annotations belonging to a type, not a package) rolls back
/// cleanly.
fn try_parse_package_declaration(cursor: &mut Cursor) -> Result<Option<PackageDeclaration>, SyntaxError> {
    let mark = cursor.savepoint();
    let start = cursor.current_position();
    let mut annotations = Vec::new();
    while peek_match(cursor, &[Expect::Value("@")]) {
        annotations.push(parse_annotation(cursor)?);
    }
    if !try_consume(cursor, &[Expect::Value("package")]) {
        cursor.rollback(mark);
        return Ok(None);
    }
    let name = parse_qualified_identifier(cursor)?;
    expect(cursor, &[Expect::Value(";")])?;
    let end = cursor.last().position;
    cursor.commit(mark);
    Ok(Some(PackageDeclaration {
        annotations,
        name,
        position: start.merge(&end),
    }))
}

fn parse_import(cursor: &mut Cursor) -> Result<Import, SyntaxError> {
    let start = cursor.current_position();
    expect(cursor, &[Expect::Value("import")])?;
    let static_ = try_consume(cursor, &[Expect::Value("static")]);
    let mut parts = vec![parse_identifier(cursor)?];
    let mut wildcard = false;
    while try_consume(cursor, &[Expect::Value(".")]) {
        if try_consume(cursor, &[Expect::Value("*")]) {
            wildcard = true;
            break;
        }
        parts.push(parse_identifier(cursor)?);
    }
    expect(cursor, &[Expect::Value(";")])?;
    let end = cursor.last().position;
    Ok(Import {
        path: parts.join("."),
        static_,
        wildcard,
        position: start.merge(&end),
    })
}

pub fn parse_type_declaration(cursor: &mut Cursor) -> Result<TypeDeclaration, SyntaxError> {
    cursor.trace_enter("type_declaration");
    let modifiers = parse_modifiers(cursor)?;
    let annotations = parse_leading_annotations(cursor)?;
    let modifiers = merge_trailing_modifiers(cursor, modifiers)?;

    if try_consume(cursor, &[Expect::Value("class")]) {
        return Ok(TypeDeclaration::Class(parse_class_declaration(cursor, modifiers, annotations)?));
    }
    if try_consume(cursor, &[Expect::Value("interface")]) {
        return Ok(TypeDeclaration::Interface(parse_interface_declaration(cursor, modifiers, annotations)?));
    }
    if peek_match(cursor, &[Expect::Value("enum")]) {
        cursor.advance()?;
        return Ok(TypeDeclaration::Enum(parse_enum_declaration(cursor, modifiers, annotations)?));
    }
    if peek_match(cursor, &[Expect::Value("@"), Expect::Value("interface")]) {
        cursor.advance()?;
        cursor.advance()?;
        return Ok(TypeDeclaration::Annotation(parse_annotation_declaration(cursor, modifiers, annotations)?));
    }

    Err(SyntaxError::new(
        "expected a class, interface, enum, or annotation type declaration",
        Some(cursor.current_position()),
    ))
}

/// Modifiers and annotations can interleave (`@Foo public @Bar class X`), so
/// this loops collecting both, tracking modifiers as a `BTreeSet` (Java
/// forbids repeating a modifier, so a set loses nothing) and keeping the
/// annotations as an ordered list.
pub fn parse_modifiers(cursor: &mut Cursor) -> Result<BTreeSet<String>, SyntaxError> {
    let mut modifiers = BTreeSet::new();
    while matches!(cursor.peek(0).kind, TokenKind::Modifier) {
        modifiers.insert(cursor.advance()?.value);
    }
    Ok(modifiers)
}

fn parse_leading_annotations(cursor: &mut Cursor) -> Result<Vec<Annotation>, SyntaxError> {
    let mut annotations = Vec::new();
    while peek_match(cursor, &[Expect::Value("@")]) && !peek_match(cursor, &[Expect::Value("@"), Expect::Value("interface")]) {
        annotations.push(parse_annotation(cursor)?);
    }
    Ok(annotations)
}

/// Modifiers and annotations can alternate more than once
/// (`public @Foo static class X`); re-checks for trailing modifiers after
/// the first annotation run and merges them in.
fn merge_trailing_modifiers(
    cursor: &mut Cursor,
    mut modifiers: BTreeSet<String>,
) -> Result<BTreeSet<String>, SyntaxError> {
    loop {
        let more = parse_modifiers(cursor)?;
        if more.is_empty() {
            break;
        }
        modifiers.extend(more);
    }
    Ok(modifiers)
}

pub fn parse_annotation(cursor: &mut Cursor) -> Result<Annotation, SyntaxError> {
    let start = cursor.current_position();
    expect(cursor, &[Expect::Value("@")])?;
    let name = parse_qualified_identifier(cursor)?;
    let element_values = if try_consume(cursor, &[Expect::Value("(")]) {
        if try_consume(cursor, &[Expect::Value(")")]) {
            Vec::new()
        } else {
            let pairs = parse_element_value_pairs(cursor)?;
            expect(cursor, &[Expect::Value(")")])?;
            pairs
        }
    } else {
        Vec::new()
    };
    let end = cursor.last().position;
    Ok(Annotation {
        name,
        element_values,
        position: start.merge(&end),
    })
}

fn parse_element_value_pairs(cursor: &mut Cursor) -> Result<Vec<ElementValuePair>, SyntaxError> {
    // `@Foo(bar)` (single value, no name) vs. `@Foo(a = 1, b = 2)`.
    if matches!(cursor.peek(0).kind, TokenKind::Identifier) && cursor.peek(1).is(TokenKind::Operator, "=") {
        let mut pairs = vec![parse_element_value_pair(cursor)?];
        while try_consume(cursor, &[Expect::Value(",")]) {
            pairs.push(parse_element_value_pair(cursor)?);
        }
        return Ok(pairs);
    }
    let start = cursor.current_position();
    let value = parse_element_value(cursor)?;
    Ok(vec![ElementValuePair {
        name: None,
        value,
        position: start.merge(&cursor.last().position),
    }])
}

fn parse_element_value_pair(cursor: &mut Cursor) -> Result<ElementValuePair, SyntaxError> {
    let start = cursor.current_position();
    let name = parse_identifier(cursor)?;
    expect(cursor, &[Expect::Value("=")])?;
    let value = parse_element_value(cursor)?;
    let end = cursor.last().position;
    Ok(ElementValuePair {
        name: Some(name),
        value,
        position: start.merge(&end),
    })
}

fn parse_element_value(cursor: &mut Cursor) -> Result<ElementValue, SyntaxError> {
    if peek_match(cursor, &[Expect::Value("@")]) {
        return Ok(ElementValue::Annotation(Box::new(parse_annotation(cursor)?)));
    }
    if try_consume(cursor, &[Expect::Value("{")]) {
        let mut values = Vec::new();
        if !peek_match(cursor, &[Expect::Value("}")]) {
            values.push(parse_element_value(cursor)?);
            while try_consume(cursor, &[Expect::Value(",")]) {
                if peek_match(cursor, &[Expect::Value("}")]) {
                    break;
                }
                values.push(parse_element_value(cursor)?);
            }
        }
        expect(cursor, &[Expect::Value("}")])?;
        return Ok(ElementValue::Array(values));
    }
    Ok(ElementValue::Expression(Box::new(parse_expression(cursor)?)))
}

fn parse_class_declaration(
    cursor: &mut Cursor,
    modifiers: BTreeSet<String>,
    annotations: Vec<Annotation>,
) -> Result<ClassDeclaration, SyntaxError> {
    let start = cursor.current_position();
    let name = parse_identifier(cursor)?;
    let type_parameters = if peek_match(cursor, &[Expect::Value("<")]) {
        parse_type_parameters(cursor)?
    } else {
        Vec::new()
    };
    let extends = if try_consume(cursor, &[Expect::Value("extends")]) {
        Some(crate::grammar::types::parse_reference_type(cursor)?)
    } else {
        None
    };
    let implements = if try_consume(cursor, &[Expect::Value("implements")]) {
        parse_reference_type_list(cursor)?
    } else {
        Vec::new()
    };
    let body = parse_class_body(cursor)?;
    let end = cursor.last().position;
    Ok(ClassDeclaration {
        name,
        modifiers,
        annotations,
        documentation: None,
        type_parameters,
        extends,
        implements,
        body,
        position: start.merge(&end),
    })
}

fn parse_interface_declaration(
    cursor: &mut Cursor,
    modifiers: BTreeSet<String>,
    annotations: Vec<Annotation>,
) -> Result<InterfaceDeclaration, SyntaxError> {
    let start = cursor.current_position();
    let name = parse_identifier(cursor)?;
    let type_parameters = if peek_match(cursor, &[Expect::Value("<")]) {
        parse_type_parameters(cursor)?
    } else {
        Vec::new()
    };
    let extends = if try_consume(cursor, &[Expect::Value("extends")]) {
        parse_reference_type_list(cursor)?
    } else {
        Vec::new()
    };
    let body = parse_class_body(cursor)?;
    let end = cursor.last().position;
    Ok(InterfaceDeclaration {
        name,
        modifiers,
        annotations,
        documentation: None,
        type_parameters,
        extends,
        body,
        position: start.merge(&end),
    })
}

fn parse_reference_type_list(cursor: &mut Cursor) -> Result<Vec<ReferenceType>, SyntaxError> {
    let mut list = vec![crate::grammar::types::parse_reference_type(cursor)?];
    while try_consume(cursor, &[Expect::Value(",")]) {
        list.push(crate::grammar::types::parse_reference_type(cursor)?);
    }
    Ok(list)
}

pub fn parse_class_body(cursor: &mut Cursor) -> Result<Vec<ClassBodyDeclaration>, SyntaxError> {
    expect(cursor, &[Expect::Value("{")])?;
    let mut declarations = Vec::new();
    while !peek_match(cursor, &[Expect::Value("}")]) {
        if try_consume(cursor, &[Expect::Value(";")]) {
            continue;
        }
        declarations.push(parse_class_body_declaration(cursor)?);
    }
    expect(cursor, &[Expect::Value("}")])?;
    Ok(declarations)
}

fn parse_class_body_declaration(cursor: &mut Cursor) -> Result<ClassBodyDeclaration, SyntaxError> {
    if peek_match(cursor, &[Expect::Value("static"), Expect::Value("{")]) {
        cursor.advance()?;
        return Ok(ClassBodyDeclaration::StaticInitializer(parse_block(cursor)?));
    }
    if peek_match(cursor, &[Expect::Value("{")]) {
        return Ok(ClassBodyDeclaration::InstanceInitializer(parse_block(cursor)?));
    }

    let modifiers = parse_modifiers(cursor)?;
    let annotations = parse_leading_annotations(cursor)?;
    let modifiers = merge_trailing_modifiers(cursor, modifiers)?;

    if peek_match(cursor, &[Expect::Value("class")])
        || peek_match(cursor, &[Expect::Value("interface")])
        || peek_match(cursor, &[Expect::Value("enum")])
        || peek_match(cursor, &[Expect::Value("@"), Expect::Value("interface")])
    {
        return Ok(ClassBodyDeclaration::Type(parse_type_declaration_body(cursor, modifiers, annotations)?));
    }

    let type_parameters = if peek_match(cursor, &[Expect::Value("<")]) {
        parse_type_parameters(cursor)?
    } else {
        Vec::new()
    };

    // A constructor looks like `Identifier (`, with no return type.
    if matches!(cursor.peek(0).kind, TokenKind::Identifier) && cursor.peek(1).is(TokenKind::Operator, "(") {
        return Ok(ClassBodyDeclaration::Constructor(parse_constructor_declaration(
            cursor,
            modifiers,
            annotations,
            type_parameters,
        )?));
    }

    let return_type = parse_type(cursor)?;
    let name = parse_identifier(cursor)?;
    if peek_match(cursor, &[Expect::Value("(")]) {
        return Ok(ClassBodyDeclaration::Method(parse_method_declaration_rest(
            cursor,
            modifiers,
            annotations,
            type_parameters,
            return_type,
            name,
        )?));
    }

    Ok(ClassBodyDeclaration::Field(parse_field_declaration_rest(
        cursor, modifiers, annotations, return_type, name,
    )?))
}

fn parse_type_declaration_body(
    cursor: &mut Cursor,
    modifiers: BTreeSet<String>,
    annotations: Vec<Annotation>,
) -> Result<TypeDeclaration, SyntaxError> {
    if try_consume(cursor, &[Expect::Value("class")]) {
        return Ok(TypeDeclaration::Class(parse_class_declaration(cursor, modifiers, annotations)?));
    }
    if try_consume(cursor, &[Expect::Value("interface")]) {
        return Ok(TypeDeclaration::Interface(parse_interface_declaration(cursor, modifiers, annotations)?));
    }
    if try_consume(cursor, &[Expect::Value("enum")]) {
        return Ok(TypeDeclaration::Enum(parse_enum_declaration(cursor, modifiers, annotations)?));
    }
    expect(cursor, &[Expect::Value("@"), Expect::Value("interface")])?;
    Ok(TypeDeclaration::Annotation(parse_annotation_declaration(cursor, modifiers, annotations)?))
}

fn parse_constructor_declaration(
    cursor: &mut Cursor,
    modifiers: BTreeSet<String>,
    annotations: Vec<Annotation>,
    type_parameters: Vec<TypeParameter>,
) -> Result<ConstructorDeclaration, SyntaxError> {
    let start = cursor.current_position();
    let name = parse_identifier(cursor)?;
    let parameters = parse_formal_parameter_list(cursor)?;
    let throws = if try_consume(cursor, &[Expect::Value("throws")]) {
        parse_reference_type_list(cursor)?
    } else {
        Vec::new()
    };
    let body = parse_block(cursor)?;
    let end = cursor.last().position;
    Ok(ConstructorDeclaration {
        modifiers,
        annotations,
        type_parameters,
        name,
        parameters,
        throws,
        body,
        position: start.merge(&end),
    })
}

fn parse_method_declaration_rest(
    cursor: &mut Cursor,
    modifiers: BTreeSet<String>,
    annotations: Vec<Annotation>,
    type_parameters: Vec<TypeParameter>,
    mut return_type: Type,
    name: String,
) -> Result<MethodDeclaration, SyntaxError> {
    let start = return_type.position();
    let parameters = parse_formal_parameter_list(cursor)?;
    let trailing_dimensions = parse_array_dimensions(cursor)?;
    return_type.extend_dimensions(trailing_dimensions);
    let throws = if try_consume(cursor, &[Expect::Value("throws")]) {
        parse_reference_type_list(cursor)?
    } else {
        Vec::new()
    };
    let body = if peek_match(cursor, &[Expect::Value("{")]) {
        Some(parse_block(cursor)?)
    } else {
        expect(cursor, &[Expect::Value(";")])?;
        None
    };
    let end = cursor.last().position;
    Ok(MethodDeclaration {
        modifiers,
        annotations,
        type_parameters,
        return_type,
        name,
        parameters,
        throws,
        body,
        position: start.merge(&end),
    })
}

fn parse_field_declaration_rest(
    cursor: &mut Cursor,
    modifiers: BTreeSet<String>,
    annotations: Vec<Annotation>,
    type_: Type,
    first_name: String,
) -> Result<FieldDeclaration, SyntaxError> {
    let start = type_.position();
    let mut declarators = vec![parse_variable_declarator_rest(cursor, first_name)?];
    while try_consume(cursor, &[Expect::Value(",")]) {
        declarators.push(parse_variable_declarator(cursor)?);
    }
    expect(cursor, &[Expect::Value(";")])?;
    let end = cursor.last().position;
    Ok(FieldDeclaration {
        modifiers,
        annotations,
        type_,
        declarators,
        position: start.merge(&end),
    })
}

pub fn parse_variable_declarator(cursor: &mut Cursor) -> Result<VariableDeclarator, SyntaxError> {
    let name = parse_identifier(cursor)?;
    parse_variable_declarator_rest(cursor, name)
}

fn parse_variable_declarator_rest(
    cursor: &mut Cursor,
    name: String,
) -> Result<VariableDeclarator, SyntaxError> {
    let start = cursor.last().position;
    let dimensions = parse_array_dimensions(cursor)?;
    let initializer = if try_consume(cursor, &[Expect::Value("=")]) {
        Some(parse_variable_initializer_owned(cursor)?)
    } else {
        None
    };
    let end = cursor.last().position;
    Ok(VariableDeclarator {
        name,
        dimensions,
        initializer,
        position: start.merge(&end),
    })
}

fn parse_variable_initializer_owned(cursor: &mut Cursor) -> Result<VariableInitializer, SyntaxError> {
    parse_variable_initializer(cursor)
}

pub fn parse_formal_parameter_list(cursor: &mut Cursor) -> Result<Vec<FormalParameter>, SyntaxError> {
    expect(cursor, &[Expect::Value("(")])?;
    if try_consume(cursor, &[Expect::Value(")")]) {
        return Ok(Vec::new());
    }
    let mut parameters = vec![parse_formal_parameter(cursor)?];
    while try_consume(cursor, &[Expect::Value(",")]) {
        parameters.push(parse_formal_parameter(cursor)?);
    }
    expect(cursor, &[Expect::Value(")")])?;
    Ok(parameters)
}

pub fn parse_formal_parameter(cursor: &mut Cursor) -> Result<FormalParameter, SyntaxError> {
    let start = cursor.current_position();
    let modifiers = parse_modifiers(cursor)?;
    let annotations = parse_leading_annotations(cursor)?;
    let modifiers = merge_trailing_modifiers(cursor, modifiers)?;
    let mut type_ = parse_type(cursor)?;
    let varargs = try_consume(cursor, &[Expect::Value("...")]);
    let name = parse_identifier(cursor)?;
    let dimensions = parse_array_dimensions(cursor)?;
    type_.extend_dimensions(dimensions.clone());
    let end = cursor.last().position;
    Ok(FormalParameter {
        modifiers,
        annotations,
        type_,
        varargs,
        name,
        dimensions,
        position: start.merge(&end),
    })
}

fn parse_enum_declaration(
    cursor: &mut Cursor,
    modifiers: BTreeSet<String>,
    annotations: Vec<Annotation>,
) -> Result<EnumDeclaration, SyntaxError> {
    let start = cursor.current_position();
    let name = parse_identifier(cursor)?;
    let implements = if try_consume(cursor, &[Expect::Value("implements")]) {
        parse_reference_type_list(cursor)?
    } else {
        Vec::new()
    };
    let body = parse_enum_body(cursor)?;
    let end = cursor.last().position;
    Ok(EnumDeclaration {
        name,
        modifiers,
        annotations,
        documentation: None,
        implements,
        body,
        position: start.merge(&end),
    })
}

fn parse_enum_body(cursor: &mut Cursor) -> Result<EnumBody, SyntaxError> {
    let start = cursor.current_position();
    expect(cursor, &[Expect::Value("{")])?;
    let mut constants = Vec::new();
    if !peek_match(cursor, &[Expect::Value(";")]) && !peek_match(cursor, &[Expect::Value("}")]) {
        constants.push(parse_enum_constant(cursor)?);
        while try_consume(cursor, &[Expect::Value(",")]) {
            if peek_match(cursor, &[Expect::Value(";")]) || peek_match(cursor, &[Expect::Value("}")]) {
                break;
            }
            constants.push(parse_enum_constant(cursor)?);
        }
    }
    let mut declarations = Vec::new();
    if try_consume(cursor, &[Expect::Value(";")]) {
        while !peek_match(cursor, &[Expect::Value("}")]) {
            if try_consume(cursor, &[Expect::Value(";")]) {
                continue;
            }
            declarations.push(parse_class_body_declaration(cursor)?);
        }
    }
    expect(cursor, &[Expect::Value("}")])?;
    let end = cursor.last().position;
    Ok(EnumBody {
        constants,
        declarations,
        position: start.merge(&end),
    })
}

fn parse_enum_constant(cursor: &mut Cursor) -> Result<EnumConstantDeclaration, SyntaxError> {
    let start = cursor.current_position();
    let annotations = parse_leading_annotations(cursor)?;
    let name = parse_identifier(cursor)?;
    let arguments = if peek_match(cursor, &[Expect::Value("(")]) {
        Some(crate::grammar::expressions::parse_arguments(cursor)?)
    } else {
        None
    };
    let body = if peek_match(cursor, &[Expect::Value("{")]) {
        Some(parse_class_body(cursor)?)
    } else {
        None
    };
    let end = cursor.last().position;
    Ok(EnumConstantDeclaration {
        annotations,
        name,
        arguments,
        body,
        position: start.merge(&end),
    })
}

fn parse_annotation_declaration(
    cursor: &mut Cursor,
    modifiers: BTreeSet<String>,
    annotations: Vec<Annotation>,
) -> Result<AnnotationDeclaration, SyntaxError> {
    let start = cursor.current_position();
    let name = parse_identifier(cursor)?;
    expect(cursor, &[Expect::Value("{")])?;
    let mut body = Vec::new();
    while !peek_match(cursor, &[Expect::Value("}")]) {
        if try_consume(cursor, &[Expect::Value(";")]) {
            continue;
        }
        body.push(parse_annotation_body_declaration(cursor)?);
    }
    expect(cursor, &[Expect::Value("}")])?;
    let end = cursor.last().position;
    Ok(AnnotationDeclaration {
        name,
        modifiers,
        annotations,
        documentation: None,
        body,
        position: start.merge(&end),
    })
}

fn parse_annotation_body_declaration(cursor: &mut Cursor) -> Result<AnnotationBodyDeclaration, SyntaxError> {
    let modifiers = parse_modifiers(cursor)?;
    let annotations = parse_leading_annotations(cursor)?;
    let modifiers = merge_trailing_modifiers(cursor, modifiers)?;

    if try_consume(cursor, &[Expect::Value("class")]) {
        return Ok(AnnotationBodyDeclaration::Class(parse_class_declaration(cursor, modifiers, annotations)?));
    }
    if try_consume(cursor, &[Expect::Value("interface")]) {
        return Ok(AnnotationBodyDeclaration::Interface(parse_interface_declaration(cursor, modifiers, annotations)?));
    }
    if try_consume(cursor, &[Expect::Value("enum")]) {
        return Ok(AnnotationBodyDeclaration::Enum(parse_enum_declaration(cursor, modifiers, annotations)?));
    }
    if peek_match(cursor, &[Expect::Value("@"), Expect::Value("interface")]) {
        cursor.advance()?;
        cursor.advance()?;
        return Ok(AnnotationBodyDeclaration::Annotation(parse_annotation_declaration(cursor, modifiers, annotations)?));
    }

    let type_ = parse_type(cursor)?;
    let name = parse_identifier(cursor)?;
    if try_consume(cursor, &[Expect::Value("(")]) {
        expect(cursor, &[Expect::Value(")")])?;
        let start = type_.position();
        let default = if try_consume(cursor, &[Expect::Value("default")]) {
            Some(parse_element_value(cursor)?)
        } else {
            None
        };
        expect(cursor, &[Expect::Value(";")])?;
        let end = cursor.last().position;
        return Ok(AnnotationBodyDeclaration::Method(AnnotationMethod {
            modifiers,
            annotations,
            name,
            return_type: type_,
            default,
            position: start.merge(&end),
        }));
    }

    Ok(AnnotationBodyDeclaration::Constant(parse_field_declaration_rest(
        cursor, modifiers, annotations, type_, name,
    )?))
}
