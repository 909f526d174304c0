//! End-to-end scenarios from the specification's testable-properties section:
//! full-pipeline parses of small but representative Java 8 snippets, plus the
//! negative cases that must fail.

use javelin_syntax::ast::declarations::TypeDeclaration;
use javelin_syntax::ast::expressions::{Expression, PrimaryKind};
use javelin_syntax::ast::statements::Statement;
use javelin_syntax::ast::types::Type;
use javelin_syntax::parse;

fn parse_method_body(body: &str) -> Statement {
    let source = format!("class X {{ void m() {{ {body} }} }}");
    let unit = parse(&source).expect("expected a successful parse");
    let TypeDeclaration::Class(class) = &unit.types[0] else {
        panic!("expected a class declaration");
    };
    let javelin_syntax::ast::declarations::ClassBodyDeclaration::Method(method) = &class.body[0]
    else {
        panic!("expected a method declaration");
    };
    method.body.as_ref().unwrap().statements[0].clone()
}

#[test]
fn scenario_a_package_and_imports() {
    let unit = parse("package a.b; import a.b.C; import static a.b.D.*; class E {}").unwrap();
    assert_eq!(unit.package.as_ref().unwrap().name, "a.b");
    assert_eq!(unit.imports.len(), 2);
    assert_eq!(unit.imports[0].path, "a.b.C");
    assert!(!unit.imports[0].static_);
    assert!(!unit.imports[0].wildcard);
    assert_eq!(unit.imports[1].path, "a.b.D");
    assert!(unit.imports[1].static_);
    assert!(unit.imports[1].wildcard);
    assert_eq!(unit.types.len(), 1);
    match &unit.types[0] {
        TypeDeclaration::Class(c) => {
            assert_eq!(c.name, "E");
            assert!(c.body.is_empty());
        }
        other => panic!("expected a class declaration, got {other:?}"),
    }
}

#[test]
fn scenario_b_array_declarator_and_initializer() {
    let unit = parse("class X { int a = 1, b[] = {2,3}; }").unwrap();
    let TypeDeclaration::Class(class) = &unit.types[0] else {
        panic!("expected a class");
    };
    let javelin_syntax::ast::declarations::ClassBodyDeclaration::Field(field) = &class.body[0]
    else {
        panic!("expected a field");
    };
    match &field.type_ {
        Type::Basic(b) => assert_eq!(b.name, "int"),
        other => panic!("expected a basic type, got {other:?}"),
    }
    assert_eq!(field.declarators.len(), 2);
    assert_eq!(field.declarators[1].dimensions.len(), 1);
    let init = field.declarators[1].initializer.as_ref().unwrap();
    match init {
        javelin_syntax::ast::expressions::VariableInitializer::Array(arr) => {
            assert_eq!(arr.initializers.len(), 2);
        }
        other => panic!("expected an array initializer, got {other:?}"),
    }
}

#[test]
fn scenario_c_binary_precedence() {
    let stmt = parse_method_body("return a + b * c - d / e;");
    let Statement::Return(ret) = stmt else {
        panic!("expected a return statement");
    };
    let Expression::Binary(root) = ret.expression.unwrap() else {
        panic!("expected a binary operation at the root");
    };
    assert_eq!(root.operator, "-");
    let javelin_syntax::ast::expressions::Operand::Expression(left) = &root.operandl else {
        panic!("expected an expression operand");
    };
    let Expression::Binary(left_op) = left.as_ref() else {
        panic!("expected + on the left");
    };
    assert_eq!(left_op.operator, "+");
    let javelin_syntax::ast::expressions::Operand::Expression(left_rhs) = &left_op.operandr else {
        panic!("expected an expression operand");
    };
    assert!(matches!(left_rhs.as_ref(), Expression::Binary(b) if b.operator == "*"));
    let javelin_syntax::ast::expressions::Operand::Expression(right) = &root.operandr else {
        panic!("expected an expression operand");
    };
    assert!(matches!(right.as_ref(), Expression::Binary(b) if b.operator == "/"));
}

#[test]
fn scenario_d_diamond_creator_with_nested_generics() {
    let stmt = parse_method_body("List<Map<String,Integer>> m = new HashMap<>();");
    let Statement::LocalVariableDeclaration(decl) = stmt else {
        panic!("expected a local variable declaration");
    };
    let Type::Reference(r) = &decl.type_ else {
        panic!("expected a reference type");
    };
    assert_eq!(r.name, "List");
    let args = r.arguments.as_ref().unwrap();
    assert_eq!(args.len(), 1);
    let Type::Reference(map_arg) = args[0].type_.as_ref().unwrap().as_ref() else {
        panic!("expected Map as the type argument");
    };
    assert_eq!(map_arg.name, "Map");
    assert_eq!(map_arg.arguments.as_ref().unwrap().len(), 2);

    let init = decl.declarators[0].initializer.as_ref().unwrap();
    let javelin_syntax::ast::expressions::VariableInitializer::Expression(expr) = init else {
        panic!("expected an expression initializer");
    };
    let Expression::Primary(primary) = expr.as_ref() else {
        panic!("expected a primary expression");
    };
    match &primary.kind {
        PrimaryKind::ClassCreator { type_, .. } => {
            assert_eq!(type_.name, "HashMap");
            assert!(type_.arguments.as_ref().unwrap().is_empty());
        }
        other => panic!("expected a class creator, got {other:?}"),
    }
}

#[test]
fn scenario_e_try_with_resources_multicatch_finally() {
    let stmt = parse_method_body(
        "try (R r = open()) { use(r); } catch (IOException | SQLException e) { log(e); } finally { close(); }",
    );
    let Statement::Try(try_stmt) = stmt else {
        panic!("expected a try statement");
    };
    assert_eq!(try_stmt.resources.as_ref().unwrap().len(), 1);
    let catches = try_stmt.catches.unwrap();
    assert_eq!(catches.len(), 1);
    assert_eq!(catches[0].parameter.types.len(), 2);
    assert!(try_stmt.finally_block.is_some());
}

#[test]
fn scenario_f_lambda_block_and_expression_bodies() {
    let stmt = parse_method_body(r#"Runnable r = () -> { System.out.println("hi"); };"#);
    let Statement::LocalVariableDeclaration(decl) = stmt else {
        panic!("expected a local variable declaration");
    };
    let init = decl.declarators[0].initializer.as_ref().unwrap();
    let javelin_syntax::ast::expressions::VariableInitializer::Expression(expr) = init else {
        panic!("expected an expression initializer");
    };
    let Expression::Lambda(lambda) = expr.as_ref() else {
        panic!("expected a lambda expression");
    };
    match &lambda.parameters {
        javelin_syntax::ast::expressions::LambdaParameters::Inferred(names) => {
            assert!(names.is_empty())
        }
        other => panic!("expected an empty inferred parameter list, got {other:?}"),
    }
    match &lambda.body {
        javelin_syntax::ast::expressions::LambdaBody::Block(block) => {
            assert_eq!(block.statements.len(), 1);
        }
        other => panic!("expected a block body, got {other:?}"),
    }

    let single_param = parse_method_body("Function<Integer,Integer> f = x -> x + 1;");
    let Statement::LocalVariableDeclaration(decl) = single_param else {
        panic!("expected a local variable declaration");
    };
    let init = decl.declarators[0].initializer.as_ref().unwrap();
    let javelin_syntax::ast::expressions::VariableInitializer::Expression(expr) = init else {
        panic!("expected an expression initializer");
    };
    let Expression::Lambda(lambda) = expr.as_ref() else {
        panic!("expected a lambda expression");
    };
    match &lambda.parameters {
        javelin_syntax::ast::expressions::LambdaParameters::Inferred(names) => {
            assert_eq!(names, &vec!["x".to_string()]);
        }
        other => panic!("expected one inferred parameter, got {other:?}"),
    }
}

#[test]
fn scenario_g_shift_operators_do_not_collide_with_generics() {
    let stmt = parse_method_body("List<Map<K,V>> m = null; int x = a >> b; int y = a >>> b;");
    let _ = stmt;
    let source = "class X { void m() { List<Map<K,V>> m2 = null; int x = a >> b; int y = a >>> b; } }";
    let unit = parse(source).unwrap();
    let TypeDeclaration::Class(class) = &unit.types[0] else {
        panic!("expected a class");
    };
    let javelin_syntax::ast::declarations::ClassBodyDeclaration::Method(method) = &class.body[0]
    else {
        panic!("expected a method");
    };
    let statements = &method.body.as_ref().unwrap().statements;
    assert_eq!(statements.len(), 3);
    assert!(matches!(&statements[0], Statement::LocalVariableDeclaration(_)));
    let Statement::LocalVariableDeclaration(shift) = &statements[1] else {
        panic!("expected a local variable declaration");
    };
    let init = shift.declarators[0].initializer.as_ref().unwrap();
    let javelin_syntax::ast::expressions::VariableInitializer::Expression(expr) = init else {
        panic!("expected an expression initializer");
    };
    assert!(matches!(expr.as_ref(), Expression::Binary(b) if b.operator == ">>"));
    let Statement::LocalVariableDeclaration(shift3) = &statements[2] else {
        panic!("expected a local variable declaration");
    };
    let init3 = shift3.declarators[0].initializer.as_ref().unwrap();
    let javelin_syntax::ast::expressions::VariableInitializer::Expression(expr3) = init3 else {
        panic!("expected an expression initializer");
    };
    assert!(matches!(expr3.as_ref(), Expression::Binary(b) if b.operator == ">>>"));
}

#[test]
fn negative_mixed_inferred_and_typed_lambda_params() {
    let source = "class X { void m() { (x, int y) -> x+y; } }";
    assert!(parse(source).is_err());
}

#[test]
fn negative_modifier_on_inferred_lambda_param() {
    let source = "class X { void m() { (x, final y) -> x+y; } }";
    assert!(parse(source).is_err());
}

#[test]
fn negative_try_without_catch_finally_or_resources() {
    let source = "class X { void m() { try { } } }";
    assert!(parse(source).is_err());
}
