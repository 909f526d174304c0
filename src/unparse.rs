//! Source reconstruction (component J): renders a parsed `CompilationUnit`
//! back into Java source text. Output is not required to, and does not,
//! preserve the original formatting, whitespace or comments — only that the
//! result re-tokenizes and re-parses to an equivalent tree.
//!
//! `Token`/the AST store decoded literal values, not raw source slices (see
//! the lexer's module doc), so a `PrimaryKind::Literal` payload has already
//! lost whether it came from a string, a char, a number or `true`/`false`/
//! `null`. [`render_literal`] recovers this with a best-effort heuristic
//! rather than a retrofit of the lexer; see `DESIGN.md`.
//!
//! Binary, ternary and cast operands are always fully parenthesized rather
//! than precedence-minimized, trading slightly noisier output for a printer
//! that can't get operator precedence wrong.

use crate::ast::declarations::{
    AnnotationBodyDeclaration, AnnotationDeclaration, ClassBodyDeclaration, ClassDeclaration,
    CompilationUnit, ElementValue, EnumDeclaration, FieldDeclaration, FormalParameter,
    InterfaceDeclaration, MethodDeclaration, TypeDeclaration, VariableDeclarator,
};
use crate::ast::expressions::{
    Expression, LambdaBody, LambdaParameters, MethodReferenceQualifier, Operand, Primary,
    PrimaryKind, Selector, VariableInitializer,
};
use crate::ast::statements::{
    Block, ForControlKind, ForInit, Statement, SwitchLabel,
};
use crate::ast::types::{ReferenceType, Type, TypeArgument, TypeParameter};
use std::collections::BTreeSet;

/// Renders a complete compilation unit.
pub fn unparse(unit: &CompilationUnit) -> String {
    let mut printer = Printer::new();
    printer.compilation_unit(unit);
    printer.out
}

struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn new() -> Self {
        Self { out: String::new(), indent: 0 }
    }

    fn pad(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str("    ");
        }
    }

    fn raw(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn line(&mut self, s: &str) {
        self.pad();
        self.out.push_str(s);
        self.out.push('\n');
    }

    fn compilation_unit(&mut self, unit: &CompilationUnit) {
        if let Some(pkg) = &unit.package {
            for annotation in &pkg.annotations {
                self.line(&render_annotation(annotation));
            }
            self.line(&format!("package {};", pkg.name));
            self.raw("\n");
        }
        for import in &unit.imports {
            let mut text = String::from("import ");
            if import.static_ {
                text.push_str("static ");
            }
            text.push_str(&import.path);
            if import.wildcard {
                text.push_str(".*");
            }
            text.push(';');
            self.line(&text);
        }
        if !unit.imports.is_empty() {
            self.raw("\n");
        }
        for (i, type_decl) in unit.types.iter().enumerate() {
            if i > 0 {
                self.raw("\n");
            }
            self.type_declaration(type_decl);
        }
    }

    fn type_declaration(&mut self, decl: &TypeDeclaration) {
        match decl {
            TypeDeclaration::Class(c) => self.class_declaration(c),
            TypeDeclaration::Interface(i) => self.interface_declaration(i),
            TypeDeclaration::Enum(e) => self.enum_declaration(e),
            TypeDeclaration::Annotation(a) => self.annotation_declaration(a),
        }
    }

    fn class_declaration(&mut self, decl: &ClassDeclaration) {
        self.header_lines(&decl.annotations);
        self.pad();
        self.raw(&render_modifiers(&decl.modifiers));
        self.raw("class ");
        self.raw(&decl.name);
        self.raw(&render_type_parameters(&decl.type_parameters));
        if let Some(extends) = &decl.extends {
            self.raw(" extends ");
            self.raw(&render_reference_type(extends));
        }
        if !decl.implements.is_empty() {
            self.raw(" implements ");
            self.raw(&render_reference_type_list(&decl.implements));
        }
        self.raw(" {\n");
        self.indent += 1;
        for member in &decl.body {
            self.class_body_declaration(member);
        }
        self.indent -= 1;
        self.line("}");
    }

    fn interface_declaration(&mut self, decl: &InterfaceDeclaration) {
        self.header_lines(&decl.annotations);
        self.pad();
        self.raw(&render_modifiers(&decl.modifiers));
        self.raw("interface ");
        self.raw(&decl.name);
        self.raw(&render_type_parameters(&decl.type_parameters));
        if !decl.extends.is_empty() {
            self.raw(" extends ");
            self.raw(&render_reference_type_list(&decl.extends));
        }
        self.raw(" {\n");
        self.indent += 1;
        for member in &decl.body {
            self.class_body_declaration(member);
        }
        self.indent -= 1;
        self.line("}");
    }

    fn enum_declaration(&mut self, decl: &EnumDeclaration) {
        self.header_lines(&decl.annotations);
        self.pad();
        self.raw(&render_modifiers(&decl.modifiers));
        self.raw("enum ");
        self.raw(&decl.name);
        if !decl.implements.is_empty() {
            self.raw(" implements ");
            self.raw(&render_reference_type_list(&decl.implements));
        }
        self.raw(" {\n");
        self.indent += 1;
        for (i, constant) in decl.body.constants.iter().enumerate() {
            if i > 0 {
                self.raw(",\n");
            }
            self.pad();
            for annotation in &constant.annotations {
                self.raw(&render_annotation(annotation));
                self.raw(" ");
            }
            self.raw(&constant.name);
            if let Some(args) = &constant.arguments {
                self.raw("(");
                self.raw(&render_expression_list(args));
                self.raw(")");
            }
            if let Some(body) = &constant.body {
                self.raw(" {\n");
                self.indent += 1;
                for member in body {
                    self.class_body_declaration(member);
                }
                self.indent -= 1;
                self.pad();
                self.raw("}");
            }
        }
        self.raw(";\n");
        for member in &decl.body.declarations {
            self.class_body_declaration(member);
        }
        self.indent -= 1;
        self.line("}");
    }

    fn annotation_declaration(&mut self, decl: &AnnotationDeclaration) {
        self.header_lines(&decl.annotations);
        self.pad();
        self.raw(&render_modifiers(&decl.modifiers));
        self.raw("@interface ");
        self.raw(&decl.name);
        self.raw(" {\n");
        self.indent += 1;
        for member in &decl.body {
            self.annotation_body_declaration(member);
        }
        self.indent -= 1;
        self.line("}");
    }

    fn annotation_body_declaration(&mut self, member: &AnnotationBodyDeclaration) {
        match member {
            AnnotationBodyDeclaration::Method(m) => {
                self.header_lines(&m.annotations);
                self.pad();
                self.raw(&render_modifiers(&m.modifiers));
                self.raw(&render_type(&m.return_type));
                self.raw(" ");
                self.raw(&m.name);
                self.raw("()");
                if let Some(default) = &m.default {
                    self.raw(" default ");
                    self.raw(&render_element_value(default));
                }
                self.raw(";\n");
            }
            AnnotationBodyDeclaration::Constant(f) => self.field_declaration(f),
            AnnotationBodyDeclaration::Class(c) => self.class_declaration(c),
            AnnotationBodyDeclaration::Interface(i) => self.interface_declaration(i),
            AnnotationBodyDeclaration::Enum(e) => self.enum_declaration(e),
            AnnotationBodyDeclaration::Annotation(a) => self.annotation_declaration(a),
        }
    }

    fn header_lines(&mut self, annotations: &[crate::ast::declarations::Annotation]) {
        for annotation in annotations {
            self.line(&render_annotation(annotation));
        }
    }

    fn class_body_declaration(&mut self, member: &ClassBodyDeclaration) {
        match member {
            ClassBodyDeclaration::Field(f) => self.field_declaration(f),
            ClassBodyDeclaration::Method(m) => self.method_declaration(m),
            ClassBodyDeclaration::Constructor(c) => self.constructor_declaration(c),
            ClassBodyDeclaration::Type(t) => self.type_declaration(t),
            ClassBodyDeclaration::StaticInitializer(b) => {
                self.pad();
                self.raw("static ");
                self.block(b);
                self.raw("\n");
            }
            ClassBodyDeclaration::InstanceInitializer(b) => {
                self.pad();
                self.block(b);
                self.raw("\n");
            }
        }
    }

    fn field_declaration(&mut self, field: &FieldDeclaration) {
        self.header_lines(&field.annotations);
        self.pad();
        self.raw(&render_modifiers(&field.modifiers));
        self.raw(&render_type(&field.type_));
        self.raw(" ");
        self.raw(&render_declarator_list(&field.declarators));
        self.raw(";\n");
    }

    fn method_declaration(&mut self, method: &MethodDeclaration) {
        self.header_lines(&method.annotations);
        self.pad();
        self.raw(&render_modifiers(&method.modifiers));
        self.raw(&render_type_parameters(&method.type_parameters));
        self.raw(&render_type(&method.return_type));
        self.raw(" ");
        self.raw(&method.name);
        self.raw("(");
        self.raw(&render_parameter_list(&method.parameters));
        self.raw(")");
        self.raw(&render_throws(&method.throws));
        match &method.body {
            Some(body) => {
                self.raw(" ");
                self.block(body);
                self.raw("\n");
            }
            None => self.raw(";\n"),
        }
    }

    fn constructor_declaration(&mut self, ctor: &crate::ast::declarations::ConstructorDeclaration) {
        self.header_lines(&ctor.annotations);
        self.pad();
        self.raw(&render_modifiers(&ctor.modifiers));
        self.raw(&render_type_parameters(&ctor.type_parameters));
        self.raw(&ctor.name);
        self.raw("(");
        self.raw(&render_parameter_list(&ctor.parameters));
        self.raw(")");
        self.raw(&render_throws(&ctor.throws));
        self.raw(" ");
        self.block(&ctor.body);
        self.raw("\n");
    }

    fn block(&mut self, block: &Block) {
        self.raw("{\n");
        self.indent += 1;
        for stmt in &block.statements {
            self.statement(stmt);
        }
        self.indent -= 1;
        self.pad();
        self.raw("}");
    }

    /// Renders `stmt` as a brace-delimited block, wrapping a bare statement
    /// in synthetic braces if it isn't one already.
    fn body(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Block(b) => self.block(b),
            other => {
                self.raw("{\n");
                self.indent += 1;
                self.statement(other);
                self.indent -= 1;
                self.pad();
                self.raw("}");
            }
        }
    }

    fn statement(&mut self, stmt: &Statement) {
        self.pad();
        if let Some(label) = stmt.label() {
            self.raw(label);
            self.raw(": ");
        }
        self.statement_body(stmt);
        self.raw("\n");
    }

    fn statement_body(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Block(b) => self.block(b),
            Statement::If(s) => {
                self.raw("if (");
                self.raw(&render_expression(&s.condition));
                self.raw(") ");
                self.body(&s.then_statement);
                if let Some(else_stmt) = &s.else_statement {
                    self.raw(" else ");
                    self.body(else_stmt);
                }
            }
            Statement::While(s) => {
                self.raw("while (");
                self.raw(&render_expression(&s.condition));
                self.raw(") ");
                self.body(&s.body);
            }
            Statement::Do(s) => {
                self.raw("do ");
                self.body(&s.body);
                self.raw(" while (");
                self.raw(&render_expression(&s.condition));
                self.raw(");");
            }
            Statement::For(s) => {
                self.raw("for (");
                match &s.control {
                    ForControlKind::Basic(c) => {
                        if let Some(init) = &c.init {
                            match init {
                                ForInit::Declaration(d) => {
                                    self.raw(&render_modifiers(&d.modifiers));
                                    self.raw(&render_type(&d.type_));
                                    self.raw(" ");
                                    self.raw(&render_declarator_list(&d.declarators));
                                }
                                ForInit::Expressions(exprs) => {
                                    self.raw(&render_expression_list(exprs));
                                }
                            }
                        }
                        self.raw("; ");
                        if let Some(cond) = &c.condition {
                            self.raw(&render_expression(cond));
                        }
                        self.raw("; ");
                        self.raw(&render_expression_list(&c.update));
                    }
                    ForControlKind::Enhanced(c) => {
                        self.raw(&render_modifiers(&c.var.modifiers));
                        self.raw(&render_type(&c.var.type_));
                        self.raw(" ");
                        self.raw(&c.var.declarators.first().map(|d| d.name.clone()).unwrap_or_default());
                        self.raw(" : ");
                        self.raw(&render_expression(&c.iterable));
                    }
                }
                self.raw(") ");
                self.body(&s.body);
            }
            Statement::Assert(s) => {
                self.raw("assert ");
                self.raw(&render_expression(&s.condition));
                if let Some(v) = &s.value {
                    self.raw(" : ");
                    self.raw(&render_expression(v));
                }
                self.raw(";");
            }
            Statement::Break(s) => {
                self.raw("break");
                if let Some(goto) = &s.goto {
                    self.raw(" ");
                    self.raw(goto);
                }
                self.raw(";");
            }
            Statement::Continue(s) => {
                self.raw("continue");
                if let Some(goto) = &s.goto {
                    self.raw(" ");
                    self.raw(goto);
                }
                self.raw(";");
            }
            Statement::Return(s) => {
                self.raw("return");
                if let Some(e) = &s.expression {
                    self.raw(" ");
                    self.raw(&render_expression(e));
                }
                self.raw(";");
            }
            Statement::Throw(s) => {
                self.raw("throw ");
                self.raw(&render_expression(&s.expression));
                self.raw(";");
            }
            Statement::Synchronized(s) => {
                self.raw("synchronized (");
                self.raw(&render_expression(&s.lock));
                self.raw(") ");
                self.block(&s.block);
            }
            Statement::Try(s) => {
                self.raw("try ");
                if let Some(resources) = &s.resources {
                    self.raw("(");
                    for (i, resource) in resources.iter().enumerate() {
                        if i > 0 {
                            self.raw("; ");
                        }
                        self.raw(&render_modifiers(&resource.modifiers));
                        self.raw(&render_reference_type(&resource.type_));
                        self.raw(" ");
                        self.raw(&resource.name);
                        self.raw(" = ");
                        self.raw(&render_expression(&resource.value));
                    }
                    self.raw(") ");
                }
                self.block(&s.block);
                if let Some(catches) = &s.catches {
                    for catch in catches {
                        self.raw(" catch (");
                        self.raw(&render_modifiers(&catch.parameter.modifiers));
                        let types: Vec<String> =
                            catch.parameter.types.iter().map(render_reference_type).collect();
                        self.raw(&types.join(" | "));
                        self.raw(" ");
                        self.raw(&catch.parameter.name);
                        self.raw(") ");
                        self.block(&catch.block);
                    }
                }
                if let Some(fin) = &s.finally_block {
                    self.raw(" finally ");
                    self.block(fin);
                }
            }
            Statement::Switch(s) => {
                self.raw("switch (");
                self.raw(&render_expression(&s.expression));
                self.raw(") {\n");
                self.indent += 1;
                for case in &s.cases {
                    for label in &case.labels {
                        self.pad();
                        match label {
                            SwitchLabel::Case(e) => {
                                self.raw("case ");
                                self.raw(&render_expression(e));
                                self.raw(":\n");
                            }
                            SwitchLabel::Default => self.raw("default:\n"),
                        }
                    }
                    self.indent += 1;
                    for stmt in &case.statements {
                        self.statement(stmt);
                    }
                    self.indent -= 1;
                }
                self.indent -= 1;
                self.pad();
                self.raw("}");
            }
            Statement::LocalVariableDeclaration(d) => {
                self.raw(&render_modifiers(&d.modifiers));
                self.raw(&render_type(&d.type_));
                self.raw(" ");
                self.raw(&render_declarator_list(&d.declarators));
                self.raw(";");
            }
            Statement::LocalType(t) => {
                let saved = std::mem::take(&mut self.out);
                self.type_declaration(t);
                let rendered = std::mem::replace(&mut self.out, saved);
                self.raw(rendered.trim_end());
            }
            Statement::Expression(s) => {
                self.raw(&render_expression(&s.expression));
                self.raw(";");
            }
            Statement::Empty(_) => {
                self.raw(";");
            }
        }
    }
}

fn render_modifiers(modifiers: &BTreeSet<String>) -> String {
    if modifiers.is_empty() {
        String::new()
    } else {
        let mut out = modifiers.iter().cloned().collect::<Vec<_>>().join(" ");
        out.push(' ');
        out
    }
}

fn render_annotation(annotation: &crate::ast::declarations::Annotation) -> String {
    let mut out = format!("@{}", annotation.name);
    if !annotation.element_values.is_empty() {
        out.push('(');
        let pairs: Vec<String> = annotation
            .element_values
            .iter()
            .map(|pair| match &pair.name {
                Some(name) => format!("{name} = {}", render_element_value(&pair.value)),
                None => render_element_value(&pair.value),
            })
            .collect();
        out.push_str(&pairs.join(", "));
        out.push(')');
    }
    out
}

fn render_element_value(value: &ElementValue) -> String {
    match value {
        ElementValue::Annotation(a) => render_annotation(a),
        ElementValue::Expression(e) => render_expression(e),
        ElementValue::Array(items) => {
            let parts: Vec<String> = items.iter().map(render_element_value).collect();
            format!("{{{}}}", parts.join(", "))
        }
    }
}

fn render_type(ty: &Type) -> String {
    match ty {
        Type::Basic(b) => format!("{}{}", b.name, "[]".repeat(b.dimensions.len())),
        Type::Reference(r) => render_reference_type(r),
    }
}

fn render_reference_type(r: &ReferenceType) -> String {
    let mut out = r.name.clone();
    if let Some(args) = &r.arguments {
        out.push('<');
        out.push_str(
            &args
                .iter()
                .map(render_type_argument)
                .collect::<Vec<_>>()
                .join(", "),
        );
        out.push('>');
    }
    if let Some(sub) = &r.sub_type {
        out.push('.');
        out.push_str(&render_reference_type(sub));
    }
    out.push_str(&"[]".repeat(r.dimensions.len()));
    out
}

fn render_reference_type_list(types: &[ReferenceType]) -> String {
    types.iter().map(render_reference_type).collect::<Vec<_>>().join(", ")
}

fn render_type_argument(arg: &TypeArgument) -> String {
    use crate::ast::types::PatternType;
    match arg.pattern_type {
        PatternType::Wildcard => "?".to_string(),
        PatternType::Extends => format!("? extends {}", render_type(arg.type_.as_ref().unwrap())),
        PatternType::Super => format!("? super {}", render_type(arg.type_.as_ref().unwrap())),
        PatternType::None => render_type(arg.type_.as_ref().unwrap()),
    }
}

fn render_type_parameters(params: &[TypeParameter]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = params
        .iter()
        .map(|p| match &p.extends {
            Some(bounds) => format!("{} extends {}", p.name, render_reference_type_list(bounds)),
            None => p.name.clone(),
        })
        .collect();
    format!("<{}> ", rendered.join(", "))
}

fn render_throws(throws: &[ReferenceType]) -> String {
    if throws.is_empty() {
        String::new()
    } else {
        format!(" throws {}", render_reference_type_list(throws))
    }
}

fn render_parameter_list(params: &[FormalParameter]) -> String {
    params
        .iter()
        .map(|p| {
            let mut out = render_modifiers(&p.modifiers);
            for annotation in &p.annotations {
                out.push_str(&render_annotation(annotation));
                out.push(' ');
            }
            out.push_str(&render_type(&p.type_));
            if p.varargs {
                out.push_str("...");
            } else {
                out.push_str(&"[]".repeat(p.dimensions.len()));
            }
            out.push(' ');
            out.push_str(&p.name);
            out
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_declarator_list(declarators: &[VariableDeclarator]) -> String {
    declarators.iter().map(render_declarator).collect::<Vec<_>>().join(", ")
}

fn render_declarator(decl: &VariableDeclarator) -> String {
    let mut out = decl.name.clone();
    out.push_str(&"[]".repeat(decl.dimensions.len()));
    if let Some(init) = &decl.initializer {
        out.push_str(" = ");
        out.push_str(&render_variable_initializer(init));
    }
    out
}

fn render_variable_initializer(init: &VariableInitializer) -> String {
    match init {
        VariableInitializer::Expression(e) => render_expression(e),
        VariableInitializer::Array(arr) => {
            let items: Vec<String> = arr.initializers.iter().map(render_variable_initializer).collect();
            format!("{{{}}}", items.join(", "))
        }
    }
}

fn render_expression_list(exprs: &[Expression]) -> String {
    exprs.iter().map(render_expression).collect::<Vec<_>>().join(", ")
}

/// Recovers a best-effort token text for a literal that has already been
/// decoded to its value, with no memory of whether it was a string, a char,
/// a number or `true`/`false`/`null`.
fn render_literal(raw: &str) -> String {
    if raw == "true" || raw == "false" || raw == "null" {
        return raw.to_string();
    }
    if raw.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return raw.to_string();
    }
    escape_string_literal(raw)
}

fn escape_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn render_expression(expr: &Expression) -> String {
    match expr {
        Expression::Primary(p) => render_primary(p),
        Expression::Cast(c) => format!("(({}) {})", render_type(&c.type_), render_operand_expr(&c.expression)),
        Expression::Binary(b) => {
            let rhs = match &b.operandr {
                Operand::Expression(e) => render_operand_expr(e),
                Operand::Type(t) => render_type(t),
            };
            format!("({} {} {})", render_operand_expr(&b.operandl), b.operator, rhs)
        }
        Expression::Ternary(t) => format!(
            "({} ? {} : {})",
            render_operand_expr(&t.condition),
            render_operand_expr(&t.if_true),
            render_operand_expr(&t.if_false)
        ),
        Expression::Assignment(a) => format!(
            "{} {} {}",
            render_operand_expr(&a.expressionl),
            a.operator,
            render_operand_expr(&a.value)
        ),
        Expression::Lambda(l) => {
            let params = match &l.parameters {
                LambdaParameters::Inferred(names) => format!("({})", names.join(", ")),
                LambdaParameters::Typed(params) => format!("({})", render_parameter_list(params)),
                LambdaParameters::Single(name) => name.clone(),
            };
            let body = match &l.body {
                LambdaBody::Expression(e) => render_operand_expr(e),
                LambdaBody::Block(b) => {
                    let mut printer = Printer::new();
                    printer.block(b);
                    printer.out
                }
            };
            format!("{params} -> {body}")
        }
        Expression::MethodReference(m) => {
            let qualifier = match &m.expression {
                MethodReferenceQualifier::Type(t) => render_type(t),
                MethodReferenceQualifier::Expression(e) => render_operand_expr(e),
                MethodReferenceQualifier::Super => "super".to_string(),
            };
            let type_args = m
                .type_arguments
                .as_ref()
                .map(|args| format!("<{}>", args.iter().map(render_type_argument).collect::<Vec<_>>().join(", ")))
                .unwrap_or_default();
            format!("{qualifier}::{type_args}{}", m.method)
        }
    }
}

/// A nested `Expression` already carries its own parens when it is itself
/// compound (see `render_expression`'s `Cast`/`Binary`/`Ternary` arms), so
/// this only exists to make call sites read as "render this operand".
fn render_operand_expr(expr: &Expression) -> String {
    render_expression(expr)
}

fn render_primary(primary: &Primary) -> String {
    let mut out = String::new();
    for op in &primary.prefix_operators {
        out.push_str(op);
    }
    if let Some(qualifier) = &primary.qualifier {
        out.push_str(qualifier);
        out.push('.');
    }
    out.push_str(&render_primary_kind(&primary.kind));
    for selector in &primary.selectors {
        out.push_str(&render_selector(selector));
    }
    for op in &primary.postfix_operators {
        out.push_str(op);
    }
    out
}

fn render_primary_kind(kind: &PrimaryKind) -> String {
    match kind {
        PrimaryKind::Literal(raw) => render_literal(raw),
        PrimaryKind::This => "this".to_string(),
        PrimaryKind::MemberReference { member } => member.clone(),
        PrimaryKind::MethodInvocation { member, type_arguments, arguments } => {
            format!("{}{member}({})", render_type_arguments_prefix(type_arguments), render_expression_list(arguments))
        }
        PrimaryKind::SuperMemberReference { member } => format!("super.{member}"),
        PrimaryKind::SuperMethodInvocation { member, type_arguments, arguments } => {
            format!("super.{}{member}({})", render_type_arguments_prefix(type_arguments), render_expression_list(arguments))
        }
        PrimaryKind::SuperConstructorInvocation { arguments } => {
            format!("super({})", render_expression_list(arguments))
        }
        PrimaryKind::ExplicitConstructorInvocation { type_arguments, arguments } => {
            format!("{}this({})", render_type_arguments_prefix(type_arguments), render_expression_list(arguments))
        }
        PrimaryKind::ClassReference { type_ } => format!("{}.class", render_type(type_)),
        PrimaryKind::VoidClassReference => "void.class".to_string(),
        PrimaryKind::Nested(expr) => format!("({})", render_expression(expr)),
        PrimaryKind::ArrayCreator { type_, dimensions, initializer } => {
            let dims: String = dimensions
                .iter()
                .map(|d| match d {
                    Some(size) => format!("[{}]", render_expression(size)),
                    None => "[]".to_string(),
                })
                .collect();
            let mut out = format!("new {}{dims}", render_type(type_));
            if let Some(init) = initializer {
                out.push(' ');
                out.push_str(&render_variable_initializer(&VariableInitializer::Array(init.clone())));
            }
            out
        }
        PrimaryKind::ClassCreator { type_, constructor_type_arguments, arguments, body } => {
            render_creator(type_, constructor_type_arguments, arguments, body)
        }
        PrimaryKind::InnerClassCreator { type_, constructor_type_arguments, arguments, body } => {
            render_creator(type_, constructor_type_arguments, arguments, body)
        }
    }
}

fn render_creator(
    type_: &ReferenceType,
    constructor_type_arguments: &Option<Vec<TypeArgument>>,
    arguments: &[Expression],
    body: &Option<Vec<ClassBodyDeclaration>>,
) -> String {
    let mut out = format!(
        "new {}{}({})",
        render_type_arguments_prefix(constructor_type_arguments),
        render_reference_type(type_),
        render_expression_list(arguments)
    );
    if let Some(body) = body {
        let mut printer = Printer::new();
        printer.raw(" {\n");
        printer.indent += 1;
        for member in body {
            printer.class_body_declaration(member);
        }
        printer.indent -= 1;
        printer.raw("}");
        out.push_str(&printer.out);
    }
    out
}

fn render_type_arguments_prefix(type_arguments: &Option<Vec<TypeArgument>>) -> String {
    match type_arguments {
        Some(args) if !args.is_empty() => {
            format!("<{}>", args.iter().map(render_type_argument).collect::<Vec<_>>().join(", "))
        }
        _ => String::new(),
    }
}

fn render_selector(selector: &Selector) -> String {
    match selector {
        Selector::ArraySelector { index } => format!("[{}]", render_expression(index)),
        Selector::MemberReference { member } => format!(".{member}"),
        Selector::MethodInvocation { member, type_arguments, arguments } => {
            format!(".{}{member}({})", render_type_arguments_prefix(type_arguments), render_expression_list(arguments))
        }
        Selector::This => ".this".to_string(),
        Selector::SuperMemberReference { member } => format!(".super.{member}"),
        Selector::InnerClassCreator { type_arguments, name, constructor_type_arguments, arguments, body } => {
            let mut out = format!(
                ".{}new {}{}({})",
                render_type_arguments_prefix(type_arguments),
                render_type_arguments_prefix(constructor_type_arguments),
                name,
                render_expression_list(arguments)
            );
            if let Some(body) = body {
                let mut printer = Printer::new();
                printer.raw(" {\n");
                printer.indent += 1;
                for member in body {
                    printer.class_body_declaration(member);
                }
                printer.indent -= 1;
                printer.raw("}");
                out.push_str(&printer.out);
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Cursor;
    use crate::grammar::parse_compilation_unit;
    use crate::lexer::tokenize;

    fn parse(src: &str) -> CompilationUnit {
        let mut cursor = Cursor::new(tokenize(src).unwrap());
        parse_compilation_unit(&mut cursor).unwrap()
    }

    #[test]
    fn test_unparse_then_reparse_preserves_class_shape() {
        let cu = parse("package a.b; class C { private int x; void m() { x = 1 + 2; } }");
        let rendered = unparse(&cu);
        let reparsed = parse(&rendered);
        assert_eq!(cu.package.as_ref().map(|p| &p.name), reparsed.package.as_ref().map(|p| &p.name));
        assert_eq!(cu.types.len(), reparsed.types.len());
    }

    #[test]
    fn test_unparse_renders_control_flow() {
        let cu = parse("class C { void m() { if (true) { return; } else { throw new RuntimeException(); } } }");
        let rendered = unparse(&cu);
        assert!(rendered.contains("if ("));
        assert!(rendered.contains("else"));
        assert!(rendered.contains("new RuntimeException"));
    }

    #[test]
    fn test_render_literal_keeps_numbers_and_keywords_bare() {
        assert_eq!(render_literal("true"), "true");
        assert_eq!(render_literal("null"), "null");
        assert_eq!(render_literal("42"), "42");
        assert_eq!(render_literal("hello"), "\"hello\"");
    }
}
