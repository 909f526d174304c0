//! Tree walking (component K): a `Node` trait giving every AST shape a
//! uniform, deterministic child enumeration in declaration-field order, and
//! a `Visitor` trait with one `visit_*` method per AST category plus
//! concrete default recursion. The unparser and any future static-analysis
//! pass are built on top of one of these two.

use crate::ast::declarations::{
    Annotation, AnnotationBodyDeclaration, AnnotationDeclaration, AnnotationMethod,
    ClassBodyDeclaration, ClassDeclaration, CompilationUnit, ConstructorDeclaration,
    ElementValue, ElementValuePair, EnumBody, EnumConstantDeclaration, EnumDeclaration,
    FieldDeclaration, FormalParameter, Import, InterfaceDeclaration, MethodDeclaration,
    PackageDeclaration, TypeDeclaration, VariableDeclarator,
};
use crate::ast::expressions::{
    ArrayInitializer, Assignment, BinaryOperation, Cast, Expression, LambdaBody,
    LambdaExpression, LambdaParameters, MethodReference, MethodReferenceQualifier, Operand,
    Primary, PrimaryKind, Selector, TernaryExpression, VariableInitializer,
};
use crate::ast::statements::{
    AssertStatement, Block, BreakStatement, CatchClause, CatchClauseParameter, ContinueStatement,
    DoStatement, EmptyStatement, EnhancedForControl, ForControl, ForControlKind, ForInit,
    ForStatement, IfStatement, LocalVariableDeclaration, ReturnStatement, Statement,
    StatementExpressionStatement, SwitchLabel, SwitchStatement, SwitchStatementCase,
    SynchronizedStatement, ThrowStatement, TryResource, TryStatement, WhileStatement,
};
use crate::ast::types::{BasicType, ReferenceType, Type, TypeArgument, TypeParameter};
use crate::token::Position;

/// Every AST shape implements `Node`: a source position plus, for shapes
/// that contain other nodes, a flat list of their direct children in the
/// order their fields are declared.
pub trait Node {
    fn position(&self) -> Position;

    fn children(&self) -> Vec<&dyn Node> {
        Vec::new()
    }
}

// ---- types.rs ---------------------------------------------------------

impl Node for BasicType {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.dimensions.iter().filter_map(|d| d.as_ref().map(|e| e as &dyn Node)).collect()
    }
}

impl Node for TypeArgument {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.type_.iter().map(|t| t.as_ref() as &dyn Node).collect()
    }
}

impl Node for TypeParameter {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        match &self.extends {
            Some(bounds) => bounds.iter().map(|r| r as &dyn Node).collect(),
            None => Vec::new(),
        }
    }
}

impl Node for ReferenceType {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut kids: Vec<&dyn Node> = Vec::new();
        if let Some(args) = &self.arguments {
            kids.extend(args.iter().map(|a| a as &dyn Node));
        }
        if let Some(sub) = &self.sub_type {
            kids.push(sub.as_ref());
        }
        kids.extend(self.dimensions.iter().filter_map(|d| d.as_ref().map(|e| e as &dyn Node)));
        kids
    }
}

impl Node for Type {
    fn position(&self) -> Position {
        Type::position(self)
    }

    fn children(&self) -> Vec<&dyn Node> {
        match self {
            Type::Basic(b) => vec![b as &dyn Node],
            Type::Reference(r) => vec![r as &dyn Node],
        }
    }
}

// ---- declarations.rs ---------------------------------------------------

fn element_value_nodes<'a>(value: &'a ElementValue, out: &mut Vec<&'a dyn Node>) {
    match value {
        ElementValue::Annotation(a) => out.push(a.as_ref()),
        ElementValue::Expression(e) => out.push(e.as_ref()),
        ElementValue::Array(items) => {
            for item in items {
                element_value_nodes(item, out);
            }
        }
    }
}

fn variable_initializer_node(vi: &VariableInitializer) -> &dyn Node {
    match vi {
        VariableInitializer::Expression(e) => e,
        VariableInitializer::Array(a) => a,
    }
}

fn class_body_declaration_node(d: &ClassBodyDeclaration) -> &dyn Node {
    match d {
        ClassBodyDeclaration::Field(f) => f,
        ClassBodyDeclaration::Method(m) => m,
        ClassBodyDeclaration::Constructor(c) => c,
        ClassBodyDeclaration::Type(t) => t,
        ClassBodyDeclaration::StaticInitializer(b) => b,
        ClassBodyDeclaration::InstanceInitializer(b) => b,
    }
}

fn annotation_body_declaration_node(d: &AnnotationBodyDeclaration) -> &dyn Node {
    match d {
        AnnotationBodyDeclaration::Method(m) => m,
        AnnotationBodyDeclaration::Constant(f) => f,
        AnnotationBodyDeclaration::Class(c) => c,
        AnnotationBodyDeclaration::Interface(i) => i,
        AnnotationBodyDeclaration::Enum(e) => e,
        AnnotationBodyDeclaration::Annotation(a) => a,
    }
}

impl Node for PackageDeclaration {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.annotations.iter().map(|a| a as &dyn Node).collect()
    }
}

impl Node for Import {
    fn position(&self) -> Position {
        self.position
    }
}

impl Node for CompilationUnit {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut out: Vec<&dyn Node> = Vec::new();
        if let Some(pkg) = &self.package {
            out.push(pkg);
        }
        out.extend(self.imports.iter().map(|i| i as &dyn Node));
        out.extend(self.types.iter().map(|t| t as &dyn Node));
        out
    }
}

impl Node for ElementValuePair {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut out = Vec::new();
        element_value_nodes(&self.value, &mut out);
        out
    }
}

impl Node for Annotation {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.element_values.iter().map(|v| v as &dyn Node).collect()
    }
}

impl Node for VariableDeclarator {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut out: Vec<&dyn Node> = self
            .dimensions
            .iter()
            .filter_map(|d| d.as_ref().map(|e| e as &dyn Node))
            .collect();
        if let Some(init) = &self.initializer {
            out.push(variable_initializer_node(init));
        }
        out
    }
}

impl Node for FormalParameter {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut out: Vec<&dyn Node> = self.annotations.iter().map(|a| a as &dyn Node).collect();
        out.push(&self.type_);
        out.extend(self.dimensions.iter().filter_map(|d| d.as_ref().map(|e| e as &dyn Node)));
        out
    }
}

impl Node for FieldDeclaration {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut out: Vec<&dyn Node> = self.annotations.iter().map(|a| a as &dyn Node).collect();
        out.push(&self.type_);
        out.extend(self.declarators.iter().map(|d| d as &dyn Node));
        out
    }
}

impl Node for MethodDeclaration {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut out: Vec<&dyn Node> = self.annotations.iter().map(|a| a as &dyn Node).collect();
        out.extend(self.type_parameters.iter().map(|t| t as &dyn Node));
        out.push(&self.return_type);
        out.extend(self.parameters.iter().map(|p| p as &dyn Node));
        out.extend(self.throws.iter().map(|t| t as &dyn Node));
        if let Some(body) = &self.body {
            out.push(body);
        }
        out
    }
}

impl Node for ConstructorDeclaration {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut out: Vec<&dyn Node> = self.annotations.iter().map(|a| a as &dyn Node).collect();
        out.extend(self.type_parameters.iter().map(|t| t as &dyn Node));
        out.extend(self.parameters.iter().map(|p| p as &dyn Node));
        out.extend(self.throws.iter().map(|t| t as &dyn Node));
        out.push(&self.body);
        out
    }
}

impl Node for ClassDeclaration {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut out: Vec<&dyn Node> = self.annotations.iter().map(|a| a as &dyn Node).collect();
        out.extend(self.type_parameters.iter().map(|t| t as &dyn Node));
        if let Some(ext) = &self.extends {
            out.push(ext);
        }
        out.extend(self.implements.iter().map(|i| i as &dyn Node));
        out.extend(self.body.iter().map(class_body_declaration_node));
        out
    }
}

impl Node for InterfaceDeclaration {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut out: Vec<&dyn Node> = self.annotations.iter().map(|a| a as &dyn Node).collect();
        out.extend(self.type_parameters.iter().map(|t| t as &dyn Node));
        out.extend(self.extends.iter().map(|e| e as &dyn Node));
        out.extend(self.body.iter().map(class_body_declaration_node));
        out
    }
}

impl Node for EnumConstantDeclaration {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut out: Vec<&dyn Node> = self.annotations.iter().map(|a| a as &dyn Node).collect();
        if let Some(args) = &self.arguments {
            out.extend(args.iter().map(|e| e as &dyn Node));
        }
        if let Some(body) = &self.body {
            out.extend(body.iter().map(class_body_declaration_node));
        }
        out
    }
}

impl Node for EnumBody {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut out: Vec<&dyn Node> = self.constants.iter().map(|c| c as &dyn Node).collect();
        out.extend(self.declarations.iter().map(class_body_declaration_node));
        out
    }
}

impl Node for EnumDeclaration {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut out: Vec<&dyn Node> = self.annotations.iter().map(|a| a as &dyn Node).collect();
        out.extend(self.implements.iter().map(|i| i as &dyn Node));
        out.push(&self.body);
        out
    }
}

impl Node for AnnotationMethod {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut out: Vec<&dyn Node> = self.annotations.iter().map(|a| a as &dyn Node).collect();
        out.push(&self.return_type);
        if let Some(default) = &self.default {
            element_value_nodes(default, &mut out);
        }
        out
    }
}

impl Node for AnnotationDeclaration {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut out: Vec<&dyn Node> = self.annotations.iter().map(|a| a as &dyn Node).collect();
        out.extend(self.body.iter().map(annotation_body_declaration_node));
        out
    }
}

impl Node for TypeDeclaration {
    fn position(&self) -> Position {
        TypeDeclaration::position(self)
    }

    fn children(&self) -> Vec<&dyn Node> {
        match self {
            TypeDeclaration::Class(c) => vec![c as &dyn Node],
            TypeDeclaration::Interface(i) => vec![i as &dyn Node],
            TypeDeclaration::Enum(e) => vec![e as &dyn Node],
            TypeDeclaration::Annotation(a) => vec![a as &dyn Node],
        }
    }
}

// ---- statements.rs ------------------------------------------------------

fn for_init_nodes(init: &ForInit) -> Vec<&dyn Node> {
    match init {
        ForInit::Declaration(d) => vec![d as &dyn Node],
        ForInit::Expressions(exprs) => exprs.iter().map(|e| e as &dyn Node).collect(),
    }
}

fn for_control_kind_node(k: &ForControlKind) -> &dyn Node {
    match k {
        ForControlKind::Basic(c) => c,
        ForControlKind::Enhanced(c) => c,
    }
}

impl Node for Block {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.statements.iter().map(|s| s as &dyn Node).collect()
    }
}

impl Node for IfStatement {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut out: Vec<&dyn Node> = vec![&self.condition, self.then_statement.as_ref()];
        if let Some(e) = &self.else_statement {
            out.push(e.as_ref());
        }
        out
    }
}

impl Node for WhileStatement {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![&self.condition, self.body.as_ref()]
    }
}

impl Node for DoStatement {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![&self.condition, self.body.as_ref()]
    }
}

impl Node for LocalVariableDeclaration {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut out: Vec<&dyn Node> = self.annotations.iter().map(|a| a as &dyn Node).collect();
        out.push(&self.type_);
        out.extend(self.declarators.iter().map(|d| d as &dyn Node));
        out
    }
}

impl Node for ForControl {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut out: Vec<&dyn Node> = Vec::new();
        if let Some(init) = &self.init {
            out.extend(for_init_nodes(init));
        }
        if let Some(cond) = &self.condition {
            out.push(cond);
        }
        out.extend(self.update.iter().map(|e| e as &dyn Node));
        out
    }
}

impl Node for EnhancedForControl {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![&self.var, &self.iterable]
    }
}

impl Node for ForStatement {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![for_control_kind_node(&self.control), self.body.as_ref()]
    }
}

impl Node for AssertStatement {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut out: Vec<&dyn Node> = vec![&self.condition];
        if let Some(v) = &self.value {
            out.push(v);
        }
        out
    }
}

impl Node for BreakStatement {
    fn position(&self) -> Position {
        self.position
    }
}

impl Node for ContinueStatement {
    fn position(&self) -> Position {
        self.position
    }
}

impl Node for ReturnStatement {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.expression.iter().map(|e| e as &dyn Node).collect()
    }
}

impl Node for ThrowStatement {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![&self.expression]
    }
}

impl Node for SynchronizedStatement {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![&self.lock, &self.block]
    }
}

impl Node for TryResource {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut out: Vec<&dyn Node> = self.annotations.iter().map(|a| a as &dyn Node).collect();
        out.push(&self.type_);
        out.push(&self.value);
        out
    }
}

impl Node for CatchClauseParameter {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut out: Vec<&dyn Node> = self.annotations.iter().map(|a| a as &dyn Node).collect();
        out.extend(self.types.iter().map(|t| t as &dyn Node));
        out
    }
}

impl Node for CatchClause {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![&self.parameter, &self.block]
    }
}

impl Node for TryStatement {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut out: Vec<&dyn Node> = Vec::new();
        if let Some(resources) = &self.resources {
            out.extend(resources.iter().map(|r| r as &dyn Node));
        }
        out.push(&self.block);
        if let Some(catches) = &self.catches {
            out.extend(catches.iter().map(|c| c as &dyn Node));
        }
        if let Some(fin) = &self.finally_block {
            out.push(fin);
        }
        out
    }
}

impl Node for SwitchStatementCase {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut out: Vec<&dyn Node> = self
            .labels
            .iter()
            .filter_map(|l| match l {
                SwitchLabel::Case(e) => Some(e as &dyn Node),
                SwitchLabel::Default => None,
            })
            .collect();
        out.extend(self.statements.iter().map(|s| s as &dyn Node));
        out
    }
}

impl Node for SwitchStatement {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut out: Vec<&dyn Node> = vec![&self.expression];
        out.extend(self.cases.iter().map(|c| c as &dyn Node));
        out
    }
}

impl Node for StatementExpressionStatement {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![&self.expression]
    }
}

impl Node for EmptyStatement {
    fn position(&self) -> Position {
        self.position
    }
}

impl Node for Statement {
    fn position(&self) -> Position {
        Statement::position(self)
    }

    fn children(&self) -> Vec<&dyn Node> {
        match self {
            Statement::Block(s) => vec![s as &dyn Node],
            Statement::If(s) => vec![s as &dyn Node],
            Statement::While(s) => vec![s as &dyn Node],
            Statement::Do(s) => vec![s as &dyn Node],
            Statement::For(s) => vec![s as &dyn Node],
            Statement::Assert(s) => vec![s as &dyn Node],
            Statement::Break(s) => vec![s as &dyn Node],
            Statement::Continue(s) => vec![s as &dyn Node],
            Statement::Return(s) => vec![s as &dyn Node],
            Statement::Throw(s) => vec![s as &dyn Node],
            Statement::Synchronized(s) => vec![s as &dyn Node],
            Statement::Try(s) => vec![s as &dyn Node],
            Statement::Switch(s) => vec![s as &dyn Node],
            Statement::LocalVariableDeclaration(s) => vec![s as &dyn Node],
            Statement::LocalType(s) => vec![s as &dyn Node],
            Statement::Expression(s) => vec![s as &dyn Node],
            Statement::Empty(s) => vec![s as &dyn Node],
        }
    }
}

// ---- expressions.rs -----------------------------------------------------

fn primary_kind_nodes(kind: &PrimaryKind) -> Vec<&dyn Node> {
    match kind {
        PrimaryKind::Literal(_)
        | PrimaryKind::This
        | PrimaryKind::MemberReference { .. }
        | PrimaryKind::SuperMemberReference { .. }
        | PrimaryKind::VoidClassReference => Vec::new(),
        PrimaryKind::MethodInvocation { arguments, .. }
        | PrimaryKind::SuperMethodInvocation { arguments, .. }
        | PrimaryKind::SuperConstructorInvocation { arguments }
        | PrimaryKind::ExplicitConstructorInvocation { arguments, .. } => {
            arguments.iter().map(|a| a as &dyn Node).collect()
        }
        PrimaryKind::ClassReference { type_ } => vec![type_ as &dyn Node],
        PrimaryKind::Nested(expr) => vec![expr.as_ref() as &dyn Node],
        PrimaryKind::ArrayCreator { type_, dimensions, initializer } => {
            let mut out: Vec<&dyn Node> = vec![type_ as &dyn Node];
            out.extend(dimensions.iter().filter_map(|d| d.as_ref().map(|e| e as &dyn Node)));
            if let Some(init) = initializer {
                out.push(init as &dyn Node);
            }
            out
        }
        PrimaryKind::ClassCreator { type_, arguments, body, .. }
        | PrimaryKind::InnerClassCreator { type_, arguments, body, .. } => {
            let mut out: Vec<&dyn Node> = vec![type_ as &dyn Node];
            out.extend(arguments.iter().map(|a| a as &dyn Node));
            if let Some(body) = body {
                out.extend(body.iter().map(class_body_declaration_node));
            }
            out
        }
    }
}

fn selector_nodes(selector: &Selector) -> Vec<&dyn Node> {
    match selector {
        Selector::ArraySelector { index } => vec![index.as_ref() as &dyn Node],
        Selector::MemberReference { .. } | Selector::This | Selector::SuperMemberReference { .. } => Vec::new(),
        Selector::MethodInvocation { arguments, .. } => arguments.iter().map(|a| a as &dyn Node).collect(),
        Selector::InnerClassCreator { arguments, body, .. } => {
            let mut out: Vec<&dyn Node> = arguments.iter().map(|a| a as &dyn Node).collect();
            if let Some(body) = body {
                out.extend(body.iter().map(class_body_declaration_node));
            }
            out
        }
    }
}

fn operand_node(operand: &Operand) -> &dyn Node {
    match operand {
        Operand::Expression(e) => e.as_ref(),
        Operand::Type(t) => t.as_ref(),
    }
}

fn lambda_parameters_nodes(params: &LambdaParameters) -> Vec<&dyn Node> {
    match params {
        LambdaParameters::Typed(ps) => ps.iter().map(|p| p as &dyn Node).collect(),
        LambdaParameters::Inferred(_) | LambdaParameters::Single(_) => Vec::new(),
    }
}

fn lambda_body_node(body: &LambdaBody) -> &dyn Node {
    match body {
        LambdaBody::Block(b) => b,
        LambdaBody::Expression(e) => e.as_ref(),
    }
}

fn method_reference_qualifier_node(q: &MethodReferenceQualifier) -> Option<&dyn Node> {
    match q {
        MethodReferenceQualifier::Type(t) => Some(t.as_ref()),
        MethodReferenceQualifier::Expression(e) => Some(e.as_ref()),
        MethodReferenceQualifier::Super => None,
    }
}

impl Node for Primary {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut out = primary_kind_nodes(&self.kind);
        for selector in &self.selectors {
            out.extend(selector_nodes(selector));
        }
        out
    }
}

impl Node for ArrayInitializer {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.initializers.iter().map(variable_initializer_node).collect()
    }
}

impl Node for BinaryOperation {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![self.operandl.as_ref(), operand_node(&self.operandr)]
    }
}

impl Node for Cast {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![self.type_.as_ref(), self.expression.as_ref()]
    }
}

impl Node for TernaryExpression {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![self.condition.as_ref(), self.if_true.as_ref(), self.if_false.as_ref()]
    }
}

impl Node for Assignment {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![self.expressionl.as_ref(), self.value.as_ref()]
    }
}

impl Node for LambdaExpression {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut out = lambda_parameters_nodes(&self.parameters);
        out.push(lambda_body_node(&self.body));
        out
    }
}

impl Node for MethodReference {
    fn position(&self) -> Position {
        self.position
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut out: Vec<&dyn Node> = Vec::new();
        if let Some(q) = method_reference_qualifier_node(&self.expression) {
            out.push(q);
        }
        if let Some(args) = &self.type_arguments {
            out.extend(args.iter().map(|a| a as &dyn Node));
        }
        out
    }
}

impl Node for Expression {
    fn position(&self) -> Position {
        Expression::position(self)
    }

    fn children(&self) -> Vec<&dyn Node> {
        match self {
            Expression::Primary(p) => vec![p as &dyn Node],
            Expression::Cast(c) => vec![c as &dyn Node],
            Expression::Binary(b) => vec![b as &dyn Node],
            Expression::Ternary(t) => vec![t as &dyn Node],
            Expression::Assignment(a) => vec![a as &dyn Node],
            Expression::Lambda(l) => vec![l as &dyn Node],
            Expression::MethodReference(m) => vec![m as &dyn Node],
        }
    }
}

/// Generic pre-order traversal over the `Node` tree: visits `root`, then
/// recurses into its children left to right.
pub fn walk(root: &dyn Node, f: &mut impl FnMut(&dyn Node)) {
    f(root);
    for child in root.children() {
        walk(child, f);
    }
}

// -------------------------------------------------------------------------
// Visitor: typed callbacks, one per AST category, with concrete default
// recursion (not routed through `Node::children`, since that would need
// downcasting to recover each child's concrete type).
// -------------------------------------------------------------------------

pub trait Visitor {
    fn visit_compilation_unit(&mut self, node: &CompilationUnit) {
        walk_compilation_unit(self, node);
    }

    fn visit_type_declaration(&mut self, node: &TypeDeclaration) {
        walk_type_declaration(self, node);
    }

    fn visit_class_body_declaration(&mut self, node: &ClassBodyDeclaration) {
        walk_class_body_declaration(self, node);
    }

    fn visit_statement(&mut self, node: &Statement) {
        walk_statement(self, node);
    }

    fn visit_expression(&mut self, node: &Expression) {
        walk_expression(self, node);
    }

    fn visit_type(&mut self, _node: &Type) {}
}

pub fn walk_compilation_unit<V: Visitor + ?Sized>(visitor: &mut V, node: &CompilationUnit) {
    for type_decl in &node.types {
        visitor.visit_type_declaration(type_decl);
    }
}

pub fn walk_type_declaration<V: Visitor + ?Sized>(visitor: &mut V, node: &TypeDeclaration) {
    match node {
        TypeDeclaration::Class(c) => {
            for member in &c.body {
                visitor.visit_class_body_declaration(member);
            }
        }
        TypeDeclaration::Interface(i) => {
            for member in &i.body {
                visitor.visit_class_body_declaration(member);
            }
        }
        TypeDeclaration::Enum(e) => {
            for constant in &e.body.constants {
                if let Some(args) = &constant.arguments {
                    for arg in args {
                        visitor.visit_expression(arg);
                    }
                }
                if let Some(body) = &constant.body {
                    for member in body {
                        visitor.visit_class_body_declaration(member);
                    }
                }
            }
            for member in &e.body.declarations {
                visitor.visit_class_body_declaration(member);
            }
        }
        TypeDeclaration::Annotation(a) => {
            for member in &a.body {
                walk_annotation_body_declaration(visitor, member);
            }
        }
    }
}

fn walk_annotation_body_declaration<V: Visitor + ?Sized>(visitor: &mut V, node: &AnnotationBodyDeclaration) {
    match node {
        AnnotationBodyDeclaration::Method(m) => {
            if let Some(default) = &m.default {
                walk_element_value(visitor, default);
            }
        }
        AnnotationBodyDeclaration::Constant(f) => walk_field_declaration(visitor, f),
        AnnotationBodyDeclaration::Class(c) => {
            for member in &c.body {
                visitor.visit_class_body_declaration(member);
            }
        }
        AnnotationBodyDeclaration::Interface(i) => {
            for member in &i.body {
                visitor.visit_class_body_declaration(member);
            }
        }
        AnnotationBodyDeclaration::Enum(e) => {
            for member in &e.body.declarations {
                visitor.visit_class_body_declaration(member);
            }
        }
        AnnotationBodyDeclaration::Annotation(a) => {
            for member in &a.body {
                walk_annotation_body_declaration(visitor, member);
            }
        }
    }
}

fn walk_element_value<V: Visitor + ?Sized>(visitor: &mut V, value: &ElementValue) {
    match value {
        ElementValue::Expression(e) => visitor.visit_expression(e),
        ElementValue::Array(items) => {
            for item in items {
                walk_element_value(visitor, item);
            }
        }
        ElementValue::Annotation(a) => {
            for pair in &a.element_values {
                walk_element_value(visitor, &pair.value);
            }
        }
    }
}

fn walk_field_declaration<V: Visitor + ?Sized>(visitor: &mut V, field: &FieldDeclaration) {
    visitor.visit_type(&field.type_);
    for decl in &field.declarators {
        if let Some(init) = &decl.initializer {
            walk_variable_initializer(visitor, init);
        }
    }
}

fn walk_variable_initializer<V: Visitor + ?Sized>(visitor: &mut V, init: &VariableInitializer) {
    match init {
        VariableInitializer::Expression(e) => visitor.visit_expression(e),
        VariableInitializer::Array(arr) => {
            for item in &arr.initializers {
                walk_variable_initializer(visitor, item);
            }
        }
    }
}

pub fn walk_class_body_declaration<V: Visitor + ?Sized>(visitor: &mut V, node: &ClassBodyDeclaration) {
    match node {
        ClassBodyDeclaration::Field(f) => walk_field_declaration(visitor, f),
        ClassBodyDeclaration::Method(m) => {
            visitor.visit_type(&m.return_type);
            for param in &m.parameters {
                visitor.visit_type(&param.type_);
            }
            if let Some(body) = &m.body {
                for stmt in &body.statements {
                    visitor.visit_statement(stmt);
                }
            }
        }
        ClassBodyDeclaration::Constructor(c) => {
            for param in &c.parameters {
                visitor.visit_type(&param.type_);
            }
            for stmt in &c.body.statements {
                visitor.visit_statement(stmt);
            }
        }
        ClassBodyDeclaration::Type(t) => visitor.visit_type_declaration(t),
        ClassBodyDeclaration::StaticInitializer(b) | ClassBodyDeclaration::InstanceInitializer(b) => {
            for stmt in &b.statements {
                visitor.visit_statement(stmt);
            }
        }
    }
}

pub fn walk_statement<V: Visitor + ?Sized>(visitor: &mut V, node: &Statement) {
    match node {
        Statement::Block(b) => {
            for s in &b.statements {
                visitor.visit_statement(s);
            }
        }
        Statement::If(s) => {
            visitor.visit_expression(&s.condition);
            visitor.visit_statement(&s.then_statement);
            if let Some(e) = &s.else_statement {
                visitor.visit_statement(e);
            }
        }
        Statement::While(s) => {
            visitor.visit_expression(&s.condition);
            visitor.visit_statement(&s.body);
        }
        Statement::Do(s) => {
            visitor.visit_expression(&s.condition);
            visitor.visit_statement(&s.body);
        }
        Statement::For(s) => {
            match &s.control {
                ForControlKind::Basic(c) => {
                    if let Some(init) = &c.init {
                        match init {
                            ForInit::Declaration(d) => {
                                visitor.visit_type(&d.type_);
                                for decl in &d.declarators {
                                    if let Some(v) = &decl.initializer {
                                        walk_variable_initializer(visitor, v);
                                    }
                                }
                            }
                            ForInit::Expressions(exprs) => {
                                for e in exprs {
                                    visitor.visit_expression(e);
                                }
                            }
                        }
                    }
                    if let Some(cond) = &c.condition {
                        visitor.visit_expression(cond);
                    }
                    for update in &c.update {
                        visitor.visit_expression(update);
                    }
                }
                ForControlKind::Enhanced(c) => {
                    visitor.visit_type(&c.var.type_);
                    visitor.visit_expression(&c.iterable);
                }
            }
            visitor.visit_statement(&s.body);
        }
        Statement::Assert(s) => {
            visitor.visit_expression(&s.condition);
            if let Some(v) = &s.value {
                visitor.visit_expression(v);
            }
        }
        Statement::Break(_) | Statement::Continue(_) | Statement::Empty(_) => {}
        Statement::Return(s) => {
            if let Some(e) = &s.expression {
                visitor.visit_expression(e);
            }
        }
        Statement::Throw(s) => visitor.visit_expression(&s.expression),
        Statement::Synchronized(s) => {
            visitor.visit_expression(&s.lock);
            for stmt in &s.block.statements {
                visitor.visit_statement(stmt);
            }
        }
        Statement::Try(s) => {
            if let Some(resources) = &s.resources {
                for r in resources {
                    visitor.visit_expression(&r.value);
                }
            }
            for stmt in &s.block.statements {
                visitor.visit_statement(stmt);
            }
            if let Some(catches) = &s.catches {
                for c in catches {
                    for stmt in &c.block.statements {
                        visitor.visit_statement(stmt);
                    }
                }
            }
            if let Some(fin) = &s.finally_block {
                for stmt in &fin.statements {
                    visitor.visit_statement(stmt);
                }
            }
        }
        Statement::Switch(s) => {
            visitor.visit_expression(&s.expression);
            for case in &s.cases {
                for label in &case.labels {
                    if let SwitchLabel::Case(e) = label {
                        visitor.visit_expression(e);
                    }
                }
                for stmt in &case.statements {
                    visitor.visit_statement(stmt);
                }
            }
        }
        Statement::LocalVariableDeclaration(d) => {
            visitor.visit_type(&d.type_);
            for decl in &d.declarators {
                if let Some(v) = &decl.initializer {
                    walk_variable_initializer(visitor, v);
                }
            }
        }
        Statement::LocalType(t) => visitor.visit_type_declaration(t),
        Statement::Expression(s) => visitor.visit_expression(&s.expression),
    }
}

pub fn walk_expression<V: Visitor + ?Sized>(visitor: &mut V, node: &Expression) {
    match node {
        Expression::Primary(p) => walk_primary(visitor, p),
        Expression::Cast(c) => {
            visitor.visit_type(&c.type_);
            visitor.visit_expression(&c.expression);
        }
        Expression::Binary(b) => {
            visitor.visit_expression(&b.operandl);
            match &b.operandr {
                Operand::Expression(e) => visitor.visit_expression(e),
                Operand::Type(t) => visitor.visit_type(t),
            }
        }
        Expression::Ternary(t) => {
            visitor.visit_expression(&t.condition);
            visitor.visit_expression(&t.if_true);
            visitor.visit_expression(&t.if_false);
        }
        Expression::Assignment(a) => {
            visitor.visit_expression(&a.expressionl);
            visitor.visit_expression(&a.value);
        }
        Expression::Lambda(l) => {
            if let LambdaParameters::Typed(params) = &l.parameters {
                for p in params {
                    visitor.visit_type(&p.type_);
                }
            }
            match &l.body {
                LambdaBody::Block(b) => {
                    for s in &b.statements {
                        visitor.visit_statement(s);
                    }
                }
                LambdaBody::Expression(e) => visitor.visit_expression(e),
            }
        }
        Expression::MethodReference(m) => match &m.expression {
            MethodReferenceQualifier::Expression(e) => visitor.visit_expression(e),
            MethodReferenceQualifier::Type(t) => visitor.visit_type(t),
            MethodReferenceQualifier::Super => {}
        },
    }
}

fn walk_primary<V: Visitor + ?Sized>(visitor: &mut V, primary: &Primary) {
    match &primary.kind {
        PrimaryKind::MethodInvocation { arguments, .. }
        | PrimaryKind::SuperMethodInvocation { arguments, .. }
        | PrimaryKind::SuperConstructorInvocation { arguments }
        | PrimaryKind::ExplicitConstructorInvocation { arguments, .. } => {
            for arg in arguments {
                visitor.visit_expression(arg);
            }
        }
        PrimaryKind::ClassReference { type_ } => visitor.visit_type(type_),
        PrimaryKind::Nested(expr) => visitor.visit_expression(expr),
        PrimaryKind::ArrayCreator { type_, dimensions, initializer } => {
            visitor.visit_type(type_);
            for dim in dimensions.iter().filter_map(|d| d.as_ref()) {
                visitor.visit_expression(dim);
            }
            if let Some(init) = initializer {
                for item in &init.initializers {
                    walk_variable_initializer(visitor, item);
                }
            }
        }
        PrimaryKind::ClassCreator { arguments, body, .. }
        | PrimaryKind::InnerClassCreator { arguments, body, .. } => {
            for arg in arguments {
                visitor.visit_expression(arg);
            }
            if let Some(body) = body {
                for member in body {
                    visitor.visit_class_body_declaration(member);
                }
            }
        }
        PrimaryKind::Literal(_)
        | PrimaryKind::This
        | PrimaryKind::MemberReference { .. }
        | PrimaryKind::SuperMemberReference { .. }
        | PrimaryKind::VoidClassReference => {}
    }

    for selector in &primary.selectors {
        match selector {
            Selector::ArraySelector { index } => visitor.visit_expression(index),
            Selector::MethodInvocation { arguments, .. } => {
                for arg in arguments {
                    visitor.visit_expression(arg);
                }
            }
            Selector::InnerClassCreator { arguments, body, .. } => {
                for arg in arguments {
                    visitor.visit_expression(arg);
                }
                if let Some(body) = body {
                    for member in body {
                        visitor.visit_class_body_declaration(member);
                    }
                }
            }
            Selector::MemberReference { .. } | Selector::This | Selector::SuperMemberReference { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::grammar::parse_compilation_unit;
    use crate::cursor::Cursor;

    fn parse(src: &str) -> CompilationUnit {
        let mut cursor = Cursor::new(tokenize(src).unwrap());
        parse_compilation_unit(&mut cursor).unwrap()
    }

    #[test]
    fn test_node_children_reach_every_statement() {
        let cu = parse("class C { void m() { int a = 1; if (a > 0) { a++; } } }");
        let mut positions = Vec::new();
        walk(&cu, &mut |n| positions.push(n.position()));
        assert!(positions.len() > 5);
    }

    #[derive(Default)]
    struct CountExpressions {
        count: usize,
    }

    impl Visitor for CountExpressions {
        fn visit_expression(&mut self, node: &Expression) {
            self.count += 1;
            walk_expression(self, node);
        }
    }

    #[test]
    fn test_visitor_counts_nested_expressions() {
        let cu = parse("class C { void m() { int a = 1 + 2 * 3; } }");
        let mut visitor = CountExpressions::default();
        visitor.visit_compilation_unit(&cu);
        assert!(visitor.count >= 3);
    }
}
