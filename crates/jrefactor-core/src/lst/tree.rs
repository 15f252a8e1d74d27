//! Uniform views over the node payloads
//!
//! [`NodeRef`] is a cheap borrowed handle used by the printer and visitors,
//! [`Tree`] is the owned counterpart used when rebuilding. Both expose every
//! node kind through one interface: identity, formatting, and the ordered
//! sequence of tokens and children ([`NodeRef::pieces`]).

use super::nodes::*;
use super::{Formatting, NodeId};
use crate::error::RefactorError;
use crate::result::Result;
use std::fmt;
use std::sync::Arc;

/// Dispatch over every node variant of `Tree` or `NodeRef`
macro_rules! each_kind {
    ($enum:ident, $value:expr, $n:ident => $body:expr) => {
        match $value {
            $enum::CompilationUnit($n) => $body,
            $enum::Package($n) => $body,
            $enum::Import($n) => $body,
            $enum::ClassDecl($n) => $body,
            $enum::MethodDecl($n) => $body,
            $enum::Block($n) => $body,
            $enum::VariableDecls($n) => $body,
            $enum::NamedVariable($n) => $body,
            $enum::WhileLoop($n) => $body,
            $enum::If($n) => $body,
            $enum::Return($n) => $body,
            $enum::ExpressionStatement($n) => $body,
            $enum::Empty($n) => $body,
            $enum::Parentheses($n) => $body,
            $enum::Literal($n) => $body,
            $enum::Identifier($n) => $body,
            $enum::FieldAccess($n) => $body,
            $enum::MethodInvocation($n) => $body,
            $enum::NewClass($n) => $body,
            $enum::Binary($n) => $body,
            $enum::Unary($n) => $body,
            $enum::Assignment($n) => $body,
            $enum::Modifier($n) => $body,
            $enum::TypeTree($n) => $body,
        }
    };
}

macro_rules! node_kinds {
    ($($variant:ident => $label:literal),* $(,)?) => {
        /// Kind tag of a tree node
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum NodeKind {
            $($variant),*
        }

        impl NodeKind {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(NodeKind::$variant => $label),*
                }
            }
        }

        /// Owned handle to any node
        #[derive(Debug, Clone)]
        pub enum Tree {
            $($variant(Arc<$variant>)),*
        }

        /// Borrowed handle to any node
        #[derive(Debug, Clone, Copy)]
        pub enum NodeRef<'a> {
            $($variant(&'a Arc<$variant>)),*
        }

        $(
            impl From<$variant> for Tree {
                fn from(node: $variant) -> Self {
                    Tree::$variant(Arc::new(node))
                }
            }

            impl From<Arc<$variant>> for Tree {
                fn from(node: Arc<$variant>) -> Self {
                    Tree::$variant(node)
                }
            }

            impl<'a> From<&'a Arc<$variant>> for NodeRef<'a> {
                fn from(node: &'a Arc<$variant>) -> Self {
                    NodeRef::$variant(node)
                }
            }
        )*

        impl<'a> NodeRef<'a> {
            pub fn kind(self) -> NodeKind {
                match self {
                    $(NodeRef::$variant(_) => NodeKind::$variant),*
                }
            }

            /// Owned handle sharing the same node
            pub fn to_tree(self) -> Tree {
                match self {
                    $(NodeRef::$variant(n) => Tree::$variant(Arc::clone(n))),*
                }
            }
        }

        impl Tree {
            pub fn as_node(&self) -> NodeRef<'_> {
                match self {
                    $(Tree::$variant(n) => NodeRef::$variant(n)),*
                }
            }
        }
    };
}

node_kinds! {
    CompilationUnit => "CompilationUnit",
    Package => "Package",
    Import => "Import",
    ClassDecl => "ClassDecl",
    MethodDecl => "MethodDecl",
    Block => "Block",
    VariableDecls => "VariableDecls",
    NamedVariable => "NamedVariable",
    WhileLoop => "WhileLoop",
    If => "If",
    Return => "Return",
    ExpressionStatement => "ExpressionStatement",
    Empty => "Empty",
    Parentheses => "Parentheses",
    Literal => "Literal",
    Identifier => "Identifier",
    FieldAccess => "FieldAccess",
    MethodInvocation => "MethodInvocation",
    NewClass => "NewClass",
    Binary => "Binary",
    Unary => "Unary",
    Assignment => "Assignment",
    Modifier => "Modifier",
    TypeTree => "TypeTree",
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element of a node's printed form: literal token text (including
/// formatting the node owns between its tokens) or a child node
#[derive(Debug, Clone, Copy)]
pub enum Piece<'a> {
    Text(&'a str),
    Node(NodeRef<'a>),
}

struct Pieces<'a> {
    out: Vec<Piece<'a>>,
}

impl<'a> Pieces<'a> {
    fn new() -> Self {
        Self { out: Vec::new() }
    }

    fn text(&mut self, text: &'a str) {
        if !text.is_empty() {
            self.out.push(Piece::Text(text));
        }
    }

    fn node(&mut self, node: impl Into<NodeRef<'a>>) {
        self.out.push(Piece::Node(node.into()));
    }

    fn padded_list<T>(
        &mut self,
        elements: &'a [Padded<T>],
        separator: &'static str,
        node: impl Fn(&'a T) -> NodeRef<'a>,
    ) {
        let last = elements.len().saturating_sub(1);
        for (i, padded) in elements.iter().enumerate() {
            self.node(node(&padded.element));
            self.text(&padded.after.prefix);
            if i < last {
                self.text(separator);
            }
        }
    }

    fn container<T>(&mut self, container: &'a Container<T>, node: impl Fn(&'a T) -> NodeRef<'a>) {
        self.text(&container.before.prefix);
        self.text("(");
        self.padded_list(&container.elements, ",", node);
        self.text(&container.end.prefix);
        self.text(")");
    }

    fn type_list(&mut self, keyword: &'static str, list: &'a Option<TypeList>) {
        if let Some(list) = list {
            self.text(&list.keyword.prefix);
            self.text(keyword);
            self.padded_list(&list.types, ",", NodeRef::from);
        }
    }
}

impl<'a> NodeRef<'a> {
    pub fn id(self) -> NodeId {
        each_kind!(NodeRef, self, n => n.id)
    }

    pub fn formatting(self) -> &'a Formatting {
        each_kind!(NodeRef, self, n => &n.fmt)
    }

    /// Tokens and children in source order, without the node's own
    /// prefix and suffix
    pub fn pieces(self) -> Vec<Piece<'a>> {
        let mut p = Pieces::new();
        match self {
            NodeRef::CompilationUnit(cu) => {
                if let Some(package) = &cu.package {
                    p.node(package);
                }
                for import in &cu.imports {
                    p.node(import);
                }
                for class in &cu.classes {
                    p.node(class);
                }
            }
            NodeRef::Package(n) => {
                p.text("package");
                p.node(&n.name);
                p.text(&n.terminator.prefix);
                p.text(";");
            }
            NodeRef::Import(n) => {
                p.text("import");
                if let Some(kw) = &n.static_kw {
                    p.text(&kw.prefix);
                    p.text("static");
                }
                p.node(&n.name);
                p.text(&n.terminator.prefix);
                p.text(";");
            }
            NodeRef::ClassDecl(n) => {
                for modifier in &n.modifiers {
                    p.node(modifier);
                }
                p.text(&n.kind_fmt.prefix);
                p.text(n.kind.keyword());
                p.node(&n.name);
                if let Some(tp) = &n.type_parameters {
                    p.node(tp);
                }
                p.type_list("extends", &n.extends);
                p.type_list("implements", &n.implements);
                p.node(&n.body);
            }
            NodeRef::MethodDecl(n) => {
                for modifier in &n.modifiers {
                    p.node(modifier);
                }
                if let Some(tp) = &n.type_parameters {
                    p.node(tp);
                }
                if let Some(rt) = &n.return_type {
                    p.node(rt);
                }
                p.node(&n.name);
                p.container(&n.params, NodeRef::from);
                p.type_list("throws", &n.throws);
                match &n.body {
                    MethodBody::Block(block) => p.node(block),
                    MethodBody::Abstract(semi) => {
                        p.text(&semi.prefix);
                        p.text(";");
                    }
                }
            }
            NodeRef::Block(n) => {
                p.text("{");
                for statement in &n.statements {
                    p.node(statement.as_node());
                }
                p.text(&n.end.prefix);
                p.text("}");
            }
            NodeRef::VariableDecls(n) => {
                for modifier in &n.modifiers {
                    p.node(modifier);
                }
                p.node(&n.type_expr);
                p.padded_list(&n.vars, ",", NodeRef::from);
                if let Some(term) = &n.terminator {
                    p.text(&term.prefix);
                    p.text(";");
                }
            }
            NodeRef::NamedVariable(n) => {
                p.node(&n.name);
                if let Some(init) = &n.initializer {
                    p.text(&init.eq.prefix);
                    p.text("=");
                    p.node(init.value.as_node());
                }
            }
            NodeRef::WhileLoop(n) => {
                p.text("while");
                p.node(&n.condition);
                p.node(n.body.as_node());
            }
            NodeRef::If(n) => {
                p.text("if");
                p.node(&n.condition);
                p.node(n.then_part.as_node());
                if let Some(else_part) = &n.else_part {
                    p.text(&else_part.keyword.prefix);
                    p.text("else");
                    p.node(else_part.body.as_node());
                }
            }
            NodeRef::Return(n) => {
                p.text("return");
                if let Some(expr) = &n.expression {
                    p.node(expr.as_node());
                }
                p.text(&n.terminator.prefix);
                p.text(";");
            }
            NodeRef::ExpressionStatement(n) => {
                p.node(n.expression.as_node());
                p.text(&n.terminator.prefix);
                p.text(";");
            }
            NodeRef::Empty(_) => p.text(";"),
            NodeRef::Parentheses(n) => {
                p.text("(");
                p.node(n.tree.as_node());
                p.text(&n.end.prefix);
                p.text(")");
            }
            NodeRef::Literal(n) => p.text(&n.source),
            NodeRef::Identifier(n) => p.text(&n.name),
            NodeRef::FieldAccess(n) => {
                p.node(n.target.as_node());
                p.text(&n.dot.prefix);
                p.text(".");
                p.node(&n.name);
            }
            NodeRef::MethodInvocation(n) => {
                if let Some(select) = &n.select {
                    p.node(select.element.as_node());
                    p.text(&select.after.prefix);
                    p.text(".");
                }
                p.node(&n.name);
                p.container(&n.args, Expression::as_node);
            }
            NodeRef::NewClass(n) => {
                p.text("new");
                p.node(&n.class);
                p.container(&n.args, Expression::as_node);
            }
            NodeRef::Binary(n) => {
                p.node(n.left.as_node());
                p.text(&n.op_fmt.prefix);
                p.text(n.op.as_str());
                p.node(n.right.as_node());
            }
            NodeRef::Unary(n) => {
                if n.op.is_postfix() {
                    p.node(n.operand.as_node());
                    p.text(&n.op_fmt.prefix);
                    p.text(n.op.as_str());
                } else {
                    p.text(n.op.as_str());
                    p.node(n.operand.as_node());
                }
            }
            NodeRef::Assignment(n) => {
                p.node(n.target.as_node());
                p.text(&n.op_fmt.prefix);
                p.text(n.op.as_str());
                p.node(n.value.as_node());
            }
            NodeRef::Modifier(n) => p.text(n.kind.keyword()),
            NodeRef::TypeTree(n) => p.text(&n.text),
        }
        p.out
    }

    /// Direct children in source order
    pub fn children(self) -> Vec<NodeRef<'a>> {
        self.pieces()
            .into_iter()
            .filter_map(|piece| match piece {
                Piece::Node(node) => Some(node),
                Piece::Text(_) => None,
            })
            .collect()
    }

    /// Whether both handles point at the same allocation
    pub fn same_node(self, other: NodeRef<'_>) -> bool {
        fn addr<T>(node: &Arc<T>) -> *const () {
            Arc::as_ptr(node) as *const ()
        }
        each_kind!(NodeRef, self, n => addr(n)) == each_kind!(NodeRef, other, n => addr(n))
    }
}

impl Statement {
    pub fn as_node(&self) -> NodeRef<'_> {
        match self {
            Statement::Block(n) => NodeRef::Block(n),
            Statement::Class(n) => NodeRef::ClassDecl(n),
            Statement::Method(n) => NodeRef::MethodDecl(n),
            Statement::Variables(n) => NodeRef::VariableDecls(n),
            Statement::While(n) => NodeRef::WhileLoop(n),
            Statement::If(n) => NodeRef::If(n),
            Statement::Return(n) => NodeRef::Return(n),
            Statement::Expression(n) => NodeRef::ExpressionStatement(n),
            Statement::Empty(n) => NodeRef::Empty(n),
        }
    }
}

impl Expression {
    pub fn as_node(&self) -> NodeRef<'_> {
        match self {
            Expression::Literal(n) => NodeRef::Literal(n),
            Expression::Identifier(n) => NodeRef::Identifier(n),
            Expression::FieldAccess(n) => NodeRef::FieldAccess(n),
            Expression::MethodInvocation(n) => NodeRef::MethodInvocation(n),
            Expression::NewClass(n) => NodeRef::NewClass(n),
            Expression::Binary(n) => NodeRef::Binary(n),
            Expression::Unary(n) => NodeRef::Unary(n),
            Expression::Assignment(n) => NodeRef::Assignment(n),
            Expression::Parentheses(n) => NodeRef::Parentheses(n),
        }
    }
}

impl From<Statement> for Tree {
    fn from(statement: Statement) -> Self {
        match statement {
            Statement::Block(n) => Tree::Block(n),
            Statement::Class(n) => Tree::ClassDecl(n),
            Statement::Method(n) => Tree::MethodDecl(n),
            Statement::Variables(n) => Tree::VariableDecls(n),
            Statement::While(n) => Tree::WhileLoop(n),
            Statement::If(n) => Tree::If(n),
            Statement::Return(n) => Tree::Return(n),
            Statement::Expression(n) => Tree::ExpressionStatement(n),
            Statement::Empty(n) => Tree::Empty(n),
        }
    }
}

impl From<Expression> for Tree {
    fn from(expression: Expression) -> Self {
        match expression {
            Expression::Literal(n) => Tree::Literal(n),
            Expression::Identifier(n) => Tree::Identifier(n),
            Expression::FieldAccess(n) => Tree::FieldAccess(n),
            Expression::MethodInvocation(n) => Tree::MethodInvocation(n),
            Expression::NewClass(n) => Tree::NewClass(n),
            Expression::Binary(n) => Tree::Binary(n),
            Expression::Unary(n) => Tree::Unary(n),
            Expression::Assignment(n) => Tree::Assignment(n),
            Expression::Parentheses(n) => Tree::Parentheses(n),
        }
    }
}

fn kind_mismatch(expected: &str, found: NodeKind) -> RefactorError {
    RefactorError::malformed(format!("expected {expected}, found {found}"))
}

macro_rules! tree_into {
    ($($method:ident => $variant:ident),* $(,)?) => {
        impl Tree {
            $(
                pub fn $method(self) -> Result<Arc<$variant>> {
                    match self {
                        Tree::$variant(node) => Ok(node),
                        other => Err(kind_mismatch(NodeKind::$variant.as_str(), other.kind())),
                    }
                }
            )*
        }
    };
}

tree_into! {
    into_compilation_unit => CompilationUnit,
    into_package => Package,
    into_import => Import,
    into_class => ClassDecl,
    into_method => MethodDecl,
    into_block => Block,
    into_variables => VariableDecls,
    into_named_variable => NamedVariable,
    into_parentheses => Parentheses,
    into_identifier => Identifier,
    into_modifier => Modifier,
    into_type_tree => TypeTree,
}

/// Cursor over the child slots of a node while looking for one index
struct ChildSlot {
    skip: usize,
    child: Option<Tree>,
}

impl ChildSlot {
    /// Index into a run of `len` children if the target falls inside it
    fn within(&mut self, len: usize) -> Option<usize> {
        if self.skip < len {
            Some(self.skip)
        } else {
            self.skip -= len;
            None
        }
    }

    fn here(&mut self) -> bool {
        self.within(1).is_some()
    }

    fn take(&mut self) -> Result<Tree> {
        self.child
            .take()
            .ok_or_else(|| RefactorError::internal_error("replacement child already consumed"))
    }
}

impl Tree {
    pub fn id(&self) -> NodeId {
        self.as_node().id()
    }

    pub fn kind(&self) -> NodeKind {
        self.as_node().kind()
    }

    pub fn formatting(&self) -> &Formatting {
        each_kind!(Tree, self, n => &n.fmt)
    }

    pub fn into_statement(self) -> Result<Statement> {
        Ok(match self {
            Tree::Block(n) => Statement::Block(n),
            Tree::ClassDecl(n) => Statement::Class(n),
            Tree::MethodDecl(n) => Statement::Method(n),
            Tree::VariableDecls(n) => Statement::Variables(n),
            Tree::WhileLoop(n) => Statement::While(n),
            Tree::If(n) => Statement::If(n),
            Tree::Return(n) => Statement::Return(n),
            Tree::ExpressionStatement(n) => Statement::Expression(n),
            Tree::Empty(n) => Statement::Empty(n),
            other => return Err(kind_mismatch("statement", other.kind())),
        })
    }

    pub fn into_expression(self) -> Result<Expression> {
        Ok(match self {
            Tree::Literal(n) => Expression::Literal(n),
            Tree::Identifier(n) => Expression::Identifier(n),
            Tree::FieldAccess(n) => Expression::FieldAccess(n),
            Tree::MethodInvocation(n) => Expression::MethodInvocation(n),
            Tree::NewClass(n) => Expression::NewClass(n),
            Tree::Binary(n) => Expression::Binary(n),
            Tree::Unary(n) => Expression::Unary(n),
            Tree::Assignment(n) => Expression::Assignment(n),
            Tree::Parentheses(n) => Expression::Parentheses(n),
            other => return Err(kind_mismatch("expression", other.kind())),
        })
    }

    /// Same node with other formatting; identity is kept
    pub fn with_formatting(&self, fmt: Formatting) -> Tree {
        each_kind!(Tree, self, n => {
            let mut next = (**n).clone();
            next.fmt = fmt;
            Tree::from(next)
        })
    }

    /// Same node under a new identity
    pub fn with_fresh_id(&self) -> Tree {
        each_kind!(Tree, self, n => {
            let mut next = (**n).clone();
            next.id = NodeId::next();
            Tree::from(next)
        })
    }

    /// Copy of this node with child `index` (in [`NodeRef::children`] order)
    /// replaced
    ///
    /// Every other child is shared with `self`. The copy keeps this node's
    /// identity; callers decide whether the rebuilt node gets a fresh one.
    pub fn with_child(&self, index: usize, child: Tree) -> Result<Tree> {
        let mut slot = ChildSlot {
            skip: index,
            child: Some(child),
        };

        match self {
            Tree::CompilationUnit(n) => {
                let mut next = CompilationUnit::clone(n);
                if next.package.is_some() && slot.here() {
                    next.package = Some(slot.take()?.into_package()?);
                    return Ok(next.into());
                }
                if let Some(i) = slot.within(next.imports.len()) {
                    next.imports[i] = slot.take()?.into_import()?;
                    return Ok(next.into());
                }
                if let Some(i) = slot.within(next.classes.len()) {
                    next.classes[i] = slot.take()?.into_class()?;
                    return Ok(next.into());
                }
            }
            Tree::Package(n) => {
                if slot.here() {
                    let mut next = Package::clone(n);
                    next.name = slot.take()?.into_type_tree()?;
                    return Ok(next.into());
                }
            }
            Tree::Import(n) => {
                if slot.here() {
                    let mut next = Import::clone(n);
                    next.name = slot.take()?.into_type_tree()?;
                    return Ok(next.into());
                }
            }
            Tree::ClassDecl(n) => {
                let mut next = ClassDecl::clone(n);
                if let Some(i) = slot.within(next.modifiers.len()) {
                    next.modifiers[i] = slot.take()?.into_modifier()?;
                    return Ok(next.into());
                }
                if slot.here() {
                    next.name = slot.take()?.into_identifier()?;
                    return Ok(next.into());
                }
                if next.type_parameters.is_some() && slot.here() {
                    next.type_parameters = Some(slot.take()?.into_type_tree()?);
                    return Ok(next.into());
                }
                if replace_in_type_list(&mut next.extends, &mut slot)?
                    || replace_in_type_list(&mut next.implements, &mut slot)?
                {
                    return Ok(next.into());
                }
                if slot.here() {
                    next.body = slot.take()?.into_block()?;
                    return Ok(next.into());
                }
            }
            Tree::MethodDecl(n) => {
                let mut next = MethodDecl::clone(n);
                if let Some(i) = slot.within(next.modifiers.len()) {
                    next.modifiers[i] = slot.take()?.into_modifier()?;
                    return Ok(next.into());
                }
                if next.type_parameters.is_some() && slot.here() {
                    next.type_parameters = Some(slot.take()?.into_type_tree()?);
                    return Ok(next.into());
                }
                if next.return_type.is_some() && slot.here() {
                    next.return_type = Some(slot.take()?.into_type_tree()?);
                    return Ok(next.into());
                }
                if slot.here() {
                    next.name = slot.take()?.into_identifier()?;
                    return Ok(next.into());
                }
                if let Some(i) = slot.within(next.params.elements.len()) {
                    next.params.elements[i].element = slot.take()?.into_variables()?;
                    return Ok(next.into());
                }
                if replace_in_type_list(&mut next.throws, &mut slot)? {
                    return Ok(next.into());
                }
                if matches!(next.body, MethodBody::Block(_)) && slot.here() {
                    next.body = MethodBody::Block(slot.take()?.into_block()?);
                    return Ok(next.into());
                }
            }
            Tree::Block(n) => {
                if let Some(i) = slot.within(n.statements.len()) {
                    let mut next = Block::clone(n);
                    next.statements[i] = slot.take()?.into_statement()?;
                    return Ok(next.into());
                }
            }
            Tree::VariableDecls(n) => {
                let mut next = VariableDecls::clone(n);
                if let Some(i) = slot.within(next.modifiers.len()) {
                    next.modifiers[i] = slot.take()?.into_modifier()?;
                    return Ok(next.into());
                }
                if slot.here() {
                    next.type_expr = slot.take()?.into_type_tree()?;
                    return Ok(next.into());
                }
                if let Some(i) = slot.within(next.vars.len()) {
                    next.vars[i].element = slot.take()?.into_named_variable()?;
                    return Ok(next.into());
                }
            }
            Tree::NamedVariable(n) => {
                let mut next = NamedVariable::clone(n);
                if slot.here() {
                    next.name = slot.take()?.into_identifier()?;
                    return Ok(next.into());
                }
                if next.initializer.is_some() && slot.here() {
                    let value = slot.take()?.into_expression()?;
                    if let Some(init) = next.initializer.as_mut() {
                        init.value = value;
                    }
                    return Ok(next.into());
                }
            }
            Tree::WhileLoop(n) => {
                let mut next = WhileLoop::clone(n);
                if slot.here() {
                    next.condition = slot.take()?.into_parentheses()?;
                    return Ok(next.into());
                }
                if slot.here() {
                    next.body = slot.take()?.into_statement()?;
                    return Ok(next.into());
                }
            }
            Tree::If(n) => {
                let mut next = If::clone(n);
                if slot.here() {
                    next.condition = slot.take()?.into_parentheses()?;
                    return Ok(next.into());
                }
                if slot.here() {
                    next.then_part = slot.take()?.into_statement()?;
                    return Ok(next.into());
                }
                if next.else_part.is_some() && slot.here() {
                    let body = slot.take()?.into_statement()?;
                    if let Some(else_part) = next.else_part.as_mut() {
                        else_part.body = body;
                    }
                    return Ok(next.into());
                }
            }
            Tree::Return(n) => {
                if n.expression.is_some() && slot.here() {
                    let mut next = Return::clone(n);
                    next.expression = Some(slot.take()?.into_expression()?);
                    return Ok(next.into());
                }
            }
            Tree::ExpressionStatement(n) => {
                if slot.here() {
                    let mut next = ExpressionStatement::clone(n);
                    next.expression = slot.take()?.into_expression()?;
                    return Ok(next.into());
                }
            }
            Tree::Parentheses(n) => {
                if slot.here() {
                    let mut next = Parentheses::clone(n);
                    next.tree = slot.take()?.into_expression()?;
                    return Ok(next.into());
                }
            }
            Tree::FieldAccess(n) => {
                let mut next = FieldAccess::clone(n);
                if slot.here() {
                    next.target = slot.take()?.into_expression()?;
                    return Ok(next.into());
                }
                if slot.here() {
                    next.name = slot.take()?.into_identifier()?;
                    return Ok(next.into());
                }
            }
            Tree::MethodInvocation(n) => {
                let mut next = MethodInvocation::clone(n);
                if next.select.is_some() && slot.here() {
                    let target = slot.take()?.into_expression()?;
                    if let Some(select) = next.select.as_mut() {
                        select.element = target;
                    }
                    return Ok(next.into());
                }
                if slot.here() {
                    next.name = slot.take()?.into_identifier()?;
                    return Ok(next.into());
                }
                if let Some(i) = slot.within(next.args.elements.len()) {
                    next.args.elements[i].element = slot.take()?.into_expression()?;
                    return Ok(next.into());
                }
            }
            Tree::NewClass(n) => {
                let mut next = NewClass::clone(n);
                if slot.here() {
                    next.class = slot.take()?.into_type_tree()?;
                    return Ok(next.into());
                }
                if let Some(i) = slot.within(next.args.elements.len()) {
                    next.args.elements[i].element = slot.take()?.into_expression()?;
                    return Ok(next.into());
                }
            }
            Tree::Binary(n) => {
                let mut next = Binary::clone(n);
                if slot.here() {
                    next.left = slot.take()?.into_expression()?;
                    return Ok(next.into());
                }
                if slot.here() {
                    next.right = slot.take()?.into_expression()?;
                    return Ok(next.into());
                }
            }
            Tree::Unary(n) => {
                if slot.here() {
                    let mut next = Unary::clone(n);
                    next.operand = slot.take()?.into_expression()?;
                    return Ok(next.into());
                }
            }
            Tree::Assignment(n) => {
                let mut next = Assignment::clone(n);
                if slot.here() {
                    next.target = slot.take()?.into_expression()?;
                    return Ok(next.into());
                }
                if slot.here() {
                    next.value = slot.take()?.into_expression()?;
                    return Ok(next.into());
                }
            }
            Tree::Empty(_)
            | Tree::Literal(_)
            | Tree::Identifier(_)
            | Tree::Modifier(_)
            | Tree::TypeTree(_) => {}
        }

        Err(RefactorError::malformed(format!(
            "{} has no child at index {index}",
            self.kind()
        )))
    }
}

fn replace_in_type_list(list: &mut Option<TypeList>, slot: &mut ChildSlot) -> Result<bool> {
    let Some(list) = list.as_mut() else {
        return Ok(false);
    };
    match slot.within(list.types.len()) {
        Some(i) => {
            list.types[i].element = slot.take()?.into_type_tree()?;
            Ok(true)
        }
        None => Ok(false),
    }
}

macro_rules! reformat {
    ($enum:ident, $value:expr, $fmt:expr, [$($variant:ident),* $(,)?]) => {
        match $value {
            $($enum::$variant(n) => {
                let mut next = (**n).clone();
                next.fmt = $fmt;
                $enum::$variant(Arc::new(next))
            })*
        }
    };
}

impl Statement {
    /// Same statement with other formatting; identity is kept
    pub fn with_formatting(&self, fmt: Formatting) -> Statement {
        reformat!(
            Statement,
            self,
            fmt,
            [Block, Class, Method, Variables, While, If, Return, Expression, Empty]
        )
    }
}

impl Expression {
    /// Same expression with other formatting; identity is kept
    pub fn with_formatting(&self, fmt: Formatting) -> Expression {
        reformat!(
            Expression,
            self,
            fmt,
            [
                Literal,
                Identifier,
                FieldAccess,
                MethodInvocation,
                NewClass,
                Binary,
                Unary,
                Assignment,
                Parentheses,
            ]
        )
    }
}
