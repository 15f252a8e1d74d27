//! Node payloads of the lossless syntax tree
//!
//! Every node carries an identity and the formatting that precedes its first
//! token. Children are held behind `Arc`, so cloning a node to change one
//! child shares every other subtree with the previous version.
//!
//! By convention the whitespace before a node's first token lives on the
//! node itself, and its first child starts with an empty prefix.

use super::{Formatting, NodeId};
use std::sync::Arc;

/// An element followed by the whitespace before the separator after it
///
/// For the last element of a list `after` stays empty; the whitespace
/// before the closing delimiter or terminator is owned by the list's owner.
#[derive(Debug, Clone)]
pub struct Padded<T> {
    pub element: T,
    pub after: Formatting,
}

impl<T> Padded<T> {
    pub fn new(element: T, after: Formatting) -> Self {
        Self { element, after }
    }

    /// Element with nothing between it and the following delimiter
    pub fn tight(element: T) -> Self {
        Self {
            element,
            after: Formatting::empty(),
        }
    }
}

/// A parenthesized, comma separated list such as call arguments
#[derive(Debug, Clone)]
pub struct Container<T> {
    /// Whitespace before the opening delimiter
    pub before: Formatting,
    pub elements: Vec<Padded<T>>,
    /// Whitespace before the closing delimiter
    pub end: Formatting,
}

impl<T> Container<T> {
    pub fn empty() -> Self {
        Self {
            before: Formatting::empty(),
            elements: Vec::new(),
            end: Formatting::empty(),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.elements.iter().map(|p| &p.element)
    }
}

/// A keyword followed by a comma separated list of types
/// (`extends A`, `implements A, B`, `throws E`)
#[derive(Debug, Clone)]
pub struct TypeList {
    /// Whitespace before the keyword
    pub keyword: Formatting,
    pub types: Vec<Padded<Arc<TypeTree>>>,
}

// ============================================================================
// Compilation unit
// ============================================================================

/// Root of a parsed source file
///
/// Trivia at the end of the file is the `suffix` of the unit's formatting.
#[derive(Debug, Clone)]
pub struct CompilationUnit {
    pub id: NodeId,
    pub fmt: Formatting,
    pub package: Option<Arc<Package>>,
    pub imports: Vec<Arc<Import>>,
    pub classes: Vec<Arc<ClassDecl>>,
}

impl CompilationUnit {
    /// Top-level class with the given simple name
    pub fn class_named(&self, name: &str) -> Option<&Arc<ClassDecl>> {
        self.classes.iter().find(|c| c.name.name == name)
    }

    /// Package name without whitespace, if the unit declares one
    pub fn package_name(&self) -> Option<String> {
        self.package.as_ref().map(|p| p.name.normalized())
    }

    /// First statement of the first method of the first class
    pub fn first_method_statement(&self) -> Option<&Statement> {
        let class = self.classes.first()?;
        let method = class.methods().next()?;
        method.body_block()?.statements.first()
    }

    /// Whether an import (explicit or wildcard) already covers the type
    pub fn imports_type(&self, qualified_name: &str) -> bool {
        let package = qualified_name
            .rsplit_once('.')
            .map(|(pkg, _)| pkg)
            .unwrap_or("");
        self.imports.iter().any(|import| {
            if import.is_static() {
                return false;
            }
            let name = import.qualified_name();
            name == qualified_name
                || name
                    .strip_suffix(".*")
                    .is_some_and(|wildcard| wildcard == package)
        })
    }
}

/// `package a.b.c;`
#[derive(Debug, Clone)]
pub struct Package {
    pub id: NodeId,
    pub fmt: Formatting,
    pub name: Arc<TypeTree>,
    pub terminator: Formatting,
}

/// `import [static] a.b.C;` or `import a.b.*;`
#[derive(Debug, Clone)]
pub struct Import {
    pub id: NodeId,
    pub fmt: Formatting,
    /// Whitespace before `static`, present for static imports
    pub static_kw: Option<Formatting>,
    pub name: Arc<TypeTree>,
    pub terminator: Formatting,
}

impl Import {
    pub fn is_static(&self) -> bool {
        self.static_kw.is_some()
    }

    /// Imported name without whitespace, e.g. `java.util.List`
    pub fn qualified_name(&self) -> String {
        self.name.normalized()
    }

    pub fn is_wildcard(&self) -> bool {
        self.qualified_name().ends_with(".*")
    }

    /// Simple name brought into scope, `None` for wildcards
    pub fn simple_name(&self) -> Option<String> {
        let name = self.qualified_name();
        if name.ends_with(".*") {
            return None;
        }
        Some(
            name.rsplit_once('.')
                .map_or(name.as_str(), |(_, simple)| simple)
                .to_string(),
        )
    }
}

// ============================================================================
// Declarations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
}

impl ClassKind {
    pub fn keyword(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
        }
    }
}

/// Class or interface declaration; members live in `body`
#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub id: NodeId,
    pub fmt: Formatting,
    pub modifiers: Vec<Arc<Modifier>>,
    /// Whitespace before the `class`/`interface` keyword
    pub kind_fmt: Formatting,
    pub kind: ClassKind,
    pub name: Arc<Identifier>,
    pub type_parameters: Option<Arc<TypeTree>>,
    pub extends: Option<TypeList>,
    pub implements: Option<TypeList>,
    pub body: Arc<Block>,
}

impl ClassDecl {
    pub fn methods(&self) -> impl Iterator<Item = &Arc<MethodDecl>> {
        self.body.statements.iter().filter_map(|s| match s {
            Statement::Method(m) => Some(m),
            _ => None,
        })
    }

    pub fn fields(&self) -> impl Iterator<Item = &Arc<VariableDecls>> {
        self.body.statements.iter().filter_map(|s| match s {
            Statement::Variables(v) => Some(v),
            _ => None,
        })
    }

    pub fn method_named(&self, name: &str) -> Option<&Arc<MethodDecl>> {
        self.methods().find(|m| m.name.name == name)
    }
}

#[derive(Debug, Clone)]
pub enum MethodBody {
    Block(Arc<Block>),
    /// Abstract or interface method: whitespace before the `;`
    Abstract(Formatting),
}

/// Method or constructor declaration (constructors have no return type)
#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub id: NodeId,
    pub fmt: Formatting,
    pub modifiers: Vec<Arc<Modifier>>,
    pub type_parameters: Option<Arc<TypeTree>>,
    pub return_type: Option<Arc<TypeTree>>,
    pub name: Arc<Identifier>,
    pub params: Container<Arc<VariableDecls>>,
    pub throws: Option<TypeList>,
    pub body: MethodBody,
}

impl MethodDecl {
    pub fn is_constructor(&self) -> bool {
        self.return_type.is_none()
    }

    pub fn body_block(&self) -> Option<&Arc<Block>> {
        match &self.body {
            MethodBody::Block(block) => Some(block),
            MethodBody::Abstract(_) => None,
        }
    }
}

/// `{ statements }`
///
/// The statement sequence may be empty but is always present.
#[derive(Debug, Clone)]
pub struct Block {
    pub id: NodeId,
    pub fmt: Formatting,
    pub statements: Vec<Statement>,
    /// Whitespace before the closing brace
    pub end: Formatting,
}

impl Block {
    pub fn position_of(&self, id: NodeId) -> Option<usize> {
        self.statements.iter().position(|s| s.id() == id)
    }
}

/// Field, local variable or parameter declaration
///
/// Parameters have no terminator.
#[derive(Debug, Clone)]
pub struct VariableDecls {
    pub id: NodeId,
    pub fmt: Formatting,
    pub modifiers: Vec<Arc<Modifier>>,
    pub type_expr: Arc<TypeTree>,
    pub vars: Vec<Padded<Arc<NamedVariable>>>,
    pub terminator: Option<Formatting>,
}

impl VariableDecls {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.iter().map(|v| v.element.name.name.as_str())
    }

    pub fn has_modifier(&self, kind: ModifierKind) -> bool {
        self.modifiers.iter().any(|m| m.kind == kind)
    }
}

#[derive(Debug, Clone)]
pub struct Initializer {
    /// Whitespace before `=`
    pub eq: Formatting,
    pub value: Expression,
}

/// One declarator: `name [= value]`
#[derive(Debug, Clone)]
pub struct NamedVariable {
    pub id: NodeId,
    pub fmt: Formatting,
    pub name: Arc<Identifier>,
    pub initializer: Option<Initializer>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone)]
pub struct WhileLoop {
    pub id: NodeId,
    pub fmt: Formatting,
    pub condition: Arc<Parentheses>,
    pub body: Statement,
}

#[derive(Debug, Clone)]
pub struct Else {
    /// Whitespace before `else`
    pub keyword: Formatting,
    pub body: Statement,
}

#[derive(Debug, Clone)]
pub struct If {
    pub id: NodeId,
    pub fmt: Formatting,
    pub condition: Arc<Parentheses>,
    pub then_part: Statement,
    pub else_part: Option<Else>,
}

#[derive(Debug, Clone)]
pub struct Return {
    pub id: NodeId,
    pub fmt: Formatting,
    pub expression: Option<Expression>,
    pub terminator: Formatting,
}

#[derive(Debug, Clone)]
pub struct ExpressionStatement {
    pub id: NodeId,
    pub fmt: Formatting,
    pub expression: Expression,
    pub terminator: Formatting,
}

/// A lone `;`
#[derive(Debug, Clone)]
pub struct Empty {
    pub id: NodeId,
    pub fmt: Formatting,
}

/// Closed set of statement kinds
#[derive(Debug, Clone)]
pub enum Statement {
    Block(Arc<Block>),
    Class(Arc<ClassDecl>),
    Method(Arc<MethodDecl>),
    Variables(Arc<VariableDecls>),
    While(Arc<WhileLoop>),
    If(Arc<If>),
    Return(Arc<Return>),
    Expression(Arc<ExpressionStatement>),
    Empty(Arc<Empty>),
}

impl Statement {
    pub fn id(&self) -> NodeId {
        match self {
            Statement::Block(n) => n.id,
            Statement::Class(n) => n.id,
            Statement::Method(n) => n.id,
            Statement::Variables(n) => n.id,
            Statement::While(n) => n.id,
            Statement::If(n) => n.id,
            Statement::Return(n) => n.id,
            Statement::Expression(n) => n.id,
            Statement::Empty(n) => n.id,
        }
    }

    pub fn fmt(&self) -> &Formatting {
        match self {
            Statement::Block(n) => &n.fmt,
            Statement::Class(n) => &n.fmt,
            Statement::Method(n) => &n.fmt,
            Statement::Variables(n) => &n.fmt,
            Statement::While(n) => &n.fmt,
            Statement::If(n) => &n.fmt,
            Statement::Return(n) => &n.fmt,
            Statement::Expression(n) => &n.fmt,
            Statement::Empty(n) => &n.fmt,
        }
    }

    pub fn as_while(&self) -> Option<&Arc<WhileLoop>> {
        match self {
            Statement::While(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_variables(&self) -> Option<&Arc<VariableDecls>> {
        match self {
            Statement::Variables(v) => Some(v),
            _ => None,
        }
    }
}

// ============================================================================
// Expressions
// ============================================================================

/// Parenthesized expression; also the wrapper around control conditions,
/// so the condition carries its own formatting independent of its owner
#[derive(Debug, Clone)]
pub struct Parentheses {
    pub id: NodeId,
    pub fmt: Formatting,
    pub tree: Expression,
    /// Whitespace before `)`
    pub end: Formatting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Int,
    Long,
    Float,
    Double,
    Char,
    String,
    Boolean,
    Null,
}

/// Literal with its verbatim source text
#[derive(Debug, Clone)]
pub struct Literal {
    pub id: NodeId,
    pub fmt: Formatting,
    pub kind: LiteralKind,
    pub source: String,
}

impl Literal {
    /// Unescaped value of a string literal
    ///
    /// Decodes the simple escapes, octal escapes and `\uXXXX` escapes;
    /// surrogate pairs written as two `\u` escapes join into one character.
    pub fn string_value(&self) -> Option<String> {
        if self.kind != LiteralKind::String {
            return None;
        }
        let inner = self.source.strip_prefix('"')?.strip_suffix('"')?;
        Some(unescape(inner))
    }

    /// Java source text of a string literal with the given value
    pub fn quote(value: &str) -> String {
        let mut source = String::with_capacity(value.len() + 2);
        source.push('"');
        for c in value.chars() {
            match c {
                '"' => source.push_str("\\\""),
                '\\' => source.push_str("\\\\"),
                '\n' => source.push_str("\\n"),
                '\t' => source.push_str("\\t"),
                '\r' => source.push_str("\\r"),
                '\u{8}' => source.push_str("\\b"),
                '\u{c}' => source.push_str("\\f"),
                c if c.is_control() => {
                    for unit in c.encode_utf16(&mut [0; 2]) {
                        source.push_str(&format!("\\u{unit:04x}"));
                    }
                }
                c => source.push(c),
            }
        }
        source.push('"');
        source
    }
}

/// Decode Java escape sequences into UTF-16 units, then into a string
fn unescape(text: &str) -> String {
    fn push(units: &mut Vec<u16>, c: char) {
        units.extend_from_slice(c.encode_utf16(&mut [0; 2]));
    }

    let mut units: Vec<u16> = Vec::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            push(&mut units, c);
            continue;
        }
        let Some(escape) = chars.next() else {
            push(&mut units, '\\');
            break;
        };
        match escape {
            'b' => push(&mut units, '\u{8}'),
            't' => push(&mut units, '\t'),
            'n' => push(&mut units, '\n'),
            'f' => push(&mut units, '\u{c}'),
            'r' => push(&mut units, '\r'),
            's' => push(&mut units, ' '),
            '0'..='7' => {
                let digits = if escape <= '3' { 3 } else { 2 };
                let mut code = escape.to_digit(8).unwrap_or(0);
                for _ in 1..digits {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            code = code * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                units.push(code as u16);
            }
            'u' => {
                while chars.peek() == Some(&'u') {
                    chars.next();
                }
                let hex: String = chars.by_ref().take(4).collect();
                let unit = (hex.len() == 4 && hex.chars().all(|h| h.is_ascii_hexdigit()))
                    .then(|| u16::from_str_radix(&hex, 16).ok())
                    .flatten();
                match unit {
                    Some(unit) => units.push(unit),
                    None => {
                        push(&mut units, 'u');
                        hex.chars().for_each(|h| push(&mut units, h));
                    }
                }
            }
            other => push(&mut units, other),
        }
    }

    String::from_utf16_lossy(&units)
}

#[derive(Debug, Clone)]
pub struct Identifier {
    pub id: NodeId,
    pub fmt: Formatting,
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>, fmt: Formatting) -> Self {
        Self {
            id: NodeId::next(),
            fmt,
            name: name.into(),
        }
    }
}

/// `target.name`
#[derive(Debug, Clone)]
pub struct FieldAccess {
    pub id: NodeId,
    pub fmt: Formatting,
    pub target: Expression,
    /// Whitespace before `.`
    pub dot: Formatting,
    pub name: Arc<Identifier>,
}

/// `[select.]name(args)`; the padding of `select` is the whitespace before `.`
#[derive(Debug, Clone)]
pub struct MethodInvocation {
    pub id: NodeId,
    pub fmt: Formatting,
    pub select: Option<Padded<Expression>>,
    pub name: Arc<Identifier>,
    pub args: Container<Expression>,
}

/// `new Type(args)`
#[derive(Debug, Clone)]
pub struct NewClass {
    pub id: NodeId,
    pub fmt: Formatting,
    pub class: Arc<TypeTree>,
    pub args: Container<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEq,
    GreaterEq,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::BitAnd => "&",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessEq => "<=",
            BinaryOp::GreaterEq => ">=",
            BinaryOp::ShiftLeft => "<<",
            BinaryOp::ShiftRight => ">>",
            BinaryOp::UnsignedShiftRight => ">>>",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        }
    }

    pub fn from_token(text: &str) -> Option<Self> {
        Some(match text {
            "||" => BinaryOp::Or,
            "&&" => BinaryOp::And,
            "|" => BinaryOp::BitOr,
            "^" => BinaryOp::BitXor,
            "&" => BinaryOp::BitAnd,
            "==" => BinaryOp::Equal,
            "!=" => BinaryOp::NotEqual,
            "<" => BinaryOp::Less,
            ">" => BinaryOp::Greater,
            "<=" => BinaryOp::LessEq,
            ">=" => BinaryOp::GreaterEq,
            "<<" => BinaryOp::ShiftLeft,
            ">>" => BinaryOp::ShiftRight,
            ">>>" => BinaryOp::UnsignedShiftRight,
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "%" => BinaryOp::Mod,
            _ => return None,
        })
    }

    /// Binding power, higher binds tighter
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::BitOr => 3,
            BinaryOp::BitXor => 4,
            BinaryOp::BitAnd => 5,
            BinaryOp::Equal | BinaryOp::NotEqual => 6,
            BinaryOp::Less | BinaryOp::Greater | BinaryOp::LessEq | BinaryOp::GreaterEq => 7,
            BinaryOp::ShiftLeft | BinaryOp::ShiftRight | BinaryOp::UnsignedShiftRight => 8,
            BinaryOp::Add | BinaryOp::Sub => 9,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Binary {
    pub id: NodeId,
    pub fmt: Formatting,
    pub left: Expression,
    /// Whitespace before the operator
    pub op_fmt: Formatting,
    pub op: BinaryOp,
    pub right: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Negate,
    Plus,
    Complement,
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Negate => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Complement => "~",
            UnaryOp::PreIncrement | UnaryOp::PostIncrement => "++",
            UnaryOp::PreDecrement | UnaryOp::PostDecrement => "--",
        }
    }

    pub fn is_postfix(self) -> bool {
        matches!(self, UnaryOp::PostIncrement | UnaryOp::PostDecrement)
    }
}

/// Prefix or postfix unary expression
///
/// `op_fmt` is the whitespace between operand and a postfix operator; prefix
/// operators are the first token, so their whitespace is the node's prefix.
#[derive(Debug, Clone)]
pub struct Unary {
    pub id: NodeId,
    pub fmt: Formatting,
    pub op: UnaryOp,
    pub op_fmt: Formatting,
    pub operand: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShiftLeftAssign,
    ShiftRightAssign,
    UnsignedShiftRightAssign,
}

impl AssignOp {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
            AssignOp::ModAssign => "%=",
            AssignOp::AndAssign => "&=",
            AssignOp::OrAssign => "|=",
            AssignOp::XorAssign => "^=",
            AssignOp::ShiftLeftAssign => "<<=",
            AssignOp::ShiftRightAssign => ">>=",
            AssignOp::UnsignedShiftRightAssign => ">>>=",
        }
    }

    pub fn from_token(text: &str) -> Option<Self> {
        Some(match text {
            "=" => AssignOp::Assign,
            "+=" => AssignOp::AddAssign,
            "-=" => AssignOp::SubAssign,
            "*=" => AssignOp::MulAssign,
            "/=" => AssignOp::DivAssign,
            "%=" => AssignOp::ModAssign,
            "&=" => AssignOp::AndAssign,
            "|=" => AssignOp::OrAssign,
            "^=" => AssignOp::XorAssign,
            "<<=" => AssignOp::ShiftLeftAssign,
            ">>=" => AssignOp::ShiftRightAssign,
            ">>>=" => AssignOp::UnsignedShiftRightAssign,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Assignment {
    pub id: NodeId,
    pub fmt: Formatting,
    pub target: Expression,
    /// Whitespace before the operator
    pub op_fmt: Formatting,
    pub op: AssignOp,
    pub value: Expression,
}

/// Closed set of expression kinds
#[derive(Debug, Clone)]
pub enum Expression {
    Literal(Arc<Literal>),
    Identifier(Arc<Identifier>),
    FieldAccess(Arc<FieldAccess>),
    MethodInvocation(Arc<MethodInvocation>),
    NewClass(Arc<NewClass>),
    Binary(Arc<Binary>),
    Unary(Arc<Unary>),
    Assignment(Arc<Assignment>),
    Parentheses(Arc<Parentheses>),
}

impl Expression {
    pub fn id(&self) -> NodeId {
        match self {
            Expression::Literal(n) => n.id,
            Expression::Identifier(n) => n.id,
            Expression::FieldAccess(n) => n.id,
            Expression::MethodInvocation(n) => n.id,
            Expression::NewClass(n) => n.id,
            Expression::Binary(n) => n.id,
            Expression::Unary(n) => n.id,
            Expression::Assignment(n) => n.id,
            Expression::Parentheses(n) => n.id,
        }
    }

    pub fn fmt(&self) -> &Formatting {
        match self {
            Expression::Literal(n) => &n.fmt,
            Expression::Identifier(n) => &n.fmt,
            Expression::FieldAccess(n) => &n.fmt,
            Expression::MethodInvocation(n) => &n.fmt,
            Expression::NewClass(n) => &n.fmt,
            Expression::Binary(n) => &n.fmt,
            Expression::Unary(n) => &n.fmt,
            Expression::Assignment(n) => &n.fmt,
            Expression::Parentheses(n) => &n.fmt,
        }
    }

    pub fn as_literal(&self) -> Option<&Arc<Literal>> {
        match self {
            Expression::Literal(l) => Some(l),
            _ => None,
        }
    }
}

// ============================================================================
// Leaves
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKind {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Abstract,
    Synchronized,
    Native,
    Transient,
    Volatile,
    Strictfp,
    Default,
}

impl ModifierKind {
    pub fn keyword(self) -> &'static str {
        match self {
            ModifierKind::Public => "public",
            ModifierKind::Protected => "protected",
            ModifierKind::Private => "private",
            ModifierKind::Static => "static",
            ModifierKind::Final => "final",
            ModifierKind::Abstract => "abstract",
            ModifierKind::Synchronized => "synchronized",
            ModifierKind::Native => "native",
            ModifierKind::Transient => "transient",
            ModifierKind::Volatile => "volatile",
            ModifierKind::Strictfp => "strictfp",
            ModifierKind::Default => "default",
        }
    }

    pub fn from_keyword(text: &str) -> Option<Self> {
        Some(match text {
            "public" => ModifierKind::Public,
            "protected" => ModifierKind::Protected,
            "private" => ModifierKind::Private,
            "static" => ModifierKind::Static,
            "final" => ModifierKind::Final,
            "abstract" => ModifierKind::Abstract,
            "synchronized" => ModifierKind::Synchronized,
            "native" => ModifierKind::Native,
            "transient" => ModifierKind::Transient,
            "volatile" => ModifierKind::Volatile,
            "strictfp" => ModifierKind::Strictfp,
            "default" => ModifierKind::Default,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Modifier {
    pub id: NodeId,
    pub fmt: Formatting,
    pub kind: ModifierKind,
}

impl Modifier {
    pub fn new(kind: ModifierKind, fmt: Formatting) -> Self {
        Self {
            id: NodeId::next(),
            fmt,
            kind,
        }
    }
}

/// A type reference or qualified name kept as verbatim source text,
/// generic arguments and array dimensions included
#[derive(Debug, Clone)]
pub struct TypeTree {
    pub id: NodeId,
    pub fmt: Formatting,
    pub text: String,
}

impl TypeTree {
    pub fn new(text: impl Into<String>, fmt: Formatting) -> Self {
        Self {
            id: NodeId::next(),
            fmt,
            text: text.into(),
        }
    }

    /// Text with all whitespace removed
    pub fn normalized(&self) -> String {
        self.text.chars().filter(|c| !c.is_whitespace()).collect()
    }

    /// Name without package qualification or type arguments
    pub fn simple_name(&self) -> String {
        let normalized = self.normalized();
        let base = normalized.split(['<', '[']).next().unwrap_or("");
        base.rsplit('.').next().unwrap_or(base).to_string()
    }
}
