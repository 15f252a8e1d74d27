//! Recursive-descent parser over the trivia-carrying token stream
//!
//! Every node takes the prefix of its first token with [`Parser::take_prefix`];
//! children that start on the same token then find an empty prefix, which is
//! how the first child of a node ends up with no formatting of its own.

use super::ParseError;
use super::lexer::{Token, TokenKind, lex};
use crate::lst::*;
use crate::result::Result;
use std::sync::Arc;

type PResult<T> = std::result::Result<T, ParseError>;

/// Words that can never name a type or variable
const RESERVED: &[&str] = &[
    "package", "import", "class", "interface", "extends", "implements", "throws", "return",
    "new", "while", "if", "else", "for", "do", "switch", "case", "try", "catch", "finally",
    "throw", "break", "continue", "instanceof", "true", "false", "null", "public", "protected",
    "private", "static", "final", "abstract", "synchronized", "native", "transient",
    "volatile", "strictfp", "default", "enum",
];

/// Deepest nesting of statements, expressions and member classes accepted
const MAX_NESTING: usize = 200;

fn is_reserved(word: &str) -> bool {
    RESERVED.contains(&word)
}

/// Parse a whole source file
pub fn parse_compilation_unit(source: &str) -> Result<Arc<CompilationUnit>> {
    let mut parser = Parser::new(source)?;
    let unit = parser.compilation_unit()?;
    tracing::debug!(
        imports = unit.imports.len(),
        classes = unit.classes.len(),
        "Parsed compilation unit"
    );
    Ok(Arc::new(unit))
}

/// Parse one statement; trailing trivia becomes the statement's suffix
pub fn parse_statement(source: &str) -> Result<Statement> {
    let mut parser = Parser::new(source)?;
    let statement = parser.statement()?;
    let trailing = parser.finish()?;
    if trailing.is_empty() {
        return Ok(statement);
    }
    let fmt = statement.fmt().with_suffix(trailing);
    Ok(statement.with_formatting(fmt))
}

/// Parse one expression; trailing trivia becomes the expression's suffix
pub fn parse_expression(source: &str) -> Result<Expression> {
    let mut parser = Parser::new(source)?;
    let expression = parser.expression()?;
    let trailing = parser.finish()?;
    if trailing.is_empty() {
        return Ok(expression);
    }
    let fmt = expression.fmt().with_suffix(trailing);
    Ok(expression.with_formatting(fmt))
}

/// Give `expr` the prefix taken for it, rebuilding only when non-empty
fn finish(expr: Expression, fmt: Formatting) -> Expression {
    if fmt.prefix.is_empty() {
        expr
    } else {
        expr.with_formatting(fmt)
    }
}

struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str) -> PResult<Self> {
        Ok(Self {
            source,
            tokens: lex(source)?,
            pos: 0,
            depth: 0,
        })
    }

    // ------------------------------------------------------------------
    // Token cursor
    // ------------------------------------------------------------------

    fn last_index(&self) -> usize {
        self.tokens.len().saturating_sub(1)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.last_index())]
    }

    fn peek_at(&self, n: usize) -> &Token {
        &self.tokens[(self.pos + n).min(self.last_index())]
    }

    fn token_at(&self, i: usize) -> &Token {
        &self.tokens[i.min(self.last_index())]
    }

    fn at(&self, text: &str) -> bool {
        self.peek().is(text)
    }

    fn at_eof(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn at_word(&self) -> bool {
        self.peek().kind == TokenKind::Word
    }

    /// Move the current token's prefix out of the stream
    fn take_prefix(&mut self) -> Formatting {
        let i = self.pos.min(self.last_index());
        Formatting::parsed(std::mem::take(&mut self.tokens[i].prefix))
    }

    /// Consume the current token, returning its prefix
    fn bump_fmt(&mut self) -> Formatting {
        let fmt = self.take_prefix();
        if self.pos < self.last_index() {
            self.pos += 1;
        }
        fmt
    }

    fn expect(&mut self, text: &str) -> PResult<Formatting> {
        if self.at(text) {
            Ok(self.bump_fmt())
        } else {
            Err(self.error(&format!("expected '{text}'")))
        }
    }

    fn error(&self, message: &str) -> ParseError {
        let token = self.peek();
        let found = if token.kind == TokenKind::Eof {
            "end of input".to_string()
        } else {
            format!("'{}'", token.text)
        };
        ParseError::new(format!("{message}, found {found}"), token.range)
    }

    /// Run `parse` one nesting level deeper, refusing input nested past
    /// [`MAX_NESTING`]
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(&format!("nesting deeper than {MAX_NESTING} levels")));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Source text from the start of token `first` to the end of the last
    /// consumed token
    fn slice_from(&self, first: usize) -> String {
        let start = usize::from(self.token_at(first).range.start());
        let end = usize::from(self.token_at(self.pos.saturating_sub(1)).range.end());
        self.source[start..end.max(start)].to_string()
    }

    /// Require end of input and return the trailing trivia
    fn finish(&mut self) -> PResult<String> {
        if !self.at_eof() {
            return Err(self.error("unexpected trailing input"));
        }
        Ok(self.take_prefix().prefix)
    }

    // ------------------------------------------------------------------
    // File level
    // ------------------------------------------------------------------

    fn compilation_unit(&mut self) -> PResult<CompilationUnit> {
        let package = if self.at("package") {
            Some(Arc::new(self.package()?))
        } else {
            None
        };

        let mut imports = Vec::new();
        while self.at("import") {
            imports.push(Arc::new(self.import()?));
        }

        let mut classes = Vec::new();
        while !self.at_eof() {
            classes.push(Arc::new(self.class_decl()?));
        }

        let trailing = self.take_prefix().prefix;
        Ok(CompilationUnit {
            id: NodeId::next(),
            fmt: Formatting::empty().with_suffix(trailing),
            package,
            imports,
            classes,
        })
    }

    fn package(&mut self) -> PResult<Package> {
        let fmt = self.bump_fmt();
        let name = Arc::new(self.qualified_name(false)?);
        let terminator = self.expect(";")?;
        Ok(Package {
            id: NodeId::next(),
            fmt,
            name,
            terminator,
        })
    }

    fn import(&mut self) -> PResult<Import> {
        let fmt = self.bump_fmt();
        let static_kw = if self.at("static") {
            Some(self.bump_fmt())
        } else {
            None
        };
        let name = Arc::new(self.qualified_name(true)?);
        let terminator = self.expect(";")?;
        Ok(Import {
            id: NodeId::next(),
            fmt,
            static_kw,
            name,
            terminator,
        })
    }

    fn qualified_name(&mut self, allow_wildcard: bool) -> PResult<TypeTree> {
        if !self.at_word() {
            return Err(self.error("expected name"));
        }
        let fmt = self.take_prefix();
        let first = self.pos;
        self.pos += 1;

        while self.at(".") {
            let next = self.peek_at(1);
            if next.kind == TokenKind::Word {
                self.pos += 2;
            } else if allow_wildcard && next.is("*") {
                self.pos += 2;
                break;
            } else {
                break;
            }
        }

        Ok(TypeTree {
            id: NodeId::next(),
            fmt,
            text: self.slice_from(first),
        })
    }

    // ------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------

    fn modifiers(&mut self) -> Vec<Arc<Modifier>> {
        let mut modifiers = Vec::new();
        while self.at_word() {
            let Some(kind) = ModifierKind::from_keyword(&self.peek().text) else {
                break;
            };
            let fmt = self.bump_fmt();
            modifiers.push(Arc::new(Modifier {
                id: NodeId::next(),
                fmt,
                kind,
            }));
        }
        modifiers
    }

    fn class_decl(&mut self) -> PResult<ClassDecl> {
        let fmt = self.take_prefix();
        let modifiers = self.modifiers();
        self.class_rest(fmt, modifiers)
    }

    fn class_rest(&mut self, fmt: Formatting, modifiers: Vec<Arc<Modifier>>) -> PResult<ClassDecl> {
        let kind = if self.at("class") {
            ClassKind::Class
        } else if self.at("interface") {
            ClassKind::Interface
        } else {
            return Err(self.error("expected 'class' or 'interface'"));
        };
        let kind_fmt = self.bump_fmt();
        let name = Arc::new(self.identifier()?);
        let type_parameters = if self.at("<") {
            Some(Arc::new(self.type_parameters()?))
        } else {
            None
        };
        let extends = if self.at("extends") {
            Some(self.type_list()?)
        } else {
            None
        };
        let implements = if self.at("implements") {
            Some(self.type_list()?)
        } else {
            None
        };
        let body = Arc::new(self.class_body()?);

        Ok(ClassDecl {
            id: NodeId::next(),
            fmt,
            modifiers,
            kind_fmt,
            kind,
            name,
            type_parameters,
            extends,
            implements,
            body,
        })
    }

    fn class_body(&mut self) -> PResult<Block> {
        let fmt = self.take_prefix();
        self.expect("{")?;
        let mut statements = Vec::new();
        while !self.at("}") {
            if self.at_eof() {
                return Err(self.error("expected '}'"));
            }
            statements.push(self.nested(Self::member)?);
        }
        let end = self.expect("}")?;
        Ok(Block {
            id: NodeId::next(),
            fmt,
            statements,
            end,
        })
    }

    /// Field, method, constructor, nested class, initializer block or `;`
    fn member(&mut self) -> PResult<Statement> {
        if self.at(";") {
            return Ok(Statement::Empty(Arc::new(Empty {
                id: NodeId::next(),
                fmt: self.bump_fmt(),
            })));
        }
        if self.at("{") {
            return Ok(Statement::Block(Arc::new(self.block()?)));
        }

        let fmt = self.take_prefix();
        let modifiers = self.modifiers();
        if self.at("class") || self.at("interface") {
            return Ok(Statement::Class(Arc::new(self.class_rest(fmt, modifiers)?)));
        }

        let type_parameters = if self.at("<") {
            Some(Arc::new(self.type_parameters()?))
        } else {
            None
        };

        if self.at_word() && self.peek_at(1).is("(") {
            let name = Arc::new(self.identifier()?);
            let method = self.method_rest(fmt, modifiers, type_parameters, None, name)?;
            return Ok(Statement::Method(Arc::new(method)));
        }

        let type_expr = Arc::new(self.type_ref()?);
        if self.peek_at(1).is("(") {
            let name = Arc::new(self.identifier()?);
            let method =
                self.method_rest(fmt, modifiers, type_parameters, Some(type_expr), name)?;
            return Ok(Statement::Method(Arc::new(method)));
        }
        if type_parameters.is_some() {
            return Err(self.error("expected method declaration after type parameters"));
        }

        let variables = self.variables_rest(fmt, modifiers, type_expr)?;
        Ok(Statement::Variables(Arc::new(variables)))
    }

    fn method_rest(
        &mut self,
        fmt: Formatting,
        modifiers: Vec<Arc<Modifier>>,
        type_parameters: Option<Arc<TypeTree>>,
        return_type: Option<Arc<TypeTree>>,
        name: Arc<Identifier>,
    ) -> PResult<MethodDecl> {
        let params = self.parameters()?;
        let throws = if self.at("throws") {
            Some(self.type_list()?)
        } else {
            None
        };
        let body = if self.at(";") {
            MethodBody::Abstract(self.bump_fmt())
        } else {
            MethodBody::Block(Arc::new(self.block()?))
        };

        Ok(MethodDecl {
            id: NodeId::next(),
            fmt,
            modifiers,
            type_parameters,
            return_type,
            name,
            params,
            throws,
            body,
        })
    }

    fn parameters(&mut self) -> PResult<Container<Arc<VariableDecls>>> {
        let before = self.take_prefix();
        self.expect("(")?;
        let mut elements = Vec::new();

        if self.at(")") {
            let end = self.bump_fmt();
            return Ok(Container {
                before,
                elements,
                end,
            });
        }

        loop {
            let fmt = self.take_prefix();
            let modifiers = self.modifiers();
            let type_expr = Arc::new(self.type_ref()?);
            let var = Arc::new(self.named_variable(false)?);
            let param = Arc::new(VariableDecls {
                id: NodeId::next(),
                fmt,
                modifiers,
                type_expr,
                vars: vec![Padded::tight(var)],
                terminator: None,
            });

            if self.at(",") {
                let after = self.bump_fmt();
                elements.push(Padded::new(param, after));
            } else {
                elements.push(Padded::tight(param));
                let end = self.expect(")")?;
                return Ok(Container {
                    before,
                    elements,
                    end,
                });
            }
        }
    }

    fn variables_rest(
        &mut self,
        fmt: Formatting,
        modifiers: Vec<Arc<Modifier>>,
        type_expr: Arc<TypeTree>,
    ) -> PResult<VariableDecls> {
        let mut vars = Vec::new();
        loop {
            let var = Arc::new(self.named_variable(true)?);
            if self.at(",") {
                let after = self.bump_fmt();
                vars.push(Padded::new(var, after));
            } else {
                vars.push(Padded::tight(var));
                break;
            }
        }
        let terminator = Some(self.expect(";")?);

        Ok(VariableDecls {
            id: NodeId::next(),
            fmt,
            modifiers,
            type_expr,
            vars,
            terminator,
        })
    }

    fn named_variable(&mut self, allow_initializer: bool) -> PResult<NamedVariable> {
        let fmt = self.take_prefix();
        let name = Arc::new(self.identifier()?);
        let initializer = if allow_initializer && self.at("=") {
            let eq = self.bump_fmt();
            let value = self.expression()?;
            Some(Initializer { eq, value })
        } else {
            None
        };
        Ok(NamedVariable {
            id: NodeId::next(),
            fmt,
            name,
            initializer,
        })
    }

    fn identifier(&mut self) -> PResult<Identifier> {
        if !self.at_word() || is_reserved(&self.peek().text) {
            return Err(self.error("expected identifier"));
        }
        let name = self.peek().text.clone();
        Ok(Identifier {
            id: NodeId::next(),
            fmt: self.bump_fmt(),
            name,
        })
    }

    // ------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------

    /// A type reference: qualified name, type arguments, array dimensions
    /// and varargs, kept verbatim
    fn type_ref(&mut self) -> PResult<TypeTree> {
        if !self.at_word() || is_reserved(&self.peek().text) {
            return Err(self.error("expected type"));
        }
        let fmt = self.take_prefix();
        let first = self.pos;
        self.pos += 1;

        while self.at(".") && self.peek_at(1).kind == TokenKind::Word {
            self.pos += 2;
        }
        if self.at("<") {
            self.skip_angles()?;
        }
        while self.at("[") && self.peek_at(1).is("]") {
            self.pos += 2;
        }
        if self.at("...") {
            self.pos += 1;
        }

        Ok(TypeTree {
            id: NodeId::next(),
            fmt,
            text: self.slice_from(first),
        })
    }

    fn type_parameters(&mut self) -> PResult<TypeTree> {
        let fmt = self.take_prefix();
        let first = self.pos;
        self.skip_angles()?;
        Ok(TypeTree {
            id: NodeId::next(),
            fmt,
            text: self.slice_from(first),
        })
    }

    /// Consume a balanced `<...>` group; `>>` closes two levels
    fn skip_angles(&mut self) -> PResult<()> {
        let mut depth = 0i32;
        loop {
            let token = self.peek();
            if token.kind == TokenKind::Eof || token.is(";") || token.is("{") || token.is("(") {
                return Err(self.error("unbalanced type arguments"));
            }
            if token.kind == TokenKind::Punct {
                depth += token.text.matches('<').count() as i32;
                depth -= token.text.matches('>').count() as i32;
            }
            self.pos += 1;
            if depth <= 0 {
                return Ok(());
            }
        }
    }

    fn type_list(&mut self) -> PResult<TypeList> {
        let keyword = self.bump_fmt();
        let mut types = Vec::new();
        loop {
            let ty = Arc::new(self.type_ref()?);
            if self.at(",") {
                let after = self.bump_fmt();
                types.push(Padded::new(ty, after));
            } else {
                types.push(Padded::tight(ty));
                return Ok(TypeList { keyword, types });
            }
        }
    }

    /// Index after a type starting at token `i`, scanning without consuming
    fn scan_type(&self, mut i: usize) -> Option<usize> {
        let first = self.token_at(i);
        if first.kind != TokenKind::Word || is_reserved(&first.text) {
            return None;
        }
        i += 1;
        while self.token_at(i).is(".") && self.token_at(i + 1).kind == TokenKind::Word {
            i += 2;
        }
        if self.token_at(i).is("<") {
            let mut depth = 0i32;
            loop {
                let token = self.token_at(i);
                match token.kind {
                    TokenKind::Word => {}
                    TokenKind::Punct
                        if token.text.chars().all(|c| {
                            matches!(c, '<' | '>' | ',' | '.' | '?' | '[' | ']' | '&')
                        }) =>
                    {
                        depth += token.text.matches('<').count() as i32;
                        depth -= token.text.matches('>').count() as i32;
                    }
                    _ => return None,
                }
                i += 1;
                if depth <= 0 {
                    break;
                }
            }
        }
        while self.token_at(i).is("[") && self.token_at(i + 1).is("]") {
            i += 2;
        }
        Some(i)
    }

    /// `Type name =`, `Type name;` or `Type name,` ahead
    fn looks_like_local_variable(&self) -> bool {
        let Some(j) = self.scan_type(self.pos) else {
            return false;
        };
        let name = self.token_at(j);
        name.kind == TokenKind::Word
            && !is_reserved(&name.text)
            && ["=", ";", ","]
                .iter()
                .any(|t| self.token_at(j + 1).is(t))
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    fn block(&mut self) -> PResult<Block> {
        let fmt = self.take_prefix();
        self.expect("{")?;
        let mut statements = Vec::new();
        while !self.at("}") {
            if self.at_eof() {
                return Err(self.error("expected '}'"));
            }
            statements.push(self.statement()?);
        }
        let end = self.expect("}")?;
        Ok(Block {
            id: NodeId::next(),
            fmt,
            statements,
            end,
        })
    }

    fn statement(&mut self) -> PResult<Statement> {
        self.nested(Self::single_statement)
    }

    fn single_statement(&mut self) -> PResult<Statement> {
        if self.at("{") {
            return Ok(Statement::Block(Arc::new(self.block()?)));
        }
        if self.at(";") {
            return Ok(Statement::Empty(Arc::new(Empty {
                id: NodeId::next(),
                fmt: self.bump_fmt(),
            })));
        }
        if self.at("while") {
            let fmt = self.bump_fmt();
            let condition = Arc::new(self.parentheses()?);
            let body = self.statement()?;
            return Ok(Statement::While(Arc::new(WhileLoop {
                id: NodeId::next(),
                fmt,
                condition,
                body,
            })));
        }
        if self.at("if") {
            return Ok(Statement::If(Arc::new(self.if_statement()?)));
        }
        if self.at("return") {
            let fmt = self.bump_fmt();
            let expression = if self.at(";") {
                None
            } else {
                Some(self.expression()?)
            };
            let terminator = self.expect(";")?;
            return Ok(Statement::Return(Arc::new(Return {
                id: NodeId::next(),
                fmt,
                expression,
                terminator,
            })));
        }

        let starts_with_modifier =
            self.at_word() && ModifierKind::from_keyword(&self.peek().text).is_some();
        if starts_with_modifier || self.at("class") || self.at("interface") {
            let fmt = self.take_prefix();
            let modifiers = self.modifiers();
            if self.at("class") || self.at("interface") {
                return Ok(Statement::Class(Arc::new(self.class_rest(fmt, modifiers)?)));
            }
            let type_expr = Arc::new(self.type_ref()?);
            let variables = self.variables_rest(fmt, modifiers, type_expr)?;
            return Ok(Statement::Variables(Arc::new(variables)));
        }

        if self.looks_like_local_variable() {
            let fmt = self.take_prefix();
            let type_expr = Arc::new(self.type_ref()?);
            let variables = self.variables_rest(fmt, Vec::new(), type_expr)?;
            return Ok(Statement::Variables(Arc::new(variables)));
        }

        let fmt = self.take_prefix();
        let expression = self.expression()?;
        let terminator = self.expect(";")?;
        Ok(Statement::Expression(Arc::new(ExpressionStatement {
            id: NodeId::next(),
            fmt,
            expression,
            terminator,
        })))
    }

    fn if_statement(&mut self) -> PResult<If> {
        let fmt = self.bump_fmt();
        let condition = Arc::new(self.parentheses()?);
        let then_part = self.statement()?;
        let else_part = if self.at("else") {
            let keyword = self.bump_fmt();
            let body = self.statement()?;
            Some(Else { keyword, body })
        } else {
            None
        };
        Ok(If {
            id: NodeId::next(),
            fmt,
            condition,
            then_part,
            else_part,
        })
    }

    fn parentheses(&mut self) -> PResult<Parentheses> {
        let fmt = self.take_prefix();
        self.expect("(")?;
        let tree = self.expression()?;
        let end = self.expect(")")?;
        Ok(Parentheses {
            id: NodeId::next(),
            fmt,
            tree,
            end,
        })
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    fn expression(&mut self) -> PResult<Expression> {
        self.nested(Self::assignment)
    }

    /// Right-associative assignment over a binary expression
    fn assignment(&mut self) -> PResult<Expression> {
        let fmt = self.take_prefix();
        let target = self.binary(1)?;

        let op = match self.peek().kind {
            TokenKind::Punct => AssignOp::from_token(&self.peek().text),
            _ => None,
        };
        let Some(op) = op else {
            return Ok(finish(target, fmt));
        };

        let op_fmt = self.bump_fmt();
        let value = self.expression()?;
        let assignment = Expression::Assignment(Arc::new(Assignment {
            id: NodeId::next(),
            fmt: Formatting::empty(),
            target,
            op_fmt,
            op,
            value,
        }));
        Ok(finish(assignment, fmt))
    }

    fn peek_binary_op(&self) -> Option<BinaryOp> {
        match self.peek().kind {
            TokenKind::Punct => BinaryOp::from_token(&self.peek().text),
            _ => None,
        }
    }

    /// Precedence climbing over left-associative binary operators
    fn binary(&mut self, min_precedence: u8) -> PResult<Expression> {
        let fmt = self.take_prefix();
        let mut left = self.unary()?;

        while let Some(op) = self.peek_binary_op() {
            if op.precedence() < min_precedence {
                break;
            }
            let op_fmt = self.bump_fmt();
            let right = self.binary(op.precedence() + 1)?;
            left = Expression::Binary(Arc::new(Binary {
                id: NodeId::next(),
                fmt: Formatting::empty(),
                left,
                op_fmt,
                op,
                right,
            }));
        }

        Ok(finish(left, fmt))
    }

    fn unary(&mut self) -> PResult<Expression> {
        let op = match (self.peek().kind, self.peek().text.as_str()) {
            (TokenKind::Punct, "!") => Some(UnaryOp::Not),
            (TokenKind::Punct, "-") => Some(UnaryOp::Negate),
            (TokenKind::Punct, "+") => Some(UnaryOp::Plus),
            (TokenKind::Punct, "~") => Some(UnaryOp::Complement),
            (TokenKind::Punct, "++") => Some(UnaryOp::PreIncrement),
            (TokenKind::Punct, "--") => Some(UnaryOp::PreDecrement),
            _ => None,
        };

        let Some(op) = op else {
            return self.postfix();
        };
        let fmt = self.bump_fmt();
        let operand = self.nested(Self::unary)?;
        Ok(Expression::Unary(Arc::new(Unary {
            id: NodeId::next(),
            fmt,
            op,
            op_fmt: Formatting::empty(),
            operand,
        })))
    }

    fn postfix(&mut self) -> PResult<Expression> {
        let fmt = self.take_prefix();
        let mut expr = self.primary()?;

        loop {
            if self.at(".") && self.peek_at(1).kind == TokenKind::Word {
                let dot = self.bump_fmt();
                let name = Arc::new(self.identifier()?);
                expr = if self.at("(") {
                    let args = self.arguments()?;
                    Expression::MethodInvocation(Arc::new(MethodInvocation {
                        id: NodeId::next(),
                        fmt: Formatting::empty(),
                        select: Some(Padded::new(expr, dot)),
                        name,
                        args,
                    }))
                } else {
                    Expression::FieldAccess(Arc::new(FieldAccess {
                        id: NodeId::next(),
                        fmt: Formatting::empty(),
                        target: expr,
                        dot,
                        name,
                    }))
                };
            } else if self.at("++") || self.at("--") {
                let op = if self.at("++") {
                    UnaryOp::PostIncrement
                } else {
                    UnaryOp::PostDecrement
                };
                let op_fmt = self.bump_fmt();
                expr = Expression::Unary(Arc::new(Unary {
                    id: NodeId::next(),
                    fmt: Formatting::empty(),
                    op,
                    op_fmt,
                    operand: expr,
                }));
            } else {
                break;
            }
        }

        Ok(finish(expr, fmt))
    }

    fn primary(&mut self) -> PResult<Expression> {
        let token = self.peek();
        let literal_kind = match token.kind {
            TokenKind::Int => Some(LiteralKind::Int),
            TokenKind::Long => Some(LiteralKind::Long),
            TokenKind::Float => Some(LiteralKind::Float),
            TokenKind::Double => Some(LiteralKind::Double),
            TokenKind::Char => Some(LiteralKind::Char),
            TokenKind::Str => Some(LiteralKind::String),
            TokenKind::Word if token.text == "true" || token.text == "false" => {
                Some(LiteralKind::Boolean)
            }
            TokenKind::Word if token.text == "null" => Some(LiteralKind::Null),
            _ => None,
        };

        if let Some(kind) = literal_kind {
            let source = token.text.clone();
            return Ok(Expression::Literal(Arc::new(Literal {
                id: NodeId::next(),
                fmt: self.bump_fmt(),
                kind,
                source,
            })));
        }

        if self.at("(") {
            return Ok(Expression::Parentheses(Arc::new(self.parentheses()?)));
        }

        if self.at("new") {
            let fmt = self.bump_fmt();
            let class = Arc::new(self.type_ref()?);
            let args = self.arguments()?;
            return Ok(Expression::NewClass(Arc::new(NewClass {
                id: NodeId::next(),
                fmt,
                class,
                args,
            })));
        }

        if self.at_word() && !is_reserved(&self.peek().text) {
            if self.peek_at(1).is("(") {
                let fmt = self.take_prefix();
                let name = Arc::new(self.identifier()?);
                let args = self.arguments()?;
                return Ok(Expression::MethodInvocation(Arc::new(MethodInvocation {
                    id: NodeId::next(),
                    fmt,
                    select: None,
                    name,
                    args,
                })));
            }
            return Ok(Expression::Identifier(Arc::new(self.identifier()?)));
        }

        Err(self.error("expected expression"))
    }

    fn arguments(&mut self) -> PResult<Container<Expression>> {
        let before = self.take_prefix();
        self.expect("(")?;
        let mut elements = Vec::new();

        if self.at(")") {
            let end = self.bump_fmt();
            return Ok(Container {
                before,
                elements,
                end,
            });
        }

        loop {
            let arg = self.expression()?;
            if self.at(",") {
                let after = self.bump_fmt();
                elements.push(Padded::new(arg, after));
            } else {
                elements.push(Padded::tight(arg));
                let end = self.expect(")")?;
                return Ok(Container {
                    before,
                    elements,
                    end,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::{print_node, render};

    fn assert_round_trip(source: &str) {
        let unit = parse_compilation_unit(source).unwrap();
        assert_eq!(render(&unit), source);
    }

    #[test]
    fn test_round_trip_declarations() {
        assert_round_trip(
            "package com.example;\n\nimport java.util.*;\nimport static java.lang.Math.max;\n\n\
             /** Doc */\npublic final class A<T extends Comparable<T>> extends Base implements X, Y {\n\
             \tprivate static final Map<String, List<Integer>> m = new HashMap<>();\n\
             \tint a = 1, b;\n\n\
             \tA() { super(); }\n\
             \tpublic <U> U get(final int i, String... rest) throws IOException { return null; }\n\
             \tabstract void run();\n\
             \tinterface Inner {}\n\
             }\n",
        );
    }

    #[test]
    fn test_round_trip_statements_and_expressions() {
        assert_round_trip(
            "class A {\n  void m() {\n    while ( true ) { }\n    while(true) test();\n\
             \x20   if (a && !b) x += 1; else { y = -x++ * (2 + 3); }\n\
             \x20   this.field.call(a , b).next = \"s\" ;\n    ;\n    return;\n  }\n}",
        );
    }

    #[test]
    fn test_round_trip_preserves_comments_and_trailing_trivia() {
        assert_round_trip("// header\n\nclass A { /* inner */ }\n\n// trailing\n");
        assert_round_trip("class A {}");
    }

    #[test]
    fn test_leading_trivia_belongs_to_first_declaration() {
        let unit = parse_compilation_unit("\n// header\nclass A {}\n").unwrap();
        assert_eq!(unit.fmt.prefix, "");
        assert_eq!(unit.fmt.suffix, "\n");
        assert_eq!(unit.classes[0].fmt.prefix, "\n// header\n");
        assert_eq!(unit.classes[0].kind_fmt.prefix, "");
    }

    #[test]
    fn test_statement_prefixes_belong_to_statements() {
        let unit = parse_compilation_unit("class A {\n\tList l;\n\tint x;\n}").unwrap();
        let body = &unit.classes[0].body;
        assert_eq!(body.statements[0].fmt().prefix, "\n\t");
        assert_eq!(body.statements[1].fmt().prefix, "\n\t");
        assert_eq!(body.end.prefix, "\n");

        let fields = body.statements[0].as_variables().unwrap();
        assert_eq!(fields.type_expr.fmt.prefix, "");
        assert_eq!(fields.type_expr.text, "List");
        assert_eq!(fields.vars[0].element.fmt.prefix, " ");
    }

    #[test]
    fn test_binary_precedence() {
        let expr = parse_expression("a + b * c").unwrap();
        let Expression::Binary(sum) = &expr else {
            panic!("expected binary expression");
        };
        assert_eq!(sum.op, BinaryOp::Add);
        assert!(matches!(&sum.right, Expression::Binary(product) if product.op == BinaryOp::Mul));
    }

    #[test]
    fn test_statement_fragment_keeps_trailing_trivia() {
        let statement = parse_statement("  foo(1);\n").unwrap();
        assert_eq!(statement.fmt().prefix, "  ");
        assert_eq!(statement.fmt().suffix, "\n");
        assert_eq!(print_node(statement.as_node()), "  foo(1);\n");
    }

    #[test]
    fn test_local_variable_versus_expression() {
        let statement = parse_statement("List<String> names = new ArrayList<>();").unwrap();
        assert!(matches!(statement, Statement::Variables(_)));

        let statement = parse_statement("i < n;").unwrap();
        assert!(matches!(statement, Statement::Expression(_)));

        let statement = parse_statement("count = count + 1;").unwrap();
        assert!(matches!(statement, Statement::Expression(_)));
    }

    #[test]
    fn test_excessive_nesting_is_a_parse_error() {
        let parens = format!("{}1{}", "(".repeat(2000), ")".repeat(2000));
        let err = parse_expression(&parens).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Parse);
        assert!(err.to_string().contains("nesting deeper than"));

        let blocks = format!("class A {{ void m() {}{} }}", "{".repeat(2000), "}".repeat(2000));
        assert!(parse_compilation_unit(&blocks).is_err());

        assert!(parse_expression(&format!("{}x", "- ".repeat(2000))).is_err());
    }

    #[test]
    fn test_moderate_nesting_is_accepted() {
        let parens = format!("{}1{}", "(".repeat(50), ")".repeat(50));
        assert_eq!(print_node(parse_expression(&parens).unwrap().as_node()), parens);
    }

    #[test]
    fn test_long_operator_chain_parses_prints_and_drops() {
        let initializer = vec!["1"; 200_000].join(" + ");
        let source = format!("class A {{\n    int x = {initializer};\n}}\n");
        let unit = parse_compilation_unit(&source).unwrap();
        assert_eq!(render(&unit), source);
        drop(unit);
    }

    #[test]
    fn test_unsupported_syntax_is_a_parse_error() {
        let err = parse_compilation_unit("class A { void m() { for (;;) {} } }").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Parse);
    }
}
