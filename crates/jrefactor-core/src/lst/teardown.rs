//! Iterative teardown of deep trees
//!
//! A long operator or call chain nests one `Arc` per link, and the default
//! drop glue would follow it recursively. Nodes with expression or statement
//! children move them onto a work list when dropped; children this tree owns
//! alone are taken apart there, shared ones only lose a reference.

use super::nodes::*;
use super::{Formatting, NodeId};
use once_cell::sync::Lazy;
use std::mem;
use std::sync::Arc;

static EXPRESSION_HOLE: Lazy<Expression> =
    Lazy::new(|| Expression::Identifier(Arc::new(Identifier::new("", Formatting::empty()))));

static STATEMENT_HOLE: Lazy<Statement> = Lazy::new(|| {
    Statement::Empty(Arc::new(Empty {
        id: NodeId::next(),
        fmt: Formatting::empty(),
    }))
});

enum Pending {
    Expression(Expression),
    Statement(Statement),
}

#[derive(Default)]
struct Teardown {
    pending: Vec<Pending>,
}

impl Teardown {
    fn expression(&mut self, slot: &mut Expression) {
        if matches!(slot, Expression::Literal(_) | Expression::Identifier(_)) {
            return;
        }
        let child = mem::replace(slot, EXPRESSION_HOLE.clone());
        self.pending.push(Pending::Expression(child));
    }

    fn statement(&mut self, slot: &mut Statement) {
        if matches!(slot, Statement::Empty(_)) {
            return;
        }
        let child = mem::replace(slot, STATEMENT_HOLE.clone());
        self.pending.push(Pending::Statement(child));
    }

    fn arguments(&mut self, args: &mut Container<Expression>) {
        for arg in &mut args.elements {
            self.expression(&mut arg.element);
        }
    }

    fn run(mut self) {
        while let Some(next) = self.pending.pop() {
            match next {
                Pending::Expression(expression) => self.dismantle_expression(expression),
                Pending::Statement(statement) => self.dismantle_statement(statement),
            }
        }
    }

    fn dismantle_expression(&mut self, expression: Expression) {
        match expression {
            Expression::FieldAccess(n) => self.release_unique(n),
            Expression::MethodInvocation(n) => self.release_unique(n),
            Expression::NewClass(n) => self.release_unique(n),
            Expression::Binary(n) => self.release_unique(n),
            Expression::Unary(n) => self.release_unique(n),
            Expression::Assignment(n) => self.release_unique(n),
            Expression::Parentheses(n) => self.release_unique(n),
            Expression::Literal(_) | Expression::Identifier(_) => {}
        }
    }

    fn dismantle_statement(&mut self, statement: Statement) {
        match statement {
            Statement::Block(n) => self.release_unique(n),
            Statement::While(n) => self.release_unique(n),
            Statement::If(n) => self.release_unique(n),
            other => drop(other),
        }
    }

    /// Move the children of `node` here when nothing else holds it; the
    /// emptied node is then dropped without descending further
    fn release_unique<N: Release>(&mut self, node: Arc<N>) {
        if let Ok(mut node) = Arc::try_unwrap(node) {
            node.release(self);
        }
    }
}

trait Release {
    fn release(&mut self, work: &mut Teardown);
}

impl Release for Binary {
    fn release(&mut self, work: &mut Teardown) {
        work.expression(&mut self.left);
        work.expression(&mut self.right);
    }
}

impl Release for Unary {
    fn release(&mut self, work: &mut Teardown) {
        work.expression(&mut self.operand);
    }
}

impl Release for Assignment {
    fn release(&mut self, work: &mut Teardown) {
        work.expression(&mut self.target);
        work.expression(&mut self.value);
    }
}

impl Release for Parentheses {
    fn release(&mut self, work: &mut Teardown) {
        work.expression(&mut self.tree);
    }
}

impl Release for FieldAccess {
    fn release(&mut self, work: &mut Teardown) {
        work.expression(&mut self.target);
    }
}

impl Release for MethodInvocation {
    fn release(&mut self, work: &mut Teardown) {
        if let Some(select) = self.select.as_mut() {
            work.expression(&mut select.element);
        }
        work.arguments(&mut self.args);
    }
}

impl Release for NewClass {
    fn release(&mut self, work: &mut Teardown) {
        work.arguments(&mut self.args);
    }
}

impl Release for Block {
    fn release(&mut self, work: &mut Teardown) {
        for statement in &mut self.statements {
            work.statement(statement);
        }
    }
}

impl Release for WhileLoop {
    fn release(&mut self, work: &mut Teardown) {
        work.statement(&mut self.body);
    }
}

impl Release for If {
    fn release(&mut self, work: &mut Teardown) {
        work.statement(&mut self.then_part);
        if let Some(else_part) = self.else_part.as_mut() {
            work.statement(&mut else_part.body);
        }
    }
}

macro_rules! iterative_drop {
    ($($node:ident),* $(,)?) => {
        $(
            impl Drop for $node {
                fn drop(&mut self) {
                    let mut work = Teardown::default();
                    self.release(&mut work);
                    work.run();
                }
            }
        )*
    };
}

iterative_drop!(
    Binary,
    Unary,
    Assignment,
    Parentheses,
    FieldAccess,
    MethodInvocation,
    NewClass,
    Block,
    WhileLoop,
    If,
);
