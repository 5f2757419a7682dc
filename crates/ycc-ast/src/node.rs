// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Syntax-tree nodes.

use std::fmt;

use crate::Span;

/// A node in the syntax tree. Children are owned; the tree has no sharing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

/// The kind of node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Integer literal
    Num(i64),
    /// Local variable, addressed by its frame offset in bytes
    LocalVar { offset: usize },
    /// Arithmetic or comparison
    Binary {
        op: BinOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// `left = right`; evaluates to the assigned value
    Assign { left: Box<Node>, right: Box<Node> },
    /// `return expr`
    Return(Box<Node>),
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
        }
    }
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn num(value: i64, span: Span) -> Self {
        Self::new(NodeKind::Num(value), span)
    }

    pub fn local_var(offset: usize, span: Span) -> Self {
        Self::new(NodeKind::LocalVar { offset }, span)
    }

    /// Binary node spanning both operands.
    pub fn binary(op: BinOp, left: Node, right: Node) -> Self {
        let span = left.span.to(right.span);
        let kind = NodeKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        };
        Self::new(kind, span)
    }

    pub fn assign(left: Node, right: Node) -> Self {
        let span = left.span.to(right.span);
        let kind = NodeKind::Assign {
            left: Box::new(left),
            right: Box::new(right),
        };
        Self::new(kind, span)
    }

    pub fn ret(expr: Node, span: Span) -> Self {
        Self::new(NodeKind::Return(Box::new(expr)), span)
    }
}

/// S-expression rendering: `(- (- 1 2) 3)`, `(= (lvar 8) 1)`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Num(n) => write!(f, "{n}"),
            NodeKind::LocalVar { offset } => write!(f, "(lvar {offset})"),
            NodeKind::Binary { op, left, right } => {
                write!(f, "({} {left} {right})", op.symbol())
            }
            NodeKind::Assign { left, right } => write!(f, "(= {left} {right})"),
            NodeKind::Return(expr) => write!(f, "(return {expr})"),
        }
    }
}

/// A parsed translation unit, ready for code generation.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Program {
    /// Top-level statements in source order.
    pub stmts: Vec<Node>,
    /// Bytes of local storage the generator must reserve (8 per variable).
    pub frame_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: i64, at: usize) -> Node {
        Node::num(v, Span::new(at, at + 1))
    }

    #[test]
    fn binary_span_covers_operands() {
        let node = Node::binary(BinOp::Add, n(1, 0), n(2, 4));
        assert_eq!(node.span, Span::new(0, 5));
    }

    #[test]
    fn renders_sexpr() {
        let inner = Node::binary(BinOp::Sub, n(1, 0), n(2, 4));
        let sub = Node::binary(BinOp::Sub, inner, n(3, 8));
        assert_eq!(sub.to_string(), "(- (- 1 2) 3)");

        let assign = Node::assign(Node::local_var(8, Span::new(0, 1)), n(3, 4));
        assert_eq!(assign.to_string(), "(= (lvar 8) 3)");

        let ret = Node::ret(Node::binary(BinOp::Le, n(1, 7), n(2, 12)), Span::new(0, 14));
        assert_eq!(ret.to_string(), "(return (<= 1 2))");
    }
}
