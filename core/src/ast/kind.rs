//! file: core/src/ast/kind.rs
//! description: syntax tree node kinds and the binary operator enum.
//!
//! `AstNodeKind` is the closed set of node shapes the lowering engine and
//! the tree optimizer understand. Anything the external parser produces
//! beyond these arrives as `Unsupported` and is degraded, never rejected.
//!
use serde::{Deserialize, Serialize};

use super::node::AstNode;
use crate::ir::value::Value;

/// Represents binary operators in the AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    Add,      // +
    Sub,      // -
    Mul,      // *
    Div,      // /
    FloorDiv, // //
    Mod,      // %
    Pow,      // **
    LShift,   // <<
    RShift,   // >>
    BitAnd,   // &
    BitOr,    // |
    BitXor,   // ^
    Eq,       // ==
    NotEq,    // !=
    Lt,       // <
    LtE,      // <=
    Gt,       // >
    GtE,      // >=
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::FloorDiv => "//",
            BinaryOperator::Mod => "%",
            BinaryOperator::Pow => "**",
            BinaryOperator::LShift => "<<",
            BinaryOperator::RShift => ">>",
            BinaryOperator::BitAnd => "&",
            BinaryOperator::BitOr => "|",
            BinaryOperator::BitXor => "^",
            BinaryOperator::Eq => "==",
            BinaryOperator::NotEq => "!=",
            BinaryOperator::Lt => "<",
            BinaryOperator::LtE => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::GtE => ">=",
        }
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Add
                | BinaryOperator::Sub
                | BinaryOperator::Mul
                | BinaryOperator::Div
                | BinaryOperator::FloorDiv
                | BinaryOperator::Mod
                | BinaryOperator::Pow
        )
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Eq
                | BinaryOperator::NotEq
                | BinaryOperator::Lt
                | BinaryOperator::LtE
                | BinaryOperator::Gt
                | BinaryOperator::GtE
        )
    }

    /// Binding strength used when rendering; higher binds tighter.
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Eq
            | BinaryOperator::NotEq
            | BinaryOperator::Lt
            | BinaryOperator::LtE
            | BinaryOperator::Gt
            | BinaryOperator::GtE => 1,
            BinaryOperator::BitOr => 2,
            BinaryOperator::BitXor => 3,
            BinaryOperator::BitAnd => 4,
            BinaryOperator::LShift | BinaryOperator::RShift => 5,
            BinaryOperator::Add | BinaryOperator::Sub => 6,
            BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::FloorDiv | BinaryOperator::Mod => 7,
            BinaryOperator::Pow => 8,
        }
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node")]
pub enum AstNodeKind {
    Block { statements: Vec<AstNode> },

    If {
        test: Box<AstNode>,
        body: Vec<AstNode>,
        #[serde(default)]
        orelse: Vec<AstNode>,
    },
    For { target: Box<AstNode>, iterable: Box<AstNode>, body: Vec<AstNode> },

    Assignment { targets: Vec<AstNode>, value: Box<AstNode> },
    ExprStatement { expr: Box<AstNode> },

    BinaryOp { left: Box<AstNode>, op: BinaryOperator, right: Box<AstNode> },
    Call {
        callee: Box<AstNode>,
        #[serde(default)]
        args: Vec<AstNode>,
    },

    Identifier { name: String },
    Literal { value: Value },

    /// A node kind outside the supported subset, named by `kind`.
    Unsupported { kind: String },
}

impl AstNodeKind {
    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            AstNodeKind::BinaryOp { .. }
                | AstNodeKind::Call { .. }
                | AstNodeKind::Identifier { .. }
                | AstNodeKind::Literal { .. }
        )
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            AstNodeKind::Identifier { name } => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            AstNodeKind::Literal { value } => Some(value),
            _ => None,
        }
    }
}

use std::fmt;

impl fmt::Display for AstNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstNodeKind::Block { .. } => write!(f, "Block"),
            AstNodeKind::If { .. } => write!(f, "If"),
            AstNodeKind::For { .. } => write!(f, "For"),
            AstNodeKind::Assignment { .. } => write!(f, "Assignment"),
            AstNodeKind::ExprStatement { .. } => write!(f, "ExprStatement"),
            AstNodeKind::BinaryOp { .. } => write!(f, "BinaryOp"),
            AstNodeKind::Call { .. } => write!(f, "Call"),
            AstNodeKind::Identifier { .. } => write!(f, "Identifier"),
            AstNodeKind::Literal { .. } => write!(f, "Literal"),
            AstNodeKind::Unsupported { kind } => write!(f, "{}", kind),
        }
    }
}
