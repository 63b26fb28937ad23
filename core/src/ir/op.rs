use serde::{Deserialize, Serialize};

use super::value::Value;
use crate::ast::BinaryOperator;

/// Right-hand side operand of a TAC instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    /// A synthetic temporary (`t0`, `t1`, ...).
    Temp(String),
    /// A variable named in the source.
    Var(String),
    Const(Value),
    /// Stand-in for the value of an unsupported sub-expression.
    Undef,
}

impl Operand {
    pub fn as_const(&self) -> Option<&Value> {
        match self {
            Operand::Const(v) => Some(v),
            _ => None,
        }
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Temp(name) | Operand::Var(name) => write!(f, "{}", name),
            Operand::Const(v) => write!(f, "{}", v),
            Operand::Undef => write!(f, "undef"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TacOp {
    Assign { dst: String, src: Operand },
    BinaryAssign { dst: String, op: BinaryOperator, lhs: Operand, rhs: Operand },
    Call { dst: Option<String>, callee: String, args: Vec<Operand> },

    Label { name: String },
    Goto { label: String },
    /// Jump to `label` when `cond` is false.
    IfFalseGoto { cond: Operand, label: String },

    Comment { text: String },
}

impl TacOp {
    /// Label this instruction jumps to, if any.
    pub fn jump_target(&self) -> Option<&str> {
        match self {
            TacOp::Goto { label } | TacOp::IfFalseGoto { label, .. } => Some(label.as_str()),
            _ => None,
        }
    }

    pub fn is_call(&self) -> bool {
        matches!(self, TacOp::Call { .. })
    }
}

impl std::fmt::Display for TacOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TacOp::Assign { dst, src } => write!(f, "{} = {}", dst, src),
            TacOp::BinaryAssign { dst, op, lhs, rhs } => write!(f, "{} = {} {} {}", dst, lhs, op, rhs),
            TacOp::Call { dst, callee, args } => {
                if let Some(d) = dst {
                    write!(f, "{} = ", d)?;
                }
                write!(f, "call {}(", callee)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            TacOp::Label { name } => write!(f, "{}:", name),
            TacOp::Goto { label } => write!(f, "goto {}", label),
            TacOp::IfFalseGoto { cond, label } => write!(f, "ifFalse {} goto {}", cond, label),
            TacOp::Comment { text } => write!(f, "# {}", text),
        }
    }
}
