//! file: core/src/ir/opt/const_fold.rs
//! description: constant folding optimizer pass.
//!
//! Folds every assignment whose right-hand side is a closed literal
//! expression. The pass looks at one instruction at a time and carries no
//! knowledge between lines, so `x = 1` followed by `t0 = x + 1` is left
//! alone: `x` is a name, not a literal.
//!
use log::debug;

use super::OptimizedOp;
use crate::ir::eval::{self, FoldError};
use crate::ir::op::{Operand, TacOp};
use crate::ir::value::Value;

/// Constant-fold each line of `ops` independently.
pub(crate) fn constant_fold(ops: &[TacOp]) -> Vec<OptimizedOp> {
    let mut folded = 0usize;
    let out: Vec<OptimizedOp> = ops
        .iter()
        .map(|op| match fold_line(op) {
            Some(Ok(new_op)) => {
                folded += 1;
                OptimizedOp::folded(new_op)
            }
            Some(Err(e)) => {
                debug!("const_fold: keeping '{}': {}", op, e);
                OptimizedOp::unchanged(op.clone())
            }
            None => OptimizedOp::unchanged(op.clone()),
        })
        .collect();
    debug!("const_fold: folded {} of {} instructions", folded, ops.len());
    out
}

/// `None` when the line is not a candidate at all, otherwise the outcome
/// of evaluating its right-hand side.
fn fold_line(op: &TacOp) -> Option<Result<TacOp, FoldError>> {
    match op {
        TacOp::Assign { dst, src: Operand::Const(v) } => Some(Ok(assign_const(dst, v.clone()))),
        TacOp::BinaryAssign { dst, op, lhs, rhs } => {
            let (l, r) = (lhs.as_const()?, rhs.as_const()?);
            Some(eval::fold_restricted(*op, l, r).map(|v| assign_const(dst, v)))
        }
        TacOp::Assign { .. }
        | TacOp::Call { .. }
        | TacOp::Label { .. }
        | TacOp::Goto { .. }
        | TacOp::IfFalseGoto { .. }
        | TacOp::Comment { .. } => None,
    }
}

fn assign_const(dst: &str, value: Value) -> TacOp {
    TacOp::Assign { dst: dst.to_string(), src: Operand::Const(value) }
}
