//! Lowering helpers for expression nodes.
//!
//! Each helper lowers its operands left to right, then emits the single
//! instruction that computes the expression into a fresh temporary.

use crate::ast::{AstNode, BinaryOperator, render_expr};
use crate::error::PassError;
use crate::ir::op::{Operand, TacOp};
use crate::options::PassOptions;

use super::tac_builder::TacBuilder;

pub fn lower_binary(
    left: &AstNode,
    op: BinaryOperator,
    right: &AstNode,
    builder: &mut TacBuilder,
    options: &PassOptions,
    depth: usize,
) -> Result<Operand, PassError> {
    let lhs = super::lower_operand(left, builder, options, depth + 1)?;
    let rhs = super::lower_operand(right, builder, options, depth + 1)?;
    let (dst, result) = builder.alloc_temp_operand();
    builder.emit_op(TacOp::BinaryAssign { dst, op, lhs, rhs });
    Ok(result)
}

/// Calls always produce a temporary, even when the value is discarded.
pub fn lower_call(
    callee: &AstNode,
    args: &[AstNode],
    builder: &mut TacBuilder,
    options: &PassOptions,
    depth: usize,
) -> Result<Operand, PassError> {
    let mut operands = Vec::with_capacity(args.len());
    for arg in args {
        operands.push(super::lower_operand(arg, builder, options, depth + 1)?);
    }
    // Attribute calls and the like keep their source text as the callee name.
    let callee = match callee.get_kind().as_identifier() {
        Some(name) => name.to_string(),
        None => {
            options.check_tree_depth(callee, depth + 1, super::ISSUER)?;
            render_expr(callee)
        }
    };
    let (dst, result) = builder.alloc_temp_operand();
    builder.emit_op(TacOp::Call { dst: Some(dst), callee, args: operands });
    Ok(result)
}
