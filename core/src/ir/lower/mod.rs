//! file: core/src/ir/lower/mod.rs
//! description: syntax tree -> three-address code lowering.
//!
//! `lower_ast_to_tac` walks the tree once, depth first, emitting
//! instructions in evaluation order into a fresh `TacBuilder`. Each node
//! kind has exactly one arm in `lower_node`; expression arms live in
//! `lower_expr`, statement arms in `lower_stmt`.
//!
//! Unsupported node kinds turn into a `Comment` and lowering carries on.
//! Malformed trees and over-deep nesting abort the whole call with a
//! `PassError`.

pub mod lower_expr;
pub mod lower_stmt;
pub mod tac_builder;

use log::{trace, warn};

use crate::ast::{AstNode, AstNodeKind};
use crate::error::PassError;
use crate::ir::op::{Operand, TacOp};
use crate::options::PassOptions;

use self::tac_builder::TacBuilder;

pub(crate) const ISSUER: &str = "tacopt_core::ir::lower";

/// Lower a whole tree. The tree is only read.
pub fn lower_ast_to_tac(ast: &AstNode, options: &PassOptions) -> Result<Vec<TacOp>, PassError> {
    let mut builder = TacBuilder::new();
    lower_node(ast, &mut builder, options, 0)?;
    trace!("lowered {} node tree into {} instructions", ast.get_kind(), builder.current_len());
    Ok(builder.finish())
}

/// Lower one node, returning the operand holding its value when it has one.
pub(crate) fn lower_node(
    node: &AstNode,
    builder: &mut TacBuilder,
    options: &PassOptions,
    depth: usize,
) -> Result<Option<Operand>, PassError> {
    options.check_depth(node, depth, ISSUER)?;

    match node.get_kind() {
        AstNodeKind::Literal { value } => Ok(Some(Operand::Const(value.clone()))),
        AstNodeKind::Identifier { name } => Ok(Some(Operand::Var(name.clone()))),
        AstNodeKind::BinaryOp { left, op, right } => {
            lower_expr::lower_binary(left, *op, right, builder, options, depth).map(Some)
        }
        AstNodeKind::Call { callee, args } => {
            lower_expr::lower_call(callee, args, builder, options, depth).map(Some)
        }
        AstNodeKind::Assignment { targets, value } => {
            lower_stmt::lower_assignment(node, targets, value, builder, options, depth)?;
            Ok(None)
        }
        AstNodeKind::ExprStatement { expr } => {
            // Evaluated for its effects only.
            lower_node(expr, builder, options, depth + 1)?;
            Ok(None)
        }
        AstNodeKind::If { test, body, orelse } => {
            lower_stmt::lower_if(test, body, orelse, builder, options, depth)?;
            Ok(None)
        }
        AstNodeKind::For { target, iterable, body } => {
            lower_stmt::lower_for(target, iterable, body, builder, options, depth)?;
            Ok(None)
        }
        AstNodeKind::Block { statements } => {
            lower_stmt::lower_body(statements, builder, options, depth)?;
            Ok(None)
        }
        AstNodeKind::Unsupported { kind } => {
            warn!("lowering: unsupported node kind '{}' degraded to a comment", kind);
            builder.emit_comment(format!("Unsupported node: {}", kind));
            Ok(None)
        }
    }
}

/// Lower a node whose value is needed; a valueless node yields `Undef`.
pub(crate) fn lower_operand(
    node: &AstNode,
    builder: &mut TacBuilder,
    options: &PassOptions,
    depth: usize,
) -> Result<Operand, PassError> {
    Ok(lower_node(node, builder, options, depth)?.unwrap_or(Operand::Undef))
}
