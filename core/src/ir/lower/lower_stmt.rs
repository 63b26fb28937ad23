//! Lowering helpers for statement nodes.
//!
//! Control flow is expressed with labels drawn from the builder's counter;
//! every label a jump names is emitted exactly once by the same helper.
//!
//! See also: `ir::lower::lower_expr` for expression lowering helpers.

use crate::ast::err::StructuralError;
use crate::ast::{AstNode, AstNodeKind};
use crate::error::PassError;
use crate::ir::op::TacOp;
use crate::options::PassOptions;

use super::tac_builder::TacBuilder;

pub fn lower_body(
    statements: &[AstNode],
    builder: &mut TacBuilder,
    options: &PassOptions,
    depth: usize,
) -> Result<(), PassError> {
    for stmt in statements {
        super::lower_node(stmt, builder, options, depth + 1)?;
    }
    Ok(())
}

/// The name a binding position refers to, or a structural error.
fn target_name(target: &AstNode, context: &str) -> Result<String, StructuralError> {
    match target.get_kind() {
        AstNodeKind::Identifier { name } => Ok(name.clone()),
        other => Err(StructuralError::new(
            format!("{} target must be a name, found {}", context, other),
            target.location.clone(),
            target.span.clone(),
        )),
    }
}

pub fn lower_assignment(
    node: &AstNode,
    targets: &[AstNode],
    value: &AstNode,
    builder: &mut TacBuilder,
    options: &PassOptions,
    depth: usize,
) -> Result<(), PassError> {
    if targets.is_empty() {
        return Err(StructuralError::new(
            "assignment has no targets".to_string(),
            node.location.clone(),
            node.span.clone(),
        )
        .into());
    }
    // Validate every target before anything is emitted.
    let names = targets
        .iter()
        .map(|t| target_name(t, "assignment"))
        .collect::<Result<Vec<_>, _>>()?;

    let src = super::lower_operand(value, builder, options, depth + 1)?;
    for dst in names {
        builder.emit_op(TacOp::Assign { dst, src: src.clone() });
    }
    Ok(())
}

/// ```text
///     ifFalse <test> goto Lfalse
///     <body>
///     goto Lend
/// Lfalse:
///     <orelse>
/// Lend:
/// ```
pub fn lower_if(
    test: &AstNode,
    body: &[AstNode],
    orelse: &[AstNode],
    builder: &mut TacBuilder,
    options: &PassOptions,
    depth: usize,
) -> Result<(), PassError> {
    let cond = super::lower_operand(test, builder, options, depth + 1)?;
    let label_false = builder.alloc_label();
    let label_end = builder.alloc_label();

    builder.emit_op(TacOp::IfFalseGoto { cond, label: label_false.clone() });
    lower_body(body, builder, options, depth)?;
    builder.emit_goto(&label_end);
    builder.emit_label(&label_false);
    lower_body(orelse, builder, options, depth)?;
    builder.emit_label(&label_end);
    Ok(())
}

/// Loops are approximated for display: there is no iterator protocol and
/// no exit test, only a `next` pseudo-call that rebinds the target before
/// each pass over the body. The end label marks where the loop would exit.
pub fn lower_for(
    target: &AstNode,
    iterable: &AstNode,
    body: &[AstNode],
    builder: &mut TacBuilder,
    options: &PassOptions,
    depth: usize,
) -> Result<(), PassError> {
    let name = target_name(target, "loop")?;
    let iter = super::lower_operand(iterable, builder, options, depth + 1)?;
    builder.emit_comment(format!("For loop over {}", iter));

    let start = builder.alloc_label();
    let end = builder.alloc_label();

    builder.emit_label(&start);
    builder.emit_op(TacOp::Call { dst: Some(name), callee: "next".to_string(), args: vec![iter] });
    lower_body(body, builder, options, depth)?;
    builder.emit_goto(&start);
    builder.emit_label(&end);
    Ok(())
}
