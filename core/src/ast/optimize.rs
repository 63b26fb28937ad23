//! file: core/src/ast/optimize.rs
//! description: tree-level constant folding and dead-branch elimination.
//!
//! `optimize_tree` consumes a tree and rebuilds it bottom up. A binary
//! operation whose operands end up as literals is replaced by the literal
//! it evaluates to; an `if` whose test ends up as a literal is replaced by
//! the branch it selects, spliced into the enclosing statement list.
//!
//! Replacement nodes take the position of the node they replace, and a
//! final sweep gives any node still lacking a position its parent's, so the
//! result can be rendered or lowered like a freshly parsed tree.
//!
use log::{debug, trace};

use super::kind::AstNodeKind;
use super::node::AstNode;
use crate::error::PassError;
use crate::ir::eval;
use crate::options::PassOptions;

const ISSUER: &str = "tacopt_core::ast::optimize";

/// Fold constants and prune constant conditionals.
///
/// Folding failures (division by zero, mixed types, overflow) keep the
/// original operation; only malformed input or exceeding
/// `options.max_depth` fails the call.
pub fn optimize_tree(ast: AstNode, options: &PassOptions) -> Result<AstNode, PassError> {
    let mut folder = TreeFolder { options, folded: 0, pruned: 0 };
    let mut out = folder.fold_node(ast, 0)?;
    out.fill_missing_positions();
    debug!(
        "optimize_tree: folded {} expressions, pruned {} conditionals",
        folder.folded, folder.pruned
    );
    Ok(out)
}

struct TreeFolder<'a> {
    options: &'a PassOptions,
    folded: usize,
    pruned: usize,
}

impl TreeFolder<'_> {
    fn fold_node(&mut self, node: AstNode, depth: usize) -> Result<AstNode, PassError> {
        self.options.check_depth(&node, depth, ISSUER)?;
        let AstNode { kind, location, span } = node;

        let kind = match kind {
            AstNodeKind::BinaryOp { left, op, right } => {
                let left = self.fold_node(*left, depth + 1)?;
                let right = self.fold_node(*right, depth + 1)?;
                if let (Some(l), Some(r)) = (left.get_kind().as_literal(), right.get_kind().as_literal()) {
                    match eval::fold_binary(op, l, r) {
                        Ok(value) => {
                            self.folded += 1;
                            AstNodeKind::Literal { value }
                        }
                        Err(e) => {
                            debug!("optimize_tree: not folding {} {} {}: {}", l, op, r, e);
                            AstNodeKind::BinaryOp { left: Box::new(left), op, right: Box::new(right) }
                        }
                    }
                } else {
                    AstNodeKind::BinaryOp { left: Box::new(left), op, right: Box::new(right) }
                }
            }
            AstNodeKind::If { test, body, orelse } => {
                let test = self.fold_node(*test, depth + 1)?;
                let body = self.fold_body(body, depth)?;
                let orelse = self.fold_body(orelse, depth)?;
                match self.select_branch(&test, body, orelse) {
                    // Outside a statement list the chosen branch becomes a block.
                    Ok(chosen) => AstNodeKind::Block { statements: chosen },
                    Err((body, orelse)) => AstNodeKind::If { test: Box::new(test), body, orelse },
                }
            }
            AstNodeKind::For { target, iterable, body } => AstNodeKind::For {
                target: Box::new(self.fold_node(*target, depth + 1)?),
                iterable: Box::new(self.fold_node(*iterable, depth + 1)?),
                body: self.fold_body(body, depth)?,
            },
            AstNodeKind::Block { statements } => AstNodeKind::Block { statements: self.fold_body(statements, depth)? },
            AstNodeKind::Assignment { targets, value } => AstNodeKind::Assignment {
                targets: self.fold_list(targets, depth)?,
                value: Box::new(self.fold_node(*value, depth + 1)?),
            },
            AstNodeKind::ExprStatement { expr } => {
                AstNodeKind::ExprStatement { expr: Box::new(self.fold_node(*expr, depth + 1)?) }
            }
            AstNodeKind::Call { callee, args } => AstNodeKind::Call {
                callee: Box::new(self.fold_node(*callee, depth + 1)?),
                args: self.fold_list(args, depth)?,
            },
            leaf @ (AstNodeKind::Identifier { .. } | AstNodeKind::Literal { .. } | AstNodeKind::Unsupported { .. }) => {
                leaf
            }
        };

        Ok(AstNode { kind, location, span })
    }

    fn fold_list(&mut self, nodes: Vec<AstNode>, depth: usize) -> Result<Vec<AstNode>, PassError> {
        nodes.into_iter().map(|n| self.fold_node(n, depth + 1)).collect()
    }

    /// Fold a statement list. A pruned `if` is replaced by the statements of
    /// its chosen branch, so the list can shrink or grow.
    fn fold_body(&mut self, statements: Vec<AstNode>, depth: usize) -> Result<Vec<AstNode>, PassError> {
        let mut out = Vec::with_capacity(statements.len());
        for stmt in statements {
            if !matches!(stmt.get_kind(), AstNodeKind::If { .. }) {
                out.push(self.fold_node(stmt, depth + 1)?);
                continue;
            }

            self.options.check_depth(&stmt, depth + 1, ISSUER)?;
            let AstNode { kind, location, span } = stmt;
            let AstNodeKind::If { test, body, orelse } = kind else {
                continue;
            };
            let test = self.fold_node(*test, depth + 2)?;
            let body = self.fold_body(body, depth + 1)?;
            let orelse = self.fold_body(orelse, depth + 1)?;

            match self.select_branch(&test, body, orelse) {
                Ok(chosen) => {
                    for mut s in chosen {
                        if s.location.is_none() {
                            s.location = location.clone();
                        }
                        if s.span.is_none() {
                            s.span = span.clone();
                        }
                        out.push(s);
                    }
                }
                Err((body, orelse)) => out.push(AstNode::new(
                    AstNodeKind::If { test: Box::new(test), body, orelse },
                    location,
                    span,
                )),
            }
        }
        Ok(out)
    }

    /// `Ok(branch)` when the test is a literal, otherwise both branches back.
    fn select_branch(
        &mut self,
        test: &AstNode,
        body: Vec<AstNode>,
        orelse: Vec<AstNode>,
    ) -> Result<Vec<AstNode>, (Vec<AstNode>, Vec<AstNode>)> {
        match test.get_kind().as_literal() {
            Some(value) => {
                self.pruned += 1;
                let taken = value.is_truthy();
                trace!("optimize_tree: condition {} is constant, keeping the {} branch", value, if taken { "if" } else { "else" });
                Ok(if taken { body } else { orelse })
            }
            None => Err((body, orelse)),
        }
    }
}
