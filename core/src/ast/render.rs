//! Rendering of a (possibly optimized) tree back to source text.
//!
//! Output uses four-space indentation. Empty bodies become `pass`, which is
//! how an optimized tree with a pruned branch stays valid source.

use super::kind::{AstNodeKind, BinaryOperator};
use super::node::AstNode;
use crate::ir::value::Value;

const INDENT: &str = "    ";

/// Render a statement tree. A `Block` renders its statements one per line.
pub fn render_source(node: &AstNode) -> String {
    let mut out = String::new();
    render_stmt(node, 0, &mut out);
    out
}

/// Render a single expression on one line.
pub fn render_expr(node: &AstNode) -> String {
    match node.get_kind() {
        AstNodeKind::Literal { value } => value.to_string(),
        AstNodeKind::Identifier { name } => name.clone(),
        AstNodeKind::BinaryOp { left, op, right } => {
            let l = render_operand(left, *op, Side::Left);
            let r = render_operand(right, *op, Side::Right);
            format!("{} {} {}", l, op.symbol(), r)
        }
        AstNodeKind::Call { callee, args } => {
            let args: Vec<String> = args.iter().map(render_expr).collect();
            format!("{}({})", render_expr(callee), args.join(", "))
        }
        AstNodeKind::Assignment { .. }
        | AstNodeKind::ExprStatement { .. }
        | AstNodeKind::If { .. }
        | AstNodeKind::For { .. }
        | AstNodeKind::Block { .. } => format!("<{}>", node.get_kind()),
        AstNodeKind::Unsupported { kind } => format!("<{}>", kind),
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Side {
    Left,
    Right,
}

fn render_operand(child: &AstNode, parent: BinaryOperator, side: Side) -> String {
    let text = render_expr(child);
    // `-8 ** y` parses as `-(8 ** y)`.
    if parent == BinaryOperator::Pow && side == Side::Left && is_negative_literal(child) {
        return format!("({})", text);
    }
    if let AstNodeKind::BinaryOp { op, .. } = child.get_kind() {
        let needs_parens = match op.precedence().cmp(&parent.precedence()) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Greater => false,
            // `**` groups to the right, everything else to the left; comparisons
            // chain, so any nested comparison gets parentheses.
            std::cmp::Ordering::Equal => {
                parent.is_comparison()
                    || match parent {
                        BinaryOperator::Pow => side == Side::Left,
                        _ => side == Side::Right,
                    }
            }
        };
        if needs_parens {
            return format!("({})", text);
        }
    }
    text
}

fn is_negative_literal(node: &AstNode) -> bool {
    match node.get_kind() {
        AstNodeKind::Literal { value: Value::Int(i) } => *i < 0,
        AstNodeKind::Literal { value: Value::Float(x) } => x.is_sign_negative(),
        _ => false,
    }
}

fn render_body(body: &[AstNode], depth: usize, out: &mut String) {
    if body.is_empty() {
        push_line(depth, "pass", out);
        return;
    }
    for stmt in body {
        render_stmt(stmt, depth, out);
    }
}

fn render_stmt(node: &AstNode, depth: usize, out: &mut String) {
    match node.get_kind() {
        AstNodeKind::Block { statements } => {
            for stmt in statements {
                render_stmt(stmt, depth, out);
            }
        }
        AstNodeKind::Assignment { targets, value } => {
            let mut line = String::new();
            for t in targets {
                line.push_str(&render_expr(t));
                line.push_str(" = ");
            }
            line.push_str(&render_expr(value));
            push_line(depth, &line, out);
        }
        AstNodeKind::ExprStatement { expr } => push_line(depth, &render_expr(expr), out),
        AstNodeKind::If { test, body, orelse } => {
            push_line(depth, &format!("if {}:", render_expr(test)), out);
            render_body(body, depth + 1, out);
            if !orelse.is_empty() {
                push_line(depth, "else:", out);
                render_body(orelse, depth + 1, out);
            }
        }
        AstNodeKind::For { target, iterable, body } => {
            push_line(depth, &format!("for {} in {}:", render_expr(target), render_expr(iterable)), out);
            render_body(body, depth + 1, out);
        }
        AstNodeKind::Unsupported { kind } => push_line(depth, &format!("# unsupported: {}", kind), out),
        AstNodeKind::BinaryOp { .. }
        | AstNodeKind::Call { .. }
        | AstNodeKind::Identifier { .. }
        | AstNodeKind::Literal { .. } => push_line(depth, &render_expr(node), out),
    }
}

fn push_line(depth: usize, text: &str, out: &mut String) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(text);
    out.push('\n');
}
