use serde::{Deserialize, Serialize};

use crate::ir::value::Value;
use crate::location;

use super::kind::{AstNodeKind, BinaryOperator};

/// One node of the syntax tree handed over by the parser.
///
/// A parent exclusively owns its children; passes either read a tree or
/// consume it and hand back a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstNode {
    #[serde(flatten)]
    pub kind: AstNodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<location::Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<location::Span>,
}

impl AstNode {
    pub fn new(
        node_type: AstNodeKind,
        location: Option<location::Location>,
        span: Option<location::Span>,
    ) -> Self {
        AstNode {
            kind: node_type,
            location,
            span,
        }
    }

    pub fn with_location(mut self, location: crate::location::Location) -> Self {
        self.location = Some(location);
        self
    }
    pub fn with_span(mut self, span: crate::location::Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Take over the position of `other`, as a replacement node does for the
    /// node it stands in for.
    pub fn with_position_of(mut self, other: &AstNode) -> Self {
        self.location = other.location.clone();
        self.span = other.span.clone();
        self
    }

    pub fn get_kind(&self) -> &AstNodeKind {
        &self.kind
    }
    pub fn get_location(&self) -> Option<&crate::location::Location> {
        self.location.as_ref()
    }
    pub fn get_span(&self) -> Option<&crate::location::Span> {
        self.span.as_ref()
    }

    /// Give every node without a position the position of its parent.
    ///
    /// The root keeps whatever it has. Nodes that already carry a location or
    /// span are left alone, so running this twice changes nothing.
    pub fn fill_missing_positions(&mut self) {
        let location = self.location.clone();
        let span = self.span.clone();
        for child in self.children_mut() {
            if child.location.is_none() {
                child.location = location.clone();
            }
            if child.span.is_none() {
                child.span = span.clone();
            }
            child.fill_missing_positions();
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&AstNode> {
        match &self.kind {
            AstNodeKind::Block { statements } => statements.iter().collect(),
            AstNodeKind::If { test, body, orelse } => {
                let mut out = vec![test.as_ref()];
                out.extend(body.iter());
                out.extend(orelse.iter());
                out
            }
            AstNodeKind::For { target, iterable, body } => {
                let mut out = vec![target.as_ref(), iterable.as_ref()];
                out.extend(body.iter());
                out
            }
            AstNodeKind::Assignment { targets, value } => {
                let mut out: Vec<&AstNode> = targets.iter().collect();
                out.push(value.as_ref());
                out
            }
            AstNodeKind::ExprStatement { expr } => vec![expr.as_ref()],
            AstNodeKind::BinaryOp { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            AstNodeKind::Call { callee, args } => {
                let mut out = vec![callee.as_ref()];
                out.extend(args.iter());
                out
            }
            AstNodeKind::Identifier { .. } | AstNodeKind::Literal { .. } | AstNodeKind::Unsupported { .. } => Vec::new(),
        }
    }

    fn children_mut(&mut self) -> Vec<&mut AstNode> {
        match &mut self.kind {
            AstNodeKind::Block { statements } => statements.iter_mut().collect(),
            AstNodeKind::If { test, body, orelse } => {
                let mut out = vec![test.as_mut()];
                out.extend(body.iter_mut());
                out.extend(orelse.iter_mut());
                out
            }
            AstNodeKind::For { target, iterable, body } => {
                let mut out = vec![target.as_mut(), iterable.as_mut()];
                out.extend(body.iter_mut());
                out
            }
            AstNodeKind::Assignment { targets, value } => {
                let mut out: Vec<&mut AstNode> = targets.iter_mut().collect();
                out.push(value.as_mut());
                out
            }
            AstNodeKind::ExprStatement { expr } => vec![expr.as_mut()],
            AstNodeKind::BinaryOp { left, right, .. } => vec![left.as_mut(), right.as_mut()],
            AstNodeKind::Call { callee, args } => {
                let mut out = vec![callee.as_mut()];
                out.extend(args.iter_mut());
                out
            }
            AstNodeKind::Identifier { .. } | AstNodeKind::Literal { .. } | AstNodeKind::Unsupported { .. } => Vec::new(),
        }
    }

    /// Parse a tree from the JSON hand-off format of the parser.
    pub fn from_json(json: &str) -> serde_json::Result<AstNode> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// Shorthand constructors for trees built in code rather than parsed.
impl AstNode {
    fn bare(kind: AstNodeKind) -> Self {
        AstNode::new(kind, None, None)
    }

    pub fn literal(value: Value) -> Self {
        Self::bare(AstNodeKind::Literal { value })
    }
    pub fn int(value: i64) -> Self {
        Self::literal(Value::Int(value))
    }
    pub fn float(value: f64) -> Self {
        Self::literal(Value::Float(value))
    }
    pub fn boolean(value: bool) -> Self {
        Self::literal(Value::Bool(value))
    }
    pub fn string(value: &str) -> Self {
        Self::literal(Value::Str(value.to_string()))
    }
    pub fn ident(name: &str) -> Self {
        Self::bare(AstNodeKind::Identifier { name: name.to_string() })
    }
    pub fn binary(left: AstNode, op: BinaryOperator, right: AstNode) -> Self {
        Self::bare(AstNodeKind::BinaryOp { left: Box::new(left), op, right: Box::new(right) })
    }
    pub fn assign(targets: Vec<AstNode>, value: AstNode) -> Self {
        Self::bare(AstNodeKind::Assignment { targets, value: Box::new(value) })
    }
    pub fn call(callee: AstNode, args: Vec<AstNode>) -> Self {
        Self::bare(AstNodeKind::Call { callee: Box::new(callee), args })
    }
    pub fn expr_stmt(expr: AstNode) -> Self {
        Self::bare(AstNodeKind::ExprStatement { expr: Box::new(expr) })
    }
    pub fn if_else(test: AstNode, body: Vec<AstNode>, orelse: Vec<AstNode>) -> Self {
        Self::bare(AstNodeKind::If { test: Box::new(test), body, orelse })
    }
    pub fn for_loop(target: AstNode, iterable: AstNode, body: Vec<AstNode>) -> Self {
        Self::bare(AstNodeKind::For { target: Box::new(target), iterable: Box::new(iterable), body })
    }
    pub fn block(statements: Vec<AstNode>) -> Self {
        Self::bare(AstNodeKind::Block { statements })
    }
    pub fn unsupported(kind: &str) -> Self {
        Self::bare(AstNodeKind::Unsupported { kind: kind.to_string() })
    }
}

use std::fmt;

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", super::render::render_source(self))
    }
}
