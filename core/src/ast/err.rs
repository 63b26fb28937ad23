use crate::error::{Level, TacoptErrorExt};
use crate::location::{Location, Span};

/// A tree shape the passes cannot give a meaning to, such as an assignment
/// into something that is not a name.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuralError {
    level: Level,
    message: String,
    issuer: String,
    location: Option<Location>,
    span: Option<Span>,
}

impl StructuralError {
    /// Default constructor for a malformed-tree error.
    pub fn new(message: String, location: Option<Location>, span: Option<Span>) -> Self {
        StructuralError {
            level: Level::Error,
            message,
            issuer: "tacopt_core::ast".to_string(),
            location,
            span,
        }
    }

    /// More explicit constructor when you need to set level/issuer.
    pub fn with(level: Level, message: String, issuer: String, location: Option<Location>, span: Option<Span>) -> Self {
        StructuralError {
            level,
            message,
            issuer,
            location,
            span,
        }
    }
}

impl std::fmt::Display for StructuralError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(loc) = &self.location {
            write!(f, "{} (at {}:{}:{})", self.message, loc.file, loc.line, loc.column)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for StructuralError {}

impl TacoptErrorExt for StructuralError {
    fn level(&self) -> Level {
        self.level
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn issuer(&self) -> String {
        self.issuer.clone()
    }

    fn span(&self) -> Option<Span> {
        self.span.clone()
    }

    fn location(&self) -> Option<Location> {
        self.location.clone()
    }
}

/// The tree nests deeper than the configured `max_depth`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceLimitError {
    level: Level,
    message: String,
    issuer: String,
    limit: usize,
    location: Option<Location>,
    span: Option<Span>,
}

impl ResourceLimitError {
    pub fn new(issuer: String, limit: usize, location: Option<Location>, span: Option<Span>) -> Self {
        ResourceLimitError {
            level: Level::Critical,
            message: format!("tree nesting exceeds the maximum depth of {}", limit),
            issuer,
            limit,
            location,
            span,
        }
    }

    pub fn with(level: Level, message: String, issuer: String, limit: usize, location: Option<Location>, span: Option<Span>) -> Self {
        ResourceLimitError {
            level,
            message,
            issuer,
            limit,
            location,
            span,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl std::fmt::Display for ResourceLimitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(loc) = &self.location {
            write!(f, "{} (at {}:{}:{})", self.message, loc.file, loc.line, loc.column)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ResourceLimitError {}

impl TacoptErrorExt for ResourceLimitError {
    fn level(&self) -> Level {
        self.level
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn issuer(&self) -> String {
        self.issuer.clone()
    }

    fn span(&self) -> Option<Span> {
        self.span.clone()
    }

    fn location(&self) -> Option<Location> {
        self.location.clone()
    }
}
