use std::fmt;

use crate::ast::err::{ResourceLimitError, StructuralError};
use crate::location::{Location, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level_str = match self {
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        };
        write!(f, "{}", level_str)
    }
}

pub trait TacoptErrorExt {
    fn level(&self) -> Level;
    fn message(&self) -> String;
    fn issuer(&self) -> String;
    fn span(&self) -> Option<Span>;
    fn location(&self) -> Option<Location>;
}

impl fmt::Debug for dyn TacoptErrorExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loc_str = match self.location() {
            Some(loc) => loc.to_string(),
            None => "unknown".to_string(),
        };
        let span_str = match self.span() {
            Some(span) => span.to_string(),
            None => "span:none".to_string(),
        };

        write!(
            f,
            "TACOPT | {} | {} | {} | {} | {}",
            self.level(),
            loc_str,
            self.issuer(),
            span_str,
            self.message()
        )
    }
}

impl fmt::Display for dyn TacoptErrorExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Failure of a whole lowering or optimization invocation.
///
/// Unsupported constructs and failed folds are recovered locally and never
/// show up here; only malformed trees and exceeded resource bounds do.
#[derive(Debug, Clone, PartialEq)]
pub enum PassError {
    Structural(StructuralError),
    ResourceLimit(ResourceLimitError),
}

impl PassError {
    fn inner(&self) -> &dyn TacoptErrorExt {
        match self {
            PassError::Structural(e) => e,
            PassError::ResourceLimit(e) => e,
        }
    }
}

impl fmt::Display for PassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassError::Structural(e) => write!(f, "{}", e),
            PassError::ResourceLimit(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PassError {}

impl TacoptErrorExt for PassError {
    fn level(&self) -> Level {
        self.inner().level()
    }

    fn message(&self) -> String {
        self.inner().message()
    }

    fn issuer(&self) -> String {
        self.inner().issuer()
    }

    fn span(&self) -> Option<Span> {
        self.inner().span()
    }

    fn location(&self) -> Option<Location> {
        self.inner().location()
    }
}

impl From<StructuralError> for PassError {
    fn from(e: StructuralError) -> Self {
        PassError::Structural(e)
    }
}

impl From<ResourceLimitError> for PassError {
    fn from(e: ResourceLimitError) -> Self {
        PassError::ResourceLimit(e)
    }
}
