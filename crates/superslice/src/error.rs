//! Error taxonomy for the geometry core.
//!
//! Every failure is raised to the immediate caller; nothing here is retried.
//! Lookups that can legitimately have no answer return `Option` instead.

use thiserror::Error;

/// Errors raised by generators and geometry queries.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeomError {
    /// A closed-form function was evaluated outside its valid domain.
    #[error("domain error: {message}")]
    Domain { message: String },

    /// A topology invariant does not hold (bad index, count mismatch).
    #[error("structural error: {message}")]
    Structural { message: String },

    /// Caller-supplied family name or argument mapping is invalid.
    #[error("config error: {message}")]
    Config { message: String },

    /// A reserved generator variant has no construction wired up.
    #[error("not supported: {what}")]
    NotSupported { what: String },
}

impl GeomError {
    pub fn domain(message: impl Into<String>) -> Self {
        Self::Domain {
            message: message.into(),
        }
    }

    pub fn structural(message: impl Into<String>) -> Self {
        Self::Structural {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn not_supported(what: impl Into<String>) -> Self {
        Self::NotSupported { what: what.into() }
    }

    #[inline]
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain { .. })
    }
    #[inline]
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structural { .. })
    }
    #[inline]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
    #[inline]
    pub fn is_not_supported(&self) -> bool {
        matches!(self, Self::NotSupported { .. })
    }
}

pub type Result<T> = std::result::Result<T, GeomError>;
