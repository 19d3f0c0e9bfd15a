//! Error types for zone resolution and record upserts
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for zone and record operations
pub type Result<T> = std::result::Result<T, Error>;

/// Reason a hosted-zone lookup came up empty
///
/// The dual-zone orchestration needs to tell callers *which* side of a
/// partial DNS setup is missing, so the variants are kept distinct instead
/// of collapsing into one message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZoneNotFound {
    /// Neither a public nor a private zone matched
    #[error("unable to find public or private hosted zones for {domain}")]
    NoZones {
        /// The domain name that was resolved
        domain: String,
    },

    /// No public zone matched
    #[error("unable to find a public hosted zone for {domain}")]
    Public {
        /// The domain name that was resolved
        domain: String,
    },

    /// No private zone matched
    #[error("unable to find a private hosted zone for {domain}")]
    Private {
        /// The domain name that was resolved
        domain: String,
    },
}

/// Core error type for zone and record operations
#[derive(Error, Debug)]
pub enum Error {
    /// The domain name is malformed (e.g. fewer than two labels)
    #[error("invalid domain name: {0}")]
    InvalidInput(String),

    /// A synthesis request is missing a required field
    #[error("{0} must be provided when no record set is given")]
    MissingField(&'static str),

    /// A synthesis request mixes IP-address and DNS-name targets
    #[error("targets must be all IP addresses or all DNS names")]
    MixedTargetTypes,

    /// Zone resolution yielded no usable hosted zone
    #[error(transparent)]
    ZoneNotFound(#[from] ZoneNotFound),

    /// Transport or API failure from the provider, passed through opaquely
    #[error("provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// A provider response failed structural validation
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// The propagation wait exceeded its bound
    #[error("timed out waiting for change {change_id} to propagate")]
    Timeout {
        /// The change id that was being waited on
        change_id: String,
    },

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed_response(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Create a propagation timeout error
    pub fn timeout(change_id: impl Into<String>) -> Self {
        Self::Timeout {
            change_id: change_id.into(),
        }
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
