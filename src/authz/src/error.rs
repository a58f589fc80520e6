//! Error types for role tables, sessions and configuration
//!
//! The authorizer itself is total and never produces these.

use crate::scope::ScopeError;
use thiserror::Error;

/// Authorization subsystem errors
#[derive(Debug, Error)]
pub enum AuthzError {
    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Role not present in the role table
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Scope in a role table failed validation
    #[error("Invalid scope '{scope}' for role '{role}': {source}")]
    InvalidScope {
        role: String,
        scope: String,
        #[source]
        source: ScopeError,
    },

    /// Role table document could not be parsed
    #[error("Invalid role table: {0}")]
    InvalidRoleTable(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for authorization operations
pub type Result<T> = std::result::Result<T, AuthzError>;
