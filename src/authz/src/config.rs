//! Service configuration
//!
//! Environment variables:
//! - `AUTHZ_PORT` - HTTP port (default: 8080)
//! - `AUTHZ_SCOPE_CONVENTION` - `colon` or `dotted` (default: colon)
//! - `AUTHZ_ROLE_TABLE` - path to a JSON role table (default: built-in roles)
//! - `RUST_LOG` - log filter, read by the tracing subscriber (default: info)

use crate::error::{AuthzError, Result};
use crate::roles::RoleTable;
use crate::scope::ScopeConvention;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthzConfig {
    pub port: u16,
    pub scope_convention: ScopeConvention,
    pub role_table_path: Option<PathBuf>,
}

impl Default for AuthzConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            scope_convention: ScopeConvention::default(),
            role_table_path: None,
        }
    }
}

impl AuthzConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("AUTHZ_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| AuthzError::Config(format!("AUTHZ_PORT is not a valid port: '{}'", raw)))?,
            None => DEFAULT_PORT,
        };

        let scope_convention = match lookup("AUTHZ_SCOPE_CONVENTION") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AuthzError::Config(format!("AUTHZ_SCOPE_CONVENTION: {}", e)))?,
            None => ScopeConvention::default(),
        };

        let role_table_path = lookup("AUTHZ_ROLE_TABLE")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            port,
            scope_convention,
            role_table_path,
        })
    }

    /// Resolve the role table this configuration points at
    pub fn load_role_table(&self) -> Result<RoleTable> {
        match &self.role_table_path {
            Some(path) => RoleTable::from_path(path, self.scope_convention),
            None => Ok(RoleTable::builtin(self.scope_convention)),
        }
    }
}
