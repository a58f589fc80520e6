//! Static role → scopes table
//!
//! Roles are fixed when a session is resolved, so the table is built once at
//! process start (either the built-in ERP table or a JSON document) and only
//! read afterwards.
//!
//! JSON format:
//!
//! ```json
//! { "owner": ["*"], "finance": ["finance:*", "nfse:*", "crm:read"] }
//! ```

use crate::error::{AuthzError, Result};
use crate::scope::{Scope, ScopeConvention, ScopeSet, UNIVERSAL_WILDCARD};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// ERP modules a scope namespace can refer to
pub const MODULES: [&str; 6] = ["crm", "finance", "nfse", "projects", "reports", "settings"];

/// Immutable mapping from role name to granted scopes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleTable {
    convention: ScopeConvention,
    roles: BTreeMap<String, ScopeSet>,
}

impl RoleTable {
    /// The ERP's built-in roles, written in the given convention
    pub fn builtin(convention: ScopeConvention) -> Self {
        let scope = |ns: &str, action: &str| convention.join(&[ns, action]);
        let all = |ns: &str| convention.join(&[ns, "*"]);

        let mut roles = BTreeMap::new();
        roles.insert("owner".to_string(), ScopeSet::from_iter([UNIVERSAL_WILDCARD]));
        roles.insert("admin".to_string(), MODULES.iter().map(|ns| all(ns)).collect());
        roles.insert(
            "finance".to_string(),
            ScopeSet::from_iter([
                all("finance"),
                all("nfse"),
                scope("reports", "read"),
                scope("crm", "read"),
            ]),
        );
        roles.insert(
            "sales".to_string(),
            ScopeSet::from_iter([
                all("crm"),
                scope("projects", "read"),
                scope("reports", "read"),
            ]),
        );
        roles.insert(
            "projects".to_string(),
            ScopeSet::from_iter([all("projects"), scope("crm", "read")]),
        );
        roles.insert(
            "viewer".to_string(),
            MODULES
                .iter()
                .filter(|ns| **ns != "settings")
                .map(|ns| scope(ns, "read"))
                .collect(),
        );

        debug!("Built-in role table: {} roles ({})", roles.len(), convention);

        Self { convention, roles }
    }

    /// Load and validate a role table from a JSON document
    pub fn from_json(json: &str, convention: ScopeConvention) -> Result<Self> {
        let RoleEntries(raw) = serde_json::from_str(json)?;

        if raw.is_empty() {
            return Err(AuthzError::InvalidInput(
                "Role table defines no roles".to_string(),
            ));
        }

        let mut roles = BTreeMap::new();
        for (role, scopes) in raw {
            let role = role.trim().to_string();
            if role.is_empty() {
                return Err(AuthzError::InvalidInput(
                    "Role name cannot be empty".to_string(),
                ));
            }

            let mut validated = Vec::with_capacity(scopes.len());
            for scope in scopes {
                let parsed = Scope::parse(&scope, convention).map_err(|source| {
                    AuthzError::InvalidScope {
                        role: role.clone(),
                        scope: scope.clone(),
                        source,
                    }
                })?;
                validated.push(parsed);
            }

            if roles.insert(role.clone(), ScopeSet::from(validated)).is_some() {
                return Err(AuthzError::InvalidInput(format!(
                    "Role '{}' is defined more than once",
                    role
                )));
            }
        }

        Ok(Self { convention, roles })
    }

    /// Load and validate a role table from a JSON file
    pub fn from_path(path: impl AsRef<Path>, convention: ScopeConvention) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let table = Self::from_json(&json, convention)?;

        info!("Loaded role table from {}: {} roles", path.display(), table.len());

        Ok(table)
    }

    /// Scopes granted to `role`
    pub fn scopes_for(&self, role: &str) -> Result<&ScopeSet> {
        self.roles
            .get(role)
            .ok_or_else(|| AuthzError::UnknownRole(role.to_string()))
    }

    pub fn contains(&self, role: &str) -> bool {
        self.roles.contains_key(role)
    }

    /// Role names in sorted order
    pub fn roles(&self) -> impl Iterator<Item = &str> + '_ {
        self.roles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn convention(&self) -> ScopeConvention {
        self.convention
    }
}

/// Role document entries in source order, repeated keys included
struct RoleEntries(Vec<(String, Vec<String>)>);

impl<'de> Deserialize<'de> for RoleEntries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RoleEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of role names to scope lists")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Vec<String>>()? {
                    entries.push(entry);
                }
                Ok(RoleEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl Default for RoleTable {
    fn default() -> Self {
        Self::builtin(ScopeConvention::default())
    }
}
