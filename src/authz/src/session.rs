//! Per-request session resolution
//!
//! The identity provider hands over a member id, an organization id and a
//! role. [`SessionResolver`] turns those claims into an explicit [`Principal`]
//! with its scopes resolved from the role table. Nothing is read from
//! ambient state: every guard receives the principal as a value.

use crate::error::{AuthzError, Result};
use crate::roles::RoleTable;
use crate::types::{MemberId, OrganizationId, Principal, RoleName};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Identity claims of an authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub member_id: MemberId,
    pub organization_id: OrganizationId,
    pub role: RoleName,
}

impl SessionClaims {
    pub fn new(
        member_id: impl Into<MemberId>,
        organization_id: impl Into<OrganizationId>,
        role: impl Into<RoleName>,
    ) -> Self {
        Self {
            member_id: member_id.into(),
            organization_id: organization_id.into(),
            role: role.into(),
        }
    }
}

/// Resolves session claims into principals
#[derive(Debug, Clone)]
pub struct SessionResolver {
    roles: Arc<RoleTable>,
}

impl SessionResolver {
    pub fn new(roles: Arc<RoleTable>) -> Self {
        Self { roles }
    }

    pub fn role_table(&self) -> &RoleTable {
        &self.roles
    }

    /// Build the principal for one request
    ///
    /// Fails with `InvalidInput` on blank identifiers and `UnknownRole` when
    /// the role is missing from the table.
    pub fn resolve(&self, claims: &SessionClaims) -> Result<Principal> {
        if claims.member_id.trim().is_empty() {
            return Err(AuthzError::InvalidInput(
                "Session member id cannot be empty".to_string(),
            ));
        }

        if claims.organization_id.trim().is_empty() {
            return Err(AuthzError::InvalidInput(
                "Session organization id cannot be empty".to_string(),
            ));
        }

        let scopes = match self.roles.scopes_for(&claims.role) {
            Ok(scopes) => scopes.clone(),
            Err(e) => {
                warn!(
                    "Session for member={} org={} carries unknown role '{}'",
                    claims.member_id, claims.organization_id, claims.role
                );
                return Err(e);
            }
        };

        debug!(
            "Resolved session: member={}, org={}, role={}, scopes={}",
            claims.member_id,
            claims.organization_id,
            claims.role,
            scopes.len()
        );

        Ok(Principal::new(
            claims.member_id.clone(),
            claims.organization_id.clone(),
            claims.role.clone(),
            scopes,
        )
        .with_convention(self.roles.convention()))
    }
}

impl Default for SessionResolver {
    fn default() -> Self {
        Self::new(Arc::new(RoleTable::default()))
    }
}
