//! Core authorization types

use crate::scope::{Authorizer, ScopeConvention, ScopeList, ScopeSet};
use serde::Serialize;

/// Member identifier
pub type MemberId = String;

/// Organization (tenant) identifier
pub type OrganizationId = String;

/// Role name as it appears in the role table
pub type RoleName = String;

/// Authenticated member of an organization
///
/// Built once per request by [`crate::session::SessionResolver`] and passed
/// explicitly to guards. The scope set is fixed for the principal's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    /// Member identifier (e.g., "mbr_01h9...")
    pub member_id: MemberId,

    /// Organization the member is acting in
    pub organization_id: OrganizationId,

    /// Role resolved from the session
    pub role: RoleName,

    /// Scopes granted through the role
    scopes: ScopeSet,

    /// Separator convention the scopes were issued under
    convention: ScopeConvention,
}

impl Principal {
    /// Create a principal with an explicit scope set
    pub fn new(
        member_id: impl Into<MemberId>,
        organization_id: impl Into<OrganizationId>,
        role: impl Into<RoleName>,
        scopes: ScopeSet,
    ) -> Self {
        Self {
            member_id: member_id.into(),
            organization_id: organization_id.into(),
            role: role.into(),
            scopes,
            convention: ScopeConvention::default(),
        }
    }

    /// Interpret this principal's scopes under another convention
    pub fn with_convention(mut self, convention: ScopeConvention) -> Self {
        self.convention = convention;
        self
    }

    pub fn scopes(&self) -> &ScopeSet {
        &self.scopes
    }

    pub fn convention(&self) -> ScopeConvention {
        self.convention
    }

    /// Whether this principal holds every scope in `required`
    ///
    /// Used by conditional UI rendering, e.g. showing a "new charge" button
    /// only when `finance:write` is granted.
    pub fn can<R: ScopeList + ?Sized>(&self, required: &R) -> bool {
        Authorizer::new(self.convention).can(&self.scopes, required)
    }

    /// Required scopes this principal lacks
    pub fn missing<R: ScopeList + ?Sized>(&self, required: &R) -> Vec<String> {
        Authorizer::new(self.convention).missing(&self.scopes, required)
    }
}
