//! Page and control guards
//!
//! A [`PageGuard`] pairs a target (page route or action) with the scopes it
//! demands. Guards are evaluated against an explicit, optional principal:
//! a request without a principal short-circuits to `Forbidden` before the
//! authorizer is consulted.
//!
//! # Example
//!
//! ```rust
//! use erp_authz::guard::{PageGuard, GuardOutcome};
//! use erp_authz::session::{SessionClaims, SessionResolver};
//!
//! let sessions = SessionResolver::default();
//! let principal = sessions
//!     .resolve(&SessionClaims::new("mbr-1", "org-acme", "finance"))
//!     .unwrap();
//!
//! let guard = PageGuard::new("finance/charges/new", ["finance:write"]);
//! assert_eq!(guard.check(Some(&principal)).outcome, GuardOutcome::Allow);
//! assert_eq!(guard.check(None).outcome, GuardOutcome::Forbidden);
//! ```

pub mod decision;

pub use decision::{DecisionReason, GuardDecision, GuardOutcome};

use crate::scope::ScopeList;
use crate::types::Principal;
use tracing::{debug, info};

/// Guard for one page or action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageGuard {
    target: String,
    required: Vec<String>,
}

impl PageGuard {
    /// Create a guard demanding every scope in `required`
    ///
    /// An empty requirement admits any resolved principal.
    pub fn new<I, S>(target: impl Into<String>, required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target: target.into(),
            required: required.into_iter().map(Into::into).collect(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Evaluate the guard for the current request
    pub fn check(&self, principal: Option<&Principal>) -> GuardDecision {
        let Some(principal) = principal else {
            info!("Guard {}: no principal, forbidden", self.target);
            return GuardDecision::no_principal(&self.target, self.required.clone());
        };

        let missing = principal.missing(&self.required);
        if missing.is_empty() {
            debug!(
                "Guard {}: allow member={} org={}",
                self.target, principal.member_id, principal.organization_id
            );
            GuardDecision::allow(
                &self.target,
                &principal.member_id,
                &principal.organization_id,
                self.required.clone(),
            )
        } else {
            info!(
                "Guard {}: forbidden member={} org={} missing={:?}",
                self.target, principal.member_id, principal.organization_id, missing
            );
            GuardDecision::missing_scopes(
                &self.target,
                &principal.member_id,
                &principal.organization_id,
                self.required.clone(),
                missing,
            )
        }
    }

    /// Shorthand for `check(..).allowed`
    pub fn allows(&self, principal: Option<&Principal>) -> bool {
        principal.is_some_and(|p| p.can(&self.required))
    }
}

/// Whether a UI control demanding `required` should be rendered at all
///
/// Without a principal nothing guarded is rendered.
pub fn visible<R: ScopeList + ?Sized>(principal: Option<&Principal>, required: &R) -> bool {
    principal.is_some_and(|p| p.can(required))
}
