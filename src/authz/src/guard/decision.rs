//! Guard decision types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a guarded request ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardOutcome {
    /// Render the page / perform the action
    Allow,
    /// Route to the dedicated "forbidden" view
    Forbidden,
}

/// Reason for a guard decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DecisionReason {
    /// Every required scope was satisfied
    Granted,

    /// No principal could be resolved for the request
    NoPrincipal,

    /// The principal lacks one or more required scopes
    MissingScopes { missing: Vec<String> },
}

/// Guard decision with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardDecision {
    /// Unique decision ID
    pub id: String,

    /// Whether the request is allowed
    pub allowed: bool,

    pub outcome: GuardOutcome,

    /// Page or action that was guarded
    pub target: String,

    pub reason: DecisionReason,

    /// Member the decision applies to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,

    /// Scopes the target demanded
    pub required: Vec<String>,

    /// Decision timestamp (milliseconds since epoch)
    pub timestamp: u64,
}

impl GuardDecision {
    fn new(
        target: impl Into<String>,
        reason: DecisionReason,
        principal: Option<(&str, &str)>,
        required: Vec<String>,
    ) -> Self {
        let allowed = matches!(reason, DecisionReason::Granted);

        Self {
            id: Uuid::new_v4().to_string(),
            allowed,
            outcome: if allowed { GuardOutcome::Allow } else { GuardOutcome::Forbidden },
            target: target.into(),
            reason,
            member_id: principal.map(|(member, _)| member.to_string()),
            organization_id: principal.map(|(_, org)| org.to_string()),
            required,
            timestamp: chrono::Utc::now().timestamp_millis().max(0) as u64,
        }
    }

    /// Create an allow decision
    pub fn allow(
        target: impl Into<String>,
        member_id: &str,
        organization_id: &str,
        required: Vec<String>,
    ) -> Self {
        Self::new(
            target,
            DecisionReason::Granted,
            Some((member_id, organization_id)),
            required,
        )
    }

    /// Create a deny decision for a principal lacking scopes
    pub fn missing_scopes(
        target: impl Into<String>,
        member_id: &str,
        organization_id: &str,
        required: Vec<String>,
        missing: Vec<String>,
    ) -> Self {
        Self::new(
            target,
            DecisionReason::MissingScopes { missing },
            Some((member_id, organization_id)),
            required,
        )
    }

    /// Create a deny decision for a request without a principal
    pub fn no_principal(target: impl Into<String>, required: Vec<String>) -> Self {
        Self::new(target, DecisionReason::NoPrincipal, None, required)
    }

    pub fn is_forbidden(&self) -> bool {
        self.outcome == GuardOutcome::Forbidden
    }
}
