//! # ERP Scope Authorization
//!
//! Scope-based authorization for the multi-tenant ERP (CRM, billing, NFS-e,
//! projects, reporting).
//!
//! ## Features
//!
//! - **Scope authorizer**: a pure `can()` predicate over granted scopes with
//!   `*` and `<namespace>:*` wildcards
//! - **Static role table** built in or loaded from JSON, validated at load time
//! - **Explicit sessions**: a `Principal` is resolved once per request
//! - **Page guards** with structured allow / forbidden decisions
//! - **HTTP check service** (`authz-server`)
//!
//! ## Example
//!
//! ```rust
//! use erp_authz::{can, PageGuard, SessionClaims, SessionResolver};
//!
//! // Pure predicate
//! assert!(can(&["finance:*"], "finance:write"));
//! assert!(!can(&["finance:*"], "crm:write"));
//!
//! // Per-request flow
//! let sessions = SessionResolver::default();
//! let principal = sessions
//!     .resolve(&SessionClaims::new("mbr-1", "org-acme", "sales"))
//!     .unwrap();
//!
//! let guard = PageGuard::new("crm/pipeline", ["crm:write"]);
//! assert!(guard.check(Some(&principal)).allowed);
//! ```

pub mod types;
pub mod scope;
pub mod roles;
pub mod session;
pub mod guard;
pub mod config;
pub mod error;
pub mod server;

// Re-export commonly used types
pub use types::{Principal, MemberId, OrganizationId, RoleName};
pub use scope::{can, Authorizer, Scope, ScopeConvention, ScopeError, ScopeList, ScopeSet};
pub use roles::RoleTable;
pub use session::{SessionClaims, SessionResolver};
pub use guard::{visible, DecisionReason, GuardDecision, GuardOutcome, PageGuard};
pub use config::AuthzConfig;
pub use error::{AuthzError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
