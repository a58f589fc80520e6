/// Scope grammar and the scope authorizer
///
/// This module holds the single predicate every guard in the ERP relies on,
/// together with the validation applied when scopes are loaded into role tables.
///
/// # Examples
///
/// ```
/// use erp_authz::scope::{can, Scope, ScopeConvention};
///
/// let granted = ["finance:*", "crm:read"];
/// assert!(can(&granted, &["finance:write", "crm:read"]));
/// assert!(!can(&granted, "crm:write"));
///
/// assert!(Scope::parse("finance:*", ScopeConvention::Colon).is_ok());
/// assert!(Scope::parse("fin*:write", ScopeConvention::Colon).is_err());
/// ```

mod types;
mod matcher;


pub use types::{Scope, ScopeConvention, ScopeError, ScopeResult, ScopeSet, UNIVERSAL_WILDCARD};
pub use matcher::{can, Authorizer, ScopeList};
