/// Scope authorizer
///
/// The decision procedure behind every page guard and conditional control:
/// a required scope is satisfied by a verbatim grant, by the universal
/// wildcard `*`, or by a namespace wildcard whose prefix it starts with.
/// Required scopes are conjunctive; an empty requirement always passes.

use super::types::{ScopeConvention, ScopeSet, UNIVERSAL_WILDCARD};

/// A single scope or a collection of scopes
///
/// Lets `can` accept `"finance:write"`, `&["crm:read", "crm:write"]`,
/// a `Vec<String>` or a `ScopeSet` on either side.
pub trait ScopeList {
    fn iter_scopes(&self) -> impl Iterator<Item = &str> + '_;
}

impl ScopeList for str {
    fn iter_scopes(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self)
    }
}

impl ScopeList for String {
    fn iter_scopes(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.as_str())
    }
}

impl<T: AsRef<str>> ScopeList for [T] {
    fn iter_scopes(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(AsRef::as_ref)
    }
}

impl<T: AsRef<str>, const N: usize> ScopeList for [T; N] {
    fn iter_scopes(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(AsRef::as_ref)
    }
}

impl<T: AsRef<str>> ScopeList for Vec<T> {
    fn iter_scopes(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(AsRef::as_ref)
    }
}

impl ScopeList for ScopeSet {
    fn iter_scopes(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter()
    }
}

/// Stateless scope authorizer bound to a separator convention
///
/// # Examples
///
/// ```
/// use erp_authz::scope::{Authorizer, ScopeConvention};
///
/// let authorizer = Authorizer::new(ScopeConvention::Dotted);
/// assert!(authorizer.can(&["finance.*"], "finance.invoices.view"));
/// assert!(!authorizer.can(&["finance.*"], "crm.leads.view"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Authorizer {
    convention: ScopeConvention,
}

impl Authorizer {
    pub const fn new(convention: ScopeConvention) -> Self {
        Self { convention }
    }

    pub fn convention(&self) -> ScopeConvention {
        self.convention
    }

    /// Returns `true` iff every required scope is satisfied by `granted`
    pub fn can<G, R>(&self, granted: &G, required: &R) -> bool
    where
        G: ScopeList + ?Sized,
        R: ScopeList + ?Sized,
    {
        required
            .iter_scopes()
            .all(|scope| self.satisfies(granted, scope))
    }

    /// Checks a single required scope against the granted set
    pub fn satisfies<G>(&self, granted: &G, scope: &str) -> bool
    where
        G: ScopeList + ?Sized,
    {
        granted.iter_scopes().any(|grant| self.grants(grant, scope))
    }

    /// Required scopes not satisfied by `granted`, in request order
    ///
    /// Empty exactly when [`Authorizer::can`] returns `true`.
    pub fn missing<G, R>(&self, granted: &G, required: &R) -> Vec<String>
    where
        G: ScopeList + ?Sized,
        R: ScopeList + ?Sized,
    {
        let mut missing: Vec<String> = Vec::new();
        for scope in required.iter_scopes() {
            if !self.satisfies(granted, scope) && !missing.iter().any(|m| m == scope) {
                missing.push(scope.to_string());
            }
        }
        missing
    }

    fn grants(&self, grant: &str, required: &str) -> bool {
        if grant == required || grant == UNIVERSAL_WILDCARD {
            return true;
        }

        match self.convention.wildcard_prefix(grant) {
            Some(prefix) => required.starts_with(prefix),
            None => false,
        }
    }
}

/// Checks `required` against `granted` under the canonical colon convention
///
/// ```
/// use erp_authz::can;
///
/// assert!(can(&["finance:*"], "finance:write"));
/// assert!(!can(&["finance:read"], &["finance:read", "finance:write"]));
/// assert!(can(&[] as &[&str], &[] as &[&str]));
/// ```
pub fn can<G, R>(granted: &G, required: &R) -> bool
where
    G: ScopeList + ?Sized,
    R: ScopeList + ?Sized,
{
    Authorizer::default().can(granted, required)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbatim_grant() {
        assert!(can(&["crm:read"], "crm:read"));
        assert!(!can(&["crm:read"], "crm:write"));
    }

    #[test]
    fn test_universal_wildcard() {
        assert!(can(&["*"], "settings:write"));
        assert!(can(&["*"], "anything at all"));
    }

    #[test]
    fn test_namespace_wildcard_requires_separator() {
        assert!(can(&["finance:*"], "finance:write"));
        assert!(can(&["finance:*"], "finance:invoices:view"));
        assert!(!can(&["finance:*"], "financeiro:write"));
        assert!(!can(&["finance:*"], "finance"));
        assert!(!can(&["finance:*"], "crm:write"));
    }

    #[test]
    fn test_dotted_suffix_ignored_under_colon() {
        assert!(!can(&["finance.*"], "finance.invoices.view"));
        assert!(Authorizer::new(ScopeConvention::Dotted).can(&["finance.*"], "finance.invoices.view"));
    }

    #[test]
    fn test_missing_lists_unsatisfied_in_order() {
        let authorizer = Authorizer::default();
        let missing = authorizer.missing(
            &["crm:*"],
            &["finance:write", "crm:read", "nfse:issue", "finance:write"],
        );
        assert_eq!(missing, vec!["finance:write", "nfse:issue"]);
        assert!(authorizer.missing(&["*"], &["a:b", "c:d"]).is_empty());
    }

    #[test]
    fn test_scope_set_on_both_sides() {
        let granted: ScopeSet = ["reports:read", "crm:*"].into_iter().collect();
        let required: ScopeSet = ["crm:write", "reports:read"].into_iter().collect();
        assert!(can(&granted, &required));
    }

    #[test]
    fn test_owned_string_requirement() {
        let required = String::from("projects:write");
        assert!(can(&vec!["projects:*".to_string()], &required));
    }
}
