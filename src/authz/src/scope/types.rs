/// Scope type definitions and validation
///
/// Provides the scope grammar (separator convention), the validated `Scope`
/// type used when loading role tables, and the `ScopeSet` held by principals.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The universal wildcard, satisfying every required scope
pub const UNIVERSAL_WILDCARD: &str = "*";

/// Result type for scope operations
pub type ScopeResult<T> = Result<T, ScopeError>;

/// Errors that can occur while validating a scope string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// Empty scope string provided
    #[error("Scope cannot be empty")]
    Empty,

    /// Scope segment is empty (e.g. `finance::write`)
    #[error("Scope segment cannot be empty")]
    EmptySegment,

    /// Whitespace or control characters inside a scope
    #[error("Invalid scope format: {0}")]
    InvalidFormat(String),

    /// Wildcard embedded in a segment or not in final position
    #[error("Invalid wildcard usage: {0}")]
    InvalidWildcard(String),

    /// Unrecognized separator convention name
    #[error("Unknown scope convention: {0}")]
    UnknownConvention(String),
}

/// Separator grammar in force for scope strings
///
/// - `Colon`: `finance:write`, namespace wildcard `finance:*` (canonical)
/// - `Dotted`: `finance.invoices.view`, namespace wildcard `finance.*`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeConvention {
    #[default]
    Colon,
    Dotted,
}

impl ScopeConvention {
    /// Segment separator for this convention
    pub const fn separator(self) -> char {
        match self {
            Self::Colon => ':',
            Self::Dotted => '.',
        }
    }

    /// Suffix marking a namespace wildcard (`:*` or `.*`)
    pub const fn wildcard_suffix(self) -> &'static str {
        match self {
            Self::Colon => ":*",
            Self::Dotted => ".*",
        }
    }

    /// Returns the prefix a namespace wildcard grants, separator included
    ///
    /// `finance:*` yields `finance:`, so `financeiro:write` never matches.
    /// Returns `None` when `scope` is not a namespace wildcard.
    pub fn wildcard_prefix(self, scope: &str) -> Option<&str> {
        if scope.len() > 2 && scope.ends_with(self.wildcard_suffix()) {
            Some(&scope[..scope.len() - 1])
        } else {
            None
        }
    }

    /// Joins segments with this convention's separator
    pub fn join(self, segments: &[&str]) -> String {
        let sep = match self {
            Self::Colon => ":",
            Self::Dotted => ".",
        };
        segments.join(sep)
    }
}

impl FromStr for ScopeConvention {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "colon" | ":" => Ok(Self::Colon),
            "dotted" | "dot" | "." => Ok(Self::Dotted),
            other => Err(ScopeError::UnknownConvention(other.to_string())),
        }
    }
}

impl fmt::Display for ScopeConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Colon => f.write_str("colon"),
            Self::Dotted => f.write_str("dotted"),
        }
    }
}

/// A validated scope string
///
/// Validation only applies when scopes enter the system (role tables);
/// the authorizer itself matches raw strings and never fails.
///
/// # Examples
///
/// ```
/// use erp_authz::scope::{Scope, ScopeConvention};
///
/// let scope = Scope::parse("finance:*", ScopeConvention::Colon).unwrap();
/// assert!(scope.is_namespace_wildcard());
/// assert_eq!(scope.namespace(), "finance");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope {
    raw: String,
    segments: Vec<String>,
    convention: ScopeConvention,
}

impl Scope {
    /// Parses and validates a scope under the given convention
    pub fn parse(s: &str, convention: ScopeConvention) -> ScopeResult<Self> {
        if s.is_empty() {
            return Err(ScopeError::Empty);
        }

        if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ScopeError::InvalidFormat(format!(
                "'{}' contains whitespace or control characters",
                s
            )));
        }

        if s == UNIVERSAL_WILDCARD {
            return Ok(Self {
                raw: s.to_string(),
                segments: vec![UNIVERSAL_WILDCARD.to_string()],
                convention,
            });
        }

        let segments: Vec<String> = s
            .split(convention.separator())
            .map(str::to_string)
            .collect();

        let last = segments.len() - 1;
        for (idx, segment) in segments.iter().enumerate() {
            if segment.is_empty() {
                return Err(ScopeError::EmptySegment);
            }

            if segment.contains('*') && segment != UNIVERSAL_WILDCARD {
                return Err(ScopeError::InvalidWildcard(format!(
                    "Wildcards must be standalone: '{}'",
                    segment
                )));
            }

            if segment == UNIVERSAL_WILDCARD && idx < last {
                return Err(ScopeError::InvalidWildcard(format!(
                    "Wildcard can only appear as the final segment: '{}'",
                    s
                )));
            }
        }

        Ok(Self {
            raw: s.to_string(),
            segments,
            convention,
        })
    }

    /// Returns the raw scope string
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn convention(&self) -> ScopeConvention {
        self.convention
    }

    /// The leading segment (`finance` in `finance:write`)
    pub fn namespace(&self) -> &str {
        &self.segments[0]
    }

    /// Whether this is the universal wildcard `*`
    pub fn is_universal(&self) -> bool {
        self.raw == UNIVERSAL_WILDCARD
    }

    /// Whether this is a namespace wildcard such as `finance:*`
    pub fn is_namespace_wildcard(&self) -> bool {
        !self.is_universal() && self.convention.wildcard_prefix(&self.raw).is_some()
    }

    pub fn into_string(self) -> String {
        self.raw
    }
}

impl AsRef<str> for Scope {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Flat set of granted scopes
///
/// Insertion order is irrelevant and duplicates collapse. Iteration is
/// sorted, which keeps serialized output stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeSet(BTreeSet<String>);

impl ScopeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Verbatim membership, no wildcard expansion
    pub fn contains(&self, scope: &str) -> bool {
        self.0.contains(scope)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<Scope>> for ScopeSet {
    fn from(scopes: Vec<Scope>) -> Self {
        scopes.into_iter().map(Scope::into_string).collect()
    }
}
