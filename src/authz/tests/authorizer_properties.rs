//! Property tests for the scope authorizer
//!
//! Wildcard semantics, the vacuous empty requirement, conjunction and
//! order independence, checked over generated scope sets.

use erp_authz::scope::{can, Authorizer, ScopeConvention};
use proptest::prelude::*;

fn namespace() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("crm".to_string()),
        Just("finance".to_string()),
        Just("nfse".to_string()),
        Just("projects".to_string()),
        Just("reports".to_string()),
        "[a-z]{2,8}",
    ]
}

fn action() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("read".to_string()),
        Just("write".to_string()),
        Just("delete".to_string()),
        "[a-z]{2,8}",
    ]
}

fn scope() -> impl Strategy<Value = String> {
    (namespace(), action()).prop_map(|(ns, action)| format!("{}:{}", ns, action))
}

fn granted() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            4 => scope(),
            1 => namespace().prop_map(|ns| format!("{}:*", ns)),
        ],
        0..8,
    )
}

fn required() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(scope(), 0..5)
}

proptest! {
    #[test]
    fn universal_wildcard_grants_everything(mut g in granted(), r in scope()) {
        g.push("*".to_string());
        prop_assert!(can(&g, &r));
    }

    #[test]
    fn namespace_wildcard_stays_in_namespace(action in action(), other in action()) {
        let g = ["finance:*"];
        let inside = format!("finance:{}", action);
        let outside = format!("crm:{}", other);
        prop_assert!(can(&g, &inside));
        prop_assert!(!can(&g, &outside));
    }

    #[test]
    fn verbatim_membership_grants(g in granted(), idx in any::<prop::sample::Index>()) {
        prop_assume!(!g.is_empty());
        let r = &g[idx.index(g.len())];
        prop_assert!(can(&g, r));
    }

    #[test]
    fn empty_requirement_always_passes(g in granted()) {
        prop_assert!(can(&g, &Vec::<String>::new()));
    }

    #[test]
    fn empty_grant_denies_any_scope(r in scope()) {
        prop_assert!(!can(&Vec::<String>::new(), &r));
    }

    #[test]
    fn conjunction_matches_each_clause(g in granted(), r in required()) {
        let each = r.iter().all(|scope| can(&g, scope));
        prop_assert_eq!(can(&g, &r), each);
    }

    #[test]
    fn order_never_matters(g in granted(), r in required()) {
        let mut g_rev = g.clone();
        g_rev.reverse();
        let mut r_rev = r.clone();
        r_rev.reverse();

        let expected = can(&g, &r);
        prop_assert_eq!(can(&g_rev, &r), expected);
        prop_assert_eq!(can(&g, &r_rev), expected);
        prop_assert_eq!(can(&g_rev, &r_rev), expected);
    }

    #[test]
    fn missing_is_empty_iff_can(g in granted(), r in required()) {
        let authorizer = Authorizer::new(ScopeConvention::Colon);
        let missing = authorizer.missing(&g, &r);
        prop_assert_eq!(missing.is_empty(), authorizer.can(&g, &r));
        for scope in &missing {
            prop_assert!(!authorizer.can(&g, scope));
        }
    }

    #[test]
    fn dotted_convention_mirrors_colon(g in granted(), r in required()) {
        let to_dotted = |s: &String| s.replace(':', ".");
        let g_dot: Vec<String> = g.iter().map(to_dotted).collect();
        let r_dot: Vec<String> = r.iter().map(to_dotted).collect();

        prop_assert_eq!(
            Authorizer::new(ScopeConvention::Dotted).can(&g_dot, &r_dot),
            can(&g, &r)
        );
    }
}

#[test]
fn documented_examples() {
    assert!(!can(&[] as &[&str], "finance:write"));
    assert!(!can(&["finance:read"], &["finance:read", "finance:write"]));
    assert!(can(&["finance:read", "finance:write"], &["finance:read", "finance:write"]));
    assert!(can(&[] as &[&str], &[] as &[&str]));
}
