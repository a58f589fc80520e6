/// Benchmarks for the scope authorizer
///
/// Measures performance of:
/// - Single-scope checks (verbatim, namespace wildcard, universal, miss)
/// - Conjunctive checks against growing grant sets
/// - Scope validation
/// - Full guard evaluation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use erp_authz::scope::{can, Scope, ScopeConvention, ScopeSet};
use erp_authz::{PageGuard, SessionClaims, SessionResolver};

fn bench_single_scope(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_scope");

    let cases = [
        ("verbatim", vec!["crm:read", "finance:write"], "finance:write"),
        ("namespace_wildcard", vec!["crm:read", "finance:*"], "finance:write"),
        ("universal", vec!["*"], "settings:write"),
        ("miss", vec!["crm:read", "finance:*"], "nfse:issue"),
    ];

    for (name, granted, required) in cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), &granted, |b, granted| {
            b.iter(|| can(black_box(granted), black_box(required)));
        });
    }

    group.finish();
}

fn bench_grant_set_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("grant_set_size");

    for size in [4usize, 16, 64, 256] {
        let granted: ScopeSet = (0..size).map(|i| format!("module{}:action{}", i, i)).collect();
        let required = ["module3:action3", "module1:action1"];

        group.bench_with_input(BenchmarkId::from_parameter(size), &granted, |b, granted| {
            b.iter(|| can(black_box(granted), black_box(&required)));
        });
    }

    group.finish();
}

fn bench_scope_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("scope_parsing");

    let cases = [
        ("simple", "crm:read"),
        ("wildcard", "finance:*"),
        ("deep", "settings:members:invite:bulk"),
    ];

    for (name, scope) in cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), &scope, |b, &s| {
            b.iter(|| Scope::parse(black_box(s), ScopeConvention::Colon));
        });
    }

    group.finish();
}

fn bench_guard_check(c: &mut Criterion) {
    let sessions = SessionResolver::default();
    let principal = sessions
        .resolve(&SessionClaims::new("mbr-1", "org-acme", "finance"))
        .unwrap();
    let guard = PageGuard::new("nfse/issue", ["nfse:issue", "finance:read"]);

    c.bench_function("guard_check", |b| {
        b.iter(|| guard.check(black_box(Some(&principal))));
    });

    c.bench_function("session_resolve", |b| {
        let claims = SessionClaims::new("mbr-1", "org-acme", "sales");
        b.iter(|| sessions.resolve(black_box(&claims)));
    });
}

criterion_group!(
    benches,
    bench_single_scope,
    bench_grant_set_size,
    bench_scope_parsing,
    bench_guard_check
);
criterion_main!(benches);
