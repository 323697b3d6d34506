use role_gate::{
    AccessPolicy, Caller, Decision, DenyReason, Principal,
    policy::{AccessRule, MatchPolicy, PathPattern},
};

// --- Helpers ---

fn caller(username: &str, roles: &[&str]) -> Caller {
    Caller::Authenticated(Principal {
        username: username.to_string(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
    })
}

const FORBIDDEN: Decision = Decision::Deny(DenyReason::Forbidden);
const UNAUTHENTICATED: Decision = Decision::Deny(DenyReason::Unauthenticated);

// --- Default rule table ---

#[test]
fn test_root_is_open_to_everyone() {
    let policy = AccessPolicy::default();
    assert_eq!(policy.evaluate("/", &Caller::Anonymous), Decision::Allow);
    assert_eq!(policy.evaluate("/", &caller("warrior", &["user"])), Decision::Allow);
    assert_eq!(policy.evaluate("/", &caller("nobody", &[])), Decision::Allow);
}

#[test]
fn test_user_path_accepts_user_or_admin() {
    let policy = AccessPolicy::default();
    assert_eq!(policy.evaluate("/user", &caller("warrior", &["user"])), Decision::Allow);
    assert_eq!(policy.evaluate("/user", &caller("abhishek", &["admin"])), Decision::Allow);
    assert_eq!(policy.evaluate("/user", &caller("guest", &["guest"])), FORBIDDEN);
    assert_eq!(policy.evaluate("/user", &Caller::Anonymous), UNAUTHENTICATED);
}

#[test]
fn test_admin_path_requires_admin() {
    let policy = AccessPolicy::default();
    assert_eq!(policy.evaluate("/admin", &caller("abhishek", &["admin"])), Decision::Allow);
    assert_eq!(policy.evaluate("/admin", &caller("warrior", &["user"])), FORBIDDEN);
    assert_eq!(policy.evaluate("/admin", &Caller::Anonymous), UNAUTHENTICATED);
}

#[test]
fn test_authenticated_caller_without_roles_is_forbidden_not_unauthenticated() {
    let policy = AccessPolicy::default();
    assert_eq!(policy.evaluate("/user", &caller("empty", &[])), FORBIDDEN);
    assert_eq!(policy.evaluate("/admin", &caller("empty", &[])), FORBIDDEN);
}

#[test]
fn test_unmatched_path_is_denied_by_default() {
    let policy = AccessPolicy::default();
    assert_eq!(policy.evaluate("/settings", &Caller::Anonymous), UNAUTHENTICATED);
    assert_eq!(policy.evaluate("/settings", &caller("abhishek", &["admin"])), FORBIDDEN);
}

#[test]
fn test_paths_are_case_sensitive_and_exact() {
    let policy = AccessPolicy::default();
    let admin = caller("abhishek", &["admin"]);
    assert_eq!(policy.evaluate("/Admin", &admin), FORBIDDEN);
    assert_eq!(policy.evaluate("/admin/", &admin), FORBIDDEN);
    assert_eq!(policy.evaluate("/admin/extra", &admin), FORBIDDEN);
}

#[test]
fn test_user_role_never_reaches_admin() {
    let policy = AccessPolicy::default();
    let user = caller("warrior", &["user"]);
    for path in ["/admin", "/admin/", "/ADMIN", "/admin/../admin", "//admin"] {
        assert_ne!(policy.evaluate(path, &user), Decision::Allow, "path {path}");
    }
}

#[test]
fn test_default_rules_keep_declaration_order() {
    let policy = AccessPolicy::default();
    let patterns: Vec<&str> = policy.rules().iter().map(|r| r.pattern.as_str()).collect();
    assert_eq!(patterns, vec!["/admin", "/user", "/"]);
    assert!(policy.rules()[2].is_permit_all());
}

#[test]
fn test_evaluation_is_idempotent() {
    let policy = AccessPolicy::default();
    let user = caller("warrior", &["user"]);
    let first = policy.evaluate("/admin", &user);
    for _ in 0..10 {
        assert_eq!(policy.evaluate("/admin", &user), first);
    }
}

// --- Match policies and ordering ---

#[test]
fn test_all_policy_requires_superset() {
    let policy = AccessPolicy::builder()
        .has_all_roles("/reports", ["auditor", "admin"])
        .build();

    assert_eq!(
        policy.evaluate("/reports", &caller("a", &["auditor", "admin", "user"])),
        Decision::Allow
    );
    assert_eq!(policy.evaluate("/reports", &caller("b", &["admin"])), FORBIDDEN);
}

#[test]
fn test_first_matching_rule_wins() {
    let policy = AccessPolicy::builder()
        .permit_all("/docs/public")
        .has_role("/docs/**", "staff")
        .build();

    assert_eq!(policy.evaluate("/docs/public", &Caller::Anonymous), Decision::Allow);
    assert_eq!(policy.evaluate("/docs/internal", &Caller::Anonymous), UNAUTHENTICATED);
}

#[test]
fn test_explicit_rule_list_matches_builder() {
    let explicit = AccessPolicy::new(vec![
        AccessRule::new("/admin", ["admin"], MatchPolicy::Any),
        AccessRule::new("/user", ["user", "admin"], MatchPolicy::Any),
        AccessRule::new("/", Vec::<String>::new(), MatchPolicy::Any),
    ]);
    assert_eq!(explicit, AccessPolicy::default());
}

// --- Path patterns ---

#[test]
fn test_path_pattern_wildcards() {
    let one = PathPattern::new("/api/*/users");
    assert!(one.matches("/api/v1/users"));
    assert!(!one.matches("/api/users"));
    assert!(!one.matches("/api/v1/v2/users"));

    let many = PathPattern::new("/api/**");
    assert!(many.matches("/api"));
    assert!(many.matches("/api/v1/users"));
    assert!(!many.matches("/other"));

    let root = PathPattern::new("/");
    assert!(root.matches("/"));
    assert!(!root.matches("/user"));
}
