use std::collections::BTreeSet;

use crate::models::Caller;

/// MatchPolicy
///
/// How a caller's roles are compared with a rule's required roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// At least one required role must be held.
    Any,
    /// Every required role must be held.
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    Unauthenticated,
    Forbidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    // `*`
    One,
    // `**`
    Many,
}

/// PathPattern
///
/// Ant-style path matcher. Literal segments compare exactly (case-sensitive),
/// `*` matches one segment and `**` matches zero or more. `/` only matches the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn new(pattern: &str) -> Self {
        let segments = split_segments(pattern)
            .map(|s| match s {
                "*" => Segment::One,
                "**" => Segment::Many,
                other => Segment::Literal(other.to_string()),
            })
            .collect();
        Self {
            raw: pattern.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, path: &str) -> bool {
        // "/user/" and "/user" are different resources.
        if path.len() > 1 && path.ends_with('/') && !self.raw.ends_with('/') {
            return false;
        }
        let parts: Vec<&str> = split_segments(path).collect();
        match_segments(&self.segments, &parts)
    }
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn match_segments(pattern: &[Segment], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((Segment::Many, rest)) => {
            (0..=path.len()).any(|skip| match_segments(rest, &path[skip..]))
        }
        Some((Segment::One, rest)) => !path.is_empty() && match_segments(rest, &path[1..]),
        Some((Segment::Literal(lit), rest)) => {
            path.first().is_some_and(|p| p == lit) && match_segments(rest, &path[1..])
        }
    }
}

/// AccessRule
///
/// One path-pattern-to-required-roles mapping. An empty `required_roles` set
/// admits everyone, including anonymous callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRule {
    pub pattern: PathPattern,
    pub required_roles: BTreeSet<String>,
    pub match_policy: MatchPolicy,
}

impl AccessRule {
    pub fn new<I, R>(pattern: &str, required_roles: I, match_policy: MatchPolicy) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self {
            pattern: PathPattern::new(pattern),
            required_roles: required_roles.into_iter().map(Into::into).collect(),
            match_policy,
        }
    }

    pub fn is_permit_all(&self) -> bool {
        self.required_roles.is_empty()
    }

    fn admits(&self, roles: &BTreeSet<String>) -> bool {
        match self.match_policy {
            MatchPolicy::Any => !self.required_roles.is_disjoint(roles),
            MatchPolicy::All => self.required_roles.is_subset(roles),
        }
    }
}

/// AccessPolicy
///
/// An ordered rule list. The first rule whose pattern matches the request path
/// decides; a path that no rule covers is denied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    rules: Vec<AccessRule>,
}

impl AccessPolicy {
    pub fn new(rules: Vec<AccessRule>) -> Self {
        Self { rules }
    }

    pub fn builder() -> AccessPolicyBuilder {
        AccessPolicyBuilder::default()
    }

    pub fn rules(&self) -> &[AccessRule] {
        &self.rules
    }

    /// The first rule covering `path`, if any.
    pub fn rule_for(&self, path: &str) -> Option<&AccessRule> {
        self.rules.iter().find(|rule| rule.pattern.matches(path))
    }

    /// evaluate
    ///
    /// Pure decision for `(path, caller)`. Roles are flat: holding "admin" says
    /// nothing about "user" unless a rule lists both.
    pub fn evaluate(&self, path: &str, caller: &Caller) -> Decision {
        let Some(rule) = self.rule_for(path) else {
            return Decision::Deny(deny_reason(caller));
        };

        if rule.is_permit_all() {
            return Decision::Allow;
        }

        match caller {
            Caller::Anonymous => Decision::Deny(DenyReason::Unauthenticated),
            Caller::Authenticated(principal) if rule.admits(&principal.roles) => Decision::Allow,
            Caller::Authenticated(_) => Decision::Deny(DenyReason::Forbidden),
        }
    }
}

fn deny_reason(caller: &Caller) -> DenyReason {
    match caller {
        Caller::Anonymous => DenyReason::Unauthenticated,
        Caller::Authenticated(_) => DenyReason::Forbidden,
    }
}

impl Default for AccessPolicy {
    /// `/admin` needs admin, `/user` needs user or admin, `/` is open.
    fn default() -> Self {
        Self::builder()
            .has_role("/admin", "admin")
            .has_any_role("/user", ["user", "admin"])
            .permit_all("/")
            .build()
    }
}

/// AccessPolicyBuilder
///
/// Collects rules in declaration order. `build` hands back a plain rule list.
#[derive(Debug, Default)]
pub struct AccessPolicyBuilder {
    rules: Vec<AccessRule>,
}

impl AccessPolicyBuilder {
    pub fn permit_all(mut self, pattern: &str) -> Self {
        self.rules
            .push(AccessRule::new(pattern, Vec::<String>::new(), MatchPolicy::Any));
        self
    }

    pub fn has_role(mut self, pattern: &str, role: &str) -> Self {
        self.rules
            .push(AccessRule::new(pattern, [role], MatchPolicy::Any));
        self
    }

    pub fn has_any_role<I, R>(mut self, pattern: &str, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        self.rules
            .push(AccessRule::new(pattern, roles, MatchPolicy::Any));
        self
    }

    pub fn has_all_roles<I, R>(mut self, pattern: &str, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        self.rules
            .push(AccessRule::new(pattern, roles, MatchPolicy::All));
        self
    }

    pub fn build(self) -> AccessPolicy {
        AccessPolicy::new(self.rules)
    }
}
