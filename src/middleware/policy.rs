//! Route authorization policy.
//!
//! The policy is an ordered list of rules. A request is checked against them
//! top to bottom and the first rule whose path pattern and method both match
//! decides the outcome. Requests that match no rule require an authenticated
//! identity.
//!
//! Path patterns are split on `/`:
//!
//! - a literal segment matches exactly that segment
//! - `*` matches exactly one non-empty segment
//! - `**` matches zero or more segments
//!
//! A trailing slash produces an empty final segment, so `/v1.0/user/delete/`
//! does not match `/v1.0/user/delete/*`.

use arrest_auth::{AuthenticatedIdentity, roles};
use axum::http::Method;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Single,
    Multi,
}

/// Compiled path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn new(pattern: &str) -> Self {
        let segments = split(pattern)
            .map(|segment| match segment {
                "*" => Segment::Single,
                "**" => Segment::Multi,
                literal => Segment::Literal(literal.to_string()),
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
        let parts: Vec<&str> = split(path).collect();
        match_segments(&self.segments, &parts)
    }
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.strip_prefix('/').unwrap_or(path).split('/')
}

fn match_segments(pattern: &[Segment], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((Segment::Multi, rest)) => {
            (0..=path.len()).any(|skip| match_segments(rest, &path[skip..]))
        }
        Some((Segment::Single, rest)) => match path.split_first() {
            Some((first, tail)) if !first.is_empty() => match_segments(rest, tail),
            _ => false,
        },
        Some((Segment::Literal(literal), rest)) => match path.split_first() {
            Some((first, tail)) if first == literal => match_segments(rest, tail),
            _ => false,
        },
    }
}

/// Who may pass a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    AnyRole(Vec<String>),
}

impl Access {
    pub fn any_role(roles: &[&str]) -> Self {
        Access::AnyRole(roles.iter().map(|r| r.to_string()).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub pattern: PathPattern,
    /// `None` matches every method.
    pub method: Option<Method>,
    pub access: Access,
}

impl Rule {
    pub fn new(pattern: &str, method: Option<Method>, access: Access) -> Self {
        Self {
            pattern: PathPattern::new(pattern),
            method,
            access,
        }
    }

    fn matches(&self, path: &str, method: &Method) -> bool {
        self.method.as_ref().is_none_or(|m| m == method) && self.pattern.matches(path)
    }
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

#[derive(Debug, Clone)]
pub struct PolicyTable {
    rules: Vec<Rule>,
    fallback: Access,
}

impl PolicyTable {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            fallback: Access::Authenticated,
        }
    }

    /// The route table served by this API.
    pub fn standard() -> Self {
        let mut rules = Vec::new();

        for pattern in [
            "/swagger-ui.html",
            "/v3/api-docs/**",
            "/swagger-ui/**",
            "/webjars/swagger-ui/**",
        ] {
            rules.push(Rule::new(pattern, None, Access::Public));
        }

        rules.push(Rule::new(
            "/v1.0/user/delete/*",
            Some(Method::DELETE),
            Access::any_role(&[roles::PERSONE]),
        ));
        rules.push(Rule::new(
            "/arrestManagement/create_arrest",
            Some(Method::POST),
            Access::any_role(&[roles::ADMIN]),
        ));
        rules.push(Rule::new(
            "/arrestManagement/get_arrest/*",
            Some(Method::GET),
            Access::any_role(&[roles::ADMIN, roles::PERSONE]),
        ));

        for pattern in [
            "/v1.0/auth/registration",
            "/v1.0/auth/login",
            "/v1.0/auth/verify_user",
            "/v1.0/token/generate-access-token",
            "/v1.0/token/generate-refresh-token",
            "/v1.0/email",
        ] {
            rules.push(Rule::new(pattern, Some(Method::POST), Access::Public));
        }

        Self::new(rules)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Access requirement of the first matching rule, or the fallback.
    pub fn access_for(&self, path: &str, method: &Method) -> &Access {
        self.rules
            .iter()
            .find(|rule| rule.matches(path, method))
            .map(|rule| &rule.access)
            .unwrap_or(&self.fallback)
    }

    pub fn evaluate(
        &self,
        path: &str,
        method: &Method,
        identity: Option<&AuthenticatedIdentity>,
    ) -> Decision {
        match (self.access_for(path, method), identity) {
            (Access::Public, _) => Decision::Allow,
            (_, None) => Decision::Deny(DenyReason::Unauthenticated),
            (Access::Authenticated, Some(_)) => Decision::Allow,
            (Access::AnyRole(required), Some(identity)) => {
                if identity.has_any_role(required) {
                    Decision::Allow
                } else {
                    Decision::Deny(DenyReason::Forbidden)
                }
            }
        }
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn identity(roles: &[&str]) -> AuthenticatedIdentity {
        AuthenticatedIdentity {
            user_id: Uuid::new_v4(),
            username: "jdoe".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            token_id: Uuid::new_v4().to_string(),
            issued_at: Utc::now(),
            expires_at: Utc::now(),
        }
    }

    #[test]
    fn test_single_wildcard_matches_one_segment() {
        let pattern = PathPattern::new("/arrestManagement/get_arrest/*");
        assert!(pattern.matches("/arrestManagement/get_arrest/42"));
        assert!(!pattern.matches("/arrestManagement/get_arrest"));
        assert!(!pattern.matches("/arrestManagement/get_arrest/"));
        assert!(!pattern.matches("/arrestManagement/get_arrest/1/2"));
    }

    #[test]
    fn test_double_wildcard_matches_any_depth() {
        let pattern = PathPattern::new("/swagger-ui/**");
        assert!(pattern.matches("/swagger-ui"));
        assert!(pattern.matches("/swagger-ui/"));
        assert!(pattern.matches("/swagger-ui/index.html"));
        assert!(pattern.matches("/swagger-ui/a/b/c.js"));
        assert!(!pattern.matches("/swagger-uix"));
    }

    #[test]
    fn test_double_wildcard_in_middle() {
        let pattern = PathPattern::new("/a/**/z");
        assert!(pattern.matches("/a/z"));
        assert!(pattern.matches("/a/b/c/z"));
        assert!(!pattern.matches("/a/b/c"));
    }

    #[test]
    fn test_literal_match_is_exact() {
        let pattern = PathPattern::new("/v1.0/auth/login");
        assert!(pattern.matches("/v1.0/auth/login"));
        assert!(!pattern.matches("/v1.0/auth/login/"));
        assert!(!pattern.matches("/v1.0/auth/Login"));
        assert_eq!(pattern.as_str(), "/v1.0/auth/login");
    }

    #[test]
    fn test_swagger_is_public() {
        let table = PolicyTable::standard();
        for path in [
            "/swagger-ui.html",
            "/swagger-ui/index.html",
            "/v3/api-docs/openapi.json",
            "/webjars/swagger-ui/swagger-ui.css",
        ] {
            assert_eq!(table.evaluate(path, &Method::GET, None), Decision::Allow);
        }
    }

    #[test]
    fn test_public_auth_routes() {
        let table = PolicyTable::standard();
        assert_eq!(
            table.evaluate("/v1.0/auth/login", &Method::POST, None),
            Decision::Allow
        );
        assert_eq!(
            table.evaluate("/v1.0/email", &Method::POST, None),
            Decision::Allow
        );
    }

    #[test]
    fn test_public_routes_are_post_only() {
        let table = PolicyTable::standard();
        for path in ["/v1.0/auth/login", "/v1.0/email", "/v1.0/token/generate-refresh-token"] {
            assert_eq!(
                table.evaluate(path, &Method::GET, None),
                Decision::Deny(DenyReason::Unauthenticated),
                "GET {path}"
            );
            assert_eq!(
                table.evaluate(path, &Method::GET, Some(&identity(&[]))),
                Decision::Allow
            );
        }
        assert_eq!(
            table.access_for("/v1.0/auth/registration", &Method::DELETE),
            &Access::Authenticated
        );
    }

    #[test]
    fn test_create_arrest_requires_admin() {
        let table = PolicyTable::standard();
        let path = "/arrestManagement/create_arrest";
        assert_eq!(
            table.evaluate(path, &Method::POST, None),
            Decision::Deny(DenyReason::Unauthenticated)
        );
        assert_eq!(
            table.evaluate(path, &Method::POST, Some(&identity(&[roles::PERSONE]))),
            Decision::Deny(DenyReason::Forbidden)
        );
        assert_eq!(
            table.evaluate(path, &Method::POST, Some(&identity(&[roles::ADMIN]))),
            Decision::Allow
        );
    }

    #[test]
    fn test_get_arrest_allows_either_role() {
        let table = PolicyTable::standard();
        let path = "/arrestManagement/get_arrest/abc";
        assert_eq!(
            table.evaluate(path, &Method::GET, Some(&identity(&[roles::ADMIN]))),
            Decision::Allow
        );
        assert_eq!(
            table.evaluate(path, &Method::GET, Some(&identity(&[roles::PERSONE]))),
            Decision::Allow
        );
        assert_eq!(
            table.evaluate(path, &Method::GET, Some(&identity(&["AUDITOR"]))),
            Decision::Deny(DenyReason::Forbidden)
        );
    }

    #[test]
    fn test_delete_user_requires_persone() {
        let table = PolicyTable::standard();
        assert_eq!(
            table.evaluate(
                "/v1.0/user/delete/7",
                &Method::DELETE,
                Some(&identity(&[roles::ADMIN]))
            ),
            Decision::Deny(DenyReason::Forbidden)
        );
        assert_eq!(
            table.evaluate(
                "/v1.0/user/delete/7",
                &Method::DELETE,
                Some(&identity(&[roles::PERSONE]))
            ),
            Decision::Allow
        );
    }

    #[test]
    fn test_method_mismatch_falls_through_to_authenticated() {
        let table = PolicyTable::standard();
        let path = "/arrestManagement/create_arrest";
        assert_eq!(table.access_for(path, &Method::GET), &Access::Authenticated);
        assert_eq!(
            table.evaluate(path, &Method::GET, Some(&identity(&[]))),
            Decision::Allow
        );
        assert_eq!(
            table.evaluate(path, &Method::GET, None),
            Decision::Deny(DenyReason::Unauthenticated)
        );
    }

    #[test]
    fn test_trailing_slash_falls_through() {
        let table = PolicyTable::standard();
        assert_eq!(
            table.access_for("/v1.0/user/delete/", &Method::DELETE),
            &Access::Authenticated
        );
    }

    #[test]
    fn test_unmatched_requires_authentication() {
        let table = PolicyTable::standard();
        assert_eq!(
            table.evaluate("/no/such/route", &Method::GET, None),
            Decision::Deny(DenyReason::Unauthenticated)
        );
        assert_eq!(
            table.evaluate("/v1.0/user/profile", &Method::GET, Some(&identity(&[]))),
            Decision::Allow
        );
    }

    #[test]
    fn test_first_match_wins() {
        let table = PolicyTable::new(vec![
            Rule::new("/x/*", None, Access::Public),
            Rule::new("/x/secret", None, Access::any_role(&[roles::ADMIN])),
        ]);
        assert_eq!(
            table.evaluate("/x/secret", &Method::GET, None),
            Decision::Allow
        );
    }

    #[test]
    fn test_standard_table_order() {
        let table = PolicyTable::standard();
        let patterns: Vec<&str> = table.rules().iter().map(|r| r.pattern.as_str()).collect();
        assert_eq!(patterns[0], "/swagger-ui.html");
        assert_eq!(patterns[4], "/v1.0/user/delete/*");
        assert_eq!(patterns[5], "/arrestManagement/create_arrest");
        assert_eq!(patterns[6], "/arrestManagement/get_arrest/*");
        assert_eq!(patterns.len(), 13);
    }
}
