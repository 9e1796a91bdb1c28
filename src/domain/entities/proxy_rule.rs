//! Ordered proxy rule table entries.

use serde::{Deserialize, Serialize};

use crate::domain::errors::RuleError;

/// What a matching rule does with the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    /// Answer immediately with a fixed status and body.
    Deny {
        /// HTTP status code.
        status_code: u16,
        /// Literal response body.
        body: String,
    },
    /// Relay to an upstream origin.
    Forward {
        /// Upstream origin, e.g. `http://localhost:8080`.
        target_base: String,
        /// Literal leading substring removed from the path before relaying.
        strip_prefix: String,
        /// Whether the upstream certificate is validated.
        verify_tls: bool,
    },
}

/// Single entry of the request-routing table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRule", into = "RawRule")]
pub struct ProxyRule {
    path_prefix: String,
    kind: RuleKind,
}

impl ProxyRule {
    /// Creates a deny rule.
    ///
    /// # Errors
    /// Returns error if the prefix or status code is invalid.
    pub fn deny(
        path_prefix: impl Into<String>,
        status_code: u16,
        body: impl Into<String>,
    ) -> Result<Self, RuleError> {
        Self::build(
            path_prefix.into(),
            RuleKind::Deny {
                status_code,
                body: body.into(),
            },
        )
    }

    /// Creates a forward rule.
    ///
    /// # Errors
    /// Returns error if the prefix or target is invalid.
    pub fn forward(
        path_prefix: impl Into<String>,
        target_base: impl Into<String>,
        strip_prefix: impl Into<String>,
        verify_tls: bool,
    ) -> Result<Self, RuleError> {
        Self::build(
            path_prefix.into(),
            RuleKind::Forward {
                target_base: target_base.into(),
                strip_prefix: strip_prefix.into(),
                verify_tls,
            },
        )
    }

    fn build(path_prefix: String, kind: RuleKind) -> Result<Self, RuleError> {
        if !path_prefix.starts_with('/') {
            return Err(RuleError::InvalidPrefix(path_prefix));
        }

        match &kind {
            RuleKind::Deny { status_code, .. } => {
                if !(100..=599).contains(status_code) {
                    return Err(RuleError::InvalidStatus {
                        prefix: path_prefix,
                        status: *status_code,
                    });
                }
            }
            RuleKind::Forward { target_base, .. } => {
                let scheme_ok =
                    target_base.starts_with("http://") || target_base.starts_with("https://");
                if !scheme_ok || http::Uri::try_from(target_base.as_str()).is_err() {
                    return Err(RuleError::InvalidTarget {
                        prefix: path_prefix,
                        target: target_base.clone(),
                    });
                }
            }
        }

        Ok(Self { path_prefix, kind })
    }

    /// The built-in development table.
    #[must_use]
    pub fn default_table() -> Vec<Self> {
        vec![
            Self {
                path_prefix: "/api/v3".to_string(),
                kind: RuleKind::Deny {
                    status_code: 403,
                    body: "Access to /api/v3/ is forbidden.".to_string(),
                },
            },
            Self {
                path_prefix: "/api/actuator".to_string(),
                kind: RuleKind::Deny {
                    status_code: 403,
                    body: "Access to /api/actuator/ is forbidden.".to_string(),
                },
            },
            Self {
                path_prefix: "/api".to_string(),
                kind: RuleKind::Forward {
                    target_base: "http://localhost:8080".to_string(),
                    strip_prefix: "/api".to_string(),
                    verify_tls: false,
                },
            },
        ]
    }

    /// Literal path prefix this rule matches.
    #[must_use]
    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }

    /// Deny or forward action.
    #[must_use]
    pub const fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// Exact string prefix match.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.path_prefix)
    }
}

/// Outcome of evaluating a request path against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Reply with a fixed response; the backend is never contacted.
    Deny {
        /// HTTP status code.
        status: u16,
        /// Literal response body.
        body: String,
    },
    /// Relay to the rewritten upstream URL.
    Forward {
        /// Absolute upstream URL including any query string.
        url: String,
        /// Whether the upstream certificate is validated.
        verify_tls: bool,
    },
    /// No rule matched; hand to the static asset handler.
    PassThrough,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawRule {
    prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    deny: Option<RawDeny>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    forward: Option<RawForward>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawDeny {
    status: u16,
    body: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawForward {
    target: String,
    #[serde(default)]
    strip_prefix: String,
    #[serde(default = "default_verify_tls")]
    verify_tls: bool,
}

const fn default_verify_tls() -> bool {
    true
}

impl TryFrom<RawRule> for ProxyRule {
    type Error = RuleError;

    fn try_from(raw: RawRule) -> Result<Self, Self::Error> {
        match (raw.deny, raw.forward) {
            (Some(deny), None) => Self::deny(raw.prefix, deny.status, deny.body),
            (None, Some(forward)) => Self::forward(
                raw.prefix,
                forward.target,
                forward.strip_prefix,
                forward.verify_tls,
            ),
            (None, None) => Err(RuleError::MissingAction(raw.prefix)),
            (Some(_), Some(_)) => Err(RuleError::AmbiguousAction(raw.prefix)),
        }
    }
}

impl From<ProxyRule> for RawRule {
    fn from(rule: ProxyRule) -> Self {
        let (deny, forward) = match rule.kind {
            RuleKind::Deny { status_code, body } => (
                Some(RawDeny {
                    status: status_code,
                    body,
                }),
                None,
            ),
            RuleKind::Forward {
                target_base,
                strip_prefix,
                verify_tls,
            } => (
                None,
                Some(RawForward {
                    target: target_base,
                    strip_prefix,
                    verify_tls,
                }),
            ),
        };

        Self {
            prefix: rule.path_prefix,
            deny,
            forward,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_TABLE_JSON: &str = r#"[
        { "prefix": "/api/v3", "deny": { "status": 403, "body": "Access to /api/v3/ is forbidden." } },
        { "prefix": "/api/actuator", "deny": { "status": 403, "body": "Access to /api/actuator/ is forbidden." } },
        { "prefix": "/api", "forward": { "target": "http://localhost:8080", "stripPrefix": "/api", "verifyTls": false } }
    ]"#;

    #[test]
    fn test_json_table_matches_builtin_default() {
        let rules: Vec<ProxyRule> = serde_json::from_str(DEFAULT_TABLE_JSON).unwrap();
        assert_eq!(rules, ProxyRule::default_table());
    }

    #[test]
    fn test_forward_defaults_verify_tls_on() {
        let rule: ProxyRule =
            serde_json::from_str(r#"{ "prefix": "/svc", "forward": { "target": "https://svc.local" } }"#)
                .unwrap();

        assert_eq!(
            rule.kind(),
            &RuleKind::Forward {
                target_base: "https://svc.local".to_string(),
                strip_prefix: String::new(),
                verify_tls: true,
            }
        );
    }

    #[test]
    fn test_rule_without_action_is_rejected() {
        let result = serde_json::from_str::<ProxyRule>(r#"{ "prefix": "/api" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_rule_with_both_actions_is_rejected() {
        let result = serde_json::from_str::<ProxyRule>(
            r#"{ "prefix": "/api",
                 "deny": { "status": 403, "body": "no" },
                 "forward": { "target": "http://localhost:8080" } }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_prefix_and_status() {
        assert!(matches!(
            ProxyRule::deny("api", 403, "x"),
            Err(RuleError::InvalidPrefix(_))
        ));
        assert!(matches!(
            ProxyRule::deny("/api", 42, "x"),
            Err(RuleError::InvalidStatus { status: 42, .. })
        ));
    }

    #[test]
    fn test_forward_requires_http_target() {
        assert!(matches!(
            ProxyRule::forward("/api", "localhost:8080", "/api", true),
            Err(RuleError::InvalidTarget { .. })
        ));
        assert!(ProxyRule::forward("/api", "http://localhost:8080", "/api", true).is_ok());
    }

    #[test]
    fn test_matches_is_plain_prefix() {
        let rule = ProxyRule::deny("/api/v3", 403, "x").unwrap();

        assert!(rule.matches("/api/v3"));
        assert!(rule.matches("/api/v3/reports"));
        assert!(rule.matches("/api/v30"));
        assert!(!rule.matches("/api/v2"));
        assert!(!rule.matches("/API/v3"));
    }
}
