//! First-match request routing over the proxy rule table.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::{ProxyRule, RouteDecision, RuleKind};

/// Stateless, ordered rule table.
///
/// Cloning shares the same immutable table.
#[derive(Debug, Clone)]
pub struct ProxyRouter {
    rules: Arc<[ProxyRule]>,
}

impl ProxyRouter {
    /// Creates router evaluating `rules` in the given order.
    #[must_use]
    pub fn new(rules: Vec<ProxyRule>) -> Self {
        for (index, earlier) in shadowed_rules(&rules) {
            warn!(
                prefix = rules[index].path_prefix(),
                shadowed_by = rules[earlier].path_prefix(),
                "Proxy rule can never match, an earlier rule covers its prefix"
            );
        }

        Self {
            rules: rules.into(),
        }
    }

    /// First rule whose prefix starts `path`.
    #[must_use]
    pub fn matching_rule(&self, path: &str) -> Option<&ProxyRule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }

    /// Decides what happens to a request for `path` (and optional `query`).
    #[must_use]
    pub fn route(&self, path: &str, query: Option<&str>) -> RouteDecision {
        let Some(rule) = self.matching_rule(path) else {
            debug!(path, "No proxy rule matched");
            return RouteDecision::PassThrough;
        };

        match rule.kind() {
            RuleKind::Deny { status_code, body } => {
                debug!(path, prefix = rule.path_prefix(), status = status_code, "Denying request");
                RouteDecision::Deny {
                    status: *status_code,
                    body: body.clone(),
                }
            }
            RuleKind::Forward {
                target_base,
                strip_prefix,
                verify_tls,
            } => {
                let url = rewrite_url(target_base, strip_prefix, path, query);
                debug!(path, prefix = rule.path_prefix(), %url, "Forwarding request");
                RouteDecision::Forward {
                    url,
                    verify_tls: *verify_tls,
                }
            }
        }
    }
}

impl Default for ProxyRouter {
    fn default() -> Self {
        Self::new(ProxyRule::default_table())
    }
}

/// Pairs `(rule, earlier)` of indices where `earlier` already matches every
/// path `rule` could match.
#[must_use]
pub fn shadowed_rules(rules: &[ProxyRule]) -> Vec<(usize, usize)> {
    rules
        .iter()
        .enumerate()
        .filter_map(|(index, rule)| {
            rules[..index]
                .iter()
                .position(|earlier| rule.path_prefix().starts_with(earlier.path_prefix()))
                .map(|earlier| (index, earlier))
        })
        .collect()
}

/// Removes `strip_prefix` when it leads `path` and appends the rest to `target_base`.
#[must_use]
pub fn rewrite_url(target_base: &str, strip_prefix: &str, path: &str, query: Option<&str>) -> String {
    let remainder = path.strip_prefix(strip_prefix).unwrap_or(path);
    let base = target_base.trim_end_matches('/');

    let mut url = String::with_capacity(base.len() + remainder.len() + 2);
    url.push_str(base);
    if !remainder.starts_with('/') {
        url.push('/');
    }
    url.push_str(remainder);

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }

    url
}
