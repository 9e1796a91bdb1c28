//! Proxy rule validation errors.

use thiserror::Error;

/// Reasons a rule table entry is rejected at load time.
#[derive(Debug, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum RuleError {
    #[error("rule prefix `{0}` must start with `/`")]
    InvalidPrefix(String),

    #[error("rule `{prefix}` has invalid status code {status}")]
    InvalidStatus { prefix: String, status: u16 },

    #[error("rule `{prefix}` has invalid target `{target}`, expected an absolute http(s) URL")]
    InvalidTarget { prefix: String, target: String },

    #[error("rule `{0}` declares neither `deny` nor `forward`")]
    MissingAction(String),

    #[error("rule `{0}` declares both `deny` and `forward`")]
    AmbiguousAction(String),
}
