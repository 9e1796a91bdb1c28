//! Session token value object.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Opaque session credential with masking.
///
/// The shell never inspects token content, so there is no format check.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AuthToken {
    value: String,
}

impl AuthToken {
    /// Wraps a raw token string as-is.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns token as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns whether the token carries no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Returns masked token for display.
    #[must_use]
    pub fn masked(&self) -> String {
        let len = self.value.chars().count();
        if len <= 10 {
            return "*".repeat(len);
        }

        let prefix: String = self.value.chars().take(4).collect();
        let suffix: String = self.value.chars().skip(len - 4).collect();
        format!("{prefix}...{suffix}")
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("value", &self.masked())
            .finish()
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_TOKEN: &str = "eyJhbGciOiJIUzI1NiJ9.c2Vzc2lvbg.c2lnbmF0dXJl";

    #[test]
    fn test_any_content_is_accepted() {
        assert_eq!(AuthToken::new("token").as_str(), "token");
        assert_eq!(AuthToken::new(" spaced ").as_str(), " spaced ");
        assert!(AuthToken::new("").is_empty());
    }

    #[test]
    fn test_short_token_fully_masked() {
        assert_eq!(AuthToken::new("token").masked(), "*****");
    }

    #[test]
    fn test_long_token_masking() {
        let masked = AuthToken::new(LONG_TOKEN).masked();

        assert_eq!(masked, "eyJh...dXJl");
        assert!(!masked.contains(LONG_TOKEN));
    }

    #[test]
    fn test_masking_respects_char_boundaries() {
        let token = AuthToken::new("ééééééééééééé");
        assert_eq!(token.masked(), "éééé...éééé");
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let debug_output = format!("{:?}", AuthToken::new(LONG_TOKEN));
        assert!(!debug_output.contains(LONG_TOKEN));
    }
}
