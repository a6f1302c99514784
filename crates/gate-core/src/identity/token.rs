use std::fmt;

use zeroize::Zeroize;

/// Bearer token bound to an identity.
///
/// 访问令牌：
/// - Debug / Display 不输出真实内容
/// - Drop 时清零内存
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    inner: String,
}

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: value.into(),
        }
    }

    /// Borrow the raw token value.
    pub fn expose(&self) -> &str {
        &self.inner
    }

    pub fn is_empty(&self) -> bool {
        self.inner.trim().is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for AccessToken {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_display_are_redacted() {
        let token = AccessToken::new("secret-token-value");
        assert!(!format!("{:?}", token).contains("secret-token-value"));
        assert!(!format!("{}", token).contains("secret-token-value"));
        assert_eq!(token.expose(), "secret-token-value");
    }

    #[test]
    fn test_whitespace_token_is_empty() {
        assert!(AccessToken::new("  ").is_empty());
        assert!(!AccessToken::new("t").is_empty());
    }
}
