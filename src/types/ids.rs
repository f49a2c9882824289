use std::fmt;

/// Pipedrive personal API token, sent as the `api_token` query parameter.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Result<Self, String> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err("ApiToken must not be empty".to_string());
        }
        if trimmed.len() != token.len() {
            return Err("ApiToken must not contain surrounding whitespace".to_string());
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_token_valid() {
        let token = ApiToken::new("abc123").unwrap();
        assert_eq!(token.as_str(), "abc123");
    }

    #[test]
    fn test_api_token_empty() {
        assert!(ApiToken::new("").is_err());
        assert!(ApiToken::new("   ").is_err());
    }

    #[test]
    fn test_api_token_whitespace() {
        let result = ApiToken::new(" abc ");
        assert!(result.unwrap_err().contains("whitespace"));
    }

    #[test]
    fn test_api_token_debug_is_redacted() {
        let token = ApiToken::new("super-secret").unwrap();
        let debug = format!("{:?}", token);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("REDACTED"));
    }
}
