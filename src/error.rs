use thiserror::Error;

use crate::rate::Rate;

/// Pipedrive SDK error types
#[derive(Debug, Error)]
pub enum PipedriveError {
    /// Quota exhausted, either detected before sending or reported by the server.
    #[error("rate limit exceeded: {message} (limit={}, remaining={}, reset={})", rate.limit, rate.remaining, rate.reset)]
    RateLimitExceeded { rate: Rate, message: String },

    /// Any non-2xx response that is not a rate-limit rejection.
    #[error("Pipedrive API error (status={status}): {error} {error_info}")]
    Api {
        status: u16,
        error: String,
        error_info: String,
    },

    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request cancelled")]
    Cancelled,

    /// Response body present but not matching the expected shape.
    #[error("response decode error: {0}")]
    Decode(serde_json::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PipedriveError {
    /// HTTP status associated with the error, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimitExceeded { .. })
    }
}

pub type Result<T, E = PipedriveError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = PipedriveError::Api {
            status: 404,
            error: "Deal not found".to_string(),
            error_info: "Please check developers.pipedrive.com".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("404"));
        assert!(text.contains("Deal not found"));
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_rate_limited());
    }

    #[test]
    fn test_rate_limit_error() {
        let err = PipedriveError::RateLimitExceeded {
            rate: Rate::default(),
            message: "quota exhausted".to_string(),
        };
        assert!(err.is_rate_limited());
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("quota exhausted"));
    }

    #[test]
    fn test_config_error_display() {
        let err = PipedriveError::Config("api_token is required".to_string());
        assert_eq!(err.to_string(), "Configuration error: api_token is required");
    }
}
