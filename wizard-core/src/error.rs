use thiserror::Error;

/// Error surfaced by the backend API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Backend answered with a non-success status. Displays as the bare
    /// message so callers can show it to the user unchanged.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Request never completed (connection refused, DNS, reset, ...).
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// Success status but the body was not the JSON we expected.
    #[error("invalid JSON in response from {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("failed to encode request body: {0}")]
    Encode(String),

    #[error("invalid API configuration: {0}")]
    Config(String),
}

impl ApiError {
    pub fn transport(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Transport {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn decode(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Decode {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// HTTP status when the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_displays_bare_message() {
        let e = ApiError::Http {
            status: 400,
            message: "bad input".into(),
        };
        assert_eq!(e.to_string(), "bad input");
        assert_eq!(e.status(), Some(400));
    }

    #[test]
    fn transport_error_has_no_status() {
        let e = ApiError::transport("http://localhost:1/api/translate", "connection refused");
        assert_eq!(e.status(), None);
        assert!(e.to_string().contains("connection refused"));
    }
}
