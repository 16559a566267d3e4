//! Error types for client operations.

use thiserror::Error;

/// Error type for client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Schema parsing error.
    #[error("schema parse error: {0}")]
    Parse(#[from] pocketgen_schema::ParseError),

    /// The server could not be reached.
    #[error("transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
    },

    /// The server answered with an error status.
    #[error("{url} returned HTTP {code}: {message}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Request URL.
        url: String,
        /// Error message returned by the server.
        message: String,
    },

    /// Authentication succeeded but no token was returned.
    #[error("authentication response carried no token")]
    MissingToken,

    /// Invalid or incomplete credentials.
    #[error("credentials error: {message}")]
    Credentials {
        /// Error message.
        message: String,
    },

    /// Encrypted credentials could not be written or read.
    #[error("encryption error: {message}")]
    Encryption {
        /// Error message.
        message: String,
    },

    /// Every attempt failed with a retryable error.
    #[error("request failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Number of attempts made.
        attempts: u32,
        /// Last error message.
        last: String,
    },
}

impl ClientError {
    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a credentials error.
    pub fn credentials(message: impl Into<String>) -> Self {
        Self::Credentials {
            message: message.into(),
        }
    }

    /// Creates an encryption error.
    pub fn encryption(message: impl Into<String>) -> Self {
        Self::Encryption {
            message: message.into(),
        }
    }

    /// Returns true if retrying the request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Status { code, .. } => *code >= 500,
            _ => false,
        }
    }
}

impl From<ureq::Error> for ClientError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, response) => {
                let url = response.get_url().to_string();
                let message = response
                    .into_json::<serde_json::Value>()
                    .ok()
                    .and_then(|body| body.get("message")?.as_str().map(str::to_string))
                    .unwrap_or_default();
                Self::Status { code, url, message }
            }
            ureq::Error::Transport(transport) => Self::transport(transport.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(ClientError::transport("connection refused").is_retryable());
        assert!(
            ClientError::Status {
                code: 503,
                url: "http://localhost:8090/api/collections".to_string(),
                message: String::new(),
            }
            .is_retryable()
        );
        assert!(
            !ClientError::Status {
                code: 400,
                url: "http://localhost:8090/api/collections".to_string(),
                message: "Failed to authenticate.".to_string(),
            }
            .is_retryable()
        );
        assert!(!ClientError::MissingToken.is_retryable());
    }

    #[test]
    fn test_status_display() {
        let err = ClientError::Status {
            code: 403,
            url: "http://localhost:8090/api/collections".to_string(),
            message: "Only superusers can perform this action.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "http://localhost:8090/api/collections returned HTTP 403: Only superusers can perform this action."
        );
    }
}
