//! Request error type.

/// Message used when a non-2xx response carries no usable `error` field.
pub const SERVER_ERROR_FALLBACK: &str = "Server error.";

/// Failure of a single backend request.
///
/// `Display` yields the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Non-2xx status; `message` comes from the body's `error` field.
    Status {
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the response body.
        message: String,
    },
    /// No response (connection refused, DNS failure, broken body stream).
    Transport(String),
    /// 2xx response whose body is not the expected JSON.
    Decode(String),
    /// Endpoint URL could not be built from the base URL.
    InvalidUrl(String),
}

impl RequestError {
    /// Builds a `Status` error from a raw response body.
    ///
    /// Falls back to [`SERVER_ERROR_FALLBACK`] when the body is not JSON or
    /// has no non-empty string `error` field.
    #[must_use]
    pub fn from_status_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<super::types::ErrorResponse>(body)
            .ok()
            .and_then(|r| r.error)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| String::from(SERVER_ERROR_FALLBACK));
        Self::Status { status, message }
    }
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status { message, .. } => f.write_str(message),
            Self::Transport(message) | Self::Decode(message) | Self::InvalidUrl(message) => {
                f.write_str(message)
            }
        }
    }
}

impl std::error::Error for RequestError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_body_with_error_field() {
        // Act
        let err = RequestError::from_status_body(404, r#"{"error":"Not found"}"#);

        // Assert
        assert_eq!(
            err,
            RequestError::Status {
                status: 404,
                message: String::from("Not found"),
            }
        );
        assert_eq!(err.to_string(), "Not found");
    }

    #[test]
    fn test_status_body_without_error_field_falls_back() {
        // Act
        let err = RequestError::from_status_body(500, r#"{"message":"boom"}"#);

        // Assert
        assert_eq!(err.to_string(), SERVER_ERROR_FALLBACK);
    }

    #[test]
    fn test_status_body_empty_error_field_falls_back() {
        // Act
        let err = RequestError::from_status_body(404, r#"{"error":""}"#);

        // Assert
        assert_eq!(err.to_string(), SERVER_ERROR_FALLBACK);
    }

    #[test]
    fn test_status_body_unparsable_falls_back() {
        // Act
        let err = RequestError::from_status_body(502, "<html>Bad Gateway</html>");

        // Assert
        assert_eq!(err.to_string(), "Server error.");
    }

    #[test]
    fn test_status_body_non_string_error_falls_back() {
        // Act
        let err = RequestError::from_status_body(400, r#"{"error":42}"#);

        // Assert
        assert_eq!(err.to_string(), "Server error.");
    }

    #[test]
    fn test_transport_display_is_underlying_message() {
        // Arrange
        let err = RequestError::Transport(String::from("connection refused"));

        // Act & Assert
        assert_eq!(err.to_string(), "connection refused");
    }
}
