//! Error types returned by the One API client.

use crate::descriptor::ResourceFamily;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Non-200 HTTP outcome reported by the remote API.
///
/// `message` is read from the `message` field of the error body when the
/// body is a JSON object carrying one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("HTTP {status}{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
#[allow(clippy::module_name_repetitions)]
pub struct HttpResponseError {
    /// HTTP status code.
    pub status: u16,
    /// Message supplied by the remote API, if any.
    pub message: Option<String>,
}

impl HttpResponseError {
    /// Creates a new `HttpResponseError`.
    #[must_use]
    pub const fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }
}

/// Errors produced by the client.
///
/// The underlying HTTP library's error types never leak through this enum;
/// transport failures are wrapped in [`Error::Transport`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The operation name is not declared for the resource family.
    #[error("operation `{operation}` is not supported by resource `{family}`")]
    UnsupportedOperation {
        /// Resource family the call was bound to.
        family: ResourceFamily,
        /// Requested operation name.
        operation: String,
    },

    /// The URL template needs an `:id` but none was supplied.
    #[error("operation `{operation}` requires an id for `{template}`")]
    MissingPathParameter {
        /// Operation name.
        operation: &'static str,
        /// URL template of the operation.
        template: &'static str,
    },

    /// The client was built with incomplete settings.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The base URL cannot carry path segments or failed to parse.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP call itself could not complete (network error, timeout).
    #[error("transport failure: {message}")]
    Transport {
        /// Human readable description.
        message: String,
        /// Underlying cause.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A 200 response body was not valid JSON, or an entity failed to decode.
    #[error("failed to decode response: {message}")]
    Decode {
        /// Human readable description.
        message: String,
        /// Underlying cause.
        #[source]
        source: serde_json::Error,
    },

    /// A typed helper got a response that did not match the envelope shape.
    #[error("unexpected response shape for operation `{operation}`")]
    UnexpectedShape {
        /// Operation name.
        operation: &'static str,
    },

    /// The remote API answered with a status other than 200.
    #[error(transparent)]
    HttpResponse(#[from] HttpResponseError),
}

impl Error {
    /// Returns the HTTP status for [`Error::HttpResponse`], `None` otherwise.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::HttpResponse(err) => Some(err.status),
            _ => None,
        }
    }

    /// Wraps a transport-layer error.
    pub(crate) fn transport(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_http_response_error_display_with_message() {
        // Arrange
        let err = HttpResponseError::new(500, Some(String::from("Something went wrong.")));

        // Act
        let text = err.to_string();

        // Assert
        assert_eq!(text, "HTTP 500: Something went wrong.");
    }

    #[test]
    fn test_http_response_error_display_without_message() {
        // Arrange & Act
        let text = HttpResponseError::new(401, None).to_string();

        // Assert
        assert_eq!(text, "HTTP 401");
    }

    #[test]
    fn test_status_only_for_http_errors() {
        // Arrange
        let http: Error = HttpResponseError::new(404, None).into();
        let unsupported = Error::UnsupportedOperation {
            family: ResourceFamily::Movie,
            operation: String::from("delete"),
        };

        // Act & Assert
        assert_eq!(http.status(), Some(404));
        assert_eq!(unsupported.status(), None);
    }

    #[test]
    fn test_unsupported_operation_message_names_family() {
        // Arrange
        let err = Error::UnsupportedOperation {
            family: ResourceFamily::Quote,
            operation: String::from("create"),
        };

        // Act
        let text = err.to_string();

        // Assert
        assert_eq!(
            text,
            "operation `create` is not supported by resource `quote`"
        );
    }
}
