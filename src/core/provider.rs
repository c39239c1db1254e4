//! The completion bridge's seam to the outside world.
//!
//! Everything the chat loop needs from a hosted model is expressed through
//! [`CompletionProvider`], so tests can swap the HTTP client for a stub.

use std::error::Error as StdError;
use std::fmt;

use async_trait::async_trait;

use crate::core::message::Turn;
use crate::core::settings::ChatSettings;

/// Any failure from the external call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The request never produced an HTTP response (DNS, TLS, connection reset).
    Network(String),

    /// The provider answered with a non-success status.
    Api {
        status: u16,
        message: String,
    },

    /// The prompt or the candidate was withheld by the provider's safety filters.
    Blocked(String),

    /// A streamed payload could not be decoded.
    Malformed(String),

    /// The stream finished without any text.
    EmptyResponse,
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Network(message) => write!(f, "Network error: {message}"),
            ProviderError::Api { status, message } => {
                write!(f, "HTTP {status}: {message}")
            }
            ProviderError::Blocked(reason) => write!(f, "Response blocked: {reason}"),
            ProviderError::Malformed(message) => write!(f, "Malformed response: {message}"),
            ProviderError::EmptyResponse => f.write_str("The model returned an empty response"),
        }
    }
}

impl StdError for ProviderError {}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send the full `history` and return the generated text.
    ///
    /// `on_chunk` is called with each text fragment as it streams in; the
    /// returned string is their concatenation.
    async fn complete(
        &self,
        history: &[Turn],
        settings: &ChatSettings,
        on_chunk: &mut (dyn for<'a> FnMut(&'a str) + Send),
    ) -> Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_keeps_provider_message() {
        let err = ProviderError::Api {
            status: 400,
            message: "API key not valid. Please pass a valid API key.".into(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP 400: API key not valid. Please pass a valid API key."
        );
    }
}
