//! Coreference resolution.
//!
//! Replacing pronouns with the nouns they refer to ("It is waterproof." ->
//! "The jacket is waterproof.") makes each chunk readable on its own. The
//! work is done by an external service; this module only defines the seam.
//!
//! Resolution is best-effort. A [`CorefError`] never aborts chunking: the
//! preprocessor logs it and continues with the unresolved text.

/// Why coreference resolution failed.
#[derive(Debug, thiserror::Error)]
pub enum CorefError {
    /// The service could not be reached or timed out.
    #[error("coreference service unavailable: {0}")]
    Unavailable(String),

    /// The service answered with a non-success status.
    #[error("coreference service returned status {0}")]
    Status(u16),

    /// The reply could not be decoded.
    #[error("malformed coreference reply: {0}")]
    MalformedReply(String),
}

/// A coreference resolution collaborator.
pub trait CoreferenceResolver: Send + Sync {
    /// Resolve pronouns in `text`.
    ///
    /// # Errors
    ///
    /// Returns a [`CorefError`] if resolution failed; callers fall back to `text`.
    fn resolve(&self, text: &str) -> Result<String, CorefError>;
}

/// Resolver that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResolver;

impl CoreferenceResolver for NoopResolver {
    fn resolve(&self, text: &str) -> Result<String, CorefError> {
        Ok(text.to_string())
    }
}

#[cfg(feature = "http")]
pub use http::{HttpResolver, DEFAULT_ENDPOINT};

#[cfg(feature = "http")]
mod http {
    use std::time::Duration;

    use serde::{Deserialize, Serialize};

    use super::{CorefError, CoreferenceResolver};

    /// Default endpoint of the coreference service.
    pub const DEFAULT_ENDPOINT: &str = "http://localhost:6006/coreference";

    #[derive(Serialize)]
    struct Request<'a> {
        text_block: &'a str,
    }

    #[derive(Deserialize)]
    struct Reply {
        text_block: Option<String>,
    }

    /// Client for a JSON coreference service.
    ///
    /// Sends `{"text_block": "..."}` and reads `text_block` from the reply.
    /// A reply without `text_block` resolves to the input text.
    #[derive(Debug, Clone)]
    pub struct HttpResolver {
        client: reqwest::blocking::Client,
        endpoint: String,
    }

    impl HttpResolver {
        /// Create a client for `endpoint` with a request timeout.
        ///
        /// # Errors
        ///
        /// Returns [`CorefError::Unavailable`] if the HTTP client cannot be built.
        pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, CorefError> {
            let client = reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| CorefError::Unavailable(e.to_string()))?;
            Ok(Self {
                client,
                endpoint: endpoint.into(),
            })
        }

        /// Client for [`DEFAULT_ENDPOINT`] with a 30 second timeout.
        ///
        /// # Errors
        ///
        /// Returns [`CorefError::Unavailable`] if the HTTP client cannot be built.
        pub fn local() -> Result<Self, CorefError> {
            Self::new(DEFAULT_ENDPOINT, Duration::from_secs(30))
        }

        /// The service endpoint.
        #[must_use]
        pub fn endpoint(&self) -> &str {
            &self.endpoint
        }
    }

    impl CoreferenceResolver for HttpResolver {
        fn resolve(&self, text: &str) -> Result<String, CorefError> {
            let response = self
                .client
                .post(&self.endpoint)
                .json(&Request { text_block: text })
                .send()
                .map_err(|e| CorefError::Unavailable(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(CorefError::Status(status.as_u16()));
            }

            let reply: Reply = response
                .json()
                .map_err(|e| CorefError::MalformedReply(e.to_string()))?;
            Ok(reply.text_block.unwrap_or_else(|| text.to_string()))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_request_shape() {
            let body = serde_json::to_string(&Request { text_block: "he left." }).unwrap();
            assert_eq!(body, r#"{"text_block":"he left."}"#);
        }

        #[test]
        fn test_reply_without_text_block() {
            let reply: Reply = serde_json::from_str("{}").unwrap();
            assert!(reply.text_block.is_none());
        }

        #[test]
        fn test_unreachable_service_is_unavailable() {
            let resolver =
                HttpResolver::new("http://127.0.0.1:9/coreference", Duration::from_millis(200)).unwrap();
            assert!(matches!(
                resolver.resolve("it is warm."),
                Err(CorefError::Unavailable(_))
            ));
        }
    }
}
