//! Error types for provider operations.

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Error type for provider operations.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The upstream request failed (connect, timeout, non-2xx status).
    #[error("upstream request failed: {message}")]
    Request { message: String },

    /// The upstream response could not be decoded.
    #[error("failed to decode upstream response: {message}")]
    Decode { message: String },

    /// Provider construction or configuration failed.
    #[error("provider configuration error: {message}")]
    Configuration { message: String },
}

impl ProviderError {
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

#[cfg(feature = "upstream-provider")]
impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::decode(err.to_string())
        } else {
            ProviderError::request(err.to_string())
        }
    }
}
