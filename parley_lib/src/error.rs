use thiserror::Error as ThisError;

/// Library errors.
#[derive(ThisError, Debug)]
pub enum Error {
    /// Endpoint or key is missing.
    #[error("API settings are not configured: {0}")]
    Configuration(&'static str),

    /// Connectivity check failed.
    #[error("API connection test failed: {0}")]
    Connection(String),

    /// Provider answered with a non-success status.
    #[error("API request failed with status {status}: {message}")]
    ApiRequest {
        /// HTTP status code.
        status: u16,
        /// Error message reported by the provider.
        message: String,
    },

    /// Response does not have the expected shape.
    #[error("Failed to decode API response: {0}")]
    Decoding(&'static str),

    /// No request builder is registered for the provider.
    #[error("Unsupported API provider: {0}")]
    UnsupportedProvider(String),

    /// Transport failure.
    #[error("Failed to call API: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body is not valid JSON.
    #[error("Failed to decode API response: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings storage failure.
    #[error("Failed to access settings storage: {0}")]
    Storage(String),

    /// Transport failure simulated by tests.
    #[cfg(test)]
    #[error("Test error: {0}")]
    ForTests(&'static str),
}
