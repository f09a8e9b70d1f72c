use thiserror::Error;

/// Errors from the GrackDB wire layer.
///
/// SECURITY: Error messages must NEVER contain the configured API token.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured token cannot be used to build request headers
    #[error("authentication failed: {message}")]
    Auth { message: String },

    /// Network-level error (connection failed, timeout, etc.)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not the expected JSON shape
    #[error("failed to decode response: {message}")]
    Decode { message: String },

    /// A well-formed response without the expected data key
    #[error("response missing data for '{key}'")]
    MissingData { key: String },
}
