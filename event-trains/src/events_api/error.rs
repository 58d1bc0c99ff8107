//! Events client error types.

use super::credentials::CredentialError;

/// Errors from the events HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum EventsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// No credential has been stored yet
    #[error("not logged in: no stored credential")]
    NotLoggedIn,

    /// Credential rejected even after a token refresh
    #[error("unauthorized: credential rejected after refresh")]
    Unauthorized,

    /// Reading or writing the credential store failed
    #[error(transparent)]
    Credentials(#[from] CredentialError),
}
