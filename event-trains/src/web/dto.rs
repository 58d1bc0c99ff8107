//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::matching::MatchRecord;

/// Body of `POST /send_otp`.
#[derive(Debug, Default, Deserialize)]
pub struct SendOtpRequest {
    #[serde(default)]
    pub phone: Option<String>,
}

/// Response to `POST /send_otp`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SendOtpResponse {
    pub message: String,
    /// Upstream response body, passed through as text
    pub response: String,
}

/// Body of `POST /login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub otp: Option<String>,
}

/// Response to `POST /login`.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    /// Access token just stored
    pub token: String,
}

/// Query string of `GET /get_trains`.
#[derive(Debug, Default, Deserialize)]
pub struct GetTrainsQuery {
    /// Maximum wait in minutes; must be all digits
    pub wait: Option<String>,
}

/// Response to `GET /get_trains`.
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchedTrainsResponse {
    pub matched_trains: Vec<MatchRecord>,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
