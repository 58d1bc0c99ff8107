//! Events API request and response DTOs.

use serde::{Deserialize, Serialize};

/// Response from `GET event/space`.
#[derive(Debug, Clone, Deserialize)]
pub struct EventList {
    /// Upcoming events.
    pub data: Vec<EventEntry>,
}

/// One event in the list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEntry {
    /// Event title.
    pub name: String,

    /// Description; the API sends `null` for events without one.
    pub description: Option<String>,

    /// Start time (ISO 8601 with offset).
    pub start_date: String,
}

/// Token pair returned by OTP verification and by token refresh.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Access token, sent as the `authorization` header.
    pub token: String,

    /// Token used to obtain a new access token.
    pub refresh_token: String,

    /// Phone number the tokens belong to (only sent on login).
    pub phone_number: Option<String>,
}

/// Response wrapper for member endpoints.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DataEnvelope {
    pub data: serde_json::Value,
}

/// Body for `user/otp` and `auth/refresh`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PhoneBody<'a> {
    pub phone_number: &'a str,
}

/// Body for `user/otp/verify`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerifyOtpBody<'a> {
    pub phone_number: &'a str,
    pub otp: &'a str,
}
