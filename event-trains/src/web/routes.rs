//! HTTP route handlers.

use std::path::Path;

use axum::{
    Json, Router,
    extract::{Path as UrlPath, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::Value;
use tower_http::services::{ServeDir, ServeFile};
use tracing::{error, warn};

use crate::events_api::EventsError;
use crate::matching::{CycleError, compute_matches, wait_from_minutes};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// Requests that match no API route are served from `static_dir`, falling
/// back to its `index.html`.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    let static_files =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/health", get(health))
        .route("/send_otp", post(send_otp))
        .route("/login", post(login))
        .route("/get_trains", get(get_trains))
        .route("/members/:page", get(members))
        .route("/member/:uid", get(member))
        .fallback_service(static_files)
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Ask the events API to text an OTP to a phone number.
async fn send_otp(
    State(state): State<AppState>,
    body: Option<Json<SendOtpRequest>>,
) -> Result<Json<SendOtpResponse>, AppError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let phone = non_empty(req.phone).ok_or_else(|| AppError::BadRequest {
        message: "Phone number is required".to_string(),
    })?;

    let response = state.events.send_otp(&phone).await?;

    Ok(Json(SendOtpResponse {
        message: "OTP sent".to_string(),
        response,
    }))
}

/// Exchange an OTP for tokens and store them.
async fn login(
    State(state): State<AppState>,
    body: Option<Json<LoginRequest>>,
) -> Result<Json<LoginResponse>, AppError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let (Some(phone), Some(otp)) = (non_empty(req.phone), non_empty(req.otp)) else {
        return Err(AppError::BadRequest {
            message: "Phone and OTP are required".to_string(),
        });
    };

    let credential = state.events.verify_otp(&phone, &otp).await?;

    Ok(Json(LoginResponse {
        message: "Logged in successfully".to_string(),
        token: credential.token,
    }))
}

/// Run one matching cycle.
async fn get_trains(
    State(state): State<AppState>,
    Query(query): Query<GetTrainsQuery>,
) -> Result<Json<MatchedTrainsResponse>, AppError> {
    let wait = query
        .wait
        .as_deref()
        .and_then(parse_wait_minutes)
        .and_then(wait_from_minutes)
        .ok_or_else(|| AppError::BadRequest {
            message: "Please provide wait time in minutes as a numeric value".to_string(),
        })?;

    // Fail fast before touching either feed
    if !state.events.is_logged_in()? {
        return Err(AppError::Unauthorized {
            message: "Not logged in".to_string(),
        });
    }

    let matched_trains = compute_matches(
        state.trains.as_ref(),
        state.events.as_ref(),
        &state.config,
        wait,
    )
    .await?;

    Ok(Json(MatchedTrainsResponse { matched_trains }))
}

/// One page of the member invite list.
async fn members(
    State(state): State<AppState>,
    UrlPath(page): UrlPath<String>,
) -> Result<Json<Value>, AppError> {
    let page = page
        .parse::<u32>()
        .ok()
        .filter(|&p| p > 0)
        .ok_or_else(|| AppError::BadRequest {
            message: "Page must be a positive integer".to_string(),
        })?;

    Ok(Json(state.events.get_member_page(page).await?))
}

/// A single member profile.
async fn member(
    State(state): State<AppState>,
    UrlPath(uid): UrlPath<String>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(state.events.get_member(&uid).await?))
}

/// Parse a wait given as minutes; only plain ASCII digits are accepted.
fn parse_wait_minutes(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unauthorized { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<CycleError> for AppError {
    fn from(e: CycleError) -> Self {
        let message = e.to_string();
        match e {
            CycleError::Auth(_) => AppError::Unauthorized { message },
            CycleError::Credentials(_) => AppError::Internal { message },
            CycleError::Parse { .. }
            | CycleError::Network { .. }
            | CycleError::InvalidResponse { .. } => AppError::BadGateway { message },
        }
    }
}

impl From<EventsError> for AppError {
    fn from(e: EventsError) -> Self {
        let message = e.to_string();
        match e {
            EventsError::NotLoggedIn | EventsError::Unauthorized => {
                AppError::Unauthorized { message }
            }
            EventsError::Credentials(_) => AppError::Internal { message },
            EventsError::Http(_) | EventsError::Api { .. } | EventsError::Json { .. } => {
                AppError::BadGateway { message }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unauthorized { message } => (StatusCode::UNAUTHORIZED, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
