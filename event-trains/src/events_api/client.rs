//! Events API HTTP client.
//!
//! Handles OTP login, token refresh and authenticated data requests.
//! Data requests are retried at most once, after a single token refresh.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::credentials::{Credential, CredentialStore};
use super::error::EventsError;
use super::types::{DataEnvelope, EventList, PhoneBody, TokenResponse, VerifyOtpBody};

/// Default base URL for the events API.
const DEFAULT_BASE_URL: &str = "https://app-api.tinkerhub.org/";

/// App version the API expects from its mobile client.
const DEFAULT_APP_VERSION: &str = "189";

/// User agent the API expects from its mobile client.
const DEFAULT_USER_AGENT: &str = "Dart/3.5 (dart:io)";

/// Configuration for the events client.
#[derive(Debug, Clone)]
pub struct EventsConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Value of the `app-version` header
    pub app_version: String,
    /// Value of the `user-agent` header
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl EventsConfig {
    /// Create a config pointing at the production API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            app_version: DEFAULT_APP_VERSION.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Events API client.
#[derive(Clone)]
pub struct EventsClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
}

impl EventsClient {
    /// Create a new events client.
    pub fn new(
        config: EventsConfig,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Self, EventsError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let invalid = |what: &str| EventsError::Api {
            status: 0,
            message: format!("Invalid {what} header value"),
        };
        headers.insert(
            HeaderName::from_static("app-version"),
            HeaderValue::from_str(&config.app_version).map_err(|_| invalid("app-version"))?,
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|_| invalid("user-agent"))?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            store,
        })
    }

    /// Ask the API to text a one-time password to `phone`.
    ///
    /// Returns the API's response body as-is.
    pub async fn send_otp(&self, phone: &str) -> Result<String, EventsError> {
        let response = self
            .http
            .post(self.url("user/otp"))
            .json(&PhoneBody {
                phone_number: phone,
            })
            .send()
            .await?;

        read_body(response).await
    }

    /// Exchange a one-time password for tokens and store them.
    pub async fn verify_otp(&self, phone: &str, otp: &str) -> Result<Credential, EventsError> {
        let response = self
            .http
            .post(self.url("user/otp/verify"))
            .json(&VerifyOtpBody {
                phone_number: phone,
                otp,
            })
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(EventsError::Unauthorized);
        }

        let tokens: TokenResponse = decode(&read_body(response).await?)?;
        let credential = Credential {
            token: tokens.token,
            refresh_token: tokens.refresh_token,
            phone_number: tokens.phone_number.unwrap_or_else(|| phone.to_string()),
        };
        self.store.save(&credential)?;

        info!("logged in to events API");
        Ok(credential)
    }

    /// Whether a credential is stored.
    pub fn is_logged_in(&self) -> Result<bool, EventsError> {
        Ok(self.store.load()?.is_some())
    }

    /// Get the upcoming event list.
    pub async fn get_event_list(&self) -> Result<EventList, EventsError> {
        let body = self.get_authorized("event/space").await?;
        let list: EventList = decode(&body)?;
        debug!(events = list.data.len(), "fetched event list");
        Ok(list)
    }

    /// Get one page of the member invite list (the `data` field).
    pub async fn get_member_page(&self, page: u32) -> Result<serde_json::Value, EventsError> {
        let body = self.get_authorized(&format!("member/invite/m/{page}")).await?;
        let envelope: DataEnvelope = decode(&body)?;
        Ok(envelope.data)
    }

    /// Get a single member's details.
    pub async fn get_member(&self, uid: &str) -> Result<serde_json::Value, EventsError> {
        let body = self.get_authorized(&format!("member/{uid}")).await?;
        decode(&body)
    }

    /// GET `path` with the stored token, refreshing once on 401.
    async fn get_authorized(&self, path: &str) -> Result<String, EventsError> {
        let credential = self.store.load()?.ok_or(EventsError::NotLoggedIn)?;

        let response = self.send_get(path, &credential.token).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return read_body(response).await;
        }

        warn!(path, "events API rejected access token, refreshing");
        let refreshed = self.refresh(&credential).await?;

        let response = self.send_get(path, &refreshed.token).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(EventsError::Unauthorized);
        }

        read_body(response).await
    }

    async fn send_get(&self, path: &str, token: &str) -> Result<reqwest::Response, EventsError> {
        Ok(self
            .http
            .get(self.url(path))
            .header(AUTHORIZATION, token)
            .send()
            .await?)
    }

    /// Trade the refresh token for a new token pair and store it.
    async fn refresh(&self, credential: &Credential) -> Result<Credential, EventsError> {
        let response = self
            .http
            .post(self.url("auth/refresh"))
            .header(AUTHORIZATION, credential.refresh_token.as_str())
            .json(&PhoneBody {
                phone_number: &credential.phone_number,
            })
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(EventsError::Unauthorized);
        }

        let tokens: TokenResponse = decode(&read_body(response).await?)?;
        let refreshed = Credential {
            token: tokens.token,
            refresh_token: tokens.refresh_token,
            phone_number: credential.phone_number.clone(),
        };
        self.store.save(&refreshed)?;

        Ok(refreshed)
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Read a response body, turning error statuses into `EventsError::Api`.
async fn read_body(response: reqwest::Response) -> Result<String, EventsError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(EventsError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    Ok(response.text().await?)
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, EventsError> {
    serde_json::from_str(body).map_err(|e| EventsError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(500).collect()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::{
        Json, Router,
        extract::{Path, State},
        http::HeaderMap as AxumHeaders,
        response::{IntoResponse, Response},
        routing::{get, post},
    };
    use serde_json::{Value, json};

    use crate::events_api::MemoryCredentialStore;

    const PHONE: &str = "+910000000000";

    /// Fake events API.
    #[derive(Clone)]
    struct Upstream {
        /// The only access token data endpoints accept
        accepted_token: &'static str,
        refreshes: Arc<AtomicUsize>,
        data_requests: Arc<AtomicUsize>,
    }

    impl Upstream {
        fn new(accepted_token: &'static str) -> Self {
            Self {
                accepted_token,
                refreshes: Arc::new(AtomicUsize::new(0)),
                data_requests: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn authorized(&self, headers: &AxumHeaders) -> bool {
            self.data_requests.fetch_add(1, Ordering::SeqCst);
            headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|t| t == self.accepted_token)
        }
    }

    async fn events(State(up): State<Upstream>, headers: AxumHeaders) -> Response {
        if !up.authorized(&headers) {
            return StatusCode::UNAUTHORIZED.into_response();
        }
        Json(json!({
            "data": [
                {"name": "Meetup", "description": "Monthly", "startDate": "2024-05-01T10:10:00+05:30"}
            ]
        }))
        .into_response()
    }

    async fn members(
        State(up): State<Upstream>,
        Path(page): Path<u32>,
        headers: AxumHeaders,
    ) -> Response {
        if !up.authorized(&headers) {
            return StatusCode::UNAUTHORIZED.into_response();
        }
        Json(json!({"data": [{"uid": format!("m{page}")}], "total": 1})).into_response()
    }

    async fn refresh(
        State(up): State<Upstream>,
        headers: AxumHeaders,
        Json(body): Json<Value>,
    ) -> Response {
        up.refreshes.fetch_add(1, Ordering::SeqCst);
        let token = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
        if token != Some("refresh-1") || body["phoneNumber"] != PHONE {
            return StatusCode::UNAUTHORIZED.into_response();
        }
        Json(json!({"token": "fresh-token", "refreshToken": "refresh-2"})).into_response()
    }

    async fn send_otp(Json(body): Json<Value>) -> Response {
        format!("sent to {}", body["phoneNumber"].as_str().unwrap_or("?")).into_response()
    }

    async fn verify_otp(Json(body): Json<Value>) -> Response {
        if body["otp"] != "123456" {
            return StatusCode::UNAUTHORIZED.into_response();
        }
        Json(json!({
            "token": "login-token",
            "refreshToken": "refresh-1",
            "phoneNumber": body["phoneNumber"]
        }))
        .into_response()
    }

    async fn spawn_upstream(up: Upstream) -> String {
        let app = Router::new()
            .route("/event/space", get(events))
            .route("/member/invite/m/:page", get(members))
            .route("/auth/refresh", post(refresh))
            .route("/user/otp", post(send_otp))
            .route("/user/otp/verify", post(verify_otp))
            .with_state(up);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/")
    }

    fn stored(token: &str, refresh_token: &str) -> Arc<MemoryCredentialStore> {
        Arc::new(MemoryCredentialStore::with_credential(Credential {
            token: token.to_string(),
            refresh_token: refresh_token.to_string(),
            phone_number: PHONE.to_string(),
        }))
    }

    fn client(url: String, store: Arc<MemoryCredentialStore>) -> EventsClient {
        EventsClient::new(EventsConfig::new().with_base_url(url), store).unwrap()
    }

    #[test]
    fn config_defaults() {
        let config = EventsConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.app_version, "189");
        assert_eq!(config.user_agent, "Dart/3.5 (dart:io)");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn url_joins_without_double_slash() {
        let store = Arc::new(MemoryCredentialStore::new());
        let with_slash = client("http://api.test/".into(), store.clone());
        let without_slash = client("http://api.test".into(), store);

        assert_eq!(with_slash.url("event/space"), "http://api.test/event/space");
        assert_eq!(without_slash.url("/event/space"), "http://api.test/event/space");
    }

    #[tokio::test]
    async fn valid_token_needs_no_refresh() {
        let up = Upstream::new("fresh-token");
        let url = spawn_upstream(up.clone()).await;
        let events = client(url, stored("fresh-token", "refresh-1"));

        let list = events.get_event_list().await.unwrap();

        assert_eq!(list.data.len(), 1);
        assert_eq!(list.data[0].name, "Meetup");
        assert_eq!(up.refreshes.load(Ordering::SeqCst), 0);
        assert_eq!(up.data_requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_token_is_refreshed_once() {
        let up = Upstream::new("fresh-token");
        let url = spawn_upstream(up.clone()).await;
        let store = stored("stale-token", "refresh-1");
        let events = client(url, store.clone());

        let list = events.get_event_list().await.unwrap();

        assert_eq!(list.data.len(), 1);
        assert_eq!(up.refreshes.load(Ordering::SeqCst), 1);
        assert_eq!(up.data_requests.load(Ordering::SeqCst), 2);

        let saved = store.load().unwrap().unwrap();
        assert_eq!(saved.token, "fresh-token");
        assert_eq!(saved.refresh_token, "refresh-2");
        assert_eq!(saved.phone_number, PHONE);
    }

    #[tokio::test]
    async fn second_rejection_is_unauthorized() {
        let up = Upstream::new("nothing-works");
        let url = spawn_upstream(up.clone()).await;
        let events = client(url, stored("stale-token", "refresh-1"));

        let err = events.get_event_list().await.unwrap_err();

        assert!(matches!(err, EventsError::Unauthorized));
        assert_eq!(up.refreshes.load(Ordering::SeqCst), 1);
        assert_eq!(up.data_requests.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn rejected_refresh_is_unauthorized() {
        let up = Upstream::new("fresh-token");
        let url = spawn_upstream(up.clone()).await;
        let store = stored("stale-token", "revoked");
        let events = client(url, store.clone());

        let err = events.get_event_list().await.unwrap_err();

        assert!(matches!(err, EventsError::Unauthorized));
        assert_eq!(up.data_requests.load(Ordering::SeqCst), 1);
        // Stored credential untouched
        assert_eq!(store.load().unwrap().unwrap().token, "stale-token");
    }

    #[tokio::test]
    async fn no_credential_is_not_logged_in() {
        let up = Upstream::new("fresh-token");
        let url = spawn_upstream(up.clone()).await;
        let events = client(url, Arc::new(MemoryCredentialStore::new()));

        let err = events.get_event_list().await.unwrap_err();

        assert!(matches!(err, EventsError::NotLoggedIn));
        assert_eq!(up.data_requests.load(Ordering::SeqCst), 0);
        assert!(!events.is_logged_in().unwrap());
    }

    #[tokio::test]
    async fn login_stores_credential() {
        let url = spawn_upstream(Upstream::new("login-token")).await;
        let store = Arc::new(MemoryCredentialStore::new());
        let events = client(url, store.clone());

        let sent = events.send_otp(PHONE).await.unwrap();
        assert_eq!(sent, format!("sent to {PHONE}"));

        let credential = events.verify_otp(PHONE, "123456").await.unwrap();
        assert_eq!(credential.token, "login-token");
        assert_eq!(store.load().unwrap(), Some(credential));
        assert!(events.is_logged_in().unwrap());
    }

    #[tokio::test]
    async fn wrong_otp_is_unauthorized() {
        let url = spawn_upstream(Upstream::new("login-token")).await;
        let store = Arc::new(MemoryCredentialStore::new());
        let events = client(url, store.clone());

        let err = events.verify_otp(PHONE, "000000").await.unwrap_err();

        assert!(matches!(err, EventsError::Unauthorized));
        assert_eq!(store.load().unwrap(), None);
    }

    #[tokio::test]
    async fn member_page_returns_data_field() {
        let url = spawn_upstream(Upstream::new("fresh-token")).await;
        let events = client(url, stored("fresh-token", "refresh-1"));

        let page = events.get_member_page(3).await.unwrap();

        assert_eq!(page, json!([{"uid": "m3"}]));
    }
}
