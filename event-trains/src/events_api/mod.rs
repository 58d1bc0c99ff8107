//! Events API client.
//!
//! The events API sits behind phone/OTP login. A successful login yields an
//! access token and a refresh token; every data request carries the access
//! token in the `authorization` header. When the API answers 401, the
//! client refreshes the token once and retries the request once.

mod client;
mod convert;
mod credentials;
mod error;
mod types;

pub use client::{EventsClient, EventsConfig};
pub use convert::convert_events;
pub use credentials::{
    Credential, CredentialError, CredentialStore, FileCredentialStore, MemoryCredentialStore,
};
pub use error::EventsError;
pub use types::{EventEntry, EventList, TokenResponse};
