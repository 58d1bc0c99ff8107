//! Web layer.
//!
//! Thin HTTP front end over the events client and the matching cycle, plus
//! the static web front end.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
