//! Discover queue and completion handlers

mod handler;
pub mod request;

pub use handler::*;
pub use request::*;

use axum::{
    routing::{get, put},
    Router,
};

use crate::state::AppState;

/// Discover routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::get_queue))
        .route("/{assignment_id}", put(handler::complete_assignment))
}
