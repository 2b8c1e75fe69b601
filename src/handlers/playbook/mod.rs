//! Playbook history handler

mod handler;

pub use handler::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Playbook routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(handler::get_playbook))
}
