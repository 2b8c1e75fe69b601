//! Team handlers; everything except the dashboard is admin only

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::state::AppState;

/// Team routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_teams).post(handler::create_team))
        .route("/dashboard", get(handler::team_dashboard))
        .route("/{id}", delete(handler::delete_team))
}
