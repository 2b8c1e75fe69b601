//! Target handlers (admin only)

mod handler;
pub mod request;

pub use handler::*;
pub use request::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Target routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_targets).post(handler::create_target))
        .route(
            "/{id}",
            get(handler::get_target)
                .put(handler::update_target)
                .delete(handler::delete_target),
        )
}
