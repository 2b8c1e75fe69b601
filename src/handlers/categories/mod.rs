//! Category handlers

mod handler;
pub mod request;

pub use handler::*;
pub use request::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Category routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_categories).post(handler::create_category))
        .route(
            "/{id}",
            get(handler::get_category)
                .put(handler::rename_category)
                .delete(handler::delete_category),
        )
}
