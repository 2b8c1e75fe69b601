//! Assignment, block and option handlers (admin only)

mod handler;
pub mod request;

pub use handler::*;
pub use request::*;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

/// Assignment routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_assignments).post(handler::create_assignment))
        .route(
            "/{id}",
            get(handler::get_assignment)
                .put(handler::update_assignment)
                .delete(handler::delete_assignment),
        )
        // Blocks
        .route("/{id}/blocks", post(handler::add_block))
        .route(
            "/{id}/blocks/{block_id}",
            put(handler::update_block).delete(handler::delete_block),
        )
        // Question options
        .route("/{id}/blocks/{block_id}/options", post(handler::add_option))
        .route(
            "/{id}/blocks/{block_id}/options/{option_id}",
            put(handler::update_option).delete(handler::delete_option),
        )
}
