//! Terms and conditions handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(handler::get_terms)
            .put(handler::save_terms)
            .patch(handler::accept_terms),
    )
}
