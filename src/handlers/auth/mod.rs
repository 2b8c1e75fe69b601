//! Authentication handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Authentication routes
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new().route("/login", post(handler::login)).route(
        "/me",
        get(handler::get_current_user)
            .route_layer(middleware::from_fn_with_state(state, auth_middleware)),
    )
}
