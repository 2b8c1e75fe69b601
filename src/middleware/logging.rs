//! Request logging middleware

use std::time::Instant;

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn, Instrument};
use uuid::Uuid;

/// Header carrying the request id back to the client
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Log every request with its status and duration under a request id span
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = Uuid::new_v4();

    let span = tracing::info_span!("request", id = %request_id);
    let mut response = next.run(request).instrument(span.clone()).await;

    let status = response.status();
    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    span.in_scope(|| {
        if is_noteworthy(status) {
            warn!(
                method = %method,
                path = %path,
                status = status.as_u16(),
                duration_ms = %duration_ms,
                "Request failed"
            );
        } else {
            info!(
                method = %method,
                path = %path,
                status = status.as_u16(),
                duration_ms = %duration_ms,
                "Request completed"
            );
        }
    });

    response
}

/// Server errors and client errors other than 404
fn is_noteworthy(status: StatusCode) -> bool {
    status.is_server_error() || (status.is_client_error() && status != StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_noteworthy() {
        assert!(is_noteworthy(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(is_noteworthy(StatusCode::BAD_REQUEST));
        assert!(!is_noteworthy(StatusCode::NOT_FOUND));
        assert!(!is_noteworthy(StatusCode::OK));
    }
}
