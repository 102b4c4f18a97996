//! Response-side fault handling.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::http::error::GatewayError;

/// Turn a handler panic into the generic 500 body. The payload is logged only.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };

    tracing::error!(panic = %detail, "Handler panicked");
    GatewayError::Internal.into_response()
}

/// The deadline layer answers with a bare 408; give it the JSON error body.
/// No handler produces 408 itself.
pub async fn render_timeout(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }
    tracing::warn!("Request deadline elapsed");
    GatewayError::Deadline.into_response()
}
