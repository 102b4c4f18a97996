//! Client-facing errors.
//!
//! Every failure leaves the gateway as `{"error": "<message>"}` with a status
//! chosen here. Upstream causes stay attached as `source` for logging and are
//! never rendered into the body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::catalog::{InvalidPage, Resource, UnknownResource};
use crate::upstream::{Endpoint, UpstreamError};

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Resource name outside the allow-list.
    #[error("Invalid resource name")]
    InvalidResource(#[from] UnknownResource),

    #[error("Invalid page number")]
    InvalidPage(#[from] InvalidPage),

    /// Missing or non-numeric id.
    #[error("Invalid {0} ID")]
    InvalidId(Resource),

    /// Upstream reported the entity as absent.
    #[error("{0} not found")]
    NotFound(Resource),

    /// Any other upstream failure.
    #[error("{message}")]
    Upstream {
        message: String,
        #[source]
        source: UpstreamError,
    },

    #[error("Route not found")]
    RouteNotFound,

    /// The inbound request deadline elapsed before a response was ready.
    #[error("Request timed out")]
    Deadline,

    /// A handler panicked.
    #[error("Something went wrong!")]
    Internal,
}

impl GatewayError {
    /// Wrap an upstream failure with the generic message for `endpoint`.
    pub fn upstream(resource: Resource, endpoint: Endpoint, source: UpstreamError) -> Self {
        let message = match endpoint {
            Endpoint::Search => format!("Failed to fetch {} search results from SWAPI", resource),
            Endpoint::Pagination => format!("Failed to fetch {}", resource),
            Endpoint::ById => format!("Failed to fetch {} from SWAPI", resource),
        };
        GatewayError::Upstream { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::InvalidResource(_)
            | GatewayError::InvalidPage(_)
            | GatewayError::InvalidId(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) | GatewayError::RouteNotFound => StatusCode::NOT_FOUND,
            GatewayError::Upstream { .. } | GatewayError::Deadline | GatewayError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = match &self {
            GatewayError::InvalidResource(UnknownResource(name)) => json!({
                "error": self.to_string(),
                "resource": name,
                "validResources": Resource::ALL,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (self.status(), Json(body)).into_response()
    }
}
