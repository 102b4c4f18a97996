//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the three endpoint shapes and the fallback
//! - Wire up middleware (request id, tracing, CORS, panic catching, timeout)
//! - Bind server to listener and serve until shutdown

use std::time::Duration;

use axum::{
    extract::{MatchedPath, Request},
    middleware::{self, map_response, Next},
    response::Response,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::handlers::{
    get_by_id, list_page, missing_id, route_not_found, search_by_name, unmatched_path,
};
use crate::http::request::{request_span, UuidRequestId, X_REQUEST_ID};
use crate::http::response::{handle_panic, render_timeout};
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::upstream::SwapiClient;

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: SwapiClient,
}

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
    config: GatewayConfig,
}

impl GatewayServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        let client = SwapiClient::new(&config.upstream)?;
        let router = build_router(&config, AppState { client });
        Ok(Self { router, config })
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait_for(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The fully layered router, for driving requests in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(config: &GatewayConfig, state: AppState) -> Router {
    // Static segments win over captures, so `/api/pagination/people` never
    // reaches the by-id route. Each route also answers with a trailing slash.
    let routes = Router::new()
        .route(
            "/api/{resource}/search",
            get(search_by_name).fallback(route_not_found),
        )
        .route(
            "/api/{resource}/search/",
            get(search_by_name).fallback(route_not_found),
        )
        .route(
            "/api/pagination/{resource}",
            get(list_page).fallback(route_not_found),
        )
        .route(
            "/api/pagination/{resource}/",
            get(list_page).fallback(route_not_found),
        )
        .route("/api/{resource}/{id}", get(get_by_id).fallback(route_not_found))
        .route("/api/{resource}/{id}/", get(get_by_id).fallback(route_not_found))
        .route("/api/{resource}", get(missing_id).fallback(route_not_found))
        .route("/api/{resource}/", get(missing_id).fallback(route_not_found))
        .route_layer(middleware::from_fn(track_requests))
        .fallback(unmatched_path)
        .with_state(state);

    with_middleware(routes, config)
}

/// Wrap `routes` in the request id, tracing, CORS, panic and deadline layers.
#[allow(deprecated)]
pub fn with_middleware(routes: Router, config: &GatewayConfig) -> Router {
    routes.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(CorsLayer::permissive())
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(map_response(render_timeout))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
    )
}

/// Count matched requests by route template and final status.
async fn track_requests(request: Request, next: Next) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let response = next.run(request).await;
    metrics::record_request(&route, response.status().as_u16());
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode};
    use axum::http::Request as HttpRequest;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn explode() -> &'static str {
        panic!("handler exploded")
    }

    async fn stall() -> &'static str {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "late"
    }

    async fn call(router: Router, uri: &str) -> (StatusCode, bool, Value) {
        let request = HttpRequest::builder().uri(uri).body(Body::empty()).unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let has_request_id = response.headers().contains_key(&X_REQUEST_ID);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, has_request_id, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_panicking_handler_becomes_json_500() {
        let routes = Router::new().route("/boom", get(explode));
        let router = with_middleware(routes, &GatewayConfig::default());

        let (status, has_request_id, body) = call(router, "/boom").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Something went wrong!" }));
        assert!(has_request_id);
    }

    #[tokio::test]
    async fn test_request_deadline_becomes_json_500() {
        let mut config = GatewayConfig::default();
        config.timeouts.request_secs = 1;
        let routes = Router::new().route("/slow", get(stall));
        let router = with_middleware(routes, &config);

        let (status, _, body) = call(router, "/slow").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Request timed out" }));
    }
}
