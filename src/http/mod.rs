//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, span)
//!     → handlers.rs (validate resource, then parameters)
//!     → upstream::SwapiClient (one GET)
//!     → error.rs (status translation, JSON error body)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use error::GatewayError;
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{build_router, with_middleware, AppState, GatewayServer};
