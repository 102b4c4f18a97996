//! SWAPI Gateway Library
//!
//! A thin HTTP middleware in front of the Star Wars catalog at swapi.tech:
//! name search, paginated listing and by-id lookup over six resource types,
//! with parameter validation before anything is forwarded.

pub mod catalog;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::GatewayConfig;
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
