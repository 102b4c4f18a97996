//! Outbound access to the SWAPI catalog.
//!
//! # Data Flow
//! ```text
//! validated Resource + Lookup
//!     → lookup.rs (path + query for the upstream)
//!     → client.rs (single GET, explicit timeouts)
//!     → Ok(JSON body) | Err(UpstreamError)
//! ```
//!
//! # Design Decisions
//! - Exactly one request per inbound call, never retried
//! - Upstream bodies are opaque JSON; only status and decodability are checked
//! - Error classification lives here, client-facing wording lives in `http`

pub mod client;
pub mod error;
pub mod lookup;

pub use client::SwapiClient;
pub use error::UpstreamError;
pub use lookup::{Endpoint, Lookup};
