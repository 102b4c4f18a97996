//! Catalog vocabulary: the resource allow-list and per-request parameters.
//!
//! # Data Flow
//! ```text
//! path segment  → resource.rs (allow-list check)        → Resource
//! query / path  → params.rs   (page, id, search text)   → PageNumber | ResourceId | SearchQuery
//!     → upstream (only once every value has parsed)
//! ```
//!
//! # Design Decisions
//! - The allow-list is a closed enum, so every handler shares one parse
//! - Parameter types only exist in their validated form

pub mod params;
pub mod resource;

pub use params::{InvalidPage, PageNumber, ResourceId, SearchQuery};
pub use resource::{Resource, UnknownResource};
