//! Upstream request shapes.

use std::fmt;

use crate::catalog::{PageNumber, Resource, ResourceId, SearchQuery};

/// Page size requested from the upstream listing.
pub const PAGE_SIZE: u32 = 12;

/// The three endpoint shapes exposed by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Search,
    Pagination,
    ById,
}

impl Endpoint {
    pub fn as_str(self) -> &'static str {
        match self {
            Endpoint::Search => "search",
            Endpoint::Pagination => "pagination",
            Endpoint::ById => "by_id",
        }
    }

    /// Whether an upstream 404 surfaces as a client 404 rather than a failure.
    pub fn translates_not_found(self) -> bool {
        matches!(self, Endpoint::ById)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated lookup against one resource collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Search(SearchQuery),
    Page(PageNumber),
    ById(ResourceId),
}

impl Lookup {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Lookup::Search(_) => Endpoint::Search,
            Lookup::Page(_) => Endpoint::Pagination,
            Lookup::ById(_) => Endpoint::ById,
        }
    }

    /// Path and query relative to the upstream base URL.
    pub fn path_and_query(&self, resource: Resource) -> String {
        match self {
            Lookup::Search(query) => format!("/{}/?name={}", resource, query.encoded()),
            Lookup::Page(page) => format!(
                "/{}?page={}&limit={}&expanded=true",
                resource, page, PAGE_SIZE
            ),
            Lookup::ById(id) => format!("/{}/{}", resource, id),
        }
    }

    /// Absolute upstream URL under `base_url`.
    pub fn url(&self, base_url: &str, resource: Resource) -> String {
        format!(
            "{}{}",
            base_url.trim_end_matches('/'),
            self.path_and_query(resource)
        )
    }
}
