//! Request parameters, validated before anything is forwarded.

use std::borrow::Cow;
use std::fmt;

use thiserror::Error;

/// Page number rejected by [`PageNumber::from_query`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid page number '{0}'")]
pub struct InvalidPage(pub String);

/// A 1-based page index for the listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PageNumber(u64);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(1);

    /// Parse the raw `page` query value.
    ///
    /// An absent or empty value means the first page. The value must parse as
    /// a base-10 integer before the lower bound is checked.
    pub fn from_query(raw: Option<&str>) -> Result<Self, InvalidPage> {
        let raw = match raw {
            None | Some("") => return Ok(Self::FIRST),
            Some(raw) => raw,
        };

        let value: u64 = raw
            .parse()
            .map_err(|_| InvalidPage(raw.to_string()))?;

        if value < 1 {
            return Err(InvalidPage(raw.to_string()));
        }

        Ok(Self(value))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric entity identifier, kept exactly as the client sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId(String);

impl ResourceId {
    /// Accepts one or more ASCII digits; anything else (including a missing id)
    /// is `None`.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let raw = raw?;
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-text name filter. Never validated, only encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(raw: Option<String>) -> Self {
        Self(raw.unwrap_or_default())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Percent-encoded form for use as a single query component.
    pub fn encoded(&self) -> Cow<'_, str> {
        urlencoding::encode(&self.0)
    }
}
