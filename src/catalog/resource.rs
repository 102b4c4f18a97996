//! Resource allow-list.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// One of the six catalog categories served by the upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Films,
    People,
    Planets,
    Species,
    Starships,
    Vehicles,
}

impl Resource {
    /// Every accepted resource, in the order reported to clients.
    pub const ALL: [Resource; 6] = [
        Resource::Films,
        Resource::People,
        Resource::Planets,
        Resource::Species,
        Resource::Starships,
        Resource::Vehicles,
    ];

    /// Path segment used both inbound and upstream.
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Films => "films",
            Resource::People => "people",
            Resource::Planets => "planets",
            Resource::Species => "species",
            Resource::Starships => "starships",
            Resource::Vehicles => "vehicles",
        }
    }

    /// Names of all accepted resources.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|r| r.as_str()).collect()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resource name outside the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown resource '{0}'")]
pub struct UnknownResource(pub String);

impl FromStr for Resource {
    type Err = UnknownResource;

    /// Matching is exact: `People` or `people/` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownResource(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_every_allowed_name() {
        for name in ["films", "people", "planets", "species", "starships", "vehicles"] {
            let resource: Resource = name.parse().unwrap();
            assert_eq!(resource.as_str(), name);
            assert_eq!(resource.to_string(), name);
        }
    }

    #[test]
    fn test_rejects_unknown_and_miscased_names() {
        assert_eq!(
            "droids".parse::<Resource>(),
            Err(UnknownResource("droids".into()))
        );
        assert!("People".parse::<Resource>().is_err());
        assert!("".parse::<Resource>().is_err());
        assert!(" people".parse::<Resource>().is_err());
    }

    #[test]
    fn test_names_lists_allow_list_in_order() {
        assert_eq!(
            Resource::names(),
            vec!["films", "people", "planets", "species", "starships", "vehicles"]
        );
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_value(Resource::Starships).unwrap();
        assert_eq!(json, "starships");
    }
}
