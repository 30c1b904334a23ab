//! Core types for the region subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which tier produced a region label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionSource {
    /// Reverse geocoder answered at this zoom level.
    Geocoder { zoom: u8 },
    /// A bounding box of the built-in gazetteer matched.
    Gazetteer,
    /// Nothing matched; the ocean was inferred from the coordinates.
    Ocean,
}

impl fmt::Display for RegionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geocoder { zoom } => write!(f, "Nominatim (zoom {})", zoom),
            Self::Gazetteer => write!(f, "Built-in"),
            Self::Ocean => write!(f, "Ocean estimate"),
        }
    }
}

/// A human-readable region name with provenance. `name` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionLabel {
    pub name: String,
    pub source: RegionSource,
}

impl RegionLabel {
    pub fn new(name: impl Into<String>, source: RegionSource) -> Self {
        Self { name: name.into(), source }
    }
}

impl fmt::Display for RegionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Address details of a reverse-geocode answer. Only the fields the
/// classifier looks at are kept.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ReverseAddress {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub ocean: Option<String>,
    #[serde(default)]
    pub sea: Option<String>,
}

/// A successful reverse-geocode answer.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ReverseResult {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub address: Option<ReverseAddress>,
}

/// Reverse-geocoding failures. All of them are recoverable: the classifier
/// moves on to the next zoom level.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP status {0}")]
    Http(u16),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The service answered with an `{"error": ...}` payload.
    #[error("geocoder rejected query: {0}")]
    Rejected(String),
}
