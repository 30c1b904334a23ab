//! iss_locator: where is the International Space Station right now?
//!
//! Reads the station's position from a DNS LOC record, names the region
//! underneath it (reverse geocoding with a built-in gazetteer fallback) and
//! renders the result as a text report or a live ASCII world map.

pub mod config;
pub mod dns;
pub mod loc;
pub mod poller;
pub mod region;
pub mod render;

pub use config::TrackerConfig;
pub use loc::{GeoPosition, ParseError};
pub use poller::{PollError, Poller, PositionSnapshot};
pub use region::{RegionClassifier, RegionLabel, RegionSource};
