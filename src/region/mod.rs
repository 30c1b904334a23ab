//! Region subsystem: which country or ocean is the station over?
//!
//! Provides the Nominatim reverse geocoder, the built-in gazetteer with its
//! ocean estimate, and the classifier chaining the two.

pub mod classifier;
pub mod gazetteer;
pub mod providers;
pub mod types;

pub use classifier::{pick_label, RegionClassifier};
pub use gazetteer::{BoundingBoxEntry, Gazetteer, BUILTIN_GAZETTEER};
pub use providers::{NominatimGeocoder, ReverseGeocoder};
pub use types::{GeocodeError, RegionLabel, RegionSource, ReverseAddress, ReverseResult};
