//! Built-in gazetteer: coarse bounding boxes plus an ocean estimate.
//!
//! Always available, fully deterministic. The boxes overlap on purpose
//! (Asia contains parts of China and Russia); the table is scanned in order
//! and the first containing box wins.

use super::types::{RegionLabel, RegionSource};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBoxEntry {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
    pub name: &'static str,
}

impl BoundingBoxEntry {
    pub const fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64, name: &'static str) -> Self {
        Self { min_lat, max_lat, min_lon, max_lon, name }
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        self.min_lat <= lat && lat <= self.max_lat && self.min_lon <= lon && lon <= self.max_lon
    }
}

/// Rough land areas, deliberately coarse. Order matters.
pub const BUILTIN_GAZETTEER: &[BoundingBoxEntry] = &[
    BoundingBoxEntry::new(25.0, 50.0, -125.0, -66.0, "United States"),
    BoundingBoxEntry::new(42.0, 83.0, -141.0, -52.0, "Canada"),
    BoundingBoxEntry::new(8.0, 38.0, -118.0, -86.0, "Mexico"),
    BoundingBoxEntry::new(36.0, 72.0, -9.0, 40.0, "Europe"),
    BoundingBoxEntry::new(35.0, 54.0, 26.0, 180.0, "Asia"),
    BoundingBoxEntry::new(5.0, 35.0, 68.0, 97.0, "India"),
    BoundingBoxEntry::new(18.0, 54.0, 73.0, 135.0, "China"),
    BoundingBoxEntry::new(45.0, 78.0, 19.0, 180.0, "Russia"),
    BoundingBoxEntry::new(-55.0, -10.0, -74.0, -34.0, "South America"),
    BoundingBoxEntry::new(-37.0, 38.0, -18.0, 52.0, "Africa"),
    BoundingBoxEntry::new(-47.0, -10.0, 113.0, 154.0, "Australia"),
];

const ARCTIC_OCEAN_LAT: f64 = 66.0;
const SOUTHERN_OCEAN_LAT: f64 = -60.0;

/// An ordered bounding-box table.
#[derive(Debug, Clone, Copy)]
pub struct Gazetteer<'a> {
    entries: &'a [BoundingBoxEntry],
}

impl Gazetteer<'static> {
    pub fn builtin() -> Self {
        Self { entries: BUILTIN_GAZETTEER }
    }
}

impl Default for Gazetteer<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> Gazetteer<'a> {
    pub fn new(entries: &'a [BoundingBoxEntry]) -> Self {
        Self { entries }
    }

    /// Name of the first box containing the point.
    pub fn lookup(&self, lat: f64, lon: f64) -> Option<&'a str> {
        self.entries
            .iter()
            .find(|entry| entry.contains(lat, lon))
            .map(|entry| entry.name)
    }

    /// Box lookup, falling back to the ocean estimate. Never fails.
    pub fn classify(&self, lat: f64, lon: f64) -> RegionLabel {
        match self.lookup(lat, lon) {
            Some(name) => RegionLabel::new(name, RegionSource::Gazetteer),
            None => RegionLabel::new(
                format!("{}, {}", ocean_name(lat, lon), hemisphere(lat)),
                RegionSource::Ocean,
            ),
        }
    }
}

/// Ocean for a point outside every box. Polar latitudes are checked before
/// the longitude bands.
pub fn ocean_name(lat: f64, lon: f64) -> &'static str {
    if lat > ARCTIC_OCEAN_LAT {
        "Arctic Ocean"
    } else if lat < SOUTHERN_OCEAN_LAT {
        "Southern Ocean"
    } else if (120.0..=180.0).contains(&lon) || (-180.0..-70.0).contains(&lon) {
        "Pacific Ocean"
    } else if (-70.0..20.0).contains(&lon) {
        "Atlantic Ocean"
    } else if (20.0..120.0).contains(&lon) {
        "Indian Ocean"
    } else {
        "Unknown Ocean"
    }
}

/// Strictly positive latitude is north; the equator counts as south.
pub fn hemisphere(lat: f64) -> &'static str {
    if lat > 0.0 {
        "Northern Hemisphere"
    } else {
        "Southern Hemisphere"
    }
}
