//! Region classifier: orchestrates the fallback chain.
//!
//! Flow: reverse geocoder at zoom 10 → 8 → 6 → 4 → 3 → built-in gazetteer → ocean estimate

use super::gazetteer::Gazetteer;
use super::providers::{NominatimGeocoder, ReverseGeocoder};
use super::types::{RegionLabel, RegionSource, ReverseResult};
use crate::config::{TrackerConfig, DEFAULT_ZOOM_LEVELS};
use crate::loc::GeoPosition;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Words in a display name that mark it as a body of water.
const WATER_KEYWORDS: [&str; 6] = ["ocean", "sea", "atlantic", "pacific", "indian", "arctic"];

/// Names a position. Holds no per-call state.
pub struct RegionClassifier {
    geocoder: Option<Box<dyn ReverseGeocoder>>,
    gazetteer: Gazetteer<'static>,
    zoom_levels: Vec<u8>,
    attempt_delay: Duration,
}

impl RegionClassifier {
    /// Classifier backed by Nominatim, or gazetteer-only when `config.offline`.
    pub fn from_config(config: &TrackerConfig) -> Self {
        let classifier = if config.offline {
            Self::offline()
        } else {
            Self::with_geocoder(Box::new(NominatimGeocoder::new(config)))
        };
        classifier
            .with_zoom_levels(config.zoom_levels.clone())
            .with_attempt_delay(config.attempt_delay)
    }

    /// Any geocoder; no delay between attempts.
    pub fn with_geocoder(geocoder: Box<dyn ReverseGeocoder>) -> Self {
        Self {
            geocoder: Some(geocoder),
            gazetteer: Gazetteer::builtin(),
            zoom_levels: DEFAULT_ZOOM_LEVELS.to_vec(),
            attempt_delay: Duration::ZERO,
        }
    }

    /// Gazetteer and ocean estimate only, no network calls.
    pub fn offline() -> Self {
        Self {
            geocoder: None,
            gazetteer: Gazetteer::builtin(),
            zoom_levels: DEFAULT_ZOOM_LEVELS.to_vec(),
            attempt_delay: Duration::ZERO,
        }
    }

    pub fn with_gazetteer(mut self, gazetteer: Gazetteer<'static>) -> Self {
        self.gazetteer = gazetteer;
        self
    }

    pub fn with_zoom_levels(mut self, zoom_levels: Vec<u8>) -> Self {
        self.zoom_levels = zoom_levels;
        self
    }

    pub fn with_attempt_delay(mut self, delay: Duration) -> Self {
        self.attempt_delay = delay;
        self
    }

    pub fn is_offline(&self) -> bool {
        self.geocoder.is_none()
    }

    /// Name the region under `position`. Never fails.
    pub fn classify(&self, position: &GeoPosition) -> RegionLabel {
        let (lat, lon) = (position.latitude, position.longitude);

        if let Some(label) = self.geocode(lat, lon) {
            return label;
        }

        let label = self.gazetteer.classify(lat, lon);
        debug!(lat, lon, region = %label, source = %label.source, "classified from built-in data");
        label
    }

    fn geocode(&self, lat: f64, lon: f64) -> Option<RegionLabel> {
        let geocoder = self.geocoder.as_ref()?;

        for (attempt, &zoom) in self.zoom_levels.iter().enumerate() {
            if attempt > 0 && !self.attempt_delay.is_zero() {
                thread::sleep(self.attempt_delay);
            }

            match geocoder.reverse(lat, lon, zoom) {
                Ok(result) => match pick_label(&result) {
                    Some(name) => {
                        info!(zoom, region = %name, "reverse geocoder answered");
                        return Some(RegionLabel::new(name, RegionSource::Geocoder { zoom }));
                    }
                    None => debug!(zoom, "reverse geocoder answer too vague"),
                },
                Err(e) => debug!(zoom, error = %e, "reverse geocoder attempt failed"),
            }
        }

        info!(lat, lon, "reverse geocoder exhausted; using built-in data");
        None
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Pick the most useful name out of a geocoder answer.
///
/// Priority: country, then ocean/sea, then the display name if it mentions a
/// body of water or has at least two components.
pub fn pick_label(result: &ReverseResult) -> Option<String> {
    if let Some(address) = &result.address {
        if let Some(country) = non_empty(&address.country) {
            return Some(country.to_string());
        }
        if let Some(water) = non_empty(&address.ocean).or_else(|| non_empty(&address.sea)) {
            return Some(water.to_string());
        }
    }

    let name = non_empty(&result.display_name)?;
    let lower = name.to_lowercase();
    if WATER_KEYWORDS.iter().any(|w| lower.contains(w)) || name.contains(',') {
        Some(name.to_string())
    } else {
        None
    }
}
