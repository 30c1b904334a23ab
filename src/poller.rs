//! Position poller: fetch → parse → classify → snapshot.

use crate::dns::{FetchError, LocSource};
use crate::loc::{self, GeoPosition, ParseError};
use crate::region::{RegionClassifier, RegionLabel};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// One observation of the station. Created per poll, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct PositionSnapshot {
    pub position: GeoPosition,
    pub region: RegionLabel,
    pub observed_at: DateTime<Utc>,
}

impl PositionSnapshot {
    pub fn latitude(&self) -> f64 {
        self.position.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.position.longitude
    }

    pub fn altitude_m(&self) -> f64 {
        self.position.altitude_m
    }
}

/// Failures that end a poll cycle. Geocoding problems never get here.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("could not fetch ISS position: {0}")]
    Fetch(#[from] FetchError),

    #[error("could not decode ISS position: {0}")]
    Parse(#[from] ParseError),
}

pub struct Poller {
    source: Box<dyn LocSource>,
    classifier: RegionClassifier,
}

impl Poller {
    pub fn new(source: Box<dyn LocSource>, classifier: RegionClassifier) -> Self {
        Self { source, classifier }
    }

    /// Run one cycle stamped with the current time. No retries.
    pub fn poll(&self) -> Result<PositionSnapshot, PollError> {
        self.poll_at(Utc::now())
    }

    pub fn poll_at(&self, observed_at: DateTime<Utc>) -> Result<PositionSnapshot, PollError> {
        let raw = self.source.fetch().map_err(|e| {
            warn!(error = %e, "LOC fetch failed");
            e
        })?;

        let position = loc::parse(&raw).map_err(|e| {
            warn!(error = %e, "LOC parse failed");
            e
        })?;
        debug!(%position, "position decoded");

        let region = self.classifier.classify(&position);

        Ok(PositionSnapshot { position, region, observed_at })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{GeocodeError, RegionSource, ReverseResult};
    use approx::assert_abs_diff_eq;
    use chrono::TimeZone;
    use std::time::{Duration, Instant};

    const REFERENCE: &str = "43 18 21.050 S 67 33 49.440 E 428960.00m 1.00m 10000.00m 10.00m";

    fn fixed(raw: &'static str) -> Box<dyn LocSource> {
        Box::new(move || -> Result<String, FetchError> { Ok(raw.to_string()) })
    }

    fn failing(err: FetchError) -> Box<dyn LocSource> {
        Box::new(move || -> Result<String, FetchError> { Err(err.clone()) })
    }

    fn broken_geocoder() -> RegionClassifier {
        RegionClassifier::with_geocoder(Box::new(|_: f64, _: f64, _: u8| -> Result<ReverseResult, GeocodeError> {
            Err(GeocodeError::Network("unreachable".into()))
        }))
    }

    #[test]
    fn test_poll_snapshot() {
        let at = Utc.with_ymd_and_hms(2026, 3, 20, 12, 0, 0).unwrap();
        let poller = Poller::new(fixed(REFERENCE), RegionClassifier::offline());
        let snap = poller.poll_at(at).unwrap();
        assert_abs_diff_eq!(snap.latitude(), -43.305847, epsilon = 1e-6);
        assert_abs_diff_eq!(snap.longitude(), 67.563733, epsilon = 1e-6);
        assert_eq!(snap.altitude_m(), 428960.0);
        assert_eq!(snap.region.name, "Indian Ocean, Southern Hemisphere");
        assert_eq!(snap.observed_at, at);
    }

    #[test]
    fn test_fetch_failure_propagates() {
        for err in [
            FetchError::NameNotFound("where-is-the-iss.dedyn.io".into()),
            FetchError::Timeout,
            FetchError::NoAnswer("where-is-the-iss.dedyn.io".into()),
            FetchError::Other("SERVFAIL".into()),
        ] {
            let poller = Poller::new(failing(err.clone()), RegionClassifier::offline());
            match poller.poll() {
                Err(PollError::Fetch(got)) => assert_eq!(got, err),
                other => panic!("expected fetch failure, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_parse_failure_propagates() {
        let poller = Poller::new(fixed("not a loc record"), RegionClassifier::offline());
        assert!(matches!(poller.poll(), Err(PollError::Parse(ParseError::NoMatch(_)))));
    }

    #[test]
    fn test_broken_geocoder_still_yields_snapshot() {
        let start = Instant::now();
        let poller = Poller::new(fixed(REFERENCE), broken_geocoder());
        let snap = poller.poll().unwrap();
        assert_eq!(snap.region.source, RegionSource::Ocean);
        assert_eq!(snap.region.name, "Indian Ocean, Southern Hemisphere");
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_gazetteer_region_over_land() {
        let poller = Poller::new(fixed("25 0 0.000 S 135 0 0.000 E 415000.00m"), broken_geocoder());
        let snap = poller.poll().unwrap();
        assert_eq!(snap.region.name, "Australia");
        assert_eq!(snap.region.source, RegionSource::Gazetteer);
    }

    #[test]
    fn test_snapshot_json() {
        let at = Utc.with_ymd_and_hms(2026, 3, 20, 12, 0, 0).unwrap();
        let poller = Poller::new(fixed(REFERENCE), RegionClassifier::offline());
        let json = serde_json::to_value(poller.poll_at(at).unwrap()).unwrap();
        assert_eq!(json["position"]["altitude_m"], 428960.0);
        assert_eq!(json["region"]["name"], "Indian Ocean, Southern Hemisphere");
        assert_eq!(json["region"]["source"], "Ocean");
        assert_eq!(json["observed_at"], "2026-03-20T12:00:00Z");
    }
}
