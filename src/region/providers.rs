//! Reverse-geocoding providers.

use super::types::{GeocodeError, ReverseResult};
use crate::config::TrackerConfig;
use serde_json::Value;

/// A reverse geocoder: coordinates plus a zoom hint in, address details out.
///
/// Higher zoom asks for more address detail (10 ≈ city, 3 ≈ country).
pub trait ReverseGeocoder {
    fn reverse(&self, lat: f64, lon: f64, zoom: u8) -> Result<ReverseResult, GeocodeError>;
}

impl<F> ReverseGeocoder for F
where
    F: Fn(f64, f64, u8) -> Result<ReverseResult, GeocodeError>,
{
    fn reverse(&self, lat: f64, lon: f64, zoom: u8) -> Result<ReverseResult, GeocodeError> {
        self(lat, lon, zoom)
    }
}

// ─── Nominatim provider ─────────────────────────────────────────

/// OpenStreetMap Nominatim `/reverse` endpoint.
pub struct NominatimGeocoder {
    agent: ureq::Agent,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(config: &TrackerConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.http_timeout)
            .user_agent(&config.user_agent)
            .build();
        Self {
            agent,
            base_url: config.nominatim_url.trim_end_matches('/').to_string(),
        }
    }

    fn reverse_url(&self, lat: f64, lon: f64, zoom: u8) -> String {
        format!(
            "{}/reverse?format=jsonv2&lat={:.6}&lon={:.6}&zoom={}&addressdetails=1",
            self.base_url, lat, lon, zoom
        )
    }
}

impl ReverseGeocoder for NominatimGeocoder {
    fn reverse(&self, lat: f64, lon: f64, zoom: u8) -> Result<ReverseResult, GeocodeError> {
        let url = self.reverse_url(lat, lon, zoom);
        tracing::debug!(%url, "nominatim reverse lookup");

        let response = self.agent.get(&url).call().map_err(|e| match e {
            ureq::Error::Status(code, _) => GeocodeError::Http(code),
            other => GeocodeError::Network(other.to_string()),
        })?;

        let body: Value = response
            .into_json()
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

        decode_reverse(body)
    }
}

/// Turn a Nominatim JSON body into a result, treating `{"error": ...}` as a
/// rejection. Nominatim reports "Unable to geocode" this way with HTTP 200.
pub fn decode_reverse(body: Value) -> Result<ReverseResult, GeocodeError> {
    if let Some(err) = body.get("error") {
        let message = match err {
            Value::String(s) => s.clone(),
            Value::Object(map) => map
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| err.to_string()),
            other => other.to_string(),
        };
        return Err(GeocodeError::Rejected(message));
    }

    serde_json::from_value(body).map_err(|e| GeocodeError::InvalidResponse(e.to_string()))
}
