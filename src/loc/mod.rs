//! DNS LOC records: presentation-text parsing and wire decoding.
//!
//! The parser accepts the usual presentation form
//! `43 18 21.050 S 67 33 49.440 E 428960.00m 1.00m 10000.00m 10.00m`
//! and converts it to decimal degrees. Degree, minute and second fields are
//! bounded only by their digit count; values beyond 90°/180° pass through.

pub mod wire;

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// A decoded position. Either fully present or not constructed at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_m: f64,
}

impl GeoPosition {
    pub fn new(latitude: f64, longitude: f64, altitude_m: f64) -> Self {
        Self { latitude, longitude, altitude_m }
    }

    pub fn altitude_km(&self) -> f64 {
        self.altitude_m / 1000.0
    }

    /// "43.3058°S, 67.5637°E"
    pub fn format_coords(&self) -> String {
        let ns = if self.latitude < 0.0 { 'S' } else { 'N' };
        let ew = if self.longitude < 0.0 { 'W' } else { 'E' };
        format!(
            "{:.4}\u{00B0}{}, {:.4}\u{00B0}{}",
            self.latitude.abs(),
            ns,
            self.longitude.abs(),
            ew
        )
    }
}

impl fmt::Display for GeoPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {:.1} km", self.format_coords(), self.altitude_km())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("could not parse LOC record: '{0}'")]
    NoMatch(String),

    #[error("invalid number '{0}' in LOC record")]
    InvalidNumber(String),
}

fn loc_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // lat:  d{1,2} m{1,2} s{1,2}[.fff] N|S
        // lon:  d{1,3} m{1,2} s{1,2}[.fff] E|W
        // alt:  [-]n[.nn]m
        Regex::new(concat!(
            r"([0-9]{1,2})\s+([0-9]{1,2})\s+([0-9]{1,2}(?:\.[0-9]+)?)\s+([NS])\s+",
            r"([0-9]{1,3})\s+([0-9]{1,2})\s+([0-9]{1,2}(?:\.[0-9]+)?)\s+([EW])\s+",
            r"(-?[0-9]+(?:\.[0-9]+)?)m",
        ))
        .expect("LOC pattern is a valid regex")
    })
}

fn number(token: &str) -> Result<f64, ParseError> {
    token
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber(token.to_string()))
}

fn to_decimal(deg: &str, min: &str, sec: &str, negative: bool) -> Result<f64, ParseError> {
    let value = number(deg)? + number(min)? / 60.0 + number(sec)? / 3600.0;
    Ok(if negative { -value } else { value })
}

/// Parse a LOC record in presentation format into decimal degrees.
///
/// The pattern is searched anywhere in `raw`; trailing size and precision
/// fields are ignored.
pub fn parse(raw: &str) -> Result<GeoPosition, ParseError> {
    let caps = loc_pattern()
        .captures(raw)
        .ok_or_else(|| ParseError::NoMatch(raw.to_string()))?;
    let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());

    let latitude = to_decimal(group(1), group(2), group(3), group(4) == "S")?;
    let longitude = to_decimal(group(5), group(6), group(7), group(8) == "W")?;
    let altitude_m = number(group(9))?;

    Ok(GeoPosition { latitude, longitude, altitude_m })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Split a decimal magnitude back into (degrees, minutes, seconds).
    fn to_dms(value: f64) -> (f64, f64, f64) {
        let v = value.abs();
        let d = v.floor();
        let m = ((v - d) * 60.0).floor();
        let s = (v - d - m / 60.0) * 3600.0;
        (d, m, s)
    }

    #[test]
    fn test_parse_reference_record() {
        let pos = parse("43 18 21.050 S 67 33 49.440 E 428960.00m 1.00m 10000.00m 10.00m").unwrap();
        assert_abs_diff_eq!(pos.latitude, -43.305847, epsilon = 1e-6);
        assert_abs_diff_eq!(pos.longitude, 67.563733, epsilon = 1e-6);
        assert_eq!(pos.altitude_m, 428960.0);
    }

    #[test]
    fn test_parse_north_west() {
        let pos = parse("51 28 38 N 0 0 5.31 W 410000m").unwrap();
        assert!(pos.latitude > 51.47 && pos.latitude < 51.48);
        assert!(pos.longitude < 0.0);
        assert_abs_diff_eq!(pos.longitude, -5.31 / 3600.0, epsilon = 1e-9);
    }

    #[test]
    fn test_parse_three_digit_longitude() {
        let pos = parse("10 0 0.000 N 167 30 0.000 W 400000.00m").unwrap();
        assert_abs_diff_eq!(pos.longitude, -167.5, epsilon = 1e-9);
    }

    #[test]
    fn test_parse_negative_altitude() {
        let pos = parse("1 2 3 N 4 5 6 E -12.5m").unwrap();
        assert_eq!(pos.altitude_m, -12.5);
    }

    #[test]
    fn test_parse_embedded_in_text() {
        let pos = parse("where-is-the-iss.dedyn.io. 60 IN LOC 43 18 21.050 S 67 33 49.440 E 428960.00m").unwrap();
        assert_abs_diff_eq!(pos.latitude, -43.305847, epsilon = 1e-6);
    }

    #[test]
    fn test_parse_out_of_range_passes_through() {
        // 99 degrees of latitude is not rejected.
        let pos = parse("99 59 59 N 199 0 0 E 1m").unwrap();
        assert!(pos.latitude > 99.99);
        assert_abs_diff_eq!(pos.longitude, 199.0, epsilon = 1e-9);
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(
            parse("not a loc record"),
            Err(ParseError::NoMatch("not a loc record".to_string()))
        );
    }

    #[test]
    fn test_parse_non_ascii_digits_do_not_match() {
        let raw = "\u{0664}\u{0663} 18 21.050 S 67 33 49.440 E 428960.00m";
        assert_eq!(parse(raw), Err(ParseError::NoMatch(raw.to_string())));
    }

    #[test]
    fn test_parse_skips_non_ascii_record() {
        let raw = "\u{0664}\u{0663} 18 21.050 S 67 33 49.440 E 1m; 43 18 21.050 S 67 33 49.440 E 428960.00m";
        let pos = parse(raw).unwrap();
        assert_abs_diff_eq!(pos.latitude, -43.305847, epsilon = 1e-6);
        assert_eq!(pos.altitude_m, 428960.0);
    }

    #[test]
    fn test_parse_missing_altitude_unit() {
        assert!(parse("43 18 21.050 S 67 33 49.440 E 428960.00").is_err());
    }

    #[test]
    fn test_parse_wrong_hemisphere_letters() {
        assert!(parse("43 18 21.050 E 67 33 49.440 N 428960.00m").is_err());
    }

    #[test]
    fn test_inverse_transform_recovers_fields() {
        let cases = [
            ("0 0 0.000 N 0 0 0.000 E 0.00m", (0.0, 0.0, 0.0), (0.0, 0.0, 0.0)),
            ("12 34 56.789 S 123 45 6.5 W 1m", (12.0, 34.0, 56.789), (123.0, 45.0, 6.5)),
            ("51 30 0 N 7 15 30.25 E 1m", (51.0, 30.0, 0.0), (7.0, 15.0, 30.25)),
        ];
        for (raw, lat_dms, lon_dms) in cases {
            let pos = parse(raw).unwrap();
            let (d, m, s) = to_dms(pos.latitude);
            assert_eq!((d, m), (lat_dms.0, lat_dms.1), "{}", raw);
            assert_abs_diff_eq!(s, lat_dms.2, epsilon = 1e-6);
            let (d, m, s) = to_dms(pos.longitude);
            assert_eq!((d, m), (lon_dms.0, lon_dms.1), "{}", raw);
            assert_abs_diff_eq!(s, lon_dms.2, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_sign_follows_hemisphere() {
        let pos = parse("12 34 56.789 S 123 45 6.5 W 1m").unwrap();
        assert!(pos.latitude < 0.0 && pos.longitude < 0.0);
        let pos = parse("12 34 56.789 N 123 45 6.5 E 1m").unwrap();
        assert!(pos.latitude > 0.0 && pos.longitude > 0.0);
    }

    #[test]
    fn test_format_coords() {
        let pos = GeoPosition::new(-43.305847, 67.563733, 428960.0);
        assert_eq!(pos.format_coords(), "43.3058\u{00B0}S, 67.5637\u{00B0}E");
        assert_abs_diff_eq!(pos.altitude_km(), 428.96, epsilon = 1e-9);
    }
}
