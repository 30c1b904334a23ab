//! Runtime configuration for the tracker.
//!
//! Everything has a working default; the CLI only overrides what the user
//! passes on the command line or through the environment.

use serde::Serialize;
use std::time::Duration;

/// Host publishing the station's position as a LOC record.
pub const DEFAULT_HOST: &str = "where-is-the-iss.dedyn.io";

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Zoom levels tried against the reverse geocoder, most specific first.
pub const DEFAULT_ZOOM_LEVELS: [u8; 5] = [10, 8, 6, 4, 3];

pub const DEFAULT_LIVE_INTERVAL_SECS: u64 = 10;

/// Longest accepted live interval (one day).
pub const MAX_LIVE_INTERVAL_SECS: u64 = 86_400;

#[derive(Debug, Clone, Serialize)]
pub struct TrackerConfig {
    /// DNS name queried for the LOC record.
    pub host: String,
    pub dns_timeout: Duration,
    /// Base URL of the Nominatim instance (no trailing slash).
    pub nominatim_url: String,
    pub user_agent: String,
    /// Per-request timeout for a single reverse-geocode attempt.
    pub http_timeout: Duration,
    pub zoom_levels: Vec<u8>,
    /// Pause between geocoder attempts (Nominatim usage policy: max 1 req/s).
    pub attempt_delay: Duration,
    /// Skip the geocoder entirely and classify from the gazetteer.
    pub offline: bool,
    pub live_interval: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            dns_timeout: Duration::from_secs(5),
            nominatim_url: DEFAULT_NOMINATIM_URL.to_string(),
            user_agent: format!("iss_locator/{} (dns-loc-tracker)", env!("CARGO_PKG_VERSION")),
            http_timeout: Duration::from_secs(5),
            zoom_levels: DEFAULT_ZOOM_LEVELS.to_vec(),
            attempt_delay: Duration::from_secs(1),
            offline: false,
            live_interval: Duration::from_secs(DEFAULT_LIVE_INTERVAL_SECS),
        }
    }
}

impl TrackerConfig {
    /// Interpret the optional `live [interval_seconds]` argument.
    ///
    /// Anything that is not an integer in `1..=MAX_LIVE_INTERVAL_SECS` falls
    /// back to the default interval; the returned flag tells the caller
    /// whether that happened.
    pub fn parse_interval(raw: Option<&str>) -> (Duration, bool) {
        let default = Duration::from_secs(DEFAULT_LIVE_INTERVAL_SECS);
        match raw {
            None => (default, false),
            Some(s) => match s.trim().parse::<u64>() {
                Ok(secs) if (1..=MAX_LIVE_INTERVAL_SECS).contains(&secs) => {
                    (Duration::from_secs(secs), false)
                }
                _ => (default, true),
            },
        }
    }

    /// Set `live_interval` from the raw CLI argument. Returns `true` when the
    /// argument was rejected and the default was used instead.
    pub fn set_live_interval(&mut self, raw: Option<&str>) -> bool {
        let (interval, fell_back) = Self::parse_interval(raw);
        self.live_interval = interval;
        fell_back
    }

    /// Strip a trailing slash so URLs can be joined with `format!`.
    pub fn with_nominatim_url(mut self, url: &str) -> Self {
        self.nominatim_url = url.trim_end_matches('/').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = TrackerConfig::default();
        assert_eq!(cfg.host, "where-is-the-iss.dedyn.io");
        assert_eq!(cfg.zoom_levels, vec![10, 8, 6, 4, 3]);
        assert_eq!(cfg.live_interval, Duration::from_secs(10));
        assert!(!cfg.offline);
        assert!(cfg.user_agent.starts_with("iss_locator/"));
    }

    #[test]
    fn test_interval_absent() {
        assert_eq!(TrackerConfig::parse_interval(None), (Duration::from_secs(10), false));
    }

    #[test]
    fn test_interval_valid() {
        assert_eq!(TrackerConfig::parse_interval(Some("30")), (Duration::from_secs(30), false));
        assert_eq!(TrackerConfig::parse_interval(Some(" 5 ")), (Duration::from_secs(5), false));
    }

    #[test]
    fn test_interval_invalid_falls_back() {
        assert_eq!(TrackerConfig::parse_interval(Some("fast")), (Duration::from_secs(10), true));
        assert_eq!(TrackerConfig::parse_interval(Some("-3")), (Duration::from_secs(10), true));
        assert_eq!(TrackerConfig::parse_interval(Some("2.5")), (Duration::from_secs(10), true));
        assert_eq!(TrackerConfig::parse_interval(Some("0")), (Duration::from_secs(10), true));
    }

    #[test]
    fn test_interval_too_large_falls_back() {
        assert_eq!(
            TrackerConfig::parse_interval(Some("10000000000000")),
            (Duration::from_secs(10), true)
        );
        assert_eq!(TrackerConfig::parse_interval(Some("86401")), (Duration::from_secs(10), true));
        assert_eq!(
            TrackerConfig::parse_interval(Some("86400")),
            (Duration::from_secs(86_400), false)
        );
    }

    #[test]
    fn test_set_live_interval() {
        let mut cfg = TrackerConfig::default();
        assert!(!cfg.set_live_interval(Some("30")));
        assert_eq!(cfg.live_interval, Duration::from_secs(30));

        assert!(cfg.set_live_interval(Some("10000000000000")));
        assert_eq!(cfg.live_interval, Duration::from_secs(10));
    }

    #[test]
    fn test_nominatim_url_trailing_slash() {
        let cfg = TrackerConfig::default().with_nominatim_url("http://localhost:8080/");
        assert_eq!(cfg.nominatim_url, "http://localhost:8080");
    }
}
