//! DNS LOC lookups.

use crate::loc::wire::{self, LOC_RECORD_TYPE};
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::proto::serialize::binary::BinEncodable;
use hickory_resolver::Resolver;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Why a LOC record could not be fetched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FetchError {
    #[error("DNS name does not exist: {0}")]
    NameNotFound(String),

    #[error("DNS query timed out")]
    Timeout,

    #[error("no LOC record in DNS answer for {0}")]
    NoAnswer(String),

    #[error("DNS error: {0}")]
    Other(String),
}

/// Something that yields a LOC record in presentation format.
pub trait LocSource {
    fn fetch(&self) -> Result<String, FetchError>;
}

impl<F> LocSource for F
where
    F: Fn() -> Result<String, FetchError>,
{
    fn fetch(&self) -> Result<String, FetchError> {
        self()
    }
}

/// Resolves the LOC record of a fixed host.
pub struct DnsLocSource {
    resolver: Resolver,
    host: String,
}

impl DnsLocSource {
    /// Use the system resolver configuration, falling back to public
    /// defaults when it cannot be read.
    pub fn new(host: &str, timeout: Duration) -> Result<Self, FetchError> {
        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = 2;

        let resolver = match hickory_resolver::system_conf::read_system_conf() {
            Ok((config, _)) => Resolver::new(config, opts),
            Err(e) => {
                warn!(error = %e, "could not read system DNS config; using defaults");
                Resolver::new(ResolverConfig::default(), opts)
            }
        }
        .map_err(|e| FetchError::Other(format!("failed to create resolver: {}", e)))?;

        Ok(Self { resolver, host: host.to_string() })
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

impl LocSource for DnsLocSource {
    fn fetch(&self) -> Result<String, FetchError> {
        let loc_type = RecordType::from(LOC_RECORD_TYPE);
        debug!(host = %self.host, "querying LOC record");

        let lookup = self
            .resolver
            .lookup(self.host.as_str(), loc_type)
            .map_err(|e| classify_error(&self.host, &e))?;

        let rdata = lookup
            .record_iter()
            .filter(|record| record.record_type() == loc_type)
            .find_map(|record| record.data())
            .ok_or_else(|| FetchError::NoAnswer(self.host.clone()))?;

        let bytes = rdata
            .to_bytes()
            .map_err(|e| FetchError::Other(format!("could not encode LOC RDATA: {}", e)))?;
        let text = wire::to_presentation(&bytes).map_err(|e| FetchError::Other(e.to_string()))?;

        debug!(host = %self.host, record = %text, "LOC record received");
        Ok(text)
    }
}

fn classify_error(host: &str, err: &ResolveError) -> FetchError {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => {
            if *response_code == ResponseCode::NXDomain {
                FetchError::NameNotFound(host.to_string())
            } else {
                FetchError::NoAnswer(host.to_string())
            }
        }
        ResolveErrorKind::Timeout => FetchError::Timeout,
        _ => FetchError::Other(err.to_string()),
    }
}
