//! RFC 1876 LOC RDATA decoding.
//!
//! Resolvers that do not know the LOC type hand back the raw 16-byte RDATA;
//! this turns it into the presentation text understood by [`super::parse`].

use thiserror::Error;

/// Record type code for LOC.
pub const LOC_RECORD_TYPE: u16 = 29;

const RDATA_LEN: usize = 16;
/// Latitude/longitude are stored as thousandths of an arc second offset by 2^31.
const EQUATOR: i64 = 1 << 31;
const MSEC_PER_DEGREE: u64 = 3_600_000;
/// Altitude is stored in centimeters above a base 100 000 m below the spheroid.
const ALTITUDE_BASE_CM: i64 = 10_000_000;

#[derive(Debug, Error, PartialEq)]
pub enum WireError {
    #[error("LOC RDATA too short: {0} bytes")]
    Truncated(usize),

    #[error("unsupported LOC version {0}")]
    Version(u8),

    #[error("invalid LOC precision byte 0x{0:02x}")]
    Precision(u8),
}

fn read_u32(buf: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

/// Size/precision: high nibble mantissa, low nibble power of ten, in centimeters.
fn precision_m(byte: u8) -> Result<f64, WireError> {
    let mantissa = byte >> 4;
    let exponent = byte & 0x0f;
    if mantissa > 9 || exponent > 9 {
        return Err(WireError::Precision(byte));
    }
    Ok(f64::from(mantissa) * 10f64.powi(i32::from(exponent)) / 100.0)
}

/// "D M S.sss H" for one angular field.
fn angle(raw: u32, positive: char, negative: char) -> String {
    let offset = i64::from(raw) - EQUATOR;
    let hemisphere = if offset < 0 { negative } else { positive };
    let msec = offset.unsigned_abs();

    let degrees = msec / MSEC_PER_DEGREE;
    let rest = msec % MSEC_PER_DEGREE;
    let minutes = rest / 60_000;
    let rest = rest % 60_000;

    format!(
        "{} {} {}.{:03} {}",
        degrees,
        minutes,
        rest / 1000,
        rest % 1000,
        hemisphere
    )
}

/// Decode version-0 LOC RDATA into presentation format.
pub fn to_presentation(rdata: &[u8]) -> Result<String, WireError> {
    if rdata.len() < RDATA_LEN {
        return Err(WireError::Truncated(rdata.len()));
    }
    if rdata[0] != 0 {
        return Err(WireError::Version(rdata[0]));
    }

    let size = precision_m(rdata[1])?;
    let horiz_pre = precision_m(rdata[2])?;
    let vert_pre = precision_m(rdata[3])?;

    let latitude = angle(read_u32(rdata, 4), 'N', 'S');
    let longitude = angle(read_u32(rdata, 8), 'E', 'W');
    let altitude = (i64::from(read_u32(rdata, 12)) - ALTITUDE_BASE_CM) as f64 / 100.0;

    Ok(format!(
        "{} {} {:.2}m {:.2}m {:.2}m {:.2}m",
        latitude, longitude, altitude, size, horiz_pre, vert_pre
    ))
}
