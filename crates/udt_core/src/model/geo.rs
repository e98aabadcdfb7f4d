//! Geographic coordinate value (`GeoLocation` UDT).
//!
//! # Invariants
//! - Latitude is finite and within `[-90, 90]`; out-of-range input is rejected.
//! - Longitude is finite and wrapped into `(-180, 180]`.
//! - Equality tolerates an absolute difference below `1e-9` per component.

use crate::codec::{ByteReader, ByteWriter};
use crate::error::{DecodeError, ParseError};
use crate::model::cell::{Cell, UdtPayload};
use std::hash::Hasher;

const EARTH_RADIUS_KM: f64 = 6371.0;
const COORD_TOLERANCE: f64 = 1e-9;
const CARDINAL_DECIMALS: usize = 6;
const EXPECTED_FORMAT: &str = "'(lat, lon)' or 'lat N/S, lon E/W'";

/// Nullable geographic coordinate cell.
pub type GeoCoordinate = Cell<LatLon>;

/// Validated latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy)]
pub struct LatLon {
    lat: f64,
    lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Result<Self, ParseError> {
        if !lat.is_finite() {
            return Err(ParseError::NonFinite {
                type_name: Self::TYPE_NAME,
                component: "latitude",
            });
        }
        if !lon.is_finite() {
            return Err(ParseError::NonFinite {
                type_name: Self::TYPE_NAME,
                component: "longitude",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ParseError::LatitudeOutOfRange(lat));
        }
        Ok(Self {
            lat,
            lon: normalize_longitude(lon),
        })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Great-circle distance in kilometres (haversine).
    pub fn distance_km(&self, other: &Self) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }

    /// `52.2297N, 21.0122E` style display with absolute values.
    pub fn to_cardinal_string(&self) -> String {
        let lat_dir = if self.lat >= 0.0 { 'N' } else { 'S' };
        let lon_dir = if self.lon >= 0.0 { 'E' } else { 'W' };
        format!(
            "{}{lat_dir}, {}{lon_dir}",
            trim_decimals(self.lat.abs()),
            trim_decimals(self.lon.abs())
        )
    }
}

fn normalize_longitude(lon: f64) -> f64 {
    if lon > -180.0 && lon <= 180.0 {
        return lon;
    }
    let wrapped = ((lon + 180.0) % 360.0 + 360.0) % 360.0 - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Fixed six decimals with trailing zeros removed.
fn trim_decimals(value: f64) -> String {
    let fixed = format!("{:.*}", CARDINAL_DECIMALS, value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Shortest round-trip rendering with an explicit `+` for positive values
/// and a bare `0` for zero.
fn signed_decimals(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value > 0.0 {
        format!("+{value}")
    } else {
        format!("{value}")
    }
}

fn parse_component(
    part: &str,
    positive: char,
    negative: char,
    component: &'static str,
) -> Result<f64, ParseError> {
    let upper = part.to_ascii_uppercase();
    let (number, sign) = if let Some(rest) = upper.strip_suffix(positive) {
        (rest.trim(), 1.0)
    } else if let Some(rest) = upper.strip_suffix(negative) {
        (rest.trim(), -1.0)
    } else {
        (upper.as_str(), 1.0)
    };
    number
        .parse::<f64>()
        .map(|value| value * sign)
        .map_err(|_| ParseError::InvalidNumber {
            type_name: LatLon::TYPE_NAME,
            component,
            input: part.to_string(),
        })
}

impl UdtPayload for LatLon {
    const TYPE_NAME: &'static str = "GeoLocation";

    fn parse_payload(text: &str) -> Result<Self, ParseError> {
        let inner = text.trim_matches(|c| c == '(' || c == ')');
        let parts: Vec<&str> = inner.split(',').collect();
        if parts.len() != 2 {
            return Err(ParseError::ComponentCount {
                type_name: Self::TYPE_NAME,
                expected: EXPECTED_FORMAT,
                found: parts.len(),
            });
        }
        let lat = parse_component(parts[0].trim(), 'N', 'S', "latitude")?;
        let lon = parse_component(parts[1].trim(), 'E', 'W', "longitude")?;
        Self::new(lat, lon)
    }

    fn render_payload(&self) -> String {
        format!(
            "({}, {})",
            signed_decimals(self.lat),
            signed_decimals(self.lon)
        )
    }

    fn write_payload(&self, writer: &mut ByteWriter) {
        writer.write_f64(self.lat);
        writer.write_f64(self.lon);
    }

    fn read_payload(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        let lat = reader.read_f64()?;
        let lon = reader.read_f64()?;
        Self::new(lat, lon).map_err(|err| DecodeError::InvalidPayload {
            type_name: Self::TYPE_NAME,
            reason: err.to_string(),
        })
    }

    fn payload_eq(&self, other: &Self) -> bool {
        (self.lat - other.lat).abs() < COORD_TOLERANCE
            && (self.lon - other.lon).abs() < COORD_TOLERANCE
    }

    fn hash_payload<H: Hasher>(&self, state: &mut H) {
        // Quantized to the equality tolerance.
        state.write_i64((self.lat / COORD_TOLERANCE).round() as i64);
        state.write_i64((self.lon / COORD_TOLERANCE).round() as i64);
    }
}

impl Cell<LatLon> {
    /// Null when either side is null.
    pub fn distance_km(&self, other: &Self) -> Option<f64> {
        match (self.get(), other.get()) {
            (Some(a), Some(b)) => Some(a.distance_km(b)),
            _ => None,
        }
    }

    /// Cardinal display, or `NULL`.
    pub fn to_cardinal_string(&self) -> String {
        self.get()
            .map(LatLon::to_cardinal_string)
            .unwrap_or_else(|| crate::model::cell::NULL_TEXT.to_string())
    }
}
