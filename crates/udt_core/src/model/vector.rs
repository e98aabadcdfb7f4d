//! Three-component vector value (`Vector3D` UDT).
//!
//! # Invariants
//! - Components are finite; an operation overflowing to an infinity fails.
//! - Equality is exact per component.

use crate::codec::{ByteReader, ByteWriter};
use crate::error::{DecodeError, DomainError, ParseError};
use crate::model::cell::{Cell, UdtPayload};
use std::hash::Hasher;

const LEGACY_PAYLOAD_LEN: usize = 12;

/// Nullable vector cell.
pub type Vector3 = Cell<Vec3>;

/// Single-precision 3D vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    x: f32,
    y: f32,
    z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Result<Self, DomainError> {
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return Err(DomainError::NonFinite {
                type_name: Self::TYPE_NAME,
            });
        }
        Ok(Self { x, y, z })
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn z(&self) -> f32 {
        self.z
    }

    pub fn add(&self, other: &Self) -> Result<Self, DomainError> {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn subtract(&self, other: &Self) -> Result<Self, DomainError> {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn multiply_by_scalar(&self, scalar: f32) -> Result<Self, DomainError> {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }

    /// Computed in single precision, widened on return.
    pub fn dot(&self, other: &Self) -> f64 {
        f64::from(self.x * other.x + self.y * other.y + self.z * other.z)
    }

    pub fn cross(&self, other: &Self) -> Result<Self, DomainError> {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    fn read_components(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        let (x, y, z) = (reader.read_f32()?, reader.read_f32()?, reader.read_f32()?);
        Self::new(x, y, z).map_err(|err| DecodeError::InvalidPayload {
            type_name: Self::TYPE_NAME,
            reason: err.to_string(),
        })
    }
}

impl UdtPayload for Vec3 {
    const TYPE_NAME: &'static str = "Vector3D";

    fn parse_payload(text: &str) -> Result<Self, ParseError> {
        if text.len() < 2 || !text.starts_with('[') || !text.ends_with(']') {
            return Err(ParseError::Format {
                type_name: Self::TYPE_NAME,
                expected: "[x,y,z]",
            });
        }
        let parts: Vec<&str> = text[1..text.len() - 1].split(',').collect();
        if parts.len() != 3 {
            return Err(ParseError::ComponentCount {
                type_name: Self::TYPE_NAME,
                expected: "3 (x,y,z)",
                found: parts.len(),
            });
        }

        const NAMES: [&str; 3] = ["x", "y", "z"];
        let mut components = [0f32; 3];
        for (index, part) in parts.iter().enumerate() {
            let input = part.trim();
            let value = input.parse::<f32>().map_err(|_| ParseError::InvalidNumber {
                type_name: Self::TYPE_NAME,
                component: NAMES[index],
                input: input.to_string(),
            })?;
            if !value.is_finite() {
                return Err(ParseError::NonFinite {
                    type_name: Self::TYPE_NAME,
                    component: NAMES[index],
                });
            }
            components[index] = value;
        }
        let [x, y, z] = components;
        Ok(Self { x, y, z })
    }

    fn render_payload(&self) -> String {
        format!("[{},{},{}]", self.x, self.y, self.z)
    }

    fn write_payload(&self, writer: &mut ByteWriter) {
        writer.write_f32(self.x);
        writer.write_f32(self.y);
        writer.write_f32(self.z);
    }

    fn read_payload(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Self::read_components(reader)
    }

    fn payload_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn hash_payload<H: Hasher>(&self, state: &mut H) {
        // -0.0 == 0.0, so both must hash alike.
        for component in [self.x, self.y, self.z] {
            let normalized = if component == 0.0 { 0.0f32 } else { component };
            state.write_u32(normalized.to_bits());
        }
    }
}

impl Cell<Vec3> {
    /// Reads either the flagged layout or the flagless legacy one, where a
    /// value is twelve bytes and null is an empty payload.
    pub fn decode_legacy(bytes: &[u8]) -> Result<Self, DecodeError> {
        match bytes.len() {
            0 => Ok(Self::null()),
            LEGACY_PAYLOAD_LEN => {
                let mut reader = ByteReader::new(bytes);
                let vector = Vec3::read_components(&mut reader)?;
                reader.finish()?;
                Ok(Self::new(vector))
            }
            _ => Self::decode(bytes),
        }
    }

    pub fn add(&self, other: &Self) -> Result<Self, DomainError> {
        self.try_zip(other, Vec3::add)
    }

    pub fn subtract(&self, other: &Self) -> Result<Self, DomainError> {
        self.try_zip(other, Vec3::subtract)
    }

    pub fn multiply_by_scalar(&self, scalar: f32) -> Result<Self, DomainError> {
        self.try_map(|vector| vector.multiply_by_scalar(scalar))
    }

    /// Null when either side is null.
    pub fn dot_product(&self, other: &Self) -> Option<f64> {
        match (self.get(), other.get()) {
            (Some(a), Some(b)) => Some(a.dot(b)),
            _ => None,
        }
    }

    pub fn cross_product(&self, other: &Self) -> Result<Self, DomainError> {
        self.try_zip(other, Vec3::cross)
    }
}
