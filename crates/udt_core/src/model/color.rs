//! RGBA color value (`ColorRGB` UDT).
//!
//! Accepts `#RRGGBB`, `#RRGGBBAA`, `[r,g,b]` and `[r,g,b,a]`. Alpha defaults
//! to 255 and is omitted from both renderings when opaque.

use crate::codec::{ByteReader, ByteWriter};
use crate::error::{DecodeError, DomainError, ParseError};
use crate::model::cell::{Cell, UdtPayload, NULL_TEXT};
use std::hash::{Hash, Hasher};

pub const OPAQUE: u8 = 255;

/// Nullable color cell.
pub type ColorValue = Cell<Rgba>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, OPAQUE)
    }

    /// Inverts the color channels; alpha is preserved.
    pub fn negate(&self) -> Self {
        Self::new(255 - self.r, 255 - self.g, 255 - self.b, self.a)
    }

    /// Linear mix towards `other`, including alpha. Channel ties round to even.
    pub fn blend(&self, other: &Self, ratio: f64) -> Result<Self, DomainError> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(DomainError::RatioOutOfRange(ratio));
        }
        let mix = |from: u8, to: u8| -> u8 {
            let value = f64::from(from) * (1.0 - ratio) + f64::from(to) * ratio;
            value.round_ties_even().clamp(0.0, 255.0) as u8
        };
        Ok(Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        ))
    }

    pub fn to_hex(&self) -> String {
        if self.a == OPAQUE {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    fn from_hex(text: &str) -> Result<Self, ParseError> {
        let digits = &text[1..];
        let valid_len = digits.len() == 6 || digits.len() == 8;
        if !valid_len || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseError::InvalidHex(text.to_string()));
        }
        let channel = |index: usize| -> Result<u8, ParseError> {
            u8::from_str_radix(&digits[index * 2..index * 2 + 2], 16)
                .map_err(|_| ParseError::InvalidHex(text.to_string()))
        };
        let alpha = if digits.len() == 8 { channel(3)? } else { OPAQUE };
        Ok(Self::new(channel(0)?, channel(1)?, channel(2)?, alpha))
    }

    fn from_bracket(text: &str) -> Result<Self, ParseError> {
        let parts: Vec<&str> = text[1..text.len() - 1].split(',').collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(ParseError::ComponentCount {
                type_name: Self::TYPE_NAME,
                expected: "3 or 4 channels",
                found: parts.len(),
            });
        }
        const NAMES: [&str; 4] = ["red", "green", "blue", "alpha"];
        let mut channels = [OPAQUE; 4];
        for (index, part) in parts.iter().enumerate() {
            let input = part.trim();
            channels[index] = input.parse::<u8>().map_err(|_| ParseError::InvalidNumber {
                type_name: Self::TYPE_NAME,
                component: NAMES[index],
                input: input.to_string(),
            })?;
        }
        let [r, g, b, a] = channels;
        Ok(Self::new(r, g, b, a))
    }
}

impl UdtPayload for Rgba {
    const TYPE_NAME: &'static str = "ColorRGB";

    fn parse_payload(text: &str) -> Result<Self, ParseError> {
        if text.starts_with('#') {
            return Self::from_hex(text);
        }
        if text.len() >= 2 && text.starts_with('[') && text.ends_with(']') {
            return Self::from_bracket(text);
        }
        Err(ParseError::Format {
            type_name: Self::TYPE_NAME,
            expected: "#RRGGBB, #RRGGBBAA, [r,g,b] or [r,g,b,a]",
        })
    }

    fn render_payload(&self) -> String {
        if self.a == OPAQUE {
            format!("[{},{},{}]", self.r, self.g, self.b)
        } else {
            format!("[{},{},{},{}]", self.r, self.g, self.b, self.a)
        }
    }

    fn write_payload(&self, writer: &mut ByteWriter) {
        for channel in [self.r, self.g, self.b, self.a] {
            writer.write_u8(channel);
        }
    }

    fn read_payload(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self::new(
            reader.read_u8()?,
            reader.read_u8()?,
            reader.read_u8()?,
            reader.read_u8()?,
        ))
    }

    fn payload_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn hash_payload<H: Hasher>(&self, state: &mut H) {
        self.hash(state);
    }
}

impl Cell<Rgba> {
    pub fn negate(&self) -> Self {
        Cell::from(self.get().map(Rgba::negate))
    }

    /// Null when either side is null.
    ///
    /// The ratio is validated before nullity, so an out-of-range ratio fails
    /// even when an operand is null.
    pub fn blend(&self, other: &Self, ratio: f64) -> Result<Self, DomainError> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(DomainError::RatioOutOfRange(ratio));
        }
        self.try_zip(other, |left, right| left.blend(right, ratio))
    }

    pub fn to_hex(&self) -> String {
        self.get()
            .map(Rgba::to_hex)
            .unwrap_or_else(|| NULL_TEXT.to_string())
    }
}
