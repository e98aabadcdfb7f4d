//! Physical quantity value (`UnitSI` UDT).
//!
//! # Responsibility
//! - Parse `value [unit]` restricted to the seven SI base units.
//! - Combine units algebraically under multiplication and division.
//! - Render the value under a decimal SI prefix for display.
//!
//! # Invariants
//! - The value is finite; any operation producing NaN/∞ fails.
//! - `none` is the dimensionless unit and the identity for `*` and `/`.
//! - Arithmetic may synthesize compound units (`a*b`, `a/b`, `1/b`) that
//!   `parse` itself never accepts.
//! - Addition and subtraction require byte-identical unit strings.

use crate::codec::{ByteReader, ByteWriter};
use crate::error::{DecodeError, DomainError, ParseError};
use crate::model::cell::{Cell, UdtPayload};
use std::hash::{Hash, Hasher};

/// Unit string of a dimensionless quantity.
pub const DIMENSIONLESS: &str = "none";

const BASE_UNITS: &[&str] = &["m", "kg", "s", "A", "K", "mol", "cd"];
const KILO_GRAM: &str = "kg";
const QUANTITY_TOLERANCE: f64 = 1e-9;

// Longer symbols precede their one-letter prefixes (`da` before `d`).
const PREFIXES: &[(&str, f64)] = &[
    ("Y", 1e24),
    ("Z", 1e21),
    ("E", 1e18),
    ("P", 1e15),
    ("T", 1e12),
    ("G", 1e9),
    ("M", 1e6),
    ("k", 1e3),
    ("h", 1e2),
    ("da", 1e1),
    ("", 1e0),
    ("d", 1e-1),
    ("c", 1e-2),
    ("m", 1e-3),
    ("u", 1e-6),
    ("n", 1e-9),
    ("p", 1e-12),
    ("f", 1e-15),
    ("a", 1e-18),
    ("z", 1e-21),
    ("y", 1e-24),
];

/// The SI base unit symbols accepted by `parse`.
pub fn si_base_units() -> &'static [&'static str] {
    BASE_UNITS
}

/// Decimal prefix symbols with their scale factors, largest first.
pub fn si_prefixes() -> &'static [(&'static str, f64)] {
    PREFIXES
}

fn prefix_factor(symbol: &str) -> Option<f64> {
    PREFIXES
        .iter()
        .find(|(candidate, _)| *candidate == symbol)
        .map(|(_, factor)| *factor)
}

fn is_dimensionless(unit: &str) -> bool {
    unit.eq_ignore_ascii_case(DIMENSIONLESS)
}

fn is_base_unit(unit: &str) -> bool {
    BASE_UNITS.contains(&unit)
}

/// Scale factor of an already-prefixed base unit: 1e3 for `km`, 1 otherwise.
fn unit_prefix_factor(unit: &str) -> f64 {
    PREFIXES
        .iter()
        .filter(|(symbol, _)| !symbol.is_empty())
        .find(|(symbol, _)| {
            unit.strip_prefix(symbol)
                .is_some_and(|base| !base.is_empty() && is_base_unit(base))
        })
        .map_or(1.0, |(_, factor)| *factor)
}

/// Nullable physical quantity cell.
pub type PhysicalQuantity = Cell<Quantity>;

#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    value: f64,
    unit: String,
}

impl Quantity {
    /// Builds a quantity; an empty unit becomes [`DIMENSIONLESS`].
    pub fn new(value: f64, unit: &str) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::NonFinite {
                type_name: Self::TYPE_NAME,
            });
        }
        let unit = if unit.is_empty() { DIMENSIONLESS } else { unit };
        Ok(Self {
            value,
            unit: unit.to_string(),
        })
    }

    pub fn dimensionless(value: f64) -> Result<Self, DomainError> {
        Self::new(value, DIMENSIONLESS)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    fn same_unit(&self, other: &Self) -> Result<(), DomainError> {
        if self.unit == other.unit {
            Ok(())
        } else {
            Err(DomainError::UnitMismatch {
                left: self.unit.clone(),
                right: other.unit.clone(),
            })
        }
    }

    pub fn add(&self, other: &Self) -> Result<Self, DomainError> {
        self.same_unit(other)?;
        Self::new(self.value + other.value, &self.unit)
    }

    pub fn subtract(&self, other: &Self) -> Result<Self, DomainError> {
        self.same_unit(other)?;
        Self::new(self.value - other.value, &self.unit)
    }

    pub fn multiply(&self, other: &Self) -> Result<Self, DomainError> {
        let unit = match (is_dimensionless(&self.unit), is_dimensionless(&other.unit)) {
            (true, true) => DIMENSIONLESS.to_string(),
            (true, false) => other.unit.clone(),
            (false, true) => self.unit.clone(),
            (false, false) => format!("{}*{}", self.unit, other.unit),
        };
        Self::new(self.value * other.value, &unit)
    }

    pub fn divide(&self, other: &Self) -> Result<Self, DomainError> {
        if other.value == 0.0 {
            return Err(DomainError::DivisionByZero);
        }
        let unit = match (is_dimensionless(&self.unit), is_dimensionless(&other.unit)) {
            (true, true) => DIMENSIONLESS.to_string(),
            (_, true) => self.unit.clone(),
            (true, false) => format!("1/{}", other.unit),
            (false, false) => format!("{}/{}", self.unit, other.unit),
        };
        Self::new(self.value / other.value, &unit)
    }

    pub fn multiply_by_scalar(&self, scalar: f64) -> Result<Self, DomainError> {
        Self::new(self.value * scalar, &self.unit)
    }

    pub fn divide_by_scalar(&self, scalar: f64) -> Result<Self, DomainError> {
        if scalar == 0.0 {
            return Err(DomainError::DivisionByZero);
        }
        Self::new(self.value / scalar, &self.unit)
    }

    /// Renders the value rescaled under `prefix`, e.g. `0.005 [km]`.
    ///
    /// An empty prefix turns `kg`-based units into grams and otherwise
    /// returns the canonical rendering. The new prefix is written in front of
    /// the stored unit text, so `5 [km]` under `M` reads `0.005 [Mkm]`; only
    /// `kg` units drop their `k`.
    pub fn to_prefixed_string(&self, prefix: &str) -> Result<String, DomainError> {
        let starts_with_kg = self
            .unit
            .get(..KILO_GRAM.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(KILO_GRAM));
        let kilo = prefix_factor("k").unwrap_or(1e3);

        if prefix.is_empty() {
            if starts_with_kg {
                return Ok(format!("{} [g]", self.value * kilo));
            }
            return Ok(self.render_payload());
        }

        let target = prefix_factor(prefix)
            .filter(|factor| *factor != 0.0)
            .ok_or_else(|| DomainError::UnknownPrefix(prefix.to_string()))?;

        let (value, unit) = if starts_with_kg {
            (self.value * kilo / target, &self.unit[1..])
        } else {
            let factor = unit_prefix_factor(&self.unit);
            (self.value * factor / target, self.unit.as_str())
        };
        Ok(format!("{value} [{prefix}{unit}]"))
    }
}

impl UdtPayload for Quantity {
    const TYPE_NAME: &'static str = "UnitSI";

    fn parse_payload(text: &str) -> Result<Self, ParseError> {
        let format_error = ParseError::Format {
            type_name: Self::TYPE_NAME,
            expected: "'value [unit]'",
        };
        let (Some(open), Some(close)) = (text.find('['), text.rfind(']')) else {
            return Err(format_error);
        };
        if close <= open || !text[close + 1..].trim().is_empty() {
            return Err(format_error);
        }

        let number = text[..open].trim();
        let unit = text[open + 1..close].trim();
        if unit.is_empty() {
            return Err(format_error);
        }
        let value = number
            .parse::<f64>()
            .map_err(|_| ParseError::InvalidNumber {
                type_name: Self::TYPE_NAME,
                component: "value",
                input: number.to_string(),
            })?;
        if !value.is_finite() {
            return Err(ParseError::NonFinite {
                type_name: Self::TYPE_NAME,
                component: "value",
            });
        }
        if !is_base_unit(unit) {
            return Err(ParseError::UnknownUnit(unit.to_string()));
        }
        Ok(Self {
            value,
            unit: unit.to_string(),
        })
    }

    fn render_payload(&self) -> String {
        format!("{} [{}]", self.value, self.unit)
    }

    fn write_payload(&self, writer: &mut ByteWriter) {
        writer.write_f64(self.value);
        writer.write_string(&self.unit);
    }

    fn read_payload(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        let value = reader.read_f64()?;
        let unit = reader.read_string()?;
        Self::new(value, &unit).map_err(|err| DecodeError::InvalidPayload {
            type_name: Self::TYPE_NAME,
            reason: err.to_string(),
        })
    }

    fn payload_eq(&self, other: &Self) -> bool {
        (self.value - other.value).abs() < QUANTITY_TOLERANCE && self.unit == other.unit
    }

    fn hash_payload<H: Hasher>(&self, state: &mut H) {
        // Quantized to the equality tolerance.
        state.write_i64((self.value / QUANTITY_TOLERANCE).round() as i64);
        self.unit.hash(state);
    }
}

impl Cell<Quantity> {
    pub fn add(&self, other: &Self) -> Result<Self, DomainError> {
        self.try_zip(other, Quantity::add)
    }

    pub fn subtract(&self, other: &Self) -> Result<Self, DomainError> {
        self.try_zip(other, Quantity::subtract)
    }

    pub fn multiply(&self, other: &Self) -> Result<Self, DomainError> {
        self.try_zip(other, Quantity::multiply)
    }

    /// Null operands yield null; a zero divisor is an error.
    pub fn divide(&self, other: &Self) -> Result<Self, DomainError> {
        self.try_zip(other, Quantity::divide)
    }

    pub fn multiply_by_scalar(&self, scalar: f64) -> Result<Self, DomainError> {
        self.try_map(|quantity| quantity.multiply_by_scalar(scalar))
    }

    pub fn divide_by_scalar(&self, scalar: f64) -> Result<Self, DomainError> {
        self.try_map(|quantity| quantity.divide_by_scalar(scalar))
    }

    /// `None` for a null cell.
    pub fn to_prefixed_string(&self, prefix: Option<&str>) -> Result<Option<String>, DomainError> {
        self.get()
            .map(|quantity| quantity.to_prefixed_string(prefix.unwrap_or("")))
            .transpose()
    }
}
