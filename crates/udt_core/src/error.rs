//! Error kinds surfaced by the value types.
//!
//! # Responsibility
//! - `ParseError`: text does not match a type's grammar.
//! - `DomainError`: a well-formed operation is semantically illegal.
//! - `DecodeError`: stored bytes do not describe a valid cell.
//!
//! # Invariants
//! - Every variant names the rule that was violated.
//! - No error is recovered internally; callers decide disposition.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Input text does not match the declared grammar of a value type.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Delimiters or overall shape are wrong.
    Format {
        type_name: &'static str,
        expected: &'static str,
    },
    /// Wrong number of comma-separated components.
    ComponentCount {
        type_name: &'static str,
        expected: &'static str,
        found: usize,
    },
    /// A numeric component could not be read.
    InvalidNumber {
        type_name: &'static str,
        component: &'static str,
        input: String,
    },
    /// A numeric component parsed to NaN or an infinity.
    NonFinite {
        type_name: &'static str,
        component: &'static str,
    },
    /// Email local part (before `@`) violates the local-part rules.
    InvalidLocal { reason: &'static str },
    /// Email domain (after `@`) violates the domain rules.
    InvalidDomain { reason: &'static str },
    LatitudeOutOfRange(f64),
    InvalidHex(String),
    UnknownCurrency(String),
    UnknownUnit(String),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Format {
                type_name,
                expected,
            } => write!(f, "invalid {type_name} format, expected {expected}"),
            Self::ComponentCount {
                type_name,
                expected,
                found,
            } => write!(
                f,
                "invalid {type_name} component count: expected {expected}, found {found}"
            ),
            Self::InvalidNumber {
                type_name,
                component,
                input,
            } => write!(f, "invalid {type_name} {component} value `{input}`"),
            Self::NonFinite {
                type_name,
                component,
            } => write!(f, "{type_name} {component} must be a finite number"),
            Self::InvalidLocal { reason } => write!(f, "invalid email local part: {reason}"),
            Self::InvalidDomain { reason } => write!(f, "invalid email domain: {reason}"),
            Self::LatitudeOutOfRange(lat) => {
                write!(f, "latitude {lat} is outside the range [-90, 90]")
            }
            Self::InvalidHex(input) => write!(f, "invalid hex color `{input}`"),
            Self::UnknownCurrency(code) => write!(f, "unknown ISO currency code `{code}`"),
            Self::UnknownUnit(unit) => write!(
                f,
                "unknown unit `{unit}`, expected one of: m, kg, s, A, K, mol, cd"
            ),
        }
    }
}

impl Error for ParseError {}

/// A structurally valid operation that is semantically illegal.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    UnitMismatch { left: String, right: String },
    CurrencyMismatch { left: String, right: String },
    /// Blend ratio outside `[0, 1]`.
    RatioOutOfRange(f64),
    DivisionByZero,
    UnknownPrefix(String),
    UnsupportedCurrency(String),
    /// Arithmetic produced NaN or an infinity where the type forbids it.
    NonFinite { type_name: &'static str },
    /// Decimal arithmetic left the representable range.
    Overflow { type_name: &'static str },
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnitMismatch { left, right } => {
                write!(f, "unit mismatch: `{left}` and `{right}` must be identical")
            }
            Self::CurrencyMismatch { left, right } => {
                write!(f, "currency mismatch: {left} and {right}")
            }
            Self::RatioOutOfRange(ratio) => {
                write!(f, "ratio {ratio} must be between 0.0 and 1.0")
            }
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::UnknownPrefix(prefix) => write!(f, "unknown SI prefix `{prefix}`"),
            Self::UnsupportedCurrency(code) => {
                write!(f, "unsupported currency for conversion `{code}`")
            }
            Self::NonFinite { type_name } => {
                write!(f, "{type_name} result is not a finite number")
            }
            Self::Overflow { type_name } => write!(f, "{type_name} arithmetic overflow"),
        }
    }
}

impl Error for DomainError {}

/// Stored bytes do not decode into a valid cell.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    Truncated { needed: usize, remaining: usize },
    TrailingBytes(usize),
    InvalidNullFlag(u8),
    InvalidUtf8,
    /// String length prefix is malformed or exceeds the 32-bit range.
    InvalidLength,
    InvalidDecimal,
    /// Bytes were well-formed but the payload breaks the type invariant.
    InvalidPayload {
        type_name: &'static str,
        reason: String,
    },
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Truncated { needed, remaining } => write!(
                f,
                "payload truncated: needed {needed} bytes, {remaining} remaining"
            ),
            Self::TrailingBytes(count) => write!(f, "{count} unexpected trailing bytes"),
            Self::InvalidNullFlag(flag) => write!(f, "invalid null flag byte {flag:#04x}"),
            Self::InvalidUtf8 => write!(f, "string field is not valid UTF-8"),
            Self::InvalidLength => write!(f, "string length prefix is malformed"),
            Self::InvalidDecimal => write!(f, "decimal field has invalid flags"),
            Self::InvalidPayload { type_name, reason } => {
                write!(f, "stored {type_name} is invalid: {reason}")
            }
        }
    }
}

impl Error for DecodeError {}
