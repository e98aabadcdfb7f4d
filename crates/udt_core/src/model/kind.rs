//! Type-name registry for dispatching raw text or bytes to a value type.
//!
//! Names match the user-defined type names used by storage columns.

use crate::error::{DecodeError, ParseError};
use crate::model::cell::UdtPayload;
use crate::model::color::{ColorValue, Rgba};
use crate::model::email::{EmailAddress, EmailValue};
use crate::model::geo::{GeoCoordinate, LatLon};
use crate::model::money::{Money, MoneyValue};
use crate::model::quantity::{PhysicalQuantity, Quantity};
use crate::model::vector::{Vec3, Vector3};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One of the six storage type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UdtKind {
    GeoLocation,
    #[serde(rename = "UnitSI")]
    UnitSi,
    Vector3D,
    Email,
    #[serde(rename = "ColorRGB")]
    ColorRgb,
    MoneyType,
}

impl UdtKind {
    pub const ALL: [UdtKind; 6] = [
        Self::GeoLocation,
        Self::UnitSi,
        Self::Vector3D,
        Self::Email,
        Self::ColorRgb,
        Self::MoneyType,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::GeoLocation => LatLon::TYPE_NAME,
            Self::UnitSi => Quantity::TYPE_NAME,
            Self::Vector3D => Vec3::TYPE_NAME,
            Self::Email => EmailAddress::TYPE_NAME,
            Self::ColorRgb => Rgba::TYPE_NAME,
            Self::MoneyType => Money::TYPE_NAME,
        }
    }
}

impl Display for UdtKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The type name is not one of the six known names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl Display for UnknownKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unsupported user-defined type `{}`", self.0)
    }
}

impl Error for UnknownKind {}

impl FromStr for UdtKind {
    type Err = UnknownKind;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name.trim())
            .ok_or_else(|| UnknownKind(name.to_string()))
    }
}

/// A cell of any of the six value types.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnyValue {
    GeoLocation(GeoCoordinate),
    UnitSi(PhysicalQuantity),
    Vector3D(Vector3),
    Email(EmailValue),
    ColorRgb(ColorValue),
    MoneyType(MoneyValue),
}

/// Expands `$body` once per variant with `$cell` bound to the inner cell.
macro_rules! each_variant {
    ($value:expr, $cell:ident => $body:expr) => {
        match $value {
            AnyValue::GeoLocation($cell) => $body,
            AnyValue::UnitSi($cell) => $body,
            AnyValue::Vector3D($cell) => $body,
            AnyValue::Email($cell) => $body,
            AnyValue::ColorRgb($cell) => $body,
            AnyValue::MoneyType($cell) => $body,
        }
    };
}

impl AnyValue {
    pub fn parse(kind: UdtKind, text: &str) -> Result<Self, ParseError> {
        Ok(match kind {
            UdtKind::GeoLocation => Self::GeoLocation(GeoCoordinate::parse(text)?),
            UdtKind::UnitSi => Self::UnitSi(PhysicalQuantity::parse(text)?),
            UdtKind::Vector3D => Self::Vector3D(Vector3::parse(text)?),
            UdtKind::Email => Self::Email(EmailValue::parse(text)?),
            UdtKind::ColorRgb => Self::ColorRgb(ColorValue::parse(text)?),
            UdtKind::MoneyType => Self::MoneyType(MoneyValue::parse(text)?),
        })
    }

    /// Vector payloads also accept the flagless legacy layout.
    pub fn decode(kind: UdtKind, bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(match kind {
            UdtKind::GeoLocation => Self::GeoLocation(GeoCoordinate::decode(bytes)?),
            UdtKind::UnitSi => Self::UnitSi(PhysicalQuantity::decode(bytes)?),
            UdtKind::Vector3D => Self::Vector3D(Vector3::decode_legacy(bytes)?),
            UdtKind::Email => Self::Email(EmailValue::decode(bytes)?),
            UdtKind::ColorRgb => Self::ColorRgb(ColorValue::decode(bytes)?),
            UdtKind::MoneyType => Self::MoneyType(MoneyValue::decode(bytes)?),
        })
    }

    /// Null cell of the given kind.
    pub fn null(kind: UdtKind) -> Self {
        match kind {
            UdtKind::GeoLocation => Self::GeoLocation(GeoCoordinate::null()),
            UdtKind::UnitSi => Self::UnitSi(PhysicalQuantity::null()),
            UdtKind::Vector3D => Self::Vector3D(Vector3::null()),
            UdtKind::Email => Self::Email(EmailValue::null()),
            UdtKind::ColorRgb => Self::ColorRgb(ColorValue::null()),
            UdtKind::MoneyType => Self::MoneyType(MoneyValue::null()),
        }
    }

    pub fn kind(&self) -> UdtKind {
        match self {
            Self::GeoLocation(_) => UdtKind::GeoLocation,
            Self::UnitSi(_) => UdtKind::UnitSi,
            Self::Vector3D(_) => UdtKind::Vector3D,
            Self::Email(_) => UdtKind::Email,
            Self::ColorRgb(_) => UdtKind::ColorRgb,
            Self::MoneyType(_) => UdtKind::MoneyType,
        }
    }

    pub fn is_null(&self) -> bool {
        each_variant!(self, cell => cell.is_null())
    }

    pub fn render(&self) -> String {
        each_variant!(self, cell => cell.render())
    }

    pub fn encode(&self) -> Vec<u8> {
        each_variant!(self, cell => cell.encode())
    }
}

impl Display for AnyValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
