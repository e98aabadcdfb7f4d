//! Nullable value cell shared by every value type.
//!
//! # Responsibility
//! - Route `parse`/`render`/`encode`/`decode` through one null-first path.
//! - Provide null-propagating combinators for type-specific operations.
//!
//! # Invariants
//! - A non-null cell always holds a payload that passed validation.
//! - Null equals null, null never equals a value.
//! - Encoding writes the null flag first and payload fields only when set.

use crate::codec::{ByteReader, ByteWriter};
use crate::error::{DecodeError, ParseError};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};

/// Text rendered for (and accepted as) a null cell.
pub const NULL_TEXT: &str = "NULL";

/// Per-type hooks plugged into [`Cell`].
pub trait UdtPayload: Sized + Clone + Debug {
    /// Storage type name of the user-defined type.
    const TYPE_NAME: &'static str;

    /// Parses the canonical text form. Input is already trimmed.
    fn parse_payload(text: &str) -> Result<Self, ParseError>;

    fn render_payload(&self) -> String;

    /// Writes payload fields in fixed order, without the null flag.
    fn write_payload(&self, writer: &mut ByteWriter);

    /// Reads payload fields and re-validates the type invariant.
    fn read_payload(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError>;

    fn payload_eq(&self, other: &Self) -> bool;

    fn hash_payload<H: Hasher>(&self, state: &mut H);
}

/// Null-or-payload wrapper around an immutable value.
#[derive(Debug, Clone)]
pub struct Cell<T>(Option<T>);

impl<T> Cell<T> {
    pub const fn null() -> Self {
        Self(None)
    }

    pub const fn new(payload: T) -> Self {
        Self(Some(payload))
    }

    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    pub fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }

    pub fn into_inner(self) -> Option<T> {
        self.0
    }

    /// Applies `op` to the payload; a null cell short-circuits to null.
    pub(crate) fn try_map<U, E>(&self, op: impl FnOnce(&T) -> Result<U, E>) -> Result<Cell<U>, E> {
        match &self.0 {
            Some(payload) => op(payload).map(Cell::new),
            None => Ok(Cell::null()),
        }
    }

    /// Applies `op` to both payloads; either side null yields null.
    pub(crate) fn try_zip<U, E>(
        &self,
        other: &Self,
        op: impl FnOnce(&T, &T) -> Result<U, E>,
    ) -> Result<Cell<U>, E> {
        match (&self.0, &other.0) {
            (Some(left), Some(right)) => op(left, right).map(Cell::new),
            _ => Ok(Cell::null()),
        }
    }
}

impl<T: UdtPayload> Cell<T> {
    /// Parses user or CSV text. The literal `NULL` yields a null cell.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case(NULL_TEXT) {
            return Ok(Self::null());
        }
        T::parse_payload(trimmed).map(Self::new)
    }

    /// Canonical text form, or `NULL`.
    pub fn render(&self) -> String {
        match &self.0 {
            Some(payload) => payload.render_payload(),
            None => NULL_TEXT.to_string(),
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        writer.write_bool(self.is_null());
        if let Some(payload) = &self.0 {
            payload.write_payload(&mut writer);
        }
        writer.into_bytes()
    }

    /// Exact inverse of [`Cell::encode`]; rejects trailing bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = ByteReader::new(bytes);
        let cell = if reader.read_null_flag()? {
            Self::null()
        } else {
            Self::new(T::read_payload(&mut reader)?)
        };
        reader.finish()?;
        Ok(cell)
    }

    pub fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }
}

impl<T> Default for Cell<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> From<T> for Cell<T> {
    fn from(payload: T) -> Self {
        Self::new(payload)
    }
}

impl<T> From<Option<T>> for Cell<T> {
    fn from(value: Option<T>) -> Self {
        Self(value)
    }
}

impl<T: UdtPayload> PartialEq for Cell<T> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (None, None) => true,
            (Some(left), Some(right)) => left.payload_eq(right),
            _ => false,
        }
    }
}

impl<T: UdtPayload> Hash for Cell<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.0 {
            None => state.write_u8(0),
            Some(payload) => {
                state.write_u8(1);
                payload.hash_payload(state);
            }
        }
    }
}

impl<T: UdtPayload> Display for Cell<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

impl<T: UdtPayload> Serialize for Cell<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(payload) => serializer.serialize_some(&payload.render_payload()),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de, T: UdtPayload> Deserialize<'de> for Cell<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => Self::parse(&text).map_err(D::Error::custom),
            None => Ok(Self::null()),
        }
    }
}
