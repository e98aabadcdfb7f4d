//! SQLite hand-off for value cells.
//!
//! # Responsibility
//! - Bind cells as opaque BLOB parameters (`encode()` bytes).
//! - Read BLOB columns back through `decode()`.
//!
//! # Invariants
//! - Cells are always bound as BLOBs, so the null flag survives storage.
//! - A SQL `NULL` column reads back as a null cell.
//! - Undecodable bytes surface as a conversion error, never a silent null.

use crate::error::DecodeError;
use crate::model::cell::{Cell, UdtPayload};
use crate::model::kind::{AnyValue, UdtKind};
use log::warn;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, Value, ValueRef};
use rusqlite::ToSql;

impl<T: UdtPayload> ToSql for Cell<T> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Owned(Value::Blob(self.encode())))
    }
}

impl ToSql for AnyValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Owned(Value::Blob(self.encode())))
    }
}

impl<T: UdtPayload> FromSql for Cell<T> {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Null => Ok(Cell::null()),
            ValueRef::Blob(bytes) => {
                Cell::decode(bytes).map_err(|err| decode_failure(T::TYPE_NAME, err))
            }
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

/// Reads a column whose value type is only known at runtime.
pub fn any_from_sql(kind: UdtKind, value: ValueRef<'_>) -> FromSqlResult<AnyValue> {
    match value {
        ValueRef::Null => Ok(AnyValue::null(kind)),
        ValueRef::Blob(bytes) => {
            AnyValue::decode(kind, bytes).map_err(|err| decode_failure(kind.name(), err))
        }
        _ => Err(FromSqlError::InvalidType),
    }
}

fn decode_failure(type_name: &str, err: DecodeError) -> FromSqlError {
    warn!("event=udt_decode module=db status=error type={type_name} error={err}");
    FromSqlError::Other(Box::new(err))
}
