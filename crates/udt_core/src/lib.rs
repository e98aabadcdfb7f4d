//! Domain value types for user-defined database columns.
//! This crate is the single source of truth for value invariants.

pub mod codec;
pub mod db;
pub mod error;
pub mod import;
pub mod logging;
pub mod model;

pub use error::{DecodeError, DomainError, ParseError};
pub use import::{
    import_csv, import_csv_file, CsvImportOptions, FieldValue, ImportError, ImportReport,
    ImportedRow, RowError,
};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::cell::{Cell, UdtPayload, NULL_TEXT};
pub use model::color::{ColorValue, Rgba};
pub use model::email::{EmailAddress, EmailValue};
pub use model::geo::{GeoCoordinate, LatLon};
pub use model::kind::{AnyValue, UdtKind, UnknownKind};
pub use model::money::{rate_to_pln, supported_currencies, Money, MoneyValue};
pub use model::quantity::{si_base_units, si_prefixes, PhysicalQuantity, Quantity, DIMENSIONLESS};
pub use model::vector::{Vec3, Vector3};
pub use rust_decimal::Decimal;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
