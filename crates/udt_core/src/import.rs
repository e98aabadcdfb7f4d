//! CSV front door feeding raw text into the value parsers.
//!
//! # Responsibility
//! - Read a header plus data records with the `csv` crate.
//! - Parse columns mapped to a value type; keep other columns as text.
//! - Collect per-row failures without aborting the batch.
//!
//! # Invariants
//! - One rejected row never prevents later rows from importing.
//! - Records shorter than the header are padded with blanks.
//! - Blank text fields become `None`; blank value fields become null cells.

use crate::logging::log_field;
use crate::model::kind::{AnyValue, UdtKind};
use log::{info, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Read;
use std::path::Path;

const MAX_LOGGED_REASON_CHARS: usize = 160;

/// Column-to-type mapping for an import.
#[derive(Debug, Clone, Default)]
pub struct CsvImportOptions {
    pub udt_columns: BTreeMap<String, UdtKind>,
}

impl CsvImportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_udt_column(mut self, column: impl Into<String>, kind: UdtKind) -> Self {
        self.udt_columns.insert(column.into(), kind);
        self
    }
}

/// One imported field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    Text(Option<String>),
    Udt(AnyValue),
}

/// A data record that imported cleanly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportedRow {
    /// 1-based line number in the source.
    pub line: u64,
    /// Ordered like the header.
    pub fields: Vec<FieldValue>,
}

/// A data record that was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    pub line: u64,
    /// Offending column, when the failure is tied to one.
    pub column: Option<String>,
    pub reason: String,
}

impl Display for RowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.column {
            Some(column) => write!(f, "line {} column `{column}`: {}", self.line, self.reason),
            None => write!(f, "line {}: {}", self.line, self.reason),
        }
    }
}

/// Outcome of one import run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    pub columns: Vec<String>,
    pub rows: Vec<ImportedRow>,
    pub rejected: Vec<RowError>,
}

impl ImportReport {
    /// Field of an imported row by column name.
    pub fn field(&self, row: usize, column: &str) -> Option<&FieldValue> {
        let index = self.columns.iter().position(|name| name == column)?;
        self.rows.get(row)?.fields.get(index)
    }
}

#[derive(Debug)]
pub enum ImportError {
    Csv(csv::Error),
    MissingHeader,
    /// A mapped column does not appear in the header.
    UnknownColumn(String),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv(err) => write!(f, "{err}"),
            Self::MissingHeader => write!(f, "csv input has no header line"),
            Self::UnknownColumn(name) => {
                write!(f, "column `{name}` is mapped to a value type but missing from the header")
            }
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Csv(err) => Some(err),
            Self::MissingHeader | Self::UnknownColumn(_) => None,
        }
    }
}

impl From<csv::Error> for ImportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

/// Imports CSV text from any reader.
pub fn import_csv<R: Read>(
    reader: R,
    options: &CsvImportOptions,
) -> Result<ImportReport, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    import_records(&mut csv_reader, options)
}

/// Imports a CSV file from disk.
pub fn import_csv_file(
    path: impl AsRef<Path>,
    options: &CsvImportOptions,
) -> Result<ImportReport, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;
    import_records(&mut csv_reader, options)
}

fn import_records<R: Read>(
    csv_reader: &mut csv::Reader<R>,
    options: &CsvImportOptions,
) -> Result<ImportReport, ImportError> {
    let mut records = csv_reader.records();

    let header = match records.next() {
        Some(record) => record?,
        None => return Err(ImportError::MissingHeader),
    };
    if header.iter().all(str::is_empty) {
        return Err(ImportError::MissingHeader);
    }
    let columns: Vec<String> = header.iter().map(str::to_string).collect();

    if let Some(missing) = options
        .udt_columns
        .keys()
        .find(|name| !columns.contains(*name))
    {
        return Err(ImportError::UnknownColumn(missing.clone()));
    }
    let kinds: Vec<Option<UdtKind>> = columns
        .iter()
        .map(|name| options.udt_columns.get(name).copied())
        .collect();

    info!(
        "event=csv_import module=import status=start columns={} udt_columns={}",
        columns.len(),
        options.udt_columns.len()
    );

    let mut report = ImportReport {
        columns,
        ..ImportReport::default()
    };
    for record in records {
        let record = record?;
        let line = record.position().map_or(0, |pos| pos.line());
        if record.iter().all(str::is_empty) {
            continue;
        }

        match import_row(line, &record, &report.columns, &kinds) {
            Ok(row) => report.rows.push(row),
            Err(row_error) => {
                warn!(
                    "event=csv_row_rejected module=import line={} column={} reason={}",
                    row_error.line,
                    row_error.column.as_deref().unwrap_or("-"),
                    log_field(&row_error.reason, MAX_LOGGED_REASON_CHARS)
                );
                report.rejected.push(row_error);
            }
        }
    }

    info!(
        "event=csv_import module=import status=ok imported={} rejected={}",
        report.rows.len(),
        report.rejected.len()
    );
    Ok(report)
}

fn import_row(
    line: u64,
    record: &csv::StringRecord,
    columns: &[String],
    kinds: &[Option<UdtKind>],
) -> Result<ImportedRow, RowError> {
    if record.len() > columns.len() {
        return Err(RowError {
            line,
            column: None,
            reason: format!(
                "expected {} columns, found {}",
                columns.len(),
                record.len()
            ),
        });
    }

    let mut fields = Vec::with_capacity(columns.len());
    for (index, column) in columns.iter().enumerate() {
        let raw = record.get(index).unwrap_or("");
        let field = match kinds[index] {
            Some(kind) if raw.is_empty() => FieldValue::Udt(AnyValue::null(kind)),
            Some(kind) => AnyValue::parse(kind, raw)
                .map(FieldValue::Udt)
                .map_err(|err| RowError {
                    line,
                    column: Some(column.clone()),
                    reason: err.to_string(),
                })?,
            None if raw.is_empty() => FieldValue::Text(None),
            None => FieldValue::Text(Some(raw.to_string())),
        };
        fields.push(field);
    }
    Ok(ImportedRow { line, fields })
}
