//! Error type for `greenroom-sheet`.

use thiserror::Error;

use crate::mapping::Field;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] greenroom_core::Error),

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("xlsx read error: {0}")]
  XlsxRead(#[from] calamine::XlsxError),

  #[error("xlsx write error: {0}")]
  XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  /// The file extension or declared format is not one we read.
  #[error("unsupported file format: {0:?}")]
  UnsupportedFormat(String),

  /// A JSON input was not an array of objects, or a workbook had no sheet.
  #[error("expected an array of objects or a worksheet")]
  NotATable,

  /// A JSON cell held an array or object.
  #[error("row {row}: column {column:?} holds a nested value")]
  NestedValue { row: usize, column: String },

  /// Import was attempted before a mandatory field was mapped.
  #[error("required field {0} is not mapped to a column")]
  UnmappedField(Field),

  #[error("unknown field: {0:?}")]
  UnknownField(String),

  /// A mapping override that is not of the form `field=column`.
  #[error("invalid mapping override {0:?}, expected field=column")]
  InvalidOverride(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
