//! Spreadsheet import and export for Greenroom.
//!
//! Converts between tabular files (CSV, TSV, JSON, xlsx) and
//! [`greenroom_core`] guests. Pure synchronous; reading the bytes off disk
//! is the caller's business.
//!
//! # Quick start
//!
//! ```no_run
//! use greenroom_sheet::{SheetFormat, import_rows, infer_mapping, parse};
//!
//! let csv = b"Nom,Prenom,Email\nLeroy,Anna,anna@example.com\n";
//! let rows = parse(csv, SheetFormat::Csv).unwrap();
//! let mapping = infer_mapping(&rows[0]);
//! let report = import_rows(&rows, &mapping, &[]).unwrap();
//! println!("{} accepted, {} rejected", report.accepted.len(), report.errors.len());
//! ```

pub mod error;
mod export;
mod import;
mod mapping;
mod parse;
mod row;

pub use error::{Error, Result};
pub use export::{COLUMNS, ExportFormat, ExportRow, file_name, project, write};
pub use import::{ImportReport, ImportRowError, import_rows};
pub use mapping::{ColumnMapping, Field, infer_mapping};
pub use parse::{SheetFormat, parse};
pub use row::{Cell, Row};
