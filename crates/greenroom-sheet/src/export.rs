//! Projecting guests into export rows and writing them out.

use std::io::Write;

use chrono::NaiveDate;
use greenroom_core::guest::Guest;
use rust_xlsxwriter::{Format, Workbook};
use serde::Serialize;

use crate::Result;

/// Output formats for [`write`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
  #[default]
  Csv,
  /// Tab-separated, for pasting straight into a spreadsheet.
  Tsv,
  /// A single-sheet Excel workbook.
  Xlsx,
}

impl ExportFormat {
  pub fn extension(self) -> &'static str {
    match self {
      Self::Csv => "csv",
      Self::Tsv => "tsv",
      Self::Xlsx => "xlsx",
    }
  }
}

/// Header names, in column order.
pub const COLUMNS: [&str; 11] = [
  "Surname",
  "Given name",
  "Status",
  "Sectors",
  "Organization",
  "Role",
  "Email",
  "Phone",
  "LinkedIn",
  "Passages",
  "Last passage",
];

/// One exported line. Field order is column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
  #[serde(rename = "Surname")]
  pub surname:      String,
  #[serde(rename = "Given name")]
  pub given_name:   String,
  #[serde(rename = "Status")]
  pub status:       String,
  #[serde(rename = "Sectors")]
  pub sectors:      String,
  #[serde(rename = "Organization")]
  pub organization: String,
  #[serde(rename = "Role")]
  pub role:         String,
  #[serde(rename = "Email")]
  pub email:        String,
  #[serde(rename = "Phone")]
  pub phone:        String,
  #[serde(rename = "LinkedIn")]
  pub linkedin:     String,
  #[serde(rename = "Passages")]
  pub passages:     usize,
  /// ISO date of the most recent passage; empty when there is none.
  #[serde(rename = "Last passage")]
  pub last_passage: String,
}

impl From<&Guest> for ExportRow {
  fn from(g: &Guest) -> Self {
    Self {
      surname:      g.surname.clone(),
      given_name:   g.given_name.clone(),
      status:       g.status.to_string(),
      sectors:      g
        .sectors
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(", "),
      organization: g.organization.clone(),
      role:         g.role.clone(),
      email:        g.contact.email.clone().unwrap_or_default(),
      phone:        g.contact.phone.clone().unwrap_or_default(),
      linkedin:     g.contact.linkedin.clone().unwrap_or_default(),
      passages:     g.passages.len(),
      last_passage: g
        .last_passage_date()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default(),
    }
  }
}

impl ExportRow {
  /// Text columns paired with their [`COLUMNS`] index. `Passages` is left
  /// out so the workbook can store it as a number.
  fn text_cells(&self) -> [(u16, &str); 10] {
    [
      (0, self.surname.as_str()),
      (1, self.given_name.as_str()),
      (2, self.status.as_str()),
      (3, self.sectors.as_str()),
      (4, self.organization.as_str()),
      (5, self.role.as_str()),
      (6, self.email.as_str()),
      (7, self.phone.as_str()),
      (8, self.linkedin.as_str()),
      (10, self.last_passage.as_str()),
    ]
  }
}

/// One row per guest, in the given (usually filtered) order.
pub fn project<'a>(guests: impl IntoIterator<Item = &'a Guest>) -> Vec<ExportRow> {
  guests.into_iter().map(ExportRow::from).collect()
}

/// Write `rows` with a header record.
pub fn write<W: Write>(rows: &[ExportRow], format: ExportFormat, writer: W) -> Result<()> {
  match format {
    ExportFormat::Csv => write_delimited(rows, b',', writer)?,
    ExportFormat::Tsv => write_delimited(rows, b'\t', writer)?,
    ExportFormat::Xlsx => write_xlsx(rows, writer)?,
  }
  tracing::debug!(?format, rows = rows.len(), "export written");
  Ok(())
}

fn write_delimited<W: Write>(rows: &[ExportRow], delimiter: u8, writer: W) -> Result<()> {
  let mut out = csv::WriterBuilder::new()
    .delimiter(delimiter)
    .has_headers(false)
    .from_writer(writer);
  out.write_record(COLUMNS)?;
  for row in rows {
    out.serialize(row)?;
  }
  out.flush()?;
  Ok(())
}

fn write_xlsx<W: Write>(rows: &[ExportRow], mut writer: W) -> Result<()> {
  let mut workbook = Workbook::new();
  let sheet = workbook.add_worksheet();
  sheet.set_name("Guests")?;

  let bold = Format::new().set_bold();
  for (col, name) in (0u16..).zip(COLUMNS) {
    sheet.write_string_with_format(0, col, name, &bold)?;
  }
  for (line, row) in (1u32..).zip(rows) {
    // Blank values stay empty cells so they read back as absent.
    for (col, value) in row.text_cells() {
      if !value.is_empty() {
        sheet.write_string(line, col, value)?;
      }
    }
    sheet.write_number(line, 9, row.passages as f64)?;
  }

  writer.write_all(&workbook.save_to_buffer()?)?;
  Ok(())
}

/// `guests_<date>.<ext>`.
pub fn file_name(format: ExportFormat, date: NaiveDate) -> String {
  format!("guests_{}.{}", date.format("%Y-%m-%d"), format.extension())
}
