//! Reading tabular files into [`Row`]s.

use std::{io::Cursor, path::Path};

use calamine::{Data, DataType, Reader, Xlsx};
use serde_json::Value;

use crate::{
  Error, Result,
  row::{Cell, Row},
};

/// Input formats understood by [`parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
  /// Comma-separated values with a header record.
  Csv,
  /// Tab-separated values with a header record, as pasted from a spreadsheet.
  Tsv,
  /// A JSON array of flat objects.
  Json,
  /// An Excel workbook. Only the first worksheet is read.
  Xlsx,
}

impl SheetFormat {
  /// Pick a format from the file extension.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let ext = path
      .extension()
      .and_then(|e| e.to_str())
      .map(str::to_ascii_lowercase)
      .unwrap_or_default();
    match ext.as_str() {
      "csv" => Ok(Self::Csv),
      "tsv" | "tab" => Ok(Self::Tsv),
      "json" => Ok(Self::Json),
      "xlsx" => Ok(Self::Xlsx),
      _ => Err(Error::UnsupportedFormat(path.display().to_string())),
    }
  }
}

/// Parse `input` into rows. The whole file is read or an error is returned.
pub fn parse(input: &[u8], format: SheetFormat) -> Result<Vec<Row>> {
  let rows = match format {
    SheetFormat::Csv => parse_delimited(input, b',')?,
    SheetFormat::Tsv => parse_delimited(input, b'\t')?,
    SheetFormat::Json => parse_json(input)?,
    SheetFormat::Xlsx => parse_xlsx(input)?,
  };
  tracing::debug!(?format, rows = rows.len(), "parsed sheet");
  Ok(rows)
}

fn parse_delimited(input: &[u8], delimiter: u8) -> Result<Vec<Row>> {
  let input = input.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(input);
  let mut reader = csv::ReaderBuilder::new()
    .delimiter(delimiter)
    .flexible(true)
    .from_reader(input);

  let headers: Vec<String> = reader
    .headers()?
    .iter()
    .map(|h| h.trim().to_owned())
    .collect();

  let mut rows = Vec::new();
  for record in reader.records() {
    let record = record?;
    if record.iter().all(|field| field.trim().is_empty()) {
      continue;
    }
    // Cell values are kept verbatim; only header names are trimmed.
    let cells = (0..headers.len()).map(|i| Cell::from(record.get(i).unwrap_or_default()));
    rows.push(header_row(&headers, cells));
  }
  Ok(rows)
}

/// Zip header names with cells. Unnamed columns are dropped, and when a name
/// repeats the first column keeps it.
fn header_row(headers: &[String], cells: impl IntoIterator<Item = Cell>) -> Row {
  let mut row = Row::new();
  for (column, cell) in headers.iter().zip(cells) {
    if column.is_empty() || row.get(column).is_some() {
      continue;
    }
    row.insert(column.clone(), cell);
  }
  row
}

fn parse_xlsx(input: &[u8]) -> Result<Vec<Row>> {
  let mut workbook = Xlsx::new(Cursor::new(input))?;
  let range = workbook.worksheet_range_at(0).ok_or(Error::NotATable)??;

  let mut records = range.rows();
  let Some(header) = records.next() else {
    return Ok(Vec::new());
  };
  let headers: Vec<String> = header
    .iter()
    .map(|cell| xlsx_cell(cell).to_string().trim().to_owned())
    .collect();

  let rows = records
    .map(|record| record.iter().map(xlsx_cell).collect::<Vec<_>>())
    .filter(|cells| !cells.iter().all(Cell::is_blank))
    .map(|cells| header_row(&headers, cells))
    .collect();
  Ok(rows)
}

fn xlsx_cell(cell: &Data) -> Cell {
  match cell {
    Data::Empty | Data::Error(_) => Cell::Empty,
    Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::from(s.as_str()),
    Data::Int(i) => Cell::Number(*i as f64),
    Data::Float(f) => Cell::Number(*f),
    Data::Bool(b) => Cell::Text(b.to_string()),
    Data::DateTime(_) => match cell.as_date() {
      Some(date) => Cell::Text(date.format("%Y-%m-%d").to_string()),
      None => Cell::Text(cell.to_string()),
    },
  }
}

fn parse_json(input: &[u8]) -> Result<Vec<Row>> {
  let Value::Array(items) = serde_json::from_slice::<Value>(input)? else {
    return Err(Error::NotATable);
  };

  items
    .into_iter()
    .enumerate()
    .map(|(index, item)| {
      let Value::Object(object) = item else {
        return Err(Error::NotATable);
      };
      let mut row = Row::new();
      for (column, value) in object {
        let cell = match value {
          Value::Null => Cell::Empty,
          Value::String(s) => Cell::from(s.as_str()),
          Value::Number(n) => n.as_f64().map_or(Cell::Empty, Cell::Number),
          Value::Bool(b) => Cell::Text(b.to_string()),
          Value::Array(_) | Value::Object(_) => {
            return Err(Error::NestedValue {
              row: index + 1,
              column,
            });
          }
        };
        row.insert(column, cell);
      }
      Ok(row)
    })
    .collect()
}
