//! Turning mapped rows into guest forms.
//!
//! Rows are checked independently: a bad row is reported and skipped, never
//! fatal. Appending the accepted forms (and auditing them) is the job of
//! [`greenroom_core::GuestRepository::import_batch`].

use greenroom_core::guest::{ContactChannels, Guest, GuestForm, Status};
use thiserror::Error;

use crate::{
  Result,
  mapping::{ColumnMapping, Field},
  row::Row,
};

/// Why a single row was skipped. Row numbers are 1-based data rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportRowError {
  #[error("row {row}: missing surname or given name")]
  MissingName { row: usize },

  #[error("row {row}: {given_name} {surname} already exists")]
  Duplicate {
    row:        usize,
    surname:    String,
    given_name: String,
  },
}

impl ImportRowError {
  pub fn row(&self) -> usize {
    match self {
      Self::MissingName { row } | Self::Duplicate { row, .. } => *row,
    }
  }
}

/// Outcome of [`import_rows`].
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
  /// Forms ready for `import_batch`, in row order.
  pub accepted: Vec<GuestForm>,
  pub errors:   Vec<ImportRowError>,
}

/// Validate and convert `rows` using `mapping`.
///
/// Fails up front with [`crate::Error::UnmappedField`] unless both surname
/// and given name are mapped. A row whose (surname, given name) matches an
/// existing guest or an earlier accepted row, ignoring case, is rejected as
/// a duplicate.
pub fn import_rows(
  rows: &[Row],
  mapping: &ColumnMapping,
  existing: &[Guest],
) -> Result<ImportReport> {
  mapping.require(Field::Surname)?;
  mapping.require(Field::GivenName)?;

  let mut report = ImportReport::default();

  for (index, row) in rows.iter().enumerate() {
    let line = index + 1;
    let value = |field| {
      mapping
        .get(field)
        .and_then(|column| row.get(column))
        .and_then(|cell| cell.text())
    };

    let (Some(surname), Some(given_name)) = (value(Field::Surname), value(Field::GivenName))
    else {
      tracing::warn!(row = line, "import row skipped: missing name");
      report.errors.push(ImportRowError::MissingName { row: line });
      continue;
    };

    let duplicate = existing.iter().any(|g| g.has_name(&surname, &given_name))
      || report
        .accepted
        .iter()
        .any(|f| same_name(f, &surname, &given_name));
    if duplicate {
      tracing::warn!(row = line, %surname, %given_name, "import row skipped: duplicate");
      report.errors.push(ImportRowError::Duplicate {
        row: line,
        surname,
        given_name,
      });
      continue;
    }

    report.accepted.push(GuestForm {
      status: Some(Status::ToContact),
      organization: value(Field::Organization).unwrap_or_default(),
      role: value(Field::Role).unwrap_or_default(),
      bio: value(Field::Bio).unwrap_or_default(),
      contact: ContactChannels {
        linkedin: value(Field::Linkedin),
        social:   value(Field::Social),
        website:  value(Field::Website),
        email:    value(Field::Email),
        phone:    value(Field::Phone),
      },
      ..GuestForm::new(surname, given_name)
    });
  }

  tracing::info!(
    accepted = report.accepted.len(),
    rejected = report.errors.len(),
    "import rows checked"
  );
  Ok(report)
}

fn same_name(form: &GuestForm, surname: &str, given_name: &str) -> bool {
  form.surname.to_lowercase() == surname.to_lowercase()
    && form.given_name.to_lowercase() == given_name.to_lowercase()
}
