//! Column mapping: which source column feeds which guest field.

use std::collections::{BTreeMap, BTreeSet};

use strum::{Display, EnumIter, EnumString};

use crate::{Error, Result, row::Row};

/// A logical guest field an imported column can feed.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Display,
  EnumString,
  EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Field {
  Surname,
  GivenName,
  Email,
  Phone,
  Organization,
  Role,
  Bio,
  Linkedin,
  Social,
  Website,
}

/// Fields in the order they claim columns. Given name goes before surname
/// so that `Prénom` is not taken for `nom`.
const RESOLUTION_ORDER: [Field; 10] = [
  Field::GivenName,
  Field::Surname,
  Field::Email,
  Field::Linkedin,
  Field::Social,
  Field::Website,
  Field::Phone,
  Field::Organization,
  Field::Role,
  Field::Bio,
];

impl Field {
  pub fn from_name(name: &str) -> Result<Self> {
    name
      .trim()
      .parse()
      .map_err(|_| Error::UnknownField(name.to_owned()))
  }

  /// Lower-case substrings that suggest a header holds this field.
  fn hints(self) -> &'static [&'static str] {
    match self {
      Self::Surname => &["surname", "last name", "lastname", "last_name", "family name", "nom"],
      Self::GivenName => &["prénom", "prenom", "given", "first name", "firstname", "first_name"],
      Self::Email => &["email", "e-mail", "mail", "courriel"],
      Self::Phone => &["phone", "téléphone", "telephone", "tel", "mobile"],
      Self::Organization => &["organisation", "organization", "company", "entreprise", "employer"],
      Self::Role => &["fonction", "role", "rôle", "title", "position", "poste"],
      Self::Bio => &["bio"],
      Self::Linkedin => &["linkedin"],
      Self::Social => &["twitter", "social", "handle"],
      Self::Website => &["website", "site", "homepage"],
    }
  }

  fn matches(self, column: &str) -> bool {
    let column = column.to_lowercase();
    self.hints().iter().any(|hint| column.contains(hint))
  }
}

/// Which source column feeds each field. Unmapped fields are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
  columns: BTreeMap<Field, String>,
}

impl ColumnMapping {
  pub fn new() -> Self { Self::default() }

  pub fn get(&self, field: Field) -> Option<&str> {
    self.columns.get(&field).map(String::as_str)
  }

  pub fn set(&mut self, field: Field, column: impl Into<String>) {
    self.columns.insert(field, column.into());
  }

  pub fn clear(&mut self, field: Field) { self.columns.remove(&field); }

  pub fn is_mapped(&self, field: Field) -> bool {
    self.columns.contains_key(&field)
  }

  /// The column for `field`, or [`Error::UnmappedField`].
  pub fn require(&self, field: Field) -> Result<&str> {
    self.get(field).ok_or(Error::UnmappedField(field))
  }

  /// Apply a `field=column` override; `field=` unmaps the field.
  pub fn apply_override(&mut self, spec: &str) -> Result<()> {
    let (field, column) = spec
      .split_once('=')
      .ok_or_else(|| Error::InvalidOverride(spec.to_owned()))?;
    let field = Field::from_name(field)?;
    let column = column.trim();
    if column.is_empty() {
      self.clear(field);
    } else {
      self.set(field, column);
    }
    Ok(())
  }

  /// Mapped fields in [`Field`] order.
  pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
    self.columns.iter().map(|(f, c)| (*f, c.as_str()))
  }
}

/// Guess a mapping from the column names of `first_row`.
///
/// For each field, in resolution order, the first unclaimed column whose
/// lower-cased name contains one of the field's hints wins.
pub fn infer_mapping(first_row: &Row) -> ColumnMapping {
  let columns: Vec<&str> = first_row.columns().collect();
  let mut claimed: BTreeSet<&str> = BTreeSet::new();
  let mut mapping = ColumnMapping::new();

  for field in RESOLUTION_ORDER {
    let found = columns
      .iter()
      .copied()
      .find(|column| !claimed.contains(column) && field.matches(column));
    if let Some(column) = found {
      claimed.insert(column);
      mapping.set(field, column);
    }
  }

  tracing::debug!(?mapping, "inferred column mapping");
  mapping
}
