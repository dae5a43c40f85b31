//! Guest records, the basic unit of the Greenroom tracker.
//!
//! A guest is a person the newsroom may invite on air. Appearances are kept
//! inline as [`Passage`] records; they have no lifecycle of their own.

use std::{collections::BTreeSet, fmt};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{Error, Result};

// ─── Identity ────────────────────────────────────────────────────────────────

/// Opaque guest identifier. Fresh ids are UUID-v4 strings; seed guests keep
/// their short historical ids.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GuestId(String);

impl GuestId {
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  /// Generate a fresh, process-unique id.
  pub fn generate() -> Self { Self(uuid::Uuid::new_v4().to_string()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for GuestId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.pad(&self.0)
  }
}

impl From<&str> for GuestId {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

// ─── Classification ──────────────────────────────────────────────────────────

/// Availability of a guest for bookings.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Status {
  #[default]
  Active,
  Inactive,
  ToContact,
  Blacklisted,
}

impl Status {
  /// Parse a kebab-case status name (`to-contact`), ignoring ASCII case.
  pub fn from_name(name: &str) -> Result<Self> {
    name
      .trim()
      .parse()
      .map_err(|_| Error::UnknownStatus(name.to_owned()))
  }
}

/// Topical expertise category. Declaration order is the display order.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Sector {
  Politics,
  Geopolitics,
  Economy,
  Society,
  Culture,
  Sport,
  Science,
  Environment,
  Tech,
  Other,
}

impl Sector {
  /// Parse a sector name (`economy`), ignoring ASCII case.
  pub fn from_name(name: &str) -> Result<Self> {
    name
      .trim()
      .parse()
      .map_err(|_| Error::UnknownSector(name.to_owned()))
  }

  /// Human-readable label used in exports and charts.
  pub fn label(self) -> &'static str {
    match self {
      Self::Politics => "Politics",
      Self::Geopolitics => "Geopolitics",
      Self::Economy => "Economy",
      Self::Society => "Society",
      Self::Culture => "Culture",
      Self::Sport => "Sport",
      Self::Science => "Science",
      Self::Environment => "Environment",
      Self::Tech => "Technology",
      Self::Other => "Other",
    }
  }

  /// Fixed chart colour as a CSS hex string.
  pub fn color(self) -> &'static str {
    match self {
      Self::Politics => "#ef4444",
      Self::Geopolitics => "#f59e0b",
      Self::Economy => "#10b981",
      Self::Society => "#3b82f6",
      Self::Culture => "#8b5cf6",
      Self::Sport => "#ec4899",
      Self::Science => "#06b6d4",
      Self::Environment => "#84cc16",
      Self::Tech => "#6366f1",
      Self::Other => "#6b7280",
    }
  }
}

// ─── Contact channels ────────────────────────────────────────────────────────

/// Optional ways to reach a guest; each is present or absent independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactChannels {
  /// Professional network profile URL.
  pub linkedin: Option<String>,
  /// Social media handle, e.g. `@mariedupont`.
  pub social:   Option<String>,
  pub website:  Option<String>,
  pub email:    Option<String>,
  pub phone:    Option<String>,
}

impl ContactChannels {
  /// Drop blank values so that an empty form field means "absent".
  pub(crate) fn normalized(self) -> Self {
    Self {
      linkedin: non_blank(self.linkedin),
      social:   non_blank(self.social),
      website:  non_blank(self.website),
      email:    non_blank(self.email),
      phone:    non_blank(self.phone),
    }
  }
}

fn non_blank(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

// ─── Passage ─────────────────────────────────────────────────────────────────

/// One on-air appearance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
  /// Unique within the owning guest.
  pub id:               String,
  pub date:             NaiveDate,
  pub program:          String,
  pub topic:            String,
  pub duration_minutes: u32,
  pub note:             Option<String>,
}

// ─── Guest ───────────────────────────────────────────────────────────────────

/// A stored guest. Surname and given name are never blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
  pub id:               GuestId,
  pub surname:          String,
  pub given_name:       String,
  pub status:           Status,
  pub sectors:          BTreeSet<Sector>,
  pub organization:     String,
  pub role:             String,
  pub bio:              String,
  /// Internal notes, never exported.
  pub notes:            String,
  pub contact:          ContactChannels,
  pub passages:         Vec<Passage>,
  pub created_at:       DateTime<Utc>,
  pub updated_at:       DateTime<Utc>,
  pub created_by:       String,
  pub last_modified_by: String,
}

impl Guest {
  /// `"<given name> <surname>"`.
  pub fn full_name(&self) -> String {
    format!("{} {}", self.given_name, self.surname)
  }

  /// Passages sorted by date, most recent first.
  pub fn passages_by_date(&self) -> Vec<&Passage> {
    let mut passages: Vec<&Passage> = self.passages.iter().collect();
    passages.sort_by(|a, b| b.date.cmp(&a.date));
    passages
  }

  pub fn last_passage_date(&self) -> Option<NaiveDate> {
    self.passages.iter().map(|p| p.date).max()
  }

  /// Case-insensitive comparison on (surname, given name).
  pub fn has_name(&self, surname: &str, given_name: &str) -> bool {
    self.surname.to_lowercase() == surname.to_lowercase()
      && self.given_name.to_lowercase() == given_name.to_lowercase()
  }
}

// ─── Input types ─────────────────────────────────────────────────────────────

/// Input to [`crate::GuestRepository::create`] and
/// [`crate::GuestRepository::import_batch`].
///
/// Ids, timestamps and provenance are always set by the repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestForm {
  pub surname:      String,
  pub given_name:   String,
  /// `None` lets the repository pick its default for the operation.
  pub status:       Option<Status>,
  pub sectors:      BTreeSet<Sector>,
  pub organization: String,
  pub role:         String,
  pub bio:          String,
  pub notes:        String,
  pub contact:      ContactChannels,
}

impl GuestForm {
  /// Convenience constructor with every optional field left at its default.
  pub fn new(surname: impl Into<String>, given_name: impl Into<String>) -> Self {
    Self {
      surname: surname.into(),
      given_name: given_name.into(),
      ..Self::default()
    }
  }

  pub fn validate(&self) -> Result<()> {
    require("surname", &self.surname)?;
    require("given_name", &self.given_name)
  }
}

/// A shallow update: every `Some` field replaces the stored value.
///
/// Contact channels are doubly optional so a patch can clear one
/// (`Some(None)`) as well as set it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestPatch {
  pub surname:      Option<String>,
  pub given_name:   Option<String>,
  pub status:       Option<Status>,
  pub sectors:      Option<BTreeSet<Sector>>,
  pub organization: Option<String>,
  pub role:         Option<String>,
  pub bio:          Option<String>,
  pub notes:        Option<String>,
  pub linkedin:     Option<Option<String>>,
  pub social:       Option<Option<String>>,
  pub website:      Option<Option<String>>,
  pub email:        Option<Option<String>>,
  pub phone:        Option<Option<String>>,
}

impl GuestPatch {
  pub fn validate(&self) -> Result<()> {
    if let Some(surname) = &self.surname {
      require("surname", surname)?;
    }
    if let Some(given_name) = &self.given_name {
      require("given_name", given_name)?;
    }
    Ok(())
  }

  /// Merge onto `guest`. Identity, creation provenance and passages are
  /// never touched here.
  pub(crate) fn apply(self, guest: &mut Guest) {
    fn set<T>(slot: &mut T, value: Option<T>) {
      if let Some(v) = value {
        *slot = v;
      }
    }

    set(&mut guest.surname, self.surname);
    set(&mut guest.given_name, self.given_name);
    set(&mut guest.status, self.status);
    set(&mut guest.sectors, self.sectors);
    set(&mut guest.organization, self.organization);
    set(&mut guest.role, self.role);
    set(&mut guest.bio, self.bio);
    set(&mut guest.notes, self.notes);
    set(&mut guest.contact.linkedin, self.linkedin.map(non_blank));
    set(&mut guest.contact.social, self.social.map(non_blank));
    set(&mut guest.contact.website, self.website.map(non_blank));
    set(&mut guest.contact.email, self.email.map(non_blank));
    set(&mut guest.contact.phone, self.phone.map(non_blank));
  }
}

fn require(field: &'static str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::Validation { field });
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_parses_kebab_case_ignoring_case() {
    assert_eq!(Status::from_name("to-contact").unwrap(), Status::ToContact);
    assert_eq!(Status::from_name("Blacklisted").unwrap(), Status::Blacklisted);
    assert_eq!(Status::ToContact.to_string(), "to-contact");
    assert!(matches!(
      Status::from_name("retired"),
      Err(Error::UnknownStatus(_))
    ));
  }

  #[test]
  fn sector_parse_label_and_color() {
    let tech = Sector::from_name(" TECH ").unwrap();
    assert_eq!(tech, Sector::Tech);
    assert_eq!(tech.label(), "Technology");
    assert_eq!(tech.color(), "#6366f1");
    assert!(matches!(
      Sector::from_name("cooking"),
      Err(Error::UnknownSector(_))
    ));
  }

  #[test]
  fn form_validation_rejects_blank_names() {
    assert!(GuestForm::new("Dupont", "Marie").validate().is_ok());
    assert!(matches!(
      GuestForm::new("  ", "Marie").validate(),
      Err(Error::Validation { field: "surname" })
    ));
    assert!(matches!(
      GuestForm::new("Dupont", "").validate(),
      Err(Error::Validation { field: "given_name" })
    ));
  }

  #[test]
  fn patch_with_blank_name_is_invalid() {
    let patch = GuestPatch {
      given_name: Some(String::new()),
      ..GuestPatch::default()
    };
    assert!(patch.validate().is_err());
    assert!(GuestPatch::default().validate().is_ok());
  }

  #[test]
  fn blank_channels_normalize_to_absent() {
    let channels = ContactChannels {
      email: Some("  ".into()),
      phone: Some("01 23 45 67 89".into()),
      ..ContactChannels::default()
    }
    .normalized();
    assert_eq!(channels.email, None);
    assert_eq!(channels.phone.as_deref(), Some("01 23 45 67 89"));
  }
}
