//! The acting user: one fixed identity for the whole session.
//!
//! Nothing here is authenticated. The role is displayed and recorded, never
//! enforced.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{Error, Result};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum UserRole {
  Journalist,
  EditorInChief,
  #[default]
  Admin,
}

impl UserRole {
  pub fn from_name(name: &str) -> Result<Self> {
    name
      .trim()
      .parse()
      .map_err(|_| Error::UnknownRole(name.to_owned()))
  }
}

/// Who is performing mutations. Recorded in provenance fields and the audit
/// log by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActingUser {
  pub email: String,
  pub name:  String,
  #[serde(default)]
  pub role:  UserRole,
}

impl Default for ActingUser {
  fn default() -> Self {
    Self {
      email: "journalist@radio.fr".into(),
      name:  "Admin User".into(),
      role:  UserRole::Admin,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn role_names_are_kebab_case() {
    assert_eq!(UserRole::EditorInChief.to_string(), "editor-in-chief");
    assert_eq!(
      UserRole::from_name("Editor-In-Chief").unwrap(),
      UserRole::EditorInChief
    );
    assert!(matches!(
      UserRole::from_name("intern"),
      Err(Error::UnknownRole(_))
    ));
  }
}
