//! Append-only audit trail of mutating operations.
//!
//! Entries are immutable once written. The log is read most-recent-first.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

/// What kind of mutation an entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AuditAction {
  Creation,
  Modification,
  Deletion,
  Import,
}

/// What the affected entity id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EntityType {
  /// A single guest; the entity id is a guest id.
  Guest,
  /// A batch of guests; the entity id is `bulk`.
  Guests,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
  pub id:          Uuid,
  pub timestamp:   DateTime<Utc>,
  /// Email of the acting user.
  pub user:        String,
  pub action:      AuditAction,
  pub entity_type: EntityType,
  pub entity_id:   String,
  pub detail:      String,
}

#[derive(Debug, Clone, Default)]
pub struct AuditLog {
  entries: VecDeque<AuditLogEntry>,
}

impl AuditLog {
  pub fn new() -> Self { Self::default() }

  /// Prepend a new entry and return it.
  pub(crate) fn record(
    &mut self,
    user: &str,
    action: AuditAction,
    entity_type: EntityType,
    entity_id: impl Into<String>,
    detail: impl Into<String>,
  ) -> &AuditLogEntry {
    let entry = AuditLogEntry {
      id: Uuid::new_v4(),
      timestamp: Utc::now(),
      user: user.to_owned(),
      action,
      entity_type,
      entity_id: entity_id.into(),
      detail: detail.into(),
    };
    tracing::debug!(
      action = %entry.action,
      entity = %entry.entity_id,
      "{}",
      entry.detail
    );
    self.entries.push_front(entry);
    &self.entries[0]
  }

  /// Entries, most recent first.
  pub fn entries(&self) -> impl Iterator<Item = &AuditLogEntry> {
    self.entries.iter()
  }

  pub fn latest(&self) -> Option<&AuditLogEntry> { self.entries.front() }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn entries_are_most_recent_first() {
    let mut log = AuditLog::new();
    log.record("a@radio.fr", AuditAction::Creation, EntityType::Guest, "1", "first");
    log.record("a@radio.fr", AuditAction::Deletion, EntityType::Guest, "1", "second");

    let details: Vec<&str> = log.entries().map(|e| e.detail.as_str()).collect();
    assert_eq!(details, ["second", "first"]);
    assert_eq!(log.latest().unwrap().action, AuditAction::Deletion);
    assert_eq!(log.len(), 2);
  }

  #[test]
  fn action_labels() {
    assert_eq!(AuditAction::Modification.to_string(), "modification");
    assert_eq!(EntityType::Guests.to_string(), "guests");
  }
}
