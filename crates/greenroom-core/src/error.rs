//! Error types for `greenroom-core`.

use thiserror::Error;

use crate::guest::GuestId;

#[derive(Debug, Error)]
pub enum Error {
  /// A mandatory guest field was missing or blank.
  #[error("validation error: {field} is required")]
  Validation { field: &'static str },

  #[error("guest not found: {0}")]
  GuestNotFound(GuestId),

  #[error("unknown sector: {0:?}")]
  UnknownSector(String),

  #[error("unknown status: {0:?}")]
  UnknownStatus(String),

  #[error("unknown role: {0:?}")]
  UnknownRole(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
