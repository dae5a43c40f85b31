//! Core types and operations for the Greenroom guest tracker.
//!
//! This crate has no file-format or terminal dependencies.
//! The spreadsheet codec and the binary both depend on it; it keeps all guest
//! state in memory and exposes it only through [`GuestRepository`].

pub mod audit;
pub mod error;
pub mod guest;
pub mod query;
pub mod recommend;
pub mod repository;
pub mod seed;
pub mod session;

pub use error::{Error, Result};
pub use repository::GuestRepository;
