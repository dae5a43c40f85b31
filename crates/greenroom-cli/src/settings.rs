//! Layered configuration: defaults, an optional TOML file, then
//! `GREENROOM_*` environment variables.
//!
//! ```toml
//! week_start = "mon"
//! seed       = true
//! export_dir = "exports"
//!
//! [user]
//! email = "chef@radio.fr"
//! name  = "Editor"
//! role  = "editor-in-chief"
//! ```
//!
//! Nested keys use `__` in the environment, e.g. `GREENROOM_USER__EMAIL`.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::Weekday;
use config::{
  Config, ConfigBuilder, Environment, File, FileFormat, Map, builder::DefaultState,
};
use greenroom_core::session::ActingUser;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// The fixed identity recorded on every mutation.
  pub user:       ActingUser,
  /// First day of the week for weekly statistics.
  pub week_start: Weekday,
  /// Start the session from the built-in guest list.
  pub seed:       bool,
  /// Default directory for export files.
  pub export_dir: PathBuf,
}

impl Settings {
  /// Load settings from `path` (if it exists) and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> { Self::layered(path, None) }

  /// Like [`load`](Self::load), reading variables from `env` instead of the
  /// process environment when given.
  fn layered(path: &Path, env: Option<Map<String, String>>) -> anyhow::Result<Self> {
    let builder = defaults()?
      .add_source(File::from(path).required(false))
      .add_source(
        Environment::with_prefix("GREENROOM")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true)
          .source(env),
      );
    finish(builder).with_context(|| format!("loading settings from {}", path.display()))
  }

  /// Settings from an in-memory TOML document layered over the defaults.
  pub fn from_toml(toml: &str) -> anyhow::Result<Self> {
    finish(defaults()?.add_source(File::from_str(toml, FileFormat::Toml)))
  }
}

fn defaults() -> anyhow::Result<ConfigBuilder<DefaultState>> {
  let user = ActingUser::default();
  Ok(
    Config::builder()
      .set_default("week_start", "mon")?
      .set_default("seed", true)?
      .set_default("export_dir", ".")?
      .set_default("user.email", user.email)?
      .set_default("user.name", user.name)?
      .set_default("user.role", user.role.to_string())?,
  )
}

fn finish(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<Settings> {
  let settings = builder
    .build()
    .context("reading configuration")?
    .try_deserialize()
    .context("invalid configuration")?;
  Ok(settings)
}
