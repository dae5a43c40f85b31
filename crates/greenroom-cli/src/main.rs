//! `greenroom`: command-line front end for the newsroom guest tracker.
//!
//! Every run starts a fresh in-memory session from the seed list; nothing is
//! persisted between runs.
//!
//! # Usage
//!
//! ```text
//! greenroom list --sector economy
//! greenroom stats --today 2024-12-10
//! greenroom import contacts.csv --map given_name=Prénom --dry-run
//! greenroom export --format xlsx --out exports/
//! ```

mod app;
mod settings;
mod ui;

use std::{
  collections::BTreeSet,
  io::{self, Write},
  path::PathBuf,
};

use anyhow::Result;
use app::App;
use chrono::{Local, NaiveDate};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use greenroom_core::{
  guest::{ContactChannels, GuestForm, GuestId, Sector, Status},
  query::GuestFilter,
  recommend::RecommendationRequest,
};
use greenroom_sheet::ExportFormat;
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "greenroom", version, about = "Newsroom guest tracker")]
struct Args {
  /// Path to a TOML config file. Missing files are ignored.
  #[arg(short, long, value_name = "FILE", default_value = "greenroom.toml")]
  config: PathBuf,

  /// Log at debug level.
  #[arg(short, long, global = true, conflicts_with = "quiet")]
  verbose: bool,

  /// Only log warnings and errors.
  #[arg(short, long, global = true)]
  quiet: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(ClapArgs, Debug, Default)]
struct FilterArgs {
  /// Case-insensitive search over names, organization and role.
  #[arg(short, long, default_value = "")]
  search: String,

  /// Only guests with this status (active, inactive, to-contact, blacklisted).
  #[arg(long, value_parser = Status::from_name)]
  status: Option<Status>,

  /// Only guests tagged with this sector.
  #[arg(long, value_parser = Sector::from_name)]
  sector: Option<Sector>,
}

impl From<FilterArgs> for GuestFilter {
  fn from(args: FilterArgs) -> Self {
    Self {
      search: args.search,
      status: args.status,
      sector: args.sector,
    }
  }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
  Csv,
  Tsv,
  Xlsx,
}

impl From<FormatArg> for ExportFormat {
  fn from(f: FormatArg) -> Self {
    match f {
      FormatArg::Csv => Self::Csv,
      FormatArg::Tsv => Self::Tsv,
      FormatArg::Xlsx => Self::Xlsx,
    }
  }
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List guests, optionally filtered.
  List {
    #[command(flatten)]
    filter: FilterArgs,
  },

  /// Show one guest with their appearance history.
  Show { id: String },

  /// Dashboard statistics.
  Stats {
    /// Compute as of this date instead of today (YYYY-MM-DD).
    #[arg(long)]
    today: Option<NaiveDate>,
  },

  /// Import guests from a CSV, TSV, JSON or xlsx file.
  Import {
    file: PathBuf,

    /// Override the inferred mapping, e.g. `--map surname="Last name"`.
    /// An empty column (`--map bio=`) unmaps the field.
    #[arg(long = "map", value_name = "FIELD=COLUMN")]
    overrides: Vec<String>,

    /// Report what would be imported without adding anything.
    #[arg(long)]
    dry_run: bool,
  },

  /// Export the filtered guest list.
  Export {
    #[command(flatten)]
    filter: FilterArgs,

    #[arg(long, value_enum, default_value = "csv")]
    format: FormatArg,

    /// Output directory (defaults to `export_dir` from the config).
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,
  },

  /// Suggest active guests for a subject.
  Recommend {
    #[arg(long, default_value = "")]
    subject: String,

    #[arg(long, value_parser = Sector::from_name)]
    sector: Option<Sector>,
  },

  /// Build a search string for finding new guests.
  Keywords {
    #[arg(long, default_value = "")]
    subject: String,

    #[arg(long, value_parser = Sector::from_name)]
    sector: Option<Sector>,

    /// Programme format, e.g. "debate" or "interview".
    #[arg(long, default_value = "")]
    format: String,
  },

  /// Add a guest to the session.
  Add(AddArgs),
}

#[derive(ClapArgs, Debug)]
struct AddArgs {
  #[arg(long)]
  surname: String,

  #[arg(long)]
  given_name: String,

  #[arg(long, value_parser = Status::from_name)]
  status: Option<Status>,

  /// May be repeated.
  #[arg(long = "sector", value_parser = Sector::from_name)]
  sectors: Vec<Sector>,

  #[arg(long, default_value = "")]
  organization: String,

  #[arg(long, default_value = "")]
  role: String,

  #[arg(long, default_value = "")]
  bio: String,

  #[arg(long, default_value = "")]
  notes: String,

  #[arg(long)]
  email: Option<String>,

  #[arg(long)]
  phone: Option<String>,

  #[arg(long)]
  linkedin: Option<String>,

  #[arg(long)]
  social: Option<String>,

  #[arg(long)]
  website: Option<String>,
}

impl From<AddArgs> for GuestForm {
  fn from(a: AddArgs) -> Self {
    Self {
      surname:      a.surname,
      given_name:   a.given_name,
      status:       a.status,
      sectors:      a.sectors.into_iter().collect::<BTreeSet<_>>(),
      organization: a.organization,
      role:         a.role,
      bio:          a.bio,
      notes:        a.notes,
      contact:      ContactChannels {
        linkedin: a.linkedin,
        social:   a.social,
        website:  a.website,
        email:    a.email,
        phone:    a.phone,
      },
    }
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let level = if args.verbose {
    LevelFilter::DEBUG
  } else if args.quiet {
    LevelFilter::WARN
  } else {
    LevelFilter::INFO
  };
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy(),
    )
    .init();

  let settings = Settings::load(&args.config)?;
  let mut app = App::new(settings);
  let today = Local::now().date_naive();
  let mut out = io::stdout().lock();

  match args.command {
    Command::List { filter } => app.list(&mut out, &filter.into())?,
    Command::Show { id } => app.show(&mut out, &GuestId::new(id))?,
    Command::Stats { today: as_of } => app.stats(&mut out, as_of.unwrap_or(today))?,
    Command::Import {
      file,
      overrides,
      dry_run,
    } => app.import(&mut out, &file, &overrides, dry_run).await?,
    Command::Export {
      filter,
      format,
      out: dir,
    } => {
      let path = app
        .export(&filter.into(), format.into(), dir.as_deref(), today)
        .await?;
      writeln!(out, "Exported to {}", path.display())?;
    }
    Command::Recommend { subject, sector } => {
      app.recommend(&mut out, &RecommendationRequest { subject, sector })?
    }
    Command::Keywords {
      subject,
      sector,
      format,
    } => app.keywords(&mut out, &subject, sector, &format)?,
    Command::Add(add) => app.add(&mut out, add.into())?,
  }

  out.flush()?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn cli_definition_is_consistent() { Args::command().debug_assert(); }

  #[test]
  fn filter_flags_parse_into_a_guest_filter() {
    let args = Args::parse_from([
      "greenroom", "list", "--search", "dup", "--status", "to-contact", "--sector", "Economy",
    ]);
    let Command::List { filter } = args.command else {
      panic!("expected list");
    };
    let filter: GuestFilter = filter.into();
    assert_eq!(filter.search, "dup");
    assert_eq!(filter.status, Some(Status::ToContact));
    assert_eq!(filter.sector, Some(Sector::Economy));
  }

  #[test]
  fn unknown_sector_is_a_usage_error() {
    assert!(Args::try_parse_from(["greenroom", "list", "--sector", "cooking"]).is_err());
  }

  #[test]
  fn add_collects_repeated_sectors() {
    let args = Args::parse_from([
      "greenroom",
      "add",
      "--surname",
      "Leroy",
      "--given-name",
      "Anna",
      "--sector",
      "tech",
      "--sector",
      "science",
      "--email",
      "anna@example.com",
    ]);
    let Command::Add(add) = args.command else {
      panic!("expected add");
    };
    let form: GuestForm = add.into();
    assert_eq!(form.sectors.len(), 2);
    assert_eq!(form.status, None);
    assert_eq!(form.contact.email.as_deref(), Some("anna@example.com"));
  }

  #[test]
  fn export_accepts_xlsx() {
    let args = Args::parse_from(["greenroom", "export", "--format", "xlsx"]);
    let Command::Export { format, .. } = args.command else {
      panic!("expected export");
    };
    assert_eq!(ExportFormat::from(format), ExportFormat::Xlsx);
  }
}
