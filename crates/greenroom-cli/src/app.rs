//! Session state and one handler per command.

use std::{
  io::Write,
  path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use greenroom_core::{
  GuestRepository,
  guest::{GuestForm, GuestId, Sector},
  query::{GuestFilter, filter, statistics},
  recommend::{RecommendationRequest, recommend, suggest_keywords},
};
use greenroom_sheet::{
  ExportFormat, SheetFormat, file_name, import_rows, infer_mapping, parse, project,
};

use crate::{settings::Settings, ui};

// ─── App ──────────────────────────────────────────────────────────────────────

/// One session: a repository seeded at start-up plus the settings it runs
/// under. Nothing outlives the process.
pub struct App {
  pub repo:     GuestRepository,
  pub settings: Settings,
}

impl App {
  pub fn new(settings: Settings) -> Self {
    let user = settings.user.clone();
    let repo = if settings.seed {
      GuestRepository::seeded(user)
    } else {
      GuestRepository::new(user)
    };
    tracing::debug!(
      guests = repo.guests().len(),
      user = %repo.user().email,
      role = %repo.user().role,
      "session started"
    );
    Self { repo, settings }
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  pub fn list(&self, out: &mut impl Write, query: &GuestFilter) -> Result<()> {
    let guests = filter(self.repo.guests(), query);
    ui::guest_list(out, &guests, self.repo.guests().len())?;
    Ok(())
  }

  pub fn show(&self, out: &mut impl Write, id: &GuestId) -> Result<()> {
    let Some(guest) = self.repo.get(id) else {
      bail!("no guest with id {id}");
    };
    ui::guest_detail(out, guest)?;
    Ok(())
  }

  pub fn stats(&self, out: &mut impl Write, today: NaiveDate) -> Result<()> {
    let stats = statistics(self.repo.guests(), today, self.settings.week_start);
    ui::stats(out, &stats)?;
    Ok(())
  }

  pub fn recommend(&self, out: &mut impl Write, request: &RecommendationRequest) -> Result<()> {
    let picks = recommend(self.repo.guests(), request);
    if picks.is_empty() {
      writeln!(out, "No active guest matches.")?;
      return Ok(());
    }
    for (rank, g) in picks.iter().enumerate() {
      writeln!(
        out,
        "{}. {}: {}, {} ({} passage(s))",
        rank + 1,
        g.full_name(),
        g.role,
        g.organization,
        g.passages.len()
      )?;
    }
    Ok(())
  }

  pub fn keywords(
    &self,
    out: &mut impl Write,
    subject: &str,
    sector: Option<Sector>,
    format: &str,
  ) -> Result<()> {
    writeln!(out, "{}", suggest_keywords(subject, sector, format))?;
    Ok(())
  }

  // ── Mutations ─────────────────────────────────────────────────────────────

  pub fn add(&mut self, out: &mut impl Write, form: GuestForm) -> Result<()> {
    let guest = self.repo.create(form).context("creating guest")?;
    ui::guest_detail(out, &guest)?;
    writeln!(out)?;
    ui::audit_log(out, self.repo.audit_log())?;
    Ok(())
  }

  /// Read `path`, infer the mapping, apply `overrides` and import.
  ///
  /// With `dry_run` nothing is appended; the report is still printed.
  pub async fn import(
    &mut self,
    out: &mut impl Write,
    path: &Path,
    overrides: &[String],
    dry_run: bool,
  ) -> Result<()> {
    let format = SheetFormat::from_path(path)?;
    let bytes = tokio::fs::read(path)
      .await
      .with_context(|| format!("reading {}", path.display()))?;
    let rows = parse(&bytes, format).with_context(|| format!("parsing {}", path.display()))?;

    let Some(first) = rows.first() else {
      writeln!(out, "{} has no data rows.", path.display())?;
      return Ok(());
    };
    let mut mapping = infer_mapping(first);
    for spec in overrides {
      mapping.apply_override(spec)?;
    }
    ui::mapping(out, &mapping)?;

    let report = import_rows(&rows, &mapping, self.repo.guests())?;
    ui::import_errors(out, &report.errors)?;

    if dry_run {
      writeln!(out, "Dry run: {} guest(s) would be imported.", report.accepted.len())?;
      return Ok(());
    }
    let imported = self.repo.import_batch(report.accepted)?;
    writeln!(out, "{} guest(s) imported.", imported.len())?;
    if !imported.is_empty() {
      let refs: Vec<_> = imported.iter().collect();
      ui::guest_list(out, &refs, refs.len())?;
      ui::audit_log(out, self.repo.audit_log())?;
    }
    Ok(())
  }

  /// Write the filtered view to `dir/guests_<today>.<ext>` and return the path.
  pub async fn export(
    &self,
    query: &GuestFilter,
    format: ExportFormat,
    dir: Option<&Path>,
    today: NaiveDate,
  ) -> Result<PathBuf> {
    let rows = project(filter(self.repo.guests(), query));
    let mut buf = Vec::new();
    greenroom_sheet::write(&rows, format, &mut buf)?;

    let dir = dir.unwrap_or(self.settings.export_dir.as_path());
    let path = dir.join(file_name(format, today));
    tokio::fs::write(&path, buf)
      .await
      .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(rows = rows.len(), path = %path.display(), "exported guests");
    Ok(path)
  }
}

#[cfg(test)]
mod tests {
  use greenroom_core::{audit::AuditAction, guest::Status};

  use super::*;

  fn app() -> App { App::new(Settings::from_toml("").unwrap()) }

  fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("greenroom-{}-{name}", std::process::id()))
  }

  fn output(buf: Vec<u8>) -> String { String::from_utf8(buf).unwrap() }

  #[test]
  fn unseeded_session_starts_empty() {
    let app = App::new(Settings::from_toml("seed = false").unwrap());
    assert!(app.repo.guests().is_empty());
  }

  #[test]
  fn list_applies_filters() {
    let app = app();
    let mut buf = Vec::new();
    app
      .list(&mut buf, &GuestFilter {
        sector: Some(Sector::Sport),
        ..GuestFilter::default()
      })
      .unwrap();
    let text = output(buf);
    assert!(text.starts_with("Guests (1/5)"));
    assert!(text.contains("Thomas Lefebvre"));
  }

  #[test]
  fn show_unknown_guest_fails() {
    let app = app();
    assert!(app.show(&mut std::io::sink(), &GuestId::new("99")).is_err());
  }

  #[test]
  fn add_rejects_missing_given_name() {
    let mut app = app();
    let err = app
      .add(&mut std::io::sink(), GuestForm::new("Leroy", ""))
      .unwrap_err();
    assert!(format!("{err:#}").contains("given_name is required"));
    assert!(app.repo.audit_log().is_empty());
  }

  #[tokio::test]
  async fn import_file_appends_and_audits() {
    let path = temp_path("import.csv");
    tokio::fs::write(&path, "Nom,Prénom,Email\nMartin,Jacques,\nLeroy,Anna,anna@example.com\n")
      .await
      .unwrap();

    let mut app = app();
    let mut buf = Vec::new();
    app.import(&mut buf, &path, &[], false).await.unwrap();
    tokio::fs::remove_file(&path).await.ok();

    let text = output(buf);
    assert!(text.contains("row 1: Jacques Martin already exists"));
    assert!(text.contains("1 guest(s) imported."));
    assert_eq!(app.repo.guests().len(), 6);
    let entry = app.repo.audit_log().latest().unwrap();
    assert_eq!(entry.action, AuditAction::Import);
    assert_eq!(entry.detail, "1 guest(s) imported");
  }

  #[tokio::test]
  async fn dry_run_leaves_repository_untouched() {
    let path = temp_path("dry.tsv");
    tokio::fs::write(&path, "A\tB\nLeroy\tAnna\n").await.unwrap();

    let mut app = app();
    let mut buf = Vec::new();
    let overrides = ["surname=A".to_owned(), "given_name=B".to_owned()];
    app.import(&mut buf, &path, &overrides, true).await.unwrap();
    tokio::fs::remove_file(&path).await.ok();

    assert!(output(buf).contains("Dry run: 1 guest(s) would be imported."));
    assert_eq!(app.repo.guests().len(), 5);
    assert!(app.repo.audit_log().is_empty());
  }

  #[tokio::test]
  async fn import_without_name_mapping_fails() {
    let path = temp_path("unmapped.csv");
    tokio::fs::write(&path, "A,B\nLeroy,Anna\n").await.unwrap();

    let mut app = app();
    let result = app.import(&mut std::io::sink(), &path, &[], false).await;
    tokio::fs::remove_file(&path).await.ok();
    assert!(result.is_err());
  }

  #[tokio::test]
  async fn export_writes_dated_file() {
    let dir = temp_path("export");
    tokio::fs::create_dir_all(&dir).await.unwrap();

    let app = app();
    let today = NaiveDate::from_ymd_opt(2024, 12, 10).unwrap();
    let path = app
      .export(&GuestFilter::default(), ExportFormat::Csv, Some(&dir), today)
      .await
      .unwrap();
    assert_eq!(path.file_name().unwrap(), "guests_2024-12-10.csv");

    let bytes = tokio::fs::read(&path).await.unwrap();
    let rows = parse(&bytes, SheetFormat::Csv).unwrap();
    assert_eq!(rows.len(), 5);
    tokio::fs::remove_dir_all(&dir).await.ok();
  }

  #[tokio::test]
  async fn xlsx_export_imports_into_an_empty_session() {
    let dir = temp_path("xlsx");
    tokio::fs::create_dir_all(&dir).await.unwrap();

    let today = NaiveDate::from_ymd_opt(2024, 12, 10).unwrap();
    let path = app()
      .export(&GuestFilter::default(), ExportFormat::Xlsx, Some(&dir), today)
      .await
      .unwrap();
    assert_eq!(path.file_name().unwrap(), "guests_2024-12-10.xlsx");

    let mut empty = App::new(Settings::from_toml("seed = false").unwrap());
    let mut buf = Vec::new();
    empty.import(&mut buf, &path, &[], false).await.unwrap();
    tokio::fs::remove_dir_all(&dir).await.ok();

    assert!(output(buf).contains("5 guest(s) imported."));
    assert_eq!(empty.repo.guests().len(), 5);
    assert!(empty.repo.guests().iter().all(|g| g.status == Status::ToContact));
  }
}
