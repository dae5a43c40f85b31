//! Plain-text rendering of guests, statistics and the audit log.

use std::io::{self, Write};

use greenroom_core::{
  audit::AuditLog,
  guest::{Guest, Sector},
  query::Stats,
};
use greenroom_sheet::{ColumnMapping, Field, ImportRowError};
use strum::IntoEnumIterator;

// ─── Guests ───────────────────────────────────────────────────────────────────

fn sector_labels<'a>(sectors: impl IntoIterator<Item = &'a Sector>) -> String {
  sectors
    .into_iter()
    .map(|s| s.label())
    .collect::<Vec<_>>()
    .join(", ")
}

/// One line per guest with a count header.
pub fn guest_list(out: &mut impl Write, guests: &[&Guest], total: usize) -> io::Result<()> {
  if guests.len() == total {
    writeln!(out, "Guests ({total})")?;
  } else {
    writeln!(out, "Guests ({}/{total})", guests.len())?;
  }
  for g in guests {
    writeln!(
      out,
      "  {:<38} {:<24} {:<12} {:<28} {}",
      g.id,
      g.full_name(),
      g.status,
      g.organization,
      sector_labels(&g.sectors),
    )?;
  }
  Ok(())
}

/// Everything we know about one guest, passages most recent first.
pub fn guest_detail(out: &mut impl Write, g: &Guest) -> io::Result<()> {
  writeln!(out, "{} [{}]", g.full_name(), g.status)?;
  writeln!(out, "  id:           {}", g.id)?;
  if !g.role.is_empty() || !g.organization.is_empty() {
    writeln!(out, "  role:         {}, {}", g.role, g.organization)?;
  }
  if !g.sectors.is_empty() {
    writeln!(out, "  sectors:      {}", sector_labels(&g.sectors))?;
  }
  let channels = [
    ("email", &g.contact.email),
    ("phone", &g.contact.phone),
    ("linkedin", &g.contact.linkedin),
    ("social", &g.contact.social),
    ("website", &g.contact.website),
  ];
  for (label, value) in channels {
    if let Some(v) = value {
      writeln!(out, "  {label:<13} {v}")?;
    }
  }
  if !g.bio.is_empty() {
    writeln!(out, "  bio:          {}", g.bio)?;
  }
  if !g.notes.is_empty() {
    writeln!(out, "  notes:        {}", g.notes)?;
  }
  writeln!(
    out,
    "  created:      {} by {}",
    g.created_at.format("%Y-%m-%d %H:%M"),
    g.created_by
  )?;
  writeln!(
    out,
    "  updated:      {} by {}",
    g.updated_at.format("%Y-%m-%d %H:%M"),
    g.last_modified_by
  )?;

  writeln!(out, "  passages ({}):", g.passages.len())?;
  for p in g.passages_by_date() {
    write!(
      out,
      "    {}  {:<16} {} ({} min)",
      p.date, p.program, p.topic, p.duration_minutes
    )?;
    match &p.note {
      Some(note) => writeln!(out, " - {note}")?,
      None => writeln!(out)?,
    }
  }
  Ok(())
}

// ─── Statistics ───────────────────────────────────────────────────────────────

pub fn stats(out: &mut impl Write, s: &Stats) -> io::Result<()> {
  writeln!(out, "Guests:   {} ({} active)", s.total, s.active)?;
  writeln!(
    out,
    "Passages: {} this week, {} this month, {} this year",
    s.passages_this_week, s.passages_this_month, s.passages_this_year
  )?;

  writeln!(out, "\nBy sector:")?;
  for c in &s.passages_by_sector {
    writeln!(out, "  {:<14} {:>3}  {}", c.label, c.count, c.color)?;
  }

  writeln!(out, "\nLast {} months:", s.monthly_trend.len())?;
  for b in &s.monthly_trend {
    writeln!(out, "  {:<15} {:>3} {}", b.label, b.passages, "#".repeat(b.passages))?;
  }

  writeln!(out, "\nTop guests:")?;
  for (rank, t) in s.top_guests.iter().enumerate() {
    writeln!(
      out,
      "  {:>2}. {:<24} {:>3}  {}",
      rank + 1,
      t.name,
      t.passages,
      sector_labels(&t.sectors)
    )?;
  }
  Ok(())
}

// ─── Audit log ────────────────────────────────────────────────────────────────

pub fn audit_log(out: &mut impl Write, log: &AuditLog) -> io::Result<()> {
  writeln!(out, "Audit log ({}):", log.len())?;
  for e in log.entries() {
    writeln!(
      out,
      "  {}  {:<20} {:<12} {}/{}  {}",
      e.timestamp.format("%Y-%m-%d %H:%M:%S"),
      e.user,
      e.action,
      e.entity_type,
      e.entity_id,
      e.detail
    )?;
  }
  Ok(())
}

// ─── Import ───────────────────────────────────────────────────────────────────

pub fn mapping(out: &mut impl Write, mapping: &ColumnMapping) -> io::Result<()> {
  writeln!(out, "Column mapping:")?;
  for field in Field::iter() {
    let column = mapping.get(field).unwrap_or("-");
    writeln!(out, "  {:<14} : {column}", field.to_string())?;
  }
  Ok(())
}

pub fn import_errors(out: &mut impl Write, errors: &[ImportRowError]) -> io::Result<()> {
  if errors.is_empty() {
    return Ok(());
  }
  writeln!(out, "Rejected rows ({}):", errors.len())?;
  for e in errors {
    writeln!(out, "  {e}")?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use greenroom_core::{
    query::statistics,
    seed::seed_guests,
  };

  use super::*;

  fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
    let mut buf = Vec::new();
    f(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
  }

  #[test]
  fn list_header_shows_filtered_count() {
    let guests = seed_guests();
    let view: Vec<&Guest> = guests.iter().take(2).collect();
    let text = render(|out| guest_list(out, &view, guests.len()));
    assert!(text.starts_with("Guests (2/5)\n"));
    assert!(text.contains("Marie Dupont"));
    assert!(text.contains("Politics, Society"));
  }

  #[test]
  fn detail_lists_passages_newest_first() {
    let guests = seed_guests();
    let text = render(|out| guest_detail(out, &guests[0]));
    let first = text.find("2024-11-15").unwrap();
    let last = text.find("2024-09-10").unwrap();
    assert!(first < last);
    assert!(text.contains("(15 min) - Very good appearance"));
  }

  #[test]
  fn stats_render_all_sections() {
    let guests = seed_guests();
    let today = chrono::NaiveDate::from_ymd_opt(2024, 12, 10).unwrap();
    let s = statistics(&guests, today, chrono::Weekday::Mon);
    let text = render(|out| stats(out, &s));
    assert!(text.contains("Guests:   5 (5 active)"));
    assert!(text.contains("November 2024"));
    assert!(text.contains(" 1. Marie Dupont"));
  }

  #[test]
  fn output_uses_plain_separators() {
    let guests = seed_guests();
    let detail = render(|out| guest_detail(out, &guests[1]));
    assert!(detail.contains("role:         Chief Economist, Banque Centrale"));

    let mut columns = ColumnMapping::new();
    columns.set(Field::Surname, "Nom");
    let text = render(|out| mapping(out, &columns));
    assert!(text.contains(&format!("  {:<14} : Nom", "surname")));
    assert!(text.contains(&format!("  {:<14} : -", "given_name")));
    assert!(!detail.contains('\u{2014}') && !text.contains('\u{2014}'));
  }
}
