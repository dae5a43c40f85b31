//! Derived, read-only views over a guest collection.
//!
//! Everything here is a pure function of its arguments: the caller passes the
//! current repository snapshot and gets a fresh view back on every call.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::Serialize;

use crate::guest::{Guest, GuestId, Passage, Sector, Status};

/// Number of calendar months in [`Stats::monthly_trend`].
pub const TREND_MONTHS: u32 = 6;

/// Maximum length of [`Stats::top_guests`].
pub const TOP_GUESTS: usize = 10;

// ─── Filter ──────────────────────────────────────────────────────────────────

/// Parameters for [`filter`]. The default matches every guest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestFilter {
  /// Case-insensitive substring over surname, given name, organization and
  /// role. Empty matches everything.
  pub search: String,
  /// `None` means all statuses.
  pub status: Option<Status>,
  /// `None` means all sectors.
  pub sector: Option<Sector>,
}

impl GuestFilter {
  pub fn matches(&self, guest: &Guest) -> bool {
    self.matches_search(guest)
      && self.status.is_none_or(|s| guest.status == s)
      && self.sector.is_none_or(|s| guest.sectors.contains(&s))
  }

  fn matches_search(&self, guest: &Guest) -> bool {
    if self.search.is_empty() {
      return true;
    }
    let term = self.search.to_lowercase();
    [
      &guest.surname,
      &guest.given_name,
      &guest.organization,
      &guest.role,
    ]
    .into_iter()
    .any(|field| field.to_lowercase().contains(&term))
  }
}

/// Guests matching all of `query`'s predicates, in input order.
pub fn filter<'a>(guests: &'a [Guest], query: &GuestFilter) -> Vec<&'a Guest> {
  guests.iter().filter(|g| query.matches(g)).collect()
}

// ─── Statistics ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectorCount {
  pub sector: Sector,
  pub label:  &'static str,
  pub color:  &'static str,
  pub count:  usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
  pub year:     i32,
  /// 1-based calendar month.
  pub month:    u32,
  /// e.g. `"July 2024"`.
  pub label:    String,
  pub passages: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopGuest {
  pub id:       GuestId,
  pub name:     String,
  pub passages: usize,
  pub sectors:  Vec<Sector>,
}

/// Aggregate dashboard figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
  pub total:                usize,
  pub active:               usize,
  pub passages_this_week:   usize,
  pub passages_this_month:  usize,
  pub passages_this_year:   usize,
  /// Non-zero sectors only, in [`Sector`] declaration order.
  pub passages_by_sector:   Vec<SectorCount>,
  /// Oldest month first, ending with the current month.
  pub monthly_trend:        Vec<MonthBucket>,
  pub top_guests:           Vec<TopGuest>,
}

/// Compute [`Stats`] for `guests` as seen on `today`.
///
/// `week_start` is the first day of the week for the weekly count.
pub fn statistics(guests: &[Guest], today: NaiveDate, week_start: Weekday) -> Stats {
  let passages: Vec<(&Guest, &Passage)> = guests
    .iter()
    .flat_map(|g| g.passages.iter().map(move |p| (g, p)))
    .collect();

  let count_since = |start: NaiveDate| {
    passages
      .iter()
      .filter(|(_, p)| p.date >= start && p.date <= today)
      .count()
  };

  let mut by_sector: BTreeMap<Sector, usize> = BTreeMap::new();
  for (guest, _) in &passages {
    for sector in &guest.sectors {
      *by_sector.entry(*sector).or_default() += 1;
    }
  }

  let current_month = first_of_month(today);
  let monthly_trend = (0..TREND_MONTHS)
    .rev()
    .map(|back| {
      let start = current_month - Months::new(back);
      let end = start + Months::new(1);
      MonthBucket {
        year:     start.year(),
        month:    start.month(),
        label:    start.format("%B %Y").to_string(),
        passages: passages
          .iter()
          .filter(|(_, p)| p.date >= start && p.date < end)
          .count(),
      }
    })
    .collect();

  let mut ranked: Vec<&Guest> = guests.iter().collect();
  // `sort_by` is stable, so ties keep repository order.
  ranked.sort_by(|a, b| b.passages.len().cmp(&a.passages.len()));
  let top_guests = ranked
    .into_iter()
    .take(TOP_GUESTS)
    .map(|g| TopGuest {
      id:       g.id.clone(),
      name:     g.full_name(),
      passages: g.passages.len(),
      sectors:  g.sectors.iter().copied().collect(),
    })
    .collect();

  Stats {
    total: guests.len(),
    active: guests.iter().filter(|g| g.status == Status::Active).count(),
    passages_this_week: count_since(week_start_of(today, week_start)),
    passages_this_month: count_since(current_month),
    passages_this_year: count_since(first_of_year(today)),
    passages_by_sector: by_sector
      .into_iter()
      .map(|(sector, count)| SectorCount {
        sector,
        label: sector.label(),
        color: sector.color(),
        count,
      })
      .collect(),
    monthly_trend,
    top_guests,
  }
}

// ─── Calendar helpers ────────────────────────────────────────────────────────

fn first_of_month(date: NaiveDate) -> NaiveDate {
  date - Days::new(u64::from(date.day0()))
}

fn first_of_year(date: NaiveDate) -> NaiveDate {
  date - Days::new(u64::from(date.ordinal0()))
}

fn week_start_of(date: NaiveDate, week_start: Weekday) -> NaiveDate {
  date - Days::new(u64::from(date.weekday().days_since(week_start)))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn period_starts() {
    // 2024-12-10 is a Tuesday.
    let today = date(2024, 12, 10);
    assert_eq!(first_of_month(today), date(2024, 12, 1));
    assert_eq!(first_of_year(today), date(2024, 1, 1));
    assert_eq!(week_start_of(today, Weekday::Mon), date(2024, 12, 9));
    assert_eq!(week_start_of(today, Weekday::Sun), date(2024, 12, 8));
    assert_eq!(week_start_of(today, Weekday::Tue), today);
  }
}
