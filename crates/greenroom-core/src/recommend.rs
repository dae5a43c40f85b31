//! Guest recommendations and search-keyword suggestions for show prep.

use crate::guest::{Guest, Sector, Status};

/// Maximum number of guests returned by [`recommend`].
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Terms appended to every keyword suggestion.
const EXPERT_TERMS: [&str; 4] = ["expert", "specialist", "analyst", "consultant"];

/// What the producer is looking for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationRequest {
  /// Free-text subject, matched against biographies and sector labels.
  pub subject: String,
  pub sector:  Option<Sector>,
}

/// Active guests fitting `request`, most experienced on air first.
pub fn recommend<'a>(
  guests: &'a [Guest],
  request: &RecommendationRequest,
) -> Vec<&'a Guest> {
  let subject = request.subject.trim().to_lowercase();

  let mut candidates: Vec<&Guest> = guests
    .iter()
    .filter(|g| g.status == Status::Active)
    .filter(|g| request.sector.is_none_or(|s| g.sectors.contains(&s)))
    .filter(|g| {
      subject.is_empty()
        || g.bio.to_lowercase().contains(&subject)
        || g
          .sectors
          .iter()
          .any(|s| s.label().to_lowercase().contains(&subject))
    })
    .collect();

  candidates.sort_by(|a, b| b.passages.len().cmp(&a.passages.len()));
  candidates.truncate(MAX_RECOMMENDATIONS);
  candidates
}

/// Build a search string for finding new guests outside the tracker, e.g.
/// `"climate + Environment + debate + expert + specialist + analyst + consultant"`.
pub fn suggest_keywords(subject: &str, sector: Option<Sector>, format: &str) -> String {
  let mut keywords: Vec<&str> = Vec::new();
  if !subject.trim().is_empty() {
    keywords.push(subject.trim());
  }
  if let Some(sector) = sector {
    keywords.push(sector.label());
  }
  if !format.trim().is_empty() {
    keywords.push(format.trim());
  }
  keywords.extend(EXPERT_TERMS);
  keywords.join(" + ")
}
