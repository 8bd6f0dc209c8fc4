//! Publication schedule: which kinds appear on which dates.

use crate::model::PuzzleKind;
use chrono::{Datelike, Days, NaiveDate};

pub fn is_available(kind: PuzzleKind, date: NaiveDate) -> bool {
    kind.days().contains(&date.weekday())
}

/// Like [`is_available`] for a kind given by slug. Unknown slugs are never available.
pub fn is_available_slug(slug: &str, date: NaiveDate) -> bool {
    PuzzleKind::from_slug(slug).is_some_and(|kind| is_available(kind, date))
}

/// Kinds published on `date`, in registry order.
pub fn available_kinds(date: NaiveDate) -> Vec<PuzzleKind> {
    PuzzleKind::ALL
        .into_iter()
        .filter(|kind| is_available(*kind, date))
        .collect()
}

/// Candidate publication dates for `kind`, newest first.
///
/// Walks back from `target` for `max_lookback` days, counting `target` itself as the
/// first day. An empty result means the window holds no publication day for this kind.
pub fn fallback_dates(kind: PuzzleKind, target: NaiveDate, max_lookback: u32) -> Vec<NaiveDate> {
    (0..u64::from(max_lookback))
        .map_while(|back| target.checked_sub_days(Days::new(back)))
        .filter(|date| is_available(kind, *date))
        .collect()
}
