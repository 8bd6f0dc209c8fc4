//! Core data types: puzzle kinds and the files tracked by the retention engine.

use crate::error::SyncError;
use crate::naming::{self, FileAge, ParsedName};
use chrono::{NaiveDate, Weekday};
use std::fmt;
use std::str::FromStr;

/// One of the Guardian crossword categories.
///
/// The set of kinds is fixed at compile time. [`PuzzleKind::ALL`] is the
/// registry, and its order is the display order used everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PuzzleKind {
    Quick,
    Cryptic,
    QuickCryptic,
    Weekend,
}

impl PuzzleKind {
    pub const ALL: [PuzzleKind; 4] = [
        PuzzleKind::Quick,
        PuzzleKind::Cryptic,
        PuzzleKind::QuickCryptic,
        PuzzleKind::Weekend,
    ];

    /// The identifier used in filenames, URLs and on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            PuzzleKind::Quick => "quick",
            PuzzleKind::Cryptic => "cryptic",
            PuzzleKind::QuickCryptic => "quick-cryptic",
            PuzzleKind::Weekend => "weekend",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PuzzleKind::Quick => "Quick Crossword",
            PuzzleKind::Cryptic => "Cryptic Crossword",
            PuzzleKind::QuickCryptic => "Quick-Cryptic Crossword",
            PuzzleKind::Weekend => "Weekend Crossword",
        }
    }

    /// Weekdays this kind is published on. Never empty.
    pub fn days(self) -> &'static [Weekday] {
        use Weekday::*;
        match self {
            PuzzleKind::Quick => &[Mon, Tue, Wed, Thu, Fri, Sat],
            PuzzleKind::Cryptic => &[Mon, Tue, Wed, Thu, Fri],
            PuzzleKind::QuickCryptic => &[Sat],
            PuzzleKind::Weekend => &[Sat],
        }
    }

    pub fn from_slug(slug: &str) -> Option<PuzzleKind> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }
}

impl fmt::Display for PuzzleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for PuzzleKind {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PuzzleKind::from_slug(s).ok_or_else(|| SyncError::UnknownKind(s.to_string()))
    }
}

/// A file seen in a store listing, as judged by the retention engine.
///
/// Built fresh from every listing and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedFile {
    pub name: String,
    pub parsed: ParsedName,
    pub age: FileAge,
}

impl ArchivedFile {
    pub fn from_name(name: impl Into<String>, today: NaiveDate) -> Self {
        let name = name.into();
        let parsed = naming::decode(&name);
        let age = parsed.age_on(today);
        Self { name, parsed, age }
    }

    pub fn kind(&self) -> Option<PuzzleKind> {
        match self.parsed {
            ParsedName::Known { kind, .. } => Some(kind),
            ParsedName::Unparseable => None,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self.parsed {
            ParsedName::Known { date, .. } => Some(date),
            ParsedName::Unparseable => None,
        }
    }

    pub fn age_days(&self) -> Option<i64> {
        self.age.days()
    }
}
