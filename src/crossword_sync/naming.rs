//! # Filename Codec
//!
//! Every file this tool touches is named `guardian-{kind}-{YYYYMMDD}.pdf`, locally and
//! in the cloud. The name is the single source of truth for a file's kind and date:
//! nothing else is persisted.
//!
//! Decoding never fails. Foreign or half-written names are normal (manual copies,
//! interrupted downloads), so they decode to [`ParsedName::Unparseable`] and callers
//! must handle that arm explicitly.

use crate::model::PuzzleKind;
use chrono::NaiveDate;

pub const NAME_PREFIX: &str = "guardian-";
pub const PDF_EXT: &str = ".pdf";

const DATE_FORMAT: &str = "%Y%m%d";

/// Result of decoding a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedName {
    Known { kind: PuzzleKind, date: NaiveDate },
    Unparseable,
}

impl ParsedName {
    pub fn age_on(&self, reference: NaiveDate) -> FileAge {
        match self {
            ParsedName::Known { date, .. } => FileAge::Days((reference - *date).num_days()),
            ParsedName::Unparseable => FileAge::Unknown,
        }
    }
}

/// Age of a file in whole days relative to a reference date.
///
/// Negative for names dated after the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAge {
    Days(i64),
    Unknown,
}

impl FileAge {
    pub fn days(self) -> Option<i64> {
        match self {
            FileAge::Days(days) => Some(days),
            FileAge::Unknown => None,
        }
    }
}

/// Canonical stem, e.g. `guardian-cryptic-20250115`.
pub fn encode(kind: PuzzleKind, date: NaiveDate) -> String {
    format!("{}{}-{}", NAME_PREFIX, kind.slug(), date.format(DATE_FORMAT))
}

/// Canonical filename including the extension.
pub fn file_name(kind: PuzzleKind, date: NaiveDate) -> String {
    format!("{}{}", encode(kind, date), PDF_EXT)
}

/// Location of the PDF on the Guardian's static server.
pub fn url_for(base_url: &str, kind: PuzzleKind, date: NaiveDate) -> String {
    format!(
        "{}/gdn.{}.{}.pdf",
        base_url.trim_end_matches('/'),
        kind.slug(),
        date.format(DATE_FORMAT)
    )
}

/// Recovers kind and date from a name, with or without the `.pdf` extension.
pub fn decode(name: &str) -> ParsedName {
    let stem = name.strip_suffix(PDF_EXT).unwrap_or(name);
    let Some(rest) = stem.strip_prefix(NAME_PREFIX) else {
        return ParsedName::Unparseable;
    };
    // Kinds may contain '-', the date never does.
    let Some((slug, date_str)) = rest.rsplit_once('-') else {
        return ParsedName::Unparseable;
    };
    if date_str.len() != 8 || !date_str.bytes().all(|b| b.is_ascii_digit()) {
        return ParsedName::Unparseable;
    }
    let Some(kind) = PuzzleKind::from_slug(slug) else {
        return ParsedName::Unparseable;
    };
    match NaiveDate::parse_from_str(date_str, DATE_FORMAT) {
        Ok(date) => ParsedName::Known { kind, date },
        Err(_) => ParsedName::Unparseable,
    }
}

pub fn age_days(name: &str, reference: NaiveDate) -> FileAge {
    decode(name).age_on(reference)
}

/// True for names the local store manages (`guardian-*.pdf`).
pub fn is_archive_name(name: &str) -> bool {
    name.starts_with(NAME_PREFIX) && name.ends_with(PDF_EXT)
}
