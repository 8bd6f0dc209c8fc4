use crate::error::Result;
use crate::naming::{self, ParsedName};
use crate::retention::RetentionLimits;
use crate::store::local::LocalStore;
use crate::store::ArchiveStore;
use chrono::NaiveDate;
use std::fmt;
use std::path::PathBuf;

/// Snapshot of the downloads directory.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageInfo {
    pub directory: PathBuf,
    pub total_files: usize,
    pub valid_files: usize,
    pub invalid_files: usize,
    pub total_bytes: u64,
    pub oldest: Option<NaiveDate>,
    pub newest: Option<NaiveDate>,
    pub limits: RetentionLimits,
}

impl StorageInfo {
    pub fn total_mb(&self) -> f64 {
        self.total_bytes as f64 / (1024.0 * 1024.0)
    }
}

pub fn run(store: &LocalStore, limits: RetentionLimits) -> Result<StorageInfo> {
    let names = store.list_names()?;
    let mut info = StorageInfo {
        directory: store.root().to_path_buf(),
        total_files: names.len(),
        valid_files: 0,
        invalid_files: 0,
        total_bytes: 0,
        oldest: None,
        newest: None,
        limits,
    };

    for name in &names {
        info.total_bytes += store.size_of(name).unwrap_or(0);
        if store.is_valid_pdf(name) {
            info.valid_files += 1;
        } else {
            info.invalid_files += 1;
        }
        if let ParsedName::Known { date, .. } = naming::decode(name) {
            info.oldest = Some(info.oldest.map_or(date, |d| d.min(date)));
            info.newest = Some(info.newest.map_or(date, |d| d.max(date)));
        }
    }
    Ok(info)
}

impl fmt::Display for StorageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Local Storage Info ===")?;
        writeln!(f, "Directory: {}", self.directory.display())?;
        writeln!(f, "Total files: {}", self.total_files)?;
        writeln!(f, "Valid PDFs: {}", self.valid_files)?;
        writeln!(f, "Invalid files: {}", self.invalid_files)?;
        writeln!(f, "Total size: {:.2} MB", self.total_mb())?;
        if let (Some(oldest), Some(newest)) = (self.oldest, self.newest) {
            writeln!(
                f,
                "Date range: {} to {}",
                oldest.format("%Y-%m-%d"),
                newest.format("%Y-%m-%d")
            )?;
        }
        writeln!(
            f,
            "Retention policy: {} days (max {} files)",
            self.limits.max_age_days(),
            self.limits.max_count()
        )?;
        write!(f, "{}", "=".repeat(26))
    }
}
