use crate::commands::{CmdMessage, CmdResult, Downloaded};
use crate::error::{Result, SyncError};
use crate::fetch::{is_pdf, PdfSource, RetryPolicy};
use crate::model::PuzzleKind;
use crate::naming;
use crate::schedule;
use crate::store::local::LocalStore;
use chrono::NaiveDate;
use std::thread;

#[derive(Debug, Clone)]
pub struct DownloadSettings {
    pub base_url: String,
    pub retry: RetryPolicy,
    /// Candidate days per kind, the target included.
    pub fallback_days: u32,
}

/// Makes sure each of `kinds` has a valid PDF in `store`, for `target` or the most
/// recent publication day before it.
///
/// Each kind walks its fallback dates newest first and stops at the first date that
/// is already on disk or downloads cleanly. A kind that fails every date is reported
/// as an error message and the remaining kinds still run.
pub fn run<S: PdfSource + ?Sized>(
    source: &S,
    store: &LocalStore,
    kinds: &[PuzzleKind],
    target: NaiveDate,
    settings: &DownloadSettings,
) -> Result<CmdResult> {
    store.ensure_dir()?;
    let mut result = CmdResult::default();

    for &kind in kinds {
        match fetch_kind(source, store, kind, target, settings, &mut result) {
            Some(done) => result.downloads.push(done),
            None => result.add_message(CmdMessage::error(format!(
                "Failed to download {} crossword",
                kind
            ))),
        }
    }

    if result.downloads.is_empty() && !kinds.is_empty() {
        result.add_message(CmdMessage::error("No crosswords were successfully downloaded"));
    }
    Ok(result)
}

fn fetch_kind<S: PdfSource + ?Sized>(
    source: &S,
    store: &LocalStore,
    kind: PuzzleKind,
    target: NaiveDate,
    settings: &DownloadSettings,
    result: &mut CmdResult,
) -> Option<Downloaded> {
    let dates = schedule::fallback_dates(kind, target, settings.fallback_days);
    if dates.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "No available dates for {} around {}",
            kind,
            target.format("%Y-%m-%d")
        )));
        return None;
    }

    for date in dates {
        let name = naming::file_name(kind, date);
        if store.exists(&name) && store.is_valid_pdf(&name) {
            result.add_message(CmdMessage::info(format!("Already have {}", name)));
            return Some(Downloaded {
                kind,
                date,
                path: store.path_of(&name),
                fetched: false,
            });
        }

        let url = naming::url_for(&settings.base_url, kind, date);
        match fetch_with_retry(source, &url, settings.retry) {
            Ok(bytes) if is_pdf(&bytes) => match store.write_atomic(&name, &bytes) {
                Ok(path) => {
                    result.add_message(CmdMessage::success(format!("Downloaded {}", name)));
                    return Some(Downloaded {
                        kind,
                        date,
                        path,
                        fetched: true,
                    });
                }
                Err(e) => {
                    result.add_message(CmdMessage::error(format!(
                        "Failed to save {}: {}",
                        name, e
                    )));
                }
            },
            Ok(_) => {
                result.add_message(CmdMessage::warning(format!(
                    "Downloaded file is not a valid PDF: {}",
                    name
                )));
            }
            Err(e) => {
                tracing::info!(kind = kind.slug(), %date, error = %e, "date unavailable");
                result.add_message(CmdMessage::warning(format!(
                    "Failed to download {} for {}",
                    kind,
                    date.format("%Y-%m-%d")
                )));
            }
        }
    }
    None
}

/// Up to `max_attempts` GETs with a fixed pause between them. The last error wins.
fn fetch_with_retry<S: PdfSource + ?Sized>(
    source: &S,
    url: &str,
    retry: RetryPolicy,
) -> Result<Vec<u8>> {
    let attempts = retry.max_attempts.max(1);
    let mut last = None;
    for attempt in 1..=attempts {
        match source.fetch(url) {
            Ok(bytes) => return Ok(bytes),
            Err(e) => {
                tracing::warn!(url, attempt, error = %e, "download attempt failed");
                last = Some(e);
                if attempt < attempts && !retry.delay.is_zero() {
                    thread::sleep(retry.delay);
                }
            }
        }
    }
    Err(last.unwrap_or_else(|| SyncError::Cloud(format!("no attempt made for {}", url))))
}
