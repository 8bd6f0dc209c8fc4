//! One retention pass against one store: list, select, confirm, delete.

use crate::commands::{CmdMessage, CmdResult};
use crate::confirm::{ConfirmMode, ConfirmationGate, GateOutcome, Prompter};
use crate::error::Result;
use crate::model::ArchivedFile;
use crate::retention::{select_for_deletion, Candidate, RetentionDecision, RetentionLimits};
use crate::store::ArchiveStore;
use chrono::NaiveDate;

/// Lists `store` afresh, applies the retention policy and, once the gate approves,
/// deletes the selected files.
///
/// A failed delete is reported and skipped; the others still go. `affected` counts
/// only successful deletes, or the would-be deletions in a dry run. A rejected
/// prompt is not an error: the result is marked `cancelled` and nothing is deleted.
pub fn run<S, P>(
    store: &mut S,
    limits: RetentionLimits,
    mode: ConfirmMode,
    today: NaiveDate,
    prompter: &mut P,
) -> Result<CmdResult>
where
    S: ArchiveStore + ?Sized,
    P: Prompter + ?Sized,
{
    let label = store.label().to_string();
    let files: Vec<ArchivedFile> = store
        .list_names()?
        .into_iter()
        .map(|name| ArchivedFile::from_name(name, today))
        .collect();
    tracing::debug!(store = %label, files = files.len(), "retention pass");

    let decision = select_for_deletion(&files, limits);
    let mut result = CmdResult::default();
    if decision.is_empty() {
        result.add_message(CmdMessage::info(format!("No old {} files to remove", label)));
        return Ok(result);
    }

    let listing = describe_all(&*store, &decision);
    let subject = format!("{} files", label);
    match ConfirmationGate::new(mode).decide(&subject, &decision, &listing, prompter) {
        GateOutcome::DryRunReport(names) => {
            result.add_message(CmdMessage::warning(format!(
                "DRY RUN: Would remove {} old {} files:",
                names.len(),
                label
            )));
            for line in &listing {
                result.add_message(CmdMessage::info(format!("  • {}", line)));
            }
            result.affected = names.len();
        }
        GateOutcome::Rejected => {
            result.cancelled = true;
            result.add_message(CmdMessage::info(format!(
                "{} cleanup cancelled by user",
                capitalize(&label)
            )));
        }
        GateOutcome::Approved(names) => {
            for name in names {
                match store.delete(&name) {
                    Ok(()) => {
                        tracing::debug!(store = %label, file = %name, "removed");
                        result.add_message(CmdMessage::success(format!("Removed: {}", name)));
                        result.removed.push(name);
                    }
                    Err(e) => {
                        tracing::warn!(store = %label, file = %name, error = %e, "delete failed");
                        result.add_message(CmdMessage::error(format!(
                            "Failed to remove {}: {}",
                            name, e
                        )));
                    }
                }
            }
            result.affected = result.removed.len();
            if result.affected > 0 {
                result.add_message(CmdMessage::success(format!(
                    "Removed {} old {} files",
                    result.affected, label
                )));
            }
        }
    }

    Ok(result)
}

fn describe_all<S: ArchiveStore + ?Sized>(store: &S, decision: &RetentionDecision) -> Vec<String> {
    decision
        .candidates
        .iter()
        .map(|c| describe(c, store.size_of(&c.name)))
        .collect()
}

fn describe(candidate: &Candidate, size: Option<u64>) -> String {
    match size {
        Some(bytes) => format!(
            "{} ({} days old, {} bytes)",
            candidate.name,
            candidate.age_days,
            group_thousands(bytes)
        ),
        None => format!("{} ({} days old)", candidate.name, candidate.age_days),
    }
}

pub(crate) fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
