use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::local::LocalStore;
use crate::store::ArchiveStore;

/// Removes archive files whose content does not start with the PDF header.
///
/// These are left behind by interrupted downloads or by servers that answer with an
/// HTML error page. In a dry run they are only listed.
pub fn run(store: &mut LocalStore, dry_run: bool) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let invalid: Vec<String> = store
        .list_names()?
        .into_iter()
        .filter(|name| !store.is_valid_pdf(name))
        .collect();

    if invalid.is_empty() {
        return Ok(result);
    }

    if dry_run {
        result.add_message(CmdMessage::warning(format!(
            "DRY RUN: Would remove {} invalid PDF files:",
            invalid.len()
        )));
        for name in &invalid {
            result.add_message(CmdMessage::info(format!("  • {}", name)));
        }
        result.affected = invalid.len();
        return Ok(result);
    }

    for name in invalid {
        match store.delete(&name) {
            Ok(()) => {
                result.add_message(CmdMessage::success(format!("Removed invalid PDF: {}", name)));
                result.removed.push(name);
            }
            Err(e) => result.add_message(CmdMessage::error(format!(
                "Failed to remove invalid PDF {}: {}",
                name, e
            ))),
        }
    }
    result.affected = result.removed.len();
    if result.affected > 0 {
        result.add_message(CmdMessage::success(format!(
            "Removed {} invalid PDF files",
            result.affected
        )));
    }
    Ok(result)
}
