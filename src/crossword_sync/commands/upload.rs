use crate::commands::{CmdMessage, CmdResult, UploadStatus};
use crate::error::Result;
use crate::store::cloud::{join_remote, CloudDrive};
use std::path::Path;

/// Mirrors local files into `remote_dir`, skipping names already present there.
///
/// The drive must already be logged in. Each file ends up `Uploaded`, `Exists` or
/// `Failed`; a failure never stops the remaining files.
pub fn run<D, P>(drive: &D, remote_dir: &str, files: &[P]) -> Result<CmdResult>
where
    D: CloudDrive + ?Sized,
    P: AsRef<Path>,
{
    let mut result = CmdResult::default();

    if let Err(e) = drive.list(remote_dir) {
        tracing::warn!(dir = remote_dir, error = %e, "remote directory not listable");
        result.add_message(CmdMessage::warning(format!(
            "Directory {} may need to be created manually",
            remote_dir
        )));
    }

    for file in files {
        let local = file.as_ref();
        let name = local
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| local.display().to_string());
        let status = upload_one(drive, remote_dir, local, &name, &mut result);
        result.uploads.push((name, status));
    }

    result.add_message(CmdMessage::success(summary(&result.uploads)));
    Ok(result)
}

fn upload_one<D: CloudDrive + ?Sized>(
    drive: &D,
    remote_dir: &str,
    local: &Path,
    name: &str,
    result: &mut CmdResult,
) -> UploadStatus {
    let remote = join_remote(remote_dir, name);
    match drive.exists(&remote) {
        Ok(true) => {
            result.add_message(CmdMessage::info(format!("Already exists: {}", name)));
            return UploadStatus::Exists;
        }
        Ok(false) => {}
        // Unknown counts as absent.
        Err(e) => tracing::warn!(path = %remote, error = %e, "existence check failed"),
    }

    match drive.put(local, remote_dir) {
        Ok(()) => {
            result.add_message(CmdMessage::success(format!("Uploaded {}", name)));
            UploadStatus::Uploaded
        }
        Err(e) => {
            result.add_message(CmdMessage::error(format!("Failed to upload {}: {}", name, e)));
            UploadStatus::Failed
        }
    }
}

fn summary(uploads: &[(String, UploadStatus)]) -> String {
    let total = uploads.len();
    let uploaded = uploads
        .iter()
        .filter(|(_, s)| *s == UploadStatus::Uploaded)
        .count();
    let existed = uploads
        .iter()
        .filter(|(_, s)| *s == UploadStatus::Exists)
        .count();

    match (uploaded, existed) {
        (0, 0) => format!("Completed: 0/{} files uploaded", total),
        (0, e) => format!("Completed: All {} files already existed on Supernote", e),
        (u, 0) => format!("Completed: {}/{} files uploaded", u, total),
        (u, e) => format!("Completed: {} uploaded, {} already existed", u, e),
    }
}
