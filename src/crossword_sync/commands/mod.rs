//! # Command Layer
//!
//! Each stage of a run is a function here: retention cleanup, the invalid-content
//! sweep, downloading, uploading and the storage report. Commands take stores and
//! collaborators as arguments and return a [`CmdResult`]. They never print; what the
//! user should see travels back as [`CmdMessage`]s for the CLI to render.

use crate::model::PuzzleKind;
use chrono::NaiveDate;
use std::path::PathBuf;

pub mod cleanup;
pub mod download;
pub mod info;
pub mod invalid;
pub mod upload;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A puzzle that is now present in the downloads directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Downloaded {
    pub kind: PuzzleKind,
    pub date: NaiveDate,
    pub path: PathBuf,
    /// False when a valid copy was already on disk.
    pub fetched: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    Uploaded,
    Exists,
    Failed,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Files deleted, or that would be deleted in a dry run.
    pub affected: usize,
    pub removed: Vec<String>,
    pub cancelled: bool,
    pub downloads: Vec<Downloaded>,
    pub uploads: Vec<(String, UploadStatus)>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}
