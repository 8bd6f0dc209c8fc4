//! # Configuration
//!
//! Configuration is loaded with [`confique`], layered in priority order:
//! 1. **Environment variables**: only `GUARDIAN_DOWNLOADS_DIR` is bound.
//! 2. **Config file**: `$CROSSWORD_SYNC_CONFIG`, or `config.toml` in the OS config
//!    directory (via the `directories` crate). A missing file is fine.
//! 3. **Compiled defaults**: `#[config(default = ...)]` below.
//!
//! The CLI applies `--downloads-dir` on top of all layers.
//!
//! Cloud credentials never live in the config file. They come from `SUPERNOTE_EMAIL`
//! and `SUPERNOTE_PASSWORD`, with a `.env` file read first.

use crate::error::{Result, SyncError};
use crate::fetch::RetryPolicy;
use crate::retention::RetentionLimits;
use confique::Config;
use directories::{BaseDirs, ProjectDirs};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_PATH_ENV: &str = "CROSSWORD_SYNC_CONFIG";
pub const EMAIL_ENV: &str = "SUPERNOTE_EMAIL";
pub const PASSWORD_ENV: &str = "SUPERNOTE_PASSWORD";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Config, Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Where downloaded PDFs are kept. `~` and `$VARS` are expanded.
    #[config(env = "GUARDIAN_DOWNLOADS_DIR")]
    #[config(default = "downloads")]
    pub downloads_dir: String,

    #[config(default = 30)]
    pub local_retention_days: u32,

    #[config(default = 90)]
    pub cloud_retention_days: u32,

    /// Fallback cap on local files, on top of the age limit.
    #[config(default = 150)]
    pub max_local_files: u32,

    #[config(default = 400)]
    pub max_cloud_files: u32,

    /// Cloud directory the puzzles are mirrored into.
    #[config(default = "Document/puzzles")]
    pub puzzles_dir: String,

    #[config(default = "https://crosswords-static.guim.co.uk")]
    pub base_url: String,

    #[config(default = 3)]
    pub max_retries: u32,

    #[config(default = 2)]
    pub retry_delay_secs: u64,

    #[config(default = 30)]
    pub request_timeout_secs: u64,

    /// Days to walk back (target included) when a puzzle is not yet published.
    #[config(default = 3)]
    pub fallback_days: u32,

    #[config(default = "https://cloud.supernote.com/api/")]
    pub cloud_api_url: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            downloads_dir: "downloads".to_string(),
            local_retention_days: 30,
            cloud_retention_days: 90,
            max_local_files: 150,
            max_cloud_files: 400,
            puzzles_dir: "Document/puzzles".to_string(),
            base_url: "https://crosswords-static.guim.co.uk".to_string(),
            max_retries: 3,
            retry_delay_secs: 2,
            request_timeout_secs: 30,
            fallback_days: 3,
            cloud_api_url: "https://cloud.supernote.com/api/".to_string(),
        }
    }
}

impl SyncConfig {
    /// Loads env + file + defaults from the standard location.
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::builder().env().load()?),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading config");
        Ok(Self::builder().env().file(path).load()?)
    }

    pub fn downloads_path(&self) -> PathBuf {
        expand_path(&self.downloads_dir)
    }

    pub fn local_limits(&self) -> Result<RetentionLimits> {
        RetentionLimits::new(self.local_retention_days, self.max_local_files)
    }

    pub fn cloud_limits(&self) -> Result<RetentionLimits> {
        RetentionLimits::new(self.cloud_retention_days, self.max_cloud_files)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_retries.max(1),
            delay: Duration::from_secs(self.retry_delay_secs),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// `$CROSSWORD_SYNC_CONFIG`, else `config.toml` in the platform config dir.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    ProjectDirs::from("com", "crossword-sync", "crossword-sync")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Expands a leading `~` and `$VAR` / `${VAR}` references. Unset variables are left as-is.
pub fn expand_path(raw: &str) -> PathBuf {
    let expanded = expand_vars(raw);
    if expanded == "~" || expanded.starts_with("~/") {
        if let Some(base) = BaseDirs::new() {
            let rest = expanded.trim_start_matches('~').trim_start_matches('/');
            return base.home_dir().join(rest);
        }
    }
    PathBuf::from(expanded)
}

fn expand_vars(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => ("", 0),
            }
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], end)
        };
        match std::env::var(name) {
            Ok(value) if !name.is_empty() => out.push_str(&value),
            _ => out.push_str(&rest[pos..pos + 1 + consumed]),
        }
        rest = &after[consumed..];
    }
    out.push_str(rest);
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Reads `.env` (if present) and then the process environment.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let email = lookup(EMAIL_ENV).filter(|v| !v.is_empty());
        let password = lookup(PASSWORD_ENV).filter(|v| !v.is_empty());
        match (email, password) {
            (Some(email), Some(password)) => Ok(Self { email, password }),
            _ => Err(SyncError::Credentials(format!(
                "set {} and {} in the environment or .env",
                EMAIL_ENV, PASSWORD_ENV
            ))),
        }
    }
}
