//! # CLI Behavior
//!
//! The binary's only job is to run the library's stages in order and show what they
//! report. It is the only place that reads stdin, writes stdout or picks an exit code.
//!
//! ## Flags
//!
//! - No flags (or `--today`): sync today's puzzles.
//! - `--date YYYY-MM-DD`: sync that day's puzzles. Retention ages still count from
//!   the real today.
//! - `--type KIND`: only that kind, even on a day the schedule says it is not out.
//! - `--cleanup`: retention only, no downloads.
//! - `--info`: local storage report.
//! - `--no-upload`: never touch the cloud (no credentials needed).
//! - `--auto-cleanup` / `--dry-run`: confirmation mode for every delete.
//!
//! ## Exit Codes
//!
//! `0` for a completed run, including one where a prompt was answered "no" or a
//! download failed. `1` for errors that reach `main` (bad date, missing credentials,
//! unreadable config) and for Ctrl-C outside a prompt.
//!
//! ## Module Structure
//!
//! - `setup`: clap definitions and help text
//! - `commands`: context setup and stage orchestration
//! - `prompt`: the terminal `Prompter` and Ctrl-C routing
//! - `render`: colored message output

mod commands;
mod prompt;
mod render;
pub mod setup;

pub use commands::run;
