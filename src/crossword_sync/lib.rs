//! # Crossword Sync Architecture
//!
//! Crossword Sync fetches the day's Guardian crossword PDFs, keeps a bounded local
//! archive of them and mirrors that archive into a Supernote cloud account, pruning
//! stale files on both sides.
//!
//! The library carries all of that behaviour. The binary is one client of it: it
//! parses flags, wires the stores together and renders what the library reports.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses flags, orders the stages, prints messages         │
//! │  - The ONLY place that knows about stdin/stdout/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - cleanup, invalid sweep, download, upload, info           │
//! │  - Returns CmdResult values carrying leveled messages       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (schedule, naming, retention, confirm)                │
//! │  - Pure functions over dates, names and listings            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - ArchiveStore trait: list, size hint, delete              │
//! │  - LocalStore, CloudStore over a CloudDrive, MemStore       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in the Library
//!
//! Everything here takes Rust values and returns `Result`. It never prints and never
//! exits. Even the yes/no confirmation goes through the [`confirm::Prompter`] trait,
//! which the CLI implements over the terminal and tests implement with canned answers.
//!
//! ## Names Are the Metadata
//!
//! A file's kind and publication date live only in its name,
//! `guardian-{kind}-{YYYYMMDD}.pdf` (see [`naming`]). Retention ages are computed
//! from that date, never from filesystem timestamps, so local and cloud copies of the
//! same puzzle always age identically.
//!
//! ## Testing Strategy
//!
//! 1. **Core** (`schedule`, `naming`, `retention`): unit tests plus `proptest`
//!    properties.
//! 2. **Commands**: run against [`store::memory::MemStore`] and
//!    [`store::memory::MemDrive`], or a `tempfile` directory for the local store.
//! 3. **CLI**: `assert_cmd` tests under `tests/`, limited to offline flags.
//!
//! ## Module Overview
//!
//! - [`model`]: puzzle kinds and archived-file records
//! - [`schedule`]: which kinds publish on which weekday, fallback dates
//! - [`naming`]: the filename codec and download URLs
//! - [`retention`]: the deletion policy
//! - [`confirm`]: the confirmation gate in front of every delete
//! - [`commands`]: one module per stage of a run
//! - [`store`]: storage abstraction and implementations
//! - [`fetch`]: HTTP retrieval of PDFs
//! - [`config`]: layered configuration and credentials
//! - [`error`]: error types

pub mod commands;
pub mod config;
pub mod confirm;
pub mod error;
pub mod fetch;
pub mod model;
pub mod naming;
pub mod retention;
pub mod schedule;
pub mod store;
