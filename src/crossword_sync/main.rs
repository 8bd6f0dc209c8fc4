//! # Crossword Sync CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, and this file only
//! invokes `cli::run()` and handles process termination.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/crossword_sync/cli/)                        │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Stage ordering + context wiring (commands.rs)            │
//! │  - Terminal prompt and Ctrl-C routing (prompt.rs)           │
//! │  - Colored message output (render.rs)                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Library (crossword_sync)                                   │
//! │  - commands, retention, schedule, naming, store             │
//! │  - No knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Logging goes to stderr through `tracing`. It is quiet by default; `-v` turns on
//! debug output and `RUST_LOG` overrides both.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
