use clap::builder::PossibleValuesParser;
use clap::Parser;
use crossword_sync::model::PuzzleKind;
use std::path::PathBuf;

fn kind_parser() -> PossibleValuesParser {
    PossibleValuesParser::new(PuzzleKind::ALL.map(PuzzleKind::slug))
}

fn after_help() -> String {
    let kinds: Vec<String> = PuzzleKind::ALL
        .iter()
        .map(|kind| format!("  {:<14} {}", kind.slug(), kind.display_name()))
        .collect();
    format!(
        "Available puzzle types:\n{}\n\n\
         Examples:\n  \
         crossword-sync --today                       Download today's crosswords\n  \
         crossword-sync --date 2025-01-15             Download crosswords for a date\n  \
         crossword-sync --date 2025-01-15 --type quick\n  \
         crossword-sync --cleanup                     Only run cleanup\n  \
         crossword-sync --cleanup --auto-cleanup      Clean up without confirmation\n  \
         crossword-sync --cleanup --dry-run           Show what would be cleaned up\n  \
         crossword-sync --info                        Show storage information",
        kinds.join("\n")
    )
}

#[derive(Parser, Debug)]
#[command(name = "crossword-sync", bin_name = "crossword-sync", version)]
#[command(
    about = "Download Guardian crosswords and upload them to Supernote",
    long_about = None,
    after_help = after_help()
)]
pub struct Cli {
    /// Download crosswords for today (the default)
    #[arg(long, conflicts_with = "date")]
    pub today: bool,

    /// Download crosswords for a specific date
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<String>,

    /// Only this puzzle type
    #[arg(long = "type", value_name = "TYPE", value_parser = kind_parser())]
    pub kind: Option<String>,

    /// Only run cleanup operations (local and cloud)
    #[arg(long)]
    pub cleanup: bool,

    /// Show storage information
    #[arg(long)]
    pub info: bool,

    /// Download only, do not touch the cloud
    #[arg(long)]
    pub no_upload: bool,

    /// Skip confirmation prompts for cleanup operations
    #[arg(long)]
    pub auto_cleanup: bool,

    /// Show what would be cleaned up without deleting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Override the downloads directory
    #[arg(long, value_name = "DIR")]
    pub downloads_dir: Option<PathBuf>,

    /// Verbose logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
