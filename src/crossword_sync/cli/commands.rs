//! Stage orchestration for one invocation.
//!
//! - `--info`: print the storage report and stop.
//! - `--cleanup`: local retention, invalid sweep, then cloud retention unless
//!   `--no-upload`.
//! - otherwise: local retention, invalid sweep, download, upload, cloud retention.

use super::prompt::TerminalPrompter;
use super::render::{print_error, print_heading, print_messages};
use super::setup::Cli;
use chrono::{Local, NaiveDate};
use clap::Parser;
use crossword_sync::commands::{cleanup, download, info, invalid, upload};
use crossword_sync::config::{Credentials, SyncConfig};
use crossword_sync::confirm::{ConfirmMode, Prompter};
use crossword_sync::error::{Result, SyncError};
use crossword_sync::fetch::HttpSource;
use crossword_sync::model::PuzzleKind;
use crossword_sync::schedule;
use crossword_sync::store::cloud::{CloudDrive, CloudStore};
use crossword_sync::store::local::LocalStore;
use crossword_sync::store::supernote::SupernoteDrive;
use tracing_subscriber::EnvFilter;

struct AppContext {
    config: SyncConfig,
    local: LocalStore,
    mode: ConfirmMode,
    /// Reference date for ages. Always the real today, even with `--date`.
    today: NaiveDate,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;
    let mut prompter = TerminalPrompter::install()?;

    if cli.info {
        return handle_info(&ctx);
    }
    if cli.cleanup {
        handle_cleanup(&mut ctx, &cli, &mut prompter)
    } else {
        handle_sync(&mut ctx, &cli, &mut prompter)
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config = SyncConfig::load()?;
    let downloads = cli
        .downloads_dir
        .clone()
        .unwrap_or_else(|| config.downloads_path());
    tracing::debug!(downloads = %downloads.display(), "context ready");

    Ok(AppContext {
        config,
        local: LocalStore::new(downloads),
        mode: ConfirmMode::from_flags(cli.dry_run, cli.auto_cleanup),
        today: Local::now().date_naive(),
    })
}

fn handle_info(ctx: &AppContext) -> Result<()> {
    let report = info::run(&ctx.local, ctx.config.local_limits()?)?;
    println!("{}", report);
    Ok(())
}

fn handle_cleanup(ctx: &mut AppContext, cli: &Cli, prompter: &mut TerminalPrompter) -> Result<()> {
    print_heading("Running cleanup operations...");
    clean_local(ctx, prompter)?;

    if !cli.no_upload {
        if let Some(drive) = connect(&ctx.config)? {
            clean_cloud(ctx, &drive, prompter)?;
        } else {
            print_error("Failed to authenticate with Supernote for cloud cleanup");
        }
    }
    Ok(())
}

fn handle_sync(ctx: &mut AppContext, cli: &Cli, prompter: &mut TerminalPrompter) -> Result<()> {
    let target = target_date(cli, ctx.today)?;
    print_heading(&format!("Processing crosswords for {}", target.format("%Y-%m-%d")));

    let kinds = kinds_for(cli, target)?;
    clean_local(ctx, prompter)?;

    if kinds.is_empty() {
        print_error(&format!(
            "No crosswords available for {}",
            target.format("%Y-%m-%d")
        ));
        return Ok(());
    }
    let slugs: Vec<&str> = kinds.iter().map(|k| k.slug()).collect();
    println!("Available: {}", slugs.join(", "));

    let settings = download::DownloadSettings {
        base_url: ctx.config.base_url.clone(),
        retry: ctx.config.retry_policy(),
        fallback_days: ctx.config.fallback_days,
    };
    let source = HttpSource::new(ctx.config.request_timeout())?;
    let fetched = download::run(&source, &ctx.local, &kinds, target, &settings)?;
    print_messages(&fetched.messages);
    if fetched.downloads.is_empty() {
        return Ok(());
    }

    if cli.no_upload {
        println!("Skipping upload to Supernote (--no-upload specified)");
        return Ok(());
    }

    let Some(drive) = connect(&ctx.config)? else {
        print_error("Failed to authenticate with Supernote");
        return Ok(());
    };
    let files: Vec<_> = fetched.downloads.iter().map(|d| d.path.clone()).collect();
    let uploaded = upload::run(&drive, &ctx.config.puzzles_dir, &files)?;
    print_messages(&uploaded.messages);

    clean_cloud(ctx, &drive, prompter)?;
    println!();
    println!("All operations completed!");
    Ok(())
}

fn clean_local(ctx: &mut AppContext, prompter: &mut dyn Prompter) -> Result<()> {
    let limits = ctx.config.local_limits()?;
    let res = cleanup::run(&mut ctx.local, limits, ctx.mode, ctx.today, prompter)?;
    print_messages(&res.messages);

    let swept = invalid::run(&mut ctx.local, ctx.mode == ConfirmMode::DryRun)?;
    print_messages(&swept.messages);
    Ok(())
}

fn clean_cloud<D: CloudDrive>(
    ctx: &AppContext,
    drive: &D,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let limits = ctx.config.cloud_limits()?;
    let mut store = CloudStore::new(drive, ctx.config.puzzles_dir.as_str());
    match cleanup::run(&mut store, limits, ctx.mode, ctx.today, prompter) {
        Ok(res) => print_messages(&res.messages),
        Err(e) => print_error(&format!("Error during cloud cleanup: {}", e)),
    }
    Ok(())
}

/// Logs in, or returns `None` when the account rejects the credentials.
/// Missing credentials are an error.
fn connect(config: &SyncConfig) -> Result<Option<SupernoteDrive>> {
    let creds = Credentials::load()?;
    let mut drive = SupernoteDrive::new(&config.cloud_api_url, config.request_timeout())?;
    println!("Authenticating with Supernote...");
    match drive.login(&creds.email, &creds.password) {
        Ok(()) => Ok(Some(drive)),
        Err(e) => {
            print_error(&e.to_string());
            Ok(None)
        }
    }
}

fn target_date(cli: &Cli, today: NaiveDate) -> Result<NaiveDate> {
    match cli.date.as_deref() {
        Some(raw) if !cli.today => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| SyncError::InvalidDate(raw.to_string())),
        _ => Ok(today),
    }
}

fn kinds_for(cli: &Cli, target: NaiveDate) -> Result<Vec<PuzzleKind>> {
    match cli.kind.as_deref() {
        Some(slug) => Ok(vec![slug.parse()?]),
        None => Ok(schedule::available_kinds(target)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["crossword-sync"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn target_defaults_to_today() {
        assert_eq!(target_date(&cli(&[]), today()).unwrap(), today());
        assert_eq!(target_date(&cli(&["--today"]), today()).unwrap(), today());
    }

    #[test]
    fn target_from_date_flag() {
        let parsed = target_date(&cli(&["--date", "2025-01-18"]), today()).unwrap();
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2025, 1, 18).unwrap());
    }

    #[test]
    fn malformed_date_is_an_error() {
        let err = target_date(&cli(&["--date", "18/01/2025"]), today()).unwrap_err();
        assert!(matches!(err, SyncError::InvalidDate(_)));
    }

    #[test]
    fn explicit_type_skips_the_schedule() {
        // A Sunday publishes nothing, but an explicit type is still attempted.
        let sunday = NaiveDate::from_ymd_opt(2025, 1, 19).unwrap();
        assert!(kinds_for(&cli(&[]), sunday).unwrap().is_empty());
        assert_eq!(
            kinds_for(&cli(&["--type", "weekend"]), sunday).unwrap(),
            vec![PuzzleKind::Weekend]
        );
    }

    #[test]
    fn schedule_decides_kinds_by_default() {
        let saturday = NaiveDate::from_ymd_opt(2025, 1, 18).unwrap();
        let kinds = kinds_for(&cli(&[]), saturday).unwrap();
        assert!(kinds.contains(&PuzzleKind::Weekend));
        assert!(!kinds.contains(&PuzzleKind::Cryptic));
    }
}
