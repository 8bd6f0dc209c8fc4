use assert_cmd::Command;
use chrono::{Days, Local, NaiveDate};
use crossword_sync::model::PuzzleKind;
use crossword_sync::naming;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn sync_cmd(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("crossword-sync").unwrap();
    cmd.env("CROSSWORD_SYNC_CONFIG", temp.path().join("config.toml"))
        .env("NO_COLOR", "1")
        .env_remove("GUARDIAN_DOWNLOADS_DIR")
        .env_remove("RUST_LOG")
        .current_dir(temp.path());
    cmd
}

fn days_ago(n: u64) -> NaiveDate {
    Local::now().date_naive().checked_sub_days(Days::new(n)).unwrap()
}

fn put_pdf(dir: &Path, kind: PuzzleKind, date: NaiveDate) -> String {
    let name = naming::file_name(kind, date);
    fs::write(dir.join(&name), b"%PDF-1.4 test").unwrap();
    name
}

fn downloads(temp: &TempDir) -> std::path::PathBuf {
    let dir = temp.path().join("downloads");
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn help_lists_puzzle_types() {
    let temp = TempDir::new().unwrap();
    sync_cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available puzzle types"))
        .stdout(predicate::str::contains("quick-cryptic"));
}

#[test]
fn info_reports_local_storage() {
    let temp = TempDir::new().unwrap();
    let dir = downloads(&temp);
    put_pdf(&dir, PuzzleKind::Quick, days_ago(2));
    put_pdf(&dir, PuzzleKind::Cryptic, days_ago(3));
    fs::write(dir.join("guardian-quick-20200101.pdf"), b"<html>").unwrap();

    sync_cmd(&temp)
        .arg("--info")
        .arg("--downloads-dir")
        .arg(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total files: 3"))
        .stdout(predicate::str::contains("Valid PDFs: 2"))
        .stdout(predicate::str::contains("Invalid files: 1"))
        .stdout(predicate::str::contains("Retention policy: 30 days (max 150 files)"));
}

#[test]
fn dry_run_cleanup_keeps_files() {
    let temp = TempDir::new().unwrap();
    let dir = downloads(&temp);
    let old = put_pdf(&dir, PuzzleKind::Quick, days_ago(45));
    put_pdf(&dir, PuzzleKind::Quick, days_ago(1));

    sync_cmd(&temp)
        .args(["--cleanup", "--no-upload", "--dry-run", "--downloads-dir"])
        .arg(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN: Would remove 1 old local files:"))
        .stdout(predicate::str::contains(old.as_str()));

    assert!(dir.join(&old).exists());
}

#[test]
fn auto_cleanup_removes_only_stale_files() {
    let temp = TempDir::new().unwrap();
    let dir = downloads(&temp);
    let old = put_pdf(&dir, PuzzleKind::Cryptic, days_ago(31));
    let fresh = put_pdf(&dir, PuzzleKind::Cryptic, days_ago(30));

    sync_cmd(&temp)
        .args(["--cleanup", "--no-upload", "--auto-cleanup", "--downloads-dir"])
        .arg(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 old local files"));

    assert!(!dir.join(&old).exists());
    assert!(dir.join(&fresh).exists());
}

#[test]
fn answering_no_cancels_cleanup() {
    let temp = TempDir::new().unwrap();
    let dir = downloads(&temp);
    let old = put_pdf(&dir, PuzzleKind::Quick, days_ago(60));

    sync_cmd(&temp)
        .args(["--cleanup", "--no-upload", "--downloads-dir"])
        .arg(&dir)
        .write_stdin("maybe\nn\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 old local files to remove:"))
        .stdout(predicate::str::contains("Please enter 'y' for yes or 'n' for no"))
        .stdout(predicate::str::contains("Local cleanup cancelled by user"));

    assert!(dir.join(&old).exists());
}

#[test]
fn answering_yes_deletes() {
    let temp = TempDir::new().unwrap();
    let dir = downloads(&temp);
    let old = put_pdf(&dir, PuzzleKind::Quick, days_ago(60));

    sync_cmd(&temp)
        .args(["--cleanup", "--no-upload", "--downloads-dir"])
        .arg(&dir)
        .write_stdin("y\n")
        .assert()
        .success();

    assert!(!dir.join(&old).exists());
}

#[test]
fn cleanup_sweeps_invalid_pdfs() {
    let temp = TempDir::new().unwrap();
    let dir = downloads(&temp);
    let broken = naming::file_name(PuzzleKind::Quick, days_ago(1));
    fs::write(dir.join(&broken), b"<html>503</html>").unwrap();

    sync_cmd(&temp)
        .args(["--cleanup", "--no-upload", "--auto-cleanup", "--downloads-dir"])
        .arg(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed invalid PDF"));

    assert!(!dir.join(&broken).exists());
}

#[test]
fn bad_date_exits_with_error() {
    let temp = TempDir::new().unwrap();
    sync_cmd(&temp)
        .args(["--date", "2025-13-45", "--no-upload"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid date '2025-13-45'"));
}

#[test]
fn downloads_dir_from_config_file() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("from-config");
    fs::create_dir_all(&dir).unwrap();
    put_pdf(&dir, PuzzleKind::Weekend, days_ago(5));
    fs::write(
        temp.path().join("config.toml"),
        format!("downloads_dir = {:?}\n", dir.to_string_lossy()),
    )
    .unwrap();

    sync_cmd(&temp)
        .arg("--info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total files: 1"));
}
