use super::cloud::{join_remote, split_remote, CloudDrive, RemoteEntry};
use super::ArchiveStore;
use crate::error::{Result, SyncError};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// In-memory store for testing.
///
/// Keeps listing order as inserted. Individual deletes, or the whole listing, can be
/// made to fail to exercise per-item error handling.
#[derive(Debug, Default)]
pub struct MemStore {
    label: String,
    files: Vec<(String, u64)>,
    failing_deletes: HashSet<String>,
    fail_listing: bool,
    delete_calls: usize,
}

impl MemStore {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            ..Default::default()
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, size: u64) {
        self.files.push((name.into(), size));
    }

    pub fn fail_delete_of(&mut self, name: &str) {
        self.failing_deletes.insert(name.to_string());
    }

    pub fn set_fail_listing(&mut self, fail: bool) {
        self.fail_listing = fail;
    }

    pub fn names(&self) -> Vec<String> {
        self.files.iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls
    }
}

impl ArchiveStore for MemStore {
    fn label(&self) -> &str {
        &self.label
    }

    fn list_names(&self) -> Result<Vec<String>> {
        if self.fail_listing {
            return Err(SyncError::Cloud("Simulated listing error".to_string()));
        }
        Ok(self.names())
    }

    fn size_of(&self, name: &str) -> Option<u64> {
        self.files.iter().find(|(n, _)| n == name).map(|(_, s)| *s)
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        self.delete_calls += 1;
        if self.failing_deletes.contains(name) {
            return Err(SyncError::Cloud(format!("Simulated delete error: {}", name)));
        }
        let before = self.files.len();
        self.files.retain(|(n, _)| n != name);
        if self.files.len() == before {
            return Err(SyncError::Cloud(format!("No such file: {}", name)));
        }
        Ok(())
    }
}

/// In-memory [`CloudDrive`] for testing.
///
/// Uses `RefCell` since the drive is single-threaded and the trait takes `&self`
/// for everything but login. With an account configured, every call before a
/// successful login fails like an expired session would.
#[derive(Debug, Default)]
pub struct MemDrive {
    dirs: RefCell<HashMap<String, Vec<RemoteEntry>>>,
    account: Option<(String, String)>,
    logged_in: bool,
    failing_paths: RefCell<HashSet<String>>,
    uploads: RefCell<Vec<String>>,
}

impl MemDrive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(email: &str, password: &str) -> Self {
        Self {
            account: Some((email.to_string(), password.to_string())),
            ..Default::default()
        }
    }

    pub fn add_file(&self, dir: &str, name: &str, size: u64) {
        self.dirs
            .borrow_mut()
            .entry(dir.to_string())
            .or_default()
            .push(RemoteEntry::file(name, size));
    }

    pub fn add_folder(&self, dir: &str, name: &str) {
        let mut dirs = self.dirs.borrow_mut();
        dirs.entry(dir.to_string())
            .or_default()
            .push(RemoteEntry::folder(name));
        dirs.entry(join_remote(dir, name)).or_default();
    }

    /// Makes delete and put fail for this full path.
    pub fn fail_path(&self, path: &str) {
        self.failing_paths.borrow_mut().insert(path.to_string());
    }

    pub fn file_names(&self, dir: &str) -> Vec<String> {
        self.dirs
            .borrow()
            .get(dir)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| !e.is_folder)
                    .map(|e| e.name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn uploads(&self) -> Vec<String> {
        self.uploads.borrow().clone()
    }

    fn check_session(&self) -> Result<()> {
        if self.account.is_some() && !self.logged_in {
            return Err(SyncError::Auth("not logged in".to_string()));
        }
        Ok(())
    }

    fn check_path(&self, path: &str) -> Result<()> {
        if self.failing_paths.borrow().contains(path) {
            return Err(SyncError::Cloud(format!("Simulated error: {}", path)));
        }
        Ok(())
    }
}

impl CloudDrive for MemDrive {
    fn login(&mut self, email: &str, password: &str) -> Result<()> {
        match &self.account {
            Some((e, p)) if e == email && p == password => {
                self.logged_in = true;
                Ok(())
            }
            Some(_) => Err(SyncError::Auth("wrong email or password".to_string())),
            None => {
                self.logged_in = true;
                Ok(())
            }
        }
    }

    fn list(&self, dir: &str) -> Result<Vec<RemoteEntry>> {
        self.check_session()?;
        self.dirs
            .borrow()
            .get(dir.trim_end_matches('/'))
            .cloned()
            .ok_or_else(|| SyncError::Cloud(format!("No such directory: {}", dir)))
    }

    fn delete(&self, path: &str) -> Result<()> {
        self.check_session()?;
        self.check_path(path)?;
        let (parent, name) = split_remote(path);
        let mut dirs = self.dirs.borrow_mut();
        let entries = dirs
            .get_mut(parent)
            .ok_or_else(|| SyncError::Cloud(format!("No such directory: {}", parent)))?;
        let before = entries.len();
        entries.retain(|e| e.is_folder || e.name != name);
        if entries.len() == before {
            return Err(SyncError::Cloud(format!("No such file: {}", path)));
        }
        Ok(())
    }

    fn put(&self, local: &Path, parent: &str) -> Result<()> {
        self.check_session()?;
        let name = local
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| SyncError::Cloud(format!("Bad local path: {}", local.display())))?;
        let path = join_remote(parent, name);
        self.check_path(&path)?;
        let size = fs::metadata(local).map_err(SyncError::Io)?.len();
        self.add_file(parent.trim_end_matches('/'), name, size);
        self.uploads.borrow_mut().push(path);
        Ok(())
    }
}
