use super::ArchiveStore;
use crate::error::Result;
use std::path::Path;

/// One entry of a remote directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub name: String,
    pub is_folder: bool,
    pub size: Option<u64>,
}

impl RemoteEntry {
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            is_folder: false,
            size: Some(size),
        }
    }

    pub fn folder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_folder: true,
            size: None,
        }
    }
}

/// Raw primitives of a cloud notebook account.
///
/// Paths are `/`-separated and relative to the account root
/// (e.g. `Document/puzzles/guardian-quick-20250115.pdf`).
pub trait CloudDrive {
    fn login(&mut self, email: &str, password: &str) -> Result<()>;

    fn list(&self, dir: &str) -> Result<Vec<RemoteEntry>>;

    fn delete(&self, path: &str) -> Result<()>;

    /// Uploads `local` into the `parent` directory under its own file name.
    fn put(&self, local: &Path, parent: &str) -> Result<()>;

    /// Existence check by listing the parent directory.
    fn exists(&self, path: &str) -> Result<bool> {
        let (parent, name) = split_remote(path);
        Ok(self
            .list(parent)?
            .iter()
            .any(|entry| !entry.is_folder && entry.name == name))
    }
}

pub fn join_remote(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Splits `a/b/c.pdf` into (`a/b`, `c.pdf`). A bare name has an empty parent.
pub fn split_remote(path: &str) -> (&str, &str) {
    match path.trim_end_matches('/').rsplit_once('/') {
        Some((parent, name)) => (parent, name),
        None => ("", path),
    }
}

/// A directory on a [`CloudDrive`], seen as an [`ArchiveStore`].
pub struct CloudStore<'a, D: CloudDrive + ?Sized> {
    drive: &'a D,
    dir: String,
}

impl<'a, D: CloudDrive + ?Sized> CloudStore<'a, D> {
    pub fn new(drive: &'a D, dir: impl Into<String>) -> Self {
        Self {
            drive,
            dir: dir.into(),
        }
    }
}

impl<D: CloudDrive + ?Sized> ArchiveStore for CloudStore<'_, D> {
    fn label(&self) -> &str {
        "cloud"
    }

    fn list_names(&self) -> Result<Vec<String>> {
        Ok(self
            .drive
            .list(&self.dir)?
            .into_iter()
            .filter(|entry| !entry.is_folder)
            .map(|entry| entry.name)
            .collect())
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        let path = join_remote(&self.dir, name);
        tracing::info!(path = %path, "deleting remote file");
        self.drive.delete(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemDrive;

    #[test]
    fn joins_and_splits_paths() {
        assert_eq!(join_remote("Document/puzzles/", "a.pdf"), "Document/puzzles/a.pdf");
        assert_eq!(join_remote("", "a.pdf"), "a.pdf");
        assert_eq!(split_remote("Document/puzzles/a.pdf"), ("Document/puzzles", "a.pdf"));
        assert_eq!(split_remote("a.pdf"), ("", "a.pdf"));
    }

    #[test]
    fn cloud_store_lists_files_not_folders() {
        let drive = MemDrive::new();
        drive.add_file("Document/puzzles", "guardian-quick-20250115.pdf", 10);
        drive.add_file("Document/puzzles", "notes.note", 10);
        drive.add_folder("Document/puzzles", "old");

        let store = CloudStore::new(&drive, "Document/puzzles");
        assert_eq!(
            store.list_names().unwrap(),
            vec!["guardian-quick-20250115.pdf", "notes.note"]
        );
    }

    #[test]
    fn cloud_store_deletes_by_full_path() {
        let drive = MemDrive::new();
        drive.add_file("Document/puzzles", "guardian-quick-20250115.pdf", 10);

        let mut store = CloudStore::new(&drive, "Document/puzzles");
        store.delete("guardian-quick-20250115.pdf").unwrap();
        assert!(!drive
            .exists("Document/puzzles/guardian-quick-20250115.pdf")
            .unwrap());
    }

    #[test]
    fn exists_ignores_folders_with_same_name() {
        let drive = MemDrive::new();
        drive.add_folder("Document", "puzzles");
        assert!(!drive.exists("Document/puzzles").unwrap());
    }
}
