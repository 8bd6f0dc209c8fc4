use super::ArchiveStore;
use crate::error::{Result, SyncError};
use crate::fetch::{is_pdf, PDF_MAGIC};
use crate::naming;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(SyncError::Io)?;
        }
        Ok(())
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_of(name).is_file()
    }

    /// Checks the first bytes of a stored file for the PDF header.
    pub fn is_valid_pdf(&self, name: &str) -> bool {
        let mut header = [0u8; 8];
        let Ok(mut file) = fs::File::open(self.path_of(name)) else {
            return false;
        };
        let mut filled = 0;
        while filled < PDF_MAGIC.len() {
            match file.read(&mut header[filled..]) {
                Ok(0) | Err(_) => break,
                Ok(n) => filled += n,
            }
        }
        is_pdf(&header[..filled])
    }

    /// Writes `bytes` under `name` via a temporary file and a rename.
    pub fn write_atomic(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        self.ensure_dir()?;
        let target = self.path_of(name);
        let tmp = self.root.join(format!(".{}.tmp", name));
        if let Err(e) = fs::write(&tmp, bytes).and_then(|()| fs::rename(&tmp, &target)) {
            let _ = fs::remove_file(&tmp);
            return Err(SyncError::Io(e));
        }
        Ok(target)
    }
}

impl ArchiveStore for LocalStore {
    fn label(&self) -> &str {
        "local"
    }

    fn list_names(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(SyncError::Io)? {
            let entry = entry.map_err(SyncError::Io)?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                if naming::is_archive_name(name) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn size_of(&self, name: &str) -> Option<u64> {
        fs::metadata(self.path_of(name)).ok().map(|m| m.len())
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        fs::remove_file(self.path_of(name)).map_err(SyncError::Io)
    }
}
