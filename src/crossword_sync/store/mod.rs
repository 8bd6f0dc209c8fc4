//! # Storage Layer
//!
//! The retention engine needs only three things from a store: a listing of names,
//! an optional size hint for display, and a delete. [`ArchiveStore`] is that
//! capability, so the same cleanup pass runs against every backend.
//!
//! ## Implementations
//!
//! - [`local::LocalStore`]: the downloads directory. Lists `guardian-*.pdf` only.
//! - [`cloud::CloudStore`]: a directory on a [`cloud::CloudDrive`]. Lists every file
//!   in the directory, foreign ones included.
//! - [`memory::MemStore`]: in-memory store for tests, with failure injection.
//!
//! The cloud side is split in two: [`cloud::CloudDrive`] holds the raw remote
//! primitives (login, list, delete, put) and [`supernote::SupernoteDrive`] implements
//! them over HTTP.

use crate::error::Result;

pub mod cloud;
pub mod local;
pub mod memory;
pub mod supernote;

pub trait ArchiveStore {
    /// Short label used in messages, e.g. "local" or "cloud".
    fn label(&self) -> &str;

    /// Names currently in the store. Re-read on every call; never cached.
    fn list_names(&self) -> Result<Vec<String>>;

    /// Size in bytes, when the backend can tell cheaply.
    fn size_of(&self, _name: &str) -> Option<u64> {
        None
    }

    fn delete(&mut self, name: &str) -> Result<()>;
}
