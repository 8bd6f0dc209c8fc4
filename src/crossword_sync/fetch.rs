//! PDF retrieval from the Guardian's static file server.
//!
//! [`PdfSource`] is the raw transfer primitive; [`HttpSource`] is the production
//! implementation. Retries, the PDF header check and the fallback-date walk live in
//! [`crate::commands::download`], not here.

use crate::error::{Result, SyncError};
use reqwest::blocking::Client;
use std::time::Duration;

const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko)";

/// Magic bytes every PDF starts with.
pub const PDF_MAGIC: &[u8] = b"%PDF-";

pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, first one included. At least 1.
    pub max_attempts: u32,
    pub delay: Duration,
}

pub trait PdfSource {
    /// Fetches the body at `url`. Non-2xx responses are errors.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(SyncError::Http)?;
        Ok(Self { client })
    }
}

impl PdfSource for HttpSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!(url, "GET");
        let response = self.client.get(url).send()?.error_for_status()?;
        let bytes = response.bytes()?;
        tracing::debug!(url, len = bytes.len(), "fetched");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_pdf_header() {
        assert!(is_pdf(b"%PDF-1.7\n%..."));
        assert!(!is_pdf(b"<!DOCTYPE html>"));
        assert!(!is_pdf(b"%PD"));
        assert!(!is_pdf(b""));
    }
}
