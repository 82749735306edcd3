//! Word list sources.
//!
//! A [`WordSource`] knows how to produce the word list file at a given path.
//! The sampler only calls it on a cache miss, i.e. when nothing exists at the
//! destination yet.
//!
//! - [`HttpSource`] downloads the list with a single GET and streams the body
//!   to disk.
//! - [`MockSource`] writes fixed content and records how often it was asked,
//!   for tests and offline use.

mod http;
pub mod mock;

pub use http::HttpSource;
pub use mock::MockSource;

use async_trait::async_trait;
use std::path::Path;

/// Something that can populate the word list file on disk.
#[async_trait]
pub trait WordSource: Send + Sync + std::fmt::Debug {
    /// Short identifier used in logs
    fn id(&self) -> &str;

    /// Write the word list to `destination`, returning the number of bytes
    /// written.
    async fn fetch(&self, destination: &Path) -> Result<u64, SourceError>;
}

/// Errors that can occur while fetching a word list
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The configured URL cannot be fetched
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Writing the downloaded body failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}
