//! On-disk cache for the downloaded word list.
//!
//! The cache is a single file. Its presence is the only thing checked: an
//! existing file is trusted as-is regardless of age or content. There is no
//! locking, so concurrent users must not share a path.

use std::io;
use std::path::{Path, PathBuf};

use crate::sampler::SampleError;
use crate::sources::WordSource;

/// Result of making sure the word list is on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// The file already existed and was used as-is
    Hit,

    /// The file was fetched; holds the number of bytes written
    Populated(u64),
}

impl CacheStatus {
    pub fn is_hit(&self) -> bool {
        matches!(self, CacheStatus::Hit)
    }
}

/// The cached word list file at a fixed path
#[derive(Debug, Clone)]
pub struct WordListCache {
    path: PathBuf,
}

impl WordListCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the cached file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a file is already present at the cache path
    pub async fn exists(&self) -> io::Result<bool> {
        tokio::fs::try_exists(&self.path).await
    }

    /// Fetch the word list from `source` unless it is already cached.
    ///
    /// A failing existence check is a local I/O error; only the fetch itself
    /// reports download errors.
    pub async fn ensure(&self, source: &dyn WordSource) -> Result<CacheStatus, SampleError> {
        if self.exists().await.map_err(SampleError::Io)? {
            tracing::debug!("Cache hit: {}", self.path.display());
            return Ok(CacheStatus::Hit);
        }

        tracing::debug!(
            "Cache miss: {}, fetching from {}",
            self.path.display(),
            source.id()
        );
        let bytes = source.fetch(&self.path).await?;
        Ok(CacheStatus::Populated(bytes))
    }

    /// Delete the cached file
    pub async fn evict(&self) -> io::Result<()> {
        tokio::fs::remove_file(&self.path).await?;
        tracing::info!("Removed cached word list {}", self.path.display());
        Ok(())
    }
}
