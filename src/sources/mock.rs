//! Mock source for testing purposes.

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::sources::{SourceError, WordSource};

/// A mock source that writes predefined content and counts fetches.
#[derive(Debug, Default)]
pub struct MockSource {
    content: Mutex<Vec<u8>>,
    failure: Mutex<Option<String>>,
    fetches: AtomicUsize,
}

impl MockSource {
    /// Create a mock source that writes `content` on every fetch.
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: Mutex::new(content.into()),
            failure: Mutex::new(None),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Create a mock source whose fetches always fail with a network error.
    pub fn failing(message: impl Into<String>) -> Self {
        let source = Self::default();
        source.set_failure(Some(message.into()));
        source
    }

    /// Replace the content written by later fetches.
    pub fn set_content(&self, content: impl Into<Vec<u8>>) {
        let mut guard = self.content.lock().unwrap();
        *guard = content.into();
    }

    /// Make later fetches fail (`Some`) or succeed again (`None`).
    pub fn set_failure(&self, message: Option<String>) {
        let mut guard = self.failure.lock().unwrap();
        *guard = message;
    }

    /// Number of times `fetch` has been called.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WordSource for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, destination: &Path) -> Result<u64, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let failure = self.failure.lock().unwrap().clone();
        if let Some(message) = failure {
            return Err(SourceError::Network(message));
        }

        let content = self.content.lock().unwrap().clone();
        tokio::fs::write(destination, &content).await?;
        Ok(content.len() as u64)
    }
}
