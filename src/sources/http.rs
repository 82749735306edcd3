//! Word list download over HTTP(S).

use async_trait::async_trait;
use futures_util::StreamExt;
use std::path::Path;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::sources::{SourceError, WordSource};
use crate::utils::HttpClient;

/// Fetches the word list with a single GET request.
///
/// The response body is streamed to the destination chunk by chunk, so the
/// list is never held in memory as a whole. Failed transfers are not retried.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Arc<HttpClient>,
    url: String,
}

impl HttpSource {
    /// Create a source for `url` with a default client
    pub fn new(url: impl Into<String>) -> Result<Self, SourceError> {
        Ok(Self {
            client: Arc::new(HttpClient::new()?),
            url: url.into(),
        })
    }

    /// Create with a custom HTTP client
    pub fn with_client(client: Arc<HttpClient>, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// The URL this source downloads from
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn stream_to_file(
        response: reqwest::Response,
        destination: &Path,
    ) -> Result<u64, SourceError> {
        let mut file = File::create(destination).await?;
        let mut stream = response.bytes_stream();
        let mut written = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk
                .map_err(|e| SourceError::Network(format!("Failed to read response: {}", e)))?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }

        file.flush().await?;
        Ok(written)
    }
}

#[async_trait]
impl WordSource for HttpSource {
    fn id(&self) -> &str {
        "http"
    }

    async fn fetch(&self, destination: &Path) -> Result<u64, SourceError> {
        let parsed =
            url::Url::parse(&self.url).map_err(|e| SourceError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SourceError::InvalidUrl(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }

        tracing::info!("Downloading word list from {}", self.url);

        let response = self
            .client
            .client()
            .get(parsed)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to fetch {}: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: self.url.clone(),
                status,
            });
        }

        match Self::stream_to_file(response, destination).await {
            Ok(bytes) => {
                tracing::info!("Saved {} bytes to {}", bytes, destination.display());
                Ok(bytes)
            }
            Err(e) => {
                // A truncated list would otherwise be picked up as a cache hit next time
                if let Err(remove_err) = tokio::fs::remove_file(destination).await {
                    tracing::warn!(
                        "Failed to remove partial download {}: {}",
                        destination.display(),
                        remove_err
                    );
                }
                Err(e)
            }
        }
    }
}
