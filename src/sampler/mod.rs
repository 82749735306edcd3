//! Random word selection over a cached word list.
//!
//! [`WordSampler`] ties the pieces together for one call:
//!
//! 1. make sure the word list is on disk, fetching it on a cache miss
//! 2. count its lines once
//! 3. draw a uniformly random line number and extract that line, repeating
//!    until the line is at least `min_length` characters long or the attempt
//!    budget runs out
//! 4. delete the cached file unless `keep_file` is set
//!
//! Running out of attempts is not an error: the result is then an empty word.
//! Every phase reopens the file, and nothing is shared between calls except the
//! file itself, so two calls must not use the same destination concurrently.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::Arc;

use crate::config::{SamplerConfig, SamplerOptions};
use crate::lines::{count_lines, extract_line};
use crate::sources::{HttpSource, SourceError, WordSource};
use crate::utils::WordListCache;

/// Errors that abort a sampling call
#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    /// The word list could not be downloaded
    #[error("Download failed: {0}")]
    Download(#[from] SourceError),

    /// Reading or deleting the cached word list failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Details of a finished sampling call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleOutcome {
    /// The selected word, empty if no line was long enough
    pub word: String,

    /// Number of lines extracted
    pub attempts: usize,

    /// Line count of the word list
    pub total_lines: usize,

    /// Whether the word list was already on disk
    pub cache_hit: bool,
}

/// Picks random words from a word list provided by a [`WordSource`].
#[derive(Debug, Clone)]
pub struct WordSampler {
    config: SamplerConfig,
    source: Arc<dyn WordSource>,
}

impl WordSampler {
    /// Create a sampler that downloads from `config.file_url` on a cache miss
    pub fn new(config: SamplerConfig) -> Result<Self, SourceError> {
        let source = HttpSource::new(config.file_url.clone())?;
        Ok(Self::with_source(config, Arc::new(source)))
    }

    /// Create a sampler with a custom source
    pub fn with_source(config: SamplerConfig, source: Arc<dyn WordSource>) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Pick a random word
    pub async fn sample(&self) -> Result<String, SampleError> {
        Ok(self.sample_detailed().await?.word)
    }

    /// Pick a random word, reporting attempts and cache use
    pub async fn sample_detailed(&self) -> Result<SampleOutcome, SampleError> {
        let mut rng = StdRng::from_entropy();
        self.sample_with_rng(&mut rng).await
    }

    /// Pick a random word using the given random number generator
    pub async fn sample_with_rng<R>(&self, rng: &mut R) -> Result<SampleOutcome, SampleError>
    where
        R: Rng + Send,
    {
        let cache = WordListCache::new(&self.config.destination_path);
        let status = cache.ensure(self.source.as_ref()).await?;

        let path = cache.path();
        let total_lines = count_lines(path).await?;

        let mut word = String::new();
        let mut attempts = 0;

        while attempts < self.config.max_attempts {
            attempts += 1;
            let line = rng.gen_range(1..=total_lines);
            let candidate = extract_line(path, line).await?;

            if candidate.chars().count() >= self.config.min_length {
                tracing::debug!("Accepted line {} after {} attempts", line, attempts);
                word = candidate;
                break;
            }

            tracing::trace!("Rejected line {} ({:?})", line, candidate);
        }

        if word.is_empty() && self.config.min_length > 0 {
            tracing::warn!(
                "No word of at least {} characters found in {} attempts",
                self.config.min_length,
                attempts
            );
        }

        if !self.config.keep_file {
            cache.evict().await?;
        }

        Ok(SampleOutcome {
            word,
            attempts,
            total_lines,
            cache_hit: status.is_hit(),
        })
    }
}

/// Pick a random word, resolving `options` against the defaults.
///
/// Downloads the word list from the configured URL if it is not cached yet.
/// Returns an empty string if no line of at least `min_length` characters was
/// drawn within the attempt budget.
pub async fn get_random_word(options: Option<SamplerOptions>) -> Result<String, SampleError> {
    let config = options.unwrap_or_default().resolve();
    WordSampler::new(config)?.sample().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::MockSource;
    use tempfile::tempdir;

    const ANIMALS: &str = "ant\nbee\nox\nhippopotamus\n";

    fn sampler_for(
        dir: &tempfile::TempDir,
        options: SamplerOptions,
        source: Arc<MockSource>,
    ) -> WordSampler {
        let config = options
            .destination_path(dir.path().join("words.txt"))
            .resolve();
        WordSampler::with_source(config, source)
    }

    #[tokio::test]
    async fn test_only_long_word_is_accepted() {
        let dir = tempdir().unwrap();
        let source = Arc::new(MockSource::new(ANIMALS));
        let sampler = sampler_for(&dir, SamplerOptions::new().min_length(4), source);
        let mut rng = StdRng::seed_from_u64(7);

        // One line in five qualifies, so a miss over 100 draws is practically impossible
        for _ in 0..20 {
            let outcome = sampler.sample_with_rng(&mut rng).await.unwrap();
            assert_eq!(outcome.word, "hippopotamus");
            assert_eq!(outcome.total_lines, 5);
            assert!(outcome.attempts >= 1 && outcome.attempts <= 100);
        }
    }

    #[tokio::test]
    async fn test_trailing_empty_line_is_rejected() {
        let dir = tempdir().unwrap();
        // Two lines: "hippopotamus" and the empty line after the trailing newline
        let source = Arc::new(MockSource::new("hippopotamus\n"));
        let sampler = sampler_for(&dir, SamplerOptions::new().min_length(4), source);

        let mut saw_rejection = false;
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let outcome = sampler.sample_with_rng(&mut rng).await.unwrap();

            assert_eq!(outcome.total_lines, 2);
            assert_eq!(outcome.word, "hippopotamus");
            // Any extra attempt means the empty line was drawn and discarded
            saw_rejection |= outcome.attempts > 1;
        }
        assert!(saw_rejection);
    }

    #[tokio::test]
    async fn test_cache_check_failure_is_io_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "plain file").unwrap();

        let source = Arc::new(MockSource::new(ANIMALS));
        let config = SamplerOptions::new()
            .destination_path(blocker.join("words.txt"))
            .resolve();
        let sampler = WordSampler::with_source(config, source.clone());

        let err = sampler.sample().await.unwrap_err();
        assert!(matches!(err, SampleError::Io(_)));
        assert_eq!(source.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_zero_min_length_accepts_first_draw() {
        let dir = tempdir().unwrap();
        let source = Arc::new(MockSource::new(ANIMALS));
        let sampler = sampler_for(&dir, SamplerOptions::new().min_length(0), source);

        let outcome = sampler.sample_detailed().await.unwrap();
        assert_eq!(outcome.attempts, 1);
        assert!(["ant", "bee", "ox", "hippopotamus", ""].contains(&outcome.word.as_str()));
    }

    #[tokio::test]
    async fn test_budget_exhausted_returns_empty() {
        let dir = tempdir().unwrap();
        let source = Arc::new(MockSource::new("a\nbb\nccc"));
        let sampler = sampler_for(&dir, SamplerOptions::new().min_length(10), source);

        let outcome = sampler.sample_detailed().await.unwrap();
        assert_eq!(outcome.word, "");
        assert_eq!(outcome.attempts, 100);
        assert!(!dir.path().join("words.txt").exists());
    }

    #[tokio::test]
    async fn test_custom_attempt_budget() {
        let dir = tempdir().unwrap();
        let source = Arc::new(MockSource::new("a\nbb"));
        let sampler = sampler_for(
            &dir,
            SamplerOptions::new().min_length(5).max_attempts(7),
            source,
        );

        let outcome = sampler.sample_detailed().await.unwrap();
        assert_eq!(outcome.attempts, 7);
        assert_eq!(outcome.word, "");
    }

    #[tokio::test]
    async fn test_zero_attempts_never_extracts() {
        let dir = tempdir().unwrap();
        let source = Arc::new(MockSource::new("hello"));
        let sampler = sampler_for(&dir, SamplerOptions::new().max_attempts(0), source);

        let outcome = sampler.sample_detailed().await.unwrap();
        assert_eq!(outcome.attempts, 0);
        assert_eq!(outcome.word, "");
    }

    #[tokio::test]
    async fn test_single_word_file() {
        let dir = tempdir().unwrap();
        let source = Arc::new(MockSource::new("elephant"));
        let sampler = sampler_for(&dir, SamplerOptions::new(), source);

        assert_eq!(sampler.sample().await.unwrap(), "elephant");
    }

    #[tokio::test]
    async fn test_length_counts_characters() {
        let dir = tempdir().unwrap();
        // "été" is three characters but five bytes
        let source = Arc::new(MockSource::new("été"));
        let sampler = sampler_for(&dir, SamplerOptions::new().min_length(4), source);

        assert_eq!(sampler.sample().await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_keep_file_skips_refetch() {
        let dir = tempdir().unwrap();
        let source = Arc::new(MockSource::new(ANIMALS));
        let sampler = sampler_for(
            &dir,
            SamplerOptions::new().keep_file(true),
            Arc::clone(&source),
        );

        let first = sampler.sample_detailed().await.unwrap();
        assert!(!first.cache_hit);
        assert!(dir.path().join("words.txt").exists());

        let second = sampler.sample_detailed().await.unwrap();
        assert!(second.cache_hit);
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_file_removed_without_keep() {
        let dir = tempdir().unwrap();
        let source = Arc::new(MockSource::new(ANIMALS));
        let sampler = sampler_for(&dir, SamplerOptions::new(), Arc::clone(&source));

        sampler.sample().await.unwrap();
        assert!(!dir.path().join("words.txt").exists());

        sampler.sample().await.unwrap();
        assert_eq!(source.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_download_error_aborts() {
        let dir = tempdir().unwrap();
        let source = Arc::new(MockSource::failing("connection refused"));
        let sampler = sampler_for(&dir, SamplerOptions::new(), source);

        let err = sampler.sample().await.unwrap_err();
        assert!(matches!(err, SampleError::Download(SourceError::Network(_))));
    }

    #[tokio::test]
    async fn test_empty_file_yields_empty_word() {
        let dir = tempdir().unwrap();
        let source = Arc::new(MockSource::new(""));
        let sampler = sampler_for(&dir, SamplerOptions::new().min_length(0), source);

        let outcome = sampler.sample_detailed().await.unwrap();
        assert_eq!(outcome.total_lines, 1);
        assert_eq!(outcome.word, "");
        assert_eq!(outcome.attempts, 1);
    }
}
