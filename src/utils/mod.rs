//! Utility modules supporting word sampling.
//!
//! - [`HttpClient`]: shared reqwest client configured from [`crate::config::HttpConfig`]
//! - [`WordListCache`]: the cached word list file (hit detection, population, eviction)
//!
//! # Cache
//!
//! ```rust,no_run
//! use wordpick::sources::HttpSource;
//! use wordpick::utils::WordListCache;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cache = WordListCache::new("/tmp/words.txt");
//! let source = HttpSource::new("https://example.com/words.txt")?;
//! let status = cache.ensure(&source).await?;
//! println!("cache hit: {}", status.is_hit());
//! # Ok(())
//! # }
//! ```

mod cache;
mod http;

pub use cache::{CacheStatus, WordListCache};
pub use http::HttpClient;
