//! # wordpick
//!
//! Pick a random word from a newline-delimited word list that is downloaded
//! on first use and cached on disk.
//!
//! ## Architecture
//!
//! - [`lines`]: streaming line counting and single-line extraction
//! - [`sampler`]: rejection sampling of a random line with a length constraint
//! - [`sources`]: where the word list comes from (HTTP download, mock)
//! - [`utils`]: HTTP client and the cached word list file
//! - [`config`]: sampling options, defaults and configuration files
//!
//! ```rust,no_run
//! use wordpick::{get_random_word, SamplerOptions};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let word = get_random_word(Some(SamplerOptions::new().min_length(6).keep_file(true))).await?;
//! println!("{}", word);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod lines;
pub mod sampler;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use config::{SamplerConfig, SamplerOptions};
pub use sampler::{get_random_word, SampleError, SampleOutcome, WordSampler};
pub use sources::{SourceError, WordSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
