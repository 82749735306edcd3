use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wordpick::config::{default_config_path, find_config_file, load_config, Config, LoggingConfig};
use wordpick::lines::{count_lines, extract_line};
use wordpick::sources::HttpSource;
use wordpick::utils::HttpClient;
use wordpick::{SamplerOptions, WordSampler};

/// wordpick - print a random word from a remote word list
#[derive(Parser, Debug)]
#[command(name = "wordpick")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Print a random word from a remote newline-delimited word list", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress everything but errors
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Plain)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    pick: PickArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Just the value
    Plain,
    /// JSON object (machine-readable)
    Json,
}

/// Options for picking a word. Unset flags fall back to the config file, then
/// to the built-in defaults.
#[derive(Args, Debug, Default)]
struct PickArgs {
    /// Minimum word length in characters (0 accepts any line)
    #[arg(long, short = 'm')]
    min_length: Option<usize>,

    /// URL of the word list
    #[arg(long, short = 'u')]
    url: Option<String>,

    /// Where to cache the word list
    #[arg(long, short = 'd')]
    destination: Option<PathBuf>,

    /// Keep the word list on disk for later runs
    #[arg(long, short = 'k')]
    keep: bool,

    /// Delete the word list after picking, even if the config file keeps it
    #[arg(long, conflicts_with = "keep")]
    no_keep: bool,

    /// Number of draws before giving up
    #[arg(long)]
    max_attempts: Option<usize>,
}

impl PickArgs {
    fn to_options(&self) -> SamplerOptions {
        SamplerOptions {
            min_length: self.min_length,
            file_url: self.url.clone(),
            destination_path: self.destination.clone(),
            keep_file: match (self.keep, self.no_keep) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
            max_attempts: self.max_attempts,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pick a random word (the default when no command is given)
    #[command(alias = "p")]
    Pick,

    /// Count the lines of a local word list
    #[command(alias = "c")]
    Count {
        /// Path to the word list
        path: PathBuf,
    },

    /// Print one line (1-based) of a local word list
    #[command(alias = "l")]
    Line {
        /// Path to the word list
        path: PathBuf,

        /// Line number, starting at 1
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        number: u64,
    },

    /// Write a configuration file with every option at its default
    InitConfig {
        /// Where to write the file (default: user config directory)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(cli: &Cli, logging: &LoggingConfig) {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => logging.level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("wordpick={}", level)),
    );
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries only the result
    if logging.format.as_deref() == Some("json") {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(find_config_file);
    let config = load_config(config_path.as_deref()).with_context(|| match &config_path {
        Some(path) => format!("Failed to load config {}", path.display()),
        None => "Failed to load configuration from the environment".to_string(),
    })?;

    init_tracing(&cli, &config.logging);

    match &cli.command {
        None | Some(Commands::Pick) => pick(&cli, &config).await,
        Some(Commands::Count { path }) => {
            let total = count_lines(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            match cli.output {
                OutputFormat::Plain => println!("{}", total),
                OutputFormat::Json => {
                    println!("{}", serde_json::json!({ "path": path, "lines": total }))
                }
            }
            Ok(())
        }
        Some(Commands::Line { path, number }) => {
            let number = usize::try_from(*number).context("Line number out of range")?;
            let line = extract_line(path, number)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            match cli.output {
                OutputFormat::Plain => println!("{}", line),
                OutputFormat::Json => {
                    println!("{}", serde_json::json!({ "line": number, "text": line }))
                }
            }
            Ok(())
        }
        Some(Commands::InitConfig { path, force }) => {
            let path = path.clone().unwrap_or_else(default_config_path);
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            Config::starter().save_toml(&path)?;
            eprintln!("Wrote {}", path.display());
            Ok(())
        }
    }
}

async fn pick(cli: &Cli, config: &Config) -> Result<()> {
    let sampler_config = config
        .sampler
        .clone()
        .merge(cli.pick.to_options())
        .resolve();
    sampler_config.validate()?;

    tracing::debug!("Sampling with {:?}", sampler_config);

    let client = HttpClient::from_config(&config.http).context("Failed to create HTTP client")?;
    let source = HttpSource::with_client(Arc::new(client), sampler_config.file_url.clone());
    let sampler = WordSampler::with_source(sampler_config, Arc::new(source));

    let outcome = sampler.sample_detailed().await?;

    match cli.output {
        OutputFormat::Plain => {
            if !outcome.word.is_empty() {
                println!("{}", outcome.word);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(&outcome)?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_pick_flags_map_to_options() {
        let cli = Cli::parse_from(["wordpick", "-m", "6", "--keep", "--max-attempts", "10"]);
        let options = cli.pick.to_options();

        assert_eq!(options.min_length, Some(6));
        assert_eq!(options.keep_file, Some(true));
        assert_eq!(options.max_attempts, Some(10));
        assert_eq!(options.file_url, None);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_unset_keep_leaves_config_value() {
        let cli = Cli::parse_from(["wordpick"]);
        let file = SamplerOptions::new().keep_file(true);

        let merged = file.merge(cli.pick.to_options());
        assert_eq!(merged.keep_file, Some(true));
    }

    #[test]
    fn test_no_keep_overrides_config_value() {
        let cli = Cli::parse_from(["wordpick", "--no-keep"]);
        let file = SamplerOptions::new().keep_file(true);

        let merged = file.merge(cli.pick.to_options());
        assert_eq!(merged.keep_file, Some(false));
    }

    #[test]
    fn test_keep_conflicts_with_no_keep() {
        assert!(Cli::try_parse_from(["wordpick", "--keep", "--no-keep"]).is_err());
    }

    #[test]
    fn test_line_rejects_zero() {
        assert!(Cli::try_parse_from(["wordpick", "line", "words.txt", "0"]).is_err());
    }

    #[test]
    fn test_count_subcommand() {
        let cli = Cli::parse_from(["wordpick", "--output", "json", "count", "words.txt"]);
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(matches!(cli.command, Some(Commands::Count { .. })));
    }
}
