//! Philo-Walk: degrees of separation to Wikipedia's "Philosophy"
//!
//! This crate follows the first real link of a Wikipedia article, over and over,
//! until it lands on the target article, runs out of links, or gives up. Batches of
//! walks are run over sampled articles and the resulting degree distributions are
//! exported for analysis.

pub mod config;
pub mod output;
pub mod sample;
pub mod state;
pub mod walk;

use thiserror::Error;

/// Main error type for Philo-Walk operations
#[derive(Debug, Error)]
pub enum PhiloError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] walk::FetchError),

    #[error("Sampling error: {0}")]
    Sample(#[from] sample::SampleError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Philo-Walk operations
pub type Result<T> = std::result::Result<T, PhiloError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use state::{OutcomeReason, TraversalOutcome, VisitedSet};
pub use walk::{select_first_link, Document, DocumentFetcher, TraversalEngine};
