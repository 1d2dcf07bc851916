//! Configuration management for litscout
//!
//! Settings load from environment variables with constant defaults. Component
//! configs ([`RetrievalConfig`], [`ExtractionConfig`]) are derived from the loaded
//! values so the CLI and the library agree on limits.
//!
//! # Environment Variables
//!
//! ## Litscout Configuration
//! - `LITSCOUT_PROVIDER`: Extraction provider (openai|claude|gemini|ollama|groq|grok) - default: "openai"
//! - `LITSCOUT_MODEL`: Model name - default: "gpt-4o-mini"
//! - `LITSCOUT_REQUEST_TIMEOUT`: Timeout for every outbound call in seconds - default: "30"
//! - `SEMANTIC_SCHOLAR_API_KEY`: Optional Semantic Scholar key
//! - `LITSCOUT_SEMANTIC_SCHOLAR_URL`, `LITSCOUT_ARXIV_URL`: Search endpoint overrides
//! - `LITSCOUT_MAX_PAPERS_PER_TECHNIQUE`: default "5"
//! - `LITSCOUT_MAX_PAPERS`: default "15"
//! - `LITSCOUT_PAPER_MIN_YEAR`: default "2022"
//! - `LITSCOUT_MAX_INSIGHT_PAPERS`: default "10"
//! - `LITSCOUT_MAX_IN_FLIGHT`: Concurrent extraction requests - default: "4"
//! - `LITSCOUT_LOG_LEVEL`: Logging level - default: "info"
//!
//! ## GenAI Provider Configuration
//! Credentials are read by the genai library:
//! - **OpenAI**: `OPENAI_API_KEY`
//! - **Claude**: `ANTHROPIC_API_KEY`
//! - **Gemini**: `GEMINI_API_KEY`
//! - **Groq**: `GROQ_API_KEY`
//! - **Grok**: `XAI_API_KEY`
//! - **Ollama**: `OLLAMA_HOST` (default: http://localhost:11434)
//!
//! # Example
//!
//! ```no_run
//! use litscout::LitscoutConfig;
//!
//! let config = LitscoutConfig::default();
//! config.validate().expect("Invalid configuration");
//! println!("{}", config);
//! ```

use crate::insights::ExtractionConfig;
use crate::literature::{RetrievalConfig, DEFAULT_ARXIV_URL, DEFAULT_SEMANTIC_SCHOLAR_URL};
use genai::adapter::AdapterKind;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_PAPERS_PER_TECHNIQUE: usize = 5;
const DEFAULT_MAX_PAPERS: usize = 15;
const DEFAULT_PAPER_MIN_YEAR: i32 = 2022;
const DEFAULT_MAX_INSIGHT_PAPERS: usize = 10;
const DEFAULT_MAX_IN_FLIGHT: usize = 4;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid provider name
    #[error("Invalid provider: {0}. Valid options: openai, claude, gemini, ollama, groq, grok")]
    InvalidProvider(String),

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

/// Maps a provider name to the genai adapter. `claude` and `grok` are accepted as
/// aliases.
pub fn parse_provider(name: &str) -> Result<AdapterKind, ConfigError> {
    match name.trim().to_lowercase().as_str() {
        "openai" => Ok(AdapterKind::OpenAI),
        "claude" | "anthropic" => Ok(AdapterKind::Anthropic),
        "gemini" => Ok(AdapterKind::Gemini),
        "ollama" => Ok(AdapterKind::Ollama),
        "groq" => Ok(AdapterKind::Groq),
        "grok" | "xai" => Ok(AdapterKind::Xai),
        other => Err(ConfigError::InvalidProvider(other.to_string())),
    }
}

fn env_parsed<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(key, value = %raw, "Ignoring unparsable configuration value");
                default
            }
        },
        Err(_) => default,
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Main configuration structure for litscout
#[derive(Debug, Clone)]
pub struct LitscoutConfig {
    /// Extraction provider (from genai)
    pub provider: AdapterKind,

    /// Model name used for insight extraction
    pub model: String,

    /// Timeout applied to every outbound request, in seconds
    pub request_timeout_secs: u64,

    pub semantic_scholar_api_key: Option<String>,
    pub semantic_scholar_url: String,
    pub arxiv_url: String,

    pub max_papers_per_technique: usize,
    pub max_papers: usize,
    pub paper_min_year: i32,

    /// Papers sent to the extraction model per run
    pub max_insight_papers: usize,

    /// Concurrent extraction requests
    pub max_in_flight: usize,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Skip the extraction model entirely and use fallback insights
    pub offline: bool,
}

impl Default for LitscoutConfig {
    /// Loads `LITSCOUT_*` environment variables, falling back to constant defaults
    /// for anything missing or unparsable.
    fn default() -> Self {
        let provider = match env_nonempty("LITSCOUT_PROVIDER") {
            Some(name) => parse_provider(&name).unwrap_or_else(|e| {
                warn!("{}, using openai", e);
                AdapterKind::OpenAI
            }),
            None => AdapterKind::OpenAI,
        };

        Self {
            provider,
            model: env_nonempty("LITSCOUT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            request_timeout_secs: env_parsed("LITSCOUT_REQUEST_TIMEOUT", DEFAULT_REQUEST_TIMEOUT_SECS),
            semantic_scholar_api_key: env_nonempty("SEMANTIC_SCHOLAR_API_KEY"),
            semantic_scholar_url: env_nonempty("LITSCOUT_SEMANTIC_SCHOLAR_URL")
                .unwrap_or_else(|| DEFAULT_SEMANTIC_SCHOLAR_URL.to_string()),
            arxiv_url: env_nonempty("LITSCOUT_ARXIV_URL")
                .unwrap_or_else(|| DEFAULT_ARXIV_URL.to_string()),
            max_papers_per_technique: env_parsed(
                "LITSCOUT_MAX_PAPERS_PER_TECHNIQUE",
                DEFAULT_MAX_PAPERS_PER_TECHNIQUE,
            ),
            max_papers: env_parsed("LITSCOUT_MAX_PAPERS", DEFAULT_MAX_PAPERS),
            paper_min_year: env_parsed("LITSCOUT_PAPER_MIN_YEAR", DEFAULT_PAPER_MIN_YEAR),
            max_insight_papers: env_parsed("LITSCOUT_MAX_INSIGHT_PAPERS", DEFAULT_MAX_INSIGHT_PAPERS),
            max_in_flight: env_parsed("LITSCOUT_MAX_IN_FLIGHT", DEFAULT_MAX_IN_FLIGHT),
            log_level: env::var("LITSCOUT_LOG_LEVEL")
                .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
                .to_lowercase(),
            offline: false,
        }
    }
}

impl LitscoutConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a limit is out of range or the log level is unknown
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs > 600 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout cannot exceed 10 minutes".to_string(),
            ));
        }

        if self.max_papers_per_technique == 0 || self.max_papers == 0 {
            return Err(ConfigError::ValidationFailed(
                "Paper limits must be at least 1".to_string(),
            ));
        }
        if self.max_in_flight == 0 {
            return Err(ConfigError::ValidationFailed(
                "At least one extraction request must be allowed in flight".to_string(),
            ));
        }

        if !(1900..=2100).contains(&self.paper_min_year) {
            return Err(ConfigError::ParseError {
                field: "LITSCOUT_PAPER_MIN_YEAR".to_string(),
                error: format!("{} is not a plausible publication year", self.paper_min_year),
            });
        }

        for (field, url) in [
            ("semantic_scholar_url", &self.semantic_scholar_url),
            ("arxiv_url", &self.arxiv_url),
        ] {
            if let Err(e) = reqwest::Url::parse(url) {
                return Err(ConfigError::ParseError {
                    field: field.to_string(),
                    error: e.to_string(),
                });
            }
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retrieval_config(&self) -> RetrievalConfig {
        RetrievalConfig::default()
            .with_max_per_technique(self.max_papers_per_technique)
            .with_max_total(self.max_papers)
            .with_min_year(self.paper_min_year)
    }

    pub fn extraction_config(&self) -> ExtractionConfig {
        ExtractionConfig::default()
            .with_max_papers(self.max_insight_papers)
            .with_max_in_flight(self.max_in_flight)
    }
}

impl fmt::Display for LitscoutConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Litscout Configuration:")?;
        writeln!(f, "  Provider: {}", self.provider)?;
        writeln!(f, "  Model: {}", self.model)?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        writeln!(
            f,
            "  Semantic Scholar: {} (api key: {})",
            self.semantic_scholar_url,
            if self.semantic_scholar_api_key.is_some() { "set" } else { "unset" }
        )?;
        writeln!(f, "  arXiv: {}", self.arxiv_url)?;
        writeln!(
            f,
            "  Papers: {} per technique, {} total, since {}",
            self.max_papers_per_technique, self.max_papers, self.paper_min_year
        )?;
        writeln!(
            f,
            "  Extraction: {} papers, {} in flight{}",
            self.max_insight_papers,
            self.max_in_flight,
            if self.offline { " (offline)" } else { "" }
        )?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
