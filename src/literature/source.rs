use super::types::Paper;
use crate::detection::TechniqueKind;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from a single literature query
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{source_name} request failed: {message}")]
    Request {
        source_name: String,
        message: String,
    },

    #[error("{source_name} returned HTTP {status}")]
    Status { source_name: String, status: u16 },

    #[error("{source_name} timed out after {seconds}s")]
    Timeout { source_name: String, seconds: u64 },

    #[error("Failed to parse {source_name} response: {message}")]
    Parse {
        source_name: String,
        message: String,
    },
}

impl SourceError {
    pub(crate) fn from_reqwest(source_name: &str, seconds: u64, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout {
                source_name: source_name.to_string(),
                seconds,
            }
        } else if let Some(status) = err.status() {
            SourceError::Status {
                source_name: source_name.to_string(),
                status: status.as_u16(),
            }
        } else {
            SourceError::Request {
                source_name: source_name.to_string(),
                message: err.to_string(),
            }
        }
    }
}

/// One search against a literature source
#[derive(Debug, Clone, Copy)]
pub struct SearchQuery<'a> {
    pub text: &'a str,
    pub technique: TechniqueKind,
    pub limit: usize,
    /// Oldest publication year to accept
    pub min_year: i32,
    /// Newest publication year to accept
    pub max_year: i32,
}

/// A paper search backend
#[async_trait]
pub trait PaperSource: Send + Sync {
    /// Runs one query. Returned papers carry bibliographic fields only; relevance
    /// is scored by the retriever.
    async fn search(&self, query: SearchQuery<'_>) -> Result<Vec<Paper>, SourceError>;

    fn name(&self) -> &str;
}

/// Result of one query. A failed query is a value so the caller can count it
/// and keep going.
#[derive(Debug)]
pub enum QueryOutcome {
    Papers(Vec<Paper>),
    Failed { query: String, error: SourceError },
}
