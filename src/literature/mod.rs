//! Literature retrieval
//!
//! Searches paper sources for each detected technique, scores relevance and
//! returns a de-duplicated ranked list.

pub mod arxiv;
mod mock;
mod retriever;
pub mod scoring;
pub mod semantic_scholar;
mod source;
mod types;

pub use arxiv::{ArxivSource, DEFAULT_ARXIV_URL};
pub use mock::MockPaperSource;
pub use retriever::{LiteratureRetriever, RetrievalConfig, RetrievalOutcome};
pub use scoring::{classify_experimental, relevance_score, ExperimentalSignal};
pub use semantic_scholar::{SemanticScholarSource, DEFAULT_SEMANTIC_SCHOLAR_URL};
pub use source::{PaperSource, QueryOutcome, SearchQuery, SourceError};
pub use types::{Paper, MAX_AUTHORS};
