//! Insight extraction
//!
//! Turns paper abstracts into structured findings, through an LLM backend when
//! one is configured and a deterministic fallback otherwise.

mod extractor;
pub mod fallback;
mod prompt;
mod types;

pub use extractor::{extract_json_from_markdown, ExtractionConfig, InsightBatch, InsightExtractor};
pub use fallback::fallback_insights;
pub use prompt::{build_extraction_prompt, SYSTEM_PROMPT};
pub use types::{
    BestPractice, ExtractionOutcome, ExtractionPayload, ImplementationRecommendation, Insight,
    PerformanceFinding, RawFailureMode,
};
