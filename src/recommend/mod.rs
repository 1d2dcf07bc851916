//! Recommendation synthesis
//!
//! Converts extracted findings into deduplicated, prioritized recommendations
//! with evidence and code locations attached.

pub mod heuristics;
mod synthesizer;
mod types;

pub use heuristics::{caveats_for, confidence_for_year, estimate_effort};
pub use synthesizer::{RecommendationSynthesizer, Synthesis, MAX_RECOMMENDATIONS};
pub use types::{Evidence, FailureMode, Recommendation, RecommendationType};
