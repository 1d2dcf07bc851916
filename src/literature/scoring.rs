//! Experimental classification and relevance scoring
//!
//! Both are pure functions of their inputs so paper ranking is reproducible.

use super::types::Paper;

const EXPERIMENTAL_KEYWORDS: &[&str] = &[
    "experiment",
    "evaluation",
    "benchmark",
    "dataset",
    "results",
    "performance",
    "measured",
    "tested",
    "empirical",
    "study",
    "analysis",
    "comparison",
    "ablation",
    "metrics",
];

const RECENCY_MAX: f64 = 30.0;
const RECENCY_PENALTY_PER_YEAR: f64 = 5.0;
const CITATION_CAP: u32 = 300;
const EXPERIMENTAL_BONUS: f64 = 40.0;

/// How strongly a paper's text suggests empirical work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperimentalSignal {
    Strong,
    Moderate,
    Absent,
}

impl ExperimentalSignal {
    pub fn is_experimental(self) -> bool {
        !matches!(self, ExperimentalSignal::Absent)
    }
}

/// Counts distinct evaluation keywords in title and abstract.
///
/// Three or more hits is a strong signal, two is moderate.
pub fn classify_experimental(title: &str, abstract_text: &str) -> ExperimentalSignal {
    let text = format!("{} {}", title, abstract_text).to_lowercase();
    let hits = EXPERIMENTAL_KEYWORDS
        .iter()
        .filter(|kw| text.contains(*kw))
        .count();

    match hits {
        n if n >= 3 => ExperimentalSignal::Strong,
        2 => ExperimentalSignal::Moderate,
        _ => ExperimentalSignal::Absent,
    }
}

/// Relevance in `[0, 100]`: up to 30 for recency, up to 30 for citations and 40
/// for experimental work.
pub fn relevance_score(year: i32, citations: u32, experimental: bool, current_year: i32) -> f64 {
    let age = f64::from(current_year) - f64::from(year);
    let recency = (RECENCY_MAX - RECENCY_PENALTY_PER_YEAR * age).clamp(0.0, RECENCY_MAX);
    let citation_points = f64::from(citations.min(CITATION_CAP)) / 10.0;
    let experimental_points = if experimental { EXPERIMENTAL_BONUS } else { 0.0 };

    recency + citation_points + experimental_points
}

/// Fills in `is_experimental` and `relevance_score` from the paper's own fields.
pub fn annotate(paper: &mut Paper, current_year: i32) {
    paper.is_experimental = classify_experimental(&paper.title, &paper.abstract_text).is_experimental();
    paper.relevance_score = relevance_score(
        paper.year,
        paper.citation_count,
        paper.is_experimental,
        current_year,
    );
}
