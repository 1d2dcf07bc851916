//! Small pure rules used when turning findings into recommendations

use crate::insights::Insight;
use crate::types::Level;

pub const OLDER_RESEARCH_CAVEAT: &str = "Based on older research; newer approaches may exist";
pub const THEORETICAL_CAVEAT: &str = "Theoretical finding; experimental validation recommended";

/// Papers from this year onwards count as recent
pub const RECENT_YEAR: i32 = 2023;

const LOW_EFFORT_WORDS: &[&str] = &["threshold", "check", "validate", "log"];
const HIGH_EFFORT_WORDS: &[&str] = &["refactor", "redesign", "implement"];

/// Effort implied by a mitigation's wording. Low-effort words win over
/// high-effort ones.
pub fn estimate_effort(mitigation: &str) -> Level {
    let mitigation = mitigation.to_lowercase();
    if LOW_EFFORT_WORDS.iter().any(|w| mitigation.contains(w)) {
        Level::Low
    } else if HIGH_EFFORT_WORDS.iter().any(|w| mitigation.contains(w)) {
        Level::High
    } else {
        Level::Medium
    }
}

pub fn confidence_for_year(year: i32) -> Level {
    if year >= RECENT_YEAR {
        Level::High
    } else {
        Level::Medium
    }
}

pub fn caveats_for(insight: &Insight) -> Vec<String> {
    let mut caveats = Vec::new();
    if insight.paper_year < RECENT_YEAR {
        caveats.push(OLDER_RESEARCH_CAVEAT.to_string());
    }
    if insight.failure_modes.is_empty() && insight.performance_findings.is_empty() {
        caveats.push(THEORETICAL_CAVEAT.to_string());
    }
    caveats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::TechniqueKind;
    use crate::literature::Paper;
    use yare::parameterized;

    #[parameterized(
        threshold_check = { "add a threshold check", Level::Low },
        logging = { "Log every request", Level::Low },
        low_wins = { "Implement input validation and validate outputs", Level::Low },
        refactor = { "Refactor the retrieval layer", Level::High },
        implement = { "Implement exponential backoff", Level::High },
        neither = { "Use HNSW indexing", Level::Medium },
        empty = { "", Level::Medium },
    )]
    fn test_estimate_effort(mitigation: &str, expected: Level) {
        assert_eq!(estimate_effort(mitigation), expected);
    }

    #[parameterized(
        old = { 2021, Level::Medium },
        boundary = { 2023, Level::High },
        new = { 2025, Level::High },
    )]
    fn test_confidence_for_year(year: i32, expected: Level) {
        assert_eq!(confidence_for_year(year), expected);
    }

    #[test]
    fn test_caveats() {
        let paper = Paper::new("Old theory", TechniqueKind::Rag).with_year(2021);
        let insight = Insight::empty(&paper);
        assert_eq!(
            caveats_for(&insight),
            vec![OLDER_RESEARCH_CAVEAT, THEORETICAL_CAVEAT]
        );

        let recent = Paper::new("New", TechniqueKind::Rag).with_year(2024);
        let mut insight = Insight::empty(&recent);
        insight.performance_findings.push(Default::default());
        assert!(caveats_for(&insight).is_empty());
    }
}
