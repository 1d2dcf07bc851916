use super::types::Report;
use crate::detection::TechniqueDetection;
use crate::literature::Paper;
use crate::recommend::{RecommendationType, Synthesis};
use crate::types::Level;
use chrono::{DateTime, Utc};
use std::time::Duration;

const BASE_LIMITATIONS: &[&str] = &[
    "Analysis based on static code patterns (may miss runtime behavior)",
    "Research findings may not apply to your specific use case",
    "Recommendations are suggestions, not requirements",
    "Manual verification recommended for critical changes",
];

/// External-service problems encountered during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Degradation {
    pub failed_queries: usize,
    pub degraded_extractions: usize,
    /// Insights came from the built-in fallback rather than a model
    pub used_fallback: bool,
}

/// Risk from the number of critical recommendations
pub fn overall_risk(critical_issues: usize) -> Level {
    match critical_issues {
        0 => Level::Low,
        1 | 2 => Level::Medium,
        _ => Level::High,
    }
}

/// One note per confidence level that has at least one detection
pub fn confidence_notes(techniques: &[TechniqueDetection]) -> Vec<String> {
    let count = |level: Level| techniques.iter().filter(|t| t.confidence == level).count();

    let mut notes = Vec::new();
    let high = count(Level::High);
    if high > 0 {
        notes.push(format!("{} technique(s) detected with high confidence", high));
    }
    let medium = count(Level::Medium);
    if medium > 0 {
        notes.push(format!(
            "{} technique(s) detected with medium confidence - recommend manual verification",
            medium
        ));
    }
    let low = count(Level::Low);
    if low > 0 {
        notes.push(format!(
            "{} technique(s) detected with low confidence - may be false positives",
            low
        ));
    }
    notes
}

pub fn limitations(degradation: &Degradation, papers_analyzed: usize) -> Vec<String> {
    let mut limitations: Vec<String> = BASE_LIMITATIONS.iter().map(|s| s.to_string()).collect();

    if degradation.failed_queries > 0 {
        limitations.push(format!(
            "{} literature search(es) failed; paper coverage may be incomplete",
            degradation.failed_queries
        ));
    }
    if degradation.degraded_extractions > 0 {
        limitations.push(format!(
            "{} paper(s) could not be analyzed by the extraction model",
            degradation.degraded_extractions
        ));
    }
    if degradation.used_fallback && papers_analyzed > 0 {
        limitations.push(
            "No extraction model configured; insights are generic examples rather than paper-specific findings"
                .to_string(),
        );
    }
    limitations
}

/// Assembles a [`Report`] from the outputs of the earlier stages.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    codebase_name: String,
    techniques: Vec<TechniqueDetection>,
    papers: Vec<Paper>,
    synthesis: Synthesis,
    degradation: Degradation,
    duration: Duration,
    timestamp: Option<DateTime<Utc>>,
}

impl ReportBuilder {
    pub fn new(codebase_name: impl Into<String>) -> Self {
        Self {
            codebase_name: codebase_name.into(),
            techniques: Vec::new(),
            papers: Vec::new(),
            synthesis: Synthesis::default(),
            degradation: Degradation::default(),
            duration: Duration::ZERO,
            timestamp: None,
        }
    }

    pub fn techniques(mut self, techniques: Vec<TechniqueDetection>) -> Self {
        self.techniques = techniques;
        self
    }

    pub fn papers(mut self, papers: Vec<Paper>) -> Self {
        self.papers = papers;
        self
    }

    pub fn synthesis(mut self, synthesis: Synthesis) -> Self {
        self.synthesis = synthesis;
        self
    }

    pub fn degradation(mut self, degradation: Degradation) -> Self {
        self.degradation = degradation;
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Fixes the report timestamp instead of using the build time
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn build(self) -> Report {
        let mut recommendations = self.synthesis.recommendations;
        recommendations.sort_by_key(|r| r.priority);

        let critical_issues = recommendations
            .iter()
            .filter(|r| r.kind == RecommendationType::Critical)
            .count();
        let papers_analyzed = self.papers.len();

        Report {
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
            codebase_name: self.codebase_name,
            analysis_duration: self.duration.as_secs_f64(),
            overall_risk: overall_risk(critical_issues),
            critical_issues,
            techniques_detected: self.techniques.len(),
            papers_analyzed,
            confidence_notes: confidence_notes(&self.techniques),
            limitations: limitations(&self.degradation, papers_analyzed),
            techniques: self.techniques,
            failure_modes: self.synthesis.failure_modes,
            recommendations,
            papers: self.papers,
        }
    }
}
