use crate::detection::TechniqueDetection;
use crate::literature::Paper;
use crate::recommend::{FailureMode, Recommendation};
use crate::types::Level;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub timestamp: DateTime<Utc>,
    pub codebase_name: String,
    /// Wall-clock duration in seconds
    pub analysis_duration: f64,
    pub overall_risk: Level,
    pub critical_issues: usize,
    pub techniques_detected: usize,
    pub papers_analyzed: usize,
    pub techniques: Vec<TechniqueDetection>,
    pub failure_modes: Vec<FailureMode>,
    pub recommendations: Vec<Recommendation>,
    pub papers: Vec<Paper>,
    pub confidence_notes: Vec<String>,
    pub limitations: Vec<String>,
}
