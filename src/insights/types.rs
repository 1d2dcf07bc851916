use crate::detection::TechniqueKind;
use crate::literature::Paper;
use crate::types::{lenient_level, lenient_severity, lenient_string, Level, Severity};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// A failure mode as reported for one paper, before it is attributed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFailureMode {
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub conditions: String,
    #[serde(default, deserialize_with = "lenient_severity")]
    pub severity: Severity,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mitigation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BestPractice {
    #[serde(default, deserialize_with = "lenient_string")]
    pub practice: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rationale: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub evidence: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceFinding {
    #[serde(default, deserialize_with = "lenient_string")]
    pub finding: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub metric: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImplementationRecommendation {
    #[serde(default, deserialize_with = "lenient_string")]
    pub recommendation: String,
    #[serde(default, deserialize_with = "lenient_level")]
    pub impact: Level,
    #[serde(default, deserialize_with = "lenient_level")]
    pub effort: Level,
}

/// The four finding lists a model returns for one paper.
///
/// Every field is optional; list entries that are not objects are dropped.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExtractionPayload {
    #[serde(default, deserialize_with = "lenient_list")]
    pub failure_modes: Vec<RawFailureMode>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub best_practices: Vec<BestPractice>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub performance_findings: Vec<PerformanceFinding>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub recommendations: Vec<ImplementationRecommendation>,
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter(serde_json::Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Structured findings extracted from one paper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub paper_title: String,
    pub paper_year: i32,
    pub paper_url: String,
    pub technique: TechniqueKind,
    pub failure_modes: Vec<RawFailureMode>,
    pub best_practices: Vec<BestPractice>,
    pub performance_findings: Vec<PerformanceFinding>,
    pub implementation_recommendations: Vec<ImplementationRecommendation>,
}

impl Insight {
    /// An insight with no findings, attributed to `paper`
    pub fn empty(paper: &Paper) -> Self {
        Self::from_payload(paper, ExtractionPayload::default())
    }

    pub fn from_payload(paper: &Paper, payload: ExtractionPayload) -> Self {
        Self {
            paper_title: paper.title.clone(),
            paper_year: paper.year,
            paper_url: paper.url.clone(),
            technique: paper.technique,
            failure_modes: payload.failure_modes,
            best_practices: payload.best_practices,
            performance_findings: payload.performance_findings,
            implementation_recommendations: payload.recommendations,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.failure_modes.is_empty()
            && self.best_practices.is_empty()
            && self.performance_findings.is_empty()
            && self.implementation_recommendations.is_empty()
    }
}

/// Result of extracting one paper. A degraded extraction still carries an empty
/// insight so the paper stays attributed.
#[derive(Debug, Clone)]
pub enum ExtractionOutcome {
    Extracted(Insight),
    Degraded { insight: Insight, reason: String },
}

impl ExtractionOutcome {
    pub fn into_insight(self) -> Insight {
        match self {
            ExtractionOutcome::Extracted(insight) => insight,
            ExtractionOutcome::Degraded { insight, .. } => insight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_tolerates_partial_and_malformed_fields() {
        let payload: ExtractionPayload = serde_json::from_str(
            r#"{
                "failure_modes": [
                    {"description": "Stale index", "severity": "critical", "mitigation": "Rebuild nightly"},
                    "not an object",
                    {"description": "Drift", "severity": null}
                ],
                "best_practices": {"practice": "wrong shape"},
                "recommendations": [{"recommendation": "Cache results", "impact": "HIGH", "effort": 3}]
            }"#,
        )
        .unwrap();

        assert_eq!(payload.failure_modes.len(), 2);
        assert_eq!(payload.failure_modes[0].severity, Severity::Critical);
        assert_eq!(payload.failure_modes[1].severity, Severity::Medium);
        assert!(payload.failure_modes[1].conditions.is_empty());
        assert!(payload.best_practices.is_empty());
        assert!(payload.performance_findings.is_empty());
        assert_eq!(payload.recommendations[0].impact, Level::High);
        assert_eq!(payload.recommendations[0].effort, Level::Medium);
    }

    #[test]
    fn test_insight_from_payload_copies_paper_fields() {
        let paper = Paper::new("Chunking matters", TechniqueKind::Rag)
            .with_year(2024)
            .with_url("https://example.org/p");
        let insight = Insight::empty(&paper);

        assert_eq!(insight.paper_title, "Chunking matters");
        assert_eq!(insight.paper_year, 2024);
        assert_eq!(insight.technique, TechniqueKind::Rag);
        assert!(insight.is_empty());
    }
}
