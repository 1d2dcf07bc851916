use crate::types::{Level, Severity};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendationType {
    Critical,
    Important,
    #[serde(rename = "Nice-to-have")]
    NiceToHave,
}

impl RecommendationType {
    /// Priority rank, 1 being the most urgent
    pub fn priority(self) -> u8 {
        match self {
            RecommendationType::Critical => 1,
            RecommendationType::Important => 2,
            RecommendationType::NiceToHave => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecommendationType::Critical => "Critical",
            RecommendationType::Important => "Important",
            RecommendationType::NiceToHave => "Nice-to-have",
        }
    }
}

impl fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The paper finding a recommendation rests on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub paper: String,
    pub finding: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub title: String,
    pub description: String,
    pub action_steps: Vec<String>,
    pub code_example: Option<String>,
    pub evidence: Evidence,
    pub impact: Level,
    pub effort: Level,
    pub confidence: Level,
    pub caveats: Vec<String>,
    pub code_locations: Vec<String>,
    pub priority: u8,
}

/// A failure mode attributed to the paper that reported it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureMode {
    pub description: String,
    pub conditions: String,
    pub severity: Severity,
    pub mitigation: String,
    pub source_paper: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_serialization() {
        let json = serde_json::to_string(&RecommendationType::NiceToHave).unwrap();
        assert_eq!(json, "\"Nice-to-have\"");
        let parsed: RecommendationType = serde_json::from_str("\"Critical\"").unwrap();
        assert_eq!(parsed, RecommendationType::Critical);
    }

    #[test]
    fn test_priority_pairing() {
        assert_eq!(RecommendationType::Critical.priority(), 1);
        assert_eq!(RecommendationType::Important.priority(), 2);
        assert_eq!(RecommendationType::NiceToHave.priority(), 3);
    }
}
