use super::taxonomy::TechniqueKind;
use crate::types::Level;
use serde::{Deserialize, Serialize};

/// Maximum number of example locations kept per detection
pub const MAX_LOCATIONS: usize = 5;

/// A GenAI technique found in the scanned codebase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechniqueDetection {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TechniqueKind,
    pub confidence: Level,
    pub indicators: Vec<String>,
    pub locations: Vec<String>,
    pub description: String,
}

impl TechniqueDetection {
    pub fn new(kind: TechniqueKind, confidence: Level) -> Self {
        Self {
            name: kind.display_name().to_string(),
            kind,
            confidence,
            indicators: Vec::new(),
            locations: Vec::new(),
            description: kind.description().to_string(),
        }
    }

    pub fn with_indicators(mut self, indicators: Vec<String>) -> Self {
        self.indicators = indicators;
        self
    }

    pub fn with_locations(mut self, locations: Vec<String>) -> Self {
        self.locations = locations;
        self
    }

    /// Folds another detection of the same technique into this one.
    ///
    /// Confidence only ever moves up.
    pub fn merge(&mut self, other: TechniqueDetection) {
        debug_assert_eq!(self.kind, other.kind);
        self.indicators.extend(other.indicators);
        self.locations.extend(other.locations);
        self.confidence = self.confidence.max(other.confidence);
    }

    /// True when `technique` names this detection, either by taxonomy key or as a
    /// substring of the display name.
    pub fn matches_technique(&self, technique: &str) -> bool {
        self.kind.key() == technique || self.name.contains(technique)
    }
}
