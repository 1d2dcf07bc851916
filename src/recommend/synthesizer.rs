use super::heuristics::{caveats_for, confidence_for_year, estimate_effort};
use super::types::{Evidence, FailureMode, Recommendation, RecommendationType};
use crate::detection::TechniqueDetection;
use crate::insights::{BestPractice, ImplementationRecommendation, Insight, RawFailureMode};
use crate::types::Level;
use std::collections::HashSet;
use tracing::debug;

pub const MAX_RECOMMENDATIONS: usize = 10;
const LOCATIONS_PER_DETECTION: usize = 3;
const MAX_CODE_LOCATIONS: usize = 5;

/// Ranked recommendations and every failure mode seen
#[derive(Debug, Clone, Default)]
pub struct Synthesis {
    pub recommendations: Vec<Recommendation>,
    pub failure_modes: Vec<FailureMode>,
}

/// Converts insights into prioritized, evidence-backed recommendations.
pub struct RecommendationSynthesizer<'a> {
    detections: &'a [TechniqueDetection],
}

impl<'a> RecommendationSynthesizer<'a> {
    pub fn new(detections: &'a [TechniqueDetection]) -> Self {
        Self { detections }
    }

    /// Failure modes come first, then best practices, then implementation
    /// recommendations. Duplicate titles (case-insensitive) keep the first
    /// occurrence; the rest are ordered by priority then impact and capped.
    pub fn synthesize(&self, insights: &[Insight]) -> Synthesis {
        let mut recommendations = Vec::new();
        let mut failure_modes = Vec::new();

        for insight in insights {
            for fm in &insight.failure_modes {
                failure_modes.push(FailureMode {
                    description: fm.description.clone(),
                    conditions: fm.conditions.clone(),
                    severity: fm.severity,
                    mitigation: fm.mitigation.clone(),
                    source_paper: insight.paper_title.clone(),
                });
                recommendations.push(self.from_failure_mode(fm, insight));
            }
        }
        for insight in insights {
            for bp in &insight.best_practices {
                recommendations.push(self.from_best_practice(bp, insight));
            }
        }
        for insight in insights {
            for rec in &insight.implementation_recommendations {
                recommendations.push(self.from_implementation(rec, insight));
            }
        }

        let generated = recommendations.len();
        let recommendations = rank(recommendations);
        debug!(
            generated,
            kept = recommendations.len(),
            failure_modes = failure_modes.len(),
            "Recommendations synthesized"
        );

        Synthesis {
            recommendations,
            failure_modes,
        }
    }

    fn from_failure_mode(&self, fm: &RawFailureMode, insight: &Insight) -> Recommendation {
        let kind = if fm.severity.is_blocking() {
            RecommendationType::Critical
        } else {
            RecommendationType::Important
        };
        let first_step = if fm.mitigation.is_empty() {
            "Review implementation".to_string()
        } else {
            fm.mitigation.clone()
        };

        Recommendation {
            kind,
            title: format!("Mitigate: {}", fm.description),
            description: format!("{}. {}", fm.description, fm.conditions),
            action_steps: vec![
                first_step,
                "Test the mitigation in staging".to_string(),
                "Monitor for the failure condition".to_string(),
            ],
            code_example: None,
            evidence: evidence(insight, &fm.description),
            impact: fm.severity.impact(),
            effort: estimate_effort(&fm.mitigation),
            confidence: confidence_for_year(insight.paper_year),
            caveats: caveats_for(insight),
            code_locations: self.code_locations(insight),
            priority: kind.priority(),
        }
    }

    fn from_best_practice(&self, bp: &BestPractice, insight: &Insight) -> Recommendation {
        let kind = RecommendationType::Important;
        let title = if bp.practice.is_empty() {
            "Implement best practice".to_string()
        } else {
            bp.practice.clone()
        };

        Recommendation {
            kind,
            action_steps: vec![
                format!("Implement: {}", bp.practice),
                "Review existing code for conflicts".to_string(),
                "Test thoroughly before deployment".to_string(),
            ],
            title,
            description: bp.rationale.clone(),
            code_example: None,
            evidence: evidence(insight, &bp.evidence),
            impact: Level::Medium,
            effort: Level::Medium,
            confidence: confidence_for_year(insight.paper_year),
            caveats: caveats_for(insight),
            code_locations: self.code_locations(insight),
            priority: kind.priority(),
        }
    }

    fn from_implementation(
        &self,
        rec: &ImplementationRecommendation,
        insight: &Insight,
    ) -> Recommendation {
        let kind = RecommendationType::NiceToHave;
        let title = if rec.recommendation.is_empty() {
            "Optimization opportunity".to_string()
        } else {
            rec.recommendation.clone()
        };

        Recommendation {
            kind,
            title,
            description: format!("Based on research findings from {}", insight.paper_title),
            action_steps: vec![
                rec.recommendation.clone(),
                "Measure baseline performance".to_string(),
                "Implement and compare results".to_string(),
            ],
            code_example: None,
            evidence: evidence(insight, &rec.recommendation),
            impact: rec.impact,
            effort: rec.effort,
            confidence: Level::Medium,
            caveats: caveats_for(insight),
            code_locations: self.code_locations(insight),
            priority: kind.priority(),
        }
    }

    /// Locations of detections matching the insight's technique: a few from each
    /// match, capped overall.
    fn code_locations(&self, insight: &Insight) -> Vec<String> {
        let technique = insight.technique.key();
        self.detections
            .iter()
            .filter(|d| d.matches_technique(technique))
            .flat_map(|d| d.locations.iter().take(LOCATIONS_PER_DETECTION).cloned())
            .take(MAX_CODE_LOCATIONS)
            .collect()
    }
}

fn evidence(insight: &Insight, finding: &str) -> Evidence {
    Evidence {
        paper: insight.paper_title.clone(),
        finding: finding.to_string(),
        year: insight.paper_year.to_string(),
    }
}

fn rank(recommendations: Vec<Recommendation>) -> Vec<Recommendation> {
    let mut seen = HashSet::new();
    let mut unique: Vec<Recommendation> = recommendations
        .into_iter()
        .filter(|r| seen.insert(r.title.to_lowercase()))
        .collect();

    unique.sort_by_key(|r| (r.priority, std::cmp::Reverse(r.impact.score())));
    unique.truncate(MAX_RECOMMENDATIONS);
    unique
}
