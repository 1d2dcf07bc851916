//! Library and code-pattern based technique detection

use super::taxonomy::{TechniqueKind, LIBRARY_TABLE};
use super::types::{TechniqueDetection, MAX_LOCATIONS};
use crate::scan::ScanResult;
use crate::types::Level;
use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;
use tracing::debug;

const RAG_PATTERNS: &[&str] = &[
    r"similarity_search",
    r"vector_search",
    r"retrieve",
    r"query_embedding",
    r"get_relevant_documents",
    r"VectorStore",
    r"Retriever",
];

const AGENT_PATTERNS: &[&str] = &[
    r"agent",
    r"tool",
    r"function_calling",
    r"while.*step",
    r"max_iterations",
    r"thought",
    r"reasoning",
    r"plan",
];

const PROMPT_PATTERNS: &[&str] = &[
    r"prompt\s*=",
    r"template\s*=",
    r#"f".*\{.*\}""#,
    r"\.format\(",
    r"PromptTemplate",
    r"ChatPromptTemplate",
];

struct PatternSet {
    kind: TechniqueKind,
    regex: Regex,
}

fn compile_set(kind: TechniqueKind, patterns: &[&str]) -> PatternSet {
    let alternation = patterns
        .iter()
        .map(|p| format!("(?:{})", p))
        .collect::<Vec<_>>()
        .join("|");
    let regex = RegexBuilder::new(&alternation)
        .case_insensitive(true)
        .build()
        .expect("valid regex");
    PatternSet { kind, regex }
}

fn pattern_sets() -> &'static [PatternSet] {
    static SETS: OnceLock<Vec<PatternSet>> = OnceLock::new();
    SETS.get_or_init(|| {
        vec![
            compile_set(TechniqueKind::Rag, RAG_PATTERNS),
            compile_set(TechniqueKind::Agents, AGENT_PATTERNS),
            compile_set(TechniqueKind::PromptEngineering, PROMPT_PATTERNS),
        ]
    })
}

fn normalize_library(name: &str) -> String {
    name.to_lowercase().replace(['-', '_'], "")
}

/// Techniques implied by a single library name.
///
/// Matching is a bidirectional substring test on names stripped of `-` and `_`,
/// so short names like `re` match `cohere`.
pub fn techniques_for_library(library: &str) -> Vec<TechniqueKind> {
    let normalized = normalize_library(library);
    if normalized.is_empty() {
        return Vec::new();
    }

    let mut kinds = Vec::new();
    for (pattern, kind) in LIBRARY_TABLE {
        let pattern = normalize_library(pattern);
        if (pattern.contains(&normalized) || normalized.contains(&pattern)) && !kinds.contains(kind)
        {
            kinds.push(*kind);
        }
    }
    kinds
}

/// Detects GenAI techniques from a scan result.
///
/// Detection is pure: the same scan always yields the same detections in the
/// same order.
pub struct TechniqueDetector;

impl TechniqueDetector {
    pub fn detect(scan: &ScanResult) -> Vec<TechniqueDetection> {
        let mut detections = Self::detect_libraries(scan);

        for (kind, files) in Self::match_patterns(scan) {
            let file_count = files.len();
            let locations: Vec<String> = files.into_iter().take(MAX_LOCATIONS).collect();

            if kind == TechniqueKind::Agents {
                if let Some(existing) = detections.iter_mut().find(|d| d.kind == kind) {
                    existing.locations.extend(locations);
                    continue;
                }
            } else if detections
                .iter()
                .any(|d| d.kind == kind && d.confidence == Level::High)
            {
                debug!(technique = %kind, "Pattern match already covered by library detection");
                continue;
            }

            detections.push(
                TechniqueDetection::new(kind, Level::Medium)
                    .with_indicators(vec![pattern_indicator(file_count)])
                    .with_locations(locations),
            );
        }

        let detections = finalize(detections);
        debug!(count = detections.len(), "Technique detection complete");
        detections
    }

    fn detect_libraries(scan: &ScanResult) -> Vec<TechniqueDetection> {
        let mut by_kind: Vec<(TechniqueKind, Vec<String>)> = Vec::new();

        for library in scan.library_names() {
            for kind in techniques_for_library(library) {
                match by_kind.iter_mut().find(|(k, _)| *k == kind) {
                    Some((_, libraries)) => libraries.push(library.to_string()),
                    None => by_kind.push((kind, vec![library.to_string()])),
                }
            }
        }

        by_kind
            .into_iter()
            .map(|(kind, libraries)| {
                let indicators = libraries
                    .iter()
                    .map(|lib| format!("Library: {}", lib))
                    .collect();
                TechniqueDetection::new(kind, Level::High).with_indicators(indicators)
            })
            .collect()
    }

    /// Files matching each pattern set, in set order. Sets with no matches are
    /// omitted.
    fn match_patterns(scan: &ScanResult) -> Vec<(TechniqueKind, Vec<String>)> {
        pattern_sets()
            .iter()
            .filter_map(|set| {
                let files: Vec<String> = scan
                    .sources
                    .iter()
                    .filter(|(_, source)| set.regex.is_match(&source.content))
                    .map(|(path, _)| path.clone())
                    .collect();
                (!files.is_empty()).then_some((set.kind, files))
            })
            .collect()
    }
}

fn pattern_indicator(file_count: usize) -> String {
    format!("Pattern match in {} file(s)", file_count)
}

/// Merges detections sharing a technique, keeping first-seen order.
///
/// Indicators are concatenated, locations are de-duplicated and capped, and the
/// merged confidence is the maximum of the inputs.
pub fn finalize(detections: Vec<TechniqueDetection>) -> Vec<TechniqueDetection> {
    let mut merged: Vec<TechniqueDetection> = Vec::new();

    for detection in detections {
        match merged.iter_mut().find(|d| d.kind == detection.kind) {
            Some(existing) => existing.merge(detection),
            None => merged.push(detection),
        }
    }

    for detection in &mut merged {
        let mut seen = std::collections::HashSet::new();
        detection
            .locations
            .retain(|location| seen.insert(location.clone()));
        detection.locations.truncate(MAX_LOCATIONS);
    }

    merged
}
