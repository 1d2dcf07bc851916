//! Output formatting for reports and detection summaries
//!
//! JSON and YAML serialize the values as they are. The human format is a compact
//! terminal rendering.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;

use crate::detection::TechniqueDetection;
use crate::recommend::Recommendation;
use crate::report::Report;
use crate::scan::ScanResult;

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";
const BRANCH: &str = "\u{251C}\u{2500}";
const LAST_BRANCH: &str = "\u{2514}\u{2500}";

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-friendly, version-control friendly)
    Yaml,
    /// Human-readable formatted text
    Human,
}

/// Result of `litscout detect`: the scan summary plus detected techniques.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionSummary {
    pub codebase_name: String,
    pub files_scanned: usize,
    pub lines_scanned: usize,
    pub dependencies: Vec<String>,
    pub skipped_files: usize,
    pub techniques: Vec<TechniqueDetection>,
}

impl DetectionSummary {
    pub fn new(
        codebase_name: impl Into<String>,
        scan: &ScanResult,
        techniques: Vec<TechniqueDetection>,
    ) -> Self {
        Self {
            codebase_name: codebase_name.into(),
            files_scanned: scan.files.len(),
            lines_scanned: scan.total_lines(),
            dependencies: scan.dependencies.keys().cloned().collect(),
            skipped_files: scan.skipped.len(),
            techniques,
        }
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_report(&self, report: &Report) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(report).context("Failed to serialize report to YAML")
            }
            OutputFormat::Human => Ok(format_report_human(report)),
        }
    }

    pub fn format_detections(&self, summary: &DetectionSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(summary)
                .context("Failed to serialize detections to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(summary).context("Failed to serialize detections to YAML")
            }
            OutputFormat::Human => Ok(format_detections_human(summary)),
        }
    }
}

fn tree_prefix(index: usize, len: usize) -> &'static str {
    if index + 1 == len {
        LAST_BRANCH
    } else {
        BRANCH
    }
}

fn push_techniques(out: &mut String, techniques: &[TechniqueDetection]) {
    if techniques.is_empty() {
        out.push_str("No GenAI techniques detected.\n\n");
        return;
    }

    out.push_str("Techniques:\n");
    for (i, technique) in techniques.iter().enumerate() {
        let _ = writeln!(
            out,
            "{} {} [{}]",
            tree_prefix(i, techniques.len()),
            technique.name,
            technique.confidence
        );
        for indicator in &technique.indicators {
            let _ = writeln!(out, "     {}", indicator);
        }
    }
    out.push('\n');
}

fn push_recommendation(out: &mut String, index: usize, rec: &Recommendation) {
    let _ = writeln!(out, "{}. [{}] {}", index + 1, rec.kind, rec.title);
    let _ = writeln!(
        out,
        "   Impact: {}  Effort: {}  Confidence: {}",
        rec.impact, rec.effort, rec.confidence
    );
    let _ = writeln!(out, "   {}", rec.description);

    for step in &rec.action_steps {
        let _ = writeln!(out, "   - {}", step);
    }
    if !rec.code_locations.is_empty() {
        let _ = writeln!(out, "   Where: {}", rec.code_locations.join(", "));
    }
    let _ = writeln!(
        out,
        "   Evidence: {} ({}): {}",
        rec.evidence.paper, rec.evidence.year, rec.evidence.finding
    );
    for caveat in &rec.caveats {
        let _ = writeln!(out, "   \u{26A0} {}", caveat);
    }
    out.push('\n');
}

fn format_report_human(report: &Report) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "GenAI Research Report: {}", report.codebase_name);
    let _ = writeln!(out, "{}\n", RULE);

    let _ = writeln!(out, "Overall Risk:     {}", report.overall_risk);
    let _ = writeln!(out, "Critical Issues:  {}", report.critical_issues);
    let _ = writeln!(out, "Techniques:       {}", report.techniques_detected);
    let _ = writeln!(out, "Papers Analyzed:  {}\n", report.papers_analyzed);

    push_techniques(&mut out, &report.techniques);

    if !report.recommendations.is_empty() {
        out.push_str("Recommendations:\n\n");
        for (i, rec) in report.recommendations.iter().enumerate() {
            push_recommendation(&mut out, i, rec);
        }
    }

    if !report.failure_modes.is_empty() {
        out.push_str("Known Failure Modes:\n");
        for (i, mode) in report.failure_modes.iter().enumerate() {
            let _ = writeln!(
                out,
                "{} [{}] {}",
                tree_prefix(i, report.failure_modes.len()),
                mode.severity.as_str(),
                mode.description
            );
        }
        out.push('\n');
    }

    if !report.papers.is_empty() {
        out.push_str("Papers:\n");
        for (i, paper) in report.papers.iter().enumerate() {
            let _ = writeln!(
                out,
                "{} {} ({}, {} citations, relevance {:.0})",
                tree_prefix(i, report.papers.len()),
                paper.title,
                paper.year,
                paper.citation_count,
                paper.relevance_score
            );
        }
        out.push('\n');
    }

    if !report.confidence_notes.is_empty() {
        out.push_str("Confidence:\n");
        for note in &report.confidence_notes {
            let _ = writeln!(out, "  - {}", note);
        }
        out.push('\n');
    }

    out.push_str("Limitations:\n");
    for limitation in &report.limitations {
        let _ = writeln!(out, "  - {}", limitation);
    }

    let _ = writeln!(
        out,
        "\nAnalyzed in {:.1}s at {}",
        report.analysis_duration,
        report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );

    out
}

fn format_detections_human(summary: &DetectionSummary) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "GenAI Techniques: {}", summary.codebase_name);
    let _ = writeln!(out, "{}\n", RULE);
    let _ = writeln!(
        out,
        "Scanned {} file(s), {} line(s)",
        summary.files_scanned, summary.lines_scanned
    );
    if summary.skipped_files > 0 {
        let _ = writeln!(out, "Skipped {} unparsable file(s)", summary.skipped_files);
    }
    if !summary.dependencies.is_empty() {
        let _ = writeln!(out, "Dependencies: {}", summary.dependencies.join(", "));
    }
    out.push('\n');

    push_techniques(&mut out, &summary.techniques);
    out
}
