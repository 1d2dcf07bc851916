//! Prompts for per-paper insight extraction

use crate::literature::Paper;

pub const SYSTEM_PROMPT: &str = "You are an expert at extracting actionable engineering insights from research papers. Extract only concrete, practical findings.";

const RESPONSE_SCHEMA: &str = r#"{
  "failure_modes": [
    {
      "description": "What can go wrong",
      "conditions": "When does it happen",
      "severity": "Critical/High/Medium/Low",
      "mitigation": "How to prevent or fix it"
    }
  ],
  "best_practices": [
    {
      "practice": "What to do",
      "rationale": "Why it helps",
      "evidence": "What the paper found"
    }
  ],
  "performance_findings": [
    {
      "finding": "Performance characteristic",
      "metric": "What was measured",
      "value": "Quantitative result if available"
    }
  ],
  "recommendations": [
    {
      "recommendation": "Concrete action",
      "impact": "High/Medium/Low",
      "effort": "High/Medium/Low"
    }
  ]
}"#;

pub fn build_extraction_prompt(paper: &Paper) -> String {
    format!(
        r#"Analyze this research paper and extract actionable engineering insights.

Title: {title}
Year: {year}
Abstract: {abstract_text}

Extract the following in JSON format:

{schema}

Focus on:
- Concrete, actionable findings
- Experimental results (if available)
- Practical engineering implications
- Specific numbers and metrics

Be concise and specific. If information isn't in the abstract, leave it empty."#,
        title = paper.title,
        year = paper.year,
        abstract_text = paper.abstract_text,
        schema = RESPONSE_SCHEMA,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::TechniqueKind;

    #[test]
    fn test_prompt_contains_paper_and_schema() {
        let paper = Paper::new("Agents that plan", TechniqueKind::Agents)
            .with_year(2024)
            .with_abstract("We study planning failures.");
        let prompt = build_extraction_prompt(&paper);

        assert!(prompt.contains("Title: Agents that plan"));
        assert!(prompt.contains("Year: 2024"));
        assert!(prompt.contains("Abstract: We study planning failures."));
        assert!(prompt.contains("\"failure_modes\""));
        assert!(prompt.contains("\"recommendations\""));
        assert!(prompt.ends_with("leave it empty."));
    }

    #[test]
    fn test_schema_is_valid_json() {
        let value: serde_json::Value = serde_json::from_str(RESPONSE_SCHEMA).unwrap();
        assert!(value.get("performance_findings").is_some());
    }
}
