use super::fallback::fallback_insights;
use super::prompt::{build_extraction_prompt, SYSTEM_PROMPT};
use super::types::{ExtractionOutcome, ExtractionPayload, Insight};
use crate::literature::Paper;
use crate::llm::{ChatMessage, LLMClient, LLMRequest};
use futures_util::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

const EXTRACTION_TEMPERATURE: f32 = 0.3;
const EXTRACTION_MAX_TOKENS: u32 = 2048;

#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Papers considered for extraction, in ranking order
    pub max_papers: usize,
    /// Concurrent backend requests
    pub max_in_flight: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_papers: 10,
            max_in_flight: 4,
        }
    }
}

impl ExtractionConfig {
    pub fn with_max_papers(mut self, max: usize) -> Self {
        self.max_papers = max;
        self
    }

    pub fn with_max_in_flight(mut self, max: usize) -> Self {
        self.max_in_flight = max.max(1);
        self
    }
}

/// Insights in paper order plus the number of papers whose extraction degraded
#[derive(Debug, Clone, Default)]
pub struct InsightBatch {
    pub insights: Vec<Insight>,
    pub degraded: usize,
    /// True when the deterministic fallback produced the insights
    pub used_fallback: bool,
}

/// Extracts structured findings from papers.
///
/// With a backend, every paper (up to the cap) gets one request and requests run
/// concurrently up to `max_in_flight`. One failed paper never affects the others.
/// Without a backend the deterministic fallback is used.
pub struct InsightExtractor {
    backend: Option<Arc<dyn LLMClient>>,
    config: ExtractionConfig,
}

impl InsightExtractor {
    pub fn new(backend: Option<Arc<dyn LLMClient>>, config: ExtractionConfig) -> Self {
        Self { backend, config }
    }

    pub fn fallback(config: ExtractionConfig) -> Self {
        Self::new(None, config)
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    pub async fn extract(&self, papers: &[Paper]) -> InsightBatch {
        let Some(backend) = &self.backend else {
            debug!("No extraction backend configured, using fallback insights");
            return InsightBatch {
                insights: fallback_insights(papers),
                degraded: 0,
                used_fallback: true,
            };
        };

        let requests: Vec<_> = papers
            .iter()
            .take(self.config.max_papers)
            .map(|paper| extract_one(backend.as_ref(), paper))
            .collect();
        let outcomes: Vec<ExtractionOutcome> = stream::iter(requests)
            .buffered(self.config.max_in_flight.max(1))
            .collect()
            .await;

        let mut degraded = 0;
        for outcome in &outcomes {
            if let ExtractionOutcome::Degraded { insight, reason } = outcome {
                warn!(paper = %insight.paper_title, reason = %reason, "Insight extraction degraded");
                degraded += 1;
            }
        }
        let insights: Vec<Insight> = outcomes.into_iter().map(ExtractionOutcome::into_insight).collect();

        info!(
            backend = backend.name(),
            papers = insights.len(),
            degraded,
            "Insight extraction complete"
        );

        InsightBatch {
            insights,
            degraded,
            used_fallback: false,
        }
    }
}

async fn extract_one(backend: &dyn LLMClient, paper: &Paper) -> ExtractionOutcome {
    let request = LLMRequest::new(vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(build_extraction_prompt(paper)),
    ])
    .with_temperature(EXTRACTION_TEMPERATURE)
    .with_max_tokens(EXTRACTION_MAX_TOKENS)
    .with_json_mode();

    let response = match backend.chat(request).await {
        Ok(response) => response,
        Err(e) => {
            return ExtractionOutcome::Degraded {
                insight: Insight::empty(paper),
                reason: format!("request failed: {}", e),
            };
        }
    };

    match parse_payload(&response.content) {
        Ok(payload) => {
            debug!(
                paper = %paper.title,
                elapsed_ms = response.response_time.as_millis() as u64,
                "Extracted insights"
            );
            ExtractionOutcome::Extracted(Insight::from_payload(paper, payload))
        }
        Err(e) => {
            ExtractionOutcome::Degraded {
                insight: Insight::empty(paper),
                reason: format!("malformed response: {}", e),
            }
        }
    }
}

fn parse_payload(content: &str) -> Result<ExtractionPayload, serde_json::Error> {
    serde_json::from_str(extract_json_from_markdown(content))
}

/// Strips a surrounding Markdown code fence, if any
pub fn extract_json_from_markdown(content: &str) -> &str {
    let trimmed = content.trim();

    if let Some(start_idx) = trimmed.find("```json") {
        let after_fence = &trimmed[start_idx + 7..];
        if let Some(end_idx) = after_fence.find("```") {
            return after_fence[..end_idx].trim();
        }
    }

    if let Some(start_idx) = trimmed.find("```") {
        let after_fence = &trimmed[start_idx + 3..];
        if let Some(end_idx) = after_fence.find("```") {
            return after_fence[..end_idx].trim();
        }
    }

    trimmed
}
