use crate::insights::InsightBatch;
use crate::pipeline::context::AnalysisContext;
use crate::pipeline::phase_trait::WorkflowPhase;
use crate::progress::Checkpoint;
use anyhow::{Context, Result};
use async_trait::async_trait;

pub struct InsightsPhase;

#[async_trait]
impl WorkflowPhase for InsightsPhase {
    fn name(&self) -> &'static str {
        "InsightsPhase"
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint::ExtractInsights
    }

    async fn execute(&self, context: &mut AnalysisContext) -> Result<()> {
        let retrieval = context
            .retrieval
            .as_ref()
            .context("Papers must be retrieved before InsightsPhase")?;

        let batch = if retrieval.papers.is_empty() {
            InsightBatch::default()
        } else {
            context
                .services
                .insight_extractor
                .extract(&retrieval.papers)
                .await
        };

        context.insights = Some(batch);
        Ok(())
    }
}
