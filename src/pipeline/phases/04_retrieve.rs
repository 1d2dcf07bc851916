use crate::literature::RetrievalOutcome;
use crate::pipeline::context::AnalysisContext;
use crate::pipeline::phase_trait::WorkflowPhase;
use crate::progress::Checkpoint;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

pub struct RetrievePhase;

#[async_trait]
impl WorkflowPhase for RetrievePhase {
    fn name(&self) -> &'static str {
        "RetrievePhase"
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint::Retrieve
    }

    async fn execute(&self, context: &mut AnalysisContext) -> Result<()> {
        let detections = context
            .detections
            .as_ref()
            .context("Detections must be available before RetrievePhase")?;

        let outcome = if detections.is_empty() {
            debug!("No techniques detected, skipping literature search");
            RetrievalOutcome::default()
        } else {
            context.services.retriever.retrieve(detections).await
        };

        context.retrieval = Some(outcome);
        Ok(())
    }
}
