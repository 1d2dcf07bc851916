use crate::pipeline::context::AnalysisContext;
use crate::pipeline::phase_trait::WorkflowPhase;
use crate::progress::Checkpoint;
use crate::recommend::RecommendationSynthesizer;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

pub struct SynthesizePhase;

#[async_trait]
impl WorkflowPhase for SynthesizePhase {
    fn name(&self) -> &'static str {
        "SynthesizePhase"
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint::Synthesize
    }

    async fn execute(&self, context: &mut AnalysisContext) -> Result<()> {
        let detections = context
            .detections
            .as_deref()
            .context("Detections must be available before SynthesizePhase")?;
        let batch = context
            .insights
            .as_ref()
            .context("Insights must be extracted before SynthesizePhase")?;

        let synthesis = RecommendationSynthesizer::new(detections).synthesize(&batch.insights);
        info!(
            recommendations = synthesis.recommendations.len(),
            failure_modes = synthesis.failure_modes.len(),
            "Recommendations synthesized"
        );

        context.synthesis = Some(synthesis);
        Ok(())
    }
}
