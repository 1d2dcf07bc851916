use crate::pipeline::context::AnalysisContext;
use crate::pipeline::phase_trait::WorkflowPhase;
use crate::progress::Checkpoint;
use crate::report::{Degradation, ReportBuilder};
use anyhow::{Context, Result};
use async_trait::async_trait;

pub struct AssemblePhase;

#[async_trait]
impl WorkflowPhase for AssemblePhase {
    fn name(&self) -> &'static str {
        "AssemblePhase"
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint::Build
    }

    async fn execute(&self, context: &mut AnalysisContext) -> Result<()> {
        let techniques = context
            .detections
            .take()
            .context("Detections must be available before AssemblePhase")?;
        let retrieval = context
            .retrieval
            .take()
            .context("Papers must be retrieved before AssemblePhase")?;
        let batch = context
            .insights
            .take()
            .context("Insights must be extracted before AssemblePhase")?;
        let synthesis = context
            .synthesis
            .take()
            .context("Recommendations must be synthesized before AssemblePhase")?;

        let degradation = Degradation {
            failed_queries: retrieval.degraded_queries,
            degraded_extractions: batch.degraded,
            used_fallback: batch.used_fallback,
        };

        let report = ReportBuilder::new(context.codebase_name.clone())
            .techniques(techniques)
            .papers(retrieval.papers)
            .synthesis(synthesis)
            .degradation(degradation)
            .duration(context.started.elapsed())
            .build();

        context.report = Some(report);
        Ok(())
    }
}
