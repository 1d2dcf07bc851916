use crate::detection::TechniqueDetector;
use crate::pipeline::context::AnalysisContext;
use crate::pipeline::phase_trait::WorkflowPhase;
use crate::progress::Checkpoint;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

pub struct DetectPhase;

#[async_trait]
impl WorkflowPhase for DetectPhase {
    fn name(&self) -> &'static str {
        "DetectPhase"
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint::Detect
    }

    async fn execute(&self, context: &mut AnalysisContext) -> Result<()> {
        let scan = context
            .scan
            .as_ref()
            .context("Scan must be available before DetectPhase")?;

        let detections = TechniqueDetector::detect(scan);
        info!(
            techniques = ?detections.iter().map(|d| d.kind.key()).collect::<Vec<_>>(),
            "Techniques detected"
        );

        context.detections = Some(detections);
        Ok(())
    }
}
