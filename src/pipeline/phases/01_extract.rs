use crate::pipeline::context::AnalysisContext;
use crate::pipeline::phase_trait::WorkflowPhase;
use crate::progress::Checkpoint;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

pub struct ExtractPhase;

#[async_trait]
impl WorkflowPhase for ExtractPhase {
    fn name(&self) -> &'static str {
        "ExtractPhase"
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint::Extract
    }

    async fn execute(&self, context: &mut AnalysisContext) -> Result<()> {
        let tree = context
            .services
            .archive
            .extract(&context.input)
            .with_context(|| format!("Failed to prepare {}", context.input.display()))?;

        debug!(
            root = %tree.root().display(),
            scratch = tree.is_scratch(),
            "Source tree ready"
        );
        context.tree = Some(tree);
        Ok(())
    }
}
