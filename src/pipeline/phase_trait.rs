use super::context::AnalysisContext;
use crate::progress::Checkpoint;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait WorkflowPhase: Send + Sync {
    fn name(&self) -> &'static str;

    /// Checkpoint reported just before the phase runs
    fn checkpoint(&self) -> Checkpoint;

    async fn execute(&self, context: &mut AnalysisContext) -> Result<()>;
}
