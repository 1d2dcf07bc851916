use crate::pipeline::context::AnalysisContext;
use crate::pipeline::phase_trait::WorkflowPhase;
use crate::progress::Checkpoint;
use crate::scan::SourceScanner;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{info, warn};

pub struct ScanPhase;

#[async_trait]
impl WorkflowPhase for ScanPhase {
    fn name(&self) -> &'static str {
        "ScanPhase"
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint::Parse
    }

    async fn execute(&self, context: &mut AnalysisContext) -> Result<()> {
        let tree = context
            .tree
            .as_ref()
            .context("Source tree must be extracted before ScanPhase")?;

        let scanner = SourceScanner::new(tree.root())
            .context("Failed to create SourceScanner")?
            .with_config(context.services.config.scan.clone());
        let scan = scanner.scan();

        if !scan.skipped.is_empty() {
            warn!(skipped = scan.skipped.len(), "Some source files could not be parsed");
        }
        info!(
            files = scan.files.len(),
            imports = scan.imports.len(),
            dependencies = scan.dependencies.len(),
            lines = scan.total_lines(),
            "Codebase parsed"
        );

        context.scan = Some(scan);
        Ok(())
    }
}
