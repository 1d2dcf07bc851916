//! Analysis pipeline
//!
//! Extract, parse, detect, retrieve, extract insights, synthesize, build. Each
//! stage is a [`WorkflowPhase`] driven by the [`PipelineOrchestrator`].

pub mod config;
pub mod context;
mod error;
pub mod orchestrator;
mod phase_trait;
pub mod phases;

pub use config::PipelineConfig;
pub use context::{AnalysisContext, PipelineContext};
pub use error::AnalysisError;
pub use orchestrator::PipelineOrchestrator;
pub use phase_trait::WorkflowPhase;

use crate::config::LitscoutConfig;
use crate::progress::ProgressHandler;
use crate::report::Report;
use std::path::Path;
use std::sync::Arc;

/// Analyzes one archive or source directory with services built from `config`.
pub async fn analyze(
    input: &Path,
    codebase_name: &str,
    config: &LitscoutConfig,
    progress: Arc<dyn ProgressHandler>,
) -> Result<Report, AnalysisError> {
    let services = PipelineContext::from_config(config, PipelineConfig::default()).await;
    PipelineOrchestrator::new(Arc::new(services))
        .with_progress(progress)
        .execute(input, codebase_name)
        .await
}
