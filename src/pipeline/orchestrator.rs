use super::context::{AnalysisContext, PipelineContext};
use super::error::AnalysisError;
use super::phase_trait::WorkflowPhase;
use super::phases::{
    AssemblePhase, DetectPhase, ExtractPhase, InsightsPhase, RetrievePhase, ScanPhase,
    SynthesizePhase,
};
use crate::archive::{self, ArchiveError};
use crate::progress::{Checkpoint, NoOpHandler, ProgressEvent, ProgressHandler};
use crate::report::Report;
use crate::scan::ScanError;
use anyhow::Context;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Runs the analysis phases in order for one input.
///
/// Scratch space created for an archive is removed whether the run succeeds or
/// fails. A failed run yields only the error.
pub struct PipelineOrchestrator {
    services: Arc<PipelineContext>,
    progress_handler: Arc<dyn ProgressHandler>,
}

impl PipelineOrchestrator {
    pub fn new(services: Arc<PipelineContext>) -> Self {
        Self {
            services,
            progress_handler: Arc::new(NoOpHandler),
        }
    }

    pub fn with_progress(mut self, handler: Arc<dyn ProgressHandler>) -> Self {
        self.progress_handler = handler;
        self
    }

    pub async fn execute(&self, input: &Path, codebase_name: &str) -> Result<Report, AnalysisError> {
        let start = Instant::now();
        info!(
            codebase = codebase_name,
            input = %input.display(),
            "Starting analysis"
        );

        self.progress_handler.on_progress(&ProgressEvent::Started {
            codebase: codebase_name.to_string(),
        });

        let mut context = AnalysisContext::new(input, codebase_name, Arc::clone(&self.services));
        let result = self.run_phases(&mut context).await;

        if let Some(tree) = context.take_tree() {
            archive::cleanup_quietly(tree);
        }

        match result {
            Ok(()) => {
                let report = context.report.take().ok_or_else(|| AnalysisError::StageFailed {
                    stage: "AssemblePhase".to_string(),
                    message: "Report was not produced".to_string(),
                })?;

                self.progress_handler
                    .on_progress(&ProgressEvent::checkpoint(Checkpoint::Done));
                self.progress_handler.on_progress(&ProgressEvent::Completed {
                    total_time: start.elapsed(),
                    recommendations: report.recommendations.len(),
                });
                info!(
                    codebase = codebase_name,
                    risk = %report.overall_risk,
                    recommendations = report.recommendations.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Analysis complete"
                );
                Ok(report)
            }
            Err(err) => {
                error!(stage = err.stage(), "Analysis failed: {}", err.message());
                self.progress_handler.on_progress(&ProgressEvent::Failed {
                    stage: err.stage().to_string(),
                    error: err.message().to_string(),
                });
                Err(err)
            }
        }
    }

    async fn run_phases(&self, context: &mut AnalysisContext) -> Result<(), AnalysisError> {
        let workflow_phases: Vec<Box<dyn WorkflowPhase>> = vec![
            Box::new(ExtractPhase),
            Box::new(ScanPhase),
            Box::new(DetectPhase),
            Box::new(RetrievePhase),
            Box::new(InsightsPhase),
            Box::new(SynthesizePhase),
            Box::new(AssemblePhase),
        ];

        for phase in workflow_phases {
            let phase_name = phase.name();
            info!("Phase: {}", phase_name);

            self.progress_handler
                .on_progress(&ProgressEvent::checkpoint(phase.checkpoint()));
            self.progress_handler.on_progress(&ProgressEvent::PhaseStarted {
                phase: phase_name.to_string(),
            });

            let phase_start = Instant::now();
            phase
                .execute(context)
                .await
                .with_context(|| format!("Phase {} failed", phase_name))
                .map_err(|err| classify_failure(phase_name, err))?;

            self.progress_handler.on_progress(&ProgressEvent::PhaseComplete {
                phase: phase_name.to_string(),
                duration: phase_start.elapsed(),
            });

            debug!("Phase {} complete", phase_name);
        }

        Ok(())
    }
}

/// Input problems surface as [`AnalysisError::InvalidInput`], everything else as
/// a stage failure carrying the full error chain.
fn classify_failure(phase_name: &str, err: anyhow::Error) -> AnalysisError {
    let message = format!("{:#}", err);
    let is_input = err.chain().any(|cause| {
        cause.downcast_ref::<ArchiveError>().is_some() || cause.downcast_ref::<ScanError>().is_some()
    });

    if is_input {
        AnalysisError::InvalidInput(message)
    } else {
        AnalysisError::StageFailed {
            stage: phase_name.to_string(),
            message,
        }
    }
}
