use super::registry::JobRegistry;
use crate::progress::{ProgressEvent, ProgressHandler};
use std::sync::Arc;
use uuid::Uuid;

/// Forwards checkpoints and failures of one run into its registry entry.
///
/// Completion is recorded by the caller with [`JobRegistry::complete`], since only
/// the caller holds the report.
pub struct JobProgressHandler {
    registry: Arc<JobRegistry>,
    job_id: Uuid,
}

impl JobProgressHandler {
    pub fn new(registry: Arc<JobRegistry>, job_id: Uuid) -> Self {
        Self { registry, job_id }
    }
}

impl ProgressHandler for JobProgressHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Checkpoint { percent, status } if *percent < 100 => {
                self.registry.update(self.job_id, *percent, status.clone());
            }
            ProgressEvent::Failed { stage, error } => {
                self.registry
                    .fail(self.job_id, format!("{} ({})", error, stage));
            }
            _ => {}
        }
    }
}
