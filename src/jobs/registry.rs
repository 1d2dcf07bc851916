use crate::report::Report;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JobRecord {
    pub id: Uuid,
    pub status: JobStatus,
    pub progress: u8,
    pub message: String,
    pub report: Option<Report>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobRecord {
    fn new(id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            status: JobStatus::Pending,
            progress: 0,
            message: "Queued".to_string(),
            report: None,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Shared table of job records keyed by id.
///
/// Terminal records are frozen: later updates for the same id are ignored.
#[derive(Debug, Default)]
pub struct JobRegistry {
    jobs: Mutex<HashMap<Uuid, JobRecord>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, JobRecord>> {
        self.jobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Registers a pending job. An existing record with the same id is replaced.
    pub fn create(&self, id: Uuid) -> JobRecord {
        let record = JobRecord::new(id);
        self.lock().insert(id, record.clone());
        debug!(job = %id, "Job created");
        record
    }

    /// Records progress. Returns false when the job is unknown or already finished.
    pub fn update(&self, id: Uuid, progress: u8, message: impl Into<String>) -> bool {
        self.modify(id, |record| {
            record.status = JobStatus::Processing;
            record.progress = progress.min(100).max(record.progress);
            record.message = message.into();
        })
    }

    pub fn complete(&self, id: Uuid, report: Report) -> bool {
        self.modify(id, |record| {
            record.status = JobStatus::Completed;
            record.progress = 100;
            record.message = "Analysis complete".to_string();
            record.report = Some(report);
        })
    }

    pub fn fail(&self, id: Uuid, error: impl Into<String>) -> bool {
        self.modify(id, |record| {
            let error = error.into();
            record.status = JobStatus::Failed;
            record.message = format!("Analysis failed: {}", error);
            record.error = Some(error);
        })
    }

    pub fn get(&self, id: Uuid) -> Option<JobRecord> {
        self.lock().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn modify(&self, id: Uuid, apply: impl FnOnce(&mut JobRecord)) -> bool {
        let mut jobs = self.lock();
        match jobs.get_mut(&id) {
            Some(record) if record.status.is_terminal() => {
                warn!(job = %id, status = %record.status, "Ignoring update for finished job");
                false
            }
            Some(record) => {
                apply(record);
                record.updated_at = Utc::now();
                true
            }
            None => {
                warn!(job = %id, "Ignoring update for unknown job");
                false
            }
        }
    }
}
