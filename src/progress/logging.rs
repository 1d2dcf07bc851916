//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{debug, info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { codebase } => {
                info!(codebase = %codebase, "Starting analysis");
            }
            ProgressEvent::Checkpoint { percent, status } => {
                info!(percent, "{}", status);
            }
            ProgressEvent::PhaseStarted { phase } => {
                debug!(phase = %phase, "Starting phase");
            }
            ProgressEvent::PhaseComplete { phase, duration } => {
                debug!(
                    phase = %phase,
                    duration_ms = duration.as_millis(),
                    "Phase complete"
                );
            }
            ProgressEvent::Completed {
                total_time,
                recommendations,
            } => {
                info!(
                    recommendations,
                    total_time_ms = total_time.as_millis(),
                    "Analysis complete"
                );
            }
            ProgressEvent::Failed { stage, error } => {
                warn!(stage = %stage, error = %error, "Analysis failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::Checkpoint;
    use std::time::Duration;

    #[test]
    fn test_logging_all_events() {
        let handler = LoggingHandler;

        let events = vec![
            ProgressEvent::Started {
                codebase: "demo".to_string(),
            },
            ProgressEvent::checkpoint(Checkpoint::Extract),
            ProgressEvent::PhaseStarted {
                phase: "scan".to_string(),
            },
            ProgressEvent::PhaseComplete {
                phase: "scan".to_string(),
                duration: Duration::from_millis(12),
            },
            ProgressEvent::Completed {
                total_time: Duration::from_secs(3),
                recommendations: 4,
            },
            ProgressEvent::Failed {
                stage: "scan".to_string(),
                error: "Test error".to_string(),
            },
        ];

        for event in events {
            handler.on_progress(&event);
        }
    }
}
