//! Terminal progress bar driven by pipeline events

use crate::progress::{ProgressEvent, ProgressHandler};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const BAR_TEMPLATE: &str = "{spinner:.cyan} [{bar:30.cyan/blue}] {pos:>3}% {msg}";

pub struct ProgressBarHandler {
    bar: ProgressBar,
}

impl ProgressBarHandler {
    /// Returns `None` when stderr is not a terminal.
    pub fn for_terminal() -> Option<Self> {
        if !atty::is(atty::Stream::Stderr) {
            return None;
        }
        Some(Self::new(ProgressBar::new(100)))
    }

    fn new(bar: ProgressBar) -> Self {
        bar.set_style(
            ProgressStyle::with_template(BAR_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar }
    }
}

impl ProgressHandler for ProgressBarHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Checkpoint { percent, status } => {
                self.bar.set_position(u64::from(*percent));
                self.bar.set_message(status.clone());
            }
            ProgressEvent::Completed { total_time, .. } => {
                self.bar.finish_with_message(format!(
                    "Analysis complete in {:.1}s",
                    total_time.as_secs_f64()
                ));
            }
            ProgressEvent::Failed { stage, .. } => {
                self.bar.abandon_with_message(format!("Failed during {}", stage));
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::Checkpoint;

    #[test]
    fn test_checkpoints_move_bar() {
        let handler = ProgressBarHandler::new(ProgressBar::hidden());
        handler.bar.set_length(100);

        handler.on_progress(&ProgressEvent::checkpoint(Checkpoint::ExtractInsights));
        assert_eq!(handler.bar.position(), 60);
        assert_eq!(handler.bar.message(), "Extracting insights from papers...");

        handler.on_progress(&ProgressEvent::Completed {
            total_time: Duration::from_secs(2),
            recommendations: 3,
        });
        assert!(handler.bar.is_finished());
    }
}
