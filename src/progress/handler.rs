//! Progress handler trait and events

use super::checkpoint::Checkpoint;
use std::sync::Arc;
use std::time::Duration;

/// Events emitted while an analysis runs
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Analysis started
    Started { codebase: String },

    /// A fixed checkpoint was reached
    Checkpoint { percent: u8, status: String },

    PhaseStarted { phase: String },

    PhaseComplete { phase: String, duration: Duration },

    /// Analysis completed successfully
    Completed {
        total_time: Duration,
        recommendations: usize,
    },

    /// Analysis failed in the named stage
    Failed { stage: String, error: String },
}

impl ProgressEvent {
    pub fn checkpoint(checkpoint: Checkpoint) -> Self {
        ProgressEvent::Checkpoint {
            percent: checkpoint.percent(),
            status: checkpoint.status().to_string(),
        }
    }
}

/// Trait for handling progress events during an analysis
pub trait ProgressHandler: Send + Sync {
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}

type CheckpointFn = dyn Fn(u8, &str) + Send + Sync;

/// Forwards checkpoints to a `(percent, status)` callback and ignores the rest
pub struct CallbackHandler {
    callback: Box<CheckpointFn>,
}

impl CallbackHandler {
    pub fn new(callback: impl Fn(u8, &str) + Send + Sync + 'static) -> Self {
        Self {
            callback: Box::new(callback),
        }
    }
}

impl ProgressHandler for CallbackHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        if let ProgressEvent::Checkpoint { percent, status } = event {
            (self.callback)(*percent, status);
        }
    }
}

/// Sends every event to each wrapped handler in order
#[derive(Default, Clone)]
pub struct FanoutHandler {
    handlers: Vec<Arc<dyn ProgressHandler>>,
}

impl FanoutHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, handler: Arc<dyn ProgressHandler>) -> Self {
        self.handlers.push(handler);
        self
    }
}

impl ProgressHandler for FanoutHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        for handler in &self.handlers {
            handler.on_progress(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct CountingHandler {
        count: Arc<AtomicUsize>,
    }

    impl ProgressHandler for CountingHandler {
        fn on_progress(&self, _event: &ProgressEvent) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_noop_handler() {
        NoOpHandler.on_progress(&ProgressEvent::Started {
            codebase: "demo".to_string(),
        });
    }

    #[test]
    fn test_callback_handler_only_sees_checkpoints() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let handler = CallbackHandler::new(move |percent, status| {
            sink.lock().unwrap().push((percent, status.to_string()));
        });

        handler.on_progress(&ProgressEvent::Started {
            codebase: "demo".to_string(),
        });
        handler.on_progress(&ProgressEvent::checkpoint(Checkpoint::Detect));
        handler.on_progress(&ProgressEvent::PhaseStarted {
            phase: "detect".to_string(),
        });

        assert_eq!(
            *seen.lock().unwrap(),
            vec![(30, "Detecting GenAI techniques...".to_string())]
        );
    }

    #[test]
    fn test_fanout_handler() {
        let count = Arc::new(AtomicUsize::new(0));
        let fanout = FanoutHandler::new()
            .with(Arc::new(CountingHandler {
                count: count.clone(),
            }))
            .with(Arc::new(CountingHandler {
                count: count.clone(),
            }));

        fanout.on_progress(&ProgressEvent::checkpoint(Checkpoint::Done));
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
