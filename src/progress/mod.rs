//! Progress reporting for analysis runs

mod checkpoint;
mod handler;
mod logging;

pub use checkpoint::Checkpoint;
pub use handler::{CallbackHandler, FanoutHandler, NoOpHandler, ProgressEvent, ProgressHandler};
pub use logging::LoggingHandler;
