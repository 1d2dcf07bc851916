//! In-process job tracking
//!
//! Records the status and progress of analysis runs so callers can poll them.
//! The pipeline itself never touches the registry; it reports through a
//! [`JobProgressHandler`].

mod handler;
mod registry;

pub use handler::JobProgressHandler;
pub use registry::{JobRecord, JobRegistry, JobStatus};
