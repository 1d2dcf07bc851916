pub mod commands;
pub mod handlers;
pub mod output;
mod progress;

pub use commands::{AnalyzeArgs, CliArgs, Commands, DetectArgs, OutputFormatArg};
pub use output::{DetectionSummary, OutputFormat, OutputFormatter};
pub use progress::ProgressBarHandler;
