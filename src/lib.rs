//! litscout - research-backed recommendations for GenAI codebases
//!
//! Scans a Python codebase for GenAI techniques, searches recent literature on
//! each one, extracts failure modes and best practices from the papers and turns
//! them into prioritized recommendations that point back at the code.
//!
//! # Pipeline
//!
//! 1. [`archive`]: unpack the upload into scratch space
//! 2. [`scan`]: collect imports, declared dependencies and file contents
//! 3. [`detection`]: map libraries and source patterns onto the technique taxonomy
//! 4. [`literature`]: query Semantic Scholar (arXiv as fallback) and rank papers
//! 5. [`insights`]: extract structured findings per paper
//! 6. [`recommend`]: synthesize deduplicated, prioritized recommendations
//! 7. [`report`]: assemble the final report
//!
//! [`pipeline`] drives the stages and reports progress through [`progress`].
//!
//! # Example
//!
//! ```no_run
//! use litscout::{analyze, LitscoutConfig, LoggingHandler};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LitscoutConfig::default();
//! let report = analyze(
//!     Path::new("app.tar.gz"),
//!     "app",
//!     &config,
//!     Arc::new(LoggingHandler),
//! )
//! .await?;
//! println!("{} recommendation(s)", report.recommendations.len());
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod cli;
pub mod config;
pub mod detection;
pub mod insights;
pub mod jobs;
pub mod literature;
pub mod llm;
pub mod pipeline;
pub mod progress;
pub mod recommend;
pub mod report;
pub mod scan;
pub mod types;
pub mod util;

pub use archive::{ArchiveError, ArchiveExtractor, ExtractedTree};
pub use config::{ConfigError, LitscoutConfig};
pub use detection::{TechniqueDetection, TechniqueDetector, TechniqueKind};
pub use jobs::{JobProgressHandler, JobRecord, JobRegistry, JobStatus};
pub use literature::{LiteratureRetriever, Paper, PaperSource};
pub use llm::{BackendError, LLMClient};
pub use pipeline::{analyze, AnalysisError, PipelineConfig, PipelineContext, PipelineOrchestrator};
pub use progress::{CallbackHandler, Checkpoint, LoggingHandler, NoOpHandler, ProgressEvent, ProgressHandler};
pub use recommend::{FailureMode, Recommendation, RecommendationType};
pub use report::Report;
pub use scan::{ScanResult, SourceScanner};
pub use types::{Level, Severity};
pub use util::{init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
