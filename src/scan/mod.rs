//! Source scanning
//!
//! Walks an extracted codebase, records per-file content and imports, and merges
//! them with the packages declared in manifests.

pub mod manifest;
mod scanner;
mod types;

pub use scanner::{parse_imports, ScanConfig, ScanError, SourceScanner};
pub use types::{DependencySource, FileOutcome, ScanResult, SkippedFile, SourceFile};
