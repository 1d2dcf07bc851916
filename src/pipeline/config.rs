use crate::scan::ScanConfig;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub scan: ScanConfig,
    /// Parent directory for extracted archives. The system temp dir when unset.
    pub scratch_dir: Option<PathBuf>,
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scan_config(mut self, scan: ScanConfig) -> Self {
        self.scan = scan;
        self
    }

    pub fn with_scratch_dir(mut self, scratch_dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(scratch_dir.into());
        self
    }
}
