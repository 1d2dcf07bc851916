//! Subcommand handlers. Each returns the process exit code.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, error, info};
use uuid::Uuid;

use super::commands::{AnalyzeArgs, DetectArgs};
use super::output::{DetectionSummary, OutputFormatter};
use super::progress::ProgressBarHandler;
use crate::archive::{self, codebase_name_from, ArchiveExtractor};
use crate::config::LitscoutConfig;
use crate::detection::TechniqueDetector;
use crate::jobs::{JobProgressHandler, JobRegistry};
use crate::pipeline::analyze;
use crate::progress::{FanoutHandler, LoggingHandler};
use crate::scan::SourceScanner;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG: i32 = 2;

fn apply_overrides(config: &mut LitscoutConfig, args: &AnalyzeArgs) {
    if let Some(provider) = args.provider {
        config.provider = provider;
    }
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    if let Some(timeout) = args.timeout {
        config.request_timeout_secs = timeout;
    }
    config.offline |= args.offline;
}

fn write_output(content: &str, destination: Option<&Path>) -> Result<()> {
    match destination {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

pub async fn handle_analyze(args: &AnalyzeArgs, quiet: bool) -> i32 {
    let mut config = LitscoutConfig::default();
    apply_overrides(&mut config, args);

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return EXIT_CONFIG;
    }
    debug!("{}", config);

    let codebase_name = args
        .name
        .clone()
        .unwrap_or_else(|| codebase_name_from(&args.path));

    let registry = Arc::new(JobRegistry::new());
    let job_id = Uuid::new_v4();
    registry.create(job_id);

    let mut progress = FanoutHandler::new()
        .with(Arc::new(LoggingHandler))
        .with(Arc::new(JobProgressHandler::new(Arc::clone(&registry), job_id)));
    if !quiet && !args.no_progress {
        if let Some(bar) = ProgressBarHandler::for_terminal() {
            progress = progress.with(Arc::new(bar));
        }
    }

    let report = match analyze(&args.path, &codebase_name, &config, Arc::new(progress)).await {
        Ok(report) => report,
        Err(e) => {
            error!(job = %job_id, "{}", e);
            eprintln!("Error: {}", e);
            return EXIT_FAILURE;
        }
    };

    registry.complete(job_id, report.clone());

    let formatter = OutputFormatter::new(args.format.into());
    let rendered = match formatter.format_report(&report) {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return EXIT_FAILURE;
        }
    };

    match write_output(&rendered, args.output.as_deref()) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_FAILURE
        }
    }
}

fn detect_summary(path: &Path) -> Result<DetectionSummary> {
    let tree = ArchiveExtractor::new()
        .extract(path)
        .with_context(|| format!("Failed to prepare {}", path.display()))?;

    let scan = match SourceScanner::new(tree.root()) {
        Ok(scanner) => scanner.scan(),
        Err(e) => {
            archive::cleanup_quietly(tree);
            return Err(e).context("Failed to create SourceScanner");
        }
    };
    archive::cleanup_quietly(tree);

    let techniques = TechniqueDetector::detect(&scan);
    Ok(DetectionSummary::new(codebase_name_from(path), &scan, techniques))
}

pub fn handle_detect(args: &DetectArgs) -> i32 {
    let summary = match detect_summary(&args.path) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return EXIT_FAILURE;
        }
    };

    match OutputFormatter::new(args.format.into()).format_detections(&summary) {
        Ok(rendered) => {
            println!("{}", rendered);
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::OutputFormatArg;
    use genai::adapter::AdapterKind;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn analyze_args(path: &Path) -> AnalyzeArgs {
        AnalyzeArgs {
            path: path.to_path_buf(),
            name: None,
            format: OutputFormatArg::Json,
            output: None,
            offline: false,
            provider: None,
            model: None,
            timeout: None,
            no_progress: true,
        }
    }

    #[test]
    fn test_overrides_replace_env_values() {
        let mut config = LitscoutConfig::default();
        let mut args = analyze_args(Path::new("app"));
        args.provider = Some(AdapterKind::Groq);
        args.model = Some("llama-3.1-8b-instant".to_string());
        args.timeout = Some(12);
        args.offline = true;

        apply_overrides(&mut config, &args);

        assert_eq!(config.provider, AdapterKind::Groq);
        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.request_timeout_secs, 12);
        assert!(config.offline);
    }

    #[test]
    fn test_detect_summary_on_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("requirements.txt"), "openai>=1.0\n").unwrap();
        fs::write(dir.path().join("main.py"), "import openai\n").unwrap();

        let summary = detect_summary(dir.path()).unwrap();

        assert_eq!(summary.files_scanned, 1);
        assert_eq!(summary.techniques.len(), 1);
        assert!(dir.path().join("main.py").exists());
    }

    #[test]
    fn test_detect_summary_missing_path() {
        let err = detect_summary(&PathBuf::from("/nonexistent/app.tar.gz")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/app.tar.gz"));
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("report.json");

        write_output("{}", Some(&target)).unwrap();
        assert_eq!(fs::read_to_string(target).unwrap(), "{}");
    }
}
