mod support;

use litscout::literature::MockPaperSource;
use litscout::llm::{MockLLMClient, MockResponse};
use litscout::pipeline::{PipelineConfig, PipelineOrchestrator};
use litscout::progress::ProgressEvent;
use litscout::{AnalysisError, BackendError, Level, Paper, TechniqueKind};
use std::path::Path;
use std::sync::Arc;
use support::{fixture, services, RecordingHandler};
use tempfile::TempDir;

fn empty_services() -> Arc<litscout::PipelineContext> {
    services(
        Arc::new(MockPaperSource::new("mock")),
        None,
        PipelineConfig::default(),
    )
}

#[tokio::test]
async fn test_missing_input_fails_without_report() {
    let handler = Arc::new(RecordingHandler::default());
    let orchestrator = PipelineOrchestrator::new(empty_services()).with_progress(handler.clone());

    let err = orchestrator
        .execute(Path::new("/nonexistent/upload.tar.gz"), "upload")
        .await
        .unwrap_err();

    assert!(err.is_input_error());
    assert!(err.message().contains("does not exist"));
    assert!(!handler.percents().contains(&100));
    assert!(matches!(
        handler.events().last(),
        Some(ProgressEvent::Failed { .. })
    ));
}

#[tokio::test]
async fn test_unsupported_upload_is_rejected() {
    let dir = TempDir::new().unwrap();
    let upload = dir.path().join("app.7z");
    std::fs::write(&upload, b"7z\xbc\xaf\x27\x1c").unwrap();

    let err = PipelineOrchestrator::new(empty_services())
        .execute(&upload, "app")
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::InvalidInput(_)));
    assert!(err.message().contains("Unsupported archive format"));
}

#[tokio::test]
async fn test_corrupt_tarball_leaves_no_scratch() {
    let dir = TempDir::new().unwrap();
    let scratch = dir.path().join("scratch");
    std::fs::create_dir(&scratch).unwrap();
    let upload = dir.path().join("app.tar.gz");
    std::fs::write(&upload, b"this is not a gzip stream").unwrap();

    let config = PipelineConfig::default().with_scratch_dir(&scratch);
    let orchestrator = PipelineOrchestrator::new(services(
        Arc::new(MockPaperSource::new("mock")),
        None,
        config,
    ));

    let err = orchestrator.execute(&upload, "app").await.unwrap_err();

    assert!(err.is_input_error());
    assert!(err.message().contains("Failed to unpack archive"));
    assert_eq!(std::fs::read_dir(&scratch).unwrap().count(), 0);
}

#[tokio::test]
async fn test_corrupt_zip_is_an_input_error() {
    let dir = TempDir::new().unwrap();
    let upload = dir.path().join("app.zip");
    std::fs::write(&upload, b"PK\x03\x04").unwrap();

    let err = PipelineOrchestrator::new(empty_services())
        .execute(&upload, "app")
        .await
        .unwrap_err();

    assert!(err.is_input_error());
    assert!(err.message().contains("Failed to unpack archive"));
}

#[tokio::test]
async fn test_failed_searches_are_reported_as_limitations() {
    let source = Arc::new(
        MockPaperSource::new("flaky")
            .with_failure(TechniqueKind::Rag, "HTTP 503")
            .with_failure(TechniqueKind::LlmApi, "HTTP 503"),
    );
    let orchestrator =
        PipelineOrchestrator::new(services(source, None, PipelineConfig::default()));

    let report = orchestrator
        .execute(&fixture("rag-app"), "rag-app")
        .await
        .unwrap();

    assert_eq!(report.techniques_detected, 4);
    assert!(report.papers.is_empty());
    assert!(report
        .limitations
        .iter()
        .any(|l| l == "2 literature search(es) failed; paper coverage may be incomplete"));
}

#[tokio::test]
async fn test_model_errors_degrade_single_papers() {
    let source = Arc::new(MockPaperSource::new("mock").with_papers(
        TechniqueKind::Rag,
        vec![Paper::new("Chunking strategies for RAG", TechniqueKind::Rag).with_year(2024)],
    ));
    let llm = MockLLMClient::new();
    llm.add_response(MockResponse::error(BackendError::Timeout { seconds: 30 }));

    let orchestrator = PipelineOrchestrator::new(services(
        source,
        Some(Arc::new(llm)),
        PipelineConfig::default(),
    ));

    let report = orchestrator
        .execute(&fixture("rag-app"), "rag-app")
        .await
        .unwrap();

    assert_eq!(report.papers_analyzed, 1);
    assert!(report.recommendations.is_empty());
    assert_eq!(report.overall_risk, Level::Low);
    assert!(report
        .limitations
        .iter()
        .any(|l| l == "1 paper(s) could not be analyzed by the extraction model"));
}

#[tokio::test]
async fn test_malformed_model_output_is_not_fatal() {
    let source = Arc::new(MockPaperSource::new("mock").with_papers(
        TechniqueKind::Rag,
        vec![Paper::new("Evaluating retrievers", TechniqueKind::Rag).with_year(2023)],
    ));
    let llm = MockLLMClient::new();
    llm.add_response(MockResponse::text("I could not find any failure modes."));

    let report = PipelineOrchestrator::new(services(
        source,
        Some(Arc::new(llm)),
        PipelineConfig::default(),
    ))
    .execute(&fixture("rag-app"), "rag-app")
    .await
    .unwrap();

    assert!(report.failure_modes.is_empty());
    assert_eq!(report.critical_issues, 0);
}
