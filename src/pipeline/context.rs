//! Pipeline contexts
//!
//! [`PipelineContext`] owns the long-lived services shared by every run.
//! [`AnalysisContext`] carries the state of one run from phase to phase.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::archive::{ArchiveExtractor, ExtractedTree};
use crate::config::LitscoutConfig;
use crate::detection::TechniqueDetection;
use crate::insights::{InsightBatch, InsightExtractor};
use crate::literature::{ArxivSource, LiteratureRetriever, RetrievalOutcome, SemanticScholarSource};
use crate::llm::select_extraction_backend;
use crate::recommend::Synthesis;
use crate::report::Report;
use crate::scan::ScanResult;

use super::config::PipelineConfig;

/// Context that owns all long-lived pipeline dependencies
pub struct PipelineContext {
    pub archive: ArchiveExtractor,

    pub retriever: LiteratureRetriever,

    pub insight_extractor: InsightExtractor,

    pub config: PipelineConfig,
}

impl PipelineContext {
    pub fn new(
        retriever: LiteratureRetriever,
        insight_extractor: InsightExtractor,
        config: PipelineConfig,
    ) -> Self {
        let archive = match &config.scratch_dir {
            Some(dir) => ArchiveExtractor::new().with_scratch_parent(dir),
            None => ArchiveExtractor::new(),
        };

        Self {
            archive,
            retriever,
            insight_extractor,
            config,
        }
    }

    /// Wires the real services: Semantic Scholar with an arXiv fallback, and the
    /// extraction backend picked from the configured provider.
    pub async fn from_config(config: &LitscoutConfig, pipeline: PipelineConfig) -> Self {
        let timeout = config.request_timeout();

        let primary = Arc::new(SemanticScholarSource::new(
            config.semantic_scholar_url.clone(),
            config.semantic_scholar_api_key.clone(),
            timeout,
        ));
        let secondary = Arc::new(ArxivSource::new(config.arxiv_url.clone(), timeout));
        let retriever =
            LiteratureRetriever::new(primary, config.retrieval_config()).with_secondary(secondary);

        let backend = select_extraction_backend(config).await;
        if let Some(selected) = &backend {
            info!("Insight extraction backend: {}", selected.description);
        }
        let insight_extractor = InsightExtractor::new(
            backend.map(|selected| selected.client),
            config.extraction_config(),
        );

        Self::new(retriever, insight_extractor, pipeline)
    }
}

/// Mutable state of a single analysis run. Each phase fills in its slot.
pub struct AnalysisContext {
    pub input: PathBuf,
    pub codebase_name: String,
    pub services: Arc<PipelineContext>,
    pub started: Instant,

    pub tree: Option<ExtractedTree>,
    pub scan: Option<ScanResult>,
    pub detections: Option<Vec<TechniqueDetection>>,
    pub retrieval: Option<RetrievalOutcome>,
    pub insights: Option<InsightBatch>,
    pub synthesis: Option<Synthesis>,
    pub report: Option<Report>,
}

impl AnalysisContext {
    pub fn new(
        input: impl Into<PathBuf>,
        codebase_name: impl Into<String>,
        services: Arc<PipelineContext>,
    ) -> Self {
        Self {
            input: input.into(),
            codebase_name: codebase_name.into(),
            services,
            started: Instant::now(),
            tree: None,
            scan: None,
            detections: None,
            retrieval: None,
            insights: None,
            synthesis: None,
            report: None,
        }
    }

    /// Takes the extracted tree out of the context so it can be cleaned up.
    pub fn take_tree(&mut self) -> Option<ExtractedTree> {
        self.tree.take()
    }
}
