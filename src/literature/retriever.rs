use super::scoring;
use super::source::{PaperSource, QueryOutcome, SearchQuery};
use super::types::Paper;
use crate::detection::{TechniqueDetection, TechniqueKind};
use chrono::Datelike;
use futures_util::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Queries per technique sent to the primary source
const PRIMARY_QUERIES: usize = 2;
/// Results requested per query
const RESULTS_PER_QUERY: usize = 5;
/// Below this many primary results the secondary source is tried
const FALLBACK_THRESHOLD: usize = 3;

#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    pub max_per_technique: usize,
    pub max_total: usize,
    pub min_year: i32,
    /// Reference year for recency scoring and the search window
    pub current_year: i32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            max_per_technique: 5,
            max_total: 15,
            min_year: 2022,
            current_year: chrono::Utc::now().year(),
        }
    }
}

impl RetrievalConfig {
    pub fn with_max_per_technique(mut self, max: usize) -> Self {
        self.max_per_technique = max;
        self
    }

    pub fn with_max_total(mut self, max: usize) -> Self {
        self.max_total = max;
        self
    }

    pub fn with_min_year(mut self, year: i32) -> Self {
        self.min_year = year;
        self
    }

    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }
}

/// Ranked papers plus the number of queries that failed along the way
#[derive(Debug, Clone, Default)]
pub struct RetrievalOutcome {
    pub papers: Vec<Paper>,
    pub degraded_queries: usize,
}

struct TechniquePapers {
    papers: Vec<Paper>,
    failed_queries: usize,
}

/// Retrieves and ranks literature for detected techniques.
///
/// Techniques are searched concurrently; results are merged in technique order
/// once every search has finished, so ranking does not depend on timing.
pub struct LiteratureRetriever {
    primary: Arc<dyn PaperSource>,
    secondary: Option<Arc<dyn PaperSource>>,
    config: RetrievalConfig,
}

impl LiteratureRetriever {
    pub fn new(primary: Arc<dyn PaperSource>, config: RetrievalConfig) -> Self {
        Self {
            primary,
            secondary: None,
            config,
        }
    }

    pub fn with_secondary(mut self, secondary: Arc<dyn PaperSource>) -> Self {
        self.secondary = Some(secondary);
        self
    }

    pub async fn retrieve(&self, detections: &[TechniqueDetection]) -> RetrievalOutcome {
        let mut kinds: Vec<TechniqueKind> = Vec::new();
        for detection in detections {
            if !detection.kind.search_queries().is_empty() && !kinds.contains(&detection.kind) {
                kinds.push(detection.kind);
            }
        }

        let per_technique = join_all(kinds.iter().map(|kind| self.retrieve_for(*kind))).await;

        let degraded_queries = per_technique.iter().map(|t| t.failed_queries).sum();
        let papers = self.rank(per_technique.into_iter().flat_map(|t| t.papers));

        info!(
            techniques = kinds.len(),
            papers = papers.len(),
            degraded_queries,
            "Literature retrieval complete"
        );

        RetrievalOutcome {
            papers,
            degraded_queries,
        }
    }

    async fn retrieve_for(&self, kind: TechniqueKind) -> TechniquePapers {
        let queries = kind.search_queries();
        let mut papers = Vec::new();
        let mut failed_queries = 0;

        for query in queries.iter().take(PRIMARY_QUERIES) {
            match self.run_query(self.primary.as_ref(), query, kind).await {
                QueryOutcome::Papers(found) => papers.extend(found),
                QueryOutcome::Failed { query, error } => {
                    warn!(technique = %kind, query = %query, error = %error, "Literature query failed");
                    failed_queries += 1;
                }
            }
            if papers.len() >= self.config.max_per_technique {
                break;
            }
        }

        if papers.len() < FALLBACK_THRESHOLD {
            if let (Some(secondary), Some(query)) = (&self.secondary, queries.first()) {
                debug!(technique = %kind, found = papers.len(), "Falling back to secondary source");
                match self.run_query(secondary.as_ref(), query, kind).await {
                    QueryOutcome::Papers(found) => papers.extend(found),
                    QueryOutcome::Failed { query, error } => {
                        warn!(technique = %kind, query = %query, error = %error, "Fallback literature query failed");
                        failed_queries += 1;
                    }
                }
            }
        }

        papers.truncate(self.config.max_per_technique);
        TechniquePapers {
            papers,
            failed_queries,
        }
    }

    async fn run_query(
        &self,
        source: &dyn PaperSource,
        query: &str,
        technique: TechniqueKind,
    ) -> QueryOutcome {
        let search = SearchQuery {
            text: query,
            technique,
            limit: RESULTS_PER_QUERY,
            min_year: self.config.min_year,
            max_year: self.config.current_year,
        };

        match source.search(search).await {
            Ok(mut papers) => {
                for paper in &mut papers {
                    scoring::annotate(paper, self.config.current_year);
                }
                QueryOutcome::Papers(papers)
            }
            Err(error) => {
                debug!(source = source.name(), query, "Query returned an error");
                QueryOutcome::Failed {
                    query: query.to_string(),
                    error,
                }
            }
        }
    }

    /// De-duplicates by exact title (first wins), orders by relevance and caps.
    fn rank(&self, papers: impl Iterator<Item = Paper>) -> Vec<Paper> {
        let mut seen = HashSet::new();
        let mut unique: Vec<Paper> = papers.filter(|p| seen.insert(p.title.clone())).collect();

        unique.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
        unique.truncate(self.config.max_total);
        unique
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literature::MockPaperSource;
    use crate::types::Level;

    fn paper(title: &str, kind: TechniqueKind, year: i32, citations: u32) -> Paper {
        Paper::new(title, kind)
            .with_abstract("A short position paper.")
            .with_year(year)
            .with_citations(citations)
    }

    fn detection(kind: TechniqueKind) -> TechniqueDetection {
        TechniqueDetection::new(kind, Level::High)
    }

    fn config() -> RetrievalConfig {
        RetrievalConfig::default().with_current_year(2025)
    }

    #[tokio::test]
    async fn test_no_detections_yields_no_papers() {
        let source = Arc::new(MockPaperSource::new("primary"));
        let retriever = LiteratureRetriever::new(source.clone(), config());

        let outcome = retriever.retrieve(&[]).await;
        assert!(outcome.papers.is_empty());
        assert!(source.queries().is_empty());
    }

    #[tokio::test]
    async fn test_techniques_without_queries_are_skipped() {
        let source = Arc::new(MockPaperSource::new("primary"));
        let retriever = LiteratureRetriever::new(source.clone(), config());

        retriever
            .retrieve(&[detection(TechniqueKind::ModelInference)])
            .await;
        assert!(source.queries().is_empty());
    }

    #[tokio::test]
    async fn test_stops_after_per_technique_cap() {
        let batch: Vec<Paper> = (0..5)
            .map(|i| paper(&format!("RAG {}", i), TechniqueKind::Rag, 2024, i))
            .collect();
        let source = Arc::new(MockPaperSource::new("primary").with_papers(TechniqueKind::Rag, batch));
        let retriever = LiteratureRetriever::new(source.clone(), config());

        let outcome = retriever.retrieve(&[detection(TechniqueKind::Rag)]).await;
        assert_eq!(outcome.papers.len(), 5);
        assert_eq!(source.queries().len(), 1);
    }

    #[tokio::test]
    async fn test_falls_back_to_secondary_when_sparse() {
        let primary = Arc::new(MockPaperSource::new("primary").with_papers(
            TechniqueKind::LlmApi,
            vec![paper("Only one", TechniqueKind::LlmApi, 2024, 0)],
        ));
        let secondary = Arc::new(MockPaperSource::new("secondary").with_papers(
            TechniqueKind::LlmApi,
            vec![paper("From arXiv", TechniqueKind::LlmApi, 2024, 0)],
        ));
        let retriever =
            LiteratureRetriever::new(primary.clone(), config()).with_secondary(secondary.clone());

        let outcome = retriever.retrieve(&[detection(TechniqueKind::LlmApi)]).await;
        assert_eq!(primary.queries().len(), 2);
        assert_eq!(
            secondary.queries(),
            vec!["large language model API reliability"]
        );
        assert_eq!(outcome.papers.len(), 2);
    }

    #[tokio::test]
    async fn test_dedups_titles_and_sorts_by_relevance() {
        let primary = Arc::new(
            MockPaperSource::new("primary")
                .with_papers(
                    TechniqueKind::Rag,
                    vec![
                        paper("Shared", TechniqueKind::Rag, 2020, 0),
                        paper("Popular", TechniqueKind::Rag, 2025, 300),
                    ],
                )
                .with_papers(
                    TechniqueKind::VectorDb,
                    vec![
                        paper("Shared", TechniqueKind::VectorDb, 2025, 300),
                        paper("Middle", TechniqueKind::VectorDb, 2024, 50),
                    ],
                ),
        );
        let retriever = LiteratureRetriever::new(primary, config());

        let outcome = retriever
            .retrieve(&[
                detection(TechniqueKind::Rag),
                detection(TechniqueKind::VectorDb),
            ])
            .await;

        let titles: Vec<&str> = outcome.papers.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Popular", "Middle", "Shared"]);

        let shared = outcome.papers.iter().find(|p| p.title == "Shared").unwrap();
        assert_eq!(shared.technique, TechniqueKind::Rag);

        for pair in outcome.papers.windows(2) {
            assert!(pair[0].relevance_score >= pair[1].relevance_score);
        }
    }

    #[tokio::test]
    async fn test_failed_queries_are_counted_not_propagated() {
        let primary = Arc::new(
            MockPaperSource::new("primary")
                .with_failure(TechniqueKind::Agents, "connection reset")
                .with_papers(
                    TechniqueKind::Agents,
                    vec![paper("Agents at scale", TechniqueKind::Agents, 2024, 10)],
                ),
        );
        let secondary =
            Arc::new(MockPaperSource::new("secondary").with_failure(TechniqueKind::Agents, "503"));
        let retriever = LiteratureRetriever::new(primary, config()).with_secondary(secondary);

        let outcome = retriever.retrieve(&[detection(TechniqueKind::Agents)]).await;
        assert_eq!(outcome.papers.len(), 1);
        assert_eq!(outcome.degraded_queries, 2);
    }

    #[tokio::test]
    async fn test_total_cap() {
        let mut source = MockPaperSource::new("primary");
        for kind in [
            TechniqueKind::Rag,
            TechniqueKind::LlmApi,
            TechniqueKind::VectorDb,
            TechniqueKind::Embeddings,
        ] {
            let batch = (0..5)
                .map(|i| paper(&format!("{} {}", kind, i), kind, 2024, i))
                .collect();
            source = source.with_papers(kind, batch);
        }
        let retriever = LiteratureRetriever::new(Arc::new(source), config());

        let outcome = retriever
            .retrieve(&[
                detection(TechniqueKind::Rag),
                detection(TechniqueKind::LlmApi),
                detection(TechniqueKind::VectorDb),
                detection(TechniqueKind::Embeddings),
            ])
            .await;
        assert_eq!(outcome.papers.len(), 15);
    }
}
