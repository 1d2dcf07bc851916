//! Semantic Scholar graph search client

use super::source::{PaperSource, SearchQuery, SourceError};
use super::types::Paper;
use crate::detection::TechniqueKind;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_SEMANTIC_SCHOLAR_URL: &str =
    "https://api.semanticscholar.org/graph/v1/paper/search";
const PAPER_PAGE_URL: &str = "https://www.semanticscholar.org/paper";
const FIELDS: &str = "title,abstract,year,citationCount,authors,venue,isOpenAccess,externalIds";
const SOURCE_NAME: &str = "Semantic Scholar";

/// Papers with shorter abstracts are dropped
pub const MIN_ABSTRACT_LEN: usize = 100;
/// Used when a paper has no year
const DEFAULT_YEAR: i32 = 2023;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItem {
    #[serde(default)]
    paper_id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, rename = "abstract")]
    abstract_text: Option<String>,
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    citation_count: Option<u32>,
    #[serde(default)]
    authors: Vec<Author>,
}

#[derive(Debug, Deserialize)]
struct Author {
    #[serde(default)]
    name: Option<String>,
}

pub struct SemanticScholarSource {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl SemanticScholarSource {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
            timeout,
        }
    }
}

#[async_trait]
impl PaperSource for SemanticScholarSource {
    async fn search(&self, query: SearchQuery<'_>) -> Result<Vec<Paper>, SourceError> {
        let limit = query.limit.to_string();
        let years = format!("{}-{}", query.min_year, query.max_year);

        let mut request = self
            .client
            .get(&self.base_url)
            .timeout(self.timeout)
            .query(&[
                ("query", query.text),
                ("limit", limit.as_str()),
                ("fields", FIELDS),
                ("year", years.as_str()),
            ]);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let seconds = self.timeout.as_secs();
        let response = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| SourceError::from_reqwest(SOURCE_NAME, seconds, e))?;
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::from_reqwest(SOURCE_NAME, seconds, e))?;

        let papers = parse_response(&body, query.technique)?;
        debug!(query = query.text, count = papers.len(), "Semantic Scholar search complete");
        Ok(papers)
    }

    fn name(&self) -> &str {
        SOURCE_NAME
    }
}

/// Converts a graph-search response body into papers, dropping entries without a
/// usable abstract.
pub fn parse_response(body: &str, technique: TechniqueKind) -> Result<Vec<Paper>, SourceError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| SourceError::Parse {
            source_name: SOURCE_NAME.to_string(),
            message: e.to_string(),
        })?;

    Ok(response
        .data
        .into_iter()
        .filter_map(|item| to_paper(item, technique))
        .collect())
}

fn to_paper(item: SearchItem, technique: TechniqueKind) -> Option<Paper> {
    let abstract_text = item
        .abstract_text
        .filter(|a| a.chars().count() >= MIN_ABSTRACT_LEN)?;
    let url = item
        .paper_id
        .filter(|id| !id.is_empty())
        .map(|id| format!("{}/{}", PAPER_PAGE_URL, id))
        .unwrap_or_default();

    Some(
        Paper::new(item.title.unwrap_or_default(), technique)
            .with_abstract(abstract_text)
            .with_year(item.year.unwrap_or(DEFAULT_YEAR))
            .with_citations(item.citation_count.unwrap_or(0))
            .with_url(url)
            .with_authors(item.authors.into_iter().filter_map(|a| a.name)),
    )
}
