//! arXiv Atom API client

use super::source::{PaperSource, SearchQuery, SourceError};
use super::types::Paper;
use crate::detection::TechniqueKind;
use async_trait::async_trait;
use roxmltree::{Document, Node};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_ARXIV_URL: &str = "https://export.arxiv.org/api/query";
const SOURCE_NAME: &str = "arXiv";

pub struct ArxivSource {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ArxivSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl PaperSource for ArxivSource {
    async fn search(&self, query: SearchQuery<'_>) -> Result<Vec<Paper>, SourceError> {
        let search_query = format!("all:{}", query.text);
        let max_results = query.limit.to_string();
        let seconds = self.timeout.as_secs();

        let response = self
            .client
            .get(&self.base_url)
            .timeout(self.timeout)
            .query(&[
                ("search_query", search_query.as_str()),
                ("start", "0"),
                ("max_results", max_results.as_str()),
                ("sortBy", "relevance"),
                ("sortOrder", "descending"),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| SourceError::from_reqwest(SOURCE_NAME, seconds, e))?;
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::from_reqwest(SOURCE_NAME, seconds, e))?;

        let papers: Vec<Paper> = parse_feed(&body, query.technique)?
            .into_iter()
            .filter(|p| p.year >= query.min_year)
            .take(query.limit)
            .collect();
        debug!(query = query.text, count = papers.len(), "arXiv search complete");
        Ok(papers)
    }

    fn name(&self) -> &str {
        SOURCE_NAME
    }
}

/// Parses an Atom feed into papers. Entries without a parseable publication
/// year are skipped. arXiv carries no citation counts.
pub fn parse_feed(body: &str, technique: TechniqueKind) -> Result<Vec<Paper>, SourceError> {
    let doc = Document::parse(body).map_err(|e| SourceError::Parse {
        source_name: SOURCE_NAME.to_string(),
        message: e.to_string(),
    })?;

    Ok(doc
        .descendants()
        .filter(|n| n.has_tag_name("entry"))
        .filter_map(|entry| to_paper(entry, technique))
        .collect())
}

fn to_paper(entry: Node, technique: TechniqueKind) -> Option<Paper> {
    let year = child_text(entry, "published")
        .and_then(|p| p.get(..4).map(str::to_string))
        .and_then(|y| y.parse::<i32>().ok())?;

    let authors = entry
        .children()
        .filter(|n| n.has_tag_name("author"))
        .filter_map(|author| child_text(author, "name"));

    Some(
        Paper::new(child_text(entry, "title").unwrap_or_default(), technique)
            .with_abstract(child_text(entry, "summary").unwrap_or_default())
            .with_year(year)
            .with_url(child_text(entry, "id").unwrap_or_default())
            .with_authors(authors),
    )
}

/// Text of the first child element named `name`, with whitespace runs collapsed
fn child_text(node: Node, name: &str) -> Option<String> {
    node.children()
        .find(|n| n.has_tag_name(name))
        .and_then(|n| n.text())
        .map(|t| t.split_whitespace().collect::<Vec<_>>().join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>arXiv Query</title>
  <entry>
    <id>http://arxiv.org/abs/2401.00001v1</id>
    <published>2024-01-02T00:00:00Z</published>
    <title>Benchmarking Vector
      Search</title>
    <summary>We compare approximate nearest neighbor indexes.</summary>
    <author><name>Ada Lovelace</name></author>
    <author><name>Alan Turing</name></author>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/1901.00002v1</id>
    <published>2019-05-05T00:00:00Z</published>
    <title>Older Work</title>
    <summary>Legacy.</summary>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/bad</id>
    <title>No Date</title>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_feed() {
        let papers = parse_feed(FEED, TechniqueKind::VectorDb).unwrap();
        assert_eq!(papers.len(), 2);

        let first = &papers[0];
        assert_eq!(first.title, "Benchmarking Vector Search");
        assert_eq!(first.year, 2024);
        assert_eq!(first.url, "http://arxiv.org/abs/2401.00001v1");
        assert_eq!(first.authors, vec!["Ada Lovelace", "Alan Turing"]);
        assert_eq!(first.citation_count, 0);
        assert_eq!(first.technique, TechniqueKind::VectorDb);

        assert_eq!(papers[1].year, 2019);
    }

    #[test]
    fn test_parse_feed_invalid_xml() {
        let err = parse_feed("not xml <", TechniqueKind::Rag).unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
    }

    #[test]
    fn test_parse_feed_empty() {
        let feed = r#"<feed xmlns="http://www.w3.org/2005/Atom"></feed>"#;
        assert!(parse_feed(feed, TechniqueKind::Rag).unwrap().is_empty());
    }
}
