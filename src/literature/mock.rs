use super::source::{PaperSource, SearchQuery, SourceError};
use super::types::Paper;
use crate::detection::TechniqueKind;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory paper source keyed by technique.
///
/// Each query for a technique returns the next scripted batch; once the script
/// runs out, queries return no papers.
pub struct MockPaperSource {
    name: String,
    batches: Mutex<HashMap<TechniqueKind, Vec<Result<Vec<Paper>, String>>>>,
    queries: Mutex<Vec<String>>,
}

impl MockPaperSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            batches: Mutex::new(HashMap::new()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_papers(self, technique: TechniqueKind, papers: Vec<Paper>) -> Self {
        self.batches
            .lock()
            .unwrap()
            .entry(technique)
            .or_default()
            .push(Ok(papers));
        self
    }

    pub fn with_failure(self, technique: TechniqueKind, message: impl Into<String>) -> Self {
        self.batches
            .lock()
            .unwrap()
            .entry(technique)
            .or_default()
            .push(Err(message.into()));
        self
    }

    /// Query strings received so far, in arrival order
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaperSource for MockPaperSource {
    async fn search(&self, query: SearchQuery<'_>) -> Result<Vec<Paper>, SourceError> {
        self.queries.lock().unwrap().push(query.text.to_string());

        let next = {
            let mut batches = self.batches.lock().unwrap();
            match batches.get_mut(&query.technique) {
                Some(queue) if !queue.is_empty() => Some(queue.remove(0)),
                _ => None,
            }
        };

        match next {
            Some(Ok(mut papers)) => {
                papers.truncate(query.limit);
                Ok(papers)
            }
            Some(Err(message)) => Err(SourceError::Request {
                source_name: self.name.clone(),
                message,
            }),
            None => Ok(Vec::new()),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
