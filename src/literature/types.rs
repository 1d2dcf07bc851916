use crate::detection::TechniqueKind;
use serde::{Deserialize, Serialize};

/// Maximum number of author names kept per paper
pub const MAX_AUTHORS: usize = 3;

/// A research paper retrieved for a detected technique.
///
/// `title` is the de-duplication key across techniques.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub year: i32,
    pub authors: Vec<String>,
    pub citation_count: u32,
    pub url: String,
    pub is_experimental: bool,
    pub relevance_score: f64,
    pub technique: TechniqueKind,
}

impl Paper {
    pub fn new(title: impl Into<String>, technique: TechniqueKind) -> Self {
        Self {
            title: title.into(),
            abstract_text: String::new(),
            year: 0,
            authors: Vec::new(),
            citation_count: 0,
            url: String::new(),
            is_experimental: false,
            relevance_score: 0.0,
            technique,
        }
    }

    pub fn with_abstract(mut self, abstract_text: impl Into<String>) -> Self {
        self.abstract_text = abstract_text.into();
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn with_citations(mut self, citation_count: u32) -> Self {
        self.citation_count = citation_count;
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_authors(mut self, authors: impl IntoIterator<Item = String>) -> Self {
        self.authors = authors.into_iter().take(MAX_AUTHORS).collect();
        self
    }
}
