//! Fixed GenAI technique taxonomy

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TechniqueKind {
    LlmApi,
    Rag,
    VectorDb,
    Embeddings,
    ModelInference,
    Agents,
    PromptEngineering,
}

/// Known library names and the technique each one implies.
pub const LIBRARY_TABLE: &[(&str, TechniqueKind)] = &[
    ("openai", TechniqueKind::LlmApi),
    ("anthropic", TechniqueKind::LlmApi),
    ("langchain", TechniqueKind::Rag),
    ("llama-index", TechniqueKind::Rag),
    ("llamaindex", TechniqueKind::Rag),
    ("chromadb", TechniqueKind::VectorDb),
    ("pinecone", TechniqueKind::VectorDb),
    ("weaviate", TechniqueKind::VectorDb),
    ("faiss", TechniqueKind::VectorDb),
    ("qdrant", TechniqueKind::VectorDb),
    ("transformers", TechniqueKind::ModelInference),
    ("sentence-transformers", TechniqueKind::Embeddings),
    ("sentencetransformers", TechniqueKind::Embeddings),
    ("cohere", TechniqueKind::LlmApi),
    ("together", TechniqueKind::LlmApi),
];

impl TechniqueKind {
    pub const ALL: [TechniqueKind; 7] = [
        TechniqueKind::LlmApi,
        TechniqueKind::Rag,
        TechniqueKind::VectorDb,
        TechniqueKind::Embeddings,
        TechniqueKind::ModelInference,
        TechniqueKind::Agents,
        TechniqueKind::PromptEngineering,
    ];

    /// Taxonomy key, e.g. `LLM_API`.
    pub fn key(self) -> &'static str {
        match self {
            TechniqueKind::LlmApi => "LLM_API",
            TechniqueKind::Rag => "RAG",
            TechniqueKind::VectorDb => "VECTOR_DB",
            TechniqueKind::Embeddings => "EMBEDDINGS",
            TechniqueKind::ModelInference => "MODEL_INFERENCE",
            TechniqueKind::Agents => "AGENTS",
            TechniqueKind::PromptEngineering => "PROMPT_ENGINEERING",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TechniqueKind::LlmApi => "LLM API Integration",
            TechniqueKind::Rag => "RAG (Retrieval-Augmented Generation)",
            TechniqueKind::VectorDb => "Vector Database",
            TechniqueKind::Embeddings => "Embedding Generation",
            TechniqueKind::ModelInference => "Model Inference",
            TechniqueKind::Agents => "AI Agents",
            TechniqueKind::PromptEngineering => "Prompt Engineering",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TechniqueKind::LlmApi => {
                "Using Large Language Model APIs for text generation and completion"
            }
            TechniqueKind::Rag => {
                "Retrieval-Augmented Generation: combining document retrieval with LLM generation"
            }
            TechniqueKind::VectorDb => "Vector database for storing and searching embeddings",
            TechniqueKind::Embeddings => {
                "Converting text to vector embeddings for semantic search"
            }
            TechniqueKind::ModelInference => "Running ML model inference locally",
            TechniqueKind::Agents => {
                "Autonomous AI agents with tool usage and reasoning capabilities"
            }
            TechniqueKind::PromptEngineering => {
                "Structured prompt templates and prompt optimization techniques"
            }
        }
    }

    /// Literature-search phrases for this technique. Empty when the technique has
    /// no literature coverage.
    pub fn search_queries(self) -> &'static [&'static str] {
        match self {
            TechniqueKind::Rag => &[
                "retrieval augmented generation evaluation",
                "RAG system performance challenges",
                "retrieval augmented generation limitations production",
            ],
            TechniqueKind::LlmApi => &[
                "large language model API reliability",
                "LLM production deployment challenges",
                "language model API rate limiting",
            ],
            TechniqueKind::VectorDb => &[
                "vector database performance comparison",
                "approximate nearest neighbor accuracy tradeoffs",
                "vector similarity search optimization",
            ],
            TechniqueKind::Embeddings => &[
                "text embedding quality evaluation",
                "semantic similarity search accuracy",
                "embedding model performance comparison",
            ],
            TechniqueKind::Agents => &[
                "LLM agents reliability evaluation",
                "autonomous agents failure modes",
                "multi-agent systems challenges",
            ],
            TechniqueKind::PromptEngineering => &[
                "prompt engineering best practices evaluation",
                "prompt optimization techniques empirical",
                "prompt design effectiveness study",
            ],
            TechniqueKind::ModelInference => &[],
        }
    }
}

impl fmt::Display for TechniqueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
