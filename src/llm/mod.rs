//! LLM client abstraction layer
//!
//! Insight extraction talks to a model through [`LLMClient`], so the genai-backed
//! client and the scripted mock used in tests are interchangeable.

mod client;
mod error;
mod genai;
mod mock;
mod selector;
mod types;

pub use client::LLMClient;
pub use error::BackendError;
pub use self::genai::{GenAIClient, API_BASE_URL_ENV};
pub use mock::{MockLLMClient, MockResponse};
pub use selector::{provider_has_credentials, select_extraction_backend, SelectedClient};
pub use types::{ChatMessage, LLMRequest, LLMResponse, MessageRole};
