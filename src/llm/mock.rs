use super::client::LLMClient;
use super::error::BackendError;
use super::types::{LLMRequest, LLMResponse};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

const CLIENT_NAME: &str = "mock";

/// A scripted completion: either text or a backend failure
#[derive(Debug, Clone)]
pub enum MockResponse {
    Text(String),
    Error(BackendError),
}

impl MockResponse {
    pub fn text(content: impl Into<String>) -> Self {
        MockResponse::Text(content.into())
    }

    pub fn json(value: serde_json::Value) -> Self {
        MockResponse::Text(value.to_string())
    }

    pub fn error(error: BackendError) -> Self {
        MockResponse::Error(error)
    }
}

#[derive(Default)]
struct Script {
    responses: VecDeque<MockResponse>,
    requests: Vec<LLMRequest>,
}

/// Replays queued responses in order and records every request.
///
/// Once the queue is empty each call fails with [`BackendError::Exhausted`].
#[derive(Default)]
pub struct MockLLMClient {
    script: Mutex<Script>,
}

impl MockLLMClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_response(&self, response: MockResponse) {
        self.script.lock().unwrap().responses.push_back(response);
    }

    pub fn add_responses(&self, responses: impl IntoIterator<Item = MockResponse>) {
        self.script.lock().unwrap().responses.extend(responses);
    }

    pub fn remaining_responses(&self) -> usize {
        self.script.lock().unwrap().responses.len()
    }

    pub fn requests(&self) -> Vec<LLMRequest> {
        self.script.lock().unwrap().requests.clone()
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn chat(&self, request: LLMRequest) -> Result<LLMResponse, BackendError> {
        let next = {
            let mut script = self.script.lock().unwrap();
            script.requests.push(request);
            script.responses.pop_front()
        };

        match next {
            Some(MockResponse::Text(content)) => {
                Ok(LLMResponse::text(content, Duration::from_millis(10)))
            }
            Some(MockResponse::Error(error)) => Err(error),
            None => Err(BackendError::Exhausted {
                client: CLIENT_NAME.to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        CLIENT_NAME
    }
}

impl std::fmt::Debug for MockLLMClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockLLMClient")
            .field("remaining_responses", &self.remaining_responses())
            .finish()
    }
}
