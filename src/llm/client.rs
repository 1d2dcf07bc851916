use super::error::BackendError;
use super::types::{LLMRequest, LLMResponse};
use async_trait::async_trait;

/// A chat-completion backend used for insight extraction.
///
/// Implementations make exactly one attempt per call. Timeouts are enforced by
/// the implementation, not the caller.
#[async_trait]
pub trait LLMClient: Send + Sync {
    async fn chat(&self, request: LLMRequest) -> Result<LLMResponse, BackendError>;

    /// Provider name used in logs
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatMessage;
    use std::time::Duration;

    struct EchoClient;

    #[async_trait]
    impl LLMClient for EchoClient {
        async fn chat(&self, request: LLMRequest) -> Result<LLMResponse, BackendError> {
            let echoed = request.last_user_message().unwrap_or_default().to_string();
            Ok(LLMResponse::text(echoed, Duration::ZERO))
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    #[tokio::test]
    async fn test_trait_object_dispatch() {
        let client: Box<dyn LLMClient> = Box::new(EchoClient);
        let request = LLMRequest::new(vec![
            ChatMessage::system("Return JSON"),
            ChatMessage::user("Title: Lost in the Middle"),
        ]);

        let response = client.chat(request).await.unwrap();
        assert_eq!(response.content, "Title: Lost in the Middle");
        assert_eq!(client.name(), "echo");
    }
}
