//! Extraction backend over the `genai` crate
//!
//! One client type serves every provider `genai` knows about. Setting
//! `LITSCOUT_API_BASE_URL` routes requests to a compatible proxy instead of the
//! provider's default endpoint.

use super::client::LLMClient;
use super::error::BackendError;
use super::types::{ChatMessage, LLMRequest, LLMResponse, MessageRole};
use async_trait::async_trait;
use genai::adapter::AdapterKind;
use genai::chat::{
    ChatMessage as GenAIChatMessage, ChatOptions, ChatRequest as GenAIChatRequest,
    ChatResponseFormat,
};
use genai::resolver::{AuthData, Endpoint, ServiceTargetResolver};
use genai::{Client, ModelIden, ServiceTarget};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub const API_BASE_URL_ENV: &str = "LITSCOUT_API_BASE_URL";

pub struct GenAIClient {
    client: Client,
    model: String,
    provider: AdapterKind,
    timeout: Duration,
}

fn client_for(provider: AdapterKind, model: &str) -> Client {
    let Some(endpoint_url) = std::env::var(API_BASE_URL_ENV).ok().filter(|v| !v.is_empty()) else {
        return Client::default();
    };

    debug!(provider = provider.as_str(), endpoint = %endpoint_url, "Using custom endpoint");
    let model = model.to_string();
    let resolver = ServiceTargetResolver::from_resolver_fn(
        move |_default: ServiceTarget| -> Result<ServiceTarget, genai::resolver::Error> {
            let auth = match provider.default_key_env_name() {
                Some(key_env) => AuthData::from_env(key_env),
                None => AuthData::from_single(""),
            };
            Ok(ServiceTarget {
                endpoint: Endpoint::from_owned(endpoint_url.clone()),
                auth,
                model: ModelIden::new(provider, &model),
            })
        },
    );

    Client::builder()
        .with_service_target_resolver(resolver)
        .build()
}

fn to_genai_message(message: &ChatMessage) -> GenAIChatMessage {
    match message.role {
        MessageRole::System => GenAIChatMessage::system(&message.content),
        MessageRole::User => GenAIChatMessage::user(&message.content),
    }
}

fn chat_options(request: &LLMRequest) -> ChatOptions {
    let mut options = ChatOptions::default();
    if let Some(temperature) = request.temperature {
        options = options.with_temperature(temperature as f64);
    }
    if let Some(max_tokens) = request.max_tokens {
        options = options.with_max_tokens(max_tokens);
    }
    if request.json_mode {
        options = options.with_response_format(ChatResponseFormat::JsonMode);
    }
    options
}

impl GenAIClient {
    /// `model` is the provider's model name without any provider prefix.
    pub fn new(provider: AdapterKind, model: impl Into<String>, timeout: Duration) -> Self {
        let model = model.into();
        Self {
            client: client_for(provider, &model),
            model,
            provider,
            timeout,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LLMClient for GenAIClient {
    async fn chat(&self, request: LLMRequest) -> Result<LLMResponse, BackendError> {
        let start = Instant::now();
        let options = chat_options(&request);
        let chat_request =
            GenAIChatRequest::new(request.messages.iter().map(to_genai_message).collect());

        let call = self
            .client
            .exec_chat(&self.model, chat_request, Some(&options));
        let response = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                warn!(provider = self.name(), error = %e, "Extraction request failed");
                return Err(BackendError::Request {
                    provider: self.name().to_string(),
                    message: e.to_string(),
                });
            }
            Err(_) => {
                return Err(BackendError::Timeout {
                    seconds: self.timeout.as_secs(),
                })
            }
        };

        match response.first_text() {
            Some(text) if !text.trim().is_empty() => {
                Ok(LLMResponse::text(text, start.elapsed()))
            }
            _ => Err(BackendError::EmptyCompletion {
                provider: self.name().to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        self.provider.as_str()
    }
}

impl std::fmt::Debug for GenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAIClient")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}
