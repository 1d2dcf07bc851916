use crate::config::LitscoutConfig;
use crate::llm::{GenAIClient, LLMClient};
use genai::adapter::AdapterKind;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

const OLLAMA_HEALTH_TIMEOUT: Duration = Duration::from_secs(2);

pub struct SelectedClient {
    pub client: Arc<dyn LLMClient>,
    pub provider: AdapterKind,
    pub description: String,
}

/// Picks the model used for insight extraction.
///
/// Returns `None` when the run is offline, when the configured provider has no
/// credentials, or when a local Ollama server is not reachable. Callers then fall
/// back to deterministic insights.
pub async fn select_extraction_backend(config: &LitscoutConfig) -> Option<SelectedClient> {
    if config.offline {
        info!("Offline mode, insight extraction uses the fallback");
        return None;
    }

    let provider = config.provider;

    if provider == AdapterKind::Ollama {
        if !is_ollama_available().await {
            info!("Ollama not reachable, insight extraction uses the fallback");
            return None;
        }
    } else if !provider_has_credentials(provider) {
        info!(
            provider = %provider,
            "No credentials for provider, insight extraction uses the fallback"
        );
        return None;
    }

    let client = GenAIClient::new(
        provider,
        config.model.clone(),
        Duration::from_secs(config.request_timeout_secs),
    );
    info!("Using extraction backend: {} ({})", provider, config.model);

    Some(SelectedClient {
        client: Arc::new(client),
        provider,
        description: format!("{} ({})", provider, config.model),
    })
}

/// Check if provider has available credentials
pub fn provider_has_credentials(provider: AdapterKind) -> bool {
    match provider.default_key_env_name() {
        None => true,
        Some(env_var) => std::env::var(env_var).map(|v| !v.is_empty()).unwrap_or(false),
    }
}

/// Check if Ollama is running locally
async fn is_ollama_available() -> bool {
    let base_url =
        std::env::var("OLLAMA_HOST").unwrap_or_else(|_| "http://localhost:11434".to_string());

    let url = format!("{}/api/tags", base_url.trim_end_matches('/'));

    match reqwest::Client::new()
        .get(&url)
        .timeout(OLLAMA_HEALTH_TIMEOUT)
        .send()
        .await
    {
        Ok(resp) => {
            let available = resp.status().is_success();
            debug!("Ollama availability check: {}", available);
            available
        }
        Err(e) => {
            debug!("Ollama not available: {}", e);
            false
        }
    }
}
