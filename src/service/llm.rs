//! Shared LLM client and the model-invocation boundary.
//!
//! The pipeline talks to the model only through [`ContractModel`], a narrow
//! prompt-in/text-out capability that is constructed once at startup and
//! passed down explicitly. [`LlmClient`] is the OpenAI-backed implementation;
//! tests substitute their own.

use std::time::Duration;

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::openai;

use crate::model::LlmConfig;

/// Environment variable for the analysis-stage model
const ENV_ANALYSIS_MODEL: &str = "ANALYSIS_MODEL";

/// Environment variable for the whole-document review model
const ENV_REVIEW_MODEL: &str = "REVIEW_MODEL";

/// Default model for both roles
const DEFAULT_MODEL: &str = openai::GPT_4O_MINI;

const RETRY_BACKOFF: Duration = Duration::from_millis(500);

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to construct model client: {0}")]
    Client(String),

    #[error("model call timed out after {0:?}")]
    Timeout(Duration),

    #[error("model provider error: {0}")]
    Provider(String),
}

/// Prompt-in/text-out model boundary.
///
/// Failures surface as [`ModelError`]; every pipeline stage catches them
/// locally and substitutes its safe default, so an error here never
/// propagates past the orchestrator.
#[async_trait]
pub trait ContractModel: Send + Sync {
    async fn invoke(&self, prompt: &str) -> Result<String, ModelError>;
}

/// OpenAI-backed model client with an explicit per-call timeout and a
/// bounded retry budget.
pub struct LlmClient {
    client: openai::Client,
    model: String,
    timeout: Duration,
    max_retries: u32,
}

impl LlmClient {
    /// Create a client for a specific model.
    pub fn new(
        api_key: &str,
        model: impl Into<String>,
        config: &LlmConfig,
    ) -> Result<Self, ModelError> {
        let client = openai::Client::new(api_key)
            .map_err(|e| ModelError::Client(format!("Failed to create OpenAI client: {e}")))?;

        let model = model.into();
        tracing::info!(
            model = %model,
            timeout_secs = config.timeout_secs,
            max_retries = config.max_retries,
            "LLM client initialized"
        );

        Ok(Self {
            client,
            model,
            timeout: config.timeout(),
            max_retries: config.max_retries,
        })
    }

    /// Client for the four analysis stages.
    /// Optionally uses ANALYSIS_MODEL env var (defaults to gpt-4o-mini).
    pub fn for_analysis(api_key: &str, config: &LlmConfig) -> Result<Self, ModelError> {
        let model =
            std::env::var(ENV_ANALYSIS_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(api_key, model, config)
    }

    /// Client for the whole-document risk review pass.
    /// Optionally uses REVIEW_MODEL env var (defaults to gpt-4o-mini).
    pub fn for_review(api_key: &str, config: &LlmConfig) -> Result<Self, ModelError> {
        let model = std::env::var(ENV_REVIEW_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(api_key, model, config)
    }
}

#[async_trait]
impl ContractModel for LlmClient {
    async fn invoke(&self, prompt: &str) -> Result<String, ModelError> {
        // Temperature 0 for reproducible classification and extraction.
        let agent = self.client.agent(&self.model).temperature(0.0).build();

        let mut last_error = ModelError::Provider("model call not attempted".to_string());

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                tokio::time::sleep(RETRY_BACKOFF).await;
            }

            match tokio::time::timeout(self.timeout, agent.prompt(prompt)).await {
                Ok(Ok(content)) => return Ok(content),
                Ok(Err(e)) => {
                    tracing::warn!(
                        model = %self.model,
                        attempt = attempt + 1,
                        error = %e,
                        "Model call failed"
                    );
                    last_error = ModelError::Provider(e.to_string());
                }
                Err(_) => {
                    tracing::warn!(
                        model = %self.model,
                        attempt = attempt + 1,
                        timeout_secs = self.timeout.as_secs(),
                        "Model call timed out"
                    );
                    last_error = ModelError::Timeout(self.timeout);
                }
            }
        }

        Err(last_error)
    }
}

/// Scripted model double for tests.
pub mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::{ContractModel, ModelError};

    /// Replays a fixed queue of responses, one per `invoke` call.
    /// `Err(msg)` entries surface as provider errors; an exhausted queue does
    /// too, so a test that under-scripts its stages fails loudly.
    pub struct MockModel {
        responses: Mutex<VecDeque<Result<String, String>>>,
    }

    impl MockModel {
        pub fn with_responses(
            responses: impl IntoIterator<Item = Result<String, String>>,
        ) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().collect()),
            }
        }
    }

    #[async_trait]
    impl ContractModel for MockModel {
        async fn invoke(&self, _prompt: &str) -> Result<String, ModelError> {
            let next = self
                .responses
                .lock()
                .expect("mock lock poisoned")
                .pop_front();
            match next {
                Some(Ok(content)) => Ok(content),
                Some(Err(message)) => Err(ModelError::Provider(message)),
                None => Err(ModelError::Provider(
                    "mock response queue exhausted".to_string(),
                )),
            }
        }
    }
}
