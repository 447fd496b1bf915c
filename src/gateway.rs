//! LLM gateway with bounded exponential-backoff retry
//!
//! All backend failures are retried uniformly up to the configured attempt
//! count; no transient/permanent distinction is made. The inter-attempt delay
//! is injected through [`RetryDelay`] so tests can assert attempt counts and
//! backoff doubling without wall-clock waits.

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, warn};

use crate::config::RetryConfig;
use crate::error::{AutomationError, Result};
use crate::models::{ChatMessage, Role};

/// Chat-style completion backend
///
/// The production implementation talks to OpenAI; tests substitute scripted
/// stubs.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Run a single completion request, no retries
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<String>;
}

/// Sleep implementation used between retry attempts
#[async_trait]
pub trait RetryDelay: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Production delay backed by the tokio timer
pub struct TokioDelay;

#[async_trait]
impl RetryDelay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// OpenAI chat completion backend
pub struct OpenAiBackend {
    client: Client<OpenAIConfig>,
}

impl OpenAiBackend {
    pub fn new(api_key: &str) -> Self {
        Self {
            client: Client::with_config(OpenAIConfig::new().with_api_key(api_key)),
        }
    }
}

fn to_request_message(message: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let built = match message.role {
        Role::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(message.content.clone())
            .build()
            .map(ChatCompletionRequestMessage::from),
        Role::User => ChatCompletionRequestUserMessageArgs::default()
            .content(message.content.clone())
            .build()
            .map(ChatCompletionRequestMessage::from),
    };
    built.map_err(|e| AutomationError::Backend(format!("Failed to build request: {}", e)))
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<String> {
        let request_messages = messages
            .iter()
            .map(to_request_message)
            .collect::<Result<Vec<_>>>()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(request_messages)
            .temperature(temperature)
            .build()
            .map_err(|e| AutomationError::Backend(format!("Failed to build request: {}", e)))?;

        let completion = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AutomationError::Backend(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                AutomationError::Backend("Completion response contained no content".to_string())
            })
    }
}

/// Retry-capable wrapper around a [`ChatBackend`]
///
/// At most `max_attempts` calls per request; exponential backoff starting at
/// `initial_backoff`, doubling after each failed attempt, applied only
/// between attempts. On success at any attempt the content is returned
/// immediately; on final-attempt failure the last backend error propagates.
pub struct LlmGateway {
    backend: Arc<dyn ChatBackend>,
    max_attempts: u32,
    initial_backoff: Duration,
    delay: Arc<dyn RetryDelay>,
}

impl LlmGateway {
    pub fn new(backend: Arc<dyn ChatBackend>, retry: &RetryConfig) -> Self {
        Self::with_delay(backend, retry, Arc::new(TokioDelay))
    }

    /// Create a gateway with a custom inter-attempt delay (tests)
    pub fn with_delay(
        backend: Arc<dyn ChatBackend>,
        retry: &RetryConfig,
        delay: Arc<dyn RetryDelay>,
    ) -> Self {
        Self {
            backend,
            max_attempts: retry.max_attempts.max(1),
            initial_backoff: Duration::from_secs_f64(retry.initial_backoff_secs),
            delay,
        }
    }

    /// Run a completion request with retries
    pub async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<String> {
        let mut backoff = self.initial_backoff;
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            match self.backend.complete(model, messages, temperature).await {
                Ok(content) => return Ok(content),
                Err(e) => {
                    warn!(
                        "LLM request failed attempt {}/{}: {}",
                        attempt, self.max_attempts, e
                    );
                    if attempt < self.max_attempts {
                        self.delay.sleep(backoff).await;
                        backoff *= 2;
                    } else {
                        error!("LLM request failed after {} attempts", self.max_attempts);
                        return Err(e);
                    }
                }
            }
        }
    }
}
