//! Response generation via the LLM gateway
//!
//! Runs at a higher temperature than classification to allow stylistic
//! variation. No retries beyond what the gateway itself performs.

use std::sync::Arc;
use tracing::debug;

use crate::config::LlmConfig;
use crate::error::{AutomationError, Result};
use crate::gateway::LlmGateway;
use crate::models::{Category, Email};
use crate::prompts;

pub struct ResponseGenerator {
    gateway: Arc<LlmGateway>,
    model: String,
    temperature: f32,
}

impl ResponseGenerator {
    pub fn new(gateway: Arc<LlmGateway>, llm: &LlmConfig) -> Self {
        Self {
            gateway,
            model: llm.response_model.clone(),
            temperature: llm.response_temperature,
        }
    }

    /// Generate a response for an email based on its classification
    pub async fn generate(&self, email: &Email, category: Category) -> Result<String> {
        let messages = prompts::response_messages(email, category);

        let raw = self
            .gateway
            .complete(&self.model, &messages, self.temperature)
            .await
            .map_err(|e| {
                AutomationError::Response(format!(
                    "Backend failure for email {}: {}",
                    email.id, e
                ))
            })?;

        debug!("Generated response for email {}", email.id);
        Ok(raw.trim().to_string())
    }
}
