//! Email classification via the LLM gateway
//!
//! The backend is asked for exactly one category name; the reply is
//! normalized (trim, lowercase) and validated against the closed set. A
//! backend failure and an unrecognized category both surface as a
//! classification error; the orchestrator only needs the fact of failure.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::LlmConfig;
use crate::error::{AutomationError, Result};
use crate::gateway::LlmGateway;
use crate::models::{Category, Email};
use crate::prompts;

pub struct EmailClassifier {
    gateway: Arc<LlmGateway>,
    model: String,
    temperature: f32,
}

impl EmailClassifier {
    pub fn new(gateway: Arc<LlmGateway>, llm: &LlmConfig) -> Self {
        Self {
            gateway,
            model: llm.classification_model.clone(),
            temperature: llm.classification_temperature,
        }
    }

    /// Classify an email into one of the predefined categories
    pub async fn classify(&self, email: &Email) -> Result<Category> {
        let messages = prompts::classification_messages(email);

        let raw = self
            .gateway
            .complete(&self.model, &messages, self.temperature)
            .await
            .map_err(|e| {
                AutomationError::Classification(format!(
                    "Backend failure for email {}: {}",
                    email.id, e
                ))
            })?;

        let normalized = raw.trim().to_lowercase();
        match Category::parse(&normalized) {
            Some(category) => {
                debug!("Email {} classified as {}", email.id, category);
                Ok(category)
            }
            None => {
                warn!("Invalid category '{}' for email {}", normalized, email.id);
                Err(AutomationError::Classification(format!(
                    "Category '{}' is not in the closed set",
                    normalized
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryConfig;
    use crate::gateway::ChatBackend;
    use crate::models::ChatMessage;
    use async_trait::async_trait;

    /// Backend that always returns a fixed reply
    struct FixedBackend {
        reply: std::result::Result<String, String>,
    }

    #[async_trait]
    impl ChatBackend for FixedBackend {
        async fn complete(
            &self,
            _model: &str,
            _messages: &[ChatMessage],
            _temperature: f32,
        ) -> Result<String> {
            self.reply
                .clone()
                .map_err(AutomationError::Backend)
        }
    }

    fn classifier_with_reply(reply: std::result::Result<String, String>) -> EmailClassifier {
        let gateway = Arc::new(LlmGateway::new(
            Arc::new(FixedBackend { reply }),
            &RetryConfig {
                max_attempts: 1,
                initial_backoff_secs: 0.001,
            },
        ));
        EmailClassifier::new(gateway, &LlmConfig::default())
    }

    fn email() -> Email {
        Email {
            id: "001".to_string(),
            sender: "angry.customer@example.com".to_string(),
            subject: "Broken product received".to_string(),
            body: "It arrived completely damaged.".to_string(),
            timestamp: None,
        }
    }

    #[tokio::test]
    async fn test_classify_valid_category() {
        let classifier = classifier_with_reply(Ok("complaint".to_string()));
        let category = classifier.classify(&email()).await.unwrap();
        assert_eq!(category, Category::Complaint);
    }

    #[tokio::test]
    async fn test_classify_normalizes_whitespace_and_case() {
        let classifier = classifier_with_reply(Ok("  Support_Request \n".to_string()));
        let category = classifier.classify(&email()).await.unwrap();
        assert_eq!(category, Category::SupportRequest);
    }

    #[tokio::test]
    async fn test_classify_rejects_unknown_category() {
        let classifier = classifier_with_reply(Ok("URGENT!!".to_string()));
        let result = classifier.classify(&email()).await;
        let err = result.unwrap_err();
        assert!(matches!(err, AutomationError::Classification(_)));
        assert!(err.to_string().contains("urgent!!"));
    }

    #[tokio::test]
    async fn test_classify_backend_failure() {
        let classifier = classifier_with_reply(Err("connection refused".to_string()));
        let result = classifier.classify(&email()).await;
        assert!(matches!(
            result.unwrap_err(),
            AutomationError::Classification(_)
        ));
    }
}
