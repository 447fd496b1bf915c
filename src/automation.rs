//! Orchestration of the email processing workflow
//!
//! Each email moves through a linear pipeline: classification → response
//! generation → handler dispatch. Every stage failure is absorbed into the
//! per-email [`ProcessingResult`]; nothing escapes `process` or
//! `process_batch`, so one email's failure never affects another's.

use tracing::{debug, error, info};

use crate::classifier::EmailClassifier;
use crate::dispatcher::Dispatcher;
use crate::models::{Email, ProcessingResult};
use crate::responder::ResponseGenerator;

pub struct EmailAutomationSystem {
    classifier: EmailClassifier,
    responder: ResponseGenerator,
    dispatcher: Dispatcher,
}

impl EmailAutomationSystem {
    pub fn new(
        classifier: EmailClassifier,
        responder: ResponseGenerator,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            classifier,
            responder,
            dispatcher,
        }
    }

    /// Process a single email and return its ProcessingResult
    pub async fn process(&self, email: &Email) -> ProcessingResult {
        let mut result = ProcessingResult::new(&email.id);

        // Classification
        let category = match self.classifier.classify(email).await {
            Ok(category) => category,
            Err(e) => {
                debug!("Email {}: classification failed: {}", email.id, e);
                result.error = Some("Classification failed".to_string());
                return result;
            }
        };
        result.classification = Some(category);

        // Response generation
        let response = match self.responder.generate(email, category).await {
            Ok(response) => response,
            Err(e) => {
                debug!("Email {}: response generation failed: {}", email.id, e);
                result.error = Some("Response generation failed".to_string());
                return result;
            }
        };

        // Dispatch to the category handler
        match self.dispatcher.dispatch(category, email, &response).await {
            Ok(()) => {
                result.response_sent = true;
                result.success = true;
            }
            Err(e) => {
                error!("Error handling email {}: {}", email.id, e);
                result.error = Some(e.to_string());
            }
        }

        result
    }

    /// Process a batch of emails sequentially, preserving input order
    pub async fn process_batch(&self, emails: &[Email]) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(emails.len());
        for email in emails {
            info!("Processing email {}", email.id);
            results.push(self.process(email).await);
        }
        results
    }
}
