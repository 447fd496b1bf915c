//! Category-specific handler dispatch
//!
//! The category → handler mapping is an exhaustive match, so every category
//! has a handler and adding a category forces a matching update here. Each
//! handler runs a short fixed sequence of collaborator calls and always
//! attempts to send a response. Collaborator failures are absorbed at the
//! dispatch boundary as a handler error; they never abort the batch.

use tracing::debug;

use crate::error::{AutomationError, Result};
use crate::models::{Category, Email};
use crate::services::Services;

pub struct Dispatcher {
    services: Services,
}

impl Dispatcher {
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    /// Invoke the handler for a classified email
    pub async fn dispatch(
        &self,
        category: Category,
        email: &Email,
        response: &str,
    ) -> Result<()> {
        debug!("Dispatching email {} as {}", email.id, category);
        let outcome = match category {
            Category::Complaint => self.handle_complaint(email, response).await,
            Category::Inquiry => self.handle_inquiry(email, response).await,
            Category::Feedback => self.handle_feedback(email, response).await,
            Category::SupportRequest => self.handle_support_request(email, response).await,
            Category::Other => self.handle_other(email, response).await,
        };
        outcome.map_err(|e| AutomationError::Handler(e.to_string()))
    }

    /// Complaint: create an urgent ticket, then send a complaint-styled response
    async fn handle_complaint(&self, email: &Email, response: &str) -> Result<()> {
        self.services
            .ticketing
            .create_urgent_ticket(&email.id, &email.body)
            .await?;
        self.services
            .messaging
            .send_complaint_response(&email.id, response)
            .await
    }

    /// Inquiry: send a standard response
    async fn handle_inquiry(&self, email: &Email, response: &str) -> Result<()> {
        self.services
            .messaging
            .send_standard_response(&email.id, response)
            .await
    }

    /// Feedback: log the feedback, then send a thank-you response
    async fn handle_feedback(&self, email: &Email, response: &str) -> Result<()> {
        self.services
            .feedback
            .log_customer_feedback(&email.id, &email.body)
            .await?;
        self.services
            .messaging
            .send_standard_response(&email.id, response)
            .await
    }

    /// Support request: create a support ticket, then send an acknowledgment
    async fn handle_support_request(&self, email: &Email, response: &str) -> Result<()> {
        self.services
            .ticketing
            .create_support_ticket(&email.id, &email.body)
            .await?;
        self.services
            .messaging
            .send_standard_response(&email.id, response)
            .await
    }

    /// Other: send a generic response
    async fn handle_other(&self, email: &Email, response: &str) -> Result<()> {
        self.services
            .messaging
            .send_standard_response(&email.id, response)
            .await
    }
}
