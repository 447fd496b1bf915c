//! External collaborator interfaces and their console stub implementations
//!
//! Ticketing, response messaging, and feedback logging are fire-and-forget
//! collaborators behind traits; the handlers never consume a return value
//! beyond success or failure. The console implementations only log, standing
//! in for real integrations in the demo CLI.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

#[cfg(test)]
use mockall::automock;

use crate::error::Result;

/// Ticketing system collaborator
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Ticketing: Send + Sync {
    async fn create_urgent_ticket(&self, email_id: &str, context: &str) -> Result<()>;
    async fn create_support_ticket(&self, email_id: &str, context: &str) -> Result<()>;
}

/// Outbound response messaging collaborator
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Messaging: Send + Sync {
    async fn send_complaint_response(&self, email_id: &str, response: &str) -> Result<()>;
    async fn send_standard_response(&self, email_id: &str, response: &str) -> Result<()>;
}

/// Customer feedback tracking collaborator
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FeedbackLog: Send + Sync {
    async fn log_customer_feedback(&self, email_id: &str, feedback: &str) -> Result<()>;
}

/// Collaborator bundle passed to the dispatcher
#[derive(Clone)]
pub struct Services {
    pub ticketing: Arc<dyn Ticketing>,
    pub messaging: Arc<dyn Messaging>,
    pub feedback: Arc<dyn FeedbackLog>,
}

impl Services {
    /// Console-logging stub collaborators for the demo CLI
    pub fn console() -> Self {
        Self {
            ticketing: Arc::new(ConsoleTicketing),
            messaging: Arc::new(ConsoleMessaging),
            feedback: Arc::new(ConsoleFeedbackLog),
        }
    }
}

/// Stub ticketing collaborator that logs instead of creating tickets
pub struct ConsoleTicketing;

#[async_trait]
impl Ticketing for ConsoleTicketing {
    async fn create_urgent_ticket(&self, email_id: &str, _context: &str) -> Result<()> {
        info!("[service] Creating urgent ticket for email {}", email_id);
        Ok(())
    }

    async fn create_support_ticket(&self, email_id: &str, _context: &str) -> Result<()> {
        info!("[service] Creating support ticket for email {}", email_id);
        Ok(())
    }
}

/// Stub messaging collaborator that logs instead of sending email
pub struct ConsoleMessaging;

#[async_trait]
impl Messaging for ConsoleMessaging {
    async fn send_complaint_response(&self, email_id: &str, _response: &str) -> Result<()> {
        info!("[service] Sending complaint response for email {}", email_id);
        Ok(())
    }

    async fn send_standard_response(&self, email_id: &str, _response: &str) -> Result<()> {
        info!("[service] Sending standard response for email {}", email_id);
        Ok(())
    }
}

/// Stub feedback collaborator that logs instead of persisting
pub struct ConsoleFeedbackLog;

#[async_trait]
impl FeedbackLog for ConsoleFeedbackLog {
    async fn log_customer_feedback(&self, email_id: &str, _feedback: &str) -> Result<()> {
        info!("[service] Logging feedback for email {}", email_id);
        Ok(())
    }
}
