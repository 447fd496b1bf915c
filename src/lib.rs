//! Customer Email Automation System
//!
//! Classifies incoming customer emails into a fixed category set, generates a
//! tailored response through an LLM backend, and dispatches category-specific
//! side effects (ticket creation, feedback logging, response sending).
//!
//! # Overview
//!
//! Each email moves through a linear pipeline:
//! - **Classification**: LLM-backed assignment to one of five closed
//!   categories (complaint, inquiry, feedback, support_request, other)
//! - **Response generation**: category-aware reply drafted by the LLM
//! - **Dispatch**: category handler performing the external side effects
//!
//! Failures short-circuit the remaining stages for that email but never crash
//! the batch; every input email yields exactly one [`ProcessingResult`].
//!
//! # Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use email_automation::{
//!     automation::EmailAutomationSystem,
//!     classifier::EmailClassifier,
//!     config::Config,
//!     dispatcher::Dispatcher,
//!     gateway::{LlmGateway, OpenAiBackend},
//!     responder::ResponseGenerator,
//!     sample_data,
//!     services::Services,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml".as_ref()).await?;
//!     let api_key = config.resolve_api_key()?;
//!
//!     let gateway = Arc::new(LlmGateway::new(
//!         Arc::new(OpenAiBackend::new(&api_key)),
//!         &config.retry,
//!     ));
//!     let system = EmailAutomationSystem::new(
//!         EmailClassifier::new(gateway.clone(), &config.llm),
//!         ResponseGenerator::new(gateway, &config.llm),
//!         Dispatcher::new(Services::console()),
//!     );
//!
//!     let results = system.process_batch(&sample_data::sample_emails()).await;
//!     for result in results {
//!         println!("{}: success={}", result.email_id, result.success);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`automation`] - Pipeline orchestration and batch processing
//! - [`classifier`] - LLM-backed email classification
//! - [`cli`] - Command-line interface and batch reporting
//! - [`config`] - Configuration management
//! - [`dispatcher`] - Category handler dispatch
//! - [`error`] - Error types and result alias
//! - [`gateway`] - LLM gateway with retry/backoff
//! - [`models`] - Core data structures
//! - [`prompts`] - Prompt templates
//! - [`responder`] - LLM-backed response generation
//! - [`sample_data`] - Demo emails
//! - [`services`] - External collaborator traits and console stubs

pub mod automation;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod gateway;
pub mod models;
pub mod prompts;
pub mod responder;
pub mod sample_data;
pub mod services;

// Re-export commonly used types for convenience
pub use error::{AutomationError, Result};

// Core data models
pub use models::{Category, ChatMessage, Email, ProcessingResult, Role};

// Pipeline types
pub use automation::EmailAutomationSystem;
pub use classifier::EmailClassifier;
pub use dispatcher::Dispatcher;
pub use responder::ResponseGenerator;

// Gateway types
pub use gateway::{ChatBackend, LlmGateway, OpenAiBackend, RetryDelay, TokioDelay};

// Collaborator traits
pub use services::{FeedbackLog, Messaging, Services, Ticketing};

// Config types
pub use config::{Config, LlmConfig, RetryConfig};

// CLI types (for binary usage)
pub use cli::{Cli, Commands, Report};
