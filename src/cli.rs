//! Command-line interface and pipeline wiring

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::automation::EmailAutomationSystem;
use crate::classifier::EmailClassifier;
use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::error::{AutomationError, Result};
use crate::gateway::{LlmGateway, OpenAiBackend};
use crate::models::{Email, ProcessingResult};
use crate::responder::ResponseGenerator;
use crate::sample_data;
use crate::services::Services;

#[derive(Parser, Debug)]
#[command(name = "email-automation")]
#[command(version)]
#[command(about = "Automated customer email classification and response system", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify, respond to, and dispatch a batch of emails
    Run {
        /// JSON file containing an array of emails (defaults to built-in samples)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Generate example configuration file
    InitConfig {
        /// Path to create config file
        #[arg(short, long, default_value = "config.toml")]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

/// Summary of one batch run
pub struct Report {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<ProcessingResult>,
}

impl Report {
    pub fn from_results(
        run_id: String,
        started_at: DateTime<Utc>,
        results: Vec<ProcessingResult>,
    ) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        Self {
            run_id,
            started_at,
            completed_at: Utc::now(),
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
            results,
        }
    }

    /// Render the per-email results as an aligned table
    pub fn summary_table(&self) -> String {
        let mut table = String::new();
        table.push_str(&format!(
            "{:<10} {:<8} {:<16} {:<13}\n",
            "email_id", "success", "classification", "response_sent"
        ));
        for result in &self.results {
            let classification = result
                .classification
                .map(|c| c.as_str())
                .unwrap_or("-");
            table.push_str(&format!(
                "{:<10} {:<8} {:<16} {:<13}\n",
                result.email_id, result.success, classification, result.response_sent
            ));
        }
        table
    }
}

/// Load a batch of emails from a JSON file
pub async fn load_emails(path: &Path) -> Result<Vec<Email>> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        AutomationError::Config(format!("Failed to read input file {:?}: {}", path, e))
    })?;
    let emails: Vec<Email> = serde_json::from_str(&content)?;
    Ok(emails)
}

/// Build the pipeline from configuration and process one batch of emails
pub async fn run_pipeline(cli: &Cli, input: Option<&Path>) -> Result<Report> {
    let started_at = Utc::now();
    let run_id = uuid::Uuid::new_v4().to_string();

    let config = Config::load(&cli.config).await?;
    let api_key = config.resolve_api_key()?;

    let emails = match input {
        Some(path) => load_emails(path).await?,
        None => sample_data::sample_emails(),
    };
    info!("Run {}: processing {} emails", run_id, emails.len());

    let gateway = Arc::new(LlmGateway::new(
        Arc::new(OpenAiBackend::new(&api_key)),
        &config.retry,
    ));
    let system = EmailAutomationSystem::new(
        EmailClassifier::new(gateway.clone(), &config.llm),
        ResponseGenerator::new(gateway, &config.llm),
        Dispatcher::new(Services::console()),
    );

    let bar = ProgressBar::new(emails.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed:>6}] {bar:40.cyan/blue} {pos:>3}/{len:3} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    // Strictly sequential; the bar just mirrors batch progress
    let mut results = Vec::with_capacity(emails.len());
    for email in &emails {
        bar.set_message(format!("email {}", email.id));
        results.push(system.process(email).await);
        bar.inc(1);
    }
    bar.finish_with_message("batch complete");

    Ok(Report::from_results(run_id, started_at, results))
}
