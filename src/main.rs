use anyhow::Result;
use clap::Parser;
use email_automation::cli::{self, Cli, Commands};
use email_automation::config::Config;
use email_automation::error::AutomationError;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Exit with proper code on error
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        eprintln!("\nFor help, run: email-automation --help");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with level based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("email_automation=debug,info"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("email_automation=info,warn,error"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::info!("Email automation system starting...");

    match &cli.command {
        Commands::Run { input } => {
            let report = cli::run_pipeline(&cli, input.as_deref()).await?;

            println!("\n========================================");
            println!("Batch Processing Summary");
            println!("========================================");
            println!("Run ID: {}", report.run_id);
            println!(
                "Duration: {} seconds",
                (report.completed_at - report.started_at).num_seconds()
            );
            println!("Emails processed: {}", report.total);
            println!("Succeeded: {}", report.succeeded);
            println!("Failed: {}", report.failed);
            println!("========================================\n");
            print!("{}", report.summary_table());

            for result in report.results.iter().filter(|r| !r.success) {
                if let Some(error) = &result.error {
                    println!("\nEmail {} failed: {}", result.email_id, error);
                }
            }

            Ok(())
        }

        Commands::InitConfig { output, force } => {
            tracing::info!("Generating example configuration file");

            if output.exists() && !*force {
                return Err(AutomationError::Config(format!(
                    "Configuration file already exists at {:?}. Use --force to overwrite.",
                    output
                ))
                .into());
            }

            Config::create_example(output).await?;

            println!("Created example configuration file at: {:?}", output);
            println!("\nPlease edit this file to customize your settings.");
            println!("Key settings to review:");
            println!("  - llm.classification_model / llm.response_model");
            println!("  - llm.response_temperature: stylistic variation of replies");
            println!("  - retry.max_attempts: LLM retry budget per call");
            println!("\nThe OPENAI_API_KEY environment variable overrides llm.api_key.");

            Ok(())
        }
    }
}
