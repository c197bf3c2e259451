use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use release_gate::action::{self, ActionContext};
use release_gate::config::GateConfig;
use release_gate::github::client::{GitHubClient, DEFAULT_API_URL};

/// Validates release pull requests and publishes the release once merged.
#[derive(Parser, Debug)]
#[command(name = "release-gate", version, about)]
struct Cli {
    /// Webhook payload written by the runner
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: PathBuf,

    /// Repository in owner/repo form
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: String,

    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// File that step outputs are appended to
    #[arg(long, env = "GITHUB_OUTPUT")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "release_gate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            // Workflow command so the runner annotates the failed step.
            println!("::error::{}", action::escape_annotation(&err.to_string()));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = GateConfig::load().context("Failed to load action inputs")?;
    info!("Configuration loaded");

    let client = GitHubClient::new(&config.repo_token, &cli.api_url, &cli.repository)?;
    info!("Using repository {}/{}", client.owner(), client.repo());

    let context = ActionContext {
        event_path: cli.event_path,
        output_path: cli.output,
    };

    action::run(&client, &config, &context).await?;
    Ok(())
}
