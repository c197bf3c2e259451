//! Actions runtime glue: where the event comes from and where output goes.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::GateConfig;
use crate::error::{ReleaseGateError, Result};
use crate::github::platform::ReleasePlatform;
use crate::github::webhooks::WebhookProcessor;
use crate::webhooks::pull_request::{EventOutcome, EventRouter};

pub const RELEASE_OUTPUT: &str = "release";

#[derive(Debug, Clone)]
pub struct ActionContext {
    pub event_path: PathBuf,
    pub output_path: Option<PathBuf>,
}

/// Handles the delivery at `context.event_path` and publishes the `release`
/// output.
pub async fn run<P: ReleasePlatform + ?Sized>(
    platform: &P,
    config: &GateConfig,
    context: &ActionContext,
) -> Result<EventOutcome> {
    let event = WebhookProcessor::load(&context.event_path)?;
    let outcome = EventRouter::new(platform, config).handle(event).await?;

    if let Some(release) = outcome.release() {
        match &context.output_path {
            Some(path) => write_output(path, RELEASE_OUTPUT, release)?,
            None => info!("No output file configured; {}={}", RELEASE_OUTPUT, release),
        }
    }

    Ok(outcome)
}

/// Appends `name=value` to the runner's output file, switching to the
/// delimited form when the value spans lines.
pub fn write_output(path: &Path, name: &str, value: &str) -> Result<()> {
    let entry = if value.contains('\n') || value.contains('\r') {
        let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
        format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
    } else {
        format!("{name}={value}\n")
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ReleaseGateError::OutputError(format!("{:?}: {}", path, e)))?;
    file.write_all(entry.as_bytes())
        .map_err(|e| ReleaseGateError::OutputError(format!("{:?}: {}", path, e)))
}

/// Escapes a message for an `::error::` workflow command.
pub fn escape_annotation(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
