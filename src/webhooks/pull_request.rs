//! Routes a single `pull_request` delivery to validation or release.

use chrono::NaiveDate;
use tracing::{error, info};

use crate::config::GateConfig;
use crate::error::{ReleaseGateError, Result};
use crate::github::platform::ReleasePlatform;
use crate::github::types::{PullRequest, PullRequestEvent};
use crate::release::ReleaseDispatcher;
use crate::validation::pipeline::{ValidationPipeline, Verdict};

const VALIDATE_ACTIONS: [&str; 3] = ["opened", "edited", "reopened"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Validate,
    Release,
    Skip,
}

pub fn route(action: &str, pr: &PullRequest) -> Route {
    if VALIDATE_ACTIONS.contains(&action) {
        Route::Validate
    } else if action == "closed" && pr.is_merged() {
        Route::Release
    } else {
        Route::Skip
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// No pull request in the payload, or an action this gate does not handle.
    Ignored,
    Validated { release: String },
    Released { release: String, tag: String },
}

impl EventOutcome {
    /// Value exposed as the invocation's `release` output.
    pub fn release(&self) -> Option<&str> {
        match self {
            EventOutcome::Ignored => None,
            EventOutcome::Validated { release } | EventOutcome::Released { release, .. } => {
                Some(release.as_str())
            }
        }
    }
}

pub struct EventRouter<'a, P: ReleasePlatform + ?Sized> {
    platform: &'a P,
    config: &'a GateConfig,
    today: Option<NaiveDate>,
}

impl<'a, P: ReleasePlatform + ?Sized> EventRouter<'a, P> {
    pub fn new(platform: &'a P, config: &'a GateConfig) -> Self {
        Self {
            platform,
            config,
            today: None,
        }
    }

    pub fn on(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// A rejected release is returned as `ValidationError` after its review has
    /// been posted, so the invocation is still marked failed.
    pub async fn handle(&self, event: PullRequestEvent) -> Result<EventOutcome> {
        let Some(pr) = event.pull_request else {
            error!("Found no pull request.");
            return Ok(EventOutcome::Ignored);
        };
        let action = event.action;

        let outcome = match route(&action, &pr) {
            Route::Validate => {
                info!("Validating pull request for action {}.", action);
                let mut pipeline = ValidationPipeline::new(self.platform, self.config);
                if let Some(today) = self.today {
                    pipeline = pipeline.on(today);
                }
                match pipeline.validate(pr).await? {
                    Verdict::Approved(pr) => EventOutcome::Validated { release: pr.title },
                    Verdict::Rejected(reason) => {
                        return Err(ReleaseGateError::ValidationError(reason));
                    }
                }
            }
            Route::Release => {
                info!("Creating release.");
                let title = pr.title.clone();
                let release = ReleaseDispatcher::new(self.platform, self.config)
                    .dispatch(pr)
                    .await?;
                EventOutcome::Released {
                    release: title,
                    tag: release.tag_name,
                }
            }
            Route::Skip => {
                info!("Skipping since {} is not handled by this action.", action);
                return Ok(EventOutcome::Ignored);
            }
        };

        if let Some(release) = outcome.release() {
            info!("Finished running. Returning release {}", release);
        }
        Ok(outcome)
    }
}
