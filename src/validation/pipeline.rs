//! Ordered release checks for an open pull request.
//!
//! Checks run as label, title, body, branches, then tag uniqueness, and the
//! first failing check wins. Policy rejections are reported on the pull request
//! and surface as [`Verdict::Rejected`]; configuration and transport failures
//! propagate untouched and never produce a review.

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use crate::config::GateConfig;
use crate::enforcement::review::ReviewReactor;
use crate::enforcement::status_checks::VerdictKind;
use crate::error::{ReleaseGateError, Result};
use crate::github::platform::ReleasePlatform;
use crate::github::types::{Label, PullRequest};

#[derive(Debug, Clone)]
pub enum Verdict {
    Approved(PullRequest),
    Rejected(String),
}

impl Verdict {
    pub fn is_approved(&self) -> bool {
        matches!(self, Verdict::Approved(_))
    }
}

pub struct ValidationPipeline<'a, P: ReleasePlatform + ?Sized> {
    platform: &'a P,
    config: &'a GateConfig,
    today: Option<NaiveDate>,
}

impl<'a, P: ReleasePlatform + ?Sized> ValidationPipeline<'a, P> {
    pub fn new(platform: &'a P, config: &'a GateConfig) -> Self {
        Self {
            platform,
            config,
            today: None,
        }
    }

    /// Pins the date CalVer titles are checked against. Defaults to today (UTC).
    pub fn on(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub async fn validate(&self, mut pr: PullRequest) -> Result<Verdict> {
        if !self.config.validate {
            info!("Validation disabled, skipping checks for #{}", pr.number);
            return Ok(Verdict::Approved(pr));
        }

        let reactor = ReviewReactor::new(self.platform, self.config);

        match self.run_checks(&mut pr).await {
            Ok(()) => {}
            Err(err) if err.is_validation() => {
                let reason = err.to_string();
                warn!("Failed validation. Message: {}", reason);
                reactor.react(&pr, VerdictKind::Fail, &reason).await?;
                return Ok(Verdict::Rejected(reason));
            }
            Err(err) => return Err(err),
        }

        reactor
            .react(&pr, VerdictKind::Approve, &self.config.valid_release_message)
            .await?;
        Ok(Verdict::Approved(pr))
    }

    async fn run_checks(&self, pr: &mut PullRequest) -> Result<()> {
        self.add_label(pr).await?;
        self.validate_title(pr)?;
        self.validate_body(pr)?;
        self.validate_branches(pr)?;
        self.validate_release(pr).await
    }

    async fn add_label(&self, pr: &mut PullRequest) -> Result<()> {
        let Some(label) = self.config.release_label.as_deref() else {
            return Ok(());
        };
        if pr.has_label(label) {
            return Ok(());
        }

        info!("Adding label {}..", label);
        self.platform
            .add_labels(pr.number, &[label.to_string()])
            .await?;
        pr.labels.push(Label {
            name: label.to_string(),
        });
        Ok(())
    }

    fn validate_title(&self, pr: &PullRequest) -> Result<()> {
        let today = self.today.unwrap_or_else(|| Utc::now().date_naive());
        self.config.title_policy.validate_on(&pr.title, today)
    }

    fn validate_body(&self, pr: &PullRequest) -> Result<()> {
        info!("Validating body...");
        // Notes generated at release time stand in for a missing description.
        if pr.description().is_none() && !self.config.generate_body {
            return Err(ReleaseGateError::validation("Missing description."));
        }
        Ok(())
    }

    fn validate_branches(&self, pr: &PullRequest) -> Result<()> {
        info!("Validating branches..");
        if pr.base.ref_field != self.config.base_branch {
            return Err(ReleaseGateError::validation(format!(
                "Releases can only be made against {}. Check your action configuration.",
                self.config.base_branch
            )));
        }
        if !self.config.head_branch.is_match(&pr.head.ref_field) {
            return Err(ReleaseGateError::validation(format!(
                "Releases can only be made from {}. Got {}.",
                self.config.head_branch.as_str(),
                pr.head.ref_field
            )));
        }
        Ok(())
    }

    async fn validate_release(&self, pr: &PullRequest) -> Result<()> {
        info!("Validating release..");
        let tag = self
            .config
            .tag_transformer
            .tag_name(&self.config.tag_prefix, pr);

        match self.platform.get_release_by_tag(&tag).await? {
            Some(_) => Err(ReleaseGateError::validation("Release tag already exists.")),
            None => Ok(()),
        }
    }
}
