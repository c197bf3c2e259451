//! Turns a verdict into a pull request review and, optionally, a commit status.

use tracing::info;

use crate::config::GateConfig;
use crate::enforcement::status_checks::{post_status, VerdictKind};
use crate::error::Result;
use crate::github::platform::ReleasePlatform;
use crate::github::types::{PullRequest, ReviewEvent, ReviewState};

pub struct ReviewReactor<'a, P: ReleasePlatform + ?Sized> {
    platform: &'a P,
    config: &'a GateConfig,
}

impl<'a, P: ReleasePlatform + ?Sized> ReviewReactor<'a, P> {
    pub fn new(platform: &'a P, config: &'a GateConfig) -> Self {
        Self { platform, config }
    }

    /// Posts the review for `kind` with `comment` as its body, then the matching
    /// commit status when statuses are enabled.
    pub async fn react(&self, pr: &PullRequest, kind: VerdictKind, comment: &str) -> Result<()> {
        let event = match kind {
            VerdictKind::Approve => self.config.approve_event(),
            VerdictKind::Fail => self.config.fail_event(),
        };

        if event == ReviewEvent::Approve && self.already_approved(pr).await? {
            info!("Pull request #{} already approved, skipping review", pr.number);
        } else {
            info!("Reviewing {} with {}..", pr.number, event);
            self.platform.create_review(pr.number, comment, event).await?;
        }

        post_status(self.platform, self.config, pr, kind).await
    }

    /// Whether the authenticated actor's latest review on the PR is an approval.
    pub async fn already_approved(&self, pr: &PullRequest) -> Result<bool> {
        let actor = self.platform.get_authenticated_user().await?;
        let reviews = self.platform.list_reviews(pr.number).await?;

        Ok(reviews
            .iter()
            .rev()
            .find(|review| review.is_by(&actor.login))
            .is_some_and(|review| review.state == ReviewState::Approved))
    }
}
