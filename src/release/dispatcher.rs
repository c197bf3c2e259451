use tracing::info;

use crate::config::GateConfig;
use crate::error::{ReleaseGateError, Result};
use crate::github::platform::ReleasePlatform;
use crate::github::types::{CreateReleaseRequest, PullRequest, Release};

/// Publishes the release for a merged pull request.
pub struct ReleaseDispatcher<'a, P: ReleasePlatform + ?Sized> {
    platform: &'a P,
    config: &'a GateConfig,
}

impl<'a, P: ReleasePlatform + ?Sized> ReleaseDispatcher<'a, P> {
    pub fn new(platform: &'a P, config: &'a GateConfig) -> Self {
        Self { platform, config }
    }

    pub async fn dispatch(&self, mut pr: PullRequest) -> Result<Release> {
        let target = pr.merge_commit_sha.clone().ok_or_else(|| {
            ReleaseGateError::WebhookError(format!(
                "Pull request #{} has no merge commit",
                pr.number
            ))
        })?;
        info!("Releasing {}..", target);

        let tag = self.config.tag_transformer.tag_name(&self.config.tag_prefix, &pr);

        // Generated notes must be in hand before the release is created.
        if self.config.generate_body {
            info!("Generating release notes for {}", tag);
            let notes = self.platform.generate_release_notes(&tag, &target).await?;
            pr.body = notes.body.or(pr.body);
        }

        info!("Is prerelease? {}", self.config.prerelease);
        let request = CreateReleaseRequest {
            name: pr.title.clone(),
            tag_name: tag,
            body: pr.body.unwrap_or_default(),
            prerelease: self.config.prerelease,
            draft: false,
            target_commitish: target,
        };

        self.platform.create_release(&request).await
    }
}
