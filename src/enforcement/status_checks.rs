use tracing::info;

use crate::config::GateConfig;
use crate::error::Result;
use crate::github::platform::ReleasePlatform;
use crate::github::types::{CommitState, CommitStatusRequest, PullRequest};

pub const DESCRIPTION_SUCCESS: &str = "Valid release.";
pub const DESCRIPTION_FAILURE: &str = "Invalid release.";

/// Pass/fail half of a verdict, independent of the review event used to
/// report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictKind {
    Approve,
    Fail,
}

pub struct StatusCheckGenerator;

impl StatusCheckGenerator {
    pub fn state_for(kind: VerdictKind) -> (CommitState, &'static str) {
        match kind {
            VerdictKind::Approve => (CommitState::Success, DESCRIPTION_SUCCESS),
            VerdictKind::Fail => (CommitState::Failure, DESCRIPTION_FAILURE),
        }
    }

    /// Builds the status for the PR head, or `None` when statuses are disabled.
    pub fn generate(
        config: &GateConfig,
        pr: &PullRequest,
        kind: VerdictKind,
    ) -> Option<CommitStatusRequest> {
        if !config.create_status {
            return None;
        }
        let context = config.status_name.clone()?;
        let (state, description) = Self::state_for(kind);

        Some(CommitStatusRequest {
            sha: pr.head.sha.clone(),
            state,
            description: description.to_string(),
            context,
        })
    }
}

pub async fn post_status<P: ReleasePlatform + ?Sized>(
    platform: &P,
    config: &GateConfig,
    pr: &PullRequest,
    kind: VerdictKind,
) -> Result<()> {
    let Some(status) = StatusCheckGenerator::generate(config, pr, kind) else {
        return Ok(());
    };

    info!("Setting status {}..", status.state.as_str());
    platform.create_commit_status(&status).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_for_verdict() {
        assert_eq!(
            StatusCheckGenerator::state_for(VerdictKind::Approve),
            (CommitState::Success, "Valid release.")
        );
        assert_eq!(
            StatusCheckGenerator::state_for(VerdictKind::Fail),
            (CommitState::Failure, "Invalid release.")
        );
    }
}
