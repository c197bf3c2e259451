//! Collaborator interface over the hosting platform.
//!
//! Everything the gate persists (labels, reviews, commit statuses, releases)
//! lives on the platform. The core only talks to it through this trait so the
//! pipeline can be driven against an in-memory double in tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::github::types::{
    CommitStatusRequest, CreateReleaseRequest, Release, ReleaseNotes, Review, ReviewEvent, User,
};

#[async_trait]
pub trait ReleasePlatform: Send + Sync {
    /// Returns `Ok(None)` when no release carries `tag`.
    async fn get_release_by_tag(&self, tag: &str) -> Result<Option<Release>>;

    async fn create_release(&self, request: &CreateReleaseRequest) -> Result<Release>;

    async fn generate_release_notes(&self, tag: &str, target_commitish: &str)
        -> Result<ReleaseNotes>;

    async fn add_labels(&self, issue_number: u64, labels: &[String]) -> Result<()>;

    async fn create_review(&self, pr_number: u64, body: &str, event: ReviewEvent) -> Result<()>;

    /// Reviews in submission order.
    async fn list_reviews(&self, pr_number: u64) -> Result<Vec<Review>>;

    async fn get_authenticated_user(&self) -> Result<User>;

    async fn create_commit_status(&self, request: &CommitStatusRequest) -> Result<()>;
}
