use async_trait::async_trait;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{ReleaseGateError, Result};
use crate::github::platform::ReleasePlatform;
use crate::github::types::{
    CommitStatusRequest, CreateReleaseRequest, Release, ReleaseNotes, Review, ReviewEvent, User,
};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const REVIEWS_PER_PAGE: usize = 100;

/// Octocrab-backed platform client bound to a single repository.
#[derive(Clone)]
pub struct GitHubClient {
    client: Octocrab,
    owner: String,
    repo: String,
}

#[derive(Serialize)]
struct PageParams {
    per_page: usize,
    page: u32,
}

impl GitHubClient {
    pub fn new(token: &str, api_url: &str, repository: &str) -> Result<Self> {
        let (owner, repo) = parse_repository(repository)?;

        // Each request goes out at most once per event.
        let mut builder = Octocrab::builder();
        builder.add_retry_config(RetryConfig::None);
        let client = builder
            .base_uri(api_url)
            .map_err(|e| {
                ReleaseGateError::ConfigError(format!("Invalid API url {}: {}", api_url, e))
            })?
            .personal_token(token.to_string())
            .build()
            .map_err(|e| {
                ReleaseGateError::GitHubError(format!("Failed to create GitHub client: {}", e))
            })?;

        Ok(Self {
            client,
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    fn route(&self, path: &str) -> String {
        format!("/repos/{}/{}/{}", self.owner, self.repo, path)
    }
}

/// Splits `owner/repo` as found in `GITHUB_REPOSITORY`.
pub fn parse_repository(repository: &str) -> Result<(&str, &str)> {
    match repository.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner, repo))
        }
        _ => Err(ReleaseGateError::ConfigError(format!(
            "Repository must be in owner/repo form, got {:?}",
            repository
        ))),
    }
}

/// Percent-encodes a tag so it occupies exactly one path segment.
fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

fn is_not_found(err: &octocrab::Error) -> bool {
    matches!(err, octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404)
}

#[async_trait]
impl ReleasePlatform for GitHubClient {
    async fn get_release_by_tag(&self, tag: &str) -> Result<Option<Release>> {
        let route = self.route(&format!("releases/tags/{}", encode_segment(tag)));
        debug!("GET {}", route);

        let result: octocrab::Result<Release> = self.client.get(route, None::<&()>).await;
        match result {
            Ok(release) => Ok(Some(release)),
            Err(err) if is_not_found(&err) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn create_release(&self, request: &CreateReleaseRequest) -> Result<Release> {
        let route = self.route("releases");
        debug!("POST {} tag={}", route, request.tag_name);

        Ok(self.client.post(route, Some(request)).await?)
    }

    async fn generate_release_notes(
        &self,
        tag: &str,
        target_commitish: &str,
    ) -> Result<ReleaseNotes> {
        let route = self.route("releases/generate-notes");
        debug!("POST {} tag={}", route, tag);

        let body = json!({
            "tag_name": tag,
            "target_commitish": target_commitish,
        });
        Ok(self.client.post(route, Some(&body)).await?)
    }

    async fn add_labels(&self, issue_number: u64, labels: &[String]) -> Result<()> {
        let route = self.route(&format!("issues/{}/labels", issue_number));
        debug!("POST {} labels={:?}", route, labels);

        let _: Value = self
            .client
            .post(route, Some(&json!({ "labels": labels })))
            .await?;
        Ok(())
    }

    async fn create_review(&self, pr_number: u64, body: &str, event: ReviewEvent) -> Result<()> {
        let route = self.route(&format!("pulls/{}/reviews", pr_number));
        debug!("POST {} event={}", route, event);

        let _: Value = self
            .client
            .post(route, Some(&json!({ "body": body, "event": event })))
            .await?;
        Ok(())
    }

    async fn list_reviews(&self, pr_number: u64) -> Result<Vec<Review>> {
        let route = self.route(&format!("pulls/{}/reviews", pr_number));
        let mut reviews = Vec::new();
        let mut page = 1;

        loop {
            debug!("GET {} page={}", route, page);
            let params = PageParams {
                per_page: REVIEWS_PER_PAGE,
                page,
            };
            let batch: Vec<Review> = self.client.get(&route, Some(&params)).await?;
            let done = batch.len() < REVIEWS_PER_PAGE;
            reviews.extend(batch);
            if done {
                break;
            }
            page += 1;
        }

        Ok(reviews)
    }

    async fn get_authenticated_user(&self) -> Result<User> {
        debug!("GET /user");
        Ok(self.client.get("/user", None::<&()>).await?)
    }

    async fn create_commit_status(&self, request: &CommitStatusRequest) -> Result<()> {
        let route = self.route(&format!("statuses/{}", request.sha));
        debug!("POST {} state={}", route, request.state.as_str());

        let _: Value = self.client.post(route, Some(request)).await?;
        Ok(())
    }
}
