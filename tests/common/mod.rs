#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use release_gate::config::GateConfig;
use release_gate::error::{ReleaseGateError, Result};
use release_gate::github::platform::ReleasePlatform;
use release_gate::github::types::{
    CommitRef, CommitStatusRequest, CreateReleaseRequest, Label, PullRequest, Release,
    ReleaseNotes, Review, ReviewEvent, ReviewState, User,
};

pub const ACTOR: &str = "release-bot";

pub const CALVER_PATTERN: &str =
    r"^(?<year>[0-9]{4})\.(?<month>[0-9]{2})\.(?<day>[0-9]{2})-\d$";

/// Release date used by the pinned-date scenarios.
pub fn may_first() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetRelease(String),
    CreateRelease(CreateReleaseRequest),
    GenerateNotes { tag: String, target: String },
    AddLabels { issue: u64, labels: Vec<String> },
    CreateReview { pr: u64, body: String, event: ReviewEvent },
    ListReviews(u64),
    GetUser,
    CreateStatus(CommitStatusRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    NotFound,
    Found,
    ServerError,
}

/// In-memory platform that records every call in order.
pub struct RecordingPlatform {
    calls: Mutex<Vec<Call>>,
    pub lookup: Lookup,
    pub reviews: Vec<Review>,
    pub notes_body: Option<String>,
}

impl Default for RecordingPlatform {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            lookup: Lookup::NotFound,
            reviews: Vec::new(),
            notes_body: None,
        }
    }
}

impl RecordingPlatform {
    pub fn with_lookup(lookup: Lookup) -> Self {
        Self {
            lookup,
            ..Self::default()
        }
    }

    pub fn with_reviews(reviews: Vec<Review>) -> Self {
        Self {
            reviews,
            ..Self::default()
        }
    }

    pub fn with_notes(body: &str) -> Self {
        Self {
            notes_body: Some(body.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn reviews_posted(&self) -> Vec<(String, ReviewEvent)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateReview { body, event, .. } => Some((body, event)),
                _ => None,
            })
            .collect()
    }

    pub fn statuses_posted(&self) -> Vec<CommitStatusRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateStatus(status) => Some(status),
                _ => None,
            })
            .collect()
    }

    pub fn releases_created(&self) -> Vec<CreateReleaseRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateRelease(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ReleasePlatform for RecordingPlatform {
    async fn get_release_by_tag(&self, tag: &str) -> Result<Option<Release>> {
        self.record(Call::GetRelease(tag.to_string()));
        match self.lookup {
            Lookup::NotFound => Ok(None),
            Lookup::Found => Ok(Some(Release {
                id: 1,
                tag_name: tag.to_string(),
                name: None,
                html_url: None,
            })),
            Lookup::ServerError => Err(ReleaseGateError::GitHubError(
                "Server Error (status 500)".to_string(),
            )),
        }
    }

    async fn create_release(&self, request: &CreateReleaseRequest) -> Result<Release> {
        self.record(Call::CreateRelease(request.clone()));
        Ok(Release {
            id: 2,
            tag_name: request.tag_name.clone(),
            name: Some(request.name.clone()),
            html_url: None,
        })
    }

    async fn generate_release_notes(
        &self,
        tag: &str,
        target_commitish: &str,
    ) -> Result<ReleaseNotes> {
        self.record(Call::GenerateNotes {
            tag: tag.to_string(),
            target: target_commitish.to_string(),
        });
        Ok(ReleaseNotes {
            name: Some(tag.to_string()),
            body: self.notes_body.clone(),
        })
    }

    async fn add_labels(&self, issue_number: u64, labels: &[String]) -> Result<()> {
        self.record(Call::AddLabels {
            issue: issue_number,
            labels: labels.to_vec(),
        });
        Ok(())
    }

    async fn create_review(&self, pr_number: u64, body: &str, event: ReviewEvent) -> Result<()> {
        self.record(Call::CreateReview {
            pr: pr_number,
            body: body.to_string(),
            event,
        });
        Ok(())
    }

    async fn list_reviews(&self, pr_number: u64) -> Result<Vec<Review>> {
        self.record(Call::ListReviews(pr_number));
        Ok(self.reviews.clone())
    }

    async fn get_authenticated_user(&self) -> Result<User> {
        self.record(Call::GetUser);
        Ok(User {
            login: ACTOR.to_string(),
        })
    }

    async fn create_commit_status(&self, request: &CommitStatusRequest) -> Result<()> {
        self.record(Call::CreateStatus(request.clone()));
        Ok(())
    }
}

pub fn review(login: &str, state: ReviewState) -> Review {
    Review {
        user: Some(User {
            login: login.to_string(),
        }),
        state,
    }
}

/// Baseline release inputs, with overrides applied on
/// top (input names without the `INPUT_` prefix).
pub fn gate_config(overrides: &[(&str, &str)]) -> GateConfig {
    let mut vars: HashMap<String, String> = [
        ("REPO_TOKEN", "hunter2"),
        ("RELEASE_PATTERN", CALVER_PATTERN),
        ("BASE_BRANCH", "master"),
        ("HEAD_BRANCH", "dev"),
        ("TAG_PREFIX", "release/"),
        ("TAG_TRANSFORMER", "title"),
        ("RELEASE_LABEL", "Release"),
        ("APPROVE_RELEASES", "true"),
        ("CREATE_STATUS", "true"),
        ("STATUS_NAME", "Monkey Release"),
    ]
    .into_iter()
    .map(|(k, v)| (format!("INPUT_{}", k), v.to_string()))
    .collect();

    for (key, value) in overrides {
        vars.insert(format!("INPUT_{}", key), value.to_string());
    }

    GateConfig::from_vars(vars).expect("test configuration should load")
}

pub fn pull_request(title: &str, body: Option<&str>) -> PullRequest {
    PullRequest {
        number: 1,
        title: title.to_string(),
        body: body.map(str::to_string),
        labels: Vec::new(),
        head: CommitRef {
            ref_field: "dev".to_string(),
            sha: "deadbeef".to_string(),
        },
        base: CommitRef {
            ref_field: "master".to_string(),
            sha: "cafebabe".to_string(),
        },
        merged: Some(false),
        merge_commit_sha: None,
    }
}

pub fn labelled(mut pr: PullRequest, label: &str) -> PullRequest {
    pr.labels.push(Label {
        name: label.to_string(),
    });
    pr
}

pub fn merged(mut pr: PullRequest, merge_commit_sha: &str) -> PullRequest {
    pr.merged = Some(true);
    pr.merge_commit_sha = Some(merge_commit_sha.to_string());
    pr
}
