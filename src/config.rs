use std::collections::HashMap;

use config::{Config, Environment};
use serde::Deserialize;

use crate::error::{ReleaseGateError, Result};
use crate::github::types::ReviewEvent;
use crate::validation::branch_glob::BranchMatcher;
use crate::validation::tag_transformer::{TagTransformer, DEFAULT_TRANSFORMER};
use crate::validation::title::TitlePolicy;

/// Environment prefix under which the Actions runner exposes `with:` inputs.
pub const INPUT_PREFIX: &str = "INPUT";

pub const DEFAULT_VALID_RELEASE_MESSAGE: &str = "Valid release.";

/// Inputs exactly as supplied. Unset and empty inputs are equivalent.
#[derive(Debug, Default, Deserialize)]
struct RawInputs {
    repo_token: Option<String>,
    release_pattern: Option<String>,
    base_branch: Option<String>,
    head_branch: Option<String>,
    tag_prefix: Option<String>,
    tag_transformer: Option<String>,
    release_label: Option<String>,
    approve_releases: Option<String>,
    create_status: Option<String>,
    status_name: Option<String>,
    validate: Option<String>,
    prerelease: Option<String>,
    generate_body: Option<String>,
    valid_release_message: Option<String>,
}

/// Typed, immutable configuration for one invocation.
#[derive(Clone)]
pub struct GateConfig {
    /// Must be a user or personal access token when `approve_releases` is on.
    /// Installation tokens are refused by `GET /user`, which the duplicate
    /// approval check needs.
    pub repo_token: String,
    pub title_policy: TitlePolicy,
    pub base_branch: String,
    pub head_branch: BranchMatcher,
    pub tag_prefix: String,
    pub tag_transformer: TagTransformer,
    pub release_label: Option<String>,
    pub approve_releases: bool,
    pub create_status: bool,
    pub status_name: Option<String>,
    pub validate: bool,
    pub prerelease: bool,
    pub generate_body: bool,
    pub valid_release_message: String,
}

impl std::fmt::Debug for GateConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateConfig")
            .field("repo_token", &"***")
            .field("release_pattern", &self.title_policy.pattern())
            .field("base_branch", &self.base_branch)
            .field("head_branch", &self.head_branch.as_str())
            .field("tag_prefix", &self.tag_prefix)
            .field("tag_transformer", &self.tag_transformer.name())
            .field("release_label", &self.release_label)
            .field("approve_releases", &self.approve_releases)
            .field("create_status", &self.create_status)
            .field("status_name", &self.status_name)
            .field("validate", &self.validate)
            .field("prerelease", &self.prerelease)
            .field("generate_body", &self.generate_body)
            .field("valid_release_message", &self.valid_release_message)
            .finish()
    }
}

impl GateConfig {
    /// Loads inputs from the `INPUT_*` process environment.
    pub fn load() -> Result<Self> {
        Self::from_source(Environment::with_prefix(INPUT_PREFIX))
    }

    /// Loads inputs from an explicit `INPUT_*` variable map instead of the
    /// process environment.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        Self::from_source(Environment::with_prefix(INPUT_PREFIX).source(Some(vars)))
    }

    fn from_source(source: Environment) -> Result<Self> {
        let raw: RawInputs = Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawInputs) -> Result<Self> {
        let repo_token = required(raw.repo_token, "repo_token")?;
        let release_pattern = required(raw.release_pattern, "release_pattern")?;
        let base_branch = required(raw.base_branch, "base_branch")?;
        let head_branch = required(raw.head_branch, "head_branch")?;
        let approve_releases = required_boolean(raw.approve_releases, "approve_releases")?;
        let create_status = required_boolean(raw.create_status, "create_status")?;

        let status_name = present(raw.status_name);
        if create_status && status_name.is_none() {
            return Err(ReleaseGateError::missing_input("status_name"));
        }

        let tag_transformer = present(raw.tag_transformer)
            .unwrap_or_else(|| DEFAULT_TRANSFORMER.to_string())
            .parse::<TagTransformer>()?;

        Ok(Self {
            repo_token,
            title_policy: TitlePolicy::new(&release_pattern)?,
            base_branch,
            head_branch: BranchMatcher::new(&head_branch),
            tag_prefix: raw.tag_prefix.unwrap_or_default(),
            tag_transformer,
            release_label: present(raw.release_label),
            approve_releases,
            create_status,
            status_name,
            validate: optional_boolean(raw.validate, "validate", true)?,
            prerelease: optional_boolean(raw.prerelease, "prerelease", false)?,
            generate_body: optional_boolean(raw.generate_body, "generate_body", false)?,
            valid_release_message: present(raw.valid_release_message)
                .unwrap_or_else(|| DEFAULT_VALID_RELEASE_MESSAGE.to_string()),
        })
    }

    /// Review event for a release that passed validation.
    pub fn approve_event(&self) -> ReviewEvent {
        if self.approve_releases {
            ReviewEvent::Approve
        } else {
            ReviewEvent::Comment
        }
    }

    /// Review event for a release that failed validation.
    pub fn fail_event(&self) -> ReviewEvent {
        if self.approve_releases {
            ReviewEvent::RequestChanges
        } else {
            ReviewEvent::Comment
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn required(value: Option<String>, name: &str) -> Result<String> {
    present(value).ok_or_else(|| ReleaseGateError::missing_input(name))
}

fn boolean(value: String, name: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ReleaseGateError::invalid_boolean(name, &value)),
    }
}

fn required_boolean(value: Option<String>, name: &str) -> Result<bool> {
    boolean(required(value, name)?, name)
}

fn optional_boolean(value: Option<String>, name: &str, default: bool) -> Result<bool> {
    present(value).map_or(Ok(default), |v| boolean(v, name))
}
