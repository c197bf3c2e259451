use std::str::FromStr;

use crate::error::{ReleaseGateError, Result};
use crate::github::types::PullRequest;

pub const DEFAULT_TRANSFORMER: &str = "title";

/// Named derivations of a release tag's variable portion from a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagTransformer {
    #[default]
    Title,
    DashesAndNumber,
}

impl TagTransformer {
    pub const ALL: [TagTransformer; 2] = [TagTransformer::Title, TagTransformer::DashesAndNumber];

    pub fn name(&self) -> &'static str {
        match self {
            TagTransformer::Title => "title",
            TagTransformer::DashesAndNumber => "dashes-and-number",
        }
    }

    pub fn apply(&self, title: &str, number: u64) -> String {
        match self {
            TagTransformer::Title => title.to_string(),
            TagTransformer::DashesAndNumber => format!("#{}-{}", number, slugify(title)),
        }
    }

    /// Full tag name: prefix followed by the transformed pull request.
    pub fn tag_name(&self, prefix: &str, pr: &PullRequest) -> String {
        format!("{}{}", prefix, self.apply(&pr.title, pr.number))
    }
}

impl FromStr for TagTransformer {
    type Err = ReleaseGateError;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|transformer| transformer.name() == name)
            .ok_or_else(|| ReleaseGateError::InvalidTransformer(name.to_string()))
    }
}

/// Looks `name` up in the registry and applies it. An empty name resolves to
/// the `title` transformer.
pub fn transform(name: &str, title: &str, number: u64) -> Result<String> {
    let name = if name.is_empty() { DEFAULT_TRANSFORMER } else { name };
    Ok(name.parse::<TagTransformer>()?.apply(title, number))
}

fn slugify(title: &str) -> String {
    let dashed = title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();

    let slug: String = dashed
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '_')
        .collect();

    slug.trim_end_matches('-').to_string()
}
