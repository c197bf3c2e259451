use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{ReleaseGateError, Result};
use crate::github::types::PullRequestEvent;

pub struct WebhookProcessor;

impl WebhookProcessor {
    pub fn process_webhook(payload: &Value) -> Result<PullRequestEvent> {
        if payload.get("action").and_then(Value::as_str).is_none() {
            return Err(ReleaseGateError::WebhookError(
                "Event payload has no action".to_string(),
            ));
        }

        Ok(serde_json::from_value(payload.clone())?)
    }

    /// Reads the event file the runner points `GITHUB_EVENT_PATH` at.
    pub fn load(path: &Path) -> Result<PullRequestEvent> {
        debug!("Reading event payload from {:?}", path);
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ReleaseGateError::WebhookError(format!("Failed to read event file {:?}: {}", path, e))
        })?;
        let payload: Value = serde_json::from_str(&raw)?;
        Self::process_webhook(&payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pull_request_payload() {
        let payload = json!({
            "action": "closed",
            "pull_request": {
                "number": 12,
                "title": "2024.05.01-1",
                "body": null,
                "labels": [{"name": "Release", "color": "ededed"}],
                "head": {"ref": "dev", "sha": "abc123"},
                "base": {"ref": "master", "sha": "def456"},
                "merged": true,
                "merge_commit_sha": "deadbeef"
            },
            "repository": {
                "name": "repo",
                "full_name": "owner/repo",
                "owner": {"login": "owner"}
            }
        });

        let event = WebhookProcessor::process_webhook(&payload).unwrap();
        assert_eq!(event.action, "closed");
        let pr = event.pull_request.unwrap();
        assert_eq!(pr.number, 12);
        assert!(pr.is_merged());
        assert!(pr.has_label("Release"));
        assert_eq!(pr.description(), None);
        assert_eq!(pr.head.ref_field, "dev");
        assert_eq!(pr.merge_commit_sha.as_deref(), Some("deadbeef"));
    }

    #[test]
    fn test_payload_without_pull_request() {
        let event = WebhookProcessor::process_webhook(&json!({"action": "created"})).unwrap();
        assert!(event.pull_request.is_none());
    }

    #[test]
    fn test_payload_without_action() {
        let err = WebhookProcessor::process_webhook(&json!({"zen": "Keep it simple"})).unwrap_err();
        assert!(matches!(err, ReleaseGateError::WebhookError(_)));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(WebhookProcessor::load(Path::new("/nonexistent/event.json")).is_err());
    }
}
