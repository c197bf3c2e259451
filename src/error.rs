use thiserror::Error;

impl From<serde_json::Error> for ReleaseGateError {
    fn from(err: serde_json::Error) -> Self {
        Self::WebhookError(format!("Invalid event payload: {}", err))
    }
}

impl From<octocrab::Error> for ReleaseGateError {
    fn from(err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => Self::GitHubError(format!(
                "{} (status {})",
                source.message,
                source.status_code.as_u16()
            )),
            other => Self::GitHubError(other.to_string()),
        }
    }
}

impl From<config::ConfigError> for ReleaseGateError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ReleaseGateError {
    /// Policy rejection. The message is mirrored verbatim into the PR review.
    #[error("{0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid transformer: {0}")]
    InvalidTransformer(String),

    #[error("GitHub API error: {0}")]
    GitHubError(String),

    #[error("Webhook processing error: {0}")]
    WebhookError(String),

    #[error("Failed to write action output: {0}")]
    OutputError(String),
}

impl ReleaseGateError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    pub fn missing_input(name: &str) -> Self {
        Self::ConfigError(format!("Input required and not supplied: {}", name))
    }

    pub fn invalid_boolean(name: &str, value: &str) -> Self {
        Self::ConfigError(format!(
            "Input {} must be true or false, got {:?}",
            name, value
        ))
    }

    /// True for policy rejections, which are converted into a review instead of
    /// escaping as transport or configuration failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }
}

pub type Result<T> = std::result::Result<T, ReleaseGateError>;
