pub mod client;
pub mod platform;
pub mod types;
pub mod webhooks;

pub use client::GitHubClient;
pub use platform::ReleasePlatform;
