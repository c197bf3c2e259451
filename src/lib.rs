pub mod action;
pub mod config;
pub mod enforcement;
pub mod error;
pub mod github;
pub mod release;
pub mod validation;
pub mod webhooks;

pub use error::ReleaseGateError;
