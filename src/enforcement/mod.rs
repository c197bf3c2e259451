pub mod review;
pub mod status_checks;

pub use review::ReviewReactor;
pub use status_checks::{StatusCheckGenerator, VerdictKind};
