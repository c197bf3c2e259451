pub mod branch_glob;
pub mod pipeline;
pub mod tag_transformer;
pub mod title;

pub use branch_glob::BranchMatcher;
pub use pipeline::{ValidationPipeline, Verdict};
pub use tag_transformer::TagTransformer;
pub use title::TitlePolicy;
