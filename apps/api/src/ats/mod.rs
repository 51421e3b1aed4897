// ATS optimization: keyword extraction, coverage scoring, resume patching.
// Remote calls go through llm_client::TextGenerator; every remote path has a
// deterministic local fallback and never fails outward.

pub mod coverage;
pub mod handlers;
pub mod keywords;
pub mod optimizer;
pub mod patcher;
pub mod prompts;
pub mod quota;

pub use coverage::CoverageReport;
pub use keywords::KeywordExtractor;
pub use optimizer::{AtsOptimizer, OptimizationOutcome};
pub use quota::QuotaState;
