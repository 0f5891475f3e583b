// ATS Compatibility Scorer: section checklist, formatting risks, keyword
// coverage, composite score and remediation suggestions.
// Pure and synchronous; safe to share across request handlers.

pub mod checklist;
pub mod handlers;
pub mod scorer;
pub mod suggestions;

pub use checklist::AtsChecklist;
pub use scorer::{AtsReport, AtsScorer};
pub use suggestions::format_suggestions;
