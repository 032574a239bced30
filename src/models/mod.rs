pub mod issue;
pub mod recommendation;
pub mod repository;

pub use issue::{AggregatedIssue, ApiIssue, ApiLabel, ApiReactions, IssueSummary, RawIssue, ScoredIssue};
pub use recommendation::{RecommendationRequest, RecommendationResponse};
pub use repository::{ApiRepository, RepositoryInfo, RepositoryRef};
