pub mod aggregation;
pub mod candidates;
pub mod keywords;
pub mod level;
pub mod providers;
pub mod quality;
pub mod recommendations;
pub mod scoring;

pub use providers::{GithubGateway, RepositoryGateway};
pub use recommendations::{recommend, RecommendationSettings};
