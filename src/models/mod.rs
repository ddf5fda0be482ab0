// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{AgeRange, MatchResult, OutputFormat, RuleRecord, SchemeListing, UserProfile};
pub use requests::{describe_errors, EligibilityForm};
pub use responses::HealthResponse;
