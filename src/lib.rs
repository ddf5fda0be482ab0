//! Scheme Eligibility - matches applicant details against a table of
//! welfare scheme rules.
//!
//! The rule table is a CSV file re-read on every request. Applicants submit
//! their details through an HTML form and get back either a web page or a
//! PDF listing every scheme they qualify for.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{load_rules, match_schemes, LoadError, RuleTable};
pub use crate::models::{AgeRange, MatchResult, RuleRecord, SchemeListing, UserProfile};
