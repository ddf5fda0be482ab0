// Core algorithm exports
pub mod filters;
pub mod loader;
pub mod matcher;

pub use filters::{matches_rule, same_category};
pub use loader::{load_rules, read_rules, LoadError, RowDiagnostic, RowParseError, RuleTable};
pub use matcher::match_schemes;
