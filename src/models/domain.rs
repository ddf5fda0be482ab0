use serde::{Deserialize, Serialize};

/// Inclusive age interval taken from the `Age` column of the rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: u32,
    pub max: u32,
}

impl AgeRange {
    /// Returns `None` when `min > max`
    pub fn new(min: u32, max: u32) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    #[inline]
    pub fn contains(&self, age: u32) -> bool {
        self.min <= age && age <= self.max
    }
}

/// One row of the eligibility table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    #[serde(rename = "ageRange")]
    pub age_range: AgeRange,
    #[serde(rename = "incomeRange")]
    pub income_range: String,
    #[serde(rename = "employmentStatus")]
    pub employment_status: String,
    pub residency: String,
    #[serde(rename = "eligibleSchemes")]
    pub eligible_schemes: Vec<String>,
}

/// Applicant attributes submitted with a single request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub income: String,
    #[serde(rename = "employmentStatus")]
    pub employment_status: String,
    pub residency: String,
}

/// Scheme names a profile qualifies for, in rule-table order.
///
/// Duplicates are kept: a scheme named by two matching rows appears twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub schemes: Vec<String>,
}

impl MatchResult {
    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.schemes.len()
    }
}

/// Payload handed to the rendering collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeListing {
    pub name: String,
    pub schemes: Vec<String>,
}

impl SchemeListing {
    pub fn new(name: impl Into<String>, result: MatchResult) -> Self {
        Self {
            name: name.into(),
            schemes: result.schemes,
        }
    }
}

/// Output requested by the applicant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Pdf,
}
