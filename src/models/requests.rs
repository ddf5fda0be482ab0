use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::domain::{OutputFormat, UserProfile};

/// Form fields in the order they appear on the page
const FORM_FIELDS: [&str; 5] = ["name", "age", "income", "employment", "residency"];

/// Raw eligibility form as posted by the browser.
///
/// Every field defaults to empty so a missing input surfaces as a
/// validation message instead of a payload error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EligibilityForm {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "positive_age"))]
    pub age: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub income: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub employment: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub residency: String,
    #[serde(default)]
    pub format: OutputFormat,
}

impl EligibilityForm {
    /// Validate the submission and convert it into a trimmed profile
    pub fn into_profile(self) -> Result<UserProfile, ValidationErrors> {
        self.validate()?;

        let Some(age) = parse_age(&self.age) else {
            let mut errors = ValidationErrors::new();
            errors.add("age", age_error());
            return Err(errors);
        };

        Ok(UserProfile {
            name: self.name.trim().to_string(),
            age,
            income: self.income.trim().to_string(),
            employment_status: self.employment.trim().to_string(),
            residency: self.residency.trim().to_string(),
        })
    }
}

/// Flatten validation errors into one user-facing sentence per field,
/// in form order.
pub fn describe_errors(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();

    FORM_FIELDS
        .iter()
        .filter_map(|field| field_errors.get(*field))
        .filter_map(|errs| errs.first())
        .map(|err| match &err.message {
            Some(message) => message.to_string(),
            None => err.code.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_age(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|age| *age > 0)
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::Borrowed("Please fill in every field."));
        return Err(err);
    }
    Ok(())
}

fn positive_age(value: &str) -> Result<(), ValidationError> {
    match parse_age(value) {
        Some(_) => Ok(()),
        None => Err(age_error()),
    }
}

fn age_error() -> ValidationError {
    let mut err = ValidationError::new("age");
    err.message = Some(Cow::Borrowed("Age must be a whole number greater than zero."));
    err
}
