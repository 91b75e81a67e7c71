use thiserror::Error;

use crate::document::{ID_LENGTH, MIN_BIRTH_YEAR};

/// One field-level problem with a national ID number. `Display` is the text
/// shown next to the registration form field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityViolation {
    #[error("ID number must be exactly {} digits (got {actual})", ID_LENGTH)]
    Length { actual: usize },
    #[error("invalid status digit '{0}': expected 1 (citizen), 2 (refugee) or 3 (foreigner)")]
    Status(String),
    #[error("year of birth '{0}' is not a number")]
    YearNotNumeric(String),
    #[error("year of birth {year} must be between {} and {max}", MIN_BIRTH_YEAR)]
    YearOutOfRange { year: i32, max: i32 },
    #[error("invalid gender digit '{0}': expected 7 (female) or 8 (male)")]
    Gender(String),
    #[error("birth order '{0}' must be 7 digits")]
    BirthOrder(String),
    #[error("issue frequency '{0}' must be a single digit")]
    IssueFrequency(String),
    #[error("security code '{0}' must be 2 digits")]
    SecurityCode(String),
}

impl IdentityViolation {
    /// Stable identifier for the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            IdentityViolation::Length { .. } => "length",
            IdentityViolation::Status(_) => "status",
            IdentityViolation::YearNotNumeric(_) | IdentityViolation::YearOutOfRange { .. } => {
                "yearOfBirth"
            }
            IdentityViolation::Gender(_) => "gender",
            IdentityViolation::BirthOrder(_) => "birthOrder",
            IdentityViolation::IssueFrequency(_) => "issueFrequency",
            IdentityViolation::SecurityCode(_) => "securityCode",
        }
    }
}
