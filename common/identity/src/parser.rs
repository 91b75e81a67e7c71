//! National ID number validation and decomposition.
//!
//! Layout of the 16-digit number:
//!
//! ```text
//! 1 1990 8 0000001 0 12
//! | |    | |       | +- security code (2)
//! | |    | |       +--- issue frequency (1)
//! | |    | +----------- birth order (7)
//! | |    +------------- gender: 7 female, 8 male
//! | +------------------ year of birth
//! +-------------------- status: 1 citizen, 2 refugee, 3 foreigner
//! ```
//!
//! A single field pass produces every violation; the boolean checks and the
//! detailed `parse` view are both derived from it.

use chrono::{Datelike, Utc};
use tracing::debug;

use crate::document::{
    CitizenshipStatus, Gender, ParsedIdentityDocument, BIRTH_ORDER, GENDER, ID_LENGTH,
    ISSUE_FREQUENCY, MIN_BIRTH_YEAR, SECURITY_CODE, SHORT_ID_LENGTH, STATUS, UNKNOWN_LABEL, YEAR,
};
use crate::error::IdentityViolation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityDocumentParser {
    current_year: i32,
}

impl Default for IdentityDocumentParser {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityDocumentParser {
    /// Birth years are accepted up to the current calendar year (UTC).
    pub fn new() -> Self {
        Self::with_current_year(Utc::now().year())
    }

    pub fn with_current_year(current_year: i32) -> Self {
        Self { current_year }
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Lenient check: the 10-digit short form (`1` then nine digits) or a
    /// fully valid 16-digit number.
    pub fn validate(&self, id: &str) -> bool {
        let cleaned = strip_whitespace(id);
        is_short_form(&cleaned) || self.inspect(&cleaned).1.is_empty()
    }

    /// Strict 16-digit check; any violated field fails the whole number.
    pub fn validate_full(&self, id: &str) -> bool {
        self.violations(id).is_empty()
    }

    pub fn violations(&self, id: &str) -> Vec<IdentityViolation> {
        self.inspect(&strip_whitespace(id)).1
    }

    /// Decompose the number, collecting every violation instead of stopping at
    /// the first.
    pub fn parse(&self, id: &str) -> ParsedIdentityDocument {
        let (mut document, violations) = self.inspect(&strip_whitespace(id));
        if !violations.is_empty() {
            debug!(count = violations.len(), "identity document rejected");
        }
        document.is_valid = violations.is_empty();
        document.errors = violations.iter().map(ToString::to_string).collect();
        document
    }

    fn inspect(&self, id: &str) -> (ParsedIdentityDocument, Vec<IdentityViolation>) {
        let chars: Vec<char> = id.chars().collect();
        if chars.len() != ID_LENGTH {
            let document = ParsedIdentityDocument {
                status_label: UNKNOWN_LABEL.to_string(),
                gender_label: UNKNOWN_LABEL.to_string(),
                ..ParsedIdentityDocument::default()
            };
            return (document, vec![IdentityViolation::Length { actual: chars.len() }]);
        }

        let field = |(start, end): (usize, usize)| chars[start..end].iter().collect::<String>();
        let mut violations = Vec::new();

        let status = field(STATUS);
        let citizenship = CitizenshipStatus::from_code(&status);
        if citizenship.is_none() {
            violations.push(IdentityViolation::Status(status.clone()));
        }

        let year_of_birth = field(YEAR);
        if let Some(violation) = self.check_year(&year_of_birth) {
            violations.push(violation);
        }

        let gender = field(GENDER);
        let gender_kind = Gender::from_code(&gender);
        if gender_kind.is_none() {
            violations.push(IdentityViolation::Gender(gender.clone()));
        }

        let birth_order = field(BIRTH_ORDER);
        if !all_digits(&birth_order) {
            violations.push(IdentityViolation::BirthOrder(birth_order.clone()));
        }

        let issue_frequency = field(ISSUE_FREQUENCY);
        if !all_digits(&issue_frequency) {
            violations.push(IdentityViolation::IssueFrequency(issue_frequency.clone()));
        }

        let security_code = field(SECURITY_CODE);
        if !all_digits(&security_code) {
            violations.push(IdentityViolation::SecurityCode(security_code.clone()));
        }

        let document = ParsedIdentityDocument {
            status_label: citizenship
                .map(|status| status.label())
                .unwrap_or(UNKNOWN_LABEL)
                .to_string(),
            status,
            year_of_birth,
            gender_label: gender_kind
                .map(|gender| gender.label())
                .unwrap_or(UNKNOWN_LABEL)
                .to_string(),
            gender,
            birth_order,
            issue_frequency,
            security_code,
            is_valid: false,
            errors: Vec::new(),
        };
        (document, violations)
    }

    fn check_year(&self, value: &str) -> Option<IdentityViolation> {
        if !all_digits(value) {
            return Some(IdentityViolation::YearNotNumeric(value.to_string()));
        }
        let year: i32 = match value.parse() {
            Ok(year) => year,
            Err(_) => return Some(IdentityViolation::YearNotNumeric(value.to_string())),
        };
        if (MIN_BIRTH_YEAR..=self.current_year).contains(&year) {
            None
        } else {
            Some(IdentityViolation::YearOutOfRange {
                year,
                max: self.current_year,
            })
        }
    }
}

/// Space-separate the fields of a 16-digit number; anything else comes back
/// untouched.
pub fn format_for_display(id: &str) -> String {
    if id.len() != ID_LENGTH || !all_digits(id) {
        return id.to_string();
    }
    [STATUS, YEAR, GENDER, BIRTH_ORDER, ISSUE_FREQUENCY, SECURITY_CODE]
        .iter()
        .map(|&(start, end)| &id[start..end])
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_whitespace(id: &str) -> String {
    id.chars().filter(|c| !c.is_whitespace()).collect()
}

fn is_short_form(id: &str) -> bool {
    id.len() == SHORT_ID_LENGTH && id.starts_with('1') && all_digits(id)
}

fn all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}
