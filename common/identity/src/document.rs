use serde::{Deserialize, Serialize};

pub const ID_LENGTH: usize = 16;
pub const SHORT_ID_LENGTH: usize = 10;
pub const MIN_BIRTH_YEAR: i32 = 1900;

/// Field boundaries of the 16-digit number, as `(start, end)` char offsets.
pub(crate) const STATUS: (usize, usize) = (0, 1);
pub(crate) const YEAR: (usize, usize) = (1, 5);
pub(crate) const GENDER: (usize, usize) = (5, 6);
pub(crate) const BIRTH_ORDER: (usize, usize) = (6, 13);
pub(crate) const ISSUE_FREQUENCY: (usize, usize) = (13, 14);
pub(crate) const SECURITY_CODE: (usize, usize) = (14, 16);

pub const UNKNOWN_LABEL: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitizenshipStatus {
    Citizen,
    Refugee,
    Foreigner,
}

impl CitizenshipStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(CitizenshipStatus::Citizen),
            "2" => Some(CitizenshipStatus::Refugee),
            "3" => Some(CitizenshipStatus::Foreigner),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CitizenshipStatus::Citizen => "Rwandan Citizen",
            CitizenshipStatus::Refugee => "Refugee",
            CitizenshipStatus::Foreigner => "Foreigner",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "7" => Some(Gender::Female),
            "8" => Some(Gender::Male),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }
}

/// Decomposed national ID number. Built fresh by every `parse` call.
///
/// Raw fields hold the characters found at each position (empty when the
/// input is the wrong length); labels fall back to `"Unknown"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedIdentityDocument {
    pub status: String,
    pub status_label: String,
    pub year_of_birth: String,
    pub gender: String,
    pub gender_label: String,
    pub birth_order: String,
    pub issue_frequency: String,
    pub security_code: String,
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ParsedIdentityDocument {
    pub fn citizenship(&self) -> Option<CitizenshipStatus> {
        CitizenshipStatus::from_code(&self.status)
    }

    pub fn gender_kind(&self) -> Option<Gender> {
        Gender::from_code(&self.gender)
    }

    pub fn birth_year(&self) -> Option<i32> {
        self.year_of_birth.parse().ok()
    }
}
