pub mod document;
pub mod error;
pub mod parser;

pub use document::{CitizenshipStatus, Gender, ParsedIdentityDocument};
pub use error::IdentityViolation;
pub use parser::{format_for_display, IdentityDocumentParser};
