//! Client-side checks run before any request leaves the desk.
//!
//! The shapes catch typos, not every malformed address or number; the backend
//! decides what it finally accepts.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use regex::Regex;

use super::domain::{FormField, RegistrationDraft};

/// Longest KEN the backend accepts, in characters.
pub const MAX_KEN_LENGTH: usize = 7;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
// Punctuation counts toward the bound; the optional leading '+' does not.
const PHONE_PATTERN: &str = r"^\+?[0-9\s\-()]{10,15}$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

fn phone_regex() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(PHONE_PATTERN).expect("phone pattern compiles"))
}

/// Form-level rejection. The first failing rule wins, in the order
/// required fields, email, phone, KEN length.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields")]
    MissingField(FormField),
    #[error("Please fill in all required fields")]
    MissingRegistrationNumber,
    #[error("Please enter your KEN")]
    KenRequired,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid phone number")]
    InvalidPhone,
    #[error("KEN should not exceed 7 characters")]
    KenTooLong { length: usize },
}

impl ValidationError {
    /// Form field to highlight; `None` for the verification-only registration number.
    pub fn field(&self) -> Option<FormField> {
        match self {
            ValidationError::MissingField(field) => Some(*field),
            ValidationError::MissingRegistrationNumber => None,
            ValidationError::KenRequired | ValidationError::KenTooLong { .. } => {
                Some(FormField::Ken)
            }
            ValidationError::InvalidEmail => Some(FormField::Email),
            ValidationError::InvalidPhone => Some(FormField::ContactNumber),
        }
    }
}

/// Anything that can hand out raw form values by field.
pub trait FieldSource {
    fn field_value(&self, field: FormField) -> Option<&str>;
}

impl FieldSource for RegistrationDraft {
    fn field_value(&self, field: FormField) -> Option<&str> {
        Some(self.value(field))
    }
}

impl FieldSource for BTreeMap<String, String> {
    fn field_value(&self, field: FormField) -> Option<&str> {
        self.get(field.key()).map(String::as_str)
    }
}

impl FieldSource for HashMap<String, String> {
    fn field_value(&self, field: FormField) -> Option<&str> {
        self.get(field.key()).map(String::as_str)
    }
}

pub fn validate_email(value: &str) -> bool {
    email_regex().is_match(value)
}

pub fn validate_phone(value: &str) -> bool {
    phone_regex().is_match(value)
}

/// Length rule only; emptiness belongs to the required-field check.
pub fn validate_ken(value: &str) -> bool {
    value.chars().count() <= MAX_KEN_LENGTH
}

pub fn validate_required_fields<S>(record: &S, required: &[FormField]) -> bool
where
    S: FieldSource + ?Sized,
{
    first_missing_field(record, required).is_none()
}

fn first_missing_field<S>(record: &S, required: &[FormField]) -> Option<FormField>
where
    S: FieldSource + ?Sized,
{
    required.iter().copied().find(|field| {
        record
            .field_value(*field)
            .map(|value| value.trim().is_empty())
            .unwrap_or(true)
    })
}

pub fn validate_submission<S>(record: &S, required: &[FormField]) -> Result<(), ValidationError>
where
    S: FieldSource + ?Sized,
{
    if let Some(field) = first_missing_field(record, required) {
        return Err(ValidationError::MissingField(field));
    }

    let email = record.field_value(FormField::Email).unwrap_or_default();
    if !validate_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    let phone = record
        .field_value(FormField::ContactNumber)
        .unwrap_or_default();
    if !validate_phone(phone) {
        return Err(ValidationError::InvalidPhone);
    }

    let ken = record.field_value(FormField::Ken).unwrap_or_default();
    if !ken.is_empty() && !validate_ken(ken) {
        return Err(ValidationError::KenTooLong {
            length: ken.chars().count(),
        });
    }

    Ok(())
}

/// Per-field complaint shown next to an input once it loses focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("This field is required")]
    Required,
    #[error("Please enter a valid email address")]
    Email,
    #[error("Please enter a valid phone number")]
    Phone,
    #[error("KEN should not exceed 7 characters")]
    KenLength,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    /// Optional and left empty: neither valid nor invalid.
    Blank,
    Valid,
    Invalid(FieldError),
}

impl FieldState {
    pub fn into_result(self) -> Result<(), FieldError> {
        match self {
            FieldState::Invalid(error) => Err(error),
            FieldState::Blank | FieldState::Valid => Ok(()),
        }
    }
}

/// Single-field check on the trimmed value.
pub fn validate_field(field: FormField, value: &str, required: bool) -> FieldState {
    let value = value.trim();

    if value.is_empty() {
        return if required {
            FieldState::Invalid(FieldError::Required)
        } else {
            FieldState::Blank
        };
    }

    let error = match field {
        FormField::Email if !validate_email(value) => Some(FieldError::Email),
        FormField::ContactNumber if !validate_phone(value) => Some(FieldError::Phone),
        FormField::Ken if !validate_ken(value) => Some(FieldError::KenLength),
        _ => None,
    };

    match error {
        Some(error) => FieldState::Invalid(error),
        None => FieldState::Valid,
    }
}
