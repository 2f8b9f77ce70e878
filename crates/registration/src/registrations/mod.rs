//! Registration records and everything the desk does with them before and
//! after talking to the backend: validation, filtering, statistics, views.

pub mod admin;
pub mod debounce;
pub mod desk;
pub mod domain;
pub mod filter;
pub mod summary;
pub mod validation;
pub mod views;

#[cfg(test)]
mod tests;

use crate::api::{ApiError, Operation};

pub use admin::{AdminPanel, ExportFile, ManualRegistration};
pub use debounce::Debouncer;
pub use desk::{DeskSession, RegistrationDesk};
pub use domain::{
    Department, FormField, RecordInconsistency, RegistrationDraft, RegistrationRecord,
    VerificationStatus, REGISTRATION_FIELDS,
};
pub use filter::{filter, FilterQuery, StatusFilter, UnknownStatus};
pub use summary::{registered_on, ListingCounts, RegistrationStats};
pub use validation::{
    validate_email, validate_field, validate_ken, validate_phone, validate_required_fields,
    validate_submission, FieldError, FieldSource, FieldState, ValidationError, MAX_KEN_LENGTH,
};
pub use views::{
    export_file_name, format_registration_date, rows, write_rows_csv, LookupView,
    RegistrationReceipt, RegistrationRow, VerificationView,
};

/// Why a desk or admin action did not complete. Every variant has a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// Rejected locally; no request was sent.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("{operation:?} failed: {source}")]
    Api {
        operation: Operation,
        #[source]
        source: ApiError,
    },
}

impl FlowError {
    pub(crate) fn api(operation: Operation) -> impl FnOnce(ApiError) -> Self {
        move |source| FlowError::Api { operation, source }
    }

    pub fn user_message(&self) -> String {
        match self {
            FlowError::Invalid(error) => error.to_string(),
            FlowError::Api { operation, source } => source.user_message(*operation),
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, FlowError::Invalid(_))
    }
}
