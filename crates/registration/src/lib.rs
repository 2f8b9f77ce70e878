pub mod api;
pub mod config;
pub mod error;
pub mod registrations;
pub mod telemetry;

pub use api::{ApiError, HttpGateway, Operation, RegistrationApi};
pub use registrations::{
    filter, validate_submission, AdminPanel, FilterQuery, FlowError, RegistrationDesk,
    RegistrationDraft, RegistrationRecord, StatusFilter, ValidationError,
};
