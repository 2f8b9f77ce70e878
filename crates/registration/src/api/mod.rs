//! Typed boundary to the registration backend.
//!
//! `RegistrationApi` is the seam the desk and admin panel talk through;
//! `HttpGateway` is the production implementation over JSON/HTTP.

pub mod contract;
mod http;

use async_trait::async_trait;

use crate::registrations::domain::{RegistrationDraft, RegistrationRecord};

pub use contract::{
    Envelope, ExportPayload, KenLookupRequest, ListingEnvelope, Method, Operation,
    RegistrationListing, VerifyRequest,
};
pub use http::HttpGateway;

/// Remote operations the client depends on.
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    async fn list_registrations(&self) -> Result<RegistrationListing, ApiError>;
    async fn create_manual_registration(
        &self,
        draft: &RegistrationDraft,
    ) -> Result<RegistrationRecord, ApiError>;
    async fn export_registrations(&self) -> Result<ExportPayload, ApiError>;
    async fn create_registration(
        &self,
        draft: &RegistrationDraft,
    ) -> Result<RegistrationRecord, ApiError>;
    async fn validate_ken(&self, request: &KenLookupRequest)
        -> Result<RegistrationRecord, ApiError>;
    async fn verify(&self, request: &VerifyRequest) -> Result<RegistrationRecord, ApiError>;
}

/// Failure talking to the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The backend answered `success: false`.
    #[error("request rejected: {}", .message.as_deref().unwrap_or("no reason given"))]
    Rejected { message: Option<String> },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unreadable response: {0}")]
    Decode(String),
    #[error("backend responded with HTTP {status}")]
    Status { status: u16 },
    #[error("response broke the registration contract: {0}")]
    Contract(String),
}

impl ApiError {
    /// Text to put in front of the user for a failed `operation`.
    pub fn user_message(&self, operation: Operation) -> String {
        match self {
            ApiError::Rejected {
                message: Some(message),
            } => message.clone(),
            ApiError::Rejected { message: None } => operation.rejection_fallback().to_string(),
            ApiError::Status { .. } if operation == Operation::Export => {
                operation.rejection_fallback().to_string()
            }
            ApiError::Transport(_)
            | ApiError::Decode(_)
            | ApiError::Status { .. }
            | ApiError::Contract(_) => operation.network_failure().to_string(),
        }
    }
}
