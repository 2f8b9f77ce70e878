use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{FormField, RegistrationDraft, RegistrationRecord, REGISTRATION_FIELDS};
use super::validation::{validate_submission, ValidationError};
use super::FlowError;
use crate::api::{ApiError, KenLookupRequest, Operation, RegistrationApi, VerifyRequest};

/// What the attendee-facing desk remembers between actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeskSession {
    /// Receipts issued during this session, oldest first.
    pub registered: Vec<RegistrationRecord>,
    /// Registration number found by the last KEN lookup, awaiting verification.
    pub pending_verification: Option<String>,
}

/// Attendee flows: register, look up by KEN, verify with phone number.
pub struct RegistrationDesk<A> {
    api: Arc<A>,
    session: DeskSession,
}

impl<A> RegistrationDesk<A>
where
    A: RegistrationApi + 'static,
{
    pub fn new(api: Arc<A>) -> Self {
        Self::with_session(api, DeskSession::default())
    }

    pub fn with_session(api: Arc<A>, session: DeskSession) -> Self {
        Self { api, session }
    }

    pub fn session(&self) -> &DeskSession {
        &self.session
    }

    /// Registration number to prefill in the verification form, if a lookup found one.
    pub fn verification_prefill(&self) -> Option<&str> {
        self.session.pending_verification.as_deref()
    }

    /// Validate and submit a new registration.
    pub async fn register(
        &mut self,
        draft: RegistrationDraft,
    ) -> Result<RegistrationRecord, FlowError> {
        let draft = draft.normalized();
        validate_submission(&draft, &REGISTRATION_FIELDS)?;

        let record = self
            .api
            .create_registration(&draft)
            .await
            .map_err(FlowError::api(Operation::CreateRegistration))?;

        info!(
            registration_number = %record.registration_number,
            "registration created"
        );
        self.session.registered.push(record.clone());
        Ok(record)
    }

    /// Find a registration by KEN.
    pub async fn lookup(&mut self, ken: &str) -> Result<RegistrationRecord, FlowError> {
        if ken.is_empty() {
            return Err(ValidationError::KenRequired.into());
        }

        let request = KenLookupRequest {
            ken: ken.to_uppercase(),
        };
        let record = self
            .api
            .validate_ken(&request)
            .await
            .map_err(FlowError::api(Operation::ValidateKen))?;

        self.session.pending_verification = Some(record.registration_number.clone());
        Ok(record)
    }

    /// Verify a registration; the response must carry the verified number.
    pub async fn verify(
        &mut self,
        registration_number: &str,
        contact_number: &str,
    ) -> Result<RegistrationRecord, FlowError> {
        if registration_number.is_empty() {
            return Err(ValidationError::MissingRegistrationNumber.into());
        }
        if contact_number.is_empty() {
            return Err(ValidationError::MissingField(FormField::ContactNumber).into());
        }

        let request = VerifyRequest {
            registration_number: registration_number.to_string(),
            contact_number: contact_number.to_string(),
        };
        let record = self
            .api
            .verify(&request)
            .await
            .map_err(FlowError::api(Operation::Verify))?;

        if record.verified_number().is_none() {
            warn!(
                registration_number = %record.registration_number,
                "verification response carried no verified number"
            );
            return Err(FlowError::Api {
                operation: Operation::Verify,
                source: ApiError::Contract("verified number missing".to_string()),
            });
        }

        self.session.pending_verification = None;
        info!(
            registration_number = %record.registration_number,
            "registration verified"
        );
        Ok(record)
    }
}
