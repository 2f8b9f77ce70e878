use std::io::Read;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use ureq::{Agent, AgentBuilder};

use super::contract::{
    Envelope, ExportPayload, KenLookupRequest, ListingEnvelope, Method, Operation,
    RegistrationListing, VerifyRequest,
};
use super::{ApiError, RegistrationApi};
use crate::config::ApiConfig;
use crate::registrations::domain::{RegistrationDraft, RegistrationRecord};

/// JSON-over-HTTP client for the registration backend.
///
/// Requests run on the blocking pool so callers on the async runtime never stall.
#[derive(Clone)]
pub struct HttpGateway {
    agent: Agent,
    base_url: String,
}

impl HttpGateway {
    pub fn new(config: &ApiConfig) -> Self {
        let agent = AgentBuilder::new().timeout(config.timeout).build();
        Self {
            agent,
            base_url: config.base_url.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, operation: Operation) -> String {
        format!("{}{}", self.base_url, operation.path())
    }

    fn call(
        &self,
        operation: Operation,
        body: Option<serde_json::Value>,
    ) -> Result<ureq::Response, ApiError> {
        let url = self.url(operation);
        debug!(?operation, %url, "sending registration request");

        let result = match (operation.method(), body) {
            (Method::Get, _) => self.agent.get(&url).call(),
            (Method::Post, Some(body)) => self.agent.post(&url).send_json(body),
            (Method::Post, None) => self.agent.post(&url).call(),
        };

        match result {
            Ok(response) => Ok(response),
            // Rejections may arrive with 4xx/5xx codes; the envelope still carries the reason.
            Err(ureq::Error::Status(status, response)) => {
                debug!(?operation, status, "backend answered with error status");
                Ok(response)
            }
            Err(ureq::Error::Transport(transport)) => {
                warn!(?operation, error = %transport, "registration request failed");
                Err(ApiError::Transport(transport.to_string()))
            }
        }
    }

    fn decode<T: DeserializeOwned>(response: ureq::Response) -> Result<T, ApiError> {
        let status = response.status();
        response.into_json::<T>().map_err(|err| {
            if status >= 400 {
                ApiError::Status { status }
            } else {
                ApiError::Decode(err.to_string())
            }
        })
    }

    fn send_record<B: Serialize>(
        &self,
        operation: Operation,
        body: &B,
    ) -> Result<RegistrationRecord, ApiError> {
        let body = serde_json::to_value(body).map_err(|err| ApiError::Decode(err.to_string()))?;
        let response = self.call(operation, Some(body))?;
        let record = Self::decode::<Envelope<RegistrationRecord>>(response)?.into_result()?;
        ensure_consistent(&record)?;
        Ok(record)
    }

    fn fetch_listing(&self) -> Result<RegistrationListing, ApiError> {
        let response = self.call(Operation::ListRegistrations, None)?;
        let listing = Self::decode::<ListingEnvelope>(response)?.into_listing()?;
        for record in &listing.records {
            ensure_consistent(record)?;
        }
        debug!(
            records = listing.records.len(),
            total = listing.counts.total,
            "registration listing received"
        );
        Ok(listing)
    }

    fn fetch_export(&self) -> Result<ExportPayload, ApiError> {
        let response = self.call(Operation::Export, None)?;
        let status = response.status();
        if !(200..300).contains(&status) {
            return Err(ApiError::Status { status });
        }

        let content_type = response
            .header("Content-Type")
            .and_then(|value| value.parse::<mime::Mime>().ok());
        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        debug!(bytes = bytes.len(), "export downloaded");
        Ok(ExportPayload {
            content_type,
            bytes,
        })
    }
}

fn ensure_consistent(record: &RegistrationRecord) -> Result<(), ApiError> {
    record
        .check_consistency()
        .map_err(|err| ApiError::Contract(err.to_string()))
}

async fn run_blocking<T, F>(task: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| ApiError::Transport(format!("request task aborted: {err}")))?
}

#[async_trait]
impl RegistrationApi for HttpGateway {
    async fn list_registrations(&self) -> Result<RegistrationListing, ApiError> {
        let gateway = self.clone();
        run_blocking(move || gateway.fetch_listing()).await
    }

    async fn create_manual_registration(
        &self,
        draft: &RegistrationDraft,
    ) -> Result<RegistrationRecord, ApiError> {
        let gateway = self.clone();
        let draft = draft.clone();
        run_blocking(move || gateway.send_record(Operation::ManualRegistration, &draft)).await
    }

    async fn export_registrations(&self) -> Result<ExportPayload, ApiError> {
        let gateway = self.clone();
        run_blocking(move || gateway.fetch_export()).await
    }

    async fn create_registration(
        &self,
        draft: &RegistrationDraft,
    ) -> Result<RegistrationRecord, ApiError> {
        let gateway = self.clone();
        let draft = draft.clone();
        run_blocking(move || gateway.send_record(Operation::CreateRegistration, &draft)).await
    }

    async fn validate_ken(
        &self,
        request: &KenLookupRequest,
    ) -> Result<RegistrationRecord, ApiError> {
        let gateway = self.clone();
        let request = request.clone();
        run_blocking(move || gateway.send_record(Operation::ValidateKen, &request)).await
    }

    async fn verify(&self, request: &VerifyRequest) -> Result<RegistrationRecord, ApiError> {
        let gateway = self.clone();
        let request = request.clone();
        run_blocking(move || gateway.send_record(Operation::Verify, &request)).await
    }
}
