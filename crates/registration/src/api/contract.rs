use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::registrations::domain::RegistrationRecord;
use crate::registrations::summary::ListingCounts;

/// Remote operations exposed by the registration backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListRegistrations,
    ManualRegistration,
    Export,
    CreateRegistration,
    ValidateKen,
    Verify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Operation {
    pub const fn method(self) -> Method {
        match self {
            Operation::ListRegistrations | Operation::Export => Method::Get,
            Operation::ManualRegistration
            | Operation::CreateRegistration
            | Operation::ValidateKen
            | Operation::Verify => Method::Post,
        }
    }

    /// Path relative to the configured API base.
    pub const fn path(self) -> &'static str {
        match self {
            Operation::ListRegistrations => "/admin/registrations",
            Operation::ManualRegistration => "/admin/manual-registration",
            Operation::Export => "/admin/export",
            Operation::CreateRegistration => "/registration/create",
            Operation::ValidateKen => "/registration/validate",
            Operation::Verify => "/registration/verify",
        }
    }

    /// Used when the server rejects a request without saying why.
    pub const fn rejection_fallback(self) -> &'static str {
        match self {
            Operation::ListRegistrations => "Failed to load registrations",
            Operation::ManualRegistration => "Manual registration failed. Please try again.",
            Operation::Export => "Failed to export data",
            Operation::CreateRegistration => "Registration failed. Please try again.",
            Operation::ValidateKen => "No registration found with this KEN.",
            Operation::Verify => "Verification failed. Please check your details.",
        }
    }

    /// Used when the request never produced a readable answer.
    pub const fn network_failure(self) -> &'static str {
        match self {
            Operation::ListRegistrations => "Network error. Please refresh the page.",
            Operation::Export => "Network error during export",
            Operation::ManualRegistration
            | Operation::CreateRegistration
            | Operation::ValidateKen
            | Operation::Verify => "Network error. Please check your connection and try again.",
        }
    }
}

/// `{ success, data?, message? }` wrapper shared by every JSON response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected {
                message: self.message.filter(|message| !message.trim().is_empty()),
            });
        }
        self.data
            .ok_or_else(|| ApiError::Contract("successful response carried no data".to_string()))
    }
}

/// Admin listing: counts sit next to `data` at the top level of the envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingEnvelope {
    pub success: bool,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub verified_count: u64,
    #[serde(default)]
    pub unverified_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<RegistrationRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ListingEnvelope {
    pub fn into_listing(self) -> Result<RegistrationListing, ApiError> {
        let counts = ListingCounts {
            total: self.total_count,
            verified: self.verified_count,
            unverified: self.unverified_count,
        };
        let records = Envelope {
            success: self.success,
            data: self.data,
            message: self.message,
        }
        .into_result()?;

        Ok(RegistrationListing { counts, records })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationListing {
    pub counts: ListingCounts,
    pub records: Vec<RegistrationRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KenLookupRequest {
    pub ken: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub registration_number: String,
    pub contact_number: String,
}

/// Raw spreadsheet bytes returned by the export endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPayload {
    pub content_type: Option<mime::Mime>,
    pub bytes: Vec<u8>,
}
