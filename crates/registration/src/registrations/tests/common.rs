use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::api::{
    ApiError, ExportPayload, KenLookupRequest, Operation, RegistrationApi, RegistrationListing,
    VerifyRequest,
};
use crate::registrations::domain::{Department, RegistrationDraft, RegistrationRecord};
use crate::registrations::summary::ListingCounts;

pub(super) fn record(number: &str, name: &str, department: &str, verified: bool) -> RegistrationRecord {
    RegistrationRecord {
        registration_number: number.to_string(),
        full_name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        contact_number: "9876543210".to_string(),
        department: department.to_string(),
        ken: format!("K{}", &number[number.len().saturating_sub(3)..]),
        food_preference: "Veg".to_string(),
        registration_type: "Student".to_string(),
        accommodation: "No".to_string(),
        is_verified: verified,
        verified_number: verified.then(|| format!("V-{number}")),
        registration_date: None,
    }
}

pub(super) fn registered_at(mut record: RegistrationRecord, at: DateTime<Utc>) -> RegistrationRecord {
    record.registration_date = Some(at);
    record
}

pub(super) fn roster() -> Vec<RegistrationRecord> {
    vec![
        record("BVB001", "Alice", Department::ComputerScience.canonical_name(), true),
        record("BVB002", "Bob", Department::Mechanical.canonical_name(), false),
        record("BVB003", "Chitra", Department::ElectronicsCommunication.canonical_name(), false),
        record("BVB004", "Dev", Department::ComputerScience.canonical_name(), false),
    ]
}

pub(super) fn listing(records: Vec<RegistrationRecord>) -> RegistrationListing {
    let verified = records.iter().filter(|record| record.is_verified).count() as u64;
    RegistrationListing {
        counts: ListingCounts {
            total: records.len() as u64,
            verified,
            unverified: records.len() as u64 - verified,
        },
        records,
    }
}

pub(super) fn valid_draft() -> RegistrationDraft {
    RegistrationDraft {
        full_name: "Alice Smith".to_string(),
        email: "alice@example.com".to_string(),
        contact_number: "+91 98765 43210".to_string(),
        department: Department::ComputerScience.canonical_name().to_string(),
        ken: "k01ab".to_string(),
        food_preference: "Veg".to_string(),
        registration_type: "Student".to_string(),
        accommodation: "Required".to_string(),
    }
}

/// Scripted stand-in for the backend. Unscripted calls fail as transport errors.
#[derive(Default)]
pub(super) struct FakeApi {
    listing: Mutex<Option<Result<RegistrationListing, ApiError>>>,
    records: Mutex<HashMap<Operation, Result<RegistrationRecord, ApiError>>>,
    export: Mutex<Option<Result<ExportPayload, ApiError>>>,
    calls: Mutex<Vec<Operation>>,
    drafts: Mutex<Vec<RegistrationDraft>>,
    lookups: Mutex<Vec<String>>,
}

impl FakeApi {
    pub(super) fn with_listing(listing: Result<RegistrationListing, ApiError>) -> Self {
        let api = Self::default();
        api.set_listing(listing);
        api
    }

    pub(super) fn set_listing(&self, listing: Result<RegistrationListing, ApiError>) {
        *self.listing.lock().expect("fake mutex poisoned") = Some(listing);
    }

    pub(super) fn reply(&self, operation: Operation, reply: Result<RegistrationRecord, ApiError>) {
        self.records
            .lock()
            .expect("fake mutex poisoned")
            .insert(operation, reply);
    }

    pub(super) fn set_export(&self, export: Result<ExportPayload, ApiError>) {
        *self.export.lock().expect("fake mutex poisoned") = Some(export);
    }

    pub(super) fn calls(&self) -> Vec<Operation> {
        self.calls.lock().expect("fake mutex poisoned").clone()
    }

    pub(super) fn drafts(&self) -> Vec<RegistrationDraft> {
        self.drafts.lock().expect("fake mutex poisoned").clone()
    }

    pub(super) fn lookups(&self) -> Vec<String> {
        self.lookups.lock().expect("fake mutex poisoned").clone()
    }

    fn record_call(&self, operation: Operation) {
        self.calls.lock().expect("fake mutex poisoned").push(operation);
    }

    fn record_reply(&self, operation: Operation) -> Result<RegistrationRecord, ApiError> {
        self.record_call(operation);
        self.records
            .lock()
            .expect("fake mutex poisoned")
            .get(&operation)
            .cloned()
            .unwrap_or_else(|| Err(unscripted()))
    }
}

fn unscripted() -> ApiError {
    ApiError::Transport("no scripted reply".to_string())
}

#[async_trait]
impl RegistrationApi for FakeApi {
    async fn list_registrations(&self) -> Result<RegistrationListing, ApiError> {
        self.record_call(Operation::ListRegistrations);
        self.listing
            .lock()
            .expect("fake mutex poisoned")
            .clone()
            .unwrap_or_else(|| Err(unscripted()))
    }

    async fn create_manual_registration(
        &self,
        draft: &RegistrationDraft,
    ) -> Result<RegistrationRecord, ApiError> {
        self.drafts.lock().expect("fake mutex poisoned").push(draft.clone());
        self.record_reply(Operation::ManualRegistration)
    }

    async fn export_registrations(&self) -> Result<ExportPayload, ApiError> {
        self.record_call(Operation::Export);
        self.export
            .lock()
            .expect("fake mutex poisoned")
            .clone()
            .unwrap_or_else(|| Err(unscripted()))
    }

    async fn create_registration(
        &self,
        draft: &RegistrationDraft,
    ) -> Result<RegistrationRecord, ApiError> {
        self.drafts.lock().expect("fake mutex poisoned").push(draft.clone());
        self.record_reply(Operation::CreateRegistration)
    }

    async fn validate_ken(
        &self,
        request: &KenLookupRequest,
    ) -> Result<RegistrationRecord, ApiError> {
        self.lookups
            .lock()
            .expect("fake mutex poisoned")
            .push(request.ken.clone());
        self.record_reply(Operation::ValidateKen)
    }

    async fn verify(&self, _request: &VerifyRequest) -> Result<RegistrationRecord, ApiError> {
        self.record_reply(Operation::Verify)
    }
}
