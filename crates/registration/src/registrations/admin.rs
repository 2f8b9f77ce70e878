use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::domain::{RegistrationDraft, RegistrationRecord, REGISTRATION_FIELDS};
use super::filter::{filter, FilterQuery};
use super::summary::{ListingCounts, RegistrationStats};
use super::validation::validate_submission;
use super::views::export_file_name;
use super::FlowError;
use crate::api::{Operation, RegistrationApi};

/// Spreadsheet ready to be written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub file_name: String,
    pub content_type: Option<mime::Mime>,
    pub bytes: Vec<u8>,
}

/// Outcome of a manual registration: the created record, and whether the
/// listing reload that follows it succeeded.
#[derive(Debug)]
pub struct ManualRegistration {
    pub record: RegistrationRecord,
    pub reload: Result<(), FlowError>,
}

/// Admin dashboard state: every loaded registration, the server totals,
/// the active query and the subset it selects.
pub struct AdminPanel<A> {
    api: Arc<A>,
    registrations: Vec<RegistrationRecord>,
    counts: ListingCounts,
    query: FilterQuery,
    visible: Vec<RegistrationRecord>,
}

impl<A> AdminPanel<A>
where
    A: RegistrationApi + 'static,
{
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            registrations: Vec::new(),
            counts: ListingCounts::default(),
            query: FilterQuery::default(),
            visible: Vec::new(),
        }
    }

    pub fn registrations(&self) -> &[RegistrationRecord] {
        &self.registrations
    }

    pub fn visible(&self) -> &[RegistrationRecord] {
        &self.visible
    }

    pub fn query(&self) -> &FilterQuery {
        &self.query
    }

    pub fn counts(&self) -> ListingCounts {
        self.counts
    }

    pub fn stats(&self, today: NaiveDate) -> RegistrationStats {
        RegistrationStats::new(self.counts, &self.registrations, today)
    }

    /// Reload from the backend and re-apply the active query.
    /// On failure the previously loaded state is kept.
    pub async fn refresh(&mut self) -> Result<&[RegistrationRecord], FlowError> {
        let listing = self
            .api
            .list_registrations()
            .await
            .map_err(FlowError::api(Operation::ListRegistrations))?;

        info!(
            loaded = listing.records.len(),
            total = listing.counts.total,
            "registrations refreshed"
        );
        self.registrations = listing.records;
        self.counts = listing.counts;
        self.recompute();
        Ok(&self.visible)
    }

    pub fn apply_filter(&mut self, query: FilterQuery) -> &[RegistrationRecord] {
        self.query = query;
        self.recompute();
        &self.visible
    }

    fn recompute(&mut self) {
        self.visible = filter(&self.registrations, &self.query);
        debug!(
            visible = self.visible.len(),
            loaded = self.registrations.len(),
            "filter recomputed"
        );
    }

    /// Create a registration on behalf of an attendee, then reload the listing.
    /// A failed reload does not undo the creation; it is reported in `reload`.
    pub async fn create_manual(
        &mut self,
        draft: RegistrationDraft,
    ) -> Result<ManualRegistration, FlowError> {
        let draft = draft.normalized();
        validate_submission(&draft, &REGISTRATION_FIELDS)?;

        let record = self
            .api
            .create_manual_registration(&draft)
            .await
            .map_err(FlowError::api(Operation::ManualRegistration))?;

        info!(
            registration_number = %record.registration_number,
            "manual registration created"
        );

        let reload = self.refresh().await.map(|_| ());
        if let Err(err) = &reload {
            warn!(error = %err, "listing reload after manual registration failed");
        }
        Ok(ManualRegistration { record, reload })
    }

    /// Download the spreadsheet export, named for `today`.
    pub async fn export(&self, today: NaiveDate) -> Result<ExportFile, FlowError> {
        let payload = self
            .api
            .export_registrations()
            .await
            .map_err(FlowError::api(Operation::Export))?;

        Ok(ExportFile {
            file_name: export_file_name(today),
            content_type: payload.content_type,
            bytes: payload.bytes,
        })
    }
}
