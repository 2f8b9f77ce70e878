use chrono::{Local, NaiveDate};
use serde::Serialize;

use super::domain::RegistrationRecord;

/// Totals reported by the backend alongside the registration listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ListingCounts {
    pub total: u64,
    pub verified: u64,
    pub unverified: u64,
}

/// Dashboard tiles: server totals plus today's count computed locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegistrationStats {
    pub total: u64,
    pub verified: u64,
    pub pending: u64,
    pub today: usize,
}

impl RegistrationStats {
    pub fn new(counts: ListingCounts, records: &[RegistrationRecord], today: NaiveDate) -> Self {
        Self {
            total: counts.total,
            verified: counts.verified,
            pending: counts.unverified,
            today: registered_on(records, today),
        }
    }
}

/// Records whose registration date falls on `day` in local time.
pub fn registered_on(records: &[RegistrationRecord], day: NaiveDate) -> usize {
    records
        .iter()
        .filter_map(|record| record.registration_date)
        .filter(|date| date.with_timezone(&Local).date_naive() == day)
        .count()
}
