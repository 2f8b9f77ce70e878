use std::io;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;

use super::domain::{Department, RegistrationRecord, VerificationStatus};

pub const EXPORT_FILE_PREFIX: &str = "bvb-registrations";

/// Shown after a successful registration or manual registration.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationReceipt {
    pub registration_number: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub ken: String,
}

impl From<&RegistrationRecord> for RegistrationReceipt {
    fn from(record: &RegistrationRecord) -> Self {
        Self {
            registration_number: record.registration_number.clone(),
            full_name: record.full_name.clone(),
            email: record.email.clone(),
            department: record.department.clone(),
            ken: record.ken.clone(),
        }
    }
}

/// Shown after a KEN lookup.
#[derive(Debug, Clone, Serialize)]
pub struct LookupView {
    pub registration_number: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub status: VerificationStatus,
    pub status_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_number: Option<String>,
}

impl From<&RegistrationRecord> for LookupView {
    fn from(record: &RegistrationRecord) -> Self {
        let status = record.status();
        let status_label = match status {
            VerificationStatus::Verified => "Verified",
            VerificationStatus::Pending => "Pending Verification",
        };
        let verified_number = match status {
            VerificationStatus::Verified => record.verified_number().map(str::to_string),
            VerificationStatus::Pending => None,
        };

        Self {
            registration_number: record.registration_number.clone(),
            full_name: record.full_name.clone(),
            email: record.email.clone(),
            department: record.department.clone(),
            status,
            status_label,
            verified_number,
        }
    }
}

/// Shown after a successful verification; the verified number is the entry pass.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationView {
    pub verified_number: String,
    pub registration_number: String,
    pub full_name: String,
}

impl VerificationView {
    pub fn from_record(record: &RegistrationRecord) -> Option<Self> {
        Some(Self {
            verified_number: record.verified_number()?.to_string(),
            registration_number: record.registration_number.clone(),
            full_name: record.full_name.clone(),
        })
    }
}

/// One line of the admin registrations table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRow {
    pub registration_number: String,
    pub full_name: String,
    pub email: String,
    pub contact_number: String,
    pub department: String,
    pub ken: String,
    pub status: &'static str,
    pub verified_number: String,
    pub registered_at: String,
}

impl From<&RegistrationRecord> for RegistrationRow {
    fn from(record: &RegistrationRecord) -> Self {
        Self {
            registration_number: record.registration_number.clone(),
            full_name: record.full_name.clone(),
            email: record.email.clone(),
            contact_number: record.contact_number.clone(),
            department: Department::display_label(&record.department).to_string(),
            ken: record.ken.clone(),
            status: record.status().label(),
            verified_number: record.verified_number().unwrap_or("-").to_string(),
            registered_at: record
                .registration_date
                .map(format_registration_date)
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

pub fn rows(records: &[RegistrationRecord]) -> Vec<RegistrationRow> {
    records.iter().map(RegistrationRow::from).collect()
}

/// Day, abbreviated month, year and 12-hour time, in local time.
pub fn format_registration_date(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local)
        .format("%d %b %Y, %I:%M %p")
        .to_string()
}

pub fn export_file_name(day: NaiveDate) -> String {
    format!("{EXPORT_FILE_PREFIX}-{}.xlsx", day.format("%Y-%m-%d"))
}

/// Write table rows as CSV with a header line.
pub fn write_rows_csv<W: io::Write>(rows: &[RegistrationRow], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
