use std::fmt;
use std::str::FromStr;

use super::domain::RegistrationRecord;

/// Verification state selected in the admin status dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Verified,
    Pending,
}

impl StatusFilter {
    pub const fn as_str(self) -> &'static str {
        match self {
            StatusFilter::Verified => "verified",
            StatusFilter::Pending => "pending",
        }
    }

    fn admits(self, record: &RegistrationRecord) -> bool {
        match self {
            StatusFilter::Verified => record.is_verified,
            StatusFilter::Pending => !record.is_verified,
        }
    }

    /// Dropdown value to filter; the empty string means "any status".
    pub fn from_option_value(value: &str) -> Result<Option<Self>, UnknownStatus> {
        if value.is_empty() {
            Ok(None)
        } else {
            value.parse().map(Some)
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status filter '{0}', expected 'verified' or 'pending'")]
pub struct UnknownStatus(pub String);

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "verified" => Ok(StatusFilter::Verified),
            "pending" => Ok(StatusFilter::Pending),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Current admin search box and dropdown selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    pub search_term: String,
    pub department: String,
    pub status: Option<StatusFilter>,
}

impl FilterQuery {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            ..Self::default()
        }
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    pub fn with_status(mut self, status: Option<StatusFilter>) -> Self {
        self.status = status;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty() && self.department.is_empty() && self.status.is_none()
    }

    pub fn matches(&self, record: &RegistrationRecord) -> bool {
        self.matches_search(record) && self.matches_department(record) && self.matches_status(record)
    }

    fn matches_search(&self, record: &RegistrationRecord) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let term = self.search_term.to_lowercase();
        [
            &record.full_name,
            &record.email,
            &record.registration_number,
            &record.ken,
        ]
        .iter()
        .any(|haystack| haystack.to_lowercase().contains(&term))
    }

    // Substring, so a short code like "CSE" matches the canonical department name.
    fn matches_department(&self, record: &RegistrationRecord) -> bool {
        self.department.is_empty()
            || record
                .department
                .to_lowercase()
                .contains(&self.department.to_lowercase())
    }

    fn matches_status(&self, record: &RegistrationRecord) -> bool {
        self.status.map_or(true, |status| status.admits(record))
    }
}

/// Visible subset of `records` for `query`, in input order.
pub fn filter(records: &[RegistrationRecord], query: &FilterQuery) -> Vec<RegistrationRecord> {
    records
        .iter()
        .filter(|record| query.matches(record))
        .cloned()
        .collect()
}
