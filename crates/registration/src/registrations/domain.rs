use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One attendee submission as returned by the registration backend.
///
/// Server-assigned fields (`registration_number`, `is_verified`,
/// `verified_number`, `registration_date`) are never synthesized client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub registration_number: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub contact_number: String,
    pub department: String,
    pub ken: String,
    #[serde(default)]
    pub food_preference: String,
    #[serde(default)]
    pub registration_type: String,
    #[serde(default)]
    pub accommodation: String,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<DateTime<Utc>>,
}

impl RegistrationRecord {
    pub fn status(&self) -> VerificationStatus {
        if self.is_verified {
            VerificationStatus::Verified
        } else {
            VerificationStatus::Pending
        }
    }

    /// Verified number, ignoring blank strings some backends send for pending records.
    pub fn verified_number(&self) -> Option<&str> {
        self.verified_number
            .as_deref()
            .filter(|number| !number.trim().is_empty())
    }

    /// A verified number must be present exactly when the record is verified.
    pub fn check_consistency(&self) -> Result<(), RecordInconsistency> {
        match (self.is_verified, self.verified_number()) {
            (true, None) => Err(RecordInconsistency::VerifiedWithoutNumber {
                registration_number: self.registration_number.clone(),
            }),
            (false, Some(_)) => Err(RecordInconsistency::NumberWithoutVerification {
                registration_number: self.registration_number.clone(),
            }),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordInconsistency {
    #[error("registration {registration_number} is verified but has no verified number")]
    VerifiedWithoutNumber { registration_number: String },
    #[error("registration {registration_number} carries a verified number but is not verified")]
    NumberWithoutVerification { registration_number: String },
}

/// User-supplied registration fields, sent as the create and manual-registration body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDraft {
    pub full_name: String,
    pub email: String,
    pub contact_number: String,
    pub department: String,
    pub ken: String,
    pub food_preference: String,
    pub registration_type: String,
    pub accommodation: String,
}

impl RegistrationDraft {
    /// Name and KEN are stored uppercase.
    pub fn normalized(mut self) -> Self {
        self.full_name = self.full_name.to_uppercase();
        self.ken = self.ken.to_uppercase();
        self
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::FullName => &self.full_name,
            FormField::Email => &self.email,
            FormField::ContactNumber => &self.contact_number,
            FormField::Department => &self.department,
            FormField::Ken => &self.ken,
            FormField::FoodPreference => &self.food_preference,
            FormField::RegistrationType => &self.registration_type,
            FormField::Accommodation => &self.accommodation,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::FullName => &mut self.full_name,
            FormField::Email => &mut self.email,
            FormField::ContactNumber => &mut self.contact_number,
            FormField::Department => &mut self.department,
            FormField::Ken => &mut self.ken,
            FormField::FoodPreference => &mut self.food_preference,
            FormField::RegistrationType => &mut self.registration_type,
            FormField::Accommodation => &mut self.accommodation,
        };
        *slot = value;
    }
}

/// Fields collected by the registration and manual-registration forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FullName,
    Email,
    ContactNumber,
    Department,
    Ken,
    FoodPreference,
    RegistrationType,
    Accommodation,
}

/// Every field both registration forms require, in form order.
pub const REGISTRATION_FIELDS: [FormField; 8] = [
    FormField::FullName,
    FormField::Email,
    FormField::ContactNumber,
    FormField::Department,
    FormField::Ken,
    FormField::FoodPreference,
    FormField::RegistrationType,
    FormField::Accommodation,
];

impl FormField {
    /// Wire key used in request bodies.
    pub const fn key(self) -> &'static str {
        match self {
            FormField::FullName => "fullName",
            FormField::Email => "email",
            FormField::ContactNumber => "contactNumber",
            FormField::Department => "department",
            FormField::Ken => "ken",
            FormField::FoodPreference => "foodPreference",
            FormField::RegistrationType => "registrationType",
            FormField::Accommodation => "accommodation",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FormField::FullName => "Full name",
            FormField::Email => "Email",
            FormField::ContactNumber => "Contact number",
            FormField::Department => "Department",
            FormField::Ken => "KEN",
            FormField::FoodPreference => "Food preference",
            FormField::RegistrationType => "Registration type",
            FormField::Accommodation => "Accommodation",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        REGISTRATION_FIELDS
            .into_iter()
            .find(|field| field.key() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Verified,
    Pending,
}

impl VerificationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            VerificationStatus::Verified => "Verified",
            VerificationStatus::Pending => "Pending",
        }
    }
}

/// Departments offered by the registration forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Department {
    ComputerScience,
    ElectronicsCommunication,
    Mechanical,
    Civil,
    ElectricalElectronics,
    InformationTechnology,
    Chemical,
    Biotechnology,
}

impl Department {
    pub const ALL: [Department; 8] = [
        Department::ComputerScience,
        Department::ElectronicsCommunication,
        Department::Mechanical,
        Department::Civil,
        Department::ElectricalElectronics,
        Department::InformationTechnology,
        Department::Chemical,
        Department::Biotechnology,
    ];

    pub const fn canonical_name(self) -> &'static str {
        match self {
            Department::ComputerScience => "Computer Science Engineering (CSE)",
            Department::ElectronicsCommunication => "Electronics & Communication Engineering (ECE)",
            Department::Mechanical => "Mechanical Engineering",
            Department::Civil => "Civil Engineering",
            Department::ElectricalElectronics => "Electrical & Electronics Engineering (EEE)",
            Department::InformationTechnology => "Information Technology",
            Department::Chemical => "Chemical Engineering",
            Department::Biotechnology => "Biotechnology",
        }
    }

    pub const fn short_label(self) -> &'static str {
        match self {
            Department::ComputerScience => "CSE",
            Department::ElectronicsCommunication => "ECE",
            Department::Mechanical => "Mechanical",
            Department::Civil => "Civil",
            Department::ElectricalElectronics => "EEE",
            Department::InformationTechnology => "IT",
            Department::Chemical => "Chemical",
            Department::Biotechnology => "Biotech",
        }
    }

    pub fn from_canonical(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|department| department.canonical_name() == name)
    }

    /// Short label for a canonical department name; unknown names display as-is.
    pub fn display_label(name: &str) -> &str {
        match Self::from_canonical(name) {
            Some(department) => department.short_label(),
            None => name,
        }
    }
}
