use std::sync::Arc;

use bvb_registration::config::{ApiConfig, AppConfig};
use bvb_registration::error::AppError;
use bvb_registration::registrations::{
    validate_field, Department, FormField, RegistrationDraft, REGISTRATION_FIELDS,
};
use bvb_registration::telemetry;
use bvb_registration::HttpGateway;
use chrono::{DateTime, Local, NaiveDate, Utc};
use clap::Args;
use dialoguer::{Input, Select};
use tracing::{debug, info};

/// Loaded configuration plus the gateway every command talks through.
pub(crate) struct Console {
    pub(crate) config: AppConfig,
    pub(crate) gateway: Arc<HttpGateway>,
}

pub(crate) fn bootstrap(api_base: Option<String>) -> Result<Console, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(base) = api_base {
        config.api.base_url = ApiConfig::normalize_base_url(&base)?;
    }

    telemetry::init(&config.telemetry)?;
    info!(
        ?config.environment,
        api_base = %config.api.base_url,
        "registration console ready"
    );

    let gateway = Arc::new(HttpGateway::new(&config.api));
    debug!(base_url = gateway.base_url(), "registration gateway built");
    Ok(Console { config, gateway })
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Export files are named by the UTC calendar day, whatever the local clock says.
pub(crate) fn export_day(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive()
}

/// Registration fields accepted as flags by `register` and `admin add`.
#[derive(Args, Debug, Default)]
pub(crate) struct DraftArgs {
    #[arg(long)]
    pub(crate) full_name: Option<String>,
    #[arg(long)]
    pub(crate) email: Option<String>,
    #[arg(long)]
    pub(crate) contact_number: Option<String>,
    /// Canonical department name or short code such as CSE
    #[arg(long)]
    pub(crate) department: Option<String>,
    #[arg(long)]
    pub(crate) ken: Option<String>,
    #[arg(long)]
    pub(crate) food_preference: Option<String>,
    #[arg(long)]
    pub(crate) registration_type: Option<String>,
    #[arg(long)]
    pub(crate) accommodation: Option<String>,
    /// Submit as given instead of prompting for missing fields
    #[arg(long)]
    pub(crate) no_prompt: bool,
}

impl DraftArgs {
    pub(crate) fn into_draft(self) -> RegistrationDraft {
        RegistrationDraft {
            full_name: self.full_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            contact_number: self.contact_number.unwrap_or_default(),
            department: self
                .department
                .map(|value| resolve_department(&value))
                .unwrap_or_default(),
            ken: self.ken.unwrap_or_default(),
            food_preference: self.food_preference.unwrap_or_default(),
            registration_type: self.registration_type.unwrap_or_default(),
            accommodation: self.accommodation.unwrap_or_default(),
        }
    }

    /// Draft from flags, with blanks filled in interactively unless `--no-prompt`.
    pub(crate) fn collect(self) -> Result<RegistrationDraft, AppError> {
        let prompt = !self.no_prompt;
        let draft = self.into_draft();
        if prompt {
            complete_draft(draft)
        } else {
            Ok(draft)
        }
    }
}

/// Short codes map to the catalogue name; anything else is sent untouched.
pub(crate) fn resolve_department(value: &str) -> String {
    Department::ALL
        .into_iter()
        .find(|department| department.short_label().eq_ignore_ascii_case(value.trim()))
        .map(|department| department.canonical_name().to_string())
        .unwrap_or_else(|| value.to_string())
}

fn complete_draft(mut draft: RegistrationDraft) -> Result<RegistrationDraft, AppError> {
    for field in REGISTRATION_FIELDS {
        if !draft.value(field).trim().is_empty() {
            continue;
        }
        debug!(field = field.key(), "prompting for missing field");
        let value = match field {
            FormField::Department => prompt_department()?,
            other => prompt_field(other)?,
        };
        draft.set(field, value);
    }
    Ok(draft)
}

fn prompt_field(field: FormField) -> Result<String, AppError> {
    Input::<String>::new()
        .with_prompt(field.label())
        .validate_with(|value: &String| validate_field(field, value, true).into_result())
        .interact_text()
        .map(|value| value.trim().to_string())
        .map_err(prompt_error)
}

fn prompt_department() -> Result<String, AppError> {
    let names: Vec<&str> = Department::ALL
        .iter()
        .map(|department| department.canonical_name())
        .collect();
    let choice = Select::new()
        .with_prompt(FormField::Department.label())
        .items(&names)
        .default(0)
        .interact()
        .map_err(prompt_error)?;
    Ok(names[choice].to_string())
}

/// Free-form prompt that accepts an empty answer, leaving the check to the desk.
pub(crate) fn prompt_optional(label: &str) -> Result<String, AppError> {
    Input::<String>::new()
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()
        .map(|value| value.trim().to_string())
        .map_err(prompt_error)
}

fn prompt_error(err: dialoguer::Error) -> AppError {
    match err {
        dialoguer::Error::IO(err) => AppError::Io(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io;

    #[test]
    fn terminal_failures_surface_as_io_errors() {
        let err = prompt_error(dialoguer::Error::IO(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stdin closed",
        )));
        match err {
            AppError::Io(inner) => assert_eq!(inner.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn export_day_follows_utc_calendar() {
        let late_evening = Utc
            .with_ymd_and_hms(2025, 9, 24, 23, 30, 0)
            .single()
            .expect("valid instant");
        assert_eq!(
            export_day(late_evening),
            NaiveDate::from_ymd_opt(2025, 9, 24).expect("valid date")
        );
    }

    #[test]
    fn short_department_codes_resolve_to_catalogue_names() {
        assert_eq!(
            resolve_department("cse"),
            "Computer Science Engineering (CSE)"
        );
        assert_eq!(resolve_department(" EEE "), "Electrical & Electronics Engineering (EEE)");
        assert_eq!(resolve_department("Architecture"), "Architecture");
    }

    #[test]
    fn draft_args_leave_missing_fields_blank() {
        let draft = DraftArgs {
            email: Some("alice@example.com".to_string()),
            department: Some("IT".to_string()),
            ..DraftArgs::default()
        }
        .into_draft();

        assert_eq!(draft.email, "alice@example.com");
        assert_eq!(draft.department, "Information Technology");
        assert!(draft.full_name.is_empty());
        assert!(draft.accommodation.is_empty());
    }
}
