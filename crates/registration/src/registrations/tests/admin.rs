use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

use super::common::*;
use crate::api::{ApiError, ExportPayload, Operation};
use crate::registrations::admin::AdminPanel;
use crate::registrations::domain::{Department, FormField};
use crate::registrations::filter::{FilterQuery, StatusFilter};
use crate::registrations::validation::ValidationError;
use crate::registrations::FlowError;

fn local_noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Local
        .with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("unambiguous local time")
        .with_timezone(&Utc)
}

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[tokio::test]
async fn refresh_loads_roster_and_counts() {
    let api = Arc::new(FakeApi::with_listing(Ok(listing(roster()))));
    let mut panel = AdminPanel::new(api.clone());

    let visible = panel.refresh().await.expect("listing loads").len();

    assert_eq!(visible, 4);
    assert_eq!(panel.registrations().len(), 4);
    assert_eq!(panel.counts().total, 4);
    assert_eq!(panel.counts().verified, 1);
    assert_eq!(panel.counts().unverified, 3);
    assert_eq!(api.calls(), vec![Operation::ListRegistrations]);
}

#[tokio::test]
async fn failed_refresh_keeps_previous_state() {
    let api = Arc::new(FakeApi::with_listing(Ok(listing(roster()))));
    let mut panel = AdminPanel::new(api.clone());
    panel.refresh().await.expect("initial load");

    api.set_listing(Err(ApiError::Transport("connection reset".to_string())));
    let err = panel.refresh().await.expect_err("refresh fails");

    assert_eq!(err.user_message(), "Network error. Please refresh the page.");
    assert_eq!(panel.registrations().len(), 4);
    assert_eq!(panel.counts().total, 4);
}

#[tokio::test]
async fn apply_filter_narrows_visible_rows_only() {
    let api = Arc::new(FakeApi::with_listing(Ok(listing(roster()))));
    let mut panel = AdminPanel::new(api);
    panel.refresh().await.expect("listing loads");

    let query = FilterQuery::default()
        .with_department(Department::ComputerScience.canonical_name())
        .with_status(Some(StatusFilter::Pending));
    let numbers: Vec<_> = panel
        .apply_filter(query.clone())
        .iter()
        .map(|record| record.registration_number.clone())
        .collect();

    assert_eq!(numbers, vec!["BVB004".to_string()]);
    assert_eq!(panel.query(), &query);
    assert_eq!(panel.registrations().len(), 4);
}

#[tokio::test]
async fn refresh_reapplies_active_query() {
    let api = Arc::new(FakeApi::with_listing(Ok(listing(roster()))));
    let mut panel = AdminPanel::new(api.clone());
    panel.refresh().await.expect("listing loads");
    panel.apply_filter(FilterQuery::default().with_status(Some(StatusFilter::Verified)));
    assert_eq!(panel.visible().len(), 1);

    let mut grown = roster();
    grown.push(record("BVB005", "Esha", Department::Civil.canonical_name(), true));
    api.set_listing(Ok(listing(grown)));
    panel.refresh().await.expect("reload");

    let numbers: Vec<_> = panel
        .visible()
        .iter()
        .map(|record| record.registration_number.as_str())
        .collect();
    assert_eq!(numbers, vec!["BVB001", "BVB005"]);
}

#[tokio::test]
async fn manual_registration_validates_before_calling_backend() {
    let api = Arc::new(FakeApi::default());
    let mut panel = AdminPanel::new(api.clone());
    let mut draft = valid_draft();
    draft.contact_number = "12345".to_string();

    let err = panel.create_manual(draft).await.expect_err("invalid phone");

    assert_eq!(err, FlowError::Invalid(ValidationError::InvalidPhone));
    assert_eq!(
        err.user_message(),
        "Please enter a valid phone number"
    );
    assert_eq!(
        ValidationError::InvalidPhone.field(),
        Some(FormField::ContactNumber)
    );
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn manual_registration_rejection_leaves_listing_untouched() {
    let api = Arc::new(FakeApi::with_listing(Ok(listing(roster()))));
    let mut panel = AdminPanel::new(api.clone());
    panel.refresh().await.expect("listing loads");
    api.reply(
        Operation::ManualRegistration,
        Err(ApiError::Rejected {
            message: Some("duplicate KEN".to_string()),
        }),
    );

    let err = panel
        .create_manual(valid_draft())
        .await
        .expect_err("server rejects");

    assert_eq!(err.user_message(), "duplicate KEN");
    assert_eq!(panel.registrations().len(), 4);
    assert_eq!(
        api.calls(),
        vec![Operation::ListRegistrations, Operation::ManualRegistration]
    );
}

#[tokio::test]
async fn manual_registration_success_reloads_listing() {
    let api = Arc::new(FakeApi::with_listing(Ok(listing(roster()))));
    let mut panel = AdminPanel::new(api.clone());
    panel.refresh().await.expect("listing loads");

    let created = record("BVB005", "ALICE SMITH", Department::ComputerScience.canonical_name(), false);
    api.reply(Operation::ManualRegistration, Ok(created.clone()));
    let mut grown = roster();
    grown.push(created.clone());
    api.set_listing(Ok(listing(grown)));

    let outcome = panel
        .create_manual(valid_draft())
        .await
        .expect("manual registration succeeds");

    assert_eq!(outcome.record, created);
    assert_eq!(outcome.reload, Ok(()));
    assert_eq!(panel.registrations().len(), 5);
    assert_eq!(panel.counts().total, 5);
    assert_eq!(api.drafts()[0].full_name, "ALICE SMITH");
}

#[tokio::test]
async fn manual_registration_reports_failed_reload() {
    let api = Arc::new(FakeApi::with_listing(Ok(listing(roster()))));
    let mut panel = AdminPanel::new(api.clone());
    panel.refresh().await.expect("listing loads");

    let created = record("BVB005", "ALICE SMITH", Department::ComputerScience.canonical_name(), false);
    api.reply(Operation::ManualRegistration, Ok(created.clone()));
    api.set_listing(Err(ApiError::Status { status: 502 }));

    let outcome = panel
        .create_manual(valid_draft())
        .await
        .expect("creation still reported");

    assert_eq!(outcome.record, created);
    let reload = outcome.reload.expect_err("reload failure is returned");
    assert_eq!(reload.user_message(), "Network error. Please refresh the page.");
    assert_eq!(panel.registrations().len(), 4);
}

#[tokio::test]
async fn manual_registration_on_fresh_panel_reports_unreachable_listing() {
    let api = Arc::new(FakeApi::default());
    api.reply(
        Operation::ManualRegistration,
        Ok(record("BVB005", "ALICE SMITH", Department::ComputerScience.canonical_name(), false)),
    );
    api.set_listing(Err(ApiError::Transport("down".to_string())));
    let mut panel = AdminPanel::new(api);

    let outcome = panel
        .create_manual(valid_draft())
        .await
        .expect("creation still reported");

    assert!(matches!(
        outcome.reload,
        Err(FlowError::Api {
            operation: Operation::ListRegistrations,
            source: ApiError::Transport(_),
        })
    ));
    assert!(panel.registrations().is_empty());
    assert_eq!(panel.counts().total, 0);
}

#[tokio::test]
async fn export_names_file_after_today() {
    let api = Arc::new(FakeApi::default());
    api.set_export(Ok(ExportPayload {
        content_type: Some(
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
                .parse()
                .expect("valid mime"),
        ),
        bytes: b"PK\x03\x04".to_vec(),
    }));
    let panel = AdminPanel::new(api);

    let file = panel.export(day(2025, 9, 24)).await.expect("export succeeds");

    assert_eq!(file.file_name, "bvb-registrations-2025-09-24.xlsx");
    assert_eq!(file.bytes, b"PK\x03\x04".to_vec());
    assert_eq!(
        file.content_type.map(|mime| mime.subtype().as_str().to_string()),
        Some("vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string())
    );
}

#[tokio::test]
async fn export_http_failure_reports_export_failure() {
    let api = Arc::new(FakeApi::default());
    api.set_export(Err(ApiError::Status { status: 500 }));
    let panel = AdminPanel::new(api);

    let err = panel.export(day(2025, 9, 24)).await.expect_err("export fails");

    assert_eq!(err.user_message(), "Failed to export data");
}

#[tokio::test]
async fn stats_combine_server_totals_with_local_today_count() {
    let records = vec![
        registered_at(
            record("BVB001", "Alice", Department::ComputerScience.canonical_name(), true),
            local_noon(2025, 9, 24),
        ),
        registered_at(
            record("BVB002", "Bob", Department::Mechanical.canonical_name(), false),
            local_noon(2025, 9, 23),
        ),
        record("BVB003", "Chitra", Department::Civil.canonical_name(), false),
    ];
    let mut served = listing(records);
    served.counts.total = 40;
    let api = Arc::new(FakeApi::with_listing(Ok(served)));
    let mut panel = AdminPanel::new(api);
    panel.refresh().await.expect("listing loads");

    let stats = panel.stats(day(2025, 9, 24));

    assert_eq!(stats.total, 40);
    assert_eq!(stats.verified, 1);
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.today, 1);
}
