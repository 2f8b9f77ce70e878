use std::io::{self, Write};

use bvb_registration::error::AppError;
use bvb_registration::registrations::{
    rows, write_rows_csv, LookupView, RegistrationReceipt, RegistrationRecord, RegistrationRow,
    RegistrationStats, VerificationView,
};

pub(crate) fn print_receipt(receipt: &RegistrationReceipt) {
    println!("Registration successful");
    println!("  Registration number: {}", receipt.registration_number);
    println!("  Name:                {}", receipt.full_name);
    println!("  Email:               {}", receipt.email);
    println!("  Department:          {}", receipt.department);
    println!("  KEN:                 {}", receipt.ken);
}

pub(crate) fn print_lookup(view: &LookupView) {
    println!("Registration found");
    println!("  Registration number: {}", view.registration_number);
    println!("  Name:                {}", view.full_name);
    println!("  Email:               {}", view.email);
    println!("  Department:          {}", view.department);
    println!("  Status:              {}", view.status_label);
    if let Some(number) = &view.verified_number {
        println!("  Verified number:     {}", number);
    }
}

pub(crate) fn print_verification(view: &VerificationView) {
    println!("Verification successful");
    println!("  Verified number:     {}", view.verified_number);
    println!("  Registration number: {}", view.registration_number);
    println!("  Name:                {}", view.full_name);
}

pub(crate) fn print_stats(stats: &RegistrationStats) {
    println!(
        "Total {} | Verified {} | Pending {} | Today {}",
        stats.total, stats.verified, stats.pending, stats.today
    );
}

const COLUMNS: [&str; 7] = [
    "Reg. No.",
    "Name",
    "Email",
    "Department",
    "Status",
    "Verified No.",
    "Registered",
];

fn cells(row: &RegistrationRow) -> [&str; 7] {
    [
        row.registration_number.as_str(),
        row.full_name.as_str(),
        row.email.as_str(),
        row.department.as_str(),
        row.status,
        row.verified_number.as_str(),
        row.registered_at.as_str(),
    ]
}

/// Left-aligned table sized to its widest cell per column.
pub(crate) fn format_table(rows: &[RegistrationRow]) -> String {
    if rows.is_empty() {
        return "No registrations found\n".to_string();
    }

    let mut widths = COLUMNS.map(|title| title.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(cells(row)) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |values: [&str; 7]| -> String {
        let padded: Vec<String> = values
            .iter()
            .zip(widths)
            .map(|(value, width)| format!("{value:<width$}"))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let mut table = line(COLUMNS);
    for row in rows {
        table.push_str(&line(cells(row)));
    }
    table
}

pub(crate) fn print_table(records: &[RegistrationRecord]) {
    print!("{}", format_table(&rows(records)));
}

pub(crate) fn print_csv(records: &[RegistrationRecord]) -> Result<(), AppError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_rows_csv(&rows(records), &mut handle)?;
    handle.flush()?;
    Ok(())
}
