use std::path::PathBuf;
use std::time::Instant;

use bvb_registration::error::AppError;
use bvb_registration::registrations::{
    AdminPanel, Debouncer, FilterQuery, RegistrationReceipt, StatusFilter, UnknownStatus,
};
use bvb_registration::{HttpGateway, RegistrationApi};
use chrono::Utc;
use clap::Args;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use crate::infra::{export_day, resolve_department, today, Console, DraftArgs};
use crate::render::{print_csv, print_receipt, print_stats, print_table};

#[derive(Args, Debug, Default)]
pub(crate) struct ListArgs {
    /// Match against name, email, registration number or KEN
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Department name or short code such as CSE
    #[arg(long)]
    pub(crate) department: Option<String>,
    /// verified or pending
    #[arg(long, value_parser = parse_status)]
    pub(crate) status: Option<StatusFilter>,
    /// Print the visible rows as CSV instead of a table
    #[arg(long)]
    pub(crate) csv: bool,
}

impl ListArgs {
    fn query(&self) -> FilterQuery {
        FilterQuery::search(self.search.clone().unwrap_or_default())
            .with_department(self.department.clone().unwrap_or_default())
            .with_status(self.status)
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct ExportArgs {
    /// Destination file; defaults to the dated export name in the current directory
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

fn parse_status(raw: &str) -> Result<StatusFilter, UnknownStatus> {
    raw.parse()
}

fn panel(console: &Console) -> AdminPanel<HttpGateway> {
    AdminPanel::new(console.gateway.clone())
}

pub(crate) async fn run_list(console: &Console, args: ListArgs) -> Result<(), AppError> {
    let mut panel = panel(console);
    panel.refresh().await?;
    panel.apply_filter(args.query());

    if args.csv {
        return print_csv(panel.visible());
    }
    print_stats(&panel.stats(today()));
    print_table(panel.visible());
    Ok(())
}

pub(crate) async fn run_add(console: &Console, args: DraftArgs) -> Result<(), AppError> {
    let draft = args.collect()?;
    let mut panel = panel(console);
    let outcome = panel.create_manual(draft).await?;
    print_receipt(&RegistrationReceipt::from(&outcome.record));
    match outcome.reload {
        Ok(()) => print_stats(&panel.stats(today())),
        Err(err) => eprintln!("{}", err.user_message()),
    }
    Ok(())
}

pub(crate) async fn run_export(console: &Console, args: ExportArgs) -> Result<(), AppError> {
    let file = panel(console).export(export_day(Utc::now())).await?;
    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(&file.file_name));
    tokio::fs::write(&path, &file.bytes).await?;

    match &file.content_type {
        Some(content_type) => println!(
            "Exported {} bytes ({}) to {}",
            file.bytes.len(),
            content_type.essence_str(),
            path.display()
        ),
        None => println!("Exported {} bytes to {}", file.bytes.len(), path.display()),
    }
    Ok(())
}

/// One line typed during `admin browse`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BrowseInput {
    Search(String),
    Department(String),
    Status(Option<StatusFilter>),
    Refresh,
    Quit,
}

fn parse_browse_input(line: &str) -> Result<BrowseInput, UnknownStatus> {
    let Some(command) = line.strip_prefix(':') else {
        return Ok(BrowseInput::Search(line.to_string()));
    };
    let (name, argument) = command
        .split_once(char::is_whitespace)
        .map(|(name, rest)| (name, rest.trim()))
        .unwrap_or((command.trim(), ""));

    match name {
        "q" | "quit" => Ok(BrowseInput::Quit),
        "r" | "refresh" => Ok(BrowseInput::Refresh),
        "dept" | "department" => Ok(BrowseInput::Department(resolve_department(argument))),
        "status" => StatusFilter::from_option_value(argument).map(BrowseInput::Status),
        _ => Ok(BrowseInput::Search(line.to_string())),
    }
}

const BROWSE_HELP: &str =
    "Type to search. :dept <name>, :status <verified|pending>, :refresh, :quit";

fn apply_search<A: RegistrationApi + 'static>(panel: &mut AdminPanel<A>, term: String) {
    debug!(term_length = term.chars().count(), "search settled");
    let mut query = panel.query().clone();
    query.search_term = term;
    panel.apply_filter(query);
    print_table(panel.visible());
}

pub(crate) async fn run_browse(console: &Console) -> Result<(), AppError> {
    let mut panel = panel(console);
    panel.refresh().await?;
    print_stats(&panel.stats(today()));
    print_table(panel.visible());
    let mut typing = Debouncer::new(console.config.admin.search_debounce);
    println!(
        "{BROWSE_HELP} (search applies after a {} ms pause)",
        typing.window().as_millis()
    );
    browse_lines(&mut panel, &mut typing, BufReader::new(tokio::io::stdin())).await
}

/// Drives the browse session from `input` until `:quit` or end of input.
/// A search still waiting out its pause is applied when input ends.
async fn browse_lines<A, R>(
    panel: &mut AdminPanel<A>,
    typing: &mut Debouncer<String>,
    input: R,
) -> Result<(), AppError>
where
    A: RegistrationApi + 'static,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    loop {
        let deadline = typing.deadline().unwrap_or_else(Instant::now);
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    if let Some(term) = typing.flush() {
                        apply_search(panel, term);
                    }
                    break;
                };
                match parse_browse_input(&line) {
                    Ok(BrowseInput::Quit) => break,
                    Ok(BrowseInput::Search(term)) => typing.push(term, Instant::now()),
                    Ok(BrowseInput::Department(department)) => {
                        let query = panel.query().clone().with_department(department);
                        panel.apply_filter(query);
                        print_table(panel.visible());
                    }
                    Ok(BrowseInput::Status(status)) => {
                        let query = panel.query().clone().with_status(status);
                        panel.apply_filter(query);
                        print_table(panel.visible());
                    }
                    Ok(BrowseInput::Refresh) => match panel.refresh().await.map(|_| ()) {
                        Ok(()) => {
                            print_stats(&panel.stats(today()));
                            print_table(panel.visible());
                        }
                        Err(err) => {
                            warn!(error = %err, "browse refresh failed");
                            eprintln!("{}", err.user_message());
                        }
                    },
                    Err(err) => eprintln!("{err}"),
                }
            }
            _ = tokio::time::sleep_until(deadline.into()), if typing.is_pending() => {
                if let Some(term) = typing.poll(Instant::now()) {
                    apply_search(panel, term);
                }
            }
        }
    }
    Ok(())
}
