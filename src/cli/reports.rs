use clap::{Subcommand, Args};
use veevent_api::client::ApiClient;
use veevent_api::client::reports::{QueryReports, RetrieveReport};
use veevent_api::client::links::DeleteResource;
use veevent_api::reports::Report;
use veevent_lib::ids;

use crate::error::{self, Context};
use crate::state::AppState;
use crate::util;

#[derive(Debug, Args)]
pub struct ReportsArgs {
    #[command(subcommand)]
    command: ReportsCmds
}

#[derive(Debug, Subcommand)]
enum ReportsCmds {
    /// lists reports
    List(util::PageArgs),

    /// shows a single report
    Show(IdArgs),

    /// deletes a report once it has been handled
    Delete(DeleteArgs),
}

impl ReportsCmds {
    fn path(&self) -> String {
        match self {
            ReportsCmds::Show(given) => format!("/reports/{}", given.id),
            ReportsCmds::Delete(given) => format!("/reports/{}", given.id),
            ReportsCmds::List(_) => String::from("/reports"),
        }
    }
}

pub fn handle(state: &mut AppState, args: ReportsArgs) -> error::Result {
    if !super::navigate(state, &args.command.path())? {
        return Ok(());
    }

    let client = &state.client;

    match args.command {
        ReportsCmds::List(given) => list(client, given),
        ReportsCmds::Show(given) => util::print_json(&retrieve(client, given.id)?),
        ReportsCmds::Delete(given) => delete(client, given),
    }
}

fn print_report(report: &Report) {
    let date = report.date
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| String::from("-"));

    println!(
        "{} [{}] {} {}",
        report.id,
        util::or_dash(&report.report_type),
        date,
        util::or_dash(&report.description)
    );
}

fn retrieve(client: &ApiClient, id: ids::ReportId) -> error::Result<Report> {
    RetrieveReport::id(id).send(client)
        .context("failed to retrieve report")?
        .context(format!("report {} was not found", id))
}

fn list(client: &ApiClient, args: util::PageArgs) -> error::Result {
    let (reports, page) = util::fetch(client, QueryReports::new(), &args)?;

    for report in &reports {
        print_report(report);
    }

    util::print_page(page.as_ref());

    Ok(())
}

#[derive(Debug, Args)]
struct IdArgs {
    /// id of the report
    id: ids::ReportId,
}

#[derive(Debug, Args)]
struct DeleteArgs {
    /// id of the report to delete
    id: ids::ReportId,

    /// skips the confirmation prompt
    #[arg(long)]
    yes: bool,
}

fn delete(client: &ApiClient, args: DeleteArgs) -> error::Result {
    let report = retrieve(client, args.id)?;

    if !util::confirm(args.yes, format!("delete report {}", report.id))? {
        return Ok(());
    }

    DeleteResource::from_links(&report.links)?
        .send(client)
        .context("failed to delete report")?;

    println!("deleted {}", report.id);

    Ok(())
}
