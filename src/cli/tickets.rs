use clap::{Subcommand, Args};
use veevent_api::client::tickets::VerifyTicket;

use crate::error::{self, Context};
use crate::state::AppState;
use crate::util;

#[derive(Debug, Args)]
pub struct TicketsArgs {
    #[command(subcommand)]
    command: TicketsCmds
}

#[derive(Debug, Subcommand)]
enum TicketsCmds {
    /// checks a ticket key presented at the entrance
    Verify(VerifyArgs),
}

#[derive(Debug, Args)]
struct VerifyArgs {
    /// the key printed on the ticket
    key: String,
}

pub fn handle(state: &mut AppState, args: TicketsArgs) -> error::Result {
    if !super::navigate(state, "/tickets/verify")? {
        return Ok(());
    }

    match args.command {
        TicketsCmds::Verify(given) => verify(state, given),
    }
}

fn verify(state: &AppState, args: VerifyArgs) -> error::Result {
    let key = args.key.trim();

    if key.is_empty() {
        return Err(error::Error::from("a ticket key is required"));
    }

    let Some(ticket) = VerifyTicket::key(key).send(&state.client)
        .context("failed to verify ticket")? else {
        println!("no ticket found for key {}", key);

        return Ok(());
    };

    let holder = match (&ticket.name, &ticket.last_name) {
        (Some(first), Some(last)) => format!("{} {}", first, last),
        (Some(name), None) | (None, Some(name)) => name.clone(),
        (None, None) => String::from("-"),
    };

    println!(
        "{} {} holder: {} status: {}",
        if ticket.is_valid() { "VALID" } else { "INVALID" },
        ticket.key,
        holder,
        util::or_dash(&ticket.status)
    );

    Ok(())
}
