use chrono::NaiveDateTime;
use clap::{Subcommand, Args};
use veevent_api::events::{Event, CreateEvent as CreateEventBody, UpdateEvent};
use veevent_api::client::ApiClient;
use veevent_api::client::events::{QueryEvents, RetrieveEvent, CreateEvent};
use veevent_api::client::links::{UpdateResource, DeleteResource};
use veevent_lib::ids;

use crate::error::{self, Context};
use crate::state::AppState;
use crate::util;

#[derive(Debug, Args)]
pub struct EventsArgs {
    #[command(subcommand)]
    command: EventsCmds
}

#[derive(Debug, Subcommand)]
enum EventsCmds {
    /// lists events
    List(util::PageArgs),

    /// shows a single event
    Show(IdArgs),

    /// creates a new event
    Create(CreateArgs),

    /// updates an event
    Update(UpdateArgs),

    /// deletes an event
    Delete(DeleteArgs),
}

impl EventsCmds {
    fn path(&self) -> String {
        let id = match self {
            EventsCmds::Show(given) => given.id,
            EventsCmds::Update(given) => given.id,
            EventsCmds::Delete(given) => given.id,
            _ => return String::from("/events"),
        };

        format!("/events/{}", id)
    }
}

pub fn handle(state: &mut AppState, args: EventsArgs) -> error::Result {
    if !super::navigate(state, &args.command.path())? {
        return Ok(());
    }

    let client = &state.client;

    match args.command {
        EventsCmds::List(given) => list(client, given),
        EventsCmds::Show(given) => util::print_json(&retrieve(client, given.id)?),
        EventsCmds::Create(given) => create(client, given),
        EventsCmds::Update(given) => update(client, given),
        EventsCmds::Delete(given) => delete(client, given),
    }
}

fn parse_date(given: &str) -> Result<NaiveDateTime, String> {
    veevent_lib::serde::parse_date_time(given)
        .ok_or_else(|| format!("invalid date \"{}\". expected YYYY-MM-DDTHH:MM:SS", given))
}

fn print_event(event: &Event) {
    let date = event.date
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| String::from("-"));

    println!(
        "{} {} {} {} {}/{}",
        event.id,
        event.name,
        date,
        util::or_dash(&event.status),
        event.current_participants.unwrap_or(0),
        event.max_customers.map(|v| v.to_string()).unwrap_or_else(|| String::from("-"))
    );
}

fn retrieve(client: &ApiClient, id: ids::EventId) -> error::Result<Event> {
    RetrieveEvent::id(id).send(client)
        .context("failed to retrieve event")?
        .context(format!("event {} was not found", id))
}

fn list(client: &ApiClient, args: util::PageArgs) -> error::Result {
    let (events, page) = util::fetch(client, QueryEvents::new(), &args)?;

    for event in &events {
        print_event(event);
    }

    util::print_page(page.as_ref());

    Ok(())
}

#[derive(Debug, Args)]
struct IdArgs {
    /// id of the event
    id: ids::EventId,
}

#[derive(Debug, Args)]
struct CreateArgs {
    #[arg(long)]
    name: String,

    /// when the event starts, YYYY-MM-DDTHH:MM:SS
    #[arg(long, value_parser = parse_date)]
    date: NaiveDateTime,

    #[arg(long)]
    address: String,

    /// id of the place hosting the event
    #[arg(long)]
    place: ids::PlaceId,

    /// id of the city the event takes place in
    #[arg(long)]
    city: ids::CityId,

    #[arg(long)]
    max_customers: u32,

    #[arg(long, default_value_t = 0.0)]
    price: f64,

    /// category key, can be given multiple times
    #[arg(long = "category")]
    categories: Vec<String>,

    #[arg(long)]
    description: Option<String>,

    /// only invited users may join
    #[arg(long)]
    invitation_only: bool,
}

fn create(client: &ApiClient, args: CreateArgs) -> error::Result {
    let body = CreateEventBody {
        name: args.name,
        date: args.date,
        address: args.address,
        place_id: args.place,
        city_id: args.city,
        max_customers: args.max_customers,
        price: args.price,
        category_keys: args.categories,
        description: args.description,
        is_invitation_only: args.invitation_only,
    };

    let event = CreateEvent::new(body).send(client)
        .context("failed to create event")?;

    print_event(&event);

    Ok(())
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// id of the event to update
    id: ids::EventId,

    #[arg(long)]
    name: Option<String>,

    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDateTime>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    max_customers: Option<u32>,

    #[arg(long)]
    price: Option<f64>,

    #[arg(long)]
    status: Option<String>,

    /// sets the trending flag
    #[arg(long)]
    trending: Option<bool>,
}

fn update(client: &ApiClient, args: UpdateArgs) -> error::Result {
    let event = retrieve(client, args.id)?;
    let body = UpdateEvent {
        name: args.name,
        date: args.date,
        description: args.description,
        max_customers: args.max_customers,
        price: args.price,
        status: args.status,
        is_trending: args.trending,
    };

    let updated: Event = UpdateResource::from_links(&event.links, body)?
        .send(client)
        .context("failed to update event")?;

    print_event(&updated);

    Ok(())
}

#[derive(Debug, Args)]
struct DeleteArgs {
    /// id of the event to delete
    id: ids::EventId,

    /// skips the confirmation prompt
    #[arg(long)]
    yes: bool,
}

fn delete(client: &ApiClient, args: DeleteArgs) -> error::Result {
    let event = retrieve(client, args.id)?;

    if !util::confirm(args.yes, format!("delete event \"{}\"", event.name))? {
        return Ok(());
    }

    DeleteResource::from_links(&event.links)?
        .send(client)
        .context("failed to delete event")?;

    println!("deleted {}", event.id);

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn date_arguments() {
        let parsed = parse_date("2026-11-02T20:30:00").unwrap();

        assert_eq!(parsed.format("%Y-%m-%d %H:%M").to_string(), "2026-11-02 20:30");
        assert!(parse_date("next friday").is_err());
    }
}
