use clap::{Subcommand, Args};
use veevent_api::places::{Place, CreatePlace as CreatePlaceBody, UpdatePlace};
use veevent_api::client::ApiClient;
use veevent_api::client::places::{QueryPlaces, RetrievePlace, CreatePlace};
use veevent_api::client::links::{UpdateResource, DeleteResource};
use veevent_lib::ids;

use crate::error::{self, Context};
use crate::state::AppState;
use crate::util;

#[derive(Debug, Args)]
pub struct PlacesArgs {
    #[command(subcommand)]
    command: PlacesCmds
}

#[derive(Debug, Subcommand)]
enum PlacesCmds {
    /// lists places
    List(util::PageArgs),

    /// shows a single place
    Show(IdArgs),

    /// creates a new place
    Create(CreateArgs),

    /// updates a place
    Update(UpdateArgs),

    /// deletes a place
    Delete(DeleteArgs),
}

impl PlacesCmds {
    fn path(&self) -> String {
        let id = match self {
            PlacesCmds::Show(given) => given.id,
            PlacesCmds::Update(given) => given.id,
            PlacesCmds::Delete(given) => given.id,
            _ => return String::from("/places"),
        };

        format!("/places/{}", id)
    }
}

pub fn handle(state: &mut AppState, args: PlacesArgs) -> error::Result {
    if !super::navigate(state, &args.command.path())? {
        return Ok(());
    }

    let client = &state.client;

    match args.command {
        PlacesCmds::List(given) => list(client, given),
        PlacesCmds::Show(given) => util::print_json(&retrieve(client, given.id)?),
        PlacesCmds::Create(given) => create(client, given),
        PlacesCmds::Update(given) => update(client, given),
        PlacesCmds::Delete(given) => delete(client, given),
    }
}

fn print_place(place: &Place) {
    println!(
        "{} {} [{}] {}, {}",
        place.id,
        place.name,
        util::or_dash(&place.kind),
        util::or_dash(&place.address),
        util::or_dash(&place.city_name)
    );
}

fn retrieve(client: &ApiClient, id: ids::PlaceId) -> error::Result<Place> {
    RetrievePlace::id(id).send(client)
        .context("failed to retrieve place")?
        .context(format!("place {} was not found", id))
}

fn list(client: &ApiClient, args: util::PageArgs) -> error::Result {
    let (places, page) = util::fetch(client, QueryPlaces::new(), &args)?;

    for place in &places {
        print_place(place);
    }

    util::print_page(page.as_ref());

    Ok(())
}

#[derive(Debug, Args)]
struct IdArgs {
    /// id of the place
    id: ids::PlaceId,
}

#[derive(Debug, Args)]
struct CreateArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    address: String,

    /// id of the city the place is in
    #[arg(long)]
    city: ids::CityId,

    /// kind of place, for example "bar" or "concert hall"
    #[arg(long = "type")]
    kind: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    latitude: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    longitude: Option<f64>,

    #[arg(long)]
    description: Option<String>,
}

fn create(client: &ApiClient, args: CreateArgs) -> error::Result {
    let body = CreatePlaceBody {
        name: args.name,
        address: args.address,
        city_id: args.city,
        kind: args.kind,
        latitude: args.latitude,
        longitude: args.longitude,
        description: args.description,
    };

    let place = CreatePlace::new(body).send(client)
        .context("failed to create place")?;

    print_place(&place);

    Ok(())
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// id of the place to update
    id: ids::PlaceId,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    address: Option<String>,

    #[arg(long = "type")]
    kind: Option<String>,

    #[arg(long)]
    description: Option<String>,
}

fn update(client: &ApiClient, args: UpdateArgs) -> error::Result {
    let place = retrieve(client, args.id)?;
    let body = UpdatePlace {
        name: args.name,
        address: args.address,
        kind: args.kind,
        description: args.description,
    };

    let updated: Place = UpdateResource::from_links(&place.links, body)?
        .send(client)
        .context("failed to update place")?;

    print_place(&updated);

    Ok(())
}

#[derive(Debug, Args)]
struct DeleteArgs {
    /// id of the place to delete
    id: ids::PlaceId,

    /// skips the confirmation prompt
    #[arg(long)]
    yes: bool,
}

fn delete(client: &ApiClient, args: DeleteArgs) -> error::Result {
    let place = retrieve(client, args.id)?;

    if !util::confirm(args.yes, format!("delete place \"{}\"", place.name))? {
        return Ok(());
    }

    DeleteResource::from_links(&place.links)?
        .send(client)
        .context("failed to delete place")?;

    println!("deleted {}", place.id);

    Ok(())
}
