use clap::{Subcommand, Args};
use veevent_api::cities::{City, CreateCity as CreateCityBody, UpdateCity};
use veevent_api::client::ApiClient;
use veevent_api::client::cities::{QueryCities, RetrieveCity, CreateCity};
use veevent_api::client::links::{UpdateResource, DeleteResource};
use veevent_lib::ids;

use crate::error::{self, Context};
use crate::state::AppState;
use crate::util;

#[derive(Debug, Args)]
pub struct CitiesArgs {
    #[command(subcommand)]
    command: CitiesCmds
}

#[derive(Debug, Subcommand)]
enum CitiesCmds {
    /// lists cities
    List(util::PageArgs),

    /// shows a single city
    Show(IdArgs),

    /// creates a new city
    Create(CreateArgs),

    /// updates a city
    Update(UpdateArgs),

    /// deletes a city
    Delete(DeleteArgs),
}

impl CitiesCmds {
    fn path(&self) -> String {
        let id = match self {
            CitiesCmds::Show(given) => given.id,
            CitiesCmds::Update(given) => given.id,
            CitiesCmds::Delete(given) => given.id,
            _ => return String::from("/cities"),
        };

        format!("/cities/{}", id)
    }
}

pub fn handle(state: &mut AppState, args: CitiesArgs) -> error::Result {
    if !super::navigate(state, &args.command.path())? {
        return Ok(());
    }

    let client = &state.client;

    match args.command {
        CitiesCmds::List(given) => list(client, given),
        CitiesCmds::Show(given) => util::print_json(&retrieve(client, given.id)?),
        CitiesCmds::Create(given) => create(client, given),
        CitiesCmds::Update(given) => update(client, given),
        CitiesCmds::Delete(given) => delete(client, given),
    }
}

fn print_city(city: &City) {
    println!(
        "{} {} {} {}",
        city.id,
        city.name,
        util::or_dash(&city.postal_code),
        util::or_dash(&city.country)
    );
}

fn retrieve(client: &ApiClient, id: ids::CityId) -> error::Result<City> {
    RetrieveCity::id(id).send(client)
        .context("failed to retrieve city")?
        .context(format!("city {} was not found", id))
}

fn list(client: &ApiClient, args: util::PageArgs) -> error::Result {
    let (cities, page) = util::fetch(client, QueryCities::new(), &args)?;

    for city in &cities {
        print_city(city);
    }

    util::print_page(page.as_ref());

    Ok(())
}

#[derive(Debug, Args)]
struct IdArgs {
    /// id of the city
    id: ids::CityId,
}

#[derive(Debug, Args)]
struct CreateArgs {
    #[arg(long)]
    name: String,

    #[arg(long, allow_negative_numbers = true)]
    latitude: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    longitude: Option<f64>,

    #[arg(long)]
    region: Option<String>,

    #[arg(long)]
    postal_code: Option<String>,

    #[arg(long)]
    country: Option<String>,

    /// long form text shown on the city page
    #[arg(long)]
    content: Option<String>,
}

fn create(client: &ApiClient, args: CreateArgs) -> error::Result {
    let body = CreateCityBody {
        name: args.name,
        latitude: args.latitude,
        longitude: args.longitude,
        region: args.region,
        postal_code: args.postal_code,
        country: args.country,
        content: args.content,
    };

    let city = CreateCity::new(body).send(client)
        .context("failed to create city")?;

    print_city(&city);

    Ok(())
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// id of the city to update
    id: ids::CityId,

    #[arg(long)]
    name: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    latitude: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    longitude: Option<f64>,

    #[arg(long)]
    region: Option<String>,

    #[arg(long)]
    content: Option<String>,
}

fn update(client: &ApiClient, args: UpdateArgs) -> error::Result {
    let city = retrieve(client, args.id)?;
    let body = UpdateCity {
        name: args.name,
        latitude: args.latitude,
        longitude: args.longitude,
        region: args.region,
        content: args.content,
    };

    let updated: City = UpdateResource::from_links(&city.links, body)?
        .send(client)
        .context("failed to update city")?;

    print_city(&updated);

    Ok(())
}

#[derive(Debug, Args)]
struct DeleteArgs {
    /// id of the city to delete
    id: ids::CityId,

    /// skips the confirmation prompt
    #[arg(long)]
    yes: bool,
}

fn delete(client: &ApiClient, args: DeleteArgs) -> error::Result {
    let city = retrieve(client, args.id)?;

    if !util::confirm(args.yes, format!("delete city \"{}\"", city.name))? {
        return Ok(());
    }

    DeleteResource::from_links(&city.links)?
        .send(client)
        .context("failed to delete city")?;

    println!("deleted {}", city.id);

    Ok(())
}
