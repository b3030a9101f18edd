use clap::{Subcommand, Args};
use veevent_api::client::users::{RetrieveMe, UpdateMe};
use veevent_api::users::{User, UpdateUser};

use crate::error::{self, Context};
use crate::state::AppState;
use crate::util;

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    command: ProfileCmds
}

#[derive(Debug, Subcommand)]
enum ProfileCmds {
    /// shows the profile stored by the api
    Show,

    /// shows the profile cached with the session
    Cached,

    /// updates the profile
    Update(UpdateArgs),
}

pub fn handle(state: &mut AppState, args: ProfileArgs) -> error::Result {
    if !super::navigate(state, "/profile")? {
        return Ok(());
    }

    match args.command {
        ProfileCmds::Show => show(state),
        ProfileCmds::Cached => cached(state),
        ProfileCmds::Update(given) => update(state, given),
    }
}

pub fn print_user(user: &User) {
    println!("{} {} <{}> role: {}", user.id, user.display_name(), util::or_dash(&user.email), user.role);

    if let Some(description) = &user.description {
        println!("    {}", description);
    }

    if !user.socials.is_empty() {
        println!("    socials: {}", user.socials.join(", "));
    }
}

fn show(state: &mut AppState) -> error::Result {
    let user = RetrieveMe::new().send(&state.client)
        .context("failed to retrieve profile")?;

    print_user(&user);

    state.session.store_profile(user).context("failed to cache profile")?;

    Ok(())
}

fn cached(state: &AppState) -> error::Result {
    match state.session.user() {
        Some(user) => print_user(user),
        None => println!("no profile cached"),
    }

    Ok(())
}

#[derive(Debug, Args)]
struct UpdateArgs {
    #[arg(long)]
    first_name: Option<String>,

    #[arg(long)]
    last_name: Option<String>,

    #[arg(long)]
    pseudo: Option<String>,

    /// updates the description
    #[arg(long, conflicts_with("no_description"))]
    description: Option<String>,

    /// removes the description
    #[arg(long, conflicts_with("description"))]
    no_description: bool,

    /// updates the phone number
    #[arg(long, conflicts_with("no_phone"))]
    phone: Option<String>,

    /// removes the phone number
    #[arg(long, conflicts_with("phone"))]
    no_phone: bool,

    /// comma separated list of social links, an empty value clears them
    #[arg(long)]
    socials: Option<String>,
}

fn update(state: &mut AppState, args: UpdateArgs) -> error::Result {
    let mut body = UpdateUser {
        first_name: args.first_name,
        last_name: args.last_name,
        pseudo: args.pseudo,
        socials: args.socials.map(|v| util::split_list(&v)),
        ..Default::default()
    };

    if let Some(given) = args.description {
        body.description = Some(Some(given));
    } else if args.no_description {
        body.description = Some(None);
    }

    if let Some(given) = args.phone {
        body.phone = Some(Some(given));
    } else if args.no_phone {
        body.phone = Some(None);
    }

    let user = UpdateMe::new(body).send(&state.client)
        .context("failed to update profile")?;

    print_user(&user);

    state.session.store_profile(user).context("failed to cache profile")?;

    Ok(())
}
