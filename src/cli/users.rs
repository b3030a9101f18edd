use clap::{Subcommand, Args};
use veevent_api::client::ApiClient;
use veevent_api::client::users::{QueryUsers, RetrieveUser};
use veevent_api::client::links::{UpdateResource, DeleteResource};
use veevent_api::users::{User, UpdateUser};
use veevent_lib::ids;

use crate::error::{self, Context};
use crate::state::AppState;
use crate::util;

use super::profile::print_user;

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    command: UsersCmds
}

#[derive(Debug, Subcommand)]
enum UsersCmds {
    /// lists users
    List(util::PageArgs),

    /// shows a single user
    Show(IdArgs),

    /// changes the role of a user
    Role(RoleArgs),

    /// deletes a user
    Delete(DeleteArgs),
}

impl UsersCmds {
    fn path(&self) -> String {
        let id = match self {
            UsersCmds::Show(given) => given.id,
            UsersCmds::Role(given) => given.id,
            UsersCmds::Delete(given) => given.id,
            _ => return String::from("/users"),
        };

        format!("/users/{}", id)
    }
}

pub fn handle(state: &mut AppState, args: UsersArgs) -> error::Result {
    if !super::navigate(state, &args.command.path())? {
        return Ok(());
    }

    let client = &state.client;

    match args.command {
        UsersCmds::List(given) => list(client, given),
        UsersCmds::Show(given) => util::print_json(&retrieve(client, given.id)?),
        UsersCmds::Role(given) => role(client, given),
        UsersCmds::Delete(given) => delete(client, given),
    }
}

fn retrieve(client: &ApiClient, id: ids::UserId) -> error::Result<User> {
    RetrieveUser::id(id).send(client)
        .context("failed to retrieve user")?
        .context(format!("user {} was not found", id))
}

fn list(client: &ApiClient, args: util::PageArgs) -> error::Result {
    let (users, page) = util::fetch(client, QueryUsers::new(), &args)?;

    for user in &users {
        print_user(user);
    }

    util::print_page(page.as_ref());

    Ok(())
}

#[derive(Debug, Args)]
struct IdArgs {
    /// id of the user
    id: ids::UserId,
}

#[derive(Debug, Args)]
struct RoleArgs {
    /// id of the user to update
    id: ids::UserId,

    /// the new role, for example "organizer" or "user"
    role: String,
}

fn role(client: &ApiClient, args: RoleArgs) -> error::Result {
    let user = retrieve(client, args.id)?;
    let body = UpdateUser {
        role: Some(args.role.trim().to_owned()),
        ..Default::default()
    };

    let updated: User = UpdateResource::from_links(&user.links, body)?
        .send(client)
        .context("failed to update role")?;

    print_user(&updated);

    Ok(())
}

#[derive(Debug, Args)]
struct DeleteArgs {
    /// id of the user to delete
    id: ids::UserId,

    /// skips the confirmation prompt
    #[arg(long)]
    yes: bool,
}

fn delete(client: &ApiClient, args: DeleteArgs) -> error::Result {
    let user = retrieve(client, args.id)?;

    if !util::confirm(args.yes, format!("delete user \"{}\"", user.display_name()))? {
        return Ok(());
    }

    DeleteResource::from_links(&user.links)?
        .send(client)
        .context("failed to delete user")?;

    println!("deleted {}", user.id);

    Ok(())
}
