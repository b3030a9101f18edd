use clap::{Parser, Subcommand, Args};
use veevent_lib::Decision;

use crate::config::{ConfigArgs, Settings};
use crate::error::{self, Context};
use crate::input;
use crate::nav;
use crate::state::AppState;

mod connect;
mod profile;
mod categories;
mod cities;
mod places;
mod events;
mod users;
mod reports;
mod invitations;
mod tickets;

/// a cli for administering a Veevent platform.
///
/// every command navigates to a route of the admin application and is
/// checked against the role of the signed in user. if no command is provided
/// then it will enter interactive mode.
#[derive(Debug, Parser)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Option<BaseCmds>
}

pub fn start() -> error::Result {
    let args = Cli::parse();
    let settings = Settings::from_args(&args.config)?;
    let mut state = AppState::load(&settings)?;

    match args.command {
        Some(cmd) => handle(&mut state, cmd),
        None => Interactive::handle(&mut state)
    }
}

#[derive(Debug, Parser)]
#[command(no_binary_name = true)]
enum Interactive {
    #[command(flatten)]
    Base(BaseCmds),
    Quit
}

impl Interactive {
    fn handle(state: &mut AppState) -> error::Result {
        loop {
            let Some(given) = input::prompt_line("> ")? else {
                break;
            };
            let trimmed = given.trim();

            if trimmed.is_empty() {
                continue;
            }

            let Ok(args_list) = shell_words::split(trimmed) else {
                println!("failed to parse command line args");
                continue;
            };

            let cmd = match Interactive::try_parse_from(args_list) {
                Ok(c) => c,
                Err(err) => {
                    println!("{}", err);
                    continue;
                }
            };

            let result = match cmd {
                Interactive::Base(cmd) => handle(state, cmd),
                Interactive::Quit => break,
            };

            if let Err(err) = result {
                println!("{}", err);
            }
        }

        Ok(())
    }
}

#[derive(Debug, Subcommand)]
enum BaseCmds {
    /// login to the admin application
    Login(connect::LoginArgs),

    /// logout and clear the local session
    Logout,

    /// shows or sets the preferred theme
    Theme(ThemeArgs),

    /// shows the decision for a route path without acting on it
    Access(AccessArgs),

    /// views or updates the profile of the signed in user
    Profile(profile::ProfileArgs),

    /// manages event categories
    Categories(categories::CategoriesArgs),

    /// manages cities
    Cities(cities::CitiesArgs),

    /// manages places
    Places(places::PlacesArgs),

    /// manages events
    Events(events::EventsArgs),

    /// manages users
    Users(users::UsersArgs),

    /// reviews reports
    Reports(reports::ReportsArgs),

    /// manages event invitations
    Invitations(invitations::InvitationsArgs),

    /// verifies tickets
    Tickets(tickets::TicketsArgs),
}

fn handle(state: &mut AppState, command: BaseCmds) -> error::Result {
    let result = match command {
        BaseCmds::Login(given) => connect::login(state, given),
        BaseCmds::Logout => connect::logout(state),
        BaseCmds::Theme(given) => theme(state, given),
        BaseCmds::Access(given) => access(state, given),
        BaseCmds::Profile(given) => profile::handle(state, given),
        BaseCmds::Categories(given) => categories::handle(state, given),
        BaseCmds::Cities(given) => cities::handle(state, given),
        BaseCmds::Places(given) => places::handle(state, given),
        BaseCmds::Events(given) => events::handle(state, given),
        BaseCmds::Users(given) => users::handle(state, given),
        BaseCmds::Reports(given) => reports::handle(state, given),
        BaseCmds::Invitations(given) => invitations::handle(state, given),
        BaseCmds::Tickets(given) => tickets::handle(state, given),
    };

    state.refresh();

    result
}

/// navigates to the given route path. returns false when the command should
/// not run
pub(crate) fn navigate(state: &mut AppState, path: &str) -> error::Result<bool> {
    loop {
        match nav::resolve(path, &state.session.view(), &state.guard) {
            Decision::Render => return Ok(true),
            Decision::Pending => {
                println!("the session is still loading");

                return Ok(false);
            },
            Decision::RedirectToLogin { return_to } => {
                let target = nav::return_path(&return_to, path);

                println!("you must login to access {}", target);

                if !input::confirm("login now")? {
                    return Ok(false);
                }

                connect::login(state, connect::LoginArgs::default())?;
                state.refresh();
            },
            Decision::ForceLogout { reason } => {
                tracing::info!("forced logout: {}", reason);

                state.session.logout().context("failed to clear the session")?;
                state.refresh();

                return Err(error::Error::new().context(format!(
                    "access denied, you have been logged out. {}", reason
                )));
            }
        }
    }
}

#[derive(Debug, Args)]
struct ThemeArgs {
    /// the theme to use, shows the current theme when missing
    name: Option<String>,
}

fn theme(state: &mut AppState, args: ThemeArgs) -> error::Result {
    match args.name {
        Some(name) => {
            state.session.set_theme(name).context("failed to save theme")?;
        },
        None => {
            println!("{}", state.session.theme().unwrap_or("default"));
        }
    }

    Ok(())
}

#[derive(Debug, Args)]
struct AccessArgs {
    /// route path to check, for example /events/3
    path: String,
}

fn access(state: &mut AppState, args: AccessArgs) -> error::Result {
    let decision = nav::resolve(&args.path, &state.session.view(), &state.guard);

    match decision {
        Decision::Render => println!("allowed"),
        Decision::Pending => println!("pending, the session is still loading"),
        Decision::RedirectToLogin { return_to } => println!("login required, redirect to {}", return_to),
        Decision::ForceLogout { reason } => println!("denied, the session would be cleared. {}", reason),
    }

    Ok(())
}
