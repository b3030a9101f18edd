use clap::Args;
use veevent_api::ApiErrorKind;
use veevent_api::auth::token_from_callback;
use veevent_api::client::auth::Authenticate;
use veevent_api::client::users::RetrieveMe;
use veevent_api::users::User;

use crate::error::{self, Context};
use crate::input;
use crate::session::SessionError;
use crate::state::AppState;

#[derive(Debug, Default, Args)]
pub struct LoginArgs {
    /// the url the identity provider redirected to, it carries the token
    #[arg(long)]
    pub callback: Option<String>,

    /// email to login with, prompts when missing
    #[arg(long, conflicts_with = "callback")]
    pub email: Option<String>,
}

pub fn login(state: &mut AppState, args: LoginArgs) -> error::Result {
    let (token, user) = match args.callback {
        Some(callback) => from_callback(state, &callback)?,
        None => submit_credentials(state, args.email)?,
    };

    let name = user.display_name();

    match state.session.establish(&token, user, state.guard.roles()) {
        Ok(()) => {
            println!("logged in as {}", name);

            Ok(())
        },
        Err(err @ SessionError::RoleDenied { .. }) => {
            state.client.set_token(state.session.token().map(str::to_owned));

            Err(error::Error::new()
                .context("login refused")
                .source(err))
        },
        Err(err) => Err(error::Error::new()
            .context("failed to store the session")
            .source(err))
    }
}

pub fn logout(state: &mut AppState) -> error::Result {
    state.session.logout().context("failed to clear the session")?;

    println!("logged out");

    Ok(())
}

fn from_callback(state: &mut AppState, callback: &str) -> error::Result<(String, User)> {
    let token = token_from_callback(callback)
        .context("the callback url does not carry a token")?;

    let user = fetch_profile(state, &token)?;

    Ok((token, user))
}

/// retrieves the profile the token belongs to without changing the token the
/// client currently uses
fn fetch_profile(state: &mut AppState, token: &str) -> error::Result<User> {
    let previous = state.client.token().map(str::to_owned);

    state.client.set_token(Some(token.to_owned()));

    let result = RetrieveMe::new().send(&state.client);

    state.client.set_token(previous);

    Ok(result.context("failed to retrieve the profile of the new session")?)
}

fn submit_credentials(
    state: &mut AppState,
    email: Option<String>
) -> error::Result<(String, User)> {
    loop {
        let email = match &email {
            Some(given) => given.clone(),
            None => input::prompt_trimmed("email: ")?,
        };
        let password = rpassword::prompt_password("password: ")?;

        match Authenticate::credentials(email, password).send(&state.client) {
            Ok(authenticated) => {
                let user = match authenticated.user {
                    Some(user) => user,
                    None => fetch_profile(state, &authenticated.token)?,
                };

                return Ok((authenticated.token, user));
            },
            Err(err) => {
                let api = err.as_api()
                    .context("failed handling server request")?;

                match api.kind() {
                    ApiErrorKind::Unauthenticated |
                    ApiErrorKind::BadRequest |
                    ApiErrorKind::NotFound |
                    ApiErrorKind::ValidationFailed => {
                        println!("invalid email or password");
                        continue;
                    },
                    _ => {
                        return Err(error::Error::from(api));
                    }
                }
            }
        }
    }
}
