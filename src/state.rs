use tokio::sync::broadcast::{self, error::TryRecvError};
use veevent_api::client::ApiClient;
use veevent_lib::RouteGuard;

use crate::config::Settings;
use crate::error::{self, Context};
use crate::session::{AuthEvent, Session};

pub struct AppState {
    pub client: ApiClient,
    pub session: Session,
    pub guard: RouteGuard,
    auth_events: broadcast::Receiver<AuthEvent>,
}

impl AppState {
    pub fn load(settings: &Settings) -> error::Result<Self> {
        let mut client = settings.api_client()?;
        let session = Session::open(
            client.base_url().clone(),
            &settings.cookies,
            &settings.storage
        ).context("failed to load session")?;

        client.set_token(session.token().map(str::to_owned));

        let auth_events = session.subscribe();

        Ok(AppState {
            client,
            session,
            guard: settings.route_guard(),
            auth_events,
        })
    }

    /// picks up auth changes broadcast by the session and updates the token
    /// used by the api client
    pub fn refresh(&mut self) {
        let mut changed = false;

        loop {
            match self.auth_events.try_recv() {
                Ok(event) => {
                    tracing::debug!("auth refresh {:?}", event);

                    changed = true;
                },
                Err(TryRecvError::Lagged(_)) => {
                    changed = true;
                },
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }

        if changed {
            self.client.set_token(self.session.token().map(str::to_owned));
        }
    }
}
