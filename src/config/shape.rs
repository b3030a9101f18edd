use std::path::PathBuf;

use serde::Deserialize;
use veevent_lib::{PrefixMatch, RouteRule};

#[derive(Debug, Deserialize)]
pub struct Api {
    pub url: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Session {
    pub cookies: Option<PathBuf>,
    pub storage: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct Routes {
    pub prefix_match: Option<PrefixMatch>,

    /// replaces the built in table when present
    pub rules: Option<Vec<RouteRule>>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub api: Option<Api>,
    pub session: Option<Session>,
    pub routes: Option<Routes>,
}
