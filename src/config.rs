use std::path::{Path, PathBuf, Component};

use clap::Args;
use veevent_api::client::{ApiClient, DEFAULT_BASE_URL};
use veevent_lib::{PrefixMatch, RolePolicy, RouteGuard, RouteRule, RouteTable};

use crate::error::{self, Context};

mod shape;

pub const DEFAULT_COOKIES_FILE: &str = "veevent_cookies.json";
pub const DEFAULT_STORAGE_FILE: &str = "veevent_storage.json";
pub const DEFAULT_USER_AGENT: &str = "veevent-admin/0.1.0";

/// options that can be given on the command line or through the environment.
/// anything given here overrides the config file
#[derive(Debug, Default, Args)]
pub struct ConfigArgs {
    /// a yaml or json file to load settings from
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// base url of the veevent api
    #[arg(long, env = "VEEVENT_API_URL", global = true)]
    pub api_url: Option<String>,

    /// file that stores the session cookies
    ///
    /// defaults to "veevent_cookies.json" in the current working directory
    #[arg(long, env = "VEEVENT_COOKIES", global = true)]
    pub cookies: Option<PathBuf>,

    /// file that stores the cached profile and preferences
    ///
    /// defaults to "veevent_storage.json" in the current working directory
    #[arg(long, env = "VEEVENT_STORAGE", global = true)]
    pub storage: Option<PathBuf>,

    /// user agent sent with every request
    #[arg(long, global = true)]
    pub user_agent: Option<String>,

    /// how route prefixes are matched: longest | first
    #[arg(long, value_parser = parse_prefix_match, global = true)]
    pub prefix_match: Option<PrefixMatch>,
}

fn parse_prefix_match(given: &str) -> Result<PrefixMatch, String> {
    match given.trim().to_ascii_lowercase().as_str() {
        "longest" => Ok(PrefixMatch::Longest),
        "first" => Ok(PrefixMatch::First),
        _ => Err(format!("unknown prefix match \"{}\". expected longest or first", given))
    }
}

#[derive(Debug)]
pub struct Settings {
    pub api_url: String,
    pub user_agent: String,
    pub cookies: PathBuf,
    pub storage: PathBuf,
    pub prefix_match: PrefixMatch,
    pub rules: Option<Vec<RouteRule>>,
}

impl Settings {
    fn defaults(cwd: &Path) -> Self {
        Settings {
            api_url: DEFAULT_BASE_URL.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            cookies: cwd.join(DEFAULT_COOKIES_FILE),
            storage: cwd.join(DEFAULT_STORAGE_FILE),
            prefix_match: PrefixMatch::default(),
            rules: None,
        }
    }

    /// defaults, then the config file, then the given args
    pub fn from_args(args: &ConfigArgs) -> error::Result<Self> {
        let cwd = std::env::current_dir()
            .context("failed to retrieve cwd for Settings")?;

        Self::resolve(&cwd, args)
    }

    fn resolve(cwd: &Path, args: &ConfigArgs) -> error::Result<Self> {
        let mut settings = Self::defaults(cwd);

        if let Some(config_path) = &args.config {
            let full = resolve_path(cwd, config_path);

            tracing::debug!("loading config file \"{}\"", full.display());

            let loaded = load_file(&full)?;

            settings.merge(cwd, loaded)?;
        }

        if let Some(url) = &args.api_url {
            settings.api_url = url.clone();
        }

        if let Some(agent) = &args.user_agent {
            settings.user_agent = agent.clone();
        }

        if let Some(cookies) = &args.cookies {
            settings.cookies = resolve_path(cwd, cookies);
        }

        if let Some(storage) = &args.storage {
            settings.storage = resolve_path(cwd, storage);
        }

        if let Some(prefix_match) = args.prefix_match {
            settings.prefix_match = prefix_match;
        }

        tracing::debug!("{settings:#?}");

        Ok(settings)
    }

    fn merge(&mut self, cwd: &Path, loaded: shape::Settings) -> error::Result<()> {
        if let Some(api) = loaded.api {
            if let Some(url) = api.url {
                self.api_url = url;
            }

            if let Some(agent) = api.user_agent {
                self.user_agent = agent;
            }
        }

        if let Some(session) = loaded.session {
            if let Some(cookies) = session.cookies {
                self.cookies = resolve_path(cwd, &cookies);
            }

            if let Some(storage) = session.storage {
                self.storage = resolve_path(cwd, &storage);
            }
        }

        if let Some(routes) = loaded.routes {
            if let Some(prefix_match) = routes.prefix_match {
                self.prefix_match = prefix_match;
            }

            if let Some(rules) = routes.rules {
                for (index, rule) in rules.iter().enumerate() {
                    if !rule.prefix.starts_with('/') {
                        return Err(error::Error::new().context(format!(
                            "routes.rules.{} prefix \"{}\" must start with \"/\"",
                            index,
                            rule.prefix
                        )));
                    }
                }

                self.rules = Some(rules);
            }
        }

        Ok(())
    }

    pub fn route_guard(&self) -> RouteGuard {
        let table = match &self.rules {
            Some(rules) => RouteTable::new(rules.clone(), self.prefix_match),
            None => RouteTable::default().with_matching(self.prefix_match),
        };

        RouteGuard::new(RolePolicy::default(), table)
    }

    pub fn api_client(&self) -> error::Result<ApiClient> {
        let mut builder = ApiClient::builder();
        builder.base_url(self.api_url.clone())
            .user_agent(self.user_agent.clone());

        builder.build().context("failed to create api client")
    }
}

fn load_file(path: &Path) -> error::Result<shape::Settings> {
    let ext = path.extension().context(format!(
        "failed to retrieve the file extension for config file: \"{}\"", path.display()
    ))?;

    let ext = ext.to_ascii_lowercase();
    let file = std::fs::OpenOptions::new()
        .read(true)
        .open(path)
        .context(format!("failed to open config file: \"{}\"", path.display()))?;
    let reader = std::io::BufReader::new(file);

    if ext.eq("yaml") || ext.eq("yml") {
        serde_yaml::from_reader(reader).context(format!(
            "failed to parse yaml config file: \"{}\"", path.display()
        ))
    } else if ext.eq("json") {
        serde_json::from_reader(reader).context(format!(
            "failed to parse json config file: \"{}\"", path.display()
        ))
    } else {
        Err(error::Error::new().context(format!(
            "unknown type of config file: \"{}\"", path.display()
        )))
    }
}

fn resolve_path(cwd: &Path, given: &Path) -> PathBuf {
    if given.is_absolute() {
        normalize(given)
    } else {
        normalize(&cwd.join(given))
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut rtn = PathBuf::new();

    for comp in path.components() {
        match comp {
            Component::Prefix(prefix) => {
                rtn.push(prefix.as_os_str());
            }
            Component::ParentDir => {
                rtn.pop();
            }
            Component::Normal(c) => {
                rtn.push(c);
            }
            Component::RootDir => {
                rtn.push(comp.as_os_str());
            }
            Component::CurDir => {}
        }
    }

    rtn
}

#[cfg(test)]
mod test {
    use super::*;
    use veevent_lib::{Role, SessionView, Decision};

    #[test]
    fn defaults_without_file() {
        let cwd = PathBuf::from("/srv/admin");
        let settings = Settings::resolve(&cwd, &ConfigArgs::default()).unwrap();

        assert_eq!(settings.api_url, DEFAULT_BASE_URL);
        assert_eq!(settings.cookies, PathBuf::from("/srv/admin/veevent_cookies.json"));
        assert_eq!(settings.storage, PathBuf::from("/srv/admin/veevent_storage.json"));
        assert_eq!(settings.prefix_match, PrefixMatch::Longest);
        assert!(settings.rules.is_none());
    }

    #[test]
    fn args_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("admin.yaml");

        std::fs::write(&config, "\
api:
  url: https://api.veevent.example/api/v1
  user_agent: staff-console
session:
  cookies: ./state/cookies.json
routes:
  prefix_match: first
").unwrap();

        let args = ConfigArgs {
            config: Some(config),
            api_url: Some(String::from("http://10.0.0.2:8090/api/v1")),
            ..Default::default()
        };

        let settings = Settings::resolve(dir.path(), &args).unwrap();

        assert_eq!(settings.api_url, "http://10.0.0.2:8090/api/v1");
        assert_eq!(settings.user_agent, "staff-console");
        assert_eq!(settings.cookies, normalize(&dir.path().join("state/cookies.json")));
        assert_eq!(settings.prefix_match, PrefixMatch::First);
    }

    #[test]
    fn json_route_override() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("admin.json");

        std::fs::write(&config, r#"{
            "routes": {
                "rules": [
                    {"prefix": "/events", "roles": ["admin"]}
                ]
            }
        }"#).unwrap();

        let args = ConfigArgs {
            config: Some(config),
            ..Default::default()
        };

        let settings = Settings::resolve(dir.path(), &args).unwrap();
        let guard = settings.route_guard();

        assert_eq!(guard.routes().rules().len(), 1);
        assert!(guard.routes().permits("/events", &Role::Admin));

        let organizer = SessionView {
            token: Some("tok"),
            role: Some("organizer"),
            loading: false,
        };

        assert!(matches!(guard.evaluate("/events/1", &organizer), Decision::ForceLogout { .. }));
        // reports are no longer listed so any allowed role may visit them
        assert_eq!(guard.evaluate("/reports", &organizer), Decision::Render);
    }

    #[test]
    fn invalid_files_are_rejected() {
        let dir = tempfile::tempdir().unwrap();

        let unknown = dir.path().join("admin.toml");
        std::fs::write(&unknown, "").unwrap();

        let relative = dir.path().join("admin.yml");
        std::fs::write(&relative, "routes:\n  rules:\n    - prefix: events\n      roles: [admin]\n").unwrap();

        for path in [unknown, relative, dir.path().join("missing.yaml")] {
            let args = ConfigArgs {
                config: Some(path.clone()),
                ..Default::default()
            };

            assert!(Settings::resolve(dir.path(), &args).is_err(), "config {:?}", path);
        }
    }

    #[test]
    fn prefix_match_values() {
        assert_eq!(parse_prefix_match("Longest"), Ok(PrefixMatch::Longest));
        assert_eq!(parse_prefix_match("first"), Ok(PrefixMatch::First));
        assert!(parse_prefix_match("shortest").is_err());
    }
}
