//! the signed in state of the admin application. the token lives in a cookie
//! jar scoped to the api origin and the profile of the user is cached in the
//! local storage file. both are read again on every start.

use std::path::{Path, PathBuf};

use reqwest::Url;
use reqwest_cookie_store::CookieStore;
use tokio::sync::broadcast;
use veevent_api::users::User;
use veevent_lib::{RolePolicy, SessionView};

use crate::storage::{self, LocalStorage, StorageError};

pub const TOKEN_COOKIE: &str = "token";

/// seven days
pub const TOKEN_MAX_AGE: u64 = 60 * 60 * 24 * 7;

const EXPIRED_TOKEN: &str = "token=; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("role \"{role}\" is not authorized to use the admin application")]
    RoleDenied {
        role: String,
    },

    #[error("the token provided is empty or not usable in a cookie")]
    InvalidToken,

    #[error("failed to access cookie file \"{}\": {source}", path.display())]
    CookieIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cookie file \"{}\" is invalid: {message}", path.display())]
    CookieFile {
        path: PathBuf,
        message: String,
    },

    #[error("the token cookie was rejected: {0}")]
    Cookie(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to serialize user profile: {0}")]
    Json(#[from] serde_json::Error),
}

/// sent whenever the signed in state changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    LoggedIn,
    LoggedOut,
}

pub struct Session {
    origin: Url,
    cookie_file: PathBuf,
    cookies: CookieStore,
    storage: LocalStorage,
    user: Option<User>,
    loading: bool,
    events: broadcast::Sender<AuthEvent>,
}

impl Session {
    /// opens the cookie jar and storage files and rehydrates the session
    pub fn open<C, S>(origin: Url, cookie_file: C, storage_file: S) -> Result<Self, SessionError>
    where
        C: Into<PathBuf>,
        S: Into<PathBuf>,
    {
        let (events, _) = broadcast::channel(16);

        let mut session = Session {
            origin,
            cookie_file: cookie_file.into(),
            cookies: CookieStore::default(),
            storage: LocalStorage::load(storage_file)?,
            user: None,
            loading: true,
            events,
        };

        session.rehydrate()?;

        Ok(session)
    }

    fn rehydrate(&mut self) -> Result<(), SessionError> {
        self.loading = true;
        self.cookies = load_cookies(&self.cookie_file)?;

        let cached = self.storage.get_item(storage::USER_KEY)
            .map(|v| serde_json::from_str::<User>(v));

        self.user = match cached {
            Some(Ok(user)) => Some(user),
            Some(Err(err)) => {
                tracing::warn!("dropping invalid cached profile: {}", err);

                self.storage.remove_item(storage::USER_KEY);
                None
            },
            None => None
        };

        self.loading = false;

        tracing::debug!(
            "session loaded. token: {} user: {:?} stored keys: {}",
            self.token().is_some(),
            self.user.as_ref().map(|u| u.id),
            self.storage.len()
        );

        Ok(())
    }

    fn host(&self) -> &str {
        self.origin.host_str().unwrap_or_default()
    }

    pub fn token(&self) -> Option<&str> {
        self.cookies.get(self.host(), "/", TOKEN_COOKIE)
            .map(|cookie| cookie.value())
            .filter(|value| !value.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            token: self.token(),
            role: self.user.as_ref().map(|u| u.role.as_str()),
            loading: self.loading,
        }
    }

    pub fn theme(&self) -> Option<&str> {
        self.storage.get_item(storage::THEME_KEY)
    }

    pub fn set_theme<T>(&mut self, theme: T) -> Result<(), SessionError>
    where
        T: Into<String>
    {
        self.storage.set_item(storage::THEME_KEY, theme);
        self.storage.save()?;

        Ok(())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    /// stores a freshly issued token and the profile it belongs to. the role
    /// is checked first and nothing is stored when it is not allowed
    pub fn establish(
        &mut self,
        token: &str,
        user: User,
        policy: &RolePolicy
    ) -> Result<(), SessionError> {
        if !policy.is_permitted(&user.role) {
            tracing::info!("login refused for user {} with role \"{}\"", user.id, user.role);

            return Err(SessionError::RoleDenied {
                role: user.role
            });
        }

        if token.is_empty() || token.contains(|c: char| c == ';' || c == ',' || c.is_whitespace()) {
            return Err(SessionError::InvalidToken);
        }

        let profile = serde_json::to_string(&user)?;

        self.clear_state();

        let cookie = format!(
            "{}={}; Path=/; Max-Age={}; SameSite=Lax",
            TOKEN_COOKIE,
            token,
            TOKEN_MAX_AGE
        );

        self.cookies.parse(&cookie, &self.origin)
            .map_err(|err| SessionError::Cookie(err.to_string()))?;
        self.storage.set_item(storage::USER_KEY, profile);

        self.persist()?;

        tracing::info!("logged in as user {} ({})", user.id, user.role);

        self.user = Some(user);

        let _ = self.events.send(AuthEvent::LoggedIn);

        Ok(())
    }

    /// replaces the cached profile after the user changed it. ignored when
    /// nobody is signed in
    pub fn store_profile(&mut self, user: User) -> Result<(), SessionError> {
        if !self.is_authenticated() {
            return Ok(());
        }

        self.storage.set_item(storage::USER_KEY, serde_json::to_string(&user)?);
        self.storage.save()?;
        self.user = Some(user);

        Ok(())
    }

    /// expires the token cookie and drops every stored key except the theme.
    /// calling it without a session is fine
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.clear_state();
        self.persist()?;

        tracing::info!("logged out");

        let _ = self.events.send(AuthEvent::LoggedOut);

        Ok(())
    }

    fn clear_state(&mut self) {
        if let Err(err) = self.cookies.parse(EXPIRED_TOKEN, &self.origin) {
            tracing::debug!("no token cookie to expire: {}", err);
        }

        let host = self.host().to_owned();
        self.cookies.remove(&host, "/", TOKEN_COOKIE);

        self.storage.retain_keys(&[storage::THEME_KEY]);
        self.user = None;
    }

    fn persist(&self) -> Result<(), SessionError> {
        save_cookies(&self.cookie_file, &self.cookies)?;
        self.storage.save()?;

        Ok(())
    }
}

fn load_cookies(path: &Path) -> Result<CookieStore, SessionError> {
    let exists = path.try_exists().map_err(|source| SessionError::CookieIo {
        path: path.to_owned(),
        source
    })?;

    if !exists {
        return Ok(CookieStore::default());
    }

    let file = std::fs::OpenOptions::new()
        .read(true)
        .open(path)
        .map_err(|source| SessionError::CookieIo {
            path: path.to_owned(),
            source
        })?;
    let reader = std::io::BufReader::new(file);

    CookieStore::load_json(reader).map_err(|e| SessionError::CookieFile {
        path: path.to_owned(),
        message: e.to_string(),
    })
}

fn save_cookies(path: &Path, store: &CookieStore) -> Result<(), SessionError> {
    let file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|source| SessionError::CookieIo {
            path: path.to_owned(),
            source
        })?;
    let mut writer = std::io::BufWriter::new(file);

    store.save_json(&mut writer).map_err(|e| SessionError::CookieFile {
        path: path.to_owned(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    struct Files {
        _dir: tempfile::TempDir,
        cookies: PathBuf,
        storage: PathBuf,
    }

    fn files() -> Files {
        let dir = tempfile::tempdir().unwrap();
        let cookies = dir.path().join("cookies.json");
        let storage = dir.path().join("storage.json");

        Files { _dir: dir, cookies, storage }
    }

    fn origin() -> Url {
        Url::parse("http://localhost:8090/api/v1/").unwrap()
    }

    fn open(files: &Files) -> Session {
        Session::open(origin(), &files.cookies, &files.storage).unwrap()
    }

    fn user(role: &str) -> User {
        serde_json::from_value(json!({
            "id": 7,
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@veevent.com",
            "role": role,
            "socials": "[\"twitter\",\"insta\"]"
        })).unwrap()
    }

    #[test]
    fn denied_roles_store_nothing() {
        let files = files();
        let policy = RolePolicy::default();

        for role in ["user", "guest", ""] {
            let mut session = open(&files);
            let result = session.establish("abc.def", user(role), &policy);

            assert!(
                matches!(result, Err(SessionError::RoleDenied { .. })),
                "role {:?} should be denied",
                role
            );
            assert_eq!(session.token(), None);
            assert!(session.user().is_none());

            let reloaded = open(&files);
            assert_eq!(reloaded.token(), None);
            assert!(reloaded.user().is_none());
        }

        assert!(!files.storage.exists());
    }

    #[test]
    fn profile_survives_reload() {
        let files = files();
        let mut session = open(&files);
        let mut events = session.subscribe();

        session.establish("abc.def", user("Admin"), &RolePolicy::default()).unwrap();

        assert_eq!(events.try_recv().unwrap(), AuthEvent::LoggedIn);
        assert_eq!(session.token(), Some("abc.def"));

        let reloaded = open(&files);
        let cached = reloaded.user().unwrap();

        assert_eq!(reloaded.token(), Some("abc.def"));
        assert_eq!(cached.id, 7);
        assert_eq!(cached.socials, vec![String::from("twitter"), String::from("insta")]);

        let view = reloaded.view();
        assert!(view.is_authenticated());
        assert_eq!(view.role, Some("Admin"));
        assert!(!view.loading);
    }

    #[test]
    fn logout_twice_keeps_theme() {
        let files = files();
        let mut session = open(&files);

        session.set_theme("dark").unwrap();
        session.establish("abc.def", user("organizer"), &RolePolicy::default()).unwrap();

        session.logout().unwrap();
        session.logout().unwrap();

        assert_eq!(session.token(), None);
        assert!(session.user().is_none());
        assert_eq!(session.theme(), Some("dark"));

        let reloaded = open(&files);
        assert_eq!(reloaded.token(), None);
        assert!(reloaded.user().is_none());
        assert_eq!(reloaded.theme(), Some("dark"));
    }

    #[test]
    fn new_login_replaces_previous() {
        let files = files();
        let mut session = open(&files);
        let policy = RolePolicy::default();

        session.establish("first", user("admin"), &policy).unwrap();
        session.establish("second", user("authservice"), &policy).unwrap();

        assert_eq!(session.token(), Some("second"));
        assert_eq!(session.user().map(|u| u.role.as_str()), Some("authservice"));
    }

    #[test]
    fn invalid_cached_profile_is_dropped() {
        let files = files();

        std::fs::write(&files.storage, r#"{"user": "not json", "theme": "light"}"#).unwrap();

        let session = open(&files);

        assert!(session.user().is_none());
        assert_eq!(session.theme(), Some("light"));
    }

    #[test]
    fn unusable_token_is_rejected() {
        let files = files();
        let mut session = open(&files);

        for token in ["", "a b", "a;b"] {
            assert!(matches!(
                session.establish(token, user("admin"), &RolePolicy::default()),
                Err(SessionError::InvalidToken)
            ));
        }

        assert_eq!(session.token(), None);
    }
}
