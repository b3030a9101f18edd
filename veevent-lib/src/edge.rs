//! checks performed before the route guard sees a navigation.
//!
//! the edge only knows if a token cookie exists. it does not look at the
//! user or their role, that is left to [`crate::guard::RouteGuard`].

pub const LOGIN_PATH: &str = "/login";

/// paths that can be visited without a token
pub const PUBLIC_PATHS: [&str; 3] = [
    LOGIN_PATH,
    "/auth/callback",
    "/unauthorized",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeDecision {
    Continue,
    Redirect(String),
}

pub fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.iter().any(|public| {
        match path.strip_prefix(public) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
            None => false
        }
    })
}

pub fn check(path: &str, has_token: bool) -> EdgeDecision {
    if has_token || is_public(path) {
        EdgeDecision::Continue
    } else {
        tracing::debug!("edge redirect for {}", path);

        EdgeDecision::Redirect(LOGIN_PATH.to_owned())
    }
}

/// builds the login location that returns to the given path
pub fn login_redirect(path: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(path.as_bytes()).collect();

    format!("{}?redirect={}", LOGIN_PATH, encoded)
}

/// retrieves the return path from a login location
pub fn redirect_target(location: &str) -> Option<String> {
    let (_, query) = location.split_once('?')?;

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "redirect")
        .map(|(_, value)| value.into_owned())
        .filter(|value| value.starts_with('/') && !value.starts_with("//"))
}
