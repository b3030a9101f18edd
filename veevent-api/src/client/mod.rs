use reqwest::Url;
use reqwest::blocking::{RequestBuilder, Response};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ApiError;
use crate::hal::{self, Resource};
use crate::{Payload, PageQuery};

pub mod error;
pub mod auth;
pub mod users;
pub mod categories;
pub mod cities;
pub mod places;
pub mod events;
pub mod reports;
pub mod invitations;
pub mod tickets;
pub mod links;
pub mod iterate;

use error::{ApiClientError, RequestError};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8090/api/v1/";

pub struct Info {
    pub url: Url
}

pub struct ApiClient {
    pub(crate) client: reqwest::blocking::Client,
    pub(crate) info: Info,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder {
            url: None,
            agent: None,
            token: None,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.info.url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// sets or clears the bearer token sent with every request
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token.filter(|t| !t.is_empty());
    }

    /// resolves an api path against the base url. the path is always treated
    /// as relative to the base so a base with a path prefix is kept
    pub fn endpoint<U>(&self, path: U) -> Result<Url, RequestError>
    where
        U: AsRef<str>
    {
        let relative = path.as_ref().trim_start_matches('/');

        Ok(self.info.url.join(relative)?)
    }

    /// resolves a collection path followed by a single item segment. the
    /// segment is percent-encoded so it always stays inside the collection
    pub fn item_endpoint<U>(&self, collection: U, segment: &str) -> Result<Url, RequestError>
    where
        U: AsRef<str>
    {
        if segment.is_empty() || segment == "." || segment == ".." {
            return Err(RequestError::InvalidSegment(segment.to_owned()));
        }

        let mut url = self.endpoint(collection)?;

        url.path_segments_mut()
            .map_err(|_| RequestError::InvalidSegment(segment.to_owned()))?
            .pop_if_empty()
            .push(segment);

        Ok(url)
    }

    /// the token is only sent to the origin of the base url
    pub(crate) fn request_url(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!("{} {}", method, url);

        let same_origin = url.origin() == self.info.url.origin();
        let builder = self.client.request(method, url);

        match &self.token {
            Some(token) if same_origin => builder.bearer_auth(token),
            Some(_) => {
                tracing::debug!("token withheld from foreign origin");

                builder
            },
            None => builder
        }
    }

    pub(crate) fn request<U>(&self, method: Method, path: U) -> Result<RequestBuilder, RequestError>
    where
        U: AsRef<str>
    {
        let url = self.endpoint(path)?;

        Ok(self.request_url(method, url))
    }

    pub(crate) fn get<U>(&self, path: U) -> Result<RequestBuilder, RequestError>
    where
        U: AsRef<str>
    {
        self.request(Method::GET, path)
    }

    pub(crate) fn post<U>(&self, path: U) -> Result<RequestBuilder, RequestError>
    where
        U: AsRef<str>
    {
        self.request(Method::POST, path)
    }

    pub(crate) fn patch<U>(&self, path: U) -> Result<RequestBuilder, RequestError>
    where
        U: AsRef<str>
    {
        self.request(Method::PATCH, path)
    }

    /// builds a request for an href taken from a HAL link. absolute hrefs are
    /// used as is, relative ones resolve against the base url
    pub(crate) fn follow(&self, method: Method, href: &str) -> Result<RequestBuilder, RequestError> {
        let url = match Url::parse(href) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => self.endpoint(href)?,
            Err(err) => return Err(RequestError::Url(err)),
        };

        Ok(self.request_url(method, url))
    }
}

/// turns a non success response into an error carrying the status and body
pub(crate) fn check_status(res: Response) -> Result<Response, RequestError> {
    let status = res.status();

    if status.is_success() {
        return Ok(res);
    }

    let body = res.text()?;

    tracing::debug!("request failed {} {}", status, body);

    Err(RequestError::Api(ApiError::from_response(status.as_u16(), body)))
}

pub(crate) fn read_json<T>(res: Response) -> Result<T, RequestError>
where
    T: DeserializeOwned
{
    Ok(check_status(res)?.json()?)
}

pub(crate) fn read_collection<R>(res: Response) -> Result<Payload<Vec<R>>, RequestError>
where
    R: Resource
{
    let body: Value = check_status(res)?.json()?;

    Ok(hal::decode_collection(body)?)
}

pub(crate) fn read_item<R>(res: Response) -> Result<R, RequestError>
where
    R: Resource
{
    let body: Value = check_status(res)?.json()?;

    Ok(hal::decode_item(body)?)
}

/// same as read_item but a 404 is not an error
pub(crate) fn read_optional_item<R>(res: Response) -> Result<Option<R>, RequestError>
where
    R: Resource
{
    if res.status() == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }

    read_item(res).map(Some)
}

pub(crate) fn query_collection<R>(
    client: &ApiClient,
    path: &str,
    query: &PageQuery
) -> Result<Payload<Vec<R>>, RequestError>
where
    R: Resource
{
    let res = client.get(path)?
        .query(&query.pairs())
        .send()?;

    read_collection(res)
}

pub struct ApiClientBuilder {
    url: Option<String>,
    agent: Option<String>,
    token: Option<String>,
}

impl ApiClientBuilder {
    pub fn base_url<U>(&mut self, url: U) -> &mut Self
    where
        U: Into<String>
    {
        self.url = Some(url.into());
        self
    }

    pub fn user_agent<U>(&mut self, user_agent: U) -> &mut Self
    where
        U: Into<String>
    {
        self.agent = Some(user_agent.into());
        self
    }

    pub fn token(&mut self, token: Option<String>) -> &mut Self {
        self.token = token;
        self
    }

    pub fn build(self) -> Result<ApiClient, ApiClientError> {
        let user_agent = self.agent.unwrap_or("veevent-admin/0.1.0".into());
        let url = normalize_base(self.url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(ApiClientError::Reqwest)?;

        Ok(ApiClient {
            client,
            info: Info { url },
            token: self.token.filter(|t| !t.is_empty()),
        })
    }
}

/// parses the base url and makes sure its path ends with a slash so joins
/// keep any path prefix
pub fn normalize_base(given: &str) -> Result<Url, ApiClientError> {
    let mut url = Url::parse(given).map_err(ApiClientError::InvalidUrl)?;

    if url.cannot_be_a_base() {
        return Err(ApiClientError::NotABase(given.to_owned()));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn base_keeps_path_prefix() {
        let mut builder = ApiClient::builder();
        builder.base_url("https://api.veevent.example/api/v1");

        let client = builder.build().unwrap();

        assert_eq!(client.base_url().as_str(), "https://api.veevent.example/api/v1/");
        assert_eq!(
            client.endpoint("/events").unwrap().as_str(),
            "https://api.veevent.example/api/v1/events"
        );
        assert_eq!(
            client.endpoint("users/me").unwrap().as_str(),
            "https://api.veevent.example/api/v1/users/me"
        );
    }

    #[test]
    fn invalid_base_is_rejected() {
        assert!(matches!(normalize_base("not a url"), Err(ApiClientError::InvalidUrl(_))));
        assert!(matches!(normalize_base("mailto:admin@veevent.com"), Err(ApiClientError::NotABase(_))));
    }

    #[test]
    fn item_segment_is_encoded() {
        let client = ApiClient::builder().build().unwrap();

        let valid = [
            ("music", "http://localhost:8090/api/v1/categories/music"),
            ("../users/1", "http://localhost:8090/api/v1/categories/..%2Fusers%2F1"),
            ("rock?x=1#top", "http://localhost:8090/api/v1/categories/rock%3Fx=1%23top"),
            ("live music", "http://localhost:8090/api/v1/categories/live%20music"),
        ];

        for (segment, expected) in valid {
            assert_eq!(
                client.item_endpoint("/categories", segment).unwrap().as_str(),
                expected,
                "segment {:?}",
                segment
            );
        }

        for segment in ["", ".", ".."] {
            assert!(
                matches!(client.item_endpoint("/categories", segment), Err(RequestError::InvalidSegment(_))),
                "segment {:?}",
                segment
            );
        }
    }

    #[test]
    fn token_stays_on_base_origin() {
        use reqwest::header::AUTHORIZATION;

        let mut builder = ApiClient::builder();
        builder.base_url("http://localhost:8090/api/v1/")
            .token(Some(String::from("abc.def")));

        let client = builder.build().unwrap();

        let authorization = |href: &str| {
            let request = client.follow(Method::GET, href).unwrap().build().unwrap();

            request.headers()
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };

        assert_eq!(authorization("http://localhost:8090/api/v1/users/3").as_deref(), Some("Bearer abc.def"));
        assert_eq!(authorization("users/3").as_deref(), Some("Bearer abc.def"));
        assert_eq!(authorization("http://localhost:9000/api/v1/users/3"), None);
        assert_eq!(authorization("https://localhost:8090/api/v1/users/3"), None);
        assert_eq!(authorization("http://cdn.veevent.example/users/3"), None);
    }

    #[test]
    fn empty_token_is_dropped() {
        let mut builder = ApiClient::builder();
        builder.token(Some(String::new()));

        let mut client = builder.build().unwrap();
        assert_eq!(client.token(), None);

        client.set_token(Some(String::from("abc")));
        assert_eq!(client.token(), Some("abc"));
    }
}
