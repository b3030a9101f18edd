use crate::{ApiError, HalError};

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("invalid base url: {0}")]
    InvalidUrl(url::ParseError),

    #[error("base url cannot have paths joined to it: {0}")]
    NotABase(String),

    #[error("failed to create http client: {0}")]
    Reqwest(reqwest::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("failed to reach the api: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),

    #[error("unexpected response: {0}")]
    Hal(#[from] HalError),

    #[error("\"{0}\" cannot be used as a path segment")]
    InvalidSegment(String),
}

impl RequestError {
    pub fn as_api(self) -> Result<ApiError, RequestError> {
        match self {
            RequestError::Api(v) => Ok(v),
            other => Err(other)
        }
    }
}
