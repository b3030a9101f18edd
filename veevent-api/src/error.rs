use http::StatusCode;
use serde::{Serialize, Deserialize};
use strum::{AsRefStr as StrumAsRefStr};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq,
    StrumAsRefStr,
    Serialize, Deserialize
)]
pub enum ApiErrorKind {
    BadRequest,
    Unauthenticated,
    PermissionDenied,
    NotFound,
    Conflict,
    InternalFailure,

    /// a status that has no dedicated message
    Unexpected,

    /// rejected by the client before a request was sent
    ValidationFailed,
    NoWork,
}

impl ApiErrorKind {
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::BAD_REQUEST => ApiErrorKind::BadRequest,
            StatusCode::UNAUTHORIZED => ApiErrorKind::Unauthenticated,
            StatusCode::FORBIDDEN => ApiErrorKind::PermissionDenied,
            StatusCode::NOT_FOUND => ApiErrorKind::NotFound,
            StatusCode::CONFLICT => ApiErrorKind::Conflict,
            StatusCode::INTERNAL_SERVER_ERROR => ApiErrorKind::InternalFailure,
            _ => ApiErrorKind::Unexpected,
        }
    }

    /// the message shown to a user for this kind, None when the kind has no
    /// fixed message
    pub fn human_message(&self) -> Option<&'static str> {
        match self {
            ApiErrorKind::BadRequest => Some("the request was rejected, check the submitted data"),
            ApiErrorKind::Unauthenticated => Some("your session is invalid or has expired, please log in again"),
            ApiErrorKind::PermissionDenied => Some("you do not have permission to perform this action"),
            ApiErrorKind::NotFound => Some("the requested resource was not found"),
            ApiErrorKind::Conflict => Some("conflict: the resource is still referenced by other data and cannot be changed or removed"),
            ApiErrorKind::InternalFailure => Some("the server encountered an internal error, try again later"),
            ApiErrorKind::ValidationFailed => Some("the provided data is invalid"),
            ApiErrorKind::NoWork => Some("nothing to update"),
            ApiErrorKind::Unexpected => None,
        }
    }
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.as_ref(), f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Detail {
    Keys(Vec<String>),
}

impl Detail {
    pub fn with_key(key: impl Into<String>) -> Self {
        Detail::Keys(vec![key.into()])
    }
}

impl std::fmt::Display for Detail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Detail::Keys(list) => {
                let mut iter = list.iter();

                if let Some(first) = iter.next() {
                    write!(f, "{}", first)?;

                    for key in iter {
                        write!(f, ",{}", key)?;
                    }
                }
            },
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    kind: ApiErrorKind,
    status: Option<u16>,
    detail: Option<Detail>,
    body: Option<String>,
}

impl ApiError {
    /// creates an error from a non success response
    pub fn from_response<B>(status: u16, body: B) -> Self
    where
        B: Into<String>
    {
        let kind = StatusCode::from_u16(status)
            .map(ApiErrorKind::from_status)
            .unwrap_or(ApiErrorKind::Unexpected);

        ApiError {
            kind,
            status: Some(status),
            detail: None,
            body: Some(body.into()),
        }
    }

    pub fn kind(&self) -> &ApiErrorKind {
        &self.kind
    }

    pub fn detail(&self) -> Option<&Detail> {
        self.detail.as_ref()
    }

    /// the raw response body, kept for logging
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind.human_message() {
            Some(msg) => write!(f, "{}", msg)?,
            None => {
                write!(f, "request failed with status {}", self.status.unwrap_or_default())?;

                if let Some(body) = &self.body {
                    write!(f, ": {}", body)?;
                }
            }
        }

        if let Some(detail) = &self.detail {
            write!(f, " ({})", detail)?;
        }

        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl From<ApiErrorKind> for ApiError {
    fn from(kind: ApiErrorKind) -> Self {
        ApiError {
            kind,
            status: None,
            detail: None,
            body: None
        }
    }
}

impl From<(ApiErrorKind, Detail)> for ApiError {
    fn from((kind, detail): (ApiErrorKind, Detail)) -> Self {
        ApiError {
            kind,
            status: None,
            detail: Some(detail),
            body: None
        }
    }
}
