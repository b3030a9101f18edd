use veevent_lib::ids;

use serde::{Serialize, Deserialize};

use crate::hal::{Links, Resource};
use crate::users::User;
use crate::traits::Validator;
use crate::{ApiError, ApiErrorKind, Detail};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub id: ids::InvitationId,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,

    /// filled in by enrichment, the api only links to the participant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant: Option<User>,

    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl Resource for Invitation {
    const NAME: &'static str = "invitations";
    const EMBEDDED_KEYS: &'static [&'static str] = &[
        "invitationResponses",
        "invitations",
    ];

    fn links(&self) -> &Links {
        &self.links
    }
}

pub const STATUS_ACCEPTED: &str = "ACCEPTED";
pub const STATUS_REJECTED: &str = "REJECTED";
pub const STATUS_SENT: &str = "SENT";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateInvitation {
    pub status: String,
}

impl UpdateInvitation {
    pub fn accept() -> Self {
        UpdateInvitation { status: STATUS_ACCEPTED.to_owned() }
    }

    pub fn reject() -> Self {
        UpdateInvitation { status: STATUS_REJECTED.to_owned() }
    }
}

impl Validator for UpdateInvitation {
    fn validate(&self) -> Result<(), ApiError> {
        match self.status.as_str() {
            STATUS_ACCEPTED | STATUS_REJECTED | STATUS_SENT => Ok(()),
            _ => Err(ApiError::from((ApiErrorKind::ValidationFailed, Detail::with_key("status"))))
        }
    }
}
