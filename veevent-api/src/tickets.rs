use veevent_lib::ids;

use serde::{Serialize, Deserialize};

use crate::hal::{Links, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: ids::TicketId,
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub unit_price: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,

    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl Ticket {
    pub fn is_valid(&self) -> bool {
        matches!(self.status.as_deref(), Some(s) if s.eq_ignore_ascii_case("valid"))
    }
}

impl Resource for Ticket {
    const NAME: &'static str = "tickets";
    const EMBEDDED_KEYS: &'static [&'static str] = &[
        "ticketResponses",
        "tickets",
    ];

    fn links(&self) -> &Links {
        &self.links
    }
}
