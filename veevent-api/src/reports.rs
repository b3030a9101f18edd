use chrono::NaiveDateTime;
use veevent_lib::ids;

use serde::{Serialize, Deserialize};

use crate::hal::{Links, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: ids::ReportId,
    #[serde(default)]
    pub report_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "veevent_lib::serde::option_date_time")]
    pub date: Option<NaiveDateTime>,

    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl Resource for Report {
    const NAME: &'static str = "reports";
    const EMBEDDED_KEYS: &'static [&'static str] = &[
        "reportResponses",
        "reports",
        "reportList",
    ];

    fn links(&self) -> &Links {
        &self.links
    }
}
