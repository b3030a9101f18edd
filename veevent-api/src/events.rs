use chrono::NaiveDateTime;
use veevent_lib::ids;
use veevent_lib::validation;

use serde::{Serialize, Deserialize};

use crate::hal::{Links, Resource};
use crate::traits::{Validator, InvalidKeys};
use crate::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: ids::EventId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "veevent_lib::serde::option_date_time")]
    pub date: Option<NaiveDateTime>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub max_customers: Option<u32>,
    #[serde(default)]
    pub current_participants: Option<u32>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub is_trending: bool,
    #[serde(default)]
    pub is_invitation_only: bool,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl Resource for Event {
    const NAME: &'static str = "events";
    const EMBEDDED_KEYS: &'static [&'static str] = &[
        "eventSummaryResponses",
        "events",
        "eventResponses",
    ];

    fn links(&self) -> &Links {
        &self.links
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    pub name: String,
    #[serde(with = "veevent_lib::serde::date_time")]
    pub date: NaiveDateTime,
    pub address: String,
    pub place_id: ids::PlaceId,
    pub city_id: ids::CityId,
    pub max_customers: u32,
    pub price: f64,
    #[serde(default)]
    pub category_keys: Vec<ids::CategoryKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_invitation_only: bool,
}

impl Validator for CreateEvent {
    fn validate(&self) -> Result<(), ApiError> {
        let mut invalid = InvalidKeys::new();

        invalid.check(validation::name_valid(&self.name), "name")
            .check(!self.address.trim().is_empty(), "address")
            .check(self.max_customers > 0, "maxCustomers")
            .check(self.price >= 0.0, "price")
            .check(self.category_keys.iter().all(|k| validation::key_valid(k)), "categoryKeys");

        invalid.finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "veevent_lib::serde::option_date_time")]
    pub date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_customers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_trending: Option<bool>,
}

impl Validator for UpdateEvent {
    fn validate(&self) -> Result<(), ApiError> {
        let mut invalid = InvalidKeys::new();

        if let Some(name) = &self.name {
            invalid.check(validation::name_valid(name), "name");
        }

        if let Some(max) = self.max_customers {
            invalid.check(max > 0, "maxCustomers");
        }

        if let Some(price) = self.price {
            invalid.check(price >= 0.0, "price");
        }

        invalid.finish()
    }

    fn has_work(&self) -> bool {
        self.name.is_some() ||
            self.date.is_some() ||
            self.description.is_some() ||
            self.max_customers.is_some() ||
            self.price.is_some() ||
            self.status.is_some() ||
            self.is_trending.is_some()
    }
}
