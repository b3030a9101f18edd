use veevent_lib::ids;
use veevent_lib::validation;

use serde::{Serialize, Deserialize};

use crate::hal::{Links, Resource};
use crate::traits::{Validator, InvalidKeys};
use crate::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: ids::PlaceId,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city_name: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub banner_url: Option<String>,

    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl Resource for Place {
    const NAME: &'static str = "places";
    const EMBEDDED_KEYS: &'static [&'static str] = &[
        "placeResponses",
        "places",
        "placeSummaryResponses",
    ];

    fn links(&self) -> &Links {
        &self.links
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlace {
    pub name: String,
    pub address: String,
    pub city_id: ids::CityId,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Validator for CreatePlace {
    fn validate(&self) -> Result<(), ApiError> {
        let mut invalid = InvalidKeys::new();

        invalid.check(validation::name_valid(&self.name), "name")
            .check(!self.address.trim().is_empty(), "address");

        invalid.finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Validator for UpdatePlace {
    fn validate(&self) -> Result<(), ApiError> {
        let mut invalid = InvalidKeys::new();

        if let Some(name) = &self.name {
            invalid.check(validation::name_valid(name), "name");
        }

        invalid.finish()
    }

    fn has_work(&self) -> bool {
        self.name.is_some() || self.address.is_some() || self.kind.is_some() || self.description.is_some()
    }
}
