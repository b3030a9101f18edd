use veevent_lib::ids;
use veevent_lib::validation;

use serde::{Serialize, Deserialize};

use crate::hal::{Links, Resource};
use crate::traits::{Validator, InvalidKeys};
use crate::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: ids::CityId,
    pub name: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub banner_url: Option<String>,

    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl Resource for City {
    const NAME: &'static str = "cities";
    const EMBEDDED_KEYS: &'static [&'static str] = &[
        "cityResponses",
        "cities",
        "citySummaryResponses",
    ];

    fn links(&self) -> &Links {
        &self.links
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCity {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

fn coordinates_valid(latitude: Option<f64>, longitude: Option<f64>) -> (bool, bool) {
    (
        latitude.map(|v| (-90.0..=90.0).contains(&v)).unwrap_or(true),
        longitude.map(|v| (-180.0..=180.0).contains(&v)).unwrap_or(true),
    )
}

impl Validator for CreateCity {
    fn validate(&self) -> Result<(), ApiError> {
        let mut invalid = InvalidKeys::new();
        let (lat, lon) = coordinates_valid(self.latitude, self.longitude);

        invalid.check(validation::name_valid(&self.name), "name")
            .check(lat, "latitude")
            .check(lon, "longitude");

        invalid.finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Validator for UpdateCity {
    fn validate(&self) -> Result<(), ApiError> {
        let mut invalid = InvalidKeys::new();
        let (lat, lon) = coordinates_valid(self.latitude, self.longitude);

        if let Some(name) = &self.name {
            invalid.check(validation::name_valid(name), "name");
        }

        invalid.check(lat, "latitude").check(lon, "longitude");
        invalid.finish()
    }

    fn has_work(&self) -> bool {
        self.name.is_some() ||
            self.latitude.is_some() ||
            self.longitude.is_some() ||
            self.region.is_some() ||
            self.content.is_some()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn coordinates_are_bounded() {
        let city = CreateCity {
            name: String::from("Toulouse"),
            latitude: Some(43.6),
            longitude: Some(1.44),
            ..CreateCity::default()
        };

        assert!(city.assert_ok().is_ok());

        let city = CreateCity {
            name: String::from("Nowhere"),
            latitude: Some(120.0),
            ..CreateCity::default()
        };

        let err = city.assert_ok().unwrap_err();
        assert_eq!(err.detail().map(|d| d.to_string()).as_deref(), Some("latitude"));
    }
}
