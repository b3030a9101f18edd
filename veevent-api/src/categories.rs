use veevent_lib::ids;
use veevent_lib::validation;

use serde::{Serialize, Deserialize};

use crate::hal::{Links, Resource};
use crate::traits::{Validator, InvalidKeys};
use crate::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub key: ids::CategoryKey,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub trending: bool,

    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl Resource for Category {
    const NAME: &'static str = "categories";
    const EMBEDDED_KEYS: &'static [&'static str] = &[
        "categories",
        "categoryResponses",
        "categoryList",
    ];

    fn links(&self) -> &Links {
        &self.links
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategory {
    pub key: ids::CategoryKey,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub trending: bool,
}

impl Validator for CreateCategory {
    fn validate(&self) -> Result<(), ApiError> {
        let mut invalid = InvalidKeys::new();

        invalid.check(validation::key_valid(&self.key), "key")
            .check(validation::name_valid(&self.name), "name");

        invalid.finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trending: Option<bool>,
}

impl Validator for UpdateCategory {
    fn validate(&self) -> Result<(), ApiError> {
        let mut invalid = InvalidKeys::new();

        if let Some(name) = &self.name {
            invalid.check(validation::name_valid(name), "name");
        }

        invalid.finish()
    }

    fn has_work(&self) -> bool {
        self.name.is_some() || self.description.is_some() || self.trending.is_some()
    }
}
