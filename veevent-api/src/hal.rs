//! decoding of the HAL documents returned by the api.
//!
//! collections are wrapped in `_embedded.<key>` where the key depends on the
//! resource and on the backend version that produced it. every resource lists
//! the keys it accepts, in order, through [`Resource::EMBEDDED_KEYS`].

use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Payload, PageInfo};

#[derive(Debug, thiserror::Error)]
pub enum HalError {
    #[error("{resource} collection did not contain any of the keys {expected:?}, found {found:?}")]
    MissingEmbedded {
        resource: &'static str,
        expected: &'static [&'static str],
        found: Vec<String>,
    },

    #[error("{0} collection has an _embedded value that is not an object")]
    InvalidEmbedded(&'static str),

    #[error("{0} response is not a json object or array")]
    UnexpectedShape(&'static str),

    #[error("resource does not provide a \"{0}\" link")]
    MissingLink(&'static str),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templated: Option<bool>,
}

impl Link {
    pub fn new<H>(href: H) -> Self
    where
        H: Into<String>
    {
        Link {
            href: href.into(),
            templated: None
        }
    }

    /// the href without any uri template parameters
    pub fn resolved_href(&self) -> &str {
        match self.href.find('{') {
            Some(index) => &self.href[..index],
            None => &self.href
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkValue {
    One(Link),
    Many(Vec<Link>),
}

/// the `_links` object of a resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Links(BTreeMap<String, LinkValue>);

impl Links {
    pub fn new() -> Self {
        Links(BTreeMap::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert<R>(&mut self, rel: R, link: Link)
    where
        R: Into<String>
    {
        self.0.insert(rel.into(), LinkValue::One(link));
    }

    pub fn with<R, H>(mut self, rel: R, href: H) -> Self
    where
        R: Into<String>,
        H: Into<String>
    {
        self.insert(rel, Link::new(href));
        self
    }

    /// retrieves the first link of the given relation
    pub fn get(&self, rel: &str) -> Option<&Link> {
        match self.0.get(rel)? {
            LinkValue::One(link) => Some(link),
            LinkValue::Many(list) => list.first(),
        }
    }

    pub fn self_link(&self) -> Option<&Link> {
        self.get("self")
    }

    /// first relation from the list that is present
    pub fn first_of(&self, rels: &[&str]) -> Option<&Link> {
        rels.iter().find_map(|rel| self.get(rel))
    }

    /// the link used to modify a resource
    pub fn update_link(&self) -> Result<&Link, HalError> {
        self.first_of(&["patch", "update", "self"])
            .ok_or(HalError::MissingLink("patch"))
    }

    /// the link used to remove a resource
    pub fn delete_link(&self) -> Result<&Link, HalError> {
        self.first_of(&["delete", "self"])
            .ok_or(HalError::MissingLink("delete"))
    }
}

/// a type that the api returns as a HAL resource
pub trait Resource: DeserializeOwned {
    /// used when reporting decoding failures
    const NAME: &'static str;

    /// accepted `_embedded` keys in order of preference
    const EMBEDDED_KEYS: &'static [&'static str];

    fn links(&self) -> &Links;
}

/// decodes a collection response into its items and paging block.
///
/// a bare array is accepted as is. an object without `_embedded` is how the
/// api reports an empty collection.
pub fn decode_collection<R>(body: Value) -> Result<Payload<Vec<R>>, HalError>
where
    R: Resource
{
    match body {
        Value::Array(_) => Ok(Payload::new(serde_json::from_value(body)?)),
        Value::Object(mut map) => {
            let page: Option<PageInfo> = match map.remove("page") {
                Some(value) => Some(serde_json::from_value(value)?),
                None => None
            };

            let items = match map.remove("_embedded") {
                None => Vec::new(),
                Some(Value::Object(mut embedded)) => {
                    let found = R::EMBEDDED_KEYS.iter()
                        .find_map(|key| embedded.remove(*key));

                    match found {
                        Some(list) => serde_json::from_value(list)?,
                        None => {
                            return Err(HalError::MissingEmbedded {
                                resource: R::NAME,
                                expected: R::EMBEDDED_KEYS,
                                found: embedded.keys().cloned().collect(),
                            });
                        }
                    }
                },
                Some(_) => {
                    return Err(HalError::InvalidEmbedded(R::NAME));
                }
            };

            Ok(Payload::new(items).with_page(page))
        },
        _ => Err(HalError::UnexpectedShape(R::NAME))
    }
}

pub fn decode_item<R>(body: Value) -> Result<R, HalError>
where
    R: Resource
{
    if !body.is_object() {
        return Err(HalError::UnexpectedShape(R::NAME));
    }

    Ok(serde_json::from_value(body)?)
}
