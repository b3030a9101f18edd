use veevent_lib::ids;
use veevent_lib::serde::nested_option;
use veevent_lib::validation;

use serde::{Serialize, Deserialize};

use crate::hal::{Links, Resource};
use crate::traits::{Validator, InvalidKeys};
use crate::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: ids::UserId,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub pseudo: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub banner_url: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub note: Option<f64>,
    #[serde(default, deserialize_with = "veevent_lib::serde::socials")]
    pub socials: Vec<String>,

    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl User {
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name, &self.pseudo) {
            (Some(first), Some(last), _) => format!("{} {}", first, last),
            (_, _, Some(pseudo)) => pseudo.clone(),
            _ => self.email.clone().unwrap_or_else(|| format!("user {}", self.id))
        }
    }
}

impl Resource for User {
    const NAME: &'static str = "users";
    const EMBEDDED_KEYS: &'static [&'static str] = &[
        "userResponses",
        "users",
        "userSummaryResponses",
    ];

    fn links(&self) -> &Links {
        &self.links
    }
}

/// changes submitted for the current user or by an admin for another user.
/// only present fields are sent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pseudo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "nested_option", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nested_option", skip_serializing_if = "Option::is_none")]
    pub phone: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socials: Option<Vec<String>>,
}

impl Validator for UpdateUser {
    fn validate(&self) -> Result<(), ApiError> {
        let mut invalid = InvalidKeys::new();

        if let Some(pseudo) = &self.pseudo {
            invalid.check(validation::name_valid(pseudo), "pseudo");
        }

        if let Some(email) = &self.email {
            invalid.check(validation::email_valid(email), "email");
        }

        if let Some(role) = &self.role {
            invalid.check(!role.trim().is_empty(), "role");
        }

        invalid.finish()
    }

    fn has_work(&self) -> bool {
        self.first_name.is_some() ||
            self.last_name.is_some() ||
            self.pseudo.is_some() ||
            self.email.is_some() ||
            self.role.is_some() ||
            self.description.is_some() ||
            self.phone.is_some() ||
            self.socials.is_some()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn socials_string_is_normalized() {
        let user: User = serde_json::from_value(json!({
            "id": 7,
            "firstName": "Ana",
            "lastName": "Lopez",
            "role": "Admin",
            "socials": "[\"twitter\",\"insta\"]",
            "_links": {"self": {"href": "http://localhost/api/v1/users/7"}}
        })).unwrap();

        assert_eq!(user.socials, vec![String::from("twitter"), String::from("insta")]);
        assert_eq!(user.links.self_link().map(|l| l.href.as_str()), Some("http://localhost/api/v1/users/7"));
    }

    #[test]
    fn socials_missing_or_broken() {
        let missing: User = serde_json::from_value(json!({"id": 1, "role": "admin"})).unwrap();
        let null: User = serde_json::from_value(json!({"id": 1, "role": "admin", "socials": null})).unwrap();
        let broken: User = serde_json::from_value(json!({"id": 1, "role": "admin", "socials": "[twitter"})).unwrap();

        assert!(missing.socials.is_empty());
        assert!(null.socials.is_empty());
        assert!(broken.socials.is_empty());
    }

    #[test]
    fn serialized_user_reads_back_equal() {
        let user: User = serde_json::from_value(json!({
            "id": 3,
            "pseudo": "orga",
            "role": "organizer",
            "socials": "[\"x\"]"
        })).unwrap();

        let encoded = serde_json::to_string(&user).unwrap();
        let decoded: User = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, user);
        assert_eq!(decoded.socials, vec![String::from("x")]);
    }

    #[test]
    fn update_requires_work() {
        let update = UpdateUser::default();

        assert!(update.assert_ok().is_err());

        let update = UpdateUser {
            description: Some(None),
            ..UpdateUser::default()
        };

        assert!(update.assert_ok().is_ok());
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"description": null}));
    }

    #[test]
    fn update_validates_fields() {
        let update = UpdateUser {
            email: Some(String::from("not an email")),
            pseudo: Some(String::from(" padded")),
            ..UpdateUser::default()
        };

        let err = update.assert_ok().unwrap_err();

        assert_eq!(err.detail().map(|d| d.to_string()).as_deref(), Some("pseudo,email"));
    }
}
