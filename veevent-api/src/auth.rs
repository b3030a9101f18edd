use veevent_lib::validation;

use serde::{Serialize, Deserialize};
use url::Url;

use crate::users::User;
use crate::traits::{Validator, InvalidKeys};
use crate::ApiError;

/// query parameter the identity provider uses to hand back the token
pub const CALLBACK_TOKEN_PARAM: &str = "token";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Validator for Credentials {
    fn validate(&self) -> Result<(), ApiError> {
        let mut invalid = InvalidKeys::new();

        invalid.check(validation::email_valid(&self.email), "email")
            .check(!self.password.is_empty(), "password");

        invalid.finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Authenticated {
    pub token: String,

    /// older versions of the api only return the token
    #[serde(default)]
    pub user: Option<User>,
}

/// pulls the token out of an identity callback url. relative urls such as
/// `/auth/callback?token=...` are accepted
pub fn token_from_callback(callback: &str) -> Option<String> {
    let parsed = match Url::parse(callback) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse("http://localhost/")
            .and_then(|base| base.join(callback))
            .ok()?,
        Err(_) => return None,
    };

    parsed.query_pairs()
        .find(|(key, _)| key == CALLBACK_TOKEN_PARAM)
        .map(|(_, value)| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn callback_token() {
        let valid = [
            ("http://localhost:3000/auth/callback?token=abc.def.ghi", "abc.def.ghi"),
            ("/auth/callback?state=x&token=abc%2Bdef", "abc+def"),
        ];

        for (given, expected) in valid {
            assert_eq!(token_from_callback(given).as_deref(), Some(expected), "callback {:?}", given);
        }

        let invalid = [
            "http://localhost:3000/auth/callback",
            "/auth/callback?token=",
            "/auth/callback?tok=abc",
        ];

        for given in invalid {
            assert_eq!(token_from_callback(given), None, "callback {:?}", given);
        }
    }

    #[test]
    fn credentials_validation() {
        let creds = Credentials {
            email: String::from("admin@veevent.com"),
            password: String::from("secret"),
        };

        assert!(creds.assert_ok().is_ok());

        let creds = Credentials {
            email: String::from("admin"),
            password: String::new(),
        };

        assert!(creds.assert_ok().is_err());
    }

    #[test]
    fn authenticated_without_user() {
        let auth: Authenticated = serde_json::from_str(r#"{"token":"t0k"}"#).unwrap();

        assert_eq!(auth.token, "t0k");
        assert!(auth.user.is_none());
    }
}
