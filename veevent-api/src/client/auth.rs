use crate::client::error::RequestError;
use crate::client::{ApiClient, read_json};
use crate::auth::{Credentials, Authenticated};
use crate::Validator;

pub struct Authenticate {
    body: Credentials
}

impl Authenticate {
    pub fn credentials<E, P>(email: E, password: P) -> Self
    where
        E: Into<String>,
        P: Into<String>,
    {
        Authenticate {
            body: Credentials {
                email: email.into(),
                password: password.into(),
            }
        }
    }

    pub fn send(self, client: &ApiClient) -> Result<Authenticated, RequestError> {
        self.body.validate()?;

        let res = client.post("/auth/authenticate")?
            .json(&self.body)
            .send()?;

        read_json(res)
    }
}
