use reqwest::Method;

use crate::client::error::RequestError;
use crate::client::{ApiClient, read_optional_item};
use crate::tickets::Ticket;

/// looks up a ticket by the key printed on it. unknown keys are not an error
pub struct VerifyTicket {
    key: String
}

impl VerifyTicket {
    pub fn key<K>(key: K) -> Self
    where
        K: Into<String>
    {
        VerifyTicket { key: key.into() }
    }

    pub fn send(self, client: &ApiClient) -> Result<Option<Ticket>, RequestError> {
        let url = client.item_endpoint("/tickets/verify", self.key.trim())?;
        let res = client.request_url(Method::GET, url).send()?;

        read_optional_item(res)
    }
}
