use veevent_lib::ids;

use crate::client::error::RequestError;
use crate::client::{ApiClient, read_item, read_optional_item, query_collection};
use crate::client::iterate::Pageable;
use crate::users::{User, UpdateUser};
use crate::{Validator, Payload, PageQuery};

/// the profile of the user the token belongs to
pub struct RetrieveMe {}

impl RetrieveMe {
    pub fn new() -> Self {
        RetrieveMe {}
    }

    pub fn send(self, client: &ApiClient) -> Result<User, RequestError> {
        let res = client.get("/users/me")?.send()?;

        read_item(res)
    }
}

pub struct UpdateMe {
    body: UpdateUser
}

impl UpdateMe {
    pub fn new(body: UpdateUser) -> Self {
        UpdateMe { body }
    }

    pub fn send(self, client: &ApiClient) -> Result<User, RequestError> {
        self.body.assert_ok()?;

        let res = client.patch("/users/me")?
            .json(&self.body)
            .send()?;

        read_item(res)
    }
}

pub struct QueryUsers {
    query: PageQuery
}

impl QueryUsers {
    pub fn new() -> Self {
        QueryUsers {
            query: PageQuery::new()
        }
    }

    pub fn send(&self, client: &ApiClient) -> Result<Payload<Vec<User>>, RequestError> {
        query_collection(client, "/users", &self.query)
    }
}

impl Pageable for QueryUsers {
    type Item = User;

    fn query_mut(&mut self) -> &mut PageQuery {
        &mut self.query
    }

    fn send(&self, client: &ApiClient) -> Result<Payload<Vec<User>>, RequestError> {
        QueryUsers::send(self, client)
    }
}

pub struct RetrieveUser {
    id: ids::UserId
}

impl RetrieveUser {
    pub fn id(id: ids::UserId) -> Self {
        RetrieveUser { id }
    }

    pub fn send(self, client: &ApiClient) -> Result<Option<User>, RequestError> {
        let res = client.get(format!("/users/{}", self.id))?.send()?;

        read_optional_item(res)
    }
}
