use veevent_lib::ids;

use crate::client::error::RequestError;
use crate::client::{ApiClient, read_item, read_optional_item, query_collection};
use crate::client::iterate::Pageable;
use crate::events::{Event, CreateEvent as CreateEventBody};
use crate::{Validator, Payload, PageQuery};

pub struct QueryEvents {
    query: PageQuery
}

impl QueryEvents {
    pub fn new() -> Self {
        QueryEvents {
            query: PageQuery::new()
        }
    }

    pub fn send(&self, client: &ApiClient) -> Result<Payload<Vec<Event>>, RequestError> {
        query_collection(client, "/events", &self.query)
    }
}

impl Pageable for QueryEvents {
    type Item = Event;

    fn query_mut(&mut self) -> &mut PageQuery {
        &mut self.query
    }

    fn send(&self, client: &ApiClient) -> Result<Payload<Vec<Event>>, RequestError> {
        QueryEvents::send(self, client)
    }
}

pub struct RetrieveEvent {
    id: ids::EventId
}

impl RetrieveEvent {
    pub fn id(id: ids::EventId) -> Self {
        RetrieveEvent { id }
    }

    pub fn send(self, client: &ApiClient) -> Result<Option<Event>, RequestError> {
        let res = client.get(format!("/events/{}", self.id))?.send()?;

        read_optional_item(res)
    }
}

pub struct CreateEvent {
    body: CreateEventBody
}

impl CreateEvent {
    pub fn new(body: CreateEventBody) -> Self {
        CreateEvent { body }
    }

    pub fn send(self, client: &ApiClient) -> Result<Event, RequestError> {
        self.body.assert_ok()?;

        let res = client.post("/events")?
            .json(&self.body)
            .send()?;

        read_item(res)
    }
}
