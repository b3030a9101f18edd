use veevent_lib::ids;

use crate::client::error::RequestError;
use crate::client::{ApiClient, read_item, read_optional_item, query_collection};
use crate::client::iterate::Pageable;
use crate::places::{Place, CreatePlace as CreatePlaceBody};
use crate::{Validator, Payload, PageQuery};

pub struct QueryPlaces {
    query: PageQuery
}

impl QueryPlaces {
    pub fn new() -> Self {
        QueryPlaces {
            query: PageQuery::new()
        }
    }

    pub fn send(&self, client: &ApiClient) -> Result<Payload<Vec<Place>>, RequestError> {
        query_collection(client, "/places", &self.query)
    }
}

impl Pageable for QueryPlaces {
    type Item = Place;

    fn query_mut(&mut self) -> &mut PageQuery {
        &mut self.query
    }

    fn send(&self, client: &ApiClient) -> Result<Payload<Vec<Place>>, RequestError> {
        QueryPlaces::send(self, client)
    }
}

pub struct RetrievePlace {
    id: ids::PlaceId
}

impl RetrievePlace {
    pub fn id(id: ids::PlaceId) -> Self {
        RetrievePlace { id }
    }

    pub fn send(self, client: &ApiClient) -> Result<Option<Place>, RequestError> {
        let res = client.get(format!("/places/{}", self.id))?.send()?;

        read_optional_item(res)
    }
}

pub struct CreatePlace {
    body: CreatePlaceBody
}

impl CreatePlace {
    pub fn new(body: CreatePlaceBody) -> Self {
        CreatePlace { body }
    }

    pub fn send(self, client: &ApiClient) -> Result<Place, RequestError> {
        self.body.assert_ok()?;

        let res = client.post("/places")?
            .json(&self.body)
            .send()?;

        read_item(res)
    }
}
