use veevent_lib::ids;

use crate::client::error::RequestError;
use crate::client::{ApiClient, read_item, read_optional_item, query_collection};
use crate::client::iterate::Pageable;
use crate::cities::{City, CreateCity as CreateCityBody};
use crate::{Validator, Payload, PageQuery};

pub struct QueryCities {
    query: PageQuery
}

impl QueryCities {
    pub fn new() -> Self {
        QueryCities {
            query: PageQuery::new()
        }
    }

    pub fn send(&self, client: &ApiClient) -> Result<Payload<Vec<City>>, RequestError> {
        query_collection(client, "/cities", &self.query)
    }
}

impl Pageable for QueryCities {
    type Item = City;

    fn query_mut(&mut self) -> &mut PageQuery {
        &mut self.query
    }

    fn send(&self, client: &ApiClient) -> Result<Payload<Vec<City>>, RequestError> {
        QueryCities::send(self, client)
    }
}

pub struct RetrieveCity {
    id: ids::CityId
}

impl RetrieveCity {
    pub fn id(id: ids::CityId) -> Self {
        RetrieveCity { id }
    }

    pub fn send(self, client: &ApiClient) -> Result<Option<City>, RequestError> {
        let res = client.get(format!("/cities/{}", self.id))?.send()?;

        read_optional_item(res)
    }
}

pub struct CreateCity {
    body: CreateCityBody
}

impl CreateCity {
    pub fn new(body: CreateCityBody) -> Self {
        CreateCity { body }
    }

    pub fn send(self, client: &ApiClient) -> Result<City, RequestError> {
        self.body.assert_ok()?;

        let res = client.post("/cities")?
            .json(&self.body)
            .send()?;

        read_item(res)
    }
}
