use reqwest::Method;

use crate::client::error::RequestError;
use crate::client::{ApiClient, read_item, read_optional_item, query_collection};
use crate::client::iterate::Pageable;
use crate::categories::{Category, CreateCategory as CreateCategoryBody};
use crate::{Validator, Payload, PageQuery};

pub struct QueryCategories {
    query: PageQuery
}

impl QueryCategories {
    pub fn new() -> Self {
        QueryCategories {
            query: PageQuery::new()
        }
    }

    pub fn send(&self, client: &ApiClient) -> Result<Payload<Vec<Category>>, RequestError> {
        query_collection(client, "/categories", &self.query)
    }
}

impl Pageable for QueryCategories {
    type Item = Category;

    fn query_mut(&mut self) -> &mut PageQuery {
        &mut self.query
    }

    fn send(&self, client: &ApiClient) -> Result<Payload<Vec<Category>>, RequestError> {
        QueryCategories::send(self, client)
    }
}

pub struct RetrieveCategory {
    key: String
}

impl RetrieveCategory {
    pub fn key<K>(key: K) -> Self
    where
        K: Into<String>
    {
        RetrieveCategory { key: key.into() }
    }

    pub fn send(self, client: &ApiClient) -> Result<Option<Category>, RequestError> {
        let url = client.item_endpoint("/categories", &self.key)?;
        let res = client.request_url(Method::GET, url).send()?;

        read_optional_item(res)
    }
}

pub struct CreateCategory {
    body: CreateCategoryBody
}

impl CreateCategory {
    pub fn new<K, N>(key: K, name: N) -> Self
    where
        K: Into<String>,
        N: Into<String>,
    {
        CreateCategory {
            body: CreateCategoryBody {
                key: key.into(),
                name: name.into(),
                description: None,
                trending: false,
            }
        }
    }

    pub fn description<D>(&mut self, description: D) -> &mut Self
    where
        D: Into<String>
    {
        self.body.description = Some(description.into());
        self
    }

    pub fn trending(&mut self, trending: bool) -> &mut Self {
        self.body.trending = trending;
        self
    }

    pub fn send(self, client: &ApiClient) -> Result<Category, RequestError> {
        self.body.assert_ok()?;

        let res = client.post("/categories")?
            .json(&self.body)
            .send()?;

        read_item(res)
    }
}
