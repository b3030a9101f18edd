use veevent_lib::ids;

use crate::client::error::RequestError;
use crate::client::{ApiClient, read_optional_item, query_collection};
use crate::client::iterate::Pageable;
use crate::reports::Report;
use crate::{Payload, PageQuery};

pub struct QueryReports {
    query: PageQuery
}

impl QueryReports {
    pub fn new() -> Self {
        QueryReports {
            query: PageQuery::new()
        }
    }

    pub fn send(&self, client: &ApiClient) -> Result<Payload<Vec<Report>>, RequestError> {
        query_collection(client, "/reports", &self.query)
    }
}

impl Pageable for QueryReports {
    type Item = Report;

    fn query_mut(&mut self) -> &mut PageQuery {
        &mut self.query
    }

    fn send(&self, client: &ApiClient) -> Result<Payload<Vec<Report>>, RequestError> {
        QueryReports::send(self, client)
    }
}

pub struct RetrieveReport {
    id: ids::ReportId
}

impl RetrieveReport {
    pub fn id(id: ids::ReportId) -> Self {
        RetrieveReport { id }
    }

    pub fn send(self, client: &ApiClient) -> Result<Option<Report>, RequestError> {
        let res = client.get(format!("/reports/{}", self.id))?.send()?;

        read_optional_item(res)
    }
}
