//! mutations that follow the links of a previously retrieved resource instead
//! of building urls on the client

use reqwest::Method;
use serde::Serialize;

use crate::client::error::RequestError;
use crate::client::{ApiClient, check_status, read_item};
use crate::hal::{Links, Resource};
use crate::Validator;

pub struct UpdateResource<B> {
    href: String,
    body: B,
}

impl<B> UpdateResource<B>
where
    B: Serialize + Validator
{
    /// uses the `patch` link of the resource, falling back to `self`
    pub fn from_links(links: &Links, body: B) -> Result<Self, RequestError> {
        let link = links.update_link()?;

        Ok(UpdateResource {
            href: link.resolved_href().to_owned(),
            body,
        })
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn send<R>(self, client: &ApiClient) -> Result<R, RequestError>
    where
        R: Resource
    {
        self.body.assert_ok()?;

        let res = client.follow(Method::PATCH, &self.href)?
            .json(&self.body)
            .send()?;

        read_item(res)
    }
}

pub struct DeleteResource {
    href: String,
}

impl DeleteResource {
    /// uses the `delete` link of the resource, falling back to `self`
    pub fn from_links(links: &Links) -> Result<Self, RequestError> {
        let link = links.delete_link()?;

        Ok(DeleteResource {
            href: link.resolved_href().to_owned(),
        })
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn send(self, client: &ApiClient) -> Result<(), RequestError> {
        let res = client.follow(Method::DELETE, &self.href)?.send()?;

        check_status(res)?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::categories::UpdateCategory;
    use crate::hal::HalError;

    #[test]
    fn update_prefers_patch_link() {
        let links = Links::new()
            .with("self", "http://localhost:8090/api/v1/categories/music")
            .with("patch", "http://localhost:8090/api/v1/categories/music/edit{?projection}");

        let update = UpdateResource::from_links(&links, UpdateCategory::default()).unwrap();

        assert_eq!(update.href(), "http://localhost:8090/api/v1/categories/music/edit");
    }

    #[test]
    fn delete_falls_back_to_self() {
        let links = Links::new()
            .with("self", "http://localhost:8090/api/v1/cities/4");

        let delete = DeleteResource::from_links(&links).unwrap();

        assert_eq!(delete.href(), "http://localhost:8090/api/v1/cities/4");
    }

    #[test]
    fn no_links_no_mutation() {
        let links = Links::new();

        assert!(matches!(
            DeleteResource::from_links(&links),
            Err(RequestError::Hal(HalError::MissingLink("delete")))
        ));
        assert!(matches!(
            UpdateResource::from_links(&links, UpdateCategory::default()),
            Err(RequestError::Hal(HalError::MissingLink("patch")))
        ));
    }
}
