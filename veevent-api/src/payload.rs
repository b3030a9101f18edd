use serde::{Serialize, Deserialize};

/// a decoded response body with the paging block that came with it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    page: Option<PageInfo>,

    payload: T
}

impl<T> Payload<T> {
    pub fn new(payload: T) -> Self {
        Self {
            page: None,
            payload
        }
    }

    pub fn with_page(mut self, page: Option<PageInfo>) -> Self {
        self.page = page;
        self
    }

    pub fn into_payload(self) -> T {
        self.payload
    }

    pub fn into_tuple(self) -> (Option<PageInfo>, T) {
        (self.page, self.payload)
    }
}

/// the `page` block of a paginated collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub number: u32,
}

impl PageInfo {
    pub fn is_last(&self) -> bool {
        self.number.saturating_add(1) >= self.total_pages
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn last_page() {
        let mut page = PageInfo {
            size: 20,
            total_elements: 45,
            total_pages: 3,
            number: 0,
        };

        assert!(!page.is_last());

        page.number = 2;
        assert!(page.is_last());

        page.total_pages = 0;
        page.number = 0;
        assert!(page.is_last());
    }

    #[test]
    fn last_page_at_numeric_limit() {
        let page = PageInfo {
            size: 20,
            total_elements: 0,
            total_pages: u32::MAX,
            number: u32::MAX,
        };

        assert!(page.is_last());
    }
}
