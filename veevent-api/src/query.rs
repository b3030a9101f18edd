use serde::{Serialize, Deserialize};

/// `page`/`size` query parameters understood by every collection endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl PageQuery {
    pub fn new() -> Self {
        PageQuery::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut rtn = Vec::with_capacity(2);

        if let Some(page) = self.page {
            rtn.push(("page", page.to_string()));
        }

        if let Some(size) = self.size {
            rtn.push(("size", size.to_string()));
        }

        rtn
    }
}
