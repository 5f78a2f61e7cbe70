//! In-memory [`PageSource`] for offline tests.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::Result;
use crate::vlr_scraper::PageSource;

#[derive(Default)]
pub(crate) struct StaticPages {
    pages: HashMap<String, String>,
    requests: RefCell<Vec<String>>,
}

impl StaticPages {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, path: &str, body: String) -> Self {
        self.pages.insert(path.to_string(), body);
        self
    }

    /// Paths fetched so far, in request order.
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl PageSource for StaticPages {
    async fn fetch(&self, path: &str) -> Result<Option<String>> {
        self.requests.borrow_mut().push(path.to_string());
        Ok(self.pages.get(path).cloned())
    }
}
