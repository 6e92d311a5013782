use super::ItemSource;
use crate::models::{Item, ItemPage};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// In-memory item source that serves a fixed item list in pages.
#[derive(Clone)]
pub struct MockItemSource {
    items: Arc<Mutex<Vec<Item>>>,
    requests: Arc<Mutex<Vec<(usize, usize)>>>,
    fail_on_page: Arc<Mutex<Option<usize>>>,
}

impl MockItemSource {
    pub fn new() -> Self {
        Self {
            items: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            fail_on_page: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_item(self, item: Item) -> Self {
        self.items.lock().unwrap().push(item);
        self
    }

    pub fn with_failure_on_page(self, page: usize) -> Self {
        *self.fail_on_page.lock().unwrap() = Some(page);
        self
    }

    /// `(page, per_page)` of every request made so far.
    pub fn get_requests(&self) -> Vec<(usize, usize)> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockItemSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemSource for MockItemSource {
    async fn fetch_page(&self, page: usize, per_page: usize) -> Result<ItemPage> {
        self.requests.lock().unwrap().push((page, per_page));

        if *self.fail_on_page.lock().unwrap() == Some(page) {
            return Err(Error::Api(format!("Mock failure on page {}", page)));
        }

        let items = self.items.lock().unwrap();
        let start = page.saturating_sub(1).saturating_mul(per_page);
        let page_items = items.iter().skip(start).take(per_page).cloned().collect();

        Ok(ItemPage {
            items: page_items,
            total_count: items.len(),
        })
    }
}
