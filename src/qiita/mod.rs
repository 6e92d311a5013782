//! Qiita API integration
//!
//! Pages through the authenticated user's items. The exporter only needs
//! read access to `/api/v2/authenticated_user/items`.

pub mod client;
pub mod mock;

pub use client::QiitaClient;
pub use mock::MockItemSource;

use crate::models::ItemPage;
use crate::Result;
use async_trait::async_trait;

/// Qiita allows at most 100 items per page.
pub const MAX_PER_PAGE: usize = 100;

#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Fetch 1-based page `page` holding up to `per_page` items.
    async fn fetch_page(&self, page: usize, per_page: usize) -> Result<ItemPage>;
}
