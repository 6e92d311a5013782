//! Remote image download
//!
//! The rewriter only decides where images go; implementations of
//! [`ImageFetcher`] bring the bytes over.

pub mod client;
pub mod mock;

pub use client::HttpImageFetcher;
pub use mock::MockImageFetcher;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Fetch the full body at `url`. Any non-success response is an error.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
