use super::ImageFetcher;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;

pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    pub fn new() -> Self {
        Self::new_with_client(Client::new())
    }

    pub fn new_with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpImageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("Downloading {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("Failed to request image {}: {}", url, e);
            e
        })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Image download failed (status {}): {}", status, url);
            return Err(Error::Download(format!("{} returned status {}", url, status)));
        }

        Ok(response.bytes().await?.to_vec())
    }
}
