use super::ImageFetcher;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Serves canned bytes per URL and records every URL requested.
#[derive(Clone)]
pub struct MockImageFetcher {
    responses: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    default_response: Arc<Mutex<Option<Vec<u8>>>>,
    fetched: Arc<Mutex<Vec<String>>>,
}

impl MockImageFetcher {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            fetched: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, url: &str, data: Vec<u8>) -> Self {
        self.responses.lock().unwrap().insert(url.to_string(), data);
        self
    }

    /// Bytes returned for any URL without a specific response.
    pub fn with_default_response(self, data: Vec<u8>) -> Self {
        *self.default_response.lock().unwrap() = Some(data);
        self
    }

    pub fn get_fetched_urls(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

impl Default for MockImageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageFetcher for MockImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.fetched.lock().unwrap().push(url.to_string());

        if let Some(data) = self.responses.lock().unwrap().get(url) {
            return Ok(data.clone());
        }

        self.default_response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::Download(format!("{} returned status 404 Not Found", url)))
    }
}
