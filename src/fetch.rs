use std::time::Duration;

use log::{debug, error};
use reqwest::{Client, Url};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Fetches the schedule page body. Non-2xx responses count as failures.
    pub async fn fetch_page(&self, url: Url) -> reqwest::Result<String> {
        let result = self.get_text(url).await;

        if let Err(err) = &result {
            error!("Error fetching schedule page: {err}");
        }

        result
    }

    async fn get_text(&self, url: Url) -> reqwest::Result<String> {
        debug!("Sending HTTP request to {url}");
        let response = self.client.get(url).send().await?.error_for_status()?;

        debug!("Reading response body");
        response.text().await
    }
}
