use std::time::Duration;

use breeze_config::AdviceConfig;
use reqwest::Client;

use super::{get_json, FetchError, FetchResult};

/// Random advice from the Advice Slip API.
pub struct AdviceClient {
    client: Client,
    url: String,
    timeout: Duration,
}

impl AdviceClient {
    pub fn new(client: Client, config: &AdviceConfig) -> Self {
        Self {
            client,
            url: config.url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub async fn fetch(&self) -> FetchResult<String> {
        let body = get_json(&self.client, &self.url, &[], self.timeout).await?;
        body.get("slip")
            .and_then(|s| s.get("advice"))
            .and_then(|a| a.as_str())
            .map(String::from)
            .ok_or_else(|| FetchError::Malformed("missing slip.advice".into()))
    }
}
