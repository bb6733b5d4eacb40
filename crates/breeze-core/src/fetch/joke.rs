use std::time::Duration;

use breeze_config::JokeConfig;
use reqwest::Client;

use super::{get_json, text_field, FetchError, FetchResult};

/// Random setup/punchline jokes.
pub struct JokeClient {
    client: Client,
    url: String,
    timeout: Duration,
}

impl JokeClient {
    pub fn new(client: Client, config: &JokeConfig) -> Self {
        Self {
            client,
            url: config.url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Setup and punchline joined by a space. Missing parts count as empty.
    pub async fn fetch(&self) -> FetchResult<String> {
        let body = get_json(&self.client, &self.url, &[], self.timeout).await?;
        if !body.is_object() {
            return Err(FetchError::Malformed("expected a joke object".into()));
        }
        let setup = text_field(&body, "setup").unwrap_or_default();
        let punchline = text_field(&body, "punchline").unwrap_or_default();
        Ok(format!("{setup} {punchline}").trim().to_string())
    }
}
