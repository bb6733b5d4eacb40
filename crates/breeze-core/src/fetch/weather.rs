//! wttr.in weather lookups (`format=j1`).

use std::time::Duration;

use breeze_config::WeatherConfig;
use chrono::{Days, NaiveDate};
use reqwest::Client;
use serde_json::Value;

use super::{first_description, get_json, is_blank, text_field, FetchError, FetchResult};

/// Number of past days covered by [`WeatherClient::past_week`].
pub const PAST_DAYS: u64 = 7;

/// Current conditions for a city. Temperatures are kept as the service
/// reports them (Celsius, as text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentConditions {
    pub temp_c: String,
    pub description: String,
    pub feels_like_c: String,
}

impl CurrentConditions {
    /// Extract from a j1 body. A body without `current_condition` yields
    /// placeholder values rather than an error.
    pub fn from_json(body: &Value) -> Self {
        let Some(current) = body
            .get("current_condition")
            .and_then(|c| c.as_array())
            .and_then(|c| c.first())
        else {
            return Self {
                temp_c: "N/A".into(),
                description: "Unknown".into(),
                feels_like_c: "N/A".into(),
            };
        };
        let temp_c = text_field(current, "temp_C").unwrap_or_else(|| "N/A".into());
        Self {
            description: first_description(current, "weatherDesc").unwrap_or_default(),
            feels_like_c: text_field(current, "FeelsLikeC").unwrap_or_else(|| temp_c.clone()),
            temp_c,
        }
    }
}

/// Summary of one past day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    pub avg_c: String,
    pub max_c: String,
    pub min_c: String,
    pub description: String,
}

impl DaySummary {
    pub fn from_json(body: &Value) -> FetchResult<Self> {
        let day = body
            .get("weather")
            .and_then(|w| w.as_array())
            .and_then(|w| w.first())
            .ok_or(FetchError::NoData)?;
        let na = || "N/A".to_string();
        let description = day
            .get("hourly")
            .and_then(|h| h.as_array())
            .and_then(|h| h.first())
            .and_then(|hour| first_description(hour, "weatherDesc"))
            .unwrap_or_else(na);
        Ok(Self {
            avg_c: text_field(day, "avgtempC").unwrap_or_else(na),
            max_c: text_field(day, "maxtempC").unwrap_or_else(na),
            min_c: text_field(day, "mintempC").unwrap_or_else(na),
            description,
        })
    }
}

pub struct WeatherClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl WeatherClient {
    pub fn new(client: Client, config: &WeatherConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    fn city_url(&self, city: &str) -> String {
        format!("{}/{}", self.base_url, city.trim().replace(' ', "+"))
    }

    /// Current conditions for `city`. An empty body (`{}`, `null`, ...) is
    /// [`FetchError::NoData`].
    pub async fn current(&self, city: &str) -> FetchResult<CurrentConditions> {
        let body = get_json(
            &self.client,
            &self.city_url(city),
            &[("format", "j1")],
            self.timeout,
        )
        .await?;
        if is_blank(&body) {
            return Err(FetchError::NoData);
        }
        Ok(CurrentConditions::from_json(&body))
    }

    /// Weather summary for `city` on `date`.
    pub async fn day(&self, city: &str, date: NaiveDate) -> FetchResult<DaySummary> {
        let date = date.format("%Y-%m-%d").to_string();
        let body = get_json(
            &self.client,
            &self.city_url(city),
            &[("date", date.as_str()), ("format", "j1")],
            self.timeout,
        )
        .await?;
        DaySummary::from_json(&body)
    }

    /// Fetch each of the seven days before `today`, oldest first, handing every
    /// result to `on_day` as it arrives. A failed day does not stop the rest.
    /// Sleeps `pause` between requests.
    pub async fn past_week<F>(&self, city: &str, today: NaiveDate, pause: Duration, mut on_day: F)
    where
        F: FnMut(NaiveDate, FetchResult<DaySummary>),
    {
        for back in (1..=PAST_DAYS).rev() {
            let Some(date) = today.checked_sub_days(Days::new(back)) else {
                continue;
            };
            let result = self.day(city, date).await;
            if let Err(e) = &result {
                tracing::debug!("weather for {city} on {date} failed: {e}");
            }
            on_day(date, result);
            if back > 1 && !pause.is_zero() {
                tokio::time::sleep(pause).await;
            }
        }
    }
}
