use chrono::Local;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::fetch::CurrentConditions;

/// Timestamp format used by both history files.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time as a history timestamp.
pub fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Accept any JSON scalar for a text field. `null` reads as empty, numbers
/// and booleans as their JSON text.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// One weather lookup. `joke` is empty when no joke could be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherEntry {
    #[serde(deserialize_with = "lenient_string")]
    pub timestamp: String,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(deserialize_with = "lenient_string")]
    pub temperature: String,
    #[serde(deserialize_with = "lenient_string")]
    pub weather: String,
    #[serde(deserialize_with = "lenient_string")]
    pub advice: String,
    #[serde(deserialize_with = "lenient_string")]
    pub joke: String,
}

impl WeatherEntry {
    pub fn new(
        name: &str,
        city: &str,
        conditions: &CurrentConditions,
        advice: &str,
        joke: &str,
    ) -> Self {
        Self {
            timestamp: now_timestamp(),
            name: name.into(),
            city: city.into(),
            temperature: format!("{}°C", conditions.temp_c),
            weather: conditions.description.clone(),
            advice: advice.into(),
            joke: joke.into(),
        }
    }
}

/// One chatbot exchange.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatEntry {
    #[serde(deserialize_with = "lenient_string")]
    pub timestamp: String,
    #[serde(deserialize_with = "lenient_string")]
    pub user: String,
    #[serde(deserialize_with = "lenient_string")]
    pub user_message: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ai_response: String,
}

impl ChatEntry {
    pub fn new(user: &str, user_message: &str, ai_response: &str) -> Self {
        Self {
            timestamp: now_timestamp(),
            user: user.into(),
            user_message: user_message.into(),
            ai_response: ai_response.into(),
        }
    }
}
