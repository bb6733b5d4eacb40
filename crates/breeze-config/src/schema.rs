use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub history: HistoryConfig,
    pub weather: WeatherConfig,
    pub advice: AdviceConfig,
    pub joke: JokeConfig,
    pub chat: ChatConfig,
}

/// Locations of the two history files and the shell's line history.
/// Relative paths resolve against the current directory, `~` against the
/// home directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryConfig {
    pub weather_path: String,
    pub chat_path: String,
    /// Input lines recalled with the arrow keys in the interactive shell.
    pub shell_path: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            weather_path: "history.json".into(),
            chat_path: "chatbot_history.json".into(),
            shell_path: "~/.breeze/shell_history".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeatherConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Pause between the per-day requests of the 7-day look-back.
    pub day_pause_ms: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://wttr.in".into(),
            timeout_secs: 10,
            day_pause_ms: 500,
        }
    }
}

/// Random-advice endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdviceConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            url: "https://api.adviceslip.com/advice".into(),
            timeout_secs: 8,
        }
    }
}

/// Random-joke endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JokeConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for JokeConfig {
    fn default() -> Self {
        Self {
            url: "https://official-joke-api.appspot.com/random_joke".into(),
            timeout_secs: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatConfig {
    pub url: String,
    /// Bearer token. Falls back to the `HF_TOKEN` environment variable.
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
    /// Pause after each chatbot turn.
    pub turn_pause_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            url: "https://router.huggingface.co/v1/chat/completions".into(),
            api_key: None,
            model: "meta-llama/Llama-3.1-8B-Instruct".into(),
            max_tokens: 100,
            temperature: 0.8,
            timeout_secs: 30,
            turn_pause_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let cfg: Config = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(cfg.history.weather_path, "history.json");
        assert_eq!(cfg.history.chat_path, "chatbot_history.json");
        assert_eq!(cfg.history.shell_path, "~/.breeze/shell_history");
        assert_eq!(cfg.weather.base_url, "https://wttr.in");
        assert_eq!(cfg.weather.timeout_secs, 10);
        assert_eq!(cfg.weather.day_pause_ms, 500);
        assert_eq!(cfg.advice.timeout_secs, 8);
        assert_eq!(cfg.chat.max_tokens, 100);
        assert_eq!(cfg.chat.timeout_secs, 30);
        assert!(cfg.chat.api_key.is_none());
    }

    #[test]
    fn camel_case_keys_parsed() {
        let cfg: Config = serde_json::from_value(serde_json::json!({
            "history": { "weatherPath": "/tmp/w.json" },
            "weather": { "baseUrl": "http://localhost:9000", "dayPauseMs": 0 },
            "chat": { "apiKey": "hf_abc", "turnPauseMs": 0, "maxTokens": 256 }
        }))
        .unwrap();
        assert_eq!(cfg.history.weather_path, "/tmp/w.json");
        assert_eq!(cfg.history.chat_path, "chatbot_history.json");
        assert_eq!(cfg.weather.base_url, "http://localhost:9000");
        assert_eq!(cfg.weather.day_pause_ms, 0);
        assert_eq!(cfg.weather.timeout_secs, 10);
        assert_eq!(cfg.chat.api_key.as_deref(), Some("hf_abc"));
        assert_eq!(cfg.chat.max_tokens, 256);
        assert_eq!(cfg.chat.model, "meta-llama/Llama-3.1-8B-Instruct");
    }

    #[test]
    fn partial_endpoint_keeps_default_url() {
        let cfg: Config = serde_json::from_value(serde_json::json!({
            "advice": { "timeoutSecs": 3 },
            "joke": { "url": "http://127.0.0.1:1/joke" }
        }))
        .unwrap();
        assert_eq!(cfg.advice.url, "https://api.adviceslip.com/advice");
        assert_eq!(cfg.advice.timeout_secs, 3);
        assert_eq!(cfg.joke.url, "http://127.0.0.1:1/joke");
        assert_eq!(cfg.joke.timeout_secs, 8);
    }
}
