//! Wiring between fetchers, history stores and console output.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use breeze_config::{resolve_path, Config};
use breeze_core::{
    http_client, AdviceClient, ChatClient, ChatEntry, ChatReply, HistoryStore, JokeClient,
    WeatherClient, WeatherEntry,
};

use crate::render;

/// Environment variable holding the chat bearer token.
pub const CHAT_TOKEN_ENV: &str = "HF_TOKEN";

pub struct App {
    pub weather: WeatherClient,
    pub advice: AdviceClient,
    pub joke: JokeClient,
    pub chat: ChatClient,
    pub weather_history: HistoryStore<WeatherEntry>,
    pub chat_history: HistoryStore<ChatEntry>,
    /// rustyline history file for the interactive shell.
    pub shell_history: PathBuf,
    pub day_pause: Duration,
    pub turn_pause: Duration,
}

/// Resolve an API key from config, falling back to an environment variable.
pub fn resolve_api_key(configured: Option<&str>, env_var: &str) -> Option<String> {
    configured
        .map(str::to_string)
        .filter(|k| !k.is_empty())
        .or_else(|| std::env::var(env_var).ok().filter(|k| !k.is_empty()))
}

impl App {
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = http_client()?;
        let api_key = resolve_api_key(config.chat.api_key.as_deref(), CHAT_TOKEN_ENV);
        if api_key.is_none() {
            tracing::warn!("No chat token configured; set chat.apiKey or {CHAT_TOKEN_ENV}");
        }
        Ok(Self {
            weather: WeatherClient::new(client.clone(), &config.weather),
            advice: AdviceClient::new(client.clone(), &config.advice),
            joke: JokeClient::new(client.clone(), &config.joke),
            chat: ChatClient::new(client, &config.chat, api_key),
            weather_history: HistoryStore::new(resolve_path(&config.history.weather_path)),
            chat_history: HistoryStore::new(resolve_path(&config.history.chat_path)),
            shell_history: resolve_path(&config.history.shell_path),
            day_pause: Duration::from_millis(config.weather.day_pause_ms),
            turn_pause: Duration::from_millis(config.chat.turn_pause_ms),
        })
    }

    /// Current weather plus advice and a joke for `city`, printed and saved.
    /// Returns the stored entry, or `None` when the weather lookup failed.
    pub async fn weather_report(&self, name: &str, city: &str) -> Option<WeatherEntry> {
        let conditions = match self.weather.current(city).await {
            Ok(conditions) => conditions,
            Err(e) => {
                tracing::info!("weather lookup for '{city}' failed: {e}");
                println!("Could not get weather.");
                return None;
            }
        };
        let advice = self.advice.fetch().await.unwrap_or_else(|e| {
            tracing::info!("advice lookup failed: {e}");
            "No advice available.".to_string()
        });
        let joke = match self.joke.fetch().await {
            Ok(joke) => joke,
            Err(e) => {
                tracing::info!("joke lookup failed: {e}");
                String::new()
            }
        };

        println!(
            "{}",
            render::weather_report(city, &conditions, &advice, Some(joke.as_str()))
        );

        let entry = WeatherEntry::new(name, city, &conditions, &advice, &joke);
        if let Err(e) = self.weather_history.append(entry.clone()) {
            tracing::error!(
                "Failed to save weather history to {}: {e:#}",
                self.weather_history.path().display()
            );
            eprintln!("Could not save history: {e}");
        }
        Some(entry)
    }

    /// Print the seven days before today for `city`.
    pub async fn past_week(&self, city: &str) {
        println!("{}", render::past_week_header(city));
        let today = chrono::Local::now().date_naive();
        self.weather
            .past_week(city, today, self.day_pause, |date, result| {
                println!("{}", render::past_day(date, &result));
            })
            .await;
        println!("{}", render::rule(60));
    }

    /// One chatbot turn: ask, print, save.
    pub async fn chat_turn(&self, name: &str, message: &str) -> ChatReply {
        let reply = self.chat.complete(message).await;
        let text = reply.to_string();
        if reply.is_answer() {
            println!("AI:");
            render::render_markdown(&text);
        } else {
            println!("AI: {text}");
        }
        if let Err(e) = self
            .chat_history
            .append(ChatEntry::new(name, message, &text))
        {
            tracing::error!(
                "Failed to save chat history to {}: {e:#}",
                self.chat_history.path().display()
            );
            eprintln!("Could not save chat history: {e}");
        }
        reply
    }

    pub fn show_weather_history(&self) {
        print!("{}", render::weather_history(&self.weather_history.read_all()));
    }

    pub fn show_chat_history(&self) {
        print!("{}", render::chat_history(&self.chat_history.read_all()));
    }
}
