//! Console text for reports and history listings.

use std::fmt::Write;

use breeze_core::{
    ChatEntry, CurrentConditions, DaySummary, FetchError, FetchResult, HistoryRead, WeatherEntry,
};
use chrono::NaiveDate;

pub fn rule(width: usize) -> String {
    "=".repeat(width)
}

/// Render markdown text to the terminal using termimad.
pub fn render_markdown(text: &str) {
    let skin = termimad::MadSkin::default();
    skin.print_text(text);
}

pub fn weather_report(
    city: &str,
    conditions: &CurrentConditions,
    advice: &str,
    joke: Option<&str>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", rule(60));
    let _ = writeln!(out, "\nCity: {city}");
    let _ = writeln!(
        out,
        "Temperature: {}°C (feels like {}°C)",
        conditions.temp_c, conditions.feels_like_c
    );
    let _ = writeln!(out, "Weather: {}", conditions.description);
    if let Some(joke) = joke.filter(|j| !j.is_empty()) {
        let _ = writeln!(out, "Joke: {joke}");
    }
    let _ = writeln!(out, "Advice: {advice}");
    out
}

pub fn weather_history(read: &HistoryRead<WeatherEntry>) -> String {
    let entries = match read {
        HistoryRead::Missing => return "No history yet.\n".into(),
        HistoryRead::Corrupt(_) => return "History file is broken.\n".into(),
        HistoryRead::Empty => return "History is empty.\n".into(),
        HistoryRead::Entries(entries) => entries,
    };
    let mut out = String::new();
    for (i, item) in entries.iter().enumerate() {
        let _ = writeln!(out, "{}) {} - {}", i + 1, item.timestamp, item.city);
        let _ = writeln!(out, "   Temp: {}", item.temperature);
        let _ = writeln!(out, "   Weather: {}", item.weather);
        let _ = writeln!(out, "   Advice: {}", item.advice);
        if !item.joke.is_empty() {
            let _ = writeln!(out, "   Joke: {}", item.joke);
        }
        out.push('\n');
    }
    out
}

pub fn chat_history(read: &HistoryRead<ChatEntry>) -> String {
    let entries = match read {
        HistoryRead::Missing => return "No chatbot history yet.\n".into(),
        HistoryRead::Corrupt(_) => return "Chatbot history file is broken.\n".into(),
        HistoryRead::Empty => return "Chatbot history is empty.\n".into(),
        HistoryRead::Entries(entries) => entries,
    };
    let mut out = String::new();
    let _ = writeln!(out, "\n💬 AI Chatbot History");
    let _ = writeln!(out, "{}", rule(70));
    for (i, item) in entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "\n{}) 📅 {} - User: {}",
            i + 1,
            or_placeholder(&item.timestamp, "N/A"),
            or_placeholder(&item.user, "Unknown")
        );
        let _ = writeln!(out, "   👤 You: {}", or_placeholder(&item.user_message, "N/A"));
        let _ = writeln!(out, "   🤖 AI: {}", or_placeholder(&item.ai_response, "N/A"));
        let _ = writeln!(out, "{}", "-".repeat(70));
    }
    out
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

pub fn past_week_header(city: &str) -> String {
    format!("\n🌦️  Weather for the last 7 days in {city}:\n{}", rule(60))
}

pub fn past_day(date: NaiveDate, result: &FetchResult<DaySummary>) -> String {
    let date_str = date.format("%Y-%m-%d");
    match result {
        Ok(day) => format!(
            "\n📅 {}, {date_str}\n   🌡️  Avg: {}°C | Max: {}°C | Min: {}°C\n   ☁️  {}",
            date.format("%A"),
            day.avg_c,
            day.max_c,
            day.min_c,
            day.description
        ),
        Err(FetchError::Status { .. }) => format!("❌ {date_str}: Could not fetch data"),
        Err(FetchError::NoData) => format!("❌ {date_str}: No weather data available"),
        Err(FetchError::Malformed(e) | FetchError::Network(e)) => {
            format!("❌ {date_str}: Error - {e}")
        }
    }
}
