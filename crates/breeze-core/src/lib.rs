pub mod entry;
pub mod fetch;
pub mod history;

// Re-export key types
pub use entry::{now_timestamp, ChatEntry, WeatherEntry};
pub use fetch::{
    http_client, AdviceClient, ChatClient, ChatReply, CurrentConditions, DaySummary, FetchError,
    FetchResult, JokeClient, WeatherClient,
};
pub use history::{HistoryRead, HistoryStore};
