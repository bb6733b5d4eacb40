use std::path::{Path, PathBuf};

use anyhow::Result;
use breeze_config::{find_config_path, load_config, resolve_path, save_config, Config};
use clap::{Parser, Subcommand};

mod app;
mod render;
mod shell;

use app::{resolve_api_key, App, CHAT_TOKEN_ENV};

#[derive(Parser)]
#[command(
    name = "breeze",
    about = "Weather, advice, jokes and an AI chatbot in the terminal",
    version
)]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Name recorded in history entries
    #[arg(short, long, global = true)]
    name: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu (default)
    Shell,
    /// Current weather with advice and a joke, saved to history
    Weather {
        /// City name
        city: String,
    },
    /// Weather for each of the last 7 days
    Past {
        /// City name
        city: String,
    },
    /// Send one message to the chatbot
    Chat {
        #[arg(short, long)]
        message: String,
    },
    /// Show saved weather lookups, newest first
    History,
    /// Show saved chatbot exchanges, newest first
    ChatHistory,
    /// Show configuration and history file status
    Status,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(find_config_path);

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Init { force } => run_init(&config_path, force)?,
        Commands::Status => run_status(&config_path)?,
        Commands::Shell => shell::run(&load_app(&config_path)?, cli.name).await?,
        Commands::Weather { city } => {
            let app = load_app(&config_path)?;
            let name = cli.name.unwrap_or_else(default_name);
            app.weather_report(&name, &city).await;
        }
        Commands::Past { city } => load_app(&config_path)?.past_week(&city).await,
        Commands::Chat { message } => {
            let app = load_app(&config_path)?;
            let name = cli.name.unwrap_or_else(default_name);
            app.chat_turn(&name, &message).await;
        }
        Commands::History => load_app(&config_path)?.show_weather_history(),
        Commands::ChatHistory => load_app(&config_path)?.show_chat_history(),
    }

    Ok(())
}

fn load_app(config_path: &Path) -> Result<App> {
    let config = load_config(config_path)?;
    tracing::debug!("Loaded config from {}", config_path.display());
    App::from_config(&config)
}

/// Name used by one-shot commands when `--name` is not given.
fn default_name() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Unknown".to_string())
}

fn run_init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        println!("Config already exists: {}", config_path.display());
        println!("To reset, run `breeze init --force`.");
        return Ok(());
    }
    save_config(config_path, &Config::default())?;
    println!("Created config: {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Set {CHAT_TOKEN_ENV} (or chat.apiKey) to use the chatbot");
    println!("  2. Run `breeze` to open the menu");
    Ok(())
}

/// Show configuration and history file summary.
fn run_status(config_path: &Path) -> Result<()> {
    println!("breeze status");
    println!();

    if config_path.exists() {
        println!("  Config:          {} (found)", config_path.display());
    } else {
        println!(
            "  Config:          {} (not found, using defaults)",
            config_path.display()
        );
    }

    let config = load_config(config_path)?;
    for (label, path) in [
        ("Weather history", &config.history.weather_path),
        ("Chat history", &config.history.chat_path),
        ("Shell history", &config.history.shell_path),
    ] {
        let path = resolve_path(path);
        println!(
            "  {label}: {} ({})",
            path.display(),
            if path.exists() { "found" } else { "not created yet" }
        );
    }
    println!();

    println!("  Weather:  {}", config.weather.base_url);
    println!("  Advice:   {}", config.advice.url);
    println!("  Joke:     {}", config.joke.url);
    println!("  Chat:     {} ({})", config.chat.url, config.chat.model);
    println!(
        "  Chat token: {}",
        if resolve_api_key(config.chat.api_key.as_deref(), CHAT_TOKEN_ENV).is_some() {
            "configured"
        } else {
            "not configured"
        }
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn no_subcommand_means_shell() {
        let cli = Cli::try_parse_from(["breeze", "--name", "Ana"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.name.as_deref(), Some("Ana"));
    }

    #[test]
    fn name_is_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from(["breeze", "weather", "New York", "-n", "Bo"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Weather { ref city }) if city.as_str() == "New York"
        ));
        assert_eq!(cli.name.as_deref(), Some("Bo"));
    }

    #[test]
    fn load_app_without_config_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let app = load_app(&dir.path().join("breeze.json")).unwrap();
        assert_eq!(app.weather_history.path(), Path::new("history.json"));
        assert_eq!(app.chat_history.path(), Path::new("chatbot_history.json"));
    }

    #[test]
    fn init_writes_defaults_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("breeze.json");
        run_init(&path, false).unwrap();
        let written = load_config(&path).unwrap();
        assert_eq!(written.weather.base_url, "https://wttr.in");

        std::fs::write(&path, r#"{"chat": {"model": "custom"}}"#).unwrap();
        run_init(&path, false).unwrap();
        assert_eq!(load_config(&path).unwrap().chat.model, "custom");
        run_init(&path, true).unwrap();
        assert_eq!(
            load_config(&path).unwrap().chat.model,
            "meta-llama/Llama-3.1-8B-Instruct"
        );
    }
}

