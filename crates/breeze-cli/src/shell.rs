//! Interactive numbered-menu shell.

use std::path::Path;

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::app::App;

/// A menu selection, parsed from one line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    WeatherReport,
    WeatherHistory,
    Chatbot,
    PastWeek,
    ChatHistory,
    Quit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "1" => Some(MenuChoice::WeatherReport),
            "2" => Some(MenuChoice::WeatherHistory),
            "3" => Some(MenuChoice::Chatbot),
            "4" => Some(MenuChoice::PastWeek),
            "5" => Some(MenuChoice::ChatHistory),
            "q" => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

/// True for the inputs that leave the chatbot sub-loop.
pub fn is_chat_exit(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "back" | "q")
}

fn print_menu() {
    println!("\nMain menu:");
    println!("1 - Weather + advice + joke");
    println!("2 - View weather history");
    println!("3 - AI chatbot");
    println!("4 - 7-day weather history");
    println!("5 - View chatbot history");
    println!("q - Quit");
}

/// Read one trimmed line. `None` on Ctrl-D or a terminal error.
fn read_line(rl: &mut DefaultEditor, prompt: &str) -> Option<String> {
    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                let input = line.trim().to_string();
                if !input.is_empty() {
                    let _ = rl.add_history_entry(input.as_str());
                }
                return Some(input);
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => return None,
            Err(err) => {
                eprintln!("Error: {err}");
                return None;
            }
        }
    }
}

/// Make sure the line-history file can be created. `None` disables saving.
fn prepare_history(path: &Path) -> Option<&Path> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::debug!("shell history disabled, cannot create {}: {e}", parent.display());
            return None;
        }
    }
    Some(path)
}

pub async fn run(app: &App, name: Option<String>) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let history_path = prepare_history(&app.shell_history);
    if let Some(path) = history_path {
        let _ = rl.load_history(path);
    }

    println!("Welcome to the Weather + Advice + Joke app");
    println!("Type 'q' at any prompt to quit.\n");

    let name = match name {
        Some(name) => name,
        None => match read_line(&mut rl, "What is your name? ") {
            Some(name) if !name.eq_ignore_ascii_case("q") => name,
            _ => return Ok(()),
        },
    };
    tracing::debug!("shell started for '{name}'");

    loop {
        print_menu();
        let Some(input) = read_line(&mut rl, "Choose an option: ") else {
            break;
        };
        let Some(choice) = MenuChoice::parse(&input) else {
            continue;
        };

        match choice {
            MenuChoice::Quit => break,
            MenuChoice::WeatherReport => {
                let Some(city) = read_line(&mut rl, "Enter city name: ") else {
                    break;
                };
                if city.is_empty() {
                    continue;
                }
                app.weather_report(&name, &city).await;
            }
            MenuChoice::WeatherHistory => {
                println!("{}", crate::render::rule(60));
                app.show_weather_history();
            }
            MenuChoice::Chatbot => {
                println!("{}", crate::render::rule(60));
                println!("hello {name} to :");
                println!("\nAI Chatbot (type 'back' to return)");
                if !chat_loop(app, &mut rl, &name).await {
                    break;
                }
            }
            MenuChoice::PastWeek => {
                let Some(city) = read_line(&mut rl, "Enter city name for 7-day history: ")
                else {
                    break;
                };
                if city.is_empty() {
                    continue;
                }
                app.past_week(&city).await;
            }
            MenuChoice::ChatHistory => app.show_chat_history(),
        }
    }

    if let Some(path) = history_path {
        let _ = rl.save_history(path);
    }
    println!("Goodbye!");
    Ok(())
}

/// Chatbot sub-loop. Returns false when input ended (Ctrl-D) so the caller
/// can exit entirely.
async fn chat_loop(app: &App, rl: &mut DefaultEditor, name: &str) -> bool {
    loop {
        let Some(message) = read_line(rl, "You: ") else {
            return false;
        };
        if is_chat_exit(&message) {
            return true;
        }
        if message.is_empty() {
            continue;
        }
        app.chat_turn(name, &message).await;
        if !app.turn_pause.is_zero() {
            tokio::time::sleep(app.turn_pause).await;
        }
    }
}
