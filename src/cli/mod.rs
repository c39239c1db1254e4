//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod model_list;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::cli::model_list::list_models;
use crate::core::app::AppInitConfig;
use crate::core::config::{Config, ConfigKey};
use crate::core::gemini::GeminiProvider;
use crate::core::settings::{Model, Temperature};
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::init_file_logging;
use crate::utils::version::build_version;

#[derive(Parser)]
#[command(name = "gemchat")]
#[command(version = build_version())]
#[command(about = "A terminal chat client for Google's Gemini models")]
#[command(
    long_about = "gemchat is a full-screen terminal chatbot backed by the Gemini API. \
Enter your API key in the sidebar, pick a model and temperature, and chat. The whole \
conversation is sent with every message so the model remembers earlier turns.\n\n\
The API key is only held in memory and is never written to disk.\n\n\
Controls:\n\
  Tab/Shift+Tab     Move between sidebar controls and the message box\n\
  Enter             Send the message (Alt+Enter for a new line)\n\
  Left/Right        Change model or temperature when focused\n\
  PgUp/PgDn/Mouse   Scroll the conversation\n\
  F1 / F2           Toggle usage tips / current configuration\n\
  Ctrl+C            Quit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Model to start with (overrides the configured default)
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<Model>,

    /// Starting temperature between 0.0 and 1.0
    #[arg(short = 't', long, global = true, value_name = "TEMPERATURE")]
    pub temperature: Option<Temperature>,

    /// Write diagnostic logs to the given file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// List the available Gemini models
    Models,
    /// Set a configuration value, or show all values when no value is given
    Set {
        /// default-model, temperature or base-url
        key: Option<String>,
        value: Option<String>,
    },
    /// Remove a configuration value
    Unset {
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

fn parse_key(key: &str) -> ConfigKey {
    match ConfigKey::parse(key) {
        Some(key) => key,
        None => {
            eprintln!("❌ Unknown config key: {key}");
            eprintln!("Valid keys: default-model, temperature, base-url");
            std::process::exit(1);
        }
    }
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if let Some(path) = args.log.as_deref() {
        init_file_logging(path)?;
    }

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let config = Config::load()?;
            let init = AppInitConfig {
                model: config.model_or(args.model),
                temperature: config.temperature_or(args.temperature),
            };
            info!(base_url = config.base_url(), "using Gemini endpoint");
            let provider = GeminiProvider::new(config.base_url());
            run_chat(init, &provider).await
        }
        Commands::Models => list_models(),
        Commands::Set { key, value } => {
            let mut config = Config::load()?;
            let key = key.as_deref().map(parse_key);
            match (key, value) {
                (Some(key), Some(value)) if !value.trim().is_empty() => {
                    if let Err(message) = config.set_value(key, &value) {
                        eprintln!("❌ {message}");
                        std::process::exit(1);
                    }
                    config.save()?;
                    println!("✅ Set {} to: {}", key.as_str(), value.trim());
                }
                _ => config.print_all(),
            }
            Ok(())
        }
        Commands::Unset { key } => {
            let mut config = Config::load()?;
            let key = parse_key(&key);
            config.unset_value(key);
            config.save()?;
            println!("✅ Unset {}", key.as_str());
            Ok(())
        }
    }
}
