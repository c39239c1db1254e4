//! Prints the models the sidebar can cycle through.

use crate::core::config::Config;
use crate::core::settings::Model;
use std::error::Error;

pub fn list_models() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    let default = config.model_or(None);

    println!("🤖 Available Gemini models");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for model in Model::ALL {
        let marker = if model == default { "🎯" } else { "  " };
        println!("{marker} {:<18} {}", model.as_str(), model.description());
    }
    println!();
    println!("Set a default with: gemchat set default-model <model>");
    Ok(())
}
