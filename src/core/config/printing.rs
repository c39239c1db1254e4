use crate::core::config::data::{Config, ConfigKey};

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        for key in [ConfigKey::DefaultModel, ConfigKey::Temperature, ConfigKey::BaseUrl] {
            match self.display_value(key) {
                Some(value) => println!("  {}: {value}", key.as_str()),
                None => println!("  {}: (unset)", key.as_str()),
            }
        }
    }
}
