use super::data::{Config, ConfigKey};
use crate::core::gemini::DEFAULT_BASE_URL;
use crate::core::settings::{Model, Temperature};
use tempfile::TempDir;

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_config.toml");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");

    assert_eq!(config, Config::default());
}

#[test]
fn test_config_persistence_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config
        .set_value(ConfigKey::DefaultModel, "gemini-1.5-pro")
        .expect("set model");
    config
        .set_value(ConfigKey::Temperature, "0.3")
        .expect("set temperature");
    config.save_to_path(&config_path).expect("save failed");

    let contents = std::fs::read_to_string(&config_path).expect("read back");
    assert!(contents.contains("default_model = \"gemini-1.5-pro\""));
    assert!(contents.contains("temperature = 0.3"));

    let mut loaded = Config::load_from_path(&config_path).expect("load failed");
    assert_eq!(loaded.default_model, Some(Model::Gemini15Pro));
    assert_eq!(loaded.temperature, Some(Temperature::new(0.3)));

    loaded.unset_value(ConfigKey::DefaultModel);
    loaded.save_to_path(&config_path).expect("second save failed");
    let reloaded = Config::load_from_path(&config_path).expect("reload failed");
    assert_eq!(reloaded.default_model, None);
    assert_eq!(reloaded.temperature, Some(Temperature::new(0.3)));
}

#[test]
fn test_invalid_toml_reports_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "default_model = [").expect("write");

    let err = Config::load_from_path(&config_path).unwrap_err();

    assert!(err.to_string().starts_with("Failed to parse config at"));
}

#[test]
fn test_unknown_model_in_file_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "default_model = \"gpt-4o\"\n").expect("write");

    assert!(Config::load_from_path(&config_path).is_err());
}

#[test]
fn test_set_value_validates_input() {
    let mut config = Config::default();
    assert!(config.set_value(ConfigKey::DefaultModel, "gpt-4o").is_err());
    assert!(config.set_value(ConfigKey::Temperature, "2").is_err());
    assert!(config.set_value(ConfigKey::BaseUrl, "ftp://nope").is_err());
    assert_eq!(config, Config::default());
}

#[test]
fn test_cli_overrides_take_precedence() {
    let config = Config {
        default_model: Some(Model::GeminiPro),
        temperature: Some(Temperature::new(0.1)),
        base_url: None,
    };

    assert_eq!(config.model_or(None), Model::GeminiPro);
    assert_eq!(config.model_or(Some(Model::Gemini15Pro)), Model::Gemini15Pro);
    assert_eq!(config.temperature_or(None), Temperature::new(0.1));
    assert_eq!(
        config.temperature_or(Some(Temperature::new(0.9))),
        Temperature::new(0.9)
    );
    assert_eq!(Config::default().model_or(None), Model::Gemini15Flash);
}

#[test]
fn test_base_url_falls_back_to_default() {
    let mut config = Config::default();
    assert_eq!(config.base_url(), DEFAULT_BASE_URL);

    config.base_url = Some("   ".to_string());
    assert_eq!(config.base_url(), DEFAULT_BASE_URL);

    config
        .set_value(ConfigKey::BaseUrl, " http://localhost:8080/v1beta ")
        .expect("set base url");
    assert_eq!(config.base_url(), "http://localhost:8080/v1beta");
}

#[test]
fn test_config_key_names_round_trip() {
    for key in [ConfigKey::DefaultModel, ConfigKey::Temperature, ConfigKey::BaseUrl] {
        assert_eq!(ConfigKey::parse(key.as_str()), Some(key));
    }
    assert_eq!(ConfigKey::parse("api-key"), None);
}
