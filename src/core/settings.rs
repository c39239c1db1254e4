//! Values collected by the configuration panel.
//!
//! [`ChatSettings`] is re-read by the completion bridge on every turn, so any
//! change made in the sidebar applies to the next request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const API_KEY_URL: &str = "https://makersuite.google.com/app/apikey";

/// Secret API key pasted into the sidebar. Never logged or persisted.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        self.0.trim()
    }

    /// Whitespace-only keys count as missing.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn push(&mut self, ch: char) {
        self.0.push(ch);
    }

    pub fn push_str(&mut self, text: &str) {
        self.0.push_str(text);
    }

    pub fn pop(&mut self) -> Option<char> {
        self.0.pop()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Number of characters entered, used to draw the mask.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub fn masked(&self) -> String {
        "•".repeat(self.char_count())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Model {
    #[default]
    Gemini15Flash,
    Gemini15Pro,
    GeminiPro,
}

impl Model {
    pub const ALL: [Model; 3] = [Model::Gemini15Flash, Model::Gemini15Pro, Model::GeminiPro];

    pub fn as_str(self) -> &'static str {
        match self {
            Model::Gemini15Flash => "gemini-1.5-flash",
            Model::Gemini15Pro => "gemini-1.5-pro",
            Model::GeminiPro => "gemini-pro",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Model::Gemini15Flash => "Fastest and most cost-effective",
            Model::Gemini15Pro => "More capable for complex tasks",
            Model::GeminiPro => "Standard model",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|m| *m == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Model {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|model| model.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|m| m.as_str()).collect();
                format!("unknown model '{wanted}' (expected one of: {})", known.join(", "))
            })
    }
}

impl TryFrom<String> for Model {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Model> for String {
    fn from(value: Model) -> Self {
        value.as_str().to_string()
    }
}

/// Sampling temperature, always within `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Temperature(f32);

impl Temperature {
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 1.0;
    pub const STEP: f32 = 0.1;
    pub const DEFAULT: f32 = 0.7;

    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self(Self::DEFAULT);
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn increase(self) -> Self {
        Self::new(round_tenth(self.0 + Self::STEP))
    }

    pub fn decrease(self) -> Self {
        Self::new(round_tenth(self.0 - Self::STEP))
    }
}

fn round_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

impl Default for Temperature {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl From<f32> for Temperature {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<Temperature> for f32 {
    fn from(value: Temperature) -> Self {
        value.0
    }
}

impl From<f64> for Temperature {
    fn from(value: f64) -> Self {
        Self::new(value as f32)
    }
}

// Widened through a two-decimal round so config files read `0.7`, not
// `0.699999988079071`.
impl From<Temperature> for f64 {
    fn from(value: Temperature) -> Self {
        (f64::from(value.0) * 100.0).round() / 100.0
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl FromStr for Temperature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f32 = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid temperature '{}'", s.trim()))?;
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(format!(
                "temperature must be between {:.1} and {:.1}",
                Self::MIN,
                Self::MAX
            ));
        }
        Ok(Self(value))
    }
}

/// Snapshot of the sidebar handed to the completion bridge.
#[derive(Debug, Clone, Default)]
pub struct ChatSettings {
    pub api_key: ApiKey,
    pub model: Model,
    pub temperature: Temperature,
}

impl ChatSettings {
    pub fn new(api_key: ApiKey, model: Model, temperature: Temperature) -> Self {
        Self {
            api_key,
            model,
            temperature,
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("AIza-secret");
        assert_eq!(format!("{key:?}"), "ApiKey(<redacted>)");
        let settings = ChatSettings::new(key, Model::default(), Temperature::default());
        assert!(!format!("{settings:?}").contains("AIza-secret"));
    }

    #[test]
    fn whitespace_api_key_is_empty() {
        assert!(ApiKey::new("   ").is_empty());
        assert!(ApiKey::default().is_empty());
        assert!(!ApiKey::new(" k ").is_empty());
        assert_eq!(ApiKey::new(" k ").expose(), "k");
    }

    #[test]
    fn mask_matches_character_count() {
        let key = ApiKey::new("abcé");
        assert_eq!(key.masked(), "••••");
    }

    #[test]
    fn model_cycling_wraps() {
        assert_eq!(Model::Gemini15Flash.next(), Model::Gemini15Pro);
        assert_eq!(Model::GeminiPro.next(), Model::Gemini15Flash);
        assert_eq!(Model::Gemini15Flash.previous(), Model::GeminiPro);
    }

    #[test]
    fn model_parses_case_insensitively() {
        assert_eq!("Gemini-1.5-Pro".parse::<Model>(), Ok(Model::Gemini15Pro));
        assert!("gpt-4o".parse::<Model>().is_err());
    }

    #[test]
    fn temperature_clamps_to_unit_range() {
        assert_eq!(Temperature::new(1.7).value(), 1.0);
        assert_eq!(Temperature::new(-0.2).value(), 0.0);
        assert_eq!(Temperature::new(f32::NAN), Temperature::default());
    }

    #[test]
    fn temperature_steps_by_a_tenth() {
        let mut t = Temperature::default();
        t = t.increase();
        assert_eq!(t.to_string(), "0.8");
        for _ in 0..10 {
            t = t.increase();
        }
        assert_eq!(t.value(), 1.0);
        for _ in 0..20 {
            t = t.decrease();
        }
        assert_eq!(t.value(), 0.0);
    }

    #[test]
    fn temperature_parse_rejects_out_of_range() {
        assert!("1.5".parse::<Temperature>().is_err());
        assert!("warm".parse::<Temperature>().is_err());
        assert_eq!("0.3".parse::<Temperature>().map(f32::from), Ok(0.3));
    }
}
