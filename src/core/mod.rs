pub mod app;
pub mod config;
pub mod conversation;
pub mod gemini;
pub mod message;
pub mod provider;
pub mod session;
pub mod settings;
