//! gemchat is a terminal chatbot for Google's Gemini models.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the conversation store, chat settings, the completion
//!   bridge to Gemini, configuration, and the application state machine.
//! - [`ui`] renders the terminal interface and runs the interactive event
//!   loop that drives user input and display updates.
//! - [`api`] defines the `generateContent` request and response payloads.
//! - [`utils`] holds small helpers for input sanitizing, URLs and logging.
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`], which
//! loads configuration and dispatches into [`ui::chat_loop`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
