//! # factotum
//!
//! A command-line chat client that wires a local conversational model to a
//! small set of tools: clock, calculator, dictionary stub, Wikipedia
//! lookups, weather forecasts, and one-off delegation to a second coding
//! model.
//!
//! The crate follows the "tools in a loop" pattern:
//! 1. Read a line from the console and append it to the session history.
//! 2. Send the history plus tool definitions to the chat endpoint.
//! 3. If the model requests tools, dispatch each one in order, append the
//!    results, and resend - up to a fixed per-turn budget.
//! 4. Print the first plain-text reply and go back to reading input.

pub mod client;
pub mod config;
pub mod io;
pub mod prompt;
pub mod tools;
pub mod types;

pub use client::{ChatClient, TurnOutcome};
pub use config::Config;
