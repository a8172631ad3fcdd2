//! Terminal UI components for cinerec.
//!
//! Uses `ratatui` + `crossterm` for rendering. The search panel and poster
//! marquee are plain state machines; the terminal loop only dispatches keys
//! and background results to them.

/// Top-level application state and key handling.
pub mod app;
/// Popular-movie poster marquee.
pub mod marquee;
mod runner;
/// Search panel state machine.
pub mod search_panel;
mod ui;

pub use runner::run_app;
