//! Gemini Playground Library
//!
//! This library exposes modules for testing and external use.
//! The main binary is in `src/main.rs`.

pub mod api;
pub mod config;
pub mod error;
pub mod gemini;
pub mod services;
/// Per-user chat session store
pub mod session;
/// Application state shared by the handlers
pub mod state;
/// Sidebar menu model and page shell
pub mod ui;
