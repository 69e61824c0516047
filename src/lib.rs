//! Parley - a terminal chat client for WebSocket chat rooms
//!
//! This library exposes modules for use in integration tests and benches.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod input;
pub mod logging;
pub mod models;
pub mod session;
pub mod settings;
pub mod terminal;
pub mod traits;
pub mod ui;
pub mod view_state;
pub mod websocket;
