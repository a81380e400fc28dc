//! Top-level application state for `chatskin run`.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the window, the hosted page, the tokio runtime running
//! the enforcer loop and the config reloader.

mod core;
mod event_handler;
mod init;
mod polling;
mod shutdown;
mod types;

pub use core::ChatskinApp;
