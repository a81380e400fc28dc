//! Webview bridge for enforcing a theme on the live chat page.
//!
//! Wraps the `wry` crate to provide:
//! - A bootstrap script that exposes DOM helpers and an observer to Rust
//! - A JSON IPC protocol for mutation, readiness and error reports
//! - [`ScriptDocument`], a [`chatskin_enforcer::Document`] that batches
//!   operations into one script per pass
//! - [`ChatWebView`], the hosted page with IPC routed to the enforcer

pub mod events;
pub mod host;
pub mod ipc;
pub mod script;

pub use events::PageLoadState;
pub use host::{BridgeRoutes, ChatWebView};
pub use ipc::{BridgeMessage, IpcMessage, IpcPayload, BOOTSTRAP_SCRIPT};
pub use script::{MutationRoute, ScriptDocument};
