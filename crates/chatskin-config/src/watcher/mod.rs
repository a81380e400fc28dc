//! File watcher for live config reload.
//!
//! Uses the `notify` crate to watch the config file (and a file-based
//! theme, if one is configured) with a debounce window so editors that
//! save via write + rename produce a single reload.

mod config_watcher;

#[cfg(test)]
mod tests;

pub use config_watcher::{ConfigWatcher, DEFAULT_DEBOUNCE};
