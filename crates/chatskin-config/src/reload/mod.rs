//! Live config reload manager.
//!
//! Combines the file watcher with config loading so a saved config or
//! theme file reaches the enforcer without restarting.

mod manager;


pub use manager::ReloadManager;
