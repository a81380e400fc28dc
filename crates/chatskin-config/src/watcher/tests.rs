//! Tests for the config file watcher.

use super::*;
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn watcher_new_with_nonexistent_path_succeeds() {
    let watcher = ConfigWatcher::new(vec![PathBuf::from(
        "/tmp/nonexistent_chatskin_test.toml",
    )]);
    assert!(watcher.is_ok());
}

#[test]
fn watcher_requires_at_least_one_path() {
    assert!(ConfigWatcher::new(Vec::new()).is_err());
}

#[test]
fn debounce_is_configurable() {
    let watcher = ConfigWatcher::new(vec![PathBuf::from("/tmp/config.toml")])
        .unwrap()
        .with_debounce(Duration::from_millis(20));
    assert_eq!(watcher.debounce(), Duration::from_millis(20));
}
