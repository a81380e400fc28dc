//! Graceful shutdown: tear down the enforcer, drop the page, stop the runtime.

use chatskin_common::Event;

use super::core::ChatskinApp;
use super::types::SHUTDOWN_TIMEOUT;

impl ChatskinApp {
    /// Perform graceful shutdown of all subsystems.
    ///
    /// Order matters:
    /// 1. Tear down the enforcer loop (its last script removes the style node)
    /// 2. Deliver that script while the webview still exists
    /// 3. Destroy the webview and stop listening for reloads
    /// 4. Shut down the tokio runtime (cancels the config watcher)
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating graceful shutdown");

        if let Some(handle) = self.enforcer.take() {
            if let Some(rt) = &self.tokio_runtime {
                match rt.block_on(handle.teardown()) {
                    Ok(stats) => tracing::info!(
                        passes = stats.total,
                        failed = stats.failed,
                        "Enforcer stopped"
                    ),
                    Err(e) => tracing::warn!("Enforcer teardown failed: {e}"),
                }
            }
            self.poll_scripts();
        }

        self.webview = None;
        self.scripts_rx = None;
        self.config_rx = None;

        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(SHUTDOWN_TIMEOUT);
        }

        self.event_bus.publish(Event::Shutdown);
        self.window = None;
        self.should_exit = true;

        tracing::info!("Graceful shutdown complete");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::app_state::core::ChatskinApp;
    use chatskin_config::{LaunchOverrides, SkinConfig};
    use chatskin_enforcer::Trigger;

    fn app() -> ChatskinApp {
        ChatskinApp::new(SkinConfig::default(), None, LaunchOverrides::default())
    }

    #[test]
    fn shutdown_on_fresh_app_does_not_panic() {
        let mut app = app();
        app.shutdown();

        assert!(app.enforcer.is_none());
        assert!(app.webview.is_none());
        assert!(app.tokio_runtime.is_none());
        assert!(app.should_exit);
    }

    #[test]
    fn shutdown_is_idempotent() {
        let mut app = app();
        app.shutdown();
        app.shutdown();
        assert!(app.tokio_runtime.is_none());
    }

    #[test]
    fn shutdown_tears_down_a_watching_loop() {
        let mut app = app();
        assert!(app.start_runtime());
        assert!(app.start_enforcer());

        app.enforcer.as_ref().unwrap().send(Trigger::DomReady).unwrap();
        let initial = app
            .scripts_rx
            .as_ref()
            .unwrap()
            .recv_timeout(Duration::from_secs(5))
            .unwrap();
        assert!(initial.contains("cs.observe(true);"));
        assert!(app.mutation_route.is_connected());

        app.shutdown();
        assert!(!app.mutation_route.is_connected());
        assert!(app.enforcer.is_none());
        assert!(app.scripts_rx.is_none());
        assert!(app.tokio_runtime.is_none());
    }

    #[test]
    fn enforcer_needs_a_runtime() {
        let mut app = app();
        assert!(!app.start_enforcer());
        assert!(app.enforcer.is_none());
    }
}
