//! Per-iteration polling: page events, config reloads and pass scripts.

use std::time::Instant;

use tokio::sync::broadcast::error::TryRecvError;
use winit::event_loop::{ActiveEventLoop, ControlFlow};

use chatskin_common::Event;
use chatskin_config::SkinConfig;
use chatskin_enforcer::{Enforcer, Trigger};

use super::core::ChatskinApp;
use super::types::POLL_INTERVAL;

impl ChatskinApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            self.poll_page_events();
            self.poll_config_reload();
            self.poll_scripts();
            self.poll_enforcer_health();
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }

    /// Evaluate every pass script the loop has flushed. Returns how many
    /// reached the page.
    pub(super) fn poll_scripts(&self) -> usize {
        let Some(rx) = &self.scripts_rx else {
            return 0;
        };

        let mut evaluated = 0;
        while let Ok(script) = rx.try_recv() {
            match &self.webview {
                Some(webview) => match webview.evaluate_script(&script) {
                    Ok(()) => evaluated += 1,
                    Err(e) => tracing::warn!("Failed to evaluate pass script: {e}"),
                },
                None => tracing::debug!("No webview, pass script dropped"),
            }
        }
        evaluated
    }

    /// A finished page load gets an extra pass; late host styles often
    /// arrive after `DOMContentLoaded`.
    pub(super) fn poll_page_events(&mut self) {
        loop {
            match self.page_events.try_recv() {
                Ok(Event::PageLoaded { url }) => {
                    tracing::debug!(url = %url, "Page loaded, reasserting");
                    self.trigger(Trigger::PassNow);
                }
                Ok(Event::PageLoadStarted { url }) => {
                    tracing::debug!(url = %url, "Navigation started");
                }
                Ok(_) => {}
                Err(TryRecvError::Lagged(n)) => {
                    tracing::warn!("Dropped {n} page events");
                }
                Err(_) => break,
            }
        }
    }

    pub(super) fn poll_config_reload(&mut self) {
        let Some(rx) = &mut self.config_rx else {
            return;
        };

        match rx.has_changed() {
            Ok(true) => {}
            Ok(false) => return,
            Err(_) => {
                tracing::info!("Config reloader stopped");
                self.config_rx = None;
                return;
            }
        }

        let config = rx.borrow_and_update().clone();
        self.apply_config(config);
    }

    /// Rebuild the enforcer from `config` and hand it to the loop. Timing
    /// and window settings keep their startup values.
    pub(super) fn apply_config(&mut self, config: SkinConfig) {
        match Enforcer::from_config(&config) {
            Ok(enforcer) => {
                tracing::info!(theme = %config.theme.name, "Config reloaded");
                self.trigger(Trigger::Reload(Box::new(enforcer)));
                self.config = config;
                self.event_bus.publish(Event::ConfigReloaded);
            }
            Err(e) => {
                tracing::warn!("Reloaded config rejected: {e}");
            }
        }
    }

    fn poll_enforcer_health(&mut self) {
        if self.enforcer.as_ref().is_some_and(|h| h.is_finished()) {
            tracing::error!("Enforcer loop stopped unexpectedly");
            self.enforcer = None;
        }
    }

    fn trigger(&self, trigger: Trigger) {
        if let Some(handle) = &self.enforcer {
            if let Err(e) = handle.send(trigger) {
                tracing::warn!("Enforcer unreachable: {e}");
            }
        }
    }
}
