//! Window creation, runtime startup, enforcer spawn and webview setup.

use std::sync::Arc;

use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use chatskin_config::ReloadManager;
use chatskin_enforcer::{Enforcer, LoopTiming};
use chatskin_webview::{BridgeRoutes, ChatWebView, ScriptDocument};

use super::core::ChatskinApp;

impl ChatskinApp {
    /// Bring up everything `run` needs. Returns `false` if a step failed
    /// and the event loop should exit.
    pub(super) fn initialize(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let started = self.initialize_window(event_loop)
            && self.start_runtime()
            && self.start_enforcer()
            && self.create_webview();
        if started {
            self.start_config_reload();
        }
        started
    }

    fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = WindowAttributes::default()
            .with_title("chatskin")
            .with_inner_size(winit::dpi::LogicalSize::new(
                f64::from(self.config.webview.width),
                f64::from(self.config.webview.height),
            ));

        match event_loop.create_window(attrs) {
            Ok(w) => {
                self.window = Some(Arc::new(w));
                true
            }
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                false
            }
        }
    }

    pub(super) fn start_runtime(&mut self) -> bool {
        if self.tokio_runtime.is_some() {
            return true;
        }
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build();
        match rt {
            Ok(rt) => {
                self.tokio_runtime = Some(rt);
                true
            }
            Err(e) => {
                tracing::error!("Failed to start tokio runtime: {e}");
                false
            }
        }
    }

    /// Spawn the reassertion loop over a script-backed document. The loop
    /// stays idle until the page reports `ready`.
    pub(super) fn start_enforcer(&mut self) -> bool {
        let Some(rt) = &self.tokio_runtime else {
            return false;
        };

        let enforcer = match Enforcer::from_config(&self.config) {
            Ok(e) => e,
            Err(e) => {
                tracing::error!("Cannot build enforcer: {e}");
                return false;
            }
        };

        let (scripts_tx, scripts_rx) = std::sync::mpsc::channel();
        let doc = ScriptDocument::new(scripts_tx, self.mutation_route.clone());
        let timing = LoopTiming::from(&self.config.enforcer);

        let _guard = rt.enter();
        self.enforcer = Some(chatskin_enforcer::spawn(enforcer, doc, timing));
        self.scripts_rx = Some(scripts_rx);
        tracing::info!(
            theme = %self.config.theme.name,
            host = %self.config.host.version,
            "Enforcer started"
        );
        true
    }

    fn create_webview(&mut self) -> bool {
        let (Some(window), Some(enforcer)) = (&self.window, &self.enforcer) else {
            return false;
        };

        let size = window.inner_size();
        let routes = BridgeRoutes {
            control: enforcer.control(),
            mutations: self.mutation_route.clone(),
            events: self.event_bus.sender(),
        };

        match ChatWebView::build(
            window.as_ref(),
            (size.width, size.height),
            &self.config.webview,
            routes,
        ) {
            Ok(webview) => {
                self.webview = Some(webview);
                true
            }
            Err(e) => {
                tracing::error!("Failed to create webview: {e}");
                false
            }
        }
    }

    /// Watch the config file. Without a config path there is nothing to
    /// watch and the startup config stays in effect.
    pub(super) fn start_config_reload(&mut self) {
        let (Some(rt), Some(path)) = (&self.tokio_runtime, &self.config_path) else {
            tracing::info!("No config file to watch, live reload disabled");
            return;
        };

        let (_, rx) = rt.block_on(ReloadManager::start_with(
            path.clone(),
            self.overrides.clone(),
        ));
        self.config_rx = Some(rx);
    }
}
