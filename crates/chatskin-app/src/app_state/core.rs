//! ChatskinApp struct definition and constructor.

use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{broadcast, watch};
use winit::window::Window;

use chatskin_common::{Event, EventBus};
use chatskin_config::{LaunchOverrides, SkinConfig};
use chatskin_enforcer::EnforcerHandle;
use chatskin_webview::{ChatWebView, MutationRoute};

/// Top-level application state.
pub struct ChatskinApp {
    pub(super) config: SkinConfig,
    pub(super) config_path: Option<PathBuf>,
    pub(super) overrides: LaunchOverrides,
    pub(super) event_bus: EventBus,
    pub(super) page_events: broadcast::Receiver<Event>,

    // Windowing
    pub(super) window: Option<Arc<Window>>,
    pub(super) webview: Option<ChatWebView>,

    // Enforcer loop and its page bridge
    pub(super) tokio_runtime: Option<tokio::runtime::Runtime>,
    pub(super) enforcer: Option<EnforcerHandle>,
    pub(super) mutation_route: MutationRoute,
    pub(super) scripts_rx: Option<Receiver<String>>,

    // Live config reload
    pub(super) config_rx: Option<watch::Receiver<SkinConfig>>,

    pub(super) should_exit: bool,
    pub(super) last_poll: Instant,
}

impl ChatskinApp {
    pub fn new(config: SkinConfig, config_path: Option<PathBuf>, overrides: LaunchOverrides) -> Self {
        let event_bus = EventBus::new(64);
        let page_events = event_bus.subscribe();
        Self {
            config,
            config_path,
            overrides,
            event_bus,
            page_events,
            window: None,
            webview: None,
            tokio_runtime: None,
            enforcer: None,
            mutation_route: MutationRoute::new(),
            scripts_rx: None,
            config_rx: None,
            should_exit: false,
            last_poll: Instant::now(),
        }
    }
}
