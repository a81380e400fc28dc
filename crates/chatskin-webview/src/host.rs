//! The hosted chat page.

use chatskin_common::Event;
use chatskin_config::schema::WebViewSection;
use chatskin_enforcer::Trigger;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};
use wry::dpi::{PhysicalPosition, PhysicalSize, Position, Size};
use wry::{raw_window_handle, WebView, WebViewBuilder};

use crate::events::PageLoadState;
use crate::ipc::{BridgeMessage, BOOTSTRAP_SCRIPT};
use crate::script::MutationRoute;

/// Where page signals go.
#[derive(Clone)]
pub struct BridgeRoutes {
    /// Enforcer control channel; `ready` becomes `Trigger::DomReady`.
    pub control: mpsc::UnboundedSender<Trigger>,
    /// Mutation records, connected while the enforcer observes.
    pub mutations: MutationRoute,
    /// Page load notifications.
    pub events: broadcast::Sender<Event>,
}

/// A WebView showing the chat page with the bootstrap script installed.
pub struct ChatWebView {
    webview: WebView,
    url: String,
}

impl ChatWebView {
    /// Create the WebView as a child of `window`, filling `size`.
    pub fn build<W: raw_window_handle::HasWindowHandle>(
        window: &W,
        size: (u32, u32),
        config: &WebViewSection,
        routes: BridgeRoutes,
    ) -> Result<Self, wry::Error> {
        let mut builder = WebViewBuilder::new()
            .with_bounds(full_bounds(size))
            .with_devtools(config.devtools)
            .with_initialization_script(BOOTSTRAP_SCRIPT);

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        let ipc_routes = routes.clone();
        builder = builder.with_ipc_handler(move |request| {
            route_ipc(request.body(), &ipc_routes);
        });

        let events = routes.events;
        builder = builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            debug!(?state, url = %url, "page load");
            let _ = events.send(state.into_event(url));
        });

        let webview = builder.with_url(&config.url).build_as_child(window)?;
        info!(url = %config.url, "WebView created");

        Ok(Self {
            webview,
            url: config.url.clone(),
        })
    }

    /// The URL the WebView was opened with.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Execute JavaScript in the page.
    pub fn evaluate_script(&self, js: &str) -> Result<(), wry::Error> {
        self.webview.evaluate_script(js)
    }

    /// Resize to fill the parent window.
    pub fn resize(&self, size: (u32, u32)) -> Result<(), wry::Error> {
        self.webview.set_bounds(full_bounds(size))
    }
}

fn full_bounds((width, height): (u32, u32)) -> wry::Rect {
    wry::Rect {
        position: Position::Physical(PhysicalPosition::new(0, 0)),
        size: Size::Physical(PhysicalSize::new(width, height)),
    }
}

/// Dispatch one IPC body from the bootstrap script.
pub(crate) fn route_ipc(raw: &str, routes: &BridgeRoutes) {
    match BridgeMessage::parse(raw) {
        Some(BridgeMessage::Mutation(record)) => {
            if !routes.mutations.deliver(record) {
                debug!(added = record.added, "mutation dropped, not observing");
            }
        }
        Some(BridgeMessage::Ready { url }) => {
            info!(url = %url, "page ready");
            if routes.control.send(Trigger::DomReady).is_err() {
                warn!("enforcer stopped, ready signal dropped");
            }
        }
        Some(BridgeMessage::Error { message }) => {
            warn!(message = %message, "page script failed");
        }
        None => {
            warn!(body_len = raw.len(), "IPC message rejected");
        }
    }
}
