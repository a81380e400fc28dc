use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Application-level events shared between the webview host, the config
/// reloader and the enforcer bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    PageLoadStarted { url: String },
    PageLoaded { url: String },
    ConfigReloaded,
    Shutdown,
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: Event) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// A sender that can be moved into callbacks living on other threads.
    pub fn sender(&self) -> broadcast::Sender<Event> {
        self.sender.clone()
    }
}
