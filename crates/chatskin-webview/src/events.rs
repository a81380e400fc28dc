//! Page load events.

use chatskin_common::Event;
use serde::{Deserialize, Serialize};

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded.
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

impl PageLoadState {
    /// The application event published for this state.
    pub fn into_event(self, url: String) -> Event {
        match self {
            Self::Started => Event::PageLoadStarted { url },
            Self::Finished => Event::PageLoaded { url },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_wry_events() {
        assert_eq!(
            PageLoadState::from(wry::PageLoadEvent::Started),
            PageLoadState::Started
        );
        assert_eq!(
            PageLoadState::from(wry::PageLoadEvent::Finished),
            PageLoadState::Finished
        );
    }

    #[test]
    fn states_become_bus_events() {
        let started = PageLoadState::Started.into_event("https://claude.ai".into());
        assert!(matches!(started, Event::PageLoadStarted { ref url } if url == "https://claude.ai"));

        let loaded = PageLoadState::Finished.into_event("https://claude.ai/new".into());
        assert!(matches!(loaded, Event::PageLoaded { ref url } if url.ends_with("/new")));
    }
}
