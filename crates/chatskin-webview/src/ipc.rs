//! IPC protocol between the page and Rust.
//!
//! Messages flow in both directions:
//! - **JS -> Rust**: the bootstrap script calls
//!   `window.ipc.postMessage(JSON.stringify({kind, payload}))`, which
//!   triggers the `ipc_handler` registered on the WebView.
//! - **Rust -> JS**: pass scripts call the helpers the bootstrap script
//!   installs on `window.__chatskin`.

use chatskin_enforcer::MutationRecord;
use serde::{Deserialize, Serialize};

/// A raw IPC message from JavaScript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcMessage {
    /// The message type.
    pub kind: String,
    #[serde(default)]
    pub payload: IpcPayload,
}

/// Payload of an IPC message, either a plain string or structured JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IpcPayload {
    Text(String),
    Json(serde_json::Value),
    #[default]
    None,
}

impl IpcMessage {
    /// Parse an IPC message from a raw JSON string (from JS postMessage).
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn text(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: IpcPayload::Text(text.into()),
        }
    }

    pub fn json(kind: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            payload: IpcPayload::Json(value),
        }
    }

    fn field(&self, name: &str) -> Option<String> {
        match &self.payload {
            IpcPayload::Text(text) => Some(text.clone()),
            IpcPayload::Json(value) => value.get(name)?.as_str().map(str::to_string),
            IpcPayload::None => None,
        }
    }
}

/// A decoded message from the bootstrap script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeMessage {
    /// Element-adding batch seen by the page observer.
    Mutation(MutationRecord),
    /// The document finished parsing.
    Ready { url: String },
    /// A pass script threw.
    Error { message: String },
}

impl BridgeMessage {
    /// Decode a raw IPC body. Unknown kinds and malformed payloads give `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::from_ipc(IpcMessage::from_json(raw)?)
    }

    pub fn from_ipc(message: IpcMessage) -> Option<Self> {
        match message.kind.as_str() {
            "mutation" => match message.payload {
                IpcPayload::Json(value) => serde_json::from_value(value).ok().map(Self::Mutation),
                _ => None,
            },
            "ready" => Some(Self::Ready {
                url: message.field("url").unwrap_or_default(),
            }),
            "error" => Some(Self::Error {
                message: message
                    .field("message")
                    .unwrap_or_else(|| "unknown error".to_string()),
            }),
            _ => None,
        }
    }
}

/// Installed as an initialization script, so it runs before page scripts
/// on every navigation. Pass scripts only call into `window.__chatskin`.
pub const BOOTSTRAP_SCRIPT: &str = r#"
(function() {
    if (window.__chatskin) return;

    function send(kind, payload) {
        window.ipc.postMessage(JSON.stringify({
            kind: kind,
            payload: payload === undefined ? null : payload
        }));
    }

    var observing = false;
    var observer = new MutationObserver(function(mutations) {
        if (!observing) return;
        var added = 0;
        for (var i = 0; i < mutations.length; i++) {
            var nodes = mutations[i].addedNodes;
            for (var j = 0; j < nodes.length; j++) {
                if (nodes[j].nodeType === Node.ELEMENT_NODE) added++;
            }
        }
        if (added > 0) send('mutation', { added: added });
    });

    function anchor(which) {
        return which === 'root' ? document.documentElement : document.body;
    }

    window.__chatskin = {
        removeStyles: function(id) {
            document.querySelectorAll('style#' + CSS.escape(id)).forEach(function(node) {
                node.remove();
            });
        },
        appendStyle: function(id, css) {
            var style = document.createElement('style');
            style.id = id;
            style.textContent = css;
            (document.head || document.documentElement).appendChild(style);
        },
        removeClass: function(which, cls) {
            var el = anchor(which);
            if (el) el.classList.remove(cls);
        },
        setInline: function(selector, property, value) {
            document.querySelectorAll(selector).forEach(function(el) {
                el.style.setProperty(property, value, 'important');
            });
        },
        observe: function(on) {
            observing = on;
            observer.disconnect();
            if (on && document.body) {
                observer.observe(document.body, { childList: true, subtree: true });
            }
        },
        report: function(where, e) {
            send('error', { message: where + ': ' + String(e) });
        }
    };

    function ready() {
        send('ready', { url: location.href });
    }

    if (document.readyState === 'loading') {
        document.addEventListener('DOMContentLoaded', ready);
    } else {
        ready();
    }
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mutation() {
        let msg = BridgeMessage::parse(r#"{"kind":"mutation","payload":{"added":3}}"#);
        assert_eq!(msg, Some(BridgeMessage::Mutation(MutationRecord::added(3))));
    }

    #[test]
    fn mutation_without_count_is_rejected() {
        assert!(BridgeMessage::parse(r#"{"kind":"mutation","payload":null}"#).is_none());
        assert!(BridgeMessage::parse(r#"{"kind":"mutation","payload":"3"}"#).is_none());
    }

    #[test]
    fn parses_ready_with_url() {
        let msg = BridgeMessage::parse(
            r#"{"kind":"ready","payload":{"url":"https://claude.ai/new"}}"#,
        );
        assert_eq!(
            msg,
            Some(BridgeMessage::Ready {
                url: "https://claude.ai/new".into()
            })
        );
    }

    #[test]
    fn ready_without_payload_has_empty_url() {
        let msg = BridgeMessage::parse(r#"{"kind":"ready"}"#);
        assert_eq!(msg, Some(BridgeMessage::Ready { url: String::new() }));
    }

    #[test]
    fn parses_error_from_text_or_object() {
        let text = BridgeMessage::parse(r#"{"kind":"error","payload":"boom"}"#);
        assert_eq!(
            text,
            Some(BridgeMessage::Error {
                message: "boom".into()
            })
        );

        let object =
            BridgeMessage::parse(r#"{"kind":"error","payload":{"message":"pass: boom"}}"#);
        assert_eq!(
            object,
            Some(BridgeMessage::Error {
                message: "pass: boom".into()
            })
        );
    }

    #[test]
    fn unknown_kind_and_garbage_are_ignored() {
        assert!(BridgeMessage::parse(r#"{"kind":"resize","payload":null}"#).is_none());
        assert!(BridgeMessage::parse("not json").is_none());
        assert!(BridgeMessage::parse(r#"{"payload":1}"#).is_none());
    }

    #[test]
    fn constructors_round_trip_through_json() {
        let raw = serde_json::to_string(&IpcMessage::json(
            "mutation",
            serde_json::json!({ "added": 1 }),
        ))
        .unwrap();
        assert_eq!(
            BridgeMessage::parse(&raw),
            Some(BridgeMessage::Mutation(MutationRecord::added(1)))
        );

        let raw = serde_json::to_string(&IpcMessage::text("error", "x")).unwrap();
        assert!(matches!(
            BridgeMessage::parse(&raw),
            Some(BridgeMessage::Error { .. })
        ));
    }

    #[test]
    fn bootstrap_exposes_pass_helpers() {
        for helper in [
            "removeStyles",
            "appendStyle",
            "removeClass",
            "setInline",
            "observe",
            "report",
        ] {
            assert!(
                BOOTSTRAP_SCRIPT.contains(&format!("{helper}: function")),
                "missing {helper}"
            );
        }
    }

    #[test]
    fn bootstrap_only_reports_element_additions() {
        assert!(BOOTSTRAP_SCRIPT.contains("Node.ELEMENT_NODE"));
        assert!(BOOTSTRAP_SCRIPT.contains("childList: true, subtree: true"));
        assert!(BOOTSTRAP_SCRIPT.contains("if (added > 0) send('mutation'"));
    }
}
