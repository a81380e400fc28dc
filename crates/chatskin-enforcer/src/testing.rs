//! Shared fixtures: a chat page laid out like the `nav-container` markup.

use chatskin_config::selectors::Region;

use crate::memory::{MemoryDocument, NodeId};

/// Styling the host ships with, including its own dark mode.
pub(crate) const HOST_CSS: &str = r#"
body { background-color: #1F1E1D; color: #ECECEC; font-family: Georgia, serif; }
.dark { background-color: #000000 !important; color: #FFFFFF !important; }
[data-element-id="nav-container"] { background-color: #171717 !important; }
pre { background-color: #0D0D0D; }
textarea { background-color: #2F2F2F; }
"#;

pub(crate) struct ChatPage {
    pub doc: MemoryDocument,
    pub nodes: Vec<(Region, NodeId)>,
}

impl ChatPage {
    pub fn node(&self, region: Region) -> NodeId {
        self.nodes
            .iter()
            .find(|(r, _)| *r == region)
            .map(|(_, n)| *n)
            .unwrap()
    }
}

/// A dark-mode chat page with one element per region.
pub(crate) fn chat_page() -> ChatPage {
    let mut doc = MemoryDocument::new();
    doc.add_host_stylesheet(HOST_CSS);

    let root = doc.root();
    let body = doc.body();
    doc.add_class(root, "dark");
    doc.add_class(body, "dark");

    let sidebar = doc.element(body, "div", &[("data-element-id", "nav-container")]);
    let nav = doc.element(sidebar, "nav", &[]);
    let new_chat = doc.element(nav, "button", &[("class", "bg-orange-500")]);
    doc.text(new_chat, "New chat");
    let item = doc.element(nav, "div", &[("class", "cursor-pointer")]);
    doc.text(item, "Earlier chat");
    let active = doc.element(nav, "div", &[("class", "cursor-pointer bg-neutral")]);
    doc.text(active, "Current chat");

    let main = doc.element(body, "div", &[("data-element-id", "main-content-area")]);
    let user = doc.element(main, "div", &[("class", "message user-turn")]);
    let user_text = doc.element(user, "p", &[]);
    doc.text(user_text, "How do I print?");

    let assistant = doc.element(main, "div", &[("class", "message assistant-turn")]);
    let answer = doc.element(assistant, "p", &[]);
    let inline_code = doc.element(answer, "code", &[]);
    doc.text(inline_code, "println!");
    let pre = doc.element(assistant, "pre", &[]);
    let block_code = doc.element(pre, "code", &[("class", "hljs")]);
    doc.text(block_code, "fn main() {}");

    let heading = doc.element(main, "h2", &[]);
    doc.text(heading, "Notes");
    let link = doc.element(main, "a", &[("href", "/docs")]);
    doc.text(link, "docs");
    let input = doc.element(main, "textarea", &[]);
    let send = doc.element(main, "button", &[("type", "submit")]);
    doc.text(send, "Send");

    ChatPage {
        doc,
        nodes: vec![
            (Region::Body, body),
            (Region::Sidebar, sidebar),
            (Region::SidebarItem, item),
            (Region::SidebarItemActive, active),
            (Region::NewChatButton, new_chat),
            (Region::MainContent, main),
            (Region::MessageContainer, user),
            (Region::UserMessage, user),
            (Region::AssistantMessage, assistant),
            (Region::MessageText, user_text),
            (Region::CodeBlock, pre),
            (Region::CodeInBlock, block_code),
            (Region::CodeInline, inline_code),
            (Region::SyntaxHighlight, block_code),
            (Region::InputField, input),
            (Region::SendButton, send),
            (Region::Link, link),
            (Region::Heading, heading),
        ],
    }
}
