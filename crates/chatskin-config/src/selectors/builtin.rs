//! Selector tables for known host markup generations.

use super::Region;

/// Names of the built-in host versions, newest markup convention last.
pub const BUILT_IN_HOST_VERSIONS: &[&str] = &["legacy-class", "nav-container", "data-testid"];

const HEADINGS: &str = "h1, h2, h3, h4, h5, h6";

/// Plain semantic class names.
const LEGACY_CLASS: &[(Region, &str)] = &[
    (Region::Body, "body"),
    (Region::Sidebar, ".sidebar"),
    (Region::SidebarItem, ".sidebar .conversation"),
    (Region::SidebarItemActive, ".sidebar .conversation.active"),
    (Region::NewChatButton, ".new-chat-button"),
    (Region::MainContent, ".main-content"),
    (Region::MessageContainer, ".message"),
    (Region::UserMessage, ".message.user"),
    (Region::AssistantMessage, ".message.assistant"),
    (Region::MessageText, ".message p"),
    (Region::CodeBlock, "pre"),
    (Region::CodeInBlock, "pre code"),
    (Region::CodeInline, "code"),
    (Region::SyntaxHighlight, ".hljs"),
    (Region::InputField, ".chat-input textarea"),
    (Region::SendButton, ".chat-input button"),
    (Region::Link, "a"),
    (Region::Heading, HEADINGS),
];

/// `data-element-id` containers with utility-class content.
const NAV_CONTAINER: &[(Region, &str)] = &[
    (Region::Body, "body"),
    (Region::Sidebar, r#"[data-element-id="nav-container"]"#),
    (
        Region::SidebarItem,
        r#"nav div[class*="cursor-pointer"], div[class*="chat-item"]"#,
    ),
    (
        Region::SidebarItemActive,
        r#"nav div[class*="cursor-pointer"][class*="bg-"], div[class*="chat-item"][class*="bg-"]"#,
    ),
    (
        Region::NewChatButton,
        r#"button[class*="bg-orange"], button[class*="bg-amber"], button[class*="new-chat"]"#,
    ),
    (Region::MainContent, r#"[data-element-id="main-content-area"]"#),
    (
        Region::MessageContainer,
        r#"div[class*="message"], div[class*="chat-message"]"#,
    ),
    (
        Region::UserMessage,
        r#"div[class*="user"], div[class*="human"], div[data-message-author="user"]"#,
    ),
    (
        Region::AssistantMessage,
        r#"div[class*="assistant"], div[class*="ai"], div[data-message-author="assistant"]"#,
    ),
    (
        Region::MessageText,
        r#"div[class*="message"] p, div[class*="chat-message"] p"#,
    ),
    (Region::CodeBlock, "pre"),
    (Region::CodeInBlock, "pre code"),
    (Region::CodeInline, "code"),
    (Region::SyntaxHighlight, ".hljs"),
    (Region::InputField, r#"textarea, input[type="text"]"#),
    (
        Region::SendButton,
        r#"button[class*="send"], button[type="submit"]"#,
    ),
    (Region::Link, "a"),
    (Region::Heading, HEADINGS),
];

/// Test ids and aria labels.
const DATA_TESTID: &[(Region, &str)] = &[
    (Region::Body, "body"),
    (
        Region::Sidebar,
        r#"nav[aria-label="Sidebar"], [data-testid="sidebar"]"#,
    ),
    (
        Region::SidebarItem,
        r#"nav a[href^="/chat/"], [data-testid="conversation-item"]"#,
    ),
    (
        Region::SidebarItemActive,
        r#"nav a[aria-current="page"], [data-testid="conversation-item"][data-active="true"]"#,
    ),
    (
        Region::NewChatButton,
        r#"a[href="/new"], button[aria-label="New chat"]"#,
    ),
    (Region::MainContent, r#"main, [data-testid="chat-main"]"#),
    (
        Region::MessageContainer,
        r#"[data-testid="message"], div[data-test-render-count]"#,
    ),
    (Region::UserMessage, r#"[data-testid="user-message"]"#),
    (
        Region::AssistantMessage,
        r#".font-claude-message, [data-testid="assistant-message"]"#,
    ),
    (
        Region::MessageText,
        r#"[data-testid="user-message"] p, .font-claude-message p"#,
    ),
    (Region::CodeBlock, "pre"),
    (Region::CodeInBlock, "pre code"),
    (Region::CodeInline, "code"),
    (Region::SyntaxHighlight, ".hljs, .code-block__code"),
    (
        Region::InputField,
        r#"div[contenteditable="true"], textarea"#,
    ),
    (
        Region::SendButton,
        r#"button[aria-label="Send message"], button[aria-label="Send Message"]"#,
    ),
    (Region::Link, "a"),
    (Region::Heading, HEADINGS),
];

pub(super) fn entries(version: &str) -> Option<&'static [(Region, &'static str)]> {
    match version {
        "legacy-class" => Some(LEGACY_CLASS),
        "nav-container" => Some(NAV_CONTAINER),
        "data-testid" => Some(DATA_TESTID),
        _ => None,
    }
}
