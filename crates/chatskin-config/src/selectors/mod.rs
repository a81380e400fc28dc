//! Versioned selector tables.
//!
//! The host page exposes no stable styling contract, so every region of the
//! UI is located through a best-effort selector guessed from its markup.
//! Each markup generation gets its own table; switching host versions means
//! switching tables, never touching the pass logic.

mod builtin;

use std::collections::BTreeMap;

use chatskin_common::ConfigError;
use serde::{Deserialize, Serialize};

use crate::sanitize::validate_css_selector;

pub use builtin::BUILT_IN_HOST_VERSIONS;

/// A named logical area of the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Body,
    Sidebar,
    SidebarItem,
    SidebarItemActive,
    NewChatButton,
    MainContent,
    MessageContainer,
    UserMessage,
    AssistantMessage,
    MessageText,
    CodeBlock,
    CodeInBlock,
    CodeInline,
    SyntaxHighlight,
    InputField,
    SendButton,
    Link,
    Heading,
}

impl Region {
    pub const ALL: [Region; 18] = [
        Region::Body,
        Region::Sidebar,
        Region::SidebarItem,
        Region::SidebarItemActive,
        Region::NewChatButton,
        Region::MainContent,
        Region::MessageContainer,
        Region::UserMessage,
        Region::AssistantMessage,
        Region::MessageText,
        Region::CodeBlock,
        Region::CodeInBlock,
        Region::CodeInline,
        Region::SyntaxHighlight,
        Region::InputField,
        Region::SendButton,
        Region::Link,
        Region::Heading,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Region::Body => "body",
            Region::Sidebar => "sidebar",
            Region::SidebarItem => "sidebar_item",
            Region::SidebarItemActive => "sidebar_item_active",
            Region::NewChatButton => "new_chat_button",
            Region::MainContent => "main_content",
            Region::MessageContainer => "message_container",
            Region::UserMessage => "user_message",
            Region::AssistantMessage => "assistant_message",
            Region::MessageText => "message_text",
            Region::CodeBlock => "code_block",
            Region::CodeInBlock => "code_in_block",
            Region::CodeInline => "code_inline",
            Region::SyntaxHighlight => "syntax_highlight",
            Region::InputField => "input_field",
            Region::SendButton => "send_button",
            Region::Link => "link",
            Region::Heading => "heading",
        }
    }
}

/// Immutable region → selector mapping for one host markup version.
///
/// Construction guarantees that every [`Region`] has a selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorTable {
    version: String,
    entries: BTreeMap<Region, String>,
}

impl SelectorTable {
    /// Build a table, checking that every region is covered and every
    /// selector passes sanitization.
    pub fn new(
        version: impl Into<String>,
        entries: BTreeMap<Region, String>,
    ) -> Result<Self, ConfigError> {
        let version = version.into();
        let missing: Vec<&str> = Region::ALL
            .iter()
            .filter(|r| !entries.contains_key(r))
            .map(|r| r.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "selector table '{version}' is missing regions: {}",
                missing.join(", ")
            )));
        }

        for (region, selector) in &entries {
            validate_css_selector(selector).map_err(|e| {
                ConfigError::ValidationError(format!(
                    "host.selectors.{}: {e}",
                    region.as_str()
                ))
            })?;
        }

        Ok(Self { version, entries })
    }

    /// Look up a built-in table by host version name.
    pub fn builtin(version: &str) -> Option<Self> {
        let entries = builtin::entries(version)?;
        Some(Self {
            version: version.to_string(),
            entries: entries
                .iter()
                .map(|(region, selector)| (*region, selector.to_string()))
                .collect(),
        })
    }

    /// Return a copy with some regions re-targeted.
    pub fn with_overrides(&self, overrides: &BTreeMap<Region, String>) -> Result<Self, ConfigError> {
        let mut entries = self.entries.clone();
        for (region, selector) in overrides {
            entries.insert(*region, selector.trim().to_string());
        }
        Self::new(self.version.clone(), entries)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Selector for a region.
    pub fn get(&self, region: Region) -> &str {
        self.entries
            .get(&region)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Region, &str)> {
        self.entries.iter().map(|(r, s)| (*r, s.as_str()))
    }
}

/// Split a selector list on its top-level commas.
///
/// Commas inside attribute brackets, parentheses or quoted strings do not
/// split. Empty alternatives are dropped.
pub fn split_selector_list(selector: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, ch) in selector.char_indices() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None => match ch {
                '"' | '\'' => quote = Some(ch),
                '[' | '(' => depth += 1,
                ']' | ')' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    parts.push(selector[start..i].trim());
                    start = i + 1;
                }
                _ => {}
            },
        }
    }
    parts.push(selector[start..].trim());
    parts.retain(|p| !p.is_empty());
    parts
}
