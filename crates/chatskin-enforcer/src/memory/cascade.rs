//! Stylesheet text parsing for the cascade.
//!
//! Understands plain style rules and skips at-rules with their blocks.
//! Rules whose selector fails to parse are dropped, as a browser would.

use super::selector::{SelectorList, Specificity};

/// One `property: value [!important]` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub important: bool,
}

impl Declaration {
    pub fn important(property: &str, value: &str) -> Self {
        Self {
            property: property.to_string(),
            value: value.to_string(),
            important: true,
        }
    }
}

#[derive(Debug, Clone)]
pub(super) struct Rule {
    pub(super) selectors: SelectorList,
    pub(super) declarations: Vec<Declaration>,
}

/// Cascade rank of a candidate declaration. Higher wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(super) struct Precedence {
    pub(super) important: bool,
    pub(super) inline: bool,
    pub(super) specificity: Specificity,
    pub(super) order: usize,
}

pub(super) fn parse_stylesheet(css: &str) -> Vec<Rule> {
    let css = strip_comments(css);
    let mut rules = Vec::new();
    let mut rest = css.as_str();

    while let Some(open) = find_outside_quotes(rest, '{') {
        let prelude = rest[..open].trim();
        let after = &rest[open + 1..];
        let Some(close) = matching_brace(after) else {
            break;
        };
        let block = &after[..close];
        rest = &after[close + 1..];

        if prelude.starts_with('@') {
            continue;
        }

        match SelectorList::parse(prelude) {
            Ok(selectors) => rules.push(Rule {
                selectors,
                declarations: parse_declarations(block),
            }),
            Err(e) => tracing::debug!(error = %e, "Skipping rule"),
        }
    }

    rules
}

/// Parse the body of a rule or an inline `style` attribute.
pub(super) fn parse_declarations(block: &str) -> Vec<Declaration> {
    split_outside_quotes(block, ';')
        .into_iter()
        .filter_map(|raw| {
            let (property, value) = raw.split_once(':')?;
            let property = property.trim().to_ascii_lowercase();
            let mut value = value.trim();
            if property.is_empty() || value.is_empty() {
                return None;
            }

            let mut important = false;
            if let Some(bang) = value.rfind('!') {
                if value[bang + 1..].trim().eq_ignore_ascii_case("important") {
                    important = true;
                    value = value[..bang].trim_end();
                }
            }

            Some(Declaration {
                property,
                value: value.to_string(),
                important,
            })
        })
        .collect()
}

fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

fn find_outside_quotes(text: &str, target: char) -> Option<usize> {
    let mut quote = None;
    for (i, ch) in text.char_indices() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None if ch == '"' || ch == '\'' => quote = Some(ch),
            None if ch == target => return Some(i),
            None => {}
        }
    }
    None
}

/// Index of the `}` closing a block whose `{` was just consumed.
fn matching_brace(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote = None;
    for (i, ch) in text.char_indices() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None => match ch {
                '"' | '\'' => quote = Some(ch),
                '{' => depth += 1,
                '}' if depth == 0 => return Some(i),
                '}' => depth -= 1,
                _ => {}
            },
        }
    }
    None
}

fn split_outside_quotes(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quote = None;
    let mut parens = 0usize;
    let mut start = 0;

    for (i, ch) in text.char_indices() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None => match ch {
                '"' | '\'' => quote = Some(ch),
                '(' => parens += 1,
                ')' => parens = parens.saturating_sub(1),
                c if c == separator && parens == 0 => {
                    parts.push(&text[start..i]);
                    start = i + c.len_utf8();
                }
                _ => {}
            },
        }
    }
    parts.push(&text[start..]);
    parts
}
