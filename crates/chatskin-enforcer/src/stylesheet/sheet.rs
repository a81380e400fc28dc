//! Rule builder that validates every value before it reaches the output.

use chatskin_config::sanitize::{validate_css_color, validate_css_font_family, validate_css_length};
use chatskin_config::selectors::split_selector_list;

/// A declaration value and how to validate it.
pub(super) enum Value<'a> {
    Color(&'a str),
    Font(&'a str),
    Length(&'a str),
    /// Trusted literal.
    Fixed(&'static str),
    /// A validated value surrounded by literal text.
    Framed {
        prefix: &'static str,
        inner: Box<Value<'a>>,
        suffix: &'static str,
    },
}

impl<'a> Value<'a> {
    /// `1px solid <color>`
    pub(super) fn border(color: &'a str) -> Self {
        Value::Framed {
            prefix: "1px solid ",
            inner: Box::new(Value::Color(color)),
            suffix: "",
        }
    }

    pub(super) fn framed(prefix: &'static str, inner: Value<'a>, suffix: &'static str) -> Self {
        Value::Framed {
            prefix,
            inner: Box::new(inner),
            suffix,
        }
    }

    fn render(&self) -> Result<String, String> {
        match self {
            Value::Color(v) => validate_css_color(v).map(|()| v.trim().to_string()),
            Value::Font(v) => validate_css_font_family(v).map(|()| v.trim().to_string()),
            Value::Length(v) => validate_css_length(v).map(|()| v.trim().to_string()),
            Value::Fixed(v) => Ok((*v).to_string()),
            Value::Framed {
                prefix,
                inner,
                suffix,
            } => inner.render().map(|v| format!("{prefix}{v}{suffix}")),
        }
    }
}

/// Accumulates rules into stylesheet text.
pub(super) struct Sheet {
    css: String,
    important: bool,
}

impl Sheet {
    pub(super) fn new(important: bool) -> Self {
        Self {
            css: String::new(),
            important,
        }
    }

    pub(super) fn section(&mut self, title: &str) {
        self.css.push_str(&format!("/* {title} */\n"));
    }

    /// Emit `selector { ... }`. Declarations whose value fails validation
    /// are dropped; a rule left with no declarations is omitted.
    pub(super) fn rule(&mut self, selector: &str, declarations: &[(&str, Value<'_>)]) {
        let bang = if self.important { " !important" } else { "" };
        let mut body = String::new();

        for (property, value) in declarations {
            match value.render() {
                Ok(rendered) => body.push_str(&format!("  {property}: {rendered}{bang};\n")),
                Err(e) => {
                    tracing::warn!(
                        selector,
                        property,
                        error = %e,
                        "Theme value rejected by sanitizer"
                    );
                }
            }
        }

        if body.is_empty() {
            return;
        }

        self.css.push_str(selector);
        self.css.push_str(" {\n");
        self.css.push_str(&body);
        self.css.push_str("}\n\n");
    }

    pub(super) fn finish(self) -> String {
        self.css
    }
}

/// Append `suffix` to every alternative of a selector list:
/// `a, b` + `:hover` gives `a:hover, b:hover`.
pub(super) fn with_suffix(selector: &str, suffix: &str) -> String {
    split_selector_list(selector)
        .into_iter()
        .map(|alt| format!("{alt}{suffix}"))
        .collect::<Vec<_>>()
        .join(", ")
}
