//! Stylesheet generation from a palette and a selector table.
//!
//! Pure and deterministic: the same theme, table and options always give
//! byte-identical output. Every value is validated on the way in and any
//! value the sanitizer rejects is left out with a warning.

mod sheet;

#[cfg(test)]
mod tests;

use chatskin_config::sanitize::{validate_css_custom_property, validate_identifier};
use chatskin_config::schema::{
    default_host_variables, HostVariable, SkinConfig, ThemeConfig,
};
use chatskin_config::selectors::{Region, SelectorTable};

use sheet::{with_suffix, Sheet, Value};

/// Knobs that shape the generated text without being part of the palette.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorOptions {
    /// Append `!important` to every declaration.
    pub important: bool,
    /// Host class whose styling is neutralized.
    pub marker_class: String,
    /// Host custom properties forced in the `:root` block.
    pub host_variables: Vec<HostVariable>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            important: true,
            marker_class: "dark".into(),
            host_variables: default_host_variables(),
        }
    }
}

impl GeneratorOptions {
    pub fn from_config(config: &SkinConfig) -> Self {
        Self {
            important: config.enforcer.important,
            marker_class: config.marker_class().to_string(),
            host_variables: config.host_variables.clone(),
        }
    }
}

/// Generate the complete stylesheet.
pub fn generate_stylesheet(
    theme: &ThemeConfig,
    selectors: &SelectorTable,
    options: &GeneratorOptions,
) -> String {
    let mut sheet = Sheet::new(options.important);

    root_rules(&mut sheet, theme, options);
    global_rules(&mut sheet, theme, selectors, options);
    sidebar_rules(&mut sheet, theme, selectors);
    message_rules(&mut sheet, theme, selectors);
    code_rules(&mut sheet, theme, selectors);
    input_rules(&mut sheet, theme, selectors);

    sheet.finish()
}

fn root_rules(sheet: &mut Sheet, theme: &ThemeConfig, options: &GeneratorOptions) {
    let c = &theme.colors;
    let mut declarations = Vec::with_capacity(options.host_variables.len() + 1);

    for var in &options.host_variables {
        match validate_css_custom_property(&var.name) {
            Ok(()) => declarations.push((var.name.as_str(), Value::Color(c.get(var.role)))),
            Err(e) => tracing::warn!(name = %var.name, error = %e, "Host variable rejected"),
        }
    }
    declarations.push(("color-scheme", Value::Fixed(theme.appearance.color_scheme())));

    sheet.section("host variables");
    sheet.rule(":root", &declarations);
}

fn global_rules(
    sheet: &mut Sheet,
    theme: &ThemeConfig,
    selectors: &SelectorTable,
    options: &GeneratorOptions,
) {
    let c = &theme.colors;
    let f = &theme.fonts;
    let link = selectors.get(Region::Link);

    sheet.section("global");
    sheet.rule(
        selectors.get(Region::Body),
        &[
            ("background-color", Value::Color(&c.background)),
            ("color", Value::Color(&c.text)),
            ("font-family", Value::Font(&f.primary)),
        ],
    );

    match validate_identifier(&options.marker_class) {
        Ok(()) => sheet.rule(
            &format!(".{}", options.marker_class),
            &[
                ("background-color", Value::Color(&c.background)),
                ("color", Value::Color(&c.text)),
            ],
        ),
        Err(e) => tracing::warn!(marker = %options.marker_class, error = %e, "Marker class rejected"),
    }

    sheet.rule(
        "*",
        &[
            ("scrollbar-width", Value::Fixed("thin")),
            (
                "scrollbar-color",
                Value::framed("", Value::Color(&c.border), " transparent"),
            ),
        ],
    );
    sheet.rule(
        "*::-webkit-scrollbar",
        &[("width", Value::Fixed("8px")), ("height", Value::Fixed("8px"))],
    );
    sheet.rule(
        "*::-webkit-scrollbar-track",
        &[("background", Value::Fixed("transparent"))],
    );
    sheet.rule(
        "*::-webkit-scrollbar-thumb",
        &[
            ("background-color", Value::Color(&c.border)),
            ("border-radius", Value::Fixed("4px")),
        ],
    );
    sheet.rule(
        "*::-webkit-scrollbar-thumb:hover",
        &[("background-color", Value::Color(&c.text_secondary))],
    );

    sheet.rule(
        selectors.get(Region::Heading),
        &[("color", Value::Color(&c.text))],
    );
    sheet.rule(link, &[("color", Value::Color(&c.accent))]);
    sheet.rule(
        &with_suffix(link, ":hover"),
        &[("color", Value::Color(&c.accent_hover))],
    );
    sheet.rule(
        "button, input, textarea",
        &[("font-family", Value::Font(&f.primary))],
    );
    sheet.rule(
        ".highlight",
        &[
            ("background-color", Value::Color(&c.accent_soft)),
            ("padding", Value::Fixed("2px 4px")),
            ("border-radius", Value::Fixed("4px")),
        ],
    );
}

fn sidebar_rules(sheet: &mut Sheet, theme: &ThemeConfig, selectors: &SelectorTable) {
    let c = &theme.colors;
    let radius = &theme.spacing.border_radius;
    let new_chat = selectors.get(Region::NewChatButton);
    let item = selectors.get(Region::SidebarItem);

    sheet.section("sidebar");
    sheet.rule(
        selectors.get(Region::Sidebar),
        &[
            ("background-color", Value::Color(&c.sidebar)),
            ("border-right", Value::border(&c.border)),
            ("color", Value::Color(&c.text)),
        ],
    );
    sheet.rule(
        new_chat,
        &[
            ("background-color", Value::Color(&c.accent)),
            ("color", Value::Color(&c.on_accent)),
            ("border", Value::Fixed("none")),
            ("border-radius", Value::Length(radius)),
            ("padding", Value::Fixed("8px 16px")),
            ("font-weight", Value::Fixed("500")),
            ("transition", Value::Fixed("all 0.2s ease")),
        ],
    );
    sheet.rule(
        &with_suffix(new_chat, ":hover"),
        &[
            ("background-color", Value::Color(&c.accent_hover)),
            ("transform", Value::Fixed("translateY(-1px)")),
        ],
    );
    sheet.rule(
        item,
        &[
            ("background-color", Value::Fixed("transparent")),
            ("color", Value::Color(&c.text_secondary)),
            ("border-radius", Value::Length(radius)),
            ("margin", Value::Fixed("2px 0")),
            ("padding", Value::Fixed("8px 12px")),
            ("transition", Value::Fixed("all 0.2s ease")),
        ],
    );
    sheet.rule(
        &with_suffix(item, ":hover"),
        &[
            ("background-color", Value::Color(&c.hover)),
            ("color", Value::Color(&c.text)),
        ],
    );
    sheet.rule(
        selectors.get(Region::SidebarItemActive),
        &[
            ("background-color", Value::Color(&c.accent_soft)),
            ("color", Value::Color(&c.text)),
        ],
    );
}

fn message_rules(sheet: &mut Sheet, theme: &ThemeConfig, selectors: &SelectorTable) {
    let c = &theme.colors;
    let s = &theme.spacing;

    sheet.section("messages");
    sheet.rule(
        selectors.get(Region::MainContent),
        &[
            ("background-color", Value::Color(&c.background)),
            ("color", Value::Color(&c.text)),
            ("font-family", Value::Font(&theme.fonts.primary)),
        ],
    );
    sheet.rule(
        selectors.get(Region::MessageContainer),
        &[
            ("background-color", Value::Fixed("transparent")),
            ("border", Value::Fixed("none")),
            ("margin", Value::framed("", Value::Length(&s.margin), " 0")),
            ("padding", Value::Length(&s.padding)),
        ],
    );

    // User and assistant bubbles share a shape and differ only in fill.
    for (region, fill) in [
        (Region::UserMessage, &c.user_message),
        (Region::AssistantMessage, &c.assistant_message),
    ] {
        sheet.rule(
            selectors.get(region),
            &[
                ("background-color", Value::Color(fill)),
                ("color", Value::Color(&c.text)),
                ("border-radius", Value::Length(&s.border_radius)),
                ("padding", Value::Length(&s.padding)),
                ("border", Value::border(&c.border)),
            ],
        );
    }

    sheet.rule(
        selectors.get(Region::MessageText),
        &[
            ("color", Value::Color(&c.text)),
            ("line-height", Value::Fixed("1.6")),
        ],
    );
}

fn code_rules(sheet: &mut Sheet, theme: &ThemeConfig, selectors: &SelectorTable) {
    let c = &theme.colors;
    let mono = &theme.fonts.mono;

    sheet.section("code");
    sheet.rule(
        selectors.get(Region::CodeBlock),
        &[
            ("background-color", Value::Color(&c.code_background)),
            ("border", Value::border(&c.code_border)),
            ("border-radius", Value::Length(&theme.spacing.border_radius)),
            ("padding", Value::Length(&theme.spacing.padding)),
            ("overflow-x", Value::Fixed("auto")),
            ("font-family", Value::Font(mono)),
        ],
    );
    sheet.rule(
        selectors.get(Region::CodeInBlock),
        &[
            ("background-color", Value::Fixed("transparent")),
            ("color", Value::Color(&c.text)),
            ("font-family", Value::Font(mono)),
            ("padding", Value::Fixed("0")),
        ],
    );
    sheet.rule(
        selectors.get(Region::CodeInline),
        &[
            ("background-color", Value::Color(&c.code_background)),
            ("color", Value::Color(&c.text)),
            ("padding", Value::Fixed("2px 4px")),
            ("border-radius", Value::Fixed("4px")),
            ("font-family", Value::Font(mono)),
            ("border", Value::border(&c.code_border)),
        ],
    );
    sheet.rule(
        selectors.get(Region::SyntaxHighlight),
        &[
            ("background-color", Value::Color(&c.code_background)),
            ("color", Value::Color(&c.text)),
        ],
    );
}

fn input_rules(sheet: &mut Sheet, theme: &ThemeConfig, selectors: &SelectorTable) {
    let c = &theme.colors;
    let s = &theme.spacing;
    let field = selectors.get(Region::InputField);
    let send = selectors.get(Region::SendButton);

    sheet.section("input");
    sheet.rule(
        field,
        &[
            ("background-color", Value::Color(&c.surface)),
            ("border", Value::border(&c.border)),
            ("border-radius", Value::Length(&s.border_radius)),
            ("color", Value::Color(&c.text)),
            ("padding", Value::Length(&s.padding)),
            ("font-family", Value::Font(&theme.fonts.primary)),
        ],
    );
    sheet.rule(
        &with_suffix(field, ":focus"),
        &[
            ("border-color", Value::Color(&c.accent)),
            ("outline", Value::Fixed("none")),
            (
                "box-shadow",
                Value::framed("0 0 0 2px ", Value::Color(&c.focus_ring), ""),
            ),
        ],
    );
    sheet.rule(
        send,
        &[
            ("background-color", Value::Color(&c.accent)),
            ("color", Value::Color(&c.on_accent)),
            ("border", Value::Fixed("none")),
            ("border-radius", Value::Length(&s.border_radius)),
            ("padding", Value::Fixed("8px 16px")),
            ("transition", Value::Fixed("all 0.2s ease")),
            ("font-weight", Value::Fixed("500")),
        ],
    );
    sheet.rule(
        &with_suffix(send, ":hover"),
        &[("background-color", Value::Color(&c.accent_hover))],
    );
    sheet.rule(
        &with_suffix(send, ":disabled"),
        &[
            ("background-color", Value::Color(&c.text_secondary)),
            ("cursor", Value::Fixed("not-allowed")),
        ],
    );
}
