//! Standalone browser userscript export.
//!
//! Renders a userscript that carries the generated stylesheet and override
//! list and runs the same loop inside the page: create-or-replace style
//! node, marker stripping, inline overrides, a body observer, the periodic
//! timer and the deferred retry.

use chatskin_config::schema::{InlineOverride, SkinConfig, ThemeConfig};
use chatskin_config::selectors::SelectorTable;
use chatskin_config::sanitize::validate_css_color;
use serde::Serialize;

use crate::stylesheet::{generate_stylesheet, GeneratorOptions};

/// Everything besides the palette that goes into the script.
#[derive(Debug, Clone, PartialEq)]
pub struct UserscriptOptions {
    pub name: String,
    pub version: String,
    /// `@match` pattern.
    pub url_match: String,
    pub style_id: String,
    pub tick_interval_ms: u64,
    pub deferred_retry_ms: u64,
    pub mutation_debounce_ms: u64,
    pub generator: GeneratorOptions,
}

impl UserscriptOptions {
    pub fn from_config(config: &SkinConfig) -> Self {
        Self {
            name: format!("chatskin ({})", config.theme.name),
            version: env!("CARGO_PKG_VERSION").to_string(),
            url_match: config.host.url_match.clone(),
            style_id: config.host.style_id.clone(),
            tick_interval_ms: config.enforcer.tick_interval_ms,
            deferred_retry_ms: config.enforcer.deferred_retry_ms,
            mutation_debounce_ms: config.enforcer.mutation_debounce_ms,
            generator: GeneratorOptions::from_config(config),
        }
    }
}

/// An override with its selector and value resolved.
#[derive(Debug, Serialize)]
struct ResolvedOverride<'a> {
    selector: &'a str,
    property: &'a str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScriptConfig<'a> {
    css: &'a str,
    style_id: &'a str,
    marker: &'a str,
    overrides: Vec<ResolvedOverride<'a>>,
    tick_ms: u64,
    deferred_ms: u64,
    debounce_ms: u64,
}

/// Render the userscript.
pub fn render_userscript(
    theme: &ThemeConfig,
    selectors: &SelectorTable,
    overrides: &[InlineOverride],
    options: &UserscriptOptions,
) -> String {
    let css = generate_stylesheet(theme, selectors, &options.generator);

    let resolved = overrides
        .iter()
        .filter_map(|entry| {
            let value = theme.colors.get(entry.role);
            validate_css_color(value).ok()?;
            Some(ResolvedOverride {
                selector: selectors.get(entry.region),
                property: &entry.property,
                value,
            })
        })
        .collect();

    let config = ScriptConfig {
        css: &css,
        style_id: &options.style_id,
        marker: &options.generator.marker_class,
        overrides: resolved,
        tick_ms: options.tick_interval_ms,
        deferred_ms: options.deferred_retry_ms,
        debounce_ms: options.mutation_debounce_ms,
    };
    let config_json = serde_json::to_string_pretty(&config)
        .unwrap_or_else(|_| "{}".to_string());

    let mut out = String::new();
    out.push_str("// ==UserScript==\n");
    out.push_str(&format!("// @name         {}\n", header_value(&options.name)));
    out.push_str("// @namespace    chatskin\n");
    out.push_str(&format!("// @version      {}\n", header_value(&options.version)));
    out.push_str("// @description  Re-skins the chat interface with a fixed palette\n");
    out.push_str(&format!("// @match        {}\n", header_value(&options.url_match)));
    out.push_str("// @grant        none\n");
    out.push_str("// @run-at       document-start\n");
    out.push_str("// ==/UserScript==\n\n");
    out.push_str("(() => {\n  'use strict';\n\n");
    out.push_str(&format!("  const CONFIG = {};\n", indent(&config_json)));
    out.push_str(SCRIPT_BODY);
    out.push_str("})();\n");
    out
}

/// Header lines end at the newline; keep values on one line.
fn header_value(value: &str) -> String {
    value.replace(['\n', '\r'], " ")
}

fn indent(json: &str) -> String {
    json.replace('\n', "\n  ")
}

const SCRIPT_BODY: &str = r#"
  const styleSelector = 'style#' + CSS.escape(CONFIG.styleId);

  function removeStyle() {
    document.querySelectorAll(styleSelector).forEach((node) => node.remove());
  }

  function applyStyle() {
    removeStyle();
    const style = document.createElement('style');
    style.id = CONFIG.styleId;
    style.textContent = CONFIG.css;
    (document.head || document.documentElement).appendChild(style);
  }

  function stripMarker() {
    document.documentElement.classList.remove(CONFIG.marker);
    if (document.body) document.body.classList.remove(CONFIG.marker);
  }

  function applyOverrides() {
    for (const o of CONFIG.overrides) {
      document.querySelectorAll(o.selector).forEach((el) => {
        el.style.setProperty(o.property, o.value, 'important');
      });
    }
  }

  function pass(kind) {
    if (tornDown) return;
    try {
      stripMarker();
      applyStyle();
      applyOverrides();
    } catch (e) {
      console.error('[chatskin] ' + kind + ' pass failed', e);
    }
  }

  let observer = null;
  let timer = null;
  let debounce = null;
  let deferred = null;
  let started = false;
  let tornDown = false;

  function start() {
    pass('initial');
    if (!started) {
      started = true;
      observer = new MutationObserver((mutations) => {
        const added = mutations.some((m) =>
          Array.from(m.addedNodes).some((n) => n.nodeType === Node.ELEMENT_NODE));
        if (added && debounce === null) {
          debounce = setTimeout(() => { debounce = null; pass('mutation'); }, CONFIG.debounceMs);
        }
      });
      observer.observe(document.body, { childList: true, subtree: true });
      timer = setInterval(() => pass('tick'), CONFIG.tickMs);
    }
    clearTimeout(deferred);
    deferred = setTimeout(() => { deferred = null; pass('deferred'); }, CONFIG.deferredMs);
  }

  window.__chatskin = {
    pass: () => pass('manual'),
    teardown() {
      tornDown = true;
      if (observer) observer.disconnect();
      clearInterval(timer);
      clearTimeout(debounce);
      clearTimeout(deferred);
      removeStyle();
    },
  };

  if (document.readyState === 'loading') {
    document.addEventListener('DOMContentLoaded', start);
  } else {
    start();
  }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn render_default() -> String {
        let config = SkinConfig::default();
        render_userscript(
            &config.theme_config(),
            &config.selector_table().unwrap(),
            &config.overrides,
            &UserscriptOptions::from_config(&config),
        )
    }

    fn embedded_config(script: &str) -> serde_json::Value {
        let start = script.find("const CONFIG = ").unwrap() + "const CONFIG = ".len();
        let end = script[start..].find(";\n").unwrap() + start;
        serde_json::from_str(&script[start..end]).unwrap()
    }

    #[test]
    fn header_carries_match_pattern() {
        let script = render_default();
        assert!(script.starts_with("// ==UserScript==\n"));
        assert!(script.contains("// @match        https://claude.ai/*\n"));
        assert!(script.contains("// ==/UserScript==\n"));
    }

    #[test]
    fn embedded_css_matches_generator() {
        let config = SkinConfig::default();
        let css = generate_stylesheet(
            &config.theme_config(),
            &config.selector_table().unwrap(),
            &GeneratorOptions::from_config(&config),
        );

        let embedded = embedded_config(&render_default());
        assert_eq!(embedded["css"], css.as_str());
        assert_eq!(embedded["styleId"], "chatskin-theme");
        assert_eq!(embedded["marker"], "dark");
        assert_eq!(embedded["tickMs"], 1000);
    }

    #[test]
    fn overrides_are_resolved_to_selectors_and_values() {
        let embedded = embedded_config(&render_default());
        let overrides = embedded["overrides"].as_array().unwrap();
        assert_eq!(overrides.len(), 3);
        assert_eq!(overrides[0]["selector"], "body");
        assert_eq!(overrides[0]["property"], "background-color");
        assert_eq!(overrides[0]["value"], "#FAFAFA");
    }

    #[test]
    fn script_contains_the_loop() {
        let script = render_default();
        assert!(script.contains("new MutationObserver"));
        assert!(script.contains("setInterval"));
        assert!(script.contains("DOMContentLoaded"));
        assert!(script.contains("teardown()"));
        assert!(script.trim_end().ends_with("})();"));
    }

    #[test]
    fn newlines_cannot_break_out_of_the_header() {
        let mut config = SkinConfig::default();
        config.host.url_match = "https://x/*\n// @grant GM_xmlhttpRequest".into();
        let script = render_userscript(
            &config.theme_config(),
            &config.selector_table().unwrap(),
            &config.overrides,
            &UserscriptOptions::from_config(&config),
        );
        assert!(!script.contains("\n// @grant GM_xmlhttpRequest"));
    }

    #[test]
    fn style_id_is_escaped_in_selectors() {
        let script = render_default();
        assert!(script.contains("'style#' + CSS.escape(CONFIG.styleId)"));
        assert!(!script.contains("'style#' + CONFIG.styleId"));
    }

    #[test]
    fn teardown_cancels_every_timer() {
        let script = render_default();
        let teardown = &script[script.find("teardown() {").unwrap()..];
        let teardown = &teardown[..teardown.find("},").unwrap()];
        for call in [
            "tornDown = true;",
            "observer.disconnect()",
            "clearInterval(timer);",
            "clearTimeout(debounce);",
            "clearTimeout(deferred);",
            "removeStyle();",
        ] {
            assert!(teardown.contains(call), "teardown is missing {call}");
        }
        assert!(script.contains("deferred = setTimeout("));
        assert!(script.contains("if (tornDown) return;"));
    }
}
