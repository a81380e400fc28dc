//! A single reassertion pass.
//!
//! Strip the marker class, inject the stylesheet, push the inline
//! overrides, flush. Running a pass twice in a row leaves the document
//! exactly as one pass does.

use chatskin_common::{ConfigError, DomError};
use chatskin_config::sanitize::validate_css_color;
use chatskin_config::schema::{InlineOverride, SkinConfig, ThemeConfig};
use chatskin_config::selectors::SelectorTable;
use serde::Serialize;
use tracing::{debug, warn};

use crate::document::{Anchor, Document};
use crate::injector::Injector;
use crate::stylesheet::{generate_stylesheet, GeneratorOptions};

/// What one pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassReport {
    /// Anchors the marker class was found on and removed from.
    pub markers_removed: usize,
    /// Override entries pushed (whether or not anything matched).
    pub overrides_applied: usize,
    /// Elements that received an inline override.
    pub elements_touched: usize,
    pub stylesheet_bytes: usize,
}

/// Everything a pass needs, resolved once from configuration.
#[derive(Debug, Clone)]
pub struct Enforcer {
    theme: ThemeConfig,
    selectors: SelectorTable,
    options: GeneratorOptions,
    overrides: Vec<InlineOverride>,
    injector: Injector,
    stylesheet: String,
}

impl Enforcer {
    pub fn new(
        theme: ThemeConfig,
        selectors: SelectorTable,
        options: GeneratorOptions,
        overrides: Vec<InlineOverride>,
        style_id: impl Into<String>,
    ) -> Self {
        let stylesheet = generate_stylesheet(&theme, &selectors, &options);
        Self {
            theme,
            selectors,
            options,
            overrides,
            injector: Injector::new(style_id),
            stylesheet,
        }
    }

    pub fn from_config(config: &SkinConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.theme_config(),
            config.selector_table()?,
            GeneratorOptions::from_config(config),
            config.overrides.clone(),
            config.host.style_id.clone(),
        ))
    }

    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    pub fn selectors(&self) -> &SelectorTable {
        &self.selectors
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn overrides(&self) -> &[InlineOverride] {
        &self.overrides
    }

    pub fn injector(&self) -> &Injector {
        &self.injector
    }

    /// The generated stylesheet. Generation is deterministic, so it is
    /// produced once and reused by every pass.
    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    /// Run one pass against `doc`.
    pub fn run_pass<D: Document + ?Sized>(&self, doc: &mut D) -> Result<PassReport, DomError> {
        let mut report = PassReport {
            stylesheet_bytes: self.stylesheet.len(),
            ..PassReport::default()
        };

        let marker = self.options.marker_class.as_str();
        for anchor in [Anchor::Root, Anchor::Body] {
            if doc.remove_class(anchor, marker)? {
                report.markers_removed += 1;
            }
        }

        self.injector.apply(doc, &self.stylesheet)?;

        for entry in &self.overrides {
            let value = self.theme.colors.get(entry.role);
            if let Err(e) = validate_css_color(value) {
                warn!(property = %entry.property, error = %e, "Override value rejected");
                continue;
            }
            let selector = self.selectors.get(entry.region);
            report.elements_touched += doc.set_inline_style(selector, &entry.property, value)?;
            report.overrides_applied += 1;
        }

        doc.flush()?;

        debug!(
            markers = report.markers_removed,
            overrides = report.overrides_applied,
            touched = report.elements_touched,
            "Pass complete"
        );
        Ok(report)
    }
}
