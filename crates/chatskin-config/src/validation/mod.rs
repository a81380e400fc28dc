//! Full configuration validation.
//!
//! Validates palette and typography values, selector tables, reserved
//! identifiers and timing ranges. Each domain has its own submodule; this
//! orchestrator calls them all and collects errors into a single
//! `ConfigError`.

mod enforcer;
mod helpers;
mod host;
mod theme;

#[cfg(test)]
mod tests;

use crate::schema::SkinConfig;
use chatskin_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &SkinConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    theme::validate_colors(&mut errors, config);
    theme::validate_fonts(&mut errors, config);
    theme::validate_spacing(&mut errors, config);
    host::validate_host(&mut errors, config);
    host::validate_webview(&mut errors, config);
    enforcer::validate_timing(&mut errors, config);
    enforcer::validate_overrides(&mut errors, config);

    theme::check_appearance(config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
