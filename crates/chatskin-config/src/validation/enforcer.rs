//! Loop timing and override list validation.

use super::helpers::{push_err, validate_range};
use crate::sanitize::{validate_css_custom_property, validate_css_property};
use crate::schema::SkinConfig;

pub(crate) fn validate_timing(errors: &mut Vec<String>, config: &SkinConfig) {
    let e = &config.enforcer;
    validate_range(errors, "enforcer.tick_interval_ms", e.tick_interval_ms, 100, 10_000);
    validate_range(errors, "enforcer.deferred_retry_ms", e.deferred_retry_ms, 0, 30_000);
    validate_range(errors, "enforcer.mutation_debounce_ms", e.mutation_debounce_ms, 0, 2_000);
}

pub(crate) fn validate_overrides(errors: &mut Vec<String>, config: &SkinConfig) {
    for (i, o) in config.overrides.iter().enumerate() {
        push_err(
            errors,
            &format!("overrides[{i}].property"),
            validate_css_property(&o.property),
        );
    }

    for (i, v) in config.host_variables.iter().enumerate() {
        push_err(
            errors,
            &format!("host_variables[{i}].name"),
            validate_css_custom_property(&v.name),
        );
    }
}
