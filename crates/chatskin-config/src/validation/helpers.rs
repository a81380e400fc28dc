//! Shared validation helpers used by all domain validators.

/// Push an error if `value` is outside `[min, max]`.
pub(crate) fn validate_range(errors: &mut Vec<String>, name: &str, value: u64, min: u64, max: u64) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push `name: message` if the check failed.
pub(crate) fn push_err(errors: &mut Vec<String>, name: &str, result: Result<(), String>) {
    if let Err(e) = result {
        errors.push(format!("{name}: {e}"));
    }
}
