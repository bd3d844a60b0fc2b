//! Shared validation helpers used by all domain validators.

/// Push an error if `value` is outside `[min, max]` (integer).
pub(crate) fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error if any entry of `values` is blank.
pub(crate) fn validate_non_blank(errors: &mut Vec<String>, name: &str, values: &[String]) {
    if values.iter().any(|v| v.trim().is_empty()) {
        errors.push(format!("{name} must not contain empty entries"));
    }
}
