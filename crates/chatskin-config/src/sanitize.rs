//! CSS value sanitization to prevent CSS injection.
//!
//! Every configurable string ends up inside a generated stylesheet or a
//! script evaluated in the host page, so only safe formats are accepted:
//! - Colors: see [`crate::colors::validate_color`]
//! - Font families: quoted or unquoted names, comma-separated
//! - Lengths: numbers with an optional `px`/`em`/`rem`/`%`/`vh`/`vw` unit
//! - Selectors: anything without structural characters (`{`, `}`, `;`, `<`)
//! - Property names: lowercase identifiers, custom properties with `--`
//!
//! Rejects anything containing: `expression(`, `url(`, `javascript:`,
//! `eval(`, `import`, `@`, `behavior:`, `-moz-binding`, `</style`

use crate::colors::validate_color;

// =============================================================================
// VALIDATION
// =============================================================================

/// Validate a CSS color value.
pub fn validate_css_color(value: &str) -> Result<(), String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err("Empty CSS color value".to_string());
    }

    check_injection_patterns(trimmed)?;
    check_structural_chars(trimmed, &[';', '{', '}', '<', '>'])?;

    if validate_color(trimmed) {
        Ok(())
    } else {
        Err(format!(
            "Invalid CSS color: only hex (#rrggbb) and rgb()/rgba() allowed, got '{trimmed}'"
        ))
    }
}

/// Validate a CSS font-family value.
///
/// Accepts quoted or unquoted font names separated by commas.
/// Only allows: letters, digits, spaces, hyphens, underscores, quotes, commas.
pub fn validate_css_font_family(value: &str) -> Result<(), String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err("Empty font-family value".to_string());
    }

    check_injection_patterns(trimmed)?;

    for ch in trimmed.chars() {
        if !ch.is_alphanumeric()
            && ch != ' '
            && ch != '-'
            && ch != '_'
            && ch != '\''
            && ch != '"'
            && ch != ','
        {
            return Err(format!(
                "Invalid character '{ch}' in font-family: '{trimmed}'"
            ));
        }
    }

    Ok(())
}

/// Validate a CSS length (border radius, padding, margin).
///
/// Accepts integers and floats with an optional unit.
pub fn validate_css_length(value: &str) -> Result<(), String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err("Empty CSS length value".to_string());
    }

    check_injection_patterns(trimmed)?;

    let numeric_part = ["rem", "px", "em", "vh", "vw", "%"]
        .iter()
        .find_map(|unit| trimmed.strip_suffix(unit))
        .unwrap_or(trimmed);

    if numeric_part.parse::<f64>().is_err() {
        return Err(format!("Invalid CSS length: '{trimmed}'"));
    }

    Ok(())
}

/// Validate a selector (or comma-separated selector list).
///
/// Combinators and attribute selectors are allowed; anything that could
/// close the rule or the surrounding `<style>` element is not.
pub fn validate_css_selector(value: &str) -> Result<(), String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err("Empty selector".to_string());
    }

    check_injection_patterns(trimmed)?;
    check_structural_chars(trimmed, &['{', '}', ';', '<', '\\', '\n'])?;

    let mut brackets = 0i32;
    let mut parens = 0i32;
    for ch in trimmed.chars() {
        match ch {
            '[' => brackets += 1,
            ']' => brackets -= 1,
            '(' => parens += 1,
            ')' => parens -= 1,
            _ => {}
        }
        if brackets < 0 || parens < 0 {
            return Err(format!("Unbalanced selector: '{trimmed}'"));
        }
    }
    if brackets != 0 || parens != 0 {
        return Err(format!("Unbalanced selector: '{trimmed}'"));
    }

    Ok(())
}

/// Validate a CSS property name (`background-color`, `--main-dark-color`).
pub fn validate_css_property(value: &str) -> Result<(), String> {
    let body = value.strip_prefix("--").unwrap_or(value);

    if body.is_empty() {
        return Err(format!("Empty CSS property name: '{value}'"));
    }

    if !body
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(format!("Invalid CSS property name: '{value}'"));
    }

    Ok(())
}

/// Validate a CSS custom property name. Must start with `--`.
pub fn validate_css_custom_property(value: &str) -> Result<(), String> {
    if !value.starts_with("--") {
        return Err(format!("Custom property must start with '--': '{value}'"));
    }
    validate_css_property(value)
}

/// Validate an HTML id / class token (style id, marker class).
///
/// The value is spliced into `#id` and `.class` selectors unescaped, so it
/// must start with a letter or `_`.
pub fn validate_identifier(value: &str) -> Result<(), String> {
    let Some(first) = value.chars().next() else {
        return Err("Empty identifier".to_string());
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(format!("Identifier must start with a letter or '_': '{value}'"));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(format!("Invalid identifier: '{value}'"));
    }
    Ok(())
}

// =============================================================================
// HELPERS
// =============================================================================

/// Check for common CSS injection patterns.
fn check_injection_patterns(value: &str) -> Result<(), String> {
    let lower = value.to_lowercase();

    let dangerous = [
        "expression(",
        "url(",
        "javascript:",
        "eval(",
        "import",
        "@",
        "behavior:",
        "-moz-binding",
        "</style",
    ];

    for pattern in &dangerous {
        if lower.contains(pattern) {
            return Err(format!("CSS injection blocked: contains '{pattern}'"));
        }
    }

    Ok(())
}

/// Block characters that could escape the declaration or rule context.
fn check_structural_chars(value: &str, blocked: &[char]) -> Result<(), String> {
    for ch in blocked {
        if value.contains(*ch) {
            return Err(format!("CSS injection blocked: contains {ch:?}"));
        }
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
