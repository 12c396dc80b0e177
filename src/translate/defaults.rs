// src/translate/defaults.rs

//! Defaults for optional config fields

/// Resolve an optional permission mode
///
/// A stored mode is read by taking its decimal digits as an octal literal,
/// so a stored `755` yields `0o755` (493). Values whose digits are not valid
/// octal are used as-is, limited to the permission bits. Negative values
/// fall back to `default`.
pub fn resolve_mode(mode: Option<i64>, default: u32) -> u32 {
    let Some(mode) = mode else {
        return default;
    };
    if mode < 0 {
        return default;
    }

    match u32::from_str_radix(&mode.to_string(), 8) {
        Ok(octal) => octal,
        Err(_) => (mode as u32) & 0o7777,
    }
}

pub fn resolve_string(value: Option<&str>, default: &str) -> String {
    value.unwrap_or(default).to_string()
}

pub fn resolve_bool(value: Option<bool>, default: bool) -> bool {
    value.unwrap_or(default)
}
