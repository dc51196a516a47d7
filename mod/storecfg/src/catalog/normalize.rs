//! Canonicalization helpers for catalog codes.
//!
//! All catalog lookups go through these: trim, uppercase, empty falls
//! back. Pure and total — never panic, never allocate beyond the
//! returned string.

/// Normalize a country code: trim, uppercase, `fallback` if empty.
pub fn normalize_country_code(value: &str, fallback: &str) -> String {
    let code = value.trim().to_uppercase();
    if code.is_empty() { fallback.to_string() } else { code }
}

/// Normalize a provider code: trim, uppercase. Empty stays empty.
pub fn normalize_provider_code(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Normalize a capability tag.
pub fn normalize_capability(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Normalize a device class.
pub fn normalize_device_class(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Normalize a role key.
pub fn normalize_role_key(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Normalize a device model code.
pub fn normalize_model_code(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Normalize a vertical template code.
pub fn normalize_template_code(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Normalize each element, drop empties, de-duplicate preserving
/// first-seen order.
pub fn to_unique_uppercase<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut rows = Vec::new();
    for value in values {
        let normalized = value.as_ref().trim().to_uppercase();
        if normalized.is_empty() || !seen.insert(normalized.clone()) {
            continue;
        }
        rows.push(normalized);
    }
    rows
}

/// Trim and de-duplicate strings without case folding (used for
/// warning lists, where the text is human-readable).
pub fn to_unique_strings<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut rows = Vec::new();
    for value in values {
        let trimmed = value.as_ref().trim().to_string();
        if trimmed.is_empty() || !seen.insert(trimmed.clone()) {
            continue;
        }
        rows.push(trimmed);
    }
    rows
}
