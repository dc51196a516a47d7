//! Template resolution: merge per-store overrides onto a catalog
//! template at read time.

use serde_json::Value;

use crate::catalog::get_vertical_template;
use crate::service::settings::deep_merge;

/// Serialize the template and deep-merge `overrides` onto it. Returns
/// `None` for unknown codes. Overrides follow the settings merge
/// rules: objects recurse, everything else replaces.
pub fn resolve_vertical_template_config(template_code: &str, overrides: &Value) -> Option<Value> {
    let template = get_vertical_template(template_code)?;
    let base = serde_json::to_value(template).ok()?;
    if overrides.is_object() {
        Some(deep_merge(&base, overrides))
    } else {
        Some(base)
    }
}
