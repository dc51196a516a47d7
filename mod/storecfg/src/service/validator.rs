//! Selection validation against the hardware catalog and country
//! constraints. Row failures are collected per index; callers treat
//! any error as batch-fatal. Warnings never block.

use serde::Serialize;

use abcpos_core::RowError;

use crate::catalog::{
    find_catalog_device, is_country_allowed,
    normalize::{
        normalize_country_code, normalize_model_code, normalize_provider_code, normalize_role_key,
    },
};
use crate::model::{HardwareSelectionInput, ResolvedHardwareSelection};

/// Quantity bounds for a single selection row.
pub const MIN_QUANTITY: i64 = 1;
pub const MAX_QUANTITY: i64 = 200;

/// Capabilities every storefront is expected to cover; their absence
/// produces warnings, never errors.
const ESSENTIAL_CAPABILITIES: &[(&str, &str)] = &[
    ("EMV_NFC_PAYMENT", "No payment terminal capability (EMV_NFC_PAYMENT) selected."),
    ("FRONT_RECEIPT_PRINT", "No front receipt printer selected."),
];

/// Result of validating a selection batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Row-level failures; non-empty means the batch is rejected.
    pub errors: Vec<RowError>,
    pub warnings: Vec<String>,
    /// Rows that passed, enriched from the catalog.
    pub resolved_selections: Vec<ResolvedHardwareSelection>,
    /// Union of capability tags across resolved rows, first-seen order.
    pub covered_capabilities: Vec<String>,
}

/// Validate selections against the catalog for one country.
///
/// Each row is checked independently: required fields, quantity
/// bounds, catalog existence, country support. Passing rows are
/// enriched with the matched device's display name, class and tags —
/// callers must never trust those fields from input.
pub fn validate_hardware_selection(
    country_code: &str,
    selections: &[HardwareSelectionInput],
) -> ValidationReport {
    let country = normalize_country_code(country_code, "");
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut resolved_selections = Vec::new();
    let mut covered = Vec::new();
    let mut covered_seen = std::collections::HashSet::new();

    for (index, selection) in selections.iter().enumerate() {
        let provider_code = normalize_provider_code(&selection.provider_code);
        let model_code = normalize_model_code(&selection.model_code);
        let role_key = normalize_role_key(&selection.role_key);

        if provider_code.is_empty() || model_code.is_empty() || role_key.is_empty() {
            errors.push(RowError {
                index,
                reason: "providerCode, modelCode and roleKey are required.".into(),
            });
            continue;
        }

        if selection.quantity < MIN_QUANTITY || selection.quantity > MAX_QUANTITY {
            errors.push(RowError {
                index,
                reason: format!("quantity must be between {} and {}.", MIN_QUANTITY, MAX_QUANTITY),
            });
            continue;
        }

        let Some((provider, device)) = find_catalog_device(&provider_code, &model_code) else {
            errors.push(RowError {
                index,
                reason: format!("Unknown provider/model: {}/{}.", provider_code, model_code),
            });
            continue;
        };

        if !is_country_allowed(provider, &country) {
            let scope = if country.is_empty() { "current country profile" } else { country.as_str() };
            errors.push(RowError {
                index,
                reason: format!("{}/{} is not supported in {}.", provider_code, model_code, scope),
            });
            continue;
        }

        for tag in device.capability_tags {
            if covered_seen.insert(*tag) {
                covered.push(tag.to_string());
            }
        }

        resolved_selections.push(ResolvedHardwareSelection {
            role_key,
            provider_code,
            model_code,
            quantity: selection.quantity,
            zone: selection.zone.trim().to_string(),
            metadata: selection.metadata.clone(),
            resolved_display_name: device.display_name.to_string(),
            resolved_device_class: device.device_class.to_string(),
            capability_tags: device.capability_tags.iter().map(|t| t.to_string()).collect(),
        });
    }

    if !resolved_selections.is_empty() {
        for (capability, warning) in ESSENTIAL_CAPABILITIES {
            if !covered_seen.contains(capability) {
                warnings.push((*warning).to_string());
            }
        }
    }

    ValidationReport {
        errors,
        warnings,
        resolved_selections,
        covered_capabilities: covered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(role: &str, provider: &str, model: &str, quantity: i64) -> HardwareSelectionInput {
        HardwareSelectionInput {
            role_key: role.into(),
            provider_code: provider.into(),
            model_code: model.into(),
            quantity,
            zone: String::new(),
            metadata: serde_json::Value::Null,
        }
    }

    #[test]
    fn rejects_missing_required_fields() {
        let report = validate_hardware_selection("US", &[row("", "TOAST", "TOAST_FLEX_3", 1)]);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].index, 0);
        assert!(report.errors[0].reason.contains("required"));
        assert!(report.resolved_selections.is_empty());
    }

    #[test]
    fn rejects_quantity_out_of_bounds() {
        let report = validate_hardware_selection(
            "US",
            &[
                row("COUNTER", "TOAST", "TOAST_FLEX_3", 0),
                row("COUNTER", "TOAST", "TOAST_FLEX_3", 201),
                row("COUNTER", "TOAST", "TOAST_FLEX_3", 200),
            ],
        );
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[0].index, 0);
        assert_eq!(report.errors[1].index, 1);
        assert_eq!(report.resolved_selections.len(), 1);
    }

    #[test]
    fn rejects_unknown_model() {
        let report =
            validate_hardware_selection("US", &[row("COUNTER", "TOAST", "UNKNOWN_MODEL", 1)]);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].reason.contains("Unknown provider/model"));
    }

    #[test]
    fn rejects_unsupported_country() {
        let report =
            validate_hardware_selection("FR", &[row("COUNTER_1", "TOAST", "TOAST_FLEX_3_WEDGE", 1)]);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].reason.to_lowercase().contains("not supported"));
    }

    #[test]
    fn warns_when_payment_and_receipt_are_absent() {
        let report =
            validate_hardware_selection("US", &[row("DISPLAY_1", "CUSTOM", "WEB_DIGITAL_SIGNAGE", 1)]);
        assert!(report.errors.is_empty());
        assert_eq!(report.resolved_selections.len(), 1);
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings[0].contains("EMV_NFC_PAYMENT"));
        assert!(report.warnings[1].contains("receipt printer"));
    }

    #[test]
    fn no_warnings_for_empty_batch() {
        let report = validate_hardware_selection("US", &[]);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn resolves_capabilities_for_valid_bundle() {
        let report = validate_hardware_selection(
            "US",
            &[
                row("COUNTER_POS", "SQUARE", "SQUARE_REGISTER", 1),
                row("PAYMENT", "SQUARE", "SQUARE_TERMINAL", 1),
                row("RECEIPT", "SQUARE", "SQUARE_RECEIPT_PRINTER", 1),
            ],
        );
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
        assert!(report.covered_capabilities.contains(&"EMV_NFC_PAYMENT".to_string()));
        assert!(report.covered_capabilities.contains(&"FRONT_RECEIPT_PRINT".to_string()));
        let first = &report.resolved_selections[0];
        assert_eq!(first.resolved_display_name, "Square Register");
        assert_eq!(first.resolved_device_class, "POS_TERMINAL");
    }

    #[test]
    fn derived_fields_come_from_catalog_not_input() {
        // Lowercase input codes are normalized; enrichment always
        // reflects the catalog device.
        let report =
            validate_hardware_selection("US", &[row("payment", "square", "square_terminal", 1)]);
        assert!(report.errors.is_empty());
        let selection = &report.resolved_selections[0];
        assert_eq!(selection.provider_code, "SQUARE");
        assert_eq!(selection.model_code, "SQUARE_TERMINAL");
        assert_eq!(selection.role_key, "PAYMENT");
        assert_eq!(selection.capability_tags, vec!["EMV_NFC_PAYMENT"]);
    }

    #[test]
    fn suggestion_roundtrip_is_error_free() {
        // Whatever the suggester produces for a country must validate
        // cleanly against the same catalog.
        let suggestion = crate::service::matcher::suggest_hardware_selections(
            "US",
            &[
                "COUNTER_CHECKOUT".into(),
                "EMV_NFC_PAYMENT".into(),
                "FRONT_RECEIPT_PRINT".into(),
                "KDS_PRODUCTION".into(),
            ],
            &[],
        );
        let report = validate_hardware_selection("US", &suggestion.selections);
        assert!(report.errors.is_empty(), "{:?}", report.errors);
        assert_eq!(report.resolved_selections.len(), suggestion.selections.len());
    }
}
