//! Capability matching: pick one device per target capability using
//! the resolved provider priority. Pure — never errors, only reports.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::json;

use crate::catalog::{
    CatalogFilter, DeviceView, ProviderView, list_hardware_catalog,
    normalize::{normalize_capability, normalize_country_code, to_unique_uppercase},
    resolve_provider_priority, resolve_role_key,
};
use crate::model::HardwareSelectionInput;

/// Pick a device for one capability.
///
/// Walks the resolved priority list in order; the first provider whose
/// device list contains the capability wins — no scoring. If no
/// priority-listed provider matches, falls back to scanning `providers`
/// in catalog order.
pub fn pick_device_for_capability<'a>(
    providers: &'a [ProviderView],
    capability: &str,
    provider_priority: &[String],
) -> Option<(&'a ProviderView, &'a DeviceView)> {
    let capability = normalize_capability(capability);
    if capability.is_empty() {
        return None;
    }

    let by_code: HashMap<&str, &ProviderView> = providers
        .iter()
        .map(|p| (p.provider_code.as_str(), p))
        .collect();

    let device_with = |provider: &'a ProviderView| -> Option<&'a DeviceView> {
        provider
            .devices
            .iter()
            .find(|d| d.capability_tags.iter().any(|t| t == &capability))
    };

    for provider_code in resolve_provider_priority(provider_priority) {
        if let Some(&provider) = by_code.get(provider_code.as_str()) {
            if let Some(device) = device_with(provider) {
                return Some((provider, device));
            }
        }
    }

    // Last resort: catalog order, not priority order.
    providers
        .iter()
        .find_map(|provider| device_with(provider).map(|device| (provider, device)))
}

/// Outcome of auto-selection. Selections still need to go through the
/// validator before persistence.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSuggestion {
    pub selections: Vec<HardwareSelectionInput>,
    pub unmatched_capabilities: Vec<String>,
    pub warnings: Vec<String>,
}

impl SelectionSuggestion {
    pub fn empty() -> Self {
        Self {
            selections: Vec::new(),
            unmatched_capabilities: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Suggest one selection per target capability within a country.
///
/// Devices matched for multiple capabilities are merged into a single
/// selection row keyed by (provider, model, role); the extra
/// capabilities accumulate in the row's `matchedCapabilities`
/// metadata. Misses are reported, never fatal.
pub fn suggest_hardware_selections(
    country_code: &str,
    capability_targets: &[String],
    provider_priority: &[String],
) -> SelectionSuggestion {
    let country = normalize_country_code(country_code, "");
    let targets = to_unique_uppercase(capability_targets);
    let providers = list_hardware_catalog(&CatalogFilter {
        country_code: country.clone(),
        ..Default::default()
    });

    let mut selections: Vec<HardwareSelectionInput> = Vec::new();
    // Tuple key, not a joined string: separator collisions are not a
    // failure mode we want to inherit.
    let mut by_key: HashMap<(String, String, String), usize> = HashMap::new();
    let mut unmatched_capabilities = Vec::new();

    for capability in &targets {
        let Some((provider, device)) =
            pick_device_for_capability(&providers, capability, provider_priority)
        else {
            unmatched_capabilities.push(capability.clone());
            continue;
        };

        let role_key = resolve_role_key(capability, &device.device_class);
        let key = (
            provider.provider_code.clone(),
            device.model_code.clone(),
            role_key.clone(),
        );

        match by_key.get(&key) {
            None => {
                by_key.insert(key, selections.len());
                selections.push(HardwareSelectionInput {
                    role_key,
                    provider_code: provider.provider_code.clone(),
                    model_code: device.model_code.clone(),
                    quantity: 1,
                    zone: String::new(),
                    metadata: json!({
                        "autoSelected": true,
                        "matchedCapabilities": [capability],
                    }),
                });
            }
            Some(&index) => {
                let selection = &mut selections[index];
                let mut matched: Vec<String> = selection.metadata["matchedCapabilities"]
                    .as_array()
                    .map(|rows| {
                        rows.iter()
                            .filter_map(|v| v.as_str().map(String::from))
                            .collect()
                    })
                    .unwrap_or_default();
                matched.push(capability.clone());
                selection.metadata = json!({
                    "autoSelected": true,
                    "matchedCapabilities": to_unique_uppercase(&matched),
                });
            }
        }
    }

    let warnings = unmatched_capabilities
        .iter()
        .map(|capability| {
            let scope = if country.is_empty() { "selected country" } else { country.as_str() };
            format!("No hardware model found for capability {} in {}.", capability, scope)
        })
        .collect();

    SelectionSuggestion {
        selections,
        unmatched_capabilities,
        warnings,
    }
}
