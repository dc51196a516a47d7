//! Static hardware provider/device catalog and its read-only index.
//!
//! The catalog is compiled-in reference data: providers own their
//! devices, country support is declared per provider. There is no
//! mutation API — lookups return views or borrows, never the ability
//! to change the constants.

use serde::{Deserialize, Serialize};

use super::normalize::{
    normalize_capability, normalize_country_code, normalize_device_class, normalize_model_code,
    normalize_provider_code,
};

/// A hardware vendor in the static catalog.
#[derive(Debug)]
pub struct Provider {
    pub provider_code: &'static str,
    pub display_name: &'static str,
    pub country_codes: &'static [&'static str],
    pub devices: &'static [Device],
}

/// A device model, owned by exactly one provider.
#[derive(Debug)]
pub struct Device {
    pub model_code: &'static str,
    pub device_class: &'static str,
    pub display_name: &'static str,
    pub capability_tags: &'static [&'static str],
}

/// The full set of capability tags devices can declare.
pub const CAPABILITIES: &[&str] = &[
    "COUNTER_CHECKOUT",
    "TABLESIDE_ORDERING",
    "EMV_NFC_PAYMENT",
    "FRONT_RECEIPT_PRINT",
    "KITCHEN_TICKET_PRINT",
    "KDS_PRODUCTION",
    "CASH_MANAGEMENT",
    "SELF_ORDER_KIOSK",
    "CUSTOMER_FACING_DISPLAY",
    "QUEUE_CALLING",
    "MENU_AD_SIGNAGE",
    "OFFLINE_TOLERANCE",
];

static HARDWARE_PROVIDERS: &[Provider] = &[
    Provider {
        provider_code: "TOAST",
        display_name: "Toast",
        country_codes: &["US", "CA"],
        devices: &[
            Device {
                model_code: "TOAST_FLEX_3",
                device_class: "POS_TERMINAL",
                display_name: "Toast Flex 3",
                capability_tags: &["COUNTER_CHECKOUT", "CUSTOMER_FACING_DISPLAY"],
            },
            Device {
                model_code: "TOAST_FLEX_3_WEDGE",
                device_class: "PAYMENT_TERMINAL",
                display_name: "Toast Flex 3 Wedge Reader",
                capability_tags: &["EMV_NFC_PAYMENT"],
            },
            Device {
                model_code: "TOAST_GO_2",
                device_class: "MOBILE_POS",
                display_name: "Toast Go 2",
                capability_tags: &["TABLESIDE_ORDERING", "EMV_NFC_PAYMENT"],
            },
            Device {
                model_code: "TOAST_TSP143",
                device_class: "RECEIPT_PRINTER",
                display_name: "Toast Star TSP143",
                capability_tags: &["FRONT_RECEIPT_PRINT"],
            },
            Device {
                model_code: "TOAST_KDS_22",
                device_class: "KDS",
                display_name: "Toast Kitchen Display 22in",
                capability_tags: &["KDS_PRODUCTION"],
            },
        ],
    },
    Provider {
        provider_code: "SQUARE",
        display_name: "Square",
        country_codes: &["US", "CA", "GB", "AU"],
        devices: &[
            Device {
                model_code: "SQUARE_REGISTER",
                device_class: "POS_TERMINAL",
                display_name: "Square Register",
                capability_tags: &["COUNTER_CHECKOUT", "CUSTOMER_FACING_DISPLAY"],
            },
            Device {
                model_code: "SQUARE_TERMINAL",
                device_class: "PAYMENT_TERMINAL",
                display_name: "Square Terminal",
                capability_tags: &["EMV_NFC_PAYMENT"],
            },
            Device {
                model_code: "SQUARE_RECEIPT_PRINTER",
                device_class: "RECEIPT_PRINTER",
                display_name: "Square Receipt Printer",
                capability_tags: &["FRONT_RECEIPT_PRINT"],
            },
            Device {
                model_code: "SQUARE_KITCHEN_PRINTER",
                device_class: "KITCHEN_PRINTER",
                display_name: "Square Kitchen Printer",
                capability_tags: &["KITCHEN_TICKET_PRINT"],
            },
        ],
    },
    Provider {
        provider_code: "SUNMI",
        display_name: "Sunmi",
        country_codes: &["US", "SG", "HK"],
        devices: &[
            Device {
                model_code: "SUNMI_T3_PRO",
                device_class: "POS_TERMINAL",
                display_name: "Sunmi T3 Pro",
                capability_tags: &["COUNTER_CHECKOUT"],
            },
            Device {
                model_code: "SUNMI_K2_KIOSK",
                device_class: "KIOSK",
                display_name: "Sunmi K2 Self-Order Kiosk",
                capability_tags: &["SELF_ORDER_KIOSK"],
            },
            Device {
                model_code: "SUNMI_CLOUD_PRINTER",
                device_class: "KITCHEN_PRINTER",
                display_name: "Sunmi Cloud Printer",
                capability_tags: &["KITCHEN_TICKET_PRINT"],
            },
        ],
    },
    Provider {
        provider_code: "CUSTOM",
        display_name: "Customer-Supplied",
        country_codes: &["US", "CA", "GB", "AU", "FR", "DE", "SG", "HK", "JP"],
        devices: &[
            Device {
                model_code: "WEB_DIGITAL_SIGNAGE",
                device_class: "DIGITAL_SIGNAGE",
                display_name: "Web Digital Signage",
                capability_tags: &["MENU_AD_SIGNAGE"],
            },
            Device {
                model_code: "WEB_QUEUE_SCREEN",
                device_class: "QUEUE_DISPLAY",
                display_name: "Web Queue Screen",
                capability_tags: &["QUEUE_CALLING"],
            },
            Device {
                model_code: "GENERIC_ANDROID_TABLET",
                device_class: "MOBILE_POS",
                display_name: "Generic Android Tablet",
                capability_tags: &["TABLESIDE_ORDERING"],
            },
            Device {
                model_code: "GENERIC_CASH_DRAWER",
                device_class: "CASH_DRAWER",
                display_name: "Generic Cash Drawer",
                capability_tags: &["CASH_MANAGEMENT"],
            },
            Device {
                model_code: "GENERIC_LTE_ROUTER",
                device_class: "NETWORK",
                display_name: "Generic LTE Failover Router",
                capability_tags: &["OFFLINE_TOLERANCE"],
            },
        ],
    },
];

/// Read-only accessor for the hardware catalog.
pub fn hardware_providers() -> &'static [Provider] {
    HARDWARE_PROVIDERS
}

/// Whether `provider` may be sold into `country_code`.
/// An empty country passes everything through.
pub fn is_country_allowed(provider: &Provider, country_code: &str) -> bool {
    country_code.is_empty() || provider.country_codes.iter().any(|c| *c == country_code)
}

/// Filters for [`list_hardware_catalog`]. All fields optional; empty
/// strings mean "no filter".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogFilter {
    pub country_code: String,
    pub provider_code: String,
    pub capability: String,
    pub device_class: String,
}

/// A provider row in a catalog listing, with its device list already
/// filtered. Owned copy — the static catalog is never handed out
/// mutably.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderView {
    pub provider_code: String,
    pub display_name: String,
    pub country_codes: Vec<String>,
    pub devices: Vec<DeviceView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceView {
    pub model_code: String,
    pub device_class: String,
    pub display_name: String,
    pub capability_tags: Vec<String>,
}

impl DeviceView {
    fn from_device(device: &Device) -> Self {
        Self {
            model_code: device.model_code.to_string(),
            device_class: device.device_class.to_string(),
            display_name: device.display_name.to_string(),
            capability_tags: device.capability_tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// List the catalog, filtered by country, provider, capability and
/// device class. Providers with no matching device are dropped.
pub fn list_hardware_catalog(filter: &CatalogFilter) -> Vec<ProviderView> {
    let country = normalize_country_code(&filter.country_code, "");
    let provider_code = normalize_provider_code(&filter.provider_code);
    let capability = normalize_capability(&filter.capability);
    let device_class = normalize_device_class(&filter.device_class);

    hardware_providers()
        .iter()
        .filter(|provider| {
            (provider_code.is_empty() || provider.provider_code == provider_code)
                && is_country_allowed(provider, &country)
        })
        .filter_map(|provider| {
            let devices: Vec<DeviceView> = provider
                .devices
                .iter()
                .filter(|device| {
                    (device_class.is_empty() || device.device_class == device_class)
                        && (capability.is_empty()
                            || device.capability_tags.iter().any(|t| *t == capability))
                })
                .map(DeviceView::from_device)
                .collect();

            if devices.is_empty() {
                return None;
            }
            Some(ProviderView {
                provider_code: provider.provider_code.to_string(),
                display_name: provider.display_name.to_string(),
                country_codes: provider.country_codes.iter().map(|c| c.to_string()).collect(),
                devices,
            })
        })
        .collect()
}

/// Exact provider/model lookup. Used for validation, not filtering.
pub fn find_catalog_device(
    provider_code: &str,
    model_code: &str,
) -> Option<(&'static Provider, &'static Device)> {
    let provider_code = normalize_provider_code(provider_code);
    let model_code = normalize_model_code(model_code);
    if provider_code.is_empty() || model_code.is_empty() {
        return None;
    }

    let provider = hardware_providers()
        .iter()
        .find(|p| p.provider_code == provider_code)?;
    let device = provider.devices.iter().find(|d| d.model_code == model_code)?;
    Some((provider, device))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_by_country_provider_capability() {
        let rows = list_hardware_catalog(&CatalogFilter {
            country_code: "US".into(),
            provider_code: "TOAST".into(),
            capability: "KDS_PRODUCTION".into(),
            ..Default::default()
        });

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].provider_code, "TOAST");
        assert!(!rows[0].devices.is_empty());
        assert!(rows[0]
            .devices
            .iter()
            .all(|d| d.capability_tags.contains(&"KDS_PRODUCTION".to_string())));
    }

    #[test]
    fn country_filter_drops_unsupported_providers() {
        let rows = list_hardware_catalog(&CatalogFilter {
            country_code: "FR".into(),
            ..Default::default()
        });
        assert!(rows.iter().all(|p| p.provider_code == "CUSTOM"));
        assert!(!rows.is_empty());
    }

    #[test]
    fn device_class_filter() {
        let rows = list_hardware_catalog(&CatalogFilter {
            device_class: "receipt_printer".into(),
            ..Default::default()
        });
        assert!(!rows.is_empty());
        for provider in &rows {
            assert!(provider.devices.iter().all(|d| d.device_class == "RECEIPT_PRINTER"));
        }
    }

    #[test]
    fn find_device_is_case_insensitive() {
        let (provider, device) = find_catalog_device("square", "square_terminal").unwrap();
        assert_eq!(provider.provider_code, "SQUARE");
        assert_eq!(device.model_code, "SQUARE_TERMINAL");
    }

    #[test]
    fn find_device_unknown_returns_none() {
        assert!(find_catalog_device("TOAST", "NO_SUCH_MODEL").is_none());
        assert!(find_catalog_device("", "SQUARE_TERMINAL").is_none());
    }

    #[test]
    fn every_capability_tag_is_declared() {
        for provider in hardware_providers() {
            for device in provider.devices {
                for tag in device.capability_tags {
                    assert!(CAPABILITIES.contains(tag), "undeclared capability {tag}");
                }
            }
        }
    }
}
