//! Provider-priority resolution and capability/device-class → role
//! mapping. Both tables are compiled-in constants; they are not
//! user-configurable.

use super::normalize::{
    normalize_capability, normalize_device_class, normalize_provider_code, to_unique_uppercase,
};

/// System default provider order, appended after any caller-supplied
/// priority list.
pub const DEFAULT_PROVIDER_PRIORITY: &[&str] = &["TOAST", "SQUARE", "CUSTOM"];

/// Role a device fills in a store layout when nothing more specific
/// applies.
pub const GENERIC_ROLE: &str = "GENERIC_DEVICE";

const DEVICE_CLASS_ROLE_MAP: &[(&str, &str)] = &[
    ("POS_TERMINAL", "FRONT_COUNTER_POS"),
    ("MOBILE_POS", "TABLESIDE_MOBILE_POS"),
    ("PAYMENT_TERMINAL", "PAYMENT_TERMINAL"),
    ("RECEIPT_PRINTER", "FRONT_RECEIPT_PRINTER"),
    ("KITCHEN_PRINTER", "KITCHEN_PRINTER"),
    ("KDS", "KDS_SCREEN"),
    ("CASH_DRAWER", "CASH_DRAWER"),
    ("KIOSK", "SELF_ORDER_KIOSK"),
    ("CUSTOMER_DISPLAY", "CUSTOMER_DISPLAY"),
    ("QUEUE_DISPLAY", "QUEUE_DISPLAY"),
    ("DIGITAL_SIGNAGE", "DIGITAL_SIGNAGE"),
    ("NETWORK", "NETWORK_INFRA"),
    ("OTHER", GENERIC_ROLE),
];

const CAPABILITY_ROLE_HINTS: &[(&str, &str)] = &[
    ("COUNTER_CHECKOUT", "FRONT_COUNTER_POS"),
    ("TABLESIDE_ORDERING", "TABLESIDE_MOBILE_POS"),
    ("EMV_NFC_PAYMENT", "PAYMENT_TERMINAL"),
    ("FRONT_RECEIPT_PRINT", "FRONT_RECEIPT_PRINTER"),
    ("KITCHEN_TICKET_PRINT", "KITCHEN_PRINTER"),
    ("KDS_PRODUCTION", "KDS_SCREEN"),
    ("CASH_MANAGEMENT", "CASH_DRAWER"),
    ("SELF_ORDER_KIOSK", "SELF_ORDER_KIOSK"),
    ("CUSTOMER_FACING_DISPLAY", "CUSTOMER_DISPLAY"),
    ("QUEUE_CALLING", "QUEUE_DISPLAY"),
    ("MENU_AD_SIGNAGE", "DIGITAL_SIGNAGE"),
    ("OFFLINE_TOLERANCE", "NETWORK_INFRA"),
];

fn table_lookup(
    table: &'static [(&'static str, &'static str)],
    key: &str,
) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, role)| *role)
}

/// Resolve a provider priority order: the caller's list (normalized,
/// de-duplicated, order preserved) followed by the system defaults as
/// a fallback tail.
pub fn resolve_provider_priority<S: AsRef<str>>(custom: &[S]) -> Vec<String> {
    let mut priority: Vec<String> = to_unique_uppercase(custom)
        .into_iter()
        .map(|code| normalize_provider_code(&code))
        .filter(|code| !code.is_empty())
        .collect();
    for code in DEFAULT_PROVIDER_PRIORITY {
        if !priority.iter().any(|c| c == code) {
            priority.push((*code).to_string());
        }
    }
    priority
}

/// Map a capability (preferred) or device class to the canonical role
/// key. Falls back to [`GENERIC_ROLE`].
pub fn resolve_role_key(capability: &str, device_class: &str) -> String {
    if let Some(role) = table_lookup(CAPABILITY_ROLE_HINTS, &normalize_capability(capability)) {
        return role.to_string();
    }
    table_lookup(DEVICE_CLASS_ROLE_MAP, &normalize_device_class(device_class))
        .unwrap_or(GENERIC_ROLE)
        .to_string()
}
