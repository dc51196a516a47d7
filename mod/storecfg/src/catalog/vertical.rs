//! Static vertical-business template catalog.
//!
//! Templates describe how a business vertical (milk tea shop, hotpot
//! restaurant, nail salon, ...) configures a store: required and
//! recommended hardware capabilities plus nested behavior profiles.
//! The nested blocks stay schema-open JSON so per-store overrides can
//! deep-merge onto them without a schema migration.

use std::sync::LazyLock;

use serde::Serialize;
use serde_json::{Value, json};

use super::normalize::{normalize_country_code, normalize_template_code};

/// Version stamp recorded into every vertical profile draft. Bumped
/// whenever the template catalog changes shape or content.
pub const VERTICAL_TEMPLATE_VERSION: &str = "2026.02";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerticalTemplate {
    pub template_code: String,
    pub display_name: String,
    pub display_name_en: String,
    pub type_group: String,
    pub business_type: String,
    pub supported_countries: Vec<String>,
    pub required_capabilities: Vec<String>,
    pub recommended_capabilities: Vec<String>,
    pub table_service_profile: Value,
    pub menu_option_profile: Value,
    pub kitchen_profile: Value,
    pub queue_profile: Value,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

static VERTICAL_TEMPLATES: LazyLock<Vec<VerticalTemplate>> = LazyLock::new(|| {
    vec![
        VerticalTemplate {
            template_code: "MILK_TEA".into(),
            display_name: "奶茶店".into(),
            display_name_en: "Milk Tea Shop".into(),
            type_group: "FOOD".into(),
            business_type: "TEA_BEVERAGE".into(),
            supported_countries: strings(&["US", "CA", "SG", "HK"]),
            required_capabilities: strings(&[
                "COUNTER_CHECKOUT",
                "EMV_NFC_PAYMENT",
                "FRONT_RECEIPT_PRINT",
            ]),
            recommended_capabilities: strings(&[
                "KITCHEN_TICKET_PRINT",
                "QUEUE_CALLING",
                "MENU_AD_SIGNAGE",
            ]),
            table_service_profile: json!({"enabled": false, "supportsSeatSplit": false}),
            menu_option_profile: json!({"highFrequencyEdits": true, "maxOptionGroups": 6}),
            kitchen_profile: json!({"stations": ["BEVERAGE"], "kdsEnabled": false}),
            queue_profile: json!({"enabled": true, "callingScreen": true}),
        },
        VerticalTemplate {
            template_code: "HOTPOT".into(),
            display_name: "火锅店".into(),
            display_name_en: "Hotpot Restaurant".into(),
            type_group: "FOOD".into(),
            business_type: "FULL_SERVICE".into(),
            supported_countries: strings(&["US", "CA", "SG"]),
            required_capabilities: strings(&[
                "COUNTER_CHECKOUT",
                "EMV_NFC_PAYMENT",
                "FRONT_RECEIPT_PRINT",
                "TABLESIDE_ORDERING",
                "KITCHEN_TICKET_PRINT",
            ]),
            recommended_capabilities: strings(&["KDS_PRODUCTION", "CASH_MANAGEMENT"]),
            table_service_profile: json!({"enabled": true, "supportsSeatSplit": true}),
            menu_option_profile: json!({"highFrequencyEdits": false, "maxOptionGroups": 4}),
            kitchen_profile: json!({"stations": ["SOUP_BASE", "PLATTER"], "kdsEnabled": true}),
            queue_profile: json!({"enabled": true, "callingScreen": true}),
        },
        VerticalTemplate {
            template_code: "QUICK_SERVICE".into(),
            display_name: "快餐店".into(),
            display_name_en: "Quick Service Restaurant".into(),
            type_group: "FOOD".into(),
            business_type: "QUICK_SERVICE".into(),
            supported_countries: strings(&["US", "CA", "GB", "AU"]),
            required_capabilities: strings(&[
                "COUNTER_CHECKOUT",
                "EMV_NFC_PAYMENT",
                "FRONT_RECEIPT_PRINT",
                "KDS_PRODUCTION",
            ]),
            recommended_capabilities: strings(&["SELF_ORDER_KIOSK", "QUEUE_CALLING"]),
            table_service_profile: json!({"enabled": false, "supportsSeatSplit": false}),
            menu_option_profile: json!({"highFrequencyEdits": true, "maxOptionGroups": 5}),
            kitchen_profile: json!({"stations": ["GRILL", "FRYER", "ASSEMBLY"], "kdsEnabled": true}),
            queue_profile: json!({"enabled": true, "callingScreen": true}),
        },
        VerticalTemplate {
            template_code: "CAFE".into(),
            display_name: "咖啡店".into(),
            display_name_en: "Cafe".into(),
            type_group: "FOOD".into(),
            business_type: "TEA_BEVERAGE".into(),
            supported_countries: strings(&["US", "CA", "GB", "FR"]),
            required_capabilities: strings(&[
                "COUNTER_CHECKOUT",
                "EMV_NFC_PAYMENT",
                "FRONT_RECEIPT_PRINT",
            ]),
            recommended_capabilities: strings(&["CUSTOMER_FACING_DISPLAY", "MENU_AD_SIGNAGE"]),
            table_service_profile: json!({"enabled": true, "supportsSeatSplit": false}),
            menu_option_profile: json!({"highFrequencyEdits": true, "maxOptionGroups": 4}),
            kitchen_profile: json!({"stations": ["BARISTA"], "kdsEnabled": false}),
            queue_profile: json!({"enabled": false, "callingScreen": false}),
        },
        VerticalTemplate {
            template_code: "BAKERY".into(),
            display_name: "烘焙店".into(),
            display_name_en: "Bakery".into(),
            type_group: "FOOD".into(),
            business_type: "RETAIL_FOOD".into(),
            supported_countries: strings(&["US", "CA"]),
            required_capabilities: strings(&[
                "COUNTER_CHECKOUT",
                "EMV_NFC_PAYMENT",
                "FRONT_RECEIPT_PRINT",
            ]),
            recommended_capabilities: strings(&["CASH_MANAGEMENT", "MENU_AD_SIGNAGE"]),
            table_service_profile: json!({"enabled": false, "supportsSeatSplit": false}),
            menu_option_profile: json!({"highFrequencyEdits": false, "maxOptionGroups": 3}),
            kitchen_profile: json!({"stations": ["OVEN"], "kdsEnabled": false}),
            queue_profile: json!({"enabled": false, "callingScreen": false}),
        },
        VerticalTemplate {
            template_code: "NAIL_SALON".into(),
            display_name: "美甲店".into(),
            display_name_en: "Nail Salon".into(),
            type_group: "SERVICE".into(),
            business_type: "APPOINTMENT_SERVICE".into(),
            supported_countries: strings(&["US"]),
            required_capabilities: strings(&["COUNTER_CHECKOUT", "EMV_NFC_PAYMENT"]),
            recommended_capabilities: strings(&["CUSTOMER_FACING_DISPLAY", "MENU_AD_SIGNAGE"]),
            table_service_profile: json!({"enabled": false, "supportsSeatSplit": false}),
            menu_option_profile: json!({"highFrequencyEdits": false, "maxOptionGroups": 2}),
            kitchen_profile: json!({"stations": [], "kdsEnabled": false}),
            queue_profile: json!({"enabled": true, "callingScreen": false}),
        },
        VerticalTemplate {
            template_code: "CONVENIENCE".into(),
            display_name: "便利店".into(),
            display_name_en: "Convenience Store".into(),
            type_group: "RETAIL".into(),
            business_type: "RETAIL_GOODS".into(),
            supported_countries: strings(&["US", "CA", "SG", "HK"]),
            required_capabilities: strings(&[
                "COUNTER_CHECKOUT",
                "EMV_NFC_PAYMENT",
                "FRONT_RECEIPT_PRINT",
                "CASH_MANAGEMENT",
            ]),
            recommended_capabilities: strings(&["OFFLINE_TOLERANCE"]),
            table_service_profile: json!({"enabled": false, "supportsSeatSplit": false}),
            menu_option_profile: json!({"highFrequencyEdits": false, "maxOptionGroups": 1}),
            kitchen_profile: json!({"stations": [], "kdsEnabled": false}),
            queue_profile: json!({"enabled": false, "callingScreen": false}),
        },
    ]
});

/// Read-only accessor for the template catalog.
pub fn vertical_templates() -> &'static [VerticalTemplate] {
    &VERTICAL_TEMPLATES
}

/// Whether `template` may be used in `country_code`. An empty country
/// passes everything through.
pub fn is_template_allowed_in_country(template: &VerticalTemplate, country_code: &str) -> bool {
    country_code.is_empty()
        || template.supported_countries.iter().any(|c| c == country_code)
}

/// Exact lookup by normalized template code. Absence is not an error.
pub fn get_vertical_template(template_code: &str) -> Option<&'static VerticalTemplate> {
    let code = normalize_template_code(template_code);
    if code.is_empty() {
        return None;
    }
    vertical_templates().iter().find(|t| t.template_code == code)
}

/// Filters for [`list_vertical_templates`]. Empty strings mean
/// "no filter"; `keyword` matches code and both display names,
/// case-insensitively.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateFilter {
    pub country_code: String,
    pub type_group: String,
    pub business_type: String,
    pub keyword: String,
}

pub fn list_vertical_templates(filter: &TemplateFilter) -> Vec<&'static VerticalTemplate> {
    let country = normalize_country_code(&filter.country_code, "");
    let type_group = filter.type_group.trim().to_uppercase();
    let business_type = filter.business_type.trim().to_uppercase();
    let keyword = filter.keyword.trim().to_lowercase();

    vertical_templates()
        .iter()
        .filter(|template| {
            if !is_template_allowed_in_country(template, &country) {
                return false;
            }
            if !type_group.is_empty() && template.type_group != type_group {
                return false;
            }
            if !business_type.is_empty() && template.business_type != business_type {
                return false;
            }
            if keyword.is_empty() {
                return true;
            }
            let searchable = format!(
                "{} {} {} {} {}",
                template.template_code,
                template.display_name,
                template.display_name_en,
                template.type_group,
                template.business_type,
            )
            .to_lowercase();
            searchable.contains(&keyword)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_by_country_and_keyword() {
        let rows = list_vertical_templates(&TemplateFilter {
            country_code: "US".into(),
            keyword: "奶茶".into(),
            ..Default::default()
        });
        assert!(rows.iter().any(|t| t.template_code == "MILK_TEA"));
    }

    #[test]
    fn type_group_filtering() {
        let rows = list_vertical_templates(&TemplateFilter {
            country_code: "US".into(),
            type_group: "SERVICE".into(),
            ..Default::default()
        });
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].template_code, "NAIL_SALON");
    }

    #[test]
    fn country_gating() {
        let rows = list_vertical_templates(&TemplateFilter {
            country_code: "FR".into(),
            ..Default::default()
        });
        assert!(rows.iter().all(|t| t.supported_countries.iter().any(|c| c == "FR")));
        assert!(!rows.iter().any(|t| t.template_code == "MILK_TEA"));
    }

    #[test]
    fn get_by_code_is_case_insensitive() {
        let template = get_vertical_template("hotpot").unwrap();
        assert_eq!(template.template_code, "HOTPOT");
        assert!(get_vertical_template("").is_none());
        assert!(get_vertical_template("NO_SUCH").is_none());
    }

    #[test]
    fn template_capabilities_reference_known_tags() {
        for template in vertical_templates() {
            for cap in template
                .required_capabilities
                .iter()
                .chain(template.recommended_capabilities.iter())
            {
                assert!(
                    super::super::hardware::CAPABILITIES.iter().any(|c| *c == cap.as_str()),
                    "unknown capability {cap} in {}",
                    template.template_code
                );
            }
        }
    }
}
