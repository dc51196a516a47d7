//! Static, process-wide reference catalogs: hardware providers/devices
//! and vertical-business templates. Loaded once, read-only; all
//! lookups are pure and safe to call from any thread.

pub mod hardware;
pub mod normalize;
pub mod roles;
pub mod vertical;

pub use hardware::{
    CAPABILITIES, CatalogFilter, Device, DeviceView, Provider, ProviderView, find_catalog_device,
    hardware_providers, is_country_allowed, list_hardware_catalog,
};
pub use roles::{DEFAULT_PROVIDER_PRIORITY, resolve_provider_priority, resolve_role_key};
pub use vertical::{
    TemplateFilter, VERTICAL_TEMPLATE_VERSION, VerticalTemplate, get_vertical_template,
    is_template_allowed_in_country, list_vertical_templates, vertical_templates,
};
