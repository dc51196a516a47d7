use axum::{
    Json, Router,
    extract::Query,
    routing::get,
};
use serde::Serialize;

use crate::catalog::{
    CAPABILITIES, CatalogFilter, ProviderView, TemplateFilter, VERTICAL_TEMPLATE_VERSION,
    VerticalTemplate, list_hardware_catalog, list_vertical_templates,
};

use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/hardware/catalog", get(hardware_catalog))
        .route("/hardware/capabilities", get(hardware_capabilities))
        .route("/vertical-templates", get(vertical_templates))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogResponse {
    providers: Vec<ProviderView>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TemplateCatalogResponse {
    version: &'static str,
    templates: Vec<&'static VerticalTemplate>,
}

async fn hardware_catalog(Query(filter): Query<CatalogFilter>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        providers: list_hardware_catalog(&filter),
    })
}

async fn hardware_capabilities() -> Json<Vec<&'static str>> {
    Json(CAPABILITIES.to_vec())
}

async fn vertical_templates(Query(filter): Query<TemplateFilter>) -> Json<TemplateCatalogResponse> {
    Json(TemplateCatalogResponse {
        version: VERTICAL_TEMPLATE_VERSION,
        templates: list_vertical_templates(&filter),
    })
}
