use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use serde::Deserialize;

use abcpos_core::{ListParams, ListResult, ServiceError};

use crate::model::{ProvisioningPlan, ProvisioningRequest, Store};
use crate::service::plan::build_store_provisioning_plan;
use crate::service::provision::{CreateStoreInput, CreateStoreOutput};
use crate::service::settings::EffectiveSettings;

use super::{AppState, ok_json};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stores", post(create_store).get(list_stores))
        .route("/stores/provisioning-preview", post(provisioning_preview))
        .route("/stores/{location_id}", get(get_store))
        .route("/stores/{location_id}/effective-settings", get(effective_settings))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PreviewRequest {
    location_id: String,
    country_code: String,
    provisioning: Option<ProvisioningRequest>,
}

impl Default for PreviewRequest {
    fn default() -> Self {
        Self {
            location_id: "preview-location".to_string(),
            country_code: String::new(),
            provisioning: None,
        }
    }
}

async fn create_store(
    State(svc): State<AppState>,
    Json(input): Json<CreateStoreInput>,
) -> Result<Json<CreateStoreOutput>, ServiceError> {
    ok_json(svc.create_store(&input))
}

/// Dry run: plan only, nothing is persisted.
async fn provisioning_preview(
    Json(req): Json<PreviewRequest>,
) -> Result<Json<ProvisioningPlan>, ServiceError> {
    let location_id = match req.location_id.trim() {
        "" => "preview-location",
        id => id,
    };
    ok_json(build_store_provisioning_plan(
        location_id,
        &req.country_code,
        req.provisioning.as_ref(),
    ))
}

async fn list_stores(
    State(svc): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResult<Store>>, ServiceError> {
    ok_json(svc.list_stores(&params))
}

async fn get_store(
    State(svc): State<AppState>,
    Path(location_id): Path<String>,
) -> Result<Json<Store>, ServiceError> {
    ok_json(svc.get_store(&location_id))
}

async fn effective_settings(
    State(svc): State<AppState>,
    Path(location_id): Path<String>,
) -> Result<Json<EffectiveSettings>, ServiceError> {
    ok_json(svc.effective_settings(&location_id))
}
