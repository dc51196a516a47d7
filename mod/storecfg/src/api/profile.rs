use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};
use serde::Deserialize;

use abcpos_core::ServiceError;

use crate::model::StoreHardwareProfile;
use crate::service::profile::{UpsertHardwareProfileInput, VerticalProfileView};

use super::{AppState, ok_json};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/hardware-profiles/{location_id}",
            put(upsert_hardware_profile).get(get_hardware_profile),
        )
        .route(
            "/vertical-profiles/{location_id}",
            get(get_vertical_profile).patch(patch_vertical_profile),
        )
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct VerticalProfileQuery {
    resolved: bool,
}

async fn upsert_hardware_profile(
    State(svc): State<AppState>,
    Path(location_id): Path<String>,
    Json(input): Json<UpsertHardwareProfileInput>,
) -> Result<Json<StoreHardwareProfile>, ServiceError> {
    ok_json(svc.upsert_hardware_profile(&location_id, &input))
}

async fn get_hardware_profile(
    State(svc): State<AppState>,
    Path(location_id): Path<String>,
) -> Result<Json<StoreHardwareProfile>, ServiceError> {
    ok_json(svc.get_hardware_profile(&location_id))
}

async fn get_vertical_profile(
    State(svc): State<AppState>,
    Path(location_id): Path<String>,
    Query(q): Query<VerticalProfileQuery>,
) -> Result<Json<VerticalProfileView>, ServiceError> {
    ok_json(svc.get_vertical_profile(&location_id, q.resolved))
}

async fn patch_vertical_profile(
    State(svc): State<AppState>,
    Path(location_id): Path<String>,
    Json(patch): Json<serde_json::Value>,
) -> Result<Json<VerticalProfileView>, ServiceError> {
    ok_json(svc.update_vertical_profile(&location_id, &patch))
}
