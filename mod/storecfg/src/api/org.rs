use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use abcpos_core::ServiceError;

use crate::model::{Organization, Region};
use crate::service::org::{CreateOrganizationInput, CreateRegionInput};

use super::{AppState, ok_json};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/organizations", post(create_organization))
        .route("/organizations/{id}", get(get_organization))
        .route("/regions", post(create_region))
        .route("/regions/{id}", get(get_region))
}

async fn create_organization(
    State(svc): State<AppState>,
    Json(input): Json<CreateOrganizationInput>,
) -> Result<Json<Organization>, ServiceError> {
    ok_json(svc.create_organization(&input))
}

async fn get_organization(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Organization>, ServiceError> {
    ok_json(svc.get_organization(&id))
}

async fn create_region(
    State(svc): State<AppState>,
    Json(input): Json<CreateRegionInput>,
) -> Result<Json<Region>, ServiceError> {
    ok_json(svc.create_region(&input))
}

async fn get_region(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Region>, ServiceError> {
    ok_json(svc.get_region(&id))
}
