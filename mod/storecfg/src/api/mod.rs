pub mod catalog;
pub mod org;
pub mod profile;
pub mod store;

use std::sync::Arc;

use axum::{Json, Router};
use serde::Serialize;

use abcpos_core::ServiceError;

use crate::service::StorecfgService;

/// Shared application state.
pub type AppState = Arc<StorecfgService>;

/// Build the store-configuration API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/storecfg/v1", api_routes())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(catalog::routes())
        .merge(store::routes())
        .merge(profile::routes())
        .merge(org::routes())
}

/// Wrap a Result<T, ServiceError> into an API response. ServiceError
/// carries its own status/code/details mapping.
pub(crate) fn ok_json<T: Serialize>(
    result: Result<T, ServiceError>,
) -> Result<Json<T>, ServiceError> {
    result.map(Json)
}
