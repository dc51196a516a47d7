pub mod api;
pub mod catalog;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;
use abcpos_core::Module;

use service::StorecfgService;

/// Storecfg Module — store configuration resolution and hardware
/// provisioning.
pub struct StorecfgModule {
    service: Arc<StorecfgService>,
}

impl StorecfgModule {
    pub fn new(service: Arc<StorecfgService>) -> Self {
        Self { service }
    }
}

impl Module for StorecfgModule {
    fn name(&self) -> &str {
        "storecfg"
    }

    fn routes(&self) -> Router {
        api::router(self.service.clone())
    }
}
