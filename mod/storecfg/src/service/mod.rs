pub mod matcher;
pub mod org;
pub mod plan;
pub mod profile;
pub mod provision;
pub mod settings;
pub mod template;
pub mod validator;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use abcpos_core::ServiceError;
use abcpos_kv::KVStore;

pub use provision::{AppliedPolicyPack, CompliancePolicyExecutor, NoopCompliancePolicy};

/// Store configuration service — holds the document store and the
/// compliance policy collaborator.
///
/// Catalog lookups and matching/validation are pure functions over the
/// static catalogs; only the persisted Store / profile documents go
/// through `kv`.
pub struct StorecfgService {
    pub(crate) kv: Arc<dyn KVStore>,
    pub(crate) compliance: Arc<dyn CompliancePolicyExecutor>,
}

impl StorecfgService {
    pub fn new(
        kv: Arc<dyn KVStore>,
        compliance: Arc<dyn CompliancePolicyExecutor>,
    ) -> Arc<Self> {
        Arc::new(Self { kv, compliance })
    }

    // ── Generic document helpers ──
    //
    // Documents are JSON blobs under `storecfg:{kind}:{id}`. `put_doc`
    // is an idempotent upsert: last write wins, no version check.

    fn doc_key(kind: &str, id: &str) -> String {
        format!("storecfg:{}:{}", kind, id)
    }

    pub(crate) fn get_doc<T: DeserializeOwned>(
        &self,
        kind: &str,
        id: &str,
    ) -> Result<Option<T>, ServiceError> {
        let bytes = self
            .kv
            .get(&Self::doc_key(kind, id))
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        match bytes {
            None => Ok(None),
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| ServiceError::Internal(e.to_string())),
        }
    }

    pub(crate) fn require_doc<T: DeserializeOwned>(
        &self,
        kind: &str,
        id: &str,
    ) -> Result<T, ServiceError> {
        self.get_doc(kind, id)?
            .ok_or_else(|| ServiceError::NotFound(format!("{} '{}' not found", kind, id)))
    }

    pub(crate) fn put_doc<T: Serialize>(
        &self,
        kind: &str,
        id: &str,
        doc: &T,
    ) -> Result<(), ServiceError> {
        let bytes =
            serde_json::to_vec(doc).map_err(|e| ServiceError::Internal(e.to_string()))?;
        self.kv
            .set(&Self::doc_key(kind, id), &bytes)
            .map_err(|e| ServiceError::Storage(e.to_string()))
    }

    pub(crate) fn delete_doc(&self, kind: &str, id: &str) -> Result<(), ServiceError> {
        self.kv
            .delete(&Self::doc_key(kind, id))
            .map_err(|e| ServiceError::Storage(e.to_string()))
    }

    pub(crate) fn list_docs<T: DeserializeOwned>(
        &self,
        kind: &str,
    ) -> Result<Vec<T>, ServiceError> {
        let rows = self
            .kv
            .scan(&Self::doc_key(kind, ""))
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        rows.into_iter()
            .map(|(_, bytes)| {
                serde_json::from_slice(&bytes).map_err(|e| ServiceError::Internal(e.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;

    /// Service over a throwaway redb file with the no-op compliance
    /// collaborator. Shared by service tests.
    pub(crate) fn test_service() -> Arc<StorecfgService> {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let kv = Arc::new(abcpos_kv::RedbStore::open(tmp.path()).unwrap());
        StorecfgService::new(kv, Arc::new(NoopCompliancePolicy))
    }
}
