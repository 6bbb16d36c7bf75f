use std::sync::Arc;

use crate::core::paths;
use crate::domain::model::AclMode;
use crate::domain::ports::{CreateOutcome, Store};
use crate::utils::error::StoreError;

/// Converges single nodes toward a desired content: create if absent,
/// overwrite if present. The store handle is injected so the whole
/// reconciliation path runs unchanged against the in-memory fake.
#[derive(Clone)]
pub struct NodeReconciler {
    store: Arc<dyn Store>,
    acl: AclMode,
}

impl NodeReconciler {
    pub fn new(store: Arc<dyn Store>, acl: AclMode) -> Self {
        Self { store, acl }
    }

    /// Create-or-set. The exists-conflict from `create` is a tagged
    /// outcome, not an error; every real failure propagates untouched.
    /// Retries, if any, belong to the caller.
    pub async fn ensure_node(&self, path: &str, content: &[u8]) -> Result<(), StoreError> {
        match self.store.create(path, content, self.acl).await? {
            CreateOutcome::Created => {
                tracing::debug!("created {}", path);
                Ok(())
            }
            CreateOutcome::AlreadyExists => {
                // Last-writer-wins: no version check on the overwrite.
                tracing::debug!("exists, overwriting {}", path);
                self.store.set(path, content).await
            }
        }
    }

    /// The store does not auto-create intermediate path segments, so the
    /// two roots must exist before any service-specific node. Fatal to
    /// the whole run when this fails.
    pub async fn ensure_base_dirs(&self) -> Result<(), StoreError> {
        self.ensure_node(paths::SERVICES_ROOT, b"").await?;
        self.ensure_node(paths::LISTEN_ROOT, b"").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{MemoryStore, OpRecord};

    fn reconciler(store: &Arc<MemoryStore>) -> NodeReconciler {
        NodeReconciler::new(store.clone() as Arc<dyn Store>, AclMode::OpenWorld)
    }

    #[tokio::test]
    async fn test_ensure_node_creates_when_absent() {
        let store = Arc::new(MemoryStore::new());
        let r = reconciler(&store);

        r.ensure_base_dirs().await.unwrap();
        r.ensure_node("/services/web", b"abc").await.unwrap();

        assert_eq!(store.content("/services/web").await, Some(b"abc".to_vec()));
        assert_eq!(
            store.ops().await.last(),
            Some(&OpRecord::Create("/services/web".to_string()))
        );
    }

    #[tokio::test]
    async fn test_ensure_node_overwrites_when_present() {
        let store = Arc::new(MemoryStore::new());
        let r = reconciler(&store);
        r.ensure_base_dirs().await.unwrap();

        r.ensure_node("/services/web", b"v1").await.unwrap();
        r.ensure_node("/services/web", b"v2").await.unwrap();

        assert_eq!(store.content("/services/web").await, Some(b"v2".to_vec()));
        assert_eq!(
            store.ops().await.last(),
            Some(&OpRecord::Set("/services/web".to_string()))
        );
    }

    #[tokio::test]
    async fn test_ensure_node_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let r = reconciler(&store);
        r.ensure_base_dirs().await.unwrap();

        r.ensure_node("/services/web", b"same").await.unwrap();
        let after_once = store.dump().await;
        r.ensure_node("/services/web", b"same").await.unwrap();
        assert_eq!(store.dump().await, after_once);
    }

    #[tokio::test]
    async fn test_missing_parent_propagates() {
        let store = Arc::new(MemoryStore::new());
        let r = reconciler(&store);

        // No base dirs ensured.
        let err = r.ensure_node("/services/web", b"x").await.unwrap_err();
        assert_eq!(err, StoreError::NoParent("/services/web".to_string()));
    }

    #[tokio::test]
    async fn test_store_failure_propagates_without_retry() {
        let store = Arc::new(MemoryStore::new());
        let r = reconciler(&store);
        r.ensure_base_dirs().await.unwrap();
        store.fail_on("/services/web").await;

        let err = r.ensure_node("/services/web", b"x").await.unwrap_err();
        assert_eq!(err, StoreError::ConnectionLoss);
        // One create attempt, nothing else.
        let attempts = store
            .ops()
            .await
            .iter()
            .filter(|op| op.path() == "/services/web")
            .count();
        assert_eq!(attempts, 1);
    }

    #[tokio::test]
    async fn test_base_dirs_order() {
        let store = Arc::new(MemoryStore::new());
        let r = reconciler(&store);
        r.ensure_base_dirs().await.unwrap();

        let ops = store.ops().await;
        assert_eq!(
            ops,
            vec![
                OpRecord::Create("/services".to_string()),
                OpRecord::Create("/listen".to_string()),
            ]
        );
    }
}
