use async_trait::async_trait;

use crate::domain::model::AclMode;
use crate::utils::error::StoreError;

/// Result of a create attempt. The exists-conflict is a regular outcome,
/// distinguishable from real failures, so callers can fall back to an
/// overwrite without a broad error filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}

/// The coordination store, reduced to the capability set this tool needs:
/// create, set, close. Persistent nodes only; intermediate path segments
/// are not auto-created.
#[async_trait]
pub trait Store: Send + Sync {
    async fn create(
        &self,
        path: &str,
        data: &[u8],
        acl: AclMode,
    ) -> std::result::Result<CreateOutcome, StoreError>;

    /// Unconditional overwrite, ignoring the node's current version.
    async fn set(&self, path: &str, data: &[u8]) -> std::result::Result<(), StoreError>;

    async fn close(&self) -> std::result::Result<(), StoreError>;
}

pub trait ConfigProvider: Send + Sync {
    fn server(&self) -> &str;
    fn acl(&self) -> AclMode;
    fn jobs(&self) -> usize;
    fn op_timeout_secs(&self) -> u64;
}
