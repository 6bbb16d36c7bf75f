use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::model::AclMode;
use crate::domain::ports::{CreateOutcome, Store};
use crate::utils::error::StoreError;

/// Operation as seen by the store, recorded in arrival order. Lets tests
/// assert exactly which nodes were touched, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpRecord {
    Create(String),
    Set(String),
}

impl OpRecord {
    pub fn path(&self) -> &str {
        match self {
            OpRecord::Create(path) | OpRecord::Set(path) => path,
        }
    }
}

/// In-memory store with the same capability set and edge behavior as the
/// real one: persistent nodes, exists-conflict on create, no auto-created
/// parents. Backs `--dry-run` and the test suite.
#[derive(Default)]
pub struct MemoryStore {
    nodes: Mutex<BTreeMap<String, Vec<u8>>>,
    fail_paths: Mutex<HashSet<String>>,
    ops: Mutex<Vec<OpRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every future create/set on `path` fails with a connection loss.
    pub async fn fail_on(&self, path: &str) {
        self.fail_paths.lock().await.insert(path.to_string());
    }

    pub async fn contains(&self, path: &str) -> bool {
        self.nodes.lock().await.contains_key(path)
    }

    pub async fn content(&self, path: &str) -> Option<Vec<u8>> {
        self.nodes.lock().await.get(path).cloned()
    }

    /// Snapshot of the whole tree, for state-equality assertions.
    pub async fn dump(&self) -> BTreeMap<String, Vec<u8>> {
        self.nodes.lock().await.clone()
    }

    pub async fn ops(&self) -> Vec<OpRecord> {
        self.ops.lock().await.clone()
    }

    fn parent_of(path: &str) -> Option<&str> {
        path.rfind('/').filter(|i| *i > 0).map(|i| &path[..i])
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create(
        &self,
        path: &str,
        data: &[u8],
        _acl: AclMode,
    ) -> Result<CreateOutcome, StoreError> {
        // Record the attempt whether it succeeds or not; tests assert on
        // exactly which calls reached the store.
        self.ops.lock().await.push(OpRecord::Create(path.to_string()));
        if self.fail_paths.lock().await.contains(path) {
            return Err(StoreError::ConnectionLoss);
        }

        let mut nodes = self.nodes.lock().await;
        if nodes.contains_key(path) {
            return Ok(CreateOutcome::AlreadyExists);
        }
        if let Some(parent) = Self::parent_of(path) {
            if !nodes.contains_key(parent) {
                return Err(StoreError::NoParent(path.to_string()));
            }
        }

        nodes.insert(path.to_string(), data.to_vec());
        Ok(CreateOutcome::Created)
    }

    async fn set(&self, path: &str, data: &[u8]) -> Result<(), StoreError> {
        self.ops.lock().await.push(OpRecord::Set(path.to_string()));
        if self.fail_paths.lock().await.contains(path) {
            return Err(StoreError::ConnectionLoss);
        }

        let mut nodes = self.nodes.lock().await;
        match nodes.get_mut(path) {
            Some(existing) => {
                *existing = data.to_vec();
                Ok(())
            }
            None => Err(StoreError::NoNode(path.to_string())),
        }
    }

    async fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
