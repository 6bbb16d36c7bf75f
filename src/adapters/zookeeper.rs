use std::time::Duration;

use async_trait::async_trait;
use zookeeper_client as zk;

use crate::domain::model::AclMode;
use crate::domain::ports::{CreateOutcome, Store};
use crate::utils::error::StoreError;

/// Store implementation over a live ZooKeeper session. One session per
/// run, shared by every worker; the client multiplexes concurrent calls
/// over the single connection. Every operation is bounded by the
/// configured timeout, and expiry surfaces as a transient `StoreError`,
/// distinct from the exists-conflict.
pub struct ZooKeeperStore {
    client: zk::Client,
    op_timeout: Duration,
}

impl ZooKeeperStore {
    pub async fn connect(server: &str, op_timeout_secs: u64) -> Result<Self, StoreError> {
        let client = zk::Client::connect(server)
            .await
            .map_err(|e| StoreError::Session(format!("connect {}: {}", server, e)))?;
        tracing::debug!("connected to {}", server);
        Ok(Self {
            client,
            op_timeout: Duration::from_secs(op_timeout_secs),
        })
    }

    fn timeout_error(&self, path: &str) -> StoreError {
        StoreError::Timeout {
            path: path.to_string(),
            secs: self.op_timeout.as_secs(),
        }
    }
}

fn acls_for(mode: AclMode) -> zk::Acls<'static> {
    match mode {
        AclMode::OpenWorld => zk::Acls::anyone_all(),
        AclMode::CreatorOnly => zk::Acls::creator_all(),
        AclMode::WorldReadable => zk::Acls::anyone_read(),
    }
}

fn map_zk_error(path: &str, err: zk::Error) -> StoreError {
    match err {
        zk::Error::NoNode => StoreError::NoNode(path.to_string()),
        zk::Error::NoAuth | zk::Error::AuthFailed => StoreError::PermissionDenied(path.to_string()),
        zk::Error::ConnectionLoss => StoreError::ConnectionLoss,
        zk::Error::SessionExpired => StoreError::Session("session expired".to_string()),
        other => StoreError::Other(other.to_string()),
    }
}

#[async_trait]
impl Store for ZooKeeperStore {
    async fn create(
        &self,
        path: &str,
        data: &[u8],
        acl: AclMode,
    ) -> Result<CreateOutcome, StoreError> {
        let options = zk::CreateMode::Persistent.with_acls(acls_for(acl));
        match tokio::time::timeout(self.op_timeout, self.client.create(path, data, &options)).await
        {
            Err(_) => Err(self.timeout_error(path)),
            Ok(Ok(_)) => Ok(CreateOutcome::Created),
            Ok(Err(zk::Error::NodeExists)) => Ok(CreateOutcome::AlreadyExists),
            // For a create, NoNode means the parent path is absent.
            Ok(Err(zk::Error::NoNode)) => Err(StoreError::NoParent(path.to_string())),
            Ok(Err(e)) => Err(map_zk_error(path, e)),
        }
    }

    async fn set(&self, path: &str, data: &[u8]) -> Result<(), StoreError> {
        match tokio::time::timeout(self.op_timeout, self.client.set_data(path, data, None)).await {
            Err(_) => Err(self.timeout_error(path)),
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(map_zk_error(path, e)),
        }
    }

    async fn close(&self) -> Result<(), StoreError> {
        // The session ends when the last client handle drops.
        tracing::debug!("closing store session");
        Ok(())
    }
}
