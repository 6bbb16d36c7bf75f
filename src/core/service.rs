use serde_json::Value;

use crate::core::reconciler::NodeReconciler;
use crate::core::{paths, validate};
use crate::utils::error::Result;

/// Orchestrates one input end-to-end: validate, service node, then one
/// listen node per socket in declared order.
#[derive(Clone)]
pub struct ServiceManager {
    reconciler: NodeReconciler,
}

impl ServiceManager {
    pub fn new(reconciler: NodeReconciler) -> Self {
        Self { reconciler }
    }

    pub fn reconciler(&self) -> &NodeReconciler {
        &self.reconciler
    }

    /// Returns the service node path on success. A validation failure
    /// touches no node; a store failure aborts the remaining steps and
    /// leaves the nodes ensured so far in place (no rollback).
    pub async fn manage_service(&self, record: &Value) -> Result<String> {
        let definition = validate::validate(record)?;

        let service_path = paths::service_path(&definition.name);
        let content = definition.content()?;
        self.reconciler.ensure_node(&service_path, &content).await?;

        for socket in &definition.sockets {
            // Existence markers only; socket config lives in the service node.
            let listen = paths::listen_path(&definition.name, &socket.name);
            self.reconciler.ensure_node(&listen, b"").await?;
        }

        tracing::debug!(
            "reconciled {} ({} sockets)",
            service_path,
            definition.sockets.len()
        );
        Ok(service_path)
    }
}
