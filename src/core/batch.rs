use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{Mutex, OwnedMutexGuard, Semaphore};

use crate::core::loader;
use crate::core::reconciler::NodeReconciler;
use crate::core::service::ServiceManager;
use crate::domain::model::Outcome;
use crate::utils::error::Result;

/// Drives the whole batch. Inputs are processed in the order given and
/// every per-input error is contained here: one bad file never aborts
/// the rest. Only base-directory setup is fatal.
pub struct BatchRunner {
    manager: ServiceManager,
    jobs: usize,
}

impl BatchRunner {
    pub fn new(reconciler: NodeReconciler, jobs: usize) -> Self {
        Self {
            manager: ServiceManager::new(reconciler),
            jobs: jobs.max(1),
        }
    }

    /// One Outcome per input, preserving input order. The error return
    /// covers base-directory setup only; nothing processed after that
    /// point escapes as an error.
    pub async fn run(&self, inputs: &[String]) -> Result<Vec<Outcome>> {
        self.manager.reconciler().ensure_base_dirs().await?;

        if self.jobs <= 1 {
            Ok(self.run_sequential(inputs).await)
        } else {
            Ok(self.run_concurrent(inputs).await)
        }
    }

    async fn run_sequential(&self, inputs: &[String]) -> Vec<Outcome> {
        let mut outcomes = Vec::with_capacity(inputs.len());
        for source in inputs {
            outcomes.push(process_one(&self.manager, source).await);
        }
        outcomes
    }

    /// Bounded worker pool. Distinct service names touch disjoint paths,
    /// so the only client-side synchronization needed is one in-flight
    /// reconciliation per name; outcomes are still collected in input
    /// order.
    async fn run_concurrent(&self, inputs: &[String]) -> Vec<Outcome> {
        let semaphore = Arc::new(Semaphore::new(self.jobs));
        let locks = NameLocks::default();

        let mut handles = Vec::with_capacity(inputs.len());
        for source in inputs {
            let semaphore = semaphore.clone();
            let locks = locks.clone();
            let manager = self.manager.clone();
            let source = source.clone();
            handles.push((
                source.clone(),
                tokio::spawn(async move {
                    let _permit = semaphore.acquire_owned().await.ok();
                    process_one_guarded(&manager, &source, &locks).await
                }),
            ));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for (source, handle) in handles {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => outcomes.push(Outcome::failure(source, format!("worker failed: {}", e))),
            }
        }
        outcomes
    }
}

async fn process_one(manager: &ServiceManager, source: &str) -> Outcome {
    let result = match loader::load_definition(source) {
        Ok(record) => manager.manage_service(&record).await,
        Err(e) => Err(e),
    };
    finish(source, result)
}

async fn process_one_guarded(manager: &ServiceManager, source: &str, locks: &NameLocks) -> Outcome {
    let record = match loader::load_definition(source) {
        Ok(record) => record,
        Err(e) => return finish(source, Err(e)),
    };

    // A record without a usable name cannot reach the store anyway; only
    // named records need the per-name serialization.
    let _guard = locks
        .acquire(record.get("name").and_then(Value::as_str))
        .await;
    finish(source, manager.manage_service(&record).await)
}

fn finish(source: &str, result: Result<String>) -> Outcome {
    match result {
        Ok(path) => {
            tracing::info!("reconciled {} -> {}", source, path);
            Outcome::success(source, path)
        }
        Err(e) => {
            tracing::warn!("failed {}: {}", source, e);
            Outcome::failure(source, e)
        }
    }
}

/// Async locks keyed by service name, created on first use.
#[derive(Clone, Default)]
struct NameLocks {
    inner: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl NameLocks {
    async fn acquire(&self, name: Option<&str>) -> Option<OwnedMutexGuard<()>> {
        let name = name?;
        let lock = {
            let mut map = self.inner.lock().await;
            map.entry(name.to_string()).or_default().clone()
        };
        Some(lock.lock_owned().await)
    }
}
