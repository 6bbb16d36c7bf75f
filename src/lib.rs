pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{MemoryStore, ZooKeeperStore};
pub use config::{CliConfig, Settings};
pub use core::batch::BatchRunner;
pub use core::reconciler::NodeReconciler;
pub use domain::model::{AclMode, Outcome, ServiceDefinition, SocketDefinition};
pub use domain::ports::{ConfigProvider, CreateOutcome, Store};
pub use utils::error::{BootstrapError, Result, StoreError, ValidationError};
