pub mod batch;
pub mod loader;
pub mod paths;
pub mod reconciler;
pub mod service;
pub mod validate;

pub use crate::domain::model::{AclMode, Outcome, ServiceDefinition, SocketDefinition};
pub use crate::domain::ports::{ConfigProvider, CreateOutcome, Store};
pub use crate::utils::error::Result;
