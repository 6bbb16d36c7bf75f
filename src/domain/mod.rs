pub mod model;
pub mod ports;

pub use model::{AclMode, Outcome, ServiceDefinition, SocketDefinition};
pub use ports::{ConfigProvider, CreateOutcome, Store};
