//! Store adapters. `zookeeper` talks to a live cluster; `memory` is the
//! same capability set in-process, used by `--dry-run` and the tests.

pub mod memory;
pub mod zookeeper;

pub use memory::MemoryStore;
pub use zookeeper::ZooKeeperStore;
