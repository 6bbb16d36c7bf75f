use serde::{Deserialize, Serialize};
use std::fs;

use crate::domain::model::AclMode;
use crate::utils::error::{BootstrapError, Result};

/// Optional settings file. Everything is optional; command-line flags
/// take precedence over anything set here.
///
/// ```toml
/// [store]
/// server = "zk1.internal:2181"
/// acl = "creator-only"
/// jobs = 4
/// op_timeout_secs = 5
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlSettings {
    pub store: Option<StoreSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSection {
    pub server: Option<String>,
    pub acl: Option<AclMode>,
    pub jobs: Option<usize>,
    pub op_timeout_secs: Option<u64>,
}

impl TomlSettings {
    pub fn from_file(path: &str) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| BootstrapError::ConfigError {
            field: path.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn store(&self) -> StoreSection {
        self.store.clone().unwrap_or_default()
    }
}
