use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::error::Result;

/// One validated service definition. `document` keeps the full original
/// record so arbitrary extra keys pass through verbatim into the stored
/// node content; the store is the system of record, not the input file.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDefinition {
    pub name: String,
    pub sockets: Vec<SocketDefinition>,
    pub document: Value,
}

impl ServiceDefinition {
    /// Node content for `/services/<name>`: the re-serialized record.
    pub fn content(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.document)?)
    }
}

/// A declared network endpoint a service wishes to listen on or connect
/// to. At least one of `bind`/`connect` is present; both are allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct SocketDefinition {
    pub name: String,
    pub kind: String,
    pub bind: Option<String>,
    pub connect: Option<String>,
}

/// ACL applied to every node this tool creates. The historical default
/// grants read/write/delete to anyone, which is why it is a visible,
/// overridable setting rather than a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AclMode {
    /// `{scheme: world, id: anyone, perms: all}`
    OpenWorld,
    /// Full permissions for the creating session's identity only.
    CreatorOnly,
    /// Anyone may read, nobody but the creator may write.
    WorldReadable,
}

impl Default for AclMode {
    fn default() -> Self {
        AclMode::OpenWorld
    }
}

/// Per-input result of one batch run. Created during iteration, consumed
/// by reporting, never persisted.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub source: String,
    pub result: std::result::Result<String, String>,
}

impl Outcome {
    pub fn success(source: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            result: Ok(path.into()),
        }
    }

    pub fn failure(source: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            source: source.into(),
            result: Err(reason.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// The one-line report format: `OK <file>` or `KO <file> <reason>`.
    pub fn report_line(&self) -> String {
        match &self.result {
            Ok(_) => format!("OK {}", self.source),
            Err(reason) => format!("KO {} {}", self.source, reason),
        }
    }
}
