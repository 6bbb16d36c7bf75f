pub mod toml_config;

use clap::{Parser, ValueEnum};

use crate::config::toml_config::TomlSettings;
use crate::domain::model::AclMode;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_endpoint, validate_positive_number, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "zk-bootstrap")]
#[command(about = "Reconciles JSON service definitions into a ZooKeeper namespace")]
pub struct CliConfig {
    /// Service definition files to reconcile, processed in order
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Coordination store endpoint (host:port)
    #[arg(long)]
    pub server: Option<String>,

    /// ACL applied to created nodes; the default grants read/write/delete
    /// to anyone
    #[arg(long, value_enum)]
    pub acl: Option<AclMode>,

    /// Worker count; 1 keeps the strictly sequential behavior
    #[arg(long)]
    pub jobs: Option<usize>,

    /// Per-operation timeout against the store, in seconds
    #[arg(long)]
    pub op_timeout_secs: Option<u64>,

    /// Optional TOML settings file; command-line flags win
    #[arg(long)]
    pub config: Option<String>,

    /// Reconcile against an in-memory store instead of a live server
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, value_enum, default_value = "compact")]
    pub log_format: LogFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Effective settings after merging CLI flags over the optional TOML
/// file over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: String,
    pub acl: AclMode,
    pub jobs: usize,
    pub op_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: "127.0.0.1:2181".to_string(),
            acl: AclMode::OpenWorld,
            jobs: 1,
            op_timeout_secs: 10,
        }
    }
}

impl Settings {
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => TomlSettings::from_file(path)?,
            None => TomlSettings::default(),
        };
        let store = file.store();
        let defaults = Settings::default();

        Ok(Self {
            server: cli
                .server
                .clone()
                .or(store.server)
                .unwrap_or(defaults.server),
            acl: cli.acl.or(store.acl).unwrap_or(defaults.acl),
            jobs: cli.jobs.or(store.jobs).unwrap_or(defaults.jobs),
            op_timeout_secs: cli
                .op_timeout_secs
                .or(store.op_timeout_secs)
                .unwrap_or(defaults.op_timeout_secs),
        })
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_endpoint("server", &self.server)?;
        validate_positive_number("jobs", self.jobs as u64, 1)?;
        validate_positive_number("op_timeout_secs", self.op_timeout_secs, 1)?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn server(&self) -> &str {
        &self.server
    }

    fn acl(&self) -> AclMode {
        self.acl
    }

    fn jobs(&self) -> usize {
        self.jobs
    }

    fn op_timeout_secs(&self) -> u64 {
        self.op_timeout_secs
    }
}
