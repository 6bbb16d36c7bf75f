use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use zk_bootstrap::config::LogFormat;
use zk_bootstrap::utils::{logger, validation::Validate};
use zk_bootstrap::{
    BatchRunner, CliConfig, ConfigProvider, MemoryStore, NodeReconciler, Outcome, Settings, Store,
    ZooKeeperStore,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(),
    }

    tracing::info!("Starting zk-bootstrap");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // Everything before per-input processing is fatal: a run whose base
    // directories cannot be ensured has nothing trustworthy to report.
    let outcomes = match run(&cli).await {
        Ok(outcomes) => outcomes,
        Err(e) => {
            tracing::error!("setup failed: {:#}", e);
            eprintln!("❌ {:#}", e);
            std::process::exit(2);
        }
    };

    let mut failed = 0usize;
    for outcome in &outcomes {
        if !outcome.is_success() {
            failed += 1;
        }
        println!("{}", outcome.report_line());
    }

    if failed > 0 {
        tracing::warn!("{}/{} inputs failed", failed, outcomes.len());
        std::process::exit(1);
    }
    tracing::info!("✅ {} inputs reconciled", outcomes.len());
}

async fn run(cli: &CliConfig) -> anyhow::Result<Vec<Outcome>> {
    let settings = Settings::resolve(cli).context("loading settings")?;
    settings.validate().context("validating settings")?;

    let store: Arc<dyn Store> = if cli.dry_run {
        tracing::info!("dry-run: reconciling against the in-memory store");
        Arc::new(MemoryStore::new())
    } else {
        let zk = ZooKeeperStore::connect(settings.server(), settings.op_timeout_secs())
            .await
            .with_context(|| format!("connecting to {}", settings.server()))?;
        Arc::new(zk)
    };

    let reconciler = NodeReconciler::new(store.clone(), settings.acl());
    let runner = BatchRunner::new(reconciler, settings.jobs());

    let outcomes = runner
        .run(&cli.files)
        .await
        .context("ensuring base directories")?;

    if let Err(e) = store.close().await {
        tracing::warn!("store close failed: {}", e);
    }

    Ok(outcomes)
}
