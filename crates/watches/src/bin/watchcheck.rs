//! Watches file checker
//!
//! Loads a watches file the same way the operator does at startup and
//! reports what it would watch. Exits non-zero if the file would stop the
//! operator from starting.
//!
//! The file is taken from the first argument, then `WATCHES_FILE`, then
//! `./watches.yaml`.

use anyhow::Context;
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_WATCHES_FILE: &str = "./watches.yaml";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let path = env::args()
        .nth(1)
        .or_else(|| env::var("WATCHES_FILE").ok())
        .unwrap_or_else(|| DEFAULT_WATCHES_FILE.to_string());

    info!("Loading watches from {}", path);

    let watches = watches::load(&path).with_context(|| format!("watches file {path} is not usable"))?;

    for watch in &watches {
        let gvk = &watch.group_version_kind;
        info!(
            "  {}/{} {} -> chart {} {} (watchDependentResources={}, {} override values)",
            gvk.group,
            gvk.version,
            gvk.kind,
            watch.chart.name(),
            watch.chart.version(),
            watch.watch_dependent_resources,
            watch.override_values.len()
        );
    }
    info!("{} watches OK", watches.len());

    Ok(())
}
