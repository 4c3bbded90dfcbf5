//! Watches file loader
//!
//! Pipeline, applied to every entry in file order:
//! verify GVK -> reject duplicates -> load chart -> expand override values.
//! The first failure aborts the load and the partial result is dropped.

use crate::env::{expand_override_values, process_env};
use crate::error::WatchError;
use crate::watch::{RawWatch, Watch, verify_gvk};
use chart_loader::{ChartLoader, DirectoryChartLoader};
use kube::core::GroupVersionKind;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Load the watches file at `path`
///
/// Charts are loaded from disk and override values are expanded against the
/// process environment.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Watch>, WatchError> {
    WatchLoader::new().load(path)
}

/// Watches loader with pluggable chart loading and environment lookup
///
/// Holds no state between calls; every load starts from scratch.
pub struct WatchLoader {
    charts: Box<dyn ChartLoader>,
    env: EnvLookup,
}

impl WatchLoader {
    /// Loader backed by [`DirectoryChartLoader`] and the process environment
    #[must_use]
    pub fn new() -> Self {
        Self {
            charts: Box::new(DirectoryChartLoader),
            env: Box::new(process_env),
        }
    }

    /// Use a different chart loader
    #[must_use]
    pub fn with_chart_loader(mut self, charts: impl ChartLoader + 'static) -> Self {
        self.charts = Box::new(charts);
        self
    }

    /// Resolve environment references through `env` instead of the process environment
    #[must_use]
    pub fn with_env<F>(mut self, env: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Box::new(env);
        self
    }

    /// Read and load the watches file at `path`
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Vec<Watch>, WatchError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| WatchError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let raw = parse(&bytes, &path.display().to_string())?;
        self.build(raw)
    }

    /// Load watches from the contents of a watches file
    pub fn load_from_slice(&self, bytes: &[u8]) -> Result<Vec<Watch>, WatchError> {
        let raw = parse(bytes, "<inline>")?;
        self.build(raw)
    }

    fn build(&self, raw: Vec<RawWatch>) -> Result<Vec<Watch>, WatchError> {
        let mut watches = Vec::with_capacity(raw.len());
        let mut seen: HashSet<GroupVersionKind> = HashSet::with_capacity(raw.len());

        for entry in raw {
            let gvk = entry.group_version_kind();

            verify_gvk(&gvk).map_err(|source| WatchError::InvalidGvk {
                gvk: gvk.clone(),
                source,
            })?;

            if seen.contains(&gvk) {
                return Err(WatchError::DuplicateGvk { gvk });
            }

            // Loaded afresh for every entry, even when chart paths repeat
            let chart = self
                .charts
                .load(Path::new(&entry.chart))
                .map_err(|source| WatchError::ChartLoad {
                    chart: entry.chart.clone(),
                    source,
                })?;

            let override_values = entry
                .override_values
                .as_ref()
                .map(|values| expand_override_values(values, &self.env))
                .unwrap_or_default();

            debug!(
                "Accepted watch {}/{} {} -> chart {} ({} override values)",
                gvk.group,
                gvk.version,
                gvk.kind,
                entry.chart,
                override_values.len()
            );

            seen.insert(gvk.clone());
            watches.push(Watch {
                group_version_kind: gvk,
                chart,
                watch_dependent_resources: entry.watch_dependent_resources(),
                override_values,
            });
        }

        Ok(watches)
    }
}

impl Default for WatchLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WatchLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchLoader").finish_non_exhaustive()
    }
}

/// Parse the watches document; an empty or `null` document is an empty list
fn parse(bytes: &[u8], origin: &str) -> Result<Vec<RawWatch>, WatchError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let raw: Option<Vec<RawWatch>> = serde_yaml::from_slice(bytes).map_err(|source| WatchError::Parse {
        origin: origin.to_string(),
        source,
    })?;
    Ok(raw.unwrap_or_default())
}
