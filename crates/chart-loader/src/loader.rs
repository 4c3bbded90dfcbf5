//! Chart directory loader
//!
//! [`ChartLoader`] is the seam callers depend on so chart loading can be
//! mocked in unit tests. [`DirectoryChartLoader`] is the real implementation.

use crate::chart::{Chart, ChartFile, Metadata};
use crate::error::ChartError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const CHART_FILE: &str = "Chart.yaml";
const VALUES_FILE: &str = "values.yaml";
const TEMPLATES_DIR: &str = "templates";
const CHARTS_DIR: &str = "charts";

/// Trait for chart loading
///
/// Implementations must return a freshly owned [`Chart`] on every call.
pub trait ChartLoader: Send + Sync {
    /// Load the chart found at `path`
    fn load(&self, path: &Path) -> Result<Chart, ChartError>;
}

/// Loads unpacked chart directories from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryChartLoader;

impl ChartLoader for DirectoryChartLoader {
    fn load(&self, path: &Path) -> Result<Chart, ChartError> {
        if path.as_os_str().is_empty() {
            return Err(ChartError::EmptyReference);
        }
        load_dir(path)
    }
}

fn load_dir(dir: &Path) -> Result<Chart, ChartError> {
    let meta = fs::metadata(dir).map_err(|e| io_error(dir, e))?;
    if !meta.is_dir() {
        return Err(ChartError::NotADirectory(dir.to_path_buf()));
    }

    let metadata = read_metadata(dir)?;
    let values = read_values(dir)?;

    let mut templates = Vec::new();
    let templates_dir = dir.join(TEMPLATES_DIR);
    if templates_dir.is_dir() {
        collect_files(&templates_dir, TEMPLATES_DIR, &mut templates)?;
    }
    templates.sort_by(|a, b| a.name.cmp(&b.name));

    let mut files = Vec::new();
    let mut dependencies = Vec::new();
    for (path, kind) in sorted_entries(dir)? {
        let name = file_name(&path);
        if is_dir(&path, kind) {
            if name == CHARTS_DIR {
                dependencies = load_subcharts(&path, &mut files)?;
            }
            // templates/ handled above, other directories are not part of a chart
            continue;
        }
        if name == CHART_FILE || name == VALUES_FILE {
            continue;
        }
        let data = fs::read(&path).map_err(|e| io_error(&path, e))?;
        files.push(ChartFile { name, data });
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));

    debug!(
        "Loaded chart {} {} from {} ({} templates, {} subcharts)",
        metadata.name,
        metadata.version,
        dir.display(),
        templates.len(),
        dependencies.len()
    );

    Ok(Chart {
        metadata,
        values,
        templates,
        files,
        dependencies,
    })
}

fn read_metadata(dir: &Path) -> Result<Metadata, ChartError> {
    let path = dir.join(CHART_FILE);
    if !path.is_file() {
        return Err(ChartError::MissingChartFile(dir.to_path_buf()));
    }
    let bytes = fs::read(&path).map_err(|e| io_error(&path, e))?;
    let metadata: Metadata = serde_yaml::from_slice(&bytes).map_err(|source| ChartError::Metadata {
        path: dir.to_path_buf(),
        source,
    })?;
    metadata.validate().map_err(|source| ChartError::Invalid {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(metadata)
}

fn read_values(dir: &Path) -> Result<serde_yaml::Mapping, ChartError> {
    let path = dir.join(VALUES_FILE);
    if !path.is_file() {
        return Ok(serde_yaml::Mapping::new());
    }
    let bytes = fs::read(&path).map_err(|e| io_error(&path, e))?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_yaml::Mapping::new());
    }
    let values: Option<serde_yaml::Mapping> = serde_yaml::from_slice(&bytes).map_err(|source| ChartError::Values {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(values.unwrap_or_default())
}

/// Load subchart directories under `charts/`
///
/// Entries starting with `.` or `_` are ignored. Anything that is not a
/// directory (packaged `*.tgz` subcharts, `*.prov` files) is kept as a raw
/// file of the parent chart.
fn load_subcharts(charts_dir: &Path, files: &mut Vec<ChartFile>) -> Result<Vec<Chart>, ChartError> {
    let mut subcharts = Vec::new();
    for (path, kind) in sorted_entries(charts_dir)? {
        let name = file_name(&path);
        if name.starts_with('.') || name.starts_with('_') {
            continue;
        }
        if is_dir(&path, kind) {
            subcharts.push(load_dir(&path)?);
        } else {
            let data = fs::read(&path).map_err(|e| io_error(&path, e))?;
            files.push(ChartFile {
                name: format!("{CHARTS_DIR}/{name}"),
                data,
            });
        }
    }
    Ok(subcharts)
}

/// Recursively collect files under `dir`, naming them relative to the chart root
///
/// Symlinked directories are not descended into, so link cycles cannot recurse.
fn collect_files(dir: &Path, prefix: &str, out: &mut Vec<ChartFile>) -> Result<(), ChartError> {
    for (path, kind) in sorted_entries(dir)? {
        let name = format!("{prefix}/{}", file_name(&path));
        if kind.is_dir() {
            collect_files(&path, &name, out)?;
        } else if kind.is_symlink() && path.is_dir() {
            debug!("Skipping symlinked directory {}", path.display());
        } else {
            let data = fs::read(&path).map_err(|e| io_error(&path, e))?;
            out.push(ChartFile { name, data });
        }
    }
    Ok(())
}

/// Directory entries sorted by path, with their unfollowed file types
fn sorted_entries(dir: &Path) -> Result<Vec<(PathBuf, fs::FileType)>, ChartError> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| io_error(dir, e))? {
        let entry = entry.map_err(|e| io_error(dir, e))?;
        let kind = entry.file_type().map_err(|e| io_error(&entry.path(), e))?;
        entries.push((entry.path(), kind));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}

/// Directory check that follows a top-level symlink once but never recurses through it
fn is_dir(path: &Path, kind: fs::FileType) -> bool {
    kind.is_dir() || (kind.is_symlink() && path.is_dir())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn io_error(path: &Path, source: std::io::Error) -> ChartError {
    ChartError::Io {
        path: path.to_path_buf(),
        source,
    }
}
