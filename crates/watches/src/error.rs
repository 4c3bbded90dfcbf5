//! Watches loading errors
//!
//! Every variant is terminal for a load: nothing is retried and no partial
//! watch list is returned alongside an error.

use chart_loader::ChartError;
use kube::core::GroupVersionKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a watches file
#[derive(Debug, Error)]
pub enum WatchError {
    /// The watches file could not be read
    #[error("failed to read watches file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The watches file is not a valid list of watch entries
    #[error("failed to parse watches from {origin}: {source}")]
    Parse {
        /// File path, or `<inline>` for in-memory input
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// An entry has a malformed Group/Version/Kind
    #[error("invalid GVK: {}: {source}", format_gvk(.gvk))]
    InvalidGvk {
        gvk: GroupVersionKind,
        #[source]
        source: GvkError,
    },

    /// Two entries share the same Group/Version/Kind
    #[error("duplicate GVK: {}", format_gvk(.gvk))]
    DuplicateGvk { gvk: GroupVersionKind },

    /// An entry's chart could not be loaded
    #[error("invalid chart {chart}: {source}")]
    ChartLoad {
        /// Chart reference exactly as written in the watches file
        chart: String,
        #[source]
        source: ChartError,
    },
}

/// Reasons a Group/Version/Kind is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GvkError {
    #[error("version must not be empty")]
    EmptyVersion,

    #[error("kind must not be empty")]
    EmptyKind,
}

/// Render a GVK the way Kubernetes tooling prints it (`group/version, Kind=kind`)
#[must_use]
pub fn format_gvk(gvk: &GroupVersionKind) -> String {
    format!("{}/{}, Kind={}", gvk.group, gvk.version, gvk.kind)
}
