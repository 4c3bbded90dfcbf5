//! Chart loading errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a chart package
#[derive(Debug, Error)]
pub enum ChartError {
    /// The chart reference was empty
    #[error("chart reference is empty")]
    EmptyReference,

    /// Reading a file or directory failed
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying IO failure
        #[source]
        source: std::io::Error,
    },

    /// Path exists but is not an unpacked chart directory
    #[error("{} is not a chart directory (packaged charts are not supported)", .0.display())]
    NotADirectory(PathBuf),

    /// `Chart.yaml` is missing from the chart directory
    #[error("Chart.yaml file is missing in {}", .0.display())]
    MissingChartFile(PathBuf),

    /// `Chart.yaml` could not be parsed
    #[error("cannot parse Chart.yaml in {}: {source}", .path.display())]
    Metadata {
        /// Chart directory
        path: PathBuf,
        /// YAML diagnostic
        #[source]
        source: serde_yaml::Error,
    },

    /// `values.yaml` could not be parsed
    #[error("cannot parse values.yaml in {}: {source}", .path.display())]
    Values {
        /// Chart directory
        path: PathBuf,
        /// YAML diagnostic
        #[source]
        source: serde_yaml::Error,
    },

    /// Metadata parsed but failed validation
    #[error("invalid chart metadata in {}: {source}", .path.display())]
    Invalid {
        /// Chart directory
        path: PathBuf,
        #[source]
        source: MetadataError,
    },
}

/// Reasons `Chart.yaml` metadata is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("unsupported apiVersion {0:?}")]
    UnsupportedApiVersion(String),

    #[error("chart.metadata.name is required")]
    MissingName,

    #[error("chart.metadata.version is required")]
    MissingVersion,

    #[error("library charts require apiVersion v2")]
    LibraryRequiresV2,
}
