//! Mock ChartLoader for unit testing
//!
//! Serves charts from memory so pipeline tests do not need chart
//! directories on disk. Every request is recorded.

use crate::chart::{Chart, Metadata};
use crate::error::ChartError;
use crate::loader::ChartLoader;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock ChartLoader for testing
#[derive(Debug, Clone, Default)]
pub struct MockChartLoader {
    pub(crate) charts: Arc<Mutex<HashMap<PathBuf, Chart>>>,
    pub(crate) failures: Arc<Mutex<HashMap<PathBuf, String>>>,
    pub(crate) requests: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockChartLoader {
    /// Create an empty mock loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `chart` for `path` (for test setup)
    pub fn add_chart(&self, path: impl Into<PathBuf>, chart: Chart) {
        self.charts.lock().unwrap().insert(path.into(), chart);
    }

    /// Make loads of `path` fail with an `InvalidData` IO error
    pub fn fail_on(&self, path: impl Into<PathBuf>, reason: impl Into<String>) {
        self.failures.lock().unwrap().insert(path.into(), reason.into());
    }

    /// Paths requested so far, in call order
    pub fn requests(&self) -> Vec<PathBuf> {
        self.requests.lock().unwrap().clone()
    }

    /// Build a minimal valid chart
    pub fn test_chart(name: &str, version: &str) -> Chart {
        Chart {
            metadata: Metadata {
                api_version: "v2".to_string(),
                name: name.to_string(),
                version: version.to_string(),
                kube_version: None,
                description: None,
                chart_type: None,
                keywords: Vec::new(),
                home: None,
                sources: Vec::new(),
                maintainers: Vec::new(),
                app_version: None,
                deprecated: false,
                annotations: std::collections::BTreeMap::new(),
            },
            values: serde_yaml::Mapping::new(),
            templates: Vec::new(),
            files: Vec::new(),
            dependencies: Vec::new(),
        }
    }
}

impl ChartLoader for MockChartLoader {
    fn load(&self, path: &Path) -> Result<Chart, ChartError> {
        self.requests.lock().unwrap().push(path.to_path_buf());

        if path.as_os_str().is_empty() {
            return Err(ChartError::EmptyReference);
        }
        if let Some(reason) = self.failures.lock().unwrap().get(path) {
            return Err(ChartError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, reason.clone()),
            });
        }
        self.charts
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| ChartError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
    }
}
