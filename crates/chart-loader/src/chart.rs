//! Chart package models
//!
//! These models match the layout of a Helm chart directory.
//! See: https://helm.sh/docs/topics/charts/#the-chartyaml-file

use crate::error::MetadataError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// API version assumed when `Chart.yaml` does not set one
pub const DEFAULT_API_VERSION: &str = "v1";

/// API versions this loader understands
pub const SUPPORTED_API_VERSIONS: [&str; 2] = ["v1", "v2"];

/// A loaded chart package
///
/// Owned outright by whoever loaded it. Loading the same directory twice
/// yields two equal but independent values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    /// Contents of `Chart.yaml`
    pub metadata: Metadata,
    /// Contents of `values.yaml` (empty mapping when the file is absent)
    pub values: serde_yaml::Mapping,
    /// Files under `templates/`, sorted by relative path
    pub templates: Vec<ChartFile>,
    /// Other top-level files (README, NOTES, schema...), sorted by name
    pub files: Vec<ChartFile>,
    /// Subcharts found under `charts/`, sorted by directory name
    pub dependencies: Vec<Chart>,
}

impl Chart {
    /// Chart name from metadata
    #[must_use]
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Chart version from metadata
    #[must_use]
    pub fn version(&self) -> &str {
        &self.metadata.version
    }

    /// Whether this is a library chart (no installable templates)
    #[must_use]
    pub fn is_library(&self) -> bool {
        self.metadata.chart_type == Some(ChartType::Library)
    }
}

/// A raw file carried inside a chart
///
/// Only the name is serialized; the bytes stay in memory for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartFile {
    /// Path relative to the chart root, always `/`-separated
    pub name: String,
    #[serde(skip)]
    pub data: Vec<u8>,
}

/// Chart type (`type` field of `Chart.yaml`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Application,
    Library,
}

/// Chart maintainer entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maintainer {
    /// May be empty
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Contents of `Chart.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kube_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<ChartType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub maintainers: Vec<Maintainer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl Metadata {
    /// Check required fields and supported versions
    pub fn validate(&self) -> Result<(), MetadataError> {
        if !SUPPORTED_API_VERSIONS.contains(&self.api_version.as_str()) {
            return Err(MetadataError::UnsupportedApiVersion(self.api_version.clone()));
        }
        if self.name.trim().is_empty() {
            return Err(MetadataError::MissingName);
        }
        if self.version.trim().is_empty() {
            return Err(MetadataError::MissingVersion);
        }
        // Library charts only exist from apiVersion v2 onwards
        if self.chart_type == Some(ChartType::Library) && self.api_version == DEFAULT_API_VERSION {
            return Err(MetadataError::LibraryRequiresV2);
        }
        Ok(())
    }
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(yaml: &str) -> Metadata {
        serde_yaml::from_str(yaml).expect("valid Chart.yaml")
    }

    #[test]
    fn test_api_version_defaults_when_absent() {
        let meta = metadata("name: nginx\nversion: 1.2.3\n");
        assert_eq!(meta.api_version, "v1");
        assert_eq!(meta.validate(), Ok(()));
    }

    #[test]
    fn test_validate_requires_name() {
        let meta = metadata("apiVersion: v2\nversion: 0.1.0\n");
        assert_eq!(meta.validate(), Err(MetadataError::MissingName));
    }

    #[test]
    fn test_validate_requires_version() {
        let meta = metadata("apiVersion: v2\nname: nginx\n");
        assert_eq!(meta.validate(), Err(MetadataError::MissingVersion));
    }

    #[test]
    fn test_validate_rejects_unknown_api_version() {
        let meta = metadata("apiVersion: v3\nname: nginx\nversion: 0.1.0\n");
        assert_eq!(
            meta.validate(),
            Err(MetadataError::UnsupportedApiVersion("v3".to_string()))
        );
    }

    #[test]
    fn test_library_chart_needs_v2() {
        let meta = metadata("name: common\nversion: 0.1.0\ntype: library\n");
        assert_eq!(meta.validate(), Err(MetadataError::LibraryRequiresV2));

        let meta = metadata("apiVersion: v2\nname: common\nversion: 0.1.0\ntype: library\n");
        assert!(meta.validate().is_ok());
    }

    #[test]
    fn test_metadata_camel_case_fields() {
        let meta = metadata("apiVersion: v2\nname: nginx\nversion: 0.1.0\nappVersion: \"1.25\"\nkubeVersion: \">=1.22\"\n");
        assert_eq!(meta.app_version.as_deref(), Some("1.25"));
        assert_eq!(meta.kube_version.as_deref(), Some(">=1.22"));
    }

    #[test]
    fn test_maintainer_without_name() {
        let meta = metadata("apiVersion: v2\nname: nginx\nversion: 0.1.0\nmaintainers:\n  - email: ops@example.com\n");
        assert_eq!(meta.maintainers.len(), 1);
        assert_eq!(meta.maintainers[0].name, "");
        assert_eq!(meta.maintainers[0].email.as_deref(), Some("ops@example.com"));
        assert_eq!(meta.validate(), Ok(()));
    }
}
