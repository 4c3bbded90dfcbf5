//! Watch entries
//!
//! [`RawWatch`] is one element of the watches file as written. [`Watch`] is
//! the validated result handed to the operator runtime.

use crate::error::GvkError;
use chart_loader::Chart;
use kube::core::GroupVersionKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Dependent resources are watched unless an entry opts out
pub const DEFAULT_WATCH_DEPENDENT_RESOURCES: bool = true;

/// A validated binding of a resource type to a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Watch {
    pub group_version_kind: GroupVersionKind,
    /// Chart loaded for this entry; never shared with other entries
    pub chart: Chart,
    pub watch_dependent_resources: bool,
    /// Override values with environment references already expanded
    pub override_values: BTreeMap<String, String>,
}

/// One entry of the watches file, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWatch {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub chart: String,
    /// Kept optional so an absent field can be told apart from `false`
    #[serde(default)]
    pub watch_dependent_resources: Option<bool>,
    #[serde(default)]
    pub override_values: Option<BTreeMap<String, String>>,
}

impl RawWatch {
    /// Identity exactly as written; nothing is trimmed or case-folded
    #[must_use]
    pub fn group_version_kind(&self) -> GroupVersionKind {
        GroupVersionKind::gvk(&self.group, &self.version, &self.kind)
    }

    /// `watchDependentResources` with the default applied
    #[must_use]
    pub fn watch_dependent_resources(&self) -> bool {
        self.watch_dependent_resources
            .unwrap_or(DEFAULT_WATCH_DEPENDENT_RESOURCES)
    }
}

/// Check that a GVK is usable as a watch key
///
/// An empty group is valid (the core API group). Version and kind must be
/// non-empty; no other format checks are made.
pub fn verify_gvk(gvk: &GroupVersionKind) -> Result<(), GvkError> {
    if gvk.version.is_empty() {
        return Err(GvkError::EmptyVersion);
    }
    if gvk.kind.is_empty() {
        return Err(GvkError::EmptyKind);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> RawWatch {
        serde_yaml::from_str(yaml).expect("valid watch entry")
    }

    #[test]
    fn test_watch_dependent_resources_defaults_to_true() {
        let raw = parse("version: v1\nkind: Foo\nchart: ./c\n");
        assert_eq!(raw.watch_dependent_resources, None);
        assert!(raw.watch_dependent_resources());
    }

    #[test]
    fn test_watch_dependent_resources_explicit_false() {
        let raw = parse("version: v1\nkind: Foo\nchart: ./c\nwatchDependentResources: false\n");
        assert!(!raw.watch_dependent_resources());
    }

    #[test]
    fn test_watch_dependent_resources_null_uses_default() {
        let raw = parse("version: v1\nkind: Foo\nchart: ./c\nwatchDependentResources: null\n");
        assert!(raw.watch_dependent_resources());
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let raw = parse("kind: Foo\n");
        assert_eq!(raw.group, "");
        assert_eq!(raw.version, "");
        assert_eq!(raw.chart, "");
        assert_eq!(raw.override_values, None);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let raw = parse("version: v1\nkind: Foo\nchart: ./c\nreconcilePeriod: 1m\n");
        assert_eq!(raw.kind, "Foo");
    }

    #[test]
    fn test_non_string_override_value_rejected() {
        let result: Result<RawWatch, _> =
            serde_yaml::from_str("version: v1\nkind: Foo\nchart: ./c\noverrideValues:\n  replicas: [1, 2]\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_gvk_taken_verbatim() {
        let raw = parse("group: Apps.Example.COM\nversion: V1\nkind: foo\n");
        let gvk = raw.group_version_kind();
        assert_eq!(gvk.group, "Apps.Example.COM");
        assert_eq!(gvk.version, "V1");
        assert_eq!(gvk.kind, "foo");
    }

    #[test]
    fn test_verify_gvk() {
        assert_eq!(verify_gvk(&GroupVersionKind::gvk("", "v1", "ConfigMap")), Ok(()));
        assert_eq!(verify_gvk(&GroupVersionKind::gvk("apps", "v1", "Deployment")), Ok(()));
        assert_eq!(
            verify_gvk(&GroupVersionKind::gvk("", "", "Pod")),
            Err(GvkError::EmptyVersion)
        );
        assert_eq!(
            verify_gvk(&GroupVersionKind::gvk("apps", "v1", "")),
            Err(GvkError::EmptyKind)
        );
    }

    #[test]
    fn test_empty_group_is_distinct_identity() {
        let core = GroupVersionKind::gvk("", "v1", "Foo");
        let grouped = GroupVersionKind::gvk("example.com", "v1", "Foo");
        assert_ne!(core, grouped);
    }
}
