//! Helm Operator Watches
//!
//! Loads the watches file that tells a Helm operator which Kubernetes
//! resource types to reconcile and which chart to deploy for each one.
//!
//! ```yaml
//! - group: cache.example.com
//!   version: v1alpha1
//!   kind: Memcached
//!   chart: ./helm-charts/memcached
//!   watchDependentResources: false
//!   overrideValues:
//!     image.repository: $MEMCACHED_IMAGE
//! ```
//!
//! Loading is all-or-nothing: the first invalid, duplicate or unloadable
//! entry fails the whole file and no watches are returned.
//!
//! # Example
//!
//! ```no_run
//! # fn example() -> Result<(), watches::WatchError> {
//! let watches = watches::load("./watches.yaml")?;
//! for watch in &watches {
//!     println!("{} -> {}", watch.group_version_kind.kind, watch.chart.name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod env;
pub mod error;
pub mod loader;
pub mod watch;

pub use env::{expand_env, expand_override_values, expand_with};
pub use error::{GvkError, WatchError};
pub use kube::core::GroupVersionKind;
pub use loader::{WatchLoader, load};
pub use watch::{Watch, verify_gvk};
