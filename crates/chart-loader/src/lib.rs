//! Helm Chart Loader
//!
//! Loads a chart package from an unpacked chart directory on disk.
//!
//! A chart directory looks like:
//!
//! ```text
//! mychart/
//!   Chart.yaml        # required metadata
//!   values.yaml       # optional default values
//!   templates/        # manifests, loaded as raw files
//!   charts/           # subchart directories, loaded recursively
//!   README.md         # any other file is kept as a raw file
//! ```
//!
//! Every call to [`ChartLoader::load`] reads the directory again and returns
//! an independently owned [`Chart`]. Nothing is cached.
//!
//! # Example
//!
//! ```no_run
//! use chart_loader::{ChartLoader, DirectoryChartLoader};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), chart_loader::ChartError> {
//! let chart = DirectoryChartLoader.load(Path::new("./charts/nginx"))?;
//! println!("{} {}", chart.name(), chart.version());
//! # Ok(())
//! # }
//! ```

pub mod chart;
pub mod error;
pub mod loader;
#[cfg(feature = "test-util")]
pub mod mock;

pub use chart::{Chart, ChartFile, ChartType, Metadata};
pub use error::{ChartError, MetadataError};
pub use loader::{ChartLoader, DirectoryChartLoader};
#[cfg(feature = "test-util")]
pub use mock::MockChartLoader;
