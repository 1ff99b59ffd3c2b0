//! Structural diff engine for dashboards and data sources.
//!
//! The engine compares two [`ConfigSnapshot`](crate::model::ConfigSnapshot)s
//! and produces [`DiffRecord`]s without performing any IO or logging.
//!
//! # Architecture
//!
//! - [`flatten`]: nested panel trees become one pre-order sequence
//! - [`Correspondence`]: keyed partition of two collections into common and
//!   unique entries
//! - [`ChangeComputer`](traits::ChangeComputer): one implementation per
//!   compared entity, in the [`changes`] module
//! - [`DiffEngine`]: orchestration over dashboard and data source collections
//!
//! # Example
//!
//! ```
//! use grafana_dashboard_sync::diff::DiffEngine;
//! use grafana_dashboard_sync::model::{ConfigSnapshot, DataSourceRecord};
//!
//! let left = ConfigSnapshot::new("prod")
//!     .with_datasources(vec![DataSourceRecord::new("Jaeger", "jaeger")]);
//! let right = ConfigSnapshot::new("staging")
//!     .with_datasources(vec![DataSourceRecord::new("Jaeger", "tempo")]);
//!
//! let result = DiffEngine::new().diff(&left, &right);
//! assert!(result.has_changes());
//! ```

pub mod changes;
pub mod correspond;
mod engine;
mod engine_config;
mod flatten;
mod record;
mod result;
pub mod traits;

pub use correspond::{normalize_key, Correspondence};
pub use engine::DiffEngine;
pub use engine_config::{
    DashboardKey, DataSourceRefMode, DiffEngineConfig, ReportType, VariableCountPolicy,
};
pub use flatten::flatten;
pub use record::{
    truncate_for_display, Diagnostic, DiffKind, DiffRecord, Scope, Side, DEFAULT_DISPLAY_WIDTH,
    ELLIPSIS,
};
pub use result::{DiffResult, DiffSummary, Report, SideInfo};
pub use traits::{ChangeComputer, ChangeSet};
