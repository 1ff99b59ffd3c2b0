//! Read-only data model shared by the retrieval layer and the diff engine.
//!
//! Documents are deserialized from the Grafana HTTP API shapes and are never
//! mutated by the comparison code.

mod dashboard;
mod datasource;
mod snapshot;

pub use dashboard::*;
pub use datasource::*;
pub use snapshot::*;
