//! Retrieval of dashboards and data sources from the Grafana HTTP API.
//!
//! Uses blocking `reqwest`; only compiled with the `fetch` feature.

mod grafana;
mod response;

pub use grafana::{GrafanaClient, GrafanaClientConfig};
pub use response::SearchHit;
