//! Grafana API HTTP client.

use super::response::SearchHit;
use crate::config::ServerConfig;
use crate::error::{FetchErrorKind, ParseErrorKind, Result, SyncError};
use crate::model::{ConfigSnapshot, DashboardDocument, DashboardEnvelope, DataSourceRecord};
use regex::Regex;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Grafana client configuration.
#[derive(Debug, Clone)]
pub struct GrafanaClientConfig {
    /// Name of the server in the configuration file
    pub name: String,
    /// Base URL, without trailing slash
    pub api_base: String,
    /// Token for `Authorization: Bearer`
    pub bearer: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum retries for failed requests
    pub max_retries: u8,
}

impl GrafanaClientConfig {
    /// Build a client configuration for a named server entry.
    #[must_use]
    pub fn from_server(name: impl Into<String>, server: &ServerConfig) -> Self {
        Self {
            name: name.into(),
            api_base: server.base_url().to_string(),
            bearer: server.bearer.clone(),
            timeout: Duration::from_secs(server.timeout_secs),
            max_retries: 3,
        }
    }
}

/// HTTP client for one Grafana server.
pub struct GrafanaClient {
    client: Client,
    config: GrafanaClientConfig,
}

/// Helper to convert reqwest errors to fetch errors
fn network_error(msg: &str, err: &reqwest::Error) -> SyncError {
    SyncError::fetch(msg, FetchErrorKind::Network(err.to_string()))
}

impl GrafanaClient {
    /// Create a new Grafana client.
    pub fn new(config: GrafanaClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.bearer {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                SyncError::config(format!(
                    "bearer token of server '{}' contains invalid characters",
                    config.name
                ))
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| network_error("Failed to create HTTP client", &e))?;

        Ok(Self { client, config })
    }

    /// Create a client for a named server entry.
    pub fn for_server(name: &str, server: &ServerConfig) -> Result<Self> {
        Self::new(GrafanaClientConfig::from_server(name, server))
    }

    #[must_use]
    pub fn server_name(&self) -> &str {
        &self.config.name
    }

    /// List all dashboards.
    pub fn search_dashboards(&self) -> Result<Vec<SearchHit>> {
        let hits: Vec<SearchHit> = self.get_json("/api/search?query=&type=dash-db")?;
        Ok(hits.into_iter().filter(SearchHit::is_dashboard).collect())
    }

    /// Fetch the full model of one dashboard.
    pub fn dashboard(&self, uid: &str) -> Result<DashboardDocument> {
        let envelope: DashboardEnvelope = self.get_json(&format!("/api/dashboards/uid/{uid}"))?;
        Ok(envelope.dashboard)
    }

    /// List all data sources.
    pub fn datasources(&self) -> Result<Vec<DataSourceRecord>> {
        self.get_json("/api/datasources")
    }

    /// Fetch data sources and dashboards into a snapshot.
    ///
    /// With a `filter`, only dashboards whose title matches are fetched.
    pub fn fetch_snapshot(&self, filter: Option<&Regex>) -> Result<ConfigSnapshot> {
        let datasources = self.datasources()?;
        let hits = self.search_dashboards()?;
        let selected: Vec<&SearchHit> = hits
            .iter()
            .filter(|hit| filter.map_or(true, |re| re.is_match(&hit.title)))
            .collect();
        tracing::info!(
            "Fetching {} of {} dashboards from '{}'",
            selected.len(),
            hits.len(),
            self.config.name
        );

        let dashboards = selected
            .into_iter()
            .map(|hit| {
                tracing::debug!("Fetching dashboard '{}' ({})", hit.title, hit.uid);
                self.dashboard(&hit.uid)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ConfigSnapshot::new(self.config.name.as_str())
            .with_dashboards(dashboards)
            .with_datasources(datasources))
    }

    /// GET `path` with retries and decode the JSON body.
    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.config.api_base, path);
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s, ...
                let delay = Duration::from_secs(1 << (attempt - 1));
                std::thread::sleep(delay);
                tracing::debug!("Retry attempt {} after {:?}", attempt, delay);
            }

            match self.send(&url) {
                Ok(response) => return decode(response, path),
                Err(e) if is_retryable(&e) => {
                    tracing::debug!("GET {} attempt {} failed: {}", path, attempt + 1, e);
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            SyncError::fetch(
                format!("GET {path}"),
                FetchErrorKind::Network("no attempt made".to_string()),
            )
        }))
    }

    /// Send one request; non-success statuses become errors.
    fn send(&self, url: &str) -> Result<Response> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| network_error(&format!("GET {url}"), &e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let context = format!("GET {url}");
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SyncError::fetch(
                context,
                FetchErrorKind::Unauthorized(status.as_u16()),
            ));
        }
        let body = response.text().unwrap_or_default();
        Err(SyncError::fetch(
            context,
            FetchErrorKind::Status {
                status: status.as_u16(),
                body,
            },
        ))
    }
}

fn decode<T: DeserializeOwned>(response: Response, path: &str) -> Result<T> {
    let body = response
        .text()
        .map_err(|e| network_error(&format!("reading response of {path}"), &e))?;
    serde_json::from_str(&body).map_err(|e| {
        SyncError::parse(
            format!("response of {path}"),
            ParseErrorKind::InvalidJson(e.to_string()),
        )
    })
}

/// Transport failures and server-side errors are retried; client errors are not.
fn is_retryable(err: &SyncError) -> bool {
    match err {
        SyncError::Fetch { source, .. } => match source {
            FetchErrorKind::Network(_) => true,
            FetchErrorKind::Status { status, .. } => *status >= 500,
            _ => false,
        },
        _ => false,
    }
}
