//! JSON report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{DiffResult, DiffSummary, Report, SideInfo};
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Whether to only include summary
    summary_only: bool,
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            summary_only: false,
            pretty: true,
        }
    }

    /// Create a summary-only reporter
    #[must_use]
    pub const fn summary_only() -> Self {
        Self {
            summary_only: true,
            pretty: true,
        }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, result: &DiffResult, config: &ReportConfig) -> Result<String, ReportError> {
        let report = JsonDiffReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: env!("CARGO_PKG_NAME").to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
                generated_at: Utc::now().to_rfc3339(),
                title: config.title.as_deref(),
                left: SourceInfo {
                    source: config.metadata.left_source.as_deref(),
                    side: &result.left,
                },
                right: SourceInfo {
                    source: config.metadata.right_source.as_deref(),
                    side: &result.right,
                },
            },
            identical: result.is_identical(),
            summary: &result.summary,
            datasources: if self.summary_only {
                None
            } else {
                result.datasources.as_ref()
            },
            dashboards: if self.summary_only {
                None
            } else {
                result.dashboards.as_ref()
            },
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        }
        .map_err(|e| ReportError::SerializationError(e.to_string()))?;

        Ok(json)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// JSON report structures

#[derive(Serialize)]
struct JsonDiffReport<'a> {
    metadata: JsonReportMetadata<'a>,
    identical: bool,
    summary: &'a DiffSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    datasources: Option<&'a Report>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dashboards: Option<&'a Report>,
}

#[derive(Serialize)]
struct JsonReportMetadata<'a> {
    tool: ToolInfo,
    generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    left: SourceInfo<'a>,
    right: SourceInfo<'a>,
}

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    version: String,
}

#[derive(Serialize)]
struct SourceInfo<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
    #[serde(flatten)]
    side: &'a SideInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffEngine;
    use crate::model::{ConfigSnapshot, DataSourceRecord};

    fn jaeger_result() -> DiffResult {
        let left = ConfigSnapshot::new("prod")
            .with_datasources(vec![DataSourceRecord::new("Jaeger", "jaeger")]);
        let right = ConfigSnapshot::new("staging")
            .with_datasources(vec![DataSourceRecord::new("Jaeger", "tempo")]);
        DiffEngine::new().diff(&left, &right)
    }

    #[test]
    fn test_json_report_shape() {
        let config = ReportConfig::default().with_sources("prod", "staging.json");
        let output = JsonReporter::new()
            .generate(&jaeger_result(), &config)
            .expect("renders");
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");

        assert_eq!(value["metadata"]["tool"]["name"], "grafana-dashboard-sync");
        assert_eq!(value["metadata"]["left"]["server"], "prod");
        assert_eq!(value["metadata"]["right"]["source"], "staging.json");
        assert_eq!(value["identical"], false);
        assert_eq!(value["summary"]["total_changes"], 1);

        let records = value["datasources"]["records"]
            .as_array()
            .expect("records array");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["kind"], "data_source_type");
        assert_eq!(records[0]["left"], "jaeger");
        assert_eq!(records[0]["right"], "tempo");
    }

    #[test]
    fn test_summary_only_omits_sections() {
        let output = JsonReporter::summary_only()
            .pretty(false)
            .generate(&jaeger_result(), &ReportConfig::default())
            .expect("renders");
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");

        assert!(value.get("datasources").is_none());
        assert!(value.get("dashboards").is_none());
        assert!(!output.contains('\n'));
    }

    #[test]
    fn test_record_shape_snapshot() {
        let result = jaeger_result();
        let report = result.datasources.as_ref().expect("datasources compared");
        insta::assert_json_snapshot!(report.records, @r###"
        [
          {
            "kind": "data_source_type",
            "scope": [
              {
                "scope": "data_source",
                "name": "Jaeger"
              }
            ],
            "label": "type mismatch",
            "left": "jaeger",
            "right": "tempo"
          }
        ]
        "###);
    }
}
