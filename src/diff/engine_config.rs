//! Configuration types for the diff engine.

use super::correspond::normalize_key;
use super::record::DEFAULT_DISPLAY_WIDTH;
use crate::model::{DashboardDocument, DataSourceRef};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What to do after two dashboards disagree on their number of variables.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum VariableCountPolicy {
    /// Report the count mismatch, then compare variables by name anyway
    #[default]
    Graceful,
    /// Report only the count mismatch
    SummaryOnly,
}

/// How `datasource` references of panels and targets are compared.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum DataSourceRefMode {
    /// Never compare references
    #[default]
    Off,
    /// Compare names, or plugin types of object references
    TypeOnly,
    /// Compare names, or plugin types and uids of object references
    Strict,
}

impl DataSourceRefMode {
    /// Whether references are compared at all
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::Off)
    }

    /// Equality of two optional references under this mode.
    ///
    /// Always true when the mode is [`Off`](Self::Off).
    #[must_use]
    pub fn refs_equal(self, one: Option<&DataSourceRef>, two: Option<&DataSourceRef>) -> bool {
        match self {
            Self::Off => true,
            Self::TypeOnly | Self::Strict => match (one, two) {
                (None, None) => true,
                (Some(a), Some(b)) => self.ref_equal(a, b),
                _ => false,
            },
        }
    }

    fn ref_equal(self, one: &DataSourceRef, two: &DataSourceRef) -> bool {
        match (one, two) {
            (DataSourceRef::Named(a), DataSourceRef::Named(b)) => a == b,
            (
                DataSourceRef::Typed { kind: k1, uid: u1 },
                DataSourceRef::Typed { kind: k2, uid: u2 },
            ) => k1 == k2 && (self != Self::Strict || u1 == u2),
            _ => false,
        }
    }

    /// Display rendering of an optional reference; absent renders as "".
    #[must_use]
    pub fn render(datasource: Option<&DataSourceRef>) -> String {
        datasource.map(ToString::to_string).unwrap_or_default()
    }
}

/// Identity used to pair dashboards across the two sides.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum DashboardKey {
    /// Trimmed dashboard title
    #[default]
    Title,
    /// Dashboard uid
    Uid,
}

impl DashboardKey {
    /// Correspondence key of one dashboard
    #[must_use]
    pub fn of(self, doc: &DashboardDocument) -> String {
        match self {
            Self::Title => normalize_key(&doc.title),
            Self::Uid => normalize_key(&doc.uid),
        }
    }
}

/// Collections compared by [`DiffEngine::diff`](super::DiffEngine::diff)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ReportType {
    /// Dashboards and data sources
    #[default]
    All,
    Dashboards,
    #[value(name = "datasources")]
    #[serde(rename = "datasources")]
    DataSources,
}

impl ReportType {
    #[must_use]
    pub const fn includes_dashboards(self) -> bool {
        matches!(self, Self::All | Self::Dashboards)
    }

    #[must_use]
    pub const fn includes_datasources(self) -> bool {
        matches!(self, Self::All | Self::DataSources)
    }
}

/// Settings shared by all comparators of one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffEngineConfig {
    pub variable_policy: VariableCountPolicy,
    pub datasource_refs: DataSourceRefMode,
    pub dashboard_key: DashboardKey,
    /// Characters kept from long values in records
    pub display_width: usize,
}

impl Default for DiffEngineConfig {
    fn default() -> Self {
        Self {
            variable_policy: VariableCountPolicy::default(),
            datasource_refs: DataSourceRefMode::default(),
            dashboard_key: DashboardKey::default(),
            display_width: DEFAULT_DISPLAY_WIDTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> DataSourceRef {
        DataSourceRef::Named(name.to_string())
    }

    #[test]
    fn test_off_never_differs() {
        let mode = DataSourceRefMode::Off;
        assert!(mode.refs_equal(Some(&named("a")), None));
        assert!(!mode.is_enabled());
    }

    #[test]
    fn test_type_only_ignores_uid() {
        let mode = DataSourceRefMode::TypeOnly;
        let a = DataSourceRef::typed("prometheus", "abc");
        let b = DataSourceRef::typed("prometheus", "xyz");
        assert!(mode.refs_equal(Some(&a), Some(&b)));
        assert!(!mode.refs_equal(Some(&a), Some(&named("prometheus"))));
        assert!(mode.refs_equal(None, None));
        assert!(!mode.refs_equal(Some(&a), None));
    }

    #[test]
    fn test_strict_compares_uid() {
        let mode = DataSourceRefMode::Strict;
        let a = DataSourceRef::typed("prometheus", "abc");
        let b = DataSourceRef::typed("prometheus", "xyz");
        assert!(!mode.refs_equal(Some(&a), Some(&b)));
        assert!(mode.refs_equal(Some(&a), Some(&a.clone())));
        assert!(mode.refs_equal(Some(&named("Prom")), Some(&named("Prom"))));
    }

    #[test]
    fn test_render() {
        assert_eq!(DataSourceRefMode::render(None), "");
        assert_eq!(DataSourceRefMode::render(Some(&named("Prom"))), "Prom");
    }

    #[test]
    fn test_policy_serialization() {
        assert_eq!(
            serde_json::to_string(&VariableCountPolicy::SummaryOnly).expect("serialize"),
            "\"summary-only\""
        );
        let mode: DataSourceRefMode = serde_json::from_str("\"type-only\"").expect("parse");
        assert_eq!(mode, DataSourceRefMode::TypeOnly);
    }
}
