//! Dashboard, panel, target and template variable structures.
//!
//! Field names follow the Grafana dashboard JSON model so documents can be
//! deserialized straight from `/api/dashboards/uid/{uid}` responses.

use super::DataSourceRef;
use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize `null` the same way as an absent field.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A fully resolved dashboard: title, uid, nested panels and template variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDashboard", into = "RawDashboard")]
pub struct DashboardDocument {
    /// Dashboard title, the identity key within a collection
    pub title: String,
    /// Opaque identifier, stable across revisions
    pub uid: String,
    /// Top-level panels in document order
    pub panels: Vec<Panel>,
    /// Template variables in document order
    pub variables: Vec<Variable>,
}

impl DashboardDocument {
    /// Create an empty dashboard
    #[must_use]
    pub fn new(title: impl Into<String>, uid: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            uid: uid.into(),
            panels: Vec::new(),
            variables: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_panels(mut self, panels: Vec<Panel>) -> Self {
        self.panels = panels;
        self
    }

    #[must_use]
    pub fn with_variables(mut self, variables: Vec<Variable>) -> Self {
        self.variables = variables;
        self
    }

    /// Panels in depth-first, parent-before-children order.
    #[must_use]
    pub fn flattened_panels(&self) -> Vec<&Panel> {
        crate::diff::flatten(&self.panels)
    }

    /// Total number of panels, nested ones included.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.panels.iter().map(Panel::subtree_size).sum()
    }
}

/// Wire shape of a dashboard model.
#[derive(Serialize, Deserialize)]
struct RawDashboard {
    #[serde(default, deserialize_with = "null_default")]
    title: String,
    #[serde(default, deserialize_with = "null_default")]
    uid: String,
    #[serde(default, deserialize_with = "null_default")]
    panels: Vec<Panel>,
    #[serde(default, deserialize_with = "null_default")]
    templating: Templating,
}

#[derive(Default, Serialize, Deserialize)]
struct Templating {
    #[serde(default, deserialize_with = "null_default")]
    list: Vec<Variable>,
}

impl From<RawDashboard> for DashboardDocument {
    fn from(raw: RawDashboard) -> Self {
        Self {
            title: raw.title,
            uid: raw.uid,
            panels: raw.panels,
            variables: raw.templating.list,
        }
    }
}

impl From<DashboardDocument> for RawDashboard {
    fn from(doc: DashboardDocument) -> Self {
        Self {
            title: doc.title,
            uid: doc.uid,
            panels: doc.panels,
            templating: Templating {
                list: doc.variables,
            },
        }
    }
}

/// Response of `/api/dashboards/uid/{uid}`; only the dashboard model is kept.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardEnvelope {
    pub dashboard: DashboardDocument,
}

/// A visual element of a dashboard. Panels with children are grouping rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Panel title, the correspondence key during comparison (not unique)
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    /// Grafana panel type ("timeseries", "gauge", "row", ...)
    #[serde(rename = "type", default, deserialize_with = "null_default")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasource: Option<DataSourceRef>,
    #[serde(
        default,
        deserialize_with = "null_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub targets: Vec<Target>,
    /// Nested panels of a row
    #[serde(
        rename = "panels",
        default,
        deserialize_with = "null_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<Panel>,
}

impl Panel {
    /// Create a leaf panel with the given title
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    #[must_use]
    pub fn with_datasource(mut self, datasource: DataSourceRef) -> Self {
        self.datasource = Some(datasource);
        self
    }

    #[must_use]
    pub fn with_targets(mut self, targets: Vec<Target>) -> Self {
        self.targets = targets;
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Panel>) -> Self {
        self.children = children;
        self
    }

    /// Whether the panel groups other panels
    #[must_use]
    pub fn is_row(&self) -> bool {
        !self.children.is_empty() || self.kind == "row"
    }

    /// Number of panels in this subtree, including `self`.
    #[must_use]
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(Self::subtree_size).sum::<usize>()
    }
}

/// One data query bound to a panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTarget", into = "RawTarget")]
pub struct Target {
    /// Short reference code ("A", "B", ...)
    pub ref_id: String,
    /// Query expression, compared as opaque text
    pub expr: String,
    pub datasource: Option<DataSourceRef>,
}

impl Target {
    #[must_use]
    pub fn new(ref_id: impl Into<String>, expr: impl Into<String>) -> Self {
        Self {
            ref_id: ref_id.into(),
            expr: expr.into(),
            datasource: None,
        }
    }

    #[must_use]
    pub fn with_datasource(mut self, datasource: DataSourceRef) -> Self {
        self.datasource = Some(datasource);
        self
    }
}

/// Wire shape of a target. Prometheus targets carry `expr`, most other
/// data sources put their query text in `query`.
#[derive(Serialize, Deserialize)]
struct RawTarget {
    #[serde(rename = "refId", default, deserialize_with = "null_default")]
    ref_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    query: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    datasource: Option<DataSourceRef>,
}

impl From<RawTarget> for Target {
    fn from(raw: RawTarget) -> Self {
        let expr = raw
            .expr
            .filter(|expr| !expr.is_empty())
            .or_else(|| {
                raw.query
                    .as_ref()
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_owned)
            })
            .unwrap_or_default();
        Self {
            ref_id: raw.ref_id,
            expr,
            datasource: raw.datasource,
        }
    }
}

impl From<Target> for RawTarget {
    fn from(target: Target) -> Self {
        Self {
            ref_id: target.ref_id,
            expr: (!target.expr.is_empty()).then_some(target.expr),
            query: None,
            datasource: target.datasource,
        }
    }
}

/// A dashboard-scoped template variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub definition: String,
    /// Value filter pattern
    #[serde(default, deserialize_with = "null_default")]
    pub regex: String,
}

impl Variable {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        definition: impl Into<String>,
        regex: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            definition: definition.into(),
            regex: regex.into(),
        }
    }
}
