//! Data source records and data source references.

use super::dashboard::null_default;
use serde::{Deserialize, Serialize};

/// A configured data source, as listed by `/api/datasources`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceRecord {
    /// Data source name, unique within one server
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    /// Plugin type tag ("prometheus", "loki", "jaeger", ...)
    #[serde(rename = "type", default, deserialize_with = "null_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_default")]
    pub uid: String,
}

impl DataSourceRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            uid: String::new(),
        }
    }

    #[must_use]
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = uid.into();
        self
    }
}

/// The `datasource` field of a panel or target.
///
/// Older dashboards store the data source name as a plain string, newer ones
/// store an object with the plugin type and the data source uid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataSourceRef {
    /// Legacy form: the data source name (or a `$variable`)
    Named(String),
    /// Object form
    Typed {
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        uid: Option<String>,
    },
}

impl DataSourceRef {
    #[must_use]
    pub fn typed(kind: impl Into<String>, uid: impl Into<String>) -> Self {
        Self::Typed {
            kind: Some(kind.into()),
            uid: Some(uid.into()),
        }
    }
}

impl std::fmt::Display for DataSourceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::Typed { kind, uid } => write!(
                f,
                "{}/{}",
                kind.as_deref().unwrap_or("-"),
                uid.as_deref().unwrap_or("-")
            ),
        }
    }
}
