//! Diff records: the unit of output of every comparator.

use serde::{Deserialize, Serialize};

/// Marker appended to values cut down for display.
pub const ELLIPSIS: &str = "...";

/// Default number of characters kept from a compared value.
pub const DEFAULT_DISPLAY_WIDTH: usize = 55;

/// The comparison rule that produced a [`DiffRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
    /// Panels carry a different number of targets
    TargetCount,
    /// Position-aligned targets have different reference ids
    TargetRefId,
    /// Position-aligned targets have different query expressions
    TargetExpr,
    /// Position-aligned targets point at different data sources
    TargetDataSource,
    /// Reference ids beyond the common prefix of the two target lists
    TargetTail,
    /// Dashboards carry a different number of variables
    VariableCount,
    VariableDefinition,
    VariableRegex,
    /// Variable names present on only one side
    VariableUnique,
    /// A panel moved within the flattened panel sequence
    PanelIndex,
    PanelDataSource,
    /// Panel titles present on only one side
    PanelUnique,
    /// Same-named data sources with different plugin types
    DataSourceType,
}

impl DiffKind {
    /// Short human-readable name of the rule
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TargetCount => "target count",
            Self::TargetRefId => "target refId",
            Self::TargetExpr => "target expression",
            Self::TargetDataSource => "target data source",
            Self::TargetTail => "unique refIds",
            Self::VariableCount => "variable count",
            Self::VariableDefinition => "variable definition",
            Self::VariableRegex => "variable regex",
            Self::VariableUnique => "unique variables",
            Self::PanelIndex => "panel index",
            Self::PanelDataSource => "panel data source",
            Self::PanelUnique => "unique panels",
            Self::DataSourceType => "data source type",
        }
    }
}

/// One level of context a record was found in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", content = "name", rename_all = "snake_case")]
pub enum Scope {
    Dashboard(String),
    Panel(String),
    Variable(String),
    DataSource(String),
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard(name) => write!(f, "Dashboard: {name}"),
            Self::Panel(name) => write!(f, "Panel: {name}"),
            Self::Variable(name) => write!(f, "Variable: {name}"),
            Self::DataSource(name) => write!(f, "Data source: {name}"),
        }
    }
}

/// One reported discrepancy between the two sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRecord {
    pub kind: DiffKind,
    /// Enclosing entities, outermost first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scope: Vec<Scope>,
    /// Which field differs
    pub label: String,
    /// Rendering of the left-hand value
    pub left: String,
    /// Rendering of the right-hand value
    pub right: String,
}

impl DiffRecord {
    /// Create a record with verbatim renderings.
    pub fn new(
        kind: DiffKind,
        label: impl Into<String>,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            scope: Vec::new(),
            label: label.into(),
            left: left.into(),
            right: right.into(),
        }
    }

    /// Create a record whose renderings are truncated to `width` characters.
    pub fn truncated(
        kind: DiffKind,
        label: impl Into<String>,
        left: &str,
        right: &str,
        width: usize,
    ) -> Self {
        Self::new(
            kind,
            label,
            truncate_for_display(left, width),
            truncate_for_display(right, width),
        )
    }

    /// Prefix the record with an enclosing scope.
    #[must_use]
    pub fn within(mut self, scope: Scope) -> Self {
        self.scope.insert(0, scope);
        self
    }

    /// Scope and label, one line per level.
    #[must_use]
    pub fn title(&self) -> String {
        self.scope
            .iter()
            .map(ToString::to_string)
            .chain(std::iter::once(self.label.clone()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether any scope level is a panel with the given title
    #[must_use]
    pub fn is_in_panel(&self, title: &str) -> bool {
        self.scope
            .iter()
            .any(|s| matches!(s, Scope::Panel(name) if name == title))
    }
}

/// Which side of the comparison something belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// A degraded-input notice returned alongside diff records.
///
/// Diagnostics never count as differences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub side: Side,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scope: Vec<Scope>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(side: Side, message: impl Into<String>) -> Self {
        Self {
            side,
            scope: Vec::new(),
            message: message.into(),
        }
    }

    /// Diagnostic for a key that collapsed under last-write-wins.
    pub fn duplicate_key(side: Side, what: &str, key: &str) -> Self {
        Self::new(
            side,
            format!("duplicate {what} '{key}': only the last occurrence is compared"),
        )
    }

    #[must_use]
    pub fn within(mut self, scope: Scope) -> Self {
        self.scope.insert(0, scope);
        self
    }
}

/// Cut `value` down to `width` characters, marking the cut with [`ELLIPSIS`].
#[must_use]
pub fn truncate_for_display(value: &str, width: usize) -> String {
    match value.char_indices().nth(width) {
        Some((end, _)) => format!("{}{ELLIPSIS}", &value[..end]),
        None => value.to_string(),
    }
}
