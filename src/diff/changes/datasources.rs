//! Data source change computer implementation.

use crate::diff::{DiffKind, DiffRecord, Scope};
use crate::model::DataSourceRecord;

/// Compares data sources of the same name by plugin type.
///
/// Pairing by name and reporting names unique to either side is left to the
/// set comparator.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataSourceChangeComputer;

impl DataSourceChangeComputer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Compare two same-named data sources.
    #[must_use]
    pub fn compare_pair(
        &self,
        name: &str,
        left: &DataSourceRecord,
        right: &DataSourceRecord,
    ) -> Option<DiffRecord> {
        (left.kind != right.kind).then(|| {
            DiffRecord::new(
                DiffKind::DataSourceType,
                "type mismatch",
                left.kind.as_str(),
                right.kind.as_str(),
            )
            .within(Scope::DataSource(name.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch() {
        let record = DataSourceChangeComputer::new()
            .compare_pair(
                "Jaeger",
                &DataSourceRecord::new("Jaeger", "jaeger"),
                &DataSourceRecord::new("Jaeger", "tempo"),
            )
            .expect("types differ");

        assert_eq!(record.kind, DiffKind::DataSourceType);
        assert_eq!(record.scope, vec![Scope::DataSource("Jaeger".into())]);
        assert_eq!(record.left, "jaeger");
        assert_eq!(record.right, "tempo");
    }

    #[test]
    fn test_uid_differences_are_ignored() {
        let record = DataSourceChangeComputer::new().compare_pair(
            "Prometheus",
            &DataSourceRecord::new("Prometheus", "prometheus").with_uid("a"),
            &DataSourceRecord::new("Prometheus", "prometheus").with_uid("b"),
        );
        assert!(record.is_none());
    }
}
