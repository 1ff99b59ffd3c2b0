//! Target change computer implementation.

use crate::diff::engine_config::DataSourceRefMode;
use crate::diff::record::DEFAULT_DISPLAY_WIDTH;
use crate::diff::traits::{ChangeComputer, ChangeSet};
use crate::diff::{DiffKind, DiffRecord};
use crate::model::Target;

/// Compares the targets of two corresponding panels.
///
/// Targets are aligned by position, not by reference id: authoring tools
/// assign ids in order, so the n-th query on one side is compared with the
/// n-th query on the other.
#[derive(Debug, Clone, Copy)]
pub struct TargetChangeComputer {
    display_width: usize,
    datasource_refs: DataSourceRefMode,
}

impl TargetChangeComputer {
    #[must_use]
    pub const fn new(display_width: usize, datasource_refs: DataSourceRefMode) -> Self {
        Self {
            display_width,
            datasource_refs,
        }
    }
}

impl Default for TargetChangeComputer {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_WIDTH, DataSourceRefMode::Off)
    }
}

impl ChangeComputer<Target> for TargetChangeComputer {
    fn compute(&self, one: &[Target], two: &[Target]) -> ChangeSet {
        let mut result = ChangeSet::new();

        if one.len() != two.len() {
            result.push(DiffRecord::new(
                DiffKind::TargetCount,
                "targets mismatch",
                one.len().to_string(),
                two.len().to_string(),
            ));
        }

        let common = one.len().min(two.len());
        for (idx, (left, right)) in one.iter().zip(two).enumerate() {
            if left.ref_id != right.ref_id {
                result.push(DiffRecord::new(
                    DiffKind::TargetRefId,
                    format!("refId (target #{idx})"),
                    left.ref_id.as_str(),
                    right.ref_id.as_str(),
                ));
            }
            if left.expr != right.expr {
                result.push(DiffRecord::truncated(
                    DiffKind::TargetExpr,
                    format!("expr (refId {})", left.ref_id),
                    &left.expr,
                    &right.expr,
                    self.display_width,
                ));
            }
            if !self
                .datasource_refs
                .refs_equal(left.datasource.as_ref(), right.datasource.as_ref())
            {
                result.push(DiffRecord::new(
                    DiffKind::TargetDataSource,
                    format!("datasource (refId {})", left.ref_id),
                    DataSourceRefMode::render(left.datasource.as_ref()),
                    DataSourceRefMode::render(right.datasource.as_ref()),
                ));
            }
        }

        let tail_one: Vec<&str> = one[common..].iter().map(|t| t.ref_id.as_str()).collect();
        let tail_two: Vec<&str> = two[common..].iter().map(|t| t.ref_id.as_str()).collect();
        if !tail_one.is_empty() || !tail_two.is_empty() {
            result.push(DiffRecord::new(
                DiffKind::TargetTail,
                "unique refIds",
                tail_one.join(", "),
                tail_two.join(", "),
            ));
        }

        result
    }

    fn name(&self) -> &'static str {
        "TargetChangeComputer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DataSourceRef;

    fn failed() -> Target {
        Target::new(
            "A",
            "count(kube_deployment_created) - count(kube_deployment_status_replicas_available{instance=~\"$cluster.*\"})",
        )
    }

    fn running() -> Target {
        Target::new("B", "count(kube_deployment_created)")
    }

    #[test]
    fn test_identical_lists() {
        let computer = TargetChangeComputer::default();
        let one = vec![failed(), running()];
        assert!(computer.compute(&one, &one.clone()).is_empty());
        assert_eq!(computer.name(), "TargetChangeComputer");
    }

    #[test]
    fn test_missing_target_on_right() {
        let computer = TargetChangeComputer::default();
        let result = computer.compute(&[failed(), running()], &[failed()]);

        assert_eq!(result.len(), 2);
        assert_eq!(result.records[0].kind, DiffKind::TargetCount);
        assert_eq!(result.records[0].left, "2");
        assert_eq!(result.records[0].right, "1");
        assert_eq!(result.records[1].kind, DiffKind::TargetTail);
        assert_eq!(result.records[1].left, "B");
        assert_eq!(result.records[1].right, "");
    }

    #[test]
    fn test_missing_target_on_left() {
        let computer = TargetChangeComputer::default();
        let result = computer.compute(&[failed()], &[failed(), running()]);

        assert_eq!(result.len(), 2);
        assert_eq!(result.records[1].left, "");
        assert_eq!(result.records[1].right, "B");
    }

    #[test]
    fn test_one_side_empty_lists_every_ref_id() {
        let computer = TargetChangeComputer::default();
        let result = computer.compute(&[], &[failed(), running()]);

        let kinds: Vec<_> = result.records.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![DiffKind::TargetCount, DiffKind::TargetTail]);
        assert_eq!(result.records[1].right, "A, B");
    }

    #[test]
    fn test_expr_and_ref_id_reported_independently() {
        let computer = TargetChangeComputer::default();
        let result = computer.compute(
            &[Target::new("A", "up")],
            &[Target::new("B", "down")],
        );

        let kinds: Vec<_> = result.records.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![DiffKind::TargetRefId, DiffKind::TargetExpr]);
        assert_eq!(result.records[1].label, "expr (refId A)");
    }

    #[test]
    fn test_long_expressions_are_truncated() {
        let computer = TargetChangeComputer::default();
        let result = computer.compute(&[failed()], &[Target::new("A", "up")]);

        let record = &result.records[0];
        assert_eq!(record.kind, DiffKind::TargetExpr);
        assert!(record.left.ends_with("..."));
        assert_eq!(record.left.chars().count(), 58);
        assert_eq!(record.right, "up");
    }

    #[test]
    fn test_datasource_refs_compared_only_when_enabled() {
        let one = vec![Target::new("A", "up").with_datasource(DataSourceRef::typed("prometheus", "u1"))];
        let two = vec![Target::new("A", "up").with_datasource(DataSourceRef::typed("loki", "u2"))];

        assert!(TargetChangeComputer::default().compute(&one, &two).is_empty());

        let strict = TargetChangeComputer::new(DEFAULT_DISPLAY_WIDTH, DataSourceRefMode::TypeOnly);
        let result = strict.compute(&one, &two);
        assert_eq!(result.len(), 1);
        assert_eq!(result.records[0].kind, DiffKind::TargetDataSource);
        assert_eq!(result.records[0].left, "prometheus/u1");
    }
}
