//! Comparison of two dashboards paired by the set comparator.

use super::{PanelChangeComputer, VariableChangeComputer};
use crate::diff::traits::{ChangeComputer, ChangeSet};
use crate::model::DashboardDocument;

/// Runs the variable comparator, then the panel comparator over the
/// flattened panel trees of both dashboards.
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardChangeComputer {
    variables: VariableChangeComputer,
    panels: PanelChangeComputer,
}

impl DashboardChangeComputer {
    #[must_use]
    pub const fn new(variables: VariableChangeComputer, panels: PanelChangeComputer) -> Self {
        Self { variables, panels }
    }

    /// Compare two dashboards. Records are not yet prefixed with the
    /// dashboard scope.
    #[must_use]
    pub fn compare_pair(&self, left: &DashboardDocument, right: &DashboardDocument) -> ChangeSet {
        let mut result = self.variables.compute(&left.variables, &right.variables);
        result.extend(
            self.panels
                .compute(&left.flattened_panels(), &right.flattened_panels()),
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffKind;
    use crate::model::{Panel, Target, Variable};

    #[test]
    fn test_variables_before_panels() {
        let left = DashboardDocument::new("App", "app")
            .with_variables(vec![Variable::new("cluster", "label_values(cluster)", "")])
            .with_panels(vec![
                Panel::new("CPU").with_targets(vec![Target::new("A", "rate(cpu[5m])")])
            ]);
        let right = DashboardDocument::new("App", "app")
            .with_variables(vec![Variable::new("cluster", "label_values(up, cluster)", "")])
            .with_panels(vec![
                Panel::new("CPU").with_targets(vec![Target::new("A", "rate(cpu[1m])")])
            ]);

        let result = DashboardChangeComputer::default().compare_pair(&left, &right);
        let kinds: Vec<_> = result.records.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![DiffKind::VariableDefinition, DiffKind::TargetExpr]
        );
    }

    #[test]
    fn test_identical_dashboards() {
        let doc = DashboardDocument::new("App", "app").with_panels(vec![Panel::new("row")
            .with_children(vec![Panel::new("CPU"), Panel::new("Memory")])]);
        assert!(DashboardChangeComputer::default()
            .compare_pair(&doc, &doc.clone())
            .is_empty());
    }
}
