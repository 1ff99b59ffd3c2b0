//! Panel change computer implementation.

use super::TargetChangeComputer;
use crate::diff::correspond::{normalize_key, Correspondence};
use crate::diff::engine_config::DataSourceRefMode;
use crate::diff::traits::{ChangeComputer, ChangeSet};
use crate::diff::{Diagnostic, DiffKind, DiffRecord, Scope, Side};
use crate::model::Panel;

/// Compares two flattened panel sequences, pairing panels by title.
///
/// Each panel remembers its position in the flattened sequence so moves can
/// be reported; the targets of paired panels are compared by
/// [`TargetChangeComputer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelChangeComputer {
    targets: TargetChangeComputer,
    datasource_refs: DataSourceRefMode,
}

impl PanelChangeComputer {
    #[must_use]
    pub const fn new(targets: TargetChangeComputer, datasource_refs: DataSourceRefMode) -> Self {
        Self {
            targets,
            datasource_refs,
        }
    }
}

impl<'a> ChangeComputer<&'a Panel> for PanelChangeComputer {
    fn compute(&self, one: &[&'a Panel], two: &[&'a Panel]) -> ChangeSet {
        let mut result = ChangeSet::new();

        let corr = Correspondence::build(
            one.iter().copied().enumerate(),
            two.iter().copied().enumerate(),
            |entry: &(usize, &'a Panel)| normalize_key(&entry.1.title),
        );

        for (title, ((left_idx, left), (right_idx, right))) in &corr.common {
            let scope = Scope::Panel(title.clone());

            if left_idx != right_idx {
                result.push(
                    DiffRecord::new(
                        DiffKind::PanelIndex,
                        "index mismatch",
                        left_idx.to_string(),
                        right_idx.to_string(),
                    )
                    .within(scope.clone()),
                );
            }

            if !self
                .datasource_refs
                .refs_equal(left.datasource.as_ref(), right.datasource.as_ref())
            {
                result.push(
                    DiffRecord::new(
                        DiffKind::PanelDataSource,
                        "datasource",
                        DataSourceRefMode::render(left.datasource.as_ref()),
                        DataSourceRefMode::render(right.datasource.as_ref()),
                    )
                    .within(scope.clone()),
                );
            }

            let targets = self.targets.compute(&left.targets, &right.targets);
            result.extend_within(targets, &scope);
        }

        if !corr.keys_match() {
            result.push(DiffRecord::new(
                DiffKind::PanelUnique,
                "unique panels",
                join_titles(corr.only_left.iter()),
                join_titles(corr.only_right.iter()),
            ));
        }

        for title in &corr.duplicates_left {
            result
                .diagnostics
                .push(Diagnostic::duplicate_key(Side::Left, "panel title", title));
        }
        for title in &corr.duplicates_right {
            result
                .diagnostics
                .push(Diagnostic::duplicate_key(Side::Right, "panel title", title));
        }

        result
    }

    fn name(&self) -> &'static str {
        "PanelChangeComputer"
    }
}

fn join_titles<'a>(titles: impl Iterator<Item = &'a String>) -> String {
    titles.map(String::as_str).collect::<Vec<_>>().join("\n")
}
