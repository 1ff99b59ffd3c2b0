//! Variable change computer implementation.

use crate::diff::correspond::{normalize_key, Correspondence};
use crate::diff::engine_config::VariableCountPolicy;
use crate::diff::record::DEFAULT_DISPLAY_WIDTH;
use crate::diff::traits::{ChangeComputer, ChangeSet};
use crate::diff::{Diagnostic, DiffKind, DiffRecord, Scope, Side};
use crate::model::Variable;

/// Compares template variables by name.
#[derive(Debug, Clone, Copy)]
pub struct VariableChangeComputer {
    policy: VariableCountPolicy,
    display_width: usize,
}

impl VariableChangeComputer {
    #[must_use]
    pub const fn new(policy: VariableCountPolicy, display_width: usize) -> Self {
        Self {
            policy,
            display_width,
        }
    }
}

impl Default for VariableChangeComputer {
    fn default() -> Self {
        Self::new(VariableCountPolicy::default(), DEFAULT_DISPLAY_WIDTH)
    }
}

impl ChangeComputer<Variable> for VariableChangeComputer {
    fn compute(&self, one: &[Variable], two: &[Variable]) -> ChangeSet {
        let mut result = ChangeSet::new();

        if one.len() != two.len() {
            result.push(DiffRecord::new(
                DiffKind::VariableCount,
                "variables mismatch",
                one.len().to_string(),
                two.len().to_string(),
            ));
            if self.policy == VariableCountPolicy::SummaryOnly {
                return result;
            }
        }

        let corr = Correspondence::build(one, two, |v: &&Variable| normalize_key(&v.name));

        for (name, (left, right)) in &corr.common {
            let scope = Scope::Variable(name.clone());
            if left.definition != right.definition {
                result.push(
                    DiffRecord::truncated(
                        DiffKind::VariableDefinition,
                        "definition",
                        &left.definition,
                        &right.definition,
                        self.display_width,
                    )
                    .within(scope.clone()),
                );
            }
            if left.regex != right.regex {
                result.push(
                    DiffRecord::truncated(
                        DiffKind::VariableRegex,
                        "regex",
                        &left.regex,
                        &right.regex,
                        self.display_width,
                    )
                    .within(scope),
                );
            }
        }

        if !corr.keys_match() {
            result.push(DiffRecord::new(
                DiffKind::VariableUnique,
                "unique variables",
                join_names(corr.only_left.iter()),
                join_names(corr.only_right.iter()),
            ));
        }

        for name in &corr.duplicates_left {
            result
                .diagnostics
                .push(Diagnostic::duplicate_key(Side::Left, "variable", name));
        }
        for name in &corr.duplicates_right {
            result
                .diagnostics
                .push(Diagnostic::duplicate_key(Side::Right, "variable", name));
        }

        result
    }

    fn name(&self) -> &'static str {
        "VariableChangeComputer"
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a String>) -> String {
    names.map(String::as_str).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster() -> Variable {
        Variable::new("cluster", "label_values(up, cluster)", "")
    }

    fn namespace() -> Variable {
        Variable::new("namespace", "label_values(kube_pod_info, namespace)", "/^app-.*/")
    }

    #[test]
    fn test_identical_variables() {
        let computer = VariableChangeComputer::default();
        let vars = vec![cluster(), namespace()];
        assert!(computer.compute(&vars, &vars.clone()).is_empty());
    }

    #[test]
    fn test_definition_and_regex_are_independent() {
        let computer = VariableChangeComputer::default();
        let changed = Variable::new("namespace", "label_values(namespace)", "/.*/");
        let result = computer.compute(&[namespace()], &[changed]);

        let kinds: Vec<_> = result.records.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![DiffKind::VariableDefinition, DiffKind::VariableRegex]
        );
        assert_eq!(
            result.records[0].scope,
            vec![Scope::Variable("namespace".into())]
        );
        assert_eq!(result.records[1].left, "/^app-.*/");
    }

    #[test]
    fn test_graceful_policy_continues_after_count_mismatch() {
        let computer = VariableChangeComputer::default();
        let changed = Variable::new("cluster", "label_values(node_uname_info, cluster)", "");
        let result = computer.compute(&[cluster(), namespace()], &[changed]);

        let kinds: Vec<_> = result.records.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DiffKind::VariableCount,
                DiffKind::VariableDefinition,
                DiffKind::VariableUnique
            ]
        );
        assert_eq!(result.records[2].left, "namespace");
        assert_eq!(result.records[2].right, "");
    }

    #[test]
    fn test_summary_only_policy_stops_after_count_mismatch() {
        let computer =
            VariableChangeComputer::new(VariableCountPolicy::SummaryOnly, DEFAULT_DISPLAY_WIDTH);
        let result = computer.compute(&[cluster(), namespace()], &[cluster()]);

        assert_eq!(result.len(), 1);
        assert_eq!(result.records[0].kind, DiffKind::VariableCount);
        assert_eq!(result.records[0].left, "2");
        assert_eq!(result.records[0].right, "1");
    }

    #[test]
    fn test_same_count_different_names() {
        let computer = VariableChangeComputer::default();
        let other = Variable::new("job", "label_values(job)", "");
        let result = computer.compute(&[cluster(), namespace()], &[cluster(), other]);

        assert_eq!(result.len(), 1);
        assert_eq!(result.records[0].kind, DiffKind::VariableUnique);
        assert_eq!(result.records[0].left, "namespace");
        assert_eq!(result.records[0].right, "job");
    }

    #[test]
    fn test_duplicate_names_produce_diagnostics() {
        let computer = VariableChangeComputer::default();
        let result = computer.compute(&[cluster(), cluster()], &[cluster(), cluster()]);

        // counts agree and the surviving entries are equal
        assert!(result.is_empty());
        assert_eq!(result.diagnostics.len(), 2);
        assert_eq!(result.diagnostics[0].side, Side::Left);
        assert!(result.diagnostics[0].message.contains("cluster"));
    }
}
