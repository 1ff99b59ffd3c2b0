//! Trait definitions for diff computation strategies.
//!
//! Each comparator turns two ordered sequences of one entity type into a
//! [`ChangeSet`], which keeps them composable and testable in isolation.

use super::{Diagnostic, DiffRecord, Scope};

/// Trait for comparing two ordered sequences of `Item`.
pub trait ChangeComputer<Item> {
    /// Compare `one` (left) against `two` (right).
    fn compute(&self, one: &[Item], two: &[Item]) -> ChangeSet;

    /// Get the name of this change computer for logging/debugging.
    fn name(&self) -> &str;
}

/// Records and diagnostics produced by one comparator run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub records: Vec<DiffRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ChangeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn push(&mut self, record: DiffRecord) {
        self.records.push(record);
    }

    /// Append another change set, prefixing its contents with `scope`.
    pub fn extend_within(&mut self, other: Self, scope: &Scope) {
        self.records
            .extend(other.records.into_iter().map(|r| r.within(scope.clone())));
        self.diagnostics
            .extend(other.diagnostics.into_iter().map(|d| d.within(scope.clone())));
    }

    /// Append another change set unchanged.
    pub fn extend(&mut self, other: Self) {
        self.records.extend(other.records);
        self.diagnostics.extend(other.diagnostics);
    }
}
