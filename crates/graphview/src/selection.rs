use itertools::Itertools;

use crate::view::GraphView;

/// Snapshot of one view's selection, reduced to base ids.
///
/// Ids are kept sorted ascending, so two snapshots describe the same
/// selection exactly when their sequences are equal, regardless of the
/// order the lasso discovered the nodes in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionSet(Vec<u64>);

impl SelectionSet {
    pub fn from_view(view: &GraphView) -> Self {
        Self(
            view.nodes
                .iter()
                .filter(|n| n.selected)
                .map(|n| n.base_id)
                .sorted_unstable()
                .collect(),
        )
    }

    pub fn from_ids(ids: impl IntoIterator<Item = u64>) -> Self {
        Self(ids.into_iter().sorted_unstable().collect())
    }

    pub fn ids(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn differs(&self, other: &SelectionSet) -> bool {
        self.0 != other.0
    }
}

/// Remembers the last observed selection per view and reports only real
/// changes, so a pointer drag that re-evaluates intersections every frame
/// does not cause redundant backend round-trips.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    last: SelectionSet,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the selection and return it only when it differs from the
    /// previously observed one. This comparison, and only this comparison,
    /// gates whether a synchronization fires.
    pub fn observe(&mut self, view: &GraphView) -> Option<SelectionSet> {
        let current = SelectionSet::from_view(view);
        if current.differs(&self.last) {
            self.last = current.clone();
            Some(current)
        } else {
            None
        }
    }

    pub fn last(&self) -> &SelectionSet {
        &self.last
    }
}
