//! Disjoint-set (union-find) bookkeeping used during graph generation.
//!
//! The generator uses this structure twice: at node granularity to repair
//! disconnected clusters, and at cluster granularity to track which clusters
//! inter-cluster edges have already joined.
//!
//! Each slot holds either a parent id or, for a root, a negative counter. The
//! counter starts at `-1` and only decreases when two roots of equal counter
//! are merged, so it behaves as a (negated) rank. `find` never compresses
//! paths; call volume is bounded by the edge count of the graph being built.

/// Union-find over the element ids `0..len`.
///
/// # Examples
/// ```
/// use clusterwalk_core::DisjointSet;
///
/// let mut sets = DisjointSet::new(4);
/// let root = sets.union(0, 1);
/// assert_eq!(sets.find(1), root);
/// assert_eq!(sets.component_count(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisjointSet {
    slots: Vec<isize>,
}

impl DisjointSet {
    /// Creates `len` singleton sets.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![-1; len],
        }
    }

    /// Returns the number of elements tracked by the structure.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` when no elements are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the representative of `element`.
    ///
    /// Callers must pass an id below [`Self::len`].
    #[must_use]
    pub fn find(&self, element: usize) -> usize {
        let mut current = element;
        while let Ok(parent) = usize::try_from(self.slots[current]) {
            current = parent;
        }
        current
    }

    /// Merges the sets containing `left` and `right` and returns the root that
    /// absorbed the other.
    ///
    /// The root with the more negative counter wins. On a tie the root of
    /// `left` absorbs the root of `right` and its counter is decremented.
    pub fn union(&mut self, left: usize, right: usize) -> usize {
        let left_root = self.find(left);
        let right_root = self.find(right);
        if left_root == right_root {
            return left_root;
        }

        let left_counter = self.slots[left_root];
        let right_counter = self.slots[right_root];
        if right_counter < left_counter {
            self.slots[left_root] = as_parent(right_root);
            right_root
        } else if left_counter < right_counter {
            self.slots[right_root] = as_parent(left_root);
            left_root
        } else {
            self.slots[right_root] = as_parent(left_root);
            self.slots[left_root] -= 1;
            left_root
        }
    }

    /// Returns `true` when both elements share a representative.
    #[must_use]
    pub fn same_set(&self, left: usize, right: usize) -> bool {
        self.find(left) == self.find(right)
    }

    /// Iterates over every root in ascending id order.
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| (*slot < 0).then_some(id))
    }

    /// Returns the number of disjoint sets.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.roots().count()
    }
}

fn as_parent(root: usize) -> isize {
    // Element ids index a `Vec`, so they always fit an `isize`.
    isize::try_from(root).unwrap_or(isize::MAX)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::DisjointSet;
    use crate::test_utils::suite_proptest_config;

    #[test]
    fn starts_with_singletons() {
        let sets = DisjointSet::new(5);
        assert_eq!(sets.component_count(), 5);
        assert_eq!(sets.roots().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
        for id in 0..5 {
            assert_eq!(sets.find(id), id);
        }
    }

    #[test]
    fn tie_keeps_left_root_and_deepens_it() {
        let mut sets = DisjointSet::new(4);
        assert_eq!(sets.union(0, 1), 0);
        assert_eq!(sets.union(2, 3), 2);
        // Both roots now carry -2, so the left root absorbs the right one.
        assert_eq!(sets.union(3, 1), 2);
        assert_eq!(sets.component_count(), 1);
        assert_eq!(sets.roots().collect::<Vec<_>>(), vec![2]);
    }

    #[rstest]
    #[case(0, 2)]
    #[case(2, 0)]
    fn deeper_tree_absorbs_shallower(#[case] left: usize, #[case] right: usize) {
        let mut sets = DisjointSet::new(3);
        let deep = sets.union(0, 1);
        let merged = sets.union(left, right);
        assert_eq!(merged, deep);
        assert_eq!(sets.find(2), deep);
    }

    #[test]
    fn union_of_same_set_is_a_no_op() {
        let mut sets = DisjointSet::new(3);
        let root = sets.union(0, 1);
        let before = sets.clone();
        assert_eq!(sets.union(1, 0), root);
        assert_eq!(sets, before);
    }

    #[test]
    fn find_follows_multiple_hops() {
        let mut sets = DisjointSet::new(6);
        sets.union(0, 1);
        sets.union(2, 3);
        sets.union(0, 2);
        sets.union(4, 5);
        let root = sets.union(0, 4);
        for id in 0..6 {
            assert_eq!(sets.find(id), root);
        }
    }

    proptest! {
        #![proptest_config(suite_proptest_config(256))]

        #[test]
        fn find_is_idempotent_and_unions_stick(
            len in 1_usize..48,
            pairs in proptest::collection::vec((0_usize..48, 0_usize..48), 0..96),
        ) {
            let mut sets = DisjointSet::new(len);
            let pairs: Vec<(usize, usize)> = pairs
                .into_iter()
                .map(|(left, right)| (left % len, right % len))
                .collect();
            for &(left, right) in &pairs {
                let root = sets.union(left, right);
                prop_assert_eq!(sets.find(left), root);
            }
            for id in 0..len {
                let root = sets.find(id);
                prop_assert_eq!(sets.find(root), root);
            }
            for &(left, right) in &pairs {
                prop_assert!(sets.same_set(left, right));
            }
            prop_assert!(sets.component_count() >= 1);
        }
    }
}
