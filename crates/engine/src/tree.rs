//! Helpers over the parent pointers of the category forest.
//!
//! Storage keeps only `parent_id`; everything here is derived from
//! `(id, parent_id)` pairs and never written back.

use std::{
    cmp::Ordering,
    collections::{HashMap, HashSet, VecDeque},
};

use crate::Category;

/// Parent id → child ids, built from `(id, parent_id)` pairs.
#[derive(Debug, Default)]
pub(crate) struct ParentIndex {
    children: HashMap<i64, Vec<i64>>,
}

impl ParentIndex {
    pub(crate) fn from_pairs(pairs: impl IntoIterator<Item = (i64, Option<i64>)>) -> Self {
        let mut children: HashMap<i64, Vec<i64>> = HashMap::new();
        for (id, parent_id) in pairs {
            if let Some(parent_id) = parent_id {
                children.entry(parent_id).or_default().push(id);
            }
        }
        for ids in children.values_mut() {
            ids.sort_unstable();
            ids.dedup();
        }
        Self { children }
    }

    /// Direct children of `parent_id`, ascending. Empty for unknown ids.
    pub(crate) fn children(&self, parent_id: i64) -> &[i64] {
        self.children
            .get(&parent_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// `root` and all of its descendants, deepest level first and `root` last.
    ///
    /// Every id appears once, so the walk ends even when parent pointers loop
    /// back onto an ancestor.
    pub(crate) fn subtree(&self, root: i64) -> Vec<i64> {
        let mut seen = HashSet::from([root]);
        let mut order = vec![root];
        let mut queue = VecDeque::from([root]);

        while let Some(id) = queue.pop_front() {
            for &child in self.children(id) {
                if seen.insert(child) {
                    order.push(child);
                    queue.push_back(child);
                }
            }
        }

        order.reverse();
        order
    }
}

/// Hierarchy order: categories without parent first, then grouped by parent
/// id ascending; names ascending inside each group.
///
/// This is a flat ordering, children are not nested under their parent.
pub(crate) fn hierarchy_cmp(a: &Category, b: &Category) -> Ordering {
    let parent_key = |c: &Category| c.parent_id.map_or((0, 0), |id| (1, id));
    parent_key(a)
        .cmp(&parent_key(b))
        .then_with(|| a.name.cmp(&b.name))
}
