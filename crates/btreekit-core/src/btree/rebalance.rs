//! Structural repairs used while descending: split on the way down for
//! inserts, borrow or merge on the way down for removals.

use tracing::trace;

use super::node::Node;

/// What a repair did to the parent it was applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixOutcome {
    /// The parent lost its last key in a merge. It must be the root, and the
    /// tree has to replace it with its single remaining child.
    RootReplaced,
    Modified,
    Unchanged,
}

/// Splits the full child at `index` around its median key.
///
/// The child keeps the lower `t - 1` keys, a new right sibling takes the
/// upper `t - 1`, and the median moves into `parent` at `index`.
pub(crate) fn split_child<K>(parent: &mut Node<K>, index: usize, min_degree: usize) {
    let child = &mut parent.children[index];
    debug_assert!(child.is_full(min_degree));

    let mut upper_keys = child.keys.split_off(min_degree - 1);
    let median = upper_keys.remove(0);
    let upper_children = if child.is_leaf() {
        Vec::new()
    } else {
        child.children.split_off(min_degree)
    };

    let sibling = Node {
        keys: upper_keys,
        children: upper_children,
    };

    parent.keys.insert(index, median);
    parent.children.insert(index + 1, Box::new(sibling));
    trace!(index, "split child");
}

/// Folds `children[index + 1]` and the key separating it from
/// `children[index]` into `children[index]`. The absorbed sibling is dropped.
pub(crate) fn merge_children<K>(parent: &mut Node<K>, index: usize) -> FixOutcome {
    let absorbed = parent.children.remove(index + 1);
    let separator = parent.keys.remove(index);

    let survivor = &mut parent.children[index];
    survivor.keys.push(separator);
    let Node { keys, children } = *absorbed;
    survivor.keys.extend(keys);
    survivor.children.extend(children);
    trace!(index, merged_len = survivor.len(), "merged children");

    if parent.keys.is_empty() {
        FixOutcome::RootReplaced
    } else {
        FixOutcome::Modified
    }
}

/// Makes sure `parent.children[index]` holds at least `t` keys so a removal
/// below it cannot underflow.
///
/// Tries, in order: borrowing from the left sibling, borrowing from the right
/// sibling, merging with the left sibling, merging with the right sibling.
pub(crate) fn fix_child_size<K>(parent: &mut Node<K>, index: usize, min_degree: usize) -> FixOutcome {
    if parent.children[index].len() >= min_degree {
        return FixOutcome::Unchanged;
    }

    if index > 0 && parent.children[index - 1].len() >= min_degree {
        rotate_from_left(parent, index);
        FixOutcome::Modified
    } else if index < parent.len() && parent.children[index + 1].len() >= min_degree {
        rotate_from_right(parent, index);
        FixOutcome::Modified
    } else if index > 0 {
        merge_children(parent, index - 1)
    } else {
        merge_children(parent, index)
    }
}

/// Moves the left sibling's last key up into `parent` and the old separator
/// down into the child, carrying the sibling's last subtree along.
///
/// The separator lands where it sorts in the child. Every child key is at
/// least its lower separator, so that slot is always the front.
fn rotate_from_left<K>(parent: &mut Node<K>, index: usize) {
    let (before, after) = parent.children.split_at_mut(index);
    let left = &mut before[index - 1];
    let child = &mut after[0];
    debug_assert!(!left.keys.is_empty(), "left sibling has no key to lend");

    let last = left.keys.len() - 1;
    let lifted = left.keys.remove(last);
    let separator = std::mem::replace(&mut parent.keys[index - 1], lifted);
    child.keys.insert(0, separator);
    if let Some(subtree) = left.children.pop() {
        child.children.insert(0, subtree);
    }
    trace!(index, "borrowed from left sibling");
}

fn rotate_from_right<K>(parent: &mut Node<K>, index: usize) {
    let (before, after) = parent.children.split_at_mut(index + 1);
    let child = &mut before[index];
    let right = &mut after[0];
    debug_assert!(!right.keys.is_empty(), "right sibling has no key to lend");

    let lifted = right.keys.remove(0);
    let separator = std::mem::replace(&mut parent.keys[index], lifted);
    child.keys.push(separator);
    if !right.is_leaf() {
        child.children.push(right.children.remove(0));
    }
    trace!(index, "borrowed from right sibling");
}
