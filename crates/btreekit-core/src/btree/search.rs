use std::fmt;

use crate::compare::Comparator;

use super::node::Node;

/// Where a matching key lives: a node and the key's slot inside it.
pub struct Location<'a, K> {
    node: &'a Node<K>,
    index: usize,
}

impl<'a, K> Location<'a, K> {
    pub fn key(&self) -> &'a K {
        &self.node.keys[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn keys(&self) -> &'a [K] {
        &self.node.keys
    }

    pub fn is_leaf(&self) -> bool {
        self.node.is_leaf()
    }
}

impl<K: fmt::Debug> fmt::Debug for Location<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Location")
            .field("key", self.key())
            .field("index", &self.index)
            .field("leaf", &self.is_leaf())
            .finish()
    }
}

/// Stops at the first equal key met on the way down; not necessarily the leftmost.
pub(crate) fn descend<'a, K, C: Comparator<K>>(
    root: &'a Node<K>,
    key: &K,
    cmp: &C,
) -> Option<Location<'a, K>> {
    let mut node = root;
    loop {
        let index = node.find_index(key, cmp);
        if node.holds_at(index, key, cmp) {
            return Some(Location { node, index });
        }
        if node.is_leaf() {
            return None;
        }
        node = &*node.children[index];
    }
}
