use crate::compare::Comparator;

/// A B-tree node. A node is a leaf exactly when it owns no children.
pub(crate) struct Node<K> {
    pub(super) keys: Vec<K>,
    pub(super) children: Vec<Box<Node<K>>>,
}

impl<K> Node<K> {
    pub fn new_leaf() -> Self {
        Node {
            keys: Vec::new(),
            children: Vec::new(),
        }
    }

    /// An internal node whose only child is `child`; keys arrive through a split.
    pub fn new_parent_of(child: Box<Node<K>>) -> Self {
        Node {
            keys: Vec::new(),
            children: vec![child],
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_full(&self, min_degree: usize) -> bool {
        self.keys.len() == 2 * min_degree - 1
    }

    /// Smallest index whose key is not less than `key`, or `len()` if none is.
    pub fn find_index<C: Comparator<K>>(&self, key: &K, cmp: &C) -> usize {
        self.keys
            .iter()
            .position(|k| !cmp.less_than(k, key))
            .unwrap_or(self.keys.len())
    }

    pub fn holds_at<C: Comparator<K>>(&self, index: usize, key: &K, cmp: &C) -> bool {
        self.keys
            .get(index)
            .is_some_and(|k| cmp.equivalent(k, key))
    }

    /// Inserts `key` after every key it is not less than and returns its slot.
    /// Children are left alone; callers splice them in themselves.
    pub fn insert_key<C: Comparator<K>>(&mut self, key: K, cmp: &C) -> usize {
        let mut index = self.keys.len();
        while index > 0 && cmp.less_than(&key, &self.keys[index - 1]) {
            index -= 1;
        }
        self.keys.insert(index, key);
        index
    }

    pub fn count_nodes(&self) -> usize {
        1 + self.children.iter().map(|c| c.count_nodes()).sum::<usize>()
    }

    pub fn collect_in_order<'a>(&'a self, out: &mut Vec<&'a K>) {
        if self.is_leaf() {
            out.extend(self.keys.iter());
            return;
        }
        for (child, key) in self.children.iter().zip(self.keys.iter()) {
            child.collect_in_order(out);
            out.push(key);
        }
        if let Some(last) = self.children.last() {
            last.collect_in_order(out);
        }
    }
}
