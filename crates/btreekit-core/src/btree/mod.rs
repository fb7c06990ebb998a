mod diagnostics;
mod node;
mod rebalance;
mod search;

pub use search::Location;

use std::fmt;
use std::io::{self, Write};

use tracing::debug;

use crate::compare::{Comparator, KeyPrinter, NaturalOrder, NoPrinter};
use crate::config::TreeConfig;
use crate::error::{Error, Result};

use node::Node;
use rebalance::{fix_child_size, merge_children, split_child, FixOutcome};

/// An in-memory B-tree of minimum degree `t`.
///
/// Every operation walks down from the root once. Inserts split full nodes
/// before entering them and removals top up thin nodes before entering them,
/// so nothing ever has to be repaired on the way back up.
///
/// Equal keys may be stored more than once. Lookups return whichever equal
/// key the descent meets first; callers must not rely on which copy that is.
pub struct BTree<K, C = NaturalOrder, P = NoPrinter> {
    root: Box<Node<K>>,
    min_degree: usize,
    len: usize,
    comparator: C,
    printer: P,
}

enum Removal<K> {
    Removed(K),
    Missing,
    /// A merge emptied the root; the tree must promote its only child and retry.
    RootCollapsed,
}

impl<K: Ord> BTree<K> {
    pub fn new(min_degree: usize) -> Result<Self> {
        Self::with_parts(TreeConfig::new(min_degree), NaturalOrder, NoPrinter)
    }

    pub fn from_config(config: TreeConfig) -> Result<Self> {
        Self::with_parts(config, NaturalOrder, NoPrinter)
    }
}

impl<K, C: Comparator<K>> BTree<K, C> {
    pub fn with_comparator(min_degree: usize, comparator: C) -> Result<Self> {
        Self::with_parts(TreeConfig::new(min_degree), comparator, NoPrinter)
    }
}

impl<K, C, P> BTree<K, C, P>
where
    C: Comparator<K>,
    P: KeyPrinter<K>,
{
    /// Builds an empty tree, rejecting a minimum degree below 2.
    pub fn with_parts(config: TreeConfig, comparator: C, printer: P) -> Result<Self> {
        config.validate()?;
        debug!(min_degree = config.min_degree, "created b-tree");

        Ok(BTree {
            root: Box::new(Node::new_leaf()),
            min_degree: config.min_degree,
            len: 0,
            comparator,
            printer,
        })
    }

    /// Swaps the key printer used by [`print`](Self::print).
    pub fn with_printer<Q: KeyPrinter<K>>(self, printer: Q) -> BTree<K, C, Q> {
        BTree {
            root: self.root,
            min_degree: self.min_degree,
            len: self.len,
            comparator: self.comparator,
            printer,
        }
    }

    pub fn insert(&mut self, key: K) {
        let t = self.min_degree;
        if self.root.is_full(t) {
            self.grow_root();
        }

        let cmp = &self.comparator;
        let mut curr = &mut *self.root;
        while !curr.is_leaf() {
            let mut index = curr.find_index(&key, cmp);
            if curr.children[index].is_full(t) {
                split_child(curr, index, t);
                if cmp.less_than(&curr.keys[index], &key) {
                    index += 1;
                }
            }
            curr = &mut *curr.children[index];
        }

        curr.insert_key(key, cmp);
        self.len += 1;
    }

    /// Removes one key equal to `key` and returns it.
    ///
    /// Thin nodes are borrowed into or merged on the way down before the leaf
    /// is reached. When the key turns out to be absent this returns
    /// [`Error::RemoveKeyNotFound`] with the stored keys untouched, but the
    /// tree may have been reshaped by those repairs.
    pub fn remove(&mut self, key: &K) -> Result<K> {
        loop {
            match remove_below(&mut self.root, key, self.min_degree, &self.comparator) {
                Removal::Removed(removed) => {
                    self.len -= 1;
                    return Ok(removed);
                }
                Removal::Missing => return Err(Error::RemoveKeyNotFound),
                Removal::RootCollapsed => self.collapse_root(),
            }
        }
    }

    pub fn search(&self, key: &K) -> Option<Location<'_, K>> {
        search::descend(&self.root, key, &self.comparator)
    }

    pub fn search_key(&self, key: &K) -> Result<&K> {
        self.search(key)
            .map(|loc| loc.key())
            .ok_or(Error::SearchKeyNotFound)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Dumps the tree to stdout. Does nothing without a printer.
    pub fn print(&self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.print_to(&mut out)
    }

    pub fn print_to<W: Write>(&self, out: &mut W) -> Result<()> {
        if !self.printer.enabled() {
            return Ok(());
        }

        out.write_all(b"\n")?;
        diagnostics::write_node(&self.root, 0, &self.printer, out)?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }

    /// Checks every structural invariant, reporting the first one broken.
    pub fn validate(&self) -> Result<()> {
        let counted = diagnostics::check_tree(&self.root, self.min_degree, &self.comparator)?;
        if counted != self.len {
            return Err(Error::InvariantViolation(format!(
                "tree reports {} keys but holds {}",
                self.len, counted
            )));
        }
        Ok(())
    }

    fn grow_root(&mut self) {
        let t = self.min_degree;
        let old_root = std::mem::replace(&mut self.root, Box::new(Node::new_leaf()));
        self.root = Box::new(Node::new_parent_of(old_root));
        split_child(&mut self.root, 0, t);
        debug!(height = self.height(), "root split");
    }

    fn collapse_root(&mut self) {
        debug_assert!(self.root.keys.is_empty());
        if let Some(merged) = self.root.children.pop() {
            self.root = merged;
            debug!(height = self.height(), "root collapsed into merged child");
        }
    }
}

impl<K, C, P> BTree<K, C, P> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn min_degree(&self) -> usize {
        self.min_degree
    }

    pub fn config(&self) -> TreeConfig {
        TreeConfig::new(self.min_degree)
    }

    /// Number of levels; a lone root counts as one.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut node = &*self.root;
        while let Some(first) = node.children.first() {
            height += 1;
            node = first.as_ref();
        }
        height
    }

    pub fn node_count(&self) -> usize {
        self.root.count_nodes()
    }

    /// All keys in ascending order. Intended for inspection and tests.
    pub fn keys_in_order(&self) -> Vec<&K> {
        let mut out = Vec::with_capacity(self.len);
        self.root.collect_in_order(&mut out);
        out
    }
}

impl<K, C, P> fmt::Debug for BTree<K, C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BTree")
            .field("min_degree", &self.min_degree)
            .field("len", &self.len)
            .field("height", &self.height())
            .finish()
    }
}

fn remove_below<K, C: Comparator<K>>(root: &mut Node<K>, key: &K, t: usize, cmp: &C) -> Removal<K> {
    let mut curr = root;
    loop {
        let mut index = curr.find_index(key, cmp);

        if curr.holds_at(index, key, cmp) {
            if curr.is_leaf() {
                return Removal::Removed(curr.keys.remove(index));
            }
            if curr.children[index].len() >= t {
                let predecessor = take_predecessor(&mut curr.children[index], t);
                return Removal::Removed(std::mem::replace(&mut curr.keys[index], predecessor));
            }
            if curr.children[index + 1].len() >= t {
                let successor = take_successor(&mut curr.children[index + 1], t);
                return Removal::Removed(std::mem::replace(&mut curr.keys[index], successor));
            }
            // Both neighbours are minimal: pull the key down into their merge
            // and keep looking for it there.
            if merge_children(curr, index) == FixOutcome::RootReplaced {
                return Removal::RootCollapsed;
            }
            curr = &mut *curr.children[index];
            continue;
        }

        if curr.is_leaf() {
            return Removal::Missing;
        }

        match fix_child_size(curr, index, t) {
            FixOutcome::RootReplaced => return Removal::RootCollapsed,
            FixOutcome::Modified => index = curr.find_index(key, cmp),
            FixOutcome::Unchanged => {}
        }
        curr = &mut *curr.children[index];
    }
}

/// Detaches the rightmost key under `node`, topping up each child entered.
fn take_predecessor<K>(node: &mut Node<K>, t: usize) -> K {
    let mut curr = node;
    while !curr.is_leaf() {
        let last = curr.len();
        let outcome = fix_child_size(curr, last, t);
        debug_assert_ne!(outcome, FixOutcome::RootReplaced);
        let last = curr.children.len() - 1;
        curr = &mut *curr.children[last];
    }
    let last = curr.len() - 1;
    curr.keys.remove(last)
}

fn take_successor<K>(node: &mut Node<K>, t: usize) -> K {
    let mut curr = node;
    while !curr.is_leaf() {
        let outcome = fix_child_size(curr, 0, t);
        debug_assert_ne!(outcome, FixOutcome::RootReplaced);
        curr = &mut *curr.children[0];
    }
    curr.keys.remove(0)
}
