//! Tree dumps and invariant checks.

use std::io::Write;

use crate::compare::{Comparator, KeyPrinter};
use crate::error::{Error, Result};

use super::node::Node;

/// One line per node, pre-order, indented one tab per level.
pub(crate) fn write_node<K, P, W>(node: &Node<K>, depth: usize, printer: &P, out: &mut W) -> Result<()>
where
    P: KeyPrinter<K>,
    W: Write,
{
    for _ in 0..depth {
        out.write_all(b"\t")?;
    }
    for key in &node.keys {
        printer.write_key(out, key)?;
        out.write_all(b" ")?;
    }
    out.write_all(b"\n")?;

    for child in &node.children {
        write_node(child, depth + 1, printer, out)?;
    }
    Ok(())
}

/// Checks the B-tree invariants below `root`, returning the number of keys.
pub(crate) fn check_tree<K, C: Comparator<K>>(root: &Node<K>, min_degree: usize, cmp: &C) -> Result<usize> {
    let mut checker = Checker {
        min_degree,
        cmp,
        leaf_depth: None,
        keys_seen: 0,
    };
    checker.visit(root, 0, None, None)?;
    Ok(checker.keys_seen)
}

struct Checker<'c, C> {
    min_degree: usize,
    cmp: &'c C,
    leaf_depth: Option<usize>,
    keys_seen: usize,
}

impl<C> Checker<'_, C> {
    fn visit<K>(&mut self, node: &Node<K>, depth: usize, lower: Option<&K>, upper: Option<&K>) -> Result<()>
    where
        C: Comparator<K>,
    {
        let max_keys = 2 * self.min_degree - 1;
        if node.len() > max_keys {
            return violation(format!("node at depth {} holds {} keys, above {}", depth, node.len(), max_keys));
        }
        if depth > 0 && node.len() < self.min_degree - 1 {
            return violation(format!(
                "node at depth {} holds {} keys, below {}",
                depth,
                node.len(),
                self.min_degree - 1
            ));
        }
        if !node.is_leaf() && node.children.len() != node.len() + 1 {
            return violation(format!(
                "node at depth {} has {} keys but {} children",
                depth,
                node.len(),
                node.children.len()
            ));
        }
        if node.keys.windows(2).any(|w| self.cmp.less_than(&w[1], &w[0])) {
            return violation(format!("keys out of order in node at depth {}", depth));
        }
        let escapes_lower = lower.is_some_and(|lo| node.keys.iter().any(|k| self.cmp.less_than(k, lo)));
        let escapes_upper = upper.is_some_and(|hi| node.keys.iter().any(|k| self.cmp.less_than(hi, k)));
        if escapes_lower || escapes_upper {
            return violation(format!("key outside its separator bounds at depth {}", depth));
        }

        self.keys_seen += node.len();

        if node.is_leaf() {
            match self.leaf_depth {
                None => self.leaf_depth = Some(depth),
                Some(expected) if expected != depth => {
                    return violation(format!("leaf at depth {}, expected {}", depth, expected));
                }
                Some(_) => {}
            }
            return Ok(());
        }

        for (i, child) in node.children.iter().enumerate() {
            let lo = if i == 0 { lower } else { node.keys.get(i - 1) };
            let hi = if i == node.len() { upper } else { node.keys.get(i) };
            self.visit(child, depth + 1, lo, hi)?;
        }
        Ok(())
    }
}

fn violation(msg: String) -> Result<()> {
    Err(Error::InvariantViolation(msg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{DisplayPrinter, NaturalOrder};

    fn leaf(keys: &[i32]) -> Box<Node<i32>> {
        let mut node = Node::new_leaf();
        node.keys.extend_from_slice(keys);
        Box::new(node)
    }

    #[test]
    fn test_write_node_layout() {
        let root = Node {
            keys: vec![2, 4],
            children: vec![leaf(&[1]), leaf(&[3]), leaf(&[5, 6, 7])],
        };
        let mut out = Vec::new();
        write_node(&root, 0, &DisplayPrinter, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "2 4 \n\t1 \n\t3 \n\t5 6 7 \n");
    }

    #[test]
    fn test_check_accepts_valid_tree() {
        let root = Node {
            keys: vec![2, 4],
            children: vec![leaf(&[1]), leaf(&[3]), leaf(&[5, 6, 7])],
        };
        assert_eq!(check_tree(&root, 2, &NaturalOrder).unwrap(), 7);
    }

    #[test]
    fn test_check_rejects_underfull_child() {
        let root = Node {
            keys: vec![2],
            children: vec![leaf(&[]), leaf(&[3])],
        };
        assert!(matches!(check_tree(&root, 2, &NaturalOrder), Err(Error::InvariantViolation(_))));
    }

    #[test]
    fn test_check_rejects_misplaced_key() {
        let root = Node {
            keys: vec![5],
            children: vec![leaf(&[1, 7]), leaf(&[9])],
        };
        assert!(matches!(check_tree(&root, 2, &NaturalOrder), Err(Error::InvariantViolation(_))));
    }

    #[test]
    fn test_check_rejects_uneven_leaves() {
        let deep = Node {
            keys: vec![12],
            children: vec![leaf(&[11]), leaf(&[13])],
        };
        let root = Node {
            keys: vec![10],
            children: vec![leaf(&[1]), Box::new(deep)],
        };
        assert!(matches!(check_tree(&root, 2, &NaturalOrder), Err(Error::InvariantViolation(_))));
    }
}
