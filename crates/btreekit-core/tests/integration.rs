use btreekit_core::{BTree, DisplayPrinter, Error, TreeConfig};

fn dump<K, C, P>(tree: &BTree<K, C, P>) -> String
where
    C: btreekit_core::Comparator<K>,
    P: btreekit_core::KeyPrinter<K>,
{
    let mut out = Vec::new();
    tree.print_to(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_sequential_insert_then_remove_scenario() {
    let mut tree = BTree::new(2).unwrap().with_printer(DisplayPrinter);
    for k in 1..=7 {
        tree.insert(k);
    }
    assert_eq!(dump(&tree), "\n2 4 \n\t1 \n\t3 \n\t5 6 7 \n\n");

    assert_eq!(tree.remove(&2).unwrap(), 2);
    assert_eq!(dump(&tree), "\n4 \n\t1 3 \n\t5 6 7 \n\n");
    assert!(tree.validate().is_ok());
}

#[test]
fn test_remove_on_empty_tree() {
    let mut tree = BTree::new(2).unwrap().with_printer(DisplayPrinter);

    assert!(matches!(tree.remove(&5), Err(Error::RemoveKeyNotFound)));
    assert_eq!(tree.height(), 1);
    assert_eq!(tree.node_count(), 1);
    assert_eq!(dump(&tree), "\n\n\n");
}

#[test]
fn test_misses() {
    let mut tree = BTree::new(3).unwrap();
    for k in (0..100).step_by(2) {
        tree.insert(k);
    }

    assert!(matches!(tree.search_key(&51), Err(Error::SearchKeyNotFound)));
    assert!(matches!(tree.remove(&51), Err(Error::RemoveKeyNotFound)));

    assert_eq!(tree.remove(&50).unwrap(), 50);
    assert!(matches!(tree.search_key(&50), Err(Error::SearchKeyNotFound)));
    assert!(matches!(tree.remove(&50), Err(Error::RemoveKeyNotFound)));
    assert_eq!(tree.len(), 49);
}

#[test]
fn test_count_conservation() {
    let mut tree = BTree::from_config(TreeConfig::new(4)).unwrap();
    let mut survivors = Vec::new();

    for i in 0..1000u32 {
        // Scatter keys without a RNG; 7919 is prime so this visits every residue.
        let k = (i * 7919) % 1000;
        tree.insert(k);
        survivors.push(k);
    }
    for k in (0..1000).filter(|k| k % 3 == 0) {
        assert_eq!(tree.remove(&k).unwrap(), k);
        survivors.retain(|s| *s != k);
    }

    survivors.sort_unstable();
    let keys: Vec<u32> = tree.keys_in_order().into_iter().copied().collect();
    assert_eq!(keys, survivors);
    assert_eq!(tree.len(), 1000 - 334);
    assert!(tree.validate().is_ok());
}

#[test]
fn test_duplicate_entries_with_key_only_comparator() {
    // Entries compare by id alone, so the three "7" entries are equal keys.
    let by_id = |a: &(u32, &str), b: &(u32, &str)| a.0 < b.0;
    let mut tree: BTree<(u32, &str), _> = BTree::with_comparator(2, by_id).unwrap();

    for entry in [(7, "first"), (3, "x"), (7, "second"), (9, "y"), (7, "third"), (1, "z")] {
        tree.insert(entry);
    }

    // Which of the equal entries comes back is unspecified.
    let found = tree.search_key(&(7, "")).unwrap();
    assert_eq!(found.0, 7);
    assert!(["first", "second", "third"].contains(&found.1));

    let mut removed: Vec<&str> = (0..3).map(|_| tree.remove(&(7, "")).unwrap().1).collect();
    removed.sort_unstable();
    assert_eq!(removed, vec!["first", "second", "third"]);
    assert!(matches!(tree.remove(&(7, "")), Err(Error::RemoveKeyNotFound)));
    assert_eq!(tree.len(), 3);
}

#[test]
fn test_closure_printer() {
    let mut tree = BTree::new(2).unwrap().with_printer(|k: &i32| format!("<{}>", k));
    for k in [3, 1, 2] {
        tree.insert(k);
    }
    assert_eq!(dump(&tree), "\n<1> <2> <3> \n\n");
}

#[test]
fn test_string_keys() {
    let mut tree = BTree::new(3).unwrap();
    for word in ["pear", "apple", "fig", "kiwi", "banana", "cherry", "date", "grape"] {
        tree.insert(word.to_string());
    }

    assert_eq!(tree.search_key(&"kiwi".to_string()).unwrap(), "kiwi");
    assert_eq!(tree.remove(&"apple".to_string()).unwrap(), "apple");

    let words: Vec<&str> = tree.keys_in_order().into_iter().map(String::as_str).collect();
    assert_eq!(words, vec!["banana", "cherry", "date", "fig", "grape", "kiwi", "pear"]);
}

#[test]
fn test_invalid_min_degree() {
    assert!(matches!(BTree::<i32>::new(1), Err(Error::InvalidMinDegree(1))));
    let config = TreeConfig::new(0);
    assert!(config.validate().is_err());
    assert!(BTree::<i32>::from_config(config).is_err());
}
