use btreekit_core::{BTree, DisplayPrinter, Error};

fn main() -> btreekit_core::Result<()> {
    println!("B-Tree Demo\n");

    let mut tree = BTree::new(2)?.with_printer(DisplayPrinter);
    println!("Created B-tree with min degree {}", tree.min_degree());
    println!("Empty: {}, Len: {}\n", tree.is_empty(), tree.len());

    println!("Inserting 1..=7...");
    for i in 1..=7 {
        tree.insert(i);
    }
    println!("Length: {}, Height: {}", tree.len(), tree.height());
    tree.print()?;

    println!("Search operations:");
    for i in [1, 4, 7, 10] {
        match tree.search(&i) {
            Some(loc) => println!("  search({}) -> slot {} of node {:?}", i, loc.index(), loc.keys()),
            None => println!("  search({}) -> not found", i),
        }
    }

    println!("\nRemoving 2 (both neighbours minimal, so they merge):");
    println!("  removed {}", tree.remove(&2)?);
    tree.print()?;

    println!("Removing 9 (absent):");
    match tree.remove(&9) {
        Err(Error::RemoveKeyNotFound) => println!("  not found, keys unchanged: {:?}", tree.keys_in_order()),
        other => println!("  unexpected: {:?}", other),
    }

    println!("\nDuplicates are kept:");
    tree.insert(5);
    tree.insert(5);
    println!("  in order: {:?}", tree.keys_in_order());

    tree.validate()?;
    println!("\nInvariants hold ({:?})", tree);
    Ok(())
}
