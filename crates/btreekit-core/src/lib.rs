pub mod error;
pub mod config;
pub mod compare;

pub mod btree;

pub use error::{Error, Result};
pub use config::{TreeConfig, DEFAULT_MIN_DEGREE, MIN_DEGREE_FLOOR};
pub use compare::{Comparator, DisplayPrinter, KeyPrinter, NaturalOrder, NoPrinter};
pub use btree::{BTree, Location};
