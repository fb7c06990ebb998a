use std::fmt::Display;
use std::io;

/// Strict ordering over `K`. Keys neither side of which is less are equal.
pub trait Comparator<K> {
    fn less_than(&self, a: &K, b: &K) -> bool;

    fn equivalent(&self, a: &K, b: &K) -> bool {
        !self.less_than(a, b) && !self.less_than(b, a)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NaturalOrder;

impl<K: Ord> Comparator<K> for NaturalOrder {
    fn less_than(&self, a: &K, b: &K) -> bool {
        a < b
    }
}

impl<K, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    fn less_than(&self, a: &K, b: &K) -> bool {
        self(a, b)
    }
}

pub trait KeyPrinter<K> {
    fn write_key(&self, out: &mut dyn io::Write, key: &K) -> io::Result<()>;

    /// A disabled printer turns `print` into a no-op.
    fn enabled(&self) -> bool {
        true
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoPrinter;

impl<K> KeyPrinter<K> for NoPrinter {
    fn write_key(&self, _out: &mut dyn io::Write, _key: &K) -> io::Result<()> {
        Ok(())
    }

    fn enabled(&self) -> bool {
        false
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DisplayPrinter;

impl<K: Display> KeyPrinter<K> for DisplayPrinter {
    fn write_key(&self, out: &mut dyn io::Write, key: &K) -> io::Result<()> {
        write!(out, "{}", key)
    }
}

impl<K, F> KeyPrinter<K> for F
where
    F: Fn(&K) -> String,
{
    fn write_key(&self, out: &mut dyn io::Write, key: &K) -> io::Result<()> {
        out.write_all(self(key).as_bytes())
    }
}
