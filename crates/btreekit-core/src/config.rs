use crate::error::{Error, Result};

pub const MIN_DEGREE_FLOOR: usize = 2;

pub const DEFAULT_MIN_DEGREE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    pub min_degree: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            min_degree: DEFAULT_MIN_DEGREE,
        }
    }
}

impl TreeConfig {
    pub fn new(min_degree: usize) -> Self {
        TreeConfig { min_degree }
    }

    /// Rejects `t < 2`, and any `t` whose `2t` child limit overflows `usize`.
    pub fn validate(&self) -> Result<()> {
        if self.min_degree < MIN_DEGREE_FLOOR || self.min_degree.checked_mul(2).is_none() {
            return Err(Error::InvalidMinDegree(self.min_degree));
        }

        Ok(())
    }

    pub fn max_keys(&self) -> usize {
        self.max_children().saturating_sub(1)
    }

    pub fn min_keys(&self) -> usize {
        self.min_degree.saturating_sub(1)
    }

    pub fn max_children(&self) -> usize {
        self.min_degree.saturating_mul(2)
    }
}
