//! Per-level aggregation of sibling counts by brick type.

use std::collections::BTreeMap;

use crate::domain::BrickType;

/// How many children of each type a brick has.
///
/// While the children of one brick are enumerated chronologically, the value
/// returned by [`TypeCounter::increment`] is the typed sibling index of the
/// child just seen ("the 3rd pro-brick on this level").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeCounter {
    counts: BTreeMap<BrickType, usize>,
}

impl TypeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more brick of `brick_type` and return the new 1-based count.
    pub fn increment(&mut self, brick_type: BrickType) -> usize {
        let count = self.counts.entry(brick_type).or_insert(0);
        *count += 1;
        *count
    }

    pub fn get(&self, brick_type: BrickType) -> usize {
        self.counts.get(&brick_type).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Counts for every brick type, zero where no child of that type exists.
    pub fn per_type(&self) -> [(BrickType, usize); 5] {
        BrickType::ALL.map(|t| (t, self.get(t)))
    }
}

impl FromIterator<BrickType> for TypeCounter {
    fn from_iter<I: IntoIterator<Item = BrickType>>(iter: I) -> Self {
        let mut counter = Self::new();
        for brick_type in iter {
            counter.increment(brick_type);
        }
        counter
    }
}
