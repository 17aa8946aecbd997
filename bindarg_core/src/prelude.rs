//! Traits which, typically, may be imported without concern: `use bindarg::prelude::*`.
use std::collections::{BTreeSet, HashSet, VecDeque};

/// Behaviour for multiple (0 to many) items T to be collected together.
// Needs to be imported in order to implement a custom `Collectable`.
pub trait Collectable<T> {
    /// Add a value to this `Collectable`.
    fn add(&mut self, item: T);
}

impl<T> Collectable<T> for Vec<T> {
    fn add(&mut self, item: T) {
        self.push(item);
    }
}

impl<T> Collectable<T> for VecDeque<T> {
    fn add(&mut self, item: T) {
        self.push_back(item);
    }
}

impl<T: Eq + std::hash::Hash> Collectable<T> for HashSet<T> {
    fn add(&mut self, item: T) {
        self.insert(item);
    }
}

impl<T: Ord> Collectable<T> for BTreeSet<T> {
    fn add(&mut self, item: T) {
        self.insert(item);
    }
}
