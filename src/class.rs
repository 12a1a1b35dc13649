//! Coset identifiers and the union–find arena that keeps track of which identifiers have been
//! identified with each other.

use serde::Serialize;
use std::fmt;
use std::num::NonZeroU32;

/// An equivalence class of words, i.e. a coset of the subgroup. Classes are totally ordered by
/// the order in which they were defined.
///
/// A cell whose class is not known yet is stored as `Option::<Class>::None`, which takes no more
/// space than a `Class`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Class(NonZeroU32);

impl Class {
    /// The class of the subgroup itself.
    pub const BASE: Self = Self(NonZeroU32::MIN);

    pub fn new(n: u32) -> Option<Self> {
        NonZeroU32::new(n).map(Self)
    }

    pub const fn get(self) -> u32 {
        self.0.get()
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self(
            self.0
                .checked_add(1)
                .expect("ran out of class identifiers"),
        )
    }

    /// The position of this class in a zero-based array.
    pub const fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }

    pub fn from_index(index: usize) -> Self {
        let n = u32::try_from(index + 1).expect("ran out of class identifiers");
        // index + 1 is positive
        Self(NonZeroU32::new(n).unwrap())
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Every class ever allocated, with a union–find forest recording coincidences.
///
/// Classes are never reused. When two classes are found to coincide the larger one is retired and
/// points at the smaller one, so the representative of a set of coinciding classes is always its
/// oldest member and [`Class::BASE`] is never retired.
#[derive(Clone, Debug)]
pub struct ClassArena {
    parent: Vec<Class>,
    live: usize,
}

impl Default for ClassArena {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassArena {
    /// An arena containing only the base class.
    pub fn new() -> Self {
        Self {
            parent: vec![Class::BASE],
            live: 1,
        }
    }

    /// The most recently allocated class, whether or not it has been retired since.
    pub fn freshest(&self) -> Class {
        Class::from_index(self.parent.len() - 1)
    }

    /// Allocates a class that has never been used before.
    pub fn fresh(&mut self) -> Class {
        let class = self.freshest().next();
        self.parent.push(class);
        self.live += 1;
        class
    }

    /// Number of classes ever allocated.
    pub fn allocated(&self) -> usize {
        self.parent.len()
    }

    /// Number of classes that have not been retired.
    pub fn live(&self) -> usize {
        self.live
    }

    pub fn is_live(&self, class: Class) -> bool {
        self.parent[class.index()] == class
    }

    /// The representative of `class`. This does not compress paths, see
    /// [`ClassArena::compress`].
    pub fn find(&self, mut class: Class) -> Class {
        loop {
            let parent = self.parent[class.index()];
            if parent == class {
                return class;
            }
            class = parent;
        }
    }

    /// Identifies the classes of `x` and `y`. Returns `(kept, retired)` if they were distinct.
    pub fn union(&mut self, x: Class, y: Class) -> Option<(Class, Class)> {
        let x = self.find(x);
        let y = self.find(y);
        if x == y {
            return None;
        }
        let (kept, retired) = if x < y { (x, y) } else { (y, x) };
        self.parent[retired.index()] = kept;
        self.live -= 1;
        Some((kept, retired))
    }

    /// Points every class directly at its representative.
    pub fn compress(&mut self) {
        // Parents are always smaller than their children, so a single ascending sweep suffices.
        for i in 0..self.parent.len() {
            let parent = self.parent[i];
            self.parent[i] = self.parent[parent.index()];
        }
    }

    /// The classes that have not been retired, in increasing order.
    pub fn iter_live(&self) -> impl Iterator<Item = Class> + '_ {
        self.parent
            .iter()
            .enumerate()
            .filter(|&(i, parent)| parent.index() == i)
            .map(|(i, _)| Class::from_index(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(n: u32) -> Class {
        Class::new(n).unwrap()
    }

    #[test]
    fn test_class() {
        assert_eq!(Class::BASE.get(), 1);
        assert_eq!(Class::BASE.index(), 0);
        assert_eq!(Class::BASE.next(), class(2));
        assert_eq!(Class::from_index(4), class(5));
        assert_eq!(Class::new(0), None);
        assert_eq!(
            std::mem::size_of::<Option<Class>>(),
            std::mem::size_of::<u32>()
        );
    }

    #[test]
    fn test_fresh() {
        let mut arena = ClassArena::new();
        assert_eq!(arena.freshest(), Class::BASE);
        assert_eq!(arena.fresh(), class(2));
        assert_eq!(arena.fresh(), class(3));
        assert_eq!(arena.allocated(), 3);
        assert_eq!(arena.live(), 3);
    }

    #[test]
    fn test_union() {
        let mut arena = ClassArena::new();
        for _ in 0..5 {
            arena.fresh();
        }
        assert_eq!(arena.union(class(5), class(3)), Some((class(3), class(5))));
        assert_eq!(arena.union(class(3), class(5)), None);
        assert_eq!(arena.union(class(6), class(5)), Some((class(3), class(6))));
        assert_eq!(arena.union(class(3), class(2)), Some((class(2), class(3))));

        assert_eq!(arena.find(class(6)), class(2));
        assert_eq!(arena.find(class(5)), class(2));
        assert!(!arena.is_live(class(3)));
        assert_eq!(arena.live(), 3);
        assert_eq!(
            arena.iter_live().collect::<Vec<_>>(),
            vec![class(1), class(2), class(4)]
        );

        arena.compress();
        assert_eq!(arena.parent[class(6).index()], class(2));
        assert_eq!(arena.parent[class(5).index()], class(2));
        // A fresh class is never one that was retired.
        assert_eq!(arena.fresh(), class(7));
    }
}
