//! The transition table records the action of the generators on the classes known so far.

use crate::class::{Class, ClassArena};
use presentation::Generator;
use rustc_hash::FxHashMap;

use std::fmt;

/// The left half of a transition: a class and the generator applied to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionKey {
    pub class: Class,
    pub generator: Generator,
}

/// The fact `from · generator = to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Transition {
    pub from: Class,
    pub generator: Generator,
    pub to: Class,
}

impl Transition {
    pub fn new(from: Class, generator: Generator, to: Class) -> Self {
        Self {
            from,
            generator,
            to,
        }
    }

    pub fn key(&self) -> TransitionKey {
        TransitionKey {
            class: self.from,
            generator: self.generator,
        }
    }

    /// `to · generator⁻¹ = from`
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self::new(self.to, self.generator.invert(), self.from)
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -{}-> {}", self.from, self.generator, self.to)
    }
}

/// Two classes that have been shown to be equal. The pair is ordered so that `keep < retire`,
/// but either may have been retired by the time the coincidence is processed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Coincidence {
    pub keep: Class,
    pub retire: Class,
}

impl Coincidence {
    pub fn new(x: Class, y: Class) -> Self {
        debug_assert_ne!(x, y);
        Self {
            keep: x.min(y),
            retire: x.max(y),
        }
    }
}

/// The outcome of [`TransitionTable::insert`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Insertion {
    /// Both directions were recorded.
    New,
    /// The transition was already known.
    Known,
    /// One direction was already recorded with a different value. Nothing was changed.
    Coincidence(Coincidence),
}

/// A map from [`TransitionKey`] to [`Class`].
///
/// Keys always use representative classes; stored values may refer to retired classes and are
/// resolved through the [`ClassArena`] on lookup. Transitions are inserted together with their
/// inverses, so `(i, g) -> j` is present if and only if `(j, g⁻¹) -> i` is, whenever there is no
/// pending coincidence.
#[derive(Clone, Debug, Default)]
pub struct TransitionTable {
    map: FxHashMap<TransitionKey, Class>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded transitions, counting both directions.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The image of `class` under `generator`, if known.
    pub fn get(&self, classes: &ClassArena, class: Class, generator: Generator) -> Option<Class> {
        let key = TransitionKey {
            class: classes.find(class),
            generator,
        };
        self.map.get(&key).map(|&c| classes.find(c))
    }

    pub fn contains(&self, classes: &ClassArena, class: Class, generator: Generator) -> bool {
        self.get(classes, class, generator).is_some()
    }

    /// Records `transition` and its inverse, unless this contradicts a known transition.
    pub fn insert(&mut self, classes: &ClassArena, transition: Transition) -> Insertion {
        let from = classes.find(transition.from);
        let to = classes.find(transition.to);
        let generator = transition.generator;

        let forward = self.get(classes, from, generator);
        let backward = self.get(classes, to, generator.invert());
        match (forward, backward) {
            (Some(x), _) if x != to => Insertion::Coincidence(Coincidence::new(x, to)),
            (_, Some(y)) if y != from => Insertion::Coincidence(Coincidence::new(y, from)),
            (Some(_), Some(_)) => Insertion::Known,
            _ => {
                let transition = Transition::new(from, generator, to);
                self.map.insert(transition.key(), to);
                self.map.insert(transition.inverse().key(), from);
                Insertion::New
            }
        }
    }

    /// Moves the transitions out of `retired`, which must just have been merged into `kept`.
    /// Transitions of `retired` that disagree with those of `kept` are dropped and reported as
    /// coincidences. Transitions into `retired` need no rewriting since lookups resolve them
    /// through the arena.
    pub fn retarget(
        &mut self,
        classes: &ClassArena,
        alphabet: &[Generator],
        kept: Class,
        retired: Class,
    ) -> Vec<Coincidence> {
        debug_assert_eq!(classes.find(retired), kept);
        let mut coincidences = Vec::new();
        for &generator in alphabet {
            let Some(image) = self.map.remove(&TransitionKey {
                class: retired,
                generator,
            }) else {
                continue;
            };
            let image = classes.find(image);
            match self.get(classes, kept, generator) {
                Some(existing) if existing != image => {
                    coincidences.push(Coincidence::new(existing, image));
                }
                Some(_) => {}
                None => {
                    self.map.insert(
                        TransitionKey {
                            class: kept,
                            generator,
                        },
                        image,
                    );
                }
            }
        }
        coincidences
    }

    /// The first missing transition, scanning live classes in increasing order and the alphabet in
    /// order.
    pub fn first_gap(&self, classes: &ClassArena, alphabet: &[Generator]) -> Option<TransitionKey> {
        classes.iter_live().find_map(|class| {
            alphabet
                .iter()
                .find(|&&generator| !self.contains(classes, class, generator))
                .map(|&generator| TransitionKey { class, generator })
        })
    }

    /// Whether every transition has its inverse recorded.
    pub fn is_inverse_consistent(&self, classes: &ClassArena) -> bool {
        self.map.iter().all(|(key, &to)| {
            self.get(classes, to, key.generator.invert()) == Some(classes.find(key.class))
        })
    }

    /// All transitions between representative classes, sorted.
    pub fn transitions(&self, classes: &ClassArena) -> Vec<Transition> {
        let mut result: Vec<Transition> = self
            .map
            .iter()
            .filter(|(key, _)| classes.is_live(key.class))
            .map(|(key, &to)| Transition::new(key.class, key.generator, classes.find(to)))
            .collect();
        result.sort_unstable();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gen(c: char) -> Generator {
        Generator::from_char(c).unwrap()
    }

    fn arena(n: usize) -> (ClassArena, Vec<Class>) {
        let mut arena = ClassArena::new();
        let mut classes = vec![Class::BASE];
        for _ in 1..n {
            classes.push(arena.fresh());
        }
        (arena, classes)
    }

    #[test]
    fn test_insert() {
        let (arena, c) = arena(3);
        let mut table = TransitionTable::new();
        let a = gen('a');

        assert_eq!(
            table.insert(&arena, Transition::new(c[0], a, c[1])),
            Insertion::New
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&arena, c[1], a.invert()), Some(c[0]));
        assert_eq!(
            table.insert(&arena, Transition::new(c[1], a.invert(), c[0])),
            Insertion::Known
        );
        assert_eq!(
            table.insert(&arena, Transition::new(c[0], a, c[2])),
            Insertion::Coincidence(Coincidence::new(c[1], c[2]))
        );
        assert_eq!(
            table.insert(&arena, Transition::new(c[2], a, c[1])),
            Insertion::Coincidence(Coincidence::new(c[0], c[2]))
        );
        assert_eq!(table.len(), 2);
        assert!(table.is_inverse_consistent(&arena));
    }

    #[test]
    fn test_retarget() {
        let (mut arena, c) = arena(5);
        let mut table = TransitionTable::new();
        let (a, b) = (gen('a'), gen('b'));

        table.insert(&arena, Transition::new(c[0], a, c[1]));
        table.insert(&arena, Transition::new(c[2], a, c[3]));
        table.insert(&arena, Transition::new(c[2], b, c[4]));

        let (kept, retired) = arena.union(c[0], c[2]).unwrap();
        let alphabet = [a, a.invert(), b, b.invert()];
        let coincidences = table.retarget(&arena, &alphabet, kept, retired);

        assert_eq!(coincidences, vec![Coincidence::new(c[1], c[3])]);
        assert_eq!(table.get(&arena, c[0], b), Some(c[4]));
        assert_eq!(table.get(&arena, c[4], b.invert()), Some(c[0]));
        assert_eq!(table.get(&arena, c[3], a.invert()), Some(c[0]));

        let (kept, retired) = arena.union(c[1], c[3]).unwrap();
        assert!(table.retarget(&arena, &alphabet, kept, retired).is_empty());
        assert!(table.is_inverse_consistent(&arena));
        assert_eq!(
            table.transitions(&arena),
            vec![
                Transition::new(c[0], a, c[1]),
                Transition::new(c[0], b, c[4]),
                Transition::new(c[1], a.invert(), c[0]),
                Transition::new(c[4], b.invert(), c[0]),
            ]
        );
    }

    #[test]
    fn test_first_gap() {
        let (arena, c) = arena(2);
        let mut table = TransitionTable::new();
        let a = gen('a');
        let alphabet = [a, a.invert()];

        assert_eq!(
            table.first_gap(&arena, &alphabet),
            Some(TransitionKey {
                class: c[0],
                generator: a
            })
        );
        table.insert(&arena, Transition::new(c[0], a, c[1]));
        table.insert(&arena, Transition::new(c[1], a, c[0]));
        assert_eq!(table.first_gap(&arena, &alphabet), None);
    }
}
