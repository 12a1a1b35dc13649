//! The result of a completed enumeration.

use crate::class::Class;
use crate::enumeration::Enumeration;
use presentation::{Generator, Presentation, Word};

use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

/// A complete coset table. The cosets are numbered `1..=index()`, with the subgroup itself being
/// [`Class::BASE`], and every coset has a canonical representative word.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CosetTable {
    alphabet: Vec<Generator>,
    /// `action[c.index()][i]` is the image of `c` under `alphabet[i]`.
    action: Vec<Vec<Class>>,
    representatives: Vec<Word>,
}

impl CosetTable {
    /// Reads off the table of a complete enumeration, renumbering the live classes in increasing
    /// order.
    ///
    /// # Panics
    /// If the enumeration is not complete.
    pub fn new(enumeration: &Enumeration) -> Self {
        let classes = enumeration.classes();
        let alphabet = enumeration.alphabet().to_vec();
        let renumber: FxHashMap<Class, Class> = classes
            .iter_live()
            .enumerate()
            .map(|(i, c)| (c, Class::from_index(i)))
            .collect();

        let action: Vec<Vec<Class>> = classes
            .iter_live()
            .map(|c| {
                alphabet
                    .iter()
                    .map(|&g| {
                        let image = enumeration
                            .image(c, g)
                            .expect("complete enumeration has every transition");
                        renumber[&image]
                    })
                    .collect()
            })
            .collect();

        let representatives = Self::spanning_tree(&alphabet, &action);
        Self {
            alphabet,
            action,
            representatives,
        }
    }

    /// The shortlex least word reaching each class, found by a breadth first search from the base
    /// class.
    fn spanning_tree(alphabet: &[Generator], action: &[Vec<Class>]) -> Vec<Word> {
        let mut words: Vec<Option<Word>> = vec![None; action.len()];
        words[Class::BASE.index()] = Some(Word::new());
        let mut queue = VecDeque::from([Class::BASE]);
        while let Some(class) = queue.pop_front() {
            for (&g, &image) in alphabet.iter().zip(&action[class.index()]) {
                if words[image.index()].is_none() {
                    let mut word = words[class.index()].clone().unwrap_or_default();
                    word.push(g);
                    words[image.index()] = Some(word);
                    queue.push_back(image);
                }
            }
        }
        words
            .into_iter()
            .map(|w| w.expect("coset table is connected"))
            .collect()
    }

    /// The number of cosets, i.e. the index of the subgroup.
    pub fn index(&self) -> usize {
        self.action.len()
    }

    /// `1..=index()`
    pub fn classes(&self) -> impl Iterator<Item = Class> {
        (0..self.index()).map(Class::from_index)
    }

    /// The generators and their inverses, in the order of the columns of the table.
    pub fn alphabet(&self) -> &[Generator] {
        &self.alphabet
    }

    fn column(&self, generator: Generator) -> Option<usize> {
        self.alphabet.iter().position(|&g| g == generator)
    }

    /// The image of `class` under `generator`. Returns `None` if the generator is not in the
    /// alphabet.
    pub fn image(&self, class: Class, generator: Generator) -> Option<Class> {
        if generator.is_identity() {
            return Some(class);
        }
        let column = self.column(generator)?;
        self.action.get(class.index()).map(|row| row[column])
    }

    /// The canonical word of `class`.
    pub fn representative(&self, class: Class) -> &Word {
        &self.representatives[class.index()]
    }

    /// The coset `H w`, or `None` if `word` uses a letter outside the alphabet.
    pub fn class_of(&self, word: &Word) -> Option<Class> {
        word.iter()
            .try_fold(Class::BASE, |class, &g| self.image(class, g))
    }

    /// The canonical representative of the coset of `word`.
    ///
    /// # Example
    /// ```
    /// # use presentation::Presentation;
    /// # use coset::ToddCoxeter;
    /// let p = Presentation::parse("a", "a3", "").unwrap();
    /// let table = ToddCoxeter::new(&p).run().unwrap();
    /// let w = "a5".parse().unwrap();
    /// assert_eq!(table.rewrite(&w).unwrap().to_string(), "A");
    /// ```
    pub fn rewrite(&self, word: &Word) -> Option<Word> {
        self.class_of(word)
            .map(|class| self.representative(class).clone())
    }

    /// Whether `word` lies in the subgroup.
    pub fn contains(&self, word: &Word) -> Option<bool> {
        self.class_of(word).map(|class| class == Class::BASE)
    }

    /// Whether `u` and `v` lie in the same coset.
    pub fn equivalent(&self, u: &Word, v: &Word) -> Option<bool> {
        Some(self.class_of(u)? == self.class_of(v)?)
    }

    /// The permutation of the cosets induced by `generator`, on the zero-based indices
    /// `0..index()`.
    pub fn permutation(&self, generator: Generator) -> Option<Vec<usize>> {
        let column = self.column(generator)?;
        Some(self.action.iter().map(|row| row[column].index()).collect())
    }

    /// The permutations of the positive generators.
    pub fn permutations(&self) -> Vec<(Generator, Vec<usize>)> {
        self.alphabet
            .iter()
            .filter(|g| !g.is_inverse())
            .filter_map(|&g| Some((g, self.permutation(g)?)))
            .collect()
    }

    /// Checks that this is a valid coset table for `presentation`: each generator acts as a
    /// permutation inverse to that of its inverse, every relator fixes every coset and every
    /// subgroup generator fixes the base coset.
    pub fn satisfies(&self, presentation: &Presentation) -> bool {
        let bijective = presentation.generators().iter().all(|&g| {
            self.classes().all(|c| {
                self.image(c, g)
                    .and_then(|d| self.image(d, g.invert()))
                    == Some(c)
            })
        });
        let relators = presentation.relators().iter().all(|r| {
            self.classes().all(|c| {
                r.iter().try_fold(c, |class, &g| self.image(class, g)) == Some(c)
            })
        });
        let subgroup = presentation
            .subgroup()
            .iter()
            .all(|w| self.contains(w) == Some(true));
        bijective && relators && subgroup
    }
}

/// The table with one row per coset, followed by the representative of the coset.
impl fmt::Display for CosetTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "     |{}| rep",
            self.alphabet
                .iter()
                .format_with("", |g, cb| cb(&format_args!("{g:>5}")))
        )?;
        for class in self.classes() {
            writeln!(
                f,
                "{class:>5}|{}| {}",
                self.action[class.index()]
                    .iter()
                    .format_with("", |c, cb| cb(&format_args!("{c:>5}"))),
                self.representative(class)
            )?;
        }
        Ok(())
    }
}
