//! Generators, words and finite presentations of groups, together with a parser for the usual
//! shorthand (`a2, b3, (ab)^2`, `ab = ba`, ...).

mod generator;
pub mod parser;
mod word;

pub use generator::Generator;
pub use word::Word;

use anyhow::{bail, Context};
use itertools::Itertools;
use std::fmt;

/// A finite presentation `⟨ generators | relators ⟩` together with words generating a subgroup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Presentation {
    generators: Vec<Generator>,
    relators: Vec<Word>,
    subgroup: Vec<Word>,
}

impl Presentation {
    /// Checks that every letter used is one of `generators`. Empty words are dropped.
    pub fn new(
        generators: Vec<Generator>,
        relators: Vec<Word>,
        subgroup: Vec<Word>,
    ) -> anyhow::Result<Self> {
        for g in &generators {
            if g.is_inverse() || g.is_identity() {
                bail!("Generator '{g}' is not a positive generator");
            }
        }
        for word in relators.iter().chain(&subgroup) {
            if let Some(g) = word.letters().find(|g| !generators.contains(g)) {
                bail!("Word {word} uses '{g}', which is not a generator");
            }
        }
        Ok(Self {
            generators,
            relators: relators.into_iter().filter(|w| !w.is_empty()).collect(),
            subgroup: subgroup.into_iter().filter(|w| !w.is_empty()).collect(),
        })
    }

    /// Like [`Presentation::new`], but the generators are the letters occurring in the relators
    /// and subgroup words, in alphabetical order.
    pub fn inferred(relators: Vec<Word>, subgroup: Vec<Word>) -> Self {
        let generators = relators
            .iter()
            .chain(&subgroup)
            .flat_map(Word::letters)
            .sorted()
            .dedup()
            .collect();
        Self {
            generators,
            relators: relators.into_iter().filter(|w| !w.is_empty()).collect(),
            subgroup: subgroup.into_iter().filter(|w| !w.is_empty()).collect(),
        }
    }

    /// Builds a presentation from strings.
    ///
    /// # Arguments
    ///  - `generators`: the generator letters, separated by commas or spaces. If this is empty,
    ///    the generators are inferred from the words.
    ///  - `relators`: a comma separated list of relators.
    ///  - `subgroup`: a comma separated list of words generating the subgroup. Leave it empty for
    ///    the trivial subgroup.
    ///
    /// # Example
    /// ```
    /// # use presentation::Presentation;
    /// let p = Presentation::parse("a, b", "a4, b2, (ab)2", "").unwrap();
    /// assert_eq!(p.to_string(), "< a, b | aaaa, bb, abab >");
    /// assert!(Presentation::parse("a", "ab", "").is_err());
    /// ```
    pub fn parse(generators: &str, relators: &str, subgroup: &str) -> anyhow::Result<Self> {
        let relators = parser::parse_words(relators)
            .with_context(|| format!("Error when parsing relators {relators}"))?;
        let subgroup = parser::parse_words(subgroup)
            .with_context(|| format!("Error when parsing subgroup generators {subgroup}"))?;
        let generators = parser::parse_generators(generators)?;
        if generators.is_empty() {
            Ok(Self::inferred(relators, subgroup))
        } else {
            Self::new(generators, relators, subgroup)
        }
    }

    /// The positive generators.
    pub fn generators(&self) -> &[Generator] {
        &self.generators
    }

    /// Every generator followed by its inverse: `a, A, b, B, ...`.
    pub fn alphabet(&self) -> Vec<Generator> {
        self.generators
            .iter()
            .flat_map(|&g| [g, g.invert()])
            .collect()
    }

    pub fn relators(&self) -> &[Word] {
        &self.relators
    }

    pub fn subgroup(&self) -> &[Word] {
        &self.subgroup
    }

    /// Whether `word` only uses letters of this presentation.
    pub fn accepts(&self, word: &Word) -> bool {
        word.letters().all(|g| self.generators.contains(&g))
    }
}

impl fmt::Display for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "< {}", self.generators.iter().join(", "))?;
        if !self.relators.is_empty() {
            write!(f, " | {}", self.relators.iter().join(", "))?;
        }
        write!(f, " >")?;
        if !self.subgroup.is_empty() {
            write!(f, " / < {} >", self.subgroup.iter().join(", "))?;
        }
        Ok(())
    }
}
