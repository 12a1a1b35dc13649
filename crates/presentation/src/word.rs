use crate::Generator;
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Mul;

/// A word in the generators and their inverses. Words are not freely reduced unless
/// [`Word::reduce`] is called explicitly.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word(Vec<Generator>);

impl Word {
    /// The empty word.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, g: Generator) {
        if !g.is_identity() {
            self.0.push(g);
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Generator> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Generator] {
        &self.0
    }

    /// The positive generators occurring in the word, in order of first appearance.
    pub fn letters(&self) -> impl Iterator<Item = Generator> + '_ {
        let mut seen = Vec::new();
        self.0.iter().filter_map(move |g| {
            let g = g.positive();
            if seen.contains(&g) {
                None
            } else {
                seen.push(g);
                Some(g)
            }
        })
    }

    /// # Example
    /// ```
    /// # use presentation::Word;
    /// let w: Word = "abC".parse().unwrap();
    /// assert_eq!(w.inverse().to_string(), "cBA");
    /// ```
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self(self.0.iter().rev().map(|g| g.invert()).collect())
    }

    /// Raises the word to an integer power. Negative powers are powers of the inverse and the
    /// zeroth power is the empty word.
    #[must_use]
    pub fn pow(&self, n: i32) -> Self {
        let base = if n < 0 { self.inverse() } else { self.clone() };
        let n = n.unsigned_abs() as usize;
        let mut result = Vec::with_capacity(base.len() * n);
        for _ in 0..n {
            result.extend_from_slice(&base.0);
        }
        Self(result)
    }

    /// Cancels adjacent pairs `xX` and `Xx` until none are left.
    #[must_use]
    pub fn reduce(&self) -> Self {
        let mut stack: Vec<Generator> = Vec::with_capacity(self.len());
        for &g in &self.0 {
            if stack.last() == Some(&g.invert()) {
                stack.pop();
            } else {
                stack.push(g);
            }
        }
        Self(stack)
    }
}

impl From<Generator> for Word {
    fn from(g: Generator) -> Self {
        let mut w = Self::new();
        w.push(g);
        w
    }
}

impl FromIterator<Generator> for Word {
    fn from_iter<I: IntoIterator<Item = Generator>>(iter: I) -> Self {
        Self(iter.into_iter().filter(|g| !g.is_identity()).collect())
    }
}

impl<'a> IntoIterator for &'a Word {
    type Item = &'a Generator;
    type IntoIter = std::slice::Iter<'a, Generator>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Mul for &Word {
    type Output = Word;

    fn mul(self, rhs: &Word) -> Word {
        let mut result = Vec::with_capacity(self.len() + rhs.len());
        result.extend_from_slice(&self.0);
        result.extend_from_slice(&rhs.0);
        Word(result)
    }
}

impl Mul for Word {
    type Output = Word;

    fn mul(mut self, rhs: Word) -> Word {
        self.0.extend(rhs.0);
        self
    }
}

/// The empty word is displayed as `1`.
impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "1");
        }
        for g in &self.0 {
            write!(f, "{g}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({self})")
    }
}

impl Serialize for Word {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Word {
        s.parse().unwrap()
    }

    #[test]
    fn test_pow() {
        assert_eq!(word("ab").pow(3).to_string(), "ababab");
        assert_eq!(word("ab").pow(-2).to_string(), "BABA");
        assert_eq!(word("ab").pow(0), Word::new());
    }

    #[test]
    fn test_reduce() {
        assert_eq!(word("aAb").reduce().to_string(), "b");
        assert_eq!(word("abBA").reduce(), Word::new());
        assert_eq!(word("abab").reduce().to_string(), "abab");
        assert_eq!((&word("ab") * &word("ab").inverse()).reduce(), Word::new());
    }

    #[test]
    fn test_letters() {
        let letters: String = word("BabAc").letters().map(|g| g.to_char()).collect();
        assert_eq!(letters, "bac");
    }

    #[test]
    fn test_identity_is_skipped() {
        let w: Word = [Generator::IDENTITY, Generator::new('a').unwrap()]
            .into_iter()
            .collect();
        assert_eq!(w.len(), 1);
        assert_eq!(Word::from(Generator::IDENTITY), Word::new());
        assert_eq!(Word::new().to_string(), "1");
    }

    #[test]
    fn test_serialize() {
        assert_eq!(serde_json::to_string(&word("aB")).unwrap(), r#""aB""#);
    }
}
