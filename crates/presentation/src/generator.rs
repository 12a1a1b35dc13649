use serde::{Serialize, Serializer};
use std::fmt;

/// A generator of a group presentation, or the formal inverse of one.
///
/// Generators are lowercase ASCII letters. The inverse of `a` is written `A`, and this is also how
/// it is displayed and parsed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generator {
    letter: char,
    inverted: bool,
}

impl Generator {
    /// The identity. It is its own inverse and never appears inside a [`crate::Word`].
    pub const IDENTITY: Self = Self {
        letter: '1',
        inverted: false,
    };

    /// The positive generator with the given letter. Returns `None` unless `letter` is a lowercase
    /// ASCII letter.
    pub fn new(letter: char) -> Option<Self> {
        letter.is_ascii_lowercase().then_some(Self {
            letter,
            inverted: false,
        })
    }

    /// Reads a generator in the letter case encoding: `a` is a generator and `A` its inverse.
    ///
    /// # Example
    /// ```
    /// # use presentation::Generator;
    /// let a = Generator::from_char('a').unwrap();
    /// assert_eq!(Generator::from_char('A'), Some(a.invert()));
    /// assert_eq!(Generator::from_char('3'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        if c.is_ascii_uppercase() {
            Self::new(c.to_ascii_lowercase()).map(Self::invert)
        } else {
            Self::new(c)
        }
    }

    pub const fn letter(self) -> char {
        self.letter
    }

    pub const fn is_inverse(self) -> bool {
        self.inverted
    }

    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    /// The positive generator with the same letter.
    pub const fn positive(self) -> Self {
        Self {
            letter: self.letter,
            inverted: false,
        }
    }

    #[must_use]
    pub fn invert(self) -> Self {
        if self.is_identity() {
            return self;
        }
        Self {
            letter: self.letter,
            inverted: !self.inverted,
        }
    }

    pub fn to_char(self) -> char {
        if self.inverted {
            self.letter.to_ascii_uppercase()
        } else {
            self.letter
        }
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_char(), f)
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_char(), f)
    }
}

impl Serialize for Generator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert() {
        let a = Generator::new('a').unwrap();
        assert!(!a.is_inverse());
        assert!(a.invert().is_inverse());
        assert_eq!(a.invert().invert(), a);
        assert_eq!(a.invert().letter(), 'a');
        assert_eq!(a.invert().positive(), a);
        assert_ne!(a, a.invert());
    }

    #[test]
    fn test_identity() {
        assert!(Generator::IDENTITY.is_identity());
        assert_eq!(Generator::IDENTITY.invert(), Generator::IDENTITY);
        assert_eq!(Generator::new('1'), None);
        assert_eq!(Generator::new('B'), None);
    }

    #[test]
    fn test_order() {
        let mut gens: Vec<Generator> = "BbAa".chars().filter_map(Generator::from_char).collect();
        gens.sort();
        let s: String = gens.iter().map(|g| g.to_char()).collect();
        assert_eq!(s, "aAbB");
    }
}
