use presentation::{Generator, Word};
use std::fmt;

/// The column layout shared by a family of rows: a list of words laid end to end.
///
/// A row over this schema has one cell more than there are columns. Cell `k` and cell `k + 1` are
/// joined by column `k`. The cells at which a word starts (and the very last cell) are pinned to
/// the key class of the row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnSchema {
    words: Vec<Word>,
    columns: Vec<Generator>,
    starts: Vec<usize>,
}

impl ColumnSchema {
    /// Empty words are skipped since they contribute no columns.
    pub fn new<'a>(words: impl IntoIterator<Item = &'a Word>) -> Self {
        let words: Vec<Word> = words.into_iter().filter(|w| !w.is_empty()).cloned().collect();
        let mut columns = Vec::with_capacity(words.iter().map(Word::len).sum());
        let mut starts = Vec::with_capacity(words.len());
        for word in &words {
            starts.push(columns.len());
            columns.extend(word.iter().copied());
        }
        Self {
            words,
            columns,
            starts,
        }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// The generators of all words, concatenated.
    pub fn columns(&self) -> &[Generator] {
        &self.columns
    }

    /// The column at which each word starts.
    pub fn word_starts(&self) -> &[usize] {
        &self.starts
    }

    /// Number of cells in a row over this schema.
    pub fn width(&self) -> usize {
        self.columns.len() + 1
    }

    /// Whether the cell is pinned to the key class of its row.
    pub fn is_boundary(&self, cell: usize) -> bool {
        cell == self.columns.len() || self.starts.binary_search(&cell).is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Prints the column headers, with a `|` at every word boundary.
impl fmt::Display for ColumnSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, g) in self.columns.iter().enumerate() {
            if self.is_boundary(k) {
                write!(f, "|")?;
            }
            write!(f, "{g:>4}")?;
        }
        write!(f, "|")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use presentation::parser::parse_words;

    #[test]
    fn test_schema() {
        let words = parse_words("a2, b3, 1, (ab)2").unwrap();
        let schema = ColumnSchema::new(&words);

        assert_eq!(schema.words().len(), 3);
        assert_eq!(schema.columns().len(), 9);
        assert_eq!(schema.width(), 10);
        assert_eq!(schema.word_starts(), &[0, 2, 5]);

        let boundaries: Vec<usize> = (0..schema.width())
            .filter(|&i| schema.is_boundary(i))
            .collect();
        assert_eq!(boundaries, vec![0, 2, 5, 9]);
    }

    #[test]
    fn test_empty_schema() {
        let schema = ColumnSchema::new(std::iter::empty::<&Word>());
        assert!(schema.is_empty());
        assert_eq!(schema.width(), 1);
        assert!(schema.is_boundary(0));
    }

    #[test]
    fn test_display() {
        let words = parse_words("a2, Ba").unwrap();
        assert_eq!(
            ColumnSchema::new(&words).to_string(),
            "|   a   a|   B   a|"
        );
    }
}
