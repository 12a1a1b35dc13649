//! A row traces the words of a [`ColumnSchema`] from a fixed key class, and is where deductions
//! happen.

use crate::class::{Class, ClassArena};
use crate::schema::ColumnSchema;
use crate::transition::{Coincidence, Transition, TransitionTable};
use presentation::Generator;

use std::fmt;

/// What a call to [`Row::scan`] found. Apart from the cells of the row itself nothing is changed
/// by a scan; the caller decides what to do with the proposed transitions and coincidences.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowScan {
    /// Number of cells filled in from known transitions.
    pub filled: usize,
    /// Transitions asserted by the row that the table does not know about in either direction.
    pub transitions: Vec<Transition>,
    /// Pairs of classes the row forces to be equal.
    pub coincidences: Vec<Coincidence>,
}

impl RowScan {
    /// Whether the scan found nothing new.
    pub fn is_quiet(&self) -> bool {
        self.filled == 0 && self.transitions.is_empty() && self.coincidences.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    key: Class,
    cells: Vec<Option<Class>>,
}

impl Row {
    /// A row where only the cells pinned to `key` are known.
    pub fn new(key: Class, schema: &ColumnSchema) -> Self {
        Self {
            key,
            cells: (0..schema.width())
                .map(|i| schema.is_boundary(i).then_some(key))
                .collect(),
        }
    }

    pub fn key(&self) -> Class {
        self.key
    }

    pub fn cells(&self) -> &[Option<Class>] {
        &self.cells
    }

    /// Number of unknown cells.
    pub fn unknown(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// The first column `k` whose left cell is known and whose right cell is not, together with
    /// the left class and the generator of the column.
    pub fn first_gap(&self, schema: &ColumnSchema) -> Option<(usize, Class, Generator)> {
        self.cells
            .windows(2)
            .zip(schema.columns())
            .enumerate()
            .find_map(|(k, (pair, &g))| match (pair[0], pair[1]) {
                (Some(x), None) => Some((k, x, g)),
                _ => None,
            })
    }

    /// Replaces every class by its representative.
    pub fn canonicalize(&mut self, classes: &ClassArena) {
        self.key = classes.find(self.key);
        for cell in self.cells.iter_mut().flatten() {
            *cell = classes.find(*cell);
        }
    }

    /// Changes the key class, which must be the representative of the current key.
    pub(crate) fn rekey(&mut self, key: Class, schema: &ColumnSchema) {
        self.key = key;
        for (i, cell) in self.cells.iter_mut().enumerate() {
            if schema.is_boundary(i) {
                *cell = Some(key);
            }
        }
    }

    /// Merges the cells of `other`, a row over the same schema whose key has coincided with ours.
    /// Cells known in only one of the rows are copied over; cells known in both with different
    /// values are returned as coincidences.
    pub fn absorb(&mut self, other: &Self, classes: &ClassArena) -> Vec<Coincidence> {
        debug_assert_eq!(self.cells.len(), other.cells.len());
        let mut coincidences = Vec::new();
        for (cell, &theirs) in self.cells.iter_mut().zip(&other.cells) {
            let theirs = theirs.map(|c| classes.find(c));
            match (cell.map(|c| classes.find(c)), theirs) {
                (Some(x), Some(y)) if x != y => coincidences.push(Coincidence::new(x, y)),
                (None, Some(y)) => *cell = Some(y),
                _ => {}
            }
        }
        coincidences
    }

    /// Tightens the row against the transition table.
    ///
    /// Cells are filled in from known transitions, first left to right and then right to left.
    /// Afterwards every pair of neighbouring known cells is compared with the table: a pair the
    /// table knows nothing about is proposed as a new transition, and a pair that disagrees with
    /// the table is reported as a coincidence.
    pub fn scan(
        &mut self,
        schema: &ColumnSchema,
        classes: &ClassArena,
        table: &TransitionTable,
    ) -> RowScan {
        self.canonicalize(classes);
        let columns = schema.columns();
        let mut result = RowScan::default();

        for (k, &g) in columns.iter().enumerate() {
            if let (Some(x), None) = (self.cells[k], self.cells[k + 1]) {
                if let Some(y) = table.get(classes, x, g) {
                    self.cells[k + 1] = Some(y);
                    result.filled += 1;
                }
            }
        }

        for (k, &g) in columns.iter().enumerate().rev() {
            if let (None, Some(y)) = (self.cells[k], self.cells[k + 1]) {
                if let Some(x) = table.get(classes, y, g.invert()) {
                    self.cells[k] = Some(x);
                    result.filled += 1;
                }
            }
        }

        for (k, &g) in columns.iter().enumerate() {
            let (Some(x), Some(y)) = (self.cells[k], self.cells[k + 1]) else {
                continue;
            };
            let forward = table.get(classes, x, g);
            let backward = table.get(classes, y, g.invert());
            if forward.is_none() && backward.is_none() {
                result.transitions.push(Transition::new(x, g, y));
                continue;
            }
            if let Some(z) = forward.filter(|&z| z != y) {
                result.coincidences.push(Coincidence::new(z, y));
            }
            if let Some(w) = backward.filter(|&w| w != x) {
                result.coincidences.push(Coincidence::new(w, x));
            }
        }

        result
    }
}

/// Unknown cells are printed as `_`.
impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            match cell {
                Some(c) => write!(f, "{c:>4}")?,
                None => write!(f, "{:>4}", "_")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use presentation::parser::parse_words;

    fn schema(s: &str) -> ColumnSchema {
        ColumnSchema::new(&parse_words(s).unwrap())
    }

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
    fn test_new() {
        let schema = schema("a3, ab");
        let row = Row::new(Class::BASE, &schema);
        assert_eq!(row.to_string(), "   1   _   _   1   _   1");
        assert_eq!(row.unknown(), 3);
        assert_eq!(row.first_gap(&schema), Some((0, Class::BASE, gen('a'))));
    }

    #[test]
    fn test_scan_fills_and_proposes() {
        // 1 -a-> 2 -a-> 3 is known; the relator a3 then says 3 -a-> 1.
        let schema = schema("a3");
        let (arena, c) = arena(3);
        let mut table = TransitionTable::new();
        table.insert(&arena, Transition::new(c[0], gen('a'), c[1]));
        table.insert(&arena, Transition::new(c[1], gen('a'), c[2]));

        let mut row = Row::new(c[0], &schema);
        let scan = row.scan(&schema, &arena, &table);
        assert_eq!(scan.filled, 2);
        assert!(scan.coincidences.is_empty());
        assert_eq!(scan.transitions, vec![Transition::new(c[2], gen('a'), c[0])]);
        assert!(row.is_complete());
        assert_eq!(row.first_gap(&schema), None);
    }

    #[test]
    fn test_scan_backwards() {
        // Only 2 -a-> 1 is known, so the row of 1 for a2 can be filled from the right.
        let schema = schema("a2");
        let (arena, c) = arena(2);
        let mut table = TransitionTable::new();
        table.insert(&arena, Transition::new(c[1], gen('a'), c[0]));

        let mut row = Row::new(c[0], &schema);
        let scan = row.scan(&schema, &arena, &table);
        assert_eq!(scan.filled, 1);
        assert_eq!(row.cells(), &[Some(c[0]), Some(c[1]), Some(c[0])]);
        assert_eq!(scan.transitions, vec![Transition::new(c[0], gen('a'), c[1])]);
    }

    #[test]
    fn test_scan_coincidence() {
        // With 1 -a-> 2 and 2 -a-> 3 the relator a2 forces 3 = 1.
        let schema = schema("a2");
        let (arena, c) = arena(3);
        let mut table = TransitionTable::new();
        table.insert(&arena, Transition::new(c[0], gen('a'), c[1]));
        table.insert(&arena, Transition::new(c[1], gen('a'), c[2]));

        let mut row = Row::new(c[0], &schema);
        let scan = row.scan(&schema, &arena, &table);
        assert_eq!(scan.coincidences, vec![Coincidence::new(c[0], c[2])]);
        assert!(scan.transitions.is_empty());
    }

    #[test]
    fn test_absorb() {
        let schema = schema("ab");
        let (mut arena, c) = arena(4);
        let mut row = Row::new(c[0], &schema);
        let mut other = Row::new(c[1], &schema);
        row.cells[1] = Some(c[2]);
        other.cells[1] = Some(c[3]);

        arena.union(c[0], c[1]);
        other.canonicalize(&arena);
        assert_eq!(
            row.absorb(&other, &arena),
            vec![Coincidence::new(c[2], c[3])]
        );

        let mut other = Row::new(c[0], &schema);
        let mut row = Row::new(c[0], &schema);
        other.cells[1] = Some(c[3]);
        assert!(row.absorb(&other, &arena).is_empty());
        assert_eq!(row.cells()[1], Some(c[3]));
    }

    #[test]
    fn test_rekey() {
        let schema = schema("a, b");
        let (_, c) = arena(2);
        let mut row = Row::new(c[1], &schema);
        row.rekey(c[0], &schema);
        assert_eq!(row, Row::new(c[0], &schema));
    }
}
