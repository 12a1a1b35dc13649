//! The two families of rows: a single row tracing the subgroup generators from the base class,
//! and one row per class tracing every relator.

use crate::class::{Class, ClassArena};
use crate::row::{Row, RowScan};
use crate::schema::ColumnSchema;
use crate::transition::{Coincidence, TransitionTable};
use presentation::Generator;

use std::collections::BTreeMap;

/// The row of the base class over the subgroup generators. The base class is never retired, so
/// the key of this row never changes.
#[derive(Clone, Debug)]
pub struct SubgroupRows {
    schema: ColumnSchema,
    row: Row,
}

impl SubgroupRows {
    pub fn new(schema: ColumnSchema) -> Self {
        let row = Row::new(Class::BASE, &schema);
        Self { schema, row }
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    pub fn row(&self) -> &Row {
        &self.row
    }

    pub fn scan(&mut self, classes: &ClassArena, table: &TransitionTable) -> RowScan {
        self.row.scan(&self.schema, classes, table)
    }

    pub fn unknown(&self) -> usize {
        self.row.unknown()
    }

    pub fn first_gap(&self) -> Option<(usize, Class, Generator)> {
        self.row.first_gap(&self.schema)
    }
}

/// One row over the relators for every class seen so far, keyed by the class.
#[derive(Clone, Debug)]
pub struct RelatorRows {
    schema: ColumnSchema,
    rows: BTreeMap<Class, Row>,
}

impl RelatorRows {
    pub fn new(schema: ColumnSchema) -> Self {
        Self {
            schema,
            rows: BTreeMap::new(),
        }
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, class: Class) -> Option<&Row> {
        self.rows.get(&class)
    }

    pub fn keys(&self) -> Vec<Class> {
        self.rows.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row> + '_ {
        self.rows.values()
    }

    /// Creates the rows of live classes that do not have one yet. Returns the number of rows
    /// created.
    pub fn materialize(&mut self, classes: &ClassArena) -> usize {
        let mut created = 0;
        for class in classes.iter_live() {
            if !self.rows.contains_key(&class) {
                self.rows.insert(class, Row::new(class, &self.schema));
                created += 1;
            }
        }
        created
    }

    /// Scans the row of `class`, if it has one.
    pub fn scan(
        &mut self,
        class: Class,
        classes: &ClassArena,
        table: &TransitionTable,
    ) -> Option<RowScan> {
        let schema = &self.schema;
        self.rows
            .get_mut(&class)
            .map(|row| row.scan(schema, classes, table))
    }

    /// Moves the row of `retired`, which has just been merged into `kept`, onto `kept`. If `kept`
    /// already has a row the two are merged cell by cell.
    pub fn retire(&mut self, classes: &ClassArena, kept: Class, retired: Class) -> Vec<Coincidence> {
        let Some(mut row) = self.rows.remove(&retired) else {
            return Vec::new();
        };
        row.canonicalize(classes);
        match self.rows.get_mut(&kept) {
            Some(existing) => existing.absorb(&row, classes),
            None => {
                row.rekey(kept, &self.schema);
                self.rows.insert(kept, row);
                Vec::new()
            }
        }
    }

    pub fn unknown(&self) -> usize {
        self.rows.values().map(Row::unknown).sum()
    }

    /// The first gap of the first incomplete row, by increasing key class.
    pub fn first_gap(&self) -> Option<(Class, usize, Class, Generator)> {
        self.rows.iter().find_map(|(&key, row)| {
            row.first_gap(&self.schema)
                .map(|(column, class, generator)| (key, column, class, generator))
        })
    }
}
