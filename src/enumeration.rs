//! The state of a coset enumeration: the transition table, the two families of rows and the
//! pending coincidences, together with the closure, coincidence and definition procedures that
//! keep them consistent with each other.

use crate::class::{Class, ClassArena};
use crate::row_set::{RelatorRows, SubgroupRows};
use crate::row::RowScan;
use crate::schema::ColumnSchema;
use crate::transition::{Coincidence, Insertion, Transition, TransitionTable};
use presentation::{Generator, Presentation};

use itertools::Itertools;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

/// Counters describing the work done so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// Number of classes defined by the definition step.
    pub definitions: usize,
    /// Number of pairs of classes merged.
    pub coincidences: usize,
    /// Number of passes over all rows.
    pub passes: usize,
    /// Largest number of live classes at any one time.
    pub max_live: usize,
}

#[derive(Clone, Debug)]
pub struct Enumeration {
    alphabet: Vec<Generator>,
    classes: ClassArena,
    transitions: TransitionTable,
    subgroup: SubgroupRows,
    relators: RelatorRows,
    pending: VecDeque<Coincidence>,
    statistics: Statistics,
}

impl Enumeration {
    /// The initial state, in which only the base class is known.
    pub fn new(presentation: &Presentation) -> Self {
        Self {
            alphabet: presentation.alphabet(),
            classes: ClassArena::new(),
            transitions: TransitionTable::new(),
            subgroup: SubgroupRows::new(ColumnSchema::new(presentation.subgroup())),
            relators: RelatorRows::new(ColumnSchema::new(presentation.relators())),
            pending: VecDeque::new(),
            statistics: Statistics {
                max_live: 1,
                ..Statistics::default()
            },
        }
    }

    /// The generators and their inverses, in the order `a, A, b, B, ...`.
    pub fn alphabet(&self) -> &[Generator] {
        &self.alphabet
    }

    pub fn classes(&self) -> &ClassArena {
        &self.classes
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    pub fn subgroup_rows(&self) -> &SubgroupRows {
        &self.subgroup
    }

    pub fn relator_rows(&self) -> &RelatorRows {
        &self.relators
    }

    pub fn statistics(&self) -> Statistics {
        self.statistics
    }

    /// The image of `class` under `generator`, if known.
    pub fn image(&self, class: Class, generator: Generator) -> Option<Class> {
        self.transitions.get(&self.classes, class, generator)
    }

    /// Total number of unknown cells over all rows.
    pub fn unknown_cells(&self) -> usize {
        self.subgroup.unknown() + self.relators.unknown()
    }

    /// Propagates everything that can be deduced without defining new classes.
    ///
    /// Every row is scanned in turn, its proposed transitions are committed and the coincidences
    /// it finds are resolved before the next row is scanned. This is repeated until a whole pass
    /// changes nothing.
    pub fn close(&mut self) {
        let mut last_unknown = None;
        loop {
            self.statistics.passes += 1;
            self.relators.materialize(&self.classes);

            let scan = self.subgroup.scan(&self.classes, &self.transitions);
            let mut progress = self.commit(scan);

            for key in self.relators.keys() {
                if !self.classes.is_live(key) {
                    continue;
                }
                if let Some(scan) = self.relators.scan(key, &self.classes, &self.transitions) {
                    progress |= self.commit(scan);
                }
            }

            let unknown = self.unknown_cells();
            if !progress && last_unknown == Some(unknown) {
                break;
            }
            last_unknown = Some(unknown);
        }
        debug_assert!(self.pending.is_empty());
        debug_assert!(self.transitions.is_inverse_consistent(&self.classes));
    }

    /// Records the findings of a row scan and resolves the resulting coincidences. Returns whether
    /// anything changed.
    fn commit(&mut self, scan: RowScan) -> bool {
        let mut progress = scan.filled > 0;
        self.pending.extend(scan.coincidences);
        for transition in scan.transitions {
            match self.transitions.insert(&self.classes, transition) {
                Insertion::New => progress = true,
                Insertion::Known => {}
                Insertion::Coincidence(c) => self.pending.push_back(c),
            }
        }
        progress | (self.resolve_coincidences() > 0)
    }

    /// Merges pending coincidences, and every coincidence they imply, until none are left.
    /// Returns the number of merges.
    pub fn resolve_coincidences(&mut self) -> usize {
        let mut merges = 0;
        while let Some(coincidence) = self.pending.pop_front() {
            let Some((kept, retired)) = self.classes.union(coincidence.keep, coincidence.retire)
            else {
                continue;
            };
            merges += 1;
            tracing::debug!(%kept, %retired, "coincidence");

            let from_table = self
                .transitions
                .retarget(&self.classes, &self.alphabet, kept, retired);
            self.pending.extend(from_table);
            let from_rows = self.relators.retire(&self.classes, kept, retired);
            self.pending.extend(from_rows);
        }
        if merges > 0 {
            self.classes.compress();
            self.statistics.coincidences += merges;
        }
        merges
    }

    /// Whether every row is complete, the table is complete and nothing is pending. Only
    /// meaningful after [`Enumeration::close`].
    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
            && self.relators.len() == self.classes.live()
            && self.next_definition().is_none()
    }

    /// Where the next class would be defined: the first gap of the subgroup row, then of the
    /// relator rows by increasing class, then the first missing transition of the table.
    fn next_definition(&self) -> Option<(Class, Generator)> {
        if let Some((_, class, generator)) = self.subgroup.first_gap() {
            return Some((class, generator));
        }
        if let Some((_, _, class, generator)) = self.relators.first_gap() {
            return Some((class, generator));
        }
        self.transitions
            .first_gap(&self.classes, &self.alphabet)
            .map(|key| (key.class, key.generator))
    }

    /// Defines a new class at the first gap. Returns the new transition, or `None` if there is no
    /// gap left, in which case the enumeration is complete. This must only be called on a closed
    /// table.
    pub fn define(&mut self) -> Option<Transition> {
        let (class, generator) = self.next_definition()?;
        assert!(
            !self.transitions.contains(&self.classes, class, generator),
            "defining the known transition {class} -{generator}->"
        );

        let fresh = self.classes.fresh();
        let transition = Transition::new(class, generator, fresh);
        let insertion = self.transitions.insert(&self.classes, transition);
        assert_eq!(insertion, Insertion::New);

        self.statistics.definitions += 1;
        self.statistics.max_live = self.statistics.max_live.max(self.classes.live());
        Some(transition)
    }
}

/// A dump of the transition table and of every row, for tracing.
impl fmt::Display for Enumeration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} live classes, {} allocated",
            self.classes.live(),
            self.classes.allocated()
        )?;

        writeln!(f, "transitions:")?;
        writeln!(
            f,
            "    {}",
            self.alphabet
                .iter()
                .format_with("", |g, cb| cb(&format_args!("{g:>4}")))
        )?;
        for class in self.classes.iter_live() {
            write!(f, "{class:>4}")?;
            for &g in &self.alphabet {
                match self.image(class, g) {
                    Some(c) => write!(f, "{c:>4}")?,
                    None => write!(f, "{:>4}", "_")?,
                }
            }
            writeln!(f)?;
        }

        if !self.subgroup.schema().is_empty() {
            writeln!(f, "subgroup:")?;
            writeln!(f, "    {}", self.subgroup.schema())?;
            writeln!(f, "    {}", self.subgroup.row())?;
        }

        if !self.relators.schema().is_empty() {
            writeln!(f, "relators:")?;
            writeln!(f, "    {}", self.relators.schema())?;
            write!(
                f,
                "{}",
                self.relators
                    .iter()
                    .format_with("", |row, cb| cb(&format_args!("    {row}\n")))
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enumeration(generators: &str, relators: &str, subgroup: &str) -> Enumeration {
        Enumeration::new(&Presentation::parse(generators, relators, subgroup).unwrap())
    }

    fn run(e: &mut Enumeration) {
        loop {
            e.close();
            if e.define().is_none() {
                break;
            }
        }
    }

    #[test]
    fn test_initial_state() {
        let mut e = enumeration("a, b", "a2, b2, (ab)2", "");
        assert_eq!(e.classes().live(), 1);
        assert_eq!(e.relator_rows().len(), 0);
        assert_eq!(e.unknown_cells(), 0);

        e.close();
        assert_eq!(e.relator_rows().len(), 1);
        assert_eq!(e.unknown_cells(), 5);
        assert!(e.transitions().is_empty());
        assert!(!e.is_complete());
    }

    #[test]
    fn test_define() {
        let mut e = enumeration("a", "a3", "");
        e.close();
        let t = e.define().unwrap();
        let a = Generator::new('a').unwrap();
        assert_eq!(t, Transition::new(Class::BASE, a, Class::BASE.next()));
        assert_eq!(e.statistics().definitions, 1);
        assert_eq!(e.image(t.to, t.generator.invert()), Some(Class::BASE));
    }

    #[test]
    fn test_cyclic() {
        let mut e = enumeration("a", "a5", "");
        run(&mut e);
        assert!(e.is_complete());
        assert_eq!(e.classes().live(), 5);
        assert_eq!(e.statistics().coincidences, 0);
        assert!(e.transitions().is_inverse_consistent(e.classes()));
    }

    #[test]
    fn test_coincidences() {
        // a is trivial in this group, so defining 1 -a-> 2 must lead to a coincidence.
        let mut e = enumeration("a, b", "a3, a2 = b2, b", "");
        run(&mut e);
        assert!(e.is_complete());
        assert_eq!(e.classes().live(), 1);
        assert!(e.statistics().coincidences > 0);
        let a = Generator::new('a').unwrap();
        assert_eq!(e.image(Class::BASE, a), Some(Class::BASE));
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut e = enumeration("a, b", "a4, b2, (ab)2", "");
        run(&mut e);
        let before = e.transitions().transitions(e.classes());
        let unknown = e.unknown_cells();

        e.close();
        assert_eq!(e.transitions().transitions(e.classes()), before);
        assert_eq!(e.unknown_cells(), unknown);
        assert_eq!(e.define(), None);
    }

    #[test]
    fn test_trace() {
        let mut e = enumeration("a", "a2", "a");
        run(&mut e);
        let expected = "\
1 live classes, 1 allocated
transitions:
       a   A
   1   1   1
subgroup:
    |   a|
       1   1
relators:
    |   a   a|
       1   1   1
";
        assert_eq!(e.to_string(), expected);
    }
}
