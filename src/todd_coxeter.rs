use crate::coset_table::CosetTable;
use crate::enumeration::Enumeration;
use crate::error::EnumerationError;
use crate::limits::Limits;
use presentation::Presentation;

use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Running,
    Complete,
}

/// Runs an [`Enumeration`] to completion, alternating closure with definitions.
#[derive(Clone, Debug)]
pub struct ToddCoxeter {
    enumeration: Enumeration,
    state: State,
    limits: Limits,
}

impl ToddCoxeter {
    pub fn new(presentation: &Presentation) -> Self {
        Self {
            enumeration: Enumeration::new(presentation),
            state: State::Running,
            limits: Limits::unlimited(),
        }
    }

    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn enumeration(&self) -> &Enumeration {
        &self.enumeration
    }

    /// Closes the table and defines one new class. Does nothing once the enumeration is complete.
    pub fn step(&mut self) -> State {
        if self.state == State::Complete {
            return self.state;
        }
        self.enumeration.close();
        if self.enumeration.define().is_none() {
            debug_assert!(self.enumeration.is_complete());
            self.state = State::Complete;
        }
        self.state
    }

    /// Steps until the enumeration is complete or a limit is reached.
    pub fn run(&mut self) -> Result<CosetTable, EnumerationError> {
        self.run_until(|| false)
    }

    /// Like [`ToddCoxeter::run`], but also stops with [`EnumerationError::Cancelled`] as soon as
    /// `cancel` returns true. `cancel` is called once before every step.
    #[tracing::instrument(skip_all, fields(index))]
    pub fn run_until(
        &mut self,
        mut cancel: impl FnMut() -> bool,
    ) -> Result<CosetTable, EnumerationError> {
        let start = Instant::now();
        while self.state == State::Running {
            if cancel() {
                return Err(EnumerationError::Cancelled {
                    statistics: self.enumeration.statistics(),
                });
            }
            self.limits.check(
                self.enumeration.statistics(),
                self.enumeration.classes().allocated(),
                start.elapsed(),
            )?;
            self.step();
            tracing::trace!("{}", self.enumeration);
        }

        let table = CosetTable::new(&self.enumeration);
        tracing::Span::current().record("index", table.index());
        let statistics = self.enumeration.statistics();
        tracing::info!(
            definitions = statistics.definitions,
            coincidences = statistics.coincidences,
            max_live = statistics.max_live,
            time = ?start.elapsed(),
            "Enumeration complete"
        );
        Ok(table)
    }

    /// The coset table, if the enumeration is complete.
    pub fn coset_table(&self) -> Option<CosetTable> {
        (self.state == State::Complete).then(|| CosetTable::new(&self.enumeration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver(generators: &str, relators: &str, subgroup: &str) -> ToddCoxeter {
        ToddCoxeter::new(&Presentation::parse(generators, relators, subgroup).unwrap())
    }

    #[test]
    fn test_step() {
        let mut tc = driver("a", "a3", "");
        assert_eq!(tc.coset_table(), None);
        assert_eq!(tc.step(), State::Running);
        assert_eq!(tc.step(), State::Running);
        assert_eq!(tc.step(), State::Complete);
        assert_eq!(tc.enumeration().statistics().definitions, 2);

        assert_eq!(tc.step(), State::Complete);
        assert_eq!(tc.enumeration().statistics().definitions, 2);
        assert_eq!(tc.coset_table().unwrap().index(), 3);
    }

    #[test]
    fn test_run_after_complete() {
        let mut tc = driver("a, b", "a2, b2, (ab)3", "");
        let first = tc.run().unwrap();
        let second = tc.run().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.index(), 6);
    }

    #[test]
    fn test_cancel() {
        let mut tc = driver("a, b", "", "");
        let mut calls = 0;
        let result = tc.run_until(|| {
            calls += 1;
            calls > 3
        });
        match result {
            Err(EnumerationError::Cancelled { statistics }) => {
                assert_eq!(statistics.definitions, 3)
            }
            other => panic!("expected cancellation, got {other:?}"),
        }
        assert_eq!(tc.state(), State::Running);
    }

    #[test]
    fn test_class_limit() {
        let mut tc = driver("a", "", "").with_limits(Limits::unlimited().max_classes(10));
        assert!(matches!(
            tc.run(),
            Err(EnumerationError::ClassLimit { limit: 10, .. })
        ));
        assert_eq!(tc.enumeration().classes().allocated(), 10);
    }
}
