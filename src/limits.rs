//! Budgets for an enumeration. Coset enumeration need not terminate, and there is no bound on the
//! number of classes it needs in terms of the final index, so anything driven by user input
//! should set at least one of these.

use crate::enumeration::Statistics;
use crate::error::EnumerationError;

use anyhow::Context;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_definitions: Option<usize>,
    /// Bounds the number of class identifiers ever allocated, live or not.
    pub max_classes: Option<usize>,
    pub timeout: Option<Duration>,
}

impl Limits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn max_definitions(mut self, limit: usize) -> Self {
        self.max_definitions = Some(limit);
        self
    }

    #[must_use]
    pub fn max_classes(mut self, limit: usize) -> Self {
        self.max_classes = Some(limit);
        self
    }

    #[must_use]
    pub fn timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    /// Reads `COSET_MAX_DEFINITIONS`, `COSET_MAX_CLASSES` and `COSET_TIMEOUT` (in seconds). Unset
    /// variables impose no limit.
    pub fn from_env() -> anyhow::Result<Self> {
        fn var<T>(name: &str) -> anyhow::Result<Option<T>>
        where
            T: std::str::FromStr,
            T::Err: std::error::Error + Send + Sync + 'static,
        {
            match std::env::var(name) {
                Ok(s) => Ok(Some(
                    s.trim()
                        .parse()
                        .with_context(|| format!("Invalid value of {name}: {s:?}"))?,
                )),
                Err(std::env::VarError::NotPresent) => Ok(None),
                Err(e) => Err(e).with_context(|| format!("Invalid value of {name}")),
            }
        }

        Ok(Self {
            max_definitions: var("COSET_MAX_DEFINITIONS")?,
            max_classes: var("COSET_MAX_CLASSES")?,
            timeout: var::<f64>("COSET_TIMEOUT")?
                .map(Duration::try_from_secs_f64)
                .transpose()
                .context("Invalid value of COSET_TIMEOUT")?,
        })
    }

    /// Fills in the limits that are unset here from `other`.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self {
            max_definitions: self.max_definitions.or(other.max_definitions),
            max_classes: self.max_classes.or(other.max_classes),
            timeout: self.timeout.or(other.timeout),
        }
    }

    pub(crate) fn check(
        &self,
        statistics: Statistics,
        allocated: usize,
        elapsed: Duration,
    ) -> Result<(), EnumerationError> {
        if let Some(limit) = self.max_definitions {
            if statistics.definitions >= limit {
                return Err(EnumerationError::DefinitionLimit { limit, statistics });
            }
        }
        if let Some(limit) = self.max_classes {
            if allocated >= limit {
                return Err(EnumerationError::ClassLimit { limit, statistics });
            }
        }
        if let Some(limit) = self.timeout {
            if elapsed >= limit {
                return Err(EnumerationError::Timeout { limit, statistics });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check() {
        let limits = Limits::unlimited().max_definitions(5).max_classes(8);
        let mut statistics = Statistics::default();
        assert!(limits.check(statistics, 7, Duration::ZERO).is_ok());

        assert!(matches!(
            limits.check(statistics, 8, Duration::ZERO),
            Err(EnumerationError::ClassLimit { limit: 8, .. })
        ));

        statistics.definitions = 5;
        assert!(matches!(
            limits.check(statistics, 6, Duration::ZERO),
            Err(EnumerationError::DefinitionLimit { limit: 5, .. })
        ));
    }

    #[test]
    fn test_timeout() {
        let limits = Limits::unlimited().timeout(Duration::from_millis(10));
        let statistics = Statistics::default();
        assert!(limits.check(statistics, 1, Duration::from_millis(9)).is_ok());
        assert!(matches!(
            limits.check(statistics, 1, Duration::from_millis(10)),
            Err(EnumerationError::Timeout { .. })
        ));
        assert!(Limits::unlimited()
            .check(statistics, usize::MAX, Duration::MAX)
            .is_ok());
    }

    #[test]
    fn test_or() {
        let a = Limits::unlimited().max_definitions(1);
        let b = Limits::unlimited().max_definitions(2).max_classes(3);
        assert_eq!(
            a.or(b),
            Limits::unlimited().max_definitions(1).max_classes(3)
        );
    }
}
