use crate::enumeration::Statistics;

use std::time::Duration;

/// Why an enumeration stopped before completing. Every variant carries the statistics at the
/// time it stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnumerationError {
    /// More classes were defined than allowed.
    DefinitionLimit { limit: usize, statistics: Statistics },
    /// More class identifiers were allocated than allowed.
    ClassLimit { limit: usize, statistics: Statistics },
    Timeout {
        limit: Duration,
        statistics: Statistics,
    },
    /// The caller asked the enumeration to stop.
    Cancelled { statistics: Statistics },
}

impl EnumerationError {
    pub fn statistics(&self) -> Statistics {
        match self {
            Self::DefinitionLimit { statistics, .. }
            | Self::ClassLimit { statistics, .. }
            | Self::Timeout { statistics, .. }
            | Self::Cancelled { statistics } => *statistics,
        }
    }
}

impl std::fmt::Display for EnumerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DefinitionLimit { limit, statistics } => write!(
                f,
                "Enumeration did not complete within {limit} definitions ({} live classes)",
                statistics.max_live
            ),
            Self::ClassLimit { limit, statistics } => write!(
                f,
                "Enumeration needed more than {limit} classes (after {} definitions)",
                statistics.definitions
            ),
            Self::Timeout { limit, statistics } => write!(
                f,
                "Enumeration did not complete within {limit:?} (after {} definitions)",
                statistics.definitions
            ),
            Self::Cancelled { statistics } => write!(
                f,
                "Enumeration cancelled after {} definitions",
                statistics.definitions
            ),
        }
    }
}

impl std::error::Error for EnumerationError {}
