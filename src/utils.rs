use crate::limits::Limits;
use crate::todd_coxeter::ToddCoxeter;
use presentation::Presentation;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

/// Installs a `tracing` subscriber writing to stderr. The filter is read from `RUST_LOG` and
/// defaults to `coset=info`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("coset=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Parses a presentation and sets up an enumeration of it. Limits not set in `limits` are read
/// from the environment (see [`Limits::from_env`]).
pub fn construct(
    generators: &str,
    relators: &str,
    subgroup: &str,
    limits: Limits,
) -> anyhow::Result<ToddCoxeter> {
    let presentation = Presentation::parse(generators, relators, subgroup)?;
    let env = Limits::from_env().context("Failed to read limits from the environment")?;
    tracing::debug!(%presentation, "Parsed presentation");
    Ok(ToddCoxeter::new(&presentation).with_limits(limits.or(env)))
}
