//! Todd–Coxeter coset enumeration.
//!
//! Given a finite presentation `⟨ X | R ⟩` of a group `G` and words generating a subgroup `H`,
//! this crate computes the action of `G` on the right cosets of `H`, provided `H` has finite
//! index. With no subgroup words this is the regular representation of `G`, and the number of
//! cosets is the order of `G`.
//!
//! The entry point is [`ToddCoxeter`]:
//! ```
//! use coset::{Limits, ToddCoxeter};
//! use presentation::Presentation;
//!
//! let p = Presentation::parse("a, b", "a2, b3, (ab)3", "").unwrap();
//! let table = ToddCoxeter::new(&p)
//!     .with_limits(Limits::unlimited().max_definitions(10_000))
//!     .run()
//!     .unwrap();
//! assert_eq!(table.index(), 12);
//! ```
//!
//! The enumeration itself works with
//!  - a [`ClassArena`](class::ClassArena), a union–find structure over class identifiers;
//!  - a [`TransitionTable`](transition::TransitionTable) recording the partial action of the
//!    generators;
//!  - rows (see [`row`]) tracing the relators from every class and the subgroup generators from
//!    the base class.
//!
//! Rows are scanned against the table until nothing more can be deduced, after which a new class
//! is defined at the first unknown entry. Contradictions between rows and the table are
//! coincidences, which merge classes.
//!
//! Coset enumeration need not terminate, so [`Limits`] should be set for untrusted input.

#![allow(clippy::new_without_default)]
#![warn(clippy::default_trait_access)]
#![warn(clippy::if_not_else)]
#![warn(clippy::use_self)]

pub mod class;
pub mod coset_table;
pub mod enumeration;
pub mod error;
pub mod limits;
pub mod row;
pub mod row_set;
pub mod schema;
pub mod todd_coxeter;
pub mod transition;
pub mod utils;

pub use class::Class;
pub use coset_table::CosetTable;
pub use enumeration::{Enumeration, Statistics};
pub use error::EnumerationError;
pub use limits::Limits;
pub use todd_coxeter::{State, ToddCoxeter};
