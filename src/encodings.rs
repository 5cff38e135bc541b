//! # Encodings Deriving the F2 Formula
//!
//! The building blocks of the transformation: priming the dependent variables
//! ([`prime`]), duplicating the formula over the primed copy and forcing the
//! two copies to disagree ([`distinct`]). [`atomics`] holds the single-clause
//! encodings these are composed of.

use crate::types::Clause;

pub mod atomics;
pub mod distinct;
pub mod prime;

/// Trait for collecting clauses. Mainly used when generating encodings and
/// implemented by [`crate::instances::Cnf`].
pub trait CollectClauses: Extend<Clause> {
    /// Gets the number of clauses in the collection
    fn n_clauses(&self) -> usize;
}

impl CollectClauses for Vec<Clause> {
    fn n_clauses(&self) -> usize {
        self.len()
    }
}
