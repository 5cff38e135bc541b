//! # "Atomic"/"Trivial" Encodings

use crate::types::{Clause, Lit};

/// Implication of form `a -> (b1 | b2 | ... | bm)`
#[must_use]
pub fn lit_impl_clause(a: Lit, b: &[Lit]) -> Clause {
    let mut cl = Clause::from(b);
    cl.add(!a);
    cl
}

/// The disjunction `b1 | b2 | ... | bm`. Without literals, this is the empty
/// (unsatisfiable) clause.
#[must_use]
pub fn at_least_one(b: &[Lit]) -> Clause {
    Clause::from(b)
}
