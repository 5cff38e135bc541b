//! # f2cnf - Two-Witness Formulas for Quantified CNF
//!
//! `f2cnf` reads a CNF formula in DIMACS format whose variables are split into
//! projection (`a` line) and dependent (`e` line) variables, and builds the
//! formula `F(X, Y) & F(X, Y') & (Y != Y')`. A model of this formula is a pair
//! of distinct dependent assignments that satisfy the original formula under
//! the same projection assignment, so it is unsatisfiable exactly when every
//! projection assignment has at most one witness.
//!
//! The pipeline has four stages:
//!
//! 1. [`instances::fio::dimacs`] parses the input into a [`instances::QuantInstance`],
//! 2. [`encodings::prime`] maps every dependent variable to a fresh primed copy,
//! 3. [`encodings::distinct`] duplicates the clauses over the primed copies and
//!    encodes that the copies disagree,
//! 4. [`f2::F2Formula::write_dimacs`] writes the result with a support
//!    declaration for projected model counters.
//!
//! ## Features
//!
//! | Feature name | Description |
//! | --- | --- |
//! | `fxhash` | Use the faster firefox hash function from `rustc-hash`. |
//! | `compression` | Enable parsing and writing compressed input. |
//! | `serde` | Derive `serde` serialization for the core types. |

#![warn(missing_docs)]

pub mod encodings;
pub mod f2;
pub mod instances;
pub mod types;
