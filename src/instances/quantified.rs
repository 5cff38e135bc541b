//! # Quantified CNF Instances
//!
//! A CNF formula with a header and two declared variable blocks: the
//! projection (universal, `a` line) variables and the dependent (existential,
//! `e` line) variables.

use std::path::Path;

use crate::types::{RsHashSet, Var};

use super::{fio, Cnf};

/// A parsed quantified CNF instance
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct QuantInstance {
    /// Number of variables declared in the `p cnf` header
    pub(crate) n_vars: u32,
    /// Number of clauses declared in the `p cnf` header
    pub(crate) n_clauses: usize,
    /// Projection variables in declaration order
    pub(crate) projection: Vec<Var>,
    /// Dependent variables in declaration order
    pub(crate) dependent: Vec<Var>,
    pub(crate) cnf: Cnf,
}

impl QuantInstance {
    /// Creates an instance from its parts. `n_vars` and `n_clauses` are the
    /// values a `p cnf` header would declare.
    #[must_use]
    pub fn new(
        n_vars: u32,
        n_clauses: usize,
        projection: Vec<Var>,
        dependent: Vec<Var>,
        cnf: Cnf,
    ) -> Self {
        Self {
            n_vars,
            n_clauses,
            projection,
            dependent,
            cnf,
        }
    }

    /// The number of variables declared in the header
    #[must_use]
    pub fn n_vars(&self) -> u32 {
        self.n_vars
    }

    /// The number of clauses declared in the header. This is not necessarily
    /// the number of clauses in [`QuantInstance::cnf`].
    #[must_use]
    pub fn n_declared_clauses(&self) -> usize {
        self.n_clauses
    }

    /// The projection variables in declaration order, including repetitions
    #[must_use]
    pub fn projection(&self) -> &[Var] {
        &self.projection
    }

    /// The dependent variables in declaration order, including repetitions
    #[must_use]
    pub fn dependent(&self) -> &[Var] {
        &self.dependent
    }

    /// The clauses of the instance
    #[must_use]
    pub fn cnf(&self) -> &Cnf {
        &self.cnf
    }

    /// The projection variables as a set
    #[must_use]
    pub fn projection_set(&self) -> RsHashSet<Var> {
        self.projection.iter().copied().collect()
    }

    /// The dependent variables as a set
    #[must_use]
    pub fn dependent_set(&self) -> RsHashSet<Var> {
        self.dependent.iter().copied().collect()
    }

    /// Parses a quantified DIMACS CNF from a reader
    ///
    /// # Errors
    ///
    /// See [`fio::dimacs::Error`].
    pub fn from_dimacs<R: std::io::BufRead>(reader: R) -> Result<Self, fio::dimacs::Error> {
        fio::dimacs::parse_qcnf(reader)
    }

    /// Parses a quantified DIMACS CNF from a file path. With feature
    /// `compression`, `.gz`, `.bz2` and `.xz` files are decompressed.
    ///
    /// # Errors
    ///
    /// If the file cannot be opened or see [`fio::dimacs::Error`].
    pub fn from_dimacs_path<P: AsRef<Path>>(path: P) -> Result<Self, fio::dimacs::Error> {
        let reader = fio::open_compressed_uncompressed_read(path)?;
        fio::dimacs::parse_qcnf(std::io::BufReader::new(reader))
    }
}
