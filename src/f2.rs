//! # The F2 Formula
//!
//! For a formula `F(X, Y)` with projection variables `X` and dependent
//! variables `Y`, the F2 formula is
//!
//! ```text
//! F(X, Y) & F(X, Y') & (Y != Y')
//! ```
//!
//! It is satisfiable exactly if two different assignments to `Y` satisfy `F`
//! together with the same assignment to `X`. Counting its models projected
//! onto `X` counts the assignments to `X` that do not uniquely determine `Y`.
//!
//! ## Example
//!
//! ```
//! use f2cnf::{f2::{F2Formula, Options}, instances::QuantInstance};
//!
//! let data = "p cnf 3 1\na 1 0\ne 2 3 0\n1 -2 3 0\n";
//! let inst = QuantInstance::from_dimacs(std::io::Cursor::new(data)).unwrap();
//! let f2 = F2Formula::create(&inst, Options::default());
//! assert_eq!(f2.n_vars(), 7);
//! assert_eq!(f2.cnf().len(), 7);
//! ```

use std::{io, path::Path};

use itertools::Itertools;

use crate::{
    encodings::{distinct, prime::PrimeMap, CollectClauses},
    instances::{fio, BasicVarManager, Cnf, ManageVars, QuantInstance},
    types::Var,
};

pub use crate::instances::fio::dimacs::{InvalidMode, OutputMode};

/// Options for building the F2 formula
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Whether the original clauses over the unprimed variables are part of
    /// the result. If not, they have to be supplied separately to whatever
    /// consumes the result.
    pub include_original: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            include_original: true,
        }
    }
}

/// Clause and variable counts of an F2 formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct F2Stats {
    /// Original clauses included verbatim
    pub n_original: usize,
    /// Clauses copied over the primed variables
    pub n_duplicated: usize,
    /// Clauses defining the disagreement indicators, two per primed variable
    pub n_disagreement: usize,
    /// Primed variables, equal to the number of disagreement indicators
    pub n_primed: usize,
    /// Variables in neither declared set
    pub n_anomalous: usize,
    /// Variables declared in both sets
    pub n_overlapping: usize,
}

/// A derived F2 formula ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct F2Formula {
    n_vars: u32,
    support: Vec<Var>,
    cnf: Cnf,
    stats: F2Stats,
}

impl F2Formula {
    /// Derives the F2 formula of an instance. Clauses are ordered as the
    /// original clauses (if included), the duplicated clauses, the
    /// disagreement clauses and finally the disjunction of all indicators.
    ///
    /// Primed variables and indicators are numbered after the declared
    /// variables and after any projection variable beyond them.
    ///
    /// # Panics
    ///
    /// If the derived formula needs more than [`Var::MAX_IDX`] variables.
    /// Instances parsed with [`QuantInstance::from_dimacs`] are rejected
    /// before that.
    #[must_use]
    pub fn create(inst: &QuantInstance, opts: Options) -> F2Formula {
        let projection = inst.projection_set();
        let dependent = inst.dependent_set();
        let first_free = inst
            .projection()
            .iter()
            .map(|v| v.idx32() + 1)
            .fold(inst.n_vars(), u32::max);
        let mut var_manager = BasicVarManager::with_used(first_free);

        let (map, report) =
            PrimeMap::build(inst.n_vars(), &projection, &dependent, &mut var_manager);

        let mut cnf = if opts.include_original {
            inst.cnf().clone()
        } else {
            Cnf::new()
        };
        let n_original = cnf.n_clauses();
        let n_duplicated = distinct::duplicate_into(inst.cnf(), &projection, &map, &mut cnf);
        let derived_from = cnf.n_clauses();
        let indicators = distinct::encode_disagreement_into(&map, &mut var_manager, &mut cnf);

        let stats = F2Stats {
            n_original,
            n_duplicated,
            n_disagreement: cnf.n_clauses() - derived_from - 1,
            n_primed: indicators.len(),
            n_anomalous: report.anomalous.len(),
            n_overlapping: report.overlapping.len(),
        };
        log::info!(
            "F2 formula has {} vars and {} clauses ({} original, {} duplicated, {} disagreement)",
            var_manager.n_used(),
            cnf.len(),
            stats.n_original,
            stats.n_duplicated,
            stats.n_disagreement + 1
        );
        if log::log_enabled!(log::Level::Trace) {
            for cl in cnf.iter().skip(n_original) {
                log::trace!("derived clause: {} 0", cl.iter().format(" "));
            }
        }

        F2Formula {
            n_vars: var_manager.n_used(),
            support: inst.projection().to_vec(),
            cnf,
            stats,
        }
    }

    /// The number of variables of the formula, including primed variables and
    /// indicators
    #[must_use]
    pub fn n_vars(&self) -> u32 {
        self.n_vars
    }

    /// The projection variables in declaration order
    #[must_use]
    pub fn support(&self) -> &[Var] {
        &self.support
    }

    /// The clauses of the formula
    #[must_use]
    pub fn cnf(&self) -> &Cnf {
        &self.cnf
    }

    /// Statistics about the construction
    #[must_use]
    pub fn stats(&self) -> F2Stats {
        self.stats
    }

    /// Writes the formula with a support declaration in DIMACS format
    ///
    /// # Errors
    ///
    /// If writing fails, returns [`io::Error`].
    pub fn write_dimacs<W: io::Write>(
        &self,
        writer: &mut W,
        mode: OutputMode,
    ) -> Result<(), io::Error> {
        fio::dimacs::write_projected_cnf(writer, &self.cnf, self.n_vars, &self.support, mode)
    }

    /// Writes the formula to a file. With feature `compression`, the file is
    /// compressed according to its extension.
    ///
    /// # Errors
    ///
    /// If the file cannot be created or writing fails, returns [`io::Error`].
    pub fn write_dimacs_path<P: AsRef<Path>>(
        &self,
        path: P,
        mode: OutputMode,
    ) -> Result<(), io::Error> {
        let mut writer = fio::open_compressed_uncompressed_write(path)?;
        self.write_dimacs(&mut writer, mode)
    }
}
