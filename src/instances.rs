//! # Instance Representations
//!
//! Types representing CNF formulas and quantified CNF instances, together with
//! the variable manager that hands out fresh variables when new formulas are
//! built from existing ones.

use crate::{types::Var, var};

mod sat;
pub use sat::Cnf;

mod quantified;
pub use quantified::QuantInstance;

pub mod fio;

/// Trait for variable managers keeping track of used variables
pub trait ManageVars {
    /// Uses up the next free variable
    fn new_var(&mut self) -> Var;
    /// Gets the number of used variables. Typically this is just the index of
    /// the next free variable.
    fn n_used(&self) -> u32;
}

/// Simple counting variable manager. Variables are handed out strictly in
/// increasing order, so the manager is also the running count of all
/// variables of the formula being built.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct BasicVarManager {
    next_var: Var,
}

impl BasicVarManager {
    /// Creates a variable manager for a formula that already uses the
    /// variables with DIMACS indices `1..=n_vars`
    #[must_use]
    pub fn with_used(n_vars: u32) -> BasicVarManager {
        BasicVarManager {
            next_var: var![n_vars],
        }
    }
}

impl ManageVars for BasicVarManager {
    /// # Panics
    ///
    /// If the next variable would exceed [`Var::MAX_IDX`]. Parsed instances
    /// are checked to leave room for all primed and indicator variables.
    fn new_var(&mut self) -> Var {
        let v = self.next_var;
        self.next_var = var![v.idx32() + 1];
        v
    }

    fn n_used(&self) -> u32 {
        self.next_var.idx32()
    }
}
