//! # Priming the Dependent Variables
//!
//! Maps every declared variable to its copy in the second half of the F2
//! formula. Projection variables are shared between both halves and map to
//! themselves, dependent variables get a fresh primed variable.

use itertools::Itertools;

use crate::{
    instances::ManageVars,
    types::{Lit, RsHashSet, Var},
    var,
};

/// Total mapping from the declared variables `[1, N]` to their primed copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeMap {
    /// Indexed by the zero-based original variable index
    mapping: Vec<Var>,
}

/// Irregular declarations found while building a [`PrimeMap`]. Neither stops
/// the transformation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrimeReport {
    /// Variables in neither declared set, mapped to themselves
    pub anomalous: Vec<Var>,
    /// Variables declared in both sets, treated as projection variables
    pub overlapping: Vec<Var>,
}

impl PrimeMap {
    /// Builds the mapping by iterating over the variables in increasing order.
    /// Every dependent variable allocates its primed copy from `var_manager`,
    /// so the primed copies are numbered in the order of their originals.
    pub fn build<VM: ManageVars>(
        n_vars: u32,
        projection: &RsHashSet<Var>,
        dependent: &RsHashSet<Var>,
        var_manager: &mut VM,
    ) -> (PrimeMap, PrimeReport) {
        let mut report = PrimeReport::default();
        let mut mapping = Vec::with_capacity(n_vars as usize);
        for var in (0..n_vars).map(|idx| var![idx]) {
            if projection.contains(&var) {
                if dependent.contains(&var) {
                    report.overlapping.push(var);
                }
                mapping.push(var);
            } else if dependent.contains(&var) {
                mapping.push(var_manager.new_var());
            } else {
                report.anomalous.push(var);
                mapping.push(var);
            }
        }
        if !report.overlapping.is_empty() {
            log::warn!(
                "{} variables declared as projection and dependent, treated as projection: {}",
                report.overlapping.len(),
                report.overlapping.iter().format(" ")
            );
        }
        if !report.anomalous.is_empty() {
            log::warn!(
                "{} variables are neither projection nor dependent: {}",
                report.anomalous.len(),
                report.anomalous.iter().format(" ")
            );
        }
        (PrimeMap { mapping }, report)
    }

    /// Maps a variable to its primed copy. Variables outside of the original
    /// range map to themselves.
    #[must_use]
    pub fn map_var(&self, var: Var) -> Var {
        self.mapping.get(var.idx()).copied().unwrap_or(var)
    }

    /// Maps a literal to the literal of the same polarity over the primed
    /// variable
    #[must_use]
    pub fn map_lit(&self, lit: Lit) -> Lit {
        self.map_var(lit.var()).lit(lit.is_neg())
    }

    /// Checks whether a variable has a primed copy different from itself
    #[must_use]
    pub fn is_primed(&self, var: Var) -> bool {
        self.map_var(var) != var
    }

    /// Gets the number of primed variables
    #[must_use]
    pub fn n_primed(&self) -> usize {
        self.primed_pairs().count()
    }

    /// Iterates over the pairs of an original variable and its primed copy, in
    /// increasing order of the original variable. Variables that map to
    /// themselves are skipped.
    pub fn primed_pairs(&self) -> impl Iterator<Item = (Var, Var)> + '_ {
        self.mapping
            .iter()
            .enumerate()
            .map(|(idx, &primed)| (var![idx as u32], primed))
            .filter(|(var, primed)| var != primed)
    }
}

#[cfg(test)]
mod tests {
    use super::PrimeMap;
    use crate::{
        instances::{BasicVarManager, ManageVars},
        ipasir_lit, lit,
        types::{RsHashSet, Var},
        var,
    };

    fn set(vars: &[Var]) -> RsHashSet<Var> {
        vars.iter().copied().collect()
    }

    #[test]
    fn primes_dependent() {
        let mut vm = BasicVarManager::with_used(3);
        let (map, report) =
            PrimeMap::build(3, &set(&[var![0]]), &set(&[var![1], var![2]]), &mut vm);
        assert_eq!(map.map_var(var![0]), var![0]);
        assert_eq!(map.map_var(var![1]).to_ipasir(), 4);
        assert_eq!(map.map_var(var![2]).to_ipasir(), 5);
        assert_eq!(vm.n_used(), 5);
        assert_eq!(map.n_primed(), 2);
        assert!(report.anomalous.is_empty());
        assert!(report.overlapping.is_empty());
    }

    #[test]
    fn anomalous_identity() {
        let mut vm = BasicVarManager::with_used(4);
        let (map, report) =
            PrimeMap::build(4, &set(&[var![0]]), &set(&[var![2]]), &mut vm);
        assert_eq!(report.anomalous, vec![var![1], var![3]]);
        assert!(!map.is_primed(var![1]));
        assert!(!map.is_primed(var![3]));
        assert!(map.is_primed(var![2]));
        assert_eq!(vm.n_used(), 5);
    }

    #[test]
    fn overlapping_is_projection() {
        let mut vm = BasicVarManager::with_used(2);
        let (map, report) =
            PrimeMap::build(2, &set(&[var![0]]), &set(&[var![0], var![1]]), &mut vm);
        assert_eq!(report.overlapping, vec![var![0]]);
        assert_eq!(map.map_var(var![0]), var![0]);
        assert_eq!(map.primed_pairs().collect::<Vec<_>>(), vec![(var![1], var![2])]);
    }

    #[test]
    fn map_lit_keeps_polarity() {
        let mut vm = BasicVarManager::with_used(3);
        let (map, _) =
            PrimeMap::build(3, &set(&[var![0]]), &set(&[var![1], var![2]]), &mut vm);
        assert_eq!(map.map_lit(ipasir_lit![-2]), ipasir_lit![-4]);
        assert_eq!(map.map_lit(ipasir_lit![3]), ipasir_lit![5]);
        assert_eq!(map.map_lit(!lit![0]), !lit![0]);
    }

    #[test]
    fn injective_beyond_original() {
        let n_vars = 50;
        let dependent: RsHashSet<Var> = (0..n_vars).step_by(2).map(|idx| var![idx]).collect();
        let mut vm = BasicVarManager::with_used(n_vars);
        let (map, _) = PrimeMap::build(n_vars, &RsHashSet::default(), &dependent, &mut vm);
        let primed: RsHashSet<Var> = map.primed_pairs().map(|(_, p)| p).collect();
        assert_eq!(primed.len(), dependent.len());
        assert!(primed.iter().all(|p| p.idx32() >= n_vars));
    }
}
