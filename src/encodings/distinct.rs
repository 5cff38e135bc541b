//! # Forcing Two Distinct Witnesses
//!
//! Given a [`PrimeMap`], the formula is copied over the primed variables and
//! for every primed variable an indicator is introduced that can only be true
//! if the variable and its primed copy take different values. A final clause
//! requires at least one indicator to be true.
//!
//! For a primed pair `(y, y')` with indicator `k`, the encoding is
//!
//! ```text
//! k -> ( y |  y')
//! k -> (-y | -y')
//! ```
//!
//! which only constrains `k`. The indicator is sound but not complete: if `y`
//! and `y'` differ, `k` may still be false.

use crate::{
    encodings::{atomics, prime::PrimeMap, CollectClauses},
    instances::{Cnf, ManageVars},
    types::{Lit, RsHashSet, Var},
};

/// Renames every clause that mentions a variable outside of `projection`
/// through `map`. Clauses entirely over `projection` (including the empty
/// clause) would be copied unchanged and are skipped.
#[must_use]
pub fn duplicate(cnf: &Cnf, projection: &RsHashSet<Var>, map: &PrimeMap) -> Cnf {
    let mut dup = Cnf::new();
    duplicate_into(cnf, projection, map, &mut dup);
    dup
}

/// Same as [`duplicate`] but adds the renamed clauses to an existing collector.
/// Returns the number of clauses added.
pub fn duplicate_into<Col>(
    cnf: &Cnf,
    projection: &RsHashSet<Var>,
    map: &PrimeMap,
    collector: &mut Col,
) -> usize
where
    Col: CollectClauses,
{
    let prev = collector.n_clauses();
    collector.extend(
        cnf.iter()
            .filter(|cl| !cl.is_over(projection))
            .map(|cl| cl.rename(|v| map.map_var(v))),
    );
    let n_added = collector.n_clauses() - prev;
    log::debug!(
        "duplicated {n_added} of {} clauses over the primed variables",
        cnf.len()
    );
    n_added
}

/// Encodes that at least one primed variable differs from its original.
/// Returns the disagreement clauses followed by the final disjunction, and
/// the indicator literals in the order of their variables.
pub fn encode_disagreement<VM>(map: &PrimeMap, var_manager: &mut VM) -> (Cnf, Vec<Lit>)
where
    VM: ManageVars,
{
    let mut cnf = Cnf::with_capacity(2 * map.n_primed() + 1);
    let indicators = encode_disagreement_into(map, var_manager, &mut cnf);
    (cnf, indicators)
}

/// Same as [`encode_disagreement`] but adds the clauses to an existing
/// collector. Indicators are allocated from `var_manager` in increasing order
/// of the original variables.
pub fn encode_disagreement_into<Col, VM>(
    map: &PrimeMap,
    var_manager: &mut VM,
    collector: &mut Col,
) -> Vec<Lit>
where
    Col: CollectClauses,
    VM: ManageVars,
{
    let mut indicators = Vec::with_capacity(map.n_primed());
    for (orig, primed) in map.primed_pairs() {
        let k = var_manager.new_var().pos_lit();
        let (y, y_p) = (orig.pos_lit(), primed.pos_lit());
        collector.extend([
            atomics::lit_impl_clause(k, &[y, y_p]),
            atomics::lit_impl_clause(k, &[!y, !y_p]),
        ]);
        indicators.push(k);
    }
    if indicators.is_empty() {
        log::warn!("no dependent variables to disagree on, the result is unsatisfiable");
    }
    collector.extend([atomics::at_least_one(&indicators)]);
    indicators
}

#[cfg(test)]
mod tests {
    use super::{duplicate, encode_disagreement, encode_disagreement_into};
    use crate::{
        clause,
        encodings::prime::PrimeMap,
        instances::{BasicVarManager, Cnf, ManageVars},
        ipasir_lit,
        types::{Clause, RsHashSet, Var},
        var,
    };

    fn scenario_map(vm: &mut BasicVarManager) -> (PrimeMap, RsHashSet<Var>) {
        let projection: RsHashSet<Var> = [var![0]].into_iter().collect();
        let dependent: RsHashSet<Var> = [var![1], var![2]].into_iter().collect();
        let (map, _) = PrimeMap::build(3, &projection, &dependent, vm);
        (map, projection)
    }

    #[test]
    fn duplicate_renames() {
        let mut vm = BasicVarManager::with_used(3);
        let (map, projection) = scenario_map(&mut vm);
        let cnf: Cnf = [clause![ipasir_lit![1], ipasir_lit![-2], ipasir_lit![3]]]
            .into_iter()
            .collect();
        let dup = duplicate(&cnf, &projection, &map);
        assert_eq!(dup.len(), 1);
        assert_eq!(
            dup[0],
            clause![ipasir_lit![1], ipasir_lit![-4], ipasir_lit![5]]
        );
    }

    #[test]
    fn duplicate_skips_projection_clauses() {
        let mut vm = BasicVarManager::with_used(3);
        let (map, projection) = scenario_map(&mut vm);
        let cnf: Cnf = [
            clause![ipasir_lit![1], ipasir_lit![-1]],
            clause![],
            clause![ipasir_lit![-3]],
        ]
        .into_iter()
        .collect();
        let dup = duplicate(&cnf, &projection, &map);
        assert_eq!(dup.len(), 1);
        assert_eq!(dup[0], clause![ipasir_lit![-5]]);
    }

    #[test]
    fn disagreement_clauses() {
        let mut vm = BasicVarManager::with_used(3);
        let (map, _) = scenario_map(&mut vm);
        let (cnf, indicators) = encode_disagreement(&map, &mut vm);
        assert_eq!(indicators, vec![ipasir_lit![6], ipasir_lit![7]]);
        assert_eq!(vm.n_used(), 7);
        let expected: Vec<Clause> = vec![
            clause![ipasir_lit![2], ipasir_lit![4], ipasir_lit![-6]],
            clause![ipasir_lit![-2], ipasir_lit![-4], ipasir_lit![-6]],
            clause![ipasir_lit![3], ipasir_lit![5], ipasir_lit![-7]],
            clause![ipasir_lit![-3], ipasir_lit![-5], ipasir_lit![-7]],
            clause![ipasir_lit![6], ipasir_lit![7]],
        ];
        assert_eq!(cnf.into_iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn disagreement_without_dependent() {
        let mut vm = BasicVarManager::with_used(2);
        let projection: RsHashSet<Var> = [var![0], var![1]].into_iter().collect();
        let (map, _) = PrimeMap::build(2, &projection, &RsHashSet::default(), &mut vm);
        let mut collector: Vec<Clause> = vec![];
        let indicators = encode_disagreement_into(&map, &mut vm, &mut collector);
        assert!(indicators.is_empty());
        assert_eq!(collector, vec![clause![]]);
        assert_eq!(vm.n_used(), 2);
    }

    /// Every assignment of a primed pair and its indicator that satisfies both
    /// clauses with the indicator set has the pair disagree
    #[test]
    fn indicator_soundness() {
        let mut vm = BasicVarManager::with_used(1);
        let dependent: RsHashSet<Var> = [var![0]].into_iter().collect();
        let (map, _) = PrimeMap::build(1, &RsHashSet::default(), &dependent, &mut vm);
        let (cnf, indicators) = encode_disagreement(&map, &mut vm);
        let k = indicators[0];
        for bits in 0..4_u32 {
            // variables 0 and 1 are the pair, 2 is the indicator
            let value = |v: Var| match v.idx() {
                0 => bits & 1 == 1,
                1 => bits & 2 == 2,
                _ => true,
            };
            let sat = cnf
                .iter()
                .take(2)
                .all(|cl| cl.iter().any(|l| value(l.var()) == l.is_pos()));
            assert_eq!(k.var().idx(), 2);
            assert_eq!(sat, value(var![0]) != value(var![1]));
        }
    }
}
