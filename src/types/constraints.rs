//! # Constraint Types
//!
//! The only constraint needed for CNF formulas is the [`Clause`].

use std::ops;

use super::{Lit, RsHashSet, Var};

/// Type representing a clause, an ordered disjunction of literals.
/// Wrapper around a std collection to allow for changing the data structure.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Eq, PartialEq, Hash, PartialOrd, Ord, Clone, Default, Debug)]
pub struct Clause {
    lits: Vec<Lit>,
}

impl Clause {
    /// Creates a new empty clause
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a literal to the end of the clause
    #[inline]
    pub fn add(&mut self, lit: Lit) {
        self.lits.push(lit);
    }

    /// Gets the length of the clause
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lits.len()
    }

    /// Checks if the clause is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }

    /// Gets an iterator over the clause
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Lit> {
        self.lits.iter()
    }

    /// Gets an iterator over the variables of the clause, in literal order and
    /// possibly with repetitions
    pub fn vars(&self) -> impl Iterator<Item = Var> + '_ {
        self.lits.iter().map(Lit::var)
    }

    /// Checks whether every variable of the clause is contained in `vars`.
    /// The empty clause is over any set of variables.
    #[must_use]
    pub fn is_over(&self, vars: &RsHashSet<Var>) -> bool {
        self.vars().all(|v| vars.contains(&v))
    }

    /// Creates a copy of the clause where the variable of every literal is
    /// substituted through `map`. Literal order and polarities are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use f2cnf::{clause, ipasir_lit, types::Var};
    ///
    /// let cl = clause![ipasir_lit![1], ipasir_lit![-2]];
    /// let renamed = cl.rename(|v| if v == Var::new(1) { Var::new(5) } else { v });
    /// assert_eq!(renamed, clause![ipasir_lit![1], ipasir_lit![-6]]);
    /// ```
    #[must_use]
    pub fn rename<F>(&self, mut map: F) -> Clause
    where
        F: FnMut(Var) -> Var,
    {
        self.lits
            .iter()
            .map(|l| map(l.var()).lit(l.is_neg()))
            .collect()
    }
}

impl From<&[Lit]> for Clause {
    fn from(value: &[Lit]) -> Self {
        Self {
            lits: Vec::from(value),
        }
    }
}

impl ops::Index<usize> for Clause {
    type Output = Lit;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.lits[index]
    }
}

impl IntoIterator for Clause {
    type Item = Lit;

    type IntoIter = std::vec::IntoIter<Lit>;

    fn into_iter(self) -> Self::IntoIter {
        self.lits.into_iter()
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Lit;

    type IntoIter = std::slice::Iter<'a, Lit>;

    fn into_iter(self) -> Self::IntoIter {
        self.lits.iter()
    }
}

impl FromIterator<Lit> for Clause {
    fn from_iter<T: IntoIterator<Item = Lit>>(iter: T) -> Self {
        Self {
            lits: Vec::from_iter(iter),
        }
    }
}

/// Creates a clause from a list of literals
///
/// # Examples
///
/// ```
/// use f2cnf::{clause, lit};
///
/// let cl = clause![lit![0], !lit![1]];
/// assert_eq!(cl.len(), 2);
/// ```
#[macro_export]
macro_rules! clause {
    () => {
        $crate::types::Clause::new()
    };
    ( $($l:expr),+ ) => {
        {
            let mut tmp_clause = $crate::types::Clause::new();
            $(
                tmp_clause.add($l);
            )+
            tmp_clause
        }
    };
}
