//! # CNF Formula Representation

use std::ops::Index;

use crate::{encodings::CollectClauses, types::Clause};

/// Simple type representing a CNF formula as an ordered list of clauses.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Eq, PartialEq, Default)]
pub struct Cnf {
    clauses: Vec<Clause>,
}

impl std::fmt::Debug for Cnf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cnf")
            .field("clauses", &self.clauses)
            .finish()
    }
}

impl Cnf {
    /// Creates a new [`Cnf`]
    #[must_use]
    pub fn new() -> Cnf {
        Cnf::default()
    }

    /// Creates a new [`Cnf`] with a given capacity of clauses
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Cnf {
        Cnf {
            clauses: Vec::with_capacity(capacity),
        }
    }

    /// Checks if the CNF is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Returns the number of clauses in the formula
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Adds a clause to the CNF
    #[inline]
    pub fn add_clause(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    /// Joins the current CNF with another one. The clauses of `other` come
    /// after the clauses of `self`.
    #[must_use]
    pub fn join(mut self, other: Cnf) -> Cnf {
        self.clauses.extend(other);
        self
    }

    /// Returns an iterator over references to the clauses
    pub fn iter(&self) -> std::slice::Iter<'_, Clause> {
        self.clauses.iter()
    }
}

impl CollectClauses for Cnf {
    fn n_clauses(&self) -> usize {
        self.clauses.len()
    }
}

impl IntoIterator for Cnf {
    type Item = Clause;

    type IntoIter = std::vec::IntoIter<Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.into_iter()
    }
}

impl<'a> IntoIterator for &'a Cnf {
    type Item = &'a Clause;

    type IntoIter = std::slice::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}

impl FromIterator<Clause> for Cnf {
    fn from_iter<T: IntoIterator<Item = Clause>>(iter: T) -> Self {
        Self {
            clauses: iter.into_iter().collect(),
        }
    }
}

impl Extend<Clause> for Cnf {
    fn extend<T: IntoIterator<Item = Clause>>(&mut self, iter: T) {
        self.clauses.extend(iter);
    }
}

impl Index<usize> for Cnf {
    type Output = Clause;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.clauses[index]
    }
}

#[cfg(test)]
mod tests {
    use super::Cnf;
    use crate::{clause, encodings::CollectClauses, lit};

    #[test]
    fn cnf_join_keeps_order() {
        let first: Cnf = [clause![lit![0]], clause![lit![1]]].into_iter().collect();
        let second: Cnf = [clause![!lit![2]]].into_iter().collect();
        let joined = first.join(second);
        assert_eq!(joined.len(), 3);
        assert_eq!(joined[0], clause![lit![0]]);
        assert_eq!(joined[2], clause![!lit![2]]);
    }

    #[test]
    fn cnf_collects() {
        let mut cnf = Cnf::with_capacity(2);
        assert!(cnf.is_empty());
        cnf.extend([clause![lit![0]], clause![!lit![1]]]);
        assert_eq!(cnf.n_clauses(), 2);
        assert_eq!(cnf.iter().count(), 2);
    }
}
