//! # Common Types for Quantified CNF Formulas
//!
//! Variables and literals are stored zero-based and packed, like in most SAT
//! libraries. Their DIMACS representation (indices starting from 1, negation
//! as a negative sign) is only used when parsing and writing files.

use core::ffi::c_int;
use std::{fmt, ops};

use thiserror::Error;

pub mod constraints;
pub use constraints::Clause;

/// The hash set to use throughout the library
#[cfg(feature = "fxhash")]
pub type RsHashSet<V> = rustc_hash::FxHashSet<V>;
#[cfg(not(feature = "fxhash"))]
pub type RsHashSet<V> = std::collections::HashSet<V>;

/// Type representing boolean variables. Variable indexing starts from 0 and
/// the maximum index is `(u32::MAX - 1) / 2`, since literals are packed into a
/// single `u32` as well.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Hash, Eq, PartialEq, PartialOrd, Ord, Clone, Copy, Debug)]
#[repr(transparent)]
pub struct Var {
    idx: u32,
}

impl Var {
    /// The maximum index that can be represented.
    pub const MAX_IDX: u32 = (u32::MAX - 1) / 2;

    /// Creates a new variable with a given (zero-based) index.
    ///
    /// # Panics
    ///
    /// If `idx > Var::MAX_IDX`.
    #[must_use]
    pub fn new(idx: u32) -> Var {
        assert!(idx <= Var::MAX_IDX, "variable index too high");
        Var { idx }
    }

    /// Creates a new variable with a given (zero-based) index.
    ///
    /// # Errors
    ///
    /// [`TypeError::IdxTooHigh`] if `idx > Var::MAX_IDX`.
    pub fn new_with_error(idx: u32) -> Result<Var, TypeError> {
        if idx > Var::MAX_IDX {
            return Err(TypeError::IdxTooHigh(idx, Var::MAX_IDX));
        }
        Ok(Var { idx })
    }

    /// Creates a variable from its DIMACS index, which starts from 1.
    ///
    /// # Errors
    ///
    /// [`TypeError::IpasirZero`] for `0`, [`TypeError::IdxTooHigh`] if the
    /// index cannot be represented.
    ///
    /// # Examples
    ///
    /// ```
    /// use f2cnf::types::Var;
    ///
    /// assert_eq!(Var::from_ipasir(3).unwrap(), Var::new(2));
    /// assert!(Var::from_ipasir(0).is_err());
    /// ```
    pub fn from_ipasir(val: u32) -> Result<Var, TypeError> {
        if val == 0 {
            return Err(TypeError::IpasirZero);
        }
        Var::new_with_error(val - 1)
    }

    /// Creates a literal that is not negated.
    #[inline]
    #[must_use]
    pub fn pos_lit(self) -> Lit {
        Lit::new_unchecked(self.idx, false)
    }

    /// Creates a literal of this variable with the given polarity.
    #[inline]
    #[must_use]
    pub fn lit(self, negated: bool) -> Lit {
        Lit::new_unchecked(self.idx, negated)
    }

    /// Returns the zero-based index of the variable as a `usize`, for indexing
    /// vectors.
    #[inline]
    #[must_use]
    pub fn idx(&self) -> usize {
        self.idx as usize
    }

    /// Returns the zero-based 32 bit index of the variable.
    #[inline]
    #[must_use]
    pub fn idx32(&self) -> u32 {
        self.idx
    }

    /// Converts the variable to its DIMACS index (`idx + 1`).
    ///
    /// # Panics
    ///
    /// If the index does not fit into a `c_int`.
    #[must_use]
    pub fn to_ipasir(self) -> c_int {
        (self.idx() + 1)
            .try_into()
            .expect("variable index too high to fit in c_int")
    }
}

/// Variables are displayed with their DIMACS index
impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ipasir())
    }
}

/// More easily creates variables from zero-based indices. Mainly used in tests.
///
/// # Examples
///
/// ```
/// use f2cnf::{var, types::Var};
///
/// assert_eq!(var![42], Var::new(42));
/// ```
#[macro_export]
macro_rules! var {
    ($v:expr) => {
        $crate::types::Var::new($v)
    };
}

/// Type representing literals, possibly negated boolean variables.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Hash, Eq, PartialEq, PartialOrd, Ord, Clone, Copy, Debug)]
#[repr(transparent)]
pub struct Lit {
    /// `idx << 1` with the lowest bit set if the literal is negated
    lidx: u32,
}

impl Lit {
    #[inline]
    fn represent(idx: u32, negated: bool) -> u32 {
        (idx << 1) + u32::from(negated)
    }

    /// Creates a new (negated or not) literal with a given index.
    ///
    /// # Panics
    ///
    /// If `idx > Var::MAX_IDX`.
    #[must_use]
    pub fn new(idx: u32, negated: bool) -> Lit {
        assert!(idx <= Var::MAX_IDX, "variable index too high");
        Lit {
            lidx: Lit::represent(idx, negated),
        }
    }

    /// Creates a new (negated or not) literal with a given index.
    ///
    /// # Errors
    ///
    /// [`TypeError::IdxTooHigh`] if `idx > Var::MAX_IDX`.
    pub fn new_with_error(idx: u32, negated: bool) -> Result<Lit, TypeError> {
        if idx > Var::MAX_IDX {
            return Err(TypeError::IdxTooHigh(idx, Var::MAX_IDX));
        }
        Ok(Lit {
            lidx: Lit::represent(idx, negated),
        })
    }

    /// Creates a new literal without checking the index.
    /// Only use this if `idx <= Var::MAX_IDX` is known to hold.
    #[inline]
    #[must_use]
    pub fn new_unchecked(idx: u32, negated: bool) -> Lit {
        Lit {
            lidx: Lit::represent(idx, negated),
        }
    }

    /// Creates a new positive literal with a given index.
    ///
    /// # Panics
    ///
    /// If `idx > Var::MAX_IDX`.
    #[inline]
    #[must_use]
    pub fn positive(idx: u32) -> Lit {
        Lit::new(idx, false)
    }

    /// Creates a new negated literal with a given index.
    ///
    /// # Panics
    ///
    /// If `idx > Var::MAX_IDX`.
    #[inline]
    #[must_use]
    pub fn negative(idx: u32) -> Lit {
        Lit::new(idx, true)
    }

    /// Creates a literal from a DIMACS/IPASIR integer.
    ///
    /// # Errors
    ///
    /// [`TypeError::IpasirZero`] if the value is zero,
    /// [`TypeError::IdxTooHigh`] if the index cannot be represented.
    ///
    /// # Examples
    ///
    /// ```
    /// use f2cnf::types::Lit;
    ///
    /// assert_eq!(Lit::from_ipasir(-3).unwrap(), Lit::negative(2));
    /// ```
    pub fn from_ipasir(val: c_int) -> Result<Lit, TypeError> {
        if val == 0 {
            return Err(TypeError::IpasirZero);
        }
        let negated = val < 0;
        let idx = val.unsigned_abs();
        Lit::new_with_error(idx - 1, negated)
    }

    /// Gets the zero-based variable index of the literal
    #[inline]
    #[must_use]
    pub fn vidx(&self) -> usize {
        (self.lidx >> 1) as usize
    }

    /// Gets the zero-based 32 bit variable index of the literal
    #[inline]
    #[must_use]
    pub fn vidx32(&self) -> u32 {
        self.lidx >> 1
    }

    /// Gets the variable of the literal
    #[inline]
    #[must_use]
    pub fn var(&self) -> Var {
        Var { idx: self.vidx32() }
    }

    /// True if the literal is positive.
    #[inline]
    #[must_use]
    pub fn is_pos(&self) -> bool {
        (self.lidx & 1u32) == 0
    }

    /// True if the literal is negated.
    #[inline]
    #[must_use]
    pub fn is_neg(&self) -> bool {
        (self.lidx & 1u32) == 1
    }

    /// Converts the literal to its DIMACS integer.
    ///
    /// # Panics
    ///
    /// If the variable index does not fit into a `c_int`.
    #[must_use]
    pub fn to_ipasir(self) -> c_int {
        let idx = self.var().to_ipasir();
        if self.is_neg() {
            -idx
        } else {
            idx
        }
    }
}

impl ops::Not for Lit {
    type Output = Lit;

    #[inline]
    fn not(self) -> Lit {
        Lit {
            lidx: self.lidx ^ 1u32,
        }
    }
}

/// Literals are displayed as DIMACS integers
impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ipasir())
    }
}

/// More easily creates positive literals from zero-based indices. Mainly used
/// in tests.
///
/// # Examples
///
/// ```
/// use f2cnf::{lit, types::Lit};
///
/// assert_eq!(lit![42], Lit::positive(42));
/// assert_eq!(!lit![42], Lit::negative(42));
/// ```
#[macro_export]
macro_rules! lit {
    ($l:expr) => {
        $crate::types::Lit::positive($l)
    };
}

/// More easily creates literals with DIMACS indexing (starts from 1, negative
/// value is negation). Mainly used in tests.
///
/// # Examples
///
/// ```
/// use f2cnf::{lit, ipasir_lit, types::Lit};
///
/// assert_eq!(ipasir_lit![42], lit![41]);
/// assert_eq!(ipasir_lit![-42], !lit![41]);
/// ```
#[macro_export]
macro_rules! ipasir_lit {
    ($l:expr) => {
        $crate::types::Lit::from_ipasir($l).unwrap()
    };
}

/// Errors related to types
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum TypeError {
    /// The requested index is too high.
    /// Contains the requested and the maximum index.
    #[error("index {0} is too high (maximum {1})")]
    IdxTooHigh(u32, u32),
    /// DIMACS index is zero
    #[error("zero is an invalid DIMACS literal")]
    IpasirZero,
}
