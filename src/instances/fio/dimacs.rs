//! # Parsing and Writing Quantified DIMACS Files
//!
//! The input format is DIMACS CNF extended with QDIMACS-style quantifier
//! lines:
//!
//! ```text
//! c comment
//! p cnf <n_vars> <n_clauses>
//! a <v1> <v2> ... 0
//! e <v1> <v2> ... 0
//! <lit1> <lit2> ... 0
//! ```
//!
//! Lines that match none of these forms are ignored. Clause and variable list
//! tokens are parsed strictly: every token must be an integer and the line has
//! to end in `0`.
//!
//! The output format is DIMACS CNF with a support declaration line as
//! expected by projected model counters (`c ind ... 0` or `c p show ... 0`).
//!
//! ## References
//!
//! - [DIMACS CNF](http://www.satcompetition.org/2011/format-benchmarks2011.html)
//! - [QDIMACS](https://www.qbflib.org/qdimacs.html)

use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};

use itertools::Itertools;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{i32, multispace0, multispace1, u32, u64},
    combinator::{eof, map_res, recognize, value},
    error::{Error as NomError, ErrorKind, ParseError},
    multi::many0,
    sequence::{terminated, tuple},
    IResult,
};
use thiserror::Error;

use crate::{
    instances::{Cnf, QuantInstance},
    types::{Clause, Lit, RsHashSet, Var},
};

/// Errors occuring within the DIMACS parsing module. Line numbers start at 1.
#[derive(Error, Debug)]
pub enum Error {
    /// A clause line with a token that is not an integer, or that does not end
    /// in a single `0`
    #[error("line {line}: malformed clause at '{input}'")]
    MalformedClause {
        /// The line of the clause
        line: usize,
        /// The remaining input where parsing failed
        input: String,
    },
    /// Invalid `p cnf` line
    #[error("line {line}: invalid p-line '{input}'")]
    PLine {
        /// The line of the header
        line: usize,
        /// The full header line
        input: String,
    },
    /// A value in the `p cnf` line is too large to be represented
    #[error("line {line}: value in p-line too large: {value}")]
    PValTooLarge {
        /// The line of the header
        line: usize,
        /// The offending value
        value: u64,
    },
    /// Invalid `a` or `e` line
    #[error("line {line}: invalid variable list at '{input}'")]
    VarList {
        /// The line of the variable list
        line: usize,
        /// The remaining input where parsing failed
        input: String,
    },
    /// A variable with a higher index than declared in the `p cnf` line
    #[error("line {line}: variable {var} exceeds the {n_vars} variables declared in the p-line")]
    VarOutOfRange {
        /// The line the variable appears in
        line: usize,
        /// The offending variable
        var: Var,
        /// The number of variables declared in the header
        n_vars: u32,
    },
    /// The declared variables together with the primed and indicator variables
    /// cannot be represented
    #[error("derived formula needs {required} variables, at most {} are supported", Var::MAX_IDX)]
    TooManyVars {
        /// The number of variables of the derived formula
        required: u64,
    },
    /// A second `p cnf` line
    #[error("line {0}: second p-line")]
    DuplicateHeader(usize),
    /// A clause or variable list appeared before the `p cnf` line
    #[error("line {0}: clause or variable list before the p-line")]
    MissingHeader(usize),
    /// The input ended without a `p cnf` line
    #[error("no p-line found")]
    NoHeader,
    /// IO error reading file
    #[error("IO error: {0}")]
    IOError(#[from] io::Error),
}

/// Errors of the line parsers, before the line number is known
#[derive(Debug, PartialEq, Eq)]
enum LineError {
    /// Invalid literal in a clause
    Lit(String),
    /// The line does not end in a single `0`
    ListEnding(String),
    /// Invalid `p cnf` line
    PLine(String),
    /// P line value too large
    PValTooLarge(u64),
    /// Invalid `a` or `e` line
    VarList(String),
    /// Base error from nom parsing
    Nom(String, ErrorKind),
}

impl ParseError<&str> for LineError {
    fn from_error_kind(input: &str, kind: ErrorKind) -> Self {
        Self::Nom(String::from(input), kind)
    }

    fn append(_: &str, _: ErrorKind, other: Self) -> Self {
        // The more specific error of the inner parser has precedence
        other
    }
}

impl LineError {
    /// Attaches the line number. Errors without a more specific kind can only
    /// come from clause lines.
    fn at(self, line: usize) -> Error {
        match self {
            LineError::PLine(input) => Error::PLine { line, input },
            LineError::PValTooLarge(value) => Error::PValTooLarge { line, value },
            LineError::VarList(input) => Error::VarList { line, input },
            LineError::Lit(input) | LineError::ListEnding(input) | LineError::Nom(input, _) => {
                Error::MalformedClause { line, input }
            }
        }
    }
}

/// The two declared variable blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quantifier {
    /// `a` line, projection variables
    Forall,
    /// `e` line, dependent variables
    Exists,
}

/// Classified content of a single input line
#[derive(Debug, PartialEq, Eq)]
enum Line {
    Ignored,
    Header(u32, usize),
    Vars(Quantifier, Vec<Var>),
    Clause(Clause),
}

/// Parses a quantified DIMACS CNF from a reader
///
/// # Errors
///
/// IO errors, malformed lines and clauses or variable lists that are not
/// covered by the `p cnf` line. See [`Error`].
pub fn parse_qcnf<R: BufRead>(mut reader: R) -> Result<QuantInstance, Error> {
    let mut header: Option<(u32, usize)> = None;
    let mut projection = vec![];
    let mut dependent = vec![];
    let mut cnf = Cnf::new();
    let mut buf = String::new();
    let mut line_num = 0;
    loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            break;
        }
        line_num += 1;
        match parse_line(buf.trim()).map_err(|e| e.at(line_num))? {
            Line::Ignored => (),
            Line::Header(n_vars, n_clauses) => {
                if header.is_some() {
                    return Err(Error::DuplicateHeader(line_num));
                }
                log::info!("input formula has {n_vars} vars and {n_clauses} clauses");
                header = Some((n_vars, n_clauses));
            }
            Line::Vars(Quantifier::Forall, vars) => {
                let (n_vars, _) = header.ok_or(Error::MissingHeader(line_num))?;
                // Projection variables only form the support, which may name
                // variables that the formula does not use
                if let Some(var) = vars.iter().find(|v| v.idx32() >= n_vars) {
                    log::warn!(
                        "line {line_num}: projection variable {var} exceeds the {n_vars} variables declared in the p-line"
                    );
                }
                projection.extend(vars);
            }
            Line::Vars(Quantifier::Exists, vars) => {
                let (n_vars, _) = header.ok_or(Error::MissingHeader(line_num))?;
                check_range(vars.iter().copied(), n_vars, line_num)?;
                dependent.extend(vars);
            }
            Line::Clause(clause) => {
                let (n_vars, _) = header.ok_or(Error::MissingHeader(line_num))?;
                check_range(clause.vars(), n_vars, line_num)?;
                cnf.add_clause(clause);
            }
        }
    }
    let (n_vars, n_clauses) = header.ok_or(Error::NoHeader)?;
    check_room(n_vars, &projection, &dependent)?;
    if cnf.len() != n_clauses {
        log::warn!(
            "p-line declares {n_clauses} clauses but the input contains {}",
            cnf.len()
        );
    }
    log::debug!(
        "parsed {} clauses, {} projection and {} dependent variables",
        cnf.len(),
        projection.len(),
        dependent.len()
    );
    Ok(QuantInstance::new(
        n_vars, n_clauses, projection, dependent, cnf,
    ))
}

/// Every variable has to be covered by the header, since the primed copies
/// are allocated after the declared variables
fn check_range<I>(mut vars: I, n_vars: u32, line: usize) -> Result<(), Error>
where
    I: Iterator<Item = Var>,
{
    match vars.find(|v| v.idx32() >= n_vars) {
        Some(var) => Err(Error::VarOutOfRange { line, var, n_vars }),
        None => Ok(()),
    }
}

/// Every dependent variable that is not also a projection variable gets a
/// primed copy and a disagreement indicator allocated after the declared and
/// projection variables. All of them need to be representable as DIMACS
/// integers.
fn check_room(n_vars: u32, projection: &[Var], dependent: &[Var]) -> Result<(), Error> {
    let first_free = projection
        .iter()
        .map(|v| v.idx32() + 1)
        .fold(n_vars, u32::max);
    let projection: RsHashSet<Var> = projection.iter().copied().collect();
    let n_primed = dependent
        .iter()
        .filter(|v| !projection.contains(v))
        .collect::<RsHashSet<_>>()
        .len();
    let required = u64::from(first_free) + 2 * n_primed as u64;
    if required > u64::from(Var::MAX_IDX) {
        return Err(Error::TooManyVars { required });
    }
    Ok(())
}

/// Classifies a trimmed line by its first token and parses it
fn parse_line(line: &str) -> Result<Line, LineError> {
    let mut tokens = line.split_whitespace();
    let Some(first) = tokens.next() else {
        // Tolerate empty lines
        return Ok(Line::Ignored);
    };
    match first {
        "p" => {
            if tokens.next() != Some("cnf") {
                // Headers of other formats carry no information for us
                return Ok(Line::Ignored);
            }
            parse_p_line(line)
                .map(|(_, (n_vars, n_clauses))| Line::Header(n_vars, n_clauses))
                .map_err(unwrap_line_error)
        }
        "a" | "e" => parse_var_list(line)
            .map(|(_, (quant, vars))| Line::Vars(quant, vars))
            .map_err(|e| match unwrap_line_error(e) {
                LineError::ListEnding(input) | LineError::Nom(input, _) => {
                    LineError::VarList(input)
                }
                err => err,
            }),
        _ if is_int_token(first) => {
            parse_clause_line(line)
                .map(|(_, clause)| Line::Clause(clause))
                .map_err(unwrap_line_error)
        }
        _ => Ok(Line::Ignored),
    }
}

/// Checks whether a token is an optionally signed decimal integer. Only lines
/// starting with such a token are clauses.
fn is_int_token(token: &str) -> bool {
    let digits = token.strip_prefix(['-', '+']).unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn unwrap_line_error(err: nom::Err<LineError>) -> LineError {
    match err {
        nom::Err::Incomplete(_) => LineError::Nom(String::new(), ErrorKind::Complete),
        nom::Err::Error(e) | nom::Err::Failure(e) => e,
    }
}

/// Parses a `p cnf <n_vars> <n_clauses>` line
fn parse_p_line(input: &str) -> IResult<&str, (u32, usize), LineError> {
    let full_p_line = String::from(input);
    let (input, (_, _, _, _, n_vars, _, n_clauses, _, _)) = tuple::<_, _, NomError<_>, _>((
        tag("p"),
        multispace1,
        tag("cnf"),
        multispace1,
        u64,
        multispace1,
        u64,
        multispace0,
        eof,
    ))(input)
    .map_err(|e| e.map(|_| LineError::PLine(full_p_line)))?;
    let n_vars = match u32::try_from(n_vars) {
        Ok(v) if v <= Var::MAX_IDX => v,
        _ => return Err(nom::Err::Error(LineError::PValTooLarge(n_vars))),
    };
    let n_clauses = match usize::try_from(n_clauses) {
        Ok(c) => c,
        Err(_) => return Err(nom::Err::Error(LineError::PValTooLarge(n_clauses))),
    };
    Ok((input, (n_vars, n_clauses)))
}

/// Parses an `a` or `e` line
fn parse_var_list(input: &str) -> IResult<&str, (Quantifier, Vec<Var>), LineError> {
    let full_line = String::from(input);
    let (input, quant) = terminated(
        alt((
            value(Quantifier::Forall, tag::<_, _, NomError<_>>("a")),
            value(Quantifier::Exists, tag("e")),
        )),
        multispace1,
    )(input)
    .map_err(|e| e.map(|_| LineError::VarList(full_line)))?;
    let (input, vars) =
        terminated(many0(terminated(parse_var, multispace1)), parse_list_ending)(input)?;
    Ok((input, (quant, vars)))
}

/// Parses a clause line. Zero only appears as the final token.
fn parse_clause_line(input: &str) -> IResult<&str, Clause, LineError> {
    let (input, lits) =
        terminated(many0(terminated(parse_lit, multispace1)), parse_list_ending)(input)?;
    Ok((input, Clause::from_iter(lits)))
}

/// Nuclear parser for a literal, rejecting `0`
fn parse_lit(input: &str) -> IResult<&str, Lit, LineError> {
    map_res(i32, Lit::from_ipasir)(input)
        .map_err(|e| e.map(|e: NomError<&str>| LineError::Lit(String::from(e.input))))
}

/// Nuclear parser for a quantified variable, rejecting `0` and negative values
fn parse_var(input: &str) -> IResult<&str, Var, LineError> {
    map_res(u32, Var::from_ipasir)(input)
        .map_err(|e| e.map(|e: NomError<&str>| LineError::VarList(String::from(e.input))))
}

/// Parses the `0` terminating a clause or variable list. Only whitespace may
/// follow it.
fn parse_list_ending(input: &str) -> IResult<&str, &str, LineError> {
    recognize(tuple((tag("0"), multispace0, eof)))(input)
        .map_err(|e| e.map(|e: NomError<&str>| LineError::ListEnding(String::from(e.input))))
}

/// The convention of the support declaration written after the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// `c ind <vars> 0`, selected with `-a`
    Ind,
    /// `c p show <vars> 0`, selected with `-x`, as expected by GPMC
    Show,
}

impl OutputMode {
    /// The directive starting the support declaration line
    #[must_use]
    pub fn directive(self) -> &'static str {
        match self {
            OutputMode::Ind => "c ind",
            OutputMode::Show => "c p show",
        }
    }

    /// The suffix of derived output file names
    #[must_use]
    pub fn file_suffix(self) -> &'static str {
        match self {
            OutputMode::Ind => ".cnf",
            OutputMode::Show => "_gpmc.cnf",
        }
    }
}

/// An output mode other than `a` or `x` was requested
#[derive(Error, Debug, PartialEq, Eq, Clone)]
#[error("invalid output mode '{0}', expected `a` or `x`")]
pub struct InvalidMode(pub String);

impl FromStr for OutputMode {
    type Err = InvalidMode;

    /// Accepts the mode letters with or without the leading dash of the flag
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix('-').unwrap_or(s) {
            "a" => Ok(OutputMode::Ind),
            "x" => Ok(OutputMode::Show),
            _ => Err(InvalidMode(String::from(s))),
        }
    }
}

/// Writes a CNF with a support declaration to a DIMACS CNF file
///
/// # Errors
///
/// If writing fails, returns [`io::Error`].
pub fn write_projected_cnf<W: Write>(
    writer: &mut W,
    cnf: &Cnf,
    n_vars: u32,
    support: &[Var],
    mode: OutputMode,
) -> Result<(), io::Error> {
    writeln!(writer, "p cnf {n_vars} {}", cnf.len())?;
    writeln!(
        writer,
        "{} {}",
        mode.directive(),
        support
            .iter()
            .map(|v| v.to_ipasir())
            .chain(std::iter::once(0))
            .format(" ")
    )?;
    cnf.iter().try_for_each(|cl| write_clause(writer, cl))?;
    writer.flush()
}

fn write_clause<W: Write>(writer: &mut W, clause: &Clause) -> Result<(), io::Error> {
    clause
        .iter()
        .try_for_each(|l| write!(writer, "{} ", l.to_ipasir()))?;
    writeln!(writer, "0")
}
