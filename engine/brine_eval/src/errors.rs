//! Evaluation errors.
//!
//! Evaluation surfaces exactly the structural filter errors; everything
//! data-shaped has already degraded to `Nil` further down. The combined
//! [`Error`] exists for the parse-and-evaluate convenience path.

use std::fmt;

use brine_expr::ParseError;

/// Structural error during evaluation: an unknown filter name or a filter
/// applied with the wrong number of arguments.
pub type EvalError = brine_filters::FilterError;

/// Error from [`crate::Engine::evaluate_string`]: either phase can fail.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    Parse(ParseError),
    Eval(EvalError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(e) => e.fmt(f),
            Error::Eval(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

impl From<EvalError> for Error {
    fn from(e: EvalError) -> Self {
        Error::Eval(e)
    }
}
