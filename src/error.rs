// Copyright 2024 ndstride developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::error::Error;
use std::fmt;

/// An error produced by an array operation.
///
/// All errors are synchronous precondition violations; none of them are
/// retried or recovered internally.
#[derive(Clone, Debug)]
pub struct ArrayError {
    // we want to be able to change this representation later
    repr: ErrorKind,
    detail: String,
}

impl ArrayError {
    /// Create a new `ArrayError` with no detail message.
    pub fn from_kind(error: ErrorKind) -> Self {
        from_kind(error)
    }

    /// Return the `ErrorKind` of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.repr
    }

    /// Return the message describing the violated precondition.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Error code for an array error.
///
/// This enumeration is not exhaustive. The representation of the enum
/// is not guaranteed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// operand shapes are incompatible
    ShapeMismatch,
    /// coordinate, linear index or dimension out of bounds
    IndexOutOfRange,
    /// the operation needs an array of another rank
    IllegalDimension,
    /// the operation is not valid for the array in its current state
    IllegalState,
    /// element count overflows `usize`
    Overflow,
    /// the operation has no meaning for this element type or view
    Unsupported,
}

impl ErrorKind {
    fn description(self) -> &'static str {
        match self {
            ErrorKind::ShapeMismatch => "shape mismatch",
            ErrorKind::IndexOutOfRange => "index out of range",
            ErrorKind::IllegalDimension => "illegal dimension",
            ErrorKind::IllegalState => "illegal state",
            ErrorKind::Overflow => "size overflow",
            ErrorKind::Unsupported => "unsupported operation",
        }
    }
}

#[inline(always)]
fn from_kind(k: ErrorKind) -> ArrayError {
    ArrayError {
        repr: k,
        detail: String::new(),
    }
}

pub(crate) fn with_detail(k: ErrorKind, detail: impl Into<String>) -> ArrayError {
    ArrayError {
        repr: k,
        detail: detail.into(),
    }
}

impl PartialEq for ArrayError {
    #[inline(always)]
    fn eq(&self, rhs: &Self) -> bool {
        self.repr == rhs.repr
    }
}

impl Error for ArrayError {}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.detail.is_empty() {
            f.write_str(self.repr.description())
        } else {
            write!(f, "{}: {}", self.repr.description(), self.detail)
        }
    }
}

/// Result type of fallible array operations.
pub type Result<T> = std::result::Result<T, ArrayError>;

pub(crate) fn out_of_bounds(value: usize, bound: usize) -> ArrayError {
    with_detail(
        ErrorKind::IndexOutOfRange,
        format!("index out of bounds; value {} out of bound {}", value, bound),
    )
}

pub(crate) fn shape_mismatch(a: &[usize], b: &[usize]) -> ArrayError {
    with_detail(
        ErrorKind::ShapeMismatch,
        format!("incompatible shapes {:?} and {:?}", a, b),
    )
}

pub(crate) fn size_mismatch(a: usize, b: usize) -> ArrayError {
    with_detail(
        ErrorKind::ShapeMismatch,
        format!("sizes differ ({} != {})", a, b),
    )
}

pub(crate) fn not_a_matrix(what: &str, dims: usize) -> ArrayError {
    with_detail(
        ErrorKind::IllegalState,
        format!("{} requires a 2-d array, got {} dimensions", what, dims),
    )
}

pub(crate) fn invalid_dimension(dim: usize, dims: usize) -> ArrayError {
    with_detail(
        ErrorKind::IllegalDimension,
        format!("dimension out of bounds ({} < {})", dim, dims),
    )
}

pub(crate) fn unsupported(what: &str) -> ArrayError {
    with_detail(ErrorKind::Unsupported, what)
}
