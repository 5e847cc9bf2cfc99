// Copyright 2024 ndstride developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Allocation of fresh owning arrays.

use crate::element::Element;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::range::Range;
use crate::{Array, BitArray, ComplexArray, DoubleArray, IntArray, LongArray};

/// Creates owning arrays of a given shape and element type.
///
/// All arrays are zero-initialised: `0`, `0.0`, `false` or `0 + 0i`.
/// The factory is a plain value with no state of its own; operations that
/// allocate a result use the same policy.
///
/// ```
/// use ndstride::ArrayFactory;
///
/// let f = ArrayFactory::new();
/// let a = f.double_array(&[2, 3]).unwrap();
/// assert_eq!(a.shape(), &[2, 3]);
/// assert!(a.iter().all(|x| x == 0.));
/// assert!(!a.is_view());
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ArrayFactory {
    _priv: (),
}

impl ArrayFactory {
    pub fn new() -> Self {
        ArrayFactory::default()
    }

    /// A zero-initialised owning array of `shape`.
    ///
    /// **Errors** with `Overflow` if the element count overflows `usize`.
    pub fn array<T: Element>(&self, shape: &[usize]) -> Result<Array<T>> {
        Array::zeros(shape)
    }

    pub fn bit_array(&self, shape: &[usize]) -> Result<BitArray> {
        self.array(shape)
    }

    pub fn int_array(&self, shape: &[usize]) -> Result<IntArray> {
        self.array(shape)
    }

    pub fn long_array(&self, shape: &[usize]) -> Result<LongArray> {
        self.array(shape)
    }

    pub fn double_array(&self, shape: &[usize]) -> Result<DoubleArray> {
        self.array(shape)
    }

    pub fn complex_array(&self, shape: &[usize]) -> Result<ComplexArray> {
        self.array(shape)
    }

    /// A zero-initialised `rows × columns` matrix.
    pub fn matrix<T: Element>(&self, rows: usize, columns: usize) -> Result<Matrix<T>> {
        Matrix::zeros(rows, columns)
    }

    /// The range `start..end` stepping by `step`; see [`Range::with_step`].
    pub fn range(&self, start: i32, end: i32, step: i32) -> Result<Range> {
        Range::with_step(start, end, step)
    }
}
