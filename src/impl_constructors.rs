// Copyright 2024 ndstride developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Constructor methods for owning arrays.

use crate::element::Element;
use crate::error::{self, ErrorKind, Result};
use crate::indexer;
use crate::layout::Layout;
use crate::linspace;
use crate::Array;

/// # Constructor Methods for Owned Arrays
///
/// Every constructor returns an owning array (`is_view() == false`) with
/// natural column-major strides.
impl<T: Element> Array<T> {
    /// Create an array of `shape` filled with `elem`.
    ///
    /// **Errors** with `Overflow` if the number of elements would overflow
    /// `usize`.
    ///
    /// ```
    /// use ndstride::IntArray;
    ///
    /// let a = IntArray::from_elem(&[2, 2, 2], 7).unwrap();
    /// assert_eq!(a.len(), 8);
    /// assert!(a.iter().all(|x| x == 7));
    /// ```
    pub fn from_elem(shape: &[usize], elem: T) -> Result<Self> {
        let layout = Layout::new(shape)?;
        Ok(Array::owned(vec![elem; layout.len()], layout))
    }

    /// Create an array of zeros (or `false`) of `shape`.
    pub fn zeros(shape: &[usize]) -> Result<Self> {
        Ok(Array::owned_zeros(Layout::new(shape)?))
    }

    /// Create an array of ones (or `true`) of `shape`.
    pub fn ones(shape: &[usize]) -> Result<Self> {
        Array::from_elem(shape, T::one())
    }

    /// Create a one-dimensional array from a vector (no copying needed).
    pub fn from_vec(v: Vec<T>) -> Self {
        let layout = Layout::contiguous(v.len());
        Array::owned(v, layout)
    }

    /// Create an array of `shape` from `v` in column-major order.
    ///
    /// **Errors** with `ShapeMismatch` if `v` does not have exactly as many
    /// elements as `shape`.
    ///
    /// ```
    /// use ndstride::DoubleArray;
    ///
    /// let a = DoubleArray::from_shape_vec(&[2, 3], vec![1., 4., 2., 5., 3., 6.]).unwrap();
    /// assert_eq!(a.get2(1, 2).unwrap(), 6.);
    /// ```
    pub fn from_shape_vec(shape: &[usize], v: Vec<T>) -> Result<Self> {
        let layout = Layout::new(shape)?;
        if layout.len() != v.len() {
            return Err(error::with_detail(
                ErrorKind::ShapeMismatch,
                format!("{} elements for shape {:?}", v.len(), shape),
            ));
        }
        Ok(Array::owned(v, layout))
    }

    /// Create a 2-d array from row-major nested rows.
    ///
    /// **Errors** with `ShapeMismatch` if the rows differ in length.
    ///
    /// ```
    /// use ndstride::IntArray;
    ///
    /// let a = IntArray::from_rows(&[vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
    /// assert_eq!(a.shape(), &[2, 3]);
    /// assert_eq!(a.to_vec(), vec![1, 4, 2, 5, 3, 6]);
    /// ```
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let m = rows.len();
        let n = rows.first().map_or(0, Vec::len);
        if let Some(r) = rows.iter().find(|r| r.len() != n) {
            return Err(error::size_mismatch(n, r.len()));
        }
        let mut v = Vec::with_capacity(m * n);
        for j in 0..n {
            v.extend(rows.iter().map(|r| r[j]));
        }
        Array::from_shape_vec(&[m, n], v)
    }

    /// Create an array of `shape` with `f(coords)` at each coordinate.
    ///
    /// `f` is called once per element in linear order.
    pub fn from_shape_fn<F>(shape: &[usize], mut f: F) -> Result<Self>
    where
        F: FnMut(&[usize]) -> T,
    {
        let layout = Layout::new(shape)?;
        let v = (0..layout.len())
            .map(|i| f(&indexer::unravel(i, shape)))
            .collect();
        Ok(Array::owned(v, layout))
    }

    /// Create an identity matrix of size `n` (square 2-d array).
    ///
    /// **Errors** with `Overflow` if `n * n` would overflow `usize`.
    pub fn eye(n: usize) -> Result<Self> {
        let eye = Array::zeros(&[n, n])?;
        for i in 0..n {
            eye.set2(i, i, T::one())?;
        }
        Ok(eye)
    }
}

impl Array<f64> {
    /// Create a one-dimensional array of `n` evenly spaced elements from
    /// `start` to `end` (inclusive).
    ///
    /// ```
    /// use ndstride::DoubleArray;
    ///
    /// let a = DoubleArray::linspace(0., 1., 5);
    /// assert_eq!(a.to_vec(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    /// ```
    pub fn linspace(start: f64, end: f64, n: usize) -> Self {
        Array::from_vec(linspace::linspace(start, end, n).collect())
    }

    /// Create a one-dimensional array from the half-open interval
    /// `[start, end)` with elements spaced by `step`.
    pub fn range(start: f64, end: f64, step: f64) -> Self {
        Array::from_vec(linspace::range(start, end, step).collect())
    }
}
