// Copyright 2024 ndstride developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Diagonal matrices stored as their diagonal.

use log::trace;

use crate::array::check_matrix;
use crate::error::{self, ErrorKind, Result};
use crate::layout::Layout;
use crate::DoubleArray;

/// A `rows × columns` double matrix that is zero off its main diagonal.
///
/// Only the `min(rows, columns)` diagonal entries are stored. Reading an
/// off-diagonal entry gives `0.0`; writing one is an error.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagonal {
    values: DoubleArray,
    rows: usize,
    columns: usize,
}

impl Diagonal {
    /// A `rows × columns` diagonal matrix with the given diagonal.
    ///
    /// **Errors** with `ShapeMismatch` unless `values` has
    /// `min(rows, columns)` elements.
    pub fn new(values: Vec<f64>, rows: usize, columns: usize) -> Result<Diagonal> {
        let size = rows.min(columns);
        if values.len() != size {
            return Err(error::size_mismatch(size, values.len()));
        }
        Ok(Diagonal {
            values: DoubleArray::from_vec(values),
            rows,
            columns,
        })
    }

    /// A square diagonal matrix with the given diagonal.
    pub fn square(values: Vec<f64>) -> Diagonal {
        let n = values.len();
        Diagonal {
            values: DoubleArray::from_vec(values),
            rows: n,
            columns: n,
        }
    }

    /// The square identity matrix of size `n`.
    pub fn identity(n: usize) -> Diagonal {
        Diagonal::square(vec![1.0; n])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn shape(&self) -> [usize; 2] {
        [self.rows, self.columns]
    }

    /// Number of elements of the dense matrix, `rows * columns`.
    pub fn len(&self) -> usize {
        self.rows * self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of diagonal entries, `min(rows, columns)`.
    pub fn diagonal_size(&self) -> usize {
        self.values.len()
    }

    /// The diagonal entry at `(i, i)`.
    pub fn get_diagonal(&self, i: usize) -> Result<f64> {
        self.values.get(i)
    }

    pub fn set_diagonal(&self, i: usize, value: f64) -> Result<()> {
        self.values.set(i, value)
    }

    /// The diagonal, as a view.
    pub fn diagonal(&self) -> DoubleArray {
        self.values.transpose()
    }

    fn check_bounds(&self, i: usize, j: usize) -> Result<()> {
        if i >= self.rows {
            return Err(error::out_of_bounds(i, self.rows));
        }
        if j >= self.columns {
            return Err(error::out_of_bounds(j, self.columns));
        }
        Ok(())
    }

    /// The entry at `(i, j)`; `0.0` off the diagonal.
    pub fn get2(&self, i: usize, j: usize) -> Result<f64> {
        self.check_bounds(i, j)?;
        if i == j {
            self.values.get(i)
        } else {
            Ok(0.0)
        }
    }

    /// **Errors** with `IllegalState` for an off-diagonal entry.
    pub fn set2(&self, i: usize, j: usize, value: f64) -> Result<()> {
        self.check_bounds(i, j)?;
        if i != j {
            return Err(error::with_detail(
                ErrorKind::IllegalState,
                format!("can't set non-diagonal entry ({}, {})", i, j),
            ));
        }
        self.values.set(i, value)
    }

    /// The entry at column-major linear `index` of the dense matrix.
    pub fn get(&self, index: usize) -> Result<f64> {
        if index >= self.len() {
            return Err(error::out_of_bounds(index, self.len()));
        }
        self.get2(index % self.rows, index / self.rows)
    }

    /// Replace each diagonal entry `x` with `f(x)`, in place.
    pub fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnMut(f64) -> f64,
    {
        self.values.update(f)
    }

    /// A new diagonal matrix with `f` of each diagonal entry.
    pub fn map<F>(&self, f: F) -> Diagonal
    where
        F: FnMut(f64) -> f64,
    {
        Diagonal {
            values: self.values.map(f),
            rows: self.rows,
            columns: self.columns,
        }
    }

    pub fn mul_scalar(&self, scalar: f64) -> Diagonal {
        self.map(|x| x * scalar)
    }

    /// The `columns × rows` transpose, as a new diagonal matrix.
    pub fn transpose(&self) -> Diagonal {
        Diagonal {
            values: self.values.copy(),
            rows: self.columns,
            columns: self.rows,
        }
    }

    pub fn copy(&self) -> Diagonal {
        Diagonal {
            values: self.values.copy(),
            rows: self.rows,
            columns: self.columns,
        }
    }

    /// The dense matrix, as a new owning array.
    pub fn to_array(&self) -> DoubleArray {
        let mut v = vec![0.0; self.len()];
        for i in 0..self.diagonal_size() {
            v[i * self.rows + i] = self.values.at(i);
        }
        DoubleArray::owned(v, Layout::natural(&[self.rows, self.columns]))
    }

    /// The product `self * other`, scaling row `i` of `other` by the
    /// diagonal entry `i`.
    ///
    /// **Errors** with `ShapeMismatch` unless `other` has `columns()` rows.
    pub fn mmul(&self, other: &DoubleArray) -> Result<DoubleArray> {
        let (k, n) = check_matrix(other, "mmul")?;
        if self.columns != k {
            return Err(nonconformant(&[self.rows, self.columns], other.shape()));
        }
        trace!("diagonal mmul {}x{} * {}x{}", self.rows, self.columns, k, n);
        let m = self.rows;
        let mut v = vec![0.0; m * n];
        for j in 0..n {
            for i in 0..self.diagonal_size() {
                v[j * m + i] = other.at2(i, j) * self.values.at(i);
            }
        }
        Ok(DoubleArray::owned(v, Layout::natural(&[m, n])))
    }
}

fn nonconformant(a: &[usize], b: &[usize]) -> error::ArrayError {
    error::with_detail(
        ErrorKind::ShapeMismatch,
        format!("non-conformant arguments {:?} * {:?}", a, b),
    )
}

impl DoubleArray {
    /// The product `self * diagonal`, scaling column `j` of `self` by the
    /// diagonal entry `j`.
    ///
    /// Equal to `self.mmul(&diagonal.to_array())` in `O(rows * columns)`.
    ///
    /// **Errors** with `ShapeMismatch` unless `diagonal` has `columns()` rows.
    pub fn mmul_diagonal(&self, diagonal: &Diagonal) -> Result<DoubleArray> {
        let (m, k) = check_matrix(self, "mmul")?;
        if k != diagonal.rows() {
            return Err(nonconformant(self.shape(), &diagonal.shape()));
        }
        let n = diagonal.columns();
        trace!("mmul {}x{} * diagonal {}x{}", m, k, k, n);
        let mut v = vec![0.0; m * n];
        for j in 0..diagonal.diagonal_size() {
            let d = diagonal.values.at(j);
            for i in 0..m {
                v[j * m + i] = self.at2(i, j) * d;
            }
        }
        Ok(DoubleArray::owned(v, Layout::natural(&[m, n])))
    }
}
