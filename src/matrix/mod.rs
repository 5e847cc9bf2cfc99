// Copyright 2024 ndstride developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Two-dimensional matrices.
//!
//! [`Matrix`] is the fixed-rank counterpart of [`Array`]: the number of
//! rows and columns is stored directly, and every view (sub-block, stepped
//! row/column ranges, flat ranges, diagonal, type conversion) wraps its
//! parent and reads and writes through the parent's accessors instead of
//! through a shared stride description.
//!
//! Only [`copy`](Matrix::copy), [`transpose`](Matrix::transpose) and the
//! arithmetic methods allocate. [`reshape`](Matrix::reshape) shares the
//! storage of a dense matrix and copies any other one.

mod views;

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use log::debug;
use num_complex::Complex64;

use crate::array::check_matrix;
use crate::diagonal::Diagonal;
use crate::element::{Element, Numeric};
use crate::error::{self, ErrorKind, Result};
use crate::impl_ops::Op;
use crate::indexer;
use crate::range::Range;
use crate::storage::{Buffer, Storage};
use crate::{Array, BitArray};

use self::views::{ConvertedMatrix, DiagonalMatrix, FlatSliceMatrix, MatrixView, SliceMatrix};

/// Element access of a matrix implementation.
///
/// Indices passed in have been bounds checked against `rows()` and
/// `columns()` by the [`Matrix`] handle.
pub(crate) trait RawMatrix<T: Element> {
    fn rows(&self) -> usize;

    fn columns(&self) -> usize;

    /// Element at column-major linear `index`.
    fn load(&self, index: usize) -> Result<T>;

    fn store(&self, index: usize, value: T) -> Result<()>;

    fn load2(&self, i: usize, j: usize) -> Result<T> {
        self.load(indexer::column_major_linear(i, j, self.rows(), self.columns())?)
    }

    fn store2(&self, i: usize, j: usize, value: T) -> Result<()> {
        self.store(indexer::column_major_linear(i, j, self.rows(), self.columns())?, value)
    }

    fn is_view(&self) -> bool {
        true
    }

    /// The column-major buffer, if the matrix is one.
    fn buffer(&self) -> Option<&Rc<Buffer<T>>> {
        None
    }
}

/// A matrix that stores its elements in a column-major buffer.
struct DenseMatrix<T: Element> {
    data: Rc<Buffer<T>>,
    rows: usize,
    columns: usize,
    view: bool,
}

impl<T: Element> RawMatrix<T> for DenseMatrix<T> {
    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    fn load(&self, index: usize) -> Result<T> {
        Ok(self.data.get(index))
    }

    fn store(&self, index: usize, value: T) -> Result<()> {
        self.data.set(index, value)
    }

    fn is_view(&self) -> bool {
        self.view
    }

    fn buffer(&self) -> Option<&Rc<Buffer<T>>> {
        Some(&self.data)
    }
}

/// A two-dimensional matrix of elements `T`.
///
/// Like [`Array`], a `Matrix` is a handle: cloning it shares the elements.
///
/// ```
/// use ndstride::Matrix;
///
/// let m = Matrix::from_rows(&[vec![1., 2., 3.], vec![4., 5., 6.]]).unwrap();
/// let row = m.row_view(0).unwrap();
/// row.set(1, 99.).unwrap();
/// assert_eq!(m.get2(0, 1).unwrap(), 99.);
/// ```
pub struct Matrix<T: Element> {
    raw: Rc<dyn RawMatrix<T>>,
}

impl<T: Element> Clone for Matrix<T> {
    fn clone(&self) -> Self {
        Matrix { raw: self.raw.clone() }
    }
}

/// # Construction
impl<T: Element> Matrix<T> {
    fn wrap<R: RawMatrix<T> + 'static>(raw: R) -> Self {
        Matrix { raw: Rc::new(raw) }
    }

    fn dense(v: Vec<T>, rows: usize, columns: usize) -> Self {
        Matrix::wrap(DenseMatrix {
            data: Rc::new(Buffer::from_vec(v)),
            rows,
            columns,
            view: false,
        })
    }

    /// A `rows × columns` matrix of zeros.
    ///
    /// **Errors** with `Overflow` if `rows * columns` does not fit a `usize`.
    pub fn zeros(rows: usize, columns: usize) -> Result<Self> {
        let len = indexer::size(&[rows, columns])?;
        Ok(Matrix::dense(vec![T::zero(); len], rows, columns))
    }

    /// A `rows × columns` matrix over `v` in column-major order.
    ///
    /// **Errors** with `ShapeMismatch` if `v` has the wrong length.
    pub fn from_shape_vec(rows: usize, columns: usize, v: Vec<T>) -> Result<Self> {
        let len = indexer::size(&[rows, columns])?;
        if len != v.len() {
            return Err(error::size_mismatch(len, v.len()));
        }
        Ok(Matrix::dense(v, rows, columns))
    }

    /// A matrix from row-major nested rows.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let a = Array::from_rows(rows)?;
        Ok(Matrix::dense(a.to_vec(), a.shape()[0], a.shape()[1]))
    }

    /// A copy of a 2-d array.
    ///
    /// **Errors** with `IllegalState` unless `a` is 2-d.
    pub fn from_array(a: &Array<T>) -> Result<Self> {
        let (m, n) = check_matrix(a, "a matrix")?;
        Ok(Matrix::dense(a.to_vec(), m, n))
    }
}

/// # Element access
impl<T: Element> Matrix<T> {
    pub fn rows(&self) -> usize {
        self.raw.rows()
    }

    pub fn columns(&self) -> usize {
        self.raw.columns()
    }

    pub fn shape(&self) -> [usize; 2] {
        [self.rows(), self.columns()]
    }

    pub fn len(&self) -> usize {
        self.rows() * self.columns()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_square(&self) -> bool {
        self.rows() == self.columns()
    }

    pub fn is_vector(&self) -> bool {
        self.rows() == 1 || self.columns() == 1
    }

    /// `true` unless the matrix allocated its own storage.
    pub fn is_view(&self) -> bool {
        self.raw.is_view()
    }

    /// Element at column-major linear `index`.
    pub fn get(&self, index: usize) -> Result<T> {
        if index >= self.len() {
            return Err(error::out_of_bounds(index, self.len()));
        }
        self.raw.load(index)
    }

    pub fn set(&self, index: usize, value: T) -> Result<()> {
        if index >= self.len() {
            return Err(error::out_of_bounds(index, self.len()));
        }
        self.raw.store(index, value)
    }

    /// Element at row `i`, column `j`.
    pub fn get2(&self, i: usize, j: usize) -> Result<T> {
        indexer::column_major_linear(i, j, self.rows(), self.columns())?;
        self.raw.load2(i, j)
    }

    pub fn set2(&self, i: usize, j: usize, value: T) -> Result<()> {
        indexer::column_major_linear(i, j, self.rows(), self.columns())?;
        self.raw.store2(i, j, value)
    }

    /// The elements in column-major order.
    pub fn to_vec(&self) -> Result<Vec<T>> {
        (0..self.len()).map(|i| self.raw.load(i)).collect()
    }

    /// The elements as row-major nested rows.
    pub fn to_rows(&self) -> Result<Vec<Vec<T>>> {
        (0..self.rows())
            .map(|i| (0..self.columns()).map(|j| self.raw.load2(i, j)).collect())
            .collect()
    }

    /// A fresh owning 2-d array with the same elements.
    pub fn to_array(&self) -> Result<Array<T>> {
        Array::from_shape_vec(&[self.rows(), self.columns()], self.to_vec()?)
    }

    /// Overwrite the elements with those of `other`, in column-major order.
    ///
    /// **Errors** with `ShapeMismatch` if the lengths differ.
    pub fn assign(&self, other: &Matrix<T>) -> Result<()> {
        if self.len() != other.len() {
            return Err(error::size_mismatch(self.len(), other.len()));
        }
        for i in 0..self.len() {
            self.raw.store(i, other.raw.load(i)?)?;
        }
        Ok(())
    }

    pub fn fill(&self, value: T) -> Result<()> {
        for i in 0..self.len() {
            self.raw.store(i, value)?;
        }
        Ok(())
    }

    /// A new matrix with `f` of each element.
    pub fn map<U, F>(&self, mut f: F) -> Result<Matrix<U>>
    where
        U: Element,
        F: FnMut(T) -> U,
    {
        let v = (0..self.len()).map(|i| self.raw.load(i).map(&mut f)).collect::<Result<_>>()?;
        Ok(Matrix::dense(v, self.rows(), self.columns()))
    }
}

/// # Views
impl<T: Element> Matrix<T> {
    /// The `rows × columns` block starting at `(row_offset, col_offset)`.
    ///
    /// **Errors** with `IndexOutOfRange` if the block is not inside the matrix.
    pub fn get_view(&self, row_offset: usize, col_offset: usize, rows: usize, columns: usize) -> Result<Matrix<T>> {
        if row_offset + rows > self.rows() || col_offset + columns > self.columns() {
            return Err(error::with_detail(
                ErrorKind::IndexOutOfRange,
                format!(
                    "view [{}..{}, {}..{}] exceeds {}x{}",
                    row_offset,
                    row_offset + rows,
                    col_offset,
                    col_offset + columns,
                    self.rows(),
                    self.columns()
                ),
            ));
        }
        Ok(Matrix::wrap(MatrixView {
            parent: self.raw.clone(),
            row_offset,
            col_offset,
            rows,
            columns,
        }))
    }

    /// Row `i`, as a `1 × columns` view.
    pub fn row_view(&self, i: usize) -> Result<Matrix<T>> {
        self.get_view(i, 0, 1, self.columns())
    }

    /// Column `j`, as a `rows × 1` view.
    pub fn column_view(&self, j: usize) -> Result<Matrix<T>> {
        self.get_view(0, j, self.rows(), 1)
    }

    /// The main diagonal, as a `min(rows, columns) × 1` view.
    pub fn diagonal_view(&self) -> Matrix<T> {
        Matrix::wrap(DiagonalMatrix {
            parent: self.raw.clone(),
        })
    }

    /// The rows selected by `rows` and the columns selected by `columns`.
    ///
    /// **Errors** with `IndexOutOfRange` if a range does not fit.
    pub fn slice(&self, rows: &Range, columns: &Range) -> Result<Matrix<T>> {
        Ok(Matrix::wrap(SliceMatrix {
            parent: self.raw.clone(),
            row_range: range_triple(rows, self.rows())?,
            col_range: range_triple(columns, self.columns())?,
        }))
    }

    /// The elements of the column-major flattening selected by `range`,
    /// as a column view.
    pub fn slice_flat(&self, range: &Range) -> Result<Matrix<T>> {
        let (start, step, len) = range_triple(range, self.len())?;
        Ok(Matrix::wrap(FlatSliceMatrix {
            parent: self.raw.clone(),
            start,
            step,
            len,
        }))
    }

    /// The elements at linear `indices`, copied into a column.
    pub fn slice_indices(&self, indices: &[usize]) -> Result<Matrix<T>> {
        let v = indices.iter().map(|&i| self.get(i)).collect::<Result<Vec<_>>>()?;
        let n = v.len();
        Ok(Matrix::dense(v, n, 1))
    }

    /// The elements where `mask` is true, copied into a column.
    ///
    /// **Errors** with `ShapeMismatch` unless `mask` has `len()` elements.
    pub fn slice_mask(&self, mask: &BitArray) -> Result<Matrix<T>> {
        if mask.len() != self.len() {
            return Err(error::size_mismatch(self.len(), mask.len()));
        }
        let positions: Vec<usize> = (0..mask.len()).filter(|&i| mask.at(i)).collect();
        self.slice_indices(&positions)
    }

    /// The rows where `mask` is true, copied, in original order.
    ///
    /// **Errors** with `ShapeMismatch` unless `mask` has one element per row.
    pub fn slice_rows_mask(&self, mask: &BitArray) -> Result<Matrix<T>> {
        if mask.len() != self.rows() {
            return Err(error::size_mismatch(self.rows(), mask.len()));
        }
        let rows: Vec<usize> = (0..mask.len()).filter(|&i| mask.at(i)).collect();
        let mut v = Vec::with_capacity(rows.len() * self.columns());
        for j in 0..self.columns() {
            for &i in &rows {
                v.push(self.raw.load2(i, j)?);
            }
        }
        Ok(Matrix::dense(v, rows.len(), self.columns()))
    }

    /// The columns where `mask` is true, copied, in original order.
    pub fn slice_columns_mask(&self, mask: &BitArray) -> Result<Matrix<T>> {
        if mask.len() != self.columns() {
            return Err(error::size_mismatch(self.columns(), mask.len()));
        }
        let columns: Vec<usize> = (0..mask.len()).filter(|&j| mask.at(j)).collect();
        let mut v = Vec::with_capacity(columns.len() * self.rows());
        for &j in &columns {
            for i in 0..self.rows() {
                v.push(self.raw.load2(i, j)?);
            }
        }
        Ok(Matrix::dense(v, self.rows(), columns.len()))
    }

    /// The matrix with `rows × columns` shape, same column-major order.
    ///
    /// Shares the storage of a dense matrix, copies any other.
    ///
    /// **Errors** with `ShapeMismatch` if the sizes differ.
    pub fn reshape(&self, rows: usize, columns: usize) -> Result<Matrix<T>> {
        let len = indexer::size(&[rows, columns])?;
        if len != self.len() {
            return Err(error::with_detail(
                ErrorKind::ShapeMismatch,
                format!(
                    "total size of new matrix must be unchanged ({}x{}, {}x{})",
                    self.rows(),
                    self.columns(),
                    rows,
                    columns
                ),
            ));
        }
        match self.raw.buffer() {
            Some(data) => Ok(Matrix::wrap(DenseMatrix {
                data: data.clone(),
                rows,
                columns,
                view: true,
            })),
            None => {
                debug!("reshape of a {}x{} matrix view materialises it", self.rows(), self.columns());
                Ok(Matrix::dense(self.to_vec()?, rows, columns))
            }
        }
    }

    /// A fresh owning copy.
    pub fn copy(&self) -> Result<Matrix<T>> {
        if self.is_view() {
            debug!("materialising a {}x{} matrix view", self.rows(), self.columns());
        }
        Ok(Matrix::dense(self.to_vec()?, self.rows(), self.columns()))
    }

    /// The transpose, as a fresh owning matrix.
    pub fn transpose(&self) -> Result<Matrix<T>> {
        let (m, n) = (self.rows(), self.columns());
        let mut v = Vec::with_capacity(m * n);
        for i in 0..m {
            for j in 0..n {
                v.push(self.raw.load2(i, j)?);
            }
        }
        Ok(Matrix::dense(v, n, m))
    }
}

fn range_triple(range: &Range, len: usize) -> Result<(usize, usize, usize)> {
    let (start, end, step) = range.as_slice_bounds(len)?;
    Ok((start, step, (end - start + step - 1) / step))
}

/// # Type coercion
///
/// The method matching `T` returns the same matrix; the others return a
/// converting view.
impl<T: Element> Matrix<T> {
    fn convert_to<U: Element>(&self, to: fn(T) -> U, from: fn(U) -> T) -> Matrix<U> {
        if let Some(same) = (self as &dyn Any).downcast_ref::<Matrix<U>>() {
            return same.clone();
        }
        Matrix::wrap(ConvertedMatrix {
            parent: self.raw.clone(),
            to,
            from,
        })
    }

    pub fn as_f64(&self) -> Matrix<f64> {
        self.convert_to(T::to_f64, T::from_f64)
    }

    pub fn as_i32(&self) -> Matrix<i32> {
        self.convert_to(T::to_i32, T::from_i32)
    }

    pub fn as_i64(&self) -> Matrix<i64> {
        self.convert_to(T::to_i64, T::from_i64)
    }

    pub fn as_bool(&self) -> Matrix<bool> {
        self.convert_to(T::to_bool, T::from_bool)
    }

    pub fn as_complex(&self) -> Matrix<Complex64> {
        self.convert_to(T::to_complex, T::from_complex)
    }

    /// Return `true` if `a` and `b` are handles to the same matrix.
    pub fn same_instance(a: &Matrix<T>, b: &Matrix<T>) -> bool {
        Rc::as_ptr(&a.raw) as *const u8 == Rc::as_ptr(&b.raw) as *const u8
    }
}

/// # Arithmetic
impl<T: Numeric> Matrix<T> {
    fn zip_map<F>(&self, other: &Matrix<T>, mut f: F) -> Result<Matrix<T>>
    where
        F: FnMut(T, T) -> T,
    {
        if self.shape() != other.shape() {
            return Err(error::shape_mismatch(&self.shape(), &other.shape()));
        }
        let v = (0..self.len())
            .map(|i| Ok(f(self.raw.load(i)?, other.raw.load(i)?)))
            .collect::<Result<_>>()?;
        Ok(Matrix::dense(v, self.rows(), self.columns()))
    }

    pub fn add(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.zip_map(other, Numeric::plus)
    }

    pub fn sub(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.zip_map(other, Numeric::minus)
    }

    /// Elementwise product.
    pub fn mul(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.zip_map(other, Numeric::times)
    }

    pub fn mul_scalar(&self, scalar: T) -> Result<Matrix<T>> {
        self.map(|x| x.times(scalar))
    }

    pub fn negate(&self) -> Result<Matrix<T>> {
        self.map(Numeric::negated)
    }

    /// Matrix product `self * other`.
    pub fn mmul(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.mmul_with(T::one(), Op::Keep, other, Op::Keep)
    }

    /// Matrix product `alpha * op_a(self) * op_b(other)`, without
    /// materialising either transpose.
    ///
    /// **Errors** with `ShapeMismatch` if the inner dimensions differ.
    pub fn mmul_with(&self, alpha: T, op_a: Op, other: &Matrix<T>, op_b: Op) -> Result<Matrix<T>> {
        let (m, k) = op_a.apply(self.rows(), self.columns());
        let (k2, n) = op_b.apply(other.rows(), other.columns());
        if k != k2 {
            return Err(error::with_detail(
                ErrorKind::ShapeMismatch,
                format!("inner dimensions differ: {}x{} * {}x{}", m, k, k2, n),
            ));
        }
        let a = |i: usize, l: usize| match op_a {
            Op::Keep => self.raw.load2(i, l),
            Op::Transpose => self.raw.load2(l, i),
        };
        let b = |l: usize, j: usize| match op_b {
            Op::Keep => other.raw.load2(l, j),
            Op::Transpose => other.raw.load2(j, l),
        };
        let mut c = vec![T::zero(); m * n];
        for j in 0..n {
            for l in 0..k {
                let blj = b(l, j)?;
                for i in 0..m {
                    c[j * m + i] = c[j * m + i].plus(a(i, l)?.times(blj));
                }
            }
        }
        if alpha != T::one() {
            c.iter_mut().for_each(|x| *x = alpha.times(*x));
        }
        Ok(Matrix::dense(c, m, n))
    }
}

impl Matrix<f64> {
    /// The product `self * diagonal`, scaling column `j` by diagonal entry `j`.
    ///
    /// **Errors** with `ShapeMismatch` unless `diagonal` has `columns()` rows.
    pub fn mmul_diagonal(&self, diagonal: &Diagonal) -> Result<Matrix<f64>> {
        let a = self.to_array()?;
        let p = a.mmul_diagonal(diagonal)?;
        Ok(Matrix::dense(p.to_vec(), p.shape()[0], p.shape()[1]))
    }
}

impl<T: Element> PartialEq for Matrix<T> {
    fn eq(&self, other: &Matrix<T>) -> bool {
        self.shape() == other.shape()
            && (0..self.len()).all(|i| match (self.raw.load(i), other.raw.load(i)) {
                (Ok(a), Ok(b)) => a == b,
                _ => false,
            })
    }
}

impl<T: Element> fmt::Debug for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} matrix {}x{} ", T::NAME, self.rows(), self.columns())?;
        match self.to_rows() {
            Ok(rows) => f.debug_list().entries(rows).finish(),
            Err(e) => write!(f, "<{}>", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_view_resolves_through_parent() {
        let m = Matrix::from_shape_vec(3, 3, (0..9).collect()).unwrap();
        let v = m.get_view(1, 1, 2, 2).unwrap();
        assert_eq!(v.to_vec().unwrap(), vec![4, 5, 7, 8]);
        v.set(3, 80).unwrap();
        assert_eq!(m.get2(2, 2).unwrap(), 80);
        assert!(v.is_view());
        assert!(!m.is_view());
    }

    #[test]
    fn stepped_slice() {
        let m = Matrix::from_shape_vec(4, 4, (0..16).collect()).unwrap();
        let s = m.slice(&Range::with_step(0, 4, 2).unwrap(), &Range::new(1, 3).unwrap()).unwrap();
        assert_eq!(s.shape(), [2, 2]);
        assert_eq!(s.to_vec().unwrap(), vec![4, 6, 8, 10]);
        s.set2(1, 1, -1).unwrap();
        assert_eq!(m.get2(2, 2).unwrap(), -1);
    }

    #[test]
    fn flat_slice_and_diagonal() {
        let m = Matrix::from_shape_vec(2, 3, vec![1., 2., 3., 4., 5., 6.]).unwrap();
        let f = m.slice_flat(&Range::with_step(1, 6, 2).unwrap()).unwrap();
        assert_eq!(f.to_vec().unwrap(), vec![2., 4., 6.]);
        let d = m.diagonal_view();
        assert_eq!(d.to_vec().unwrap(), vec![1., 4.]);
        d.set(1, 0.).unwrap();
        assert_eq!(m.get2(1, 1).unwrap(), 0.);
    }

    #[test]
    fn reshape_shares_dense_only() {
        let m = Matrix::from_shape_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        let r = m.reshape(4, 1).unwrap();
        r.set(0, 10).unwrap();
        assert_eq!(m.get(0).unwrap(), 10);
        let t = m.row_view(0).unwrap().reshape(2, 1).unwrap();
        t.set(0, 0).unwrap();
        assert_eq!(m.get(0).unwrap(), 10);
        assert_eq!(m.reshape(3, 1).unwrap_err().kind(), ErrorKind::ShapeMismatch);
    }

    #[test]
    fn coercion_identity() {
        let m = Matrix::<i64>::zeros(2, 2).unwrap();
        assert!(Matrix::same_instance(&m, &m.as_i64()));
        assert!(m.as_f64().is_view());
    }

    #[test]
    fn transposed_product() {
        let a = Matrix::from_rows(&[vec![1, 2], vec![3, 4], vec![5, 6]]).unwrap();
        let p = a.mmul_with(1, Op::Transpose, &a, Op::Keep).unwrap();
        assert_eq!(p.to_rows().unwrap(), vec![vec![35, 44], vec![44, 56]]);
        assert_eq!(p, a.transpose().unwrap().mmul(&a).unwrap());
    }
}
