// Copyright 2024 ndstride developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Selection by index lists, ranges and masks.
//!
//! Range slices are views; index and mask selections gather into a new
//! owning array.

use log::debug;

use crate::array::{check_matrix, check_same_shape};
use crate::element::Element;
use crate::error::{self, ErrorKind, Result};
use crate::indexer;
use crate::layout::Layout;
use crate::range::Range;
use crate::{Array, BitArray};

fn check_mask_len(mask: &BitArray, len: usize) -> Result<()> {
    if mask.len() != len {
        return Err(error::size_mismatch(len, mask.len()));
    }
    Ok(())
}

fn true_positions(mask: &BitArray) -> Vec<usize> {
    (0..mask.len()).filter(|&i| mask.at(i)).collect()
}

fn check_index(index: usize, bound: usize) -> Result<usize> {
    if index >= bound {
        return Err(error::out_of_bounds(index, bound));
    }
    Ok(index)
}

impl<T: Element> Array<T> {
    /// The elements at linear `indices`, in the given order, as a 1-d array.
    ///
    /// **Errors** with `IndexOutOfRange` if an index is out of bounds.
    pub fn slice_indices(&self, indices: &[usize]) -> Result<Array<T>> {
        let v = indices.iter().map(|&i| self.get(i)).collect::<Result<Vec<_>>>()?;
        Ok(Array::from_vec(v))
    }

    /// The elements of the flattened array selected by `range`.
    ///
    /// If the elements are evenly spaced in storage (any 1-d array, and
    /// rows, columns and naturally strided arrays) the result is a view of
    /// this array. Otherwise the selected elements are copied into a new
    /// owning array.
    ///
    /// **Errors** with `IndexOutOfRange` unless `range` has a positive step
    /// and lies within `0..=len()`.
    pub fn slice(&self, range: &Range) -> Result<Array<T>> {
        match self.layout().flatten() {
            Some(flat) => Ok(self.with_layout(flat.ranges(&[*range])?)),
            None => {
                debug!("flat slice {:?} of {:?} strides {:?}, copying", range, self.shape(), self.strides());
                let (start, end, step) = range.as_slice_bounds(self.len())?;
                Ok(Array::from_vec((start..end).step_by(step).map(|i| self.at(i)).collect()))
            }
        }
    }

    /// The elements where `mask` is true, in linear order, as a 1-d array.
    ///
    /// **Errors** with `ShapeMismatch` unless `mask` has the shape of `self`.
    ///
    /// ```
    /// use ndstride::{BitArray, IntArray};
    ///
    /// let a = IntArray::from_vec(vec![10, 20, 30, 40]);
    /// let mask = BitArray::from_vec(vec![true, false, false, true]);
    /// assert_eq!(a.slice_mask(&mask).unwrap().to_vec(), vec![10, 40]);
    /// ```
    pub fn slice_mask(&self, mask: &BitArray) -> Result<Array<T>> {
        check_same_shape(self, mask)?;
        let v = (0..self.len()).filter(|&i| mask.at(i)).map(|i| self.at(i)).collect();
        Ok(Array::from_vec(v))
    }

    /// The rows of a 2-d array at `indices`, in the given order.
    pub fn slice_rows(&self, indices: &[usize]) -> Result<Array<T>> {
        let (m, n) = check_matrix(self, "row selection")?;
        for &i in indices {
            check_index(i, m)?;
        }
        let mut v = Vec::with_capacity(indices.len() * n);
        for j in 0..n {
            v.extend(indices.iter().map(|&i| self.at2(i, j)));
        }
        Ok(Array::owned(v, Layout::natural(&[indices.len(), n])))
    }

    /// The columns of a 2-d array at `indices`, in the given order.
    pub fn slice_columns(&self, indices: &[usize]) -> Result<Array<T>> {
        let (m, n) = check_matrix(self, "column selection")?;
        for &j in indices {
            check_index(j, n)?;
        }
        let mut v = Vec::with_capacity(m * indices.len());
        for &j in indices {
            v.extend((0..m).map(|i| self.at2(i, j)));
        }
        Ok(Array::owned(v, Layout::natural(&[m, indices.len()])))
    }

    /// The rows of a 2-d array where `mask` is true, in original order.
    ///
    /// **Errors** with `ShapeMismatch` unless `mask` has one element per row.
    pub fn slice_rows_mask(&self, mask: &BitArray) -> Result<Array<T>> {
        let (m, _) = check_matrix(self, "row selection")?;
        check_mask_len(mask, m)?;
        self.slice_rows(&true_positions(mask))
    }

    /// The columns of a 2-d array where `mask` is true, in original order.
    pub fn slice_columns_mask(&self, mask: &BitArray) -> Result<Array<T>> {
        let (_, n) = check_matrix(self, "column selection")?;
        check_mask_len(mask, n)?;
        self.slice_columns(&true_positions(mask))
    }

    /// Gather by parallel index lists, one list for each leading axis.
    ///
    /// With `k` lists of common length `n`, element `p` of the selection is
    /// the sub-array at coordinates `(indices[0][p], …, indices[k-1][p])`;
    /// the result has shape `[n]` followed by the `ndim() - k` trailing
    /// axes, which are kept whole. The result is a new owning array.
    ///
    /// **Errors** with `IllegalDimension` unless `1 <= k <= ndim()`, with
    /// `ShapeMismatch` if the lists differ in length, and with
    /// `IndexOutOfRange` for an out of bounds index.
    ///
    /// ```
    /// use ndstride::IntArray;
    ///
    /// let a = IntArray::from_rows(&[vec![1, 2], vec![3, 4]]).unwrap();
    /// let d = a.select_indices(&[vec![0, 1], vec![0, 1]]).unwrap();
    /// assert_eq!(d.to_vec(), vec![1, 4]);
    /// ```
    pub fn select_indices(&self, indices: &[Vec<usize>]) -> Result<Array<T>> {
        let k = indices.len();
        if k == 0 || k > self.ndim() {
            return Err(error::with_detail(
                ErrorKind::IllegalDimension,
                format!("{} index lists for a {}-d array", k, self.ndim()),
            ));
        }
        let n = indices[0].len();
        if let Some(list) = indices.iter().find(|list| list.len() != n) {
            return Err(error::with_detail(
                ErrorKind::ShapeMismatch,
                format!("index lists of lengths {} and {} can't be used together", n, list.len()),
            ));
        }
        for (list, &d) in indices.iter().zip(self.shape()) {
            for &i in list {
                check_index(i, d)?;
            }
        }
        let mut shape = vec![n];
        shape.extend_from_slice(&self.shape()[k..]);
        let layout = Layout::new(&shape)?;
        let mut coords = vec![0; self.ndim()];
        let v = (0..layout.len())
            .map(|i| {
                let at = indexer::unravel(i, &shape);
                for (axis, list) in indices.iter().enumerate() {
                    coords[axis] = list[at[0]];
                }
                coords[k..].copy_from_slice(&at[1..]);
                self.data_at(&coords)
            })
            .collect();
        Ok(Array::owned(v, layout))
    }

    fn data_at(&self, coords: &[usize]) -> T {
        let pos = indexer::linear_offset(coords, self.offset(), self.strides());
        self.storage().get(pos)
    }
}
