// Copyright 2024 ndstride developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Structural operations on strided layouts.
//!
//! A [`Layout`] is the type-independent part of an array: where element
//! `(0, …, 0)` lives, how many elements each axis has, and how far apart
//! they are in storage. Every view an array can produce is a new layout
//! over the same storage, computed here.

use crate::error::{self, ErrorKind, Result};
use crate::indexer;
use crate::range::Range;

/// Offset, shape, strides and major-stride marker of an array.
///
/// The major marker is `0` for arrays in their natural axis order and the
/// index of the leading axis (`ndim - 1`) once the array has been
/// transposed without moving data.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Layout {
    offset: usize,
    shape: Vec<usize>,
    strides: Vec<usize>,
    major: usize,
    len: usize,
}

impl Layout {
    /// Natural column-major layout of `shape` at offset zero.
    ///
    /// **Errors** with `Overflow` if the element count does not fit a `usize`.
    pub fn new(shape: &[usize]) -> Result<Layout> {
        let len = indexer::size(shape)?;
        Ok(Layout {
            offset: 0,
            shape: shape.to_vec(),
            strides: indexer::compute_stride(1, shape),
            major: 0,
            len,
        })
    }

    /// Layout with explicit strides.
    ///
    /// **Errors** with `IllegalDimension` if `shape` and `strides` differ in
    /// length, or `Overflow` if the element count does not fit a `usize`.
    pub fn with_strides(offset: usize, shape: Vec<usize>, strides: Vec<usize>, major: usize) -> Result<Layout> {
        if shape.len() != strides.len() {
            return Err(error::with_detail(
                ErrorKind::IllegalDimension,
                format!("shape {:?} and strides {:?} differ in length", shape, strides),
            ));
        }
        let len = indexer::size(&shape)?;
        Ok(Layout {
            offset,
            shape,
            strides,
            major,
            len,
        })
    }

    /// Natural layout of a shape whose size is known to fit a `usize`.
    pub(crate) fn natural(shape: &[usize]) -> Layout {
        Layout::derived(0, shape.to_vec(), indexer::compute_stride(1, shape), 0)
    }

    /// Natural one-dimensional layout of `len` elements.
    pub(crate) fn contiguous(len: usize) -> Layout {
        Layout::derived(0, vec![len], vec![1], 0)
    }

    // Sub-layouts of a valid layout never overflow.
    fn derived(offset: usize, shape: Vec<usize>, strides: Vec<usize>, major: usize) -> Layout {
        let len = shape.iter().product();
        Layout {
            offset,
            shape,
            strides,
            major,
            len,
        }
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// The axis index of the major stride marker.
    #[inline]
    pub fn major(&self) -> usize {
        self.major
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn is_transposed(&self) -> bool {
        self.major != 0
    }

    /// `true` if the strides are the natural column-major strides.
    pub fn is_natural(&self) -> bool {
        indexer::is_natural(&self.shape, &self.strides)
    }

    pub fn is_matrix(&self) -> bool {
        self.ndim() == 2
    }

    pub fn is_vector(&self) -> bool {
        self.ndim() == 1 || (self.ndim() == 2 && (self.shape[0] == 1 || self.shape[1] == 1))
    }

    fn check_dim(&self, dim: usize) -> Result<()> {
        if dim >= self.ndim() {
            return Err(error::invalid_dimension(dim, self.ndim()));
        }
        Ok(())
    }

    fn check_matrix(&self, what: &str) -> Result<()> {
        if !self.is_matrix() {
            return Err(error::not_a_matrix(what, self.ndim()));
        }
        Ok(())
    }

    pub fn size_of(&self, dim: usize) -> Result<usize> {
        self.check_dim(dim)?;
        Ok(self.shape[dim])
    }

    pub fn stride_of(&self, dim: usize) -> Result<usize> {
        self.check_dim(dim)?;
        Ok(self.strides[dim])
    }

    pub fn rows(&self) -> Result<usize> {
        self.check_matrix("rows")?;
        Ok(self.shape[0])
    }

    pub fn columns(&self) -> Result<usize> {
        self.check_matrix("columns")?;
        Ok(self.shape[1])
    }

    /// Number of one-dimensional vectors along `dim`.
    pub fn vectors(&self, dim: usize) -> Result<usize> {
        self.check_dim(dim)?;
        Ok(match self.shape[dim] {
            0 => 0,
            d => self.len / d,
        })
    }

    /// Storage position of the `index`:th element in linear order.
    #[inline]
    pub fn position(&self, index: usize) -> usize {
        indexer::linearized(index, self.offset, &self.strides, &self.shape)
    }

    /// Storage position of the `index`:th element, bounds checked.
    pub fn checked_position(&self, index: usize) -> Result<usize> {
        if index >= self.len {
            return Err(error::out_of_bounds(index, self.len));
        }
        Ok(self.position(index))
    }

    /// Storage position of `coords`, bounds checked per axis.
    pub fn position_of(&self, coords: &[usize]) -> Result<usize> {
        if coords.len() != self.ndim() {
            return Err(error::with_detail(
                ErrorKind::IllegalDimension,
                format!("{} coordinates for a {}-d array", coords.len(), self.ndim()),
            ));
        }
        for (&c, &d) in coords.iter().zip(&self.shape) {
            if c >= d {
                return Err(error::out_of_bounds(c, d));
            }
        }
        Ok(indexer::linear_offset(coords, self.offset, &self.strides))
    }

    /// Storage position of `(i, j)` in a 2-d array.
    pub fn position2(&self, i: usize, j: usize) -> Result<usize> {
        self.check_matrix("2-d indexing")?;
        if i >= self.shape[0] {
            return Err(error::out_of_bounds(i, self.shape[0]));
        }
        if j >= self.shape[1] {
            return Err(error::out_of_bounds(j, self.shape[1]));
        }
        Ok(self.offset + i * self.strides[0] + j * self.strides[1])
    }

    /// Drop the leading axis, fixing it at `index`.
    pub fn select(&self, index: usize) -> Result<Layout> {
        if self.ndim() == 0 {
            return Err(error::with_detail(
                ErrorKind::IllegalDimension,
                "can't select in a 0-d array",
            ));
        }
        self.select_axis(0, index)
    }

    /// Drop axis `dim`, fixing it at `index`.
    pub fn select_axis(&self, dim: usize, index: usize) -> Result<Layout> {
        self.check_dim(dim)?;
        if index >= self.shape[dim] {
            return Err(error::with_detail(
                ErrorKind::IndexOutOfRange,
                format!(
                    "index {} is out of bounds for dimension {} with size {}",
                    index, dim, self.shape[dim]
                ),
            ));
        }
        let shape = indexer::remove_dim(&self.shape, dim);
        let strides = indexer::remove_dim(&self.strides, dim);
        let major = if self.is_transposed() && shape.len() > 1 {
            shape.len() - 1
        } else {
            0
        };
        Ok(Layout::derived(
            self.offset + index * self.strides[dim],
            shape,
            strides,
            major,
        ))
    }

    /// The `index`:th one-dimensional vector along `dim`.
    ///
    /// Vectors are numbered by the coordinates of all other axes, in
    /// column-major order of the remaining shape. The storage offset is the
    /// strided offset of those coordinates, so the result is correct for any
    /// transposed or sliced layout.
    pub fn vector(&self, dim: usize, index: usize) -> Result<Layout> {
        let vectors = self.vectors(dim)?;
        if index >= vectors {
            return Err(error::with_detail(
                ErrorKind::IndexOutOfRange,
                format!("vector index out of bounds ({} < {})", index, vectors),
            ));
        }
        let rest_shape = indexer::remove_dim(&self.shape, dim);
        let rest_strides = indexer::remove_dim(&self.strides, dim);
        let coords = indexer::unravel(index, &rest_shape);
        let offset = indexer::linear_offset(&coords, self.offset, &rest_strides);
        Ok(Layout::derived(
            offset,
            vec![self.shape[dim]],
            vec![self.strides[dim]],
            0,
        ))
    }

    /// Rectangular sub-block of a 2-d layout.
    pub fn view(&self, row_offset: usize, col_offset: usize, rows: usize, columns: usize) -> Result<Layout> {
        self.check_matrix("a sub-view")?;
        if row_offset + rows > self.shape[0] || col_offset + columns > self.shape[1] {
            return Err(error::with_detail(
                ErrorKind::IndexOutOfRange,
                format!(
                    "view [{}..{}, {}..{}] exceeds shape {:?}",
                    row_offset,
                    row_offset + rows,
                    col_offset,
                    col_offset + columns,
                    self.shape
                ),
            ));
        }
        Ok(Layout::derived(
            self.offset + row_offset * self.strides[0] + col_offset * self.strides[1],
            vec![rows, columns],
            self.strides.clone(),
            self.major,
        ))
    }

    /// Row `i` of a 2-d layout, as a `1 × columns` layout.
    pub fn row(&self, i: usize) -> Result<Layout> {
        self.check_matrix("rows")?;
        self.view(i, 0, 1, self.shape[1])
    }

    /// Column `j` of a 2-d layout, as a `rows × 1` layout.
    pub fn column(&self, j: usize) -> Result<Layout> {
        self.check_matrix("columns")?;
        self.view(0, j, self.shape[0], 1)
    }

    /// Main diagonal of a 2-d layout.
    pub fn diagonal(&self) -> Result<Layout> {
        self.check_matrix("the diagonal")?;
        Ok(Layout::derived(
            self.offset,
            vec![self.shape[0].min(self.shape[1])],
            vec![self.strides[0] + self.strides[1]],
            0,
        ))
    }

    /// Sub-layout keeping `len` elements of axis `dim` from `start`.
    pub fn narrow(&self, dim: usize, start: usize, len: usize) -> Result<Layout> {
        self.check_dim(dim)?;
        if start + len > self.shape[dim] {
            return Err(error::out_of_bounds(start + len, self.shape[dim] + 1));
        }
        let mut shape = self.shape.clone();
        shape[dim] = len;
        Ok(Layout::derived(
            self.offset + start * self.strides[dim],
            shape,
            self.strides.clone(),
            self.major,
        ))
    }

    /// Sub-layout selecting `ranges[i]` along axis `i`; trailing axes are
    /// kept whole.
    pub fn ranges(&self, ranges: &[Range]) -> Result<Layout> {
        if ranges.is_empty() || ranges.len() > self.ndim() {
            return Err(error::with_detail(
                ErrorKind::IllegalDimension,
                format!("{} ranges for a {}-d array", ranges.len(), self.ndim()),
            ));
        }
        let mut offset = self.offset;
        let mut shape = self.shape.clone();
        let mut strides = self.strides.clone();
        for (i, r) in ranges.iter().enumerate() {
            let (start, end, step) = r.as_slice_bounds(self.shape[i])?;
            offset += start * strides[i];
            shape[i] = (end - start + step - 1) / step;
            strides[i] *= step;
        }
        Ok(Layout::derived(offset, shape, strides, self.major))
    }

    /// Natural layout of `shape` at this layout's offset, if this layout is
    /// naturally strided; `None` if the data must be copied first.
    ///
    /// **Errors** with `ShapeMismatch` if the sizes differ.
    pub fn reshape(&self, shape: &[usize]) -> Result<Option<Layout>> {
        let len = indexer::size(shape)?;
        if len != self.len {
            return Err(error::with_detail(
                ErrorKind::ShapeMismatch,
                format!(
                    "total size of new array must be unchanged ({:?}, {:?})",
                    self.shape, shape
                ),
            ));
        }
        if !self.is_natural() {
            return Ok(None);
        }
        Ok(Some(Layout {
            offset: self.offset,
            shape: shape.to_vec(),
            strides: indexer::compute_stride(1, shape),
            major: 0,
            len,
        }))
    }

    /// One-dimensional layout of the same elements in linear order, if they
    /// are evenly spaced in storage; `None` otherwise.
    ///
    /// Axes of length one do not constrain the spacing, so rows, columns,
    /// diagonals and vectors of any layout flatten.
    pub fn flatten(&self) -> Option<Layout> {
        let mut stride = None;
        let mut next = 0;
        for (&d, &s) in self.shape.iter().zip(&self.strides).filter(|&(&d, _)| d != 1) {
            match stride {
                None => stride = Some(s),
                Some(_) if s != next => return None,
                Some(_) => {}
            }
            next = s * d;
        }
        Some(Layout::derived(self.offset, vec![self.len], vec![stride.unwrap_or(1)], 0))
    }

    /// Reverse the axes without moving data.
    ///
    /// One-dimensional layouts are returned unchanged.
    pub fn transpose(&self) -> Layout {
        if self.ndim() <= 1 {
            return self.clone();
        }
        let major = if self.major == 0 { self.ndim() - 1 } else { 0 };
        Layout::derived(
            self.offset,
            indexer::reverse(&self.shape),
            indexer::reverse(&self.strides),
            major,
        )
    }

    /// Broadcast to `shape` by giving repeated axes a zero stride.
    ///
    /// Shapes are aligned at the trailing axis; an axis is compatible if it
    /// has the same length or length one.
    ///
    /// **Errors** with `ShapeMismatch` if the shapes are not compatible.
    pub fn broadcast(&self, shape: &[usize]) -> Result<Layout> {
        if !is_broadcast_compatible(&self.shape, shape) || self.ndim() > shape.len() {
            return Err(error::shape_mismatch(&self.shape, shape));
        }
        let mut strides = vec![0; shape.len()];
        let lead = shape.len() - self.ndim();
        for (i, (&d, &s)) in self.shape.iter().zip(&self.strides).enumerate() {
            if d != 1 {
                strides[lead + i] = s;
            }
        }
        let len = indexer::size(shape)?;
        Ok(Layout {
            offset: self.offset,
            shape: shape.to_vec(),
            strides,
            major: 0,
            len,
        })
    }

    /// Largest storage position this layout can address, plus one.
    pub fn extent(&self) -> usize {
        if self.len == 0 {
            return self.offset;
        }
        self.shape
            .iter()
            .zip(&self.strides)
            .fold(self.offset, |acc, (&d, &s)| acc + (d - 1) * s)
            + 1
    }
}

/// Return `true` if shape `a` can be broadcast against shape `b`.
///
/// Shapes are compared starting with the trailing axis; two axes are
/// compatible if they are equal or the axis of `a` is one.
pub fn is_broadcast_compatible(a: &[usize], b: &[usize]) -> bool {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .all(|(&x, &y)| x == y || x == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_layout() {
        let l = Layout::new(&[2, 3, 4]).unwrap();
        assert_eq!(l.strides(), &[1, 2, 6]);
        assert_eq!(l.len(), 24);
        assert!(l.is_natural());
        assert!(!l.is_transposed());
        assert_eq!(l.vectors(1).unwrap(), 8);
    }

    #[test]
    fn select_drops_leading_axis() {
        let l = Layout::new(&[2, 3]).unwrap();
        let s = l.select(1).unwrap();
        assert_eq!(s.shape(), &[3]);
        assert_eq!(s.strides(), &[2]);
        assert_eq!(s.offset(), 1);
        assert_eq!(l.select(2).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
    }

    #[test]
    fn transpose_toggles_major() {
        let l = Layout::new(&[2, 3, 4]).unwrap();
        let t = l.transpose();
        assert_eq!(t.shape(), &[4, 3, 2]);
        assert_eq!(t.strides(), &[6, 2, 1]);
        assert_eq!(t.major(), 2);
        assert_eq!(t.transpose(), l);
    }

    #[test]
    fn vector_of_transposed() {
        let l = Layout::new(&[2, 3]).unwrap().transpose();
        // rows of the transpose are the columns of the original
        let v = l.vector(1, 2).unwrap();
        assert_eq!(v.offset(), 4);
        assert_eq!(v.strides(), &[1]);
        assert_eq!(v.shape(), &[2]);
    }

    #[test]
    fn diagonal_of_view() {
        let l = Layout::new(&[4, 4]).unwrap();
        let d = l.view(1, 1, 3, 3).unwrap().diagonal().unwrap();
        assert_eq!(d.offset(), 5);
        assert_eq!(d.strides(), &[5]);
        assert_eq!(d.shape(), &[3]);
    }

    #[test]
    fn flatten_ignores_unit_axes() {
        let l = Layout::new(&[3, 4]).unwrap();
        let row = l.row(1).unwrap().flatten().unwrap();
        assert_eq!((row.offset(), row.shape(), row.strides()), (1, &[4][..], &[3][..]));
        let d = l.diagonal().unwrap().flatten().unwrap();
        assert_eq!(d.strides(), &[4]);
        assert_eq!(l.flatten().unwrap().strides(), &[1]);
        assert!(l.transpose().flatten().is_none());
        assert!(l.view(0, 0, 2, 2).unwrap().flatten().is_none());
        assert_eq!(l.view(0, 1, 3, 2).unwrap().flatten().unwrap().offset(), 3);
    }

    #[test]
    fn broadcast_row() {
        let l = Layout::new(&[3]).unwrap();
        let b = l.broadcast(&[2, 3]).unwrap();
        assert_eq!(b.strides(), &[0, 1]);
        assert!(Layout::new(&[3]).unwrap().broadcast(&[3, 2]).is_err());
    }
}
