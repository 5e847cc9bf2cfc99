// Copyright 2024 ndstride developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Matrix views. Each view holds its parent and resolves every access
//! through the parent's own accessors.

use std::rc::Rc;

use crate::element::Element;
use crate::error::Result;
use crate::indexer;

use super::RawMatrix;

/// Rectangular sub-block of a parent matrix.
pub(crate) struct MatrixView<T: Element> {
    pub(crate) parent: Rc<dyn RawMatrix<T>>,
    pub(crate) row_offset: usize,
    pub(crate) col_offset: usize,
    pub(crate) rows: usize,
    pub(crate) columns: usize,
}

impl<T: Element> MatrixView<T> {
    fn parent_index(&self, index: usize) -> Result<usize> {
        indexer::view_linear_index(
            index,
            self.rows,
            self.col_offset,
            self.row_offset,
            self.parent.rows(),
            self.parent.columns(),
        )
    }
}

impl<T: Element> RawMatrix<T> for MatrixView<T> {
    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    fn load(&self, index: usize) -> Result<T> {
        self.parent.load(self.parent_index(index)?)
    }

    fn store(&self, index: usize, value: T) -> Result<()> {
        self.parent.store(self.parent_index(index)?, value)
    }

    fn load2(&self, i: usize, j: usize) -> Result<T> {
        self.parent.load2(i + self.row_offset, j + self.col_offset)
    }

    fn store2(&self, i: usize, j: usize, value: T) -> Result<()> {
        self.parent.store2(i + self.row_offset, j + self.col_offset, value)
    }
}

/// Stepped row and column ranges of a parent matrix.
pub(crate) struct SliceMatrix<T: Element> {
    pub(crate) parent: Rc<dyn RawMatrix<T>>,
    /// `(start, step, len)` of the selected rows
    pub(crate) row_range: (usize, usize, usize),
    /// `(start, step, len)` of the selected columns
    pub(crate) col_range: (usize, usize, usize),
}

impl<T: Element> SliceMatrix<T> {
    fn parent_coords(&self, i: usize, j: usize) -> Result<(usize, usize)> {
        let (rs, rstep, _) = self.row_range;
        let (cs, cstep, _) = self.col_range;
        let row = rs + indexer::slice_index(rstep, i, self.parent.rows() - rs)?;
        let col = cs + indexer::slice_index(cstep, j, self.parent.columns() - cs)?;
        Ok((row, col))
    }
}

impl<T: Element> RawMatrix<T> for SliceMatrix<T> {
    fn rows(&self) -> usize {
        self.row_range.2
    }

    fn columns(&self) -> usize {
        self.col_range.2
    }

    fn load(&self, index: usize) -> Result<T> {
        let rows = self.rows();
        self.load2(index % rows, index / rows)
    }

    fn store(&self, index: usize, value: T) -> Result<()> {
        let rows = self.rows();
        self.store2(index % rows, index / rows, value)
    }

    fn load2(&self, i: usize, j: usize) -> Result<T> {
        let (row, col) = self.parent_coords(i, j)?;
        self.parent.load2(row, col)
    }

    fn store2(&self, i: usize, j: usize, value: T) -> Result<()> {
        let (row, col) = self.parent_coords(i, j)?;
        self.parent.store2(row, col, value)
    }
}

/// A stepped range of a parent's column-major flattening, as a column.
pub(crate) struct FlatSliceMatrix<T: Element> {
    pub(crate) parent: Rc<dyn RawMatrix<T>>,
    pub(crate) start: usize,
    pub(crate) step: usize,
    pub(crate) len: usize,
}

impl<T: Element> FlatSliceMatrix<T> {
    fn parent_index(&self, index: usize) -> Result<usize> {
        let bound = self.parent.rows() * self.parent.columns() - self.start;
        Ok(self.start + indexer::slice_index(self.step, index, bound)?)
    }
}

impl<T: Element> RawMatrix<T> for FlatSliceMatrix<T> {
    fn rows(&self) -> usize {
        self.len
    }

    fn columns(&self) -> usize {
        1
    }

    fn load(&self, index: usize) -> Result<T> {
        self.parent.load(self.parent_index(index)?)
    }

    fn store(&self, index: usize, value: T) -> Result<()> {
        self.parent.store(self.parent_index(index)?, value)
    }
}

/// The main diagonal of a parent matrix, as a column.
pub(crate) struct DiagonalMatrix<T: Element> {
    pub(crate) parent: Rc<dyn RawMatrix<T>>,
}

impl<T: Element> RawMatrix<T> for DiagonalMatrix<T> {
    fn rows(&self) -> usize {
        self.parent.rows().min(self.parent.columns())
    }

    fn columns(&self) -> usize {
        1
    }

    fn load(&self, index: usize) -> Result<T> {
        self.parent.load2(index, index)
    }

    fn store(&self, index: usize, value: T) -> Result<()> {
        self.parent.store2(index, index, value)
    }
}

/// A parent matrix of `S` presented as a matrix of `T`.
pub(crate) struct ConvertedMatrix<S: Element, T: Element> {
    pub(crate) parent: Rc<dyn RawMatrix<S>>,
    pub(crate) to: fn(S) -> T,
    pub(crate) from: fn(T) -> S,
}

impl<S: Element, T: Element> RawMatrix<T> for ConvertedMatrix<S, T> {
    fn rows(&self) -> usize {
        self.parent.rows()
    }

    fn columns(&self) -> usize {
        self.parent.columns()
    }

    fn load(&self, index: usize) -> Result<T> {
        self.parent.load(index).map(self.to)
    }

    fn store(&self, index: usize, value: T) -> Result<()> {
        self.parent.store(index, (self.from)(value))
    }

    fn load2(&self, i: usize, j: usize) -> Result<T> {
        self.parent.load2(i, j).map(self.to)
    }

    fn store2(&self, i: usize, j: usize, value: T) -> Result<()> {
        self.parent.store2(i, j, (self.from)(value))
    }
}
