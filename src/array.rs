// Copyright 2024 ndstride developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The strided array handle and its structural methods.

use std::rc::Rc;

use log::{debug, trace};
use num_complex::Complex64;

use crate::element::Element;
use crate::error::{self, Result};
use crate::layout::Layout;
use crate::range::Range;
use crate::storage::{Buffer, Converted, ReadOnly, Storage};

/// An n-dimensional strided array of elements `T`.
///
/// An `Array` is a handle: a reference to storage plus a [`Layout`] that
/// says which storage positions belong to the array and in what order.
/// Cloning the handle shares the storage; use [`Array::copy`] for a fresh
/// owning array.
///
/// Every structural operation (`select`, `get_vector`, `get_row`,
/// `get_column`, `get_diagonal`, `get_view`, `get_ranges`, `reshape`,
/// `transpose`) returns a *view*: a new handle over the same storage,
/// whose writes are seen by the parent and the other way round.
///
/// Storage is column-major: the first axis varies fastest, and the
/// linear index used by [`get`](Array::get) and [`set`](Array::set)
/// follows that order for every layout, transposed or not.
///
/// Arrays are not thread-safe. Share them across threads only behind
/// external synchronisation; the type is neither `Send` nor `Sync`.
pub struct Array<T: Element> {
    data: Rc<dyn Storage<T>>,
    layout: Layout,
    view: bool,
}

impl<T: Element> Clone for Array<T> {
    fn clone(&self) -> Self {
        Array {
            data: self.data.clone(),
            layout: self.layout.clone(),
            view: self.view,
        }
    }
}

/// # Construction internals
impl<T: Element> Array<T> {
    pub(crate) fn from_parts(data: Rc<dyn Storage<T>>, layout: Layout, view: bool) -> Self {
        debug_assert!(layout.is_empty() || layout.extent() <= data.len());
        Array { data, layout, view }
    }

    /// A fresh owning array over `v`; `layout` must be natural and
    /// address exactly `v.len()` elements.
    pub(crate) fn owned(v: Vec<T>, layout: Layout) -> Self {
        debug_assert_eq!(v.len(), layout.len());
        Array::from_parts(Rc::new(Buffer::from_vec(v)), layout, false)
    }

    /// A fresh owning array of zeros; `layout` must be natural.
    pub(crate) fn owned_zeros(layout: Layout) -> Self {
        Array::from_parts(Rc::new(Buffer::zeroed(layout.len())), layout, false)
    }

    /// A view sharing this array's storage with a different layout.
    pub(crate) fn with_layout(&self, layout: Layout) -> Self {
        Array::from_parts(self.data.clone(), layout, true)
    }

    /// Present this array's storage as elements of `U`.
    pub(crate) fn converted<U: Element>(&self, to: fn(T) -> U, from: fn(U) -> T) -> Array<U> {
        let storage = Converted::new(self.data.clone(), to, from);
        Array::from_parts(Rc::new(storage), self.layout.clone(), true)
    }

    pub(crate) fn storage(&self) -> &Rc<dyn Storage<T>> {
        &self.data
    }

    /// Element at linear `index`, which must be in bounds.
    #[inline]
    pub(crate) fn at(&self, index: usize) -> T {
        self.data.get(self.layout.position(index))
    }

    /// Element at `(i, j)` of a 2-d array; both must be in bounds.
    #[inline]
    pub(crate) fn at2(&self, i: usize, j: usize) -> T {
        let s = self.layout.strides();
        self.data.get(self.layout.offset() + i * s[0] + j * s[1])
    }

    /// Store at linear `index`, which must be in bounds.
    #[inline]
    pub(crate) fn put(&self, index: usize, value: T) -> Result<()> {
        self.data.set(self.layout.position(index), value)
    }
}

/// # Shape queries
impl<T: Element> Array<T> {
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The length of each axis.
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// The storage step of each axis.
    pub fn strides(&self) -> &[usize] {
        self.layout.strides()
    }

    /// Storage position of the element at the all-zero coordinate.
    pub fn offset(&self) -> usize {
        self.layout.offset()
    }

    /// Axis index of the major stride marker; `0` unless transposed.
    pub fn major_stride(&self) -> usize {
        self.layout.major()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.layout.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Length of axis `dim`.
    ///
    /// **Errors** with `IllegalDimension` if `dim >= ndim()`.
    pub fn size_of(&self, dim: usize) -> Result<usize> {
        self.layout.size_of(dim)
    }

    pub fn stride_of(&self, dim: usize) -> Result<usize> {
        self.layout.stride_of(dim)
    }

    /// Number of one-dimensional vectors along axis `dim`.
    pub fn vectors(&self, dim: usize) -> Result<usize> {
        self.layout.vectors(dim)
    }

    /// **Errors** with `IllegalState` unless the array is 2-d.
    pub fn rows(&self) -> Result<usize> {
        self.layout.rows()
    }

    /// **Errors** with `IllegalState` unless the array is 2-d.
    pub fn columns(&self) -> Result<usize> {
        self.layout.columns()
    }

    pub fn is_vector(&self) -> bool {
        self.layout.is_vector()
    }

    pub fn is_matrix(&self) -> bool {
        self.layout.is_matrix()
    }

    pub fn is_square(&self) -> bool {
        self.is_matrix() && self.shape()[0] == self.shape()[1]
    }

    /// `true` if the array aliases storage it did not allocate.
    ///
    /// Fixed at construction: owning arrays are never views, and every
    /// array derived from another one is.
    pub fn is_view(&self) -> bool {
        self.view
    }

    pub fn is_transposed(&self) -> bool {
        self.layout.is_transposed()
    }

    /// `true` if the array is laid out with natural column-major strides.
    pub fn is_contiguous(&self) -> bool {
        self.layout.is_natural()
    }

    /// Return `true` if `a` and `b` are handles to the same array: the
    /// same storage object with the same layout.
    pub fn same_instance(a: &Array<T>, b: &Array<T>) -> bool {
        let pa = Rc::as_ptr(&a.data) as *const u8;
        let pb = Rc::as_ptr(&b.data) as *const u8;
        pa == pb && a.layout == b.layout && a.view == b.view
    }
}

/// # Element access
impl<T: Element> Array<T> {
    /// Element at linear (column-major) `index`.
    ///
    /// **Errors** with `IndexOutOfRange` if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<T> {
        let pos = self.layout.checked_position(index)?;
        Ok(self.data.get(pos))
    }

    /// Store `value` at linear `index`.
    ///
    /// **Errors** with `IndexOutOfRange` if `index >= len()`, or
    /// `Unsupported` if the storage is read-only.
    pub fn set(&self, index: usize, value: T) -> Result<()> {
        let pos = self.layout.checked_position(index)?;
        self.data.set(pos, value)
    }

    /// Element at `coords`; one coordinate per axis.
    pub fn get_at(&self, coords: &[usize]) -> Result<T> {
        let pos = self.layout.position_of(coords)?;
        Ok(self.data.get(pos))
    }

    pub fn set_at(&self, coords: &[usize], value: T) -> Result<()> {
        let pos = self.layout.position_of(coords)?;
        self.data.set(pos, value)
    }

    /// Element at row `i`, column `j` of a 2-d array.
    ///
    /// **Errors** with `IllegalState` unless the array is 2-d.
    pub fn get2(&self, i: usize, j: usize) -> Result<T> {
        let pos = self.layout.position2(i, j)?;
        Ok(self.data.get(pos))
    }

    pub fn set2(&self, i: usize, j: usize, value: T) -> Result<()> {
        let pos = self.layout.position2(i, j)?;
        self.data.set(pos, value)
    }

    /// Iterate over the elements in linear order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.len()).map(move |i| self.at(i))
    }

    /// The elements in linear order.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// The elements as a nested row-major vector of a 2-d array.
    pub fn to_rows(&self) -> Result<Vec<Vec<T>>> {
        let (m, n) = (self.rows()?, self.columns()?);
        (0..m)
            .map(|i| (0..n).map(|j| self.get2(i, j)).collect())
            .collect()
    }
}

/// # Views
impl<T: Element> Array<T> {
    /// View with the leading axis fixed at `index`.
    ///
    /// **Errors** with `IllegalDimension` for a 0-d array and
    /// `IndexOutOfRange` if `index` is out of bounds.
    pub fn select(&self, index: usize) -> Result<Array<T>> {
        Ok(self.with_layout(self.layout.select(index)?))
    }

    /// View with axis `dim` fixed at `index`.
    pub fn select_axis(&self, dim: usize, index: usize) -> Result<Array<T>> {
        Ok(self.with_layout(self.layout.select_axis(dim, index)?))
    }

    /// The `index`:th one-dimensional vector along axis `dim`.
    ///
    /// Vectors are numbered in column-major order of the other axes, so
    /// for a 2-d array `get_vector(0, j)` is column `j` and
    /// `get_vector(1, i)` is row `i`, whether or not the array is
    /// transposed.
    ///
    /// ```
    /// use ndstride::DoubleArray;
    ///
    /// let a = DoubleArray::from_rows(&[vec![1., 2., 3.], vec![4., 5., 6.]]).unwrap();
    /// assert_eq!(a.get_vector(1, 1).unwrap().to_vec(), vec![4., 5., 6.]);
    /// assert_eq!(a.transpose().get_vector(0, 1).unwrap().to_vec(), vec![4., 5., 6.]);
    /// ```
    pub fn get_vector(&self, dim: usize, index: usize) -> Result<Array<T>> {
        Ok(self.with_layout(self.layout.vector(dim, index)?))
    }

    /// Overwrite the `index`:th vector along `dim` with `other`.
    ///
    /// **Errors** with `ShapeMismatch` if `other` has a different length.
    pub fn set_vector(&self, dim: usize, index: usize, other: &Array<T>) -> Result<()> {
        self.get_vector(dim, index)?.assign(other)
    }

    /// Call `f` with each vector along `dim`, in vector-index order.
    pub fn for_each_vector<F>(&self, dim: usize, mut f: F) -> Result<()>
    where
        F: FnMut(usize, Array<T>) -> Result<()>,
    {
        for i in 0..self.vectors(dim)? {
            f(i, self.get_vector(dim, i)?)?;
        }
        Ok(())
    }

    /// Row `i` of a 2-d array, as a `1 × columns` view.
    pub fn get_row(&self, i: usize) -> Result<Array<T>> {
        Ok(self.with_layout(self.layout.row(i)?))
    }

    /// Column `j` of a 2-d array, as a `rows × 1` view.
    pub fn get_column(&self, j: usize) -> Result<Array<T>> {
        Ok(self.with_layout(self.layout.column(j)?))
    }

    pub fn set_row(&self, i: usize, other: &Array<T>) -> Result<()> {
        self.get_row(i)?.assign(other)
    }

    pub fn set_column(&self, j: usize, other: &Array<T>) -> Result<()> {
        self.get_column(j)?.assign(other)
    }

    /// The main diagonal of a 2-d array, as a 1-d view.
    pub fn get_diagonal(&self) -> Result<Array<T>> {
        Ok(self.with_layout(self.layout.diagonal()?))
    }

    /// Rectangular `rows × columns` block of a 2-d array starting at
    /// `(row_offset, col_offset)`.
    pub fn get_view(&self, row_offset: usize, col_offset: usize, rows: usize, columns: usize) -> Result<Array<T>> {
        Ok(self.with_layout(self.layout.view(row_offset, col_offset, rows, columns)?))
    }

    /// View selecting `ranges[k]` along axis `k`; trailing axes are whole.
    ///
    /// ```
    /// use ndstride::{IntArray, Range};
    ///
    /// let a = IntArray::from_vec((0..10).collect());
    /// let v = a.get_ranges(&[Range::with_step(1, 8, 3).unwrap()]).unwrap();
    /// assert_eq!(v.to_vec(), vec![1, 4, 7]);
    /// ```
    pub fn get_ranges(&self, ranges: &[Range]) -> Result<Array<T>> {
        Ok(self.with_layout(self.layout.ranges(ranges)?))
    }

    /// View of `len` elements of axis `dim`, starting at `start`.
    pub fn narrow(&self, dim: usize, start: usize, len: usize) -> Result<Array<T>> {
        Ok(self.with_layout(self.layout.narrow(dim, start, len)?))
    }

    /// The array with shape `shape`, elements in the same linear order.
    ///
    /// A naturally strided array is reshaped in place and the result is a
    /// view; any other layout is copied into a new owning array.
    ///
    /// **Errors** with `ShapeMismatch` if the sizes differ.
    pub fn reshape(&self, shape: &[usize]) -> Result<Array<T>> {
        match self.layout.reshape(shape)? {
            Some(layout) => Ok(self.with_layout(layout)),
            None => {
                debug!(
                    "reshape {:?} -> {:?}: strides {:?} are not natural, copying",
                    self.shape(),
                    shape,
                    self.strides()
                );
                Ok(Array::owned(self.to_vec(), Layout::natural(shape)))
            }
        }
    }

    /// The array as a 1-d array of `len()` elements.
    ///
    /// A view if the elements are evenly spaced in storage (see
    /// [`Layout::flatten`]), otherwise a new owning copy.
    pub fn ravel(&self) -> Array<T> {
        match self.layout.flatten() {
            Some(layout) => self.with_layout(layout),
            None => Array::owned(self.to_vec(), Layout::contiguous(self.len())),
        }
    }

    /// Reverse the axes without moving data.
    ///
    /// A 1-d array is returned as an identity view.
    pub fn transpose(&self) -> Array<T> {
        self.with_layout(self.layout.transpose())
    }

    /// Read-only broadcast of the array to `shape`.
    ///
    /// Repeated elements share one storage position, so writing through the
    /// result **errors** with `Unsupported`.
    ///
    /// **Errors** with `ShapeMismatch` unless the shapes are compatible.
    pub fn broadcast(&self, shape: &[usize]) -> Result<Array<T>> {
        let layout = self.layout.broadcast(shape)?;
        Ok(Array::from_parts(Rc::new(ReadOnly::new(self.data.clone())), layout, true))
    }
}

/// # Copying and bulk assignment
impl<T: Element> Array<T> {
    /// A fresh owning copy with natural strides.
    pub fn copy(&self) -> Array<T> {
        trace!("copy of {} array {:?}", T::NAME, self.shape());
        Array::owned(self.to_vec(), Layout::natural(self.shape()))
    }

    /// A fresh zero-filled owning array of `shape` with this element type.
    pub fn new_empty(&self, shape: &[usize]) -> Result<Array<T>> {
        Array::zeros(shape)
    }

    /// Overwrite every element with the element at the same linear index
    /// of `other`.
    ///
    /// **Errors** with `ShapeMismatch` if the lengths differ.
    pub fn assign(&self, other: &Array<T>) -> Result<()> {
        if self.len() != other.len() {
            return Err(error::size_mismatch(self.len(), other.len()));
        }
        for i in 0..self.len() {
            self.put(i, other.at(i))?;
        }
        Ok(())
    }

    /// Fill with `value`.
    pub fn fill(&self, value: T) -> Result<()> {
        for i in 0..self.len() {
            self.put(i, value)?;
        }
        Ok(())
    }

    /// Exchange the elements at linear indices `a` and `b`.
    pub fn swap(&self, a: usize, b: usize) -> Result<()> {
        let va = self.get(a)?;
        let vb = self.get(b)?;
        self.set(a, vb)?;
        self.set(b, va)
    }
}

/// # Type coercion
///
/// Each method returns a view reading and writing this array's storage
/// through the conversion table in [`element`](crate::element), except
/// the one matching `T`, which returns the same array.
impl<T: Element> Array<T> {
    pub fn as_f64(&self) -> Array<f64> {
        T::as_f64_array(self)
    }

    pub fn as_i32(&self) -> Array<i32> {
        T::as_i32_array(self)
    }

    pub fn as_i64(&self) -> Array<i64> {
        T::as_i64_array(self)
    }

    pub fn as_bool(&self) -> Array<bool> {
        T::as_bool_array(self)
    }

    pub fn as_complex(&self) -> Array<Complex64> {
        T::as_complex_array(self)
    }
}

pub(crate) fn check_same_shape<A: Element, B: Element>(a: &Array<A>, b: &Array<B>) -> Result<()> {
    if a.shape() != b.shape() {
        return Err(error::shape_mismatch(a.shape(), b.shape()));
    }
    Ok(())
}

pub(crate) fn check_matrix<A: Element>(a: &Array<A>, what: &str) -> Result<(usize, usize)> {
    if !a.is_matrix() {
        return Err(error::not_a_matrix(what, a.ndim()));
    }
    Ok((a.shape()[0], a.shape()[1]))
}
