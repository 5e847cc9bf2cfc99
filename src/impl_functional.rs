// Copyright 2024 ndstride developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Higher-order methods.
//!
//! Caller-supplied functions are invoked exactly once per element, in
//! increasing linear-index order.

use crate::array::check_same_shape;
use crate::element::{Element, Numeric};
use crate::error::{self, Result};
use crate::indexer;
use crate::layout::Layout;
use crate::{Array, BitArray};

impl<T: Element> Array<T> {
    /// Call `f` by value on each element and create a new array of the
    /// same shape with the results.
    ///
    /// ```
    /// use ndstride::IntArray;
    ///
    /// let a = IntArray::from_vec(vec![1, 2, 3]);
    /// assert_eq!(a.map(|x| x * x).to_vec(), vec![1, 4, 9]);
    /// ```
    pub fn map<F>(&self, f: F) -> Array<T>
    where
        F: FnMut(T) -> T,
    {
        self.map_to(f)
    }

    /// Like [`map`](Array::map), into an array of another element type.
    pub fn map_to<U, F>(&self, f: F) -> Array<U>
    where
        U: Element,
        F: FnMut(T) -> U,
    {
        Array::owned(self.iter().map(f).collect(), Layout::natural(self.shape()))
    }

    /// Replace every element `x` with `f(x)`, in place.
    pub fn update<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(T) -> T,
    {
        for i in 0..self.len() {
            self.put(i, f(self.at(i)))?;
        }
        Ok(())
    }

    /// Set the element at each linear index `i` to `f(i)`, in place.
    pub fn assign_fn<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(usize) -> T,
    {
        for i in 0..self.len() {
            self.put(i, f(i))?;
        }
        Ok(())
    }

    /// Set each element `x` to `f(x, y)` where `y` is the element of
    /// `other` at the same linear index, in place.
    ///
    /// **Errors** with `ShapeMismatch` if the lengths differ.
    pub fn assign_with<U, F>(&self, other: &Array<U>, mut f: F) -> Result<()>
    where
        U: Element,
        F: FnMut(T, U) -> T,
    {
        if self.len() != other.len() {
            return Err(error::size_mismatch(self.len(), other.len()));
        }
        for i in 0..self.len() {
            self.put(i, f(self.at(i), other.at(i)))?;
        }
        Ok(())
    }

    /// Set each element to the converted element of `other`, in place.
    pub fn assign_from<U, F>(&self, other: &Array<U>, mut f: F) -> Result<()>
    where
        U: Element,
        F: FnMut(U) -> T,
    {
        self.assign_with(other, |_, y| f(y))
    }

    /// Fold the elements with `f`, starting from `identity`.
    pub fn reduce<F>(&self, identity: T, f: F) -> T
    where
        F: FnMut(T, T) -> T,
    {
        self.iter().fold(identity, f)
    }

    /// Fold `map(x)` of each element `x` with `f`, starting from `identity`.
    pub fn reduce_map<F, M>(&self, identity: T, mut f: F, mut map: M) -> T
    where
        F: FnMut(T, T) -> T,
        M: FnMut(T) -> T,
    {
        self.iter().fold(identity, |acc, x| f(acc, map(x)))
    }

    /// Reduce each vector along `dim` to one element.
    ///
    /// The result has the shape with axis `dim` removed, and element `i`
    /// is `f` of vector `i` as numbered by [`get_vector`](Array::get_vector).
    pub fn reduce_vectors<U, F>(&self, dim: usize, mut f: F) -> Result<Array<U>>
    where
        U: Element,
        F: FnMut(&Array<T>) -> U,
    {
        let n = self.vectors(dim)?;
        let mut v = Vec::with_capacity(n);
        for i in 0..n {
            v.push(f(&self.get_vector(dim, i)?));
        }
        let shape = indexer::remove_dim(self.shape(), dim);
        Ok(Array::owned(v, Layout::natural(&shape)))
    }

    /// Reduce each row of a 2-d array, into a `rows × 1` array.
    pub fn reduce_rows<F>(&self, mut f: F) -> Result<Array<T>>
    where
        F: FnMut(&Array<T>) -> T,
    {
        let rows = self.rows()?;
        let v = (0..rows)
            .map(|i| Ok(f(&self.get_row(i)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Array::owned(v, Layout::natural(&[rows, 1])))
    }

    /// Reduce each column of a 2-d array, into a `1 × columns` array.
    pub fn reduce_columns<F>(&self, mut f: F) -> Result<Array<T>>
    where
        F: FnMut(&Array<T>) -> T,
    {
        let columns = self.columns()?;
        let v = (0..columns)
            .map(|j| Ok(f(&self.get_column(j)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Array::owned(v, Layout::natural(&[1, columns])))
    }

    /// A 1-d array of the elements for which `pred` is true, in order.
    pub fn filter<F>(&self, mut pred: F) -> Array<T>
    where
        F: FnMut(T) -> bool,
    {
        Array::from_vec(self.iter().filter(|&x| pred(x)).collect())
    }

    /// `pred` of each element, as a bit array of the same shape.
    pub fn satisfies<F>(&self, pred: F) -> BitArray
    where
        F: FnMut(T) -> bool,
    {
        self.map_to(pred)
    }

    /// `pred(x, y)` of each pair of elements at the same linear index.
    pub fn satisfies_with<F>(&self, other: &Array<T>, mut pred: F) -> Result<BitArray>
    where
        F: FnMut(T, T) -> bool,
    {
        check_same_shape(self, other)?;
        let v = (0..self.len()).map(|i| pred(self.at(i), other.at(i))).collect();
        Ok(Array::owned(v, Layout::natural(self.shape())))
    }

    /// `true` if `pred` holds for every element.
    pub fn all<F>(&self, pred: F) -> bool
    where
        F: FnMut(T) -> bool,
    {
        self.iter().all(pred)
    }

    /// `true` if `pred` holds for some element.
    pub fn any<F>(&self, pred: F) -> bool
    where
        F: FnMut(T) -> bool,
    {
        self.iter().any(pred)
    }
}

impl<T: Numeric> Array<T> {
    /// Add `other` into `self`, in place.
    ///
    /// **Errors** with `ShapeMismatch` if the lengths differ.
    pub fn add_to(&self, other: &Array<T>) -> Result<()> {
        self.assign_with(other, Numeric::plus)
    }

    /// Add `alpha * other` into `self`, in place.
    pub fn scaled_add(&self, alpha: T, other: &Array<T>) -> Result<()> {
        self.assign_with(other, |x, y| x.plus(alpha.times(y)))
    }
}
