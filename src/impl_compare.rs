// Copyright 2024 ndstride developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::array::check_same_shape;
use crate::element::Element;
use crate::error::Result;
use crate::layout::Layout;
use crate::{Array, BitArray};

/// # Comparisons
///
/// Ordering comparisons use [`Element::compare`] and **error** with
/// `Unsupported` for complex arrays. Array operands must have the same
/// shape (`ShapeMismatch` otherwise).
impl<T: Element> Array<T> {
    fn compare_with<F>(&self, other: &Array<T>, pred: F) -> Result<BitArray>
    where
        F: Fn(Ordering) -> bool,
    {
        check_same_shape(self, other)?;
        let v = (0..self.len())
            .map(|i| self.at(i).compare(&other.at(i)).map(&pred))
            .collect::<Result<Vec<_>>>()?;
        Ok(Array::owned(v, Layout::natural(self.shape())))
    }

    fn compare_scalar<F>(&self, value: T, pred: F) -> Result<BitArray>
    where
        F: Fn(Ordering) -> bool,
    {
        let v = self
            .iter()
            .map(|x| x.compare(&value).map(&pred))
            .collect::<Result<Vec<_>>>()?;
        Ok(Array::owned(v, Layout::natural(self.shape())))
    }

    /// Elementwise `self < other`.
    pub fn lt(&self, other: &Array<T>) -> Result<BitArray> {
        self.compare_with(other, Ordering::is_lt)
    }

    /// Elementwise `self > other`.
    pub fn gt(&self, other: &Array<T>) -> Result<BitArray> {
        self.compare_with(other, Ordering::is_gt)
    }

    /// Elementwise `self <= other`.
    pub fn lte(&self, other: &Array<T>) -> Result<BitArray> {
        self.compare_with(other, Ordering::is_le)
    }

    /// Elementwise `self >= other`.
    pub fn gte(&self, other: &Array<T>) -> Result<BitArray> {
        self.compare_with(other, Ordering::is_ge)
    }

    /// Elementwise `self == other`; defined for every element type.
    pub fn elementwise_eq(&self, other: &Array<T>) -> Result<BitArray> {
        check_same_shape(self, other)?;
        let v = (0..self.len()).map(|i| self.at(i) == other.at(i)).collect();
        Ok(Array::owned(v, Layout::natural(self.shape())))
    }

    pub fn lt_scalar(&self, value: T) -> Result<BitArray> {
        self.compare_scalar(value, Ordering::is_lt)
    }

    pub fn gt_scalar(&self, value: T) -> Result<BitArray> {
        self.compare_scalar(value, Ordering::is_gt)
    }

    pub fn lte_scalar(&self, value: T) -> Result<BitArray> {
        self.compare_scalar(value, Ordering::is_le)
    }

    pub fn gte_scalar(&self, value: T) -> Result<BitArray> {
        self.compare_scalar(value, Ordering::is_ge)
    }

    pub fn eq_scalar(&self, value: T) -> BitArray {
        let v = self.iter().map(|x| x == value).collect();
        Array::owned(v, Layout::natural(self.shape()))
    }

    /// Compare the elements at linear indices `a` and `b`.
    pub fn compare(&self, a: usize, b: usize) -> Result<Ordering> {
        self.get(a)?.compare(&self.get(b)?)
    }

    /// Elements of `self` where `mask` is true and of `other` elsewhere.
    pub fn where_(&self, mask: &BitArray, other: &Array<T>) -> Result<Array<T>> {
        check_same_shape(self, mask)?;
        check_same_shape(self, other)?;
        let v = (0..self.len())
            .map(|i| if mask.at(i) { self.at(i) } else { other.at(i) })
            .collect();
        Ok(Array::owned(v, Layout::natural(self.shape())))
    }
}

/// Arrays are equal if they have the same shape and equal elements in
/// linear order. Doubles compare exactly, so `NaN != NaN`.
impl<T: Element> PartialEq for Array<T> {
    fn eq(&self, other: &Array<T>) -> bool {
        self.shape() == other.shape() && (0..self.len()).all(|i| self.at(i) == other.at(i))
    }
}

impl<T: Element> Hash for Array<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.shape().hash(state);
        for x in self.iter() {
            x.hash_element(state);
        }
    }
}

impl<T: Element> fmt::Debug for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} array {:?}", T::NAME, self.shape())?;
        if self.is_view() {
            f.write_str(" (view)")?;
        }
        f.write_str(" ")?;
        f.debug_list().entries(self.iter()).finish()
    }
}
