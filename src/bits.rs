// Copyright 2024 ndstride developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::ops::Not;

use crate::array::check_same_shape;
use crate::error::Result;
use crate::layout::Layout;
use crate::BitArray;

/// # Logical operations on bit arrays
///
/// Binary operations require operands of the same shape and **error** with
/// `ShapeMismatch` otherwise. Each returns a new bit array.
impl BitArray {
    fn logical<F>(&self, other: &BitArray, f: F) -> Result<BitArray>
    where
        F: Fn(bool, bool) -> bool,
    {
        check_same_shape(self, other)?;
        let v = (0..self.len()).map(|i| f(self.at(i), other.at(i))).collect();
        Ok(BitArray::owned(v, Layout::natural(self.shape())))
    }

    pub fn and(&self, other: &BitArray) -> Result<BitArray> {
        self.logical(other, |a, b| a & b)
    }

    pub fn or(&self, other: &BitArray) -> Result<BitArray> {
        self.logical(other, |a, b| a | b)
    }

    pub fn xor(&self, other: &BitArray) -> Result<BitArray> {
        self.logical(other, |a, b| a ^ b)
    }

    /// `self & !other`
    pub fn and_not(&self, other: &BitArray) -> Result<BitArray> {
        self.logical(other, |a, b| a & !b)
    }

    /// `self | !other`
    pub fn or_not(&self, other: &BitArray) -> Result<BitArray> {
        self.logical(other, |a, b| a | !b)
    }

    pub fn not(&self) -> BitArray {
        self.map(|a| !a)
    }

    /// Number of `true` elements.
    pub fn count_true(&self) -> usize {
        self.iter().filter(|&b| b).count()
    }
}

impl<'a> Not for &'a BitArray {
    type Output = BitArray;
    fn not(self) -> BitArray {
        BitArray::not(self)
    }
}

impl Not for BitArray {
    type Output = BitArray;
    fn not(self) -> BitArray {
        BitArray::not(&self)
    }
}
