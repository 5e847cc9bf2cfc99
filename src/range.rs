// Copyright 2024 ndstride developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::rc::Rc;

use num_integer::Integer;

use crate::error::{self, ErrorKind, Result};
use crate::layout::Layout;
use crate::storage::Storage;
use crate::{Array, IntArray};

/// An arithmetic sequence `start, start + step, …` stopping before `end`.
///
/// A range is both a slicing argument (see [`Array::get_ranges`]) and a
/// lazily evaluated int array (see [`Range::to_array`]).
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Range {
    start: i32,
    end: i32,
    step: i32,
}

impl Range {
    /// `start..end` with step one.
    ///
    /// **Errors** with `IndexOutOfRange` if `end < start`.
    pub fn new(start: i32, end: i32) -> Result<Range> {
        Range::with_step(start, end, 1)
    }

    /// `0..end` with step one.
    pub fn to(end: i32) -> Result<Range> {
        Range::new(0, end)
    }

    /// `start..end` with the given step; a negative step counts down.
    ///
    /// **Errors** with `IndexOutOfRange` if `step` is zero or points away
    /// from `end`.
    pub fn with_step(start: i32, end: i32, step: i32) -> Result<Range> {
        if step == 0 || (start < end && step < 0) || (start > end && step > 0) {
            return Err(error::with_detail(
                ErrorKind::IndexOutOfRange,
                format!("illegal range {}..{} step {}", start, end, step),
            ));
        }
        Ok(Range { start, end, step })
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn step(&self) -> i32 {
        self.step
    }

    /// Number of elements in the sequence.
    pub fn len(&self) -> usize {
        let span = (i64::from(self.end) - i64::from(self.start)).abs();
        Integer::div_ceil(&span, &i64::from(self.step).abs()) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the `i`:th element of the sequence.
    pub fn get(&self, i: usize) -> Result<i32> {
        let len = self.len();
        if i >= len {
            return Err(error::out_of_bounds(i, len));
        }
        Ok(nth(self.start, self.step, i))
    }

    /// Return `true` if `value` is an element of the sequence.
    pub fn contains(&self, value: i32) -> bool {
        let in_bounds = if self.step > 0 {
            value >= self.start && value < self.end
        } else {
            value <= self.start && value > self.end
        };
        in_bounds && (i64::from(value) - i64::from(self.start)) % i64::from(self.step) == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        (0..self.len()).map(move |i| nth(self.start, self.step, i))
    }

    /// The sequence as a read-only int array.
    ///
    /// Elements are computed on access; the result is a view.
    pub fn to_array(&self) -> IntArray {
        let len = self.len();
        let storage = RangeStorage {
            start: self.start,
            step: self.step,
            len,
        };
        Array::from_parts(Rc::new(storage), Layout::contiguous(len), true)
    }

    /// Validate the range as a slice of an axis of length `len`.
    ///
    /// Returns `(start, end, step)` with `start <= end <= len`.
    pub(crate) fn as_slice_bounds(&self, len: usize) -> Result<(usize, usize, usize)> {
        if self.step <= 0 {
            return Err(error::with_detail(
                ErrorKind::IndexOutOfRange,
                format!("illegal step size {} for slicing", self.step),
            ));
        }
        if self.start < 0 || self.start as usize > len {
            return Err(error::out_of_bounds(self.start.max(0) as usize, len + 1));
        }
        if self.end as usize > len {
            return Err(error::out_of_bounds(self.end as usize, len + 1));
        }
        Ok((self.start as usize, self.end as usize, self.step as usize))
    }
}

impl fmt::Debug for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.step == 1 {
            write!(f, "{}..{}", self.start, self.end)
        } else {
            write!(f, "{}..{};{}", self.start, self.end, self.step)
        }
    }
}

// The `i`:th element of a sequence; in `[start, end)` for `i < len`, so
// the narrowing is exact.
#[inline]
fn nth(start: i32, step: i32, i: usize) -> i32 {
    (i64::from(start) + i as i64 * i64::from(step)) as i32
}

struct RangeStorage {
    start: i32,
    step: i32,
    len: usize,
}

impl Storage<i32> for RangeStorage {
    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, pos: usize) -> i32 {
        assert!(pos < self.len, "range position {} out of bounds {}", pos, self.len);
        nth(self.start, self.step, pos)
    }

    fn set(&self, _pos: usize, _value: i32) -> Result<()> {
        Err(error::unsupported("a range is read-only"))
    }
}
