// Copyright 2024 ndstride developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Positional element storage, without any shape knowledge.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::element::Element;
use crate::error::{self, Result};

/// Raw positional access to a buffer of `T`.
///
/// Positions are computed by the array layer and are always in bounds;
/// implementations may panic on an out of bounds position.
pub trait Storage<T: Element> {
    /// Number of addressable positions.
    fn len(&self) -> usize;

    fn get(&self, pos: usize) -> T;

    /// Store `value` at `pos`.
    ///
    /// **Errors** with `Unsupported` if the storage is read-only.
    fn set(&self, pos: usize, value: T) -> Result<()>;

    /// The backing cells, if the storage is a plain buffer.
    fn cells(&self) -> Option<&[Cell<T>]> {
        None
    }
}

/// A contiguous buffer of cells.
///
/// Cells make every handle to the buffer able to write, so views and
/// their parent observe each other's mutations. This also makes the
/// buffer `!Sync`: it is not thread-safe.
pub struct Buffer<T> {
    data: Box<[Cell<T>]>,
}

impl<T: Element> Buffer<T> {
    pub fn from_vec(v: Vec<T>) -> Self {
        Buffer {
            data: v.into_iter().map(Cell::new).collect(),
        }
    }

    /// A buffer of `len` zeros.
    pub fn zeroed(len: usize) -> Self {
        Buffer {
            data: (0..len).map(|_| Cell::new(T::zero())).collect(),
        }
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.data.iter().map(Cell::get).collect()
    }
}

impl<T: Element> Storage<T> for Buffer<T> {
    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn get(&self, pos: usize) -> T {
        self.data[pos].get()
    }

    #[inline]
    fn set(&self, pos: usize, value: T) -> Result<()> {
        self.data[pos].set(value);
        Ok(())
    }

    fn cells(&self) -> Option<&[Cell<T>]> {
        Some(&self.data)
    }
}

impl<T: Element> fmt::Debug for Buffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter().map(Cell::get)).finish()
    }
}

/// Storage of `T` presented over storage of `S` through a pair of
/// conversion functions.
///
/// Every read converts with `to`, every write converts back with `from`;
/// the source is never copied.
pub struct Converted<S: Element, T: Element> {
    source: Rc<dyn Storage<S>>,
    to: fn(S) -> T,
    from: fn(T) -> S,
}

impl<S: Element, T: Element> Converted<S, T> {
    pub fn new(source: Rc<dyn Storage<S>>, to: fn(S) -> T, from: fn(T) -> S) -> Self {
        Converted { source, to, from }
    }
}

impl<S: Element, T: Element> Storage<T> for Converted<S, T> {
    #[inline]
    fn len(&self) -> usize {
        self.source.len()
    }

    #[inline]
    fn get(&self, pos: usize) -> T {
        (self.to)(self.source.get(pos))
    }

    #[inline]
    fn set(&self, pos: usize, value: T) -> Result<()> {
        self.source.set(pos, (self.from)(value))
    }
}

/// Storage that rejects writes to its source.
pub struct ReadOnly<T: Element> {
    source: Rc<dyn Storage<T>>,
}

impl<T: Element> ReadOnly<T> {
    pub fn new(source: Rc<dyn Storage<T>>) -> Self {
        ReadOnly { source }
    }
}

impl<T: Element> Storage<T> for ReadOnly<T> {
    #[inline]
    fn len(&self) -> usize {
        self.source.len()
    }

    #[inline]
    fn get(&self, pos: usize) -> T {
        self.source.get(pos)
    }

    fn set(&self, _pos: usize, _value: T) -> Result<()> {
        Err(error::unsupported("the storage is read-only"))
    }
}
