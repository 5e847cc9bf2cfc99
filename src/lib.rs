// Copyright 2024 ndstride developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
#![crate_name = "ndstride"]
#![doc(html_root_url = "https://docs.rs/ndstride/0.1/")]
#![allow(
    clippy::many_single_char_names,
    clippy::new_without_default, // Range and Diagonal need arguments
)]

//! The `ndstride` crate provides [`Array`], a strided n-dimensional array
//! over five element types, and a family of zero-copy views of it.
//!
//! - An `Array<T>` is a cheap handle: cloning it shares the storage.
//!   Views made by `select`, `get_vector`, `get_row`, `get_column`,
//!   `get_diagonal`, `get_view`, `get_ranges`, `transpose` and (for
//!   naturally laid out arrays) `reshape` alias their parent: a write
//!   through any of them is visible through all.
//! - Storage is column-major. The linear index `i` of an element is its
//!   position when the array is read column by column.
//! - Element types are bit (`bool`), int (`i32`), long (`i64`), double
//!   (`f64`) and complex ([`Complex64`](num_complex::Complex64)), with the
//!   aliases [`BitArray`], [`IntArray`], [`LongArray`], [`DoubleArray`] and
//!   [`ComplexArray`]. Any array can be viewed as any other element type
//!   with `as_f64`, `as_i32`, `as_i64`, `as_bool` and `as_complex`.
//! - Fallible operations return [`Result`] with an [`ArrayError`] whose
//!   [`ErrorKind`] names the violated precondition.
//! - [`Matrix`] is an older 2-d matrix family with its own views, and
//!   [`Diagonal`] is a diagonal matrix stored as its diagonal.
//!
//! ```
//! use ndstride::DoubleArray;
//!
//! let a = DoubleArray::from_rows(&[vec![1., 2., 3.], vec![4., 5., 6.]]).unwrap();
//! assert_eq!(a.to_vec(), vec![1., 4., 2., 5., 3., 6.]);
//! assert_eq!(a.get2(1, 2).unwrap(), 6.);
//!
//! let row = a.get_row(0).unwrap();
//! assert_eq!(row.shape(), &[1, 3]);
//! row.set(1, 99.).unwrap();
//! assert_eq!(a.get2(0, 1).unwrap(), 99.);
//! ```
//!
//! ## Crate Feature Flags
//!
//! - `approx`
//!   - Implementations of traits from the [`approx`] crate for arrays.
//!
//! Arrays use `Rc` and `Cell` internally and are neither `Send` nor `Sync`.
//! Diagnostic messages go through the [`log`] facade at `debug` and `trace`
//! level; the crate never installs a logger.

pub use crate::array::Array;
pub use crate::diagonal::Diagonal;
pub use crate::element::{Element, Numeric};
pub use crate::error::{ArrayError, ErrorKind, Result};
pub use crate::factory::ArrayFactory;
pub use crate::impl_ops::Op;
pub use crate::layout::{is_broadcast_compatible, Layout};
pub use crate::linspace::{linspace, range, Linspace};
pub use crate::matrix::Matrix;
pub use crate::range::Range;
pub use crate::storage::Storage;

mod array;
#[cfg(feature = "approx")]
mod array_approx;
mod bits;
mod diagonal;
mod element;
mod error;
mod factory;
mod impl_compare;
mod impl_constructors;
mod impl_functional;
mod impl_ops;
mod impl_slice;
pub mod indexer;
mod layout;
mod linspace;
mod matrix;
pub mod prelude;
mod range;
pub mod routines;
mod storage;

/// Array of bits (`bool`).
pub type BitArray = Array<bool>;
/// Array of ints (`i32`).
pub type IntArray = Array<i32>;
/// Array of longs (`i64`).
pub type LongArray = Array<i64>;
/// Array of doubles (`f64`).
pub type DoubleArray = Array<f64>;
/// Array of complex doubles.
pub type ComplexArray = Array<num_complex::Complex64>;
