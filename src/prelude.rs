// Copyright 2024 ndstride developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! ndstride prelude.
//!
//! This module contains the most used types, type aliases and traits that
//! you can import easily as a group.
//!
//! ```
//! use ndstride::prelude::*;
//!
//! let a = DoubleArray::zeros(&[2, 2]).unwrap();
//! assert_eq!(a.len(), 4);
//! ```

#[doc(no_inline)]
pub use crate::{Array, ArrayFactory, Diagonal, Matrix, Op, Range};

#[doc(no_inline)]
pub use crate::{BitArray, ComplexArray, DoubleArray, IntArray, LongArray};

#[doc(no_inline)]
pub use crate::{Element, Numeric};

#[doc(no_inline)]
pub use crate::{ArrayError, ErrorKind};
