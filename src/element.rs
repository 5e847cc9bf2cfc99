// Copyright 2024 ndstride developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Element types and the universal conversion table.
//!
//! | from \ to | bit        | int/long         | double       | complex   |
//! |-----------|------------|------------------|--------------|-----------|
//! | bit       | identity   | `1 : 0`          | `1.0 : 0.0`  | `1 : 0`   |
//! | int/long  | `v == 1`   | `as` cast        | exact/`as`   | `(v, 0)`  |
//! | double    | `v == 1.0` | truncate (`as`)  | identity     | `(v, 0)`  |
//! | complex   | `v == 1`   | real, truncated  | real part    | identity  |
//!
//! Double to integer conversion truncates toward zero and saturates at the
//! integer bounds, NaN converts to zero. Long to int keeps the low 32 bits.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};

use num_complex::Complex64;

use crate::error::{self, Result};
use crate::impl_ops::Op;
use crate::Array;

mod private {
    pub trait Sealed {}
    impl Sealed for bool {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for f64 {}
    impl Sealed for num_complex::Complex64 {}
}

/// An element type that can be stored in an [`Array`].
///
/// Implemented for `bool` (bit), `i32` (int), `i64` (long), `f64` (double)
/// and `Complex64` (complex). The trait is sealed.
pub trait Element: Copy + Debug + PartialEq + 'static + private::Sealed {
    /// Name of the element type, used in messages.
    const NAME: &'static str;

    fn zero() -> Self;

    fn one() -> Self;

    /// Total order used by sorting and ordering comparisons.
    ///
    /// **Errors** with `Unsupported` for element types without an order.
    fn compare(&self, other: &Self) -> Result<Ordering>;

    /// Feed the element to `state`, consistent with `==`.
    fn hash_element<H: Hasher>(&self, state: &mut H);

    fn to_f64(self) -> f64;
    fn from_f64(v: f64) -> Self;
    fn to_i32(self) -> i32;
    fn from_i32(v: i32) -> Self;
    fn to_i64(self) -> i64;
    fn from_i64(v: i64) -> Self;
    fn to_bool(self) -> bool;
    fn from_bool(v: bool) -> Self;
    fn to_complex(self) -> Complex64;
    fn from_complex(v: Complex64) -> Self;

    #[doc(hidden)]
    fn as_f64_array(a: &Array<Self>) -> Array<f64> {
        a.converted(Self::to_f64, Self::from_f64)
    }

    #[doc(hidden)]
    fn as_i32_array(a: &Array<Self>) -> Array<i32> {
        a.converted(Self::to_i32, Self::from_i32)
    }

    #[doc(hidden)]
    fn as_i64_array(a: &Array<Self>) -> Array<i64> {
        a.converted(Self::to_i64, Self::from_i64)
    }

    #[doc(hidden)]
    fn as_bool_array(a: &Array<Self>) -> Array<bool> {
        a.converted(Self::to_bool, Self::from_bool)
    }

    #[doc(hidden)]
    fn as_complex_array(a: &Array<Self>) -> Array<Complex64> {
        a.converted(Self::to_complex, Self::from_complex)
    }
}

/// Elements that support arithmetic: `i32`, `i64`, `f64` and `Complex64`.
///
/// Integer arithmetic wraps on overflow; integer division by zero is
/// reported by [`Numeric::quot`] returning `None`.
pub trait Numeric: Element {
    fn plus(self, rhs: Self) -> Self;
    fn minus(self, rhs: Self) -> Self;
    fn times(self, rhs: Self) -> Self;
    /// Return `self / rhs`, or `None` if the division is undefined.
    fn quot(self, rhs: Self) -> Option<Self>;
    fn negated(self) -> Self;

    /// Optimised `alpha * op(a) * op(b)`; `None` falls back to the generic loop.
    #[doc(hidden)]
    fn gemm(_alpha: Self, _a: &Array<Self>, _ta: Op, _b: &Array<Self>, _tb: Op) -> Option<Array<Self>> {
        None
    }
}

fn bool_compare(a: bool, b: bool) -> Ordering {
    a.cmp(&b)
}

impl Element for bool {
    const NAME: &'static str = "bit";

    fn zero() -> Self { false }
    fn one() -> Self { true }

    fn compare(&self, other: &Self) -> Result<Ordering> {
        Ok(bool_compare(*self, *other))
    }

    fn hash_element<H: Hasher>(&self, state: &mut H) {
        self.hash(state)
    }

    fn to_f64(self) -> f64 { if self { 1.0 } else { 0.0 } }
    fn from_f64(v: f64) -> Self { v == 1.0 }
    fn to_i32(self) -> i32 { if self { 1 } else { 0 } }
    fn from_i32(v: i32) -> Self { v == 1 }
    fn to_i64(self) -> i64 { if self { 1 } else { 0 } }
    fn from_i64(v: i64) -> Self { v == 1 }
    fn to_bool(self) -> bool { self }
    fn from_bool(v: bool) -> Self { v }
    fn to_complex(self) -> Complex64 { Complex64::new(self.to_f64(), 0.0) }
    fn from_complex(v: Complex64) -> Self { v.re == 1.0 && v.im == 0.0 }

    fn as_bool_array(a: &Array<Self>) -> Array<bool> {
        a.clone()
    }
}

macro_rules! impl_integer_element {
    ($ty:ty, $name:expr, $as_self:ident) => {
        impl Element for $ty {
            const NAME: &'static str = $name;

            fn zero() -> Self { 0 }
            fn one() -> Self { 1 }

            fn compare(&self, other: &Self) -> Result<Ordering> {
                Ok(self.cmp(other))
            }

            fn hash_element<H: Hasher>(&self, state: &mut H) {
                self.hash(state)
            }

            fn to_f64(self) -> f64 { self as f64 }
            fn from_f64(v: f64) -> Self { v as $ty }
            fn to_i32(self) -> i32 { self as i32 }
            fn from_i32(v: i32) -> Self { v as $ty }
            fn to_i64(self) -> i64 { self as i64 }
            fn from_i64(v: i64) -> Self { v as $ty }
            fn to_bool(self) -> bool { self == 1 }
            fn from_bool(v: bool) -> Self { if v { 1 } else { 0 } }
            fn to_complex(self) -> Complex64 { Complex64::new(self as f64, 0.0) }
            fn from_complex(v: Complex64) -> Self { v.re as $ty }

            fn $as_self(a: &Array<Self>) -> Array<Self> {
                a.clone()
            }
        }

        impl Numeric for $ty {
            #[inline]
            fn plus(self, rhs: Self) -> Self { self.wrapping_add(rhs) }
            #[inline]
            fn minus(self, rhs: Self) -> Self { self.wrapping_sub(rhs) }
            #[inline]
            fn times(self, rhs: Self) -> Self { self.wrapping_mul(rhs) }
            #[inline]
            fn quot(self, rhs: Self) -> Option<Self> {
                if rhs == 0 { None } else { Some(self.wrapping_div(rhs)) }
            }
            #[inline]
            fn negated(self) -> Self { self.wrapping_neg() }
        }
    };
}

impl_integer_element!(i32, "int", as_i32_array);
impl_integer_element!(i64, "long", as_i64_array);

fn hash_f64<H: Hasher>(v: f64, state: &mut H) {
    // 0.0 == -0.0, so they must hash alike
    let v = if v == 0.0 { 0.0 } else { v };
    v.to_bits().hash(state)
}

impl Element for f64 {
    const NAME: &'static str = "double";

    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }

    fn compare(&self, other: &Self) -> Result<Ordering> {
        Ok(self.total_cmp(other))
    }

    fn hash_element<H: Hasher>(&self, state: &mut H) {
        hash_f64(*self, state)
    }

    fn to_f64(self) -> f64 { self }
    fn from_f64(v: f64) -> Self { v }
    fn to_i32(self) -> i32 { self as i32 }
    fn from_i32(v: i32) -> Self { v as f64 }
    fn to_i64(self) -> i64 { self as i64 }
    fn from_i64(v: i64) -> Self { v as f64 }
    fn to_bool(self) -> bool { self == 1.0 }
    fn from_bool(v: bool) -> Self { if v { 1.0 } else { 0.0 } }
    fn to_complex(self) -> Complex64 { Complex64::new(self, 0.0) }
    fn from_complex(v: Complex64) -> Self { v.re }

    fn as_f64_array(a: &Array<Self>) -> Array<f64> {
        a.clone()
    }
}

impl Numeric for f64 {
    #[inline]
    fn plus(self, rhs: Self) -> Self { self + rhs }
    #[inline]
    fn minus(self, rhs: Self) -> Self { self - rhs }
    #[inline]
    fn times(self, rhs: Self) -> Self { self * rhs }
    #[inline]
    fn quot(self, rhs: Self) -> Option<Self> { Some(self / rhs) }
    #[inline]
    fn negated(self) -> Self { -self }

    fn gemm(alpha: f64, a: &Array<f64>, ta: Op, b: &Array<f64>, tb: Op) -> Option<Array<f64>> {
        crate::impl_ops::dgemm(alpha, a, ta, b, tb)
    }
}

impl Element for Complex64 {
    const NAME: &'static str = "complex";

    fn zero() -> Self { Complex64::new(0.0, 0.0) }
    fn one() -> Self { Complex64::new(1.0, 0.0) }

    fn compare(&self, _other: &Self) -> Result<Ordering> {
        Err(error::unsupported("complex numbers have no total order"))
    }

    fn hash_element<H: Hasher>(&self, state: &mut H) {
        hash_f64(self.re, state);
        hash_f64(self.im, state);
    }

    fn to_f64(self) -> f64 { self.re }
    fn from_f64(v: f64) -> Self { Complex64::new(v, 0.0) }
    fn to_i32(self) -> i32 { self.re as i32 }
    fn from_i32(v: i32) -> Self { Complex64::new(v as f64, 0.0) }
    fn to_i64(self) -> i64 { self.re as i64 }
    fn from_i64(v: i64) -> Self { Complex64::new(v as f64, 0.0) }
    fn to_bool(self) -> bool { self.re == 1.0 && self.im == 0.0 }
    fn from_bool(v: bool) -> Self { Complex64::new(v.to_f64(), 0.0) }
    fn to_complex(self) -> Complex64 { self }
    fn from_complex(v: Complex64) -> Self { v }

    fn as_complex_array(a: &Array<Self>) -> Array<Complex64> {
        a.clone()
    }
}

impl Numeric for Complex64 {
    #[inline]
    fn plus(self, rhs: Self) -> Self { self + rhs }
    #[inline]
    fn minus(self, rhs: Self) -> Self { self - rhs }
    #[inline]
    fn times(self, rhs: Self) -> Self { self * rhs }
    #[inline]
    fn quot(self, rhs: Self) -> Option<Self> { Some(self / rhs) }
    #[inline]
    fn negated(self) -> Self { -self }
}
