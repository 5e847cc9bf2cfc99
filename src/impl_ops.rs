// Copyright 2024 ndstride developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Arithmetic and matrix multiplication.
//!
//! Every operation here allocates a fresh owning result; the operands are
//! never modified. See [`Array::add_to`] and the `assign` family for the
//! in-place counterparts.

use std::ops::{Add, Mul, Neg, Sub};

use log::trace;
use num_complex::Complex64;

use crate::array::check_matrix;
use crate::element::Numeric;
use crate::error::{self, ErrorKind, Result};
use crate::layout::{is_broadcast_compatible, Layout};
use crate::Array;

/// Transpose flag of a matrix multiplication operand.
///
/// `Transpose` multiplies with the transpose of the operand by swapping
/// its strides; no data is moved.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Keep,
    Transpose,
}

impl Op {
    /// The `(rows, columns)` of an operand of shape `(r, c)` under `self`.
    #[inline]
    pub fn apply(self, r: usize, c: usize) -> (usize, usize) {
        match self {
            Op::Keep => (r, c),
            Op::Transpose => (c, r),
        }
    }
}

fn division_by_zero() -> error::ArrayError {
    error::with_detail(ErrorKind::Overflow, "integer division by zero")
}

#[inline]
fn checked_quot<T: Numeric>(a: T, b: T) -> Result<T> {
    a.quot(b).ok_or_else(division_by_zero)
}

/// Bring `a` and `b` to a common shape by broadcasting the smaller one.
pub(crate) fn co_broadcast<T: Numeric>(a: &Array<T>, b: &Array<T>) -> Result<(Array<T>, Array<T>)> {
    if a.shape() == b.shape() {
        Ok((a.clone(), b.clone()))
    } else if b.ndim() <= a.ndim() && is_broadcast_compatible(b.shape(), a.shape()) {
        Ok((a.clone(), b.broadcast(a.shape())?))
    } else if a.ndim() <= b.ndim() && is_broadcast_compatible(a.shape(), b.shape()) {
        Ok((a.broadcast(b.shape())?, b.clone()))
    } else {
        Err(error::shape_mismatch(a.shape(), b.shape()))
    }
}

/// # Elementwise arithmetic
///
/// Binary operations between arrays require equal shapes, or shapes where
/// one operand can be broadcast to the other (see
/// [`Array::broadcast`]); they **error** with `ShapeMismatch` otherwise.
impl<T: Numeric> Array<T> {
    fn zip_map<F>(&self, other: &Array<T>, mut f: F) -> Result<Array<T>>
    where
        F: FnMut(T, T) -> Result<T>,
    {
        let (a, b) = co_broadcast(self, other)?;
        let v = (0..a.len())
            .map(|i| f(a.at(i), b.at(i)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Array::owned(v, Layout::natural(a.shape())))
    }

    fn scalar_map<F>(&self, mut f: F) -> Array<T>
    where
        F: FnMut(T) -> T,
    {
        Array::owned(self.iter().map(&mut f).collect(), Layout::natural(self.shape()))
    }

    /// Elementwise `self + other`.
    pub fn add(&self, other: &Array<T>) -> Result<Array<T>> {
        self.zip_map(other, |a, b| Ok(a.plus(b)))
    }

    /// Elementwise `alpha * self + beta * other`.
    pub fn add_scaled(&self, alpha: T, other: &Array<T>, beta: T) -> Result<Array<T>> {
        self.zip_map(other, |a, b| Ok(alpha.times(a).plus(beta.times(b))))
    }

    /// Elementwise `self - other`.
    pub fn sub(&self, other: &Array<T>) -> Result<Array<T>> {
        self.zip_map(other, |a, b| Ok(a.minus(b)))
    }

    /// Elementwise `alpha * self - beta * other`.
    pub fn sub_scaled(&self, alpha: T, other: &Array<T>, beta: T) -> Result<Array<T>> {
        self.zip_map(other, |a, b| Ok(alpha.times(a).minus(beta.times(b))))
    }

    /// Elementwise `self * other`.
    pub fn mul(&self, other: &Array<T>) -> Result<Array<T>> {
        self.zip_map(other, |a, b| Ok(a.times(b)))
    }

    /// Elementwise `alpha * self * beta * other`.
    pub fn mul_scaled(&self, alpha: T, other: &Array<T>, beta: T) -> Result<Array<T>> {
        self.zip_map(other, |a, b| Ok(alpha.times(a).times(beta.times(b))))
    }

    /// Elementwise `self / other`.
    ///
    /// **Errors** with `Overflow` on integer division by zero.
    pub fn div(&self, other: &Array<T>) -> Result<Array<T>> {
        self.zip_map(other, checked_quot)
    }

    pub fn add_scalar(&self, scalar: T) -> Array<T> {
        self.scalar_map(|a| a.plus(scalar))
    }

    pub fn sub_scalar(&self, scalar: T) -> Array<T> {
        self.scalar_map(|a| a.minus(scalar))
    }

    /// Elementwise `scalar - self`.
    pub fn rsub(&self, scalar: T) -> Array<T> {
        self.scalar_map(|a| scalar.minus(a))
    }

    pub fn mul_scalar(&self, scalar: T) -> Array<T> {
        self.scalar_map(|a| a.times(scalar))
    }

    /// **Errors** with `Overflow` on integer division by zero.
    pub fn div_scalar(&self, scalar: T) -> Result<Array<T>> {
        let v = self.iter().map(|a| checked_quot(a, scalar)).collect::<Result<Vec<_>>>()?;
        Ok(Array::owned(v, Layout::natural(self.shape())))
    }

    /// Elementwise `scalar / self`.
    ///
    /// **Errors** with `Overflow` on integer division by zero.
    pub fn rdiv(&self, scalar: T) -> Result<Array<T>> {
        let v = self.iter().map(|a| checked_quot(scalar, a)).collect::<Result<Vec<_>>>()?;
        Ok(Array::owned(v, Layout::natural(self.shape())))
    }

    /// Elementwise negation.
    pub fn negate(&self) -> Array<T> {
        self.scalar_map(Numeric::negated)
    }
}

/// # Matrix multiplication
impl<T: Numeric> Array<T> {
    /// Matrix product `self * other` of two 2-d arrays.
    ///
    /// **Errors** with `IllegalState` unless both operands are 2-d, and
    /// with `ShapeMismatch` if the inner dimensions differ.
    ///
    /// ```
    /// use ndstride::DoubleArray;
    ///
    /// let a = DoubleArray::from_rows(&[vec![1., 2.], vec![3., 4.]]).unwrap();
    /// let b = DoubleArray::eye(2).unwrap();
    /// assert_eq!(a.mmul(&b).unwrap(), a);
    /// ```
    pub fn mmul(&self, other: &Array<T>) -> Result<Array<T>> {
        self.mmul_with(T::one(), Op::Keep, other, Op::Keep)
    }

    /// Matrix product `alpha * op_a(self) * op_b(other)`.
    ///
    /// The transposes are taken by traversing the operands in the other
    /// order; neither operand is materialised.
    pub fn mmul_with(&self, alpha: T, op_a: Op, other: &Array<T>, op_b: Op) -> Result<Array<T>> {
        let (ar, ac) = check_matrix(self, "mmul")?;
        let (br, bc) = check_matrix(other, "mmul")?;
        let (m, k) = op_a.apply(ar, ac);
        let (k2, n) = op_b.apply(br, bc);
        if k != k2 {
            return Err(error::with_detail(
                ErrorKind::ShapeMismatch,
                format!("inner dimensions differ: {}x{} * {}x{}", m, k, k2, n),
            ));
        }
        if let Some(c) = T::gemm(alpha, self, op_a, other, op_b) {
            return Ok(c);
        }
        trace!("generic {} mmul {}x{}x{}", T::NAME, m, k, n);
        let a = if op_a == Op::Transpose { self.transpose() } else { self.clone() };
        let b = if op_b == Op::Transpose { other.transpose() } else { other.clone() };
        let mut c = vec![T::zero(); m * n];
        for j in 0..n {
            for l in 0..k {
                let blj = b.at2(l, j);
                for i in 0..m {
                    let cij = &mut c[j * m + i];
                    *cij = cij.plus(a.at2(i, l).times(blj));
                }
            }
        }
        if alpha != T::one() {
            for cij in &mut c {
                *cij = alpha.times(*cij);
            }
        }
        Ok(Array::owned(c, Layout::natural(&[m, n])))
    }
}

/// `alpha * op_a(a) * op_b(b)` with the `matrixmultiply` kernel, if both
/// operands are plain buffers. Shapes are already checked.
pub(crate) fn dgemm(alpha: f64, a: &Array<f64>, op_a: Op, b: &Array<f64>, op_b: Op) -> Option<Array<f64>> {
    let a_cells = a.storage().cells()?;
    let b_cells = b.storage().cells()?;
    let (m, k) = op_a.apply(a.shape()[0], a.shape()[1]);
    let (_, n) = op_b.apply(b.shape()[0], b.shape()[1]);
    if m == 0 || n == 0 || k == 0 {
        return None;
    }
    let (rsa, csa) = match op_a {
        Op::Keep => (a.strides()[0], a.strides()[1]),
        Op::Transpose => (a.strides()[1], a.strides()[0]),
    };
    let (rsb, csb) = match op_b {
        Op::Keep => (b.strides()[0], b.strides()[1]),
        Op::Transpose => (b.strides()[1], b.strides()[0]),
    };
    trace!("dgemm {}x{}x{}", m, k, n);
    let mut c = vec![0.0; m * n];
    // Cell<f64> has the layout of f64; no cell is written during the call.
    unsafe {
        let ap = a_cells.as_ptr().add(a.offset()) as *const f64;
        let bp = b_cells.as_ptr().add(b.offset()) as *const f64;
        matrixmultiply::dgemm(
            m,
            k,
            n,
            alpha,
            ap,
            rsa as isize,
            csa as isize,
            bp,
            rsb as isize,
            csb as isize,
            0.0,
            c.as_mut_ptr(),
            1,
            m as isize,
        );
    }
    Some(Array::owned(c, Layout::natural(&[m, n])))
}

macro_rules! impl_scalar_op {
    ($trt:ident, $mth:ident, $method:ident, $doc:expr) => {
        /// Elementwise
        #[doc=$doc]
        /// with a scalar, into a new array.
        impl<'a, T: Numeric> $trt<T> for &'a Array<T> {
            type Output = Array<T>;
            fn $mth(self, rhs: T) -> Array<T> {
                self.$method(rhs)
            }
        }

        impl<T: Numeric> $trt<T> for Array<T> {
            type Output = Array<T>;
            fn $mth(self, rhs: T) -> Array<T> {
                self.$method(rhs)
            }
        }
    };
}

impl_scalar_op!(Add, add, add_scalar, "addition");
impl_scalar_op!(Sub, sub, sub_scalar, "subtraction");
impl_scalar_op!(Mul, mul, mul_scalar, "multiplication");

macro_rules! impl_scalar_lhs_op {
    ($scalar:ty, $trt:ident, $mth:ident, $expr:expr) => {
        impl<'a> $trt<&'a Array<$scalar>> for $scalar {
            type Output = Array<$scalar>;
            fn $mth(self, rhs: &Array<$scalar>) -> Array<$scalar> {
                let f: fn(&Array<$scalar>, $scalar) -> Array<$scalar> = $expr;
                f(rhs, self)
            }
        }
    };
}

macro_rules! all_scalar_lhs_ops {
    ($scalar:ty) => {
        impl_scalar_lhs_op!($scalar, Add, add, |a, s| a.add_scalar(s));
        impl_scalar_lhs_op!($scalar, Sub, sub, |a, s| a.rsub(s));
        impl_scalar_lhs_op!($scalar, Mul, mul, |a, s| a.mul_scalar(s));
    };
}

all_scalar_lhs_ops!(i32);
all_scalar_lhs_ops!(i64);
all_scalar_lhs_ops!(f64);
all_scalar_lhs_ops!(Complex64);

impl<'a, T: Numeric> Neg for &'a Array<T> {
    type Output = Array<T>;
    fn neg(self) -> Array<T> {
        self.negate()
    }
}

impl<T: Numeric> Neg for Array<T> {
    type Output = Array<T>;
    fn neg(self) -> Array<T> {
        self.negate()
    }
}
