// Copyright 2024 ndstride developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reductions, statistics and array manipulation routines.
//!
//! The `_axis` variants reduce each vector along `dim` and return an array
//! with that axis removed, numbered as by [`Array::get_vector`].

use std::cmp::Ordering;

use num_complex::Complex64;

use crate::array::{check_matrix, check_same_shape};
use crate::element::{Element, Numeric};
use crate::error::{self, ErrorKind, Result};
use crate::impl_ops::Op;
use crate::layout::Layout;
use crate::{Array, BitArray, ComplexArray, DoubleArray, IntArray, LongArray};

fn empty_error(what: &str) -> error::ArrayError {
    error::with_detail(ErrorKind::IllegalState, format!("{} of an empty array", what))
}

/// Sum of all elements; zero for an empty array.
pub fn sum<T: Numeric>(a: &Array<T>) -> T {
    a.reduce(T::zero(), Numeric::plus)
}

pub fn sum_axis<T: Numeric>(dim: usize, a: &Array<T>) -> Result<Array<T>> {
    a.reduce_vectors(dim, sum)
}

/// Product of all elements; one for an empty array.
pub fn prod<T: Numeric>(a: &Array<T>) -> T {
    a.reduce(T::one(), Numeric::times)
}

pub fn prod_axis<T: Numeric>(dim: usize, a: &Array<T>) -> Result<Array<T>> {
    a.reduce_vectors(dim, prod)
}

fn extreme<T: Element>(a: &Array<T>, what: &str, keep: Ordering) -> Result<(usize, T)> {
    let mut best = (0, a.get(0).map_err(|_| empty_error(what))?);
    for i in 1..a.len() {
        let v = a.at(i);
        if v.compare(&best.1)? == keep {
            best = (i, v);
        }
    }
    Ok(best)
}

/// The smallest element.
///
/// **Errors** with `IllegalState` for an empty array and with
/// `Unsupported` for complex arrays.
pub fn min<T: Element>(a: &Array<T>) -> Result<T> {
    extreme(a, "min", Ordering::Less).map(|(_, v)| v)
}

/// The largest element.
pub fn max<T: Element>(a: &Array<T>) -> Result<T> {
    extreme(a, "max", Ordering::Greater).map(|(_, v)| v)
}

fn extreme_axis<T: Element>(dim: usize, a: &Array<T>, what: &str, keep: Ordering) -> Result<Array<T>> {
    let n = a.vectors(dim)?;
    let v = (0..n)
        .map(|i| extreme(&a.get_vector(dim, i)?, what, keep).map(|(_, v)| v))
        .collect::<Result<Vec<_>>>()?;
    let shape = crate::indexer::remove_dim(a.shape(), dim);
    Ok(Array::owned(v, Layout::natural(&shape)))
}

pub fn min_axis<T: Element>(dim: usize, a: &Array<T>) -> Result<Array<T>> {
    extreme_axis(dim, a, "min", Ordering::Less)
}

pub fn max_axis<T: Element>(dim: usize, a: &Array<T>) -> Result<Array<T>> {
    extreme_axis(dim, a, "max", Ordering::Greater)
}

/// Linear index of the first largest element.
pub fn argmax<T: Element>(a: &Array<T>) -> Result<usize> {
    extreme(a, "argmax", Ordering::Greater).map(|(i, _)| i)
}

/// Linear index of the first smallest element.
pub fn argmin<T: Element>(a: &Array<T>) -> Result<usize> {
    extreme(a, "argmin", Ordering::Less).map(|(i, _)| i)
}

/// Arithmetic mean; NaN for an empty array.
pub fn mean(a: &DoubleArray) -> f64 {
    sum(a) / a.len() as f64
}

pub fn mean_axis(dim: usize, a: &DoubleArray) -> Result<DoubleArray> {
    a.reduce_vectors(dim, mean)
}

fn squared_residuals(a: &DoubleArray) -> f64 {
    let m = mean(a);
    a.reduce_map(0.0, |acc, x| acc + x, |x| (x - m) * (x - m))
}

/// Population variance: the sum of squared residuals divided by `n`.
///
/// ```
/// use ndstride::{routines, DoubleArray};
///
/// let v = DoubleArray::from_vec(vec![2., 4., 4., 4., 5., 5., 7., 9.]);
/// assert_eq!(routines::var(&v), 4.);
/// ```
pub fn var(a: &DoubleArray) -> f64 {
    squared_residuals(a) / a.len() as f64
}

pub fn var_axis(dim: usize, a: &DoubleArray) -> Result<DoubleArray> {
    a.reduce_vectors(dim, var)
}

/// Standard deviation: the square root of the sum of squared residuals
/// divided by `n - 1`.
///
/// Note the divisor differs from [`var`], so `std(a)` is not
/// `var(a).sqrt()`.
pub fn std(a: &DoubleArray) -> f64 {
    (squared_residuals(a) / (a.len() as f64 - 1.0)).sqrt()
}

pub fn std_axis(dim: usize, a: &DoubleArray) -> Result<DoubleArray> {
    a.reduce_vectors(dim, std)
}

/// Running sum in linear order, in an array of the same shape.
pub fn cumsum<T: Numeric>(a: &Array<T>) -> Array<T> {
    let mut acc = T::zero();
    a.map(|x| {
        acc = acc.plus(x);
        acc
    })
}

/// Running sum along each vector of axis `dim`.
pub fn cumsum_axis<T: Numeric>(dim: usize, a: &Array<T>) -> Result<Array<T>> {
    let out = Array::zeros(a.shape())?;
    for i in 0..a.vectors(dim)? {
        out.set_vector(dim, i, &cumsum(&a.get_vector(dim, i)?))?;
    }
    Ok(out)
}

/// Sum of the diagonal of a 2-d array.
pub fn trace<T: Numeric>(a: &Array<T>) -> Result<T> {
    Ok(sum(&a.get_diagonal()?))
}

/// Inner product of two arrays of the same length.
///
/// **Errors** with `ShapeMismatch` if the lengths differ.
pub fn inner<T: Numeric>(a: &Array<T>, b: &Array<T>) -> Result<T> {
    if a.len() != b.len() {
        return Err(error::size_mismatch(a.len(), b.len()));
    }
    Ok((0..a.len()).fold(T::zero(), |acc, i| acc.plus(a.at(i).times(b.at(i)))))
}

/// Matrix product of two 2-d arrays; see [`Array::mmul`].
pub fn dot<T: Numeric>(a: &Array<T>, b: &Array<T>) -> Result<Array<T>> {
    a.mmul(b)
}

/// Outer product: the `a.len() × b.len()` array of `a[i] * b[j]`.
pub fn outer<T: Numeric>(a: &Array<T>, b: &Array<T>) -> Array<T> {
    let (m, n) = (a.len(), b.len());
    let mut v = Vec::with_capacity(m * n);
    for j in 0..n {
        let bj = b.at(j);
        v.extend((0..m).map(|i| a.at(i).times(bj)));
    }
    Array::owned(v, Layout::natural(&[m, n]))
}

/// Euclidean norm.
pub fn norm2(a: &DoubleArray) -> f64 {
    a.reduce_map(0.0, |acc, x| acc + x, |x| x * x).sqrt()
}

/// Sum of absolute values.
pub fn asum(a: &DoubleArray) -> f64 {
    a.reduce_map(0.0, |acc, x| acc + x, f64::abs)
}

/// Scale `x` by `alpha`, in place.
pub fn scal(alpha: f64, x: &DoubleArray) -> Result<()> {
    if alpha == 1.0 {
        return Ok(());
    }
    x.update(|v| alpha * v)
}

/// `y ← alpha * x + y`, in place.
///
/// **Errors** with `ShapeMismatch` if the lengths differ.
pub fn axpy(alpha: f64, x: &DoubleArray, y: &DoubleArray) -> Result<()> {
    y.scaled_add(alpha, x)
}

/// Rank-one update `a ← alpha * x * yᵀ + a` of a 2-d array, in place.
///
/// **Errors** with `ShapeMismatch` unless `x` has one element per row and
/// `y` one element per column of `a`.
pub fn ger(alpha: f64, x: &DoubleArray, y: &DoubleArray, a: &DoubleArray) -> Result<()> {
    let (m, n) = check_matrix(a, "ger")?;
    if x.len() != m {
        return Err(error::size_mismatch(m, x.len()));
    }
    if y.len() != n {
        return Err(error::size_mismatch(n, y.len()));
    }
    for j in 0..n {
        let yj = alpha * y.at(j);
        for i in 0..m {
            a.set2(i, j, a.at2(i, j) + x.at(i) * yj)?;
        }
    }
    Ok(())
}

/// General matrix-vector product `y ← alpha * op(a) * x + beta * y`, in
/// place. With `beta == 0` the old contents of `y` are not read.
///
/// **Errors** with `ShapeMismatch` unless `x` has one element per column
/// and `y` one element per row of `op(a)`.
pub fn gemv(op: Op, alpha: f64, a: &DoubleArray, x: &DoubleArray, beta: f64, y: &DoubleArray) -> Result<()> {
    let (r, c) = check_matrix(a, "gemv")?;
    let (m, k) = op.apply(r, c);
    if x.len() != k {
        return Err(error::size_mismatch(k, x.len()));
    }
    if y.len() != m {
        return Err(error::size_mismatch(m, y.len()));
    }
    let ax = a.mmul_with(alpha, op, &x.reshape(&[k, 1])?, Op::Keep)?;
    if beta == 0.0 {
        y.assign_with(&ax, |_, v| v)
    } else {
        y.assign_with(&ax, |old, v| beta * old + v)
    }
}

/// Linear index of the first element of largest absolute value.
///
/// **Errors** with `IllegalState` for an empty array.
pub fn iamax(x: &DoubleArray) -> Result<usize> {
    argmax(&abs(x))
}

/// Join `arrays` along axis `dim`.
///
/// **Errors** with `ShapeMismatch` unless all arrays have the same shape
/// except along `dim`, and with `IllegalState` if `arrays` is empty.
///
/// ```
/// use ndstride::{routines, IntArray};
///
/// let a = IntArray::from_rows(&[vec![1, 2]]).unwrap();
/// let b = IntArray::from_rows(&[vec![3, 4], vec![5, 6]]).unwrap();
/// let c = routines::concatenate(&[a, b], 0).unwrap();
/// assert_eq!(c.to_rows().unwrap(), vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
/// ```
pub fn concatenate<T: Element>(arrays: &[Array<T>], dim: usize) -> Result<Array<T>> {
    let first = arrays.first().ok_or_else(|| empty_error("concatenate"))?;
    first.size_of(dim)?;
    let mut shape = first.shape().to_vec();
    shape[dim] = 0;
    for a in arrays {
        let compatible = a.ndim() == first.ndim()
            && a.shape()
                .iter()
                .zip(first.shape())
                .enumerate()
                .all(|(k, (x, y))| k == dim || x == y);
        if !compatible {
            return Err(error::shape_mismatch(first.shape(), a.shape()));
        }
        shape[dim] += a.shape()[dim];
    }
    let out = Array::zeros(&shape)?;
    let mut start = 0;
    for a in arrays {
        let len = a.shape()[dim];
        out.narrow(dim, start, len)?.assign(a)?;
        start += len;
    }
    Ok(out)
}

/// Stack along the rows; 1-d arrays are taken as `1 × n` rows.
pub fn vstack<T: Element>(arrays: &[Array<T>]) -> Result<Array<T>> {
    let arrays = arrays
        .iter()
        .map(|a| if a.ndim() == 1 { a.reshape(&[1, a.len()]) } else { Ok(a.clone()) })
        .collect::<Result<Vec<_>>>()?;
    concatenate(&arrays, 0)
}

/// Stack along the columns; 1-d arrays are taken as `n × 1` columns.
pub fn hstack<T: Element>(arrays: &[Array<T>]) -> Result<Array<T>> {
    let arrays = arrays
        .iter()
        .map(|a| if a.ndim() == 1 { a.reshape(&[a.len(), 1]) } else { Ok(a.clone()) })
        .collect::<Result<Vec<_>>>()?;
    concatenate(&arrays, 1)
}

/// Split `a` into `parts` equal views along axis `dim`.
///
/// **Errors** with `ShapeMismatch` unless `parts` evenly divides the axis.
pub fn split<T: Element>(a: &Array<T>, parts: usize, dim: usize) -> Result<Vec<Array<T>>> {
    let d = a.size_of(dim)?;
    if parts == 0 || d % parts != 0 {
        return Err(error::with_detail(
            ErrorKind::ShapeMismatch,
            format!("{} parts do not evenly divide axis {} of length {}", parts, dim, d),
        ));
    }
    let len = d / parts;
    (0..parts).map(|p| a.narrow(dim, p * len, len)).collect()
}

/// Split into `parts` views along the rows; a 1-d array is taken as an
/// `n × 1` column.
pub fn vsplit<T: Element>(a: &Array<T>, parts: usize) -> Result<Vec<Array<T>>> {
    let a = if a.ndim() == 1 { a.reshape(&[a.len(), 1])? } else { a.clone() };
    split(&a, parts, 0)
}

/// Split into `parts` views along the columns; a 1-d array is taken as a
/// `1 × n` row.
pub fn hsplit<T: Element>(a: &Array<T>, parts: usize) -> Result<Vec<Array<T>>> {
    let a = if a.ndim() == 1 { a.reshape(&[1, a.len()])? } else { a.clone() };
    split(&a, parts, 1)
}

/// Tile a 2-d array `r` times down and `c` times across; a 1-d array is
/// taken as a column.
pub fn repmat<T: Element>(a: &Array<T>, r: usize, c: usize) -> Result<Array<T>> {
    let a = if a.ndim() == 1 { a.reshape(&[a.len(), 1])? } else { a.clone() };
    let (m, n) = check_matrix(&a, "repmat")?;
    let out = Array::zeros(&[m * r, n * c])?;
    for cc in 0..c {
        for rc in 0..r {
            out.get_view(rc * m, cc * n, m, n)?.assign(&a)?;
        }
    }
    Ok(out)
}

/// Each element repeated `n` times, in a 1-d array.
pub fn repeat<T: Element>(a: &Array<T>, n: usize) -> Array<T> {
    Array::from_vec(a.iter().flat_map(|x| std::iter::repeat(x).take(n)).collect())
}

/// The elements at linear `indices`; see [`Array::slice_indices`].
pub fn take<T: Element>(a: &Array<T>, indices: &[usize]) -> Result<Array<T>> {
    a.slice_indices(indices)
}

/// A copy of `a` with the elements where `mask` is true taken from `values`.
///
/// **Errors** with `ShapeMismatch` unless all three have the same shape.
pub fn mask<T: Element>(a: &Array<T>, mask: &BitArray, values: &Array<T>) -> Result<Array<T>> {
    let out = a.copy();
    put_mask(&out, mask, values)?;
    Ok(out)
}

/// Set the elements of `a` where `mask` is true to those of `values`.
pub fn put_mask<T: Element>(a: &Array<T>, mask: &BitArray, values: &Array<T>) -> Result<()> {
    check_same_shape(a, mask)?;
    check_same_shape(a, values)?;
    for i in 0..a.len() {
        if mask.at(i) {
            a.put(i, values.at(i))?;
        }
    }
    Ok(())
}

// Stable sort of `items` by `Element::compare` of their keys.
fn sort_by_key<K, T, F>(items: &mut [K], key: F) -> Result<()>
where
    T: Element,
    F: Fn(&K) -> T,
{
    let mut failure = None;
    items.sort_by(|x, y| {
        key(x).compare(&key(y)).unwrap_or_else(|e| {
            failure = Some(e);
            Ordering::Equal
        })
    });
    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Sort the elements of `a` in place, in linear order, by
/// [`Element::compare`].
///
/// **Errors** with `Unsupported` for complex arrays.
pub fn sort<T: Element>(a: &Array<T>) -> Result<()> {
    let mut v = a.to_vec();
    sort_by_key(&mut v, |&x| x)?;
    a.assign(&Array::from_vec(v))
}

/// The linear indices that sort `a`: `a[order[0]]` is the smallest
/// element. Equal elements keep their linear order.
///
/// **Errors** with `Unsupported` for complex arrays, and with `Overflow`
/// if an index does not fit an int.
///
/// ```
/// use ndstride::{routines, DoubleArray};
///
/// let a = DoubleArray::from_vec(vec![0.5, -1., 2., 0.]);
/// assert_eq!(routines::order(&a).unwrap().to_vec(), vec![1, 3, 0, 2]);
/// ```
pub fn order<T: Element>(a: &Array<T>) -> Result<IntArray> {
    let v = a.to_vec();
    let mut idx: Vec<usize> = (0..v.len()).collect();
    sort_by_key(&mut idx, |&i| v[i])?;
    let idx = idx
        .into_iter()
        .map(|i| {
            i32::try_from(i)
                .map_err(|_| error::with_detail(ErrorKind::Overflow, format!("index {} exceeds an int", i)))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(IntArray::owned(idx, Layout::natural(a.shape())))
}

/// [`order`] of each vector along `dim`, in an int array of the shape of `a`.
pub fn order_axis<T: Element>(dim: usize, a: &Array<T>) -> Result<IntArray> {
    let out = IntArray::zeros(a.shape())?;
    for i in 0..a.vectors(dim)? {
        out.set_vector(dim, i, &order(&a.get_vector(dim, i)?)?)?;
    }
    Ok(out)
}

fn bisect<T, F>(a: &Array<T>, value: T, go_right: F) -> Result<usize>
where
    T: Element,
    F: Fn(Ordering) -> bool,
{
    let (mut lo, mut hi) = (0, a.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if go_right(a.at(mid).compare(&value)?) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    Ok(lo)
}

/// The insertion point of `value` in `a`, sorted in linear order, that
/// keeps it sorted; before any elements equal to `value`.
///
/// **Errors** with `Unsupported` for complex arrays.
pub fn bisect_left<T: Element>(a: &Array<T>, value: T) -> Result<usize> {
    bisect(a, value, Ordering::is_lt)
}

/// Like [`bisect_left`], but after any elements equal to `value`.
pub fn bisect_right<T: Element>(a: &Array<T>, value: T) -> Result<usize> {
    bisect(a, value, Ordering::is_le)
}

/// Sort the elements of `a` in place with a caller-supplied order.
pub fn sort_by<T, F>(a: &Array<T>, mut cmp: F) -> Result<()>
where
    T: Element,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut v = a.to_vec();
    v.sort_by(|x, y| cmp(x, y));
    a.assign(&Array::from_vec(v))
}

/// `n` evenly spaced elements from `start` to `end`, inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> DoubleArray {
    DoubleArray::linspace(start, end, n)
}

macro_rules! unary_maps {
    ($($(#[$meta:meta])* fn $id:ident => $f:path;)+) => {
        $($(#[$meta])*
        pub fn $id(a: &DoubleArray) -> DoubleArray {
            a.map($f)
        })+
    };
}

unary_maps! {
    /// Square root of each element.
    fn sqrt => f64::sqrt;
    /// Cubic root of each element.
    fn cbrt => f64::cbrt;
    /// `e^x` of each element.
    fn exp => f64::exp;
    /// Natural logarithm of each element.
    fn log => f64::ln;
    /// Base 2 logarithm of each element.
    fn log2 => f64::log2;
    /// Base 10 logarithm of each element.
    fn log10 => f64::log10;
    /// Absolute value of each element.
    fn abs => f64::abs;
    /// The largest integer less than or equal to each element.
    fn floor => f64::floor;
    /// The smallest integer greater than or equal to each element.
    fn ceil => f64::ceil;
    /// Sine of each element (in radians).
    fn sin => f64::sin;
    /// Cosine of each element (in radians).
    fn cos => f64::cos;
    /// Tangent of each element (in radians).
    fn tan => f64::tan;
    fn asin => f64::asin;
    fn acos => f64::acos;
    fn atan => f64::atan;
    fn sinh => f64::sinh;
    fn cosh => f64::cosh;
    fn tanh => f64::tanh;
}

pub fn pow(a: &DoubleArray, power: f64) -> DoubleArray {
    a.map(|x| x.powf(power))
}

/// Each element rounded to the nearest integer, as a long array.
///
/// Halves round up, so `-2.5` becomes `-2`. NaN becomes `0` and values
/// beyond the long range saturate.
pub fn round(a: &DoubleArray) -> LongArray {
    a.map_to(|x| (x + 0.5).floor() as i64)
}

/// `-1`, `0` or `1` by the sign of each element; NaN stays NaN.
pub fn signum(a: &DoubleArray) -> DoubleArray {
    a.map(|x| if x == 0.0 { 0.0 } else { x.signum() })
}

/// # Complex arrays
impl ComplexArray {
    /// The real parts, as a new double array.
    pub fn real(&self) -> DoubleArray {
        self.map_to(|z| z.re)
    }

    /// The imaginary parts, as a new double array.
    pub fn imag(&self) -> DoubleArray {
        self.map_to(|z| z.im)
    }

    /// The moduli, as a new double array.
    pub fn abs(&self) -> DoubleArray {
        self.map_to(Complex64::norm)
    }

    /// Elementwise complex conjugate, as a new array.
    pub fn conjugate(&self) -> ComplexArray {
        self.map(|z| z.conj())
    }

    /// The conjugate transpose of a 2-d array, as a new owning array.
    pub fn conjugate_transpose(&self) -> Result<ComplexArray> {
        check_matrix(self, "conjugate transpose")?;
        Ok(self.transpose().map(|z| z.conj()))
    }
}
