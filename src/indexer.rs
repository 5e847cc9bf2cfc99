// Copyright 2024 ndstride developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pure index arithmetic for strided storage.
//!
//! Every function here maps between multi-dimensional coordinates and
//! linear storage positions for a given `(offset, shape, strides)` tuple.
//! Nothing allocates except the returned vectors.
//!
//! Arrays are laid out in *column-major* order: the first axis varies
//! fastest, so a freshly allocated array of shape `[a, b, c]` has strides
//! `[1, a, a * b]`.

use crate::error::{self, ErrorKind, Result};

/// Return `offset + Σ coords[i] * strides[i]`.
///
/// `coords` and `strides` must have the same length; bounds are the
/// caller's responsibility.
#[inline]
pub fn linear_offset(coords: &[usize], offset: usize, strides: &[usize]) -> usize {
    debug_assert_eq!(coords.len(), strides.len());
    coords
        .iter()
        .zip(strides)
        .fold(offset, |acc, (&c, &s)| acc + c * s)
}

/// Compute the natural column-major strides of `shape`, starting at `start`.
///
/// ```
/// use ndstride::indexer::compute_stride;
/// assert_eq!(compute_stride(1, &[2, 3, 4]), vec![1, 2, 6]);
/// ```
pub fn compute_stride(start: usize, shape: &[usize]) -> Vec<usize> {
    let mut stride = Vec::with_capacity(shape.len());
    let mut st = start;
    for &d in shape {
        stride.push(st);
        st = st.saturating_mul(d);
    }
    stride
}

/// Compute the number of elements of `shape`, checking for overflow.
///
/// The empty shape has size 1.
///
/// **Errors** with `Overflow` if the product does not fit a `usize`.
pub fn size(shape: &[usize]) -> Result<usize> {
    shape.iter().try_fold(1usize, |acc, &d| {
        acc.checked_mul(d).ok_or_else(|| {
            error::with_detail(
                ErrorKind::Overflow,
                format!("size of shape {:?} exceeds usize::MAX", shape),
            )
        })
    })
}

/// Return a copy of `array` without the element at `index`.
///
/// **Panics** if `index` is out of bounds.
pub fn remove_dim<T: Copy>(array: &[T], index: usize) -> Vec<T> {
    let mut result = Vec::with_capacity(array.len().saturating_sub(1));
    result.extend_from_slice(&array[..index]);
    result.extend_from_slice(&array[index + 1..]);
    result
}

/// Return a reversed copy of `array`.
pub fn reverse<T: Copy>(array: &[T]) -> Vec<T> {
    array.iter().rev().cloned().collect()
}

fn check_row_col(row: usize, col: usize, rows: usize, cols: usize) -> Result<()> {
    if col >= cols {
        Err(error::out_of_bounds(col, cols))
    } else if row >= rows {
        Err(error::out_of_bounds(row, rows))
    } else {
        Ok(())
    }
}

/// Flatten `(row, col)` of a `rows × cols` matrix in column-major order.
///
/// **Errors** with `IndexOutOfRange` if either coordinate is out of bounds.
pub fn column_major_linear(row: usize, col: usize, rows: usize, cols: usize) -> Result<usize> {
    check_row_col(row, col, rows, cols)?;
    Ok(col * rows + row)
}

/// Flatten `(row, col)` of a `rows × cols` matrix in row-major order.
///
/// **Errors** with `IndexOutOfRange` if either coordinate is out of bounds.
pub fn row_major_linear(row: usize, col: usize, rows: usize, cols: usize) -> Result<usize> {
    check_row_col(row, col, rows, cols)?;
    Ok(row * cols + col)
}

/// Return `step * index`, the parent position of `index` in a stepped slice.
///
/// **Errors** with `IndexOutOfRange` unless the result is `< bound`, and with
/// `Overflow` if the product does not fit a `usize`.
pub fn slice_index(step: usize, index: usize, bound: usize) -> Result<usize> {
    let i = step.checked_mul(index).ok_or_else(|| {
        error::with_detail(
            ErrorKind::Overflow,
            format!("slice index {} * {} overflows", step, index),
        )
    })?;
    if i >= bound {
        return Err(error::out_of_bounds(i, bound));
    }
    Ok(i)
}

/// Map a flat index of a rectangular sub-view to the flat column-major
/// index of its parent.
pub fn view_linear_index(
    index: usize,
    view_rows: usize,
    col_offset: usize,
    row_offset: usize,
    parent_rows: usize,
    parent_cols: usize,
) -> Result<usize> {
    let local_row = index % view_rows;
    let local_col = index / view_rows;
    column_major_linear(
        local_row + row_offset,
        local_col + col_offset,
        parent_rows,
        parent_cols,
    )
}

/// Return the storage position of the `index`:th element in column-major
/// iteration order of an array with the given layout.
///
/// The index is decomposed in mixed radix against `shape` and each digit is
/// scaled by its own stride; using `index * strides[0]` is only correct for
/// one-dimensional arrays.
#[inline]
pub fn linearized(mut index: usize, mut offset: usize, strides: &[usize], shape: &[usize]) -> usize {
    match strides.len() {
        0 => offset,
        1 => offset + index * strides[0],
        2 => {
            let sub0 = index / shape[0];
            let row = index - shape[0] * sub0;
            let col = sub0 % shape[1];
            offset + row * strides[0] + col * strides[1]
        }
        _ => {
            for (&d, &s) in shape.iter().zip(strides) {
                let next = index / d;
                offset += (index - d * next) * s;
                index = next;
            }
            offset
        }
    }
}

/// Decompose a column-major linear `index` into coordinates of `shape`.
pub fn unravel(mut index: usize, shape: &[usize]) -> Vec<usize> {
    let mut coords = Vec::with_capacity(shape.len());
    for &d in shape {
        if d == 0 {
            coords.push(0);
            continue;
        }
        coords.push(index % d);
        index /= d;
    }
    coords
}

/// Return `true` if `strides` are the natural column-major strides of `shape`.
///
/// Axes of length one never move and are ignored.
pub fn is_natural(shape: &[usize], strides: &[usize]) -> bool {
    let mut expected = 1;
    for (&d, &s) in shape.iter().zip(strides) {
        if d != 1 && s != expected {
            return false;
        }
        expected *= d;
    }
    true
}
