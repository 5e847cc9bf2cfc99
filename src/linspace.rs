// Copyright 2024 ndstride developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use num_traits::Float;

/// An iterator of a sequence of evenly spaced floats.
///
/// Iterator element type is `F`.
pub struct Linspace<F> {
    start: F,
    step: F,
    index: usize,
    len: usize,
}

impl<F: Float> Linspace<F> {
    #[inline]
    fn value(&self, i: usize) -> F {
        self.start + self.step * F::from(i).unwrap_or_else(F::nan)
    }
}

impl<F: Float> Iterator for Linspace<F> {
    type Item = F;

    #[inline]
    fn next(&mut self) -> Option<F> {
        if self.index >= self.len {
            None
        } else {
            let i = self.index;
            self.index += 1;
            Some(self.value(i))
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl<F: Float> DoubleEndedIterator for Linspace<F> {
    #[inline]
    fn next_back(&mut self) -> Option<F> {
        if self.index >= self.len {
            None
        } else {
            self.len -= 1;
            Some(self.value(self.len))
        }
    }
}

impl<F: Float> ExactSizeIterator for Linspace<F> {}

/// Return an iterator of `n` evenly spaced floats, the first `a` and the
/// last `b`.
#[inline]
pub fn linspace<F: Float>(a: F, b: F, n: usize) -> Linspace<F> {
    let step = if n > 1 {
        let nf = F::from(n).unwrap_or_else(F::nan);
        (b - a) / (nf - F::one())
    } else {
        F::zero()
    };
    Linspace {
        start: a,
        step,
        index: 0,
        len: n,
    }
}

/// Return an iterator of floats from `a` spaced by `step`, stopping
/// before `b`.
///
/// An empty or backwards interval gives an empty iterator.
#[inline]
pub fn range<F: Float>(a: F, b: F, step: F) -> Linspace<F> {
    let steps = F::ceil((b - a) / step);
    Linspace {
        start: a,
        step,
        len: steps.to_usize().unwrap_or(0),
        index: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_ends() {
        let v: Vec<f64> = linspace(1., 2., 3).collect();
        assert_eq!(v, vec![1., 1.5, 2.]);
        assert_eq!(linspace(4., 5., 1).collect::<Vec<f64>>(), vec![4.]);
        assert_eq!(linspace(0., 1., 0).count(), 0);
    }

    #[test]
    fn range_excludes_end() {
        let v: Vec<f64> = range(0., 1., 0.25).collect();
        assert_eq!(v, vec![0., 0.25, 0.5, 0.75]);
        assert_eq!(range(1., 0., 1.).count(), 0);
        let back: Vec<f64> = range(0., 3., 1.).rev().collect();
        assert_eq!(back, vec![2., 1., 0.]);
    }
}
