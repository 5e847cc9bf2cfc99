// Copyright 2024 ndstride developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use crate::element::Element;
use crate::Array;

impl<A> Array<A>
where
    A: Element,
{
    /// A test for equality that uses the elementwise absolute difference to compute the
    /// approximate equality of two arrays.
    ///
    /// **Requires crate feature `"approx"`**
    pub fn abs_diff_eq(&self, other: &Array<A>, epsilon: A::Epsilon) -> bool
    where
        A: AbsDiffEq,
        A::Epsilon: Clone,
    {
        <Self as AbsDiffEq>::abs_diff_eq(self, other, epsilon)
    }

    /// A test for equality that uses an elementwise relative comparison if the values are far
    /// apart; and the absolute difference otherwise.
    ///
    /// **Requires crate feature `"approx"`**
    pub fn relative_eq(&self, other: &Array<A>, epsilon: A::Epsilon, max_relative: A::Epsilon) -> bool
    where
        A: RelativeEq,
        A::Epsilon: Clone,
    {
        <Self as RelativeEq>::relative_eq(self, other, epsilon, max_relative)
    }
}

fn zip_all<A, F>(a: &Array<A>, b: &Array<A>, mut f: F) -> bool
where
    A: Element,
    F: FnMut(&A, &A) -> bool,
{
    a.shape() == b.shape() && a.iter().zip(b.iter()).all(|(x, y)| f(&x, &y))
}

/// **Requires crate feature `"approx"`.**
impl<A> AbsDiffEq for Array<A>
where
    A: Element + AbsDiffEq,
    A::Epsilon: Clone,
{
    type Epsilon = A::Epsilon;

    fn default_epsilon() -> A::Epsilon {
        A::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Array<A>, epsilon: A::Epsilon) -> bool {
        zip_all(self, other, |a, b| A::abs_diff_eq(a, b, epsilon.clone()))
    }
}

/// **Requires crate feature `"approx"`.**
impl<A> RelativeEq for Array<A>
where
    A: Element + RelativeEq,
    A::Epsilon: Clone,
{
    fn default_max_relative() -> A::Epsilon {
        A::default_max_relative()
    }

    fn relative_eq(&self, other: &Array<A>, epsilon: A::Epsilon, max_relative: A::Epsilon) -> bool {
        zip_all(self, other, |a, b| A::relative_eq(a, b, epsilon.clone(), max_relative.clone()))
    }
}

/// **Requires crate feature `"approx"`.**
impl<A> UlpsEq for Array<A>
where
    A: Element + UlpsEq,
    A::Epsilon: Clone,
{
    fn default_max_ulps() -> u32 {
        A::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Array<A>, epsilon: A::Epsilon, max_ulps: u32) -> bool {
        zip_all(self, other, |a, b| A::ulps_eq(a, b, epsilon.clone(), max_ulps))
    }
}

#[cfg(test)]
mod tests {
    use crate::DoubleArray;
    use approx::{
        assert_abs_diff_eq, assert_abs_diff_ne, assert_relative_eq, assert_relative_ne, assert_ulps_eq,
        assert_ulps_ne,
    };

    fn rows(r: &[[f64; 2]]) -> DoubleArray {
        DoubleArray::from_rows(&r.iter().map(|r| r.to_vec()).collect::<Vec<_>>()).unwrap()
    }

    #[test]
    fn abs_diff_eq() {
        let a = rows(&[[0., 2.], [-0.000010001, 100000000.]]);
        let b = rows(&[[0., 1.], [-0.000010002, 100000001.]]);
        assert_abs_diff_ne!(a, b);
        b.set2(0, 1, 2.).unwrap();
        assert_abs_diff_ne!(a, b);
        assert_abs_diff_eq!(a, b, epsilon = 1.);

        // Different shapes compare unequal.
        let c = DoubleArray::from_vec(vec![1., 2.]);
        assert_abs_diff_ne!(a, c);
    }

    #[test]
    fn relative_eq() {
        let a = rows(&[[1., 2.], [-0.000010001, 100000000.]]);
        let b = rows(&[[1., 1.], [-0.000010002, 100000001.]]);
        assert_relative_ne!(a, b);
        b.set2(0, 1, 2.).unwrap();
        assert_relative_eq!(a, b, max_relative = 1e-3);
    }

    #[test]
    fn ulps_eq() {
        let a = DoubleArray::from_vec(vec![0.1 + 0.2]);
        let b = DoubleArray::from_vec(vec![0.3]);
        assert_ulps_eq!(a, b);
        assert_ulps_ne!(a, DoubleArray::from_vec(vec![0.31]));
    }
}
