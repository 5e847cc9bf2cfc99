// Copyright 2024 ndstride developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use ndstride::indexer;
use ndstride::{Array, Element};

use num_traits::FromPrimitive;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayBuilder
{
    shape: Vec<usize>,
    fill_order: FillOrder,
    generator: ElementGenerator,
}

/// How to generate elements
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElementGenerator
{
    Sequential,
    Zero,
}

/// The order in which sequential elements are counted out
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FillOrder
{
    /// The first axis varies fastest; element `i` is at linear index `i`.
    ColumnMajor,
    /// The last axis varies fastest, as when reading rows.
    RowMajor,
}

impl Default for ArrayBuilder
{
    fn default() -> Self
    {
        Self::new(&[0])
    }
}

impl ArrayBuilder
{
    pub fn new(shape: &[usize]) -> Self
    {
        ArrayBuilder {
            shape: shape.to_vec(),
            fill_order: FillOrder::ColumnMajor,
            generator: ElementGenerator::Sequential,
        }
    }

    pub fn fill_order(mut self, order: FillOrder) -> Self
    {
        self.fill_order = order;
        self
    }

    pub fn generator(mut self, generator: ElementGenerator) -> Self
    {
        self.generator = generator;
        self
    }

    pub fn build<T>(self) -> Array<T>
    where T: Element + FromPrimitive
    {
        let row_major = self.fill_order == FillOrder::RowMajor;
        let use_zeros = self.generator == ElementGenerator::Zero;
        let strides = if row_major {
            indexer::reverse(&indexer::compute_stride(1, &indexer::reverse(&self.shape)))
        } else {
            indexer::compute_stride(1, &self.shape)
        };
        Array::from_shape_fn(&self.shape, |coords| {
            if use_zeros {
                return T::zero();
            }
            T::from_usize(indexer::linear_offset(coords, 0, &strides)).unwrap()
        })
        .unwrap()
    }
}

#[test]
fn test_order()
{
    let (m, n) = (12, 13);
    let c = ArrayBuilder::new(&[m, n])
        .fill_order(FillOrder::RowMajor)
        .build::<i32>();
    let f = ArrayBuilder::new(&[m, n])
        .fill_order(FillOrder::ColumnMajor)
        .build::<i32>();

    assert_eq!(c.shape(), &[m, n]);
    assert_eq!(f.shape(), &[m, n]);
    assert_eq!(c.get2(0, 1).unwrap(), 1);
    assert_eq!(c.get2(1, 0).unwrap(), n as i32);
    assert_eq!(f.get2(1, 0).unwrap(), 1);
    assert_eq!(f.to_vec(), (0..(m * n) as i32).collect::<Vec<_>>());
}

#[test]
fn test_zero()
{
    let z = ArrayBuilder::new(&[3, 2])
        .generator(ElementGenerator::Zero)
        .build::<f64>();
    assert!(z.iter().all(|x| x == 0.));
}
