use approx::assert_abs_diff_eq;
use num_complex::Complex64;

use ndstride::routines;
use ndstride::{BitArray, ComplexArray, DoubleArray, ErrorKind, IntArray, LongArray, Op};
use ndstride_gen::array_builder::ArrayBuilder;

#[test]
fn concatenate_along_each_axis()
{
    let a = IntArray::from_rows(&[vec![1, 2], vec![3, 4]]).unwrap();
    let b = IntArray::from_rows(&[vec![5, 6]]).unwrap();
    let c = routines::concatenate(&[a.clone(), b.clone()], 0).unwrap();
    assert_eq!(c.to_rows().unwrap(), vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
    assert!(!c.is_view());

    let d = routines::concatenate(&[a.clone(), a.transpose()], 1).unwrap();
    assert_eq!(d.to_rows().unwrap(), vec![vec![1, 2, 1, 3], vec![3, 4, 2, 4]]);

    assert_eq!(routines::concatenate(&[a.clone(), b], 1).unwrap_err().kind(), ErrorKind::ShapeMismatch);
    assert_eq!(routines::concatenate::<i32>(&[], 0).unwrap_err().kind(), ErrorKind::IllegalState);
    assert!(routines::concatenate(&[a], 2).is_err());
}

#[test]
fn stacking()
{
    let a = IntArray::from_vec(vec![1, 2, 3]);
    let b = IntArray::from_vec(vec![4, 5, 6]);
    let v = routines::vstack(&[a.clone(), b.clone()]).unwrap();
    assert_eq!(v.to_rows().unwrap(), vec![vec![1, 2, 3], vec![4, 5, 6]]);
    let h = routines::hstack(&[a.clone(), b]).unwrap();
    assert_eq!(h.shape(), &[3, 2]);
    assert_eq!(h.to_rows().unwrap(), vec![vec![1, 4], vec![2, 5], vec![3, 6]]);

    let m = IntArray::from_rows(&[vec![0, 0, 0]]).unwrap();
    assert_eq!(routines::vstack(&[m, a]).unwrap().shape(), &[2, 3]);
}

#[test]
fn split_into_views()
{
    let a: IntArray = ArrayBuilder::new(&[4, 3]).build();
    let parts = routines::split(&a, 2, 0).unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[1].to_rows().unwrap(), vec![vec![2, 6, 10], vec![3, 7, 11]]);
    parts[1].set2(0, 0, -1).unwrap();
    assert_eq!(a.get2(2, 0).unwrap(), -1);

    let cols = routines::split(&a, 3, 1).unwrap();
    assert_eq!(cols[2].to_vec(), vec![8, 9, 10, 11]);
    assert_eq!(routines::split(&a, 3, 0).unwrap_err().kind(), ErrorKind::ShapeMismatch);
    assert!(routines::split(&a, 0, 0).is_err());
}

#[test]
fn concatenate_undoes_split()
{
    let a: LongArray = ArrayBuilder::new(&[2, 6]).build();
    let parts = routines::split(&a, 3, 1).unwrap();
    assert_eq!(routines::concatenate(&parts, 1).unwrap(), a);
}

#[test]
fn repmat_and_repeat()
{
    let a = IntArray::from_rows(&[vec![1, 2]]).unwrap();
    let r = routines::repmat(&a, 2, 3).unwrap();
    assert_eq!(r.shape(), &[2, 6]);
    assert_eq!(r.to_rows().unwrap(), vec![vec![1, 2, 1, 2, 1, 2]; 2]);

    let col = routines::repmat(&IntArray::from_vec(vec![1, 2]), 1, 2).unwrap();
    assert_eq!(col.to_rows().unwrap(), vec![vec![1, 1], vec![2, 2]]);

    let e = routines::repeat(&IntArray::from_vec(vec![7, 8]), 3);
    assert_eq!(e.to_vec(), vec![7, 7, 7, 8, 8, 8]);
    assert!(routines::repeat(&e, 0).is_empty());
}

#[test]
fn take_and_masks()
{
    let a = IntArray::from_vec(vec![10, 20, 30, 40]);
    assert_eq!(routines::take(&a, &[3, 3, 0]).unwrap().to_vec(), vec![40, 40, 10]);
    assert_eq!(routines::take(&a, &[4]).unwrap_err().kind(), ErrorKind::IndexOutOfRange);

    let m = BitArray::from_vec(vec![true, false, false, true]);
    let values = IntArray::from_vec(vec![-1, -2, -3, -4]);
    let b = routines::mask(&a, &m, &values).unwrap();
    assert_eq!(b.to_vec(), vec![-1, 20, 30, -4]);
    assert_eq!(a.to_vec(), vec![10, 20, 30, 40]);

    routines::put_mask(&a, &m.not(), &values).unwrap();
    assert_eq!(a.to_vec(), vec![10, -2, -3, 40]);
    assert!(routines::put_mask(&a, &BitArray::from_vec(vec![true]), &values).is_err());
}

#[test]
fn sorting()
{
    let a = DoubleArray::from_vec(vec![3., -1., 2., 0.5]);
    routines::sort(&a).unwrap();
    assert_eq!(a.to_vec(), vec![-1., 0.5, 2., 3.]);
    routines::sort_by(&a, |x, y| y.partial_cmp(x).unwrap()).unwrap();
    assert_eq!(a.to_vec(), vec![3., 2., 0.5, -1.]);

    // sorting a row view reorders the parent's row only
    let m = IntArray::from_rows(&[vec![3, 1, 2], vec![9, 8, 7]]).unwrap();
    routines::sort(&m.get_row(0).unwrap()).unwrap();
    assert_eq!(m.to_rows().unwrap(), vec![vec![1, 2, 3], vec![9, 8, 7]]);

    let z = ComplexArray::zeros(&[3]).unwrap();
    assert_eq!(routines::sort(&z).unwrap_err().kind(), ErrorKind::Unsupported);
}

#[test]
fn ordering_and_bisection()
{
    let a = DoubleArray::from_vec(vec![3., -1., 2., 0.5, 2.]);
    // ties keep their linear order
    assert_eq!(routines::order(&a).unwrap().to_vec(), vec![1, 3, 2, 4, 0]);
    assert_eq!(a.to_vec(), vec![3., -1., 2., 0.5, 2.]);

    let m = IntArray::from_rows(&[vec![3, 1, 2], vec![9, 8, 7]]).unwrap();
    let o = routines::order(&m).unwrap();
    assert_eq!(o.shape(), &[2, 3]);
    assert_eq!(o.to_vec(), vec![2, 4, 0, 5, 3, 1]);
    let rows = routines::order_axis(1, &m).unwrap();
    assert_eq!(rows.to_rows().unwrap(), vec![vec![1, 2, 0], vec![2, 1, 0]]);
    let columns = routines::order_axis(0, &m).unwrap();
    assert_eq!(columns.to_rows().unwrap(), vec![vec![0, 0, 0], vec![1, 1, 1]]);
    assert_eq!(
        routines::order(&ComplexArray::zeros(&[2]).unwrap()).unwrap_err().kind(),
        ErrorKind::Unsupported
    );

    let s = IntArray::from_vec(vec![1, 2, 2, 3]);
    assert_eq!(routines::bisect_left(&s, 2).unwrap(), 1);
    assert_eq!(routines::bisect_right(&s, 2).unwrap(), 3);
    assert_eq!(routines::bisect_left(&s, 0).unwrap(), 0);
    assert_eq!(routines::bisect_right(&s, 5).unwrap(), 4);
    assert_eq!(routines::bisect_left(&IntArray::zeros(&[0]).unwrap(), 4).unwrap(), 0);
}

#[test]
fn row_and_column_splits()
{
    let m = IntArray::from_rows(&[vec![1, 2], vec![3, 4], vec![5, 6], vec![7, 8]]).unwrap();
    let top = routines::vsplit(&m, 2).unwrap();
    assert_eq!(top[0].to_rows().unwrap(), vec![vec![1, 2], vec![3, 4]]);
    assert_eq!(routines::vstack(&top).unwrap(), m);
    assert_eq!(routines::vsplit(&m, 3).unwrap_err().kind(), ErrorKind::ShapeMismatch);

    let cols = routines::hsplit(&m, 2).unwrap();
    assert_eq!(cols[1].shape(), &[4, 1]);
    assert_eq!(cols[1].to_vec(), vec![2, 4, 6, 8]);
    cols[1].set(0, -2).unwrap();
    assert_eq!(m.get2(0, 1).unwrap(), -2);

    let v = IntArray::from_vec((1..7).collect());
    let parts = routines::vsplit(&v, 3).unwrap();
    assert_eq!(parts[2].shape(), &[2, 1]);
    assert_eq!(parts[2].to_vec(), vec![5, 6]);
    let parts = routines::hsplit(&v, 2).unwrap();
    assert_eq!(parts[0].shape(), &[1, 3]);
    assert_eq!(parts[1].to_vec(), vec![4, 5, 6]);
}

#[test]
fn vector_updates()
{
    let x = DoubleArray::from_vec(vec![1., 2., 3.]);
    let y = DoubleArray::from_vec(vec![4., 5., 6.]);
    routines::axpy(2., &x, &y).unwrap();
    assert_eq!(y.to_vec(), vec![6., 9., 12.]);
    routines::scal(0.5, &y).unwrap();
    assert_eq!(y.to_vec(), vec![3., 4.5, 6.]);
    assert_eq!(
        routines::axpy(1., &x, &DoubleArray::zeros(&[2]).unwrap()).unwrap_err().kind(),
        ErrorKind::ShapeMismatch
    );

    // scaling a column view writes through to the parent
    let m = DoubleArray::from_rows(&[vec![1., 2.], vec![3., 4.]]).unwrap();
    routines::scal(-1., &m.get_column(1).unwrap()).unwrap();
    assert_eq!(m.to_rows().unwrap(), vec![vec![1., -2.], vec![3., -4.]]);

    assert_eq!(routines::iamax(&DoubleArray::from_vec(vec![1., -7., 3., 7.])).unwrap(), 1);
    assert_eq!(routines::iamax(&DoubleArray::zeros(&[0]).unwrap()).unwrap_err().kind(), ErrorKind::IllegalState);
}

#[test]
fn matrix_vector_updates()
{
    let a = DoubleArray::zeros(&[3, 2]).unwrap();
    let x = DoubleArray::from_vec(vec![1., 2., 3.]);
    let y = DoubleArray::from_vec(vec![1., 10.]);
    routines::ger(2., &x, &y, &a).unwrap();
    assert_eq!(a.to_rows().unwrap(), vec![vec![2., 20.], vec![4., 40.], vec![6., 60.]]);
    // accumulates into the existing contents
    routines::ger(1., &x, &y, &a).unwrap();
    assert_eq!(a.to_rows().unwrap(), vec![vec![3., 30.], vec![6., 60.], vec![9., 90.]]);
    assert_eq!(routines::ger(1., &y, &y, &a).unwrap_err().kind(), ErrorKind::ShapeMismatch);

    let a = DoubleArray::from_rows(&[vec![1., 2.], vec![3., 4.], vec![5., 6.]]).unwrap();
    let y = DoubleArray::from_vec(vec![1., 1., 1.]);
    routines::gemv(Op::Keep, 1., &a, &DoubleArray::from_vec(vec![1., 1.]), 2., &y).unwrap();
    assert_eq!(y.to_vec(), vec![5., 9., 13.]);

    // with beta zero the old contents are not read
    let z = DoubleArray::from_vec(vec![f64::NAN, f64::NAN]);
    routines::gemv(Op::Transpose, 2., &a, &DoubleArray::from_vec(vec![1., 1., 1.]), 0., &z).unwrap();
    assert_eq!(z.to_vec(), vec![18., 24.]);

    assert_eq!(
        routines::gemv(Op::Keep, 1., &a, &y, 0., &y).unwrap_err().kind(),
        ErrorKind::ShapeMismatch
    );
}

#[test]
fn extremes()
{
    let a = IntArray::from_rows(&[vec![4, 9, 2], vec![9, 0, 5]]).unwrap();
    assert_eq!(routines::max(&a).unwrap(), 9);
    assert_eq!(routines::min(&a).unwrap(), 0);
    // first of the tied maxima in linear order is (1, 0)
    assert_eq!(routines::argmax(&a).unwrap(), 1);
    assert_eq!(routines::argmin(&a).unwrap(), 3);
    assert_eq!(routines::max_axis(0, &a).unwrap().to_vec(), vec![9, 9, 5]);
    assert_eq!(routines::min_axis(1, &a).unwrap().to_vec(), vec![2, 0]);
    assert_eq!(routines::max(&IntArray::zeros(&[0]).unwrap()).unwrap_err().kind(), ErrorKind::IllegalState);
}

#[test]
fn products()
{
    let a = IntArray::from_rows(&[vec![1, 2], vec![3, 4]]).unwrap();
    assert_eq!(routines::trace(&a).unwrap(), 5);
    assert!(routines::trace(&IntArray::from_vec(vec![1])).is_err());
    assert_eq!(routines::dot(&a, &a).unwrap(), a.mmul(&a).unwrap());

    let x = IntArray::from_vec(vec![1, 2, 3]);
    let y = IntArray::from_vec(vec![4, 5, 6]);
    assert_eq!(routines::inner(&x, &y).unwrap(), 32);
    assert_eq!(routines::inner(&x, &a).unwrap_err().kind(), ErrorKind::ShapeMismatch);

    let o = routines::outer(&x, &IntArray::from_vec(vec![1, 10]));
    assert_eq!(o.shape(), &[3, 2]);
    assert_eq!(o.to_rows().unwrap(), vec![vec![1, 10], vec![2, 20], vec![3, 30]]);
}

#[test]
fn running_sums()
{
    let a: IntArray = ArrayBuilder::new(&[2, 3]).build();
    assert_eq!(routines::cumsum(&a).to_vec(), vec![0, 1, 3, 6, 10, 15]);
    let c = routines::cumsum_axis(1, &a).unwrap();
    assert_eq!(c.to_rows().unwrap(), vec![vec![0, 2, 6], vec![1, 4, 9]]);
    let c = routines::cumsum_axis(0, &a).unwrap();
    assert_eq!(c.to_rows().unwrap(), vec![vec![0, 2, 4], vec![1, 5, 9]]);
}

#[test]
fn norms()
{
    let a = DoubleArray::from_vec(vec![3., -4.]);
    assert_eq!(routines::norm2(&a), 5.);
    assert_eq!(routines::asum(&a), 7.);
}

#[test]
fn elementwise_math()
{
    let a = DoubleArray::from_vec(vec![1., 4., 0.]);
    assert_eq!(routines::sqrt(&a).to_vec(), vec![1., 2., 0.]);
    assert_eq!(routines::pow(&a, 2.).to_vec(), vec![1., 16., 0.]);
    assert_abs_diff_eq!(routines::log(&routines::exp(&a)).to_vec().as_slice(), a.to_vec().as_slice(), epsilon = 1e-12);
    assert_eq!(routines::abs(&a.negate()).to_vec(), a.to_vec());
    assert_eq!(
        routines::signum(&DoubleArray::from_vec(vec![-2., 0., 5.])).to_vec(),
        vec![-1., 0., 1.]
    );
    assert!(routines::signum(&DoubleArray::from_vec(vec![f64::NAN])).get(0).unwrap().is_nan());

    let r = DoubleArray::from_vec(vec![-2.5, -0.4, 0.5, 1.5, 2.49]);
    assert_eq!(routines::floor(&r).to_vec(), vec![-3., -1., 0., 1., 2.]);
    assert_eq!(routines::ceil(&r).to_vec(), vec![-2., 0., 1., 2., 3.]);
    // halves round up
    let rounded: LongArray = routines::round(&r);
    assert_eq!(rounded.to_vec(), vec![-2, 0, 1, 2, 2]);

    let eps = 1e-12;
    let c = DoubleArray::from_vec(vec![27., -8., 1000.]);
    assert_abs_diff_eq!(routines::cbrt(&c).to_vec().as_slice(), [3., -2., 10.].as_slice(), epsilon = eps);
    assert_abs_diff_eq!(routines::log10(&c).get(2).unwrap(), 3., epsilon = eps);
    assert_abs_diff_eq!(routines::log2(&c).get(0).unwrap(), 27f64.log2(), epsilon = eps);

    let t = DoubleArray::from_vec(vec![0., 1.]);
    let half_pi = std::f64::consts::FRAC_PI_2;
    assert_abs_diff_eq!(routines::sin(&t).get(0).unwrap(), 0., epsilon = eps);
    assert_abs_diff_eq!(routines::cos(&t).get(0).unwrap(), 1., epsilon = eps);
    assert_abs_diff_eq!(routines::tan(&t).get(1).unwrap(), 1f64.tan(), epsilon = eps);
    assert_abs_diff_eq!(routines::asin(&t).get(1).unwrap(), half_pi, epsilon = eps);
    assert_abs_diff_eq!(routines::acos(&t).get(1).unwrap(), 0., epsilon = eps);
    assert_abs_diff_eq!(routines::atan(&t).get(1).unwrap(), half_pi / 2., epsilon = eps);
    assert_abs_diff_eq!(routines::sinh(&t).get(0).unwrap(), 0., epsilon = eps);
    assert_abs_diff_eq!(routines::cosh(&t).get(0).unwrap(), 1., epsilon = eps);
    assert_abs_diff_eq!(routines::tanh(&t).get(1).unwrap(), 1f64.tanh(), epsilon = eps);

    let l = routines::linspace(0., 1., 5);
    assert_eq!(l.to_vec(), vec![0., 0.25, 0.5, 0.75, 1.]);
}

#[test]
fn complex_parts()
{
    let z = ComplexArray::from_rows(&[
        vec![Complex64::new(3., 4.), Complex64::new(0., 1.)],
        vec![Complex64::new(1., 0.), Complex64::new(-2., -2.)],
    ])
    .unwrap();
    assert_eq!(z.real().to_rows().unwrap(), vec![vec![3., 0.], vec![1., -2.]]);
    assert_eq!(z.imag().to_rows().unwrap(), vec![vec![4., 1.], vec![0., -2.]]);
    assert_eq!(z.abs().get2(0, 0).unwrap(), 5.);
    assert_eq!(z.conjugate().get2(0, 1).unwrap(), Complex64::new(0., -1.));

    let h = z.conjugate_transpose().unwrap();
    assert_eq!(h.get2(1, 0).unwrap(), Complex64::new(0., -1.));
    assert_eq!(h.get2(0, 1).unwrap(), Complex64::new(1., 0.));
    assert_eq!(h.conjugate_transpose().unwrap(), z);
    assert!(ComplexArray::zeros(&[2]).unwrap().conjugate_transpose().is_err());
}
