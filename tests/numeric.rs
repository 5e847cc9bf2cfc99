use approx::assert_abs_diff_eq;

use ndstride::routines;
use ndstride::{DoubleArray, ErrorKind, IntArray};
use ndstride_gen::array_builder::ArrayBuilder;

#[test]
fn mean_var_std_divisors()
{
    let v = DoubleArray::from_vec(vec![2., 4., 4., 4., 5., 5., 7., 9.]);
    assert_eq!(routines::mean(&v), 5.);
    // population variance divides by n
    assert_eq!(routines::var(&v), 4.);
    // standard deviation divides by n - 1
    assert_abs_diff_eq!(routines::std(&v), (4.0f64 * 8. / 7.).sqrt(), epsilon = 1e-12);
    assert!(routines::std(&v) != routines::var(&v).sqrt());
}

#[test]
fn statistics_along_an_axis()
{
    let a = DoubleArray::from_rows(&[vec![1., 2., 3.], vec![3., 6., 9.]]).unwrap();
    let m = routines::mean_axis(1, &a).unwrap();
    assert_eq!(m.shape(), &[2]);
    assert_eq!(m.to_vec(), vec![2., 6.]);
    let m = routines::mean_axis(0, &a).unwrap();
    assert_eq!(m.to_vec(), vec![2., 4., 6.]);

    let v = routines::var_axis(0, &a).unwrap();
    assert_eq!(v.to_vec(), vec![1., 4., 9.]);
    let s = routines::std_axis(0, &a).unwrap();
    assert_abs_diff_eq!(s.to_vec().as_slice(), [2f64.sqrt(), 8f64.sqrt(), 18f64.sqrt()].as_slice(), epsilon = 1e-12);
}

#[test]
fn sums_and_products()
{
    let a: IntArray = ArrayBuilder::new(&[2, 3]).build();
    assert_eq!(routines::sum(&a), 15);
    assert_eq!(routines::prod(&a.add_scalar(1)), 720);
    assert_eq!(routines::sum_axis(0, &a).unwrap().to_vec(), vec![1, 5, 9]);
    assert_eq!(routines::sum_axis(1, &a).unwrap().to_vec(), vec![6, 9]);
    assert_eq!(routines::prod_axis(0, &a).unwrap().to_vec(), vec![0, 6, 20]);
    assert_eq!(routines::sum(&IntArray::zeros(&[0]).unwrap()), 0);
    assert!(routines::sum_axis(2, &a).is_err());
}

#[test]
fn sum_of_3d_along_middle_axis()
{
    let a: IntArray = ArrayBuilder::new(&[2, 3, 2]).build();
    let s = routines::sum_axis(1, &a).unwrap();
    assert_eq!(s.shape(), &[2, 2]);
    for i in 0..2 {
        for k in 0..2 {
            let expect: i32 = (0..3).map(|j| a.get_at(&[i, j, k]).unwrap()).sum();
            assert_eq!(s.get2(i, k).unwrap(), expect);
        }
    }
}

#[test]
fn map_and_update()
{
    let a = DoubleArray::from_vec(vec![1., 4., 9.]);
    assert_eq!(a.map(f64::sqrt).to_vec(), vec![1., 2., 3.]);
    let n: IntArray = a.map_to(|x| x as i32);
    assert_eq!(n.to_vec(), vec![1, 4, 9]);

    let view = a.get_ranges(&[ndstride::Range::new(1, 3).unwrap()]).unwrap();
    view.update(|x| -x).unwrap();
    assert_eq!(a.to_vec(), vec![1., -4., -9.]);

    a.assign_fn(|i| i as f64).unwrap();
    assert_eq!(a.to_vec(), vec![0., 1., 2.]);
    a.assign_from(&IntArray::from_vec(vec![7, 8, 9]), f64::from).unwrap();
    assert_eq!(a.to_vec(), vec![7., 8., 9.]);
    a.add_to(&DoubleArray::from_vec(vec![1., 1., 1.])).unwrap();
    a.scaled_add(-2., &DoubleArray::from_vec(vec![1., 2., 3.])).unwrap();
    assert_eq!(a.to_vec(), vec![6., 5., 4.]);
}

#[test]
fn reductions()
{
    let a = IntArray::from_rows(&[vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
    assert_eq!(a.reduce(0, |x, y| x + y), 21);
    assert_eq!(a.reduce_map(0, |x, y| x + y, |x| x * x), 91);
    let r = a.reduce_rows(|row| routines::sum(row)).unwrap();
    assert_eq!(r.shape(), &[2, 1]);
    assert_eq!(r.to_vec(), vec![6, 15]);
    let c = a.reduce_columns(|col| routines::max(col).unwrap()).unwrap();
    assert_eq!(c.shape(), &[1, 3]);
    assert_eq!(c.to_vec(), vec![4, 5, 6]);
    assert_eq!(
        IntArray::from_vec(vec![1]).reduce_rows(|r| r.len() as i32).unwrap_err().kind(),
        ErrorKind::IllegalState
    );
}

#[test]
fn filters_and_predicates()
{
    let a = IntArray::from_rows(&[vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
    let even = a.filter(|x| x % 2 == 0);
    assert_eq!(even.shape(), &[3]);
    assert_eq!(even.to_vec(), vec![4, 2, 6]);

    let big = a.satisfies(|x| x > 3);
    assert_eq!(big.shape(), a.shape());
    assert_eq!(big.count_true(), 3);
    assert!(a.all(|x| x > 0));
    assert!(a.any(|x| x == 6));
    assert!(!a.any(|x| x > 6));

    let same = a.satisfies_with(&a.transpose().reshape(&[2, 3]).unwrap(), |x, y| x == y).unwrap();
    assert_eq!(same.shape(), &[2, 3]);
}
