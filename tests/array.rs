use defmac::defmac;
use itertools::iproduct;

use ndstride::prelude::*;

#[test]
fn two_by_three_end_to_end()
{
    let a = DoubleArray::from_rows(&[vec![1., 2., 3.], vec![4., 5., 6.]]).unwrap();
    assert_eq!(a.shape(), &[2, 3]);
    assert_eq!(a.strides(), &[1, 2]);
    assert_eq!(a.to_vec(), vec![1., 4., 2., 5., 3., 6.]);
    assert_eq!(a.get2(1, 2).unwrap(), 6.);

    let row = a.get_row(0).unwrap();
    assert_eq!(row.shape(), &[1, 3]);
    assert!(row.is_view());
    assert_eq!(row.to_vec(), vec![1., 2., 3.]);

    row.set(1, 99.).unwrap();
    assert_eq!(a.get2(0, 1).unwrap(), 99.);
}

#[test]
fn construct_zeros_and_ones()
{
    let z = IntArray::zeros(&[3, 2, 2]).unwrap();
    assert_eq!(z.len(), 12);
    assert_eq!(z.ndim(), 3);
    assert!(z.iter().all(|x| x == 0));
    assert!(!z.is_view());
    assert!(z.is_contiguous());

    let o = BitArray::ones(&[4]).unwrap();
    assert_eq!(o.count_true(), 4);

    let e = DoubleArray::eye(3).unwrap();
    assert_eq!(e.get_diagonal().unwrap().to_vec(), vec![1., 1., 1.]);
    assert_eq!(e.iter().filter(|&x| x == 0.).count(), 6);
}

#[test]
fn construct_from_shape_vec_checks_size()
{
    let err = LongArray::from_shape_vec(&[2, 2], vec![1, 2, 3]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
    let err = IntArray::from_rows(&[vec![1, 2], vec![3]]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
}

#[test]
fn construct_with_zero_length_axes()
{
    defmac!(empty shape => {
        let a = IntArray::from_shape_fn(&shape, |_| 1).unwrap();
        assert_eq!(a.len(), 0);
        assert!(a.is_empty());
        assert_eq!(a.shape(), &shape);
        assert_eq!(a.to_vec(), Vec::<i32>::new());
    });
    empty!([0]);
    empty!([0, 1]);
    empty!([2, 0]);
    empty!([0, 1, 2]);
    empty!([2, 0, 1]);
    empty!([1, 2, 0]);
}

#[test]
fn from_shape_fn_in_linear_order()
{
    let (m, n, k) = (3, 4, 2);
    let a = LongArray::from_shape_fn(&[m, n, k], |c| (c[0] + 10 * c[1] + 100 * c[2]) as i64).unwrap();
    for (i, j, l) in iproduct!(0..m, 0..n, 0..k) {
        assert_eq!(a.get_at(&[i, j, l]).unwrap(), (i + 10 * j + 100 * l) as i64);
    }
    assert_eq!(a.get(1).unwrap(), 1);
    assert_eq!(a.get(m).unwrap(), 10);
    assert_eq!(a.get(m * n).unwrap(), 100);
}

#[test]
fn index_errors()
{
    let a = IntArray::zeros(&[2, 3]).unwrap();
    assert_eq!(a.get(6).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
    assert_eq!(a.get2(2, 0).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
    assert_eq!(a.get_at(&[0, 3]).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
    assert!(a.get_at(&[0]).is_err());
    assert!(a.size_of(2).is_err());

    let v = IntArray::zeros(&[4]).unwrap();
    assert!(v.get2(0, 0).is_err());
    assert!(v.rows().is_err());
    assert!(v.get_diagonal().is_err());
}

#[test]
fn error_message_names_values()
{
    let a = IntArray::zeros(&[3]).unwrap();
    let err = a.get(5).unwrap_err();
    assert_eq!(err.detail(), "index out of bounds; value 5 out of bound 3");
    assert!(err.to_string().contains("index out of range"));
}

#[test]
fn clone_is_a_handle_and_copy_is_not()
{
    let a = IntArray::from_vec(vec![1, 2, 3]);
    let b = a.clone();
    let c = a.copy();
    assert!(Array::same_instance(&a, &b));
    assert!(!Array::same_instance(&a, &c));
    b.set(0, 7).unwrap();
    assert_eq!(a.get(0).unwrap(), 7);
    assert_eq!(c.get(0).unwrap(), 1);
}

#[test]
fn fill_swap_and_assign()
{
    let a = IntArray::from_vec(vec![1, 2, 3, 4]);
    a.swap(0, 3).unwrap();
    assert_eq!(a.to_vec(), vec![4, 2, 3, 1]);

    let col = IntArray::zeros(&[2, 2]).unwrap();
    col.get_column(1).unwrap().fill(5).unwrap();
    assert_eq!(col.to_vec(), vec![0, 0, 5, 5]);

    let err = a.assign(&IntArray::from_vec(vec![1, 2])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
    a.assign(&col).unwrap();
    assert_eq!(a.to_vec(), vec![0, 0, 5, 5]);
}

#[test]
fn predicates_and_counts()
{
    let a = DoubleArray::zeros(&[1, 5]).unwrap();
    assert!(a.is_vector());
    assert!(a.is_matrix());
    assert!(!a.is_square());
    assert_eq!(a.rows().unwrap(), 1);
    assert_eq!(a.columns().unwrap(), 5);
    assert_eq!(a.vectors(1).unwrap(), 1);
    assert_eq!(a.vectors(0).unwrap(), 5);
}

#[test]
fn equality_and_hash_follow_elements()
{
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash(a: &IntArray) -> u64
    {
        let mut h = DefaultHasher::new();
        a.hash(&mut h);
        h.finish()
    }

    let a = IntArray::from_rows(&[vec![1, 2], vec![3, 4]]).unwrap();
    let b = IntArray::from_rows(&[vec![1, 3], vec![2, 4]]).unwrap().transpose();
    assert_eq!(a, b);
    assert_eq!(hash(&a), hash(&b));
    assert_ne!(a, a.reshape(&[4]).unwrap());
}

#[test]
fn debug_format()
{
    let a = IntArray::from_vec(vec![1, 2]);
    let s = format!("{:?}", a);
    assert!(s.starts_with("int array [2]"), "{}", s);
    assert!(format!("{:?}", a.transpose()).contains("(view)"));
}

#[test]
fn factory_allocates_zeroed_owning_arrays()
{
    let f = ArrayFactory::new();
    let a = f.complex_array(&[2, 2]).unwrap();
    assert!(!a.is_view());
    assert!(a.iter().all(|z| z.re == 0. && z.im == 0.));
    let m: Matrix<i32> = f.matrix(2, 3).unwrap();
    assert_eq!(m.shape(), [2, 3]);
}
