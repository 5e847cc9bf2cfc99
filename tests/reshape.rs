use quickcheck::quickcheck;

use ndstride::{Array, BitArray, ErrorKind, IntArray, Range};
use ndstride_gen::array_builder::ArrayBuilder;

#[test]
fn reshape()
{
    let a: IntArray = ArrayBuilder::new(&[2, 6]).build();
    let b = a.reshape(&[3, 4]).unwrap();
    assert_eq!(b.shape(), &[3, 4]);
    assert_eq!(b.strides(), &[1, 3]);
    assert_eq!(b.to_vec(), a.to_vec());
    assert!(b.is_view());

    // a view of natural data shares storage
    b.set2(2, 3, -1).unwrap();
    assert_eq!(a.get(11).unwrap(), -1);
}

#[test]
fn reshape_error()
{
    let a: IntArray = ArrayBuilder::new(&[2, 6]).build();
    let err = a.reshape(&[5, 2]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
    assert!(a.reshape(&[13]).is_err());
}

#[test]
fn reshape_transposed_copies()
{
    let a: IntArray = ArrayBuilder::new(&[2, 3]).build();
    let t = a.transpose();
    let r = t.reshape(&[6]).unwrap();
    assert_eq!(r.to_vec(), t.to_vec());
    assert_eq!(r.to_vec(), vec![0, 2, 4, 1, 3, 5]);
    r.set(0, 100).unwrap();
    assert_eq!(a.get(0).unwrap(), 0);
}

#[test]
fn reshape_of_a_row_view()
{
    // a single row of a column-major matrix is not naturally strided
    let a: IntArray = ArrayBuilder::new(&[3, 3]).build();
    let row = a.get_row(1).unwrap();
    let r = row.reshape(&[3]).unwrap();
    assert_eq!(r.to_vec(), vec![1, 4, 7]);
}

#[test]
fn ravel()
{
    let a: IntArray = ArrayBuilder::new(&[2, 2, 2]).build();
    let r = a.ravel();
    assert_eq!(r.shape(), &[8]);
    assert_eq!(r.to_vec(), (0..8).collect::<Vec<_>>());
    assert_eq!(a.transpose().ravel().to_vec(), vec![0, 4, 2, 6, 1, 5, 3, 7]);
}

#[test]
fn slice_by_range()
{
    let a: IntArray = ArrayBuilder::new(&[3, 3]).build();
    let s = a.slice(&Range::with_step(0, 9, 4).unwrap()).unwrap();
    assert_eq!(s.to_vec(), vec![0, 4, 8]);
    s.set(1, 40).unwrap();
    assert_eq!(a.get2(1, 1).unwrap(), 40);
}

#[test]
fn slice_by_indices_and_masks()
{
    let a = IntArray::from_rows(&[vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
    assert_eq!(a.slice_indices(&[5, 0]).unwrap().to_vec(), vec![6, 1]);
    assert!(a.slice_indices(&[6]).is_err());

    let cols = a.slice_columns(&[2, 0]).unwrap();
    assert_eq!(cols.to_rows().unwrap(), vec![vec![3, 1], vec![6, 4]]);
    let rows = a.slice_rows_mask(&BitArray::from_vec(vec![false, true])).unwrap();
    assert_eq!(rows.to_rows().unwrap(), vec![vec![4, 5, 6]]);
    let err = a.slice_columns_mask(&BitArray::from_vec(vec![true])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ShapeMismatch);

    let g = a.select_indices(&[vec![1, 1], vec![0, 2]]).unwrap();
    assert_eq!(g.shape(), &[2]);
    assert_eq!(g.to_vec(), vec![4, 6]);
    let err = a.select_indices(&[vec![1], vec![0, 2]]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
    let sq = IntArray::from_rows(&[vec![1, 2], vec![3, 4]]).unwrap();
    assert_eq!(sq.select_indices(&[vec![0, 1], vec![0, 1]]).unwrap().to_vec(), vec![1, 4]);
}

quickcheck! {
    fn reshape_keeps_size_and_order(d0: u8, d1: u8, d2: u8) -> bool {
        let (d0, d1, d2) = (d0 as usize % 5 + 1, d1 as usize % 5 + 1, d2 as usize % 5 + 1);
        let a: IntArray = ArrayBuilder::new(&[d0, d1, d2]).build();
        let ok = a.reshape(&[d0 * d1, d2]).map(|r| r.len() == a.len() && r.to_vec() == a.to_vec());
        let bad = a.reshape(&[d0 * d1 * d2 + 1]).map_err(|e| e.kind());
        matches!(ok, Ok(true)) && bad.err() == Some(ErrorKind::ShapeMismatch)
    }

    fn mask_slice_keeps_true_positions(mask: Vec<bool>) -> bool {
        let n = mask.len();
        let a: IntArray = Array::from_vec((0..n as i32).map(|x| x * 3).collect());
        let m = BitArray::from_vec(mask.clone());
        let s = a.slice_mask(&m).unwrap();
        let expect: Vec<i32> = mask.iter().enumerate().filter(|&(_, &b)| b).map(|(i, _)| i as i32 * 3).collect();
        s.len() == m.count_true() && s.to_vec() == expect
    }
}
