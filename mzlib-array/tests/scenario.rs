use mzlib_array::{
    ElementwiseConstOps, ElementwiseOps, ErrorKind, Sequence, Slice, SliceMut, Span, Stack, Vector,
    XA,
};
use mzlib_common::growth::Exact;
use mzlib_common::stream::{MemStream, Stream};
use proptest::prelude::*;

#[test]
fn sort_view_and_search() {
    let mut v: Vector<i32> = Vector::from(vec![5, 3, 1, 4, 2]);
    v.sort();
    assert_eq!([1, 2, 3, 4, 5], v);
    assert_eq!([1, 2, 3], v.head(3));
    assert_eq!(3, v.find(&4));
    assert_eq!(-1, v.find(&9));
}

#[test]
fn size_mismatch_leaves_receiver_untouched() {
    let mut v: Vector<i32> = Vector::from(vec![1]);
    let err = v.add_seq(&[1, 2]).unwrap_err();
    assert_eq!(ErrorKind::Domain, err.kind());
    assert_eq!([1], v);

    let mut e: Vector<i32> = Vector::new();
    assert!(e.add_seq(&[1]).is_err());
    assert!(e.is_empty());
}

#[test]
fn select_by_mask() -> anyhow::Result<()> {
    let v: Vector<i32> = (1..=5).collect();
    let picked = v.select(&[1u8, 0, 1, 0, 1])?;
    assert_eq!([1, 3, 5], picked);
    Ok(())
}

#[test]
fn interop_across_containers() -> anyhow::Result<()> {
    // 3x2 row-major matrix
    let mut matrix: Vector<f64> = Vector::from(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let col: Vector<f64> = Slice::column(matrix.as_slice(), 1, 2)?.to_vec().into();
    assert_eq!([2.0, 4.0, 6.0], col);

    let mut sum: Vector<f64> = Vector::from(vec![0.0; 3]);
    sum.add_seq(&col)?.add_seq(&Span::new(&[1.0, 1.0, 1.0]))?;
    assert_eq!([3.0, 5.0, 7.0], sum);

    let mut first = SliceMut::column(matrix.as_mut_slice(), 0, 2)?;
    first.assign_seq(&sum)?;
    assert_eq!([3.0, 2.0, 5.0, 4.0, 7.0, 6.0], matrix);

    let xa = XA::from_slice(&[2, 4]);
    let gathered = matrix.gather_checked(&xa)?;
    assert_eq!([5.0, 7.0], gathered);
    assert_eq!("[5.0,7.0]", gathered.string_with("{:.1}", ",", "[]")?);
    Ok(())
}

#[test]
fn stack_references_vector_elements() {
    let v: Vector<String> = vec!["x".to_string(), "y".to_string()].into();
    let mut stack = Stack::new();
    for s in &v {
        stack.push(s);
    }
    assert_eq!(Some(&v[1]), stack.pop());
    assert_eq!(1, stack.len());
}

#[test]
fn serialize_through_stream() -> anyhow::Result<()> {
    let v: Vector<u16> = Vector::from(vec![7, 8, 9]);
    let mut s = MemStream::new();
    v.save_labeled(&mut s, 42)?;
    v.save(&mut s)?;
    let mut a: Vector<u16> = Vector::new();
    let mut b: Vector<u16> = Vector::new();
    assert!(!a.load_labeled(&mut s, 42)?);
    b.load(&mut s)?;
    assert!(s.at_end()?);
    assert_eq!(v, a);
    assert_eq!(v, b);
    Ok(())
}

proptest! {
    #[test]
    fn growth_reallocates_logarithmically(n in 1usize..5000) {
        let mut v: Vector<u32> = Vector::new();
        let mut reallocs = 0;
        let mut cap = v.capacity();
        for i in 0..n {
            v.push_back(i as u32);
            if v.capacity() != cap {
                reallocs += 1;
                cap = v.capacity();
            }
        }
        let bound = usize::BITS - n.leading_zeros() + 1;
        prop_assert!(reallocs <= bound as usize);
        prop_assert_eq!(n, v.len());
    }

    #[test]
    fn exact_growth_matches_length(n in 0usize..64) {
        let mut v: Vector<u8, Exact> = Vector::new();
        for i in 0..n {
            v.push_back(i as u8);
        }
        prop_assert_eq!(n, v.capacity());
    }

    #[test]
    fn unique_is_idempotent(mut data in prop::collection::vec(0i32..10, 0..100)) {
        data.sort();
        let mut v: Vector<i32> = Vector::from(data.clone());
        v.unique();
        let once = v.clone();
        prop_assert_eq!(0, v.unique());
        prop_assert_eq!(once, v.clone());
        data.dedup();
        prop_assert_eq!(data.as_slice(), v.as_slice());
    }

    #[test]
    fn cast_round_trip(data in prop::collection::vec(any::<u32>(), 0..64)) {
        let v: Vector<u32> = Vector::from(data);
        let floats = v.span().cast_as::<f32>();
        let back = floats.cast_as::<u32>();
        prop_assert_eq!(v.len(), back.len());
        prop_assert!(back.as_slice() == v.as_slice());
    }

    #[test]
    fn unchecked_pop_matches_checked(data in prop::collection::vec(any::<i64>(), 1..50)) {
        let mut a: Vector<i64> = Vector::from(data.clone());
        let mut b: Vector<i64> = Vector::from(data);
        while !a.is_empty() {
            let x = a.pop_back().unwrap();
            let y = unsafe { b.pop_back_unchecked() };
            prop_assert_eq!(x, y);
        }
        prop_assert!(b.is_empty());
        prop_assert_eq!(0, Sequence::len(&a));
        a.expand_to_capacity();
        b.expand_to_capacity();
        prop_assert_eq!(a.as_slice(), b.as_slice());
        prop_assert!(a.iter().all(|x| *x == 0));
    }
}
