//! Binary search and partition over sorted slices.
use crate::seq::Sequence;
use std::cmp::Ordering;

/// Returns index of the first element where predicate no longer
/// evaluates to `AFFIRM`.
///
/// The slice must be partitioned: all elements satisfying
/// `pred(x) == AFFIRM` precede the others.
#[inline]
pub fn extreme_bound<const AFFIRM: bool, T, F>(data: &[T], mut pred: F) -> usize
where
    F: FnMut(&T) -> bool,
{
    let mut first = 0;
    let mut count = data.len();
    while count > 0 {
        let step = count / 2;
        let mid = first + step;
        // SAFETY: mid < first + count <= len.
        if pred(unsafe { data.get_unchecked(mid) }) == AFFIRM {
            first = mid + 1;
            count -= step + 1;
        } else {
            count = step;
        }
    }
    first
}

/// Returns index of the first element where predicate is false.
#[inline]
pub fn lower_bound<T, F>(data: &[T], pred: F) -> usize
where
    F: FnMut(&T) -> bool,
{
    extreme_bound::<true, T, F>(data, pred)
}

/// Returns index of the first element where predicate is true.
#[inline]
pub fn upper_bound<T, F>(data: &[T], pred: F) -> usize
where
    F: FnMut(&T) -> bool,
{
    extreme_bound::<false, T, F>(data, pred)
}

/// Narrow a sorted slice to the region where `sign` returns `Equal`,
/// and return the length of that region.
///
/// The slice must be ordered as `Less` elements, then `Equal` elements,
/// then `Greater` elements. An empty region is positioned where the
/// `Equal` elements would be inserted.
pub fn range_sign<T, F>(data: &mut &[T], mut sign: F) -> usize
where
    F: FnMut(&T) -> Ordering,
{
    let src = *data;
    // first pass locates start of equal region, and bounds the
    // search range of the second pass.
    let mut first0 = 0;
    let mut count0 = src.len();
    let mut first1 = 0;
    let mut last1 = src.len();
    while count0 > 0 {
        let step = count0 / 2;
        let mid = first0 + step;
        match sign(&src[mid]) {
            Ordering::Less => {
                first0 = mid + 1;
                count0 -= step + 1;
                first1 = first1.max(first0);
            }
            Ordering::Equal => {
                count0 = step;
                first1 = first1.max(mid + 1);
            }
            Ordering::Greater => {
                last1 = mid;
                count0 = step;
                first1 = first1.max(first0);
            }
        }
    }
    // second pass locates end of equal region.
    let mut count1 = last1.saturating_sub(first1);
    while count1 > 0 {
        let step = count1 / 2;
        let mid = first1 + step;
        if sign(&src[mid]) != Ordering::Greater {
            first1 = mid + 1;
            count1 -= step + 1;
        } else {
            count1 = step;
        }
    }
    let end = first1.max(first0);
    *data = &src[first0..end];
    end - first0
}

/// Count leading elements matching predicate, probing every `step`
/// elements before scanning the last gap linearly.
///
/// Matching elements must form a prefix. With a large step, long runs
/// of matches are covered with fewer predicate calls.
pub fn count_filter_front<S, F>(seq: &S, mut pred: F, step: usize) -> usize
where
    S: Sequence + ?Sized,
    F: FnMut(&S::Elem) -> bool,
{
    let len = seq.len();
    if len == 0 {
        return 0;
    }
    let step = step.clamp(1, len);
    let mut pos = 0;
    let mut end = len;
    // SAFETY: every access below is guarded by pos < end <= len.
    while pos < end && pred(unsafe { seq.elem_unchecked(pos) }) {
        pos += step;
    }
    if pos < end {
        end = pos;
        pos += 1;
    }
    pos = pos.saturating_sub(step);
    while pos < end && pred(unsafe { seq.elem_unchecked(pos) }) {
        pos += 1;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_bounds() {
        let data = [1, 2, 2, 2, 5, 7];
        assert_eq!(1, lower_bound(&data, |x| *x < 2));
        assert_eq!(4, upper_bound(&data, |x| *x > 2));
        assert_eq!(0, lower_bound(&data, |x| *x < 0));
        assert_eq!(6, lower_bound(&data, |x| *x < 100));
        assert_eq!(4, extreme_bound::<true, _, _>(&data, |x| *x <= 2));
        let empty: [i32; 0] = [];
        assert_eq!(0, lower_bound(&empty, |x| *x < 1));
    }

    #[test]
    fn test_bounds_random() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let n = rng.gen_range(0..64);
            let mut data: Vec<i32> = (0..n).map(|_| rng.gen_range(-20..20)).collect();
            data.sort();
            let v = rng.gen_range(-25..25);
            assert_eq!(data.partition_point(|x| *x < v), lower_bound(&data, |x| *x < v));
            assert_eq!(data.partition_point(|x| *x <= v), upper_bound(&data, |x| *x > v));
        }
    }

    #[test]
    fn test_range_sign() {
        let data = [1, 3, 3, 3, 4, 9];
        let mut s: &[i32] = &data;
        assert_eq!(3, range_sign(&mut s, |x| x.cmp(&3)));
        assert_eq!(&[3, 3, 3], s);

        let mut s: &[i32] = &data;
        assert_eq!(0, range_sign(&mut s, |x| x.cmp(&5)));
        assert!(s.is_empty());
        assert_eq!(data[5..].as_ptr(), s.as_ptr());

        let mut s: &[i32] = &data;
        assert_eq!(6, range_sign(&mut s, |_| Ordering::Equal));
        assert_eq!(&data, s);

        let mut s: &[i32] = &[];
        assert_eq!(0, range_sign(&mut s, |x| x.cmp(&0)));
    }

    #[test]
    fn test_range_sign_random() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let n = rng.gen_range(0..50);
            let mut data: Vec<i32> = (0..n).map(|_| rng.gen_range(0..8)).collect();
            data.sort();
            let v = rng.gen_range(-1..9);
            let mut s: &[i32] = &data;
            let cnt = range_sign(&mut s, |x| x.cmp(&v));
            let lo = data.partition_point(|x| *x < v);
            let hi = data.partition_point(|x| *x <= v);
            assert_eq!(hi - lo, cnt);
            assert_eq!(&data[lo..hi], s);
        }
    }

    #[test]
    fn test_count_filter_front() {
        let data = [1, 1, 1, 1, 1, 1, 1, 0, 0, 0];
        for step in 0..12 {
            assert_eq!(7, count_filter_front(&data, |x| *x == 1, step));
        }
        let all = [2; 10];
        for step in 1..12 {
            assert_eq!(10, count_filter_front(&all, |x| *x == 2, step));
            assert_eq!(0, count_filter_front(&all, |x| *x == 3, step));
        }
        let empty: [i32; 0] = [];
        assert_eq!(0, count_filter_front(&empty, |_| true, 3));
    }
}
