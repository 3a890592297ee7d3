use bytemuck::Zeroable;

/// Sequence is any type with a length and indexed access to its elements.
///
/// All containers and views of this crate implement it, as well as
/// standard slices, arrays and `Vec`. Generic algorithms, elementwise
/// operations and assignments between different container types are
/// written against this trait.
pub trait Sequence {
    type Elem;

    fn len(&self) -> usize;

    /// Returns reference to element at given index without bound check.
    ///
    /// # Safety
    ///
    /// Caller must guarantee `idx < self.len()`.
    unsafe fn elem_unchecked(&self, idx: usize) -> &Self::Elem;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns reference to element at given index.
    /// Panics if index is out of bound.
    #[inline]
    fn elem(&self, idx: usize) -> &Self::Elem {
        let len = self.len();
        assert!(idx < len, "index {} out of bound {}", idx, len);
        // SAFETY: bound checked above.
        unsafe { self.elem_unchecked(idx) }
    }

    #[inline]
    fn get_elem(&self, idx: usize) -> Option<&Self::Elem> {
        if idx < self.len() {
            // SAFETY: bound checked above.
            Some(unsafe { self.elem_unchecked(idx) })
        } else {
            None
        }
    }
}

pub trait SequenceMut: Sequence {
    /// Returns mutable reference to element at given index without bound check.
    ///
    /// # Safety
    ///
    /// Caller must guarantee `idx < self.len()`.
    unsafe fn elem_unchecked_mut(&mut self, idx: usize) -> &mut Self::Elem;

    #[inline]
    fn elem_mut(&mut self, idx: usize) -> &mut Self::Elem {
        let len = self.len();
        assert!(idx < len, "index {} out of bound {}", idx, len);
        // SAFETY: bound checked above.
        unsafe { self.elem_unchecked_mut(idx) }
    }
}

impl<T> Sequence for [T] {
    type Elem = T;

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    unsafe fn elem_unchecked(&self, idx: usize) -> &T {
        self.get_unchecked(idx)
    }
}

impl<T> SequenceMut for [T] {
    #[inline]
    unsafe fn elem_unchecked_mut(&mut self, idx: usize) -> &mut T {
        self.get_unchecked_mut(idx)
    }
}

impl<T, const N: usize> Sequence for [T; N] {
    type Elem = T;

    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    unsafe fn elem_unchecked(&self, idx: usize) -> &T {
        self.get_unchecked(idx)
    }
}

impl<T, const N: usize> SequenceMut for [T; N] {
    #[inline]
    unsafe fn elem_unchecked_mut(&mut self, idx: usize) -> &mut T {
        self.get_unchecked_mut(idx)
    }
}

impl<T> Sequence for Vec<T> {
    type Elem = T;

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    unsafe fn elem_unchecked(&self, idx: usize) -> &T {
        self.get_unchecked(idx)
    }
}

impl<T> SequenceMut for Vec<T> {
    #[inline]
    unsafe fn elem_unchecked_mut(&mut self, idx: usize) -> &mut T {
        self.get_unchecked_mut(idx)
    }
}

impl<S: Sequence + ?Sized> Sequence for &S {
    type Elem = S::Elem;

    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    unsafe fn elem_unchecked(&self, idx: usize) -> &S::Elem {
        (**self).elem_unchecked(idx)
    }
}

impl<S: Sequence + ?Sized> Sequence for &mut S {
    type Elem = S::Elem;

    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    unsafe fn elem_unchecked(&self, idx: usize) -> &S::Elem {
        (**self).elem_unchecked(idx)
    }
}

impl<S: SequenceMut + ?Sized> SequenceMut for &mut S {
    #[inline]
    unsafe fn elem_unchecked_mut(&mut self, idx: usize) -> &mut S::Elem {
        (**self).elem_unchecked_mut(idx)
    }
}

/// Iterator over elements of any sequence.
pub struct SeqIter<'a, S: ?Sized> {
    seq: &'a S,
    idx: usize,
    end: usize,
}

impl<'a, S: Sequence + ?Sized> SeqIter<'a, S> {
    #[inline]
    pub fn new(seq: &'a S) -> Self {
        SeqIter {
            seq,
            idx: 0,
            end: seq.len(),
        }
    }
}

impl<'a, S: Sequence + ?Sized> Iterator for SeqIter<'a, S> {
    type Item = &'a S::Elem;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.idx == self.end {
            return None;
        }
        // SAFETY: idx < end == len.
        let item = unsafe { self.seq.elem_unchecked(self.idx) };
        self.idx += 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.idx;
        (n, Some(n))
    }
}

impl<S: Sequence + ?Sized> ExactSizeIterator for SeqIter<'_, S> {}

/// Integer element usable as an index into a sequence.
pub trait IndexElem: Copy {
    /// Convert to index. Negative values map to out-of-bound indexes.
    fn to_index(self) -> usize;
}

macro_rules! impl_index_elem {
    ($($ty:ty),*) => {
        $(
            impl IndexElem for $ty {
                #[inline]
                fn to_index(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

impl_index_elem!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

#[inline]
fn is_nonzero<T: Zeroable + PartialEq>(v: &T) -> bool {
    *v != T::zeroed()
}

/// Returns true if any element is nonzero.
#[inline]
pub fn any<S>(seq: &S) -> bool
where
    S: Sequence + ?Sized,
    S::Elem: Zeroable + PartialEq,
{
    SeqIter::new(seq).any(is_nonzero)
}

/// Returns true if all elements are nonzero.
#[inline]
pub fn all<S>(seq: &S) -> bool
where
    S: Sequence + ?Sized,
    S::Elem: Zeroable + PartialEq,
{
    SeqIter::new(seq).all(is_nonzero)
}

/// Returns number of nonzero elements.
#[inline]
pub fn count_nonzero<S>(seq: &S) -> usize
where
    S: Sequence + ?Sized,
    S::Elem: Zeroable + PartialEq,
{
    SeqIter::new(seq).filter(|v| is_nonzero(*v)).count()
}

/// Returns sum of all elements of an integral sequence.
#[inline]
pub fn sum<S>(seq: &S) -> i64
where
    S: Sequence + ?Sized,
    S::Elem: Copy + Into<i64>,
{
    SeqIter::new(seq).map(|v| (*v).into()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_impls() {
        let arr = [1, 2, 3];
        assert_eq!(3, Sequence::len(&arr));
        assert_eq!(2, *arr.elem(1));
        assert_eq!(None, arr.get_elem(3));
        let v = vec![4u8, 5];
        assert_eq!(Some(&5), v.get_elem(1));
        let s: &[u8] = &v;
        assert_eq!(4, *s.elem(0));
        let mut m = vec![0i32; 2];
        *m.elem_mut(1) = 9;
        assert_eq!(vec![0, 9], m);
        let r = &mut m;
        *r.elem_mut(0) = 1;
        assert_eq!(vec![1, 9], m);
    }

    #[test]
    #[should_panic]
    fn test_elem_out_of_bound() {
        let arr = [1, 2, 3];
        let _ = arr.elem(3);
    }

    #[test]
    fn test_seq_iter() {
        let arr = [1, 2, 3];
        let it = SeqIter::new(&arr);
        assert_eq!(3, it.len());
        assert_eq!(vec![&1, &2, &3], it.collect::<Vec<_>>());
        let empty: [i32; 0] = [];
        assert_eq!(0, SeqIter::new(&empty).count());
    }

    #[test]
    fn test_any_all_sum() {
        assert!(any(&[0, 0, 1]));
        assert!(!any(&[0.0f64, 0.0]));
        assert!(all(&[true, true]));
        assert!(!all(&[1, 0, 2]));
        assert!(all::<[i32]>(&[]));
        assert_eq!(2, count_nonzero(&[1u8, 0, 7]));
        assert_eq!(6, sum(&[1i32, 2, 3]));
        assert_eq!(-1, sum(&vec![-3i16, 2]));
    }

    #[test]
    fn test_index_elem() {
        assert_eq!(3, 3u8.to_index());
        assert_eq!(7, 7i64.to_index());
        assert_eq!(usize::MAX, (-1i32).to_index());
    }
}
