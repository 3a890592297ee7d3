use crate::seq::{Sequence, SequenceMut};
use crate::vector::Vector;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Vector of `i32` used as sorted index sets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XA(Vector<i32>);

impl XA {
    #[inline]
    pub const fn new() -> Self {
        XA(Vector::new())
    }

    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        XA(Vector::with_capacity(cap))
    }

    /// Copy of the slice, with capacity equal to its length.
    #[inline]
    pub fn from_slice(src: &[i32]) -> Self {
        XA(Vector::from(src))
    }

    #[inline]
    pub fn clear(&mut self) -> &mut Self {
        self.0.clear();
        self
    }

    /// Returns whether key is present. Elements must be sorted.
    #[inline]
    pub fn exists(&self, key: i32) -> bool {
        self.0.as_slice().binary_search(&key).is_ok()
    }

    /// Replace content with rhs. Takes over the rhs buffer when it is at
    /// least as large as the current one, otherwise copies into the
    /// current buffer.
    #[inline]
    pub fn assign_from(&mut self, mut rhs: XA) -> &mut Self {
        if self.0.capacity() <= rhs.0.capacity() {
            std::mem::swap(&mut self.0, &mut rhs.0);
        } else {
            self.0.resize(rhs.len(), false);
            self.0.as_mut_slice().copy_from_slice(rhs.as_slice());
        }
        self
    }

    #[inline]
    pub fn into_inner(self) -> Vector<i32> {
        self.0
    }
}

impl Deref for XA {
    type Target = Vector<i32>;
    #[inline]
    fn deref(&self) -> &Vector<i32> {
        &self.0
    }
}

impl DerefMut for XA {
    #[inline]
    fn deref_mut(&mut self) -> &mut Vector<i32> {
        &mut self.0
    }
}

impl From<Vector<i32>> for XA {
    #[inline]
    fn from(src: Vector<i32>) -> Self {
        XA(src)
    }
}

impl Sequence for XA {
    type Elem = i32;

    #[inline]
    fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    unsafe fn elem_unchecked(&self, idx: usize) -> &i32 {
        self.0.get_unchecked(idx)
    }
}

impl SequenceMut for XA {
    #[inline]
    unsafe fn elem_unchecked_mut(&mut self, idx: usize) -> &mut i32 {
        self.0.get_unchecked_mut(idx)
    }
}

impl fmt::Display for XA {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::elementwise::display_seq(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elementwise::ElementwiseOps;

    #[test]
    fn test_xa_basic() {
        let mut xa = XA::from_slice(&[1, 3, 5]);
        assert_eq!(3, xa.len());
        assert_eq!(3, xa.capacity());
        assert!(xa.exists(3));
        assert!(!xa.exists(4));
        assert!(!XA::new().exists(0));
        xa.push_back(7);
        assert!(xa.exists(7));
        assert_eq!("[1,3,5,7]", xa.to_string());
        xa.clear().push_back(2);
        assert_eq!([2], *xa);
        let c = xa.clone();
        assert_eq!(xa, c);
    }

    #[test]
    fn test_xa_assign_takes_larger_buffer() {
        let mut dst = XA::with_capacity(2);
        dst.push_back(9);
        let mut src = XA::with_capacity(8);
        src.append(&[1, 2, 3]);
        let src_ptr = src.as_ptr();
        dst.assign_from(src);
        assert_eq!([1, 2, 3], *dst);
        assert_eq!(8, dst.capacity());
        assert_eq!(src_ptr, dst.as_ptr());
    }

    #[test]
    fn test_xa_assign_copies_into_larger_buffer() {
        let mut dst = XA::with_capacity(16);
        dst.append(&[9, 9, 9, 9]);
        let dst_ptr = dst.as_ptr();
        dst.assign_from(XA::from_slice(&[4, 5]));
        assert_eq!([4, 5], *dst);
        assert_eq!(16, dst.capacity());
        assert_eq!(dst_ptr, dst.as_ptr());
    }

    #[test]
    fn test_xa_as_sequence() {
        let xa = XA::from_slice(&[1, 2]);
        let mut v: Vector<i32> = Vector::from(vec![10, 20]);
        v.add_seq(&xa).unwrap();
        assert_eq!([11, 22], v);
        let mut ys = XA::from_slice(&[1, 1]);
        ys.mul_scalar(3);
        assert_eq!([3, 3], *ys);
    }
}
